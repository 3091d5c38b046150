use crate::model::CaseRecord;

const ACCENT_BLUE: &str = "#5287b7";
const BODY_GREY: &str = "#5e5e5e";
const SUMMARY_GREY: &str = "#424242";
const PAGE_WHITE: &str = "#ffffff";
const LINE_BREAK: &str = "<br/>";

#[derive(Debug, Clone, Copy)]
struct ParagraphStyle {
    color: &'static str,
    font_size_px: u32,
    bold: bool,
    align: &'static str,
    line_height: &'static str,
    indent_px: u32,
    margin_top_px: u32,
    margin_bottom_px: u32,
}

impl ParagraphStyle {
    const BODY: Self = Self {
        color: BODY_GREY,
        font_size_px: 16,
        bold: false,
        align: "justify",
        line_height: "2",
        indent_px: 16,
        margin_top_px: 0,
        margin_bottom_px: 0,
    };

    const HEADING: Self = Self {
        color: ACCENT_BLUE,
        bold: true,
        align: "left",
        ..Self::BODY
    };

    const BANNER: Self = Self {
        line_height: "1.6",
        ..Self::BODY
    };

    const INTRO: Self = Self {
        margin_top_px: 8,
        margin_bottom_px: 8,
        ..Self::BANNER
    };

    const CASE_NAME: Self = Self {
        font_size_px: 18,
        line_height: "1.6",
        ..Self::HEADING
    };

    const CASE_SUMMARY: Self = Self {
        color: SUMMARY_GREY,
        font_size_px: 18,
        ..Self::HEADING
    };

    fn css(&self) -> String {
        let mut css = format!(
            "color:{};font-size:{}px;text-align:{};line-height:{};margin-top:{}px;margin-bottom:{}px;margin-left:{}px;margin-right:{}px;background-color:{};",
            self.color,
            self.font_size_px,
            self.align,
            self.line_height,
            self.margin_top_px,
            self.margin_bottom_px,
            self.indent_px,
            self.indent_px,
            PAGE_WHITE,
        );
        if self.bold {
            css.push_str("font-weight:bold;");
        }
        css
    }
}

fn styled_paragraph(inner_html: &str, style: ParagraphStyle) -> String {
    format!("<p style=\"{}\">{}</p>", style.css(), inner_html)
}

fn banner(label: &str) -> String {
    let span = format!(
        "<span style=\"background-color:{ACCENT_BLUE};color:{PAGE_WHITE};\">{}</span>",
        escape_html(label)
    );
    styled_paragraph(&span, ParagraphStyle::BANNER)
}

fn section_heading(label: &str) -> String {
    styled_paragraph(&format!("【{label}】"), ParagraphStyle::HEADING)
}

pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn paragraphs_html(html: &str) -> Vec<String> {
    html.split("\n\n")
        .map(str::trim)
        .filter(|paragraph| !paragraph.is_empty())
        .map(|paragraph| paragraph.replace('\n', LINE_BREAK))
        .collect()
}

pub fn format_relevant_index(html: &str) -> String {
    let mut output = String::with_capacity(html.len());
    let mut seen_title = false;
    for character in html.chars() {
        if character == '《' {
            if seen_title {
                output.push_str(LINE_BREAK);
            }
            seen_title = true;
        }
        output.push(character);
    }

    output
        .replace("一审", "<br/><br/>一审")
        .replace("二审", "<br/>二审")
        .replace("本案例文本已于", "<br/><br/>本案例文本已于")
}

pub fn render_article(record: &CaseRecord) -> String {
    let mut parts = Vec::<String>::new();

    parts.push(banner("今日案例播客版  干货知识轻松听"));
    parts.push(LINE_BREAK.to_string());
    parts.push(styled_paragraph(
        &format!(
            "本期推送人民法院案例库编号为{}的参考案例",
            escape_html(&record.case_number)
        ),
        ParagraphStyle::INTRO,
    ));
    parts.push(banner("延伸阅读"));
    parts.push(LINE_BREAK.to_string());

    parts.push(styled_paragraph(
        &escape_html(&record.case_name),
        ParagraphStyle::CASE_NAME,
    ));
    parts.push(styled_paragraph(
        &escape_html(&record.case_desc),
        ParagraphStyle::CASE_SUMMARY,
    ));

    parts.push(format!("{LINE_BREAK}{}{LINE_BREAK}", section_heading("关键词")));
    parts.push(styled_paragraph(
        &escape_html(&record.key_word),
        ParagraphStyle::BODY,
    ));

    parts.push(format!("{LINE_BREAK}{}{LINE_BREAK}", section_heading("基本案情")));
    for paragraph in paragraphs_html(&escape_html(&record.case_text)) {
        parts.push(styled_paragraph(&paragraph, ParagraphStyle::BODY));
        parts.push(LINE_BREAK.to_string());
    }

    parts.push(format!("{}{LINE_BREAK}", section_heading("裁判理由")));
    for paragraph in paragraphs_html(&escape_html(&record.trial_process)) {
        parts.push(styled_paragraph(&paragraph, ParagraphStyle::BODY));
        parts.push(LINE_BREAK.to_string());
    }

    parts.push(format!("{}{LINE_BREAK}", section_heading("裁判要旨")));
    for paragraph in paragraphs_html(&escape_html(&record.trial_abbr)) {
        parts.push(styled_paragraph(&paragraph, ParagraphStyle::BODY));
    }

    parts.push(format!("{LINE_BREAK}{}{LINE_BREAK}", section_heading("关联索引")));
    let relevant_index = format_relevant_index(&escape_html(&record.relevant_index));
    for paragraph in paragraphs_html(&relevant_index) {
        parts.push(styled_paragraph(&paragraph, ParagraphStyle::BODY));
    }

    parts.join("\n")
}
