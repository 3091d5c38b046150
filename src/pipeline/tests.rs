use super::CasePipeline;
use super::fields::{FieldParser, UNKNOWN_CASE_NAME, UNKNOWN_CASE_NUMBER};
use super::normalize::{TextNormalizer, collapse_repeated_ideographs};
use super::reflow::reflow;
use super::sections::{SectionPattern, fuzzy_find};
use crate::model::{CaseRecord, SourceKind};
use crate::render::render_article;

const SCENARIO: &str = "2025-12-3-001-007\n某某案\n简要案情文本关键词甲乙基本案情正文裁判理由正文裁判要旨正文关联索引《刑法》第一条一审××法院二审××法院本案例文本已于2024年公布";

fn normalizer() -> TextNormalizer {
    TextNormalizer::new().unwrap()
}

fn parser() -> FieldParser {
    FieldParser::new().unwrap()
}

#[test]
fn normalize_removes_page_markers() {
    let normalizer = normalizer();
    assert_eq!(normalizer.normalize("正文第 3 页\n继续1/10页内容"), "正文\n继续内容");
    assert_eq!(normalizer.normalize("第12页"), "");
}

#[test]
fn normalize_drops_trailing_blank_lines() {
    let normalizer = normalizer();
    assert_eq!(normalizer.normalize("正文  \n\n\n"), "正文");
    assert_eq!(normalizer.normalize("正文\n第2页\n"), "正文");
}

#[test]
fn normalize_removes_fraction_marker_whole() {
    assert_eq!(normalizer().normalize("结尾。3 / 10 页"), "结尾。");
}

#[test]
fn normalize_removes_repeated_and_letter_spaced_watermarks() {
    let normalizer = normalizer();
    assert_eq!(
        normalizer.normalize("人民法院案例库人 民 法 院 案 例 库\n裁判要旨"),
        "\n裁判要旨"
    );
    assert_eq!(normalizer.normalize("甲人民法院案例库乙"), "甲乙");
}

#[test]
fn normalize_collapses_three_or_more_repeats_only() {
    let normalizer = normalizer();
    assert_eq!(normalizer.normalize("案 案 案"), "案");
    assert_eq!(normalizer.normalize("案案案案案"), "案");
    assert_eq!(normalizer.normalize("事 事\t事实"), "事实");
    assert_eq!(normalizer.normalize("案 案"), "案 案");
    assert_eq!(normalizer.normalize("案案件"), "案案件");
}

#[test]
fn collapse_keeps_whitespace_after_the_last_repeat() {
    assert_eq!(collapse_repeated_ideographs("甲 甲 甲 乙"), "甲 乙");
    assert_eq!(collapse_repeated_ideographs("aaa 111"), "aaa 111");
}

#[test]
fn normalize_trims_trailing_whitespace_and_keeps_line_breaks() {
    assert_eq!(normalizer().normalize("第一行  \n\n第二行\t"), "第一行\n\n第二行");
    assert_eq!(normalizer().normalize(""), "");
}

#[test]
fn normalize_is_idempotent() {
    let normalizer = normalizer();
    let samples = [
        "",
        SCENARIO,
        "案第1页案案",
        "1第2页页",
        "人民法院第2页案例库正文",
        "关 关 关 键 词\n  \n第 3 页\n人民法院案例库人民法院案例库",
        "被告人张三于2023年\n在某地殴打他人。   \n1/2页",
    ];

    for sample in samples {
        let once = normalizer.normalize(sample);
        assert_eq!(normalizer.normalize(&once), once, "sample: {sample:?}");
    }

    assert_eq!(normalizer.normalize("案第1页案案"), "案");
    assert_eq!(normalizer.normalize("1第2页页"), "");
    assert_eq!(normalizer.normalize("人民法院第2页案例库正文"), "正文");
}

#[test]
fn reflow_never_merges_after_sentence_terminal() {
    for terminal in ['。', '！', '？', '：', '；', '.', '!', '?', ':'] {
        let separator = if terminal == '。' { "\n\n" } else { "\n" };
        assert_eq!(
            reflow(&format!("第一行{terminal}\n第二行")),
            format!("第一行{terminal}{separator}第二行")
        );
    }
}

#[test]
fn reflow_joins_broken_lines_and_drops_blank_lines() {
    let text = "本院认为，被告人\n\n  的行为构成犯罪，应当依法惩处，并处罚金二十万元整以示惩戒。\n下一段";
    assert_eq!(
        reflow(text),
        "本院认为，被告人的行为构成犯罪，应当依法惩处，并处罚金二十万元整以示惩戒。\n下一段"
    );
}

#[test]
fn reflow_breaks_paragraph_after_short_sentence_only() {
    let twenty = "一二三四五六七八九十一二三四五六七八九十。";
    let nineteen = "一二三四五六七八九十一二三四五六七八九。";
    assert_eq!(reflow(&format!("{twenty}\n后文")), format!("{twenty}\n后文"));
    assert_eq!(reflow(&format!("{nineteen}\n后文")), format!("{nineteen}\n\n后文"));
}

#[test]
fn reflow_never_emits_blank_runs() {
    let reflowed = reflow("甲。\n\n\n乙。\n\n丙。\n");
    assert_eq!(reflowed, "甲。\n\n乙。\n\n丙。");
    assert_eq!(reflow(""), "");
    assert_eq!(reflow("\n \n\t\n"), "");
}

#[test]
fn fuzzy_keyword_matches_spaced_and_plain_forms_identically() {
    let spaced = fuzzy_find("前言关 键 词甲乙基本案情", &["关键词"], &["基本案情"]).unwrap();
    let plain = fuzzy_find("前言关键词甲乙基本案情", &["关键词"], &["基本案情"]).unwrap();
    let broken = fuzzy_find("前言关\n键\t词甲乙基 本 案 情", &["关键词"], &["基本案情"]).unwrap();
    assert_eq!(spaced, "甲乙");
    assert_eq!(plain, "甲乙");
    assert_eq!(broken, "甲乙");
}

#[test]
fn fuzzy_find_takes_shortest_body_and_alternatives() {
    assert_eq!(
        fuzzy_find("关键词A基本案情B基本案情", &["关键词"], &["基本案情"]).unwrap(),
        "A"
    );
    assert_eq!(
        fuzzy_find("裁判要点 AAA 关联索引", &["裁判要旨", "裁判要点"], &["关联索引"]).unwrap(),
        "AAA"
    );
    assert_eq!(
        fuzzy_find("a.b*c(d)", &["a.b"], &["(d)"]).unwrap(),
        "*c"
    );
}

#[test]
fn fuzzy_find_returns_empty_when_boundary_missing() {
    assert_eq!(fuzzy_find("没有标记", &["关键词"], &["基本案情"]).unwrap(), "");
    assert_eq!(
        fuzzy_find("基本案情X关键词Y", &["关键词"], &["基本案情"]).unwrap(),
        ""
    );
}

#[test]
fn fuzzy_find_rejects_empty_keywords() {
    assert!(fuzzy_find("text", &[], &["基本案情"]).is_err());
    assert!(fuzzy_find("text", &[""], &["基本案情"]).is_err());
    assert!(SectionPattern::new(&["关键词"], &[" "]).is_err());
}

#[test]
fn section_to_end_captures_rest_of_document() {
    let pattern = SectionPattern::to_end(&["关联索引"]).unwrap();
    assert_eq!(pattern.find("x关 联 索 引 《刑法》\n第一条 \n"), "《刑法》\n第一条");
    assert_eq!(pattern.find("没有索引"), "");
}

#[test]
fn parse_recovers_every_section_of_a_synthetic_document() {
    let text = "2025-12-3-001-007\n张三诉李四合同纠纷案\n摘要内容\n关键词\n民事 合同\n基本案情\n事实段落。\n裁判理由\n理由段落。\n裁判要旨\n要旨段落。\n关联索引\n《民法典》第五百条";

    let record = parser().parse(text);
    assert_eq!(
        record,
        CaseRecord {
            case_number: "2025-12-3-001-007".to_string(),
            case_name: "张三诉李四合同纠纷案".to_string(),
            case_desc: "摘要内容".to_string(),
            key_word: "民事 合同".to_string(),
            case_text: "事实段落。".to_string(),
            trial_process: "理由段落。".to_string(),
            trial_abbr: "要旨段落。".to_string(),
            relevant_index: "《民法典》第五百条".to_string(),
        }
    );
}

#[test]
fn parse_scans_each_section_independently() {
    let record = parser().parse("裁判理由C裁判要旨D关联索引E关键词A基本案情B裁判理由C2");
    assert_eq!(record.trial_process, "C");
    assert_eq!(record.trial_abbr, "D");
    assert_eq!(record.key_word, "A");
    assert_eq!(record.case_text, "B");
    assert_eq!(record.relevant_index, "E关键词A基本案情B裁判理由C2");
}

#[test]
fn parse_uses_sentinels_without_case_number() {
    let record = parser().parse("没有编号的文本关键词甲基本案情乙");
    assert_eq!(record.case_number, UNKNOWN_CASE_NUMBER);
    assert_eq!(record.case_name, UNKNOWN_CASE_NAME);
    assert_eq!(record.case_desc, "");
    assert_eq!(record.key_word, "甲");
    assert_eq!(record.relevant_index, "");
}

#[test]
fn parse_uses_name_sentinel_when_no_case_marker_follows_number() {
    let record = parser().parse("2024-01-1-002-003 没有标记");
    assert_eq!(record.case_number, "2024-01-1-002-003");
    assert_eq!(record.case_name, UNKNOWN_CASE_NAME);
}

#[test]
fn parse_accepts_three_or_four_number_groups() {
    assert_eq!(parser().parse("编号2024-18-2-001某案").case_number, "2024-18-2-001");
    assert_eq!(parser().parse("2024-18-2-001-001-9").case_number, "2024-18-2-001-001");
    assert_eq!(parser().parse("2024-18-2").case_number, UNKNOWN_CASE_NUMBER);
}

#[test]
fn end_to_end_scenario_parses_and_renders() {
    let record = parser().parse(SCENARIO);
    assert_eq!(record.case_number, "2025-12-3-001-007");
    assert_eq!(record.case_name, "某某案");
    assert_eq!(record.case_desc, "简要案情文本");
    assert_eq!(record.key_word, "甲乙");
    assert_eq!(record.case_text, "正文");
    assert_eq!(record.trial_process, "正文");
    assert_eq!(record.trial_abbr, "正文");
    assert_eq!(
        record.relevant_index,
        "《刑法》第一条一审××法院二审××法院本案例文本已于2024年公布"
    );

    let html = render_article(&record);
    assert!(!html.contains("<br/>《"));
    assert!(html.contains("第一条<br/><br/>一审××法院<br/>二审××法院<br/><br/>本案例文本已于2024年公布"));
}

#[test]
fn prepared_pdf_text_parses_like_the_raw_scenario() {
    let pipeline = CasePipeline::new().unwrap();
    let prepared = pipeline.prepare_text(SCENARIO, SourceKind::Pdf);
    assert_eq!(parser().parse(&prepared), parser().parse(SCENARIO));
}

#[test]
fn paginated_pdf_text_yields_clean_fields() {
    let raw = "人民法院案例库\n2025-12-3-001-007\n张三故意伤害案\n第 1 页\n关 键 词\n刑事 故意伤害\n基 本 案 情\n被告人张三于2023年\n在某地殴打他人。\n1/2页\n裁判理由\n法院认为构成故意伤害罪。\n裁判要旨\n要旨。\n关联索引\n《刑法》第二百三十四条";

    let pipeline = CasePipeline::new().unwrap();
    let prepared = pipeline.prepare_text(raw, SourceKind::Pdf);
    assert_eq!(
        prepared,
        "2025-12-3-001-007张三故意伤害案关 键 词刑事 故意伤害基 本 案 情被告人张三于2023年在某地殴打他人。\n裁判理由法院认为构成故意伤害罪。\n\n裁判要旨要旨。\n\n关联索引《刑法》第二百三十四条"
    );

    let record = parser().parse(&prepared);
    assert_eq!(record.case_number, "2025-12-3-001-007");
    assert_eq!(record.case_name, "张三故意伤害案");
    assert_eq!(record.case_desc, "");
    assert_eq!(record.key_word, "刑事 故意伤害");
    assert_eq!(record.case_text, "被告人张三于2023年在某地殴打他人。");
    assert_eq!(record.trial_process, "法院认为构成故意伤害罪。");
    assert_eq!(record.trial_abbr, "要旨。");
    assert_eq!(record.relevant_index, "《刑法》第二百三十四条");
}

#[test]
fn docx_text_is_normalized_but_not_reflowed() {
    let pipeline = CasePipeline::new().unwrap();
    let prepared = pipeline.prepare_text("第一段\n\n第二段 \n\n第 2 页", SourceKind::Docx);
    assert_eq!(prepared, "第一段\n\n第二段");
}
