use anyhow::{Context, Result};
use regex::Regex;

const WATERMARK_PHRASE: &str = "人民法院案例库";
const MIN_COLLAPSE_REPEATS: usize = 3;

pub struct TextNormalizer {
    fraction_page_regex: Regex,
    page_regex: Regex,
    watermark_regex: Regex,
}

impl TextNormalizer {
    pub fn new() -> Result<Self> {
        let fraction_page_regex = Regex::new(r"\d+\s*/\s*\d+\s*页")
            .context("failed to compile fraction page marker regex")?;
        let page_regex =
            Regex::new(r"第?\s*\d+\s*页").context("failed to compile page marker regex")?;

        let watermark = WATERMARK_PHRASE
            .chars()
            .map(|character| regex::escape(&character.to_string()))
            .collect::<Vec<String>>()
            .join(r"\s*");
        let watermark_regex = Regex::new(&format!("(?:{watermark})+"))
            .context("failed to compile watermark regex")?;

        Ok(Self {
            fraction_page_regex,
            page_regex,
            watermark_regex,
        })
    }

    /// Runs every cleanup step until the text reaches a fixed point, so a
    /// removal that joins two fragments into a new marker is also cleaned.
    /// Trailing blank lines do not survive the line rejoin.
    pub fn normalize(&self, raw: &str) -> String {
        let mut current = raw.to_string();
        loop {
            let next = self.normalize_once(&current);
            if next == current {
                return next;
            }
            current = next;
        }
    }

    fn normalize_once(&self, text: &str) -> String {
        let text = self.fraction_page_regex.replace_all(text, "");
        let text = self.page_regex.replace_all(&text, "");
        let text = self.watermark_regex.replace_all(&text, "");
        let text = collapse_repeated_ideographs(&text);

        text.lines()
            .map(str::trim_end)
            .collect::<Vec<&str>>()
            .join("\n")
    }
}

pub(crate) fn is_ideograph(character: char) -> bool {
    ('\u{4e00}'..='\u{9fa5}').contains(&character)
}

/// Collapses letter-spaced emphasis such as `案 案 案` into a single `案`.
/// Whitespace between the repetitions is dropped with them; whitespace after
/// the last repetition is kept.
pub fn collapse_repeated_ideographs(text: &str) -> String {
    let characters = text.chars().collect::<Vec<char>>();
    let mut output = String::with_capacity(text.len());
    let mut index = 0usize;

    while index < characters.len() {
        let current = characters[index];
        if !is_ideograph(current) {
            output.push(current);
            index += 1;
            continue;
        }

        let mut repeats = 1usize;
        let mut run_end = index + 1;
        let mut cursor = index + 1;
        loop {
            while cursor < characters.len() && characters[cursor].is_whitespace() {
                cursor += 1;
            }
            if cursor < characters.len() && characters[cursor] == current {
                repeats += 1;
                cursor += 1;
                run_end = cursor;
            } else {
                break;
            }
        }

        output.push(current);
        index = if repeats >= MIN_COLLAPSE_REPEATS {
            run_end
        } else {
            index + 1
        };
    }

    output
}

