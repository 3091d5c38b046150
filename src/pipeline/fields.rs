use anyhow::{Context, Result};
use regex::Regex;
use tracing::debug;

use super::sections::{SectionPattern, fuzzy_keyword_pattern};
use crate::model::CaseRecord;

pub const UNKNOWN_CASE_NUMBER: &str = "未知编号";
pub const UNKNOWN_CASE_NAME: &str = "未知案件名称";

const CASE_MARKER: char = '案';
const KEYWORDS_HEADING: &str = "关键词";
const FACTS_HEADING: &str = "基本案情";
const REASONING_HEADING: &str = "裁判理由";
const HOLDING_HEADING: &str = "裁判要旨";
const INDEX_HEADING: &str = "关联索引";

pub struct FieldParser {
    case_number_regex: Regex,
    keywords_heading_regex: Regex,
    key_word: SectionPattern,
    case_text: SectionPattern,
    trial_process: SectionPattern,
    trial_abbr: SectionPattern,
    relevant_index: SectionPattern,
}

impl FieldParser {
    pub fn new() -> Result<Self> {
        Ok(Self {
            case_number_regex: Regex::new(r"\d{4}(?:-\d+){3,4}")
                .context("failed to compile case number regex")?,
            keywords_heading_regex: Regex::new(&fuzzy_keyword_pattern(KEYWORDS_HEADING))
                .context("failed to compile keywords heading regex")?,
            key_word: SectionPattern::new(&[KEYWORDS_HEADING], &[FACTS_HEADING])?,
            case_text: SectionPattern::new(&[FACTS_HEADING], &[REASONING_HEADING])?,
            trial_process: SectionPattern::new(&[REASONING_HEADING], &[HOLDING_HEADING])?,
            trial_abbr: SectionPattern::new(&[HOLDING_HEADING], &[INDEX_HEADING])?,
            relevant_index: SectionPattern::to_end(&[INDEX_HEADING])?,
        })
    }

    pub fn parse(&self, text: &str) -> CaseRecord {
        let number_match = self.case_number_regex.find(text);
        let after_number = number_match.map(|found| found.end()).unwrap_or(0);

        let case_number = number_match
            .map(|found| found.as_str().to_string())
            .unwrap_or_else(|| UNKNOWN_CASE_NUMBER.to_string());
        let case_name = number_match
            .and_then(|found| extract_case_name(&text[found.end()..]))
            .unwrap_or_else(|| UNKNOWN_CASE_NAME.to_string());
        let case_desc = self.extract_case_desc(&text[after_number..]);

        let record = CaseRecord {
            case_number,
            case_name,
            case_desc,
            key_word: self.key_word.find(text),
            case_text: self.case_text.find(text),
            trial_process: self.trial_process.find(text),
            trial_abbr: self.trial_abbr.find(text),
            relevant_index: self.relevant_index.find(text),
        };

        debug!(
            case_number = %record.case_number,
            missing = ?missing_fields(&record),
            "parsed case fields"
        );

        record
    }

    fn extract_case_desc(&self, text: &str) -> String {
        let Some(marker) = text.find(CASE_MARKER) else {
            return String::new();
        };
        let body = &text[marker + CASE_MARKER.len_utf8()..];

        self.keywords_heading_regex
            .find(body)
            .map(|heading| body[..heading.start()].trim().to_string())
            .unwrap_or_default()
    }
}

fn extract_case_name(after_number: &str) -> Option<String> {
    let rest = after_number.trim_start();
    let marker = rest.find(CASE_MARKER)?;
    let name = rest[..marker + CASE_MARKER.len_utf8()].trim();
    Some(name.to_string())
}

fn missing_fields(record: &CaseRecord) -> Vec<&'static str> {
    let mut missing = Vec::new();
    if record.case_number == UNKNOWN_CASE_NUMBER {
        missing.push("case_number");
    }
    if record.case_name == UNKNOWN_CASE_NAME {
        missing.push("case_name");
    }
    for (name, value) in [
        ("case_desc", &record.case_desc),
        ("key_word", &record.key_word),
        ("case_text", &record.case_text),
        ("trial_process", &record.trial_process),
        ("trial_abbr", &record.trial_abbr),
        ("relevant_index", &record.relevant_index),
    ] {
        if value.is_empty() {
            missing.push(name);
        }
    }
    missing
}
