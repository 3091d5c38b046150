use anyhow::{Context, Result, bail};
use regex::Regex;

/// Builds a pattern that matches `keyword` even when the PDF text layer
/// letter-spaces it (`关 键 词`) or doubles a glyph (`关关键词`).
pub fn fuzzy_keyword_pattern(keyword: &str) -> String {
    keyword
        .chars()
        .map(|character| {
            let escaped = regex::escape(&character.to_string());
            format!(r"{escaped}(?:\s*{escaped})*")
        })
        .collect::<Vec<String>>()
        .join(r"\s*")
}

fn keyword_alternation(keywords: &[&str]) -> Result<String> {
    if keywords.iter().any(|keyword| keyword.trim().is_empty()) {
        bail!("section keywords must not be empty: {:?}", keywords);
    }

    Ok(keywords
        .iter()
        .map(|keyword| fuzzy_keyword_pattern(keyword))
        .collect::<Vec<String>>()
        .join("|"))
}

#[derive(Debug, Clone)]
pub struct SectionPattern {
    regex: Regex,
}

impl SectionPattern {
    pub fn new(start_keywords: &[&str], end_keywords: &[&str]) -> Result<Self> {
        if start_keywords.is_empty() {
            bail!("section pattern requires at least one start keyword");
        }

        let start = keyword_alternation(start_keywords)?;
        let pattern = if end_keywords.is_empty() {
            format!(r"(?s)(?:{start})(.*)")
        } else {
            let end = keyword_alternation(end_keywords)?;
            format!(r"(?s)(?:{start})(.*?)(?:{end})")
        };

        let regex = Regex::new(&pattern).with_context(|| {
            format!(
                "failed to compile section pattern for {:?} -> {:?}",
                start_keywords, end_keywords
            )
        })?;

        Ok(Self { regex })
    }

    pub fn to_end(start_keywords: &[&str]) -> Result<Self> {
        Self::new(start_keywords, &[])
    }

    pub fn find(&self, text: &str) -> String {
        self.regex
            .captures(text)
            .and_then(|captures| captures.get(1))
            .map(|body| body.as_str().trim().to_string())
            .unwrap_or_default()
    }
}

#[cfg(test)]
pub fn fuzzy_find(text: &str, start_keywords: &[&str], end_keywords: &[&str]) -> Result<String> {
    Ok(SectionPattern::new(start_keywords, end_keywords)?.find(text))
}
