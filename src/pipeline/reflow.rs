use super::normalize::is_ideograph;

const SENTENCE_TERMINALS: [char; 9] = ['。', '！', '？', '：', '；', '.', '!', '?', ':'];
const SHORT_SENTENCE_IDEOGRAPHS: usize = 20;

pub fn reflow(text: &str) -> String {
    let logical_lines = merge_broken_lines(text);

    let mut paragraphs = Vec::<Vec<String>>::new();
    let mut current = Vec::<String>::new();
    for line in logical_lines {
        let closes_paragraph = closes_paragraph(&line);
        current.push(line);
        if closes_paragraph {
            paragraphs.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        paragraphs.push(current);
    }

    paragraphs
        .iter()
        .map(|lines| lines.join("\n"))
        .collect::<Vec<String>>()
        .join("\n\n")
}

fn merge_broken_lines(text: &str) -> Vec<String> {
    let mut merged = Vec::<String>::new();
    let mut buffer = String::new();

    for raw_line in text.lines() {
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }

        if !buffer.is_empty() && !ends_sentence(&buffer) {
            buffer.push_str(line);
            continue;
        }

        if !buffer.is_empty() {
            merged.push(std::mem::take(&mut buffer));
        }
        buffer.push_str(line);
    }

    if !buffer.is_empty() {
        merged.push(buffer);
    }

    merged
}

fn ends_sentence(line: &str) -> bool {
    line.chars()
        .last()
        .map(|character| SENTENCE_TERMINALS.contains(&character))
        .unwrap_or(false)
}

fn closes_paragraph(line: &str) -> bool {
    let ideographs = line
        .chars()
        .filter(|character| is_ideograph(*character))
        .count();
    ideographs < SHORT_SENTENCE_IDEOGRAPHS && line.ends_with('。')
}
