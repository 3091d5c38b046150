use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;

use anyhow::{Context, Result};
use quick_xml::Reader as XmlReader;
use quick_xml::events::Event;
use zip::ZipArchive;

const DOCUMENT_PART: &str = "word/document.xml";

pub fn read_docx_text(path: &Path) -> Result<String> {
    let file =
        File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    read_docx_from(file).with_context(|| format!("failed to read docx {}", path.display()))
}

pub fn read_docx_from<R: Read + Seek>(reader: R) -> Result<String> {
    let mut archive = ZipArchive::new(reader).context("not a zip container")?;
    let mut entry = archive
        .by_name(DOCUMENT_PART)
        .with_context(|| format!("missing {DOCUMENT_PART}"))?;

    let mut xml = String::new();
    entry
        .read_to_string(&mut xml)
        .with_context(|| format!("failed to read {DOCUMENT_PART}"))?;

    let paragraphs = parse_document_paragraphs(&xml)?;
    Ok(paragraphs
        .iter()
        .map(|paragraph| paragraph.trim())
        .filter(|paragraph| !paragraph.is_empty())
        .collect::<Vec<&str>>()
        .join("\n\n"))
}

fn parse_document_paragraphs(xml: &str) -> Result<Vec<String>> {
    let mut reader = XmlReader::from_str(xml);
    let mut buf = Vec::new();

    let mut paragraphs = Vec::<String>::new();
    let mut current = String::new();
    let mut paragraph_depth = 0_usize;
    // Text boxes nest whole paragraphs inside a run; their text is not part
    // of the enclosing paragraph.
    let mut skipped_depth = 0_usize;
    let mut in_run = false;
    let mut in_text = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref element)) => match element.local_name().as_ref() {
                b"txbxContent" | b"Fallback" => skipped_depth += 1,
                _ if skipped_depth > 0 => {}
                b"p" => {
                    paragraph_depth += 1;
                    if paragraph_depth == 1 {
                        current.clear();
                    }
                }
                b"r" => in_run = true,
                b"t" => in_text = true,
                _ => {}
            },
            Ok(Event::Empty(ref element)) if skipped_depth == 0 => {
                match element.local_name().as_ref() {
                    b"tab" if in_run => current.push('\t'),
                    b"br" | b"cr" if in_run => current.push('\n'),
                    _ => {}
                }
            }
            Ok(Event::Text(text)) => {
                if in_text && skipped_depth == 0 {
                    let value = text
                        .unescape()
                        .context("failed to unescape document text")?;
                    current.push_str(&value);
                }
            }
            Ok(Event::End(ref element)) => match element.local_name().as_ref() {
                b"txbxContent" | b"Fallback" => skipped_depth = skipped_depth.saturating_sub(1),
                _ if skipped_depth > 0 => {}
                b"t" => in_text = false,
                b"r" => in_run = false,
                b"p" => {
                    if paragraph_depth == 1 {
                        paragraphs.push(std::mem::take(&mut current));
                    }
                    paragraph_depth = paragraph_depth.saturating_sub(1);
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(error) => {
                return Err(error).with_context(|| {
                    format!(
                        "malformed {DOCUMENT_PART} at byte {}",
                        reader.buffer_position()
                    )
                });
            }
            _ => {}
        }
        buf.clear();
    }

    Ok(paragraphs)
}

#[cfg(test)]
pub(crate) fn build_docx(paragraphs: &[&str]) -> Vec<u8> {
    use std::io::{Cursor, Write};

    use zip::ZipWriter;
    use zip::write::FileOptions;

    let body = paragraphs
        .iter()
        .map(|paragraph| format!("<w:p><w:r><w:t xml:space=\"preserve\">{paragraph}</w:t></w:r></w:p>"))
        .collect::<String>();
    let xml = format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
         <w:document xmlns:w=\"http://schemas.openxmlformats.org/wordprocessingml/2006/main\">\
         <w:body>{body}</w:body></w:document>"
    );

    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    writer
        .start_file(DOCUMENT_PART, FileOptions::default())
        .unwrap();
    writer.write_all(xml.as_bytes()).unwrap();
    writer.finish().unwrap().into_inner()
}
