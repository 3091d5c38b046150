use std::path::Path;
use std::process::Command;

use anyhow::{Context, Result, bail};

fn extract_pages_with_pdftotext(
    pdf_path: &Path,
    max_pages: Option<usize>,
) -> Result<Vec<String>> {
    let mut command = Command::new("pdftotext");
    command.arg("-enc").arg("UTF-8").arg("-f").arg("1");
    if let Some(max_pages) = max_pages {
        command.arg("-l").arg(max_pages.to_string());
    }
    command.arg(pdf_path).arg("-");

    let output = command
        .output()
        .with_context(|| format!("failed to execute pdftotext for {}", pdf_path.display()))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        bail!(
            "pdftotext returned non-zero exit status for {}: {}",
            pdf_path.display(),
            stderr.trim()
        );
    }

    Ok(split_pages(&String::from_utf8_lossy(&output.stdout)))
}

pub fn split_pages(raw: &str) -> Vec<String> {
    let mut pages: Vec<String> = raw
        .split('\u{000C}')
        .map(|chunk| chunk.replace('\u{0000}', ""))
        .collect();

    while let Some(last_page) = pages.last() {
        if last_page.trim().is_empty() {
            pages.pop();
            continue;
        }
        break;
    }

    pages
}

pub fn read_pdf_text(pdf_path: &Path, max_pages: Option<usize>) -> Result<String> {
    let pages = extract_pages_with_pdftotext(pdf_path, max_pages)?;
    Ok(pages.join("\n"))
}
