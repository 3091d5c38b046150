use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use tracing::info;

use crate::cli::ConvertArgs;
use crate::model::{DocumentOutputs, PreparedDocument, SourceKind};
use crate::pipeline::CasePipeline;
use crate::render::render_article;
use crate::util::{file_stem_string, write_text_file};

pub const UNSUPPORTED_FORMAT_MESSAGE: &str = "仅支持PDF和DOCX文件";

#[derive(Debug, Clone)]
pub enum OutputLayout {
    BesideInput,
    Directory(PathBuf),
}

impl OutputLayout {
    pub fn outputs_for(&self, source: &Path) -> Result<DocumentOutputs> {
        let stem = file_stem_string(source)?;
        let text_name = format!("{stem}-文本.txt");
        let html_name = format!("{stem}-公众号格式.html");

        Ok(match self {
            Self::BesideInput => {
                let input_dir = source.parent().map(Path::to_path_buf).unwrap_or_default();
                DocumentOutputs {
                    text_path: input_dir.join("text").join(text_name),
                    html_path: input_dir.join("output").join(html_name),
                }
            }
            Self::Directory(dir) => DocumentOutputs {
                text_path: dir.join("text").join(text_name),
                html_path: dir.join(html_name),
            },
        })
    }
}

pub fn run(args: ConvertArgs) -> Result<()> {
    if SourceKind::from_path(&args.path).is_none() {
        bail!("{UNSUPPORTED_FORMAT_MESSAGE}: {}", args.path.display());
    }

    let layout = match args.output_dir {
        Some(dir) => OutputLayout::Directory(dir),
        None => OutputLayout::BesideInput,
    };

    let pipeline = CasePipeline::new()?;
    let (_, outputs) = convert_document(&pipeline, &args.path, &layout, args.max_pages)?;

    println!(
        "提取完成，生成文件：\n - {}\n - {}",
        outputs.text_path.display(),
        outputs.html_path.display()
    );

    Ok(())
}

pub fn convert_document(
    pipeline: &CasePipeline,
    path: &Path,
    layout: &OutputLayout,
    max_pages: Option<usize>,
) -> Result<(PreparedDocument, DocumentOutputs)> {
    let document = pipeline.prepare_document(path, max_pages)?;
    let outputs = layout.outputs_for(path)?;
    let html = render_article(&document.record);

    write_text_file(&outputs.text_path, &document.text)?;
    write_text_file(&outputs.html_path, &html)?;

    info!(
        source = %document.source.display(),
        text = %outputs.text_path.display(),
        html = %outputs.html_path.display(),
        "wrote document outputs"
    );

    Ok((document, outputs))
}
