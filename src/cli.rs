use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "caselib-fmt",
    version,
    about = "Extract case-library fields from PDF/DOCX files and lay them out as an HTML article",
    args_conflicts_with_subcommands = true
)]
pub struct Cli {
    /// PDF or DOCX file to convert; outputs go to text/ and output/ beside it
    pub path: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert one document
    Convert(ConvertArgs),
    /// Convert many documents into one output directory
    Batch(BatchArgs),
    /// Print the extracted fields as JSON without writing files
    Fields(FieldsArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ConvertArgs {
    pub path: PathBuf,

    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    #[arg(long)]
    pub max_pages: Option<usize>,
}

impl ConvertArgs {
    pub fn beside_input(path: PathBuf) -> Self {
        Self {
            path,
            output_dir: None,
            max_pages: None,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct BatchArgs {
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    #[arg(long, default_value = "output")]
    pub output_dir: PathBuf,

    /// Worker threads; defaults to the available parallelism
    #[arg(long)]
    pub jobs: Option<usize>,

    #[arg(long)]
    pub manifest_path: Option<PathBuf>,

    /// Open each generated HTML file with the system default application
    #[arg(long, default_value_t = false)]
    pub open: bool,

    #[arg(long)]
    pub max_pages: Option<usize>,
}

#[derive(Args, Debug, Clone)]
pub struct FieldsArgs {
    pub path: PathBuf,

    #[arg(long)]
    pub max_pages: Option<usize>,
}
