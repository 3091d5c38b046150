use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use anyhow::{Context, Result, bail};
use chrono::Utc;
use tracing::{info, warn};

use super::convert::{OutputLayout, UNSUPPORTED_FORMAT_MESSAGE, convert_document};
use crate::cli::BatchArgs;
use crate::model::{BatchEntry, BatchEntryStatus, BatchManifest, SourceKind};
use crate::pipeline::CasePipeline;
use crate::util::{
    ensure_directory, now_utc_string, sha256_file, utc_compact_string, write_json_pretty,
};

pub fn run(args: BatchArgs) -> Result<()> {
    let started_ts = Utc::now();
    let started_at = now_utc_string();
    let run_id = format!("batch-{}", utc_compact_string(started_ts));

    ensure_directory(&args.output_dir)?;
    let manifest_path = args.manifest_path.clone().unwrap_or_else(|| {
        args.output_dir.join("manifests").join(format!(
            "batch_run_{}.json",
            utc_compact_string(started_ts)
        ))
    });

    let jobs = args.jobs.unwrap_or_else(default_jobs).max(1);
    info!(
        run_id = %run_id,
        documents = args.paths.len(),
        jobs,
        output_dir = %args.output_dir.display(),
        "starting batch"
    );

    let pipeline = CasePipeline::new()?;
    let layout = OutputLayout::Directory(args.output_dir.clone());
    let entries = process_batch(&pipeline, &args.paths, &layout, jobs, args.max_pages);

    for entry in &entries {
        let Some(html_path) = &entry.html_path else {
            continue;
        };
        println!("{html_path}");
        if args.open {
            if let Err(err) = open_with_default_app(Path::new(html_path)) {
                warn!(path = %html_path, error = %err, "failed to open generated file");
            }
        }
    }

    let count = |status: BatchEntryStatus| entries.iter().filter(|entry| entry.status == status).count();
    let manifest = BatchManifest {
        manifest_version: 1,
        run_id: run_id.clone(),
        started_at,
        completed_at: now_utc_string(),
        output_dir: args.output_dir.display().to_string(),
        processed_count: count(BatchEntryStatus::Converted),
        failed_count: count(BatchEntryStatus::Failed),
        skipped_count: count(BatchEntryStatus::Skipped),
        entries,
    };
    write_json_pretty(&manifest_path, &manifest)?;

    info!(path = %manifest_path.display(), "wrote batch manifest");
    info!(
        converted = manifest.processed_count,
        failed = manifest.failed_count,
        skipped = manifest.skipped_count,
        "batch completed"
    );

    if manifest.failed_count > 0 {
        bail!(
            "{} of {} documents failed to convert; see {}",
            manifest.failed_count,
            manifest.entries.len(),
            manifest_path.display()
        );
    }

    Ok(())
}

fn default_jobs() -> usize {
    thread::available_parallelism()
        .map(|count| count.get())
        .unwrap_or(1)
}

pub fn process_batch(
    pipeline: &CasePipeline,
    paths: &[PathBuf],
    layout: &OutputLayout,
    jobs: usize,
    max_pages: Option<usize>,
) -> Vec<BatchEntry> {
    let next_index = AtomicUsize::new(0);
    let next_index = &next_index;
    let workers = jobs.max(1).min(paths.len());

    let mut finished = thread::scope(|scope| {
        let handles = (0..workers)
            .map(|_| {
                scope.spawn(move || {
                    let mut done = Vec::<(usize, BatchEntry)>::new();
                    loop {
                        let index = next_index.fetch_add(1, Ordering::Relaxed);
                        let Some(path) = paths.get(index) else {
                            break;
                        };
                        done.push((index, process_entry(pipeline, path, layout, max_pages)));
                    }
                    done
                })
            })
            .collect::<Vec<_>>();

        handles
            .into_iter()
            .flat_map(|handle| handle.join().unwrap_or_default())
            .collect::<Vec<(usize, BatchEntry)>>()
    });
    finished.sort_by_key(|(index, _)| *index);

    let mut finished = finished.into_iter().peekable();
    paths
        .iter()
        .enumerate()
        .map(|(index, path)| match finished.next_if(|(done, _)| *done == index) {
            Some((_, entry)) => entry,
            None => failed_entry(path, None, "worker thread panicked".to_string()),
        })
        .collect()
}

fn process_entry(
    pipeline: &CasePipeline,
    path: &Path,
    layout: &OutputLayout,
    max_pages: Option<usize>,
) -> BatchEntry {
    let Some(kind) = SourceKind::from_path(path) else {
        warn!(path = %path.display(), "skipping unsupported file");
        return BatchEntry {
            source_path: path.display().to_string(),
            source_sha256: None,
            kind: None,
            status: BatchEntryStatus::Skipped,
            case_number: None,
            text_path: None,
            html_path: None,
            error: Some(UNSUPPORTED_FORMAT_MESSAGE.to_string()),
        };
    };

    match convert_document(pipeline, path, layout, max_pages) {
        Ok((document, outputs)) => BatchEntry {
            source_path: path.display().to_string(),
            source_sha256: sha256_file(path).ok(),
            kind: Some(document.kind),
            status: BatchEntryStatus::Converted,
            case_number: Some(document.record.case_number),
            text_path: Some(outputs.text_path.display().to_string()),
            html_path: Some(outputs.html_path.display().to_string()),
            error: None,
        },
        Err(err) => {
            warn!(path = %path.display(), error = %format!("{err:#}"), "document failed");
            failed_entry(path, Some(kind), format!("{err:#}"))
        }
    }
}

fn failed_entry(path: &Path, kind: Option<SourceKind>, error: String) -> BatchEntry {
    BatchEntry {
        source_path: path.display().to_string(),
        source_sha256: None,
        kind,
        status: BatchEntryStatus::Failed,
        case_number: None,
        text_path: None,
        html_path: None,
        error: Some(error),
    }
}

fn open_with_default_app(path: &Path) -> Result<()> {
    let mut command = if cfg!(target_os = "windows") {
        let mut command = Command::new("cmd");
        command.args(["/C", "start", ""]);
        command
    } else if cfg!(target_os = "macos") {
        Command::new("open")
    } else {
        Command::new("xdg-open")
    };

    let status = command
        .arg(path)
        .status()
        .with_context(|| format!("failed to launch opener for {}", path.display()))?;
    if !status.success() {
        bail!("opener exited with {} for {}", status, path.display());
    }

    Ok(())
}
