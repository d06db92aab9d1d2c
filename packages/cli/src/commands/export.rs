use crate::config::{Config, PAGE_EXTENSION};
use anyhow::{anyhow, Context, Result};
use clap::Args;
use colored::Colorize;
use pagecraft_export::{compile_record, deliver};
use pagecraft_model::DocumentRecord;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Page document or directory of documents (defaults to the configured source directory)
    pub path: Option<String>,

    /// Output directory (overrides config)
    #[arg(short, long)]
    pub out_dir: Option<String>,

    /// Output to stdout instead of files
    #[arg(long)]
    pub stdout: bool,

    /// Emit compact output
    #[arg(long)]
    pub compact: bool,
}

pub fn export(args: ExportArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let src = match &args.path {
        Some(path) => PathBuf::from(cwd).join(path),
        None => config.get_src_dir(cwd),
    };

    if !src.exists() {
        return Err(anyhow!("Source path does not exist: {:?}", src));
    }

    let pages = if src.is_file() {
        vec![src.clone()]
    } else {
        find_page_files(&src)
    };

    if pages.is_empty() {
        println!("{}", format!("⚠️  No *{} files found", PAGE_EXTENSION).yellow());
        return Ok(());
    }

    if !args.stdout {
        println!("{}", "🔨 Exporting pages...".bright_blue().bold());
        println!("Found {} pages", pages.len());
    }

    let out_dir = match &args.out_dir {
        Some(out) => PathBuf::from(cwd).join(out),
        None => config.get_out_dir(cwd),
    };
    let base = if src.is_file() {
        src.parent().map(Path::to_path_buf).unwrap_or_default()
    } else {
        src.clone()
    };

    let mut success_count = 0;
    let mut error_count = 0;

    for page in &pages {
        let relative_path = page.strip_prefix(&base).unwrap_or(page);
        match export_page(page, &args, &config, &out_dir) {
            Ok(output) => {
                success_count += 1;
                if !args.stdout {
                    println!(
                        "  {} {} → {}",
                        "✓".green(),
                        relative_path.display(),
                        output
                    );
                }
            }
            Err(e) => {
                error_count += 1;
                let message = format!("{:#}", e);
                warn!(page = %page.display(), error = %message, "Export failed");
                eprintln!(
                    "  {} {} - {}",
                    "✗".red(),
                    relative_path.display(),
                    message.red()
                );
            }
        }
    }

    if args.stdout {
        return if error_count == 0 {
            Ok(())
        } else {
            Err(anyhow!("{} pages failed to export", error_count))
        };
    }

    println!();
    if error_count == 0 {
        println!(
            "{} Exported {} pages successfully",
            "✅".green(),
            success_count
        );
    } else {
        println!(
            "{} Exported {} pages, {} errors",
            "⚠️".yellow(),
            success_count,
            error_count
        );
    }

    Ok(())
}

pub fn find_page_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| entry.file_name().to_string_lossy().ends_with(PAGE_EXTENSION))
        .map(|entry| entry.into_path())
        .collect();
    files.sort();
    files
}

/// Read a page document from disk
pub fn read_page(path: &Path) -> Result<DocumentRecord> {
    debug!(path = %path.display(), "Reading page");
    let source = fs::read_to_string(path)
        .with_context(|| format!("Cannot read {}", path.display()))?;
    DocumentRecord::from_json(&source).with_context(|| format!("Invalid page document {}", path.display()))
}

fn export_page(path: &Path, args: &ExportArgs, config: &Config, out_dir: &Path) -> Result<String> {
    let record = read_page(path)?;

    let mut options = config.export.clone();
    if args.compact {
        options.pretty = false;
    }
    let artifact = compile_record(&record, &options)?;
    debug!(
        path = %path.display(),
        components = record.components.len(),
        bytes = artifact.html.len(),
        "Compiled page"
    );

    if args.stdout {
        println!("{}", artifact.html);
        return Ok("stdout".to_string());
    }

    let title = if record.title.trim().is_empty() {
        page_stem(path)
    } else {
        record.title.clone()
    };
    let output_file = deliver(&artifact, &title, out_dir)?;
    Ok(output_file.display().to_string())
}

/// `home.page.json` → `home`
fn page_stem(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .map(|name| name.trim_end_matches(PAGE_EXTENSION).to_string())
        .unwrap_or_default()
}
