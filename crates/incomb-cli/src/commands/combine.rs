//! Combine command - merge invoice-detail files into one table.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use incomb_core::{discover, CombineReport, Combiner, SourceLocation, Strategy};

use crate::export::{export, output_path, ExportFormat};

use super::load_config;

/// Arguments for the combine command.
#[derive(Args)]
pub struct CombineArgs {
    /// ZIP archive containing invoice-detail files
    #[arg(long, conflicts_with = "data_dir")]
    zip: Option<PathBuf>,

    /// Directory containing invoice-detail files (default: current directory)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Output directory
    #[arg(short, long, default_value = ".")]
    outdir: PathBuf,

    /// Output formats (default: from config, csv and xlsx)
    #[arg(short, long, value_enum, value_delimiter = ',')]
    format: Vec<ExportFormat>,

    /// File name glob used to find invoice-detail files
    #[arg(long)]
    pattern: Option<String>,

    /// List skipped line numbers for each file
    #[arg(long)]
    show_skipped: bool,
}

pub async fn run(args: CombineArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = load_config(config_path)?;
    if let Some(pattern) = &args.pattern {
        config.discovery.pattern = pattern.clone();
    }

    let formats = if args.format.is_empty() {
        config
            .output
            .formats
            .iter()
            .map(|f| ExportFormat::parse_name(f))
            .collect::<anyhow::Result<Vec<_>>>()?
    } else {
        args.format.clone()
    };
    if formats.is_empty() {
        anyhow::bail!("No output formats configured");
    }

    let location = match (&args.zip, &args.data_dir) {
        (Some(zip), _) => SourceLocation::Archive(zip.clone()),
        (None, Some(dir)) => SourceLocation::Directory(dir.clone()),
        (None, None) => SourceLocation::Directory(PathBuf::from(".")),
    };

    info!("Discovering files in {}", location.path().display());
    let sources = discover(&location, &config.discovery)?;

    if sources.is_empty() {
        anyhow::bail!(
            "No files matching {} found in {}",
            config.discovery.pattern,
            location.path().display()
        );
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        sources.files.len()
    );

    let pb = ProgressBar::new(sources.files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let combiner = Combiner::from_config(&config);
    let mut report = combiner.combine_with(&sources.files, |_| pb.inc(1));
    pb.finish_and_clear();

    if report.files.is_empty() {
        anyhow::bail!(
            "None of the {} matching files could be read",
            sources.files.len()
        );
    }

    let mut warnings = sources.warnings;
    warnings.append(&mut report.warnings);
    report.warnings = warnings;

    fs::create_dir_all(&args.outdir)?;
    for format in &formats {
        let path = output_path(&args.outdir, &config.output.base_name, *format);
        export(*format, &path, &report.records)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            path.display()
        );
    }

    print_summary(&report, args.show_skipped);
    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

fn print_summary(report: &CombineReport, show_skipped: bool) {
    println!();
    println!(
        "{} Combined {} rows from {} files",
        style("✓").green(),
        report.records.len(),
        report.files.len()
    );

    let breakdown: Vec<String> = Strategy::ALL
        .iter()
        .map(|s| format!("{} {}", report.stats.get(*s), s))
        .collect();
    println!("   {}", breakdown.join(", "));

    if report.lines_skipped() > 0 {
        println!(
            "   {} lines could not be parsed and were skipped",
            style(report.lines_skipped()).yellow()
        );
    }

    for file in report.files.iter().filter(|f| !f.header_found) {
        eprintln!(
            "   {} no header found in {}",
            style("!").yellow(),
            file.path.display()
        );
    }

    if show_skipped {
        for file in report.files.iter().filter(|f| !f.skipped_lines.is_empty()) {
            let lines: Vec<String> = file.skipped_lines.iter().map(|n| n.to_string()).collect();
            println!("   {}: skipped lines {}", file.path.display(), lines.join(", "));
        }
    }

    if !report.warnings.is_empty() {
        eprintln!();
        eprintln!("{}", style("Unreadable files:").red());
        for warning in &report.warnings {
            eprintln!("  - {}: {}", warning.path.display(), warning.message);
        }
    }
}
