//! Inspect command - show how each line of one file is parsed.

use std::path::PathBuf;

use clap::Args;
use console::style;

use incomb_core::{read_source, Combiner, LineOutcome};

use super::load_config;

/// Arguments for the inspect command.
#[derive(Args)]
pub struct InspectArgs {
    /// Invoice-detail file to inspect
    #[arg(required = true)]
    input: PathBuf,

    /// Print every recovered field instead of only the title and ASIN
    #[arg(long)]
    fields: bool,
}

pub async fn run(args: InspectArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let text = read_source(&args.input)?;
    let file_name = args
        .input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let combiner = Combiner::from_config(&config);
    let parser = combiner.parser();

    let invoice_number = parser.invoice_number(&file_name);
    println!(
        "Invoice number: {}",
        if invoice_number.is_empty() { "(none)" } else { invoice_number.as_str() }
    );

    let Some(lines) = parser.data_lines(&text) else {
        println!("{} No header line found", style("!").yellow());
        return Ok(());
    };

    let mut skipped = 0;
    for (line_no, raw) in &lines {
        match parser.classify_line(raw) {
            LineOutcome::Parsed { fields, strategy } => {
                if args.fields {
                    println!(
                        "{:>5} {:<15} {}",
                        line_no,
                        style(strategy).green(),
                        fields.to_vec().join(" | ")
                    );
                } else {
                    println!(
                        "{:>5} {:<15} {} {}",
                        line_no,
                        style(strategy).green(),
                        fields.asin,
                        fields.title
                    );
                }
            }
            LineOutcome::Skipped => {
                skipped += 1;
                println!("{:>5} {:<15} {}", line_no, style("skipped").red(), raw.trim());
            }
        }
    }

    println!();
    println!(
        "{} data lines, {} parsed, {} skipped",
        lines.len(),
        lines.len() - skipped,
        skipped
    );

    Ok(())
}
