// crates/rowslope/src/commands/analyze.rs

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;
use comfy_table::{presets::UTF8_FULL, Table};
use rowslope_core::outputs::preview_rows;
use rowslope_core::{AnalysisOutcome, AnalysisState};
use tracing::info;

use super::{read_input, resolve_config, write_output};

#[derive(clap::Args, Debug)]
pub struct AnalyzeArgs {
    /// Surveyed points, `NAME,X,Y,Z` without header.
    #[arg(long)]
    pub originals: PathBuf,
    /// Auxiliary row-end points with real elevations.
    #[arg(long)]
    pub auxiliaries: PathBuf,
    /// Where to write the adjusted piles.
    #[arg(long)]
    pub adjusted_out: Option<PathBuf>,
    /// Where to write the trackers with incomplete auxiliary rows.
    #[arg(long)]
    pub missing_out: Option<PathBuf>,
    /// Where to write a JSON report of the run.
    #[arg(long)]
    pub report: Option<PathBuf>,
    /// TOML file with analysis settings.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Slope percentage above which piles are adjusted.
    #[arg(long)]
    pub threshold: Option<f64>,
    /// Only print the summary line and export results.
    #[arg(long)]
    pub quiet: bool,
}

pub fn handle_analyze(args: AnalyzeArgs) -> Result<()> {
    let config = resolve_config(args.config.as_deref(), args.threshold)?;
    info!(threshold = config.slope_threshold_percent, "starting analysis");
    let mut state = AnalysisState::new(config);

    let originals = read_input(&args.originals)?;
    state.load_originals(&args.originals.display().to_string(), &originals)?;

    let auxiliaries = read_input(&args.auxiliaries)?;
    state.load_auxiliaries(&args.auxiliaries.display().to_string(), &auxiliaries)?;
    if let Some(loaded) = state.auxiliaries() {
        if loaded.table.dropped_rows > 0 {
            println!(
                "Skipped {} auxiliary rows without a TRACKER_CODE name.",
                loaded.table.dropped_rows
            );
        }
    }

    let outcome = state.run()?;
    print_outcome(outcome, args.quiet);

    write_exports(&state, &args)
}

fn print_outcome(outcome: &AnalysisOutcome, quiet: bool) {
    println!("{}", outcome.summary);
    println!(
        "Adjusted: {} | Math errors: {} | Incomplete sides: {}",
        outcome.adjusted_count(),
        outcome.failed_count(),
        outcome.missing.len()
    );

    if quiet {
        return;
    }

    if !outcome.missing.is_empty() {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_header(vec!["Tracker", "Side", "Missing codes"]);
        for record in &outcome.missing {
            table.add_row(vec![
                record.tracker_id.clone(),
                record.side.to_string(),
                record.joined_codes(),
            ]);
        }
        println!("\nIncomplete auxiliary rows:\n{table}");
    }

    let preview = preview_rows(outcome);
    if !preview.is_empty() {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_header(vec!["Pile", "Y original", "Y adjusted", "Delta Y"]);
        for row in &preview {
            table.add_row(vec![
                row.name.clone(),
                format!("{:.3}", row.y_original),
                format!("{:.3}", row.y_adjusted),
                format!("{:+.4}", row.delta_y),
            ]);
        }
        println!("\nAdjusted piles:\n{table}");
    }

    if !outcome.log.is_empty() {
        println!("\nProcess log:\n{}", outcome.log.render());
    }
}

fn write_exports(state: &AnalysisState, args: &AnalyzeArgs) -> Result<()> {
    if let Some(path) = &args.adjusted_out {
        match state.export_adjusted()? {
            Some(csv) => {
                write_output(path, &csv)?;
                println!("Adjusted piles written to {}", path.display());
            }
            None => println!("No piles were adjusted; nothing written to {}", path.display()),
        }
    }

    if let Some(path) = &args.missing_out {
        match state.export_missing()? {
            Some(csv) => {
                write_output(path, &csv)?;
                println!("Missing auxiliaries written to {}", path.display());
            }
            None => println!(
                "Every auxiliary row was complete; nothing written to {}",
                path.display()
            ),
        }
    }

    if let Some(path) = &args.report {
        let report = state.run_report(Utc::now())?;
        let json = serde_json::to_string_pretty(&report).context("failed to encode run report")?;
        write_output(path, &json)?;
        println!("Run report written to {}", path.display());
    }

    Ok(())
}
