// crates/rowslope/src/commands/inspect.rs

use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use anyhow::{Context, Result};
use comfy_table::{presets::UTF8_FULL, Table};
use rowslope_core::report::PointSummary;
use rowslope_parser::{is_pile_code, load_auxiliaries, load_originals};

use super::{read_input, resolve_config};

#[derive(clap::Args, Debug)]
#[command(group(
    clap::ArgGroup::new("table")
        .required(true)
        .args(["originals", "auxiliaries"])
))]
pub struct InspectArgs {
    /// Originals table to summarise.
    #[arg(long)]
    pub originals: Option<PathBuf>,
    /// Auxiliaries table to summarise.
    #[arg(long)]
    pub auxiliaries: Option<PathBuf>,
    /// TOML file with delimiter settings.
    #[arg(long)]
    pub config: Option<PathBuf>,
}

pub fn handle_inspect(args: InspectArgs) -> Result<()> {
    let config = resolve_config(args.config.as_deref(), None)?;
    let options = config.loader_options()?;

    if let Some(path) = &args.originals {
        let table = load_originals(&read_input(path)?, options)
            .with_context(|| format!("failed to parse {}", path.display()))?;

        let unrecognized = table.rows.iter().filter(|p| p.tracker_id.is_none()).count();
        println!("{}: {} points", path.display(), table.len());
        println!("{}", PointSummary::from_points(&table.rows));
        if unrecognized > 0 {
            println!("{unrecognized} points have no TRACKER_CODE name");
        }

        let mut per_tracker: BTreeMap<&str, (usize, BTreeSet<&str>)> = BTreeMap::new();
        for point in &table.rows {
            if let (Some(tracker), Some(code)) =
                (point.tracker_id.as_deref(), point.point_type.as_deref())
            {
                let entry = per_tracker.entry(tracker).or_default();
                if is_pile_code(code) {
                    entry.0 += 1;
                } else {
                    entry.1.insert(code);
                }
            }
        }

        let mut listing = Table::new();
        listing
            .load_preset(UTF8_FULL)
            .set_header(vec!["Tracker", "Piles", "Other codes"]);
        for (tracker, (piles, codes)) in per_tracker {
            listing.add_row(vec![
                tracker.to_string(),
                piles.to_string(),
                codes.into_iter().collect::<Vec<_>>().join(", "),
            ]);
        }
        println!("{listing}");
    }

    if let Some(path) = &args.auxiliaries {
        let table = load_auxiliaries(&read_input(path)?, options)
            .with_context(|| format!("failed to parse {}", path.display()))?;

        println!(
            "{}: {} auxiliary points, {} rows dropped",
            path.display(),
            table.len(),
            table.dropped_rows
        );

        let mut per_tracker: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
        for point in &table.rows {
            per_tracker
                .entry(point.tracker_id.as_str())
                .or_default()
                .push(point.point_type.as_str());
        }

        let mut listing = Table::new();
        listing
            .load_preset(UTF8_FULL)
            .set_header(vec!["Tracker", "Codes"]);
        for (tracker, codes) in per_tracker {
            listing.add_row(vec![tracker.to_string(), codes.join(", ")]);
        }
        println!("{listing}");
    }

    Ok(())
}
