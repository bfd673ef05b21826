use anyhow::{anyhow, Context, Result};
use log::{info, warn};
use std::fs;
use std::path::Path;

use crate::cli::ExploreArgs;
use crate::explore::{load_influential, paper_detail, slice_view, InfluentialRecord, SelectionPath};
use crate::influence::SelectorConfig;

/// JSON for one explorer request: a paper's details when `paper` is given,
/// otherwise the heatmap slice of `path`.
pub fn explore_json(
    records: &[InfluentialRecord],
    path: &SelectionPath,
    paper: Option<&str>,
    config: &SelectorConfig,
) -> Result<String> {
    if let Some(id) = paper {
        let detail = paper_detail(records, id).ok_or_else(|| anyhow!("Unknown paper id: {}", id))?;
        return Ok(serde_json::to_string_pretty(&detail)?);
    }

    let view = slice_view(records, path, config);
    if view.heatmap.is_empty() {
        warn!("No influential papers for selection '{}'", view.title);
    } else {
        info!(
            "Selection '{}': {} papers over {} years",
            view.title,
            view.heatmap.rows.len(),
            view.heatmap.years.len()
        );
    }

    Ok(serde_json::to_string_pretty(&view)?)
}

pub fn run_explore(args: ExploreArgs) -> Result<()> {
    let records = load_influential(Path::new(&args.influential))?;
    info!("Loaded {} influential rows from {}", records.len(), args.influential);

    let json = explore_json(&records, &args.path, args.paper.as_deref(), &args.rank.selector_config())?;

    match &args.output {
        Some(output) => fs::write(output, json).with_context(|| format!("Failed to write output: {}", output))?,
        None => println!("{}", json),
    }

    Ok(())
}
