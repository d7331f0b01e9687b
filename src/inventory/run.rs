// src/inventory/run.rs
// End-to-end orchestration: location directory → catalog scan → plan →
// execute. Variants are processed one at a time; a mid-run failure aborts
// immediately and a rerun picks up where needed because converged variants
// plan empty.

use anyhow::{Context, Result};
use tokio_stream::StreamExt;
use tracing::{info, warn};

use super::{executor, locations, planner, scanner};
use crate::config::RunConfig;
use crate::shopify::AdminTransport;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunReport {
    /// Variants observed by the scan.
    pub variants_seen: u64,
    /// Variants whose plan was non-empty.
    pub variants_changed: u64,
}

/// Drive one reconciliation run. Returns a no-op report when none of the
/// configured source locations exist in the store.
pub async fn run(config: &RunConfig, transport: &dyn AdminTransport) -> Result<RunReport> {
    let store_locations = locations::fetch_locations(transport)
        .await
        .context("failed to fetch store locations")?;
    let maps = locations::resolve(
        &store_locations,
        &config.target_location,
        &config.source_locations,
    )?;

    if !maps.has_sources() {
        warn!(
            "None of the source locations {} exist in the store; nothing to do.",
            config.source_locations.join(", ")
        );
        return Ok(RunReport::default());
    }

    let mut report = RunReport::default();
    let stream = scanner::scan(transport, &config.product_query, config.page_size);
    tokio::pin!(stream);

    while let Some(state) = stream.next().await {
        let state = state.context("catalog scan failed")?;
        report.variants_seen += 1;

        let actions = planner::plan_actions(&state, &maps);
        if actions.is_empty() {
            continue;
        }

        report.variants_changed += 1;
        executor::apply(transport, &state, &actions, config.dry_run).await?;
    }

    info!(
        "Processed {} variants; updated {} variants needing location changes.",
        report.variants_seen, report.variants_changed
    );
    Ok(report)
}
