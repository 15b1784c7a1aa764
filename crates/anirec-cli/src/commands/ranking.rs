use super::progress::StepSpinner;
use crate::output::Output;
use anirec_config::Config;
use anirec_core::{build_ranking, RankedWork};
use anirec_sources::AnnictClient;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use comfy_table::{Cell, CellAlignment, Table};
use serde_json::json;

pub async fn run_ranking(config: Config, limit: Option<usize>, output: &Output) -> Result<()> {
    let tracker = AnnictClient::from_config(&config.annict);

    let spinner = StepSpinner::new(output.is_human() && !output.is_quiet());
    spinner.set_message("Scoring works...");
    let ranked = build_ranking(&tracker, &config.annict.users).await;
    spinner.finish();
    let mut ranked = ranked.map_err(|e| color_eyre::eyre::eyre!("Ranking failed: {:#}", e))?;

    if let Some(limit) = limit {
        ranked.truncate(limit);
    }

    if output.is_human() {
        output.block(ranking_table(&ranked));
        output.info(format!("{} works ranked", ranked.len()));
    } else {
        let works = serde_json::to_value(&ranked).wrap_err("Failed to serialize ranking")?;
        output.json(&json!({ "works": works }));
    }

    Ok(())
}

fn ranking_table(ranked: &[RankedWork]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        Cell::new("#").add_attribute(comfy_table::Attribute::Bold),
        Cell::new("Title").add_attribute(comfy_table::Attribute::Bold),
        Cell::new("Season").add_attribute(comfy_table::Attribute::Bold),
        Cell::new("Score").add_attribute(comfy_table::Attribute::Bold),
        Cell::new("URL").add_attribute(comfy_table::Attribute::Bold),
    ]);
    for (rank, work) in ranked.iter().enumerate() {
        table.add_row(vec![
            Cell::new(rank + 1),
            Cell::new(work.info.display_title()),
            Cell::new(work.info.season.map(|s| s.label()).unwrap_or_default()),
            Cell::new(work.score).set_alignment(CellAlignment::Right),
            Cell::new(work.info.id.url()),
        ]);
    }
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    table
}
