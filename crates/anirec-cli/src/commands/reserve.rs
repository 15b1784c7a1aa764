use super::progress::StepSpinner;
use crate::output::Output;
use anirec_config::Config;
use anirec_core::{ReserveOrchestrator, ReserveResult};
use anirec_sources::{AnnictClient, EpgStationClient};
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use comfy_table::{Cell, Table};

pub async fn run_reserve(config: Config, dry_run: bool, output: &Output) -> Result<()> {
    tracing::debug!(dry_run, "Reserve command started");

    let tracker = AnnictClient::from_config(&config.annict);
    let scheduler = EpgStationClient::new(&config.epgstation.url)
        .wrap_err("Invalid EPGStation URL")?;

    let orchestrator = ReserveOrchestrator::new(Box::new(tracker), Box::new(scheduler), &config)
        .with_dry_run(dry_run);

    let spinner = StepSpinner::new(output.is_human() && !output.is_quiet());
    spinner.set_message(format!(
        "Reading Annict lists for {}...",
        config.annict.users.join(", ")
    ));

    let result = orchestrator.reserve().await;
    spinner.finish();
    let result = result.map_err(|e| color_eyre::eyre::eyre!("Reserve run failed: {:#}", e))?;

    if output.is_human() {
        print_human(&result, output);
    } else {
        let value = serde_json::to_value(&result)
            .wrap_err("Failed to serialize reserve result")?;
        output.json(&value);
    }

    Ok(())
}

fn print_human(result: &ReserveResult, output: &Output) {
    if !result.rules.is_empty() {
        let mut table = Table::new();
        table.set_header(vec![
            Cell::new("Keyword").add_attribute(comfy_table::Attribute::Bold),
            Cell::new("Type").add_attribute(comfy_table::Attribute::Bold),
            Cell::new("Directory").add_attribute(comfy_table::Attribute::Bold),
            Cell::new("Rule").add_attribute(comfy_table::Attribute::Bold),
        ]);
        for planned in &result.rules {
            let rule_cell = match &planned.receipt {
                Some(receipt) => receipt
                    .rule_id
                    .map(|id| format!("#{}", id))
                    .unwrap_or_else(|| format!("HTTP {}", receipt.status)),
                None => "planned".to_string(),
            };
            table.add_row(vec![
                Cell::new(&planned.title),
                Cell::new(planned.anime_type.map(|t| t.as_str()).unwrap_or("-")),
                Cell::new(format!(
                    "{}/{}",
                    planned.rule.save_option.parent_directory_name, planned.rule.save_option.directory
                )),
                Cell::new(rule_cell),
            ]);
        }
        table.load_preset(comfy_table::presets::UTF8_FULL);
        table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
        output.block(table);
    }

    if result.skipped_untitled > 0 {
        output.warn(format!("Skipped {} works without a title", result.skipped_untitled));
    }

    if result.dry_run {
        output.info(format!(
            "Dry run: {} rules would be added ({} works listed, {} filtered out by media type)",
            result.rules.len(),
            result.collected_ids,
            result.works_filtered_out
        ));
    } else {
        output.success(format!(
            "Added {} recording rules from {} listed works in {:?}",
            result.rules_created(),
            result.collected_ids,
            result.duration
        ));
    }
}
