//! Command dispatch.

use std::io::Write;

use anyhow::{Context, Result};
use fin_core::currency::ConversionRateTable;
use fin_core::db::{DbConfig, RepositoryRegistry};
use fin_core::{CalculatorKind, Currency, NewScenario, Scenario, Workbench};
use fin_db_sqlite::SqliteRepositoryFactory;
use serde_json::json;
use tracing::{debug, info};

use crate::cli::{Cli, Command, ScenarioCommand};
use crate::config::Config;
use crate::format::format_number;
use crate::report::{Report, build_report};

/// Registry with every backend this binary ships.
pub fn build_registry() -> RepositoryRegistry {
    let mut registry = RepositoryRegistry::new();
    registry.register(Box::new(SqliteRepositoryFactory));
    registry
}

/// Runs one command, writing its output to `out`.
pub async fn run(
    cli: &Cli,
    config: &Config,
    out: &mut impl Write,
) -> Result<()> {
    let base = cli.currency.unwrap_or(config.currency);
    let mut workbench = Workbench::with_currency(base);

    let calculator = match &cli.command {
        Command::Rates => return print_rates(cli.json, out),
        Command::Scenario { action } => {
            return run_scenario(cli, &config.database, action, workbench, out).await;
        }
        Command::Calculator(calculator) => calculator,
    };
    calculator.apply(workbench.inputs_mut());

    if let Some(target) = cli.to {
        workbench.set_currency(target);
    }
    let kind = calculator.kind();
    debug!(calculator = ?kind, currency = %workbench.currency(), "evaluating");

    let report = build_report(kind, &workbench, calculator.chart())
        .context("Failed to encode calculator output")?;
    print_reports(&[report], cli.json, out)
}

fn print_reports(
    reports: &[Report],
    json: bool,
    out: &mut impl Write,
) -> Result<()> {
    if json {
        let values = reports
            .iter()
            .map(Report::to_json)
            .collect::<serde_json::Result<Vec<_>>>()
            .context("Failed to encode calculator output")?;
        let value = match values.as_slice() {
            [single] => single.clone(),
            _ => serde_json::Value::Array(values),
        };
        writeln!(out, "{}", serde_json::to_string_pretty(&value)?)?;
        return Ok(());
    }

    for (index, report) in reports.iter().enumerate() {
        if index > 0 {
            writeln!(out)?;
        }
        write!(out, "{}", report.render_text())?;
    }
    Ok(())
}

fn print_rates(
    json: bool,
    out: &mut impl Write,
) -> Result<()> {
    let table = ConversionRateTable::STANDARD;

    if json {
        let rates: serde_json::Map<_, _> = Currency::ALL
            .iter()
            .map(|c| (c.as_str().to_string(), json!(table.rate_to_inr(*c))))
            .collect();
        let value = json!({ "base": "INR", "rates": rates });
        writeln!(out, "{}", serde_json::to_string_pretty(&value)?)?;
        return Ok(());
    }

    writeln!(out, "Rates to INR")?;
    for currency in Currency::ALL {
        writeln!(
            out,
            "  {} {}  {}",
            currency.as_str(),
            currency.symbol(),
            format_number(table.rate_to_inr(currency), 2)
        )?;
    }
    Ok(())
}

async fn run_scenario(
    cli: &Cli,
    db_config: &DbConfig,
    action: &ScenarioCommand,
    workbench: Workbench,
    out: &mut impl Write,
) -> Result<()> {
    let registry = build_registry();
    let repo = registry
        .create(db_config)
        .await
        .with_context(|| format!("Failed to open {} database", db_config.backend))?;

    match action {
        ScenarioCommand::Save {
            name,
            tab,
            from,
            calculator,
        } => {
            let (mut workbench, source_tab) = match from {
                Some(id) => {
                    let source = repo
                        .get_scenario(*id)
                        .await
                        .with_context(|| format!("Failed to load scenario {id}"))?;
                    let restored = source
                        .snapshot
                        .map(Workbench::from_snapshot)
                        .unwrap_or(workbench);
                    (restored, Some(source.active_tab))
                }
                None => (workbench, None),
            };
            if let Some(calculator) = calculator {
                calculator.apply(workbench.inputs_mut());
            }
            if let Some(target) = cli.to {
                workbench.set_currency(target);
            }

            let tab = (*tab)
                .or_else(|| calculator.as_ref().map(|c| c.kind().tab()))
                .or(source_tab)
                .unwrap_or_default();
            let new = NewScenario::new(name, tab, Some(workbench.snapshot()))?;
            let saved = repo.create_scenario(new).await.context("Failed to save scenario")?;
            info!(id = saved.id, name = %saved.name, tab = %saved.active_tab, "scenario saved");
            print_scenario_line(&saved, cli.json, out)
        }
        ScenarioCommand::List => {
            let scenarios = repo.list_scenarios().await.context("Failed to list scenarios")?;
            if cli.json {
                writeln!(out, "{}", serde_json::to_string_pretty(&scenarios)?)?;
                return Ok(());
            }
            if scenarios.is_empty() {
                writeln!(out, "No saved scenarios")?;
            }
            for scenario in &scenarios {
                print_scenario_line(scenario, false, out)?;
            }
            Ok(())
        }
        ScenarioCommand::Show { id } => {
            let scenario = repo
                .get_scenario(*id)
                .await
                .with_context(|| format!("Failed to load scenario {id}"))?;
            show_scenario(cli, &scenario, workbench, out)
        }
        ScenarioCommand::Delete { id } => {
            repo.delete_scenario(*id)
                .await
                .with_context(|| format!("Failed to delete scenario {id}"))?;
            if cli.json {
                writeln!(out, "{}", json!({ "deleted": id }))?;
            } else {
                writeln!(out, "Deleted scenario {id}")?;
            }
            Ok(())
        }
    }
}

/// Restores the saved inputs and evaluates the calculators on the saved
/// tab, or all of them when the tab hosts none.
fn show_scenario(
    cli: &Cli,
    scenario: &Scenario,
    workbench: Workbench,
    out: &mut impl Write,
) -> Result<()> {
    let mut workbench = match &scenario.snapshot {
        Some(snapshot) => Workbench::from_snapshot(snapshot.clone()),
        None => workbench,
    };
    if let Some(target) = cli.to {
        workbench.set_currency(target);
    }

    let on_tab = scenario.active_tab.calculators();
    let calculators: &[CalculatorKind] = if on_tab.is_empty() {
        &CalculatorKind::ALL
    } else {
        on_tab
    };

    let reports = calculators
        .iter()
        .map(|kind| build_report(*kind, &workbench, false))
        .collect::<serde_json::Result<Vec<_>>>()
        .context("Failed to encode calculator output")?;

    if cli.json {
        let reports = reports
            .iter()
            .map(Report::to_json)
            .collect::<serde_json::Result<Vec<_>>>()?;
        let value = json!({ "scenario": scenario, "reports": reports });
        writeln!(out, "{}", serde_json::to_string_pretty(&value)?)?;
        return Ok(());
    }

    print_scenario_line(scenario, false, out)?;
    writeln!(out)?;
    print_reports(&reports, false, out)
}

fn print_scenario_line(
    scenario: &Scenario,
    json: bool,
    out: &mut impl Write,
) -> Result<()> {
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(scenario)?)?;
        return Ok(());
    }

    let currency = scenario
        .snapshot
        .as_ref()
        .map(|s| s.currency.as_str())
        .unwrap_or("-");
    writeln!(
        out,
        "#{:<4} {:<24} {:<12} {:<4} {}",
        scenario.id,
        scenario.name,
        scenario.active_tab.as_str(),
        currency,
        scenario.timestamp.format("%Y-%m-%d %H:%M")
    )?;
    Ok(())
}
