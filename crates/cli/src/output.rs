//! Output formatting for CLI responses

use anyhow::{Error, Result};
use colored::*;
use serde_json::json;
use std::time::Duration;
use twinjet_faults::SeverityBand;
use twinjet_session::{Command, Scenario, ScenarioSummary, SessionConfig};

use crate::commands::faults::FaultInfo;
use crate::commands::run::{TimelineEvent, ended_at_rest, format_time};

/// Print error in JSON format
pub fn print_error_json(error: &Error) {
    let error_json = json!({
        "success": false,
        "error": {
            "message": error.to_string(),
            "chain": error.chain().skip(1).map(ToString::to_string).collect::<Vec<_>>(),
        }
    });
    match serde_json::to_string_pretty(&error_json) {
        Ok(s) => println!("{s}"),
        Err(e) => eprintln!("Failed to format error as JSON: {e}"),
    }
}

/// Print error in human-readable format
pub fn print_error_human(error: &Error) {
    eprintln!("{} {}", "Error:".red().bold(), error);

    let mut source = error.source();
    while let Some(err) = source {
        eprintln!("  {} {}", "Caused by:".yellow(), err);
        source = err.source();
    }
}

fn band_colored(band: SeverityBand, text: &str) -> ColoredString {
    match band {
        SeverityBand::Red => text.red().bold(),
        SeverityBand::Amber => text.yellow(),
        SeverityBand::White => text.normal(),
    }
}

/// Print the fault catalogue
pub fn print_fault_list(faults: &[FaultInfo], json: bool) -> Result<()> {
    if json {
        let output = json!({
            "success": true,
            "faults": faults
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("{}", "Fault Conditions:".bold());
    for fault in faults {
        let marker = if fault.critical { "!" } else { " " };
        println!(
            "  {} {:<26} {:<6} {}",
            marker.red().bold(),
            fault.code,
            fault.band,
            band_colored(fault.band, fault.message)
        );
    }
    Ok(())
}

/// Print a session configuration
pub fn print_config(config: &SessionConfig, json: bool) -> Result<()> {
    if json {
        let output = json!({
            "success": true,
            "config": config
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print!("{}", serde_yaml::to_string(config)?);
    }
    Ok(())
}

/// Print a validated scenario
pub fn print_scenario(
    scenario: &Scenario,
    timeline: &[(Duration, Command)],
    json: bool,
) -> Result<()> {
    if json {
        let output = json!({
            "success": true,
            "scenario": scenario
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!(
        "{} {} ({:.1}s, {} events)",
        "✓".green(),
        scenario.name.bold(),
        scenario.duration_secs,
        timeline.len()
    );
    if let Some(description) = &scenario.description {
        println!("  {}", description.dimmed());
    }
    for (at, command) in timeline {
        println!("  {}  {}", format_time(at.as_secs_f64()), command);
    }
    Ok(())
}

/// Print the alert timeline and outcome of a run
pub fn print_run_summary(
    summary: &ScenarioSummary,
    events: &[TimelineEvent],
    json: bool,
) -> Result<()> {
    if json {
        let output = json!({
            "success": true,
            "scenario": summary.name,
            "ticks": summary.ticks,
            "final_state": summary.final_state,
            "final_time_secs": summary.final_time.as_secs_f64(),
            "auto_shutdowns": summary.auto_shutdowns.len(),
            "timeline": events,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("{} {}", "Scenario:".bold(), summary.name);
    for event in events {
        match event {
            TimelineEvent::State {
                time_secs, from, to, ..
            } => println!(
                "  {}  {} {} → {}",
                format_time(*time_secs),
                "STATE".cyan(),
                from,
                to
            ),
            TimelineEvent::Raised {
                time_secs,
                band,
                message,
                ..
            } => println!(
                "  {}  {} {}",
                format_time(*time_secs),
                "ALERT".bold(),
                band_colored(*band, message)
            ),
            TimelineEvent::Expired { time_secs, code } => println!(
                "  {}  {} {}",
                format_time(*time_secs),
                "CLEAR".dimmed(),
                code.dimmed()
            ),
            TimelineEvent::AutoShutdown { time_secs } => println!(
                "  {}  {}",
                format_time(*time_secs),
                "SYSTEM: AUTO SHUTDOWN TRIGGERED".red().bold()
            ),
        }
    }

    let state = summary.final_state.to_string();
    println!(
        "{} {} after {} ticks ({:.3}s)",
        "Final state:".bold(),
        if ended_at_rest(summary) {
            state.green()
        } else {
            state.yellow()
        },
        summary.ticks,
        summary.final_time.as_secs_f64()
    );
    if !summary.auto_shutdowns.is_empty() {
        println!(
            "{} {} automatic shutdown(s)",
            "Warning:".yellow().bold(),
            summary.auto_shutdowns.len()
        );
    }
    Ok(())
}
