use anyhow::{Context, Result};
use clap::ArgMatches;
use colored::Colorize;

use crate::core::Bounds;

/// Explain a range specifier and test values against it.
pub fn execute(matches: &ArgMatches) -> Result<()> {
    let spec = matches
        .get_one::<String>("spec")
        .context("Range specifier is required")?;
    let bounds = Bounds::parse(spec).with_context(|| format!("Invalid range: {}", spec))?;

    println!("{}", "Range".bold().cyan());
    println!("  {:<10} {}", "canonical".dimmed(), canonical_text(&bounds));
    println!("  {:<10} {}", "matches".dimmed(), bounds);
    println!("  {:<10} {}", "alerts".dimmed(), bounds.violation_hint());

    let values: Vec<&String> = matches
        .get_many::<String>("values")
        .map(|values| values.collect())
        .unwrap_or_default();
    if values.is_empty() {
        return Ok(());
    }

    println!();
    println!("{}", "Values".bold().cyan());
    for raw in values {
        let value: f64 = raw
            .parse()
            .with_context(|| format!("Invalid value: {}", raw))?;

        if bounds.matches(value) {
            println!("  {:<12} {}", raw, "ok".green());
        } else {
            println!("  {:<12} {}", raw, bounds.violation_hint().red());
        }
    }

    Ok(())
}

/// Canonical specifier; the empty one is spelled out with the interval it covers.
fn canonical_text(bounds: &Bounds) -> String {
    let text = bounds.to_range_text();
    if text.is_empty() {
        format!("\"\" (same as {})", bounds.interval_text())
    } else {
        text
    }
}
