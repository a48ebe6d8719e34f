//! Example: check a build file and list compatible parts for one slot.
//! Run with: cargo run --example simple_check [build.json] [catalog.json] [slot]

use buildguard::prelude::*;
use std::path::Path;

fn main() -> Result<(), BuildGuardError> {
    let mut args = std::env::args().skip(1);
    let build_path = args
        .next()
        .unwrap_or_else(|| "tests/fixtures/build_ok.json".to_string());
    let catalog_path = args
        .next()
        .unwrap_or_else(|| "tests/fixtures/catalog.json".to_string());
    let slot: Category = args.next().as_deref().unwrap_or("case").parse()?;

    let report =
        BuildGuardCore::check_build(Path::new(&build_path), &ValidationOptions::default())?;
    println!(
        "{}: {} ({}W estimated)",
        build_path,
        if report.result.valid { "compatible" } else { "incompatible" },
        report.result.estimated_wattage
    );
    for error in &report.result.errors {
        println!("  error: {}", error);
    }
    for warning in &report.result.warnings {
        println!("  warning: {}", warning);
    }

    let ranked = BuildGuardCore::rank_for_slot(
        Path::new(&catalog_path),
        Path::new(&build_path),
        slot,
        &ValidationOptions::default(),
    )?;
    println!("\n{} candidates:", slot.label());
    for verdict in ranked {
        let mark = if verdict.compatible { "+" } else { "-" };
        println!("  {} {} ({})", mark, verdict.part.name(), verdict.part.summary());
    }
    Ok(())
}
