//! BuildGuard CLI - PC build compatibility checks from the command line.

use buildguard::{
    BuildGuardCore, BuildReport, CandidateVerdict, Category, RelatedGroup, Rule, RulesEngine,
    ValidationOptions,
};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "buildguard")]
#[command(about = "PC build compatibility checker", long_about = None)]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a build file for incompatible parts
    Check {
        /// JSON object mapping slot names to product records
        #[arg(value_name = "BUILD")]
        build: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "human")]
        format: OutputFormat,

        /// Exit with error code if findings at this severity or higher exist
        #[arg(long, value_enum)]
        fail_on: Option<FailOnSeverity>,

        /// Only run these rules (repeatable)
        #[arg(long = "rule", value_name = "ID")]
        rules: Vec<String>,
    },

    /// Rank catalog parts for one slot, compatible parts first
    Candidates {
        /// Current build file
        #[arg(value_name = "BUILD")]
        build: PathBuf,

        /// Catalog file (JSON array of product records)
        #[arg(long, value_name = "FILE")]
        catalog: PathBuf,

        /// Slot to fill (cpu, motherboard, ram, gpu, case, cooler, storage, psu)
        #[arg(long)]
        slot: String,

        /// Output format
        #[arg(short, long, value_enum, default_value = "human")]
        format: OutputFormat,

        /// Hide incompatible parts
        #[arg(long)]
        compatible_only: bool,
    },

    /// List catalog parts that pair cleanly with one part
    Related {
        /// Catalog id of the part
        #[arg(value_name = "ID")]
        id: String,

        /// Catalog file (JSON array of product records)
        #[arg(long, value_name = "FILE")]
        catalog: PathBuf,

        /// Maximum parts per group
        #[arg(long, default_value_t = 4)]
        limit: usize,

        /// Output format
        #[arg(short, long, value_enum, default_value = "human")]
        format: OutputFormat,
    },

    /// List available compatibility rules
    Rules {
        /// Show rule descriptions
        #[arg(short, long)]
        verbose: bool,
    },
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}

#[derive(Clone, ValueEnum)]
enum FailOnSeverity {
    Error,
    Warning,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let exit_code = match cli.command {
        Commands::Check {
            build,
            format,
            fail_on,
            rules,
        } => handle_check(&build, format, fail_on, rules),
        Commands::Candidates {
            build,
            catalog,
            slot,
            format,
            compatible_only,
        } => handle_candidates(&build, &catalog, &slot, format, compatible_only),
        Commands::Related {
            id,
            catalog,
            limit,
            format,
        } => handle_related(&id, &catalog, limit, format),
        Commands::Rules { verbose } => {
            handle_rules(verbose);
            0
        }
    };

    process::exit(exit_code);
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn handle_check(
    build: &PathBuf,
    format: OutputFormat,
    fail_on: Option<FailOnSeverity>,
    rules: Vec<String>,
) -> i32 {
    let options = ValidationOptions {
        rules,
        ..Default::default()
    };

    match BuildGuardCore::check_build(build, &options) {
        Ok(report) => {
            match format {
                OutputFormat::Human => output_report_human(&report),
                OutputFormat::Json => print_json(&serde_json::json!({
                    "file": report.file.display().to_string(),
                    "result": report.result,
                })),
            }
            if let Some(severity) = fail_on {
                if should_fail(&report, &severity) {
                    return 1;
                }
            }
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn should_fail(report: &BuildReport, severity: &FailOnSeverity) -> bool {
    match severity {
        FailOnSeverity::Error => report.has_errors(),
        FailOnSeverity::Warning => report.has_errors() || report.has_warnings(),
    }
}

fn output_report_human(report: &BuildReport) {
    println!("\nBuild: {}", report.file.display());
    println!("{}", "─".repeat(60));

    for part in report.build.parts() {
        println!("  {:<14} {} ({})", part.category().label(), part.name(), part.summary());
    }

    if report.result.valid {
        println!("\n  Compatibility: OK");
    } else {
        println!("\n  Compatibility Issues:");
        for error in &report.result.errors {
            println!("    - {}", error);
        }
    }
    if !report.result.warnings.is_empty() {
        println!("\n  Warnings:");
        for warning in &report.result.warnings {
            println!("    - {}", warning);
        }
    }
    println!("\n  Est. Wattage: {}W", report.result.estimated_wattage);
}

fn handle_candidates(
    build: &PathBuf,
    catalog: &PathBuf,
    slot: &str,
    format: OutputFormat,
    compatible_only: bool,
) -> i32 {
    let category: Category = match slot.parse() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };

    match BuildGuardCore::rank_for_slot(catalog, build, category, &ValidationOptions::default()) {
        Ok(verdicts) => {
            let shown: Vec<&CandidateVerdict> = verdicts
                .iter()
                .filter(|v| v.compatible || !compatible_only)
                .collect();
            match format {
                OutputFormat::Human => output_candidates_human(category, &shown),
                OutputFormat::Json => print_json(&serde_json::json!({
                    "slot": category,
                    "candidates": shown,
                })),
            }
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn output_candidates_human(category: Category, verdicts: &[&CandidateVerdict]) {
    println!("\n{} candidates:", category.label());
    println!("{}", "─".repeat(60));
    if verdicts.is_empty() {
        println!("  No parts available");
        return;
    }
    for verdict in verdicts {
        let marker = if verdict.compatible { "OK" } else { "Incompatible" };
        println!(
            "  [{}] {} - {} ({})",
            marker,
            verdict.part.id(),
            verdict.part.name(),
            verdict.part.summary()
        );
        if !verdict.compatible {
            for error in &verdict.result.errors {
                println!("      {}", error);
            }
        }
    }
}

fn handle_related(id: &str, catalog: &PathBuf, limit: usize, format: OutputFormat) -> i32 {
    let options = ValidationOptions {
        related_limit: limit,
        ..Default::default()
    };
    match BuildGuardCore::related_for(catalog, id, &options) {
        Ok(groups) => {
            match format {
                OutputFormat::Human => output_related_human(id, &groups),
                OutputFormat::Json => print_json(&serde_json::json!({
                    "id": id,
                    "groups": groups,
                })),
            }
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn output_related_human(id: &str, groups: &[RelatedGroup]) {
    println!("\nRelated to {}:", id);
    if groups.is_empty() {
        println!("  No related categories");
    }
    for group in groups {
        println!("\n  {}:", group.title);
        if group.parts.is_empty() {
            println!("    (none)");
        }
        for part in &group.parts {
            println!("    - {} ({})", part.name(), part.summary());
        }
    }
}

fn print_json(value: &serde_json::Value) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{}", text),
        Err(e) => eprintln!("Error: {}", e),
    }
}

fn handle_rules(verbose: bool) {
    println!("Available compatibility rules:\n");

    for rule in RulesEngine::with_default_rules().rules() {
        println!("  {}", rule.id());
        println!("    {}", rule.name());
        if verbose {
            println!("    {}", rule.description());
        }
        println!();
    }
}
