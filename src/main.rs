use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};

use sales_cleaner::app::clean_use_case::CleanUseCase;
use sales_cleaner::config::Config;
use sales_cleaner::constants;
use sales_cleaner::error::Result;
use sales_cleaner::{logging, metrics, PipelineOutcome, Table};

#[derive(Parser)]
#[command(name = "sales_cleaner")]
#[command(about = "Clean a raw sales CSV export for downstream analysis")]
#[command(version = "0.1.0")]
struct Cli {
    /// Raw CSV to read (overrides config and SALES_CLEANER_INPUT)
    #[arg(long, short)]
    input: Option<PathBuf>,
    /// Where to write the cleaned CSV (overrides config and SALES_CLEANER_OUTPUT)
    #[arg(long, short)]
    output: Option<PathBuf>,
    /// Config file (defaults to SALES_CLEANER_CONFIG, then ./sales_cleaner.toml)
    #[arg(long, short)]
    config: Option<PathBuf>,
}

fn load_config(cli: &Cli) -> Result<Config> {
    let config_path = cli.config.clone().or_else(|| {
        std::env::var(constants::ENV_CONFIG_PATH)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
    });
    let mut config = Config::load(config_path.as_deref())?;
    config.apply_env();
    config.apply_overrides(cli.input.clone(), cli.output.clone());
    Ok(config)
}

fn print_preview(table: &Table, rows: usize) {
    if rows == 0 {
        return;
    }
    println!("\nFirst {} rows:", rows.min(table.len()));
    println!("   {}", table.columns().join(" | "));
    for row in table.rows().iter().take(rows) {
        let fields: Vec<String> = row.cells().iter().map(|c| c.to_field()).collect();
        println!("   {}", fields.join(" | "));
    }
}

fn run(config: &Config) -> Result<PipelineOutcome> {
    println!("🔄 Cleaning {}...", config.paths.input.display());
    let use_case = CleanUseCase::from_config(config)?;
    let outcome = use_case.run()?;

    let report = &outcome.report;
    println!("\n📊 Cleaning Results:");
    println!("   Input rows: {}", report.rows_in);
    for stage in &report.stages {
        println!(
            "   {:<18} {:>7} -> {:<7} {:?}",
            stage.stage.name(),
            stage.rows_in,
            stage.rows_out,
            stage.counters
        );
    }
    println!("   Output rows: {}", report.rows_out);
    println!("   Output file: {}", config.paths.output.display());

    print_preview(&outcome.table, config.output.preview_rows);
    Ok(outcome)
}

fn main() -> ExitCode {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let config = load_config(&cli);
    let log_dir = config
        .as_ref()
        .ok()
        .and_then(|c| c.logging.directory.clone());
    let _log_guard = logging::init_logging(log_dir.as_deref());

    let config = match config {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            println!("❌ {}", e);
            return ExitCode::from(e.exit_code());
        }
    };

    if config.paths.metrics.is_some() {
        metrics::init_metrics();
    }

    let result = run(&config);

    if let Some(path) = &config.paths.metrics {
        if let Err(e) = metrics::write_snapshot(path) {
            error!("Failed to write metrics snapshot: {}", e);
        }
    }

    match result {
        Ok(_) => {
            info!("Cleaning complete");
            println!("\n✅ Cleaning complete!");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Cleaning failed: {}", e);
            println!("❌ Cleaning failed: {}", e);
            ExitCode::from(e.exit_code())
        }
    }
}
