use std::io;
use std::path::PathBuf;

use clap::Parser;
use fund_cli::utils::parse_decimal;
use fund_cli::{RunOptions, logging, run};
use fund_core::BonusTaxMethod;
use rust_decimal::Decimal;
use tracing::debug;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Housing-fund contribution base optimizer.
///
/// Asks for salary, bonus and fund details, evaluates every candidate
/// contribution base from the employer's declared base upwards and reports
/// which one yields the highest annual total income.
#[derive(Debug, Parser)]
#[command(name = "fund-optimizer", version)]
struct Cli {
    /// TOML profile with default answers and sweep settings.
    #[arg(long)]
    profile: Option<PathBuf>,

    /// Do not prompt; use the profile values as given.
    #[arg(long)]
    batch: bool,

    /// Bonus tax method (`combined` or `separate`). Overrides the profile
    /// and the prompt.
    #[arg(long)]
    method: Option<BonusTaxMethod>,

    /// Spacing between candidate bases.
    #[arg(long, value_parser = parse_decimal)]
    step: Option<Decimal>,

    /// Highest candidate base as a multiple of the employer's base.
    #[arg(long, value_parser = parse_decimal)]
    max_multiple: Option<Decimal>,

    /// Write every evaluated scenario to this CSV file.
    #[arg(long)]
    export: Option<PathBuf>,

    /// Append log output to this file as well as stderr.
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `info,fund_core=trace`. Defaults to
    /// `RUST_LOG`, then `info`.
    #[arg(long)]
    log_level: Option<String>,
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    logging::init_logging(cli.log_level.as_deref(), cli.log_file.as_deref())?;

    let options = RunOptions {
        profile: cli.profile,
        batch: cli.batch,
        method: cli.method,
        step: cli.step,
        max_multiple: cli.max_multiple,
        export: cli.export,
    };
    debug!(?options, "starting");

    run(&options, io::stdin().lock(), io::stdout().lock())?;
    Ok(())
}
