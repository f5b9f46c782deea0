//! Orchestration: resolve the profile, sweep, report and export.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fund_core::calculations::{MethodComparison, SweepOutcome, sweep};
use fund_core::{BonusTaxMethod, ScenarioEngine};
use fund_data::{Profile, export_to_file};
use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::{prompt, report};

/// Everything a run needs besides the profile answers.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// TOML profile; built-in defaults when absent.
    pub profile: Option<PathBuf>,
    /// Skip the prompts and use the profile as is.
    pub batch: bool,
    pub method: Option<BonusTaxMethod>,
    pub step: Option<Decimal>,
    pub max_multiple: Option<Decimal>,
    /// Where to write the sweep as CSV.
    pub export: Option<PathBuf>,
}

impl RunOptions {
    /// Command-line values win over the profile and the prompts.
    pub fn apply_overrides(
        &self,
        profile: &mut Profile,
    ) {
        if let Some(method) = self.method {
            profile.bonus_tax_method = method;
        }
        if let Some(step) = self.step {
            profile.sweep.step = step;
        }
        if let Some(max_multiple) = self.max_multiple {
            profile.sweep.max_multiple = max_multiple;
        }
    }
}

/// Loads the profile at `path`, or the built-in defaults.
pub fn load_profile(path: Option<&Path>) -> Result<Profile> {
    match path {
        Some(path) => Profile::load(path)
            .with_context(|| format!("failed to load profile '{}'", path.display())),
        None => Ok(Profile::default()),
    }
}

/// Layers defaults, profile file, answers and overrides into one profile.
pub fn resolve_profile<R: BufRead, W: Write>(
    options: &RunOptions,
    input: R,
    output: W,
) -> Result<Profile> {
    let loaded = load_profile(options.profile.as_deref())?;

    let mut profile = if options.batch {
        loaded
    } else {
        prompt::collect_profile(input, output, &loaded).context("failed to read answers")?
    };
    options.apply_overrides(&mut profile);

    debug!(?profile, "profile resolved");
    Ok(profile)
}

/// Runs one optimization and writes the report to `output`.
///
/// Returns the sweep so callers can inspect it.
pub fn run<R: BufRead, W: Write>(
    options: &RunOptions,
    input: R,
    mut output: W,
) -> Result<SweepOutcome> {
    let profile = resolve_profile(options, input, &mut output)?;

    let engine =
        ScenarioEngine::new(profile.to_config()).context("invalid calculator inputs")?;
    let range = profile.base_range().context("invalid sweep settings")?;
    let outcome = sweep(&engine, &range.candidates(), profile.bonus_tax_method)
        .context("failed to sweep contribution bases")?;
    let comparison = MethodComparison::at_base(&engine, profile.employer_fund_base)
        .context("failed to compare bonus tax methods")?;

    report::write_report(&mut output, &outcome, &comparison).context("failed to write report")?;

    if let Some(path) = &options.export {
        let rows = export_to_file(path, &outcome.results)
            .with_context(|| format!("failed to export results to '{}'", path.display()))?;
        writeln!(output)?;
        writeln!(output, "Exported {rows} rows to {}", path.display())?;
    }

    info!(
        best_base = %outcome.best().contribution_base,
        method = %outcome.method(),
        "run complete"
    );
    Ok(outcome)
}
