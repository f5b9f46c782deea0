//! Plain-text report of a sweep.
//!
//! Everything here is presentation: labels for the stable model identifiers,
//! a grid table of scenarios and the analysis paragraphs. Amounts are rounded
//! to whole currency units only when they are rendered.

use std::io::{self, Write};

use fund_core::calculations::{MethodComparison, Recommendation, SweepAnalysis, SweepOutcome};
use fund_core::{BonusTaxMethod, ScenarioResult};

use crate::utils::{format_percent, format_units};

const RULE_WIDTH: usize = 70;

/// Table headers, in column order.
pub const COLUMNS: [&str; 10] = [
    "Base",
    "Personal",
    "Employer",
    "Monthly fund",
    "Employer extra",
    "Employee extra",
    "Annual tax",
    "Monthly cash",
    "Annual fund",
    "Annual total",
];

/// Human-readable name of a bonus tax method.
pub fn method_label(method: BonusTaxMethod) -> &'static str {
    match method {
        BonusTaxMethod::Combined => "bonus combined with comprehensive income",
        BonusTaxMethod::Separate => "bonus taxed separately",
    }
}

fn row_cells(result: &ScenarioResult) -> [String; 10] {
    [
        format_units(result.contribution_base),
        format_units(result.personal_contribution),
        format_units(result.employer_contribution),
        format_units(result.monthly_contribution_total()),
        format_units(result.employer_extra_contribution),
        format_units(result.employee_extra_payment),
        format_units(result.annual_tax),
        format_units(result.monthly_cash),
        format_units(result.annual_contribution_income),
        format_units(result.annual_total_income),
    ]
}

fn write_border<W: Write>(
    out: &mut W,
    widths: &[usize],
    fill: char,
) -> io::Result<()> {
    let mut line = String::from("+");
    for width in widths {
        line.extend(std::iter::repeat_n(fill, width + 2));
        line.push('+');
    }
    writeln!(out, "{line}")
}

/// Writes one scenario per row as a bordered grid.
pub fn write_table<W: Write>(
    out: &mut W,
    results: &[ScenarioResult],
) -> io::Result<()> {
    let rows: Vec<[String; 10]> = results.iter().map(row_cells).collect();

    let mut widths: Vec<usize> = COLUMNS.iter().map(|header| header.len()).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.len());
        }
    }

    write_border(out, &widths, '-')?;
    let mut header = String::from("|");
    for (title, width) in COLUMNS.iter().zip(widths.iter().copied()) {
        header.push_str(&format!(" {title:<width$} |"));
    }
    writeln!(out, "{header}")?;
    write_border(out, &widths, '=')?;

    for row in &rows {
        let mut line = String::from("|");
        for (cell, width) in row.iter().zip(widths.iter().copied()) {
            line.push_str(&format!(" {cell:>width$} |"));
        }
        writeln!(out, "{line}")?;
        write_border(out, &widths, '-')?;
    }
    Ok(())
}

/// Baseline versus best, plus the breakdown of where the gain comes from.
pub fn write_analysis<W: Write>(
    out: &mut W,
    analysis: &SweepAnalysis,
) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "Analysis:")?;
    writeln!(
        out,
        "   Declared base {} -> annual total income {}",
        format_units(analysis.baseline_base),
        format_units(analysis.baseline_income)
    )?;
    writeln!(
        out,
        "   Best base {} -> annual total income {}",
        format_units(analysis.best_base),
        format_units(analysis.best_income)
    )?;

    if !analysis.improves() {
        writeln!(out, "   Raising the base does not increase income")?;
        return Ok(());
    }

    let pct = analysis
        .income_increase_pct
        .map(|pct| format!(" (+{})", format_percent(pct)))
        .unwrap_or_default();
    writeln!(
        out,
        "   Raising the base adds {} per year{pct}",
        format_units(analysis.income_increase)
    )?;

    writeln!(out)?;
    writeln!(out, "Breakdown:")?;
    writeln!(out, "   Tax saving:        {}", format_units(analysis.tax_saving))?;
    writeln!(out, "   Fund increase:     {}", format_units(analysis.fund_increase))?;
    writeln!(out, "   Extra payment:     {}", format_units(analysis.extra_cost))?;
    writeln!(out, "   Net gain:          {}", format_units(analysis.net_gain))?;
    writeln!(
        out,
        "   Personal contribution: +{} per month",
        format_units(analysis.personal_contribution_delta)
    )?;
    writeln!(
        out,
        "   Employer contribution: +{} per month",
        format_units(analysis.employer_contribution_delta)
    )
}

pub fn write_recommendation<W: Write>(
    out: &mut W,
    analysis: &SweepAnalysis,
) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "Recommendation:")?;
    match analysis.recommendation() {
        Recommendation::RaiseBase { to } => {
            writeln!(out, "   Raise the housing-fund base to {}", format_units(to))?;
            writeln!(
                out,
                "   Annual income rises by {}",
                format_units(analysis.income_increase)
            )?;
            writeln!(
                out,
                "   Monthly cash falls by {}",
                format_units(analysis.monthly_cash_reduction)
            )?;
            writeln!(
                out,
                "   The fund account grows by {} per year",
                format_units(analysis.fund_increase)
            )?;
            writeln!(
                out,
                "   Income tax falls by {} per year",
                format_units(analysis.tax_saving)
            )
        }
        Recommendation::KeepDeclaredBase { base } => writeln!(
            out,
            "   Keeping the declared base of {} is optimal",
            format_units(base)
        ),
    }
}

pub fn write_method_comparison<W: Write>(
    out: &mut W,
    comparison: &MethodComparison,
) -> io::Result<()> {
    writeln!(out)?;
    writeln!(
        out,
        "Bonus tax methods at base {}:",
        format_units(comparison.combined.contribution_base)
    )?;
    for method in BonusTaxMethod::all() {
        let result = comparison.result_for(*method);
        writeln!(
            out,
            "   {}: annual tax {}, annual total income {}",
            method_label(*method),
            format_units(result.annual_tax),
            format_units(result.annual_total_income)
        )?;
    }
    writeln!(
        out,
        "   Prefer {}: saves {} in tax",
        method_label(comparison.preferred()),
        format_units(comparison.tax_saving())
    )
}

/// Full report: table, analysis, recommendation and method comparison.
pub fn write_report<W: Write>(
    out: &mut W,
    outcome: &SweepOutcome,
    comparison: &MethodComparison,
) -> io::Result<()> {
    let analysis = SweepAnalysis::from_outcome(outcome);

    writeln!(out)?;
    writeln!(out, "Results ({}):", method_label(outcome.method()))?;
    writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;
    write_table(out, &outcome.results)?;
    write_analysis(out, &analysis)?;
    write_recommendation(out, &analysis)?;
    write_method_comparison(out, comparison)
}
