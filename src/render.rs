//! Terminal views for reports, history, and tax results.
//!
//! All views render to `String` so they can be unit tested; the binary just
//! prints them. Styling goes through `console`, which drops ANSI codes when
//! the output is not a terminal.

use crate::models::{AnalysisReport, UploadOutcome};
use crate::tax::TaxComputation;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Width of the longest allocation bar, in characters.
const BAR_WIDTH: usize = 30;

/// Formats a rupee amount with Indian-system digit grouping:
/// `240000 -> "₹2,40,000"`. Fractions are rounded to the nearest rupee.
pub fn format_inr(amount: f64) -> String {
    let negative = amount < 0.0;
    let rupees = amount.abs().round() as u64;
    let grouped = group_indian(rupees);
    if negative {
        format!("-₹{}", grouped)
    } else {
        format!("₹{}", grouped)
    }
}

/// Indian digit grouping: the last three digits form one group, every two
/// digits after that form another (lakh/crore system).
fn group_indian(n: u64) -> String {
    let digits = n.to_string();
    if digits.len() <= 3 {
        return digits;
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups = Vec::new();
    let head_bytes = head.as_bytes();
    let mut end = head_bytes.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    format!("{},{}", groups.join(","), tail)
}

/// Creation date for display: parsed and formatted when possible, the raw
/// wire string otherwise.
fn format_created(report: &AnalysisReport) -> String {
    match report.created_date() {
        Some(date) => date.format("%b %d, %Y %H:%M").to_string(),
        None => report
            .created_at
            .clone()
            .unwrap_or_else(|| "unknown".to_string()),
    }
}

/// Full report view: headline stats, allocation chart, analysis text.
pub fn render_report(report: &AnalysisReport) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "{}\n",
        style("Your Personalized Financial Strategy").bold()
    ));
    out.push_str(&format!(
        "Document: {} • Generated: {}\n\n",
        report.document_name,
        format_created(report)
    ));

    out.push_str(&format!(
        "  Current Tax        {}\n",
        style(format_inr(report.current_tax)).cyan()
    ));
    out.push_str(&format!(
        "  Potential Savings  {}\n",
        style(format_inr(report.potential_savings)).green()
    ));
    if let Some(share) = report.savings_share() {
        out.push_str(&format!(
            "  Savings Share      {}\n",
            style(format!("{:.1}%", share)).green()
        ));
    }
    out.push('\n');

    let chart = render_allocation_chart(report);
    if !chart.is_empty() {
        out.push_str(&format!("{}\n", style("Investment Distribution").bold()));
        out.push_str(&chart);
        out.push('\n');
    }

    if let Some(analysis) = &report.ai_analysis {
        out.push_str(&format!("{}\n{}\n", style("Strategy Summary").bold(), analysis));
    }

    out
}

/// Text bar chart of the recommended allocation. The backend does not
/// guarantee well-formed percentages, so non-positive slices are skipped.
fn render_allocation_chart(report: &AnalysisReport) -> String {
    let slices: Vec<_> = report
        .investment_allocation
        .iter()
        .filter(|a| a.percentage > 0.0)
        .collect();
    let max = slices
        .iter()
        .map(|a| a.percentage)
        .fold(0.0_f64, f64::max);
    if max <= 0.0 {
        return String::new();
    }

    let label_width = slices
        .iter()
        .map(|a| a.instrument.chars().count())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for slice in slices {
        let width = ((slice.percentage / max) * BAR_WIDTH as f64).round() as usize;
        let bar: String = "█".repeat(width.max(1));
        out.push_str(&format!(
            "  {:<label_width$}  {} {:.0}%\n",
            slice.instrument,
            style(bar).blue(),
            slice.percentage,
        ));
    }
    out
}

/// Normalized upload result view.
pub fn render_outcome(outcome: &UploadOutcome) -> String {
    match outcome {
        UploadOutcome::Report(report) => render_report(report),
        UploadOutcome::Suggestion(text) => {
            format!("{}\n{}\n", style("Suggestion").bold(), text)
        }
    }
}

/// History table: id, document, date, savings per stored report.
pub fn render_history(reports: &[AnalysisReport]) -> String {
    if reports.is_empty() {
        return "No analyses stored yet. Upload a document to get started.\n".to_string();
    }

    let mut out = String::new();
    out.push_str(&format!(
        "{:<26} {:<34} {:<20} {}\n",
        style("ID").bold(),
        style("Document").bold(),
        style("Date").bold(),
        style("Savings").bold()
    ));
    for report in reports {
        out.push_str(&format!(
            "{:<26} {:<34} {:<20} {}\n",
            report.id,
            report.document_name,
            format_created(report),
            format_inr(report.potential_savings)
        ));
    }
    out
}

/// Tax calculation view with the slab breakdown table.
pub fn render_tax(computation: &TaxComputation) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", style("Tax Calculation Result").bold()));
    out.push_str(&format!(
        "  Taxable Income  {}\n",
        format_inr(computation.taxable_income)
    ));
    out.push_str(&format!(
        "  Tax Owed        {}\n\n",
        style(format_inr(computation.total_tax)).cyan()
    ));

    out.push_str(&format!("{}\n", style("Slabs (AY 2024-25)").bold()));
    out.push_str(&format!(
        "  {:<28} {:>6} {:>14}\n",
        "Income Range", "Rate", "Tax"
    ));
    for line in &computation.lines {
        let range = match line.slab.ceiling {
            Some(ceiling) if line.slab.floor == 0.0 => {
                format!("Up to {}", format_inr(ceiling))
            }
            Some(ceiling) => format!(
                "{} - {}",
                format_inr(line.slab.floor + 1.0),
                format_inr(ceiling)
            ),
            None => format!("Above {}", format_inr(line.slab.floor)),
        };
        out.push_str(&format!(
            "  {:<28} {:>5.0}% {:>14}\n",
            range,
            line.slab.rate * 100.0,
            format_inr(line.tax)
        ));
    }
    out
}

/// Spinner shown while an upload is in flight.
pub fn upload_spinner(document_name: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(format!("Analyzing {}...", document_name));
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner
}
