// Report rendering for probe runs

use crate::probe::{RunReport, RunStatus};
use colored::Colorize;
use wallcheck_scanner::ClassifiedOutcome;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Text,
    Json,
}

impl ReportFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" => Some(ReportFormat::Text),
            "json" => Some(ReportFormat::Json),
            _ => None,
        }
    }
}

/// The report line with a status marker, colored for a terminal.
pub fn colored_line(report: &RunReport) -> String {
    let marker = match &report.status {
        RunStatus::Skipped => "-".bright_black().bold(),
        RunStatus::Completed(result) => match result.outcome {
            ClassifiedOutcome::PostDataFound { .. } => "✓".green().bold(),
            ClassifiedOutcome::ConsentWall => "⚠".yellow().bold(),
            ClassifiedOutcome::DashboardRedirect => "↪".cyan().bold(),
            ClassifiedOutcome::PostDataMissing => "?".yellow().bold(),
        },
        RunStatus::Failed { .. } => "✗".red().bold(),
    };
    format!("{} {}", marker, report.line())
}

/// Render one run for the chosen format. JSON output is one object per line.
pub fn render_run(report: &RunReport, format: ReportFormat) -> String {
    match format {
        ReportFormat::Text => colored_line(report),
        ReportFormat::Json => serde_json::to_string(report)
            .unwrap_or_else(|e| format!("{{\"profile\":\"{}\",\"status\":\"unserializable\",\"message\":\"{}\"}}", report.profile, e)),
    }
}

/// Tally of how the runs ended.
pub fn generate_summary(reports: &[RunReport]) -> String {
    let skipped = reports
        .iter()
        .filter(|r| matches!(r.status, RunStatus::Skipped))
        .count();
    let failed = reports
        .iter()
        .filter(|r| matches!(r.status, RunStatus::Failed { .. }))
        .count();
    let completed = reports.len() - skipped - failed;

    let mut summary = String::new();
    summary.push_str("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n");
    summary.push_str(&format!("  Runs: {}\n", reports.len()));
    summary.push_str(&format!("  Classified: {}\n", completed));
    summary.push_str(&format!("  Skipped: {}\n", skipped));
    summary.push_str(&format!("  Failed: {}\n", failed));

    for report in reports {
        if let RunStatus::Completed(ref result) = report.status {
            summary.push_str(&format!(
                "  {} -> {} ({} {})\n",
                report.profile,
                result.outcome.as_str(),
                result.status_code,
                result.final_url
            ));
        }
    }

    summary
}
