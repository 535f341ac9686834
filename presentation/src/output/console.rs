//! Console output formatter for store contents and migration reports

use colored::Colorize;
use confkeep_application::MigrationReport;
use confkeep_domain::{ConfigDocument, OptionRegistry, StoredValue};

/// Shown in place of values that must not be displayed
pub const MASK: &str = "********";

/// Formats store data for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format every section and option of the store.
    ///
    /// Values of options registered as secret are masked; confidential
    /// entries are labelled as such.
    pub fn format_document(doc: &ConfigDocument, registry: &OptionRegistry) -> String {
        if doc.is_empty() {
            return format!("{}\n", "(empty)".dimmed());
        }

        let mut output = String::new();
        for section in doc.sections() {
            output.push_str(&format!("{}\n", format!("[{}]", section.name()).cyan().bold()));
            for (key, value) in section.entries() {
                let secret = registry
                    .lookup(section.name(), key)
                    .is_some_and(|p| p.is_secret);
                let shown = match value {
                    StoredValue::Confidential => "<confidential>".yellow().to_string(),
                    StoredValue::Value(_) if secret => MASK.dimmed().to_string(),
                    StoredValue::Value(v) => v.clone(),
                };
                output.push_str(&format!("  {} = {}\n", key, shown));
            }
        }
        output
    }

    /// Format the registry as a table of known options
    pub fn format_registry(registry: &OptionRegistry) -> String {
        let mut output = String::new();
        output.push_str(&format!(
            "{:<24} {:<5} {:<6} {}\n",
            "OPTION".bold(),
            "ASK".bold(),
            "SECRET".bold(),
            "PROMPT".bold()
        ));
        for (key, policy) in registry.iter() {
            output.push_str(&format!(
                "{:<24} {:<5} {:<6} {}\n",
                key.to_string(),
                yes_no(policy.ask_before_persist),
                yes_no(policy.is_secret),
                policy.prompt
            ));
        }
        output
    }

    /// Format a migration report for humans
    pub fn format_report(report: &MigrationReport) -> String {
        if report.is_up_to_date() {
            return format!(
                "{} schema version {}\n",
                "Up to date:".green().bold(),
                report.to
            );
        }

        let mut output = format!(
            "{} {} -> {}\n",
            "Migrated:".green().bold(),
            report.from,
            report.to
        );
        for step in &report.applied {
            output.push_str(&format!("  {} -> {}  {}\n", step.from, step.to, step.name));
        }
        if let Some(backup) = &report.backup {
            output.push_str(&format!(
                "{} {}\n",
                "Backup:".cyan().bold(),
                backup.display()
            ));
        }
        output
    }

    /// Format a migration report as JSON
    pub fn format_report_json(report: &MigrationReport) -> String {
        serde_json::to_string_pretty(report).unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}
