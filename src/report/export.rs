//! Report export functions for TSV, readable text and JSON formats.
//!
//! Writers are only called once the whole pipeline has succeeded, so a
//! failed run never leaves partial output behind.

use super::types::TestStatRow;
use crate::audit::AuditOutcome;
use crate::error::Result;
use crate::types::Rule;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Width the readable dump pads field labels to
const LABEL_WIDTH: usize = 30;

/// Render a name list as `[a, b]`
fn format_name_list(names: &[String]) -> String {
    format!("[{}]", names.join(", "))
}

fn format_bool(value: bool) -> &'static str {
    if value { "True" } else { "False" }
}

/// Write the test-statistics report as a tab-separated table.
///
/// # Arguments
/// * `rows` - Test statistics rows
/// * `output_path` - Path of the `.tsv` file to create
pub fn export_test_stats_tsv(rows: &[TestStatRow], output_path: &Path) -> Result<()> {
    let mut writer = csv::WriterBuilder::new().delimiter(b'\t').from_path(output_path)?;

    writer.write_record(["Test", "Type", "Total_Count", "Active_count", "Inactive_count", "BB", "Rules"])?;
    for row in rows {
        writer.write_record([
            row.test.clone(),
            row.stat.test_type.as_str().to_string(),
            row.stat.total_count.to_string(),
            row.stat.active_count.to_string(),
            row.stat.inactive_count.to_string(),
            format_name_list(&row.stat.building_block_names),
            format_name_list(&row.stat.rule_names),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

/// Format one rule as a readable paragraph.
///
/// Each field is `label: value` with the label padded to 30 columns; the
/// tests follow on their own tab-indented lines.
pub fn format_rule_paragraph(rule: &Rule) -> String {
    let optional = |value: &Option<String>| value.clone().unwrap_or_else(|| "None".to_string());

    let mut fields: Vec<(&str, String)> = vec![
        ("Rule Name", rule.name.clone()),
        ("Enabled", format_bool(rule.enabled).to_string()),
        ("Building Block", format_bool(rule.is_building_block).to_string()),
        ("Owner", rule.owner.clone()),
        ("Test_count", rule.test_count().to_string()),
        ("Response Limiter", optional(&rule.response_limiter)),
        ("RESP: Add to Reference Set", optional(&rule.reference_set_target)),
    ];
    fields.extend(rule.extra.iter().map(|(column, value)| (column.as_str(), value.clone())));

    let mut out = String::new();
    for (label, value) in fields {
        out.push_str(&format!("{:<width$}: {}\n", label, value, width = LABEL_WIDTH));
    }
    out.push_str(&format!("{:<width$}: \n\t{}\n", "Tests", rule.tests.join("\n\t"), width = LABEL_WIDTH));
    out
}

/// Write the rule table as a readable text dump, one paragraph per rule.
pub fn export_readable_rules(rules: &[Rule], output_path: &Path) -> Result<()> {
    let mut file = BufWriter::new(File::create(output_path)?);

    for rule in rules {
        write!(file, "{}", format_rule_paragraph(rule))?;
        writeln!(file, "\n")?;
    }

    file.flush()?;
    Ok(())
}

/// Export all reports of a run as JSON.
///
/// # Arguments
/// * `outcome` - The audit results
/// * `source` - The export the audit was run on
/// * `output_path` - Path of the `.json` file to create
pub fn export_json_report(outcome: &AuditOutcome, source: &Path, output_path: &Path) -> Result<()> {
    use serde_json::json;

    let report = json!({
        "source": source.display().to_string(),
        "generated": chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        "summary": outcome.summary,
        "reference_set_rules": outcome.reference_set_report,
        "test_stats": outcome.test_stats,
        "rules": outcome.rules,
    });

    let file = BufWriter::new(File::create(output_path)?);
    serde_json::to_writer_pretty(file, &report)?;

    Ok(())
}
