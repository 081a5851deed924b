// Copyright 2015 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

mod aggregate;
mod audit;
mod cli;
mod config;
mod error;
mod filter;
mod normalize;
mod parser;
mod report;
mod types;
mod ui;

use audit::AuditOutcome;
use config::AuditConfig;
use error::{AuditError, REQUIRED_COLUMNS};
use log::info;

fn main() {
    env_logger::init();

    // Parse CLI arguments
    let args = cli::CliArgs::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        ui::print_error(&e);
        std::process::exit(1);
    }

    let config = match config::build_audit_config(&args) {
        Ok(c) => c,
        Err(e) => {
            ui::print_error(&format!("Configuration error: {}", e));
            std::process::exit(1);
        }
    };

    ui::status(&format!("Working on file {}", config.input.display()));

    let mut progress = ui::ProgressBar::new("Parsing", config.show_progress);
    let run = match audit::run_audit(&config.input, &config.filter, |done, total| progress.update(done, total)) {
        Ok(run) => run,
        Err(e) => {
            report_audit_error(&e);
            std::process::exit(1);
        }
    };

    for warning in &run.warnings {
        ui::print_warning(&warning.to_string());
    }

    let Some(outcome) = run.outcome else {
        ui::status(&format!(
            "no data found with the criteria mails={:?} and rules={:?}",
            config.filter.owners, config.filter.names
        ));
        return;
    };

    report::print_summary(&outcome.summary, &outcome.reference_set_report, ui::stdout_is_terminal());

    if let Err(e) = write_outputs(&outcome, &config) {
        ui::print_error(&format!("Failed to write results: {}", e));
        std::process::exit(1);
    }
}

fn report_audit_error(e: &AuditError) {
    ui::print_error(&e.to_string());
    if e.is_schema_error() {
        ui::print_error(&format!(
            "Seems like there was an error parsing the rule file. Please make sure that the following columns are \
             present in the file: {}",
            REQUIRED_COLUMNS.map(|c| format!("'{}'", c)).join(", ")
        ));
    }
}

/// Write the requested output files once the audit has fully succeeded
fn write_outputs(outcome: &AuditOutcome, config: &AuditConfig) -> error::Result<()> {
    if config.readable {
        let path = config.readable_path();
        ui::status(&format!("Writing legible info of their rules to file: {}", path.display()));
        report::export_readable_rules(&outcome.rules, &path)?;
    } else {
        let path = config.stats_path();
        info!("Writing test statistics to {:?}", path);
        report::export_test_stats_tsv(&outcome.test_stats, &path)?;
        ui::status(&format!("Test statistics saved to: {}", path.display()));
    }

    if config.json {
        let path = config.json_path();
        report::export_json_report(outcome, &config.input, &path)?;
        ui::status(&format!("JSON report saved to: {}", path.display()));
    }

    Ok(())
}
