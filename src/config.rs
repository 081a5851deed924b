/// Configuration resolution module
///
/// This module handles:
/// - Building an AuditConfig from CLI arguments
/// - Locating the export when none is given
/// - Expanding owner/rule-name lists given as files
use crate::cli::CliArgs;
use crate::filter::RuleFilter;
use crate::ui;
use log::debug;
use std::env;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable naming the export when `--file` is not given
pub const FILE_ENV_VAR: &str = "RULE_AUDIT_FILE";

/// Fully resolved settings for one run
#[derive(Debug, Clone, PartialEq)]
pub struct AuditConfig {
    pub input: PathBuf,
    pub output_base: PathBuf,
    pub filter: RuleFilter,
    pub readable: bool,
    pub json: bool,
    pub show_progress: bool,
}

impl AuditConfig {
    fn output_with_extension(&self, ext: &str) -> PathBuf {
        let mut name: OsString = self.output_base.as_os_str().to_owned();
        name.push(".");
        name.push(ext);
        PathBuf::from(name)
    }

    pub fn stats_path(&self) -> PathBuf {
        self.output_with_extension("tsv")
    }

    pub fn readable_path(&self) -> PathBuf {
        self.output_with_extension("txt")
    }

    pub fn json_path(&self) -> PathBuf {
        self.output_with_extension("json")
    }
}

/// Build a complete AuditConfig from CLI arguments
///
/// Everything is resolved upfront so the pipeline receives validated input.
pub fn build_audit_config(args: &CliArgs) -> Result<AuditConfig, String> {
    debug!("Building audit config from CLI args");

    let input = match &args.file {
        Some(file) => file.clone(),
        None => match env::var(FILE_ENV_VAR) {
            Ok(file) => {
                debug!("Using export from {}: {}", FILE_ENV_VAR, file);
                PathBuf::from(file)
            }
            Err(_) => {
                let cwd = env::current_dir().map_err(|e| format!("Cannot read working directory: {}", e))?;
                find_default_export(&cwd)?.ok_or_else(|| "No file ending in tsv found.".to_string())?
            }
        },
    };
    debug!("Export: {:?}", input);

    let owners = expand_list_argument(args.mails.as_deref())?;
    let names = expand_list_argument(args.rules.as_deref())?;

    Ok(AuditConfig {
        input,
        output_base: args.output.clone(),
        filter: RuleFilter::new(owners, names),
        readable: args.readable,
        json: args.json,
        show_progress: !args.no_progress && ui::stdout_is_terminal(),
    })
}

/// Pick the last `.tsv` file (by name) in `dir`
pub fn find_default_export(dir: &Path) -> Result<Option<PathBuf>, String> {
    let entries = fs::read_dir(dir).map_err(|e| format!("Cannot list {}: {}", dir.display(), e))?;

    let mut candidates: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "tsv"))
        .collect();
    candidates.sort();

    Ok(candidates.pop())
}

/// Expand a list argument; a single value naming a file is read as one entry per line
pub fn expand_list_argument(values: Option<&[String]>) -> Result<Option<Vec<String>>, String> {
    let Some(values) = values else {
        return Ok(None);
    };

    if let [single] = values
        && Path::new(single).is_file()
    {
        debug!("Reading list entries from {}", single);
        let content = fs::read_to_string(single).map_err(|e| format!("Failed to read {}: {}", single, e))?;
        let entries = content.lines().map(str::trim).filter(|l| !l.is_empty()).map(str::to_string).collect();
        return Ok(Some(entries));
    }

    Ok(Some(values.to_vec()))
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
