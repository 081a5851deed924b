use clap::Parser;
use std::path::PathBuf;

/// Default output base name (extension is added per format)
pub const DEFAULT_OUTPUT: &str = "rule_log_analysis";

#[derive(Parser, Debug, Clone)]
#[command(name = "rule-audit")]
#[command(about = "Parse a SIEM rule export, count how often each test appears and classify it, \
                   and list the rules that add to reference sets together with their test counts")]
#[command(version)]
pub struct CliArgs {
    /// Rule export to analyze (.txt, .tsv or .csv)
    /// Default: the last .tsv file in the working directory
    #[arg(long, short = 'f', value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Output file base name, without extension
    #[arg(long, short = 'o', default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Only analyze rules whose owner contains one of these substrings
    /// Matching is partial: "acme" selects every owner containing "acme".
    /// A single value naming a file is read as one owner per line.
    #[arg(long, short = 'm', value_name = "OWNER", num_args = 1..)]
    pub mails: Option<Vec<String>>,

    /// Only analyze rules whose name contains one of these substrings
    /// Quote names containing spaces. A single value naming a file is read
    /// as one name per line.
    #[arg(long, short = 'r', value_name = "NAME", num_args = 1..)]
    pub rules: Option<Vec<String>>,

    /// Write a readable text dump of the analyzed rules instead of the test statistics table
    #[arg(long, short = 'R')]
    pub readable: bool,

    /// Also write a JSON report with every table and the summary
    #[arg(long)]
    pub json: bool,

    /// Don't draw the progress bar while parsing
    #[arg(long)]
    pub no_progress: bool,
}

impl CliArgs {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        CliArgs::parse()
    }

    /// Validate argument combinations
    pub fn validate(&self) -> Result<(), String> {
        for (flag, values) in [("--mails", &self.mails), ("--rules", &self.rules)] {
            if let Some(values) = values
                && values.iter().any(|v| v.is_empty())
            {
                return Err(format!("{} entries must not be empty", flag));
            }
        }

        if self.output.as_os_str().is_empty() {
            return Err("--output must not be empty".to_string());
        }

        Ok(())
    }
}
