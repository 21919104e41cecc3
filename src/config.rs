use anyhow::Result;
use clap::Parser;
use dotenvy::dotenv;
use std::path::PathBuf;

fn default_results_dir() -> PathBuf {
    PathBuf::from("output/")
}

/// Command line and environment settings for one run.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "race_results",
    version,
    about = "Tally race winners across a directory of result spreadsheets"
)]
pub struct Config {
    /// Directory holding the result spreadsheets
    #[arg(env = "RESULTS_DIR", default_value_os_t = default_results_dir())]
    pub results_dir: PathBuf,

    /// Write one HTML page per spreadsheet into this directory
    #[arg(long, env = "HTML_OUTPUT_DIR")]
    pub html_dir: Option<PathBuf>,

    /// Print the summary and leaderboard as JSON
    #[arg(long)]
    pub json: bool,
}

impl Config {
    pub fn new() -> Result<Self> {
        // Load .env file first so clap sees its variables
        dotenv().ok();

        let config = Config::parse();
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.results_dir.as_os_str().is_empty() {
            anyhow::bail!("Results directory must not be empty");
        }
        if let Some(dir) = &self.html_dir {
            if dir.as_os_str().is_empty() {
                anyhow::bail!("HTML output directory must not be empty");
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_directory_and_flags() {
        let config = Config::try_parse_from(["race_results", "results", "--html-dir", "pages", "--json"])
            .unwrap();
        assert_eq!(config.results_dir, PathBuf::from("results"));
        assert_eq!(config.html_dir, Some(PathBuf::from("pages")));
        assert!(config.json);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_empty_directory() {
        let config = Config {
            results_dir: PathBuf::new(),
            html_dir: None,
            json: false,
        };
        assert!(config.validate().is_err());
    }
}
