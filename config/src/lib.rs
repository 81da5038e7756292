use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// numeric values
pub const PADJ_THRESHOLD: f64 = 0.05;
pub const MAX_TARGETS: usize = 10;
pub const CALL_DELAY_SECONDS: u64 = 5;
pub const TEMPERATURE: f32 = 0.0;

// model
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";
pub const BASE_URL_ENV: &str = "OPENAI_BASE_URL";

// file names
pub const BIODOMAIN_RESULTS: &str = "biodomain_results.csv";
pub const TARGET_WITH_BIODOMAIN: &str = "target_with_biodomain.csv";

// column names
pub const PATHWAY_COLUMN: &str = "pathway";
pub const BIODOMAIN_COLUMN: &str = "Biodomain";
pub const PVALUE_COLUMN: &str = "p_FXS";
pub const PADJ_COLUMN: &str = "padj_FXS";

// os
#[cfg(not(windows))]
const TICK_SETTINGS: (&str, u64) = ("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ", 80);
#[cfg(windows)]
const TICK_SETTINGS: (&str, u64) = (r"+-x| ", 200);

/// return a pre-configured progress bar
pub fn get_progress_bar(length: u64, msg: &str) -> ProgressBar {
    let progressbar_style = ProgressStyle::default_spinner()
        .tick_chars(TICK_SETTINGS.0)
        .template(" {spinner} {msg:<30} {wide_bar} ETA {eta_precise} ")
        .expect("no template error");

    let progress_bar = ProgressBar::new(length);

    progress_bar.set_style(progressbar_style);
    progress_bar.enable_steady_tick(Duration::from_millis(TICK_SETTINGS.1));
    progress_bar.set_message(msg.to_owned());

    progress_bar
}

/// argument checker for the pipeline inputs
pub trait ArgCheck {
    fn check(&self) -> Result<(), CliError> {
        self.validate_args()
    }

    fn validate_args(&self) -> Result<(), CliError> {
        validate(self.get_reference())?;
        validate(self.get_target())?;

        Ok(())
    }

    fn get_reference(&self) -> &PathBuf;
    fn get_target(&self) -> &PathBuf;
}

/// error handling for CLI
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// argument validation
pub fn validate(arg: &PathBuf) -> Result<(), CliError> {
    if !arg.exists() {
        return Err(CliError::InvalidInput(format!("{:?} does not exist", arg)));
    }

    if !arg.is_file() {
        return Err(CliError::InvalidInput(format!("{:?} is not a file", arg)));
    }

    match arg.extension() {
        Some(ext) if ext == "csv" => (),
        _ => {
            return Err(CliError::InvalidInput(format!(
                "file {:?} is not a CSV file",
                arg
            )))
        }
    }

    match std::fs::metadata(arg) {
        Ok(metadata) if metadata.len() == 0 => {
            Err(CliError::InvalidInput(format!("file {:?} is empty", arg)))
        }
        Ok(_) => Ok(()),
        Err(e) => Err(CliError::IoError(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile;

    #[test]
    fn test_validate_rejects_missing_file() {
        let path = PathBuf::from("/definitely/not/here.csv");
        assert!(validate(&path).is_err());
    }

    #[test]
    fn test_validate_rejects_non_csv_extension() {
        let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        write!(file, "pathway,Biodomain").unwrap();

        let path = file.path().to_path_buf();
        assert!(validate(&path).is_err());
    }

    #[test]
    fn test_validate_rejects_empty_csv() {
        let file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();

        let path = file.path().to_path_buf();
        assert!(validate(&path).is_err());
    }

    #[test]
    fn test_validate_accepts_nonempty_csv() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        write!(file, "pathway,Biodomain\na,b").unwrap();

        let path = file.path().to_path_buf();
        assert!(validate(&path).is_ok());
    }
}
