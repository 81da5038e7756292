use clap::Parser;
use config::ArgCheck;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[arg(
        short = 'r',
        long = "ref",
        required = true,
        value_name = "PATH",
        help = "Path to reference CSV with known pathway -> Biodomain pairs"
    )]
    pub reference: PathBuf,

    #[arg(
        short = 't',
        long = "target",
        required = true,
        value_name = "PATH",
        help = "Path to mixed-model results CSV with pathway and p_FXS columns"
    )]
    pub target: PathBuf,

    #[arg(
        short = 'o',
        long = "outdir",
        required = false,
        value_name = "DIR",
        default_value = ".",
        help = "Output directory for the result CSVs"
    )]
    pub outdir: PathBuf,

    #[arg(
        short = 'm',
        long = "model",
        required = false,
        value_name = "MODEL",
        default_value = config::DEFAULT_MODEL,
        help = "Chat-completion model identifier"
    )]
    pub model: String,

    #[arg(
        short = 'd',
        long = "delay",
        required = false,
        value_name = "SECONDS",
        default_value_t = config::CALL_DELAY_SECONDS,
        help = "Fixed pause between completion calls"
    )]
    pub delay: u64,

    #[arg(
        short = 'l',
        long = "limit",
        required = false,
        value_name = "N",
        default_value_t = config::MAX_TARGETS,
        help = "Maximum number of significant pathways to classify"
    )]
    pub limit: usize,

    #[arg(
        long = "padj",
        required = false,
        value_name = "FLOAT",
        default_value_t = config::PADJ_THRESHOLD,
        help = "Adjusted p-value cutoff for significance"
    )]
    pub padj: f64,

    #[arg(
        short = 'k',
        long = "api-key-file",
        required = false,
        value_name = "PATH",
        help = "File holding the API key [default: read from OPENAI_API_KEY]"
    )]
    pub api_key_file: Option<PathBuf>,
}

impl Args {
    pub fn from(args: Vec<String>) -> Self {
        Args::parse_from(std::iter::once("biodomain".to_string()).chain(args))
    }
}

impl ArgCheck for Args {
    fn get_reference(&self) -> &PathBuf {
        &self.reference
    }

    fn get_target(&self) -> &PathBuf {
        &self.target
    }
}
