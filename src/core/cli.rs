use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// All relative paths will be interpreted relative to this directory.
    /// All child processes will be run in this directory.
    #[arg(long, global = true)]
    pub cwd: Option<String>,

    /// Seed for the run's random number generator. Identical seeds over
    /// identical trees reproduce the same injections.
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Logging level (overrides env/config). One of: trace, debug, info, warn, error
    #[arg(long = "log.level", global = true)]
    pub log_level: Option<String>,

    /// Logging color control: "on" to force colors, "off" to disable; omit for auto
    #[arg(long = "log.color", global = true)]
    pub log_color: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write a commented default config file to the current directory
    Init,

    /// Inject defects into the project on a fresh branch
    Deploy(DeployArgs),

    /// Score a fix branch against the recorded ledger
    Verify(VerifyArgs),

    /// Show the ledger summary and whether mutated files were edited since
    Status(StatusArgs),

    /// Print configuration or ledger contents
    Print {
        #[command(subcommand)]
        command: PrintArgs,
    },
}

/// Arguments for the deploy command
#[derive(Parser, Debug)]
pub struct DeployArgs {
    /// Mutate exactly this many files instead of sampling by probability
    #[arg(long)]
    pub files: Option<usize>,

    /// Maximum defects attempted per file.
    /// Replaces config max_defects_per_file if provided.
    #[arg(long = "max-defects")]
    pub max_defects: Option<u32>,
}

/// Arguments for the verify command
#[derive(Parser, Debug)]
pub struct VerifyArgs {
    /// Branch containing the candidate fixes
    #[arg(value_name = "FIX_BRANCH")]
    pub fix_branch: String,

    /// Output format: "report" (default) or "json"
    #[arg(long, default_value = "report")]
    pub format: String,

    /// Show each defect's original and injected text
    #[arg(long)]
    pub verbose: bool,
}

/// Arguments for the status command
#[derive(Parser, Debug)]
pub struct StatusArgs {
    /// Output format: "table" (default) or "json"
    #[arg(long, default_value = "table")]
    pub format: String,
}

/// Arguments for the print command
#[derive(Subcommand, Debug)]
pub enum PrintArgs {
    /// Print the effective global configuration
    Config(PrintConfigArgs),

    /// Print the recorded defect ledger
    Ledger(PrintLedgerArgs),
}

/// Arguments for the print config subcommand
#[derive(Parser, Debug)]
pub struct PrintConfigArgs {
    /// Output format: "table" (default) or "json"
    #[arg(long, default_value = "table")]
    pub format: String,
}

/// Arguments for the print ledger subcommand
#[derive(Parser, Debug)]
pub struct PrintLedgerArgs {
    /// Output format: "table" (default) or "json"
    #[arg(long, default_value = "table")]
    pub format: String,
}
