mod analyze;
mod config_cmd;
mod stats;

use anyhow::Result;
use clap::{Parser, Subcommand};
use rep_coach::{EngineError, Exercise};
use std::path::PathBuf;

use crate::config::Config;

pub use analyze::AnalyzeCommand;
pub use stats::{summarize, ExerciseStats, StatsCommand};

#[derive(Parser)]
#[command(name = "rep-coach")]
#[command(about = "Exercise repetition counter and form coach for recorded pose streams", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(long, global = true, env = "REP_COACH_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a JSON-lines pose stream through the analysis engine
    Analyze(AnalyzeCommand),

    /// Summarize the rep log
    Stats(StatsCommand),

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigSubcommands),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand)]
enum ConfigSubcommands {
    /// Show current configuration
    Show,

    /// Initialize configuration with defaults
    Init {
        /// Overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

impl Cli {
    pub fn verbose(&self) -> bool {
        self.verbose
    }

    pub async fn execute(self) -> Result<()> {
        if self.verbose {
            tracing::debug!("Verbose mode enabled");
        }

        let config_path = self.config.as_deref();

        match self.command {
            Commands::Analyze(cmd) => cmd.execute(&Config::load_from(config_path)?).await,
            Commands::Stats(cmd) => cmd.execute(&Config::load_from(config_path)?).await,
            Commands::Config(subcmd) => match subcmd {
                ConfigSubcommands::Show => config_cmd::show_config(config_path).await,
                ConfigSubcommands::Init { force } => {
                    config_cmd::init_config(config_path, force).await
                }
            },
            Commands::Completions { shell } => {
                generate_completions(shell);
                Ok(())
            }
        }
    }
}

/// clap value parser accepting exercise names and keyboard keys
pub(crate) fn parse_exercise(value: &str) -> Result<Exercise, String> {
    value.parse().map_err(|e: EngineError| e.to_string())
}

fn generate_completions(shell: clap_complete::Shell) {
    use clap::CommandFactory;
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
}
