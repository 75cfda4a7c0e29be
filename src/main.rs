// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, anyhow};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, info, warn};
use std::io::Write;
use std::path::{Path, PathBuf};

use prova::app_config::{self, Config};
use prova::app_controller::Controller;
use prova::rehearsal::LogSpeechEngine;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Structure a script document (or every document in a directory) into JSON
    Structure {
        /// Input document or directory
        #[arg(value_name = "PATH")]
        path: PathBuf,

        /// Output directory (defaults to the input's directory)
        #[arg(short, long, value_name = "DIR")]
        output_dir: Option<PathBuf>,

        /// Force overwrite of existing output files
        #[arg(short, long)]
        force_overwrite: bool,
    },

    /// Check whether a document looks like a script
    Estimate {
        /// Input document
        #[arg(value_name = "PATH")]
        path: PathBuf,
    },

    /// Rehearse a script, staying silent on your own character's lines
    Rehearse {
        /// Input document
        #[arg(value_name = "PATH")]
        path: PathBuf,

        /// Character you play
        #[arg(long = "as", value_name = "NAME")]
        character: String,
    },

    /// Generate shell completions for prova
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Prova - script structuring and rehearsal
///
/// Turns theatre scripts into characters, scenes and attributed lines.
#[derive(Parser, Debug)]
#[command(name = "prova")]
#[command(version)]
#[command(about = "Structure theatre scripts into characters, scenes and lines")]
#[command(long_about = "Prova reads a theatre script, finds its characters from speaker cues,
splits it into scenes and attributes every line to its speaker.

EXAMPLES:
    prova structure copione.txt                  # Write copione.script.json
    prova structure -o out/ copione.txt          # Write out/copione.script.json
    prova structure -f copioni/                  # Process a whole directory
    prova estimate documento.pdf                 # Does this look like a script?
    prova rehearse copione.txt --as GIULIETTA    # Rehearse as Giulietta
    prova --language en structure play.txt       # Use the English lexicon
    prova completions bash > prova.bash          # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "conf.json")]
    config: String,

    /// Script language code (e.g., 'it', 'en')
    #[arg(long, global = true)]
    language: Option<String>,

    /// Set logging level
    #[arg(short, long, global = true, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Minimum cue occurrences for a name to become a character
    #[arg(long, global = true)]
    min_occurrences: Option<usize>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let color = Self::color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {:<5} {}\x1B[0m",
                color, now, record.level(), record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Every record passes the logger; the effective level is set through max_level
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(*shell, &mut cmd, "prova", &mut std::io::stdout());
        return Ok(());
    }

    let config = load_config(&cli)?;
    log::set_max_level(config.log_level.to_level_filter());

    let controller = Controller::with_config(config)?;

    match cli.command {
        Commands::Structure { path, output_dir, force_overwrite } => {
            run_structure(&controller, &path, output_dir, force_overwrite).await
        }
        Commands::Estimate { path } => {
            let estimate = controller.estimate_file(&path).await?;
            println!("{}", serde_json::to_string_pretty(&estimate)?);
            Ok(())
        }
        Commands::Rehearse { path, character } => {
            let report = controller.rehearse(&path, &character, &LogSpeechEngine).await?;
            info!(
                "Rehearsal finished: {} spoken, {} of your lines, {} failures",
                report.spoken, report.awaited, report.skipped_failures
            );
            Ok(())
        }
        Commands::Completions { .. } => Ok(()),
    }
}

/// Load or create the configuration file, then apply command line overrides
fn load_config(cli: &CommandLineOptions) -> Result<Config> {
    let (mut config, created) = Config::load_or_create(&cli.config)?;
    if created {
        warn!("Config file not found at '{}', created default config.", cli.config);
    }

    if let Some(language) = &cli.language {
        config.language = language.clone();
    }

    if let Some(log_level) = &cli.log_level {
        config.log_level = log_level.clone().into();
    }

    if let Some(min_occurrences) = cli.min_occurrences {
        config.structuring.min_occurrences = min_occurrences;
    }

    Ok(config)
}

async fn run_structure(
    controller: &Controller,
    path: &Path,
    output_dir: Option<PathBuf>,
    force_overwrite: bool,
) -> Result<()> {
    if path.is_file() {
        let output_dir = output_dir
            .or_else(|| path.parent().map(Path::to_path_buf))
            .unwrap_or_else(|| PathBuf::from("."));
        controller.run(path.to_path_buf(), output_dir, force_overwrite).await?;
    } else if path.is_dir() {
        if output_dir.is_some() {
            warn!("--output-dir is ignored for directories, scripts are written next to their sources");
        }
        let summary = controller.run_folder(path.to_path_buf(), force_overwrite).await?;
        if summary.errors > 0 {
            return Err(anyhow!("{} documents failed", summary.errors));
        }
    } else {
        return Err(anyhow!("Input path does not exist: {:?}", path));
    }

    Ok(())
}
