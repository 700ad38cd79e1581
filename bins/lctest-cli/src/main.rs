mod channel;
mod commands;
mod presenter;
mod prompt;
mod resolver;
mod runner;

#[cfg(test)]
mod testing;

use anyhow::{bail, Result};
use channel::OutputChannel;
use clap::{Parser, Subcommand, ValueEnum};
use commands::FlowOutcome;
use lctest_common::config::{LcTestConfig, DEFAULT_CONFIG_PATH};
use lctest_common::types::SourceKind;
use presenter::Presenter;
use prompt::{PresetPrompter, TerminalPrompter};
use runner::ShellRunner;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "lctest")]
#[command(about = "lctest - Test LeetCode solutions through the LeetCode CLI", long_about = None)]
struct Cli {
    /// Config file
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum SourceArg {
    Default,
    Direct,
    File,
}

impl From<SourceArg> for SourceKind {
    fn from(arg: SourceArg) -> Self {
        match arg {
            SourceArg::Default => SourceKind::Default,
            SourceArg::Direct => SourceKind::Direct,
            SourceArg::File => SourceKind::File,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Test a solution file against default, typed, or file-based test cases
    Test {
        /// Solution file to test
        file: PathBuf,

        /// Test case source (prompted for when omitted)
        #[arg(short, long, value_enum)]
        source: Option<SourceArg>,

        /// Test cases to use with the direct source
        #[arg(short, long, conflicts_with = "test_file")]
        input: Option<String>,

        /// File with test cases to use with the file source
        #[arg(short = 'f', long)]
        test_file: Option<PathBuf>,
    },

    /// Initialize lctest in a directory
    Init {
        /// Project path
        #[arg(short, long, default_value = ".")]
        path: String,
    },

    /// Show the effective configuration
    Config,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let json = std::env::var("LCTEST_LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// A flag that only makes sense for one source implies that source.
/// Pairing it with a different `--source` is an error.
fn infer_source(
    source: Option<SourceArg>,
    input: &Option<String>,
    test_file: &Option<PathBuf>,
) -> Result<Option<SourceKind>> {
    let source = source.map(SourceKind::from);
    if input.is_some() && !matches!(source, None | Some(SourceKind::Direct)) {
        bail!("--input only applies to the direct source");
    }
    if test_file.is_some() && !matches!(source, None | Some(SourceKind::File)) {
        bail!("--test-file only applies to the file source");
    }

    Ok(match (source, input, test_file) {
        (Some(kind), _, _) => Some(kind),
        (None, Some(_), _) => Some(SourceKind::Direct),
        (None, None, Some(_)) => Some(SourceKind::File),
        (None, None, None) => None,
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Test {
            file,
            source,
            input,
            test_file,
        } => {
            let config = LcTestConfig::load(&cli.config)?.with_env_overrides();
            let source = infer_source(source, &input, &test_file)?;

            let mut prompter = PresetPrompter::new(TerminalPrompter)
                .with_source(source)
                .with_input(input)
                .with_test_file(test_file);
            let runner = ShellRunner::new(config.progress_caption.clone());
            let mut channel = OutputChannel::open(&config.log_file)?;
            let mut presenter = Presenter::new(std::io::stdout(), &config.result_file());

            let outcome = commands::test_solution(
                &config,
                &file,
                &mut prompter,
                &runner,
                &mut channel,
                &mut presenter,
            )
            .await?;

            if outcome == FlowOutcome::Failed {
                std::process::exit(1);
            }
        }
        Commands::Init { path } => {
            commands::init_project(&path).await?;
        }
        Commands::Config => {
            let config = LcTestConfig::load(&cli.config)?.with_env_overrides();
            commands::show_config(&config, &cli.config).await?;
        }
    }

    Ok(())
}
