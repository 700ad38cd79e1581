// CLI commands for lctest
use crate::channel::OutputChannel;
use crate::presenter::Presenter;
use crate::prompt::Prompter;
use crate::resolver::{self, Resolution};
use crate::runner::CommandRunner;
use anyhow::{bail, Context, Result};
use lctest_common::config::LcTestConfig;
use lctest_common::encoder::build_invocation;
use lctest_common::error::InputError;
use lctest_common::session::read_user_status;
use lctest_common::types::{ExecutionResult, UserStatus};
use std::fs;
use std::io::Write;
use std::path::Path;
use tracing::{debug, error, info};

/// Where a single test action is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowState {
    Idle,
    SelectingSource,
    Encoding,
    Executing,
    Presenting,
    ReportingError,
}

/// How a test action ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowOutcome {
    /// Result shown in the results view
    Presented,
    /// Failure reported to the user
    Failed,
    /// User dismissed a prompt
    Cancelled,
    /// Test input rejected; the user was already told why
    Rejected,
    /// Judge CLI session says nobody is signed in
    SignedOut,
    /// Solution file missing
    NoSolution,
}

fn enter(state: FlowState) {
    debug!(state = ?state, "Flow transition");
}

/// Test a solution file against the judge CLI
///
/// Flow: select source → encode → execute → present. Cancellation returns
/// quietly at any prompt; every error after that is caught here and shown
/// as one notification.
pub async fn test_solution<P, R, W>(
    config: &LcTestConfig,
    solution: &Path,
    prompter: &mut P,
    runner: &R,
    channel: &mut OutputChannel,
    presenter: &mut Presenter<W>,
) -> Result<FlowOutcome>
where
    P: Prompter,
    R: CommandRunner,
    W: Write,
{
    if let Some(session_file) = &config.session_file {
        match read_user_status(session_file) {
            UserStatus::SignedIn(login) => debug!(login = %login, "Judge session found"),
            UserStatus::SignedOut => {
                info!(session_file = %session_file.display(), "Not signed in, skipping test");
                return Ok(FlowOutcome::SignedOut);
            }
        }
    }

    if !solution.is_file() {
        let err = InputError::MissingSolution {
            path: solution.to_path_buf(),
        };
        prompter.show_error(&err.to_string());
        return Ok(FlowOutcome::NoSolution);
    }

    let outcome = match run_flow(config, solution, prompter, runner, channel, presenter).await {
        Ok(outcome) => outcome,
        Err(e) => {
            enter(FlowState::ReportingError);
            error!(solution = %solution.display(), error = %format!("{:#}", e), "Failed to test the solution");
            channel.append_line(&format!("Error: {:#}", e));
            presenter.report_failure(prompter, channel).await?;
            FlowOutcome::Failed
        }
    };

    enter(FlowState::Idle);
    Ok(outcome)
}

async fn run_flow<P, R, W>(
    config: &LcTestConfig,
    solution: &Path,
    prompter: &mut P,
    runner: &R,
    channel: &mut OutputChannel,
    presenter: &mut Presenter<W>,
) -> Result<FlowOutcome>
where
    P: Prompter,
    R: CommandRunner,
    W: Write,
{
    enter(FlowState::SelectingSource);
    let payload = match resolver::resolve_test_input(prompter).await? {
        Resolution::Ready(payload) => payload,
        Resolution::Cancelled => {
            debug!("Test cancelled by user");
            return Ok(FlowOutcome::Cancelled);
        }
        Resolution::Rejected => return Ok(FlowOutcome::Rejected),
    };

    enter(FlowState::Encoding);
    let invocation = build_invocation(&config.runtime, &config.cli_path, solution, payload);

    enter(FlowState::Executing);
    let result = match runner.run(&invocation, channel).await {
        Ok(output) if output.trim().is_empty() => {
            ExecutionResult::Failure("judge CLI produced no output".to_string())
        }
        Ok(output) => ExecutionResult::Success(output),
        Err(e) => ExecutionResult::Failure(e.to_string()),
    };

    match result {
        ExecutionResult::Success(output) => {
            enter(FlowState::Presenting);
            let result_file = presenter.show_result(&output)?;
            info!(
                invocation_id = %invocation.id(),
                result_file = %result_file.display(),
                "Test result presented"
            );
            Ok(FlowOutcome::Presented)
        }
        ExecutionResult::Failure(reason) => {
            bail!("Test run {} failed: {}", invocation.id(), reason)
        }
    }
}

/// Initialize an lctest project: config file plus results directory
pub async fn init_project(path: &str) -> Result<()> {
    println!("🚀 Initializing lctest at: {}", path);

    let project_path = Path::new(path);
    let config = LcTestConfig::default();

    for dir in [Path::new("config"), config.results_dir.as_path()] {
        let dir_path = project_path.join(dir);
        fs::create_dir_all(&dir_path)
            .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
        println!("  ✅ Created: {}", dir.display());
    }

    let config_path = project_path.join("config/lctest.json");
    if config_path.exists() {
        println!("  ⏭️  Kept existing: config/lctest.json");
    } else {
        config.save(&config_path)?;
        println!("  ✅ Created: config/lctest.json");
    }

    println!("✅ Project initialized successfully!");
    println!("\n📋 Next steps:");
    println!("  1. Point cli_path in config/lctest.json at the LeetCode CLI");
    println!("  2. Test a solution: lctest test two-sum.py");

    Ok(())
}

/// Print the effective configuration
pub async fn show_config(config: &LcTestConfig, source: &Path) -> Result<()> {
    println!("⚙️  Configuration ({}):\n", source.display());
    println!("{:<18} {}", "runtime", config.runtime);
    println!("{:<18} {}", "cli_path", config.cli_path);
    println!("{:<18} {}", "progress_caption", config.progress_caption);
    println!("{:<18} {}", "results_dir", config.results_dir.display());
    println!("{:<18} {}", "log_file", config.log_file.display());
    match &config.session_file {
        Some(session_file) => println!("{:<18} {}", "session_file", session_file.display()),
        None => println!("{:<18} (not checked)", "session_file"),
    }

    Ok(())
}
