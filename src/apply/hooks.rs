//! Post-apply shell hooks.
//!
//! Every hook runs as `<shell prefix...> <hook string>`, all of them
//! concurrently. Failures are recorded and logged, never escalated.

use std::fmt;
use std::process::Stdio;

use tokio::process::Command;
use tracing::{debug, warn};

/// Who a hook belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookOwner {
    Theme(String),
    App(String),
}

impl fmt::Display for HookOwner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Theme(name) => write!(f, "theme {name}"),
            Self::App(name) => write!(f, "app {name}"),
        }
    }
}

/// One hook to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookJob {
    pub owner: HookOwner,
    pub command: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookStatus {
    Succeeded,
    /// Ran and exited non-zero; `code` is `None` when killed by a signal.
    Failed { code: Option<i32>, stderr: String },
    /// Could not be started at all.
    SpawnFailed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookResult {
    pub owner: HookOwner,
    pub command: String,
    pub status: HookStatus,
}

impl HookResult {
    pub fn succeeded(&self) -> bool {
        self.status == HookStatus::Succeeded
    }
}

/// Run `jobs` concurrently and wait for all of them. Results keep job order.
pub async fn run_hooks(shell: &[String], jobs: Vec<HookJob>) -> Vec<HookResult> {
    let handles: Vec<_> = jobs
        .into_iter()
        .map(|job| {
            let shell = shell.to_vec();
            let owner = job.owner.clone();
            let command = job.command.clone();
            (owner, command, tokio::spawn(run_hook(shell, job)))
        })
        .collect();

    let mut results = Vec::with_capacity(handles.len());
    for (owner, command, handle) in handles {
        let result = match handle.await {
            Ok(result) => result,
            Err(e) => HookResult {
                owner,
                command,
                status: HookStatus::SpawnFailed(format!("hook task failed: {e}")),
            },
        };
        if !result.succeeded() {
            warn!(owner = %result.owner, command = %result.command, status = ?result.status, "hook failed");
        }
        results.push(result);
    }
    results
}

async fn run_hook(shell: Vec<String>, job: HookJob) -> HookResult {
    let status = match shell.split_first() {
        None => HookStatus::SpawnFailed("shell prefix is empty".to_string()),
        Some((program, args)) => run_command(program, args, &job.command).await,
    };
    HookResult {
        owner: job.owner,
        command: job.command,
        status,
    }
}

async fn run_command(program: &str, args: &[String], hook: &str) -> HookStatus {
    debug!(program = %program, hook = %hook, "running hook");
    let mut cmd = Command::new(program);
    cmd.args(args)
        .arg(hook)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped());

    let output = match cmd.spawn() {
        Ok(child) => child.wait_with_output().await,
        Err(e) => return HookStatus::SpawnFailed(format!("{program}: {e}")),
    };
    match output {
        Ok(output) if output.status.success() => HookStatus::Succeeded,
        Ok(output) => HookStatus::Failed {
            code: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        },
        Err(e) => HookStatus::SpawnFailed(format!("{program}: {e}")),
    }
}
