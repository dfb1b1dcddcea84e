use std::{
    ffi::OsString,
    fmt::Display,
    io::{ErrorKind, Write},
    process::{Command, Output, Stdio},
    thread,
};

use anyhow::Context;
use tracing::{debug, info, warn};

use crate::{
    client::{send, Transport},
    message::{Reply, Request, Requirement, Response},
};

/// Lets a human choose one of the candidates. `None` means nothing was chosen.
pub trait Picker {
    fn pick(&self, candidates: &[&str]) -> anyhow::Result<Option<String>>;
}

/// Runs an external line-selection program such as `dmenu`: candidates go to its stdin one per
/// line, the chosen line is read back from its stdout.
pub struct CommandPicker {
    program: String,
    args: Vec<OsString>,
}

impl CommandPicker {
    pub fn new<I, S>(program: String, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        Self {
            program,
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit());
        cmd
    }
}

impl Picker for CommandPicker {
    fn pick(&self, candidates: &[&str]) -> anyhow::Result<Option<String>> {
        let mut cmd = self.command();
        info!(?cmd, "Launching picker");
        let mut child = cmd
            .spawn()
            .with_context(|| format!("Failed to launch picker {}", self.program))?;

        let stdin = child.stdin.take();
        let input = candidates.join("\n");
        // Feed stdin while stdout is drained so a picker that echoes as it reads cannot block.
        let output = thread::scope(|s| -> anyhow::Result<Output> {
            let writer = s.spawn(move || -> anyhow::Result<()> {
                let Some(mut stdin) = stdin else {
                    return Ok(());
                };
                // The picker may exit before reading everything it was given.
                match stdin.write_all(input.as_bytes()) {
                    Err(e) if e.kind() == ErrorKind::BrokenPipe => {
                        debug!("Picker closed its input early");
                        Ok(())
                    }
                    res => res.context("Failed to write candidates to picker"),
                }
            });
            let output = child
                .wait_with_output()
                .context("Failed to wait for picker")?;
            writer
                .join()
                .map_err(|_| anyhow::anyhow!("Picker input writer panicked"))??;
            Ok(output)
        })?;
        if !output.status.success() {
            warn!(status = %output.status, "Picker exited unsuccessfully");
        }
        let stdout = String::from_utf8_lossy(&output.stdout);
        let choice = stdout.trim_end_matches('\n');
        debug!(choice, "Picker returned");
        if choice.is_empty() {
            Ok(None)
        } else {
            Ok(Some(choice.to_owned()))
        }
    }
}

/// Open requirements, earliest due first. Equal due times keep the service's order.
pub fn candidates(requirements: Vec<Requirement>) -> Vec<Requirement> {
    let mut open: Vec<_> = requirements.into_iter().filter(|r| !r.complete).collect();
    open.sort_by_key(|r| r.due);
    open
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The service answered with something other than what was asked for.
    Unexpected(Reply),
    NoIncomplete,
    NotFound(String),
    Completed(String),
}

impl Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Unexpected(reply) => write!(f, "{reply}"),
            Outcome::NoIncomplete => write!(f, "No incomplete requirements."),
            Outcome::NotFound(name) => write!(f, "Requirement with name '{name}' not found."),
            Outcome::Completed(name) => write!(f, "Successfully completed requirement: {name}"),
        }
    }
}

/// Fetch the open requirements, let `picker` choose one by name and mark it complete.
///
/// The chosen text is matched against the names exactly. When several open requirements share
/// a name the earliest due one is completed.
pub fn complete_requirement(
    transport: &impl Transport,
    picker: &impl Picker,
) -> anyhow::Result<Outcome> {
    let reply = send(transport, &Request::GetInfo)?;
    let info = match reply.response {
        Response::Info { info } => info,
        _ => return Ok(Outcome::Unexpected(reply)),
    };

    let open = candidates(info.requirements);
    if open.is_empty() {
        return Ok(Outcome::NoIncomplete);
    }

    let names: Vec<&str> = open.iter().map(|r| r.name.as_str()).collect();
    let choice = picker.pick(&names)?.unwrap_or_default();
    let Some(requirement) = open.into_iter().find(|r| r.name == choice) else {
        return Ok(Outcome::NotFound(choice));
    };

    info!(id = %requirement.id, name = %requirement.name, "Completing requirement");
    let reply = send(
        transport,
        &Request::CompleteRequirement {
            id: requirement.id,
        },
    )?;
    match reply.response {
        Response::Success => Ok(Outcome::Completed(requirement.name)),
        _ => Ok(Outcome::Unexpected(reply)),
    }
}
