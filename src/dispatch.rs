use clap::ValueEnum;
use tracing::info;

use crate::{client::Transport, message::Request};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Command {
    #[value(name = "UnlockTimer")]
    UnlockTimer,
    #[value(name = "LockTimer")]
    LockTimer,
    #[value(name = "GetInfo")]
    GetInfo,
}

impl From<Command> for Request {
    fn from(command: Command) -> Self {
        match command {
            Command::UnlockTimer => Request::UnlockTimer,
            Command::LockTimer => Request::LockTimer,
            Command::GetInfo => Request::GetInfo,
        }
    }
}

/// Send the request for `command` and return the response body untouched.
pub fn dispatch(transport: &impl Transport, command: Command) -> anyhow::Result<String> {
    let request = Request::from(command);
    info!(?request, "Dispatching");
    transport.exchange(&request)
}
