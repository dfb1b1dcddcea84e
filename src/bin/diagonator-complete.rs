use std::ffi::OsString;

use diagonator_client::client::HttpTransport;
use diagonator_client::config::Config;
use diagonator_client::init_tracing;
use diagonator_client::picker::{complete_requirement, CommandPicker};
use tracing::info;

/// Everything after the program name belongs to the picker, `--` included.
fn picker_args(argv: impl IntoIterator<Item = OsString>) -> Vec<OsString> {
    argv.into_iter().skip(1).collect()
}

/// Pick an incomplete requirement and mark it complete.
fn main() -> anyhow::Result<()> {
    init_tracing();

    let args = picker_args(std::env::args_os());
    let config = Config::from_env();
    info!(?args, ?config, "Loaded args");

    let transport = HttpTransport::new(config.server_url)?;
    let picker = CommandPicker::new(config.picker, args);
    println!("{}", complete_requirement(&transport, &picker)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn forwarded(argv: &[&str]) -> Vec<OsString> {
        picker_args(argv.iter().map(OsString::from))
    }

    #[test]
    fn forwards_every_argument() {
        assert_eq!(
            forwarded(&["diagonator-complete", "-i", "-l", "10", "--help"]),
            ["-i", "-l", "10", "--help"]
        );
    }

    #[test]
    fn leading_separator_is_forwarded() {
        assert_eq!(
            forwarded(&["diagonator-complete", "--", "-p", "x"]),
            ["--", "-p", "x"]
        );
        assert_eq!(
            forwarded(&["diagonator-complete", "-p", "--", "x"]),
            ["-p", "--", "x"]
        );
    }

    #[test]
    fn no_arguments_is_fine() {
        assert!(forwarded(&["diagonator-complete"]).is_empty());
    }
}
