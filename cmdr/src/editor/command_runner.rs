// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::process::Stdio;

use miette::{Context, IntoDiagnostic};
use tokio::process::Command;
use vimgolf_keys::ok;

/// Disambiguate the [`tokio::process::Command`] type from the [`std::process::Command`]
/// type. The editor is run for many prefixes at once, so it must not block the thread.
pub type TokioCommand = tokio::process::Command;

/// This macro creates a [`TokioCommand`] from a program and its args.
///
/// # Example of command and args
///
/// ```
/// # use vimgolf_cmdr::command;
/// async fn run_command() {
///     let arg_2 = "world!";
///     let mut command = command!(
///         program => "echo",
///         args => "Hello,", arg_2,
///     );
///     let output = command.output().await.unwrap();
///     assert!(output.status.success());
///     assert_eq!(String::from_utf8_lossy(&output.stdout), "Hello, world!\n");
/// }
/// ```
///
/// # Example of command, leading items, and args
///
/// The items are added before the args, which is how the editor's fixed flags go in
/// front of the per-run script and file.
///
/// ```
/// # use vimgolf_cmdr::{command, Run};
/// async fn run_command() {
///     let items = ["-n", "Hello,"];
///     let run_bytes = command!(
///         program => "echo",
///         items => items,
///         args => "world!",
///     )
///     .run()
///     .await
///     .unwrap();
///     assert_eq!(String::from_utf8_lossy(&run_bytes), "Hello, world!");
/// }
/// ```
#[macro_export]
macro_rules! command {
    // Variant that receives a command, items, and args.
    (program=> $cmd:expr, items=> $items:expr, args=> $($args:expr),* $(,)?) => {{
        let mut it = $crate::TokioCommand::new($cmd);
        it.args($items);
        $(
            it.arg($args);
        )*
        it
    }};

    // Variant that receives a command and args.
    (program=> $cmd:expr, args=> $($args:expr),* $(,)?) => {{
        let mut it = $crate::TokioCommand::new($cmd);
        $(
            it.arg($args);
        )*
        it
    }};
}

pub trait Run {
    /// # Errors
    ///
    /// Returns an error if:
    /// - The command program does not exist or cannot be executed
    /// - The command fails with a non-zero exit status
    fn run(&mut self) -> impl std::future::Future<Output = miette::Result<Vec<u8>>> + Send;

    /// # Errors
    ///
    /// Returns an error if:
    /// - The command program does not exist or cannot be executed
    /// - The command fails with a non-zero exit status
    fn run_interactive(
        &mut self,
    ) -> impl std::future::Future<Output = miette::Result<Vec<u8>>> + Send;
}

impl Run for TokioCommand {
    #[allow(clippy::missing_errors_doc)]
    async fn run(&mut self) -> miette::Result<Vec<u8>> { run(self).await }

    #[allow(clippy::missing_errors_doc)]
    async fn run_interactive(&mut self) -> miette::Result<Vec<u8>> {
        run_interactive(self).await
    }
}

#[macro_export]
macro_rules! bail_command_ran_and_failed {
    ($command:expr, $status:expr, $stderr:expr) => {
        miette::bail!(
            "{name} failed\n[command]: '{cmd:?}'\n[status]: '{status:?}'\n[stderr]: '{stderr}'",
            name = stringify!($command),
            cmd = $command,
            status = $status,
            stderr = String::from_utf8_lossy(&$stderr),
        );
    };
}

/// This command is not allowed to have user interaction. It does not inherit the
/// `stdin`, `stdout`, `stderr` from the parent (aka current) process. It is killed if
/// the returned future is dropped, eg: when another prefix fails first.
///
/// # Errors
///
/// Returns an error if:
/// - The command program does not exist or cannot be executed
/// - The command fails with a non-zero exit status
pub async fn run(command: &mut Command) -> miette::Result<Vec<u8>> {
    // Try to run command (might be unable to run it if the program is invalid).
    let output = command
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .output()
        .await
        .into_diagnostic()
        .wrap_err(miette::miette!("Unable to run command: {:?}", command))?;

    // At this point, command has run, but it might result in a success or failure.
    if output.status.success() {
        ok!(output.stdout)
    } else {
        bail_command_ran_and_failed!(command, output.status, output.stderr);
    }
}

/// This command is allowed to have full user interaction. It inherits the `stdin`,
/// `stdout`, `stderr` from the parent (aka current) process. This is how the diff
/// viewer is opened.
///
/// # Errors
///
/// Returns an error if:
/// - The command program does not exist or cannot be executed
/// - The command fails with a non-zero exit status
pub async fn run_interactive(command: &mut Command) -> miette::Result<Vec<u8>> {
    // Try to run command (might be unable to run it if the program is invalid).
    let output = command
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .output()
        .await
        .into_diagnostic()
        .wrap_err(miette::miette!("Unable to run command: {:?}", command))?;

    if output.status.success() {
        ok!(output.stdout)
    } else {
        bail_command_ran_and_failed!(command, output.status, output.stderr);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::command;

    #[tokio::test]
    async fn test_run() {
        let arg_2 = "world!";
        let output = command!(
            program => "echo",
            args => "Hello,", arg_2,
        )
        .run()
        .await
        .unwrap();
        assert_eq!(String::from_utf8_lossy(&output), "Hello, world!\n");
    }

    #[tokio::test]
    async fn test_run_with_items_before_args() {
        let items = ["-n", "Hello,"];
        let output = command!(
            program => "echo",
            items => items,
            args => "world!",
        )
        .run()
        .await
        .unwrap();
        assert_eq!(String::from_utf8_lossy(&output), "Hello, world!");
    }

    #[tokio::test]
    async fn test_run_invalid_command() {
        let result = command!(
            program => "does_not_exist_vimgolf_program",
            args => "--version",
        )
        .run()
        .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_run_failing_command() {
        let result = command!(
            program => "sh",
            args => "-c", "echo oops >&2; exit 3",
        )
        .run()
        .await;

        let message = result.unwrap_err().to_string();
        assert!(message.contains("oops"));
    }
}
