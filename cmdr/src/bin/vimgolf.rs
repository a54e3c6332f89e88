// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::io::Write as _;

use clap::Parser;
use miette::IntoDiagnostic;
use vimgolf_cmdr::{CLIArg, CLICommand, CommonResult, InspectOptions, KeysReport,
                   LiteralOptions, OutputFormat, PlayOptions, TracingConfig,
                   get_editor_program, log_support::try_initialize_logging_global, replay,
                   run_inspect, run_play, try_get_log_file_path, try_read_keylog};
use vimgolf_keys::Keys;

#[tokio::main]
async fn main() -> CommonResult<()> {
    // If no args are passed, the following line will fail, and help will be printed
    // thanks to `arg_required_else_help(true)` in the `CLIArg` struct.
    let cli_arg = CLIArg::parse();

    let enable_logging = cli_arg.global_options.enable_logging;
    if enable_logging {
        let log_file_path = try_get_log_file_path()?;
        try_initialize_logging_global(TracingConfig::new_file(
            log_file_path,
            tracing_core::LevelFilter::DEBUG,
        ))
        .ok();
        // % is Display, ? is Debug.
        tracing::debug!(message = "Start logging...", cli_arg = ?cli_arg);
    }

    let result = try_run_command(cli_arg.command).await;

    if let Err(error) = &result {
        // % is Display, ? is Debug.
        tracing::error!(
            message = "Could not run vimgolf due to the following problem",
            error = ?error
        );
    }

    enable_logging.then(|| {
        tracing::debug!(message = "Stop logging...");
    });

    result
}

async fn try_run_command(command: CLICommand) -> CommonResult<()> {
    match command {
        CLICommand::Keys {
            sequence,
            literal_options,
            format,
        } => {
            let keys = try_parse_sequence(&sequence, literal_options)?;
            print_keys_report(&keys, format)
        }

        CLICommand::Log { keylog, format } => {
            let keys = try_read_keylog(&keylog).await?;
            print_keys_report(&keys, format)
        }

        CLICommand::Replay { keylog, input } => {
            let keys = try_read_keylog(&keylog).await?;
            let document = replay(&get_editor_program(), &input, &keys).await?;

            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&document).into_diagnostic()?;
            stdout.flush().into_diagnostic()?;
            eprint!("{}", KeysReport::from(&keys).to_text());
            Ok(())
        }

        CLICommand::Inspect {
            sequence,
            input,
            literal_options,
            jobs,
            view,
            keep,
        } => {
            let keys = try_parse_sequence(&sequence, literal_options)?;
            let options = InspectOptions {
                max_workers: usize::from(jobs),
                view,
                keep_workspace: keep,
            };
            let program = get_editor_program();
            let outcome = run_inspect(&program, &input, &keys, options).await?;
            print!("{}", outcome.summary());
            Ok(())
        }

        CLICommand::Play {
            input,
            expected,
            keys,
            literal_options,
            no_diff,
        } => {
            let start_keys = keys
                .map(|sequence| try_parse_sequence(&sequence, literal_options))
                .transpose()?;
            let options = PlayOptions {
                show_diff: !no_diff,
            };
            let program = get_editor_program();
            let outcome =
                run_play(&program, &input, &expected, start_keys.as_ref(), options).await?;
            print!("{}", outcome.summary());
            Ok(())
        }
    }
}

fn try_parse_sequence(sequence: &str, literal_options: LiteralOptions) -> CommonResult<Keys> {
    let keys = Keys::from_raw_representation_string(
        sequence,
        literal_options.literal_lt,
        literal_options.literal_gt,
    )?;
    Ok(keys)
}

fn print_keys_report(keys: &Keys, format: OutputFormat) -> CommonResult<()> {
    let report = KeysReport::from(keys);
    match format {
        OutputFormat::Text => print!("{}", report.to_text()),
        OutputFormat::Json => println!("{}", report.to_json()?),
    }
    Ok(())
}
