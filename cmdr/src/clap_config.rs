// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use vimgolf_keys::DEFAULT_MAX_WORKERS;

#[derive(Debug, Parser)]
#[command(bin_name = "vimgolf")]
#[command(about = "⛳ Score, replay, and inspect vim keystroke sequences")]
#[command(version)]
#[command(next_line_help = true)]
#[command(arg_required_else_help(true))]
/// More info: <https://docs.rs/clap/latest/clap/struct.Command.html#method.help_template>
#[command(
    help_template = "{about}\nVersion: {bin} {version} 💻\n\nUSAGE 📓:\n  vimgolf [Command] [Options]\n\n{all-args}\n",
    subcommand_help_heading("Command")
)]
pub struct CLIArg {
    #[command(subcommand)]
    pub command: CLICommand,

    #[command(flatten)]
    pub global_options: GlobalOption,
}

#[derive(Debug, Args)]
pub struct GlobalOption {
    #[arg(
        global = true,
        long,
        short = 'l',
        help = "Log app output to `vimgolf.log` in the cache folder for debugging"
    )]
    pub enable_logging: bool,
}

/// Characters that stand in for a literal `<` or `>` in a typed key sequence, so that
/// eg: `[` can be used when `<` would start a bracketed name.
#[derive(Debug, Clone, Copy, Default, Args)]
pub struct LiteralOptions {
    #[arg(long, value_name = "CHAR", help = "Character to type instead of a literal '<'")]
    pub literal_lt: Option<char>,

    #[arg(long, value_name = "CHAR", help = "Character to type instead of a literal '>'")]
    pub literal_gt: Option<char>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    #[clap(help = "Score and key sequence as plain text")]
    Text,
    #[clap(help = "Score, key sequence, and keystroke array as JSON")]
    Json,
}

#[derive(Debug, Subcommand)]
pub enum CLICommand {
    #[clap(
        about = "🔤 Parse a key sequence written in vim key notation, and show its score\n💡 Eg: `vimgolf keys 'ix<Esc>ZZ'`"
    )]
    Keys {
        #[arg(value_name = "SEQUENCE")]
        sequence: String,

        #[command(flatten)]
        literal_options: LiteralOptions,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    #[clap(
        about = "📜 Decode a keylog written by `vim -W <file>`, and show its score\n💡 Eg: `vimgolf log keylog`"
    )]
    Log {
        #[arg(value_name = "KEYLOG")]
        keylog: PathBuf,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    #[clap(
        about = "▶️ Replay a keylog against an input file, and print the resulting document\n💡 Eg: `vimgolf replay keylog in.txt`"
    )]
    Replay {
        #[arg(value_name = "KEYLOG")]
        keylog: PathBuf,

        #[arg(value_name = "INPUT")]
        input: PathBuf,
    },

    #[clap(
        about = "🔍 Replay every prefix of a key sequence, and show the ones that changed the document\n💡 Eg: `vimgolf inspect 'ddGp' in.txt --view`"
    )]
    Inspect {
        #[arg(value_name = "SEQUENCE")]
        sequence: String,

        #[arg(value_name = "INPUT")]
        input: PathBuf,

        #[command(flatten)]
        literal_options: LiteralOptions,

        #[arg(
            long,
            short = 'j',
            default_value_t = DEFAULT_MAX_WORKERS,
            value_parser = clap::value_parser!(u16).range(1..),
            help = "How many prefixes to replay at the same time"
        )]
        jobs: u16,

        #[arg(long, help = "Step through the interesting documents side by side when done")]
        view: bool,

        #[arg(long, help = "Don't delete the workspace with the inspect files")]
        keep: bool,
    },

    #[clap(
        about = "⛳ Edit a copy of the input file in vim, then score the keystrokes and check the result\n💡 Eg: `vimgolf play in.txt out.txt`"
    )]
    Play {
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        #[arg(value_name = "EXPECTED")]
        expected: PathBuf,

        #[arg(
            long,
            short = 'k',
            value_name = "SEQUENCE",
            help = "Keystrokes to type before handing the editor over"
        )]
        keys: Option<String>,

        #[command(flatten)]
        literal_options: LiteralOptions,

        #[arg(long, help = "Don't show a diff when the result doesn't match")]
        no_diff: bool,
    },
}
