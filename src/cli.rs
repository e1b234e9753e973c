//! CLI argument parsing via clap.

use clap::Parser;
use tgpt::build_info;

fn help_trailer() -> String {
    format!(
        "Examples:\n  tgpt \"Explain quantum computing in simple terms\"\n  \
         tgpt -s \"How to update my system?\"\n  tgpt -f\n\n{}",
        build_info::HELP_BUILD_METADATA
    )
}

/// A terminal client for conversational text generation.
#[derive(Debug, Parser)]
#[command(
    name = "tgpt",
    version = build_info::cli_version_text(),
    disable_version_flag = true,
    after_help = help_trailer(),
)]
pub struct Args {
    /// Prompt to send. If provided, runs in one-shot mode and exits.
    pub prompt: Option<String>,

    /// Print version.
    #[arg(short = 'v', long = "version", action = clap::ArgAction::Version)]
    version: Option<bool>,

    /// Generate and execute a shell command for the given task. (Experimental)
    #[arg(short = 's', long = "shell", value_name = "PROMPT")]
    pub shell: Option<String>,

    /// Start normal interactive mode.
    #[arg(short = 'i', long = "interactive")]
    pub interactive: bool,

    /// Start multi-line interactive mode.
    #[arg(short = 'm', long = "multiline")]
    pub multiline: bool,

    /// Forget chat history.
    #[arg(short = 'f', long = "forget")]
    pub forget: bool,

    /// Update the program.
    #[arg(short = 'u', long = "update")]
    pub update: bool,

    /// Disable color output.
    #[arg(long = "no-color")]
    pub no_color: bool,
}
