use std::ffi::OsString;

use anyhow::Result;
use clap::Parser;
use clap::error::ErrorKind;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use hpoon::store::MarkStore;

use crate::cli_exec::{Invocation, handle_invocation};

pub(crate) const SHORT_HELP: &str = "Unsure arg, try -h to get usage information";

const HELP: &str = "\
hpoon: Harpoon for the shell

Usage:
    hpoon <path> [name]     store a mark, optionally under a name
    hpoon                   print the last marked path
    hpoon !<name>           print the path marked under <name>
    hpoon list              list all named marks
    hpoon clean             forget every mark

Only existing files and directories can be marked, but a mark keeps
working after its target is moved or deleted.

Examples:
    cd /path/to/dir
    hpoon .                 # mark the current directory

    # in another shell
    cd /somewhere/else
    cp * `hpoon`            # copy into the last marked directory

    hpoon notes.txt notes   # mark a file as \"notes\"
    mv draft.txt `hpoon !notes`
";

#[derive(Parser)]
#[command(name = "hpoon")]
#[command(about = "Harpoon for the shell", override_help = HELP)]
pub(crate) struct Cli {
    /// Path to mark, `!<name>`, `list` or `clean`
    #[arg(allow_hyphen_values = true)]
    target: Option<OsString>,

    /// Name to store the mark under
    #[arg(allow_hyphen_values = true)]
    name: Option<String>,
}

pub(crate) fn run() -> Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if err.kind() == ErrorKind::DisplayHelp => err.exit(),
        Err(_) => anyhow::bail!(SHORT_HELP),
    };

    init_logging();

    let invocation = Invocation::classify(cli.target, cli.name);
    handle_invocation(&MarkStore::open_default(), invocation)
}

/// Diagnostics go to stderr so stdout can be captured with backticks.
fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .try_init();
}

#[cfg(test)]
#[path = "tests/cli_runtime_tests.rs"]
mod tests;
