use std::env;
use std::path::PathBuf;
use std::process;

mod colors;
mod completion;
mod config;
mod error;
mod file_ops;
mod io_helpers;
mod prompt;
mod repl;

use repl::{init_state, run_once, Flow};

const USAGE: &str = "\
usage: filecmd [-x] [--strict | --no-strict] [--root=DIR]

commands:
  create file <name>
  delete file <name>
  copy file <name> to <name>
  rename file <name> to <name>
  exit";

#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct CliOptions {
    pub(crate) trace: bool,
    /// Overrides the rc file when set.
    pub(crate) strict: Option<bool>,
    pub(crate) root: Option<PathBuf>,
}

fn main() {
    init_logging();
    let cli = match parse_args(env::args().skip(1)) {
        Ok(Some(cli)) => cli,
        Ok(None) => {
            println!("{USAGE}");
            return;
        }
        Err(err) => {
            eprintln!("error: {err}\n{USAGE}");
            process::exit(2);
        }
    };
    if let Some(ref root) = cli.root {
        if let Err(err) = env::set_current_dir(root) {
            eprintln!("error: {}: {err}", root.display());
            process::exit(1);
        }
    }
    let interactive = unsafe { libc::isatty(libc::STDIN_FILENO) == 1 };
    let mut state = match init_state(&cli, interactive) {
        Ok(state) => state,
        Err(err) => {
            eprintln!("error: {err}");
            process::exit(1);
        }
    };

    loop {
        match run_once(&mut state) {
            Ok(Flow::Continue) => {}
            Ok(Flow::Exit(code)) => process::exit(code),
            Err(err) => eprintln!("error: {err}"),
        }
    }
}

fn init_logging() {
    let env = env_logger::Env::default().filter_or("FILECMD_LOG", "info");
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp_millis()
        .try_init();
}

/// `Ok(None)` means help was requested.
fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Option<CliOptions>, String> {
    let mut cli = CliOptions::default();
    for arg in args {
        if arg == "-h" || arg == "--help" {
            return Ok(None);
        } else if arg == "-x" {
            cli.trace = true;
        } else if arg == "--strict" {
            cli.strict = Some(true);
        } else if arg == "--no-strict" {
            cli.strict = Some(false);
        } else if let Some(value) = arg.strip_prefix("--root=") {
            if value.is_empty() {
                return Err("--root needs a directory".to_string());
            }
            cli.root = Some(PathBuf::from(value));
        } else {
            return Err(format!("unknown argument '{arg}'"));
        }
    }
    Ok(Some(cli))
}
