//! A command-line client for a remote key-value tree service.
//!
//! For usage, run `cargo run -- --help`.

mod cli;

use crate::cli::Args;
use clap::{CommandFactory as _, Parser as _};
use std::future::Future;
use std::io::{self, Write};
use std::process::ExitCode;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use treecli::{Credentials, Error, ParseError, Request, Response, TreeClient};

/// Exit code for a response that was received and printed.
const EXIT_SUCCESS: u8 = 0;
/// Exit code for a service that could not be reached or rejected the request.
const EXIT_FAILURE: u8 = 1;
/// Exit code for a command line that could not be turned into a request.
const EXIT_USAGE: u8 = 2;

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let Args {
        remote,
        timeout,
        id,
        token,
        words,
    } = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let request = Request::parse(Credentials::new(id, token), &words);
    let timeout = Duration::from_secs(timeout);
    let future = run(request, || TreeClient::connect(&remote, timeout));

    let outcome = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(future);

    let code = report(outcome, &mut io::stdout().lock(), &mut io::stderr().lock())?;
    Ok(ExitCode::from(code))
}

/// Connect with `connect` and send the request.
///
/// A request that failed to parse is returned as an error without connecting.
async fn run<C, F>(request: Result<Request, ParseError>, connect: C) -> Result<Response, Error>
where
    C: FnOnce() -> F,
    F: Future<Output = Result<TreeClient, Error>>,
{
    let request = request?;
    let mut client = connect().await?;
    client.dispatch(request).await
}

/// Print the outcome of a request and return the exit code for it.
///
/// Only a response goes to `stdout`. Errors detected before contacting the service are followed
/// by the long help.
fn report(
    outcome: Result<Response, Error>,
    stdout: &mut impl Write,
    stderr: &mut impl Write,
) -> io::Result<u8> {
    match outcome {
        Ok(response) => {
            writeln!(stdout, "{response}")?;
            Ok(EXIT_SUCCESS)
        }
        Err(err) if err.is_local() => {
            writeln!(stderr, "error: {err}\n")?;
            writeln!(stderr, "{}", Args::command().render_long_help())?;
            Ok(EXIT_USAGE)
        }
        Err(err) => {
            writeln!(stderr, "{err}")?;
            Ok(EXIT_FAILURE)
        }
    }
}

#[cfg(test)]
#[path = "../tests/helpers/mod.rs"]
mod helpers;
