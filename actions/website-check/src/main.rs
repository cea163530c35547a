//! Website Check - GitHub Action entry point
//!
//! Reads the `website_url` and `verbose` inputs, logs them, publishes the
//! time of day as the `time` output and, when verbose, dumps the payload of
//! the triggering event as indented JSON.
//!
//! Any failure is reported as a single `::error::` workflow command and the
//! process exits with status 1.
//!
//! # Usage
//!
//! ```bash
//! # As the runner invokes it
//! INPUT_WEBSITE_URL=https://example.com INPUT_VERBOSE=true website-check
//!
//! # Outside a runner, with an explicit event payload and output file
//! website-check --event-path event.json --output-file outputs.txt
//! ```

mod logging;
mod runner;

use std::path::PathBuf;
use std::process::ExitCode;

use action_toolkit::{CommandSink, Context, ContextArgs, EnvInputs, HostSink, SystemClock};
use clap::Parser;
use clap::builder::FalseyValueParser;
use clap::error::ErrorKind;
use runner::Outcome;

/// GitHub Action reporting the website under check.
#[derive(Parser, Debug)]
#[command(name = "website-check")]
#[command(about = "Logs the website under check, sets the time output and dumps the event")]
struct Args {
    /// File the runner collects step outputs from.
    #[arg(long, env = "GITHUB_OUTPUT")]
    output_file: Option<PathBuf>,

    /// Enable debug tracing on stderr.
    #[arg(long, env = "RUNNER_DEBUG", value_parser = FalseyValueParser::new())]
    debug: bool,

    #[command(flatten)]
    context: ContextArgs,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = e.print();
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            // Flags default from host variables, so a bad value is a run failure.
            logging::init(false);
            let message = e.render().to_string();
            return report_startup_failure(CommandSink::stdout(None), message.trim()).await;
        }
    };
    logging::init(args.debug);

    let mut sink = CommandSink::stdout(args.output_file);

    let context = match Context::load(&args.context).await {
        Ok(c) => c,
        Err(e) => {
            tracing::error!(error = %e, "failed to load event context");
            return report_startup_failure(sink, &e.to_string()).await;
        }
    };
    tracing::debug!(
        event = %context.event_name,
        sha = %context.sha,
        git_ref = %context.git_ref,
        run_id = ?context.run_id,
        "loaded event context"
    );

    let inputs = EnvInputs::from_env();
    let outcome = runner::run(&inputs, &context, &SystemClock, &mut sink).await;

    match outcome {
        Outcome::Success => ExitCode::SUCCESS,
        Outcome::Failed(message) => {
            tracing::debug!(%message, "run failed");
            ExitCode::FAILURE
        }
    }
}

/// Reports a failure that happened before the action body could run.
async fn report_startup_failure<S: HostSink>(mut sink: S, message: &str) -> ExitCode {
    if let Err(report_err) = sink.set_failed(message).await {
        eprintln!("Failed to report failure: {report_err}");
    }
    ExitCode::FAILURE
}
