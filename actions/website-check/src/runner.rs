//! The action body: report the website, stamp the time, dump the event.

use action_toolkit::{Clock, Context, HostSink, InputProvider, is_truthy, time_of_day};

/// Input naming the website under check.
pub const WEBSITE_URL_INPUT: &str = "website_url";
/// Input enabling the event payload dump.
pub const VERBOSE_INPUT: &str = "verbose";
/// Output receiving the time of day the run happened.
pub const TIME_OUTPUT: &str = "time";

/// Terminal state of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success,
    /// The run failed with this message, already reported to the host.
    Failed(String),
}

/// Runs the action once against the given host capabilities.
///
/// Any error is reported through [`HostSink::set_failed`] with its message
/// and turned into [`Outcome::Failed`]. Outputs set before the error stay set.
pub async fn run<I, C, S>(inputs: &I, context: &Context, clock: &C, sink: &mut S) -> Outcome
where
    I: InputProvider,
    C: Clock,
    S: HostSink,
{
    match steps(inputs, context, clock, sink).await {
        Ok(()) => Outcome::Success,
        Err(err) => {
            let message = err.to_string();
            if let Err(report_err) = sink.set_failed(&message).await {
                tracing::error!(error = %report_err, "failed to report run failure");
            }
            Outcome::Failed(message)
        }
    }
}

async fn steps<I, C, S>(inputs: &I, context: &Context, clock: &C, sink: &mut S) -> anyhow::Result<()>
where
    I: InputProvider,
    C: Clock,
    S: HostSink,
{
    let website_url = inputs.get_input(WEBSITE_URL_INPUT)?;
    let verbose_raw = inputs.get_input(VERBOSE_INPUT)?;
    let verbose = is_truthy(&verbose_raw);

    sink.info(&format!("Checking website: {website_url}!")).await?;
    sink.info(&format!("Verbose mode on: {verbose_raw}")).await?;

    let time = time_of_day(&clock.now());
    sink.set_output(TIME_OUTPUT, &time).await?;

    if verbose {
        let payload = context.payload_json()?;
        sink.info(&format!("The event payload: {payload}")).await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use action_toolkit::{ActionError, EnvInputs, FixedClock, InputOptions};
    use chrono::DateTime;
    use serde_json::{Value, json};

    use super::*;

    /// Sink that records everything reported to it.
    #[derive(Default)]
    struct RecordingSink {
        lines: Vec<String>,
        outputs: BTreeMap<String, String>,
        failures: Vec<String>,
        /// Make `info` fail for lines starting with this prefix.
        fail_info_prefix: Option<&'static str>,
    }

    impl HostSink for RecordingSink {
        async fn info(&mut self, line: &str) -> action_toolkit::Result<()> {
            if let Some(prefix) = self.fail_info_prefix
                && line.starts_with(prefix)
            {
                return Err(ActionError::WriteCommand(std::io::Error::other(
                    "stdout closed",
                )));
            }
            self.lines.push(line.to_string());
            Ok(())
        }

        async fn debug(&mut self, line: &str) -> action_toolkit::Result<()> {
            self.lines.push(format!("debug: {line}"));
            Ok(())
        }

        async fn warning(&mut self, line: &str) -> action_toolkit::Result<()> {
            self.lines.push(format!("warning: {line}"));
            Ok(())
        }

        async fn error(&mut self, line: &str) -> action_toolkit::Result<()> {
            self.lines.push(format!("error: {line}"));
            Ok(())
        }

        async fn set_output(&mut self, name: &str, value: &str) -> action_toolkit::Result<()> {
            self.outputs.insert(name.to_string(), value.to_string());
            Ok(())
        }

        async fn set_failed(&mut self, message: &str) -> action_toolkit::Result<()> {
            self.failures.push(message.to_string());
            Ok(())
        }
    }

    /// Input provider whose accessor always fails.
    struct BrokenInputs;

    impl InputProvider for BrokenInputs {
        fn get_input_with(&self, name: &str, _: &InputOptions) -> action_toolkit::Result<String> {
            Err(ActionError::InputRequired(name.to_string()))
        }
    }

    fn inputs(url: &str, verbose: &str) -> EnvInputs {
        EnvInputs::from_vars([("INPUT_WEBSITE_URL", url), ("INPUT_VERBOSE", verbose)])
    }

    fn clock() -> FixedClock {
        FixedClock(DateTime::parse_from_rfc3339("2024-06-01T14:03:09Z").unwrap())
    }

    async fn run_with(inputs: &impl InputProvider, payload: Value) -> (Outcome, RecordingSink) {
        let mut sink = RecordingSink::default();
        let outcome = run(inputs, &Context::with_payload(payload), &clock(), &mut sink).await;
        (outcome, sink)
    }

    #[tokio::test]
    async fn logs_url_and_sets_time() {
        for url in ["https://example.com", "", "not a url at all"] {
            let (outcome, sink) = run_with(&inputs(url, "false"), json!({})).await;

            assert_eq!(outcome, Outcome::Success);
            assert!(
                sink.lines.iter().any(|l| l.contains(url)),
                "{:?}",
                sink.lines
            );
            assert_eq!(sink.lines[0], format!("Checking website: {url}!"));
            assert_eq!(sink.outputs["time"], "14:03:09 GMT+0000 (UTC)");
            assert!(sink.failures.is_empty());
        }
    }

    #[tokio::test]
    async fn logs_raw_verbose_value() {
        let (_, sink) = run_with(&inputs("https://example.com", "Yes"), json!({})).await;
        assert_eq!(sink.lines[1], "Verbose mode on: Yes");
    }

    #[tokio::test]
    async fn verbose_true_in_any_case_logs_payload() {
        for verbose in ["TRUE", "true", "True"] {
            let (outcome, sink) = run_with(&inputs("u", verbose), json!({"a": 1})).await;

            assert_eq!(outcome, Outcome::Success);
            assert_eq!(sink.lines.len(), 3, "{verbose}: {:?}", sink.lines);
            assert!(sink.lines[2].starts_with("The event payload: "));
        }
    }

    #[tokio::test]
    async fn other_verbose_values_skip_payload() {
        for verbose in ["false", "", "yes"] {
            let (outcome, sink) = run_with(&inputs("u", verbose), json!({"a": 1})).await;

            assert_eq!(outcome, Outcome::Success);
            assert_eq!(sink.lines.len(), 2, "{verbose}: {:?}", sink.lines);
            assert!(!sink.lines.iter().any(|l| l.contains("payload")));
        }
    }

    #[tokio::test]
    async fn logged_payload_parses_back_to_the_event() {
        let payload = json!({"a": 1, "b": [2, 3]});
        let (_, sink) = run_with(&inputs("u", "true"), payload.clone()).await;

        let text = sink.lines[2].strip_prefix("The event payload: ").unwrap();
        assert!(text.contains("\n  \"b\": [\n    2,"), "{text}");
        let parsed: Value = serde_json::from_str(text).unwrap();
        assert_eq!(parsed, payload);
    }

    #[tokio::test]
    async fn input_failure_is_reported_once_with_its_message() {
        let (outcome, sink) = run_with(&BrokenInputs, json!({})).await;

        let message = "Input required and not supplied: website_url".to_string();
        assert_eq!(outcome, Outcome::Failed(message.clone()));
        assert_eq!(sink.failures, vec![message]);
        assert!(sink.outputs.is_empty());
        assert!(sink.lines.is_empty());
    }

    #[tokio::test]
    async fn outputs_set_before_a_failure_remain() {
        let mut sink = RecordingSink {
            fail_info_prefix: Some("The event payload"),
            ..Default::default()
        };
        let outcome = run(
            &inputs("u", "true"),
            &Context::with_payload(json!({})),
            &clock(),
            &mut sink,
        )
        .await;

        assert_eq!(
            outcome,
            Outcome::Failed("failed to write workflow command: stdout closed".to_string())
        );
        assert_eq!(sink.failures.len(), 1);
        assert_eq!(sink.outputs["time"], "14:03:09 GMT+0000 (UTC)");
    }

    #[tokio::test]
    async fn identical_runs_with_a_fixed_clock_match() {
        let inputs = inputs("https://example.com", "true");
        let (first, first_sink) = run_with(&inputs, json!({"n": 1})).await;
        let (second, second_sink) = run_with(&inputs, json!({"n": 1})).await;

        assert_eq!(first, second);
        assert_eq!(first_sink.outputs, second_sink.outputs);
        assert_eq!(first_sink.lines, second_sink.lines);
    }
}
