use std::time::Duration;

use screening_protocol::{
    question, ResponseValue, DISCLAIMER, INSTRUCTIONS, QUESTION_COUNT, RESPONSE_OPTIONS,
};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, Lines};
use tracing::info;

use crate::present::{progress_label, text_bar, ResultView};
use crate::service::{submit_with_timeout, PredictionService};
use crate::session::{Phase, Session};

const BAR_WIDTH: usize = 20;

/// Line-oriented skin: one prompt per question on stdin/stdout.
pub(crate) async fn run_plain<R, W>(
    service: &dyn PredictionService,
    timeout: Duration,
    input: R,
    mut output: W,
) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();
    let mut session = Session::new();

    write_intro(&mut output).await?;
    loop {
        if !collect_answers(&mut session, &mut lines, &mut output).await? {
            return Ok(());
        }

        if let Ok(ticket) = session.begin_submit() {
            output.write_all(b"\nSubmitting...\n").await?;
            output.flush().await?;
            let outcome = submit_with_timeout(service, &ticket.request, timeout).await;
            session.finish(ticket.attempt, outcome);
        }

        match session.phase() {
            Phase::Succeeded(result) => {
                let view = ResultView::from_result(result);
                view.warn_on_mismatch();
                write_result(&mut output, &view).await?;
                let again = "Take the questionnaire again? [y/N] ";
                if !confirm(&mut lines, &mut output, again, false).await? {
                    return Ok(());
                }
                session.reset();
                info!("questionnaire restarted");
            }
            Phase::Failed(err) => {
                let message = format!("\nError: {err}\n");
                output.write_all(message.as_bytes()).await?;
                if !confirm(&mut lines, &mut output, "Retry? [Y/n] ", true).await? {
                    return Ok(());
                }
                session.dismiss_error();
            }
            Phase::Collecting | Phase::Submitting { .. } => {}
        }
    }
}

async fn write_intro<W: AsyncWrite + Unpin>(output: &mut W) -> anyhow::Result<()> {
    let intro = format!(
        "Psychiatric Disorder Screening Tool\n\
         Based on the DASS-42 (Depression Anxiety Stress Scales)\n\n\
         Important: {DISCLAIMER}\n\n{INSTRUCTIONS}\n"
    );
    output.write_all(intro.as_bytes()).await?;
    let mut options = String::new();
    for option in RESPONSE_OPTIONS.iter() {
        options.push_str(&format!("  {} = {}\n", option.value, option.label));
    }
    output.write_all(options.as_bytes()).await?;
    output.write_all(b"Enter q to quit.\n").await?;
    Ok(())
}

/// Prompts for every unanswered question. Returns false when the user quits
/// or input ends.
async fn collect_answers<R, W>(
    session: &mut Session,
    lines: &mut Lines<R>,
    output: &mut W,
) -> anyhow::Result<bool>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    while let Some(index) = session.answers().first_unanswered() {
        let text = question(index).unwrap_or_default();
        let prompt = format!(
            "\n[{}/{QUESTION_COUNT}] {text}\n({}) > ",
            index + 1,
            progress_label(session.answers().answered_count())
        );
        output.write_all(prompt.as_bytes()).await?;
        output.flush().await?;

        let Some(line) = lines.next_line().await? else {
            return Ok(false);
        };
        let line = line.trim();
        if line.eq_ignore_ascii_case("q") {
            return Ok(false);
        }
        match line.parse::<u8>().ok().and_then(ResponseValue::new) {
            Some(value) => {
                session.set_answer(index, value);
            }
            None => output.write_all(b"Please enter a number from 1 to 4.\n").await?,
        }
    }
    Ok(true)
}

async fn write_result<W>(output: &mut W, view: &ResultView) -> anyhow::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let mut text = format!(
        "\nYour Result: {}\nConfidence: {}\n\n{}\n\nProbability Distribution\n",
        view.label, view.confidence, view.description
    );
    for bar in &view.bars {
        text.push_str(&format!(
            "  {:<10} {} {:>4}\n",
            bar.category,
            text_bar(bar.ratio, BAR_WIDTH),
            bar.percent_label()
        ));
    }
    text.push_str(&format!("\n{}\n", view.disclaimer));
    output.write_all(text.as_bytes()).await?;
    Ok(())
}

async fn confirm<R, W>(
    lines: &mut Lines<R>,
    output: &mut W,
    prompt: &str,
    default: bool,
) -> anyhow::Result<bool>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    output.write_all(prompt.as_bytes()).await?;
    output.flush().await?;
    let Some(line) = lines.next_line().await? else {
        return Ok(false);
    };
    let answer = match line.trim().to_ascii_lowercase().as_str() {
        "" => default,
        "y" | "yes" => true,
        _ => false,
    };
    Ok(answer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::test_utils::{complete_request, severe_result, FakeService};
    use crate::service::{SubmitError, DEFAULT_TIMEOUT};

    fn script(answer: &str, tail: &[&str]) -> String {
        let mut input = String::new();
        for _ in 0..QUESTION_COUNT {
            input.push_str(answer);
            input.push('\n');
        }
        for line in tail {
            input.push_str(line);
            input.push('\n');
        }
        input
    }

    async fn run(service: &FakeService, input: &str) -> String {
        let mut output = Vec::new();
        run_plain(service, DEFAULT_TIMEOUT, input.as_bytes(), &mut output)
            .await
            .expect("run");
        String::from_utf8(output).expect("utf8")
    }

    #[tokio::test]
    async fn full_run_prints_result() {
        let service = FakeService::with_outcomes(vec![Ok(severe_result())]);
        let output = run(&service, &script("4", &["n"])).await;
        assert_eq!(service.requests(), vec![complete_request(4)]);
        assert!(output.contains("Your Result: Severe"));
        assert!(output.contains("Confidence: 92.0%"));
        assert!(output.contains("severe"));
        assert!(output.contains(" 92%"));
        assert!(output.contains("[30/30]"));
    }

    #[tokio::test]
    async fn quitting_early_never_submits() {
        let service = FakeService::with_outcomes(vec![Ok(severe_result())]);
        let output = run(&service, "1\n2\nq\n").await;
        assert_eq!(service.calls(), 0);
        assert!(output.contains("2 / 30 answered"));
    }

    #[tokio::test]
    async fn invalid_input_is_reprompted() {
        let service = FakeService::with_outcomes(vec![Ok(severe_result())]);
        let input = format!("0\nfive\n{}", script("3", &["n"]));
        let output = run(&service, &input).await;
        assert_eq!(output.matches("Please enter a number from 1 to 4.").count(), 2);
        assert_eq!(service.requests(), vec![complete_request(3)]);
    }

    #[tokio::test]
    async fn retry_after_server_error_reuses_answers() {
        let service = FakeService::with_outcomes(vec![
            Err(SubmitError::server(500, Some("model unavailable".to_string()))),
            Ok(severe_result()),
        ]);
        let output = run(&service, &script("2", &["y", "n"])).await;
        assert!(output.contains("Error: model unavailable"));
        assert!(output.contains("Confidence: 92.0%"));
        assert_eq!(service.requests(), vec![complete_request(2), complete_request(2)]);
    }

    #[tokio::test]
    async fn take_again_starts_from_empty_answers() {
        let service = FakeService::with_outcomes(vec![Ok(severe_result()), Ok(severe_result())]);
        let mut input = script("4", &["y"]);
        input.push_str(&script("1", &["n"]));
        let output = run(&service, &input).await;
        assert_eq!(service.requests(), vec![complete_request(4), complete_request(1)]);
        assert_eq!(output.matches("Your Result: Severe").count(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn stalled_service_reports_timeout() {
        let service = FakeService::stalled();
        let output = run(&service, &script("4", &["n"])).await;
        assert!(output.contains("Request timed out."));
    }
}
