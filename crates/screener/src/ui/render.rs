use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Gauge, List, ListItem, Paragraph, Wrap};
use screening_protocol::{question, DISCLAIMER, INSTRUCTIONS, QUESTIONS, RESPONSE_OPTIONS};

use super::app::{AppState, HealthState};
use super::theme::{Theme, ValueStyle};
use crate::present::{progress_label, ResultView};

pub(crate) fn draw_ui(frame: &mut ratatui::Frame, app: &mut AppState) {
    let theme = Theme::dark();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Min(8),
            Constraint::Length(3),
        ])
        .split(frame.area());

    draw_header(frame, app, &theme, chunks[0]);

    let banner = Paragraph::new(Text::from(vec![Line::styled(DISCLAIMER, theme.warn_style())]))
        .block(theme.block("Important Disclaimer"))
        .wrap(Wrap { trim: true });
    frame.render_widget(banner, chunks[1]);

    match app.session.result() {
        Some(result) => {
            let view = ResultView::from_result(result);
            draw_result(frame, &view, &theme, chunks[2]);
        }
        None => draw_questionnaire(frame, app, &theme, chunks[2]),
    }

    draw_footer(frame, app, &theme, chunks[3]);
}

fn draw_header(frame: &mut ratatui::Frame, app: &AppState, theme: &Theme, area: Rect) {
    let (health_text, health_style) = match &app.health {
        HealthState::Checking => ("checking".to_string(), theme.value_style(ValueStyle::Dim)),
        HealthState::Ready(health) if health.is_healthy() => {
            (format!("{} (v{})", health.status, health.version), theme.ok_style())
        }
        HealthState::Ready(health) => (
            format!("{} (model not loaded)", health.status),
            theme.warn_style(),
        ),
        HealthState::Unreachable(message) => {
            (format!("unreachable: {message}"), theme.error_style())
        }
    };
    let line = Line::from(vec![
        Span::styled("Service: ", theme.key_style()),
        Span::styled(app.api_url.clone(), theme.value_style(ValueStyle::Important)),
        Span::styled("  Status: ", theme.key_style()),
        Span::styled(health_text, health_style),
        Span::styled("  Progress: ", theme.key_style()),
        Span::styled(
            progress_label(app.session.answers().answered_count()),
            theme.value_style(ValueStyle::Important),
        ),
    ]);
    let header = Paragraph::new(line)
        .block(theme.block("Psychiatric Disorder Screening Tool (DASS-42)"))
        .style(theme.value_style(ValueStyle::Normal));
    frame.render_widget(header, area);
}

fn draw_questionnaire(frame: &mut ratatui::Frame, app: &mut AppState, theme: &Theme, area: Rect) {
    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);
    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(8), Constraint::Length(5)])
        .split(body[1]);

    let answers = app.session.answers();
    let items = QUESTIONS
        .iter()
        .enumerate()
        .map(|(index, text)| {
            let (mark, style) = match answers.get(index) {
                Some(value) => (value.get().to_string(), theme.value_style(ValueStyle::Normal)),
                None => (" ".to_string(), theme.value_style(ValueStyle::Dim)),
            };
            ListItem::new(Line::styled(
                format!("{:>2}. [{}] {}", index + 1, mark, text),
                style,
            ))
        })
        .collect::<Vec<_>>();
    let list = List::new(items)
        .block(theme.block("Questionnaire"))
        .highlight_style(theme.highlight_style())
        .highlight_symbol(">> ");
    let selected_value = answers.get(app.selected);
    frame.render_stateful_widget(list, body[0], &mut app.list_state);

    let mut lines = vec![
        Line::styled(INSTRUCTIONS, theme.help_style()),
        Line::from(""),
        Line::styled(
            format!(
                "{}. {}",
                app.selected + 1,
                question(app.selected).unwrap_or_default()
            ),
            theme.value_style(ValueStyle::Important),
        ),
        Line::from(""),
    ];
    for option in RESPONSE_OPTIONS.iter() {
        let chosen = selected_value.map(|value| value.get()) == Some(option.value);
        let style = if chosen {
            theme.highlight_style()
        } else {
            theme.value_style(ValueStyle::Normal)
        };
        let marker = if chosen { "(*)" } else { "( )" };
        lines.push(Line::styled(
            format!("{marker} {} = {}", option.value, option.label),
            style,
        ));
    }
    let detail = Paragraph::new(Text::from(lines))
        .block(theme.block("Question"))
        .wrap(Wrap { trim: true });
    frame.render_widget(detail, right[0]);

    let (status, style) = if app.session.is_submitting() {
        ("Submitting...".to_string(), theme.accent_style())
    } else if let Some(err) = app.session.error() {
        let message = if err.is_retryable() {
            format!("{err} Press Enter to retry.")
        } else {
            err.to_string()
        };
        (message, theme.error_style())
    } else if app.session.is_complete() {
        (
            "All questions answered. Press Enter to submit.".to_string(),
            theme.ok_style(),
        )
    } else {
        (
            "Answer every question, then press Enter.".to_string(),
            theme.help_style(),
        )
    };
    let status = Paragraph::new(Line::styled(status, style))
        .block(theme.block("Status"))
        .wrap(Wrap { trim: true });
    frame.render_widget(status, right[1]);
}

fn draw_result(frame: &mut ratatui::Frame, view: &ResultView, theme: &Theme, area: Rect) {
    let block = theme.block("Your Result");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let bar_rows = view.bars.len().max(1) as u16;
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(2),
            Constraint::Length(1),
            Constraint::Length(bar_rows),
            Constraint::Length(3),
        ])
        .split(inner);

    let summary = Line::from(vec![
        Span::styled(view.label.clone(), theme.severity_style(view.severity)),
        Span::styled("  Confidence: ", theme.key_style()),
        Span::styled(view.confidence.clone(), theme.value_style(ValueStyle::Important)),
    ]);
    frame.render_widget(Paragraph::new(summary), rows[0]);

    let description = Paragraph::new(view.description.clone())
        .style(theme.value_style(ValueStyle::Normal))
        .wrap(Wrap { trim: true });
    frame.render_widget(description, rows[1]);

    let title = if view.distribution_mismatch {
        Line::styled(
            "Probability Distribution (unexpected categories)",
            theme.warn_style(),
        )
    } else {
        Line::styled("Probability Distribution", theme.key_style())
    };
    frame.render_widget(Paragraph::new(title), rows[2]);

    let bar_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(1); view.bars.len()])
        .split(rows[3]);
    for (bar, bar_area) in view.bars.iter().zip(bar_areas.iter()) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(12), Constraint::Min(10)])
            .split(*bar_area);
        frame.render_widget(
            Paragraph::new(Span::styled(bar.category.clone(), theme.key_style())),
            columns[0],
        );
        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(theme.severity_color(bar.severity)))
            .ratio(bar.ratio)
            .label(bar.percent_label());
        frame.render_widget(gauge, columns[1]);
    }

    let disclaimer = Paragraph::new(view.disclaimer.clone())
        .style(theme.help_style())
        .wrap(Wrap { trim: true });
    frame.render_widget(disclaimer, rows[4]);
}

fn draw_footer(frame: &mut ratatui::Frame, app: &AppState, theme: &Theme, area: Rect) {
    let help = if app.session.result().is_some() {
        "R=take again  H=health  Q=quit  "
    } else {
        "↑/↓=select  1-4=answer  Enter=submit  Esc=dismiss  R=reset  H=health  Q=quit  "
    };
    let mut footer_spans = vec![Span::styled(help, theme.help_style())];
    if app.session.is_submitting() {
        footer_spans.push(Span::styled("submitting...  ", theme.accent_style()));
    }
    if app.confirm_quit {
        footer_spans.push(Span::styled(
            "Press Q again to quit / Esc to cancel  ",
            theme.warn_style(),
        ));
    }
    let footer = Paragraph::new(Line::from(footer_spans)).block(theme.block("Controls"));
    frame.render_widget(footer, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::test_utils::severe_result;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use screening_protocol::{ResponseValue, QUESTION_COUNT};

    fn render(app: &mut AppState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 50)).expect("terminal");
        terminal.draw(|frame| draw_ui(frame, app)).expect("draw");
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn answered_app() -> AppState {
        let mut app = AppState::new("http://localhost:8000");
        let value = ResponseValue::new(4).expect("value");
        for index in 0..QUESTION_COUNT {
            app.session.set_answer(index, value);
        }
        app
    }

    #[test]
    fn questionnaire_shows_progress_and_options() {
        let mut app = AppState::new("http://localhost:8000");
        app.session
            .set_answer(0, ResponseValue::new(2).expect("value"));
        let screen = render(&mut app);
        assert!(screen.contains("1 / 30 answered"));
        assert!(screen.contains("Did not apply to me at all"));
        assert!(screen.contains("[2]"));
    }

    #[test]
    fn result_screen_shows_confidence_and_bars() {
        let mut app = answered_app();
        let ticket = app.session.begin_submit().expect("ticket");
        app.session.finish(ticket.attempt, Ok(severe_result()));
        let screen = render(&mut app);
        assert!(screen.contains("Severe"));
        assert!(screen.contains("92.0%"));
        assert!(screen.contains("92%"));
        assert!(screen.contains("moderate"));
        assert!(screen.contains("R=take again"));
        assert!(!screen.contains("Enter=take again"));
    }

    #[test]
    fn error_is_shown_in_status_panel() {
        let mut app = answered_app();
        let ticket = app.session.begin_submit().expect("ticket");
        app.session.finish(
            ticket.attempt,
            Err(crate::service::SubmitError::server(
                500,
                Some("model unavailable".to_string()),
            )),
        );
        let screen = render(&mut app);
        assert!(screen.contains("model unavailable"));
    }
}
