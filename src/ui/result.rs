use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph},
};

use crate::app::App;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(7),
        Constraint::Fill(1),
        Constraint::Length(2),
    ])
    .margin(1)
    .split(area);

    render_score_summary(frame, chunks[1], app);
    render_missed_list(frame, chunks[2], app);
    render_controls(frame, chunks[3]);
}

fn render_score_summary(frame: &mut Frame, area: Rect, app: &App) {
    let results = app.engine().results();
    let labels = app.translations();
    let lang = app.language();

    let verdict_key = if results.summary.passed {
        "you_passed"
    } else {
        "you_failed"
    };
    let verdict_color = if results.summary.passed {
        Color::Green
    } else {
        Color::Red
    };

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!(
                "{}: {} / {}",
                labels.label("your_score", lang),
                results.summary.correct,
                results.summary.total,
            ),
            Style::default().fg(Color::White).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            labels.label(verdict_key, lang).to_string(),
            Style::default().fg(verdict_color).bold(),
        )),
        Line::from(""),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Color::DarkGray),
    );
    frame.render_widget(widget, area);
}

fn render_missed_list(frame: &mut Frame, area: Rect, app: &App) {
    let labels = app.translations();
    let lang = app.language();
    let missed = app.engine().missed();

    let lines: Vec<Line> = if missed.is_empty() {
        vec![Line::from(Span::styled(
            format!(" {}", labels.label("no_incorrect_answers", lang)),
            Style::default().fg(Color::Green),
        ))]
    } else {
        missed
            .iter()
            .flat_map(|record| {
                [
                    Line::from(Span::styled(
                        record.question.clone(),
                        Style::default().fg(Color::White).bold(),
                    )),
                    Line::from(Span::styled(
                        format!(
                            "  {}: {}",
                            labels.label("your_answer", lang),
                            record.your_answer
                        ),
                        Style::default().fg(Color::Red),
                    )),
                    Line::from(Span::styled(
                        format!(
                            "  {}: {}",
                            labels.label("correct_answer", lang),
                            record.correct_answer
                        ),
                        Style::default().fg(Color::Green),
                    )),
                    Line::from(""),
                ]
            })
            .collect()
    };

    // Scroll by record: four lines per missed entry.
    let scroll = (app.result_scroll() * 4) as u16;
    let widget = Paragraph::new(lines)
        .block(Block::default().padding(Padding::horizontal(1)))
        .scroll((scroll, 0));
    frame.render_widget(widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let widget = Paragraph::new("j/k scroll  ·  l language  ·  r restart  ·  q quit")
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
