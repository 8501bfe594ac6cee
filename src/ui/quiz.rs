use ratatui::{
    prelude::*,
    widgets::{Gauge, Paragraph, Wrap},
};

use crate::app::App;
use crate::session::{AnswerMark, OptionView};

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let Some(view) = app.engine().current_question() else {
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(4),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .margin(2)
    .split(area);

    render_progress(frame, chunks[0], app);
    render_question_text(frame, chunks[2], &view.prompt);
    render_options(frame, chunks[3], &view.options);
    render_controls(frame, chunks[4], view.can_submit);
}

fn render_progress(frame: &mut Frame, area: Rect, app: &App) {
    let progress = app.engine().progress();
    let labels = app.translations();
    let lang = app.language();
    let label = format!(
        "{} {} {} {}",
        labels.label("question_prefix", lang),
        progress.position,
        labels.label("of_separator", lang),
        progress.total,
    );

    let widget = Gauge::default()
        .ratio(progress.ratio())
        .label(label)
        .gauge_style(Style::default().fg(Color::Cyan).bg(Color::DarkGray));
    frame.render_widget(widget, area);
}

fn render_question_text(frame: &mut Frame, area: Rect, text: &str) {
    let widget = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .fg(Color::White)
        .bold();
    frame.render_widget(widget, area);
}

fn render_options(frame: &mut Frame, area: Rect, options: &[OptionView]) {
    let mut lines: Vec<Line> = Vec::with_capacity(options.len() * 2);

    for (display_index, option) in options.iter().enumerate() {
        let style = option_style(option);
        let marker = if option.is_selected { ">" } else { " " };

        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", marker), style),
            Span::styled(format!("{}. ", option_label(display_index)), style),
            Span::styled(option.text.as_str(), style),
        ]));
        lines.push(Line::from(""));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

fn option_style(option: &OptionView) -> Style {
    match option.mark {
        Some(AnswerMark::Correct) => Style::default().fg(Color::Green).bold(),
        Some(AnswerMark::Incorrect) => Style::default().fg(Color::Red).bold(),
        None if option.is_selected => Style::default().fg(Color::Cyan).bold(),
        None => Style::default().fg(Color::Gray),
    }
}

fn option_label(display_index: usize) -> char {
    (b'A' + (display_index % 26) as u8) as char
}

fn render_controls(frame: &mut Frame, area: Rect, can_submit: bool) {
    let hint = if can_submit {
        "j/k navigate  ·  enter submit  ·  l language  ·  r restart  ·  q quit"
    } else {
        "j/k navigate  ·  l language  ·  r restart  ·  q quit"
    };
    let widget = Paragraph::new(hint)
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
