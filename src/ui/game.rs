//! In-game rendering: question, feedback, supporter shoutout, and result
//! sub-views driven by the session phase.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
};

use crate::app::App;
use crate::feedback::fill_template;
use crate::ranking;
use crate::session::{SessionPhase, TrialSession};

const OPTION_LABELS: [char; 4] = ['A', 'B', 'C', 'D'];

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let Some(session) = &app.session else {
        return;
    };

    match &session.phase {
        SessionPhase::Presenting => render_question(frame, area, app, session),
        SessionPhase::Feedback {
            correct,
            commentator,
            line,
        } => render_feedback(frame, area, *correct, commentator, line),
        SessionPhase::Supporter {
            supporter,
            commentator,
        } => render_supporter(frame, area, &supporter.name, commentator),
        SessionPhase::Complete => render_result(frame, area, app, session),
    }
}

fn render_question(frame: &mut Frame, area: Rect, app: &App, session: &TrialSession) {
    let Some(question) = session.current_question() else {
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(4),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .margin(2)
    .split(area);

    render_progress(frame, chunks[0], session);

    let prompt = Paragraph::new(question.question.as_str())
        .wrap(Wrap { trim: true })
        .fg(Color::White)
        .bold();
    frame.render_widget(prompt, chunks[1]);

    render_options(frame, chunks[2], &question.options, app.option_cursor);
    render_controls(frame, chunks[3], "j/k navigate  ·  enter select  ·  q quit");
}

fn render_progress(frame: &mut Frame, area: Rect, session: &TrialSession) {
    let progress = format!(
        "{}/{}",
        session.current_trial_number(),
        session.total_trials()
    );
    let widget = Paragraph::new(progress)
        .alignment(Alignment::Right)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}

fn render_options(frame: &mut Frame, area: Rect, options: &[String], selected: usize) {
    let mut lines: Vec<Line> = Vec::with_capacity(options.len() * 2);

    for (index, option) in options.iter().enumerate() {
        let is_selected = index == selected;
        let style = if is_selected {
            Style::default().fg(Color::Cyan).bold()
        } else {
            Style::default().fg(Color::Gray)
        };
        let marker = if is_selected { ">" } else { " " };
        let label = OPTION_LABELS.get(index).copied().unwrap_or('?');

        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", marker), style),
            Span::styled(format!("{}. ", label), style),
            Span::styled(option.as_str(), style),
        ]));
        lines.push(Line::from(""));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

fn render_feedback(frame: &mut Frame, area: Rect, correct: bool, commentator: &str, line: &str) {
    let chunks = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(11),
        Constraint::Fill(1),
    ])
    .split(area);

    let (verdict, color) = if correct {
        ("CLEVER...", Color::Green)
    } else {
        ("FOOLISH...", Color::Red)
    };

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("{} observes:", commentator),
            Style::default().fg(Color::Yellow).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(verdict, Style::default().fg(color).bold())),
        Line::from(""),
        Line::from(Span::styled(
            format!("\"{}\"", line),
            Style::default().fg(Color::Gray),
        )),
        Line::from(""),
        Line::from(""),
        Line::from("[Enter] continue".fg(Color::DarkGray)),
    ];

    let widget = Paragraph::new(content)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Color::DarkGray)
                .padding(Padding::horizontal(2)),
        );
    frame.render_widget(widget, chunks[1]);
}

fn render_supporter(frame: &mut Frame, area: Rect, supporter: &str, commentator: &str) {
    let chunks = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(10),
        Constraint::Fill(1),
    ])
    .split(area);

    let shoutout = fill_template(
        "Our shadow ally, {supporter}, watches over this trial.",
        &[("supporter", supporter)],
    );

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("{} acknowledges:", commentator),
            Style::default().fg(Color::Yellow).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(shoutout, Style::default().fg(Color::White))),
        Line::from(""),
        Line::from(""),
        Line::from("[Enter] continue".fg(Color::DarkGray)),
    ];

    let widget = Paragraph::new(content)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Color::Yellow)
                .padding(Padding::horizontal(2)),
        );
    frame.render_widget(widget, chunks[1]);
}

fn render_result(frame: &mut Frame, area: Rect, app: &App, session: &TrialSession) {
    let correct = session.correct_count();
    let total = session.total_trials();
    let percent = ranking::percentage(correct, total);
    let grade = ranking::grade_for(correct, total, &app.config.grades);
    let verdict = fill_template(&grade.verdict, &[("player", &session.player_name)]);

    let chunks = Layout::vertical([
        Constraint::Length(9),
        Constraint::Length(4),
        Constraint::Fill(1),
        Constraint::Length(2),
    ])
    .margin(1)
    .split(area);

    let grade_color = match percent as u32 {
        100 => Color::Red,
        80..=99 => Color::Green,
        40..=79 => Color::Cyan,
        _ => Color::DarkGray,
    };

    let summary = vec![
        Line::from(""),
        Line::from(Span::styled(
            grade.rank.as_str(),
            Style::default().fg(grade_color).bold(),
        )),
        Line::from(Span::styled(
            grade.title.as_str(),
            Style::default().fg(Color::Yellow),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("{} / {}  ({:.0}%)", correct, total, percent),
            Style::default().fg(Color::White).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(verdict, Style::default().fg(Color::Gray))),
    ];
    let widget = Paragraph::new(summary)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Color::DarkGray),
        );
    frame.render_widget(widget, chunks[0]);

    render_reward(frame, chunks[1], app);
    render_breakdown(frame, chunks[2], session);
    render_controls(frame, chunks[3], "r new session  ·  m menu  ·  q quit");
}

fn render_reward(frame: &mut Frame, area: Rect, app: &App) {
    let Some(outcome) = &app.last_outcome else {
        return;
    };

    let mut lines = vec![Line::from(vec![
        Span::styled(
            format!("+{} points", outcome.reward.points),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled("   ", Style::default()),
        Span::styled(
            format!("+{} coins", outcome.reward.coins),
            Style::default().fg(Color::Yellow),
        ),
        Span::styled(
            if outcome.reward.perfect {
                "   (flawless bonus)"
            } else {
                ""
            },
            Style::default().fg(Color::Green),
        ),
    ])];

    if let Some(change) = &outcome.rank_change {
        lines.push(Line::from(Span::styled(
            format!("RANK UP: {} -> {}", change.old_name, change.new_name),
            Style::default().fg(Color::Red).bold(),
        )));
    }

    let widget = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(widget, area);
}

fn render_breakdown(frame: &mut Frame, area: Rect, session: &TrialSession) {
    let lines: Vec<Line> = session
        .records()
        .iter()
        .zip(session.questions().iter())
        .enumerate()
        .map(|(index, (record, question))| {
            let (symbol, color) = if record.correct {
                ("+", Color::Green)
            } else {
                ("-", Color::Red)
            };
            Line::from(vec![
                Span::styled(format!(" {} ", symbol), Style::default().fg(color)),
                Span::styled(
                    format!("{:2}. ", index + 1),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(question.question.as_str(), Style::default().fg(Color::Gray)),
            ])
        })
        .collect();

    let widget = Paragraph::new(lines).block(Block::default().padding(Padding::horizontal(1)));
    frame.render_widget(widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect, text: &str) {
    let widget = Paragraph::new(text)
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
