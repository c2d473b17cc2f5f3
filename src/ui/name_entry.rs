//! Name entry screen shown before a session starts.

use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::App;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::vertical([
        Constraint::Percentage(35),
        Constraint::Length(10),
        Constraint::Percentage(35),
    ])
    .split(area);

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "NAME YOURSELF",
            Style::default().fg(Color::Red).bold(),
        )),
        Line::from(""),
        Line::from("The clan must know who faces the trial.".fg(Color::DarkGray)),
        Line::from(""),
        Line::from(vec![
            Span::styled("Your name: ", Style::default().fg(Color::White)),
            Span::styled(app.name_input.as_str(), Style::default().fg(Color::Yellow)),
            Span::styled("_", Style::default().fg(Color::Yellow)),
        ]),
        Line::from(""),
        Line::from(
            format!(
                "Leave empty to be called \"{}\"",
                app.config.default_player_name
            )
            .fg(Color::DarkGray),
        ),
        Line::from(""),
        Line::from("[Enter] begin  ·  [Esc] back".fg(Color::DarkGray)),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center);
    frame.render_widget(widget, chunks[1]);
}
