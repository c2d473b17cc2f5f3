use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph},
};

use crate::app::App;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::vertical([
        Constraint::Length(3),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .margin(1)
    .split(area);

    let header = Paragraph::new(vec![
        Line::from(Span::styled(
            "CLAN ALLIES",
            Style::default().fg(Color::Red).bold(),
        )),
        Line::from("Those who watch over the trials".fg(Color::DarkGray)),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(header, chunks[0]);

    let mut lines = Vec::new();
    for supporter in app.supporters() {
        lines.push(Line::from(Span::styled(
            supporter.name.as_str(),
            Style::default().fg(Color::Yellow).bold(),
        )));
        if let Some(handle) = &supporter.handle {
            lines.push(Line::from(handle.as_str().fg(Color::DarkGray)));
        }
        lines.push(Line::from(
            supporter
                .role
                .as_deref()
                .unwrap_or("Clan Ally")
                .italic()
                .fg(Color::Gray),
        ));
        lines.push(Line::from(""));
    }

    let list = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::DarkGray)
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(list, chunks[1]);

    let controls = Paragraph::new("[Esc] back")
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(controls, chunks[2]);
}
