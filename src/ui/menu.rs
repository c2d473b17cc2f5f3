use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::app::{App, MENU_ITEMS};
use crate::ranking;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(16),
        Constraint::Fill(1),
    ])
    .split(area);

    let rank = ranking::tier_for(app.progression.total_score, &app.config.ranks);

    let mut content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "SHADOW TRIALS",
            Style::default().fg(Color::Red).bold(),
        )),
        Line::from("Trials of the Azuma Clan".fg(Color::DarkGray)),
        Line::from(""),
        Line::from(Span::styled(
            format!("{}  ·  {}", app.player_name, rank.name),
            Style::default().fg(Color::Yellow),
        )),
        Line::from(""),
    ];

    for (index, item) in MENU_ITEMS.iter().enumerate() {
        let is_selected = index == app.menu_cursor;
        let style = if is_selected {
            Style::default().fg(Color::Cyan).bold()
        } else {
            Style::default().fg(Color::Gray)
        };
        let marker = if is_selected { ">" } else { " " };
        content.push(Line::from(Span::styled(
            format!("{} {}", marker, item),
            style,
        )));
    }

    content.push(Line::from(""));
    content.push(Line::from(
        "j/k navigate  ·  enter select  ·  q quit".fg(Color::DarkGray),
    ));

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::DarkGray),
    );

    frame.render_widget(widget, chunks[1]);
}
