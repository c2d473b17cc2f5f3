use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph},
};

pub fn render(frame: &mut Frame, area: Rect) {
    let chunks = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(15),
        Constraint::Fill(1),
    ])
    .split(area);

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "THE TRIAL",
            Style::default().fg(Color::Red).bold(),
        )),
        Line::from(""),
        Line::from("Answer the clan's questions. Each session draws a".fg(Color::Gray)),
        Line::from("handful from the archives; a master of the clan".fg(Color::Gray)),
        Line::from("judges every answer.".fg(Color::Gray)),
        Line::from(""),
        Line::from("Correct answers earn points and coins. Points raise".fg(Color::Gray)),
        Line::from("your rank; coins buy tools for missions. A flawless".fg(Color::Gray)),
        Line::from("session earns the completion bonus.".fg(Color::Gray)),
        Line::from(""),
        Line::from("On missions, detection means failure. Move unseen.".fg(Color::Gray)),
        Line::from(""),
        Line::from("[Esc] back".fg(Color::DarkGray)),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::DarkGray)
            .padding(Padding::horizontal(2)),
    );
    frame.render_widget(widget, chunks[1]);
}
