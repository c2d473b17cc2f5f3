//! Lifetime stats screen: cumulative score, rank, stars, tier progress.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph},
};

use crate::app::App;
use crate::ranking;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let progression = &app.progression;
    let ranks = &app.config.ranks;
    let rank = ranking::tier_for(progression.total_score, ranks);
    let highest_index = ranking::tier_index(&progression.highest_rank_id, ranks);
    let progress = ranking::tier_progress(progression.total_score, ranks);

    let chunks = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(17),
        Constraint::Fill(1),
    ])
    .split(area);

    let stars = "*".repeat(rank.stars as usize);
    let next_line = match ranks.get(ranking::tier_index(&rank.id, ranks) + 1) {
        Some(next) => format!(
            "{} at {} points  ({:.0}% there)",
            next.name,
            next.min_score,
            progress * 100.0
        ),
        None => "Highest rank attained".to_string(),
    };

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "CLAN RECORD",
            Style::default().fg(Color::Red).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("{}  {}", rank.name, stars),
            Style::default().fg(Color::Yellow).bold(),
        )),
        Line::from(format!("Next: {}", next_line).fg(Color::DarkGray)),
        Line::from(""),
        Line::from(format!("Total score      {}", progression.total_score).fg(Color::Gray)),
        Line::from(format!("Coins            {}", progression.coins).fg(Color::Gray)),
        Line::from(format!("Sessions         {}", progression.sessions_completed).fg(Color::Gray)),
        Line::from(
            format!(
                "Answers          {} / {}  ({:.0}%)",
                progression.total_correct,
                progression.total_answered,
                progression.accuracy()
            )
            .fg(Color::Gray),
        ),
        Line::from(
            format!(
                "Highest rank     {}",
                ranks
                    .get(highest_index)
                    .map(|tier| tier.name.as_str())
                    .unwrap_or("-")
            )
            .fg(Color::Gray),
        ),
        Line::from(
            match progression.last_played {
                Some(when) => format!("Last played      {}", when.format("%Y-%m-%d %H:%M UTC")),
                None => "Last played      never".to_string(),
            }
            .fg(Color::Gray),
        ),
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
