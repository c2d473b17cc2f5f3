//! Mission screens: list, briefing, tool shop, scene play, and debrief.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
};

use crate::app::{App, MissionDebrief, MissionView};
use crate::missions::{self, Mission, MissionRun, status_label};

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    match &app.mission_view {
        MissionView::List => render_list(frame, area, app),
        MissionView::Briefing => render_briefing(frame, area, app),
        MissionView::Shop => render_shop(frame, area, app),
        MissionView::Scene => render_scene(frame, area, app),
        MissionView::Debrief(debrief) => render_debrief(frame, area, debrief),
    }
}

fn render_list(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::vertical([
        Constraint::Length(3),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .margin(1)
    .split(area);

    let header = Paragraph::new(vec![
        Line::from(Span::styled(
            "AZUMA CLAN MISSIONS",
            Style::default().fg(Color::Red).bold(),
        )),
        Line::from("Detection means failure. Stay in the shadows.".fg(Color::DarkGray)),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(header, chunks[0]);

    let available = app.available_missions();
    let mut lines = Vec::new();

    if available.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(
            "No missions available. Raise your rank or earn more coins.".fg(Color::Gray),
        ));
    }

    for (index, mission) in available.iter().enumerate() {
        let is_selected = index == app.mission_cursor;
        let style = if is_selected {
            Style::default().fg(Color::Cyan).bold()
        } else {
            Style::default().fg(Color::Gray)
        };
        let marker = if is_selected { ">" } else { " " };
        let status = status_label(app.mission_status.get(&mission.id).copied());

        lines.push(Line::from(vec![
            Span::styled(format!(" {} {} ", marker, mission.title), style),
            Span::styled(
                format!("[{}] [{}]", mission.difficulty.to_uppercase(), status),
                Style::default().fg(Color::DarkGray),
            ),
        ]));
        lines.push(Line::from(
            format!("     {} pts · {} coins", mission.reward.points, mission.reward.coins)
                .fg(Color::DarkGray),
        ));
        lines.push(Line::from(""));
    }

    let list = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::DarkGray)
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(list, chunks[1]);

    render_controls(
        frame,
        chunks[2],
        "j/k navigate  ·  enter briefing  ·  s shop  ·  esc menu",
    );
}

fn render_briefing(frame: &mut Frame, area: Rect, app: &App) {
    let Some(mission) = app.selected_mission() else {
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(4),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .margin(1)
    .split(area);

    let header = Paragraph::new(vec![
        Line::from(Span::styled(
            mission.title.as_str(),
            Style::default().fg(Color::Red).bold(),
        )),
        Line::from(
            format!(
                "{} · requires {}",
                mission.difficulty.to_uppercase(),
                rank_name(app, &mission.required_rank)
            )
            .fg(Color::DarkGray),
        ),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(header, chunks[0]);

    let mut lines = vec![
        Line::from(mission.description.as_str().fg(Color::Gray)),
        Line::from(""),
        Line::from(Span::styled(
            "REWARDS",
            Style::default().fg(Color::Yellow).bold(),
        )),
        Line::from(
            format!(
                "{} points · {} coins{}",
                mission.reward.points,
                mission.reward.coins,
                match &mission.reward.unlock_item {
                    Some(item) => format!(" · unlocks {}", missions::item_display_name(item)),
                    None => String::new(),
                }
            )
            .fg(Color::Gray),
        ),
        Line::from(""),
        Line::from(Span::styled(
            "WARNING",
            Style::default().fg(Color::Red).bold(),
        )),
        Line::from("Stealth is mandatory. Detection ends the mission.".fg(Color::Gray)),
    ];

    if let Some(min_coins) = mission.min_coins {
        lines.push(Line::from(""));
        lines.push(Line::from(
            format!("Requires a purse of at least {} coins.", min_coins).fg(Color::DarkGray),
        ));
    }

    let body = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Color::DarkGray)
                .padding(Padding::horizontal(2)),
        );
    frame.render_widget(body, chunks[1]);

    render_controls(frame, chunks[2], "enter begin mission  ·  esc back");
}

fn render_shop(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::vertical([
        Constraint::Length(3),
        Constraint::Fill(1),
        Constraint::Length(2),
    ])
    .margin(1)
    .split(area);

    let header = Paragraph::new(vec![
        Line::from(Span::styled(
            "NINJA TOOL SHOP",
            Style::default().fg(Color::Red).bold(),
        )),
        Line::from(format!("Purse: {} coins", app.progression.coins).fg(Color::Yellow)),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(header, chunks[0]);

    let mut lines = Vec::new();
    for (index, item) in missions::SHOP_CATALOG.iter().enumerate() {
        let is_selected = index == app.shop_cursor;
        let style = if is_selected {
            Style::default().fg(Color::Cyan).bold()
        } else {
            Style::default().fg(Color::Gray)
        };
        let marker = if is_selected { ">" } else { " " };
        lines.push(Line::from(vec![
            Span::styled(
                format!(
                    " {} {:<16} {:>4} coins",
                    marker,
                    missions::item_display_name(item.id),
                    item.cost
                ),
                style,
            ),
            Span::styled(
                format!("   (owned: {})", app.inventory.count(item.id)),
                Style::default().fg(Color::DarkGray),
            ),
        ]));
    }

    let list = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::DarkGray)
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(list, chunks[1]);

    render_notice_and_controls(
        frame,
        chunks[2],
        app.mission_notice.as_deref(),
        "j/k navigate  ·  enter buy  ·  esc back",
    );
}

fn render_scene(frame: &mut Frame, area: Rect, app: &App) {
    let Some(mission) = app.selected_mission() else {
        return;
    };
    let Some(run) = &app.mission_run else {
        return;
    };
    let Some(scene) = run.current_scene(mission) else {
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(6),
        Constraint::Fill(1),
        Constraint::Length(3),
        Constraint::Length(2),
    ])
    .margin(1)
    .split(area);

    let header = Paragraph::new(vec![
        Line::from(Span::styled(
            mission.title.as_str(),
            Style::default().fg(Color::Red).bold(),
        )),
        Line::from(
            format!("Stealth {:+}  ·  Kills {}", run.stealth_score, run.kills).fg(Color::DarkGray),
        ),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(header, chunks[0]);

    let situation = Paragraph::new(scene.text.as_str())
        .wrap(Wrap { trim: true })
        .fg(Color::White)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Color::DarkGray)
                .padding(Padding::horizontal(1)),
        );
    frame.render_widget(situation, chunks[1]);

    render_choices(frame, chunks[2], run, mission, app.option_cursor, app);
    render_inventory_strip(frame, chunks[3], app);
    render_notice_and_controls(
        frame,
        chunks[4],
        app.mission_notice.as_deref(),
        "j/k navigate  ·  enter choose  ·  esc abandon",
    );
}

fn render_choices(
    frame: &mut Frame,
    area: Rect,
    run: &MissionRun,
    mission: &Mission,
    cursor: usize,
    app: &App,
) {
    let Some(scene) = run.current_scene(mission) else {
        return;
    };

    let mut lines = Vec::with_capacity(scene.choices.len() * 2);
    for (index, choice) in scene.choices.iter().enumerate() {
        let is_selected = index == cursor;
        let style = if is_selected {
            Style::default().fg(Color::Cyan).bold()
        } else {
            Style::default().fg(Color::Gray)
        };
        let marker = if is_selected { ">" } else { " " };

        let mut spans = vec![Span::styled(format!(" {} {}", marker, choice.label), style)];
        if let Some(item) = &choice.requires_item {
            let have = app.inventory.count(item) > 0;
            spans.push(Span::styled(
                format!(
                    "  [uses {}{}]",
                    missions::item_display_name(item),
                    if have { "" } else { " - none left" }
                ),
                Style::default().fg(if have { Color::Yellow } else { Color::Red }),
            ));
        }
        lines.push(Line::from(spans));
        lines.push(Line::from(""));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

fn render_inventory_strip(frame: &mut Frame, area: Rect, app: &App) {
    let stocked = app.inventory.stocked();
    let text = if stocked.is_empty() {
        "Inventory: empty".to_string()
    } else {
        let items: Vec<String> = stocked
            .iter()
            .map(|(id, count)| format!("{} x{}", missions::item_display_name(id), count))
            .collect();
        format!("Inventory: {}", items.join("  ·  "))
    };

    let widget = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}

fn render_debrief(frame: &mut Frame, area: Rect, debrief: &MissionDebrief) {
    let chunks = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(13),
        Constraint::Fill(1),
    ])
    .split(area);

    let (headline, color) = if debrief.success {
        ("MISSION COMPLETE", Color::Green)
    } else {
        ("MISSION FAILED", Color::Red)
    };

    let mut content = vec![
        Line::from(""),
        Line::from(Span::styled(headline, Style::default().fg(color).bold())),
        Line::from(debrief.title.as_str().fg(Color::DarkGray)),
        Line::from(""),
    ];

    match (&debrief.reward, debrief.success) {
        (Some((points, coins)), _) => {
            content.push(Line::from(
                format!("+{} points · +{} coins", points, coins).fg(Color::Yellow),
            ));
            if let Some(item) = &debrief.unlocked_item {
                content.push(Line::from(format!("Unlocked: {}", item).fg(Color::Cyan)));
            }
        }
        (None, true) => {
            content.push(Line::from("Already cleared; no new reward.".fg(Color::DarkGray)));
        }
        (None, false) => {
            content.push(Line::from("You were seen. The shadows forgive nothing.".fg(Color::Gray)));
        }
    }

    if let Some(change) = &debrief.rank_change {
        content.push(Line::from(Span::styled(
            format!("RANK UP: {} -> {}", change.old_name, change.new_name),
            Style::default().fg(Color::Red).bold(),
        )));
    }

    content.push(Line::from(""));
    content.push(Line::from(
        format!(
            "Stealth {:+}  ·  Kills {}",
            debrief.stealth_score, debrief.kills
        )
        .fg(Color::DarkGray),
    ));
    content.push(Line::from(""));
    content.push(Line::from("[Enter] back to missions".fg(Color::DarkGray)));

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::DarkGray)
            .padding(Padding::horizontal(2)),
    );
    frame.render_widget(widget, chunks[1]);
}

fn rank_name<'a>(app: &'a App, rank_id: &'a str) -> &'a str {
    app.config
        .ranks
        .iter()
        .find(|tier| tier.id == rank_id)
        .map(|tier| tier.name.as_str())
        .unwrap_or(rank_id)
}

fn render_controls(frame: &mut Frame, area: Rect, text: &str) {
    let widget = Paragraph::new(text)
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}

fn render_notice_and_controls(frame: &mut Frame, area: Rect, notice: Option<&str>, controls: &str) {
    let mut lines = Vec::new();
    if let Some(notice) = notice {
        lines.push(Line::from(Span::styled(
            notice,
            Style::default().fg(Color::Yellow),
        )));
    } else {
        lines.push(Line::from(""));
    }
    lines.push(Line::from(controls.fg(Color::DarkGray)));

    let widget = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(widget, area);
}
