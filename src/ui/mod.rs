mod game;
mod info;
mod menu;
mod missions;
mod name_entry;
mod stats;
mod supporters;

use ratatui::{prelude::*, widgets::Block};

use crate::app::{App, Screen};

pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    frame.render_widget(Block::default().bg(Color::Reset), area);

    match app.screen {
        Screen::Menu => menu::render(frame, area, app),
        Screen::NameEntry => name_entry::render(frame, area, app),
        Screen::Game => game::render(frame, area, app),
        Screen::Stats => stats::render(frame, area, app),
        Screen::Supporters => supporters::render(frame, area, app),
        Screen::Info => info::render(frame, area),
        Screen::Missions => missions::render(frame, area, app),
    }
}
