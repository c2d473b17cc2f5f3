//! # shadow-trials
//!
//! A terminal trivia game of the Azuma clan: answer a master's questions,
//! earn rank and coins, and run branching stealth missions.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::path::Path;
//! use shadow_trials::{Game, GameConfig, GameError};
//!
//! fn main() -> Result<(), GameError> {
//!     let game = Game::new(GameConfig::default(), None, Path::new(".shadow-trials"));
//!     game.run()
//! }
//! ```

mod app;
pub mod config;
pub mod data;
pub mod feedback;
pub mod missions;
pub mod models;
pub mod ranking;
pub mod session;
pub mod storage;
pub mod terminal;
mod ui;

use std::io;
use std::path::Path;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};

pub use app::{App, MissionDebrief, MissionView, Screen};
pub use config::{ConfigError, GameConfig};
pub use models::{PlayerProgression, Question, RankTier, Supporter};
use session::{PhaseKind, SessionPhase};

/// Error type for top-level game operations.
#[derive(Debug)]
pub enum GameError {
    /// Invalid or unreadable configuration.
    Config(ConfigError),
    /// IO error during game execution.
    Io(io::Error),
}

impl std::fmt::Display for GameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameError::Config(e) => write!(f, "Configuration error: {}", e),
            GameError::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GameError::Config(e) => Some(e),
            GameError::Io(e) => Some(e),
        }
    }
}

impl From<ConfigError> for GameError {
    fn from(err: ConfigError) -> Self {
        GameError::Config(err)
    }
}

impl From<io::Error> for GameError {
    fn from(err: io::Error) -> Self {
        GameError::Io(err)
    }
}

/// A game instance that can be run in the terminal.
pub struct Game {
    app: App,
}

impl Game {
    /// Create a game from a validated config, an optional question file,
    /// and a save directory.
    pub fn new(config: GameConfig, questions: Option<&Path>, save_dir: &Path) -> Self {
        Self {
            app: App::new(config, questions, save_dir),
        }
    }

    /// Run the game in the terminal.
    ///
    /// Takes over the terminal, displays the game UI, and returns when the
    /// player quits.
    pub fn run(mut self) -> Result<(), GameError> {
        let mut term = terminal::TerminalGuard::enter()?;
        run_event_loop(&mut term, &mut self.app)
    }

    /// Get a reference to the underlying app for custom handling.
    pub fn app(&self) -> &App {
        &self.app
    }

    /// Get a mutable reference to the underlying app for custom handling.
    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }
}

fn run_event_loop(
    terminal: &mut terminal::TerminalGuard,
    app: &mut App,
) -> Result<(), GameError> {
    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }

            if handle_input(app, key.code) {
                break;
            }
        }
    }

    Ok(())
}

/// Returns true if the app should exit.
fn handle_input(app: &mut App, key: KeyCode) -> bool {
    match app.screen {
        Screen::Menu => handle_menu_input(app, key),
        Screen::NameEntry => handle_name_entry_input(app, key),
        Screen::Game => handle_game_input(app, key),
        Screen::Stats | Screen::Supporters | Screen::Info => handle_static_input(app, key),
        Screen::Missions => handle_missions_input(app, key),
    }
}

fn handle_menu_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Up | KeyCode::Char('k') => {
            app.menu_up();
            false
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.menu_down();
            false
        }
        KeyCode::Enter => app.menu_select(),
        KeyCode::Char('q') | KeyCode::Char('Q') => true,
        _ => false,
    }
}

fn handle_name_entry_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Enter => {
            app.start_session();
            false
        }
        KeyCode::Esc => {
            app.back_to_menu();
            false
        }
        KeyCode::Backspace => {
            app.name_input_pop();
            false
        }
        KeyCode::Char(c) => {
            app.name_input_push(c);
            false
        }
        _ => false,
    }
}

fn handle_game_input(app: &mut App, key: KeyCode) -> bool {
    let phase = app.session_phase().map(SessionPhase::kind);
    match phase {
        Some(PhaseKind::Presenting) => match key {
            KeyCode::Up | KeyCode::Char('k') => {
                app.option_up();
                false
            }
            KeyCode::Down | KeyCode::Char('j') => {
                app.option_down();
                false
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                app.submit_answer();
                false
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => true,
            _ => false,
        },
        Some(PhaseKind::Feedback) => match key {
            KeyCode::Enter | KeyCode::Char(' ') => {
                app.advance();
                false
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => true,
            _ => false,
        },
        Some(PhaseKind::Supporter) => match key {
            KeyCode::Enter | KeyCode::Char(' ') => {
                app.dismiss_supporter();
                false
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => true,
            _ => false,
        },
        Some(PhaseKind::Complete) => match key {
            KeyCode::Char('r') | KeyCode::Char('R') => {
                app.restart_session();
                false
            }
            KeyCode::Char('m') | KeyCode::Char('M') | KeyCode::Esc => {
                app.back_to_menu();
                false
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => true,
            _ => false,
        },
        None => {
            app.back_to_menu();
            false
        }
    }
}

fn handle_static_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Esc | KeyCode::Enter | KeyCode::Backspace => {
            app.back_to_menu();
            false
        }
        KeyCode::Char('q') | KeyCode::Char('Q') => true,
        _ => false,
    }
}

fn handle_missions_input(app: &mut App, key: KeyCode) -> bool {
    match &app.mission_view {
        MissionView::List => match key {
            KeyCode::Up | KeyCode::Char('k') => {
                app.mission_list_up();
                false
            }
            KeyCode::Down | KeyCode::Char('j') => {
                app.mission_list_down();
                false
            }
            KeyCode::Enter => {
                app.open_briefing();
                false
            }
            KeyCode::Char('s') | KeyCode::Char('S') => {
                app.open_shop();
                false
            }
            KeyCode::Esc => {
                app.back_to_menu();
                false
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => true,
            _ => false,
        },
        MissionView::Briefing => match key {
            KeyCode::Enter => {
                app.begin_mission();
                false
            }
            KeyCode::Esc => {
                app.mission_back();
                false
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => true,
            _ => false,
        },
        MissionView::Shop => match key {
            KeyCode::Up | KeyCode::Char('k') => {
                app.shop_up();
                false
            }
            KeyCode::Down | KeyCode::Char('j') => {
                app.shop_down();
                false
            }
            KeyCode::Enter => {
                app.buy_selected_item();
                false
            }
            KeyCode::Esc => {
                app.mission_back();
                false
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => true,
            _ => false,
        },
        MissionView::Scene => match key {
            KeyCode::Up | KeyCode::Char('k') => {
                app.scene_option_up();
                false
            }
            KeyCode::Down | KeyCode::Char('j') => {
                app.scene_option_down();
                false
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                app.choose_scene_option();
                false
            }
            KeyCode::Esc => {
                app.mission_back();
                false
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => true,
            _ => false,
        },
        MissionView::Debrief(_) => match key {
            KeyCode::Enter | KeyCode::Esc => {
                app.mission_back();
                false
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => true,
            _ => false,
        },
    }
}
