//! The single owning game controller.
//!
//! All mutable state lives here: configuration, RNG, data pools, the
//! durable progression record, and the active session or mission run.
//! Input handlers in `lib.rs` call the imperative entry points; every call
//! mutates state and the event loop re-renders.

use std::collections::HashMap;
use std::path::Path;

use chrono::Utc;
use log::{info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::GameConfig;
use crate::data;
use crate::missions::{
    self, ChoiceResult, Inventory, Mission, MissionRun, MissionStatus,
};
use crate::models::{PlayerProgression, Question, Supporter};
use crate::ranking::{self, RankChange, SessionOutcome};
use crate::session::{SessionPhase, TrialSession};
use crate::storage::SaveStore;

const MAX_NAME_LENGTH: usize = 16;

/// Top-level screen, mirroring the menu structure.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    Menu,
    NameEntry,
    Game,
    Stats,
    Supporters,
    Info,
    Missions,
}

/// Sub-view within the missions screen.
#[derive(Clone, Debug)]
pub enum MissionView {
    List,
    Briefing,
    Shop,
    Scene,
    Debrief(MissionDebrief),
}

/// Result of a finished mission attempt, for the debrief view.
#[derive(Clone, Debug)]
pub struct MissionDebrief {
    pub title: String,
    pub success: bool,
    /// None on replayed successes; the reward is granted only once.
    pub reward: Option<(u64, u64)>,
    pub unlocked_item: Option<String>,
    pub rank_change: Option<RankChange>,
    pub kills: u32,
    pub stealth_score: i32,
}

pub const MENU_ITEMS: [&str; 6] = [
    "Begin the Trial",
    "Missions",
    "Stats",
    "Supporters",
    "Info",
    "Quit",
];

pub struct App {
    pub screen: Screen,
    pub config: GameConfig,
    rng: StdRng,
    questions: Vec<Question>,
    supporters: Vec<Supporter>,
    store: SaveStore,

    pub progression: PlayerProgression,
    pub player_name: String,
    pub name_input: String,

    pub menu_cursor: usize,
    pub option_cursor: usize,

    pub session: Option<TrialSession>,
    pub last_outcome: Option<SessionOutcome>,

    missions: Vec<Mission>,
    pub mission_status: HashMap<String, MissionStatus>,
    pub inventory: Inventory,
    pub mission_view: MissionView,
    pub mission_cursor: usize,
    pub shop_cursor: usize,
    selected_mission_id: Option<String>,
    pub mission_run: Option<MissionRun>,
    /// Transient notice shown in the missions UI (refused choice, purchase).
    pub mission_notice: Option<String>,
}

impl App {
    pub fn new(config: GameConfig, questions_path: Option<&Path>, save_dir: &Path) -> Self {
        let store = SaveStore::new(save_dir);
        let progression = store.load_progression();
        let player_name = store
            .load_player_name()
            .unwrap_or_else(|| config.default_player_name.clone());
        let inventory = store.load_inventory();
        let mission_status = store.load_mission_status();

        Self {
            screen: Screen::Menu,
            rng: StdRng::from_entropy(),
            questions: data::load_questions(questions_path),
            supporters: data::builtin_supporters(),
            store,
            progression,
            player_name,
            name_input: String::new(),
            menu_cursor: 0,
            option_cursor: 0,
            session: None,
            last_outcome: None,
            missions: missions::builtin_missions(),
            mission_status,
            inventory,
            mission_view: MissionView::List,
            mission_cursor: 0,
            shop_cursor: 0,
            selected_mission_id: None,
            mission_run: None,
            mission_notice: None,
            config,
        }
    }

    #[cfg(test)]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn supporters(&self) -> &[Supporter] {
        &self.supporters
    }

    // ----- menu -----

    pub fn menu_up(&mut self) {
        self.menu_cursor = (self.menu_cursor + MENU_ITEMS.len() - 1) % MENU_ITEMS.len();
    }

    pub fn menu_down(&mut self) {
        self.menu_cursor = (self.menu_cursor + 1) % MENU_ITEMS.len();
    }

    /// Activate the highlighted menu item. Returns true when the app
    /// should exit.
    pub fn menu_select(&mut self) -> bool {
        match self.menu_cursor {
            0 => self.enter_name_entry(),
            1 => self.show_missions(),
            2 => self.screen = Screen::Stats,
            3 => self.screen = Screen::Supporters,
            4 => self.screen = Screen::Info,
            _ => return true,
        }
        false
    }

    pub fn back_to_menu(&mut self) {
        self.session = None;
        self.mission_run = None;
        self.mission_notice = None;
        self.mission_view = MissionView::List;
        self.screen = Screen::Menu;
    }

    // ----- name entry -----

    pub fn enter_name_entry(&mut self) {
        self.name_input = self.player_name.clone();
        self.screen = Screen::NameEntry;
    }

    pub fn name_input_push(&mut self, c: char) {
        if self.name_input.chars().count() < MAX_NAME_LENGTH {
            self.name_input.push(c);
        }
    }

    pub fn name_input_pop(&mut self) {
        self.name_input.pop();
    }

    // ----- trial session -----

    /// Start a session from the name-entry screen.
    pub fn start_session(&mut self) {
        let Some(session) = TrialSession::start(
            &self.name_input,
            &self.questions,
            &self.config,
            &mut self.rng,
        ) else {
            warn!("question pool is empty; staying on the menu");
            self.screen = Screen::Menu;
            return;
        };

        self.player_name = session.player_name.clone();
        self.store.save_player_name(&self.player_name);
        self.option_cursor = 0;
        self.last_outcome = None;
        self.session = Some(session);
        self.screen = Screen::Game;
    }

    pub fn option_up(&mut self) {
        let count = self.current_option_count();
        if count > 0 {
            self.option_cursor = (self.option_cursor + count - 1) % count;
        }
    }

    pub fn option_down(&mut self) {
        let count = self.current_option_count();
        if count > 0 {
            self.option_cursor = (self.option_cursor + 1) % count;
        }
    }

    fn current_option_count(&self) -> usize {
        self.session
            .as_ref()
            .and_then(|s| s.current_question())
            .map(|q| q.options.len())
            .unwrap_or(0)
    }

    /// Submit the highlighted option for the current trial.
    pub fn submit_answer(&mut self) {
        let Some(session) = &mut self.session else {
            return;
        };
        let Some(selected) = session
            .current_question()
            .and_then(|q| q.options.get(self.option_cursor))
            .cloned()
        else {
            return;
        };
        session.submit_answer(&selected, &mut self.rng);
    }

    /// Leave the feedback view; folds the session into progression when it
    /// completes.
    pub fn advance(&mut self) {
        let chance = self.config.supporter_chance;
        let Some(session) = &mut self.session else {
            return;
        };
        session.advance(&self.supporters, chance, &mut self.rng);
        self.option_cursor = 0;
        self.finish_if_complete();
    }

    pub fn dismiss_supporter(&mut self) {
        if let Some(session) = &mut self.session {
            session.dismiss_supporter();
        }
        self.finish_if_complete();
    }

    fn finish_if_complete(&mut self) {
        let Some(session) = &self.session else {
            return;
        };
        if !session.is_complete() || self.last_outcome.is_some() {
            return;
        }

        let outcome = ranking::apply_session(
            &mut self.progression,
            session.correct_count(),
            session.total_trials(),
            &self.config,
            Utc::now(),
        );
        if let Some(change) = &outcome.rank_change {
            info!("rank changed: {} -> {}", change.old_id, change.new_id);
        }
        self.store.save_progression(&self.progression);
        self.last_outcome = Some(outcome);
    }

    // ----- missions -----

    pub fn show_missions(&mut self) {
        self.mission_view = MissionView::List;
        self.mission_cursor = 0;
        self.mission_notice = None;
        self.screen = Screen::Missions;
    }

    pub fn available_missions(&self) -> Vec<&Mission> {
        missions::available_missions(
            &self.missions,
            &self.progression,
            &self.mission_status,
            &self.config.ranks,
        )
    }

    pub fn selected_mission(&self) -> Option<&Mission> {
        let id = self.selected_mission_id.as_deref()?;
        self.missions.iter().find(|m| m.id == id)
    }

    pub fn mission_list_up(&mut self) {
        let count = self.available_missions().len();
        if count > 0 {
            self.mission_cursor = (self.mission_cursor + count - 1) % count;
        }
    }

    pub fn mission_list_down(&mut self) {
        let count = self.available_missions().len();
        if count > 0 {
            self.mission_cursor = (self.mission_cursor + 1) % count;
        }
    }

    /// Open the briefing for the highlighted mission.
    pub fn open_briefing(&mut self) {
        let Some(id) = self
            .available_missions()
            .get(self.mission_cursor)
            .map(|mission| mission.id.clone())
        else {
            return;
        };
        self.selected_mission_id = Some(id);
        self.mission_notice = None;
        self.mission_view = MissionView::Briefing;
    }

    pub fn open_shop(&mut self) {
        self.shop_cursor = 0;
        self.mission_notice = None;
        self.mission_view = MissionView::Shop;
    }

    pub fn shop_up(&mut self) {
        let count = missions::SHOP_CATALOG.len();
        self.shop_cursor = (self.shop_cursor + count - 1) % count;
    }

    pub fn shop_down(&mut self) {
        self.shop_cursor = (self.shop_cursor + 1) % missions::SHOP_CATALOG.len();
    }

    pub fn buy_selected_item(&mut self) {
        let item = &missions::SHOP_CATALOG[self.shop_cursor];
        if missions::purchase(item, &mut self.progression, &mut self.inventory) {
            self.mission_notice = Some(format!(
                "Bought {} for {} coins.",
                missions::item_display_name(item.id),
                item.cost
            ));
            self.store.save_progression(&self.progression);
            self.store.save_inventory(&self.inventory);
        } else {
            self.mission_notice = Some(format!(
                "Not enough coins for {}.",
                missions::item_display_name(item.id)
            ));
        }
    }

    /// Begin the selected mission from its briefing.
    pub fn begin_mission(&mut self) {
        let Some(mission) = self.selected_mission().cloned() else {
            return;
        };
        self.mission_run = Some(MissionRun::start(&mission));
        self.option_cursor = 0;
        self.mission_notice = None;
        self.mission_view = MissionView::Scene;
    }

    pub fn scene_option_up(&mut self) {
        let count = self.current_scene_choice_count();
        if count > 0 {
            self.option_cursor = (self.option_cursor + count - 1) % count;
        }
    }

    pub fn scene_option_down(&mut self) {
        let count = self.current_scene_choice_count();
        if count > 0 {
            self.option_cursor = (self.option_cursor + 1) % count;
        }
    }

    fn current_scene_choice_count(&self) -> usize {
        let Some(run) = &self.mission_run else {
            return 0;
        };
        self.selected_mission()
            .and_then(|m| run.current_scene(m))
            .map(|scene| scene.choices.len())
            .unwrap_or(0)
    }

    /// Take the highlighted choice in the current scene.
    pub fn choose_scene_option(&mut self) {
        let Some(mission) = self.selected_mission().cloned() else {
            return;
        };
        let Some(run) = &mut self.mission_run else {
            return;
        };

        match run.choose(&mission, self.option_cursor, &mut self.inventory) {
            Some(ChoiceResult::Advanced) => {
                self.option_cursor = 0;
                self.mission_notice = None;
                self.store.save_inventory(&self.inventory);
            }
            Some(ChoiceResult::MissingItem(item)) => {
                self.mission_notice = Some(format!(
                    "You carry no {}.",
                    missions::item_display_name(&item)
                ));
            }
            Some(ChoiceResult::Detected) => self.end_mission(false),
            Some(ChoiceResult::Completed) => self.end_mission(true),
            None => {}
        }
    }

    fn end_mission(&mut self, success: bool) {
        let Some(mission) = self.selected_mission().cloned() else {
            return;
        };
        let Some(run) = self.mission_run.take() else {
            return;
        };

        let first_clear = success
            && self.mission_status.get(&mission.id) != Some(&MissionStatus::Completed);

        let mut reward = None;
        let mut unlocked_item = None;
        let mut rank_change = None;
        if first_clear {
            rank_change = ranking::apply_reward(
                &mut self.progression,
                mission.reward.points,
                mission.reward.coins,
                &self.config,
                Utc::now(),
            );
            reward = Some((mission.reward.points, mission.reward.coins));
            if let Some(item) = &mission.reward.unlock_item {
                self.inventory.add(item, 1);
                unlocked_item = Some(missions::item_display_name(item));
            }
        }

        // A past success is never downgraded by a failed replay.
        if success || self.mission_status.get(&mission.id) != Some(&MissionStatus::Completed) {
            let status = if success {
                MissionStatus::Completed
            } else {
                MissionStatus::Failed
            };
            self.mission_status.insert(mission.id.clone(), status);
        }

        self.store.save_progression(&self.progression);
        self.store.save_inventory(&self.inventory);
        self.store.save_mission_status(&self.mission_status);

        self.mission_view = MissionView::Debrief(MissionDebrief {
            title: mission.title.clone(),
            success,
            reward,
            unlocked_item,
            rank_change,
            kills: run.kills,
            stealth_score: run.stealth_score,
        });
    }

    /// Back out of the current mission sub-view.
    pub fn mission_back(&mut self) {
        match self.mission_view {
            MissionView::List => self.back_to_menu(),
            MissionView::Briefing | MissionView::Shop | MissionView::Debrief(_) => {
                self.mission_run = None;
                self.mission_notice = None;
                self.mission_view = MissionView::List;
            }
            // Abandoning mid-scene counts as a failure.
            MissionView::Scene => self.end_mission(false),
        }
    }

    /// Restart a fresh session from the result screen.
    pub fn restart_session(&mut self) {
        self.name_input = self.player_name.clone();
        self.start_session();
    }

    /// Current phase of the active session, if any.
    pub fn session_phase(&self) -> Option<&SessionPhase> {
        self.session.as_ref().map(|s| &s.phase)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;
    use std::path::PathBuf;

    fn fresh_dir(tag: &str) -> PathBuf {
        let dir = env::temp_dir().join(format!("shadow-trials-app-{}-{}", tag, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    fn app(tag: &str) -> App {
        App::new(GameConfig::default(), None, &fresh_dir(tag)).with_seed(7)
    }

    fn answer_current(app: &mut App, correctly: bool) {
        let session = app.session.as_ref().unwrap();
        let question = session.current_question().unwrap().clone();
        let index = question
            .options
            .iter()
            .position(|o| question.is_correct(o) == correctly)
            .expect("option with requested correctness");
        app.option_cursor = index;
        app.submit_answer();
    }

    fn play_session(app: &mut App, correct_answers: usize) {
        app.name_input = "Rin".to_string();
        app.start_session();
        let total = app.session.as_ref().unwrap().total_trials();
        for i in 0..total {
            answer_current(app, i < correct_answers);
            app.advance();
            while matches!(app.session_phase(), Some(SessionPhase::Supporter { .. })) {
                app.dismiss_supporter();
            }
        }
    }

    #[test]
    fn completed_session_updates_and_persists_progression() {
        let dir = fresh_dir("session");
        let mut app = App::new(GameConfig::default(), None, &dir).with_seed(7);
        play_session(&mut app, 5);

        let outcome = app.last_outcome.clone().expect("session outcome");
        assert!(outcome.reward.perfect);
        assert_eq!(outcome.reward.points, 1000);
        assert_eq!(app.progression.total_score, 1000);
        assert_eq!(app.progression.sessions_completed, 1);

        // A second controller over the same save dir sees the saved state.
        let reloaded = App::new(GameConfig::default(), None, &dir);
        assert_eq!(reloaded.progression.total_score, 1000);
        assert_eq!(reloaded.player_name, "Rin");
    }

    #[test]
    fn outcome_is_applied_exactly_once() {
        let mut app = app("once");
        play_session(&mut app, 2);
        let score = app.progression.total_score;

        // Redundant advance calls on the completed session change nothing.
        app.advance();
        app.advance();
        assert_eq!(app.progression.total_score, score);
        assert_eq!(app.progression.sessions_completed, 1);
    }

    #[test]
    fn empty_name_starts_with_default() {
        let mut app = app("default-name");
        app.name_input = "   ".to_string();
        app.start_session();
        assert_eq!(
            app.session.as_ref().unwrap().player_name,
            GameConfig::default().default_player_name
        );
    }

    #[test]
    fn mission_completion_rewards_only_first_clear() {
        let mut app = app("mission");
        app.show_missions();
        app.open_briefing();
        app.begin_mission();

        // Pure stealth route through the first mission.
        for _ in 0..3 {
            app.option_cursor = 0;
            app.choose_scene_option();
        }

        let MissionView::Debrief(debrief) = &app.mission_view else {
            panic!("expected debrief");
        };
        assert!(debrief.success);
        assert_eq!(debrief.reward, Some((150, 40)));
        assert_eq!(app.progression.total_score, 150);
        assert_eq!(app.progression.coins, 40);
        assert_eq!(
            app.mission_status.get("rooftop_scrolls"),
            Some(&MissionStatus::Completed)
        );

        // Replay the same mission; no second reward.
        app.mission_back();
        app.open_briefing();
        app.begin_mission();
        for _ in 0..3 {
            app.option_cursor = 0;
            app.choose_scene_option();
        }
        let MissionView::Debrief(debrief) = &app.mission_view else {
            panic!("expected debrief");
        };
        assert!(debrief.success);
        assert_eq!(debrief.reward, None);
        assert_eq!(app.progression.total_score, 150);
    }

    #[test]
    fn failed_replay_keeps_completed_status() {
        let mut app = app("replay-fail");
        app.show_missions();
        app.open_briefing();
        app.begin_mission();
        for _ in 0..3 {
            app.option_cursor = 0;
            app.choose_scene_option();
        }
        app.mission_back();

        app.open_briefing();
        app.begin_mission();
        app.option_cursor = 2;
        app.choose_scene_option();

        let MissionView::Debrief(debrief) = &app.mission_view else {
            panic!("expected debrief");
        };
        assert!(!debrief.success);
        assert_eq!(
            app.mission_status.get("rooftop_scrolls"),
            Some(&MissionStatus::Completed)
        );
    }

    #[test]
    fn shop_purchase_persists_coins_and_inventory() {
        let mut app = app("shop");
        app.progression.coins = 100;
        app.show_missions();
        app.open_shop();
        app.shop_cursor = 1; // shuriken, 10 coins
        let before = app.inventory.count("shuriken");
        app.buy_selected_item();

        assert_eq!(app.progression.coins, 90);
        assert_eq!(app.inventory.count("shuriken"), before + 1);
        assert!(app.mission_notice.as_deref().unwrap().starts_with("Bought"));
    }
}
