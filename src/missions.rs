//! Branching stealth missions with an inventory and shop.
//!
//! A mission is a chain of scenes; each choice either moves to another
//! scene, completes the mission, or gets the player detected. Detection is
//! terminal: the run is failed and no further choices are accepted. Item
//! gated choices consume from the persistent inventory.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::{PlayerProgression, RankTier};
use crate::ranking::tier_index;

/// Terminal outcome recorded for a mission; absence means never attempted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissionStatus {
    Completed,
    Failed,
}

pub fn status_label(status: Option<MissionStatus>) -> &'static str {
    match status {
        None => "NEW",
        Some(MissionStatus::Completed) => "COMPLETED",
        Some(MissionStatus::Failed) => "FAILED",
    }
}

#[derive(Clone, Debug)]
pub struct MissionReward {
    pub coins: u64,
    pub points: u64,
    pub unlock_item: Option<String>,
}

/// What picking a scene choice leads to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SceneOutcome {
    Goto(String),
    Detected,
    Complete,
}

#[derive(Clone, Debug)]
pub struct SceneChoice {
    pub label: String,
    /// Item consumed when this choice is taken; without it the choice is
    /// refused, not hidden.
    pub requires_item: Option<String>,
    pub stealth: i32,
    pub kill: bool,
    pub outcome: SceneOutcome,
}

#[derive(Clone, Debug)]
pub struct Scene {
    pub id: String,
    pub text: String,
    pub choices: Vec<SceneChoice>,
}

#[derive(Clone, Debug)]
pub struct Mission {
    pub id: String,
    pub title: String,
    pub description: String,
    pub difficulty: String,
    pub required_rank: String,
    pub min_coins: Option<u64>,
    pub prerequisites: Vec<String>,
    pub reward: MissionReward,
    pub scenes: Vec<Scene>,
}

impl Mission {
    pub fn scene(&self, id: &str) -> Option<&Scene> {
        self.scenes.iter().find(|scene| scene.id == id)
    }

    pub fn opening_scene(&self) -> Option<&Scene> {
        self.scenes.first()
    }
}

/// Gate check: rank order, coin balance, and completed prerequisites.
/// Already-attempted missions stay available for replay.
pub fn requirements_met(
    mission: &Mission,
    progression: &PlayerProgression,
    status: &HashMap<String, MissionStatus>,
    ranks: &[RankTier],
) -> bool {
    if status.contains_key(&mission.id) {
        return true;
    }
    if tier_index(&mission.required_rank, ranks) > tier_index(&progression.rank_id, ranks) {
        return false;
    }
    if let Some(min_coins) = mission.min_coins {
        if progression.coins < min_coins {
            return false;
        }
    }
    mission
        .prerequisites
        .iter()
        .all(|prereq| status.get(prereq) == Some(&MissionStatus::Completed))
}

pub fn available_missions<'a>(
    missions: &'a [Mission],
    progression: &PlayerProgression,
    status: &HashMap<String, MissionStatus>,
    ranks: &[RankTier],
) -> Vec<&'a Mission> {
    missions
        .iter()
        .filter(|mission| requirements_met(mission, progression, status, ranks))
        .collect()
}

/// Consumable item counts, persisted with the rest of the save data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inventory {
    items: HashMap<String, u32>,
}

impl Inventory {
    /// The kit every new save starts with.
    pub fn starting_kit() -> Self {
        let mut items = HashMap::new();
        items.insert("smoke_bomb".to_string(), 3);
        items.insert("shuriken".to_string(), 10);
        items.insert("grappling_hook".to_string(), 1);
        items.insert("firecracker".to_string(), 5);
        items.insert("sleeping_dart".to_string(), 2);
        items.insert("poison_rice".to_string(), 3);
        items.insert("medicinal_herb".to_string(), 2);
        Self { items }
    }

    pub fn count(&self, item: &str) -> u32 {
        self.items.get(item).copied().unwrap_or(0)
    }

    /// Decrement an item, refusing at zero.
    pub fn consume(&mut self, item: &str) -> bool {
        match self.items.get_mut(item) {
            Some(count) if *count > 0 => {
                *count -= 1;
                true
            }
            _ => false,
        }
    }

    pub fn add(&mut self, item: &str, amount: u32) {
        *self.items.entry(item.to_string()).or_insert(0) += amount;
    }

    /// Item ids with a non-zero count, sorted for stable display.
    pub fn stocked(&self) -> Vec<(&str, u32)> {
        let mut stocked: Vec<(&str, u32)> = self
            .items
            .iter()
            .filter(|(_, count)| **count > 0)
            .map(|(id, count)| (id.as_str(), *count))
            .collect();
        stocked.sort();
        stocked
    }
}

/// "smoke_bomb" -> "Smoke Bomb".
pub fn item_display_name(id: &str) -> String {
    id.split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub struct ShopItem {
    pub id: &'static str,
    pub cost: u64,
}

/// Fixed coin prices for the ninja tool shop.
pub const SHOP_CATALOG: [ShopItem; 7] = [
    ShopItem { id: "smoke_bomb", cost: 30 },
    ShopItem { id: "shuriken", cost: 10 },
    ShopItem { id: "grappling_hook", cost: 80 },
    ShopItem { id: "firecracker", cost: 15 },
    ShopItem { id: "sleeping_dart", cost: 40 },
    ShopItem { id: "poison_rice", cost: 25 },
    ShopItem { id: "medicinal_herb", cost: 20 },
];

/// Buy one unit if the balance allows it.
pub fn purchase(
    item: &ShopItem,
    progression: &mut PlayerProgression,
    inventory: &mut Inventory,
) -> bool {
    if progression.coins < item.cost {
        return false;
    }
    progression.coins -= item.cost;
    inventory.add(item.id, 1);
    true
}

/// Result of taking a scene choice.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChoiceResult {
    Advanced,
    /// The choice needed an item the inventory does not hold.
    MissingItem(String),
    Detected,
    Completed,
}

/// Live state of one mission attempt.
#[derive(Clone, Debug)]
pub struct MissionRun {
    pub mission_id: String,
    scene_id: String,
    pub spotted: bool,
    pub finished: bool,
    pub kills: u32,
    pub stealth_score: i32,
    pub items_used: HashMap<String, u32>,
}

impl MissionRun {
    pub fn start(mission: &Mission) -> Self {
        let scene_id = mission
            .opening_scene()
            .map(|scene| scene.id.clone())
            .unwrap_or_default();
        Self {
            mission_id: mission.id.clone(),
            scene_id,
            spotted: false,
            finished: false,
            kills: 0,
            stealth_score: 0,
            items_used: HashMap::new(),
        }
    }

    pub fn current_scene<'a>(&self, mission: &'a Mission) -> Option<&'a Scene> {
        mission.scene(&self.scene_id)
    }

    pub fn is_over(&self) -> bool {
        self.spotted || self.finished
    }

    /// Take the choice at `index` in the current scene.
    ///
    /// Returns `None` when the run is already over or the index is stale;
    /// the caller treats that as a no-op.
    pub fn choose(
        &mut self,
        mission: &Mission,
        index: usize,
        inventory: &mut Inventory,
    ) -> Option<ChoiceResult> {
        if self.is_over() {
            return None;
        }
        let scene = self.current_scene(mission)?;
        let choice = scene.choices.get(index)?.clone();

        if let Some(item) = &choice.requires_item {
            if !inventory.consume(item) {
                return Some(ChoiceResult::MissingItem(item.clone()));
            }
            *self.items_used.entry(item.clone()).or_insert(0) += 1;
        }

        self.stealth_score += choice.stealth;
        if choice.kill {
            self.kills += 1;
        }

        match choice.outcome {
            SceneOutcome::Goto(next) => {
                self.scene_id = next;
                Some(ChoiceResult::Advanced)
            }
            SceneOutcome::Detected => {
                self.spotted = true;
                Some(ChoiceResult::Detected)
            }
            SceneOutcome::Complete => {
                self.finished = true;
                Some(ChoiceResult::Completed)
            }
        }
    }
}

fn choice(label: &str, outcome: SceneOutcome) -> SceneChoice {
    SceneChoice {
        label: label.to_string(),
        requires_item: None,
        stealth: 0,
        kill: false,
        outcome,
    }
}

fn stealth_choice(label: &str, stealth: i32, outcome: SceneOutcome) -> SceneChoice {
    SceneChoice {
        stealth,
        ..choice(label, outcome)
    }
}

fn item_choice(label: &str, item: &str, stealth: i32, outcome: SceneOutcome) -> SceneChoice {
    SceneChoice {
        requires_item: Some(item.to_string()),
        stealth,
        ..choice(label, outcome)
    }
}

fn goto(id: &str) -> SceneOutcome {
    SceneOutcome::Goto(id.to_string())
}

fn scene(id: &str, text: &str, choices: Vec<SceneChoice>) -> Scene {
    Scene {
        id: id.to_string(),
        text: text.to_string(),
        choices,
    }
}

/// The built-in mission set.
pub fn builtin_missions() -> Vec<Mission> {
    vec![
        Mission {
            id: "rooftop_scrolls".to_string(),
            title: "The Stolen Scrolls".to_string(),
            description: "A corrupt magistrate hoards the clan's training scrolls \
                          in his walled archive. Recover them before dawn."
                .to_string(),
            difficulty: "easy".to_string(),
            required_rank: "apprentice".to_string(),
            min_coins: None,
            prerequisites: Vec::new(),
            reward: MissionReward {
                coins: 40,
                points: 150,
                unlock_item: Some("sleeping_dart".to_string()),
            },
            scenes: vec![
                scene(
                    "approach",
                    "A single guard paces before the archive gate, lantern in hand. \
                     The wall to the east lies in deep shadow.",
                    vec![
                        stealth_choice("Scale the shadowed wall", 2, goto("courtyard")),
                        item_choice(
                            "Toss a firecracker beyond the gate and slip past",
                            "firecracker",
                            1,
                            goto("courtyard"),
                        ),
                        choice("Walk through the gate with your head down", SceneOutcome::Detected),
                    ],
                ),
                scene(
                    "courtyard",
                    "Two sentries cross the courtyard in overlapping patrols. \
                     A well sits between you and the archive door.",
                    vec![
                        stealth_choice("Wait for the patrol gap, then cross", 2, goto("archive")),
                        item_choice(
                            "Put the near sentry to sleep with a dart",
                            "sleeping_dart",
                            1,
                            goto("archive"),
                        ),
                        choice("Sprint across the open ground", SceneOutcome::Detected),
                    ],
                ),
                scene(
                    "archive",
                    "The scrolls rest in a lacquered chest. An archivist dozes at \
                     his desk, brush still in hand.",
                    vec![
                        stealth_choice(
                            "Lift the scrolls and leave the way you came",
                            2,
                            SceneOutcome::Complete,
                        ),
                        SceneChoice {
                            label: "Silence the archivist first".to_string(),
                            requires_item: None,
                            stealth: -1,
                            kill: true,
                            outcome: SceneOutcome::Complete,
                        },
                        choice("Light a lamp to search the shelves", SceneOutcome::Detected),
                    ],
                ),
            ],
        },
        Mission {
            id: "garden_infiltration".to_string(),
            title: "Whispers in the Garden".to_string(),
            description: "An envoy plots against Lord Gohda in his moonlit garden \
                          teahouse. Overhear the plot and withdraw unseen."
                .to_string(),
            difficulty: "medium".to_string(),
            required_rank: "shinobi".to_string(),
            min_coins: Some(50),
            prerequisites: vec!["rooftop_scrolls".to_string()],
            reward: MissionReward {
                coins: 120,
                points: 400,
                unlock_item: Some("poison_rice".to_string()),
            },
            scenes: vec![
                scene(
                    "outer_wall",
                    "The garden wall is sheer and topped with iron spikes. Archers \
                     watch the road from a corner tower.",
                    vec![
                        item_choice(
                            "Grapple to the tower's blind side",
                            "grappling_hook",
                            2,
                            goto("bridge"),
                        ),
                        stealth_choice("Follow the stream under the wall", 1, goto("bridge")),
                        choice("Climb the spiked wall by hand", SceneOutcome::Detected),
                    ],
                ),
                scene(
                    "bridge",
                    "A wooden bridge arcs over the koi pond. A servant crosses with \
                     tea; the boards creak under every step.",
                    vec![
                        stealth_choice(
                            "Hang beneath the bridge until the servant passes",
                            2,
                            goto("teahouse"),
                        ),
                        item_choice(
                            "Burst a smoke bomb and cross in the haze",
                            "smoke_bomb",
                            0,
                            goto("teahouse"),
                        ),
                        choice("Cross behind the servant, step for step", SceneOutcome::Detected),
                    ],
                ),
                scene(
                    "teahouse",
                    "Voices drift through the paper wall. The envoy names his \
                     conspirators one by one. A floorboard shifts beneath you.",
                    vec![
                        stealth_choice(
                            "Memorize the names and melt into the garden",
                            3,
                            SceneOutcome::Complete,
                        ),
                        choice("Lean closer to catch the last name", SceneOutcome::Detected),
                    ],
                ),
            ],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranks() -> Vec<RankTier> {
        crate::config::GameConfig::default().ranks
    }

    fn apprentice() -> PlayerProgression {
        PlayerProgression::default()
    }

    fn shinobi_with_coins(coins: u64) -> PlayerProgression {
        PlayerProgression {
            rank_id: "shinobi".to_string(),
            coins,
            ..Default::default()
        }
    }

    fn mission(id: &str) -> Mission {
        builtin_missions()
            .into_iter()
            .find(|m| m.id == id)
            .expect("builtin mission")
    }

    #[test]
    fn scene_links_all_resolve() {
        for mission in builtin_missions() {
            assert!(mission.opening_scene().is_some(), "{}", mission.id);
            for scene in &mission.scenes {
                for choice in &scene.choices {
                    if let SceneOutcome::Goto(next) = &choice.outcome {
                        assert!(
                            mission.scene(next).is_some(),
                            "dangling scene link {} in {}",
                            next,
                            mission.id
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn rank_gate_blocks_low_rank() {
        let status = HashMap::new();
        let garden = mission("garden_infiltration");
        assert!(!requirements_met(&garden, &apprentice(), &status, &ranks()));

        let pool = builtin_missions();
        let available = available_missions(&pool, &apprentice(), &status, &ranks());
        assert_eq!(available.len(), 1);
        assert_eq!(available[0].id, "rooftop_scrolls");
    }

    #[test]
    fn coin_and_prerequisite_gates_apply() {
        let garden = mission("garden_infiltration");
        let mut status = HashMap::new();

        // Rank and coins fine, prerequisite missing.
        assert!(!requirements_met(&garden, &shinobi_with_coins(100), &status, &ranks()));

        status.insert("rooftop_scrolls".to_string(), MissionStatus::Completed);
        assert!(requirements_met(&garden, &shinobi_with_coins(100), &status, &ranks()));

        // Prerequisite met but purse too light.
        assert!(!requirements_met(&garden, &shinobi_with_coins(10), &status, &ranks()));
    }

    #[test]
    fn attempted_missions_stay_listed_for_replay() {
        let garden = mission("garden_infiltration");
        let mut status = HashMap::new();
        status.insert("garden_infiltration".to_string(), MissionStatus::Failed);
        assert!(requirements_met(&garden, &apprentice(), &status, &ranks()));
    }

    #[test]
    fn stealth_path_completes_the_mission() {
        let mission = mission("rooftop_scrolls");
        let mut inventory = Inventory::starting_kit();
        let mut run = MissionRun::start(&mission);

        assert_eq!(run.choose(&mission, 0, &mut inventory), Some(ChoiceResult::Advanced));
        assert_eq!(run.choose(&mission, 0, &mut inventory), Some(ChoiceResult::Advanced));
        assert_eq!(run.choose(&mission, 0, &mut inventory), Some(ChoiceResult::Completed));
        assert!(run.finished);
        assert!(!run.spotted);
        assert_eq!(run.stealth_score, 6);
        assert_eq!(run.kills, 0);
    }

    #[test]
    fn detection_is_terminal() {
        let mission = mission("rooftop_scrolls");
        let mut inventory = Inventory::starting_kit();
        let mut run = MissionRun::start(&mission);

        assert_eq!(run.choose(&mission, 2, &mut inventory), Some(ChoiceResult::Detected));
        assert!(run.spotted);
        assert!(run.is_over());
        assert_eq!(run.choose(&mission, 0, &mut inventory), None);
    }

    #[test]
    fn item_choice_consumes_from_inventory() {
        let mission = mission("rooftop_scrolls");
        let mut inventory = Inventory::starting_kit();
        let before = inventory.count("firecracker");
        let mut run = MissionRun::start(&mission);

        assert_eq!(run.choose(&mission, 1, &mut inventory), Some(ChoiceResult::Advanced));
        assert_eq!(inventory.count("firecracker"), before - 1);
        assert_eq!(run.items_used.get("firecracker"), Some(&1));
    }

    #[test]
    fn missing_item_refuses_without_advancing() {
        let mission = mission("garden_infiltration");
        let mut inventory = Inventory::starting_kit();
        while inventory.consume("grappling_hook") {}
        let mut run = MissionRun::start(&mission);

        assert_eq!(
            run.choose(&mission, 0, &mut inventory),
            Some(ChoiceResult::MissingItem("grappling_hook".to_string()))
        );
        assert_eq!(
            run.current_scene(&mission).map(|s| s.id.as_str()),
            Some("outer_wall")
        );
        assert!(!run.is_over());
    }

    #[test]
    fn consume_refuses_at_zero() {
        let mut inventory = Inventory::starting_kit();
        assert_eq!(inventory.count("grappling_hook"), 1);
        assert!(inventory.consume("grappling_hook"));
        assert!(!inventory.consume("grappling_hook"));
        assert!(!inventory.consume("no_such_item"));
    }

    #[test]
    fn purchase_checks_the_balance() {
        let mut progression = PlayerProgression {
            coins: 35,
            ..Default::default()
        };
        let mut inventory = Inventory::starting_kit();
        let smoke = &SHOP_CATALOG[0];
        assert_eq!(smoke.id, "smoke_bomb");

        assert!(purchase(smoke, &mut progression, &mut inventory));
        assert_eq!(progression.coins, 5);
        assert_eq!(inventory.count("smoke_bomb"), 4);

        assert!(!purchase(smoke, &mut progression, &mut inventory));
        assert_eq!(progression.coins, 5);
        assert_eq!(inventory.count("smoke_bomb"), 4);
    }

    #[test]
    fn item_names_are_humanized() {
        assert_eq!(item_display_name("smoke_bomb"), "Smoke Bomb");
        assert_eq!(item_display_name("shuriken"), "Shuriken");
    }
}
