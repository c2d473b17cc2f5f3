use std::path::PathBuf;

use clap::Parser;
use log::warn;
use shadow_trials::{Game, GameConfig};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// JSON file to load the question pool from (built-in pool if omitted)
    #[arg(short, long)]
    questions: Option<PathBuf>,

    /// JSON file overriding the default game configuration
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory for save data
    #[arg(short, long, default_value = ".shadow-trials")]
    save_dir: PathBuf,
}

fn main() {
    pretty_env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => match GameConfig::from_json(path) {
            Ok(config) => config,
            Err(err) => {
                warn!("{}; using the default configuration", err);
                GameConfig::default()
            }
        },
        None => GameConfig::default(),
    };

    let game = Game::new(config, args.questions.as_deref(), &args.save_dir);
    if let Err(e) = game.run() {
        eprintln!("Error running game: {}", e);
        std::process::exit(1);
    }
}
