//! Lane Runner entry point
//!
//! Runs a seeded headless session driven by the autopilot and records the
//! high score. A windowed front end drives the same `Game` API with real
//! key events and frame deltas.

use std::path::PathBuf;

use clap::Parser;

use lane_runner::audio::DEFAULT_MUSIC_TRACK;
use lane_runner::autopilot::Autopilot;
use lane_runner::consts::{HIGHSCORE_FILE, SIM_DT, WINDOW_TITLE};
use lane_runner::platform::TimedInput;
use lane_runner::renderer::{NoSprites, Renderer};
use lane_runner::sim::{GameEvent, GamePhase};
use lane_runner::{Game, HighScores, Settings, Tuning};

#[derive(Parser)]
#[command(name = "lane-runner")]
#[command(about = "Play a headless three-lane runner session with a simple autopilot")]
struct Args {
    /// RNG seed for the session
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// Simulated seconds to run before stopping
    #[arg(long, default_value_t = 60.0)]
    seconds: f32,

    /// High score file
    #[arg(long, default_value = HIGHSCORE_FILE)]
    highscore_file: PathBuf,

    /// Optional JSON balance overrides
    #[arg(long)]
    tuning: Option<PathBuf>,

    /// Optional JSON display/audio settings
    #[arg(long)]
    settings: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    anyhow::ensure!(
        args.seconds.is_finite() && args.seconds > 0.0,
        "--seconds must be a positive number, got {}",
        args.seconds
    );

    log::info!("{WINDOW_TITLE} (headless) starting with seed {}", args.seed);

    let tuning = args.tuning.as_deref().map(Tuning::load).unwrap_or_default();
    let settings = args.settings.as_deref().map(Settings::load).unwrap_or_default();
    let high_scores = HighScores::from_file(&args.highscore_file);

    let mut game = Game::new(args.seed, tuning, high_scores, settings);
    if let Some(path) = &args.settings {
        game = game.with_settings_path(path);
    }
    game.start_music(DEFAULT_MUSIC_TRACK);

    let mut pilot = Autopilot;
    let total_steps = (args.seconds / SIM_DT).ceil() as u64;
    let mut kills = 0u32;
    let mut pickups = 0u32;

    for _ in 0..total_steps {
        for event in pilot.decide(&game.state) {
            game.handle(TimedInput::new(event, game.state.elapsed));
        }
        for event in game.step() {
            match event {
                GameEvent::EnemyDestroyed { .. } => kills += 1,
                GameEvent::PickupCollected { .. } => pickups += 1,
                GameEvent::LevelUp { level } => log::info!("Reached speed level {level}"),
                _ => {}
            }
        }
        if game.phase() == GamePhase::GameOver || !game.is_running() {
            break;
        }
    }

    let mut renderer = Renderer::new(NoSprites);
    let frame = game.draw(&mut renderer);
    log::debug!("Final frame: {} draw commands", frame.len());

    let score = game.state.player.score;
    let crashed = game.phase() == GamePhase::GameOver;
    if !crashed {
        // A surviving run still counts toward the record
        game.high_scores.submit(score);
    }

    let state = &game.state;
    let outcome = if crashed { "crashed" } else { "survived" };
    println!(
        "{outcome} after {:.1}s: score {score} (best {}), speed level {}, {kills} kills, {pickups} pickups",
        state.elapsed,
        game.high_scores.best(),
        state.speed_level(),
    );
    log::info!("High score file: {}", args.highscore_file.display());

    Ok(())
}
