//! Brick Breaker entry point
//!
//! Headless native runner: loads the config, drives the game loop on its
//! fixed tick with the autopilot at the paddle, and logs the run.

use std::cell::RefCell;
use std::error::Error;
use std::path::PathBuf;
use std::rc::Rc;

use brick_breaker::audio::{AudioManager, AudioSink, SoundBank, SoundEffect};
use brick_breaker::autopilot::Autopilot;
use brick_breaker::sim::{GameEvent, Snapshot, TickOutcome};
use brick_breaker::{CommandSender, GameConfig, GameLoop, Presenter, TickReport};

const USAGE: &str = "usage: brick-breaker [--config PATH] [--ticks N] [--seed N] \
                     [--sounds DIR] [--mute] [--realtime] [--snapshot]";

#[derive(Debug)]
struct Args {
    config: Option<PathBuf>,
    ticks: u64,
    seed: u64,
    sounds: PathBuf,
    mute: bool,
    realtime: bool,
    snapshot: bool,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            config: None,
            ticks: 6000,
            seed: 1,
            sounds: PathBuf::from("."),
            mute: false,
            realtime: false,
            snapshot: false,
        }
    }
}

fn parse_args(mut argv: impl Iterator<Item = String>) -> Result<Args, String> {
    let mut args = Args::default();
    while let Some(flag) = argv.next() {
        let mut value = |name: &str| argv.next().ok_or_else(|| format!("{} needs a value", name));
        match flag.as_str() {
            "--config" => args.config = Some(PathBuf::from(value("--config")?)),
            "--ticks" => {
                args.ticks = value("--ticks")?
                    .parse()
                    .map_err(|e| format!("--ticks: {}", e))?
            }
            "--seed" => {
                args.seed = value("--seed")?
                    .parse()
                    .map_err(|e| format!("--seed: {}", e))?
            }
            "--sounds" => args.sounds = PathBuf::from(value("--sounds")?),
            "--mute" => args.mute = true,
            "--realtime" => args.realtime = true,
            "--snapshot" => args.snapshot = true,
            "-h" | "--help" => return Err(USAGE.to_string()),
            other => return Err(format!("unknown argument {}\n{}", other, USAGE)),
        }
    }
    Ok(args)
}

/// Run statistics gathered from tick reports
#[derive(Debug, Default)]
struct RunStats {
    bricks: u64,
    paddle_hits: u64,
    lives_lost: u64,
    levels_cleared: u64,
    games_over: u64,
    games_won: u64,
    best_score: u32,
}

impl RunStats {
    fn record(&mut self, report: &TickReport, snapshot: &Snapshot) {
        for event in &report.events {
            match event {
                GameEvent::BrickBroken { .. } => self.bricks += 1,
                GameEvent::PaddleHit => self.paddle_hits += 1,
                GameEvent::LifeLost { .. } => self.lives_lost += 1,
                GameEvent::GameWon => self.games_won += 1,
                _ => {}
            }
        }
        match report.outcome {
            TickOutcome::LevelCleared { .. } => self.levels_cleared += 1,
            TickOutcome::GameOver => self.games_over += 1,
            _ => {}
        }
        self.best_score = self.best_score.max(snapshot.score);
    }
}

/// Feeds autopilot commands back into the loop after every frame
struct DemoPresenter {
    pilot: Autopilot,
    commands: CommandSender,
    stats: RunStats,
}

impl Presenter for DemoPresenter {
    fn present(&mut self, snapshot: &Snapshot, report: &TickReport) {
        self.stats.record(report, snapshot);
        if report.outcome == TickOutcome::GameOver {
            log::info!("{}", snapshot.hud_lines().join(" | "));
        }
        if let Some(command) = self.pilot.decide(snapshot) {
            if !self.commands.send(command) {
                log::warn!("Game loop closed, dropping {:?}", command);
            }
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Brick Breaker (headless) starting...");

    let args = parse_args(std::env::args().skip(1))?;

    let config = match &args.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    log::info!(
        "Screen {}x{}, grid {}x{}, {} lives, tick {:?}",
        config.screen_width,
        config.screen_height,
        config.grid_rows,
        config.grid_cols,
        config.max_lives,
        config.tick_period()
    );

    let mut audio = AudioManager::new(SoundBank::load(&args.sounds));
    audio.set_muted(args.mute);
    let audio = SharedAudio::new(audio);

    let paddle_speed = config.paddle_speed;
    let (mut game, commands) = GameLoop::new(config, Box::new(audio.clone()))?;
    let mut presenter = DemoPresenter {
        pilot: Autopilot::new(args.seed, paddle_speed),
        commands,
        stats: RunStats::default(),
    };

    let ticks = if args.realtime {
        game.run(&mut presenter, args.ticks)
    } else {
        for _ in 0..args.ticks {
            let report = game.step();
            presenter.present(&game.snapshot(), &report);
        }
        args.ticks
    };

    let stats = &presenter.stats;
    log::info!(
        "Ran {} ticks: {} bricks, {} paddle hits, {} lives lost, {} levels cleared, {} games over ({} won), best score {}",
        ticks,
        stats.bricks,
        stats.paddle_hits,
        stats.lives_lost,
        stats.levels_cleared,
        stats.games_over,
        stats.games_won,
        stats.best_score
    );
    log::info!(
        "Audio cues: {} bounce, {} break",
        audio.played(SoundEffect::Bounce),
        audio.played(SoundEffect::Break)
    );

    if args.snapshot {
        println!("{}", serde_json::to_string_pretty(&game.snapshot())?);
    }

    Ok(())
}

/// Audio handle shared between the loop and the final summary
#[derive(Clone)]
struct SharedAudio(Rc<RefCell<AudioManager>>);

impl SharedAudio {
    fn new(audio: AudioManager) -> Self {
        Self(Rc::new(RefCell::new(audio)))
    }

    fn played(&self, effect: SoundEffect) -> u64 {
        self.0.borrow().played(effect)
    }
}

impl AudioSink for SharedAudio {
    fn play(&mut self, effect: SoundEffect) {
        self.0.borrow_mut().play(effect);
    }
}
