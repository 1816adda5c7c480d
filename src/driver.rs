//! Fixed-period game loop
//!
//! [`GameLoop`] is the single owner of the [`GameState`]. Input and retry
//! requests arrive as [`GameCommand`]s over a channel and are drained once at
//! the start of every tick, so all mutation happens on the loop's thread.

use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

use crate::audio::{AudioSink, SoundEffect};
use crate::consts::MAX_SUBSTEPS;
use crate::settings::{ConfigError, GameConfig};
use crate::sim::{GameEvent, GameState, PaddleMove, Snapshot, TickInput, TickOutcome, tick};

/// External requests into the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameCommand {
    MoveLeft,
    MoveRight,
    /// Retry button
    Reset,
}

/// Cloneable handle for feeding commands to a [`GameLoop`]
#[derive(Debug, Clone)]
pub struct CommandSender {
    tx: Sender<GameCommand>,
}

impl CommandSender {
    /// Queue a command for the next tick; false once the loop is gone
    pub fn send(&self, command: GameCommand) -> bool {
        self.tx.send(command).is_ok()
    }
}

/// Result of one loop tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickReport {
    /// Loop tick number, counting frozen ticks too
    pub tick: u64,
    pub outcome: TickOutcome,
    pub events: Vec<GameEvent>,
}

/// Frontend redraw hook, called after every tick including frozen ones
pub trait Presenter {
    fn present(&mut self, snapshot: &Snapshot, report: &TickReport);
}

/// Game instance driving the simulation
pub struct GameLoop {
    state: GameState,
    commands: Receiver<GameCommand>,
    audio: Box<dyn AudioSink>,
    tick_period: Duration,
    accumulator: Duration,
    ticks: u64,
}

impl GameLoop {
    /// Validate `config` and build a loop at level 1
    pub fn new(
        config: GameConfig,
        audio: Box<dyn AudioSink>,
    ) -> Result<(Self, CommandSender), ConfigError> {
        config.validate()?;
        let (tx, rx) = mpsc::channel();
        let tick_period = config.tick_period();
        let game = Self {
            state: GameState::new(config),
            commands: rx,
            audio,
            tick_period,
            accumulator: Duration::ZERO,
            ticks: 0,
        };
        Ok((game, CommandSender { tx }))
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.state)
    }

    pub fn tick_period(&self) -> Duration {
        self.tick_period
    }

    /// Ticks run so far
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Collect everything queued since the previous tick
    fn drain_commands(&mut self) -> TickInput {
        let mut input = TickInput::default();
        loop {
            match self.commands.try_recv() {
                Ok(GameCommand::MoveLeft) => input.paddle_moves.push(PaddleMove::Left),
                Ok(GameCommand::MoveRight) => input.paddle_moves.push(PaddleMove::Right),
                Ok(GameCommand::Reset) => input.reset = true,
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        input
    }

    /// Run exactly one tick
    pub fn step(&mut self) -> TickReport {
        let input = self.drain_commands();
        let mut events = Vec::new();
        let outcome = tick(&mut self.state, &input, &mut events);
        self.ticks += 1;

        for effect in events.iter().filter_map(SoundEffect::for_event) {
            self.audio.play(effect);
        }

        match outcome {
            TickOutcome::LevelCleared { next_level } => {
                log::info!("Advanced to level {}", next_level)
            }
            TickOutcome::GameOver => log::info!(
                "Game over on level {} with score {}",
                self.state.level,
                self.state.score
            ),
            TickOutcome::Reset => log::info!("Retry: back to level 1"),
            _ => {}
        }

        TickReport {
            tick: self.ticks,
            outcome,
            events,
        }
    }

    /// Run as many whole ticks as `elapsed` covers
    ///
    /// At most [`MAX_SUBSTEPS`] ticks run per call; a larger backlog is
    /// dropped rather than replayed.
    pub fn advance(&mut self, elapsed: Duration) -> Vec<TickReport> {
        self.accumulator += elapsed;

        let mut reports = Vec::new();
        while self.accumulator >= self.tick_period && reports.len() < MAX_SUBSTEPS as usize {
            reports.push(self.step());
            self.accumulator -= self.tick_period;
        }

        if self.accumulator >= self.tick_period {
            log::warn!("Dropping {:?} of tick backlog", self.accumulator);
            self.accumulator = Duration::ZERO;
        }

        reports
    }

    /// Real-time loop: one tick per period, presenting after each
    ///
    /// Stops after `max_ticks` ticks. Returns the number of ticks run.
    pub fn run<P: Presenter>(&mut self, presenter: &mut P, max_ticks: u64) -> u64 {
        let mut next_deadline = Instant::now() + self.tick_period;
        let mut run = 0;

        while run < max_ticks {
            let report = self.step();
            presenter.present(&self.snapshot(), &report);
            run += 1;

            let now = Instant::now();
            if next_deadline > now {
                thread::sleep(next_deadline - now);
                next_deadline += self.tick_period;
            } else {
                // Fell behind; restart the schedule from now
                next_deadline = now + self.tick_period;
            }
        }

        run
    }
}
