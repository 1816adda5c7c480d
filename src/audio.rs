//! Sound cues
//!
//! The simulation emits advisory [`GameEvent`]s; this module maps them to
//! sound effects. Playback is fire-and-forget: missing clips and muted
//! output degrade to silence and never reach game logic.

use std::path::{Path, PathBuf};

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Ball hits paddle
    Bounce,
    /// Brick destroyed
    Break,
}

impl SoundEffect {
    pub const ALL: [SoundEffect; 2] = [SoundEffect::Bounce, SoundEffect::Break];

    /// Cue for an event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::PaddleHit => Some(SoundEffect::Bounce),
            GameEvent::BrickBroken { .. } => Some(SoundEffect::Break),
            _ => None,
        }
    }

    /// Clip file name inside a sound directory
    pub fn file_name(&self) -> &'static str {
        match self {
            SoundEffect::Bounce => "bounce.wav",
            SoundEffect::Break => "break.wav",
        }
    }

    fn index(&self) -> usize {
        match self {
            SoundEffect::Bounce => 0,
            SoundEffect::Break => 1,
        }
    }
}

/// Anything that can take a sound cue without blocking
pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect);
}

/// Discards every cue
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentAudio;

impl AudioSink for SilentAudio {
    fn play(&mut self, _effect: SoundEffect) {}
}

/// Resolved clip files; a missing clip is left out
#[derive(Debug, Default, Clone)]
pub struct SoundBank {
    clips: [Option<PathBuf>; 2],
}

impl SoundBank {
    /// Look for the clips in `dir`
    pub fn load(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        let mut bank = Self::default();
        for effect in SoundEffect::ALL {
            let path = dir.join(effect.file_name());
            if path.is_file() {
                bank.clips[effect.index()] = Some(path);
            } else {
                log::warn!("Sound clip {} not found - cue disabled", path.display());
            }
        }
        bank
    }

    pub fn clip(&self, effect: SoundEffect) -> Option<&Path> {
        self.clips[effect.index()].as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.clips.iter().all(Option::is_none)
    }
}

/// Headless audio sink
///
/// Resolves each cue to its clip path, then logs and counts it. Nothing is
/// sent to an output device; a frontend that plays sound supplies its own
/// [`AudioSink`].
#[derive(Debug)]
pub struct AudioManager {
    bank: SoundBank,
    muted: bool,
    played: [u64; 2],
}

impl AudioManager {
    pub fn new(bank: SoundBank) -> Self {
        if bank.is_empty() {
            log::warn!("No sound clips loaded - audio disabled");
        }
        Self {
            bank,
            muted: false,
            played: [0; 2],
        }
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Cues actually played for `effect`
    pub fn played(&self, effect: SoundEffect) -> u64 {
        self.played[effect.index()]
    }
}

impl AudioSink for AudioManager {
    fn play(&mut self, effect: SoundEffect) {
        if self.muted {
            return;
        }
        let Some(clip) = self.bank.clip(effect) else {
            return;
        };
        log::trace!("Cue {:?} -> {}", effect, clip.display());
        self.played[effect.index()] += 1;
    }
}
