//! Sound cues and the playback interface
//!
//! The simulation only names which cue should play; the host decides how.

use serde::{Deserialize, Serialize};

/// Sound cue types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundCue {
    /// Ball lands on a tile and hops again
    Jump,
    /// Gem collected
    Gem,
    /// Ball fell through the floor
    GameOver,
}

impl SoundCue {
    pub fn as_str(&self) -> &'static str {
        match self {
            SoundCue::Jump => "jump",
            SoundCue::Gem => "gem",
            SoundCue::GameOver => "game_over",
        }
    }
}

/// Anything that can play a sound cue
pub trait SoundSink {
    fn play(&mut self, cue: SoundCue);
}

/// Discards every cue
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSound;

impl SoundSink for NullSound {
    fn play(&mut self, _cue: SoundCue) {}
}

/// Logs cues instead of playing them (headless hosts)
#[derive(Debug, Default, Clone)]
pub struct LogSound {
    played: u64,
}

impl LogSound {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cues requested so far
    pub fn played(&self) -> u64 {
        self.played
    }
}

impl SoundSink for LogSound {
    fn play(&mut self, cue: SoundCue) {
        self.played += 1;
        log::debug!("sound: {}", cue.as_str());
    }
}
