//! HUD interface
//!
//! The controller pushes score and gem totals; the host renders them.

use crate::consts::SCORE_SENTINEL;

/// Callbacks the controller makes into the game's UI layer
pub trait GameUi {
    fn on_game_started(&mut self);
    fn on_game_over(&mut self);
    fn on_score_changed(&mut self, score: i32);
    fn on_gems_changed(&mut self, total: i64);
}

/// Logs UI updates (headless hosts)
#[derive(Debug, Clone)]
pub struct LogUi {
    pub score: i32,
    pub gems: i64,
}

impl Default for LogUi {
    fn default() -> Self {
        Self {
            score: SCORE_SENTINEL,
            gems: 0,
        }
    }
}

impl GameUi for LogUi {
    fn on_game_started(&mut self) {
        log::info!("HUD: game started");
    }

    fn on_game_over(&mut self) {
        log::info!("HUD: game over (score {})", self.score);
    }

    fn on_score_changed(&mut self, score: i32) {
        self.score = score;
        log::debug!("HUD: score {}", score);
    }

    fn on_gems_changed(&mut self, total: i64) {
        self.gems = total;
        log::debug!("HUD: gems {}", total);
    }
}
