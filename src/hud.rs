use crate::character::Character;
use crate::constants::*;
use crate::types::{Rect, Vector2D};

#[derive(Clone, Debug, PartialEq)]
pub struct HpBar {
    pub width: f64,
    pub ratio: f64,
    pub position: Vector2D, // World center of the bar
}

impl HpBar {
    pub fn new(width: f64) -> Self {
        HpBar { width, ratio: 1.0, position: Vector2D::ZERO }
    }

    pub fn for_character(owner: &Character) -> Self {
        let mut bar = HpBar::new(owner.width);
        bar.track(owner);
        bar
    }

    /// Re-reads the owner's health and position. Returns `false` once the
    /// owner is down and the bar should go away.
    pub fn track(&mut self, owner: &Character) -> bool {
        if owner.hp <= 0 {
            self.ratio = 0.0;
            return false;
        }
        self.ratio = (owner.hp as f64 / owner.max_hp as f64).clamp(0.0, 1.0);
        self.position = Vector2D::new(
            owner.position.x,
            owner.position.y - owner.height / 2.0 - HP_BAR_GAP - HP_BAR_HEIGHT / 2.0,
        );
        true
    }

    pub fn rect(&self) -> Rect {
        Rect::centered(self.position, self.width, HP_BAR_HEIGHT)
    }
}

pub fn score_text(score: u32) -> String {
    format!("Score: {}", score)
}

pub fn seconds_left(elapsed: f64) -> u32 {
    (SURVIVAL_GOAL_SECS - elapsed).floor().max(0.0) as u32
}

pub fn countdown_text(elapsed: f64) -> String {
    format!("Time: {}", seconds_left(elapsed))
}

pub const GAME_OVER_BANNER: &str = "Game Over";
pub const GAME_CLEAR_BANNER: &str = "Game Clear";
