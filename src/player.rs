use log::info;

use crate::assets::{Assets, ImageHandle, SoundHandle};
use crate::camera::MovementArea;
use crate::character::{BASE_PRIORITY, Character, Combatant, FrameEvents};
use crate::constants::*;
use crate::terminal_io::InputState;
use crate::types::Vector2D;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Facing {
    pub dx: i8,
    pub dy: i8,
}

impl Facing {
    pub const RIGHT: Facing = Facing { dx: 1, dy: 0 };

    pub fn from_movement(movement: Vector2D) -> Option<Facing> {
        if movement.is_zero() {
            return None;
        }
        Some(Facing { dx: sign(movement.x), dy: sign(movement.y) })
    }

    pub fn index(&self) -> usize {
        match (self.dx, self.dy) {
            (1, 0) => 0,
            (1, -1) => 1,
            (0, -1) => 2,
            (-1, -1) => 3,
            (-1, 0) => 4,
            (-1, 1) => 5,
            (0, 1) => 6,
            (1, 1) => 7,
            _ => 0,
        }
    }

    pub fn vector(&self) -> Vector2D {
        Vector2D::new(self.dx as f64, self.dy as f64)
    }
}

fn sign(value: f64) -> i8 {
    if value > 0.0 {
        1
    } else if value < 0.0 {
        -1
    } else {
        0
    }
}

pub struct Player {
    pub character: Character,
    pub speed: f64,
    pub facing: Facing,
    pub attack_interval: f64,
    pub attack_count: u32,
    facing_images: [ImageHandle; 8],
    hurt_image: ImageHandle,
    down_image: ImageHandle,
    hit_sound: SoundHandle,
}

impl Player {
    pub fn new(position: Vector2D, assets: &Assets) -> Self {
        let facing = Facing::RIGHT;
        Player {
            character: Character::new(
                position,
                PLAYER_SIZE,
                PLAYER_HP,
                PLAYER_INVINCIBLE_SECS,
                assets.player_facing[facing.index()],
            ),
            speed: PLAYER_SPEED,
            facing,
            attack_interval: PLAYER_ATTACK_INTERVAL,
            attack_count: PLAYER_ATTACK_COUNT,
            facing_images: assets.player_facing,
            hurt_image: assets.player_hurt,
            down_image: assets.player_down,
            hit_sound: assets.player_hit_sound,
        }
    }

    pub fn position(&self) -> Vector2D {
        self.character.position
    }

    pub fn hp(&self) -> i32 {
        self.character.hp
    }

    /// Moves from the held keys. Diagonal input is the plain vector sum and
    /// is not normalized, so diagonal movement is faster than straight.
    pub fn update(&mut self, input: &InputState, area: &MovementArea, dt: f64) {
        self.character.update(dt);

        let mut movement = Vector2D::ZERO;
        if input.up {
            movement.y -= 1.0;
        }
        if input.down {
            movement.y += 1.0;
        }
        if input.left {
            movement.x -= 1.0;
        }
        if input.right {
            movement.x += 1.0;
        }

        let step = movement.scale(self.speed * dt);
        let next_x = self.character.position.x + step.x;
        if area.contains_x(next_x) {
            self.character.position.x = next_x;
        }
        let next_y = self.character.position.y + step.y;
        if area.contains_y(next_y) {
            self.character.position.y = next_y;
        }

        if let Some(facing) = Facing::from_movement(movement) {
            self.facing = facing;
            self.character.images.replace_image(BASE_PRIORITY, self.facing_images[facing.index()]);
        }
    }

    pub fn apply_score_thresholds(&mut self, score: u32) {
        let (interval, count) = if score >= SCORE_TIER_TWO {
            (PLAYER_ATTACK_INTERVAL / 4.0, 3)
        } else if score >= SCORE_TIER_ONE {
            (PLAYER_ATTACK_INTERVAL / 2.0, PLAYER_ATTACK_COUNT)
        } else {
            (PLAYER_ATTACK_INTERVAL, PLAYER_ATTACK_COUNT)
        };
        if interval != self.attack_interval || count != self.attack_count {
            info!("Score {} reached: attack interval {:.3}s, {} shot(s)", score, interval, count);
            self.attack_interval = interval;
            self.attack_count = count;
        }
    }

    pub fn show_down(&mut self) {
        self.character.set_image(PLAYER_DOWN_PRIORITY, self.down_image, Some(PLAYER_DOWN_SECS));
    }
}

impl Combatant for Player {
    fn character(&self) -> &Character {
        &self.character
    }

    fn character_mut(&mut self) -> &mut Character {
        &mut self.character
    }

    fn on_damaged(&mut self, events: &mut FrameEvents) {
        self.character.set_image(PLAYER_HURT_PRIORITY, self.hurt_image, Some(PLAYER_HURT_SECS));
        events.play_at(self.hit_sound, self.character.position);
    }
}
