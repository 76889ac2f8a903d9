use log::debug;
use rand::Rng;

use crate::assets::{Assets, ImageHandle, SoundHandle};
use crate::character::{Character, Combatant, FrameEvents, Scoreable};
use crate::constants::*;
use crate::hud::HpBar;
use crate::projectile::{Projectile, aimed_shot};
use crate::types::{Vector2D, direction_to, distance};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnemyKind {
    Regular,
    Fast,
    Boss,
}

impl EnemyKind {
    pub fn max_hp(&self) -> i32 {
        match self {
            Self::Regular => ENEMY_HP,
            Self::Fast => FAST_ENEMY_HP,
            Self::Boss => BOSS_HP,
        }
    }

    pub fn speed(&self) -> f64 {
        match self {
            Self::Regular => ENEMY_SPEED,
            Self::Fast => FAST_ENEMY_SPEED,
            Self::Boss => BOSS_SPEED,
        }
    }

    pub fn score_value(&self) -> u32 {
        match self {
            Self::Regular => ENEMY_SCORE,
            Self::Fast => FAST_ENEMY_SCORE,
            Self::Boss => BOSS_SCORE,
        }
    }

    pub fn size(&self) -> f64 {
        match self {
            Self::Regular => ENEMY_SIZE,
            Self::Fast => FAST_ENEMY_SIZE,
            Self::Boss => BOSS_SIZE,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeekState {
    Approaching,
    Holding,
}

impl SeekState {
    pub fn for_distance(distance: f64) -> Self {
        if distance < SEEK_HOLD_DISTANCE {
            Self::Holding
        } else {
            Self::Approaching
        }
    }
}

#[derive(Clone, Debug)]
pub struct RangedAttack {
    pub timer: f64,
    pub interval: f64,
    pub image: ImageHandle,
}

impl RangedAttack {
    pub fn new(interval: f64, image: ImageHandle) -> Self {
        RangedAttack { timer: 0.0, interval, image }
    }

    pub fn update(&mut self, dt: f64, origin: Vector2D, target: Vector2D) -> Option<Projectile> {
        self.timer += dt;
        if self.timer <= self.interval {
            return None;
        }
        self.timer = 0.0;
        aimed_shot(origin, target, self.image)
    }
}

#[derive(Clone, Debug)]
pub struct Enemy {
    pub character: Character,
    pub kind: EnemyKind,
    pub speed: f64,
    pub score_value: u32,
    pub state: SeekState,
    pub attack: Option<RangedAttack>,
    pub hp_bar: Option<HpBar>,
    hurt_image: Option<ImageHandle>,
    hit_sound: SoundHandle,
}

impl Enemy {
    pub fn new(kind: EnemyKind, position: Vector2D, image: ImageHandle, hit_sound: SoundHandle) -> Self {
        Enemy {
            character: Character::new(position, kind.size(), kind.max_hp(), 0.0, image),
            kind,
            speed: kind.speed(),
            score_value: kind.score_value(),
            state: SeekState::Approaching,
            attack: None,
            hp_bar: None,
            hurt_image: None,
            hit_sound,
        }
    }

    pub fn regular(position: Vector2D, assets: &Assets, rng: &mut impl Rng) -> Self {
        let image = assets.aliens[rng.gen_range(0..assets.aliens.len())];
        Enemy::new(EnemyKind::Regular, position, image, assets.enemy_hit_sound)
    }

    pub fn fast(position: Vector2D, assets: &Assets) -> Self {
        Enemy::new(EnemyKind::Fast, position, assets.fast_alien, assets.enemy_hit_sound)
    }

    pub fn boss(position: Vector2D, assets: &Assets) -> Self {
        let mut boss = Enemy::new(EnemyKind::Boss, position, assets.boss, assets.boss_hit_sound);
        boss.attack = Some(RangedAttack::new(BOSS_ATTACK_INTERVAL_SECS, assets.boss_beam));
        boss.hp_bar = Some(HpBar::new(BOSS_SIZE));
        boss.hurt_image = Some(assets.boss_hurt);
        boss
    }

    pub fn position(&self) -> Vector2D {
        self.character.position
    }

    pub fn update(&mut self, dt: f64, target: Vector2D) -> Option<Projectile> {
        self.character.update(dt);
        self.seek(dt, target);
        if let Some(bar) = self.hp_bar.as_mut() {
            if !bar.track(&self.character) {
                self.hp_bar = None;
            }
        }
        let origin = self.character.position;
        let shot = self.attack.as_mut()?.update(dt, origin, target);
        if shot.is_some() {
            debug!("Boss at ({:.0}, {:.0}) fired", origin.x, origin.y);
        }
        shot
    }

    fn seek(&mut self, dt: f64, target: Vector2D) {
        let position = self.character.position;
        self.state = SeekState::for_distance(distance(position, target));
        if self.state == SeekState::Holding {
            return;
        }
        if let Some(direction) = direction_to(position, target) {
            self.character.position = position.add(direction.scale(self.speed * dt));
        }
    }
}

impl Scoreable for Enemy {
    fn score_value(&self) -> u32 {
        self.score_value
    }
}

impl Combatant for Enemy {
    fn character(&self) -> &Character {
        &self.character
    }

    fn character_mut(&mut self) -> &mut Character {
        &mut self.character
    }

    fn on_damaged(&mut self, events: &mut FrameEvents) {
        if let Some(image) = self.hurt_image {
            self.character.set_image(BOSS_HURT_PRIORITY, image, Some(BOSS_HURT_SECS));
        }
        events.play_at(self.hit_sound, self.character.position);
    }

    fn scoreable(&self) -> Option<&dyn Scoreable> {
        Some(self)
    }
}
