use log::info;
use rand::Rng;

use crate::assets::Assets;
use crate::constants::*;
use crate::enemy::Enemy;
use crate::types::Vector2D;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IntervalTimer {
    pub elapsed: f64,
    pub interval: f64,
}

impl IntervalTimer {
    pub fn new(interval: f64) -> Self {
        IntervalTimer { elapsed: 0.0, interval }
    }

    pub fn tick(&mut self, dt: f64) -> bool {
        self.elapsed += dt;
        if self.elapsed > self.interval {
            self.elapsed = 0.0;
            return true;
        }
        false
    }
}

pub fn spawn_ring_position(center: Vector2D, radius: f64, angle_deg: f64) -> Vector2D {
    center.add(Vector2D::from_angle_deg(angle_deg).scale(radius))
}

pub struct Spawner {
    pub regular: IntervalTimer,
    pub fast: IntervalTimer,
    pub boss: IntervalTimer,
    pub radius: f64,
}

impl Default for Spawner {
    fn default() -> Self {
        Spawner {
            regular: IntervalTimer::new(ENEMY_SPAWN_SECS),
            fast: IntervalTimer::new(FAST_ENEMY_SPAWN_SECS),
            boss: IntervalTimer::new(BOSS_SPAWN_SECS),
            radius: SPAWN_RADIUS,
        }
    }
}

impl Spawner {
    fn ring_point(&self, center: Vector2D, rng: &mut impl Rng) -> Vector2D {
        spawn_ring_position(center, self.radius, rng.gen_range(0.0..360.0))
    }

    pub fn update(&mut self, dt: f64, center: Vector2D, assets: &Assets, rng: &mut impl Rng) -> Vec<Enemy> {
        let mut spawned = Vec::new();
        if self.regular.tick(dt) {
            let position = self.ring_point(center, rng);
            spawned.push(Enemy::regular(position, assets, rng));
        }
        if self.fast.tick(dt) {
            spawned.push(Enemy::fast(self.ring_point(center, rng), assets));
        }
        if self.boss.tick(dt) {
            let position = self.ring_point(center, rng);
            info!("Boss spawned at ({:.0}, {:.0})", position.x, position.y);
            spawned.push(Enemy::boss(position, assets));
        }
        spawned
    }
}
