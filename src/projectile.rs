use crate::assets::ImageHandle;
use crate::camera::Camera;
use crate::character::{Combatant, FrameEvents};
use crate::constants::*;
use crate::types::{Rect, Vector2D, direction_to};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TargetGroup {
    Enemies,
    Player,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Hit {
    pub killed: bool,
    pub points: u32,
}

#[derive(Clone, Debug)]
pub struct Projectile {
    pub position: Vector2D,
    pub direction: Vector2D, // Unit length, fixed at launch
    pub speed: f64,
    pub damage: i32,
    pub life_timer: f64,
    pub max_life_seconds: f64,
    pub target: TargetGroup,
    pub destroy_off_screen: bool,
    pub size: f64,
    pub image: ImageHandle,
}

impl Projectile {
    pub fn player_bullet(origin: Vector2D, direction: Vector2D, image: ImageHandle) -> Self {
        Projectile {
            position: origin.add(direction.scale(PLAYER_SIZE)),
            direction,
            speed: BULLET_SPEED,
            damage: BULLET_DAMAGE,
            life_timer: 0.0,
            max_life_seconds: BULLET_LIFETIME_SECS,
            target: TargetGroup::Enemies,
            destroy_off_screen: true,
            size: BULLET_SIZE,
            image,
        }
    }

    pub fn boss_bullet(origin: Vector2D, direction: Vector2D, image: ImageHandle) -> Self {
        Projectile {
            position: origin,
            direction,
            speed: BOSS_BULLET_SPEED,
            damage: BOSS_BULLET_DAMAGE,
            life_timer: 0.0,
            max_life_seconds: BOSS_BULLET_LIFETIME_SECS,
            target: TargetGroup::Player,
            // Bosses usually fire from beyond the edge of the view.
            destroy_off_screen: false,
            size: BOSS_BULLET_SIZE,
            image,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::centered(self.position, self.size, self.size)
    }

    /// Advances the projectile. Returns `false` once it should be dropped.
    pub fn update(&mut self, dt: f64, camera: &Camera) -> bool {
        self.position = self.position.add(self.direction.scale(self.speed * dt));
        self.life_timer += dt;
        if self.life_timer > self.max_life_seconds {
            return false;
        }
        !(self.destroy_off_screen && !camera.is_visible(&self.rect()))
    }

    pub fn strike<T: Combatant>(&self, targets: &mut [T], events: &mut FrameEvents) -> Option<Hit> {
        let rect = self.rect();
        let target = targets.iter_mut().find(|t| !t.is_dead() && t.rect().overlaps(&rect))?;
        let hp = target.give_damage(self.damage, events);
        if hp > 0 {
            return Some(Hit { killed: false, points: 0 });
        }
        let points = target.scoreable().map_or(0, |s| s.score_value());
        Some(Hit { killed: true, points })
    }
}

/// Launch directions for a fan of `count` shots spread symmetrically over
/// `spread_deg` around `facing_deg`.
pub fn gen_beams(facing_deg: f64, count: u32, spread_deg: f64) -> Vec<Vector2D> {
    if count <= 1 {
        return if count == 1 { vec![Vector2D::from_angle_deg(facing_deg)] } else { Vec::new() };
    }
    let step = spread_deg / (count - 1) as f64;
    let start = facing_deg - spread_deg / 2.0;
    (0..count)
        .map(|i| Vector2D::from_angle_deg(start + step * i as f64))
        .collect()
}

pub fn aimed_shot(origin: Vector2D, target: Vector2D, image: ImageHandle) -> Option<Projectile> {
    direction_to(origin, target).map(|direction| Projectile::boss_bullet(origin, direction, image))
}
