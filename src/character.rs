use crate::assets::{ImageHandle, SoundHandle};
use crate::types::{Rect, Vector2D};

pub const MAX_IMAGE_LAYERS: usize = 4;
pub const BASE_PRIORITY: u8 = 0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ImageLayer {
    pub priority: u8,
    pub image: ImageHandle,
    /// Seconds left before the layer expires; `None` never expires.
    pub remaining: Option<f64>,
}

/// Stack of images keyed by priority. The highest priority present is the
/// one shown; only that layer's countdown runs.
#[derive(Clone, Debug)]
pub struct TimedImageLayers {
    layers: Vec<ImageLayer>, // Sorted ascending by priority
}

impl TimedImageLayers {
    pub fn new(base: ImageHandle) -> Self {
        let mut layers = Vec::with_capacity(MAX_IMAGE_LAYERS);
        layers.push(ImageLayer { priority: BASE_PRIORITY, image: base, remaining: None });
        TimedImageLayers { layers }
    }

    pub fn set_image(&mut self, priority: u8, image: ImageHandle, lifetime: Option<f64>) {
        let layer = ImageLayer { priority, image, remaining: lifetime };
        match self.layers.binary_search_by_key(&priority, |l| l.priority) {
            Ok(idx) => self.layers[idx] = layer,
            Err(idx) => {
                if self.layers.len() == MAX_IMAGE_LAYERS {
                    // The base layer is never evicted; the lowest timed layer goes instead.
                    if idx <= 1 {
                        return;
                    }
                    self.layers.remove(1);
                    self.layers.insert(idx - 1, layer);
                } else {
                    self.layers.insert(idx, layer);
                }
            }
        }
    }

    pub fn replace_image(&mut self, priority: u8, image: ImageHandle) {
        if let Ok(idx) = self.layers.binary_search_by_key(&priority, |l| l.priority) {
            self.layers[idx].image = image;
        }
    }

    pub fn active(&self) -> Option<&ImageLayer> {
        self.layers.last()
    }

    pub fn active_image(&self) -> Option<ImageHandle> {
        self.active().map(|l| l.image)
    }

    pub fn active_priority(&self) -> Option<u8> {
        self.active().map(|l| l.priority)
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    pub fn update(&mut self, dt: f64) {
        if let Some(top) = self.layers.last_mut() {
            if let Some(remaining) = top.remaining.as_mut() {
                *remaining -= dt;
                if *remaining <= 0.0 {
                    self.layers.pop();
                }
            }
        }
    }
}

#[derive(Clone, Debug)]
pub struct Character {
    pub position: Vector2D,
    pub width: f64,
    pub height: f64,
    pub hp: i32,
    pub max_hp: i32,
    pub invincible_timer: f64, // -1.0 when inactive
    pub max_invincible_duration: f64,
    pub images: TimedImageLayers,
}

impl Character {
    pub fn new(position: Vector2D, size: f64, hp: i32, max_invincible_duration: f64, base: ImageHandle) -> Self {
        Character {
            position,
            width: size,
            height: size,
            hp,
            max_hp: hp,
            invincible_timer: -1.0,
            max_invincible_duration,
            images: TimedImageLayers::new(base),
        }
    }

    pub fn is_invincible(&self) -> bool {
        self.invincible_timer > 0.0
    }

    pub fn is_dead(&self) -> bool {
        self.hp <= 0
    }

    pub fn rect(&self) -> Rect {
        Rect::centered(self.position, self.width, self.height)
    }

    pub fn image(&self) -> Option<ImageHandle> {
        self.images.active_image()
    }

    pub fn set_image(&mut self, priority: u8, image: ImageHandle, lifetime: Option<f64>) {
        self.images.set_image(priority, image, lifetime);
    }

    pub fn take_hit(&mut self, amount: i32) -> bool {
        if self.is_invincible() {
            return false;
        }
        self.hp -= amount;
        self.invincible_timer = self.max_invincible_duration;
        true
    }

    pub fn update(&mut self, dt: f64) {
        self.invincible_timer = (self.invincible_timer - dt).max(-1.0);
        self.images.update(dt);
    }
}

#[derive(Debug, Default)]
pub struct FrameEvents {
    pub sounds: Vec<(SoundHandle, Vector2D)>,
}

impl FrameEvents {
    pub fn play_at(&mut self, sound: SoundHandle, position: Vector2D) {
        self.sounds.push((sound, position));
    }
}

pub trait Scoreable {
    fn score_value(&self) -> u32;
}

pub trait Combatant {
    fn character(&self) -> &Character;
    fn character_mut(&mut self) -> &mut Character;

    fn on_damaged(&mut self, _events: &mut FrameEvents) {}

    fn scoreable(&self) -> Option<&dyn Scoreable> {
        None
    }

    /// Deals damage and returns the resulting hp. The owning collection
    /// removes the entity once `is_dead` holds.
    fn give_damage(&mut self, amount: i32, events: &mut FrameEvents) -> i32 {
        if self.character_mut().take_hit(amount) {
            self.on_damaged(events);
        }
        self.character().hp
    }

    fn is_dead(&self) -> bool {
        self.character().is_dead()
    }

    fn rect(&self) -> Rect {
        self.character().rect()
    }
}
