use std::io;
use std::thread;
use std::time::{Duration, Instant};

use log::{debug, info, trace};
use rand::Rng;

use crate::assets::{Assets, ImageHandle};
use crate::audio::{self, AudioSink};
use crate::camera::{Background, Camera, MovementArea};
use crate::character::{Combatant, FrameEvents};
use crate::constants::*;
use crate::enemy::Enemy;
use crate::hud::{self, HpBar};
use crate::player::Player;
use crate::projectile::{Projectile, TargetGroup, gen_beams};
use crate::rendering::{Renderer, TextAnchor};
use crate::spawner::Spawner;
use crate::terminal_io::{InputSource, InputState};
use crate::types::{Rect, Vector2D, direction_to};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameState {
    Running,
    GameOver,
    GameClear,
}

pub struct World {
    pub player: Player,
    pub player_bar: Option<HpBar>,
    pub enemies: Vec<Enemy>,
    pub bullets: Vec<Projectile>,
    pub boss_bullets: Vec<Projectile>,
    pub spawner: Spawner,
    pub camera: Camera,
    pub area: MovementArea,
    pub background: Background,
    pub score: u32,
    pub survival_time: f64,
    pub fire_cooldown: f64,
    pub state: GameState,
    pub events: FrameEvents,
    assets: Assets,
}

impl World {
    pub fn new(assets: Assets) -> Self {
        let player = Player::new(Vector2D::ZERO, &assets);
        let player_bar = Some(HpBar::for_character(&player.character));
        let area = MovementArea::default();
        let mut camera = Camera::default();
        camera.follow(player.position(), &area);
        World {
            player,
            player_bar,
            enemies: Vec::new(),
            bullets: Vec::new(),
            boss_bullets: Vec::new(),
            spawner: Spawner::default(),
            camera,
            area,
            background: Background::default(),
            score: 0,
            survival_time: 0.0,
            fire_cooldown: 0.0,
            state: GameState::Running,
            events: FrameEvents::default(),
            assets,
        }
    }

    pub fn assets(&self) -> &Assets {
        &self.assets
    }

    pub fn step(&mut self, input: &InputState, dt: f64, rng: &mut impl Rng) -> GameState {
        if self.state != GameState::Running {
            return self.state;
        }

        let spawned = self.spawner.update(dt, self.camera.center, &self.assets, rng);
        self.enemies.extend(spawned);

        self.resolve_collisions();

        if let Some(ending) = self.check_ending() {
            self.state = ending;
            if ending == GameState::GameOver {
                self.player.show_down();
                self.player_bar = None;
            }
            info!("Game ended: {:?} with score {} after {:.1}s", ending, self.score, self.survival_time);
            return ending;
        }

        self.player.update(input, &self.area, dt);
        self.camera.follow(self.player.position(), &self.area);

        self.fire(input);
        self.update_groups(dt);
        GameState::Running
    }

    // Survival and cooldown clocks move after the frame is drawn.
    pub fn advance_clocks(&mut self, dt: f64) {
        self.survival_time += dt;
        self.fire_cooldown += dt;
    }

    fn check_ending(&self) -> Option<GameState> {
        if self.player.hp() <= 0 {
            Some(GameState::GameOver)
        } else if self.survival_time >= SURVIVAL_GOAL_SECS {
            Some(GameState::GameClear)
        } else {
            None
        }
    }

    pub fn resolve_collisions(&mut self) {
        let gained = resolve_strikes(&mut self.bullets, &mut self.enemies, &mut self.player, &mut self.events);
        self.enemies.retain(|e| !e.is_dead());

        let boss_bullets = &mut self.boss_bullets;
        self.bullets.retain(|bullet| {
            let rect = bullet.rect();
            match boss_bullets.iter().position(|b| b.rect().overlaps(&rect)) {
                Some(idx) => {
                    boss_bullets.swap_remove(idx);
                    false
                }
                None => true,
            }
        });

        let player_rect = self.player.rect();
        for enemy in &self.enemies {
            if enemy.rect().overlaps(&player_rect) {
                let hp = self.player.give_damage(CONTACT_DAMAGE, &mut self.events);
                debug!("Player touched by {:?}, hp {}", enemy.kind, hp);
            }
        }

        resolve_strikes(&mut self.boss_bullets, &mut self.enemies, &mut self.player, &mut self.events);

        if gained > 0 {
            self.score += gained;
            self.player.apply_score_thresholds(self.score);
        }
    }

    fn fire(&mut self, input: &InputState) {
        if self.fire_cooldown < self.player.attack_interval {
            return;
        }
        self.fire_cooldown = 0.0;
        let origin = self.player.position();
        let aim = input
            .mouse
            .map(|screen| self.camera.to_world(screen))
            .and_then(|target| direction_to(origin, target))
            .unwrap_or_else(|| self.player.facing.vector());
        for direction in gen_beams(aim.angle_deg(), self.player.attack_count, BEAM_SPREAD_DEG) {
            self.bullets.push(Projectile::player_bullet(origin, direction, self.assets.beam));
        }
    }

    fn update_groups(&mut self, dt: f64) {
        let target = self.player.position();
        for enemy in &mut self.enemies {
            if let Some(shot) = enemy.update(dt, target) {
                self.boss_bullets.push(shot);
            }
        }

        let camera = self.camera;
        self.bullets.retain_mut(|b| b.update(dt, &camera));
        self.boss_bullets.retain_mut(|b| b.update(dt, &camera));

        if let Some(bar) = self.player_bar.as_mut() {
            if !bar.track(&self.player.character) {
                self.player_bar = None;
            }
        }
    }

    pub fn drain_sounds(&mut self, sink: &mut dyn AudioSink) {
        for (sound, position) in self.events.sounds.drain(..) {
            audio::play_at(sink, sound, position, self.camera.center);
        }
    }

    fn draw_world_image(&self, renderer: &mut dyn Renderer, image: Option<ImageHandle>, rect: &Rect) {
        if let Some(image) = image {
            if self.camera.is_visible(rect) {
                renderer.draw_image(image, &self.camera.rect_to_screen(rect));
            }
        }
    }

    fn draw_bar(&self, renderer: &mut dyn Renderer, bar: &HpBar) {
        let rect = bar.rect();
        if self.camera.is_visible(&rect) {
            renderer.draw_bar(&self.camera.rect_to_screen(&rect), bar.ratio);
        }
    }

    /// Draws every layer camera-relative. Stored positions stay in world
    /// space; only the rectangles handed to the renderer are shifted.
    pub fn draw(&self, renderer: &mut dyn Renderer) {
        renderer.begin_frame();

        for tile in self.background.visible_tiles(&self.camera) {
            self.draw_world_image(renderer, Some(self.assets.ground), &Rect::centered(tile, 1.0, 1.0));
        }
        for enemy in &self.enemies {
            self.draw_world_image(renderer, enemy.character.image(), &enemy.rect());
        }
        for bullet in self.bullets.iter().chain(&self.boss_bullets) {
            self.draw_world_image(renderer, Some(bullet.image), &bullet.rect());
        }
        self.draw_world_image(renderer, self.player.character.image(), &self.player.rect());

        for bar in self.enemies.iter().filter_map(|e| e.hp_bar.as_ref()).chain(&self.player_bar) {
            self.draw_bar(renderer, bar);
        }

        renderer.draw_text(&hud::score_text(self.score), TextAnchor::TopLeft);
        renderer.draw_text(&hud::countdown_text(self.survival_time), TextAnchor::TopRight);
        match self.state {
            GameState::GameOver => renderer.draw_text(hud::GAME_OVER_BANNER, TextAnchor::Center),
            GameState::GameClear => renderer.draw_text(hud::GAME_CLEAR_BANNER, TextAnchor::Center),
            GameState::Running => {}
        }
    }
}

fn resolve_strikes(
    projectiles: &mut Vec<Projectile>,
    enemies: &mut [Enemy],
    player: &mut Player,
    events: &mut FrameEvents,
) -> u32 {
    let mut gained = 0;
    projectiles.retain(|projectile| {
        let hit = match projectile.target {
            TargetGroup::Enemies => projectile.strike(&mut *enemies, &mut *events),
            TargetGroup::Player => projectile.strike(std::slice::from_mut(&mut *player), &mut *events),
        };
        match hit {
            Some(hit) => {
                if hit.killed {
                    gained += hit.points;
                    debug!("Kill worth {} points", hit.points);
                }
                false
            }
            None => true,
        }
    });
    gained
}

#[derive(Clone, Copy, Debug)]
pub struct LoopSettings {
    pub target_fps: u32,
    // Use `1 / target_fps` for every frame and skip sleeping.
    pub fixed_step: bool,
    pub max_frames: Option<u64>,
    pub end_pause: Duration,
}

impl Default for LoopSettings {
    fn default() -> Self {
        LoopSettings {
            target_fps: DEFAULT_TARGET_FPS,
            fixed_step: false,
            max_frames: None,
            end_pause: Duration::from_secs_f64(END_PAUSE_SECS),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RunSummary {
    pub state: GameState,
    pub score: u32,
    pub frames: u64,
    pub quit: bool,
}

pub struct Game<R: Renderer, I: InputSource, A: AudioSink> {
    pub world: World,
    pub renderer: R,
    pub input: I,
    pub audio: A,
    pub settings: LoopSettings,
}

impl<R: Renderer, I: InputSource, A: AudioSink> Game<R, I, A> {
    pub fn new(world: World, renderer: R, input: I, audio: A, settings: LoopSettings) -> Self {
        Game { world, renderer, input, audio, settings }
    }

    fn summary(&self, frames: u64, quit: bool) -> RunSummary {
        RunSummary { state: self.world.state, score: self.world.score, frames, quit }
    }

    pub fn run(&mut self, rng: &mut impl Rng) -> io::Result<RunSummary> {
        let fps = self.settings.target_fps.max(1) as f64;
        let frame_budget = Duration::from_secs_f64(1.0 / fps);
        let mut dt = 1.0 / fps;
        let mut frame: u64 = 0;
        let mut last = Instant::now();

        info!("Game loop started at {} fps target.", self.settings.target_fps);
        loop {
            if self.settings.max_frames.is_some_and(|max| frame >= max) {
                info!("Frame limit reached.");
                return Ok(self.summary(frame, false));
            }

            let input = self.input.poll(frame)?;
            if input.quit {
                info!("Quit requested at frame {}.", frame);
                return Ok(self.summary(frame, true));
            }

            let state = self.world.step(&input, dt, rng);
            self.world.drain_sounds(&mut self.audio);
            self.world.draw(&mut self.renderer);
            self.renderer.present()?;

            if state != GameState::Running {
                thread::sleep(self.settings.end_pause);
                return Ok(self.summary(frame + 1, false));
            }

            self.world.advance_clocks(dt);
            frame += 1;

            if self.settings.fixed_step {
                continue;
            }
            let spent = last.elapsed();
            if spent < frame_budget {
                thread::sleep(frame_budget - spent);
            }
            let now = Instant::now();
            dt = now.duration_since(last).as_secs_f64().min(MAX_FRAME_DT);
            last = now;
            trace!("Frame {} dt {:.4}", frame, dt);
        }
    }
}
