mod common;

use std::collections::HashMap;
use std::time::Duration;

use anyhow::{Result, bail};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind};

use common::*;

use survive::assets::{AssetLoader, Assets, ImageHandle, SoundHandle};
use survive::audio::LoggedAudio;
use survive::constants::*;
use survive::enemy::Enemy;
use survive::game::{Game, GameState, LoopSettings, World};
use survive::projectile::Projectile;
use survive::rendering::{CellScale, GlyphSheet, OutputTarget, ScreenBuffer, TerminalRenderer, TextAnchor};
use survive::terminal_io::{InputSource, InputState, KeyTracker, SimulatedInput};
use survive::types::Vector2D;

fn bullet_at(world: &World, position: Vector2D) -> Projectile {
    let mut bullet = Projectile::player_bullet(Vector2D::ZERO, Vector2D::new(1.0, 0.0), world.assets().beam);
    bullet.position = position;
    bullet
}

fn boss_bullet_at(world: &World, position: Vector2D) -> Projectile {
    Projectile::boss_bullet(position, Vector2D::new(-1.0, 0.0), world.assets().boss_beam)
}

fn fixed_settings(max_frames: Option<u64>) -> LoopSettings {
    LoopSettings { target_fps: 60, fixed_step: true, max_frames, end_pause: Duration::ZERO }
}

// ── collision resolution ─────────────────────────────────────────────────────

#[test]
fn new_world_starts_running_at_origin() {
    let world = World::new(assets());
    assert_eq!(world.state, GameState::Running);
    assert_eq!(world.score, 0);
    assert_eq!(world.player.position(), Vector2D::ZERO);
    assert_eq!(world.camera.center, Vector2D::ZERO);
    assert!(world.player_bar.is_some());
}

#[test]
fn bullet_kill_adds_score_and_removes_enemy() {
    let mut world = World::new(assets());
    let enemy = Enemy::fast(Vector2D::new(300.0, 0.0), world.assets());
    world.enemies.push(enemy);
    world.bullets.push(bullet_at(&world, Vector2D::new(300.0, 0.0)));

    world.resolve_collisions();
    assert!(world.enemies.is_empty());
    assert!(world.bullets.is_empty());
    assert_eq!(world.score, 30);
    assert_eq!(world.events.sounds.len(), 1);
}

#[test]
fn wounding_hit_consumes_bullet_without_score() {
    let mut world = World::new(assets());
    let mut rng = seeded_rng();
    let enemy = Enemy::regular(Vector2D::new(300.0, 0.0), world.assets(), &mut rng);
    world.enemies.push(enemy);
    world.bullets.push(bullet_at(&world, Vector2D::new(300.0, 0.0)));

    world.resolve_collisions();
    assert_eq!(world.enemies.len(), 1);
    assert_eq!(world.enemies[0].character.hp, ENEMY_HP - BULLET_DAMAGE);
    assert!(world.bullets.is_empty());
    assert_eq!(world.score, 0);
}

#[test]
fn boss_kill_is_worth_forty() {
    let mut world = World::new(assets());
    let mut boss = Enemy::boss(Vector2D::new(-400.0, 0.0), world.assets());
    boss.character.hp = BULLET_DAMAGE;
    world.enemies.push(boss);
    world.bullets.push(bullet_at(&world, Vector2D::new(-400.0, 0.0)));

    world.resolve_collisions();
    assert_eq!(world.score, 40);
    assert!(world.enemies.is_empty());
}

#[test]
fn crossing_score_threshold_upgrades_fire_rate() {
    let mut world = World::new(assets());
    world.score = 480;
    let enemy = Enemy::fast(Vector2D::new(300.0, 0.0), world.assets());
    world.enemies.push(enemy);
    world.bullets.push(bullet_at(&world, Vector2D::new(300.0, 0.0)));

    world.resolve_collisions();
    assert_eq!(world.score, 510);
    assert_eq!(world.player.attack_interval, PLAYER_ATTACK_INTERVAL / 2.0);
    assert_eq!(world.player.attack_count, 1);
}

#[test]
fn player_and_boss_bullets_cancel_out() {
    let mut world = World::new(assets());
    let position = Vector2D::new(500.0, 300.0);
    world.bullets.push(bullet_at(&world, position));
    world.boss_bullets.push(boss_bullet_at(&world, position));
    world.boss_bullets.push(boss_bullet_at(&world, Vector2D::new(-500.0, 300.0)));

    world.resolve_collisions();
    assert!(world.bullets.is_empty());
    assert_eq!(world.boss_bullets.len(), 1);
    assert_eq!(world.player.hp(), PLAYER_HP);
}

#[test]
fn enemy_contact_hurts_player_once_per_invincibility() {
    let mut world = World::new(assets());
    let enemy = Enemy::fast(Vector2D::new(20.0, 0.0), world.assets());
    world.enemies.push(enemy);
    world.enemies.push(Enemy::fast(Vector2D::new(-20.0, 0.0), world.assets()));

    world.resolve_collisions();
    assert_eq!(world.player.hp(), PLAYER_HP - CONTACT_DAMAGE);
    world.resolve_collisions();
    assert_eq!(world.player.hp(), PLAYER_HP - CONTACT_DAMAGE);
    assert_eq!(world.enemies.len(), 2);
    assert_eq!(world.enemies[0].character.hp, FAST_ENEMY_HP);
}

#[test]
fn boss_bullet_hits_player_and_is_consumed() {
    let mut world = World::new(assets());
    world.boss_bullets.push(boss_bullet_at(&world, Vector2D::ZERO));

    world.resolve_collisions();
    assert_eq!(world.player.hp(), PLAYER_HP - BOSS_BULLET_DAMAGE);
    assert!(world.boss_bullets.is_empty());
    assert_eq!(world.player.character.image(), Some(world.assets().player_hurt));

    world.boss_bullets.push(boss_bullet_at(&world, Vector2D::ZERO));
    world.resolve_collisions();
    assert_eq!(world.player.hp(), PLAYER_HP - BOSS_BULLET_DAMAGE);
    assert!(world.boss_bullets.is_empty());
}

#[test]
fn boss_bullets_ignore_enemies() {
    let mut world = World::new(assets());
    let position = Vector2D::new(600.0, 0.0);
    let enemy = Enemy::fast(position, world.assets());
    world.enemies.push(enemy);
    world.boss_bullets.push(boss_bullet_at(&world, position));

    world.resolve_collisions();
    assert_eq!(world.enemies[0].character.hp, FAST_ENEMY_HP);
    assert_eq!(world.boss_bullets.len(), 1);
}

// ── frame step ───────────────────────────────────────────────────────────────

#[test]
fn lethal_contact_ends_in_game_over() {
    let mut world = World::new(assets());
    let mut rng = seeded_rng();
    world.player.character.hp = CONTACT_DAMAGE;
    let enemy = Enemy::fast(Vector2D::ZERO, world.assets());
    world.enemies.push(enemy);

    let state = world.step(&InputState::default(), 0.016, &mut rng);
    assert_eq!(state, GameState::GameOver);
    assert_eq!(world.player.hp(), 0);
    assert_eq!(world.player.character.image(), Some(world.assets().player_down));
    assert!(world.player_bar.is_none());

    assert_eq!(world.step(&InputState::default(), 0.016, &mut rng), GameState::GameOver);
}

#[test]
fn surviving_sixty_seconds_clears_the_game() {
    let mut world = World::new(assets());
    let mut rng = seeded_rng();
    world.survival_time = 59.9;
    assert_eq!(world.step(&InputState::default(), 0.016, &mut rng), GameState::Running);

    world.advance_clocks(0.2);
    assert_eq!(world.step(&InputState::default(), 0.016, &mut rng), GameState::GameClear);
    assert_eq!(world.state, GameState::GameClear);
}

#[test]
fn fire_waits_for_cooldown() {
    let mut world = World::new(assets());
    let mut rng = seeded_rng();
    world.step(&InputState::default(), 0.016, &mut rng);
    assert!(world.bullets.is_empty());

    world.fire_cooldown = PLAYER_ATTACK_INTERVAL;
    world.step(&InputState::default(), 0.016, &mut rng);
    assert_eq!(world.bullets.len(), 1);
    assert_eq!(world.fire_cooldown, 0.0);
    assert!(close_vec(world.bullets[0].direction, Vector2D::new(1.0, 0.0)));
}

#[test]
fn fire_aims_at_mouse_in_world_space() {
    let mut world = World::new(assets());
    let mut rng = seeded_rng();
    world.fire_cooldown = 1.0;
    let input = InputState { mouse: Some(Vector2D::new(VIEWPORT_WIDTH / 2.0, 0.0)), ..Default::default() };

    world.step(&input, 0.016, &mut rng);
    assert_eq!(world.bullets.len(), 1);
    assert!(close_vec(world.bullets[0].direction, Vector2D::new(0.0, -1.0)));
}

#[test]
fn top_tier_fires_three_way_fan() {
    let mut world = World::new(assets());
    let mut rng = seeded_rng();
    world.player.apply_score_thresholds(SCORE_TIER_TWO);
    world.fire_cooldown = 1.0;

    world.step(&InputState::default(), 0.016, &mut rng);
    let mut angles: Vec<f64> = world.bullets.iter().map(|b| b.direction.angle_deg()).collect();
    angles.sort_by(|a, b| a.total_cmp(b));
    assert_eq!(angles.len(), 3);
    assert!((angles[0] + 15.0).abs() < 1e-9);
    assert!(angles[1].abs() < 1e-9);
    assert!((angles[2] - 15.0).abs() < 1e-9);
}

#[test]
fn camera_follows_player_after_move() {
    let mut world = World::new(assets());
    let mut rng = seeded_rng();
    let input = InputState { right: true, ..Default::default() };
    world.step(&input, 0.2, &mut rng);
    assert!(close(world.player.position().x, PLAYER_SPEED * 0.2));
    assert_eq!(world.camera.center, world.player.position());
}

#[test]
fn sounds_drain_with_distance_falloff() {
    let mut world = World::new(assets());
    let sound = world.assets().enemy_hit_sound;
    world.events.play_at(sound, Vector2D::new(750.0, 0.0));
    world.events.play_at(sound, Vector2D::new(0.0, 5000.0));

    let mut sink = RecordingAudio::default();
    world.drain_sounds(&mut sink);
    assert_eq!(sink.played.len(), 1);
    assert!(close(sink.played[0].1, 0.5));
    assert!(world.events.sounds.is_empty());
}

// ── drawing ──────────────────────────────────────────────────────────────────

#[test]
fn draw_is_camera_relative_and_leaves_world_untouched() {
    let mut world = World::new(assets());
    world.camera.center = Vector2D::new(200.0, 100.0);
    let enemy = Enemy::fast(Vector2D::new(300.0, 100.0), world.assets());
    world.enemies.push(enemy);

    let mut renderer = RecordingRenderer::default();
    world.draw(&mut renderer);

    let fast = world.assets().fast_alien;
    let (_, rect) = renderer.images.iter().find(|(image, _)| *image == fast).expect("enemy drawn");
    assert_eq!(rect.center, Vector2D::new(900.0, 450.0));
    assert_eq!(world.enemies[0].position(), Vector2D::new(300.0, 100.0));

    let player_image = world.assets().player_facing[0];
    assert!(renderer.images.iter().any(|(image, rect)| *image == player_image && rect.center == Vector2D::new(600.0, 350.0)));
    assert_eq!(renderer.bars.len(), 1);
}

#[test]
fn draw_skips_off_screen_entities() {
    let mut world = World::new(assets());
    let enemy = Enemy::fast(Vector2D::new(2000.0, 0.0), world.assets());
    world.enemies.push(enemy);

    let mut renderer = RecordingRenderer::default();
    world.draw(&mut renderer);
    let fast = world.assets().fast_alien;
    assert!(!renderer.images.iter().any(|(image, _)| *image == fast));
}

#[test]
fn hud_text_and_banners() {
    let mut world = World::new(assets());
    world.score = 90;
    world.survival_time = 12.5;
    let mut renderer = RecordingRenderer::default();

    world.draw(&mut renderer);
    assert!(renderer.texts.contains(&("Score: 90".to_string(), TextAnchor::TopLeft)));
    assert!(renderer.texts.contains(&("Time: 47".to_string(), TextAnchor::TopRight)));
    assert_eq!(renderer.texts.len(), 2);

    world.state = GameState::GameOver;
    world.draw(&mut renderer);
    assert!(renderer.texts.contains(&("Game Over".to_string(), TextAnchor::Center)));

    world.state = GameState::GameClear;
    world.draw(&mut renderer);
    assert!(renderer.texts.contains(&("Game Clear".to_string(), TextAnchor::Center)));
}

// ── assets ───────────────────────────────────────────────────────────────────

struct MissingBoss;

impl AssetLoader for MissingBoss {
    fn load_image(&mut self, name: &str) -> Result<ImageHandle> {
        if name == "boss" {
            bail!("file not found");
        }
        Ok(ImageHandle(0))
    }

    fn load_sound(&mut self, _name: &str) -> Result<SoundHandle> {
        Ok(SoundHandle(0))
    }
}

#[test]
fn missing_asset_is_a_startup_error() {
    let err = Assets::load(&mut MissingBoss).unwrap_err();
    assert!(err.to_string().contains("boss"));
    assert!(format!("{:#}", err).contains("file not found"));
}

#[test]
fn glyph_sheet_rejects_unknown_names() {
    let mut sheet = GlyphSheet::default();
    assert!(sheet.load_image("spaceship").is_err());
    assert!(sheet.load_sound("explosion").is_err());
    assert!(sheet.load_image("boss").is_ok());
}

// ── input ────────────────────────────────────────────────────────────────────

fn scale() -> CellScale {
    CellScale::fit(VIEWPORT_WIDTH, VIEWPORT_HEIGHT, 80, 24)
}

#[test]
fn pressed_key_holds_for_window() {
    let mut tracker = KeyTracker::new(scale());
    tracker.apply(Event::Key(KeyEvent::new(KeyCode::Char('d'), KeyModifiers::NONE)), 10);

    assert!(tracker.snapshot(10).right);
    assert!(tracker.snapshot(10 + KEY_HOLD_WINDOW_FRAMES).right);
    assert!(!tracker.snapshot(11 + KEY_HOLD_WINDOW_FRAMES).right);
}

#[test]
fn release_clears_key_immediately() {
    let mut tracker = KeyTracker::new(scale());
    tracker.apply(Event::Key(KeyCode::Up.into()), 0);
    tracker.apply(
        Event::Key(KeyEvent::new_with_kind(KeyCode::Char('w'), KeyModifiers::NONE, KeyEventKind::Release)),
        1,
    );
    assert!(!tracker.snapshot(1).up);
}

#[test]
fn mouse_maps_to_cell_center_pixels() {
    let mut tracker = KeyTracker::new(scale());
    tracker.apply(
        Event::Mouse(MouseEvent { kind: MouseEventKind::Moved, column: 10, row: 4, modifiers: KeyModifiers::NONE }),
        0,
    );
    assert_eq!(tracker.snapshot(0).mouse, Some(Vector2D::new(210.0, 168.75)));
}

#[test]
fn quit_keys_raise_quit() {
    for event in [
        KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE),
        KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE),
        KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
    ] {
        let mut tracker = KeyTracker::new(scale());
        tracker.apply(Event::Key(event), 0);
        assert!(tracker.snapshot(0).quit);
    }
}

#[test]
fn simulated_input_replays_by_frame() {
    let mut events = HashMap::new();
    events.insert(2, vec![Event::Key(KeyCode::Left.into())]);
    let mut input = SimulatedInput::new(events, scale());

    assert!(!input.poll(1).unwrap().left);
    assert!(input.poll(2).unwrap().left);
    assert!(input.poll(3).unwrap().left);
}

// ── full loop ────────────────────────────────────────────────────────────────

fn terminal_game(input: SimulatedInput, settings: LoopSettings) -> Game<TerminalRenderer, SimulatedInput, LoggedAudio> {
    let mut sheet = GlyphSheet::default();
    let assets = Assets::load(&mut sheet).expect("glyph sheet knows every asset");
    let renderer = TerminalRenderer::new(sheet, OutputTarget::ScreenBuffer(ScreenBuffer::new(80, 24)), 80, 24, scale());
    Game::new(World::new(assets), renderer, input, LoggedAudio, settings)
}

#[test]
fn run_stops_on_quit_and_paints_screen_buffer() {
    let mut events = HashMap::new();
    events.insert(5, vec![Event::Key(KeyCode::Char('q').into())]);
    let mut game = terminal_game(SimulatedInput::new(events, scale()), fixed_settings(None));

    let summary = game.run(&mut seeded_rng()).unwrap();
    assert!(summary.quit);
    assert_eq!(summary.frames, 5);
    assert_eq!(summary.state, GameState::Running);

    let OutputTarget::ScreenBuffer(sb) = &game.renderer.output else {
        panic!("expected screen buffer output");
    };
    assert!(sb.contains_text("Score: 0"));
    assert!(sb.contains_text("Time: 59"));
    assert!(sb.contains_text(">"));
}

#[test]
fn run_respects_frame_limit() {
    let mut game = terminal_game(SimulatedInput::new(HashMap::new(), scale()), fixed_settings(Some(3)));
    let summary = game.run(&mut seeded_rng()).unwrap();
    assert_eq!(summary.frames, 3);
    assert!(!summary.quit);
    assert_eq!(summary.state, GameState::Running);
}

#[test]
fn run_ends_with_game_clear_banner() {
    let mut game = terminal_game(SimulatedInput::new(HashMap::new(), scale()), fixed_settings(Some(100)));
    game.world.survival_time = SURVIVAL_GOAL_SECS - 0.01;

    let summary = game.run(&mut seeded_rng()).unwrap();
    assert_eq!(summary.state, GameState::GameClear);
    assert!(!summary.quit);
    assert_eq!(summary.frames, 2);

    let OutputTarget::ScreenBuffer(sb) = &game.renderer.output else {
        panic!("expected screen buffer output");
    };
    assert!(sb.contains_text("Game Clear"));
}
