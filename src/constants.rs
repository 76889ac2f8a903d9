// --- Viewport & World ---
pub const VIEWPORT_WIDTH: f64 = 1600.0;
pub const VIEWPORT_HEIGHT: f64 = 900.0;
pub const MOVEMENT_AREA_WIDTH: f64 = 4800.0;
pub const MOVEMENT_AREA_HEIGHT: f64 = 2700.0;
pub const BACKGROUND_TILE_SIZE: f64 = 200.0;

// --- Player ---
pub const PLAYER_HP: i32 = 50;
pub const PLAYER_INVINCIBLE_SECS: f64 = 1.0;
pub const PLAYER_SPEED: f64 = 500.0; // World units per second
pub const PLAYER_SIZE: f64 = 60.0;
pub const PLAYER_HURT_PRIORITY: u8 = 5;
pub const PLAYER_HURT_SECS: f64 = 0.4;
pub const PLAYER_DOWN_PRIORITY: u8 = 10;
pub const PLAYER_DOWN_SECS: f64 = 5.0;
pub const PLAYER_ATTACK_INTERVAL: f64 = 0.1; // Seconds between volleys
pub const PLAYER_ATTACK_COUNT: u32 = 1;
pub const BEAM_SPREAD_DEG: f64 = 30.0;

// --- Score thresholds ---
pub const SCORE_TIER_ONE: u32 = 500; // Attack interval halves
pub const SCORE_TIER_TWO: u32 = 1500; // Halves again, three-way fan

// --- Projectiles ---
pub const BULLET_SPEED: f64 = 1000.0;
pub const BULLET_DAMAGE: i32 = 10;
pub const BULLET_LIFETIME_SECS: f64 = 5.0;
pub const BULLET_SIZE: f64 = 20.0;
pub const BOSS_BULLET_SPEED: f64 = 600.0;
pub const BOSS_BULLET_DAMAGE: i32 = 10;
pub const BOSS_BULLET_LIFETIME_SECS: f64 = 5.0;
pub const BOSS_BULLET_SIZE: f64 = 24.0;

// --- Enemies ---
pub const ENEMY_HP: i32 = 20;
pub const ENEMY_SPEED: f64 = 250.0;
pub const ENEMY_SCORE: u32 = 30;
pub const ENEMY_SIZE: f64 = 60.0;
pub const FAST_ENEMY_HP: i32 = 10;
pub const FAST_ENEMY_SPEED: f64 = 400.0;
pub const FAST_ENEMY_SCORE: u32 = 30;
pub const FAST_ENEMY_SIZE: f64 = 40.0;
pub const BOSS_HP: i32 = 200;
pub const BOSS_SPEED: f64 = 150.0;
pub const BOSS_SCORE: u32 = 40;
pub const BOSS_SIZE: f64 = 120.0;
pub const BOSS_ATTACK_INTERVAL_SECS: f64 = 2.0;
pub const BOSS_HURT_PRIORITY: u8 = 5;
pub const BOSS_HURT_SECS: f64 = 0.2;
pub const SEEK_HOLD_DISTANCE: f64 = 50.0; // Below this an enemy stops closing in
pub const CONTACT_DAMAGE: i32 = 10;

// --- Spawning ---
pub const ENEMY_SPAWN_SECS: f64 = 0.6;
pub const FAST_ENEMY_SPAWN_SECS: f64 = 2.5;
pub const BOSS_SPAWN_SECS: f64 = 15.0;
pub const SPAWN_MARGIN: f64 = 200.0;
pub const SPAWN_RADIUS: f64 = VIEWPORT_WIDTH / 2.0 + SPAWN_MARGIN;

// --- HUD ---
pub const HP_BAR_HEIGHT: f64 = 12.0;
pub const HP_BAR_GAP: f64 = 10.0; // Space between the owner's top edge and the bar

// --- Game flow ---
pub const SURVIVAL_GOAL_SECS: f64 = 60.0;
pub const END_PAUSE_SECS: f64 = 2.0;
pub const MAX_FRAME_DT: f64 = 0.25;
pub const DEFAULT_TARGET_FPS: u32 = 60;

// --- Audio ---
pub const VOLUME_RANGE: f64 = 1500.0;

// --- Terminal input ---
pub const KEY_HOLD_WINDOW_FRAMES: u64 = 8; // Press counts as held for this many frames without a repeat
