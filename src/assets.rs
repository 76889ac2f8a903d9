use anyhow::{Context, Result};
use log::info;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ImageHandle(pub u16);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SoundHandle(pub u16);

/// Host side of asset loading. A missing asset is an error, never a default.
pub trait AssetLoader {
    fn load_image(&mut self, name: &str) -> Result<ImageHandle>;
    fn load_sound(&mut self, name: &str) -> Result<SoundHandle>;
}

// Order matches `Facing::index`: right, up-right, up, up-left, left, down-left, down, down-right.
pub const PLAYER_FACING_IMAGES: [&str; 8] = [
    "player_right",
    "player_up_right",
    "player_up",
    "player_up_left",
    "player_left",
    "player_down_left",
    "player_down",
    "player_down_right",
];
pub const ALIEN_IMAGES: [&str; 3] = ["alien1", "alien2", "alien3"];

#[derive(Clone, Copy, Debug)]
pub struct Assets {
    pub player_facing: [ImageHandle; 8],
    pub player_hurt: ImageHandle,
    pub player_down: ImageHandle,
    pub aliens: [ImageHandle; 3],
    pub fast_alien: ImageHandle,
    pub boss: ImageHandle,
    pub boss_hurt: ImageHandle,
    pub beam: ImageHandle,
    pub boss_beam: ImageHandle,
    pub ground: ImageHandle,
    pub player_hit_sound: SoundHandle,
    pub enemy_hit_sound: SoundHandle,
    pub boss_hit_sound: SoundHandle,
}

impl Assets {
    pub fn load(loader: &mut impl AssetLoader) -> Result<Self> {
        let mut image = |name: &str| {
            loader
                .load_image(name)
                .with_context(|| format!("Failed to load image '{}'", name))
        };

        let mut player_facing = [ImageHandle(0); 8];
        for (slot, name) in player_facing.iter_mut().zip(PLAYER_FACING_IMAGES) {
            *slot = image(name)?;
        }
        let mut aliens = [ImageHandle(0); 3];
        for (slot, name) in aliens.iter_mut().zip(ALIEN_IMAGES) {
            *slot = image(name)?;
        }
        let player_hurt = image("player_hurt")?;
        let player_down = image("player_down_and_out")?;
        let fast_alien = image("fast_alien")?;
        let boss = image("boss")?;
        let boss_hurt = image("boss_hurt")?;
        let beam = image("beam")?;
        let boss_beam = image("boss_beam")?;
        let ground = image("ground")?;

        let mut sound = |name: &str| {
            loader
                .load_sound(name)
                .with_context(|| format!("Failed to load sound '{}'", name))
        };
        let player_hit_sound = sound("player_hit")?;
        let enemy_hit_sound = sound("enemy_hit")?;
        let boss_hit_sound = sound("boss_hit")?;

        info!("Asset catalogue loaded.");
        Ok(Assets {
            player_facing,
            player_hurt,
            player_down,
            aliens,
            fast_alien,
            boss,
            boss_hurt,
            beam,
            boss_beam,
            ground,
            player_hit_sound,
            enemy_hit_sound,
            boss_hit_sound,
        })
    }
}
