pub mod assets;
pub mod audio;
pub mod camera;
pub mod character;
pub mod config;
pub mod constants;
pub mod enemy;
pub mod game;
pub mod hud;
pub mod player;
pub mod projectile;
pub mod rendering;
pub mod spawner;
pub mod terminal_io;
pub mod types;
