use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use log::LevelFilter;

use crate::constants::{DEFAULT_TARGET_FPS, END_PAUSE_SECS};
use crate::game::LoopSettings;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Top-down survival arcade in the terminal", long_about = None)]
pub struct GameConfig {
    /// Target frame rate; simulation speed does not depend on it
    #[arg(long, default_value_t = DEFAULT_TARGET_FPS, value_parser = clap::value_parser!(u32).range(1..=240))]
    pub fps: u32,

    /// Seed for spawn positions and enemy looks
    #[arg(long)]
    pub seed: Option<u64>,

    /// Headless run with scripted input, logging every frame
    #[arg(long)]
    pub debug: bool,

    /// Screen width in cells for debug runs
    #[arg(long, default_value_t = 80)]
    pub width: u16,

    /// Screen height in cells for debug runs
    #[arg(long, default_value_t = 24)]
    pub height: u16,

    /// Stop after this many frames
    #[arg(long)]
    pub max_frames: Option<u64>,

    #[arg(long, default_value = "survive.log")]
    pub log_file: PathBuf,

    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

impl GameConfig {
    pub fn loop_settings(&self) -> LoopSettings {
        LoopSettings {
            target_fps: self.fps,
            fixed_step: self.debug,
            max_frames: self.max_frames,
            end_pause: if self.debug { Duration::ZERO } else { Duration::from_secs_f64(END_PAUSE_SECS) },
        }
    }

    pub fn debug_quit_frame(&self) -> u64 {
        self.max_frames.unwrap_or(self.fps as u64 * 10)
    }
}
