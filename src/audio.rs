use log::debug;

use crate::assets::SoundHandle;
use crate::constants::VOLUME_RANGE;
use crate::types::{Vector2D, distance};

pub trait AudioSink {
    fn play(&mut self, sound: SoundHandle, volume: f64);
}

/// Linear falloff with distance from the camera center, silent past `range`.
pub fn attenuated_volume(source: Vector2D, listener: Vector2D, range: f64) -> f64 {
    ((range - distance(source, listener)) / range).max(0.0)
}

pub fn play_at(sink: &mut dyn AudioSink, sound: SoundHandle, source: Vector2D, listener: Vector2D) {
    let volume = attenuated_volume(source, listener, VOLUME_RANGE);
    if volume > 0.0 {
        sink.play(sound, volume);
    }
}

// Terminals have no mixer; every cue goes to the log.
#[derive(Debug, Default)]
pub struct LoggedAudio;

impl AudioSink for LoggedAudio {
    fn play(&mut self, sound: SoundHandle, volume: f64) {
        debug!("Sound {:?} at volume {:.2}", sound, volume);
    }
}
