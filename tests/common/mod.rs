#![allow(dead_code)]

use rand::SeedableRng;
use rand::rngs::StdRng;

use survive::assets::{Assets, ImageHandle, SoundHandle};
use survive::audio::AudioSink;
use survive::rendering::{GlyphSheet, Renderer, TextAnchor};
use survive::types::{Rect, Vector2D};

pub fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

pub fn assets() -> Assets {
    let mut sheet = GlyphSheet::default();
    Assets::load(&mut sheet).expect("glyph sheet knows every asset")
}

pub fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

pub fn close_vec(a: Vector2D, b: Vector2D) -> bool {
    close(a.x, b.x) && close(a.y, b.y)
}

#[derive(Default)]
pub struct RecordingAudio {
    pub played: Vec<(SoundHandle, f64)>,
}

impl AudioSink for RecordingAudio {
    fn play(&mut self, sound: SoundHandle, volume: f64) {
        self.played.push((sound, volume));
    }
}

#[derive(Default)]
pub struct RecordingRenderer {
    pub images: Vec<(ImageHandle, Rect)>,
    pub bars: Vec<(Rect, f64)>,
    pub texts: Vec<(String, TextAnchor)>,
    pub presented: usize,
}

impl Renderer for RecordingRenderer {
    fn begin_frame(&mut self) {
        self.images.clear();
        self.bars.clear();
        self.texts.clear();
    }

    fn draw_image(&mut self, image: ImageHandle, rect: &Rect) {
        self.images.push((image, *rect));
    }

    fn draw_bar(&mut self, rect: &Rect, ratio: f64) {
        self.bars.push((*rect, ratio));
    }

    fn draw_text(&mut self, text: &str, anchor: TextAnchor) {
        self.texts.push((text.to_string(), anchor));
    }

    fn present(&mut self) -> std::io::Result<()> {
        self.presented += 1;
        Ok(())
    }
}
