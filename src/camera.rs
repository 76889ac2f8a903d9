use crate::constants::*;
use crate::types::{Rect, Vector2D};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MovementArea {
    pub width: f64,
    pub height: f64,
}

impl Default for MovementArea {
    fn default() -> Self {
        MovementArea { width: MOVEMENT_AREA_WIDTH, height: MOVEMENT_AREA_HEIGHT }
    }
}

impl MovementArea {
    pub fn new(width: f64, height: f64) -> Self {
        MovementArea { width, height }
    }

    pub fn half_width(&self) -> f64 {
        self.width / 2.0
    }

    pub fn half_height(&self) -> f64 {
        self.height / 2.0
    }

    pub fn contains_x(&self, x: f64) -> bool {
        x.abs() <= self.half_width()
    }

    pub fn contains_y(&self, y: f64) -> bool {
        y.abs() <= self.half_height()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub center: Vector2D,
    pub viewport_width: f64,
    pub viewport_height: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Camera::new(VIEWPORT_WIDTH, VIEWPORT_HEIGHT)
    }
}

impl Camera {
    pub fn new(viewport_width: f64, viewport_height: f64) -> Self {
        Camera { center: Vector2D::ZERO, viewport_width, viewport_height }
    }

    pub fn half_size(&self) -> Vector2D {
        Vector2D::new(self.viewport_width / 2.0, self.viewport_height / 2.0)
    }

    /// Centers on `target`, clamped so the view never leaves `area`.
    pub fn follow(&mut self, target: Vector2D, area: &MovementArea) {
        let half = self.half_size();
        self.center = Vector2D::new(
            clamp_axis(target.x, area.half_width() - half.x),
            clamp_axis(target.y, area.half_height() - half.y),
        );
    }

    pub fn to_screen(&self, world: Vector2D) -> Vector2D {
        world.sub(self.center).add(self.half_size())
    }

    pub fn to_world(&self, screen: Vector2D) -> Vector2D {
        screen.sub(self.half_size()).add(self.center)
    }

    pub fn rect_to_screen(&self, rect: &Rect) -> Rect {
        Rect::centered(self.to_screen(rect.center), rect.width, rect.height)
    }

    pub fn view_rect(&self) -> Rect {
        Rect::centered(self.center, self.viewport_width, self.viewport_height)
    }

    pub fn is_visible(&self, rect: &Rect) -> bool {
        self.view_rect().overlaps(rect)
    }
}

fn clamp_axis(value: f64, limit: f64) -> f64 {
    if limit <= 0.0 {
        // Area narrower than the viewport on this axis.
        return 0.0;
    }
    value.clamp(-limit, limit)
}

#[derive(Clone, Copy, Debug)]
pub struct Background {
    pub tile_size: f64,
}

impl Default for Background {
    fn default() -> Self {
        Background { tile_size: BACKGROUND_TILE_SIZE }
    }
}

impl Background {
    pub fn visible_tiles(&self, camera: &Camera) -> Vec<Vector2D> {
        let view = camera.view_rect();
        let first_col = (view.left() / self.tile_size).floor() as i64;
        let last_col = (view.right() / self.tile_size).floor() as i64;
        let first_row = (view.top() / self.tile_size).floor() as i64;
        let last_row = (view.bottom() / self.tile_size).floor() as i64;

        let mut tiles = Vec::new();
        for row in first_row..=last_row {
            for col in first_col..=last_col {
                tiles.push(Vector2D::new(
                    (col as f64 + 0.5) * self.tile_size,
                    (row as f64 + 0.5) * self.tile_size,
                ));
            }
        }
        tiles
    }
}
