#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vector2D {
    pub x: f64,
    pub y: f64,
}

impl Vector2D {
    pub const ZERO: Vector2D = Vector2D { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Vector2D { x, y }
    }

    /// Unit vector for an angle in degrees, counter-clockwise on screen
    /// (y grows downward, so the y component is negated).
    pub fn from_angle_deg(degrees: f64) -> Self {
        let radians = degrees.to_radians();
        Vector2D::new(radians.cos(), -radians.sin())
    }

    pub fn scale(&self, scalar: f64) -> Self {
        Vector2D::new(self.x * scalar, self.y * scalar)
    }

    pub fn add(&self, other: Vector2D) -> Self {
        Vector2D::new(self.x + other.x, self.y + other.y)
    }

    pub fn sub(&self, other: Vector2D) -> Self {
        Vector2D::new(self.x - other.x, self.y - other.y)
    }

    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    pub fn angle_deg(&self) -> f64 {
        (-self.y).atan2(self.x).to_degrees()
    }
}

pub fn distance(org: Vector2D, dst: Vector2D) -> f64 {
    dst.sub(org).length()
}

/// Unit vector pointing from `org` to `dst`, or `None` when the points
/// coincide and no direction exists.
pub fn direction_to(org: Vector2D, dst: Vector2D) -> Option<Vector2D> {
    let diff = dst.sub(org);
    let norm = diff.length();
    if norm <= f64::EPSILON {
        return None;
    }
    Some(diff.scale(1.0 / norm))
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub center: Vector2D,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn centered(center: Vector2D, width: f64, height: f64) -> Self {
        Rect { center, width, height }
    }

    pub fn left(&self) -> f64 {
        self.center.x - self.width / 2.0
    }

    pub fn right(&self) -> f64 {
        self.center.x + self.width / 2.0
    }

    pub fn top(&self) -> f64 {
        self.center.y - self.height / 2.0
    }

    pub fn bottom(&self) -> f64 {
        self.center.y + self.height / 2.0
    }

    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }
}
