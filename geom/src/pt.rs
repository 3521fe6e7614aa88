/// Meters east and north in a local equirectangular frame. Points are only comparable with
/// others projected around the same reference latitude.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pt2D {
    x: f64,
    y: f64,
}

impl Pt2D {
    pub fn new(x: f64, y: f64) -> Pt2D {
        Pt2D { x, y }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn dist_to(self, other: Pt2D) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Shifted by `dx` meters east and `dy` meters north
    pub fn offset(self, dx: f64, dy: f64) -> Pt2D {
        Pt2D::new(self.x + dx, self.y + dy)
    }
}
