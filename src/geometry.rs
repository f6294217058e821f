/// Integer tiling math.
///
/// World coordinates go negative (the camera starts left of the origin), so
/// tile lookups need floor semantics rather than Rust's truncating `/` and `%`.

/// Division rounding toward negative infinity.
pub fn floor_div(x: i32, y: i32) -> i32 {
    let d = x / y;
    if x % y != 0 && ((x < 0) != (y < 0)) {
        d - 1
    } else {
        d
    }
}

/// Remainder paired with [`floor_div`]; takes the sign of `y`.
pub fn floor_mod(x: i32, y: i32) -> i32 {
    x - floor_div(x, y) * y
}

/// Axis-aligned bounding box in world pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Rect { x, y, w, h }
    }

    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    /// Interior overlap; rectangles sharing only an edge do not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    pub fn overlaps_vertically(&self, other: &Rect) -> bool {
        self.y < other.bottom() && other.y < self.bottom()
    }

    pub fn overlaps_horizontally(&self, other: &Rect) -> bool {
        self.x < other.right() && other.x < self.right()
    }
}
