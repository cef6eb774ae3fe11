use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub const fn splat(v: f32) -> Self {
        Self { x: v, y: v }
    }

    pub fn min(self, o: Vec2) -> Vec2 {
        Vec2::new(self.x.min(o.x), self.y.min(o.y))
    }

    pub fn max(self, o: Vec2) -> Vec2 {
        Vec2::new(self.x.max(o.x), self.y.max(o.y))
    }

    /// Drops the fractional part of both axes (rounds toward zero).
    pub fn trunc(self) -> Vec2 {
        Vec2::new(self.x.trunc(), self.y.trunc())
    }

    pub fn length_sqr(self) -> f32 {
        self.x * self.x + self.y * self.y
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    fn add(self, o: Vec2) -> Vec2 {
        Vec2::new(self.x + o.x, self.y + o.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, o: Vec2) {
        self.x += o.x;
        self.y += o.y;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, o: Vec2) -> Vec2 {
        Vec2::new(self.x - o.x, self.y - o.y)
    }
}

impl SubAssign for Vec2 {
    fn sub_assign(&mut self, o: Vec2) {
        self.x -= o.x;
        self.y -= o.y;
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;
    fn mul(self, s: f32) -> Vec2 {
        Vec2::new(self.x * s, self.y * s)
    }
}

impl From<(f32, f32)> for Vec2 {
    fn from((x, y): (f32, f32)) -> Self {
        Vec2::new(x, y)
    }
}

/// Axis aligned box covering `[min, max)` on both axes.
///
/// `Rect::default()` is the inverted box (`min = +MAX`, `max = -MAX`), the
/// starting point for accumulating a bounding box with [`Rect::add`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    /// Upper-left
    pub min: Vec2,
    /// Lower-right
    pub max: Vec2,
}

impl Default for Rect {
    fn default() -> Self {
        Self::INVERTED
    }
}

impl Rect {
    pub const INVERTED: Rect = Rect {
        min: Vec2::splat(f32::MAX),
        max: Vec2::splat(-f32::MAX),
    };

    pub const fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub const fn from_coords(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self {
            min: Vec2::new(x1, y1),
            max: Vec2::new(x2, y2),
        }
    }

    pub fn from_min_size(min: Vec2, size: Vec2) -> Self {
        Self::new(min, min + size)
    }

    pub fn is_inverted(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }
    pub fn tl(&self) -> Vec2 {
        self.min
    }
    pub fn tr(&self) -> Vec2 {
        Vec2::new(self.max.x, self.min.y)
    }
    pub fn bl(&self) -> Vec2 {
        Vec2::new(self.min.x, self.max.y)
    }
    pub fn br(&self) -> Vec2 {
        self.max
    }

    /// Min edges are inside, max edges are not.
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.y >= self.min.y && p.x < self.max.x && p.y < self.max.y
    }

    pub fn contains_rect(&self, r: &Rect) -> bool {
        r.min.x >= self.min.x && r.min.y >= self.min.y && r.max.x < self.max.x && r.max.y < self.max.y
    }

    pub fn overlaps(&self, r: &Rect) -> bool {
        r.min.y < self.max.y && r.max.y > self.min.y && r.min.x < self.max.x && r.max.x > self.min.x
    }

    /// Grows the box so that `p` lies within it.
    pub fn add(&mut self, p: Vec2) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }

    pub fn add_rect(&mut self, r: &Rect) {
        self.min = self.min.min(r.min);
        self.max = self.max.max(r.max);
    }

    pub fn expand(&mut self, amount: f32) {
        self.expand_xy(Vec2::splat(amount));
    }

    pub fn expand_xy(&mut self, amount: Vec2) {
        self.min -= amount;
        self.max += amount;
    }

    pub fn reduce(&mut self, amount: Vec2) {
        self.min += amount;
        self.max -= amount;
    }

    pub fn translate(&mut self, d: Vec2) {
        self.min += d;
        self.max += d;
    }

    /// Pulls each edge inward to fit `bound`; never moves an edge outward.
    pub fn clip(&mut self, bound: &Rect) {
        if self.min.x < bound.min.x {
            self.min.x = bound.min.x;
        }
        if self.min.y < bound.min.y {
            self.min.y = bound.min.y;
        }
        if self.max.x > bound.max.x {
            self.max.x = bound.max.x;
        }
        if self.max.y > bound.max.y {
            self.max.y = bound.max.y;
        }
    }

    /// Truncates every coordinate toward zero. Negative coordinates move up,
    /// not down: -1.5 becomes -1.0.
    pub fn floor(&mut self) {
        self.min = self.min.trunc();
        self.max = self.max.trunc();
    }

    /// Returns `p` as-is when it lies inside (and `on_edge` is false),
    /// otherwise clamps each axis to the nearest edge.
    pub fn closest_point(&self, p: Vec2, on_edge: bool) -> Vec2 {
        if !on_edge && self.contains(p) {
            return p;
        }
        let mut out = p;
        if out.x > self.max.x {
            out.x = self.max.x;
        } else if out.x < self.min.x {
            out.x = self.min.x;
        }
        if out.y > self.max.y {
            out.y = self.max.y;
        } else if out.y < self.min.y {
            out.y = self.min.y;
        }
        out
    }
}

impl std::fmt::Display for Rect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "min: ({}, {}), max: ({}, {})",
            self.min.x, self.min.y, self.max.x, self.max.y
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(x1: f32, y1: f32, x2: f32, y2: f32) -> Rect {
        Rect::from_coords(x1, y1, x2, y2)
    }

    #[test]
    fn test_rect_contains_half_open() {
        let rect = r(10.0, 10.0, 110.0, 60.0);

        assert!(rect.contains(Vec2::new(10.0, 10.0)));
        assert!(rect.contains(Vec2::new(50.0, 30.0)));
        assert!(!rect.contains(Vec2::new(110.0, 30.0)));
        assert!(!rect.contains(Vec2::new(50.0, 60.0)));
        assert!(!rect.contains(Vec2::new(5.0, 30.0)));
    }

    #[test]
    fn test_rect_contains_rect() {
        let outer = r(0.0, 0.0, 10.0, 10.0);
        assert!(outer.contains_rect(&r(0.0, 0.0, 9.0, 9.0)));
        assert!(!outer.contains_rect(&r(0.0, 0.0, 10.0, 9.0)));
        assert!(!outer.contains_rect(&r(-1.0, 0.0, 5.0, 5.0)));
    }

    #[test]
    fn test_overlaps_is_symmetric() {
        let cases = [
            (r(0.0, 0.0, 10.0, 10.0), r(5.0, 5.0, 15.0, 15.0)),
            (r(0.0, 0.0, 10.0, 10.0), r(10.0, 0.0, 20.0, 10.0)),
            (r(0.0, 0.0, 10.0, 10.0), r(2.0, 2.0, 3.0, 3.0)),
            (r(0.0, 0.0, 1.0, 1.0), r(5.0, 5.0, 6.0, 6.0)),
            (Rect::INVERTED, r(0.0, 0.0, 1.0, 1.0)),
        ];
        for (a, b) in cases {
            assert_eq!(a.overlaps(&b), b.overlaps(&a), "{a} vs {b}");
        }
        // touching edges do not overlap
        assert!(!cases[1].0.overlaps(&cases[1].1));
        assert!(cases[0].0.overlaps(&cases[0].1));
    }

    #[test]
    fn test_add_points_from_inverted_gives_bounding_box() {
        let pts = [
            Vec2::new(3.0, -2.0),
            Vec2::new(-4.0, 7.5),
            Vec2::new(1.0, 1.0),
            Vec2::new(9.0, 0.0),
        ];
        let mut bb = Rect::default();
        assert!(bb.is_inverted());
        for p in pts {
            bb.add(p);
        }
        assert_eq!(bb, r(-4.0, -2.0, 9.0, 7.5));
    }

    #[test]
    fn test_add_single_point_is_degenerate_box() {
        let mut bb = Rect::default();
        bb.add(Vec2::new(2.0, 3.0));
        assert_eq!(bb.min, bb.max);
    }

    #[test]
    fn test_expand_reduce_clip() {
        let mut a = r(0.0, 0.0, 10.0, 10.0);
        a.expand(2.0);
        assert_eq!(a, r(-2.0, -2.0, 12.0, 12.0));
        a.reduce(Vec2::new(2.0, 1.0));
        assert_eq!(a, r(0.0, -1.0, 10.0, 11.0));
        a.clip(&r(1.0, 0.0, 100.0, 5.0));
        assert_eq!(a, r(1.0, 0.0, 10.0, 5.0));

        // clip never grows
        let mut small = r(4.0, 4.0, 5.0, 5.0);
        small.clip(&r(0.0, 0.0, 100.0, 100.0));
        assert_eq!(small, r(4.0, 4.0, 5.0, 5.0));
    }

    #[test]
    fn test_floor_truncates_toward_zero() {
        let mut a = r(-1.5, -0.7, 2.9, 3.1);
        a.floor();
        assert_eq!(a, r(-1.0, 0.0, 2.0, 3.0));
    }

    #[test]
    fn test_closest_point() {
        let a = r(0.0, 0.0, 10.0, 10.0);
        assert_eq!(a.closest_point(Vec2::new(5.0, 5.0), false), Vec2::new(5.0, 5.0));
        assert_eq!(a.closest_point(Vec2::new(15.0, -3.0), false), Vec2::new(10.0, 0.0));
        // inside but on_edge requested: each axis only clamps when outside
        assert_eq!(a.closest_point(Vec2::new(5.0, 5.0), true), Vec2::new(5.0, 5.0));
        assert_eq!(a.closest_point(Vec2::new(-1.0, 5.0), true), Vec2::new(0.0, 5.0));
    }
}
