//! Axis-aligned rectangles
//!
//! Every entity in the arena is an AABB. Overlap is strict: rectangles that
//! merely share an edge do not collide.

use glam::Vec2;

/// An axis-aligned rectangle, positioned by its top-left corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Top-left corner
    pub pos: Vec2,
    /// Width and height
    pub size: Vec2,
}

impl Rect {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    /// Strict AABB overlap test. Symmetric; edge-adjacent rects do not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.pos.x < other.pos.x + other.size.x
            && self.pos.x + self.size.x > other.pos.x
            && self.pos.y < other.pos.y + other.size.y
            && self.pos.y + self.size.y > other.pos.y
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.pos += delta;
    }

    pub fn left(&self) -> f32 {
        self.pos.x
    }

    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    pub fn top(&self) -> f32 {
        self.pos.y
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn rect(x: f32, y: f32, w: f32, h: f32) -> Rect {
        Rect::new(Vec2::new(x, y), Vec2::new(w, h))
    }

    #[test]
    fn test_overlap_basic() {
        let a = rect(0.0, 0.0, 10.0, 10.0);
        let b = rect(5.0, 5.0, 10.0, 10.0);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));

        let c = rect(20.0, 20.0, 5.0, 5.0);
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_containment_is_overlap() {
        let outer = rect(0.0, 0.0, 100.0, 100.0);
        let inner = rect(40.0, 40.0, 10.0, 10.0);
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
    }

    #[test]
    fn test_edge_adjacency_is_not_overlap() {
        let a = rect(0.0, 0.0, 10.0, 10.0);
        // Shares the x=10 edge
        let right = rect(10.0, 0.0, 10.0, 10.0);
        assert!(!a.overlaps(&right));
        // Shares the y=10 edge
        let below = rect(0.0, 10.0, 10.0, 10.0);
        assert!(!a.overlaps(&below));
        // Corner contact only
        let diagonal = rect(10.0, 10.0, 10.0, 10.0);
        assert!(!a.overlaps(&diagonal));
    }

    #[test]
    fn test_translate_moves_edges() {
        let mut r = rect(5.0, 5.0, 10.0, 20.0);
        r.translate(Vec2::new(3.0, -2.0));
        assert_eq!(r.left(), 8.0);
        assert_eq!(r.right(), 18.0);
        assert_eq!(r.top(), 3.0);
        assert_eq!(r.bottom(), 23.0);
    }

    proptest! {
        #[test]
        fn overlap_is_symmetric(
            ax in -500.0f32..500.0, ay in -500.0f32..500.0,
            aw in 1.0f32..100.0, ah in 1.0f32..100.0,
            bx in -500.0f32..500.0, by in -500.0f32..500.0,
            bw in 1.0f32..100.0, bh in 1.0f32..100.0,
        ) {
            let a = rect(ax, ay, aw, ah);
            let b = rect(bx, by, bw, bh);
            prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
        }

        #[test]
        fn shift_by_own_extent_never_overlaps(
            x in -500.0f32..500.0, y in -500.0f32..500.0,
            w in 1.0f32..100.0, h in 1.0f32..100.0,
        ) {
            let a = rect(x, y, w, h);
            let mut right = a;
            right.translate(Vec2::new(w, 0.0));
            prop_assert!(!a.overlaps(&right));
            let mut below = a;
            below.translate(Vec2::new(0.0, h));
            prop_assert!(!a.overlaps(&below));
        }
    }
}
