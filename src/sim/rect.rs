//! Axis-aligned rectangles in screen space
//!
//! Y grows downward, so `top < bottom`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn from_xywh(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            max: Vec2::new(x + w, y + h),
        }
    }

    /// Rectangle of the given half-extents around a center point
    pub fn from_center(center: Vec2, half: Vec2) -> Self {
        Self {
            min: center - half,
            max: center + half,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.min.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.max.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.min.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.max.y
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Strict overlap on the x axis (touching edges do not count)
    pub fn overlaps_x(&self, other: &Rect) -> bool {
        self.right() > other.left() && self.left() < other.right()
    }

    /// True if this rect's vertical span lies within `[top, bottom]`
    pub fn within_y(&self, top: f32, bottom: f32) -> bool {
        self.top() >= top && self.bottom() <= bottom
    }

    pub fn translate(&self, offset: Vec2) -> Self {
        Self {
            min: self.min + offset,
            max: self.max + offset,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_center() {
        let r = Rect::from_center(Vec2::new(10.0, 20.0), Vec2::new(2.0, 5.0));
        assert_eq!(r.left(), 8.0);
        assert_eq!(r.right(), 12.0);
        assert_eq!(r.top(), 15.0);
        assert_eq!(r.bottom(), 25.0);
        assert_eq!(r.center(), Vec2::new(10.0, 20.0));
    }

    #[test]
    fn test_overlaps_x_is_strict() {
        let a = Rect::from_xywh(0.0, 0.0, 10.0, 10.0);
        let touching = Rect::from_xywh(10.0, 50.0, 10.0, 10.0);
        let overlapping = Rect::from_xywh(9.0, 50.0, 10.0, 10.0);
        assert!(!a.overlaps_x(&touching));
        assert!(a.overlaps_x(&overlapping));
        assert!(overlapping.overlaps_x(&a));
    }

    #[test]
    fn test_within_y() {
        let r = Rect::from_xywh(0.0, 100.0, 10.0, 50.0);
        assert!(r.within_y(100.0, 150.0));
        assert!(!r.within_y(101.0, 150.0));
    }

    #[test]
    fn test_translate() {
        let r = Rect::from_xywh(1.0, 2.0, 3.0, 4.0).translate(Vec2::new(10.0, -2.0));
        assert_eq!(r, Rect::from_xywh(11.0, 0.0, 3.0, 4.0));
    }
}
