//! "Has this element been on screen yet?" for enter-once animations.
//!
//! One `VisibilityObserver` per element; feed it the element's and the
//! viewport's bounding boxes whenever either moves (scroll, resize). Once the
//! element touches the viewport the observer stays `true` for good.

/// Root margin used by the call-to-action section
pub const CTA_MARGIN: f64 = -100.0;
/// Root margin used by scroll reveals
pub const REVEAL_MARGIN: f64 = -50.0;

/// Axis-aligned box in CSS pixels, in the same coordinate space for element
/// and viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(
        top: f64,
        left: f64,
        width: f64,
        height: f64,
    ) -> Self {
        Self {
            top,
            left,
            width,
            height,
        }
    }

    pub fn bottom(&self) -> f64 { self.top + self.height }

    pub fn right(&self) -> f64 { self.left + self.width }

    /// Grow every side by `margin` (shrink if negative).
    pub fn expand(
        &self,
        margin: f64,
    ) -> Self {
        Self {
            top: self.top - margin,
            left: self.left - margin,
            width: self.width + 2.0 * margin,
            height: self.height + 2.0 * margin,
        }
    }

    /// Touching edges count, matching a zero threshold intersection observer.
    pub fn intersects(
        &self,
        other: &Rect,
    ) -> bool {
        self.top <= other.bottom()
            && self.bottom() >= other.top
            && self.left <= other.right()
            && self.right() >= other.left
    }
}

#[derive(Debug, Clone)]
pub struct VisibilityObserver {
    margin: f64,
    seen: bool,
}

impl VisibilityObserver {
    pub fn new(margin: f64) -> Self {
        Self {
            margin,
            seen: false,
        }
    }

    pub fn has_been_seen(&self) -> bool { self.seen }

    /// Returns whether the element has been seen, now or at any earlier call.
    pub fn observe(
        &mut self,
        element: Rect,
        viewport: Rect,
    ) -> bool {
        if self.seen {
            return true;
        }
        let root = viewport.expand(self.margin);
        // a margin can shrink the viewport to nothing
        if root.width <= 0.0 || root.height <= 0.0 {
            return false;
        }
        self.seen = element.intersects(&root);
        self.seen
    }
}
