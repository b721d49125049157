//! Scroll position of the main pane.
//!
//! This is presentation state, kept out of `NavigationState`: listing mode
//! follows the cursor row, viewing mode scrolls freely.

/// Vertical scroll offset into the display lines.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Viewport {
    offset: usize,
    /// Set by `scroll_to_end`; resolved once the line count is known.
    pin_to_end: bool,
}

impl Viewport {
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Back to the top, forgetting any pending scroll-to-end.
    pub fn reset(&mut self) {
        self.offset = 0;
        self.pin_to_end = false;
    }

    pub fn scroll_by(&mut self, delta: isize) {
        self.pin_to_end = false;
        self.offset = self.offset.saturating_add_signed(delta);
    }

    pub fn scroll_to_top(&mut self) {
        self.reset();
    }

    pub fn scroll_to_end(&mut self) {
        self.pin_to_end = true;
    }

    /// Clamp to `[0, total - visible]`, resolving a pending scroll-to-end.
    pub fn clamp(&mut self, total: usize, visible: usize) {
        let max = total.saturating_sub(visible);
        if self.pin_to_end {
            self.offset = max;
            self.pin_to_end = false;
        } else {
            self.offset = self.offset.min(max);
        }
    }

    /// Adjust so that `row` lies within `visible` rows of the offset.
    pub fn follow(&mut self, row: usize, visible: usize) {
        self.pin_to_end = false;
        if visible == 0 {
            return;
        }
        if row < self.offset {
            self.offset = row;
        } else if row >= self.offset + visible {
            self.offset = row + 1 - visible;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scroll_by_saturates_at_zero() {
        let mut vp = Viewport::default();
        vp.scroll_by(-3);
        assert_eq!(vp.offset(), 0);
        vp.scroll_by(2);
        assert_eq!(vp.offset(), 2);
    }

    #[test]
    fn clamp_limits_offset() {
        let mut vp = Viewport::default();
        vp.scroll_by(50);
        vp.clamp(30, 24);
        assert_eq!(vp.offset(), 6);
        vp.clamp(10, 24);
        assert_eq!(vp.offset(), 0);
    }

    #[test]
    fn scroll_to_end_resolves_on_clamp() {
        let mut vp = Viewport::default();
        vp.scroll_to_end();
        assert_eq!(vp.offset(), 0);
        vp.clamp(40, 24);
        assert_eq!(vp.offset(), 16);
        vp.scroll_to_top();
        assert_eq!(vp.offset(), 0);
    }

    #[test]
    fn follow_keeps_row_visible() {
        let mut vp = Viewport::default();
        vp.follow(30, 10);
        assert_eq!(vp.offset(), 21);
        vp.follow(25, 10);
        assert_eq!(vp.offset(), 21);
        vp.follow(3, 10);
        assert_eq!(vp.offset(), 3);
    }
}
