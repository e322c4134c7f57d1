//! Viewport classification for responsive layouts.
//!
//! DESIGN
//! ======
//! Layout decisions key off a coarse tier rather than raw pixel widths so
//! the panel controller only has to reason about three cases.

#[cfg(test)]
#[path = "viewport_test.rs"]
mod tests;

/// Smallest width (px) classified as [`LayoutTier::Medium`].
pub const MEDIUM_MIN_WIDTH: u32 = 768;

/// Smallest width (px) classified as [`LayoutTier::Wide`].
pub const WIDE_MIN_WIDTH: u32 = 1024;

/// Discrete viewport-width classification driving the deck-builder layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LayoutTier {
    /// Phone-sized screens: deck only.
    Narrow,
    /// Tablet-sized screens: room for one main panel at a time.
    Medium,
    /// Desktop screens: both panels side by side.
    Wide,
}

impl LayoutTier {
    /// Classify a viewport width in pixels.
    #[must_use]
    pub fn from_width(width: u32) -> Self {
        if width < MEDIUM_MIN_WIDTH {
            Self::Narrow
        } else if width < WIDE_MIN_WIDTH {
            Self::Medium
        } else {
            Self::Wide
        }
    }
}
