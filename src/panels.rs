//! Deck-builder panel visibility state machine.
//!
//! DESIGN
//! ======
//! Panel flags are a pure function of the layout tier until the user
//! toggles a panel. A resize always discards toggle choices and snaps back
//! to the canonical row for the new tier; toggles apply tier-aware rules
//! on top of whatever the current state is.
//!
//! INVARIANTS
//! ==========
//! - At least one of the deck/collection panels is visible.
//! - `stats_visible == !(collection_visible && !deck_visible)` after every
//!   transition: stats hide only when the collection is shown alone.
//! - Medium screens never show both main panels through a toggle.

use tracing::debug;

use crate::viewport::LayoutTier;

#[cfg(test)]
#[path = "panels_test.rs"]
mod tests;

// =============================================================================
// TYPES
// =============================================================================

/// A main panel the user can toggle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PanelTarget {
    Deck,
    Collection,
}

impl PanelTarget {
    /// The panel that is not `self`.
    #[must_use]
    pub fn other(self) -> Self {
        match self {
            Self::Deck => Self::Collection,
            Self::Collection => Self::Deck,
        }
    }
}

/// Visibility flags for the deck-builder regions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PanelState {
    pub deck_visible: bool,
    pub collection_visible: bool,
    pub stats_visible: bool,
    pub toggles_visible: bool,
}

impl PanelState {
    /// Canonical state for a tier, as applied on mount and on every resize.
    #[must_use]
    pub fn for_tier(tier: LayoutTier) -> Self {
        match tier {
            LayoutTier::Narrow => Self {
                deck_visible: true,
                collection_visible: false,
                stats_visible: true,
                toggles_visible: false,
            },
            LayoutTier::Medium => Self {
                deck_visible: false,
                collection_visible: true,
                stats_visible: false,
                toggles_visible: true,
            },
            LayoutTier::Wide => Self {
                deck_visible: true,
                collection_visible: true,
                stats_visible: true,
                toggles_visible: true,
            },
        }
    }

    /// Whether `target` is currently shown.
    #[must_use]
    pub fn is_visible(&self, target: PanelTarget) -> bool {
        match target {
            PanelTarget::Deck => self.deck_visible,
            PanelTarget::Collection => self.collection_visible,
        }
    }

    fn set_visible(&mut self, target: PanelTarget, visible: bool) {
        match target {
            PanelTarget::Deck => self.deck_visible = visible,
            PanelTarget::Collection => self.collection_visible = visible,
        }
    }

    /// Stats are hidden only when the collection is shown without the deck.
    #[must_use]
    pub fn derived_stats_visible(&self) -> bool {
        !(self.collection_visible && !self.deck_visible)
    }
}

// =============================================================================
// CONTROLLER
// =============================================================================

/// Owns the panel flags for one deck-builder instance.
#[derive(Clone, Debug)]
pub struct PanelVisibilityController {
    tier: LayoutTier,
    state: PanelState,
}

impl PanelVisibilityController {
    /// Build a controller for the initial viewport width.
    #[must_use]
    pub fn new(width: u32) -> Self {
        Self::with_tier(LayoutTier::from_width(width))
    }

    #[must_use]
    pub fn with_tier(tier: LayoutTier) -> Self {
        let mut controller = Self { tier, state: PanelState::for_tier(tier) };
        controller.apply_tier(tier);
        controller
    }

    #[must_use]
    pub fn tier(&self) -> LayoutTier {
        self.tier
    }

    #[must_use]
    pub fn state(&self) -> PanelState {
        self.state
    }

    /// Reclassify the viewport and recompute every flag from scratch.
    pub fn on_resize(&mut self, width: u32) -> PanelState {
        self.apply_tier(LayoutTier::from_width(width));
        self.state
    }

    /// Snap to the canonical row for `tier`. Idempotent.
    pub fn apply_tier(&mut self, tier: LayoutTier) -> PanelState {
        self.tier = tier;
        self.state = PanelState::for_tier(tier);
        debug!(
            ?tier,
            stats_visible = self.state.stats_visible,
            toggles_visible = self.state.toggles_visible,
            "panel layout recomputed"
        );
        self.state
    }

    /// Apply a user toggle of `target`.
    ///
    /// Not idempotent: two identical toggles usually return to the prior state.
    pub fn change_view(&mut self, target: PanelTarget) -> PanelState {
        let other = target.other();
        let flipped = !self.state.is_visible(target);
        self.state.set_visible(target, flipped);

        if self.tier == LayoutTier::Medium && self.state.deck_visible && self.state.collection_visible {
            // Only one main panel fits: evict the other one.
            self.state.set_visible(other, false);
            self.state.stats_visible = self.state.deck_visible;
            return self.state;
        }

        if !self.state.is_visible(other) {
            self.state.set_visible(other, true);
        }
        self.state.stats_visible = self.state.derived_stats_visible();
        self.state
    }
}
