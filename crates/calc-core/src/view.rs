//! Display surface contract and a headless snapshot implementation.

use std::fmt;

use crate::guard::Legality;

/// Display surface notified after every controller event.
///
/// All notifications are fire-and-forget.
pub trait CalcView<N> {
    /// Shows the new top register value.
    fn update_top_display(&mut self, value: &N);
    /// Shows the new bottom register value.
    fn update_bottom_display(&mut self, value: &N);
    /// Enables or disables the subtract control.
    fn update_subtract_allowed(&mut self, allowed: bool);
    /// Enables or disables the divide control.
    fn update_divide_allowed(&mut self, allowed: bool);
    /// Enables or disables the power control.
    fn update_power_allowed(&mut self, allowed: bool);
    /// Enables or disables the root control.
    fn update_root_allowed(&mut self, allowed: bool);
}

impl<N, V: CalcView<N> + ?Sized> CalcView<N> for &mut V {
    fn update_top_display(&mut self, value: &N) {
        (**self).update_top_display(value);
    }

    fn update_bottom_display(&mut self, value: &N) {
        (**self).update_bottom_display(value);
    }

    fn update_subtract_allowed(&mut self, allowed: bool) {
        (**self).update_subtract_allowed(allowed);
    }

    fn update_divide_allowed(&mut self, allowed: bool) {
        (**self).update_divide_allowed(allowed);
    }

    fn update_power_allowed(&mut self, allowed: bool) {
        (**self).update_power_allowed(allowed);
    }

    fn update_root_allowed(&mut self, allowed: bool) {
        (**self).update_root_allowed(allowed);
    }
}

/// Everything a display shows: both registers in decimal plus the guards.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct CalcSnapshot {
    /// Top register in decimal.
    pub top: String,
    /// Bottom register in decimal.
    pub bottom: String,
    /// Legality vector pushed with the registers.
    pub legality: Legality,
}

impl Default for CalcSnapshot {
    fn default() -> Self {
        Self {
            top: "0".to_string(),
            bottom: "0".to_string(),
            legality: Legality::default(),
        }
    }
}

/// Headless display surface that keeps the most recent snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnapshotView {
    snapshot: CalcSnapshot,
}

impl SnapshotView {
    /// Creates a view showing zero in both registers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Latest state pushed by the controller.
    #[must_use]
    pub const fn snapshot(&self) -> &CalcSnapshot {
        &self.snapshot
    }
}

impl<N: fmt::Display> CalcView<N> for SnapshotView {
    fn update_top_display(&mut self, value: &N) {
        self.snapshot.top = value.to_string();
    }

    fn update_bottom_display(&mut self, value: &N) {
        self.snapshot.bottom = value.to_string();
    }

    fn update_subtract_allowed(&mut self, allowed: bool) {
        self.snapshot.legality.subtract = allowed;
    }

    fn update_divide_allowed(&mut self, allowed: bool) {
        self.snapshot.legality.divide = allowed;
    }

    fn update_power_allowed(&mut self, allowed: bool) {
        self.snapshot.legality.power = allowed;
    }

    fn update_root_allowed(&mut self, allowed: bool) {
        self.snapshot.legality.root = allowed;
    }
}
