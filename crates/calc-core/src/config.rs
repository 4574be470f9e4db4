//! Controller configuration.

/// Immutable configuration for a controller instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct CalcConfig {
    /// Rejects guarded operations whose legality flag is false with a
    /// `*Disallowed` fault instead of handing them to the register model.
    ///
    /// Off by default: guards are advisory and the event source is expected
    /// to disable the matching controls.
    pub strict_guards: bool,
}

impl CalcConfig {
    /// Configuration with guard enforcement switched on.
    #[must_use]
    pub const fn strict() -> Self {
        Self {
            strict_guards: true,
        }
    }
}
