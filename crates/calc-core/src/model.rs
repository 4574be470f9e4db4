//! Two-register calculator state.

use crate::natural::NaturalNumber;

/// Identifies one of the two calculator registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum Register {
    /// Upper register, holding the left operand.
    Top,
    /// Lower register, holding the entry value and results.
    Bottom,
}

impl Register {
    /// Both registers in display order.
    pub const ALL: [Self; 2] = [Self::Top, Self::Bottom];

    /// Lowercase register name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
        }
    }
}

/// Register pair owned by a single controller.
///
/// The two registers are distinct fields, so the borrow checker rules out
/// aliasing one value into both roles.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct CalcModel<N> {
    top: N,
    bottom: N,
}

impl<N: NaturalNumber> CalcModel<N> {
    /// Creates a model with both registers at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a model seeded with the given register values.
    #[must_use]
    pub const fn with_registers(top: N, bottom: N) -> Self {
        Self { top, bottom }
    }

    /// Reads the top register.
    #[must_use]
    pub const fn top(&self) -> &N {
        &self.top
    }

    /// Reads the bottom register.
    #[must_use]
    pub const fn bottom(&self) -> &N {
        &self.bottom
    }

    /// Reads a register by identifier.
    #[must_use]
    pub const fn register(&self, reg: Register) -> &N {
        match reg {
            Register::Top => &self.top,
            Register::Bottom => &self.bottom,
        }
    }

    /// Mutable access to the top register.
    pub fn top_mut(&mut self) -> &mut N {
        &mut self.top
    }

    /// Mutable access to the bottom register.
    pub fn bottom_mut(&mut self) -> &mut N {
        &mut self.bottom
    }

    /// Splits the model into disjoint mutable `(top, bottom)` borrows.
    pub fn registers_mut(&mut self) -> (&mut N, &mut N) {
        (&mut self.top, &mut self.bottom)
    }

    /// Consumes the model, returning `(top, bottom)`.
    #[must_use]
    pub fn into_registers(self) -> (N, N) {
        (self.top, self.bottom)
    }
}
