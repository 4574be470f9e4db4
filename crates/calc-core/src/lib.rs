//! Core crate for the nncalc natural-number calculator.

/// Register model contract and arbitrary-precision implementation.
pub mod natural;
pub use natural::{BigNatural, NaturalNumber, ParseNaturalError, INT_LIMIT};

/// Two-register calculator state.
pub mod model;
pub use model::{CalcModel, Register};

/// Fault taxonomy for calculator operations.
pub mod fault;
pub use fault::{Fault, FaultClass};

/// Legality vector and guard evaluation.
pub mod guard;
pub use guard::{evaluate, Legality, Operation};

/// User events accepted by the controller.
pub mod event;
pub use event::CalcEvent;

/// Display surface contract and headless snapshot view.
pub mod view;
pub use view::{CalcSnapshot, CalcView, SnapshotView};

/// Controller configuration.
pub mod config;
pub use config::CalcConfig;

/// Event dispatch and register transformations.
pub mod controller;
pub use controller::CalcController;

#[cfg(test)]
use proptest as _;
