//! nncalc terminal front end library.

/// Interactive loop over a terminal display.
pub mod repl;
/// Script execution and reporting.
pub mod runner;
/// Key script syntax and parsing.
pub mod script;
/// Layered settings and logging setup.
pub mod settings;
/// Terminal display surface.
pub mod terminal;
