//! Line-oriented terminal display.

#![allow(clippy::module_name_repetitions)]

use std::fmt::Display;
use std::io::{self, Write};

use calc_core::{CalcSnapshot, CalcView, Operation, SnapshotView};

/// Renders a snapshot as the three display lines.
///
/// ```text
/// top:    0
/// bottom: 53
/// disabled: subtract
/// ```
#[must_use]
pub fn render_snapshot(snapshot: &CalcSnapshot) -> String {
    let disabled: Vec<&str> = Operation::ALL
        .into_iter()
        .filter(|op| !snapshot.legality.allows(*op))
        .map(Operation::name)
        .collect();
    let disabled = if disabled.is_empty() {
        "none".to_string()
    } else {
        disabled.join(" ")
    };

    format!(
        "top:    {}\nbottom: {}\ndisabled: {}\n",
        snapshot.top, snapshot.bottom, disabled
    )
}

/// Display surface that writes to a terminal stream.
///
/// Updates are collected until [`TerminalView::flush_display`], so one
/// controller event produces one rendering instead of six.
#[derive(Debug)]
pub struct TerminalView<W> {
    inner: SnapshotView,
    pending: bool,
    out: W,
}

impl<W: Write> TerminalView<W> {
    /// Creates a view writing to `out`.
    pub fn new(out: W) -> Self {
        Self {
            inner: SnapshotView::new(),
            pending: false,
            out,
        }
    }

    /// Writes the display if anything changed since the last flush.
    ///
    /// # Errors
    ///
    /// Propagates write failures from the underlying stream.
    pub fn flush_display(&mut self) -> io::Result<()> {
        if !self.pending {
            return Ok(());
        }
        self.pending = false;
        self.out
            .write_all(render_snapshot(self.inner.snapshot()).as_bytes())?;
        self.out.flush()
    }

    /// Writes one free-form line, such as a prompt reply or an error.
    ///
    /// # Errors
    ///
    /// Propagates write failures from the underlying stream.
    pub fn message(&mut self, text: impl Display) -> io::Result<()> {
        writeln!(self.out, "{text}")
    }

    /// Returns the underlying stream.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<N: Display, W> CalcView<N> for TerminalView<W> {
    fn update_top_display(&mut self, value: &N) {
        self.inner.update_top_display(value);
        self.pending = true;
    }

    fn update_bottom_display(&mut self, value: &N) {
        self.inner.update_bottom_display(value);
        self.pending = true;
    }

    fn update_subtract_allowed(&mut self, allowed: bool) {
        CalcView::<N>::update_subtract_allowed(&mut self.inner, allowed);
        self.pending = true;
    }

    fn update_divide_allowed(&mut self, allowed: bool) {
        CalcView::<N>::update_divide_allowed(&mut self.inner, allowed);
        self.pending = true;
    }

    fn update_power_allowed(&mut self, allowed: bool) {
        CalcView::<N>::update_power_allowed(&mut self.inner, allowed);
        self.pending = true;
    }

    fn update_root_allowed(&mut self, allowed: bool) {
        CalcView::<N>::update_root_allowed(&mut self.inner, allowed);
        self.pending = true;
    }
}
