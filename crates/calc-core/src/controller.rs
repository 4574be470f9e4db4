//! Event dispatch for the two-register calculator.
//!
//! Every handler follows the same sequence:
//! 1. Check the guard (strict mode only)
//! 2. Convert bounded-integer arguments out of `bottom`
//! 3. Move `top` into a transient and combine it with `bottom`
//! 4. Move the result into `bottom`
//! 5. Recompute legality and refresh the view
//!
//! Faults are precise: a failing handler restores the transient into `top`
//! and returns before refreshing, so neither register is partially updated.

use tracing::{debug, warn};

use crate::guard::{self, Legality, Operation};
use crate::natural::NaturalNumber;
use crate::{CalcConfig, CalcEvent, CalcModel, CalcView, Fault};

/// Mediates between an event source, the register model and a display.
#[derive(Debug)]
pub struct CalcController<N, V> {
    model: CalcModel<N>,
    view: V,
    config: CalcConfig,
    legality: Legality,
}

impl<N, V> CalcController<N, V>
where
    N: NaturalNumber,
    V: CalcView<N>,
{
    /// Connects a model and a view with advisory-only guards.
    ///
    /// The view is refreshed before this returns.
    pub fn new(model: CalcModel<N>, view: V) -> Self {
        Self::with_config(model, view, CalcConfig::default())
    }

    /// Connects a model and a view with an explicit configuration.
    pub fn with_config(model: CalcModel<N>, view: V, config: CalcConfig) -> Self {
        let mut controller = Self {
            model,
            view,
            config,
            legality: Legality::default(),
        };
        controller.refresh_view();
        controller
    }

    /// Current register pair.
    pub const fn model(&self) -> &CalcModel<N> {
        &self.model
    }

    /// Connected display surface.
    pub const fn view(&self) -> &V {
        &self.view
    }

    /// Mutable access to the display, for surfaces that buffer output.
    pub const fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// Active configuration.
    pub const fn config(&self) -> CalcConfig {
        self.config
    }

    /// Legality vector last pushed to the view.
    pub const fn legality(&self) -> Legality {
        self.legality
    }

    /// Disconnects, returning the model and the view.
    pub fn into_parts(self) -> (CalcModel<N>, V) {
        (self.model, self.view)
    }

    /// Routes an event to its handler.
    ///
    /// # Errors
    ///
    /// Returns whatever fault the handler raises.
    pub fn dispatch(&mut self, event: CalcEvent) -> Result<(), Fault> {
        debug!(%event, "dispatching");
        match event {
            CalcEvent::Clear => self.on_clear(),
            CalcEvent::Swap => self.on_swap(),
            CalcEvent::Enter => self.on_enter(),
            CalcEvent::Add => self.on_add(),
            CalcEvent::Subtract => self.on_subtract()?,
            CalcEvent::Multiply => self.on_multiply(),
            CalcEvent::Divide => self.on_divide()?,
            CalcEvent::Power => self.on_power()?,
            CalcEvent::Root => self.on_root()?,
            CalcEvent::AppendDigit(digit) => self.on_append_digit(digit)?,
        }
        Ok(())
    }

    /// `bottom <- 0`.
    pub fn on_clear(&mut self) {
        self.model.bottom_mut().clear();
        self.refresh_view();
    }

    /// Exchanges `top` and `bottom` through an owned temporary.
    pub fn on_swap(&mut self) {
        let (top, bottom) = self.model.registers_mut();
        let mut temp = N::default();
        temp.transfer_from(top);
        top.transfer_from(bottom);
        bottom.transfer_from(&mut temp);
        self.refresh_view();
    }

    /// `top <- copy(bottom)`.
    pub fn on_enter(&mut self) {
        let (top, bottom) = self.model.registers_mut();
        top.copy_from(bottom);
        self.refresh_view();
    }

    /// `bottom <- top + bottom`, `top <- 0`.
    pub fn on_add(&mut self) {
        let mut temp = self.take_top();
        temp.add(self.model.bottom());
        self.store_bottom(temp);
        self.refresh_view();
    }

    /// `bottom <- top - bottom`, `top <- 0`.
    ///
    /// # Errors
    ///
    /// [`Fault::Underflow`] when `bottom > top`, or
    /// [`Fault::SubtractDisallowed`] in strict mode.
    pub fn on_subtract(&mut self) -> Result<(), Fault> {
        self.check_guard(Operation::Subtract)?;
        let mut temp = self.take_top();
        if let Err(fault) = temp.subtract(self.model.bottom()) {
            self.restore_top(temp);
            return Err(reject(CalcEvent::Subtract, fault));
        }
        self.store_bottom(temp);
        self.refresh_view();
        Ok(())
    }

    /// `bottom <- top * bottom`, `top <- 0`.
    pub fn on_multiply(&mut self) {
        let mut temp = self.take_top();
        temp.multiply(self.model.bottom());
        self.store_bottom(temp);
        self.refresh_view();
    }

    /// `bottom <- top / bottom`, `top <- top % bottom`.
    ///
    /// # Errors
    ///
    /// [`Fault::DivideByZero`] when `bottom == 0`, or
    /// [`Fault::DivideDisallowed`] in strict mode.
    pub fn on_divide(&mut self) -> Result<(), Fault> {
        self.check_guard(Operation::Divide)?;
        let (top, bottom) = self.model.registers_mut();
        let mut remainder = top
            .divide(bottom)
            .map_err(|fault| reject(CalcEvent::Divide, fault))?;
        bottom.transfer_from(top);
        top.transfer_from(&mut remainder);
        self.refresh_view();
        Ok(())
    }

    /// `bottom <- top ^ bottom`, `top <- 0`.
    ///
    /// # Errors
    ///
    /// [`Fault::IntegerOverflow`] when `bottom` exceeds the exponent range,
    /// or [`Fault::PowerDisallowed`] in strict mode.
    pub fn on_power(&mut self) -> Result<(), Fault> {
        self.check_guard(Operation::Power)?;
        let exponent = self
            .model
            .bottom()
            .to_int()
            .map_err(|fault| reject(CalcEvent::Power, fault))?;
        let mut temp = self.take_top();
        temp.power(exponent);
        self.store_bottom(temp);
        self.refresh_view();
        Ok(())
    }

    /// `bottom <- root(top, bottom)`, `top <- 0`.
    ///
    /// # Errors
    ///
    /// [`Fault::IntegerOverflow`] when `bottom` exceeds the degree range,
    /// [`Fault::DegreeOutOfRange`] when `bottom < 2`, or
    /// [`Fault::RootDisallowed`] in strict mode.
    pub fn on_root(&mut self) -> Result<(), Fault> {
        self.check_guard(Operation::Root)?;
        let degree = self
            .model
            .bottom()
            .to_int()
            .map_err(|fault| reject(CalcEvent::Root, fault))?;
        let mut temp = self.take_top();
        if let Err(fault) = temp.root(degree) {
            self.restore_top(temp);
            return Err(reject(CalcEvent::Root, fault));
        }
        self.store_bottom(temp);
        self.refresh_view();
        Ok(())
    }

    /// `bottom <- bottom * 10 + digit`.
    ///
    /// The digit range is not checked here; the register model rejects it.
    ///
    /// # Errors
    ///
    /// [`Fault::InvalidDigit`] when `digit > 9`.
    pub fn on_append_digit(&mut self, digit: u8) -> Result<(), Fault> {
        self.model
            .bottom_mut()
            .multiply_by_10(digit)
            .map_err(|fault| reject(CalcEvent::AppendDigit(digit), fault))?;
        self.refresh_view();
        Ok(())
    }

    fn check_guard(&self, op: Operation) -> Result<(), Fault> {
        if self.config.strict_guards && !self.legality.allows(op) {
            return Err(reject(CalcEvent::from(op), Fault::disallowed(op)));
        }
        Ok(())
    }

    fn take_top(&mut self) -> N {
        let mut temp = N::default();
        temp.transfer_from(self.model.top_mut());
        temp
    }

    fn restore_top(&mut self, mut temp: N) {
        self.model.top_mut().transfer_from(&mut temp);
    }

    fn store_bottom(&mut self, mut result: N) {
        self.model.bottom_mut().transfer_from(&mut result);
    }

    fn refresh_view(&mut self) {
        let legality = guard::evaluate(self.model.top(), self.model.bottom());
        self.legality = legality;

        self.view.update_subtract_allowed(legality.subtract);
        self.view.update_divide_allowed(legality.divide);
        self.view.update_power_allowed(legality.power);
        self.view.update_root_allowed(legality.root);
        self.view.update_top_display(self.model.top());
        self.view.update_bottom_display(self.model.bottom());

        debug!(
            top = %self.model.top(),
            bottom = %self.model.bottom(),
            ?legality,
            "view refreshed"
        );
    }
}

fn reject(event: CalcEvent, fault: Fault) -> Fault {
    warn!(%event, %fault, code = fault.as_u8(), "event faulted");
    fault
}
