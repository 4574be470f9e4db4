use calc_core::{
    BigNatural, CalcConfig, CalcController, CalcEvent, CalcModel, CalcSnapshot, Fault,
    SnapshotView,
};
use serde::Serialize;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    fn log(s: &str);
}

macro_rules! console_log {
    ($($t:tt)*) => (log(&format!($($t)*)))
}

/// Fault report thrown to JS as `{ code, message }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WasmFault {
    pub code: u8,
    pub message: String,
}

impl From<Fault> for WasmFault {
    fn from(fault: Fault) -> Self {
        Self {
            code: fault.as_u8(),
            message: fault.to_string(),
        }
    }
}

/// Controller plus headless display, free of any JS types.
#[derive(Debug)]
struct Session {
    controller: CalcController<BigNatural, SnapshotView>,
}

impl Session {
    fn new(model: CalcModel<BigNatural>, config: CalcConfig) -> Self {
        Self {
            controller: CalcController::with_config(model, SnapshotView::new(), config),
        }
    }

    fn seeded(top: &str, bottom: &str, config: CalcConfig) -> Result<Self, String> {
        let top = top.parse::<BigNatural>().map_err(|e| e.to_string())?;
        let bottom = bottom.parse::<BigNatural>().map_err(|e| e.to_string())?;
        Ok(Self::new(CalcModel::with_registers(top, bottom), config))
    }

    fn press(&mut self, event: CalcEvent) -> Result<&CalcSnapshot, WasmFault> {
        self.controller.dispatch(event).map_err(WasmFault::from)?;
        Ok(self.snapshot())
    }

    fn snapshot(&self) -> &CalcSnapshot {
        self.controller.view().snapshot()
    }
}

#[wasm_bindgen]
pub struct WasmCalculator {
    session: Session,
}

#[wasm_bindgen]
impl WasmCalculator {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        console_error_panic_hook::set_once();
        Self {
            session: Session::new(CalcModel::new(), CalcConfig::default()),
        }
    }

    /// Creates a calculator with decimal seeds for both registers.
    pub fn with_registers(top: &str, bottom: &str, strict: bool) -> Result<Self, JsValue> {
        console_error_panic_hook::set_once();
        let config = CalcConfig {
            strict_guards: strict,
        };
        Session::seeded(top, bottom, config)
            .map(|session| Self { session })
            .map_err(|message| js_sys::Error::new(&message).into())
    }

    /// Returns the current display as `{ top, bottom, legality }`.
    pub fn snapshot(&self) -> Result<JsValue, JsValue> {
        Ok(serde_wasm_bindgen::to_value(self.session.snapshot())?)
    }

    pub fn clear(&mut self) -> Result<JsValue, JsValue> {
        self.press(CalcEvent::Clear)
    }

    pub fn swap(&mut self) -> Result<JsValue, JsValue> {
        self.press(CalcEvent::Swap)
    }

    pub fn enter(&mut self) -> Result<JsValue, JsValue> {
        self.press(CalcEvent::Enter)
    }

    pub fn add(&mut self) -> Result<JsValue, JsValue> {
        self.press(CalcEvent::Add)
    }

    pub fn subtract(&mut self) -> Result<JsValue, JsValue> {
        self.press(CalcEvent::Subtract)
    }

    pub fn multiply(&mut self) -> Result<JsValue, JsValue> {
        self.press(CalcEvent::Multiply)
    }

    pub fn divide(&mut self) -> Result<JsValue, JsValue> {
        self.press(CalcEvent::Divide)
    }

    pub fn power(&mut self) -> Result<JsValue, JsValue> {
        self.press(CalcEvent::Power)
    }

    pub fn root(&mut self) -> Result<JsValue, JsValue> {
        self.press(CalcEvent::Root)
    }

    pub fn append_digit(&mut self, digit: u8) -> Result<JsValue, JsValue> {
        self.press(CalcEvent::AppendDigit(digit))
    }

    /// Logs the current registers to the browser console.
    pub fn log_state(&self) {
        let snapshot = self.session.snapshot();
        console_log!("top={} bottom={}", snapshot.top, snapshot.bottom);
    }
}

impl WasmCalculator {
    /// Dispatches an event and returns the new display, or throws the
    /// serialized [`WasmFault`].
    fn press(&mut self, event: CalcEvent) -> Result<JsValue, JsValue> {
        match self.session.press(event) {
            Ok(snapshot) => Ok(serde_wasm_bindgen::to_value(snapshot)?),
            Err(fault) => {
                web_sys::console::warn_1(&JsValue::from_str(&format!(
                    "{event} rejected: {} (code {})",
                    fault.message, fault.code
                )));
                Err(serde_wasm_bindgen::to_value(&fault)?)
            }
        }
    }
}

impl Default for WasmCalculator {
    fn default() -> Self {
        Self::new()
    }
}
