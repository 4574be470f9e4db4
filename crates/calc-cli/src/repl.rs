//! Interactive read-eval-print loop.
//!
//! The loop plays the part of a button panel: a guarded key whose legality
//! flag is false is refused here and never reaches the controller.

use std::io::{self, BufRead, Write};

use calc_core::{BigNatural, CalcConfig, CalcController, CalcModel};
use tracing::{debug, info};

use crate::script::{parse_line, Step};
use crate::terminal::TerminalView;

type ReplController<W> = CalcController<BigNatural, TerminalView<W>>;

const HELP_TEXT: &str = "\
keys: clear swap enter + - * / ^ root, digits 0-9
quit or exit leaves the calculator";

/// Runs the loop until end of input or `quit`, returning the output stream.
///
/// # Errors
///
/// Propagates I/O errors from reading `input` or writing `output`.
pub fn run_repl<R, W>(
    input: R,
    output: W,
    model: CalcModel<BigNatural>,
    config: CalcConfig,
) -> io::Result<W>
where
    R: BufRead,
    W: Write,
{
    let mut controller = CalcController::with_config(model, TerminalView::new(output), config);
    controller.view_mut().flush_display()?;
    info!(strict = config.strict_guards, "repl started");

    for (idx, line) in input.lines().enumerate() {
        let line = line?;
        match line.trim() {
            "quit" | "exit" => break,
            "help" => controller.view_mut().message(HELP_TEXT)?,
            _ => handle_line(&mut controller, &line, idx + 1)?,
        }
        controller.view_mut().flush_display()?;
    }

    debug!("repl finished");
    let (_, view) = controller.into_parts();
    Ok(view.into_inner())
}

/// Presses the keys on one line, stopping at the first refusal or fault.
fn handle_line<W: Write>(
    controller: &mut ReplController<W>,
    line: &str,
    number: usize,
) -> io::Result<()> {
    let steps = match parse_line(line, number) {
        Ok(steps) => steps,
        Err(e) => return controller.view_mut().message(format!("error: {}", e.message)),
    };

    for step in steps {
        let event = match step {
            Step::Event(event) => event,
            Step::Expect(_) => {
                return controller
                    .view_mut()
                    .message("error: expect is only checked by `nncalc test`");
            }
        };

        if let Some(op) = event.guarded_operation() {
            if !controller.legality().allows(op) {
                return controller.view_mut().message(format!("{op} is disabled"));
            }
        }

        if let Err(fault) = controller.dispatch(event) {
            return controller.view_mut().message(format!("error: {fault}"));
        }
    }
    Ok(())
}
