//! Parsing for calculator key scripts.
//!
//! ## Supported Syntax
//!
//! - Keys: `clear`/`c`, `swap`, `enter`, `add`/`+`, `subtract`/`-`,
//!   `multiply`/`*`, `divide`/`/`, `power`/`^`, `root`
//! - Digits: a run such as `53` presses `5` then `3`
//! - Register expectations: `expect top == 53`, `expect bottom != 0`
//! - Guard expectations: `expect divide allowed`, `expect root disallowed`
//! - Comments: `;` to end of line
//!
//! Several keys may share a line; an `expect` takes the whole line.

#![allow(
    clippy::uninlined_format_args,
    clippy::option_if_let_else,
    clippy::use_self,
    clippy::module_name_repetitions
)]

use std::fmt;

use calc_core::{BigNatural, CalcEvent, Operation, Register};

/// A parsed expectation about calculator state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expectation {
    /// Register value equals or differs from `expected`.
    Register {
        /// Register to check.
        register: Register,
        /// Comparison operator.
        operator: ComparisonOp,
        /// Expected value.
        expected: BigNatural,
    },
    /// Guard flag of a guarded operation.
    Guard {
        /// Operation whose flag is checked.
        operation: Operation,
        /// Expected flag value.
        allowed: bool,
    },
}

impl fmt::Display for Expectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expectation::Register {
                register,
                operator,
                expected,
            } => write!(f, "{} {operator} {expected}", register.name()),
            Expectation::Guard { operation, allowed } => {
                let state = if *allowed { "allowed" } else { "disallowed" };
                write!(f, "{operation} {state}")
            }
        }
    }
}

/// Comparison operator for register expectations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonOp {
    /// Expect equality (`==`).
    Equal,
    /// Expect inequality (`!=`).
    NotEqual,
}

impl ComparisonOp {
    /// Applies the operator to two values.
    #[must_use]
    pub fn holds<T: PartialEq>(self, actual: &T, expected: &T) -> bool {
        match self {
            ComparisonOp::Equal => actual == expected,
            ComparisonOp::NotEqual => actual != expected,
        }
    }
}

impl fmt::Display for ComparisonOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComparisonOp::Equal => write!(f, "=="),
            ComparisonOp::NotEqual => write!(f, "!="),
        }
    }
}

/// One action parsed from a script line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Press a key.
    Event(CalcEvent),
    /// Check calculator state.
    Expect(Expectation),
}

/// A step with the 1-indexed source line it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptStep {
    /// 1-indexed source line.
    pub line: usize,
    /// Parsed action.
    pub step: Step,
}

/// A parsed script in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Script {
    /// Steps in execution order.
    pub steps: Vec<ScriptStep>,
}

impl Script {
    /// Number of key presses in the script.
    #[must_use]
    pub fn event_count(&self) -> usize {
        self.steps
            .iter()
            .filter(|s| matches!(s.step, Step::Event(_)))
            .count()
    }

    /// Number of expectations in the script.
    #[must_use]
    pub fn expectation_count(&self) -> usize {
        self.steps.len() - self.event_count()
    }
}

/// Error parsing a script line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseScriptError {
    /// 1-indexed line where the error occurred.
    pub line: usize,
    /// The offending text.
    pub text: String,
    /// Description of the error.
    pub message: String,
}

impl fmt::Display for ParseScriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "line {}: {} (in '{}')",
            self.line, self.message, self.text
        )
    }
}

impl std::error::Error for ParseScriptError {}

/// Parses a whole script.
///
/// # Errors
///
/// Returns the first `ParseScriptError` encountered.
pub fn parse_script(source: &str) -> Result<Script, ParseScriptError> {
    let mut steps = Vec::new();

    for (idx, text) in source.lines().enumerate() {
        let line = idx + 1;
        steps.extend(
            parse_line(text, line)?
                .into_iter()
                .map(|step| ScriptStep { line, step }),
        );
    }

    Ok(Script { steps })
}

/// Parses a single line into its steps.
///
/// Blank and comment-only lines yield no steps.
///
/// # Errors
///
/// Returns `ParseScriptError` for unknown keys or malformed expectations.
pub fn parse_line(text: &str, line: usize) -> Result<Vec<Step>, ParseScriptError> {
    let stripped = strip_comment(text).trim();
    let error = |message: String| ParseScriptError {
        line,
        text: stripped.to_string(),
        message,
    };

    if stripped.is_empty() {
        return Ok(Vec::new());
    }

    if let Some(rest) = stripped.strip_prefix("expect") {
        if rest.is_empty() || rest.starts_with(char::is_whitespace) {
            return parse_expectation(rest)
                .map(|expectation| vec![Step::Expect(expectation)])
                .map_err(error);
        }
    }

    let mut steps = Vec::new();
    for token in stripped.split_whitespace() {
        parse_keys(token, &mut steps).map_err(error)?;
    }
    Ok(steps)
}

/// Strips a comment from a line (everything from `;` to end of line).
#[must_use]
pub fn strip_comment(line: &str) -> &str {
    match line.find(';') {
        Some(pos) => &line[..pos],
        None => line,
    }
}

/// Appends the key presses for one token.
fn parse_keys(token: &str, steps: &mut Vec<Step>) -> Result<(), String> {
    if token.bytes().all(|b| b.is_ascii_digit()) {
        steps.extend(
            token
                .bytes()
                .map(|b| Step::Event(CalcEvent::AppendDigit(b - b'0'))),
        );
        return Ok(());
    }

    let event = match token.to_ascii_lowercase().as_str() {
        "clear" | "c" => CalcEvent::Clear,
        "swap" => CalcEvent::Swap,
        "enter" => CalcEvent::Enter,
        "add" | "+" => CalcEvent::Add,
        "subtract" | "-" => CalcEvent::Subtract,
        "multiply" | "*" => CalcEvent::Multiply,
        "divide" | "/" => CalcEvent::Divide,
        "power" | "^" => CalcEvent::Power,
        "root" => CalcEvent::Root,
        _ => return Err(format!("unknown key '{}'", token)),
    };
    steps.push(Step::Event(event));
    Ok(())
}

/// Parses the text after `expect`.
fn parse_expectation(text: &str) -> Result<Expectation, String> {
    let parts: Vec<&str> = text.split_whitespace().collect();

    match parts.as_slice() {
        [subject, operator, value] => {
            let register = parse_register(subject)?;
            let operator = parse_comparison_op(operator)?;
            let expected = value
                .parse::<BigNatural>()
                .map_err(|e| e.to_string())?;
            Ok(Expectation::Register {
                register,
                operator,
                expected,
            })
        }
        [subject, state] => {
            let operation = parse_operation(subject)?;
            let allowed = match state.to_ascii_lowercase().as_str() {
                "allowed" => true,
                "disallowed" => false,
                _ => {
                    return Err(format!(
                        "expected 'allowed' or 'disallowed', got '{}'",
                        state
                    ))
                }
            };
            Ok(Expectation::Guard { operation, allowed })
        }
        _ => Err(
            "expected 'register operator value' or 'operation allowed|disallowed'".to_string(),
        ),
    }
}

fn parse_register(text: &str) -> Result<Register, String> {
    Register::ALL
        .into_iter()
        .find(|reg| reg.name().eq_ignore_ascii_case(text))
        .ok_or_else(|| format!("unknown register '{}'", text))
}

fn parse_operation(text: &str) -> Result<Operation, String> {
    Operation::ALL
        .into_iter()
        .find(|op| op.name().eq_ignore_ascii_case(text))
        .ok_or_else(|| format!("unknown operation '{}'", text))
}

fn parse_comparison_op(text: &str) -> Result<ComparisonOp, String> {
    match text {
        "==" => Ok(ComparisonOp::Equal),
        "!=" => Ok(ComparisonOp::NotEqual),
        _ => Err("expected '==' or '!='".to_string()),
    }
}
