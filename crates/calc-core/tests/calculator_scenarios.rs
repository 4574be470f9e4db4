//! End-to-end calculator scenarios over arbitrary-precision registers.

#![allow(clippy::pedantic, clippy::nursery)]

use calc_core::{
    BigNatural, CalcConfig, CalcController, CalcEvent, CalcModel, CalcSnapshot, Fault,
    FaultClass, Legality, SnapshotView, INT_LIMIT,
};
use num as _;
use proptest as _;
use rstest::rstest;
#[cfg(feature = "serde")]
use serde as _;
use thiserror as _;
use tracing as _;

fn nat(text: &str) -> BigNatural {
    text.parse().expect("valid literal")
}

fn controller(top: &str, bottom: &str) -> CalcController<BigNatural, SnapshotView> {
    CalcController::new(
        CalcModel::with_registers(nat(top), nat(bottom)),
        SnapshotView::new(),
    )
}

fn shown(c: &CalcController<BigNatural, SnapshotView>) -> (&str, &str) {
    let snapshot = c.view().snapshot();
    (&snapshot.top, &snapshot.bottom)
}

#[test]
fn fresh_calculator_displays_zeroes() {
    let c = CalcController::new(CalcModel::<BigNatural>::new(), SnapshotView::new());

    assert_eq!(
        c.view().snapshot(),
        &CalcSnapshot {
            top: "0".into(),
            bottom: "0".into(),
            legality: Legality {
                subtract: true,
                divide: false,
                power: true,
                root: false,
            },
        }
    );
}

#[rstest]
#[case::digits(&[CalcEvent::AppendDigit(5), CalcEvent::AppendDigit(3)], ("0", "0"), ("0", "53"))]
#[case::subtract_swap(&[CalcEvent::Subtract, CalcEvent::Swap], ("10", "3"), ("7", "0"))]
#[case::power(&[CalcEvent::Power], ("2", "10"), ("0", "1024"))]
#[case::root(&[CalcEvent::Root], ("1024", "10"), ("0", "2"))]
#[case::enter_add(&[CalcEvent::Enter, CalcEvent::Add], ("1", "21"), ("0", "42"))]
#[case::divide(&[CalcEvent::Divide], ("53", "5"), ("3", "10"))]
#[case::clear_keeps_top(&[CalcEvent::Clear], ("8", "9"), ("8", "0"))]
#[case::big_multiply(
    &[CalcEvent::Multiply],
    ("18446744073709551616", "18446744073709551616"),
    ("0", "340282366920938463463374607431768211456")
)]
fn event_sequences_produce_expected_display(
    #[case] events: &[CalcEvent],
    #[case] before: (&str, &str),
    #[case] after: (&str, &str),
) {
    let mut c = controller(before.0, before.1);
    for event in events {
        c.dispatch(*event).expect("legal event");
    }

    assert_eq!(shown(&c), after);
    assert_eq!(c.model().top(), &nat(after.0));
    assert_eq!(c.model().bottom(), &nat(after.1));
}

#[test]
fn divide_is_advised_against_when_bottom_is_zero() {
    let c = controller("53", "0");
    assert!(!c.legality().divide);
    assert!(!c.view().snapshot().legality.divide);
}

#[test]
fn power_and_root_guards_track_int_limit() {
    let limit = INT_LIMIT.to_string();
    let above = (u64::from(INT_LIMIT) + 1).to_string();

    let at_limit = controller("0", &limit);
    assert!(at_limit.legality().power);
    assert!(at_limit.legality().root);

    let over_limit = controller("0", &above);
    assert!(!over_limit.legality().power);
    assert!(!over_limit.legality().root);
}

#[rstest]
#[case::power(CalcEvent::Power)]
#[case::root(CalcEvent::Root)]
fn oversized_exponent_faults_without_losing_top(#[case] event: CalcEvent) {
    let mut c = controller("123456789", "99999999999999999999");

    let fault = c.dispatch(event).expect_err("exponent out of range");

    assert_eq!(fault, Fault::IntegerOverflow);
    assert_eq!(fault.class(), FaultClass::ArithmeticDomain);
    assert_eq!(shown(&c), ("123456789", "99999999999999999999"));
}

#[test]
fn strict_configuration_blocks_disallowed_divide() {
    let mut c = CalcController::with_config(
        CalcModel::with_registers(nat("53"), BigNatural::default()),
        SnapshotView::new(),
        CalcConfig::strict(),
    );

    assert_eq!(c.on_divide(), Err(Fault::DivideDisallowed));
    assert_eq!(c.config(), CalcConfig::strict());
    assert_eq!(shown(&c), ("53", "0"));
}

#[test]
fn controller_borrows_an_external_view() {
    let mut view = SnapshotView::new();
    {
        let mut c = CalcController::new(CalcModel::<BigNatural>::new(), &mut view);
        c.on_append_digit(4).expect("digit");
        c.on_append_digit(2).expect("digit");
    }
    assert_eq!(view.snapshot().bottom, "42");
}
