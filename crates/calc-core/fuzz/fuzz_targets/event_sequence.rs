#![no_main]

use calc_core::{
    evaluate, BigNatural, CalcController, CalcEvent, CalcModel, NaturalNumber, SnapshotView,
};
use libfuzzer_sys::fuzz_target;

fn decode_event(byte: u8) -> CalcEvent {
    match byte % 20 {
        0 => CalcEvent::Clear,
        1 => CalcEvent::Swap,
        2 => CalcEvent::Enter,
        3 => CalcEvent::Add,
        4 => CalcEvent::Subtract,
        5 => CalcEvent::Multiply,
        6 => CalcEvent::Divide,
        7 => CalcEvent::Power,
        8 => CalcEvent::Root,
        9 => CalcEvent::AppendDigit(byte / 20),
        digit => CalcEvent::AppendDigit(digit - 10),
    }
}

fuzz_target!(|data: &[u8]| {
    let mut controller = CalcController::new(CalcModel::<BigNatural>::new(), SnapshotView::new());

    for &byte in data.iter().take(256) {
        let event = decode_event(byte);
        let model = controller.model();
        if event == CalcEvent::Power
            && (model.bottom().to_int().map_or(true, |exp| exp > 16)
                || model.top().to_string().len() > 64)
        {
            continue;
        }
        if event == CalcEvent::Multiply
            && model.top().to_string().len() + model.bottom().to_string().len() > 4096
        {
            continue;
        }

        let before = (model.top().clone(), model.bottom().clone());
        if controller.dispatch(event).is_err() {
            let model = controller.model();
            assert_eq!((model.top().clone(), model.bottom().clone()), before);
        }

        let model = controller.model();
        let snapshot = controller.view().snapshot();
        assert_eq!(snapshot.legality, evaluate(model.top(), model.bottom()));
        assert_eq!(snapshot.top, model.top().to_string());
        assert_eq!(snapshot.bottom, model.bottom().to_string());
    }
});
