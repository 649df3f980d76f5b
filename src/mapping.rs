//! Classification of decoded records into performance actions.

use crate::events::{Action, Category, RawEvent};
use crate::pedal::Pedal;

// linux/input-event-codes.h values the controller reports with.
const KEY_1: u16 = 2;
const KEY_2: u16 = 3;
const KEY_3: u16 = 4;
const KEY_4: u16 = 5;
const KEY_5: u16 = 6;
const KEY_6: u16 = 7;
const KEY_7: u16 = 8;
const KEY_8: u16 = 9;
const KEY_9: u16 = 10;

/// The expression pedal reports as ABS_Z.
pub const PEDAL_AXIS: u16 = 0x02;

/// Footswitch → note. The note numbers follow the panel layout of the
/// unit rather than the order the kernel numbers the keys, hence the
/// permutation. Anything not in this table is ignored.
const SWITCH_NOTES: [(u16, u8); 9] = [
    (KEY_1, 5),
    (KEY_2, 6),
    (KEY_3, 7),
    (KEY_4, 8),
    (KEY_5, 1),
    (KEY_6, 2),
    (KEY_7, 3),
    (KEY_8, 4),
    (KEY_9, 9),
];

fn switch_note(code: u16) -> Option<u8> {
    SWITCH_NOTES
        .iter()
        .find(|(key, _)| *key == code)
        .map(|(_, note)| *note)
}

/// Map one record to its action, if it has one. Stateless except for the
/// pedal calibration it delegates to.
pub fn classify(event: RawEvent, pedal: &mut Pedal) -> Option<Action> {
    match event.category {
        Category::Key => switch_note(event.code).map(|note| Action::Note {
            note,
            on: event.value != 0,
        }),
        Category::Axis if event.code == PEDAL_AXIS => {
            pedal.sample(event.value).map(|value| Action::Control {
                controller: pedal.controller(),
                value,
            })
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pedal::{Resolution, CC_COARSE};

    fn key(code: u16, value: i32) -> RawEvent {
        RawEvent {
            category: Category::Key,
            code,
            value,
        }
    }

    fn axis(code: u16, value: i32) -> RawEvent {
        RawEvent {
            category: Category::Axis,
            code,
            value,
        }
    }

    #[test]
    fn every_switch_maps_to_its_note() {
        let mut pedal = Pedal::new(Resolution::Coarse);
        for (code, note) in [
            (2u16, 5u8),
            (3, 6),
            (4, 7),
            (5, 8),
            (6, 1),
            (7, 2),
            (8, 3),
            (9, 4),
            (10, 9),
        ] {
            assert_eq!(
                classify(key(code, 1), &mut pedal),
                Some(Action::Note { note, on: true }),
                "press of key code {code}"
            );
            assert_eq!(
                classify(key(code, 0), &mut pedal),
                Some(Action::Note { note, on: false }),
                "release of key code {code}"
            );
        }
    }

    #[test]
    fn autorepeat_still_reads_as_pressed() {
        let mut pedal = Pedal::new(Resolution::Coarse);
        assert_eq!(
            classify(key(2, 2), &mut pedal),
            Some(Action::Note { note: 5, on: true })
        );
    }

    #[test]
    fn unmapped_records_produce_nothing() {
        let mut pedal = Pedal::new(Resolution::Coarse);
        // KEY_A
        assert_eq!(classify(key(30, 1), &mut pedal), None);
        // ABS_X
        assert_eq!(classify(axis(0x00, 200), &mut pedal), None);
        // EV_SYN report
        assert_eq!(
            classify(
                RawEvent {
                    category: Category::Other,
                    code: 0,
                    value: 0,
                },
                &mut pedal
            ),
            None
        );
    }

    #[test]
    fn pedal_axis_goes_through_calibration() {
        let mut pedal = Pedal::new(Resolution::Coarse);
        assert_eq!(
            classify(axis(PEDAL_AXIS, 232), &mut pedal),
            Some(Action::Control {
                controller: CC_COARSE,
                value: 63,
            })
        );
        // same output again is suppressed by the calibrator
        assert_eq!(classify(axis(PEDAL_AXIS, 232), &mut pedal), None);
    }
}
