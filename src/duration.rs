use crate::day::{days_between, CEILING_DAY, FLOOR_DAY};
use crate::range::{RangeState, Side};

/// The number typed into the duration pad.
///
/// Behaves like a one-line text field holding a non-negative integer: digits
/// append, backspace drops the last digit, and while the whole text is
/// selected (as it is right after the pad opens) the next digit replaces it.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct DurationPad {
    value: u32,
    all_selected: bool,
}

impl DurationPad {
    /// Start editing `value` with the whole text selected
    pub fn begin(value: u32) -> DurationPad {
        DurationPad {
            value,
            all_selected: true,
        }
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    pub fn all_selected(&self) -> bool {
        self.all_selected
    }

    /// Apply one key press.  Typed values never exceed `limit`.
    pub(crate) fn handle_input(&mut self, input: PadInput, limit: u32) -> PadOutput {
        match input {
            PadInput::Digit(d) if d <= 9 => {
                let d = u32::from(d);
                self.value = if self.all_selected {
                    d
                } else {
                    self.value.saturating_mul(10).saturating_add(d)
                }
                .min(limit);
            }
            PadInput::Digit(_) => return PadOutput::Invalid,
            PadInput::Backspace => self.value /= 10,
            PadInput::Clear => self.value = 0,
        }
        self.all_selected = false;
        PadOutput::Ok
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PadInput {
    Digit(u8),
    Backspace,
    Clear,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum PadOutput {
    Ok,
    Invalid,
}

/// The largest duration that may be typed while `side` is the one being
/// recomputed from the other
pub(crate) fn duration_limit(side: Side, range: &RangeState) -> u32 {
    let limit = match side {
        Side::Start => days_between(FLOOR_DAY, range.end()).saturating_add(1),
        Side::End => days_between(range.start(), CEILING_DAY),
    };
    u32::try_from(limit).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::day::CalendarDay;
    use time::macros::date;

    #[test]
    fn test_first_digit_overwrites() {
        let mut pad = DurationPad::begin(42);
        assert!(pad.all_selected());
        assert_eq!(pad.handle_input(PadInput::Digit(7), 1000), PadOutput::Ok);
        assert_eq!(pad.value(), 7);
        assert!(!pad.all_selected());
        assert_eq!(pad.handle_input(PadInput::Digit(3), 1000), PadOutput::Ok);
        assert_eq!(pad.value(), 73);
    }

    #[test]
    fn test_backspace_and_clear() {
        let mut pad = DurationPad::begin(0);
        pad.handle_input(PadInput::Digit(1), 1000);
        pad.handle_input(PadInput::Digit(5), 1000);
        assert_eq!(pad.value(), 15);
        pad.handle_input(PadInput::Backspace, 1000);
        assert_eq!(pad.value(), 1);
        pad.handle_input(PadInput::Backspace, 1000);
        assert_eq!(pad.value(), 0);
        pad.handle_input(PadInput::Backspace, 1000);
        assert_eq!(pad.value(), 0);
        pad.handle_input(PadInput::Digit(9), 1000);
        pad.handle_input(PadInput::Digit(9), 1000);
        pad.handle_input(PadInput::Clear, 1000);
        assert_eq!(pad.value(), 0);
    }

    #[test]
    fn test_backspace_deselects() {
        let mut pad = DurationPad::begin(12);
        pad.handle_input(PadInput::Backspace, 1000);
        assert_eq!(pad.value(), 1);
        pad.handle_input(PadInput::Digit(2), 1000);
        assert_eq!(pad.value(), 12);
    }

    #[test]
    fn test_clamps_to_limit() {
        let mut pad = DurationPad::begin(0);
        pad.handle_input(PadInput::Digit(5), 60);
        pad.handle_input(PadInput::Digit(5), 60);
        assert_eq!(pad.value(), 55);
        pad.handle_input(PadInput::Digit(5), 60);
        assert_eq!(pad.value(), 60);
        let mut pad = DurationPad::begin(0);
        pad.handle_input(PadInput::Digit(9), 3);
        assert_eq!(pad.value(), 3);
    }

    #[test]
    fn test_rejects_non_digit() {
        let mut pad = DurationPad::begin(5);
        assert_eq!(pad.handle_input(PadInput::Digit(10), 1000), PadOutput::Invalid);
        assert_eq!(pad, DurationPad::begin(5));
    }

    #[test]
    fn test_duration_limit() {
        let range = RangeState::new(
            CalendarDay::from(date!(1900 - 01 - 11)),
            CalendarDay::from(date!(2100 - 12 - 21)),
        );
        assert_eq!(duration_limit(Side::Start, &range), 73404);
        assert_eq!(duration_limit(Side::End, &range), 73403);
        let past = RangeState::collapsed(CalendarDay::from(date!(2101 - 06 - 01)));
        assert_eq!(duration_limit(Side::End, &past), 0);
    }
}
