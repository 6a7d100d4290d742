// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Business schedule configuration.
//!
//! One active [`ScheduleConfig`] drives slot generation: opening hours,
//! the buffer inserted between consecutive slots, break windows, and the
//! days the business operates. The config is administrator-owned and
//! read-only to the engine.
//!
//! Validation is an explicit save-time operation ([`ScheduleConfig::validate`]);
//! the engine separately tolerates degenerate configs at query time by
//! producing no slots, so a bad row can never take down a customer-facing
//! query.

use crate::clock::{MINUTES_PER_DAY, clock_label};
use bookslot_core::time::{TimeDelta, TimeInterval, TimePoint};
use std::fmt::Display;
use time::{Date, Weekday};

/// The set of weekdays a business operates on, as a bitmask keyed by
/// ISO weekday number (Monday is 1).
///
/// # Examples
///
/// ```
/// use bookslot_model::config::WorkingDays;
/// use time::Weekday;
///
/// let days = WorkingDays::weekdays().with(Weekday::Saturday);
/// assert!(days.contains(Weekday::Monday));
/// assert!(days.contains(Weekday::Saturday));
/// assert!(!days.contains(Weekday::Sunday));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct WorkingDays(u8);

impl WorkingDays {
    /// No working days at all.
    #[inline]
    pub const fn empty() -> Self {
        WorkingDays(0)
    }

    /// All seven days.
    #[inline]
    pub const fn full() -> Self {
        WorkingDays(0x7F)
    }

    /// Monday through Friday.
    #[inline]
    pub const fn weekdays() -> Self {
        WorkingDays(0x1F)
    }

    #[inline]
    fn bit(day: Weekday) -> u8 {
        1 << (day.number_from_monday() - 1)
    }

    /// Returns this set with `day` added.
    #[inline]
    pub fn with(self, day: Weekday) -> Self {
        WorkingDays(self.0 | Self::bit(day))
    }

    #[inline]
    pub fn contains(self, day: Weekday) -> bool {
        self.0 & Self::bit(day) != 0
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl FromIterator<Weekday> for WorkingDays {
    fn from_iter<I: IntoIterator<Item = Weekday>>(iter: I) -> Self {
        iter.into_iter()
            .fold(WorkingDays::empty(), |days, day| days.with(day))
    }
}

/// A validation failure in a [`ScheduleConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScheduleConfigError {
    InvertedHours {
        opening: TimePoint<i64>,
        closing: TimePoint<i64>,
    },
    HoursOutsideDay {
        opening: TimePoint<i64>,
        closing: TimePoint<i64>,
    },
    NegativeBuffer(TimeDelta<i64>),
    EmptyBreak(TimeInterval<i64>),
    BreakOutsideHours(TimeInterval<i64>),
}

impl Display for ScheduleConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScheduleConfigError::InvertedHours { opening, closing } => write!(
                f,
                "Schedule hours are inverted: opening {} is not before closing {}",
                clock_label(*opening),
                clock_label(*closing)
            ),
            ScheduleConfigError::HoursOutsideDay { opening, closing } => write!(
                f,
                "Schedule hours {}-{} do not fit within a single day",
                clock_label(*opening),
                clock_label(*closing)
            ),
            ScheduleConfigError::NegativeBuffer(buffer) => {
                write!(f, "Buffer between slots is negative: {}", buffer)
            }
            ScheduleConfigError::EmptyBreak(b) => write!(
                f,
                "Break window {}-{} is empty",
                clock_label(b.start()),
                clock_label(b.end())
            ),
            ScheduleConfigError::BreakOutsideHours(b) => write!(
                f,
                "Break window {}-{} lies outside the schedule hours",
                clock_label(b.start()),
                clock_label(b.end())
            ),
        }
    }
}

impl std::error::Error for ScheduleConfigError {}

/// The active business schedule.
///
/// Opening and closing are stored exactly as configured, without
/// normalization: an inverted pair is a degenerate config the engine
/// answers with an empty slot list, not a silently repaired one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleConfig {
    opening: TimePoint<i64>,
    closing: TimePoint<i64>,
    buffer: TimeDelta<i64>,
    breaks: Vec<TimeInterval<i64>>,
    working_days: WorkingDays,
}

impl ScheduleConfig {
    pub fn new(
        opening: TimePoint<i64>,
        closing: TimePoint<i64>,
        buffer: TimeDelta<i64>,
        breaks: Vec<TimeInterval<i64>>,
        working_days: WorkingDays,
    ) -> Self {
        Self {
            opening,
            closing,
            buffer,
            breaks,
            working_days,
        }
    }

    /// Checks the invariants an administrator must satisfy when saving:
    /// opening before closing within one day, non-negative buffer, and
    /// non-empty breaks that lie inside the opening hours.
    pub fn validate(&self) -> Result<(), ScheduleConfigError> {
        if self.opening >= self.closing {
            return Err(ScheduleConfigError::InvertedHours {
                opening: self.opening,
                closing: self.closing,
            });
        }
        if self.opening < TimePoint::zero() || self.closing > TimePoint::new(MINUTES_PER_DAY) {
            return Err(ScheduleConfigError::HoursOutsideDay {
                opening: self.opening,
                closing: self.closing,
            });
        }
        if self.buffer.is_negative() {
            return Err(ScheduleConfigError::NegativeBuffer(self.buffer));
        }
        let hours = TimeInterval::new(self.opening, self.closing);
        for b in &self.breaks {
            if b.is_empty() {
                return Err(ScheduleConfigError::EmptyBreak(*b));
            }
            if !hours.contains_interval(b) {
                return Err(ScheduleConfigError::BreakOutsideHours(*b));
            }
        }
        Ok(())
    }

    #[inline]
    pub fn opening(&self) -> TimePoint<i64> {
        self.opening
    }

    #[inline]
    pub fn closing(&self) -> TimePoint<i64> {
        self.closing
    }

    #[inline]
    pub fn buffer(&self) -> TimeDelta<i64> {
        self.buffer
    }

    #[inline]
    pub fn breaks(&self) -> &[TimeInterval<i64>] {
        &self.breaks
    }

    #[inline]
    pub fn working_days(&self) -> WorkingDays {
        self.working_days
    }

    /// Returns true if the business operates on the given date's weekday.
    #[inline]
    pub fn is_open_on(&self, date: Date) -> bool {
        self.working_days.contains(date.weekday())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::minute_of_day;
    use time::macros::date;

    fn nine_to_five() -> ScheduleConfig {
        ScheduleConfig::new(
            minute_of_day(9, 0),
            minute_of_day(17, 0),
            TimeDelta::new(0),
            Vec::new(),
            WorkingDays::weekdays(),
        )
    }

    #[test]
    fn test_valid_config_passes_validation() {
        assert_eq!(nine_to_five().validate(), Ok(()));
    }

    #[test]
    fn test_inverted_hours_are_rejected() {
        let cfg = ScheduleConfig::new(
            minute_of_day(17, 0),
            minute_of_day(9, 0),
            TimeDelta::new(0),
            Vec::new(),
            WorkingDays::weekdays(),
        );
        assert!(matches!(
            cfg.validate(),
            Err(ScheduleConfigError::InvertedHours { .. })
        ));
    }

    #[test]
    fn test_equal_hours_are_rejected_as_inverted() {
        let cfg = ScheduleConfig::new(
            minute_of_day(9, 0),
            minute_of_day(9, 0),
            TimeDelta::new(0),
            Vec::new(),
            WorkingDays::weekdays(),
        );
        assert!(matches!(
            cfg.validate(),
            Err(ScheduleConfigError::InvertedHours { .. })
        ));
    }

    #[test]
    fn test_hours_past_midnight_are_rejected() {
        let cfg = ScheduleConfig::new(
            minute_of_day(9, 0),
            TimePoint::new(MINUTES_PER_DAY + 60),
            TimeDelta::new(0),
            Vec::new(),
            WorkingDays::weekdays(),
        );
        assert!(matches!(
            cfg.validate(),
            Err(ScheduleConfigError::HoursOutsideDay { .. })
        ));
    }

    #[test]
    fn test_negative_buffer_is_rejected() {
        let cfg = ScheduleConfig::new(
            minute_of_day(9, 0),
            minute_of_day(17, 0),
            TimeDelta::new(-5),
            Vec::new(),
            WorkingDays::weekdays(),
        );
        assert_eq!(
            cfg.validate(),
            Err(ScheduleConfigError::NegativeBuffer(TimeDelta::new(-5)))
        );
    }

    #[test]
    fn test_empty_break_is_rejected() {
        let noon = minute_of_day(12, 0);
        let cfg = ScheduleConfig::new(
            minute_of_day(9, 0),
            minute_of_day(17, 0),
            TimeDelta::new(0),
            vec![TimeInterval::new(noon, noon)],
            WorkingDays::weekdays(),
        );
        assert!(matches!(
            cfg.validate(),
            Err(ScheduleConfigError::EmptyBreak(_))
        ));
    }

    #[test]
    fn test_break_outside_hours_is_rejected() {
        let cfg = ScheduleConfig::new(
            minute_of_day(9, 0),
            minute_of_day(17, 0),
            TimeDelta::new(0),
            vec![TimeInterval::new(minute_of_day(8, 0), minute_of_day(8, 30))],
            WorkingDays::weekdays(),
        );
        assert!(matches!(
            cfg.validate(),
            Err(ScheduleConfigError::BreakOutsideHours(_))
        ));
    }

    #[test]
    fn test_break_within_hours_is_accepted() {
        let cfg = ScheduleConfig::new(
            minute_of_day(9, 0),
            minute_of_day(17, 0),
            TimeDelta::new(15),
            vec![TimeInterval::new(
                minute_of_day(12, 0),
                minute_of_day(12, 30),
            )],
            WorkingDays::weekdays(),
        );
        assert_eq!(cfg.validate(), Ok(()));
    }

    #[test]
    fn test_working_days_bitmask_roundtrip() {
        let days: WorkingDays = [Weekday::Monday, Weekday::Wednesday].into_iter().collect();
        assert!(days.contains(Weekday::Monday));
        assert!(days.contains(Weekday::Wednesday));
        assert!(!days.contains(Weekday::Tuesday));
        assert!(WorkingDays::empty().is_empty());
        assert!(WorkingDays::full().contains(Weekday::Sunday));
    }

    #[test]
    fn test_is_open_on_checks_weekday() {
        let cfg = nine_to_five();
        assert!(cfg.is_open_on(date!(2025 - 06 - 02))); // Monday
        assert!(!cfg.is_open_on(date!(2025 - 06 - 01))); // Sunday
    }

    #[test]
    fn test_error_messages_use_clock_labels() {
        let err = ScheduleConfigError::InvertedHours {
            opening: minute_of_day(17, 0),
            closing: minute_of_day(9, 0),
        };
        assert_eq!(
            err.to_string(),
            "Schedule hours are inverted: opening 17:00 is not before closing 09:00"
        );
    }
}
