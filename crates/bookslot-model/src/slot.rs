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

//! Candidate bookable slots.

use crate::clock::clock_label;
use bookslot_core::time::{TimeDelta, TimeInterval, TimePoint};
use std::fmt::Display;

/// A candidate bookable time slot of exactly the requested duration.
///
/// Slots are ephemeral values produced by the slot engine; they are never
/// persisted. Only available slots are ever emitted, so holding a `Slot`
/// means "this interval was free when computed".
///
/// # Examples
///
/// ```
/// use bookslot_core::time::TimeInterval;
/// use bookslot_model::clock::minute_of_day;
/// use bookslot_model::slot::Slot;
///
/// let slot = Slot::new(TimeInterval::new(minute_of_day(9, 0), minute_of_day(10, 0)));
/// assert_eq!(slot.start_label(), "09:00");
/// assert_eq!(slot.end_label(), "10:00");
/// assert_eq!(slot.to_string(), "09:00-10:00");
/// ```
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Slot(TimeInterval<i64>);

impl Slot {
    #[inline]
    pub const fn new(interval: TimeInterval<i64>) -> Self {
        Slot(interval)
    }

    #[inline]
    pub fn interval(self) -> TimeInterval<i64> {
        self.0
    }

    #[inline]
    pub fn start(self) -> TimePoint<i64> {
        self.0.start()
    }

    #[inline]
    pub fn end(self) -> TimePoint<i64> {
        self.0.end()
    }

    #[inline]
    pub fn duration(self) -> TimeDelta<i64> {
        self.0.duration()
    }

    /// The start as an `HH:MM` label, the shape callers serialize.
    #[inline]
    pub fn start_label(&self) -> String {
        clock_label(self.0.start())
    }

    /// The end as an `HH:MM` label.
    #[inline]
    pub fn end_label(&self) -> String {
        clock_label(self.0.end())
    }
}

impl Display for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.start_label(), self.end_label())
    }
}

impl From<TimeInterval<i64>> for Slot {
    #[inline]
    fn from(interval: TimeInterval<i64>) -> Self {
        Slot(interval)
    }
}
