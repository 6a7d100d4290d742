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

//! Minute-of-day conversions.
//!
//! Schedules and bookings measure time of day as whole minutes since
//! midnight (`09:00` is minute 540). Keeping intra-day arithmetic on a
//! plain integer axis avoids wrap-around at midnight; a wall-clock type
//! appears only at the edges, as `HH:MM` labels.

use bookslot_core::time::TimePoint;

/// Minutes in a calendar day; the valid day axis is `[0, MINUTES_PER_DAY]`.
pub const MINUTES_PER_DAY: i64 = 24 * 60;

/// Converts a wall-clock hour and minute to a point on the day axis.
///
/// # Panics
///
/// Panics if `hour > 23` or `minute > 59`.
///
/// # Examples
///
/// ```
/// use bookslot_model::clock::minute_of_day;
///
/// assert_eq!(minute_of_day(9, 0).value(), 540);
/// assert_eq!(minute_of_day(16, 45).value(), 1005);
/// ```
#[inline]
pub fn minute_of_day(hour: u8, minute: u8) -> TimePoint<i64> {
    assert!(hour <= 23, "minute_of_day: hour must be <= 23");
    assert!(minute <= 59, "minute_of_day: minute must be <= 59");
    TimePoint::new(i64::from(hour) * 60 + i64::from(minute))
}

/// Formats a point on the day axis as an `HH:MM` label.
///
/// Points outside `[0, MINUTES_PER_DAY)` still format (the hour field just
/// grows past 23); callers that want strict wall-clock output validate the
/// schedule first.
///
/// # Examples
///
/// ```
/// use bookslot_model::clock::{clock_label, minute_of_day};
///
/// assert_eq!(clock_label(minute_of_day(9, 0)), "09:00");
/// assert_eq!(clock_label(minute_of_day(16, 45)), "16:45");
/// ```
#[inline]
pub fn clock_label(point: TimePoint<i64>) -> String {
    let minutes = point.value();
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}
