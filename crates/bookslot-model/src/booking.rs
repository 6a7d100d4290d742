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

//! Bookings and their lifecycle status.

use crate::id::{BookingId, EmployeeId};
use crate::staff::Gender;
use bookslot_core::time::{TimeDelta, TimeInterval, TimePoint};
use std::fmt::Display;
use time::Date;

/// Lifecycle status of a booking.
///
/// Every status except `Cancelled` is *active*: it occupies its time slot
/// for conflict detection. Rows are never physically deleted, so cancelled
/// bookings still appear in storage snapshots and must be filtered here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
    NoShow,
}

impl BookingStatus {
    /// Returns true if a booking in this status participates in conflict
    /// detection.
    #[inline]
    pub fn is_active(self) -> bool {
        !matches!(self, BookingStatus::Cancelled)
    }
}

impl Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BookingStatus::Pending => write!(f, "pending"),
            BookingStatus::Confirmed => write!(f, "confirmed"),
            BookingStatus::Completed => write!(f, "completed"),
            BookingStatus::Cancelled => write!(f, "cancelled"),
            BookingStatus::NoShow => write!(f, "no_show"),
        }
    }
}

/// A reserved appointment as the engine sees it.
///
/// The assigned employee's gender is denormalized onto the booking by the
/// storage layer (it requires an employee lookup); `None` means no employee
/// is assigned or the lookup did not resolve. Such a booking never matches
/// a gender-specific conflict filter but still occupies its slot for
/// no-preference requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Booking {
    id: BookingId,
    date: Date,
    start: TimePoint<i64>,
    duration: TimeDelta<i64>,
    status: BookingStatus,
    employee: Option<EmployeeId>,
    employee_gender: Option<Gender>,
}

impl Booking {
    /// Creates an unassigned booking.
    pub fn new(
        id: BookingId,
        date: Date,
        start: TimePoint<i64>,
        duration: TimeDelta<i64>,
        status: BookingStatus,
    ) -> Self {
        Self {
            id,
            date,
            start,
            duration,
            status,
            employee: None,
            employee_gender: None,
        }
    }

    /// Assigns an employee (and their recorded gender) to the booking.
    #[inline]
    pub fn assign(mut self, employee: EmployeeId, gender: Gender) -> Self {
        self.employee = Some(employee);
        self.employee_gender = Some(gender);
        self
    }

    #[inline]
    pub fn id(&self) -> BookingId {
        self.id
    }

    #[inline]
    pub fn date(&self) -> Date {
        self.date
    }

    #[inline]
    pub fn start(&self) -> TimePoint<i64> {
        self.start
    }

    #[inline]
    pub fn duration(&self) -> TimeDelta<i64> {
        self.duration
    }

    #[inline]
    pub fn status(&self) -> BookingStatus {
        self.status
    }

    #[inline]
    pub fn employee(&self) -> Option<EmployeeId> {
        self.employee
    }

    #[inline]
    pub fn employee_gender(&self) -> Option<Gender> {
        self.employee_gender
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    /// Returns the occupied time span `[start, start + duration)`.
    ///
    /// Negative or overflowing durations collapse to an empty interval at
    /// `start`; a corrupt row must not sink a whole day's query.
    #[inline]
    pub fn interval(&self) -> TimeInterval<i64> {
        let len = self.duration.max(TimeDelta::zero());
        self.start
            .span_of(len)
            .unwrap_or_else(|| TimeInterval::new(self.start, self.start))
    }

    /// Returns the end of the occupied span.
    #[inline]
    pub fn end(&self) -> TimePoint<i64> {
        self.interval().end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::minute_of_day;
    use time::macros::date;

    fn booking(id: u64, start_h: u8, duration: i64, status: BookingStatus) -> Booking {
        Booking::new(
            BookingId::new(id),
            date!(2025 - 06 - 02),
            minute_of_day(start_h, 0),
            TimeDelta::new(duration),
            status,
        )
    }

    #[test]
    fn test_only_cancelled_is_inactive() {
        assert!(BookingStatus::Pending.is_active());
        assert!(BookingStatus::Confirmed.is_active());
        assert!(BookingStatus::Completed.is_active());
        assert!(BookingStatus::NoShow.is_active());
        assert!(!BookingStatus::Cancelled.is_active());
    }

    #[test]
    fn test_interval_spans_start_plus_duration() {
        let b = booking(1, 9, 60, BookingStatus::Confirmed);
        let i = b.interval();
        assert_eq!(i.start(), minute_of_day(9, 0));
        assert_eq!(i.end(), minute_of_day(10, 0));
        assert_eq!(b.end(), minute_of_day(10, 0));
    }

    #[test]
    fn test_negative_duration_collapses_to_empty_interval() {
        let b = booking(1, 9, -30, BookingStatus::Confirmed);
        assert!(b.interval().is_empty());
        assert_eq!(b.end(), b.start());
    }

    #[test]
    fn test_assign_records_employee_and_gender() {
        let b = booking(1, 9, 60, BookingStatus::Confirmed)
            .assign(EmployeeId::new(5), Gender::Male);
        assert_eq!(b.employee(), Some(EmployeeId::new(5)));
        assert_eq!(b.employee_gender(), Some(Gender::Male));
    }

    #[test]
    fn test_unassigned_booking_has_no_gender() {
        let b = booking(1, 9, 60, BookingStatus::Pending);
        assert_eq!(b.employee(), None);
        assert_eq!(b.employee_gender(), None);
    }

    #[test]
    fn test_status_display_labels() {
        assert_eq!(BookingStatus::NoShow.to_string(), "no_show");
        assert_eq!(BookingStatus::Cancelled.to_string(), "cancelled");
    }
}
