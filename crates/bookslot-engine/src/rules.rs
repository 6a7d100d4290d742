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

//! Conflict and availability predicates.
//!
//! Everything in this module is a pure function over slices. Two
//! different boundary rules apply on purpose:
//!
//! - Break windows use the strict half-open overlap: a slot may end
//!   exactly when a break starts.
//! - Booking conflicts use the inclusive test: a slot ending exactly
//!   when a booking starts still conflicts, because back-to-back
//!   appointments need the configured buffer between them.

use crate::context::StaffMember;
use bookslot_core::time::TimeInterval;
use bookslot_model::booking::Booking;
use bookslot_model::id::{BookingId, ServiceId};
use bookslot_model::staff::{Employee, Gender, GenderPreference, StaffCriteria};

/// Inclusive-boundary conflict test between a booking interval and a
/// candidate slot: `booking.start <= candidate.end && booking.end >=
/// candidate.start`.
///
/// # Examples
///
/// ```
/// use bookslot_core::time::{TimePoint, TimeInterval};
/// use bookslot_engine::rules::conflicts_with;
///
/// let booking = TimeInterval::new(TimePoint::new(540), TimePoint::new(600));
/// let touching = TimeInterval::new(TimePoint::new(600), TimePoint::new(660));
/// let clear = TimeInterval::new(TimePoint::new(601), TimePoint::new(660));
/// assert!(conflicts_with(&booking, &touching));
/// assert!(!conflicts_with(&booking, &clear));
/// ```
#[inline]
pub fn conflicts_with(booking: &TimeInterval<i64>, candidate: &TimeInterval<i64>) -> bool {
    !booking.strictly_precedes(candidate) && !candidate.strictly_precedes(booking)
}

/// True iff the candidate strictly overlaps any configured break
/// window. An empty break list never blocks.
#[inline]
pub fn is_break_time(candidate: &TimeInterval<i64>, breaks: &[TimeInterval<i64>]) -> bool {
    breaks.iter().any(|b| b.intersects(candidate))
}

fn matches_preference(booking: &Booking, preference: GenderPreference) -> bool {
    match preference {
        GenderPreference::NoPreference => true,
        GenderPreference::Female => booking.employee_gender() == Some(Gender::Female),
        GenderPreference::Male => booking.employee_gender() == Some(Gender::Male),
    }
}

/// Does any booking in `bookings` block the candidate slot?
///
/// Cancelled bookings never count. Under a specific gender preference
/// only bookings held by staff of that gender count; a booking whose
/// assignee gender is unrecorded is skipped there but still counts
/// under [`GenderPreference::NoPreference`]. The `exclude` id drops
/// one booking from consideration, which is how a reschedule avoids
/// colliding with itself.
pub fn has_conflict(
    bookings: &[Booking],
    candidate: &TimeInterval<i64>,
    exclude: Option<BookingId>,
    preference: GenderPreference,
) -> bool {
    bookings.iter().any(|booking| {
        booking.is_active()
            && exclude != Some(booking.id())
            && conflicts_with(&booking.interval(), candidate)
            && matches_preference(booking, preference)
    })
}

/// True iff nothing on the employee's calendar blocks the candidate,
/// under the inclusive boundary rule.
pub fn is_employee_free(
    calendar: &[Booking],
    candidate: &TimeInterval<i64>,
    exclude: Option<BookingId>,
) -> bool {
    !calendar.iter().any(|booking| {
        booking.is_active()
            && exclude != Some(booking.id())
            && conflicts_with(&booking.interval(), candidate)
    })
}

/// Staff able to take the candidate slot: active, offering `service`,
/// matching `criteria`, and free on their own calendar.
///
/// Results keep the caller's staff order; contexts hold staff in
/// ascending id order, so takers can use the first entry as the
/// deterministic assignment choice. An empty result means "no
/// availability", not an error.
pub fn available_staff<'a, C: StaffCriteria>(
    staff: &'a [StaffMember],
    service: ServiceId,
    candidate: &TimeInterval<i64>,
    exclude: Option<BookingId>,
    criteria: &C,
) -> Vec<&'a Employee> {
    staff
        .iter()
        .filter(|member| {
            let employee = member.employee();
            employee.is_active()
                && employee.offers(service)
                && criteria.matches(employee)
                && is_employee_free(member.calendar(), candidate, exclude)
        })
        .map(|member| member.employee())
        .collect()
}
