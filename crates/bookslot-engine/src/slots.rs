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

//! The slot walk.
//!
//! Candidates start at the opening time and advance by exactly
//! `duration + buffer`, admitted or not, until the next candidate no
//! longer fits before closing. Admission consults the break windows
//! first, then either the booking conflict check (specific gender
//! preference) or the staff availability pass (no preference). The
//! asymmetry is deliberate: a specific-gender request only needs "is
//! this slot already held by someone of that gender", answerable from
//! bookings alone, while a no-preference request needs "is at least
//! one qualified person free", which requires per-employee calendars.
//!
//! Degenerate inputs (inverted hours, non-positive duration or step)
//! yield an empty walk, never a panic.

use crate::context::DayContext;
use crate::rules;
use bookslot_core::time::{TimeDelta, TimeInterval, TimePoint};
use bookslot_model::config::ScheduleConfig;
use bookslot_model::id::BookingId;
use bookslot_model::slot::Slot;
use bookslot_model::staff::GenderPreference;
use std::fmt::Display;

/// Why a candidate slot is or is not bookable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotOutcome {
    /// Free to book.
    Bookable,
    /// The requested date is not a working day.
    ClosedDay,
    /// The candidate does not lie fully inside the opening hours, or
    /// has no positive duration. Produced by [`verify`] only; the walk
    /// never generates such candidates.
    OutsideHours,
    /// The candidate strictly overlaps a configured break window.
    DuringBreak,
    /// An existing booking blocks the candidate under the inclusive
    /// boundary rule.
    AlreadyBooked,
    /// No qualified employee is free for the candidate.
    NoStaffAvailable,
}

impl SlotOutcome {
    #[inline]
    pub fn is_bookable(self) -> bool {
        matches!(self, SlotOutcome::Bookable)
    }
}

impl Display for SlotOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            SlotOutcome::Bookable => "bookable",
            SlotOutcome::ClosedDay => "closed_day",
            SlotOutcome::OutsideHours => "outside_hours",
            SlotOutcome::DuringBreak => "during_break",
            SlotOutcome::AlreadyBooked => "already_booked",
            SlotOutcome::NoStaffAvailable => "no_staff_available",
        };
        write!(f, "{}", label)
    }
}

/// One candidate from the walk together with its admission outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurveyedSlot {
    slot: Slot,
    outcome: SlotOutcome,
}

impl SurveyedSlot {
    #[inline]
    pub fn new(slot: Slot, outcome: SlotOutcome) -> Self {
        Self { slot, outcome }
    }

    #[inline]
    pub fn slot(&self) -> Slot {
        self.slot
    }

    #[inline]
    pub fn outcome(&self) -> SlotOutcome {
        self.outcome
    }

    #[inline]
    pub fn is_bookable(&self) -> bool {
        self.outcome.is_bookable()
    }
}

/// Opening-hours window and walk step, or `None` when the inputs are
/// degenerate and the walk must answer empty.
fn walk_bounds(
    schedule: &ScheduleConfig,
    duration: TimeDelta<i64>,
) -> Option<(TimeInterval<i64>, TimeDelta<i64>)> {
    let opening = schedule.opening();
    let closing = schedule.closing();
    if opening >= closing || !duration.is_positive() {
        return None;
    }
    let step = duration + schedule.buffer();
    if !step.is_positive() {
        return None;
    }
    Some((TimeInterval::new(opening, closing), step))
}

/// Break, booking, and staff admission for one in-hours candidate.
fn classify(
    schedule: &ScheduleConfig,
    context: &DayContext,
    candidate: &TimeInterval<i64>,
    preference: GenderPreference,
    exclude: Option<BookingId>,
) -> SlotOutcome {
    if rules::is_break_time(candidate, schedule.breaks()) {
        return SlotOutcome::DuringBreak;
    }
    match preference {
        GenderPreference::NoPreference => {
            let free = rules::available_staff(
                context.staff(),
                context.service(),
                candidate,
                exclude,
                &preference,
            );
            if free.is_empty() {
                SlotOutcome::NoStaffAvailable
            } else {
                SlotOutcome::Bookable
            }
        }
        GenderPreference::Female | GenderPreference::Male => {
            if rules::has_conflict(context.bookings(), candidate, exclude, preference) {
                SlotOutcome::AlreadyBooked
            } else {
                SlotOutcome::Bookable
            }
        }
    }
}

/// Walks every candidate and reports its outcome, admitted or not.
///
/// On a non-working day every candidate comes back as
/// [`SlotOutcome::ClosedDay`]. The returned candidates are in
/// chronological order and their count does not depend on admission.
pub fn survey(
    schedule: &ScheduleConfig,
    context: &DayContext,
    duration: TimeDelta<i64>,
    preference: GenderPreference,
    exclude: Option<BookingId>,
) -> Vec<SurveyedSlot> {
    let Some((hours, step)) = walk_bounds(schedule, duration) else {
        return Vec::new();
    };
    let open_day = schedule.is_open_on(context.date());
    let mut out = Vec::new();
    for start in hours.iter(step) {
        let Some(candidate) = start.span_of(duration) else {
            break;
        };
        if candidate.end() > hours.end() {
            break;
        }
        let outcome = if open_day {
            classify(schedule, context, &candidate, preference, exclude)
        } else {
            SlotOutcome::ClosedDay
        };
        out.push(SurveyedSlot::new(Slot::new(candidate), outcome));
    }
    out
}

/// The bookable slots, in chronological order.
///
/// This is the survey filtered down to admitted candidates; absence
/// from the list is the only "unavailable" signal a caller gets here,
/// [`survey`] carries the reasons.
pub fn available_slots(
    schedule: &ScheduleConfig,
    context: &DayContext,
    duration: TimeDelta<i64>,
    preference: GenderPreference,
    exclude: Option<BookingId>,
) -> Vec<Slot> {
    survey(schedule, context, duration, preference, exclude)
        .into_iter()
        .filter(SurveyedSlot::is_bookable)
        .map(|s| s.slot())
        .collect()
}

/// The earliest bookable slot, short-circuiting the walk.
pub fn first_available(
    schedule: &ScheduleConfig,
    context: &DayContext,
    duration: TimeDelta<i64>,
    preference: GenderPreference,
    exclude: Option<BookingId>,
) -> Option<Slot> {
    let (hours, step) = walk_bounds(schedule, duration)?;
    if !schedule.is_open_on(context.date()) {
        return None;
    }
    for start in hours.iter(step) {
        let candidate = start.span_of(duration)?;
        if candidate.end() > hours.end() {
            break;
        }
        if classify(schedule, context, &candidate, preference, exclude).is_bookable() {
            return Some(Slot::new(candidate));
        }
    }
    None
}

/// Re-checks one candidate immediately before the transactional
/// insert.
///
/// Slot computation and booking confirmation race; the insert boundary
/// must re-run this predicate inside the same atomic unit and reject
/// when the outcome is not [`SlotOutcome::Bookable`]. Unlike the walk,
/// the candidate comes from the caller, so its position is validated
/// against the opening hours first.
pub fn verify(
    schedule: &ScheduleConfig,
    context: &DayContext,
    start: TimePoint<i64>,
    duration: TimeDelta<i64>,
    preference: GenderPreference,
    exclude: Option<BookingId>,
) -> SlotOutcome {
    if !schedule.is_open_on(context.date()) {
        return SlotOutcome::ClosedDay;
    }
    let opening = schedule.opening();
    let closing = schedule.closing();
    if opening >= closing || !duration.is_positive() || start < opening {
        return SlotOutcome::OutsideHours;
    }
    let candidate = match start.span_of(duration) {
        Some(c) if c.end() <= closing => c,
        _ => return SlotOutcome::OutsideHours,
    };
    classify(schedule, context, &candidate, preference, exclude)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::StaffMember;
    use bookslot_model::booking::{Booking, BookingStatus};
    use bookslot_model::clock::minute_of_day;
    use bookslot_model::config::WorkingDays;
    use bookslot_model::id::{EmployeeId, ServiceId};
    use bookslot_model::staff::{Employee, Gender};
    use time::Date;
    use time::macros::date;

    const MONDAY: Date = date!(2025 - 06 - 02);
    const SUNDAY: Date = date!(2025 - 06 - 01);
    const SERVICE: ServiceId = ServiceId::new(1);

    fn schedule(
        open: (u8, u8),
        close: (u8, u8),
        buffer: i64,
        breaks: Vec<TimeInterval<i64>>,
    ) -> ScheduleConfig {
        ScheduleConfig::new(
            minute_of_day(open.0, open.1),
            minute_of_day(close.0, close.1),
            TimeDelta::new(buffer),
            breaks,
            WorkingDays::weekdays(),
        )
    }

    fn nine_to_noon() -> ScheduleConfig {
        schedule((9, 0), (12, 0), 0, Vec::new())
    }

    fn booking(id: u64, from: (u8, u8), minutes: i64) -> Booking {
        Booking::new(
            BookingId::new(id),
            MONDAY,
            minute_of_day(from.0, from.1),
            TimeDelta::new(minutes),
            BookingStatus::Confirmed,
        )
    }

    fn staffed(id: u64, gender: Gender, calendar: Vec<Booking>) -> StaffMember {
        StaffMember::new(
            Employee::new(EmployeeId::new(id), gender, true, [SERVICE]),
            calendar,
        )
    }

    fn context(bookings: Vec<Booking>, staff: Vec<StaffMember>) -> DayContext {
        DayContext::from_parts(MONDAY, SERVICE, bookings, staff)
    }

    fn labels(slots: &[Slot]) -> Vec<String> {
        slots.iter().map(Slot::to_string).collect()
    }

    const HOUR: TimeDelta<i64> = TimeDelta::new(60);

    #[test]
    fn test_empty_morning_yields_every_hourly_slot() {
        let ctx = context(Vec::new(), vec![staffed(1, Gender::Female, Vec::new())]);
        let found = available_slots(
            &nine_to_noon(),
            &ctx,
            HOUR,
            GenderPreference::NoPreference,
            None,
        );
        assert_eq!(
            labels(&found),
            vec!["09:00-10:00", "10:00-11:00", "11:00-12:00"]
        );
    }

    #[test]
    fn test_break_window_suppresses_overlapping_slot() {
        let lunch = TimeInterval::new(minute_of_day(10, 0), minute_of_day(10, 30));
        let ctx = context(Vec::new(), vec![staffed(1, Gender::Female, Vec::new())]);
        let found = available_slots(
            &schedule((9, 0), (12, 0), 0, vec![lunch]),
            &ctx,
            HOUR,
            GenderPreference::NoPreference,
            None,
        );
        assert_eq!(labels(&found), vec!["09:00-10:00", "11:00-12:00"]);
    }

    #[test]
    fn test_gender_preference_blocks_only_matching_holders() {
        let held = booking(1, (9, 0), 60).assign(EmployeeId::new(7), Gender::Male);
        let ctx = context(vec![held], Vec::new());

        // The held 09:00 slot blocks a male-preference request, and the
        // inclusive boundary also claims the touching 10:00 candidate.
        let male = available_slots(&nine_to_noon(), &ctx, HOUR, GenderPreference::Male, None);
        assert_eq!(labels(&male), vec!["11:00-12:00"]);

        let female = available_slots(&nine_to_noon(), &ctx, HOUR, GenderPreference::Female, None);
        assert_eq!(
            labels(&female),
            vec!["09:00-10:00", "10:00-11:00", "11:00-12:00"]
        );
    }

    #[test]
    fn test_no_preference_admits_slot_while_second_employee_is_free() {
        let held = booking(1, (9, 0), 60).assign(EmployeeId::new(1), Gender::Female);
        let ctx = context(
            vec![held.clone()],
            vec![
                staffed(1, Gender::Female, vec![held]),
                staffed(2, Gender::Male, Vec::new()),
            ],
        );
        let found = available_slots(
            &nine_to_noon(),
            &ctx,
            HOUR,
            GenderPreference::NoPreference,
            None,
        );
        assert_eq!(
            labels(&found),
            vec!["09:00-10:00", "10:00-11:00", "11:00-12:00"]
        );
    }

    #[test]
    fn test_no_preference_with_single_booked_employee_blocks_touching_slots() {
        let held = booking(1, (9, 0), 60).assign(EmployeeId::new(1), Gender::Female);
        let ctx = context(
            vec![held.clone()],
            vec![staffed(1, Gender::Female, vec![held])],
        );
        let found = available_slots(
            &nine_to_noon(),
            &ctx,
            HOUR,
            GenderPreference::NoPreference,
            None,
        );
        assert_eq!(labels(&found), vec!["11:00-12:00"]);
    }

    #[test]
    fn test_reschedule_excludes_own_booking() {
        let own = booking(42, (9, 0), 60).assign(EmployeeId::new(1), Gender::Female);
        let ctx = context(
            vec![own.clone()],
            vec![staffed(1, Gender::Female, vec![own])],
        );
        let found = available_slots(
            &nine_to_noon(),
            &ctx,
            HOUR,
            GenderPreference::NoPreference,
            Some(BookingId::new(42)),
        );
        assert_eq!(
            labels(&found),
            vec!["09:00-10:00", "10:00-11:00", "11:00-12:00"]
        );
    }

    #[test]
    fn test_duration_longer_than_window_yields_nothing() {
        let ctx = context(Vec::new(), vec![staffed(1, Gender::Female, Vec::new())]);
        let found = available_slots(
            &nine_to_noon(),
            &ctx,
            TimeDelta::new(240),
            GenderPreference::NoPreference,
            None,
        );
        assert!(found.is_empty());
    }

    #[test]
    fn test_every_slot_has_the_requested_duration() {
        let ctx = context(Vec::new(), vec![staffed(1, Gender::Female, Vec::new())]);
        let duration = TimeDelta::new(45);
        let surveyed = survey(
            &schedule((9, 0), (17, 0), 15, Vec::new()),
            &ctx,
            duration,
            GenderPreference::NoPreference,
            None,
        );
        assert!(!surveyed.is_empty());
        for entry in &surveyed {
            assert_eq!(entry.slot().duration(), duration);
        }
    }

    #[test]
    fn test_candidates_advance_by_duration_plus_buffer() {
        let held = booking(1, (9, 0), 600).assign(EmployeeId::new(1), Gender::Female);
        let ctx = context(vec![held], Vec::new());
        let surveyed = survey(
            &schedule((9, 0), (17, 0), 30, Vec::new()),
            &ctx,
            HOUR,
            GenderPreference::Female,
            None,
        );
        // Blocked or not, the stride never changes.
        assert!(surveyed.len() >= 2);
        assert!(surveyed.iter().all(|s| !s.is_bookable()));
        for pair in surveyed.windows(2) {
            assert_eq!(
                pair[1].slot().start() - pair[0].slot().start(),
                TimeDelta::new(90)
            );
        }
    }

    #[test]
    fn test_closed_day_yields_no_slots_and_a_closed_survey() {
        let ctx = DayContext::from_parts(
            SUNDAY,
            SERVICE,
            Vec::new(),
            vec![staffed(1, Gender::Female, Vec::new())],
        );
        let found = available_slots(
            &nine_to_noon(),
            &ctx,
            HOUR,
            GenderPreference::NoPreference,
            None,
        );
        assert!(found.is_empty());

        let surveyed = survey(
            &nine_to_noon(),
            &ctx,
            HOUR,
            GenderPreference::NoPreference,
            None,
        );
        assert_eq!(surveyed.len(), 3);
        assert!(surveyed.iter().all(|s| s.outcome() == SlotOutcome::ClosedDay));
    }

    #[test]
    fn test_inverted_hours_yield_nothing() {
        let ctx = context(Vec::new(), vec![staffed(1, Gender::Female, Vec::new())]);
        let found = available_slots(
            &schedule((17, 0), (9, 0), 0, Vec::new()),
            &ctx,
            HOUR,
            GenderPreference::NoPreference,
            None,
        );
        assert!(found.is_empty());
    }

    #[test]
    fn test_non_positive_duration_yields_nothing() {
        let ctx = context(Vec::new(), vec![staffed(1, Gender::Female, Vec::new())]);
        for minutes in [0, -30] {
            let found = available_slots(
                &nine_to_noon(),
                &ctx,
                TimeDelta::new(minutes),
                GenderPreference::NoPreference,
                None,
            );
            assert!(found.is_empty());
        }
    }

    #[test]
    fn test_negative_buffer_collapsing_the_step_yields_nothing() {
        let ctx = context(Vec::new(), vec![staffed(1, Gender::Female, Vec::new())]);
        let found = available_slots(
            &schedule((9, 0), (12, 0), -60, Vec::new()),
            &ctx,
            HOUR,
            GenderPreference::NoPreference,
            None,
        );
        assert!(found.is_empty());
    }

    #[test]
    fn test_survey_reports_mixed_reasons() {
        let lunch = TimeInterval::new(minute_of_day(10, 0), minute_of_day(10, 30));
        let held = booking(1, (11, 0), 60).assign(EmployeeId::new(9), Gender::Male);
        let ctx = context(vec![held], Vec::new());
        let surveyed = survey(
            &schedule((9, 0), (12, 0), 0, vec![lunch]),
            &ctx,
            HOUR,
            GenderPreference::Male,
            None,
        );
        let outcomes: Vec<SlotOutcome> = surveyed.iter().map(SurveyedSlot::outcome).collect();
        assert_eq!(
            outcomes,
            vec![
                SlotOutcome::Bookable,
                SlotOutcome::DuringBreak,
                SlotOutcome::AlreadyBooked,
            ]
        );
    }

    #[test]
    fn test_survey_is_idempotent() {
        let held = booking(1, (9, 0), 60).assign(EmployeeId::new(1), Gender::Female);
        let ctx = context(
            vec![held.clone()],
            vec![staffed(1, Gender::Female, vec![held])],
        );
        let run = || {
            survey(
                &nine_to_noon(),
                &ctx,
                HOUR,
                GenderPreference::NoPreference,
                None,
            )
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn test_first_available_is_the_scan_head() {
        let held = booking(1, (9, 0), 60).assign(EmployeeId::new(1), Gender::Female);
        let ctx = context(
            vec![held.clone()],
            vec![staffed(1, Gender::Female, vec![held])],
        );
        let all = available_slots(
            &nine_to_noon(),
            &ctx,
            HOUR,
            GenderPreference::NoPreference,
            None,
        );
        let first = first_available(
            &nine_to_noon(),
            &ctx,
            HOUR,
            GenderPreference::NoPreference,
            None,
        );
        assert_eq!(first, all.first().copied());
        assert_eq!(first.unwrap().to_string(), "11:00-12:00");
    }

    #[test]
    fn test_first_available_on_closed_day_is_none() {
        let ctx = DayContext::from_parts(
            SUNDAY,
            SERVICE,
            Vec::new(),
            vec![staffed(1, Gender::Female, Vec::new())],
        );
        let first = first_available(
            &nine_to_noon(),
            &ctx,
            HOUR,
            GenderPreference::NoPreference,
            None,
        );
        assert_eq!(first, None);
    }

    #[test]
    fn test_verify_admits_a_free_candidate() {
        let ctx = context(Vec::new(), vec![staffed(1, Gender::Female, Vec::new())]);
        let outcome = verify(
            &nine_to_noon(),
            &ctx,
            minute_of_day(9, 0),
            HOUR,
            GenderPreference::NoPreference,
            None,
        );
        assert_eq!(outcome, SlotOutcome::Bookable);
        assert!(outcome.is_bookable());
    }

    #[test]
    fn test_verify_rejects_out_of_hours_candidates() {
        let ctx = context(Vec::new(), vec![staffed(1, Gender::Female, Vec::new())]);
        let sched = nine_to_noon();
        for (start, duration) in [
            (minute_of_day(8, 0), HOUR),
            (minute_of_day(11, 30), HOUR),
            (minute_of_day(9, 0), TimeDelta::new(0)),
        ] {
            let outcome = verify(
                &sched,
                &ctx,
                start,
                duration,
                GenderPreference::NoPreference,
                None,
            );
            assert_eq!(outcome, SlotOutcome::OutsideHours);
        }
    }

    #[test]
    fn test_verify_reports_the_blocking_booking() {
        let held = booking(1, (9, 0), 60).assign(EmployeeId::new(7), Gender::Male);
        let ctx = context(vec![held], Vec::new());
        let outcome = verify(
            &nine_to_noon(),
            &ctx,
            minute_of_day(9, 0),
            HOUR,
            GenderPreference::Male,
            None,
        );
        assert_eq!(outcome, SlotOutcome::AlreadyBooked);
    }

    #[test]
    fn test_verify_reports_staff_shortage() {
        let ctx = context(Vec::new(), Vec::new());
        let outcome = verify(
            &nine_to_noon(),
            &ctx,
            minute_of_day(9, 0),
            HOUR,
            GenderPreference::NoPreference,
            None,
        );
        assert_eq!(outcome, SlotOutcome::NoStaffAvailable);
    }

    #[test]
    fn test_verify_reports_breaks_and_closed_days() {
        let lunch = TimeInterval::new(minute_of_day(10, 0), minute_of_day(10, 30));
        let sched = schedule((9, 0), (12, 0), 0, vec![lunch]);
        let ctx = context(Vec::new(), vec![staffed(1, Gender::Female, Vec::new())]);
        assert_eq!(
            verify(
                &sched,
                &ctx,
                minute_of_day(10, 0),
                HOUR,
                GenderPreference::NoPreference,
                None,
            ),
            SlotOutcome::DuringBreak
        );

        let sunday = DayContext::from_parts(SUNDAY, SERVICE, Vec::new(), Vec::new());
        assert_eq!(
            verify(
                &sched,
                &sunday,
                minute_of_day(9, 0),
                HOUR,
                GenderPreference::NoPreference,
                None,
            ),
            SlotOutcome::ClosedDay
        );
    }

    #[test]
    fn test_verify_allows_reschedule_onto_own_time() {
        let own = booking(42, (9, 0), 60).assign(EmployeeId::new(1), Gender::Female);
        let ctx = context(
            vec![own.clone()],
            vec![staffed(1, Gender::Female, vec![own])],
        );
        let outcome = verify(
            &nine_to_noon(),
            &ctx,
            minute_of_day(9, 0),
            HOUR,
            GenderPreference::NoPreference,
            Some(BookingId::new(42)),
        );
        assert_eq!(outcome, SlotOutcome::Bookable);
    }
}
