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

//! Fetch-then-compute orchestration.
//!
//! The planner owns the store handle, assembles the per-query snapshot,
//! and hands it to the pure layers. Tracing lives here and nowhere
//! below: the predicates answer, the planner narrates.

use crate::context::DayContext;
use crate::rules;
use crate::slots::{self, SlotOutcome, SurveyedSlot};
use crate::store::BookingStore;
use bookslot_core::time::{TimeDelta, TimePoint};
use bookslot_model::config::ScheduleConfig;
use bookslot_model::id::{BookingId, ServiceId};
use bookslot_model::slot::Slot;
use bookslot_model::staff::{Employee, GenderPreference};
use time::Date;
use tracing::{debug, instrument};

/// The caller's side of a slot query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotRequest {
    service: ServiceId,
    duration: TimeDelta<i64>,
    preference: GenderPreference,
    exclude: Option<BookingId>,
}

impl SlotRequest {
    /// A request with no staff preference and no exclusion.
    #[inline]
    pub fn new(service: ServiceId, duration: TimeDelta<i64>) -> Self {
        Self {
            service,
            duration,
            preference: GenderPreference::default(),
            exclude: None,
        }
    }

    #[inline]
    pub fn with_preference(mut self, preference: GenderPreference) -> Self {
        self.preference = preference;
        self
    }

    /// Marks `booking` as the one being rescheduled, dropping it from
    /// every conflict consideration.
    #[inline]
    pub fn excluding(mut self, booking: BookingId) -> Self {
        self.exclude = Some(booking);
        self
    }

    #[inline]
    pub fn service(&self) -> ServiceId {
        self.service
    }

    #[inline]
    pub fn duration(&self) -> TimeDelta<i64> {
        self.duration
    }

    #[inline]
    pub fn preference(&self) -> GenderPreference {
        self.preference
    }

    #[inline]
    pub fn exclude(&self) -> Option<BookingId> {
        self.exclude
    }
}

/// Runs slot queries against a [`BookingStore`].
///
/// Every query fetches a fresh snapshot; the planner holds no state
/// between calls. Storage failures are the only errors it returns.
#[derive(Debug, Clone)]
pub struct SlotPlanner<S> {
    store: S,
}

impl<S: BookingStore> SlotPlanner<S> {
    #[inline]
    pub fn new(store: S) -> Self {
        Self { store }
    }

    #[inline]
    pub fn store(&self) -> &S {
        &self.store
    }

    fn snapshot(
        &self,
        date: Date,
        service: ServiceId,
    ) -> Result<(ScheduleConfig, DayContext), S::Error> {
        let schedule = self.store.schedule_config()?;
        let context = DayContext::load(&self.store, date, service)?;
        Ok((schedule, context))
    }

    /// The bookable slots for `date`, in chronological order.
    #[instrument(
        skip_all,
        fields(date = %date, service = %request.service(), preference = %request.preference()),
        err(Display)
    )]
    pub fn available_slots(
        &self,
        date: Date,
        request: &SlotRequest,
    ) -> Result<Vec<Slot>, S::Error> {
        let (schedule, context) = self.snapshot(date, request.service())?;
        let found = slots::available_slots(
            &schedule,
            &context,
            request.duration(),
            request.preference(),
            request.exclude(),
        );
        debug!(
            slots = found.len(),
            bookings = context.bookings().len(),
            staff = context.staff().len(),
            "Computed bookable slots"
        );
        Ok(found)
    }

    /// Every candidate with its admission outcome.
    #[instrument(
        skip_all,
        fields(date = %date, service = %request.service(), preference = %request.preference()),
        err(Display)
    )]
    pub fn survey(&self, date: Date, request: &SlotRequest) -> Result<Vec<SurveyedSlot>, S::Error> {
        let (schedule, context) = self.snapshot(date, request.service())?;
        let surveyed = slots::survey(
            &schedule,
            &context,
            request.duration(),
            request.preference(),
            request.exclude(),
        );
        debug!(candidates = surveyed.len(), "Surveyed slot candidates");
        Ok(surveyed)
    }

    /// The earliest bookable slot, if any.
    #[instrument(
        skip_all,
        fields(date = %date, service = %request.service()),
        err(Display)
    )]
    pub fn first_available(
        &self,
        date: Date,
        request: &SlotRequest,
    ) -> Result<Option<Slot>, S::Error> {
        let (schedule, context) = self.snapshot(date, request.service())?;
        Ok(slots::first_available(
            &schedule,
            &context,
            request.duration(),
            request.preference(),
            request.exclude(),
        ))
    }

    /// Re-checks one candidate against fresh state, the gate a
    /// transactional insert runs before committing. Anything other
    /// than [`SlotOutcome::Bookable`] names the conflict.
    #[instrument(
        skip_all,
        fields(date = %date, start = %start, service = %request.service()),
        err(Display)
    )]
    pub fn verify(
        &self,
        date: Date,
        start: TimePoint<i64>,
        request: &SlotRequest,
    ) -> Result<SlotOutcome, S::Error> {
        let (schedule, context) = self.snapshot(date, request.service())?;
        let outcome = slots::verify(
            &schedule,
            &context,
            start,
            request.duration(),
            request.preference(),
            request.exclude(),
        );
        debug!(outcome = %outcome, "Verified candidate slot");
        Ok(outcome)
    }

    /// The staff free to take a candidate slot, in ascending id order;
    /// the first entry is the deterministic assignment choice.
    #[instrument(
        skip_all,
        fields(date = %date, start = %start, service = %request.service()),
        err(Display)
    )]
    pub fn available_staff(
        &self,
        date: Date,
        start: TimePoint<i64>,
        request: &SlotRequest,
    ) -> Result<Vec<Employee>, S::Error> {
        let context = DayContext::load(&self.store, date, request.service())?;
        let Some(candidate) = start.span_of(request.duration()) else {
            return Ok(Vec::new());
        };
        let free = rules::available_staff(
            context.staff(),
            context.service(),
            &candidate,
            request.exclude(),
            &request.preference(),
        );
        debug!(free = free.len(), "Resolved staff availability");
        Ok(free.into_iter().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use bookslot_model::booking::{Booking, BookingStatus};
    use bookslot_model::clock::minute_of_day;
    use bookslot_model::config::WorkingDays;
    use bookslot_model::id::EmployeeId;
    use bookslot_model::staff::Gender;
    use std::fmt::Display;
    use time::macros::date;

    const MONDAY: Date = date!(2025 - 06 - 02);
    const SERVICE: ServiceId = ServiceId::new(1);

    fn store() -> MemoryStore {
        let schedule = ScheduleConfig::new(
            minute_of_day(9, 0),
            minute_of_day(12, 0),
            TimeDelta::new(0),
            Vec::new(),
            WorkingDays::weekdays(),
        );
        let staff = vec![Employee::new(
            EmployeeId::new(1),
            Gender::Female,
            true,
            [SERVICE],
        )];
        MemoryStore::new(schedule, staff, Vec::new())
    }

    fn hour_request() -> SlotRequest {
        SlotRequest::new(SERVICE, TimeDelta::new(60))
    }

    #[test]
    fn test_request_defaults_to_no_preference() {
        let request = hour_request();
        assert_eq!(request.preference(), GenderPreference::NoPreference);
        assert_eq!(request.exclude(), None);
    }

    #[test]
    fn test_planner_lists_slots_from_store_state() {
        let planner = SlotPlanner::new(store());
        let found = planner.available_slots(MONDAY, &hour_request()).unwrap();
        let labels: Vec<String> = found.iter().map(Slot::to_string).collect();
        assert_eq!(labels, vec!["09:00-10:00", "10:00-11:00", "11:00-12:00"]);
    }

    #[test]
    fn test_verify_catches_a_racing_insert() {
        let mut racing = store();
        let planner = SlotPlanner::new(racing.clone());
        let slot = planner
            .first_available(MONDAY, &hour_request())
            .unwrap()
            .unwrap();

        // Another request lands the same slot before this one commits.
        racing.insert_booking(
            Booking::new(
                BookingId::new(1),
                MONDAY,
                slot.start(),
                slot.duration(),
                BookingStatus::Confirmed,
            )
            .assign(EmployeeId::new(1), Gender::Female),
        );

        let gate = SlotPlanner::new(racing);
        let outcome = gate.verify(MONDAY, slot.start(), &hour_request()).unwrap();
        assert_eq!(outcome, SlotOutcome::NoStaffAvailable);
    }

    #[test]
    fn test_available_staff_returns_the_free_assignee() {
        let mut seeded = store();
        seeded.insert_booking(
            Booking::new(
                BookingId::new(7),
                MONDAY,
                minute_of_day(9, 0),
                TimeDelta::new(60),
                BookingStatus::Confirmed,
            )
            .assign(EmployeeId::new(1), Gender::Female),
        );
        let planner = SlotPlanner::new(seeded);

        let busy = planner
            .available_staff(MONDAY, minute_of_day(9, 0), &hour_request())
            .unwrap();
        assert!(busy.is_empty());

        let free = planner
            .available_staff(MONDAY, minute_of_day(11, 0), &hour_request())
            .unwrap();
        assert_eq!(free.len(), 1);
        assert_eq!(free[0].id(), EmployeeId::new(1));
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct StorageDown;

    impl Display for StorageDown {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "storage unreachable")
        }
    }

    impl std::error::Error for StorageDown {}

    #[derive(Debug)]
    struct BrokenStore;

    impl BookingStore for BrokenStore {
        type Error = StorageDown;

        fn schedule_config(&self) -> Result<ScheduleConfig, Self::Error> {
            Err(StorageDown)
        }

        fn active_bookings(&self, _date: Date) -> Result<Vec<Booking>, Self::Error> {
            Err(StorageDown)
        }

        fn qualified_staff(&self, _service: ServiceId) -> Result<Vec<Employee>, Self::Error> {
            Err(StorageDown)
        }

        fn staff_bookings(
            &self,
            _employee: EmployeeId,
            _date: Date,
        ) -> Result<Vec<Booking>, Self::Error> {
            Err(StorageDown)
        }
    }

    #[test]
    fn test_storage_failures_propagate() {
        let planner = SlotPlanner::new(BrokenStore);
        let result = planner.available_slots(MONDAY, &hour_request());
        assert_eq!(result, Err(StorageDown));
    }
}
