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

//! The storage seam the engine reads through.

use bookslot_model::booking::Booking;
use bookslot_model::config::ScheduleConfig;
use bookslot_model::id::{EmployeeId, ServiceId};
use bookslot_model::scenario::Scenario;
use bookslot_model::staff::Employee;
use std::convert::Infallible;
use time::Date;

/// Read access to the world state a slot query plans against.
///
/// Implementations fetch fresh state per call; the engine never caches
/// across queries. Only storage failures surface as errors. Every
/// domain-level "nothing there" condition is an ordinary empty result.
pub trait BookingStore {
    type Error: std::error::Error;

    /// The single active schedule configuration.
    fn schedule_config(&self) -> Result<ScheduleConfig, Self::Error>;

    /// All bookings on `date` that still occupy time, i.e. every
    /// booking whose status is not cancelled.
    fn active_bookings(&self, date: Date) -> Result<Vec<Booking>, Self::Error>;

    /// Active employees qualified to perform `service`.
    fn qualified_staff(&self, service: ServiceId) -> Result<Vec<Employee>, Self::Error>;

    /// Active bookings assigned to `employee` on `date`.
    fn staff_bookings(
        &self,
        employee: EmployeeId,
        date: Date,
    ) -> Result<Vec<Booking>, Self::Error>;
}

/// In-memory [`BookingStore`] backed by plain vectors.
///
/// Serves tests, benches, and the demo binary. Lookups are linear
/// scans; the store holds one day's worth of data, not a database.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    schedule: ScheduleConfig,
    employees: Vec<Employee>,
    bookings: Vec<Booking>,
}

impl MemoryStore {
    #[inline]
    pub fn new(
        schedule: ScheduleConfig,
        employees: Vec<Employee>,
        bookings: Vec<Booking>,
    ) -> Self {
        Self {
            schedule,
            employees,
            bookings,
        }
    }

    /// Loads a generated scenario into a fresh store.
    pub fn from_scenario(scenario: &Scenario) -> Self {
        Self::new(
            scenario.schedule().clone(),
            scenario.employees().to_vec(),
            scenario.bookings().to_vec(),
        )
    }

    /// Inserts a booking, e.g. after a verified confirmation.
    #[inline]
    pub fn insert_booking(&mut self, booking: Booking) {
        self.bookings.push(booking);
    }
}

impl BookingStore for MemoryStore {
    type Error = Infallible;

    fn schedule_config(&self) -> Result<ScheduleConfig, Self::Error> {
        Ok(self.schedule.clone())
    }

    fn active_bookings(&self, date: Date) -> Result<Vec<Booking>, Self::Error> {
        Ok(self
            .bookings
            .iter()
            .filter(|b| b.date() == date && b.is_active())
            .cloned()
            .collect())
    }

    fn qualified_staff(&self, service: ServiceId) -> Result<Vec<Employee>, Self::Error> {
        Ok(self
            .employees
            .iter()
            .filter(|e| e.is_active() && e.offers(service))
            .cloned()
            .collect())
    }

    fn staff_bookings(
        &self,
        employee: EmployeeId,
        date: Date,
    ) -> Result<Vec<Booking>, Self::Error> {
        Ok(self
            .bookings
            .iter()
            .filter(|b| b.date() == date && b.is_active() && b.employee() == Some(employee))
            .cloned()
            .collect())
    }
}
