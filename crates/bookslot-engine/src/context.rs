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

//! Per-query snapshot of one day's world state.
//!
//! A [`DayContext`] is fetched once from the store at the start of a
//! query; every predicate afterwards runs purely over it. A stale
//! snapshot is resolved at the transactional insert boundary, not here.

use crate::store::BookingStore;
use bookslot_model::booking::Booking;
use bookslot_model::id::ServiceId;
use bookslot_model::staff::Employee;
use time::Date;

/// One employee together with their bookings on the context date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaffMember {
    employee: Employee,
    calendar: Vec<Booking>,
}

impl StaffMember {
    #[inline]
    pub fn new(employee: Employee, calendar: Vec<Booking>) -> Self {
        Self { employee, calendar }
    }

    #[inline]
    pub fn employee(&self) -> &Employee {
        &self.employee
    }

    #[inline]
    pub fn calendar(&self) -> &[Booking] {
        &self.calendar
    }
}

/// Everything a slot query for one (date, service) pair reads.
///
/// Staff are held in ascending id order, so availability results come
/// back deterministically and callers can take the first match as the
/// assignment tie-break.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayContext {
    date: Date,
    service: ServiceId,
    bookings: Vec<Booking>,
    staff: Vec<StaffMember>,
}

impl DayContext {
    /// Assembles a snapshot from raw parts, normalizing staff order.
    pub fn from_parts(
        date: Date,
        service: ServiceId,
        bookings: Vec<Booking>,
        mut staff: Vec<StaffMember>,
    ) -> Self {
        staff.sort_by_key(|m| m.employee().id());
        Self {
            date,
            service,
            bookings,
            staff,
        }
    }

    /// Fetches the snapshot for `date` and `service` from the store.
    pub fn load<S: BookingStore>(
        store: &S,
        date: Date,
        service: ServiceId,
    ) -> Result<Self, S::Error> {
        let bookings = store.active_bookings(date)?;
        let employees = store.qualified_staff(service)?;
        let mut staff = Vec::with_capacity(employees.len());
        for employee in employees {
            let calendar = store.staff_bookings(employee.id(), date)?;
            staff.push(StaffMember::new(employee, calendar));
        }
        Ok(Self::from_parts(date, service, bookings, staff))
    }

    #[inline]
    pub fn date(&self) -> Date {
        self.date
    }

    #[inline]
    pub fn service(&self) -> ServiceId {
        self.service
    }

    #[inline]
    pub fn bookings(&self) -> &[Booking] {
        &self.bookings
    }

    #[inline]
    pub fn staff(&self) -> &[StaffMember] {
        &self.staff
    }
}
