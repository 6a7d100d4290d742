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

//! # Bookslot Domain Model (`bookslot-model`)
//!
//! This crate provides the domain model for appointment scheduling. It
//! builds on the minute-precision primitives of `bookslot-core` to
//! represent schedules, staff, and bookings the way the slot engine
//! consumes them.
//!
//! ## Key Data Structures
//!
//! - **`BookingId` / `EmployeeId` / `ServiceId`**: unique identifiers for
//!   the three entities the engine reasons about.
//!
//! - **`ScheduleConfig`**: the business schedule of opening hours, buffer
//!   time between slots, break windows, and working days. Carries an
//!   explicit [`config::ScheduleConfig::validate`] for configuration-save
//!   time; the engine itself tolerates degenerate configs by returning no
//!   slots.
//!
//! - **`Booking`**: a reserved appointment on a date, with status,
//!   duration, and an optional assigned employee (plus that employee's
//!   gender, denormalized onto the snapshot by the storage layer). Any
//!   booking not cancelled is *active* and participates in conflict
//!   detection.
//!
//! - **`Employee`** and **`StaffCriteria`**: the roster as a read-only
//!   capability source, and the predicate abstraction for matching staff
//!   to a request. [`staff::GenderPreference`] is the shipped criterion.
//!
//! - **`Slot`**: a candidate bookable interval of exactly the requested
//!   duration; ephemeral output of the slot engine, never persisted.
//!
//! - **`ScenarioGenerator`**: a seeded, reproducible generator of whole
//!   scheduling scenarios (schedule + roster + bookings) for benchmarks
//!   and demos.

pub mod booking;
pub mod clock;
pub mod config;
pub mod id;
pub mod scenario;
pub mod slot;
pub mod staff;
