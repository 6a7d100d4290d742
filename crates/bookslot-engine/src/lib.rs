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

//! # Bookslot Scheduling Engine
//!
//! Computes bookable appointment slots for a day and resolves staffing
//! conflicts against existing bookings.
//!
//! The crate is split into a pure rule layer and a thin orchestration
//! layer on top of a storage seam:
//!
//! - [`store`]: the [`store::BookingStore`] trait the engine reads
//!   through, plus an in-memory implementation.
//! - [`context`]: an immutable per-query snapshot of one day's world
//!   state, fetched once so everything after it is pure.
//! - [`rules`]: the overlap, conflict, and staff-availability
//!   predicates. No I/O, no logging.
//! - [`slots`]: the slot walk over the opening hours, producing either
//!   the bookable list or a full survey with per-candidate outcomes.
//! - [`planner`]: fetch-then-compute orchestration carrying the
//!   tracing spans.

pub mod context;
pub mod planner;
pub mod rules;
pub mod slots;
pub mod store;
