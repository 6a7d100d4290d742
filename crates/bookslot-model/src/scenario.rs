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

//! Synthetic scenario generation.
//!
//! Builds whole scheduling scenarios (schedule config, staff roster, a
//! day's bookings) from a seeded RNG, so benchmarks and demos run on
//! realistic, reproducible data. The same seed always yields the same
//! scenario.

use crate::booking::{Booking, BookingStatus};
use crate::clock::{MINUTES_PER_DAY, minute_of_day};
use crate::config::{ScheduleConfig, WorkingDays};
use crate::id::{BookingId, EmployeeId, ServiceId};
use crate::staff::{Employee, Gender};
use bookslot_core::time::{TimeDelta, TimeInterval, TimePoint};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};
use std::fmt::Display;
use time::{Date, macros::date};

/// A reason a [`ScenarioConfig`] could not be built.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScenarioConfigError {
    MissingEmployees,
    MissingBookings,
    InvalidHours {
        opening: TimePoint<i64>,
        closing: TimePoint<i64>,
    },
    NonPositiveDuration(TimeDelta<i64>),
    InvalidDurationModel {
        mu: f64,
        sigma: f64,
    },
    InvalidRatio {
        name: &'static str,
        value: f64,
    },
    NoServices,
}

impl Display for ScenarioConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScenarioConfigError::MissingEmployees => {
                write!(f, "Scenario config is missing the employee count")
            }
            ScenarioConfigError::MissingBookings => {
                write!(f, "Scenario config is missing the booking count")
            }
            ScenarioConfigError::InvalidHours { opening, closing } => write!(
                f,
                "Scenario hours are invalid: {} to {}",
                opening, closing
            ),
            ScenarioConfigError::NonPositiveDuration(d) => {
                write!(f, "Scenario duration bound {} is not positive", d)
            }
            ScenarioConfigError::InvalidDurationModel { mu, sigma } => write!(
                f,
                "Scenario duration model is invalid: mu = {}, sigma = {}",
                mu, sigma
            ),
            ScenarioConfigError::InvalidRatio { name, value } => {
                write!(f, "Scenario ratio {} = {} is outside [0, 1]", name, value)
            }
            ScenarioConfigError::NoServices => {
                write!(f, "Scenario needs at least one service")
            }
        }
    }
}

impl std::error::Error for ScenarioConfigError {}

/// Configuration for synthetic scenario generation (salon-like units).
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioConfig {
    pub(crate) date: Date,
    pub(crate) opening: TimePoint<i64>,
    pub(crate) closing: TimePoint<i64>,
    pub(crate) buffer: TimeDelta<i64>,
    pub(crate) lunch_break: bool,

    pub(crate) employees: usize,
    pub(crate) services: usize,
    pub(crate) bookings: usize,

    pub(crate) duration_mu: f64,
    pub(crate) duration_sigma: f64,
    pub(crate) min_duration: TimeDelta<i64>,
    pub(crate) max_duration: TimeDelta<i64>,

    pub(crate) unassigned_ratio: f64,
    pub(crate) cancelled_ratio: f64,

    pub(crate) seed: u64,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            date: date!(2025 - 06 - 02),
            opening: minute_of_day(9, 0),
            closing: minute_of_day(17, 0),
            buffer: TimeDelta::new(15),
            lunch_break: true,

            employees: 6,
            services: 3,
            bookings: 24,

            duration_mu: 45.0,
            duration_sigma: 20.0,
            min_duration: TimeDelta::new(15),
            max_duration: TimeDelta::new(120),

            unassigned_ratio: 0.1,
            cancelled_ratio: 0.15,

            seed: 42,
        }
    }
}

impl ScenarioConfig {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        date: Date,
        opening: TimePoint<i64>,
        closing: TimePoint<i64>,
        buffer: TimeDelta<i64>,
        lunch_break: bool,
        employees: usize,
        services: usize,
        bookings: usize,
        duration_mu: f64,
        duration_sigma: f64,
        unord_min_duration: TimeDelta<i64>,
        unord_max_duration: TimeDelta<i64>,
        unassigned_ratio: f64,
        cancelled_ratio: f64,
        seed: u64,
    ) -> Result<Self, ScenarioConfigError> {
        let (min_duration, max_duration) = if unord_min_duration <= unord_max_duration {
            (unord_min_duration, unord_max_duration)
        } else {
            (unord_max_duration, unord_min_duration)
        };

        if opening >= closing
            || opening < TimePoint::zero()
            || closing > TimePoint::new(MINUTES_PER_DAY)
        {
            return Err(ScenarioConfigError::InvalidHours { opening, closing });
        }
        if !min_duration.is_positive() {
            return Err(ScenarioConfigError::NonPositiveDuration(min_duration));
        }
        if !duration_mu.is_finite()
            || !duration_sigma.is_finite()
            || duration_mu <= 0.0
            || duration_sigma <= 0.0
        {
            return Err(ScenarioConfigError::InvalidDurationModel {
                mu: duration_mu,
                sigma: duration_sigma,
            });
        }
        if !(0.0..=1.0).contains(&unassigned_ratio) {
            return Err(ScenarioConfigError::InvalidRatio {
                name: "unassigned_ratio",
                value: unassigned_ratio,
            });
        }
        if !(0.0..=1.0).contains(&cancelled_ratio) {
            return Err(ScenarioConfigError::InvalidRatio {
                name: "cancelled_ratio",
                value: cancelled_ratio,
            });
        }
        if services == 0 {
            return Err(ScenarioConfigError::NoServices);
        }

        Ok(Self {
            date,
            opening,
            closing,
            buffer,
            lunch_break,
            employees,
            services,
            bookings,
            duration_mu,
            duration_sigma,
            min_duration,
            max_duration,
            unassigned_ratio,
            cancelled_ratio,
            seed,
        })
    }

    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

/// Builder for [`ScenarioConfig`].
#[derive(Debug, Clone)]
pub struct ScenarioConfigBuilder {
    // Required
    employees: Option<usize>,
    bookings: Option<usize>,

    // Optional with defaults
    date: Date,
    opening: TimePoint<i64>,
    closing: TimePoint<i64>,
    buffer: TimeDelta<i64>,
    lunch_break: bool,
    services: usize,
    duration_mu: f64,
    duration_sigma: f64,
    min_duration: TimeDelta<i64>,
    max_duration: TimeDelta<i64>,
    unassigned_ratio: f64,
    cancelled_ratio: f64,
    seed: u64,
}

impl Default for ScenarioConfigBuilder {
    fn default() -> Self {
        let defaults = ScenarioConfig::default();
        Self {
            employees: None,
            bookings: None,
            date: defaults.date,
            opening: defaults.opening,
            closing: defaults.closing,
            buffer: defaults.buffer,
            lunch_break: defaults.lunch_break,
            services: defaults.services,
            duration_mu: defaults.duration_mu,
            duration_sigma: defaults.duration_sigma,
            min_duration: defaults.min_duration,
            max_duration: defaults.max_duration,
            unassigned_ratio: defaults.unassigned_ratio,
            cancelled_ratio: defaults.cancelled_ratio,
            seed: defaults.seed,
        }
    }
}

impl ScenarioConfigBuilder {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn employees(mut self, v: usize) -> Self {
        self.employees = Some(v);
        self
    }

    #[inline]
    pub fn bookings(mut self, v: usize) -> Self {
        self.bookings = Some(v);
        self
    }

    #[inline]
    pub fn date(mut self, v: Date) -> Self {
        self.date = v;
        self
    }

    #[inline]
    pub fn hours(mut self, opening: TimePoint<i64>, closing: TimePoint<i64>) -> Self {
        self.opening = opening;
        self.closing = closing;
        self
    }

    #[inline]
    pub fn buffer(mut self, v: TimeDelta<i64>) -> Self {
        self.buffer = v;
        self
    }

    #[inline]
    pub fn lunch_break(mut self, yes: bool) -> Self {
        self.lunch_break = yes;
        self
    }

    #[inline]
    pub fn services(mut self, v: usize) -> Self {
        self.services = v;
        self
    }

    #[inline]
    pub fn duration_model(mut self, mu: f64, sigma: f64) -> Self {
        self.duration_mu = mu;
        self.duration_sigma = sigma;
        self
    }

    #[inline]
    pub fn duration_bounds(mut self, min: TimeDelta<i64>, max: TimeDelta<i64>) -> Self {
        self.min_duration = min;
        self.max_duration = max;
        self
    }

    #[inline]
    pub fn unassigned_ratio(mut self, v: f64) -> Self {
        self.unassigned_ratio = v;
        self
    }

    #[inline]
    pub fn cancelled_ratio(mut self, v: f64) -> Self {
        self.cancelled_ratio = v;
        self
    }

    #[inline]
    pub fn seed(mut self, v: u64) -> Self {
        self.seed = v;
        self
    }

    pub fn build(self) -> Result<ScenarioConfig, ScenarioConfigError> {
        use ScenarioConfigError::*;
        let employees = self.employees.ok_or(MissingEmployees)?;
        let bookings = self.bookings.ok_or(MissingBookings)?;

        ScenarioConfig::new(
            self.date,
            self.opening,
            self.closing,
            self.buffer,
            self.lunch_break,
            employees,
            self.services,
            bookings,
            self.duration_mu,
            self.duration_sigma,
            self.min_duration,
            self.max_duration,
            self.unassigned_ratio,
            self.cancelled_ratio,
            self.seed,
        )
    }
}

/// A generated scheduling scenario: one day's worth of world state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scenario {
    date: Date,
    schedule: ScheduleConfig,
    services: Vec<ServiceId>,
    employees: Vec<Employee>,
    bookings: Vec<Booking>,
}

impl Scenario {
    #[inline]
    pub fn date(&self) -> Date {
        self.date
    }

    #[inline]
    pub fn schedule(&self) -> &ScheduleConfig {
        &self.schedule
    }

    #[inline]
    pub fn services(&self) -> &[ServiceId] {
        &self.services
    }

    #[inline]
    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    #[inline]
    pub fn bookings(&self) -> &[Booking] {
        &self.bookings
    }
}

/// Seeded generator producing [`Scenario`]s from a [`ScenarioConfig`].
pub struct ScenarioGenerator {
    config: ScenarioConfig,
    rng: ChaCha8Rng,
    duration_distribution: Normal<f64>,
    next_booking_id: u64,
    next_employee_id: u64,
}

impl From<ScenarioConfig> for ScenarioGenerator {
    fn from(config: ScenarioConfig) -> Self {
        Self::new(config)
    }
}

impl ScenarioGenerator {
    pub fn new(config: ScenarioConfig) -> Self {
        let seed = config.seed();
        Self {
            duration_distribution: Normal::new(config.duration_mu, config.duration_sigma)
                .expect("valid duration model"),
            rng: ChaCha8Rng::seed_from_u64(seed),
            config,
            next_booking_id: 0,
            next_employee_id: 0,
        }
    }

    #[inline]
    fn fresh_booking_id(&mut self) -> BookingId {
        let id = self.next_booking_id;
        self.next_booking_id += 1;
        BookingId::new(id)
    }

    #[inline]
    fn fresh_employee_id(&mut self) -> EmployeeId {
        let id = self.next_employee_id;
        self.next_employee_id += 1;
        EmployeeId::new(id)
    }

    fn sample_gender(&mut self) -> Gender {
        // Keep a small share of unrecorded genders; the lookup-miss path
        // must stay exercised.
        let roll = self.rng.random::<f64>();
        if roll < 0.05 {
            Gender::Unspecified
        } else if roll < 0.525 {
            Gender::Female
        } else {
            Gender::Male
        }
    }

    fn sample_duration(&mut self) -> TimeDelta<i64> {
        let raw = self.duration_distribution.sample(&mut self.rng).round() as i64;
        TimeDelta::new(raw.clamp(
            self.config.min_duration.value(),
            self.config.max_duration.value(),
        ))
    }

    fn sample_status(&mut self) -> BookingStatus {
        if self.rng.random::<f64>() < self.config.cancelled_ratio {
            return BookingStatus::Cancelled;
        }
        match self.rng.random_range(0..10) {
            0 => BookingStatus::Pending,
            1 => BookingStatus::Completed,
            2 => BookingStatus::NoShow,
            _ => BookingStatus::Confirmed,
        }
    }

    fn generate_employees(&mut self, services: &[ServiceId]) -> Vec<Employee> {
        let mut out = Vec::with_capacity(self.config.employees);
        for _ in 0..self.config.employees {
            let id = self.fresh_employee_id();
            let gender = self.sample_gender();
            let active = self.rng.random::<f64>() >= 0.1;
            let mut offered = Vec::with_capacity(services.len());
            for service in services {
                if self.rng.random::<f64>() < 0.6 {
                    offered.push(*service);
                }
            }
            if offered.is_empty() {
                let pick = self.rng.random_range(0..services.len());
                offered.push(services[pick]);
            }
            out.push(Employee::new(id, gender, active, offered));
        }
        out
    }

    fn generate_bookings(&mut self, date: Date, employees: &[Employee]) -> Vec<Booking> {
        let opening = self.config.opening.value();
        let closing = self.config.closing.value();
        let mut out = Vec::with_capacity(self.config.bookings);
        for _ in 0..self.config.bookings {
            let duration = self.sample_duration();
            let latest_start = closing - duration.value();
            let start = if latest_start <= opening {
                opening
            } else {
                self.rng.random_range(opening..=latest_start)
            };
            let status = self.sample_status();
            let mut booking = Booking::new(
                self.fresh_booking_id(),
                date,
                TimePoint::new(start),
                duration,
                status,
            );
            if !employees.is_empty() && self.rng.random::<f64>() >= self.config.unassigned_ratio {
                let pick = self.rng.random_range(0..employees.len());
                let employee = &employees[pick];
                booking = booking.assign(employee.id(), employee.gender());
            }
            out.push(booking);
        }
        out
    }

    /// Generates the next scenario.
    ///
    /// Successive calls keep consuming the same RNG stream and id space,
    /// so a generator yields a reproducible *sequence* of scenarios.
    pub fn generate(&mut self) -> Scenario {
        let services: Vec<ServiceId> = (1..=self.config.services as u64)
            .map(ServiceId::new)
            .collect();
        let employees = self.generate_employees(&services);
        let date = self.config.date;
        let bookings = self.generate_bookings(date, &employees);

        let lunch = TimeInterval::new(minute_of_day(12, 0), minute_of_day(12, 30));
        let breaks = if self.config.lunch_break
            && self.config.opening <= lunch.start()
            && lunch.end() <= self.config.closing
        {
            vec![lunch]
        } else {
            Vec::new()
        };

        // The scenario date must be a working day or every query comes
        // back empty.
        let working_days = WorkingDays::weekdays().with(date.weekday());
        let schedule = ScheduleConfig::new(
            self.config.opening,
            self.config.closing,
            self.config.buffer,
            breaks,
            working_days,
        );

        Scenario {
            date,
            schedule,
            services,
            employees,
            bookings,
        }
    }
}
