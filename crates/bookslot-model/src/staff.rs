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

//! Staff roster types and request-matching criteria.

use crate::id::{EmployeeId, ServiceId};
use std::collections::BTreeSet;
use std::fmt::Display;

/// Recorded gender of an employee.
///
/// `Unspecified` is a real roster state, not an error: such employees never
/// match a gender-specific request but participate normally in
/// no-preference availability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gender {
    Female,
    Male,
    Unspecified,
}

impl Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Gender::Female => write!(f, "female"),
            Gender::Male => write!(f, "male"),
            Gender::Unspecified => write!(f, "unspecified"),
        }
    }
}

/// A customer's staff-gender preference on a booking request.
///
/// The two arms of the engine hang off this enum: a *specific* preference
/// is answered from bookings alone (is the slot already taken by someone of
/// that gender?), while `NoPreference` requires a headcount check (is any
/// qualified employee free?). See the slot generator for the full contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GenderPreference {
    Female,
    Male,
    #[default]
    NoPreference,
}

impl GenderPreference {
    /// Returns whether a staff gender satisfies this preference.
    ///
    /// `NoPreference` admits every gender, including `Unspecified`.
    ///
    /// # Examples
    ///
    /// ```
    /// use bookslot_model::staff::{Gender, GenderPreference};
    ///
    /// assert!(GenderPreference::Female.admits(Gender::Female));
    /// assert!(!GenderPreference::Female.admits(Gender::Male));
    /// assert!(!GenderPreference::Female.admits(Gender::Unspecified));
    /// assert!(GenderPreference::NoPreference.admits(Gender::Unspecified));
    /// ```
    #[inline]
    pub fn admits(self, gender: Gender) -> bool {
        match self {
            GenderPreference::Female => gender == Gender::Female,
            GenderPreference::Male => gender == Gender::Male,
            GenderPreference::NoPreference => true,
        }
    }
}

impl Display for GenderPreference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenderPreference::Female => write!(f, "female"),
            GenderPreference::Male => write!(f, "male"),
            GenderPreference::NoPreference => write!(f, "no_preference"),
        }
    }
}

/// A predicate deciding whether an employee can serve a request.
///
/// The availability resolver is generic over this trait so new matching
/// rules (spoken language, seniority, ...) slot in without new resolver
/// methods. [`GenderPreference`] is the one shipped implementation.
pub trait StaffCriteria {
    /// Returns true if the employee satisfies this criterion.
    fn matches(&self, employee: &Employee) -> bool;
}

impl StaffCriteria for GenderPreference {
    #[inline]
    fn matches(&self, employee: &Employee) -> bool {
        self.admits(employee.gender())
    }
}

/// An employee as the engine sees them: a read-only capability source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Employee {
    id: EmployeeId,
    gender: Gender,
    active: bool,
    services: BTreeSet<ServiceId>,
}

impl Employee {
    pub fn new(
        id: EmployeeId,
        gender: Gender,
        active: bool,
        services: impl IntoIterator<Item = ServiceId>,
    ) -> Self {
        Self {
            id,
            gender,
            active,
            services: services.into_iter().collect(),
        }
    }

    #[inline]
    pub fn id(&self) -> EmployeeId {
        self.id
    }

    #[inline]
    pub fn gender(&self) -> Gender {
        self.gender
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Returns true if the employee offers the given service.
    #[inline]
    pub fn offers(&self, service: ServiceId) -> bool {
        self.services.contains(&service)
    }

    #[inline]
    pub fn services(&self) -> &BTreeSet<ServiceId> {
        &self.services
    }
}
