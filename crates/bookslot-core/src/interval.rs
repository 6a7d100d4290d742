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

//! # Half-Open Intervals
//!
//! This module provides the half-open interval `[start, end)` that the
//! scheduling engine builds everything on: appointment slots, bookings,
//! break windows, and working hours are all intervals on the minute axis.
//!
//! Half-open semantics make back-to-back ranges compose without double
//! counting: `[09:00, 10:00)` and `[10:00, 11:00)` touch but do not
//! overlap. Where the booking rules need a stricter, boundary-inclusive
//! notion of "conflict", they derive it from [`Interval::strictly_precedes`]
//! rather than changing the overlap test here.

use num_traits::Zero;
use std::cmp::Ordering;
use std::fmt;
use std::hash::Hash;
use std::iter::FusedIterator;
use std::ops::{Add, Sub};

/// A half-open interval `[start, end)`.
///
/// The start is inclusive and the end is exclusive, so the interval covers
/// all values `x` with `start <= x < end`. An interval with `start == end`
/// is empty and intersects nothing, including itself.
///
/// # Examples
///
/// ```
/// use bookslot_core::interval::Interval;
///
/// // 09:00–10:00 as minutes of the day.
/// let slot = Interval::new(540, 600);
/// assert_eq!(slot.start(), 540);
/// assert_eq!(slot.end(), 600);
/// assert!(slot.contains(540));
/// assert!(!slot.contains(600));
/// assert_eq!(slot.length(), 60);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Interval<T> {
    start_inclusive: T,
    end_exclusive: T,
}

impl<T> Interval<T> {
    /// Creates a new half-open interval `[start, end)`.
    ///
    /// The bounds are normalized: if `b < a` they are swapped, so the
    /// constructed interval always satisfies `start <= end`. Every other
    /// method relies on that invariant.
    ///
    /// # Panics
    ///
    /// Panics if `a` and `b` are not comparable (e.g. NaN).
    ///
    /// # Examples
    ///
    /// ```
    /// use bookslot_core::interval::Interval;
    ///
    /// let i = Interval::new(540, 600);
    /// assert_eq!(i.start(), 540);
    /// assert_eq!(i.end(), 600);
    ///
    /// let swapped = Interval::new(600, 540);
    /// assert_eq!(swapped.start(), 540);
    /// assert_eq!(swapped.end(), 600);
    /// ```
    #[inline]
    pub fn new(a: T, b: T) -> Self
    where
        T: PartialOrd + Copy,
    {
        let ord = a
            .partial_cmp(&b)
            .expect("Interval::new: non-comparable bounds (NaN?)");
        let (s, e) = match ord {
            Ordering::Greater => (b, a),
            _ => (a, b),
        };

        Self {
            start_inclusive: s,
            end_exclusive: e,
        }
    }

    /// Returns the inclusive start of the interval.
    #[inline]
    pub fn start(&self) -> T
    where
        T: Copy,
    {
        self.start_inclusive
    }

    /// Returns the exclusive end of the interval.
    #[inline]
    pub fn end(&self) -> T
    where
        T: Copy,
    {
        self.end_exclusive
    }

    /// Checks if the interval is empty, i.e. `start == end`.
    ///
    /// # Examples
    ///
    /// ```
    /// use bookslot_core::interval::Interval;
    ///
    /// assert!(Interval::new(600, 600).is_empty());
    /// assert!(!Interval::new(540, 600).is_empty());
    /// ```
    #[inline]
    pub fn is_empty(&self) -> bool
    where
        T: PartialEq,
    {
        self.start_inclusive == self.end_exclusive
    }

    /// Checks if the interval contains a value.
    ///
    /// # Examples
    ///
    /// ```
    /// use bookslot_core::interval::Interval;
    ///
    /// let i = Interval::new(540, 600);
    /// assert!(i.contains(540)); // start is inclusive
    /// assert!(i.contains(599));
    /// assert!(!i.contains(600)); // end is exclusive
    /// assert!(!i.contains(539));
    /// ```
    #[inline]
    pub fn contains(&self, x: T) -> bool
    where
        T: PartialOrd,
    {
        x >= self.start_inclusive && x < self.end_exclusive
    }

    /// Checks if this interval fully contains another interval.
    ///
    /// # Examples
    ///
    /// ```
    /// use bookslot_core::interval::Interval;
    ///
    /// let hours = Interval::new(540, 1020);
    /// assert!(hours.contains_interval(&Interval::new(720, 780)));
    /// assert!(hours.contains_interval(&Interval::new(540, 1020)));
    /// assert!(!hours.contains_interval(&Interval::new(480, 600)));
    /// ```
    #[inline]
    pub fn contains_interval(&self, other: &Self) -> bool
    where
        T: PartialOrd,
    {
        other.start_inclusive >= self.start_inclusive && other.end_exclusive <= self.end_exclusive
    }

    /// Checks if this interval precedes another interval.
    ///
    /// An interval precedes another if its end is less than or equal to the
    /// other's start: they either touch exactly at one point or do not meet
    /// at all.
    ///
    /// # Examples
    ///
    /// ```
    /// use bookslot_core::interval::Interval;
    ///
    /// let a = Interval::new(540, 600);
    /// assert!(a.precedes(&Interval::new(600, 660))); // back-to-back
    /// assert!(a.precedes(&Interval::new(700, 760)));
    /// assert!(!a.precedes(&Interval::new(570, 630)));
    /// ```
    #[inline]
    pub fn precedes(&self, other: &Self) -> bool
    where
        T: PartialOrd + Copy,
    {
        self.end() <= other.start()
    }

    /// Checks if this interval strictly precedes another interval.
    ///
    /// An interval strictly precedes another if its end is less than the
    /// other's start, i.e. there is a real gap between them. Two intervals
    /// where neither strictly precedes the other are "touching or closer",
    /// which is exactly the boundary-inclusive conflict test the booking
    /// rules use.
    ///
    /// # Examples
    ///
    /// ```
    /// use bookslot_core::interval::Interval;
    ///
    /// let a = Interval::new(540, 600);
    /// assert!(!a.strictly_precedes(&Interval::new(600, 660))); // touching
    /// assert!(a.strictly_precedes(&Interval::new(601, 660)));  // gap
    /// assert!(!a.strictly_precedes(&Interval::new(570, 630))); // overlap
    /// ```
    #[inline]
    pub fn strictly_precedes(&self, other: &Self) -> bool
    where
        T: PartialOrd + Copy,
    {
        self.end() < other.start()
    }

    /// Checks if this interval intersects another interval.
    ///
    /// Two intervals intersect iff the maximum of their starts is less than
    /// the minimum of their ends. Touching endpoints do not intersect, and
    /// empty intervals intersect nothing.
    ///
    /// # Examples
    ///
    /// ```
    /// use bookslot_core::interval::Interval;
    ///
    /// let a = Interval::new(540, 600);
    /// assert!(a.intersects(&Interval::new(570, 630)));
    /// assert!(!a.intersects(&Interval::new(600, 660))); // touching
    /// assert!(!a.intersects(&Interval::new(480, 540)));
    /// ```
    #[inline]
    pub fn intersects(&self, other: &Self) -> bool
    where
        T: PartialOrd + Copy,
    {
        let start = if self.start_inclusive > other.start_inclusive {
            self.start_inclusive
        } else {
            other.start_inclusive
        };
        let end = if self.end_exclusive < other.end_exclusive {
            self.end_exclusive
        } else {
            other.end_exclusive
        };
        start < end
    }

    /// Returns the length of the interval as `end - start`.
    ///
    /// # Examples
    ///
    /// ```
    /// use bookslot_core::interval::Interval;
    ///
    /// assert_eq!(Interval::new(540, 600).length(), 60);
    /// assert_eq!(Interval::new(600, 600).length(), 0);
    /// ```
    #[inline]
    pub fn length<D>(&self) -> D
    where
        T: Copy + Sub<Output = D>,
    {
        self.end_exclusive - self.start_inclusive
    }

    /// Returns an iterator over the interval with a specified step.
    ///
    /// The iterator yields values from `start` in increments of `step` for
    /// as long as they stay below `end`. The step may be a different type
    /// than the axis: a point axis advances by a delta, which is how the
    /// slot generator walks working hours in duration-plus-buffer strides.
    ///
    /// # Panics
    ///
    /// Panics immediately if `step` is zero or negative.
    ///
    /// # Examples
    ///
    /// ```
    /// use bookslot_core::interval::Interval;
    ///
    /// let i = Interval::new(540, 660);
    /// let starts: Vec<i64> = i.iter(60).collect();
    /// assert_eq!(starts, vec![540, 600]);
    /// ```
    #[inline]
    pub fn iter<D>(&self, step: D) -> IntervalIter<'_, T, D>
    where
        T: Copy + PartialOrd + Add<D, Output = T>,
        D: Copy + PartialOrd + Zero,
    {
        IntervalIter::new(self, step)
    }
}

impl<T: fmt::Display> fmt::Display for Interval<T> {
    /// Formats the interval as `[start, end)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use bookslot_core::interval::Interval;
    ///
    /// assert_eq!(format!("{}", Interval::new(540, 600)), "[540, 600)");
    /// ```
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start_inclusive, self.end_exclusive)
    }
}

/// An iterator over the values in a half-open interval.
///
/// Yields values starting from the interval's start, advancing by `step`
/// until the next value would reach or exceed the exclusive end.
///
/// # Examples
///
/// ```
/// use bookslot_core::interval::Interval;
///
/// let i = Interval::new(0, 10);
/// let mut iter = i.iter(4);
/// assert_eq!(iter.next(), Some(0));
/// assert_eq!(iter.next(), Some(4));
/// assert_eq!(iter.next(), Some(8));
/// assert_eq!(iter.next(), None);
/// ```
pub struct IntervalIter<'a, T, D> {
    interval: &'a Interval<T>,
    current: T,
    step: D,
}

impl<'a, T: Copy, D: Copy + PartialOrd + Zero> IntervalIter<'a, T, D> {
    fn new(interval: &'a Interval<T>, step: D) -> Self {
        assert!(step > D::zero(), "Interval::iter: step must be > 0");

        IntervalIter {
            interval,
            current: interval.start_inclusive,
            step,
        }
    }
}

impl<'a, T, D> Iterator for IntervalIter<'a, T, D>
where
    T: Copy + PartialOrd + Add<D, Output = T>,
    D: Copy,
{
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current < self.interval.end_exclusive {
            let value = self.current;
            self.current = self.current + self.step;
            Some(value)
        } else {
            None
        }
    }
}

impl<'a, T, D> FusedIterator for IntervalIter<'a, T, D>
where
    T: Copy + PartialOrd + Add<D, Output = T>,
    D: Copy,
{
}
