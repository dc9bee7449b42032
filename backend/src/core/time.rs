//! Time management for the simulation
//!
//! The simulation operates on simulated time, not wall-clock time: a point
//! in time is a whole number of minutes since midnight of the operating day.
//! All scheduling arithmetic is integer arithmetic, so runs are exactly
//! reproducible.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A point in simulated time, in whole minutes since midnight
///
/// Times past 23:59 are legal: an event scheduled late in the day with a
/// long delay simply fires at an hour count beyond 23.
///
/// # Example
/// ```
/// use emergency_simulator_core_rs::SimTime;
///
/// let opening = SimTime::from_hm(8, 0);
/// assert_eq!(opening.minutes(), 480);
/// assert_eq!(opening.plus_minutes(15), SimTime::from_hm(8, 15));
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct SimTime(u32);

impl SimTime {
    /// Midnight of the operating day
    pub const MIDNIGHT: SimTime = SimTime(0);

    /// Create a time from an hour-of-day and minute-of-hour pair
    ///
    /// # Panics
    /// Panics if `hour > 23` or `minute > 59`.
    ///
    /// # Example
    /// ```
    /// use emergency_simulator_core_rs::SimTime;
    ///
    /// let t = SimTime::from_hm(20, 30);
    /// assert_eq!(t.hour(), 20);
    /// assert_eq!(t.minute(), 30);
    /// ```
    pub fn from_hm(hour: u32, minute: u32) -> Self {
        assert!(hour < 24, "hour must be in 0..24");
        assert!(minute < 60, "minute must be in 0..60");
        SimTime(hour * 60 + minute)
    }

    /// Create a time from a raw minute count since midnight
    pub fn from_minutes(minutes: u32) -> Self {
        SimTime(minutes)
    }

    /// Total minutes since midnight
    pub fn minutes(self) -> u32 {
        self.0
    }

    /// Hour component (may exceed 23 for times past the operating day)
    pub fn hour(self) -> u32 {
        self.0 / 60
    }

    /// Minute-of-hour component
    pub fn minute(self) -> u32 {
        self.0 % 60
    }

    /// The time `minutes` minutes after this one
    pub fn plus_minutes(self, minutes: u32) -> SimTime {
        SimTime(self.0 + minutes)
    }

    /// True if this time is strictly before `other`
    pub fn is_before(self, other: SimTime) -> bool {
        self < other
    }

    /// True if this time is strictly after `other`
    pub fn is_after(self, other: SimTime) -> bool {
        self > other
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}
