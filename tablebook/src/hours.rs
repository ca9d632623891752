//! Operating hours and service periods.
//!
//! A restaurant serves in two named sessions per day, lunch ([`ServicePeriod::Am`])
//! and dinner ([`ServicePeriod::Pm`]). A booking occupies its table for the whole
//! session it falls in, so two bookings conflict exactly when they share a
//! [`ServiceSlot`]: the same date and the same period.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// A named service session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServicePeriod {
    /// Lunch service.
    Am,
    /// Dinner service.
    Pm,
}

impl fmt::Display for ServicePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Am => write!(f, "am"),
            Self::Pm => write!(f, "pm"),
        }
    }
}

/// Opening and closing time of one service period, half-open `[start, end)`.
///
/// # Examples
///
/// ```
/// use chrono::NaiveTime;
/// use tablebook::hours::{ServicePeriod, Session};
///
/// let lunch = Session::new(
///     ServicePeriod::Am,
///     NaiveTime::from_hms_opt(11, 0, 0).unwrap(),
///     NaiveTime::from_hms_opt(15, 0, 0).unwrap(),
/// )
/// .unwrap();
///
/// assert!(lunch.contains(NaiveTime::from_hms_opt(11, 0, 0).unwrap()));
/// assert!(!lunch.contains(NaiveTime::from_hms_opt(15, 0, 0).unwrap()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SessionRecord")]
pub struct Session {
    period: ServicePeriod,
    start: NaiveTime,
    end: NaiveTime,
}

#[derive(Deserialize)]
struct SessionRecord {
    period: ServicePeriod,
    start: NaiveTime,
    end: NaiveTime,
}

impl TryFrom<SessionRecord> for Session {
    type Error = InvalidSessionError;

    fn try_from(record: SessionRecord) -> Result<Self, Self::Error> {
        Self::new(record.period, record.start, record.end)
    }
}

impl Session {
    /// Creates a session.
    ///
    /// # Errors
    ///
    /// Returns an error if `end` is not after `start`.
    pub fn new(
        period: ServicePeriod,
        start: NaiveTime,
        end: NaiveTime,
    ) -> Result<Self, InvalidSessionError> {
        if end <= start {
            return Err(InvalidSessionError {
                period,
                reason: format!("session must end after it starts ({start} >= {end})"),
            });
        }
        Ok(Self { period, start, end })
    }

    /// Returns the period this session serves.
    #[must_use]
    pub const fn period(&self) -> ServicePeriod {
        self.period
    }

    /// Returns the opening time.
    #[must_use]
    pub const fn start(&self) -> NaiveTime {
        self.start
    }

    /// Returns the closing time.
    #[must_use]
    pub const fn end(&self) -> NaiveTime {
        self.end
    }

    /// Returns `true` if `time` falls inside the session.
    #[must_use]
    pub fn contains(&self, time: NaiveTime) -> bool {
        time >= self.start && time < self.end
    }
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}-{}",
            self.period,
            self.start.format("%H:%M"),
            self.end.format("%H:%M")
        )
    }
}

/// The unit a table is booked for: one service period on one date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ServiceSlot {
    /// The service date.
    pub date: NaiveDate,
    /// The service period on that date.
    pub period: ServicePeriod,
}

impl fmt::Display for ServiceSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.date, self.period)
    }
}

/// The restaurant's posted opening hours.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use tablebook::hours::{OperatingHours, ServicePeriod};
///
/// let hours = OperatingHours::default();
/// let lunch = NaiveDate::from_ymd_opt(2026, 5, 1).unwrap().and_hms_opt(12, 30, 0).unwrap();
/// let slot = hours.slot_of(lunch).unwrap();
/// assert_eq!(slot.period, ServicePeriod::Am);
///
/// let closed = NaiveDate::from_ymd_opt(2026, 5, 1).unwrap().and_hms_opt(16, 0, 0).unwrap();
/// assert!(hours.slot_of(closed).is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "HoursRecord")]
pub struct OperatingHours {
    am: Session,
    pm: Session,
}

#[derive(Deserialize)]
struct HoursRecord {
    am: Session,
    pm: Session,
}

impl TryFrom<HoursRecord> for OperatingHours {
    type Error = InvalidSessionError;

    fn try_from(record: HoursRecord) -> Result<Self, Self::Error> {
        Self::new(record.am, record.pm)
    }
}

impl OperatingHours {
    /// Creates operating hours from a lunch and a dinner session.
    ///
    /// # Errors
    ///
    /// Returns an error if the sessions are labelled with the wrong period or
    /// if lunch closes after dinner opens.
    pub fn new(am: Session, pm: Session) -> Result<Self, InvalidSessionError> {
        if am.period != ServicePeriod::Am {
            return Err(InvalidSessionError {
                period: am.period,
                reason: "first session must be the am period".into(),
            });
        }
        if pm.period != ServicePeriod::Pm {
            return Err(InvalidSessionError {
                period: pm.period,
                reason: "second session must be the pm period".into(),
            });
        }
        if am.end > pm.start {
            return Err(InvalidSessionError {
                period: ServicePeriod::Pm,
                reason: format!(
                    "pm session opens at {} before am session closes at {}",
                    pm.start, am.end
                ),
            });
        }
        Ok(Self { am, pm })
    }

    /// Returns the lunch session.
    #[must_use]
    pub const fn am(&self) -> &Session {
        &self.am
    }

    /// Returns the dinner session.
    #[must_use]
    pub const fn pm(&self) -> &Session {
        &self.pm
    }

    /// Returns the period containing `time`, if the restaurant is open then.
    #[must_use]
    pub fn period_of(&self, time: NaiveTime) -> Option<ServicePeriod> {
        [self.am, self.pm]
            .into_iter()
            .find(|session| session.contains(time))
            .map(|session| session.period)
    }

    /// Returns the service slot a timestamp books, if it falls within opening hours.
    #[must_use]
    pub fn slot_of(&self, timestamp: NaiveDateTime) -> Option<ServiceSlot> {
        self.period_of(timestamp.time()).map(|period| ServiceSlot {
            date: timestamp.date(),
            period,
        })
    }

    /// Returns `true` if the restaurant is open at `timestamp`.
    #[must_use]
    pub fn is_open(&self, timestamp: NaiveDateTime) -> bool {
        self.period_of(timestamp.time()).is_some()
    }
}

impl Default for OperatingHours {
    fn default() -> Self {
        Self {
            am: Session {
                period: ServicePeriod::Am,
                start: hm(11, 0),
                end: hm(15, 0),
            },
            pm: Session {
                period: ServicePeriod::Pm,
                start: hm(18, 0),
                end: hm(22, 0),
            },
        }
    }
}

// Only called with literal in-range values.
fn hm(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN)
}

impl fmt::Display for OperatingHours {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.am, self.pm)
    }
}

/// Error type for invalid session definitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidSessionError {
    /// The period whose session is invalid.
    pub period: ServicePeriod,
    /// The reason the session is invalid.
    pub reason: String,
}

impl fmt::Display for InvalidSessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid {} session: {}", self.period, self.reason)
    }
}

impl std::error::Error for InvalidSessionError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 5, 1)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    #[test]
    fn test_default_hours() {
        let hours = OperatingHours::default();
        assert_eq!(hours.am().start(), hm(11, 0));
        assert_eq!(hours.am().end(), hm(15, 0));
        assert_eq!(hours.pm().start(), hm(18, 0));
        assert_eq!(hours.pm().end(), hm(22, 0));
        assert_eq!(format!("{hours}"), "am 11:00-15:00, pm 18:00-22:00");
    }

    #[test]
    fn test_period_of_boundaries() {
        let hours = OperatingHours::default();
        assert_eq!(hours.period_of(hm(10, 59)), None);
        assert_eq!(hours.period_of(hm(11, 0)), Some(ServicePeriod::Am));
        assert_eq!(hours.period_of(hm(14, 59)), Some(ServicePeriod::Am));
        assert_eq!(hours.period_of(hm(15, 0)), None);
        assert_eq!(hours.period_of(hm(18, 0)), Some(ServicePeriod::Pm));
        assert_eq!(hours.period_of(hm(22, 0)), None);
    }

    #[test]
    fn test_slot_of_groups_whole_session() {
        let hours = OperatingHours::default();
        let early = hours.slot_of(at(11, 0)).unwrap();
        let late = hours.slot_of(at(14, 45)).unwrap();
        assert_eq!(early, late);

        let dinner = hours.slot_of(at(19, 0)).unwrap();
        assert_ne!(early, dinner);
    }

    #[test]
    fn test_slot_of_distinguishes_dates() {
        let hours = OperatingHours::default();
        let today = hours.slot_of(at(12, 0)).unwrap();
        let tomorrow = hours
            .slot_of(at(12, 0) + chrono::Duration::days(1))
            .unwrap();
        assert_ne!(today, tomorrow);
        assert_eq!(today.period, tomorrow.period);
    }

    #[test]
    fn test_is_open() {
        let hours = OperatingHours::default();
        assert!(hours.is_open(at(12, 0)));
        assert!(!hours.is_open(at(16, 30)));
        assert!(!hours.is_open(at(23, 0)));
    }

    #[test]
    fn test_session_rejects_inverted_times() {
        let err = Session::new(ServicePeriod::Am, hm(15, 0), hm(11, 0)).unwrap_err();
        assert_eq!(err.period, ServicePeriod::Am);
        assert!(err.reason.contains("end after"));

        assert!(Session::new(ServicePeriod::Pm, hm(18, 0), hm(18, 0)).is_err());
    }

    #[test]
    fn test_hours_reject_overlapping_sessions() {
        let am = Session::new(ServicePeriod::Am, hm(11, 0), hm(19, 0)).unwrap();
        let pm = Session::new(ServicePeriod::Pm, hm(18, 0), hm(22, 0)).unwrap();
        assert!(OperatingHours::new(am, pm).is_err());
    }

    #[test]
    fn test_hours_reject_swapped_periods() {
        let am = Session::new(ServicePeriod::Am, hm(11, 0), hm(15, 0)).unwrap();
        let pm = Session::new(ServicePeriod::Pm, hm(18, 0), hm(22, 0)).unwrap();
        assert!(OperatingHours::new(pm, am).is_err());
        assert!(OperatingHours::new(am, pm).is_ok());
    }

    #[test]
    fn test_slot_display() {
        let slot = OperatingHours::default().slot_of(at(19, 0)).unwrap();
        assert_eq!(format!("{slot}"), "2026-05-01 pm");
    }

    #[test]
    fn test_hours_serde_round_trip() {
        let hours = OperatingHours::default();
        let json = serde_json::to_string(&hours).unwrap();
        assert_eq!(serde_json::from_str::<OperatingHours>(&json).unwrap(), hours);
    }

    #[test]
    fn test_session_serde_rejects_inverted_times() {
        let json = r#"{"period":"am","start":"15:00:00","end":"11:00:00"}"#;
        let err = serde_json::from_str::<Session>(json).unwrap_err();
        assert!(err.to_string().contains("must end after it starts"));
    }

    #[test]
    fn test_hours_serde_rejects_overlapping_sessions() {
        let json = r#"{
            "am": {"period":"am","start":"11:00:00","end":"19:00:00"},
            "pm": {"period":"pm","start":"18:00:00","end":"22:00:00"}
        }"#;
        assert!(serde_json::from_str::<OperatingHours>(json).is_err());
    }
}
