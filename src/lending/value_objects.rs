//! Value objects of the lending context: typed identifiers, points in time,
//! hold durations and the optimistic-concurrency version token.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::core::library::{LibraryError, LibraryResult};
use crate::utils::date::serializer;

macro_rules! define_id {
    ($(#[doc = $doc:expr])* $name:ident) => {
        $(#[doc = $doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(uuid::Uuid);

        impl $name {
            /// Generate a fresh random identifier.
            pub fn generate() -> Self {
                Self(uuid::Uuid::new_v4())
            }

            pub fn from_uuid(uuid: uuid::Uuid) -> Self {
                Self(uuid)
            }

            pub fn as_uuid(&self) -> uuid::Uuid {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl FromStr for $name {
            type Err = LibraryError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(uuid::Uuid::parse_str(s)?))
            }
        }
    };
}

define_id!(
    /// Identifies a physical book copy.
    BookId
);

define_id!(
    /// Identifies a library member.
    PatronId
);

define_id!(
    /// Identifies the branch a book is located at.
    LibraryBranchId
);

/// Optimistic-concurrency token of a book stream.
///
/// Transitions carry it through unchanged; only the repository advances it when
/// new events are appended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Version(i64);

impl Version {
    pub fn zero() -> Self {
        Self(0)
    }

    pub fn of(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }

    pub(crate) fn next(&self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// An instant in time. Arithmetic returns new values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DateVO(#[serde(with = "serializer")] DateTime<Utc>);

impl DateVO {
    pub fn now() -> Self {
        Self(Utc::now())
    }

    pub fn from_instant(value: DateTime<Utc>) -> Self {
        Self(value)
    }

    pub fn value(&self) -> DateTime<Utc> {
        self.0
    }

    /// `days` may be negative. Fails when the result falls outside the
    /// representable calendar range.
    pub fn add_days(&self, days: i64) -> LibraryResult<Self> {
        TimeDelta::try_days(days)
            .and_then(|delta| self.0.checked_add_signed(delta))
            .map(Self)
            .ok_or_else(|| LibraryError::validation(
                format!("cannot add {} days to {}", days, self.0).as_str(), Some("400".to_string())))
    }
}

/// How long a hold stays valid. An absent `to` means the hold lasts until checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HoldDuration {
    from: DateVO,
    to: Option<DateVO>,
}

impl HoldDuration {
    pub fn new(from: DateVO, to: Option<DateVO>) -> LibraryResult<Self> {
        if let Some(to) = to {
            if to < from {
                return Err(LibraryError::validation(
                    format!("hold duration ends at {} before it starts at {}",
                            to.value(), from.value()).as_str(), Some("400".to_string())));
            }
        }
        Ok(Self { from, to })
    }

    /// Valid from now for `days` days.
    pub fn close_ended(days: u32) -> LibraryResult<Self> {
        let from = DateVO::now();
        Ok(Self { from, to: Some(from.add_days(i64::from(days))?) })
    }

    /// Valid from now until the book is checked out.
    pub fn open_ended() -> Self {
        Self { from: DateVO::now(), to: None }
    }

    pub fn from(&self) -> DateVO {
        self.from
    }

    pub fn to(&self) -> Option<DateVO> {
        self.to
    }

    pub fn is_open_ended(&self) -> bool {
        self.to.is_none()
    }
}

impl<'de> Deserialize<'de> for HoldDuration {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Raw {
            from: DateVO,
            to: Option<DateVO>,
        }
        let raw = Raw::deserialize(deserializer)?;
        HoldDuration::new(raw.from, raw.to).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use crate::core::library::LibraryError;
    use crate::lending::value_objects::{BookId, DateVO, HoldDuration, LibraryBranchId, PatronId, Version};

    fn instant(day: u32) -> DateVO {
        DateVO::from_instant(Utc.with_ymd_and_hms(2024, 1, day, 12, 0, 0).unwrap())
    }

    #[test]
    fn test_should_generate_unique_ids() {
        assert_ne!(BookId::generate(), BookId::generate());
        assert_ne!(PatronId::generate(), PatronId::generate());
        assert_ne!(LibraryBranchId::generate(), LibraryBranchId::generate());
    }

    #[test]
    fn test_should_compare_ids_by_value() {
        let uuid = uuid::Uuid::new_v4();
        assert_eq!(PatronId::from_uuid(uuid), PatronId::from_uuid(uuid));
        assert_eq!(uuid, PatronId::from_uuid(uuid).as_uuid());
    }

    #[test]
    fn test_should_parse_ids() {
        let id = BookId::generate();
        let parsed: BookId = id.to_string().parse().expect("should parse id");
        assert_eq!(id, parsed);
        assert!(matches!("not-a-uuid".parse::<BookId>(), Err(LibraryError::Validation { .. })));
    }

    #[test]
    fn test_should_add_days_without_mutating() {
        let start = instant(10);
        let later = start.add_days(5).expect("should add days");
        let earlier = start.add_days(-3).expect("should subtract days");
        assert_eq!(instant(10), start);
        assert_eq!(instant(15), later);
        assert_eq!(instant(7), earlier);
    }

    #[test]
    fn test_should_build_close_ended_duration() {
        for days in [0, 1, 7, 365] {
            let duration = HoldDuration::close_ended(days).expect("should build");
            assert!(!duration.is_open_ended());
            assert_eq!(Some(duration.from().add_days(i64::from(days)).expect("should add days")), duration.to());
        }
    }

    #[test]
    fn test_should_reject_days_out_of_calendar_range() {
        assert!(matches!(instant(10).add_days(i64::MAX), Err(LibraryError::Validation { .. })));
        assert!(matches!(instant(10).add_days(i64::MIN), Err(LibraryError::Validation { .. })));
        assert!(matches!(HoldDuration::close_ended(u32::MAX), Err(LibraryError::Validation { .. })));
    }

    #[test]
    fn test_should_build_open_ended_duration() {
        let duration = HoldDuration::open_ended();
        assert!(duration.is_open_ended());
        assert_eq!(None, duration.to());
    }

    #[test]
    fn test_should_reject_duration_ending_before_start() {
        let res = HoldDuration::new(instant(10), Some(instant(9)));
        assert!(matches!(res, Err(LibraryError::Validation { .. })));
    }

    #[test]
    fn test_should_accept_duration_ending_at_start() {
        let duration = HoldDuration::new(instant(10), Some(instant(10))).expect("should build");
        assert_eq!(Some(instant(10)), duration.to());
        let open = HoldDuration::new(instant(10), None).expect("should build");
        assert!(open.is_open_ended());
    }

    #[test]
    fn test_should_validate_deserialized_duration() {
        let valid = HoldDuration::new(instant(1), Some(instant(2))).expect("should build");
        let json = serde_json::to_string(&valid).expect("should serialize");
        let parsed: HoldDuration = serde_json::from_str(json.as_str()).expect("should deserialize");
        assert_eq!(valid, parsed);

        let inverted = json.replace("2024-01-01", "2024-01-09");
        let res: Result<HoldDuration, _> = serde_json::from_str(inverted.as_str());
        assert!(res.is_err());
    }

    #[test]
    fn test_should_advance_version() {
        assert_eq!(Version::of(1), Version::zero().next());
        assert_eq!(0, Version::zero().value());
    }
}
