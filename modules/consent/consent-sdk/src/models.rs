//! Domain models for the consent module.

use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

/// Granularity at which a change of released attributes triggers re-consent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsentOptions {
    /// Always ask, whatever was released before.
    Always,
    /// Ask again when the set of attribute names changes.
    #[default]
    AttributeName,
    /// Ask again when attribute names or any of their values change.
    AttributeValue,
}

/// Time unit of a consent reminder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReminderUnit {
    Seconds,
    Minutes,
    Hours,
    Days,
    Weeks,
    /// Thirty days.
    Months,
}

/// How long a consent decision is honoured before the user is asked again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConsentReminder {
    pub count: u32,
    pub unit: ReminderUnit,
}

impl Default for ConsentReminder {
    fn default() -> Self {
        Self {
            count: 14,
            unit: ReminderUnit::Days,
        }
    }
}

impl ConsentReminder {
    #[must_use]
    pub fn new(count: u32, unit: ReminderUnit) -> Self {
        Self { count, unit }
    }

    #[must_use]
    pub fn duration(&self) -> Duration {
        let n = i64::from(self.count);
        match self.unit {
            ReminderUnit::Seconds => Duration::seconds(n),
            ReminderUnit::Minutes => Duration::minutes(n),
            ReminderUnit::Hours => Duration::hours(n),
            ReminderUnit::Days => Duration::days(n),
            ReminderUnit::Weeks => Duration::weeks(n),
            ReminderUnit::Months => Duration::days(n * 30),
        }
    }
}

/// A recorded agreement of a principal to release attributes to a service.
///
/// Never mutated after creation: a changed consent is a new decision with a
/// new id that replaces the old one in the repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsentDecision {
    id: Uuid,
    service_id: String,
    principal_id: String,
    options: ConsentOptions,
    attributes_fingerprint: String,
    reminder: ConsentReminder,
    created_date: OffsetDateTime,
}

impl ConsentDecision {
    /// Creates a decision with a fresh id, created now.
    #[must_use]
    pub fn new(
        service_id: impl Into<String>,
        principal_id: impl Into<String>,
        options: ConsentOptions,
        attributes_fingerprint: impl Into<String>,
        reminder: ConsentReminder,
    ) -> Self {
        Self::restore(
            Uuid::new_v4(),
            service_id,
            principal_id,
            options,
            attributes_fingerprint,
            reminder,
            OffsetDateTime::now_utc(),
        )
    }

    /// Rebuilds a decision loaded from storage.
    #[must_use]
    pub fn restore(
        id: Uuid,
        service_id: impl Into<String>,
        principal_id: impl Into<String>,
        options: ConsentOptions,
        attributes_fingerprint: impl Into<String>,
        reminder: ConsentReminder,
        created_date: OffsetDateTime,
    ) -> Self {
        Self {
            id,
            service_id: service_id.into(),
            principal_id: principal_id.into(),
            options,
            attributes_fingerprint: attributes_fingerprint.into(),
            reminder,
            created_date,
        }
    }

    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    #[must_use]
    pub fn service_id(&self) -> &str {
        &self.service_id
    }

    #[must_use]
    pub fn principal_id(&self) -> &str {
        &self.principal_id
    }

    #[must_use]
    pub fn options(&self) -> ConsentOptions {
        self.options
    }

    /// Encoded digest of the attributes released at consent time.
    #[must_use]
    pub fn attributes_fingerprint(&self) -> &str {
        &self.attributes_fingerprint
    }

    #[must_use]
    pub fn reminder(&self) -> ConsentReminder {
        self.reminder
    }

    #[must_use]
    pub fn created_date(&self) -> OffsetDateTime {
        self.created_date
    }

    /// Whether the reminder window has passed at `now`.
    #[must_use]
    pub fn is_reminder_elapsed(&self, now: OffsetDateTime) -> bool {
        self.created_date
            .checked_add(self.reminder.duration())
            .is_some_and(|deadline| now > deadline)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn default_reminder_is_fourteen_days() {
        assert_eq!(ConsentReminder::default().duration(), Duration::days(14));
    }

    #[test]
    fn reminder_units_convert() {
        assert_eq!(ConsentReminder::new(90, ReminderUnit::Seconds).duration(), Duration::seconds(90));
        assert_eq!(ConsentReminder::new(2, ReminderUnit::Weeks).duration(), Duration::days(14));
        assert_eq!(ConsentReminder::new(1, ReminderUnit::Months).duration(), Duration::days(30));
    }

    #[test]
    fn every_new_decision_gets_its_own_id() {
        let a = ConsentDecision::new("svc", "casuser", ConsentOptions::default(), "fp", ConsentReminder::default());
        let b = ConsentDecision::new("svc", "casuser", ConsentOptions::default(), "fp", ConsentReminder::default());
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn reminder_elapses_after_window() {
        let created = OffsetDateTime::now_utc() - Duration::days(3);
        let decision = ConsentDecision::restore(
            Uuid::new_v4(),
            "svc",
            "casuser",
            ConsentOptions::AttributeName,
            "fp",
            ConsentReminder::new(2, ReminderUnit::Days),
            created,
        );

        assert!(decision.is_reminder_elapsed(OffsetDateTime::now_utc()));
        assert!(!decision.is_reminder_elapsed(created + Duration::days(1)));
    }

    #[test]
    fn options_use_snake_case() {
        let json = serde_json::to_string(&ConsentOptions::AttributeValue).unwrap();
        assert_eq!(json, r#""attribute_value""#);
    }
}
