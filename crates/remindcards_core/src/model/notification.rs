//! Notification record model.
//!
//! # Responsibility
//! - Define the stored notification record and its input validation.
//!
//! # Invariants
//! - `time_of_day` is a 24-hour `HH:MM` string.
//! - `recurrence_rule`, when present, is `daily` or
//!   `weekly:<day>[,<day>...]` with three-letter lowercase day names.
//! - This core only stores records; scheduling and delivery are external.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Stable store-assigned identifier for a notification record.
pub type NotificationId = i64;

static TIME_OF_DAY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:[01][0-9]|2[0-3]):[0-5][0-9]$").expect("valid regex"));

static RECURRENCE_RULE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:daily|weekly:(?:mon|tue|wed|thu|fri|sat|sun)(?:,(?:mon|tue|wed|thu|fri|sat|sun))*)$")
        .expect("valid regex")
});

/// A stored notification schedule record, optionally referenced by one card
/// or one folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderNotification {
    /// Store-assigned row id.
    pub notification_id: NotificationId,
    /// Message shown when the notification fires.
    pub message: String,
    /// Optional recurrence rule string; `None` means one-shot.
    pub recurrence_rule: Option<String>,
    /// 24-hour `HH:MM` time of day.
    pub time_of_day: String,
    /// Delivery toggle persisted for the external scheduler.
    pub is_enabled: bool,
    /// Unix epoch milliseconds.
    pub created_at: i64,
}

/// Validation failures for notification input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationValidationError {
    /// Message was empty or whitespace-only after trimming.
    EmptyMessage,
    /// `time_of_day` is not a 24-hour `HH:MM` string.
    InvalidTimeOfDay(String),
    /// Recurrence rule string is not a recognized form.
    InvalidRecurrenceRule(String),
}

impl Display for NotificationValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyMessage => write!(f, "notification message cannot be empty"),
            Self::InvalidTimeOfDay(value) => {
                write!(f, "invalid time of day `{value}`; expected HH:MM")
            }
            Self::InvalidRecurrenceRule(value) => write!(
                f,
                "invalid recurrence rule `{value}`; expected `daily` or `weekly:<day>[,<day>...]`"
            ),
        }
    }
}

impl Error for NotificationValidationError {}

impl ReminderNotification {
    /// Trims caller input and rejects blank messages.
    pub fn validated_message(input: &str) -> Result<String, NotificationValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(NotificationValidationError::EmptyMessage);
        }
        Ok(trimmed.to_string())
    }

    /// Validates a 24-hour `HH:MM` time-of-day string.
    pub fn validated_time_of_day(input: &str) -> Result<String, NotificationValidationError> {
        let trimmed = input.trim();
        if !TIME_OF_DAY_RE.is_match(trimmed) {
            return Err(NotificationValidationError::InvalidTimeOfDay(
                trimmed.to_string(),
            ));
        }
        Ok(trimmed.to_string())
    }

    /// Validates an optional recurrence rule string.
    pub fn validated_recurrence_rule(
        input: Option<&str>,
    ) -> Result<Option<String>, NotificationValidationError> {
        match input {
            None => Ok(None),
            Some(raw) => {
                let trimmed = raw.trim();
                if !RECURRENCE_RULE_RE.is_match(trimmed) {
                    return Err(NotificationValidationError::InvalidRecurrenceRule(
                        trimmed.to_string(),
                    ));
                }
                Ok(Some(trimmed.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{NotificationValidationError, ReminderNotification};

    #[test]
    fn time_of_day_accepts_24h_and_rejects_out_of_range() {
        assert_eq!(
            ReminderNotification::validated_time_of_day("08:30").unwrap(),
            "08:30"
        );
        assert_eq!(
            ReminderNotification::validated_time_of_day("23:59").unwrap(),
            "23:59"
        );
        assert!(matches!(
            ReminderNotification::validated_time_of_day("24:00"),
            Err(NotificationValidationError::InvalidTimeOfDay(_))
        ));
        assert!(matches!(
            ReminderNotification::validated_time_of_day("9:30"),
            Err(NotificationValidationError::InvalidTimeOfDay(_))
        ));
    }

    #[test]
    fn recurrence_rule_accepts_daily_and_weekly_lists() {
        assert_eq!(
            ReminderNotification::validated_recurrence_rule(Some("daily")).unwrap(),
            Some("daily".to_string())
        );
        assert_eq!(
            ReminderNotification::validated_recurrence_rule(Some("weekly:mon,wed,fri")).unwrap(),
            Some("weekly:mon,wed,fri".to_string())
        );
        assert_eq!(
            ReminderNotification::validated_recurrence_rule(None).unwrap(),
            None
        );
        assert!(matches!(
            ReminderNotification::validated_recurrence_rule(Some("weekly:")),
            Err(NotificationValidationError::InvalidRecurrenceRule(_))
        ));
        assert!(matches!(
            ReminderNotification::validated_recurrence_rule(Some("monthly")),
            Err(NotificationValidationError::InvalidRecurrenceRule(_))
        ));
    }
}
