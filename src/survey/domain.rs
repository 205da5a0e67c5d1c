use std::fmt;

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::catalog::{GroupKind, QuestionId};

/// Identifier for a registered user, resolved by the identity layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(pub u64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier for a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GroupId(pub u64);

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier for an optional event an answer is scoped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EventId(pub u64);

/// Survey year. A survey stays open through March of the following
/// calendar year, so the default year lags by one until April.
pub type Year = i32;

pub fn default_survey_year(today: NaiveDate) -> Year {
    if today.month() <= 3 {
        today.year() - 1
    } else {
        today.year()
    }
}

/// An authenticated user as handed over by the identity layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
}

/// An organization tracking its collective footprint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,
    pub name: String,
    pub label: String,
    pub kind: GroupKind,
}

/// A submitted answer value before storage encoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Number(f64),
    Text(String),
    Items(Vec<f64>),
}

impl AnswerValue {
    pub fn is_blank(&self) -> bool {
        match self {
            AnswerValue::Number(_) => false,
            AnswerValue::Text(text) => text.trim().is_empty(),
            AnswerValue::Items(items) => items.is_empty(),
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            AnswerValue::Number(value) => Some(*value),
            AnswerValue::Text(text) => text.trim().parse().ok(),
            AnswerValue::Items(_) => None,
        }
    }
}

/// Natural key identifying one answer row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnswerKey {
    pub year: Year,
    pub group_id: GroupId,
    pub question_id: QuestionId,
    pub user_id: Option<UserId>,
    pub event_id: Option<EventId>,
}

/// One persisted survey answer. `user_id` of `None` means the answer
/// belongs to the group profile. Array answers are stored JSON-encoded
/// in `answer`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerRecord {
    pub year: Year,
    pub group_id: GroupId,
    pub question_id: QuestionId,
    pub user_id: Option<UserId>,
    pub event_id: Option<EventId>,
    pub answer: String,
    pub select: Option<f64>,
    pub created_on: NaiveDateTime,
}

impl AnswerRecord {
    pub fn natural_key(&self) -> AnswerKey {
        AnswerKey {
            year: self.year,
            group_id: self.group_id,
            question_id: self.question_id.clone(),
            user_id: self.user_id,
            event_id: self.event_id,
        }
    }
}

/// Natural key identifying one derived emissions row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EmissionsKey {
    pub year: Year,
    pub group_id: GroupId,
    pub type_id: String,
    pub user_id: Option<UserId>,
    pub event_id: Option<EventId>,
}

/// One derived emissions row: a raw quantity in category-native units,
/// keyed by the survey reading code. Never edited directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmissionsRecord {
    pub year: Year,
    pub group_id: GroupId,
    pub type_id: String,
    pub user_id: Option<UserId>,
    pub event_id: Option<EventId>,
    pub value: f64,
    pub created_on: NaiveDateTime,
}

impl EmissionsRecord {
    pub fn natural_key(&self) -> EmissionsKey {
        EmissionsKey {
            year: self.year,
            group_id: self.group_id,
            type_id: self.type_id.clone(),
            user_id: self.user_id,
            event_id: self.event_id,
        }
    }
}

/// A user's yearly association with a group. `is_standard` marks members
/// whose emissions are still estimated from the locale average rather
/// than computed from their own answers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberRecord {
    pub user_id: UserId,
    pub group_id: GroupId,
    pub year: Year,
    pub name: String,
    pub locale: String,
    pub locale_percent: u8,
    pub is_admin: bool,
    pub is_champion: bool,
    pub is_standard: bool,
    /// Hard-set override; when present it wins over any computation.
    pub emissions: Option<f64>,
    pub created_on: NaiveDateTime,
    pub removed: bool,
}

/// Fraction of the year a member was covered by their locale, from a
/// month count submitted on the membership form.
pub fn locale_percent_from_months(months: u8) -> u8 {
    let months = months.clamp(1, 12);
    ((f64::from(months) / 12.0) * 100.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn survey_year_lags_through_march() {
        let january = NaiveDate::from_ymd_opt(2026, 1, 15).expect("valid date");
        let march = NaiveDate::from_ymd_opt(2026, 3, 31).expect("valid date");
        let april = NaiveDate::from_ymd_opt(2026, 4, 1).expect("valid date");

        assert_eq!(default_survey_year(january), 2025);
        assert_eq!(default_survey_year(march), 2025);
        assert_eq!(default_survey_year(april), 2026);
    }

    #[test]
    fn locale_percent_rounds_from_months() {
        assert_eq!(locale_percent_from_months(12), 100);
        assert_eq!(locale_percent_from_months(6), 50);
        assert_eq!(locale_percent_from_months(1), 8);
        assert_eq!(locale_percent_from_months(0), 8);
        assert_eq!(locale_percent_from_months(30), 100);
    }

    #[test]
    fn blank_answers_are_detected() {
        assert!(AnswerValue::Text("   ".to_string()).is_blank());
        assert!(AnswerValue::Items(Vec::new()).is_blank());
        assert!(!AnswerValue::Number(0.0).is_blank());
    }
}
