use serde::Serialize;

use crate::catalog::{QuestionGroup, QuestionId, QuestionKind, SurveyMode};
use crate::emissions::CategoryBreakdown;

use super::domain::{AnswerRecord, UserId};
use super::progress::{SurveyOverview, TaskView};

/// A question prepared for display: answer filled in, gotos resolved,
/// group noun expanded.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionView {
    pub id: QuestionId,
    pub kind: QuestionKind,
    pub group: QuestionGroup,
    pub group_label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heading: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_suffix: Option<String>,
    pub value: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<ChoiceView>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub select: Vec<SelectOptionView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goto: Option<QuestionId>,
    /// 1-based position within the question's category.
    pub index: usize,
    pub total: usize,
    pub progress: u8,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChoiceView {
    pub label: String,
    pub value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goto: Option<QuestionId>,
    pub selected: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct SelectOptionView {
    pub label: String,
    pub value: f64,
    pub selected: bool,
}

/// Everything the survey page needs for one respondent.
#[derive(Debug, Clone, Serialize)]
pub struct SurveyPage {
    pub mode: SurveyMode,
    pub overview: SurveyOverview,
    pub questions: Vec<QuestionView>,
    pub answers: Vec<AnswerRecord>,
    pub emissions: f64,
    pub emissions_display: String,
    pub offset_amount: f64,
    pub offset_display: String,
    pub breakdown: Vec<CategoryBreakdown>,
}

/// Outcome of a survey submission: fresh answers and totals, or a
/// re-prompt message when the value was unusable.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SaveAnswerResponse {
    Saved {
        answers: Vec<AnswerRecord>,
        emissions: f64,
        offset_amount: f64,
    },
    Invalid {
        message: String,
    },
}

/// One member row on the group dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct MemberView {
    pub user_id: UserId,
    pub name: String,
    pub locale: String,
    pub locale_percent: u8,
    pub is_admin: bool,
    pub is_champion: bool,
    pub is_standard: bool,
    pub emissions: f64,
    pub emissions_display: String,
    pub offset_amount: f64,
}

/// Group dashboard: member list with per-member totals, the combined
/// group footprint, and the viewer's next task.
#[derive(Debug, Clone, Serialize)]
pub struct GroupDashboard {
    pub members: Vec<MemberView>,
    pub emissions: f64,
    pub emissions_display: String,
    pub offset_amount: f64,
    pub offset_display: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task: Option<TaskView>,
}

/// Emissions are shown to one decimal. Stored values keep full precision.
pub fn format_metric_tons(metric_tons: f64) -> String {
    format!("{metric_tons:.1}")
}

/// Prices are shown with two decimals and thousands separators.
pub fn format_usd(amount: f64) -> String {
    let negative = amount < 0.0;
    let rounded = format!("{:.2}", amount.abs());
    let (whole, cents) = rounded.split_once('.').expect("two-decimal format");

    let mut grouped = String::new();
    for (position, digit) in whole.chars().rev().enumerate() {
        if position > 0 && position % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    let whole: String = grouped.chars().rev().collect();

    let sign = if negative { "-" } else { "" };
    format!("{sign}${whole}.{cents}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metric_tons_round_to_one_decimal() {
        assert_eq!(format_metric_tons(2.7054), "2.7");
        assert_eq!(format_metric_tons(0.04), "0.0");
    }

    #[test]
    fn prices_group_thousands() {
        assert_eq!(format_usd(0.0), "$0.00");
        assert_eq!(format_usd(98.0), "$98.00");
        assert_eq!(format_usd(1234.5), "$1,234.50");
        assert_eq!(format_usd(1234567.891), "$1,234,567.89");
        assert_eq!(format_usd(-42.0), "-$42.00");
    }
}
