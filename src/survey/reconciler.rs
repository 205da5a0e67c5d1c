use std::sync::Arc;

use chrono::NaiveDateTime;
use tracing::debug;

use crate::catalog::{Catalog, QuestionId, QuestionKind};

use super::domain::{AnswerRecord, AnswerValue, EventId, GroupId, UserId, Year};
use super::repository::{AnswerRepository, RepositoryError};

/// One inbound survey submission, already scoped to a respondent by the
/// identity layer.
#[derive(Debug, Clone)]
pub struct AnswerSubmission {
    pub year: Year,
    pub group_id: GroupId,
    pub user_id: Option<UserId>,
    pub event_id: Option<EventId>,
    pub question_id: QuestionId,
    pub value: AnswerValue,
    pub select: Option<f64>,
}

/// What happened to a submission. A blank or mistyped value is expected
/// business flow: the caller re-prompts with the message instead of
/// treating it as a failure.
#[derive(Debug, Clone, PartialEq)]
pub enum SaveOutcome {
    Saved(AnswerRecord),
    Invalid { message: String },
}

#[derive(Debug, thiserror::Error)]
pub enum ReconcileError {
    #[error("question {0} is not in the catalog")]
    UnknownQuestion(QuestionId),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Persists answers and applies the catalog-driven side effects: update
/// rules force-write literal answers to other questions, and radio
/// choices can clear their dependent follow-ups. Side-effect writes are
/// first-level only and never feed back through the rules again.
pub struct AnswerReconciler<A> {
    catalog: Arc<Catalog>,
    answers: Arc<A>,
}

impl<A> AnswerReconciler<A>
where
    A: AnswerRepository,
{
    pub fn new(catalog: Arc<Catalog>, answers: Arc<A>) -> Self {
        Self { catalog, answers }
    }

    pub fn save_answer(
        &self,
        submission: AnswerSubmission,
        now: NaiveDateTime,
    ) -> Result<SaveOutcome, ReconcileError> {
        let question = self
            .catalog
            .question(&submission.question_id)
            .ok_or_else(|| ReconcileError::UnknownQuestion(submission.question_id.clone()))?;

        if submission.value.is_blank() {
            return Ok(SaveOutcome::Invalid {
                message: "Please enter a value for that answer.".to_string(),
            });
        }

        let encoded = match (question.is_array_valued(), &submission.value) {
            (true, AnswerValue::Items(items)) => {
                serde_json::to_string(items).expect("number arrays always serialize")
            }
            (true, _) => {
                return Ok(SaveOutcome::Invalid {
                    message: "That question expects a list of values.".to_string(),
                })
            }
            (false, AnswerValue::Items(_)) => {
                return Ok(SaveOutcome::Invalid {
                    message: "That question expects a single value.".to_string(),
                })
            }
            (false, AnswerValue::Number(value)) => encode_number(*value),
            (false, AnswerValue::Text(text)) => text.trim().to_string(),
        };

        let record = self.answers.upsert(AnswerRecord {
            year: submission.year,
            group_id: submission.group_id,
            question_id: submission.question_id.clone(),
            user_id: submission.user_id,
            event_id: submission.event_id,
            answer: encoded,
            select: submission.select,
            created_on: now,
        })?;

        // Update rules: cloned answers carrying the catalog's literal value.
        for rule in &question.update {
            debug!(
                question = %question.id,
                target = %rule.target,
                "applying catalog update rule"
            );
            self.answers.upsert(AnswerRecord {
                question_id: rule.target.clone(),
                answer: encode_number(rule.value),
                select: None,
                created_on: now,
                ..record.clone()
            })?;
        }

        // Clear rules: a matching radio choice zeroes its dependents.
        if question.kind == QuestionKind::Radio {
            if let Some(choice) = submission
                .value
                .as_number()
                .and_then(|value| question.matching_choice(value))
            {
                for target in &choice.clear {
                    debug!(
                        question = %question.id,
                        target = %target,
                        "clearing dependent answer"
                    );
                    self.answers.upsert(AnswerRecord {
                        question_id: target.clone(),
                        answer: "0".to_string(),
                        select: None,
                        created_on: now,
                        ..record.clone()
                    })?;
                }
            }
        }

        Ok(SaveOutcome::Saved(record))
    }
}

/// Whole numbers are stored without a trailing fraction.
pub(crate) fn encode_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}
