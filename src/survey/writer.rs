use std::sync::Arc;

use chrono::NaiveDateTime;
use tracing::warn;

use crate::catalog::{Catalog, SurveyMode};
use crate::emissions::is_emission_code;

use super::domain::{AnswerRecord, EmissionsRecord, Group, UserId, Year};
use super::repository::{
    AnswerRepository, EmissionsRepository, MemberRepository, RepositoryError,
};

/// Pounds of landfill waste per person per year before any diversion.
const WASTE_BASELINE_LBS: f64 = 1570.0;

#[derive(Debug, thiserror::Error)]
pub enum WriteEmissionsError {
    #[error("no member record for user {user} in group {group} for {year}")]
    MemberNotFound {
        user: UserId,
        group: super::domain::GroupId,
        year: Year,
    },
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Derives emissions rows from a respondent's answers. A second pass for
/// the same respondent overwrites what the first wrote.
pub struct EmissionsWriter<A, E, M> {
    catalog: Arc<Catalog>,
    answers: Arc<A>,
    emissions: Arc<E>,
    members: Arc<M>,
}

impl<A, E, M> EmissionsWriter<A, E, M>
where
    A: AnswerRepository,
    E: EmissionsRepository,
    M: MemberRepository,
{
    pub fn new(catalog: Arc<Catalog>, answers: Arc<A>, emissions: Arc<E>, members: Arc<M>) -> Self {
        Self {
            catalog,
            answers,
            emissions,
            members,
        }
    }

    /// Rebuild the emissions rows for one respondent from their answers.
    /// With `recompute_standard_flag` and a user present, also re-derives
    /// the member's `is_standard` flag from survey completeness.
    pub fn write_emissions(
        &self,
        group: &Group,
        user_id: Option<UserId>,
        year: Year,
        recompute_standard_flag: bool,
        now: NaiveDateTime,
    ) -> Result<(), WriteEmissionsError> {
        let rows = self
            .answers
            .fetch_for_respondent(group.id, year, user_id)?;

        for row in &rows {
            let code = row.question_id.as_str();
            if !is_emission_code(code) {
                continue;
            }

            let Some(value) = self.derive_value(row) else {
                continue;
            };

            self.emissions.upsert(EmissionsRecord {
                year,
                group_id: group.id,
                type_id: code.to_string(),
                user_id,
                event_id: row.event_id,
                value,
                created_on: now,
            })?;
        }

        if recompute_standard_flag {
            if let Some(user_id) = user_id {
                let applicable = self.catalog.applicable(SurveyMode::User, group.kind);
                let answered = rows
                    .iter()
                    .filter(|row| {
                        applicable
                            .iter()
                            .any(|question| question.id == row.question_id)
                    })
                    .count();
                let is_standard = answered < applicable.len();

                match self.members.set_standard(user_id, group.id, year, is_standard) {
                    Ok(()) => {}
                    Err(RepositoryError::NotFound) => {
                        return Err(WriteEmissionsError::MemberNotFound {
                            user: user_id,
                            group: group.id,
                            year,
                        })
                    }
                    Err(err) => return Err(err.into()),
                }
            }
        }

        Ok(())
    }

    fn derive_value(&self, row: &AnswerRecord) -> Option<f64> {
        let question = match self.catalog.question(&row.question_id) {
            Some(question) => question,
            None => {
                warn!(question = %row.question_id, "stored answer for unknown question");
                return None;
            }
        };

        if question.is_array_valued() {
            // Waste is the baseline minus the minimum element of the
            // diverted amounts, not their sum and not the first entry.
            let items: Vec<f64> = match serde_json::from_str(&row.answer) {
                Ok(items) => items,
                Err(_) => {
                    warn!(question = %row.question_id, "array answer failed to parse");
                    return Some(WASTE_BASELINE_LBS);
                }
            };

            let diverted = items.iter().copied().fold(f64::INFINITY, f64::min);
            return Some(if diverted.is_finite() {
                WASTE_BASELINE_LBS - diverted
            } else {
                WASTE_BASELINE_LBS
            });
        }

        let answer: f64 = match row.answer.trim().parse() {
            Ok(value) => value,
            Err(_) => {
                warn!(question = %row.question_id, "non-numeric answer for emission question");
                return None;
            }
        };

        if question.select.is_empty() {
            Some(answer)
        } else {
            Some(answer * row.select.unwrap_or(1.0))
        }
    }
}
