use std::sync::Arc;

use chrono::NaiveDateTime;
use tracing::warn;

use crate::catalog::{Catalog, QuestionId, SurveyMode};
use crate::emissions::{convert_readings, EmissionsCalculator, LocaleTable};

use super::domain::{
    AnswerRecord, AnswerValue, Group, GroupId, MemberRecord, User, UserId, Year,
};
use super::progress::ProgressEngine;
use super::reconciler::{AnswerReconciler, AnswerSubmission, ReconcileError, SaveOutcome};
use super::repository::{
    AnswerRepository, EmissionsRepository, MemberRepository, RepositoryError,
};
use super::views::{
    format_metric_tons, format_usd, GroupDashboard, MemberView, SaveAnswerResponse, SurveyPage,
};
use super::writer::{EmissionsWriter, WriteEmissionsError};

/// Error raised by the survey service.
#[derive(Debug, thiserror::Error)]
pub enum SurveyError {
    #[error("user {user} is not a member of group {group}")]
    NoMembership { user: UserId, group: GroupId },
    #[error(transparent)]
    Reconcile(#[from] ReconcileError),
    #[error(transparent)]
    WriteEmissions(#[from] WriteEmissionsError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Facade composing the reconciler, writer, and progress engine behind
/// the three operations the controllers consume. Identity hands in an
/// already-resolved user/group/year; nothing here authenticates.
pub struct SurveyService<A, E, M> {
    catalog: Arc<Catalog>,
    locales: Arc<LocaleTable>,
    calculator: EmissionsCalculator,
    answers: Arc<A>,
    emissions: Arc<E>,
    members: Arc<M>,
    reconciler: AnswerReconciler<A>,
    writer: EmissionsWriter<A, E, M>,
    progress: ProgressEngine,
}

impl<A, E, M> SurveyService<A, E, M>
where
    A: AnswerRepository + 'static,
    E: EmissionsRepository + 'static,
    M: MemberRepository + 'static,
{
    pub fn new(
        catalog: Catalog,
        locales: LocaleTable,
        calculator: EmissionsCalculator,
        answers: Arc<A>,
        emissions: Arc<E>,
        members: Arc<M>,
    ) -> Self {
        let catalog = Arc::new(catalog);
        let locales = Arc::new(locales);
        let reconciler = AnswerReconciler::new(catalog.clone(), answers.clone());
        let writer = EmissionsWriter::new(
            catalog.clone(),
            answers.clone(),
            emissions.clone(),
            members.clone(),
        );
        let progress = ProgressEngine::new(catalog.clone());

        Self {
            catalog,
            locales,
            calculator,
            answers,
            emissions,
            members,
            reconciler,
            writer,
            progress,
        }
    }

    /// The survey page for one respondent: questions with answers filled
    /// in, the overview, and current totals.
    pub fn questions(
        &self,
        group: &Group,
        year: Year,
        user: Option<&User>,
    ) -> Result<SurveyPage, SurveyError> {
        if let Some(user) = user {
            self.ensure_membership(user, group)?;
        }

        let mode = match user {
            Some(_) => SurveyMode::User,
            None => SurveyMode::Group,
        };
        let user_id = user.map(|user| user.id);

        let all_answers = self.answers.fetch_by_group_year(group.id, year)?;
        let respondent_answers: Vec<AnswerRecord> = all_answers
            .iter()
            .filter(|answer| answer.user_id == user_id)
            .cloned()
            .collect();

        let (emissions, breakdown) = self.respondent_emissions(group.id, year, user_id)?;
        let offset_amount = self.calculator.price(emissions);

        let overview = self
            .progress
            .overview(mode, group.kind, &respondent_answers);
        let questions = self
            .catalog
            .applicable(mode, group.kind)
            .into_iter()
            .map(|question| {
                self.progress
                    .build_question(&question.id, mode, group.kind, &respondent_answers)
                    .expect("applicable questions exist in the catalog")
            })
            .collect();

        Ok(SurveyPage {
            mode,
            overview,
            questions,
            answers: all_answers,
            emissions,
            emissions_display: format_metric_tons(emissions),
            offset_amount,
            offset_display: format_usd(offset_amount),
            breakdown,
        })
    }

    /// Save one answer, cascade its catalog side effects, rebuild the
    /// respondent's emissions rows, and return fresh totals. A blank
    /// value comes back as a re-prompt, not an error.
    #[allow(clippy::too_many_arguments)]
    pub fn save_answer(
        &self,
        group: &Group,
        year: Year,
        user: Option<&User>,
        question_id: QuestionId,
        value: AnswerValue,
        select: Option<f64>,
        now: NaiveDateTime,
    ) -> Result<SaveAnswerResponse, SurveyError> {
        if let Some(user) = user {
            self.ensure_membership(user, group)?;
        }

        let user_id = user.map(|user| user.id);
        let submission = AnswerSubmission {
            year,
            group_id: group.id,
            user_id,
            event_id: None,
            question_id,
            value,
            select,
        };

        match self.reconciler.save_answer(submission, now)? {
            SaveOutcome::Invalid { message } => return Ok(SaveAnswerResponse::Invalid { message }),
            SaveOutcome::Saved(_) => {}
        }

        // Completing the survey drops the member off the standard estimate.
        self.writer
            .write_emissions(group, user_id, year, true, now)?;

        let answers = self.answers.fetch_by_group_year(group.id, year)?;
        let (emissions, _) = self.respondent_emissions(group.id, year, user_id)?;
        let offset_amount = self.calculator.price(emissions);

        Ok(SaveAnswerResponse::Saved {
            answers,
            emissions,
            offset_amount,
        })
    }

    /// The group dashboard: members with their footprints, the combined
    /// group total, and the viewer's next task.
    pub fn group_dashboard(
        &self,
        group: &Group,
        year: Year,
        viewer: Option<&User>,
    ) -> Result<GroupDashboard, SurveyError> {
        let viewer_member = match viewer {
            Some(user) => {
                self.ensure_membership(user, group)?;
                self.members.find(user.id, group.id, year)?
            }
            None => None,
        };

        let members = self.members.fetch_by_group_year(group.id, year)?;
        let mut member_views = Vec::with_capacity(members.len());
        let mut member_total = 0.0;

        for member in &members {
            let emissions = self.member_emissions(group, year, member)?;
            member_total += emissions;
            member_views.push(MemberView {
                user_id: member.user_id,
                name: member.name.clone(),
                locale: member.locale.clone(),
                locale_percent: member.locale_percent,
                is_admin: member.is_admin,
                is_champion: member.is_champion,
                is_standard: member.is_standard,
                emissions,
                emissions_display: format_metric_tons(emissions),
                offset_amount: self.calculator.price(emissions),
            });
        }

        let (profile_emissions, _) = self.respondent_emissions(group.id, year, None)?;
        let emissions = profile_emissions + member_total;
        let offset_amount = self.calculator.price(emissions);

        let task = match viewer_member {
            Some(member) => {
                let profile_answers =
                    self.answers.fetch_for_respondent(group.id, year, None)?;
                let profile_complete = self
                    .progress
                    .overview(SurveyMode::Group, group.kind, &profile_answers)
                    .complete;
                Some(
                    self.progress
                        .next_task(&member, members.len(), profile_complete),
                )
            }
            None => None,
        };

        Ok(GroupDashboard {
            members: member_views,
            emissions,
            emissions_display: format_metric_tons(emissions),
            offset_amount,
            offset_display: format_usd(offset_amount),
            task,
        })
    }

    /// Add or update a member record for a group and year. New members
    /// start on the standard estimate until their survey is complete.
    #[allow(clippy::too_many_arguments)]
    pub fn save_member(
        &self,
        group: &Group,
        year: Year,
        user: &User,
        locale: &str,
        locale_months: u8,
        is_admin: bool,
        is_champion: bool,
        now: NaiveDateTime,
    ) -> Result<MemberRecord, SurveyError> {
        let existing = self.members.find(user.id, group.id, year)?;

        let record = MemberRecord {
            user_id: user.id,
            group_id: group.id,
            year,
            name: user.name.clone(),
            locale: locale.to_string(),
            locale_percent: super::domain::locale_percent_from_months(locale_months),
            is_admin,
            is_champion,
            is_standard: existing.as_ref().map(|member| member.is_standard).unwrap_or(true),
            emissions: existing.as_ref().and_then(|member| member.emissions),
            created_on: existing
                .as_ref()
                .map(|member| member.created_on)
                .unwrap_or(now),
            removed: false,
        };

        Ok(self.members.upsert(record)?)
    }

    /// Soft-remove a member from a group for a year.
    pub fn remove_member(
        &self,
        group: &Group,
        year: Year,
        user_id: UserId,
    ) -> Result<(), SurveyError> {
        self.members.remove(user_id, group.id, year, false)?;
        Ok(())
    }

    fn ensure_membership(&self, user: &User, group: &Group) -> Result<(), SurveyError> {
        let memberships = self.members.find_for_user(user.id)?;
        if memberships
            .iter()
            .any(|membership| membership.group_id == group.id)
        {
            Ok(())
        } else {
            Err(SurveyError::NoMembership {
                user: user.id,
                group: group.id,
            })
        }
    }

    /// Computed emissions for one respondent's rows, radiative forcing
    /// included.
    fn respondent_emissions(
        &self,
        group_id: GroupId,
        year: Year,
        user_id: Option<UserId>,
    ) -> Result<(f64, Vec<crate::emissions::CategoryBreakdown>), SurveyError> {
        let rows = self.emissions.fetch_for_respondent(group_id, year, user_id)?;
        let quantities =
            convert_readings(rows.iter().map(|row| (row.type_id.as_str(), row.value)));

        Ok((
            self.calculator.calculate(&quantities),
            self.calculator.breakdown(&quantities),
        ))
    }

    /// A member's footprint: a hard-set value wins, then the locale
    /// estimate while they are on the standard profile, then their
    /// computed rows.
    fn member_emissions(
        &self,
        group: &Group,
        year: Year,
        member: &MemberRecord,
    ) -> Result<f64, SurveyError> {
        if let Some(hard_set) = member.emissions {
            return Ok(hard_set);
        }

        if member.is_standard {
            return Ok(self
                .locales
                .estimate(&member.locale, member.locale_percent)
                .unwrap_or_else(|| {
                    warn!(locale = %member.locale, "no locale average for standard member");
                    0.0
                }));
        }

        let (computed, _) = self.respondent_emissions(group.id, year, Some(member.user_id))?;
        Ok(computed)
    }

    /// The catalog this service was built with.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }
}
