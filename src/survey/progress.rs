use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;

use crate::catalog::{Catalog, GroupKind, QuestionGroup, QuestionId, SurveyMode};

use super::domain::{AnswerRecord, MemberRecord};
use super::views::{ChoiceView, QuestionView, SelectOptionView};

/// Per-category completion counts for the survey overview.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryProgress {
    pub group: QuestionGroup,
    pub name: &'static str,
    pub icon: &'static str,
    pub total: usize,
    pub answered: usize,
}

/// Landing-page state: where to resume, how far along each category is,
/// and overall completion.
#[derive(Debug, Clone, Serialize)]
pub struct SurveyOverview {
    /// First unanswered applicable question, in catalog order.
    pub goto: Option<QuestionId>,
    pub start_id: Option<QuestionId>,
    pub groups: Vec<CategoryProgress>,
    pub answer_count: usize,
    pub complete: bool,
    pub progress_percent: u8,
}

/// Suggested next action for a member, in fixed precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskKind {
    AddMember,
    GroupProfile,
    UserProfile,
    NotifyMembers,
    JoinCommunity,
}

impl TaskKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::AddMember => "Add your first group member",
            Self::GroupProfile => "Complete the group profile",
            Self::UserProfile => "Complete your own profile",
            Self::NotifyMembers => "Invite your group members to fill in the survey",
            Self::JoinCommunity => "Join the community",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TaskView {
    pub key: TaskKind,
    pub priority: u8,
}

/// Walks the catalog against a respondent's answers: completion state,
/// the next question to show, and admin task prompts.
pub struct ProgressEngine {
    catalog: Arc<Catalog>,
}

impl ProgressEngine {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    /// Overview for one respondent's answers. `answers` must already be
    /// filtered to the respondent; stale rows for questions no longer in
    /// the catalog still count toward `answer_count`, and the percentage
    /// is clamped at 100.
    pub fn overview(
        &self,
        mode: SurveyMode,
        kind: GroupKind,
        answers: &[AnswerRecord],
    ) -> SurveyOverview {
        let questions = self.catalog.applicable(mode, kind);
        let answered: HashMap<&QuestionId, &AnswerRecord> = answers
            .iter()
            .map(|answer| (&answer.question_id, answer))
            .collect();

        let mut groups: Vec<CategoryProgress> = QuestionGroup::ordered()
            .into_iter()
            .map(|group| CategoryProgress {
                group,
                name: group.label(),
                icon: group.icon(),
                total: 0,
                answered: 0,
            })
            .collect();
        let mut goto = None;

        for question in &questions {
            let entry = groups
                .iter_mut()
                .find(|entry| entry.group == question.group)
                .expect("every question group is listed");
            entry.total += 1;

            if answered.contains_key(&question.id) {
                entry.answered += 1;
            } else if goto.is_none() {
                goto = Some(question.id.clone());
            }
        }

        let answer_count = answers.len();
        let total = questions.len();
        let progress_percent = if total == 0 {
            100
        } else {
            ((answer_count.min(total) as f64 / total as f64) * 100.0).round() as u8
        };

        SurveyOverview {
            goto,
            start_id: questions.first().map(|question| question.id.clone()),
            groups,
            answer_count,
            complete: answer_count >= total,
            progress_percent,
        }
    }

    /// Resolve a goto target against skip rules: a pointer at a skipped
    /// question follows that question's own goto chain until an
    /// applicable question turns up or the chain ends.
    pub fn resolve_goto(
        &self,
        target: Option<&QuestionId>,
        mode: SurveyMode,
        kind: GroupKind,
    ) -> Option<QuestionId> {
        let mut current = target.cloned();
        let mut hops = 0;

        while let Some(id) = current {
            let question = match self.catalog.question(&id) {
                Some(question) => question,
                None => return Some(id),
            };

            if !question.is_skipped(mode, kind) {
                return Some(id);
            }

            current = question.goto.clone();
            hops += 1;
            if hops > self.catalog.len() {
                return None;
            }
        }

        None
    }

    /// Build the display form of one question: answer filled in, gotos
    /// resolved, `%GROUP%` expanded, and position within its category.
    pub fn build_question(
        &self,
        id: &QuestionId,
        mode: SurveyMode,
        kind: GroupKind,
        answers: &[AnswerRecord],
    ) -> Option<QuestionView> {
        let question = self.catalog.question(id)?;
        let questions = self.catalog.applicable(mode, kind);
        let answer = answers.iter().find(|answer| &answer.question_id == id);

        let value = answer.map(|answer| answer.answer.clone()).unwrap_or_default();
        let select_value = answer.and_then(|answer| answer.select);

        let group_fill_in = match mode {
            SurveyMode::Group => format!("or your {}", kind.member_noun()),
            SurveyMode::User => String::new(),
        };

        let mut index: usize = 0;
        let mut group_total: usize = 0;
        for candidate in &questions {
            if candidate.group != question.group {
                continue;
            }
            group_total += 1;
            if candidate.id == question.id {
                index = group_total;
            }
        }

        let choices = question
            .choices
            .iter()
            .map(|choice| ChoiceView {
                label: choice.label.clone(),
                value: choice.value,
                goto: self.resolve_goto(choice.goto.as_ref(), mode, kind),
                selected: value == super::reconciler::encode_number(choice.value),
            })
            .collect();

        let select = question
            .select
            .iter()
            .map(|option| SelectOptionView {
                label: option.label.clone(),
                value: option.value,
                selected: select_value == Some(option.value),
            })
            .collect();

        let progress = if group_total == 0 {
            0
        } else {
            (((index.saturating_sub(1)) as f64 / group_total as f64) * 100.0).round() as u8
        };

        Some(QuestionView {
            id: question.id.clone(),
            kind: question.kind,
            group: question.group,
            group_label: question.group.label(),
            heading: question.heading.clone(),
            hint: question.hint.clone(),
            label: question.label.replace("%GROUP%", &group_fill_in),
            input_suffix: question.input_suffix.clone(),
            value,
            choices,
            select,
            goto: self.resolve_goto(question.goto.as_ref(), mode, kind),
            index,
            total: group_total,
            progress,
        })
    }

    /// The member's suggested next action. Admin precedence: grow the
    /// group, finish the group profile, finish your own profile, notify
    /// the group. Everyone else: finish your profile, then the community
    /// prompt. Precedence is fixed even when it prompts an admin about
    /// their own profile right after the group's is done.
    pub fn next_task(
        &self,
        member: &MemberRecord,
        member_count: usize,
        group_profile_complete: bool,
    ) -> TaskView {
        let mut priority = 1;

        if member.is_admin {
            if member_count <= 1 {
                return TaskView {
                    key: TaskKind::AddMember,
                    priority,
                };
            }

            priority += 1;
            if !group_profile_complete {
                return TaskView {
                    key: TaskKind::GroupProfile,
                    priority,
                };
            }

            priority += 1;
        }

        if member.is_standard {
            return TaskView {
                key: TaskKind::UserProfile,
                priority,
            };
        }

        priority += 1;

        if member.is_admin {
            return TaskView {
                key: TaskKind::NotifyMembers,
                priority,
            };
        }

        TaskView {
            key: TaskKind::JoinCommunity,
            priority,
        }
    }
}
