//! Survey answer reconciliation, emissions derivation, and progress
//! tracking for groups and their members.

pub mod domain;
pub mod memory;
mod progress;
mod reconciler;
pub mod repository;
mod service;
mod views;
mod writer;

#[cfg(test)]
mod tests;

pub use domain::{
    default_survey_year, locale_percent_from_months, AnswerKey, AnswerRecord, AnswerValue,
    EmissionsKey, EmissionsRecord, EventId, Group, GroupId, MemberRecord, User, UserId, Year,
};
pub use memory::{MemoryAnswerRepository, MemoryEmissionsRepository, MemoryMemberRepository};
pub use progress::{CategoryProgress, ProgressEngine, SurveyOverview, TaskKind, TaskView};
pub use reconciler::{AnswerReconciler, AnswerSubmission, ReconcileError, SaveOutcome};
pub use repository::{
    AnswerRepository, EmissionsRepository, MemberRepository, RepositoryError,
};
pub use service::{SurveyError, SurveyService};
pub use views::{
    format_metric_tons, format_usd, ChoiceView, GroupDashboard, MemberView, QuestionView,
    SaveAnswerResponse, SelectOptionView, SurveyPage,
};
pub use writer::{EmissionsWriter, WriteEmissionsError};
