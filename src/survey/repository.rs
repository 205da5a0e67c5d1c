use super::domain::{AnswerRecord, EmissionsRecord, GroupId, MemberRecord, UserId, Year};

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Storage abstraction for answer rows. Implementations must make
/// `upsert` atomic on the natural key — a concurrent save for the same
/// key may not produce two rows.
pub trait AnswerRepository: Send + Sync {
    fn upsert(&self, record: AnswerRecord) -> Result<AnswerRecord, RepositoryError>;
    fn fetch_by_group_year(
        &self,
        group_id: GroupId,
        year: Year,
    ) -> Result<Vec<AnswerRecord>, RepositoryError>;
    /// Rows for one respondent: a member when `user_id` is set, the
    /// group profile otherwise.
    fn fetch_for_respondent(
        &self,
        group_id: GroupId,
        year: Year,
        user_id: Option<UserId>,
    ) -> Result<Vec<AnswerRecord>, RepositoryError>;
}

/// Storage abstraction for derived emissions rows, upserted by natural
/// key so a second reconciliation pass overwrites rather than duplicates.
pub trait EmissionsRepository: Send + Sync {
    fn upsert(&self, record: EmissionsRecord) -> Result<EmissionsRecord, RepositoryError>;
    fn fetch_by_group_year(
        &self,
        group_id: GroupId,
        year: Year,
    ) -> Result<Vec<EmissionsRecord>, RepositoryError>;
    fn fetch_for_respondent(
        &self,
        group_id: GroupId,
        year: Year,
        user_id: Option<UserId>,
    ) -> Result<Vec<EmissionsRecord>, RepositoryError>;
}

/// Storage abstraction for member rows. Removal is a soft delete unless
/// `hard` is requested.
pub trait MemberRepository: Send + Sync {
    fn upsert(&self, record: MemberRecord) -> Result<MemberRecord, RepositoryError>;
    /// Active members of a group for a year; removed members excluded.
    fn fetch_by_group_year(
        &self,
        group_id: GroupId,
        year: Year,
    ) -> Result<Vec<MemberRecord>, RepositoryError>;
    fn find(
        &self,
        user_id: UserId,
        group_id: GroupId,
        year: Year,
    ) -> Result<Option<MemberRecord>, RepositoryError>;
    /// All of a user's memberships across groups and years.
    fn find_for_user(&self, user_id: UserId) -> Result<Vec<MemberRecord>, RepositoryError>;
    fn set_standard(
        &self,
        user_id: UserId,
        group_id: GroupId,
        year: Year,
        is_standard: bool,
    ) -> Result<(), RepositoryError>;
    fn remove(
        &self,
        user_id: UserId,
        group_id: GroupId,
        year: Year,
        hard: bool,
    ) -> Result<(), RepositoryError>;
}
