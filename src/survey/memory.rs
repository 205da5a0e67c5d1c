use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::domain::{
    AnswerKey, AnswerRecord, EmissionsKey, EmissionsRecord, GroupId, MemberRecord, UserId, Year,
};
use super::repository::{
    AnswerRepository, EmissionsRepository, MemberRepository, RepositoryError,
};

/// In-memory answer store. The single mutex makes each upsert atomic on
/// the natural key, matching what a SQL unique index provides.
#[derive(Debug, Default, Clone)]
pub struct MemoryAnswerRepository {
    rows: Arc<Mutex<HashMap<AnswerKey, AnswerRecord>>>,
}

impl AnswerRepository for MemoryAnswerRepository {
    fn upsert(&self, record: AnswerRecord) -> Result<AnswerRecord, RepositoryError> {
        let mut guard = self.rows.lock().map_err(poisoned)?;
        guard.insert(record.natural_key(), record.clone());
        Ok(record)
    }

    fn fetch_by_group_year(
        &self,
        group_id: GroupId,
        year: Year,
    ) -> Result<Vec<AnswerRecord>, RepositoryError> {
        let guard = self.rows.lock().map_err(poisoned)?;
        let mut rows: Vec<AnswerRecord> = guard
            .values()
            .filter(|row| row.group_id == group_id && row.year == year)
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.natural_key().cmp(&b.natural_key()));
        Ok(rows)
    }

    fn fetch_for_respondent(
        &self,
        group_id: GroupId,
        year: Year,
        user_id: Option<UserId>,
    ) -> Result<Vec<AnswerRecord>, RepositoryError> {
        let rows = self.fetch_by_group_year(group_id, year)?;
        Ok(rows
            .into_iter()
            .filter(|row| row.user_id == user_id)
            .collect())
    }
}

/// In-memory emissions store with the same atomic upsert contract.
#[derive(Debug, Default, Clone)]
pub struct MemoryEmissionsRepository {
    rows: Arc<Mutex<HashMap<EmissionsKey, EmissionsRecord>>>,
}

impl EmissionsRepository for MemoryEmissionsRepository {
    fn upsert(&self, record: EmissionsRecord) -> Result<EmissionsRecord, RepositoryError> {
        let mut guard = self.rows.lock().map_err(poisoned)?;
        guard.insert(record.natural_key(), record.clone());
        Ok(record)
    }

    fn fetch_by_group_year(
        &self,
        group_id: GroupId,
        year: Year,
    ) -> Result<Vec<EmissionsRecord>, RepositoryError> {
        let guard = self.rows.lock().map_err(poisoned)?;
        let mut rows: Vec<EmissionsRecord> = guard
            .values()
            .filter(|row| row.group_id == group_id && row.year == year)
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.natural_key().cmp(&b.natural_key()));
        Ok(rows)
    }

    fn fetch_for_respondent(
        &self,
        group_id: GroupId,
        year: Year,
        user_id: Option<UserId>,
    ) -> Result<Vec<EmissionsRecord>, RepositoryError> {
        let rows = self.fetch_by_group_year(group_id, year)?;
        Ok(rows
            .into_iter()
            .filter(|row| row.user_id == user_id)
            .collect())
    }
}

/// In-memory member store with soft removal.
#[derive(Debug, Default, Clone)]
pub struct MemoryMemberRepository {
    rows: Arc<Mutex<HashMap<(UserId, GroupId, Year), MemberRecord>>>,
}

impl MemberRepository for MemoryMemberRepository {
    fn upsert(&self, record: MemberRecord) -> Result<MemberRecord, RepositoryError> {
        let mut guard = self.rows.lock().map_err(poisoned)?;
        guard.insert(
            (record.user_id, record.group_id, record.year),
            record.clone(),
        );
        Ok(record)
    }

    fn fetch_by_group_year(
        &self,
        group_id: GroupId,
        year: Year,
    ) -> Result<Vec<MemberRecord>, RepositoryError> {
        let guard = self.rows.lock().map_err(poisoned)?;
        let mut rows: Vec<MemberRecord> = guard
            .values()
            .filter(|row| row.group_id == group_id && row.year == year && !row.removed)
            .cloned()
            .collect();
        rows.sort_by_key(|row| row.user_id);
        Ok(rows)
    }

    fn find(
        &self,
        user_id: UserId,
        group_id: GroupId,
        year: Year,
    ) -> Result<Option<MemberRecord>, RepositoryError> {
        let guard = self.rows.lock().map_err(poisoned)?;
        Ok(guard
            .get(&(user_id, group_id, year))
            .filter(|row| !row.removed)
            .cloned())
    }

    fn find_for_user(&self, user_id: UserId) -> Result<Vec<MemberRecord>, RepositoryError> {
        let guard = self.rows.lock().map_err(poisoned)?;
        let mut rows: Vec<MemberRecord> = guard
            .values()
            .filter(|row| row.user_id == user_id && !row.removed)
            .cloned()
            .collect();
        rows.sort_by_key(|row| (row.group_id, row.year));
        Ok(rows)
    }

    fn set_standard(
        &self,
        user_id: UserId,
        group_id: GroupId,
        year: Year,
        is_standard: bool,
    ) -> Result<(), RepositoryError> {
        let mut guard = self.rows.lock().map_err(poisoned)?;
        let row = guard
            .get_mut(&(user_id, group_id, year))
            .ok_or(RepositoryError::NotFound)?;
        row.is_standard = is_standard;
        Ok(())
    }

    fn remove(
        &self,
        user_id: UserId,
        group_id: GroupId,
        year: Year,
        hard: bool,
    ) -> Result<(), RepositoryError> {
        let mut guard = self.rows.lock().map_err(poisoned)?;
        if hard {
            guard
                .remove(&(user_id, group_id, year))
                .ok_or(RepositoryError::NotFound)?;
        } else {
            let row = guard
                .get_mut(&(user_id, group_id, year))
                .ok_or(RepositoryError::NotFound)?;
            row.removed = true;
        }
        Ok(())
    }
}

fn poisoned<T>(_: std::sync::PoisonError<T>) -> RepositoryError {
    RepositoryError::Unavailable("repository lock poisoned".to_string())
}
