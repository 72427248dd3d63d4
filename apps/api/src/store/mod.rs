//! Process-local storage for users and resumes. Nothing survives a restart.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use serde_json::Value;

use crate::errors::AppError;
use crate::models::resume::ResumeRecord;
use crate::models::user::User;

/// Users keyed by email, resumes keyed by id.
#[derive(Default)]
pub struct MemoryStore {
    users: Mutex<HashMap<String, User>>,
    resumes: Mutex<HashMap<String, ResumeRecord>>,
}

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, AppError> {
    mutex
        .lock()
        .map_err(|_| AppError::Store("mutex poisoned".to_string()))
}

/// `resume_<millis>`, bumped forward until it does not collide.
fn next_resume_id(existing: &HashMap<String, ResumeRecord>, mut millis: i64) -> String {
    loop {
        let id = format!("resume_{millis}");
        if !existing.contains_key(&id) {
            return id;
        }
        millis += 1;
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ── users ───────────────────────────────────────────────────────────────

    /// Inserts a user. Fails only on an exact email collision.
    pub fn create_user(&self, user: User) -> Result<User, AppError> {
        let mut users = lock(&self.users)?;
        if users.contains_key(&user.email) {
            return Err(AppError::AlreadyExists("User already exists".to_string()));
        }
        users.insert(user.email.clone(), user.clone());
        Ok(user)
    }

    pub fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        Ok(lock(&self.users)?.get(email).cloned())
    }

    pub fn find_user_by_id(&self, id: &str) -> Result<Option<User>, AppError> {
        Ok(lock(&self.users)?.values().find(|u| u.id == id).cloned())
    }

    // ── resumes ─────────────────────────────────────────────────────────────

    /// Stores a new resume under a fresh timestamp-derived id and links it to
    /// the owning user, if the owner is a registered account.
    pub fn insert_resume(
        &self,
        owner: &str,
        title: Option<String>,
        data: Value,
    ) -> Result<ResumeRecord, AppError> {
        let record = {
            let mut resumes = lock(&self.resumes)?;
            let id = next_resume_id(&resumes, Utc::now().timestamp_millis());
            let record = ResumeRecord::new(id, owner.to_string(), title, data);
            resumes.insert(record.id.clone(), record.clone());
            record
        };

        let mut users = lock(&self.users)?;
        if let Some(user) = users.values_mut().find(|u| u.id == owner) {
            user.resumes.push(record.id.clone());
        }

        Ok(record)
    }

    /// All resumes owned by `owner`, most recently updated first.
    pub fn list_resumes(&self, owner: &str) -> Result<Vec<ResumeRecord>, AppError> {
        let resumes = lock(&self.resumes)?;
        let mut owned: Vec<ResumeRecord> = resumes
            .values()
            .filter(|r| r.is_owned_by(owner))
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(owned)
    }

    /// Returns the resume only when `owner` owns it.
    pub fn get_resume(&self, owner: &str, id: &str) -> Result<Option<ResumeRecord>, AppError> {
        Ok(lock(&self.resumes)?
            .get(id)
            .filter(|r| r.is_owned_by(owner))
            .cloned())
    }

    /// Replaces the payload in place. Last write wins.
    pub fn update_resume(
        &self,
        owner: &str,
        id: &str,
        title: Option<String>,
        data: Value,
    ) -> Result<Option<ResumeRecord>, AppError> {
        let mut resumes = lock(&self.resumes)?;
        let Some(record) = resumes.get_mut(id).filter(|r| r.is_owned_by(owner)) else {
            return Ok(None);
        };
        record.data = data;
        if let Some(title) = title.filter(|t| !t.is_empty()) {
            record.title = title;
        }
        record.updated_at = Utc::now();
        Ok(Some(record.clone()))
    }

    /// Removes the resume and unlinks it from its owner. Returns false when
    /// there was nothing to delete.
    pub fn delete_resume(&self, owner: &str, id: &str) -> Result<bool, AppError> {
        {
            let mut resumes = lock(&self.resumes)?;
            if !resumes.get(id).is_some_and(|r| r.is_owned_by(owner)) {
                return Ok(false);
            }
            resumes.remove(id);
        }

        let mut users = lock(&self.users)?;
        if let Some(user) = users.values_mut().find(|u| u.id == owner) {
            user.resumes.retain(|r| r != id);
        }
        Ok(true)
    }
}
