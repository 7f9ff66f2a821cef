//! Session-aware orchestration between the HTTP surface and the store.
//!
//! Admins read and write everything. Standard users only ever see their
//! own records and never see accounts other than their own. Records that
//! exist but belong to someone else are reported as missing.
//!
//! The session only remembers who signed in. Role and disabled state are
//! read from the store on every call, so demoting, disabling or deleting an
//! account takes effect on its live sessions immediately.

mod session;

pub use session::{Session, SessionStore, CURRENT_USER_KEY};

use std::sync::Arc;
use chrono::NaiveDate;
use serde::Serialize;
use crate::catalog::{TaskCatalog, TaskTime};
use crate::config::AdminConfig;
use crate::entry::{compute_utilization, validator, EntryForm, EntrySnapshot};
use crate::errors::{AppError, AppResult, AuthError};
use crate::models::{
    LoginForm, NewUser, ProductionRecord, PublicUser, RecordDraft, RecordPatch, Role, User,
    UserPatch,
};
use crate::services::Store;

#[derive(Debug, Serialize, PartialEq)]
pub struct DashboardView {
    pub users: Vec<PublicUser>,
    pub records: Vec<ProductionRecord>,
}

pub struct Dashboard {
    store: Arc<dyn Store>,
    catalog: Arc<TaskCatalog>,
    default_admin: AdminConfig,
}

impl Dashboard {
    pub fn new(store: Arc<dyn Store>, catalog: Arc<TaskCatalog>, default_admin: AdminConfig) -> Self {
        Self { store, catalog, default_admin }
    }

    /// Creates the configured admin account when no account has its id.
    pub async fn ensure_default_admin(&self) -> AppResult<()> {
        if self.store.get_user(&self.default_admin.id).await?.is_some() {
            return Ok(());
        }

        tracing::info!("Seeding default admin account {}", self.default_admin.username);
        self.store
            .insert_user(User {
                id: self.default_admin.id.clone(),
                username: self.default_admin.username.clone(),
                password: self.default_admin.password.clone(),
                name: self.default_admin.name.clone(),
                role: Role::Admin,
                is_disabled: false,
            })
            .await?;
        Ok(())
    }

    pub async fn login(&self, form: &LoginForm) -> AppResult<Session> {
        let user = self
            .store
            .find_user_by_credentials(&form.username, &form.password)
            .await?
            .ok_or_else(|| {
                tracing::warn!("Invalid credentials for user: {}", form.username);
                AuthError::InvalidCredentials
            })?;

        if user.is_disabled {
            tracing::warn!("Login refused for disabled account: {}", form.username);
            return Err(AuthError::Disabled.into());
        }

        tracing::info!("User logged in: {}", user.username);
        Ok(Session::LoggedIn(user))
    }

    /// The session re-resolved against the stored account. A deleted
    /// account is signed out and a disabled one is refused; the caller
    /// should drop the cookie session on either error.
    pub async fn refresh(&self, session: &Session) -> AppResult<Session> {
        Ok(Session::LoggedIn(self.signed_in(session).await?))
    }

    pub fn logout(&self, session: &Session) -> Session {
        if let Session::LoggedIn(user) = session {
            tracing::info!("User logged out: {}", user.username);
        }
        Session::LoggedOut
    }

    /// Records the session may see, newest completion date first.
    pub async fn visible_records(&self, session: &Session) -> AppResult<Vec<ProductionRecord>> {
        let user = self.signed_in(session).await?;
        self.records_for(&user).await
    }

    async fn records_for(&self, user: &PublicUser) -> AppResult<Vec<ProductionRecord>> {
        let mut records = self.store.list_records().await?;
        if !user.is_admin() {
            records.retain(|r| r.user_id == user.id);
        }
        records.sort_by(|a, b| b.completed_date.cmp(&a.completed_date));
        Ok(records)
    }

    pub async fn load_view(&self, session: &Session) -> AppResult<DashboardView> {
        self.ensure_default_admin().await?;
        let user = self.signed_in(session).await?;

        let users = if user.is_admin() {
            self.store.list_users().await?
        } else {
            vec![user.clone()]
        };
        let records = self.records_for(&user).await?;

        tracing::debug!("Loaded {} users and {} records for {}", users.len(), records.len(), user.username);
        Ok(DashboardView { users, records })
    }

    /// What the entry form shows for `draft`: derived utilization and mode.
    pub fn preview_entry(&self, draft: &RecordDraft) -> EntrySnapshot {
        EntryForm::from_draft(&self.catalog, draft).snapshot()
    }

    /// Runs `draft` through the entry form, so fixed-duration tasks get
    /// their utilization derived here, then persists the accepted record.
    pub async fn submit_record(
        &self,
        session: &Session,
        draft: &RecordDraft,
        today: NaiveDate,
    ) -> AppResult<ProductionRecord> {
        let user = self.signed_in(session).await?;
        let record = EntryForm::from_draft(&self.catalog, draft).submit(&user, today)?;
        let stored = self.store.insert_record(record).await?;
        tracing::info!("Record {} added by {}", stored.id, user.username);
        Ok(stored)
    }

    /// Applies `patch` to an owned record. When the resulting task has a
    /// fixed duration the utilization is derived from it and the resulting
    /// count; a client-sent value is discarded.
    pub async fn update_record(
        &self,
        session: &Session,
        id: &str,
        patch: &RecordPatch,
    ) -> AppResult<ProductionRecord> {
        let stored = self.owned_record(session, id).await?;
        let patch = self.rederive(&stored, patch);
        validator::check_patch(&patch)?;

        let updated = self
            .store
            .update_record(id, &patch)
            .await?
            .ok_or_else(|| record_not_found(id))?;
        tracing::info!("Record {} updated", id);
        Ok(updated)
    }

    pub async fn delete_record(&self, session: &Session, id: &str) -> AppResult<()> {
        self.owned_record(session, id).await?;
        if !self.store.delete_record(id).await? {
            return Err(record_not_found(id));
        }
        tracing::info!("Record {} deleted", id);
        Ok(())
    }

    pub async fn add_user(&self, session: &Session, new_user: NewUser) -> AppResult<PublicUser> {
        self.signed_in_admin(session).await?;
        self.ensure_username_free(&new_user.username, None).await?;

        let created = self.store.insert_user(new_user.into_user()).await?;
        tracing::info!("User {} created", created.username);
        Ok(created)
    }

    /// Applies `patch` to account `id`. When the admin edits their own
    /// account the session copy is replaced with the updated one.
    pub async fn update_user(
        &self,
        session: &mut Session,
        id: &str,
        patch: &UserPatch,
    ) -> AppResult<PublicUser> {
        let admin_id = self.signed_in_admin(session).await?.id;
        if let Some(username) = &patch.username {
            self.ensure_username_free(username, Some(id)).await?;
        }

        let updated = self
            .store
            .update_user(id, patch)
            .await?
            .ok_or_else(|| user_not_found(id))?;

        if updated.id == admin_id {
            *session = Session::LoggedIn(updated.clone());
        }
        tracing::info!("User {} updated", updated.username);
        Ok(updated)
    }

    /// Deletes account `id` and every record it owns. Deleting the
    /// signed-in admin's own account ends the session.
    pub async fn delete_user(&self, session: &mut Session, id: &str) -> AppResult<()> {
        let admin_id = self.signed_in_admin(session).await?.id;
        if !self.store.delete_user(id).await? {
            return Err(user_not_found(id));
        }

        if id == admin_id {
            *session = Session::LoggedOut;
        }
        tracing::info!("User {} deleted along with their records", id);
        Ok(())
    }

    /// The stored account behind `session`, never the cached copy.
    async fn signed_in(&self, session: &Session) -> AppResult<PublicUser> {
        let cached = session.current_user()?;
        let user = self.store.get_user(&cached.id).await?.ok_or_else(|| {
            tracing::warn!("Session for deleted account {} rejected", cached.id);
            AuthError::NotAuthenticated
        })?;

        if user.is_disabled {
            tracing::warn!("Session for disabled account {} rejected", user.username);
            return Err(AuthError::Disabled.into());
        }
        Ok(user)
    }

    async fn signed_in_admin(&self, session: &Session) -> AppResult<PublicUser> {
        let user = self.signed_in(session).await?;
        if !user.is_admin() {
            return Err(AppError::Forbidden("Admin access required".into()));
        }
        Ok(user)
    }

    fn rederive(&self, stored: &ProductionRecord, patch: &RecordPatch) -> RecordPatch {
        let task = patch.task_name().unwrap_or(stored.task.as_str());
        let count = patch.count.unwrap_or_else(|| i64::from(stored.count));

        match self.catalog.duration(task) {
            Some(time @ TaskTime::Fixed(_)) => RecordPatch {
                total_utilization: compute_utilization(time, Some(count)),
                ..patch.clone()
            },
            _ => patch.clone(),
        }
    }

    async fn owned_record(&self, session: &Session, id: &str) -> AppResult<ProductionRecord> {
        let user = self.signed_in(session).await?;
        let record = self
            .store
            .get_record(id)
            .await?
            .ok_or_else(|| record_not_found(id))?;

        if !user.is_admin() && record.user_id != user.id {
            tracing::warn!("{} tried to touch record {} owned by {}", user.username, id, record.user_id);
            return Err(record_not_found(id));
        }
        Ok(record)
    }

    async fn ensure_username_free(&self, username: &str, except_id: Option<&str>) -> AppResult<()> {
        let taken = self
            .store
            .list_users()
            .await?
            .iter()
            .any(|u| u.username == username && Some(u.id.as_str()) != except_id);
        if taken {
            return Err(AppError::Conflict("Username already taken".into()));
        }
        Ok(())
    }
}

fn record_not_found(id: &str) -> AppError {
    tracing::warn!("Record {} not found", id);
    AppError::NotFound("Record not found".into())
}

fn user_not_found(id: &str) -> AppError {
    tracing::warn!("User {} not found", id);
    AppError::NotFound("User not found".into())
}
