//! # Admin account service
//!
//! Credential verification, account CRUD and password changes. Deleting or
//! demoting the last remaining superadmin is rejected; the count check is
//! a plain check-then-act and is deliberately not race-free (the database
//! transaction is the only isolation boundary in this system).

use std::sync::Arc;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    Set,
};
use serde::{Deserialize, Serialize};

use entity::{Admins, admins};

use crate::audit::{AuditAction, AuditEntity, AuditLog};
use crate::auth::middleware::CurrentAdmin;
use crate::auth::password::{hash_password, verify_password};
use crate::error::{ApiError, Result};
use crate::services::snapshot;

const MIN_PASSWORD_LEN: usize = 8;

#[derive(Debug, Deserialize)]
pub struct CreateAdminRequest {
    pub name: String,
    pub username: String,
    pub password: String,
    #[serde(default, rename = "isSuperadmin")]
    pub is_superadmin: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateAdminRequest {
    pub name: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    #[serde(rename = "isSuperadmin")]
    pub is_superadmin: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    #[serde(rename = "oldPassword")]
    pub old_password: Option<String>,
    #[serde(rename = "newPassword")]
    pub new_password: String,
    /// Superadmins may reset another admin's password by id.
    #[serde(rename = "adminId")]
    pub admin_id: Option<i32>,
}

/// Public admin shape; the password hash never leaves the service.
#[derive(Debug, Clone, Serialize)]
pub struct AdminResponse {
    pub id: i32,
    pub name: String,
    pub username: String,
    #[serde(rename = "isSuperadmin")]
    pub is_superadmin: bool,
}

impl From<admins::Model> for AdminResponse {
    fn from(admin: admins::Model) -> Self {
        Self {
            id: admin.id,
            name: admin.name,
            username: admin.username,
            is_superadmin: admin.is_superadmin,
        }
    }
}

pub struct AdminService {
    db: Arc<DatabaseConnection>,
    audit: AuditLog,
}

impl AdminService {
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>, audit: AuditLog) -> Self {
        Self { db, audit }
    }

    /// Verify a username/password pair. Fails closed: unknown usernames
    /// and hash mismatches both return `None`.
    pub async fn verify(&self, username: &str, password: &str) -> Result<Option<admins::Model>> {
        let Some(admin) = Admins::find()
            .filter(admins::Column::Username.eq(username))
            .one(self.db.as_ref())
            .await?
        else {
            tracing::debug!(username, "login attempt for unknown username");
            return Ok(None);
        };

        if verify_password(password, &admin.password_hash) {
            Ok(Some(admin))
        } else {
            tracing::debug!(username, "invalid password");
            Ok(None)
        }
    }

    pub async fn create(
        &self,
        actor: &CurrentAdmin,
        request: CreateAdminRequest,
    ) -> Result<AdminResponse> {
        validate_password(&request.password)?;
        let now = Utc::now().naive_utc();

        let created = admins::ActiveModel {
            name: Set(request.name),
            username: Set(request.username),
            password_hash: Set(hash_password(&request.password)?),
            is_superadmin: Set(request.is_superadmin.unwrap_or(false)),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(self.db.as_ref())
        .await?;

        self.audit
            .record(
                actor.id,
                AuditAction::Create,
                AuditEntity::Admin,
                None,
                snapshot(&created),
            )
            .await;

        Ok(created.into())
    }

    pub async fn list(&self) -> Result<Vec<AdminResponse>> {
        let admins = Admins::find().all(self.db.as_ref()).await?;
        Ok(admins.into_iter().map(Into::into).collect())
    }

    pub async fn get(&self, id: i32) -> Result<AdminResponse> {
        Ok(self.find_model(id).await?.into())
    }

    pub async fn update(
        &self,
        actor: &CurrentAdmin,
        id: i32,
        request: UpdateAdminRequest,
    ) -> Result<AdminResponse> {
        let old = self.find_model(id).await?;

        // Prevent the last superadmin from demoting itself.
        if actor.id == id
            && request.is_superadmin == Some(false)
            && self.count_superadmins().await? <= 1
        {
            return Err(ApiError::forbidden("Cannot demote the last superadmin"));
        }

        let mut active: admins::ActiveModel = old.clone().into();
        if let Some(name) = request.name {
            active.name = Set(name);
        }
        if let Some(username) = request.username {
            active.username = Set(username);
        }
        if let Some(password) = request.password {
            validate_password(&password)?;
            active.password_hash = Set(hash_password(&password)?);
        }
        if let Some(is_superadmin) = request.is_superadmin {
            active.is_superadmin = Set(is_superadmin);
        }
        active.updated_at = Set(Utc::now().naive_utc());

        let updated = active.update(self.db.as_ref()).await?;

        self.audit
            .record(
                actor.id,
                AuditAction::Update,
                AuditEntity::Admin,
                snapshot(&old),
                snapshot(&updated),
            )
            .await;

        Ok(updated.into())
    }

    pub async fn change_password(
        &self,
        actor: &CurrentAdmin,
        request: ChangePasswordRequest,
    ) -> Result<AdminResponse> {
        validate_password(&request.new_password)?;

        // Superadmin resetting another admin's password: no old password.
        if actor.is_superadmin
            && let Some(target_id) = request.admin_id
        {
            let old = self.find_model(target_id).await?;
            return self.store_password(actor, old, &request.new_password).await;
        }

        // Self change: the old password is required and must verify.
        let Some(old_password) = request.old_password.as_deref() else {
            return Err(ApiError::forbidden(
                "Old password is required to change your own password",
            ));
        };

        let old = self.find_model(actor.id).await?;
        if !verify_password(old_password, &old.password_hash) {
            return Err(ApiError::forbidden("Invalid old password"));
        }

        self.store_password(actor, old, &request.new_password).await
    }

    async fn store_password(
        &self,
        actor: &CurrentAdmin,
        old: admins::Model,
        new_password: &str,
    ) -> Result<AdminResponse> {
        let mut active: admins::ActiveModel = old.clone().into();
        active.password_hash = Set(hash_password(new_password)?);
        active.updated_at = Set(Utc::now().naive_utc());
        let updated = active.update(self.db.as_ref()).await?;

        self.audit
            .record(
                actor.id,
                AuditAction::Update,
                AuditEntity::Admin,
                snapshot(&old),
                snapshot(&updated),
            )
            .await;

        Ok(updated.into())
    }

    pub async fn remove(&self, actor: &CurrentAdmin, id: i32) -> Result<AdminResponse> {
        let old = self.find_model(id).await?;

        // Prevent the last superadmin from deleting itself.
        if actor.id == id && self.count_superadmins().await? <= 1 {
            return Err(ApiError::forbidden("Cannot delete the last superadmin"));
        }

        Admins::delete_by_id(id).exec(self.db.as_ref()).await?;

        self.audit
            .record(
                actor.id,
                AuditAction::Delete,
                AuditEntity::Admin,
                snapshot(&old),
                snapshot(&old),
            )
            .await;

        Ok(old.into())
    }

    async fn find_model(&self, id: i32) -> Result<admins::Model> {
        Admins::find_by_id(id)
            .one(self.db.as_ref())
            .await?
            .ok_or_else(|| ApiError::not_found(format!("Admin with ID {id} not found")))
    }

    async fn count_superadmins(&self) -> Result<u64> {
        let count = Admins::find()
            .filter(admins::Column::IsSuperadmin.eq(true))
            .count(self.db.as_ref())
            .await?;
        Ok(count)
    }
}

fn validate_password(password: &str) -> Result<()> {
    if password.len() < MIN_PASSWORD_LEN {
        return Err(ApiError::bad_request(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    Ok(())
}
