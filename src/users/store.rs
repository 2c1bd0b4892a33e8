use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use super::repo_types::{NewUser, User, UserChanges};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("user not found")]
    NotFound,
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Persistence for user records, keyed by `uid`.
///
/// `find_by_id` reports a missing record as `Ok(None)`; `update` and `delete`
/// report it as `StoreError::NotFound`.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_all(&self) -> Result<Vec<User>, StoreError>;
    async fn find_by_id(&self, uid: Uuid) -> Result<Option<User>, StoreError>;
    async fn insert(&self, new: NewUser) -> Result<User, StoreError>;
    async fn update(&self, uid: Uuid, changes: UserChanges) -> Result<User, StoreError>;
    async fn delete(&self, uid: Uuid) -> Result<(), StoreError>;
}

/// Process-local store. Listing order is insertion order.
#[derive(Default)]
pub struct MemoryUserStore {
    rows: RwLock<Vec<User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn email_taken(rows: &[User], email: &str, except: Option<Uuid>) -> bool {
    rows.iter()
        .any(|u| u.email == email && Some(u.uid) != except)
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_all(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.rows.read().await.clone())
    }

    async fn find_by_id(&self, uid: Uuid) -> Result<Option<User>, StoreError> {
        Ok(self.rows.read().await.iter().find(|u| u.uid == uid).cloned())
    }

    async fn insert(&self, new: NewUser) -> Result<User, StoreError> {
        let mut rows = self.rows.write().await;
        if email_taken(&rows, &new.email, None) {
            return Err(StoreError::Conflict(format!("email {} already exists", new.email)));
        }
        let now = OffsetDateTime::now_utc();
        let user = User {
            uid: Uuid::new_v4(),
            name: new.name,
            email: new.email,
            phone: new.phone,
            address: new.address,
            profile_pic: new.profile_pic,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        rows.push(user.clone());
        debug!(uid = %user.uid, "memory store insert");
        Ok(user)
    }

    async fn update(&self, uid: Uuid, changes: UserChanges) -> Result<User, StoreError> {
        let mut rows = self.rows.write().await;
        let idx = rows
            .iter()
            .position(|u| u.uid == uid)
            .ok_or(StoreError::NotFound)?;
        if let Some(email) = changes.email.as_deref() {
            if email_taken(&rows, email, Some(uid)) {
                return Err(StoreError::Conflict(format!("email {} already exists", email)));
            }
        }
        let user = &mut rows[idx];
        changes.apply_to(user);
        user.updated_at = OffsetDateTime::now_utc();
        Ok(user.clone())
    }

    async fn delete(&self, uid: Uuid) -> Result<(), StoreError> {
        let mut rows = self.rows.write().await;
        let idx = rows
            .iter()
            .position(|u| u.uid == uid)
            .ok_or(StoreError::NotFound)?;
        rows.remove(idx);
        Ok(())
    }
}
