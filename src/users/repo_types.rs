use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// User record in the database.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub uid: Uuid,                   // assigned by the store, never changes
    pub name: String,
    pub email: String,               // unique index
    pub phone: String,
    pub address: String,
    pub profile_pic: Option<String>, // URL or path, free text
    pub is_active: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// Fields a caller supplies on insert. `is_active` and timestamps are store defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub profile_pic: Option<String>,
}

/// Partial update. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub profile_pic: Option<String>,
    pub is_active: Option<bool>,
}

impl UserChanges {
    pub fn apply_to(self, user: &mut User) {
        if let Some(v) = self.name {
            user.name = v;
        }
        if let Some(v) = self.email {
            user.email = v;
        }
        if let Some(v) = self.phone {
            user.phone = v;
        }
        if let Some(v) = self.address {
            user.address = v;
        }
        if let Some(v) = self.profile_pic {
            user.profile_pic = Some(v);
        }
        if let Some(v) = self.is_active {
            user.is_active = v;
        }
    }
}
