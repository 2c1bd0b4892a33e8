use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::repo_types::{NewUser, User, UserChanges};
use super::store::{StoreError, UserStore};

/// `users` table on Postgres.
#[derive(Clone)]
pub struct PgUserStore {
    db: PgPool,
}

impl PgUserStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::RowNotFound => StoreError::NotFound,
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                StoreError::Conflict(db.message().to_string())
            }
            other => StoreError::Unavailable(other.to_string()),
        }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_all(&self) -> Result<Vec<User>, StoreError> {
        let rows = sqlx::query_as::<_, User>(
            r#"
            SELECT uid, name, email, phone, address, profile_pic, is_active, created_at, updated_at
            FROM users
            ORDER BY created_at ASC
            "#,
        )
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }

    async fn find_by_id(&self, uid: Uuid) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT uid, name, email, phone, address, profile_pic, is_active, created_at, updated_at
            FROM users
            WHERE uid = $1
            "#,
        )
        .bind(uid)
        .fetch_optional(&self.db)
        .await?;
        Ok(user)
    }

    async fn insert(&self, new: NewUser) -> Result<User, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, phone, address, profile_pic)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING uid, name, email, phone, address, profile_pic, is_active, created_at, updated_at
            "#,
        )
        .bind(new.name)
        .bind(new.email)
        .bind(new.phone)
        .bind(new.address)
        .bind(new.profile_pic) // Option<String> → NULL allowed
        .fetch_one(&self.db)
        .await?;
        Ok(user)
    }

    async fn update(&self, uid: Uuid, changes: UserChanges) -> Result<User, StoreError> {
        // COALESCE keeps the stored value for every field the caller left out
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
               SET name        = COALESCE($2, name),
                   email       = COALESCE($3, email),
                   phone       = COALESCE($4, phone),
                   address     = COALESCE($5, address),
                   profile_pic = COALESCE($6, profile_pic),
                   is_active   = COALESCE($7, is_active),
                   updated_at  = now()
             WHERE uid = $1
            RETURNING uid, name, email, phone, address, profile_pic, is_active, created_at, updated_at
            "#,
        )
        .bind(uid)
        .bind(changes.name)
        .bind(changes.email)
        .bind(changes.phone)
        .bind(changes.address)
        .bind(changes.profile_pic)
        .bind(changes.is_active)
        .fetch_optional(&self.db)
        .await?;
        user.ok_or(StoreError::NotFound)
    }

    async fn delete(&self, uid: Uuid) -> Result<(), StoreError> {
        let res = sqlx::query("DELETE FROM users WHERE uid = $1")
            .bind(uid)
            .execute(&self.db)
            .await?;
        if res.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ana() -> NewUser {
        NewUser {
            name: "Ana".into(),
            email: "a@x.com".into(),
            phone: "1".into(),
            address: "St 1".into(),
            profile_pic: Some("https://img.local/ana.png".into()),
        }
    }

    #[test]
    fn row_not_found_maps_to_not_found() {
        assert!(matches!(StoreError::from(sqlx::Error::RowNotFound), StoreError::NotFound));
    }

    #[test]
    fn pool_errors_map_to_unavailable() {
        let err = StoreError::from(sqlx::Error::PoolTimedOut);
        assert!(matches!(err, StoreError::Unavailable(_)));
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL pointing at a Postgres server"]
    async fn insert_find_update_delete(pool: PgPool) -> anyhow::Result<()> {
        let store = PgUserStore::new(pool);

        let user = store.insert(ana()).await?;
        assert!(user.is_active);
        assert_eq!(store.find_by_id(user.uid).await?, Some(user.clone()));

        let changes = UserChanges { is_active: Some(false), ..Default::default() };
        let updated = store.update(user.uid, changes).await?;
        assert!(!updated.is_active);
        assert_eq!(updated.name, user.name);
        assert_eq!(updated.profile_pic, user.profile_pic);

        store.delete(user.uid).await?;
        assert!(store.find_by_id(user.uid).await?.is_none());
        assert!(matches!(store.delete(user.uid).await, Err(StoreError::NotFound)));
        Ok(())
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL pointing at a Postgres server"]
    async fn duplicate_email_is_conflict(pool: PgPool) -> anyhow::Result<()> {
        let store = PgUserStore::new(pool);
        store.insert(ana()).await?;
        assert!(matches!(store.insert(ana()).await, Err(StoreError::Conflict(_))));
        Ok(())
    }
}
