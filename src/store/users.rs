use sqlx::PgPool;
use uuid::Uuid;

use super::{is_unique_violation, StoreError};
use crate::models::User;

/// Fields for a user record about to be inserted. The password arrives here
/// already hashed; the raw secret never reaches the store layer.
#[derive(Debug)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
    pub picture_path: String,
    pub location: String,
    pub occupation: String,
    pub viewed_profile: i32,
    pub impressions: i32,
}

/// Insert a new user. The unique constraint on email is the authority for
/// duplicate identities; a violation maps to [`StoreError::Duplicate`].
pub async fn insert(pool: &PgPool, new: NewUser) -> Result<User, StoreError> {
    sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users
            (id, first_name, last_name, email, password_hash, picture_path,
             location, occupation, viewed_profile, impressions)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(&new.first_name)
    .bind(&new.last_name)
    .bind(&new.email)
    .bind(&new.password_hash)
    .bind(&new.picture_path)
    .bind(&new.location)
    .bind(&new.occupation)
    .bind(new.viewed_profile)
    .bind(new.impressions)
    .fetch_one(pool)
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            StoreError::Duplicate(format!("user with email '{}' already exists", new.email))
        } else {
            StoreError::Sqlx(e)
        }
    })
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<User>, StoreError> {
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(user)
}

pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, StoreError> {
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
        .bind(email)
        .fetch_optional(pool)
        .await?;
    Ok(user)
}

/// Fetch several users at once, e.g. a friends list. Order is unspecified.
pub async fn find_by_ids(pool: &PgPool, ids: &[Uuid]) -> Result<Vec<User>, StoreError> {
    if ids.is_empty() {
        return Ok(vec![]);
    }
    let users = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ANY($1)")
        .bind(ids)
        .fetch_all(pool)
        .await?;
    Ok(users)
}

/// Replace a user's friends list in one targeted update.
pub async fn set_friends(pool: &PgPool, id: Uuid, friends: &[Uuid]) -> Result<(), StoreError> {
    let result = sqlx::query("UPDATE users SET friends = $2, updated_at = now() WHERE id = $1")
        .bind(id)
        .bind(friends)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(StoreError::NotFound(format!("user {} not found", id)));
    }
    Ok(())
}
