use sqlx::PgPool;
use uuid::Uuid;

use super::StoreError;
use crate::models::Post;

/// Fields for a post about to be inserted. Author display fields are
/// denormalized from the user record at creation time.
#[derive(Debug)]
pub struct NewPost {
    pub user_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub location: String,
    pub description: String,
    pub picture_path: String,
    pub user_picture_path: String,
}

pub async fn insert(pool: &PgPool, new: NewPost) -> Result<Post, StoreError> {
    let post = sqlx::query_as::<_, Post>(
        r#"
        INSERT INTO posts
            (id, user_id, first_name, last_name, location, description,
             picture_path, user_picture_path)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(new.user_id)
    .bind(&new.first_name)
    .bind(&new.last_name)
    .bind(&new.location)
    .bind(&new.description)
    .bind(&new.picture_path)
    .bind(&new.user_picture_path)
    .fetch_one(pool)
    .await?;
    Ok(post)
}

/// The feed: every post, newest first.
pub async fn all(pool: &PgPool) -> Result<Vec<Post>, StoreError> {
    let posts = sqlx::query_as::<_, Post>("SELECT * FROM posts ORDER BY created_at DESC")
        .fetch_all(pool)
        .await?;
    Ok(posts)
}

pub async fn by_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<Post>, StoreError> {
    let posts = sqlx::query_as::<_, Post>(
        "SELECT * FROM posts WHERE user_id = $1 ORDER BY created_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(posts)
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Post>, StoreError> {
    let post = sqlx::query_as::<_, Post>("SELECT * FROM posts WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(post)
}

/// Flip `user`'s presence in a post's like map in one atomic round trip,
/// returning the updated record. The flip happens inside the store, so
/// concurrent toggles by different users touch different keys and both
/// survive; only same-user races are last-write-wins.
pub async fn toggle_like(pool: &PgPool, id: Uuid, user: Uuid) -> Result<Post, StoreError> {
    sqlx::query_as::<_, Post>(
        r#"
        UPDATE posts
        SET likes = CASE
                WHEN likes ? $2 THEN likes - $2
                ELSE likes || jsonb_build_object($2, true)
            END,
            updated_at = now()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(user.to_string())
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| StoreError::NotFound(format!("post {} not found", id)))
}
