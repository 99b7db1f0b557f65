use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Full user record as stored, including the password hash. Never serialized
/// to clients directly; use [`PublicUser`] for responses.
#[derive(Debug, Clone, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
    pub picture_path: String,
    pub friends: Vec<Uuid>,
    pub location: String,
    pub occupation: String,
    pub viewed_profile: i32,
    pub impressions: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Flip `friend` in a friends list. Returns whether the friend is present
    /// after the toggle.
    pub fn toggle_friend(friends: &mut Vec<Uuid>, friend: Uuid) -> bool {
        if let Some(pos) = friends.iter().position(|f| *f == friend) {
            friends.remove(pos);
            false
        } else {
            friends.push(friend);
            true
        }
    }
}

/// Client-facing view of a user: everything except the password hash.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub picture_path: String,
    pub friends: Vec<Uuid>,
    pub location: String,
    pub occupation: String,
    pub viewed_profile: i32,
    pub impressions: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            picture_path: user.picture_path,
            friends: user.friends,
            location: user.location,
            occupation: user.occupation,
            viewed_profile: user.viewed_profile,
            impressions: user.impressions,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Compact display fields used when listing a user's friends.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FriendSummary {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub occupation: String,
    pub location: String,
    pub picture_path: String,
}

impl From<User> for FriendSummary {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            occupation: user.occupation,
            location: user.location,
            picture_path: user.picture_path,
        }
    }
}
