use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::UserId;

/// Public profile attached to an account owned by the auth service.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    pub user_id: UserId,
    pub bio: String,
    pub follower_count: i32,
    pub following_count: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    #[serde(skip)]
    pub deleted_at: Option<NaiveDateTime>,
}

#[derive(Clone, Debug)]
pub struct NewUserProfile {
    pub user_id: UserId,
    pub bio: String,
}

impl NewUserProfile {
    #[must_use]
    pub fn new(user_id: UserId, bio: Option<String>) -> Self {
        Self {
            user_id,
            bio: bio.map(|bio| bio.trim().to_string()).unwrap_or_default(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct UpdateUserProfile {
    pub bio: String,
}

impl UpdateUserProfile {
    #[must_use]
    pub fn new(bio: String) -> Self {
        Self {
            bio: bio.trim().to_string(),
        }
    }
}
