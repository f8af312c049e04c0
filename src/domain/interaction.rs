//! Likes and comments left on log entries.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{CommentBody, CommentId, LogId, UserId};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Comment {
    pub id: CommentId,
    pub user_profile_id: UserId,
    pub log_id: LogId,
    pub body: CommentBody,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    #[serde(skip)]
    pub deleted_at: Option<NaiveDateTime>,
}

#[derive(Clone, Debug)]
pub struct NewComment {
    pub id: CommentId,
    pub user_profile_id: UserId,
    pub log_id: LogId,
    pub body: CommentBody,
}

impl NewComment {
    #[must_use]
    pub fn new(user_profile_id: UserId, log_id: LogId, body: CommentBody) -> Self {
        Self {
            id: CommentId::new(),
            user_profile_id,
            log_id,
            body,
        }
    }
}

#[derive(Clone, Debug)]
pub struct UpdateComment {
    pub body: CommentBody,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Like {
    pub user_profile_id: UserId,
    pub log_id: LogId,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NewLike {
    pub user_profile_id: UserId,
    pub log_id: LogId,
}
