use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::interaction::Comment;
use crate::domain::types::{LogContent, LogId, MediaId, MediaType, ProjectId, UserId};

/// A journal entry posted inside a project.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Log {
    pub id: LogId,
    pub user_profile_id: UserId,
    pub project_id: ProjectId,
    pub content: LogContent,
    pub like_count: i32,
    pub comment_count: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    #[serde(skip)]
    pub deleted_at: Option<NaiveDateTime>,
    pub media: Vec<Media>,
    pub comments: Vec<Comment>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Media {
    pub id: MediaId,
    pub log_id: LogId,
    pub file_path: String,
    pub thumbnail_path: String,
    pub media_type: MediaType,
    pub sort_order: i32,
}

#[derive(Clone, Debug)]
pub struct NewMedia {
    pub id: MediaId,
    pub file_path: String,
    pub thumbnail_path: String,
    pub media_type: MediaType,
    pub sort_order: i32,
}

impl NewMedia {
    #[must_use]
    pub fn new(
        file_path: String,
        thumbnail_path: Option<String>,
        media_type: MediaType,
        sort_order: i32,
    ) -> Self {
        Self {
            id: MediaId::new(),
            file_path: file_path.trim().to_string(),
            thumbnail_path: thumbnail_path
                .map(|path| path.trim().to_string())
                .unwrap_or_default(),
            media_type,
            sort_order,
        }
    }
}

/// A log entry and its attachments, written in one transaction.
#[derive(Clone, Debug)]
pub struct NewLog {
    pub id: LogId,
    pub user_profile_id: UserId,
    pub project_id: ProjectId,
    pub content: LogContent,
    pub media: Vec<NewMedia>,
}

impl NewLog {
    #[must_use]
    pub fn new(
        user_profile_id: UserId,
        project_id: ProjectId,
        content: LogContent,
        media: Vec<NewMedia>,
    ) -> Self {
        Self {
            id: LogId::new(),
            user_profile_id,
            project_id,
            content,
            media,
        }
    }
}

#[derive(Clone, Debug)]
pub struct UpdateLog {
    pub content: LogContent,
}
