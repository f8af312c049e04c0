use chrono::{NaiveDateTime, Utc};
use diesel::prelude::*;

use crate::domain::log::{
    Log as DomainLog, Media as DomainMedia, NewLog as DomainNewLog, NewMedia as DomainNewMedia,
    UpdateLog as DomainUpdateLog,
};
use crate::domain::types::{
    LogContent, LogId, MediaId, MediaType, ProjectId, TypeConstraintError, UserId,
};

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::logs)]
/// Diesel model for [`crate::domain::log::Log`].
pub struct Log {
    pub id: String,
    pub user_profile_id: String,
    pub project_id: String,
    pub content: String,
    pub like_count: i32,
    pub comment_count: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub deleted_at: Option<NaiveDateTime>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::logs)]
pub struct NewLog<'a> {
    pub id: String,
    pub user_profile_id: String,
    pub project_id: String,
    pub content: &'a str,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::logs)]
pub struct UpdateLog<'a> {
    pub content: &'a str,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::media)]
/// Diesel model for [`crate::domain::log::Media`].
pub struct Media {
    pub id: String,
    pub log_id: String,
    pub file_path: String,
    pub thumbnail_path: String,
    pub media_type: String,
    pub sort_order: i32,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::media)]
pub struct NewMedia<'a> {
    pub id: String,
    pub log_id: String,
    pub file_path: &'a str,
    pub thumbnail_path: &'a str,
    pub media_type: &'static str,
    pub sort_order: i32,
}

impl TryFrom<Log> for DomainLog {
    type Error = TypeConstraintError;

    fn try_from(log: Log) -> Result<Self, Self::Error> {
        Ok(Self {
            id: LogId::parse(&log.id)?,
            user_profile_id: UserId::parse(&log.user_profile_id)?,
            project_id: ProjectId::parse(&log.project_id)?,
            content: LogContent::new(log.content)?,
            like_count: log.like_count,
            comment_count: log.comment_count,
            created_at: log.created_at,
            updated_at: log.updated_at,
            deleted_at: log.deleted_at,
            media: Vec::new(),
            comments: Vec::new(),
        })
    }
}

impl TryFrom<Media> for DomainMedia {
    type Error = TypeConstraintError;

    fn try_from(media: Media) -> Result<Self, Self::Error> {
        Ok(Self {
            id: MediaId::parse(&media.id)?,
            log_id: LogId::parse(&media.log_id)?,
            file_path: media.file_path,
            thumbnail_path: media.thumbnail_path,
            media_type: media.media_type.parse::<MediaType>()?,
            sort_order: media.sort_order,
        })
    }
}

impl<'a> From<&'a DomainNewLog> for NewLog<'a> {
    fn from(log: &'a DomainNewLog) -> Self {
        Self {
            id: log.id.to_string(),
            user_profile_id: log.user_profile_id.to_string(),
            project_id: log.project_id.to_string(),
            content: log.content.as_str(),
        }
    }
}

impl<'a> From<&'a DomainUpdateLog> for UpdateLog<'a> {
    fn from(log: &'a DomainUpdateLog) -> Self {
        Self {
            content: log.content.as_str(),
            updated_at: Utc::now().naive_utc(),
        }
    }
}

impl<'a> NewMedia<'a> {
    pub fn from_domain(log_id: LogId, media: &'a DomainNewMedia) -> Self {
        Self {
            id: media.id.to_string(),
            log_id: log_id.to_string(),
            file_path: media.file_path.as_str(),
            thumbnail_path: media.thumbnail_path.as_str(),
            media_type: media.media_type.as_str(),
            sort_order: media.sort_order,
        }
    }
}
