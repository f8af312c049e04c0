use chrono::{NaiveDateTime, Utc};
use diesel::prelude::*;

use crate::domain::interaction::{
    Comment as DomainComment, Like as DomainLike, NewComment as DomainNewComment,
    NewLike as DomainNewLike, UpdateComment as DomainUpdateComment,
};
use crate::domain::types::{CommentBody, CommentId, LogId, TypeConstraintError, UserId};

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::comments)]
/// Diesel model for [`crate::domain::interaction::Comment`].
pub struct Comment {
    pub id: String,
    pub user_profile_id: String,
    pub log_id: String,
    pub body: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub deleted_at: Option<NaiveDateTime>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::comments)]
pub struct NewComment<'a> {
    pub id: String,
    pub user_profile_id: String,
    pub log_id: String,
    pub body: &'a str,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::comments)]
pub struct UpdateComment<'a> {
    pub body: &'a str,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Queryable)]
#[diesel(table_name = crate::schema::likes)]
pub struct Like {
    pub user_profile_id: String,
    pub log_id: String,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::likes)]
pub struct NewLike {
    pub user_profile_id: String,
    pub log_id: String,
}

impl TryFrom<Comment> for DomainComment {
    type Error = TypeConstraintError;

    fn try_from(comment: Comment) -> Result<Self, Self::Error> {
        Ok(Self {
            id: CommentId::parse(&comment.id)?,
            user_profile_id: UserId::parse(&comment.user_profile_id)?,
            log_id: LogId::parse(&comment.log_id)?,
            body: CommentBody::new(comment.body)?,
            created_at: comment.created_at,
            updated_at: comment.updated_at,
            deleted_at: comment.deleted_at,
        })
    }
}

impl TryFrom<Like> for DomainLike {
    type Error = TypeConstraintError;

    fn try_from(like: Like) -> Result<Self, Self::Error> {
        Ok(Self {
            user_profile_id: UserId::parse(&like.user_profile_id)?,
            log_id: LogId::parse(&like.log_id)?,
            created_at: like.created_at,
        })
    }
}

impl<'a> From<&'a DomainNewComment> for NewComment<'a> {
    fn from(comment: &'a DomainNewComment) -> Self {
        Self {
            id: comment.id.to_string(),
            user_profile_id: comment.user_profile_id.to_string(),
            log_id: comment.log_id.to_string(),
            body: comment.body.as_str(),
        }
    }
}

impl<'a> From<&'a DomainUpdateComment> for UpdateComment<'a> {
    fn from(comment: &'a DomainUpdateComment) -> Self {
        Self {
            body: comment.body.as_str(),
            updated_at: Utc::now().naive_utc(),
        }
    }
}

impl From<&DomainNewLike> for NewLike {
    fn from(like: &DomainNewLike) -> Self {
        Self {
            user_profile_id: like.user_profile_id.to_string(),
            log_id: like.log_id.to_string(),
        }
    }
}
