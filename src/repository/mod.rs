//! Persistence layer: reader/writer traits per aggregate and their Diesel
//! implementation over a pooled SQLite connection.

use crate::db::{DbConnection, DbPool, get_connection};
use crate::domain::{
    interaction::{Comment, Like, NewComment, NewLike, UpdateComment},
    log::{Log, NewLog, UpdateLog},
    project::{NewProject, Project, UpdateProject},
    tag::{NewTag, Tag, UpdateTag},
    types::{CommentId, LogId, ProjectId, TagId, UserId},
    user_profile::{NewUserProfile, UpdateUserProfile, UserProfile},
};
use crate::pagination::{Paginated, PaginationRequest};
use crate::repository::errors::RepositoryResult;

pub mod errors;
pub mod interaction;
pub mod log;
#[cfg(feature = "test-mocks")]
pub mod mock;
pub mod project;
pub mod tag;
pub mod user_profile;

/// Sort columns accepted by project listings.
pub const PROJECT_SORT_COLUMNS: &[&str] = &["created_at", "title", "is_public"];
/// Sort columns accepted by log listings.
pub const LOG_SORT_COLUMNS: &[&str] = &["created_at", "updated_at", "like_count", "comment_count"];
/// Sort columns accepted by tag listings.
pub const TAG_SORT_COLUMNS: &[&str] = &["created_at", "name"];
/// Sort columns accepted by comment listings.
pub const COMMENT_SORT_COLUMNS: &[&str] = &["created_at"];

#[derive(Clone)]
/// Diesel-backed repository sharing one connection pool.
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(get_connection(&self.pool)?)
    }
}

/// Which projects a listing covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectScope {
    /// Every public project plus the viewer's private ones.
    VisibleTo(UserId),
    /// All projects owned by the user, public or not.
    OwnedBy(UserId),
    /// Only the public projects of the user.
    PublicOf(UserId),
}

#[derive(Debug, Clone)]
pub struct ProjectListQuery {
    pub scope: ProjectScope,
    pub pagination: PaginationRequest,
}

impl ProjectListQuery {
    pub fn new(scope: ProjectScope) -> Self {
        Self {
            scope,
            pagination: PaginationRequest::default(),
        }
    }

    pub fn paginate(mut self, pagination: PaginationRequest) -> Self {
        self.pagination = pagination;
        self
    }
}

#[derive(Debug, Clone)]
pub struct LogListQuery {
    pub project_id: ProjectId,
    pub pagination: PaginationRequest,
}

impl LogListQuery {
    pub fn new(project_id: ProjectId) -> Self {
        Self {
            project_id,
            pagination: PaginationRequest::default(),
        }
    }

    pub fn paginate(mut self, pagination: PaginationRequest) -> Self {
        self.pagination = pagination;
        self
    }
}

#[derive(Debug, Clone)]
pub struct CommentListQuery {
    pub log_id: LogId,
    pub pagination: PaginationRequest,
}

impl CommentListQuery {
    pub fn new(log_id: LogId) -> Self {
        Self {
            log_id,
            pagination: PaginationRequest::default(),
        }
    }

    pub fn paginate(mut self, pagination: PaginationRequest) -> Self {
        self.pagination = pagination;
        self
    }
}

pub trait UserProfileReader {
    fn get_profile_by_id(&self, user_id: UserId) -> RepositoryResult<Option<UserProfile>>;
}

pub trait UserProfileWriter {
    fn create_profile(&self, new_profile: &NewUserProfile) -> RepositoryResult<UserProfile>;
    fn update_profile(
        &self,
        user_id: UserId,
        updates: &UpdateUserProfile,
    ) -> RepositoryResult<UserProfile>;
}

pub trait ProjectReader {
    fn get_project_by_id(&self, id: ProjectId) -> RepositoryResult<Option<Project>>;
    fn get_project_by_slug(&self, slug: &str) -> RepositoryResult<Option<Project>>;
    fn list_projects(&self, query: ProjectListQuery) -> RepositoryResult<Paginated<Project>>;
}

pub trait ProjectWriter {
    /// Inserts the project and one join row per tag atomically.
    fn create_project(&self, new_project: &NewProject) -> RepositoryResult<Project>;
    /// Updates scalar fields and, for a non-empty tag list, replaces the tag set.
    fn update_project(&self, id: ProjectId, updates: &UpdateProject) -> RepositoryResult<Project>;
    /// Soft deletes the project, its logs, and drops its join rows.
    fn delete_project(&self, id: ProjectId) -> RepositoryResult<()>;
}

pub trait TagReader {
    fn get_tag_by_id(&self, id: TagId) -> RepositoryResult<Option<Tag>>;
    fn list_tags(&self, pagination: PaginationRequest) -> RepositoryResult<Paginated<Tag>>;
}

pub trait TagWriter {
    fn create_tag(&self, new_tag: &NewTag) -> RepositoryResult<Tag>;
    fn update_tag(&self, id: TagId, updates: &UpdateTag) -> RepositoryResult<Tag>;
    fn delete_tag(&self, id: TagId) -> RepositoryResult<()>;
}

pub trait LogReader {
    /// Loads the log with its media and comments.
    fn get_log_by_id(&self, id: LogId) -> RepositoryResult<Option<Log>>;
    fn list_logs(&self, query: LogListQuery) -> RepositoryResult<Paginated<Log>>;
}

pub trait LogWriter {
    fn create_log(&self, new_log: &NewLog) -> RepositoryResult<Log>;
    fn update_log(&self, id: LogId, updates: &UpdateLog) -> RepositoryResult<Log>;
    fn delete_log(&self, id: LogId) -> RepositoryResult<()>;
}

pub trait InteractionReader {
    fn list_likes(&self, log_id: LogId) -> RepositoryResult<Vec<Like>>;
    fn get_comment_by_id(&self, id: CommentId) -> RepositoryResult<Option<Comment>>;
    fn list_comments(&self, query: CommentListQuery) -> RepositoryResult<Paginated<Comment>>;
}

pub trait InteractionWriter {
    /// Records the like and bumps the log's `like_count`.
    fn create_like(&self, new_like: &NewLike) -> RepositoryResult<Like>;
    /// Removes the like and decrements the log's `like_count`.
    fn delete_like(&self, user_profile_id: UserId, log_id: LogId) -> RepositoryResult<()>;
    fn create_comment(&self, new_comment: &NewComment) -> RepositoryResult<Comment>;
    fn update_comment(&self, id: CommentId, updates: &UpdateComment) -> RepositoryResult<Comment>;
    fn delete_comment(&self, id: CommentId) -> RepositoryResult<()>;
}
