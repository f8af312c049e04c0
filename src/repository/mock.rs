//! Mock repository implementations for isolating services in tests.

use mockall::mock;

use crate::domain::interaction::{Comment, Like, NewComment, NewLike, UpdateComment};
use crate::domain::log::{Log, NewLog, UpdateLog};
use crate::domain::project::{NewProject, Project, UpdateProject};
use crate::domain::tag::{NewTag, Tag, UpdateTag};
use crate::domain::types::{CommentId, LogId, ProjectId, TagId, UserId};
use crate::domain::user_profile::{NewUserProfile, UpdateUserProfile, UserProfile};
use crate::pagination::{Paginated, PaginationRequest};
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    CommentListQuery, InteractionReader, InteractionWriter, LogListQuery, LogReader, LogWriter,
    ProjectListQuery, ProjectReader, ProjectWriter, TagReader, TagWriter, UserProfileReader,
    UserProfileWriter,
};

mock! {
    pub Repository {}

    impl UserProfileReader for Repository {
        fn get_profile_by_id(&self, user_id: UserId) -> RepositoryResult<Option<UserProfile>>;
    }

    impl UserProfileWriter for Repository {
        fn create_profile(&self, new_profile: &NewUserProfile) -> RepositoryResult<UserProfile>;
        fn update_profile(
            &self,
            user_id: UserId,
            updates: &UpdateUserProfile,
        ) -> RepositoryResult<UserProfile>;
    }

    impl ProjectReader for Repository {
        fn get_project_by_id(&self, id: ProjectId) -> RepositoryResult<Option<Project>>;
        fn get_project_by_slug(&self, slug: &str) -> RepositoryResult<Option<Project>>;
        fn list_projects(&self, query: ProjectListQuery) -> RepositoryResult<Paginated<Project>>;
    }

    impl ProjectWriter for Repository {
        fn create_project(&self, new_project: &NewProject) -> RepositoryResult<Project>;
        fn update_project(
            &self,
            id: ProjectId,
            updates: &UpdateProject,
        ) -> RepositoryResult<Project>;
        fn delete_project(&self, id: ProjectId) -> RepositoryResult<()>;
    }

    impl TagReader for Repository {
        fn get_tag_by_id(&self, id: TagId) -> RepositoryResult<Option<Tag>>;
        fn list_tags(&self, pagination: PaginationRequest) -> RepositoryResult<Paginated<Tag>>;
    }

    impl TagWriter for Repository {
        fn create_tag(&self, new_tag: &NewTag) -> RepositoryResult<Tag>;
        fn update_tag(&self, id: TagId, updates: &UpdateTag) -> RepositoryResult<Tag>;
        fn delete_tag(&self, id: TagId) -> RepositoryResult<()>;
    }

    impl LogReader for Repository {
        fn get_log_by_id(&self, id: LogId) -> RepositoryResult<Option<Log>>;
        fn list_logs(&self, query: LogListQuery) -> RepositoryResult<Paginated<Log>>;
    }

    impl LogWriter for Repository {
        fn create_log(&self, new_log: &NewLog) -> RepositoryResult<Log>;
        fn update_log(&self, id: LogId, updates: &UpdateLog) -> RepositoryResult<Log>;
        fn delete_log(&self, id: LogId) -> RepositoryResult<()>;
    }

    impl InteractionReader for Repository {
        fn list_likes(&self, log_id: LogId) -> RepositoryResult<Vec<Like>>;
        fn get_comment_by_id(&self, id: CommentId) -> RepositoryResult<Option<Comment>>;
        fn list_comments(&self, query: CommentListQuery) -> RepositoryResult<Paginated<Comment>>;
    }

    impl InteractionWriter for Repository {
        fn create_like(&self, new_like: &NewLike) -> RepositoryResult<Like>;
        fn delete_like(&self, user_profile_id: UserId, log_id: LogId) -> RepositoryResult<()>;
        fn create_comment(&self, new_comment: &NewComment) -> RepositoryResult<Comment>;
        fn update_comment(
            &self,
            id: CommentId,
            updates: &UpdateComment,
        ) -> RepositoryResult<Comment>;
        fn delete_comment(&self, id: CommentId) -> RepositoryResult<()>;
    }
}
