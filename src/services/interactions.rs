//! Likes and comments on log entries.

use crate::domain::interaction::{Comment, Like, UpdateComment};
use crate::domain::types::{CommentId, LogId};
use crate::forms::interactions::{CommentForm, LikeForm, UpdateCommentForm};
use crate::models::auth::AuthenticatedUser;
use crate::pagination::{Paginated, PaginationRequest};
use crate::repository::{CommentListQuery, InteractionReader, InteractionWriter, LogReader};
use crate::services::{ServiceError, ServiceResult};

fn ensure_log_exists<R>(repo: &R, log_id: LogId) -> ServiceResult<()>
where
    R: LogReader + ?Sized,
{
    match repo.get_log_by_id(log_id)? {
        Some(_) => Ok(()),
        None => Err(ServiceError::not_found("log")),
    }
}

/// Likes a log once; a second like by the same user is a conflict.
pub fn like_log<R>(repo: &R, user: &AuthenticatedUser, form: LikeForm) -> ServiceResult<Like>
where
    R: InteractionWriter + LogReader + ?Sized,
{
    let new_like = form.into_domain(user.user_id)?;
    ensure_log_exists(repo, new_like.log_id)?;
    repo.create_like(&new_like).map_err(ServiceError::from)
}

pub fn unlike_log<R>(repo: &R, user: &AuthenticatedUser, log_id: &str) -> ServiceResult<()>
where
    R: InteractionWriter + ?Sized,
{
    let log_id = LogId::parse(log_id)?;
    repo.delete_like(user.user_id, log_id).map_err(|e| match ServiceError::from(e) {
        ServiceError::NotFound(_) => ServiceError::not_found("like"),
        other => other,
    })
}

pub fn list_likes<R>(repo: &R, log_id: &str) -> ServiceResult<Vec<Like>>
where
    R: InteractionReader + ?Sized,
{
    let log_id = LogId::parse(log_id)?;
    Ok(repo.list_likes(log_id)?)
}

pub fn create_comment<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: CommentForm,
) -> ServiceResult<Comment>
where
    R: InteractionWriter + LogReader + ?Sized,
{
    let new_comment = form.into_domain(user.user_id)?;
    ensure_log_exists(repo, new_comment.log_id)?;
    repo.create_comment(&new_comment).map_err(|e| {
        log::error!("Failed to comment on log {}: {e}", new_comment.log_id);
        ServiceError::from(e)
    })
}

pub fn list_comments<R>(
    repo: &R,
    log_id: &str,
    pagination: PaginationRequest,
) -> ServiceResult<Paginated<Comment>>
where
    R: InteractionReader + ?Sized,
{
    let log_id = LogId::parse(log_id)?;
    Ok(repo.list_comments(CommentListQuery::new(log_id).paginate(pagination))?)
}

fn own_comment<R>(repo: &R, user: &AuthenticatedUser, id: &str) -> ServiceResult<Comment>
where
    R: InteractionReader + ?Sized,
{
    let id = CommentId::parse(id)?;
    let comment = repo
        .get_comment_by_id(id)?
        .ok_or_else(|| ServiceError::not_found("comment"))?;
    if comment.user_profile_id != user.user_id {
        return Err(ServiceError::Unauthorized(
            "unauthorized, you are not the author of this comment".to_string(),
        ));
    }
    Ok(comment)
}

pub fn update_comment<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: &str,
    form: UpdateCommentForm,
) -> ServiceResult<Comment>
where
    R: InteractionReader + InteractionWriter + ?Sized,
{
    let comment = own_comment(repo, user, id)?;
    let updates = UpdateComment::try_from(form)?;
    repo.update_comment(comment.id, &updates)
        .map_err(ServiceError::from)
}

pub fn delete_comment<R>(repo: &R, user: &AuthenticatedUser, id: &str) -> ServiceResult<()>
where
    R: InteractionReader + InteractionWriter + ?Sized,
{
    let comment = own_comment(repo, user, id)?;
    repo.delete_comment(comment.id).map_err(ServiceError::from)
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::types::{CommentBody, UserId};
    use crate::repository::errors::RepositoryError;
    use crate::repository::mock::MockRepository;

    fn caller() -> AuthenticatedUser {
        AuthenticatedUser {
            user_id: UserId::new(),
            email: "maker@example.com".to_string(),
            role_id: 2,
            provider: None,
            session_id: None,
            mfa_completed: false,
        }
    }

    fn comment(author: UserId) -> Comment {
        let now = Utc::now().naive_utc();
        Comment {
            id: CommentId::new(),
            user_profile_id: author,
            log_id: LogId::new(),
            body: CommentBody::new("Nice joinery").unwrap(),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    #[test]
    fn liking_missing_log_is_not_found() {
        let mut repo = MockRepository::new();
        repo.expect_get_log_by_id().returning(|_| Ok(None));
        repo.expect_create_like().times(0);

        let result = like_log(
            &repo,
            &caller(),
            LikeForm {
                log_id: LogId::new().to_string(),
            },
        );

        assert!(matches!(result, Err(ServiceError::NotFound(_))));
    }

    #[test]
    fn removing_absent_like_reports_like_not_found() {
        let mut repo = MockRepository::new();
        repo.expect_delete_like()
            .returning(|_, _| Err(RepositoryError::NotFound));

        match unlike_log(&repo, &caller(), &LogId::new().to_string()) {
            Err(ServiceError::NotFound(message)) => assert_eq!(message, "like not found"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn editing_foreign_comment_is_unauthorized() {
        let mut repo = MockRepository::new();
        let stored = comment(UserId::new());
        let id = stored.id;
        repo.expect_get_comment_by_id()
            .returning(move |_| Ok(Some(stored.clone())));
        repo.expect_update_comment().times(0);

        let result = update_comment(
            &repo,
            &caller(),
            &id.to_string(),
            UpdateCommentForm {
                body: "edited".to_string(),
            },
        );

        assert!(matches!(result, Err(ServiceError::Unauthorized(_))));
    }

    #[test]
    fn author_deletes_own_comment() {
        let mut repo = MockRepository::new();
        let user = caller();
        let stored = comment(user.user_id);
        let id = stored.id;
        repo.expect_get_comment_by_id()
            .returning(move |_| Ok(Some(stored.clone())));
        repo.expect_delete_comment()
            .withf(move |comment_id| *comment_id == id)
            .times(1)
            .returning(|_| Ok(()));

        delete_comment(&repo, &user, &id.to_string()).unwrap();
    }
}
