//! Log entry workflows. Only the project owner may post, and only the
//! author may edit or delete.

use crate::domain::log::{Log, UpdateLog};
use crate::domain::types::{LogId, ProjectId};
use crate::forms::logs::{CreateLogForm, CreateLogPayload, UpdateLogForm};
use crate::models::auth::AuthenticatedUser;
use crate::pagination::{Paginated, PaginationRequest};
use crate::repository::{LogListQuery, LogReader, LogWriter, ProjectReader};
use crate::services::{ServiceError, ServiceResult};

pub fn list_project_logs<R>(
    repo: &R,
    project_id: &str,
    pagination: PaginationRequest,
) -> ServiceResult<Paginated<Log>>
where
    R: LogReader + ProjectReader + ?Sized,
{
    let project_id = ProjectId::parse(project_id)?;
    match repo.get_project_by_id(project_id)? {
        Some(project) if project.is_public => {}
        _ => return Err(ServiceError::not_found("project")),
    }

    Ok(repo.list_logs(LogListQuery::new(project_id).paginate(pagination))?)
}

pub fn get_log<R>(repo: &R, id: &str) -> ServiceResult<Log>
where
    R: LogReader + ?Sized,
{
    let id = LogId::parse(id)?;
    repo.get_log_by_id(id)?
        .ok_or_else(|| ServiceError::not_found("log"))
}

pub fn create_log<R>(repo: &R, user: &AuthenticatedUser, form: CreateLogForm) -> ServiceResult<Log>
where
    R: LogWriter + ProjectReader + ?Sized,
{
    let payload = CreateLogPayload::try_from(form)?;

    let project = repo
        .get_project_by_id(payload.project_id)?
        .ok_or_else(|| ServiceError::not_found("project"))?;
    if !project.is_owned_by(user.user_id) {
        return Err(ServiceError::Unauthorized(
            "unauthorized, you do not own this project".to_string(),
        ));
    }

    let new_log = payload.into_domain(user.user_id);
    repo.create_log(&new_log).map_err(|e| {
        log::error!("Failed to create log in project {}: {e}", project.id);
        ServiceError::from(e)
    })
}

fn authored_log<R>(repo: &R, user: &AuthenticatedUser, id: &str) -> ServiceResult<Log>
where
    R: LogReader + ?Sized,
{
    let log = get_log(repo, id)?;
    if log.user_profile_id != user.user_id {
        return Err(ServiceError::Unauthorized(
            "unauthorized, you are not the author of this log".to_string(),
        ));
    }
    Ok(log)
}

pub fn update_log<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: &str,
    form: UpdateLogForm,
) -> ServiceResult<Log>
where
    R: LogReader + LogWriter + ?Sized,
{
    let existing = authored_log(repo, user, id)?;
    let updates = UpdateLog::try_from(form)?;
    repo.update_log(existing.id, &updates)
        .map_err(ServiceError::from)
}

pub fn delete_log<R>(repo: &R, user: &AuthenticatedUser, id: &str) -> ServiceResult<()>
where
    R: LogReader + LogWriter + ?Sized,
{
    let existing = authored_log(repo, user, id)?;
    repo.delete_log(existing.id).map_err(ServiceError::from)
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::project::Project;
    use crate::domain::types::{LogContent, ProjectTitle, Slug, UserId};
    use crate::repository::mock::MockRepository;

    fn user() -> AuthenticatedUser {
        AuthenticatedUser {
            user_id: UserId::new(),
            email: "maker@example.com".to_string(),
            role_id: 2,
            provider: None,
            session_id: None,
            mfa_completed: false,
        }
    }

    fn project(owner: UserId) -> Project {
        let now = Utc::now().naive_utc();
        Project {
            id: ProjectId::new(),
            user_id: owner,
            title: ProjectTitle::new("Garden shed").unwrap(),
            description: String::new(),
            slug: Slug::from_title("Garden shed"),
            is_public: true,
            created_at: now,
            updated_at: now,
            deleted_at: None,
            tags: vec![],
        }
    }

    fn log(author: UserId) -> Log {
        let now = Utc::now().naive_utc();
        Log {
            id: LogId::new(),
            user_profile_id: author,
            project_id: ProjectId::new(),
            content: LogContent::new("Framed the walls").unwrap(),
            like_count: 0,
            comment_count: 0,
            created_at: now,
            updated_at: now,
            deleted_at: None,
            media: vec![],
            comments: vec![],
        }
    }

    #[test]
    fn posting_into_foreign_project_is_unauthorized() {
        let mut repo = MockRepository::new();
        let foreign = project(UserId::new());
        let project_id = foreign.id;
        repo.expect_get_project_by_id()
            .returning(move |_| Ok(Some(foreign.clone())));
        repo.expect_create_log().times(0);

        let form = CreateLogForm {
            project_id: project_id.to_string(),
            content: "Day one".to_string(),
            media: vec![],
        };
        let result = create_log(&repo, &user(), form);

        assert!(matches!(result, Err(ServiceError::Unauthorized(_))));
    }

    #[test]
    fn owner_posts_log_as_author() {
        let mut repo = MockRepository::new();
        let caller = user();
        let own = project(caller.user_id);
        let project_id = own.id;
        let author = caller.user_id;
        repo.expect_get_project_by_id()
            .returning(move |_| Ok(Some(own.clone())));
        repo.expect_create_log()
            .withf(move |new_log| {
                new_log.user_profile_id == author && new_log.project_id == project_id
            })
            .times(1)
            .returning(move |_| Ok(log(author)));

        let form = CreateLogForm {
            project_id: project_id.to_string(),
            content: "Day one".to_string(),
            media: vec![],
        };
        create_log(&repo, &caller, form).unwrap();
    }

    #[test]
    fn only_author_can_delete() {
        let mut repo = MockRepository::new();
        let stored = log(UserId::new());
        let id = stored.id;
        repo.expect_get_log_by_id()
            .returning(move |_| Ok(Some(stored.clone())));
        repo.expect_delete_log().times(0);

        let result = delete_log(&repo, &user(), &id.to_string());

        assert!(matches!(result, Err(ServiceError::Unauthorized(_))));
    }

    #[test]
    fn listing_logs_of_missing_project_is_not_found() {
        let mut repo = MockRepository::new();
        repo.expect_get_project_by_id().returning(|_| Ok(None));
        repo.expect_list_logs().times(0);

        let result = list_project_logs(
            &repo,
            &ProjectId::new().to_string(),
            PaginationRequest::default(),
        );

        assert!(matches!(result, Err(ServiceError::NotFound(_))));
    }
}
