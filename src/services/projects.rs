//! Project workflows: visibility rules, ownership checks and tag validation.

use crate::domain::project::Project;
use crate::domain::types::{ProjectId, TagId, UserId};
use crate::forms::projects::{ProjectForm, ProjectPayload};
use crate::models::auth::AuthenticatedUser;
use crate::pagination::{Paginated, PaginationRequest};
use crate::repository::{ProjectListQuery, ProjectReader, ProjectScope, ProjectWriter, TagReader};
use crate::services::{ServiceError, ServiceResult};

/// Public projects plus the caller's private ones.
pub fn list_visible_projects<R>(
    repo: &R,
    user: &AuthenticatedUser,
    pagination: PaginationRequest,
) -> ServiceResult<Paginated<Project>>
where
    R: ProjectReader + ?Sized,
{
    let query = ProjectListQuery::new(ProjectScope::VisibleTo(user.user_id)).paginate(pagination);
    Ok(repo.list_projects(query)?)
}

pub fn list_own_projects<R>(
    repo: &R,
    user: &AuthenticatedUser,
    pagination: PaginationRequest,
) -> ServiceResult<Paginated<Project>>
where
    R: ProjectReader + ?Sized,
{
    let query = ProjectListQuery::new(ProjectScope::OwnedBy(user.user_id)).paginate(pagination);
    Ok(repo.list_projects(query)?)
}

/// Public projects of another user.
pub fn list_user_projects<R>(
    repo: &R,
    user_id: &str,
    pagination: PaginationRequest,
) -> ServiceResult<Paginated<Project>>
where
    R: ProjectReader + ?Sized,
{
    let owner = UserId::parse(user_id)?;
    let query = ProjectListQuery::new(ProjectScope::PublicOf(owner)).paginate(pagination);
    Ok(repo.list_projects(query)?)
}

/// Private projects are reported as missing to everyone but their owner.
fn visible_to(project: Option<Project>, user: &AuthenticatedUser) -> ServiceResult<Project> {
    match project {
        Some(project) if project.is_public || project.is_owned_by(user.user_id) => Ok(project),
        _ => Err(ServiceError::not_found("project")),
    }
}

pub fn get_project<R>(repo: &R, user: &AuthenticatedUser, id: &str) -> ServiceResult<Project>
where
    R: ProjectReader + ?Sized,
{
    let id = ProjectId::parse(id)?;
    visible_to(repo.get_project_by_id(id)?, user)
}

pub fn get_project_by_slug<R>(
    repo: &R,
    user: &AuthenticatedUser,
    slug: &str,
) -> ServiceResult<Project>
where
    R: ProjectReader + ?Sized,
{
    visible_to(repo.get_project_by_slug(slug.trim())?, user)
}

fn ensure_tags_exist<R>(repo: &R, tag_ids: &[TagId]) -> ServiceResult<()>
where
    R: TagReader + ?Sized,
{
    for tag_id in tag_ids {
        if repo.get_tag_by_id(*tag_id)?.is_none() {
            return Err(ServiceError::Form(format!("tag {tag_id} not found")));
        }
    }
    Ok(())
}

/// Loads a project the caller is allowed to modify.
fn owned_project<R>(repo: &R, user: &AuthenticatedUser, id: &str) -> ServiceResult<Project>
where
    R: ProjectReader + ?Sized,
{
    let id = ProjectId::parse(id)?;
    let project = repo
        .get_project_by_id(id)?
        .ok_or_else(|| ServiceError::not_found("project"))?;

    if !project.is_owned_by(user.user_id) {
        return Err(ServiceError::Unauthorized(
            "unauthorized, you do not own this project".to_string(),
        ));
    }
    Ok(project)
}

/// Creates the project and links it to `tag_ids` in one transaction.
pub fn create_project<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: ProjectForm,
) -> ServiceResult<Project>
where
    R: ProjectWriter + TagReader + ?Sized,
{
    let payload = ProjectPayload::try_from(form)?;
    ensure_tags_exist(repo, &payload.tag_ids)?;

    let new_project = payload.into_new_project(user.user_id);
    repo.create_project(&new_project).map_err(|e| {
        log::error!("Failed to create project for {}: {e}", user.user_id);
        ServiceError::from(e)
    })
}

/// Applies scalar updates; a non-empty `tag_ids` replaces the project's tags.
pub fn update_project<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: &str,
    form: ProjectForm,
) -> ServiceResult<Project>
where
    R: ProjectReader + ProjectWriter + TagReader + ?Sized,
{
    let project = owned_project(repo, user, id)?;
    let payload = ProjectPayload::try_from(form)?;
    ensure_tags_exist(repo, &payload.tag_ids)?;

    let updates = payload.into_update();
    repo.update_project(project.id, &updates).map_err(|e| {
        log::error!("Failed to update project {}: {e}", project.id);
        ServiceError::from(e)
    })
}

pub fn delete_project<R>(repo: &R, user: &AuthenticatedUser, id: &str) -> ServiceResult<()>
where
    R: ProjectReader + ProjectWriter + ?Sized,
{
    let project = owned_project(repo, user, id)?;
    repo.delete_project(project.id).map_err(|e| {
        log::error!("Failed to delete project {}: {e}", project.id);
        ServiceError::from(e)
    })
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::project::{NewProject, UpdateProject};
    use crate::domain::tag::Tag;
    use crate::domain::types::{ProjectTitle, Slug, TagName};
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

    fn project(owner: UserId, is_public: bool) -> Project {
        let now = Utc::now().naive_utc();
        Project {
            id: ProjectId::new(),
            user_id: owner,
            title: ProjectTitle::new("Garden shed").unwrap(),
            description: String::new(),
            slug: Slug::from_title("Garden shed"),
            is_public,
            created_at: now,
            updated_at: now,
            deleted_at: None,
            tags: vec![],
        }
    }

    fn tag(id: TagId) -> Tag {
        let now = Utc::now().naive_utc();
        Tag {
            id,
            name: TagName::new("woodwork").unwrap(),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    fn form(tag_ids: Vec<TagId>) -> ProjectForm {
        ProjectForm {
            title: "Garden shed".to_string(),
            description: "cedar".to_string(),
            is_public: true,
            tag_ids: tag_ids.iter().map(ToString::to_string).collect(),
        }
    }

    #[test]
    fn private_project_is_hidden_from_other_users() {
        let mut repo = MockRepository::new();
        let stored = project(UserId::new(), false);
        let id = stored.id;
        repo.expect_get_project_by_id()
            .returning(move |_| Ok(Some(stored.clone())));

        let result = get_project(&repo, &user(), &id.to_string());

        assert!(matches!(result, Err(ServiceError::NotFound(_))));
    }

    #[test]
    fn malformed_id_is_a_type_error() {
        let mut repo = MockRepository::new();
        repo.expect_get_project_by_id().times(0);

        let result = get_project(&repo, &user(), "17");

        assert!(matches!(result, Err(ServiceError::TypeConstraint(_))));
    }

    #[test]
    fn create_passes_tags_to_repository() {
        let mut repo = MockRepository::new();
        let caller = user();
        let tags = vec![TagId::new(), TagId::new()];
        let expected = tags.clone();

        repo.expect_get_tag_by_id()
            .times(2)
            .returning(|id| Ok(Some(tag(id))));
        repo.expect_create_project()
            .withf(move |new_project: &NewProject| new_project.tag_ids == expected)
            .times(1)
            .returning(move |new_project| {
                let mut created = project(new_project.user_id, true);
                created.id = new_project.id;
                Ok(created)
            });

        let created = create_project(&repo, &caller, form(tags)).unwrap();

        assert_eq!(created.user_id, caller.user_id);
    }

    #[test]
    fn create_with_unknown_tag_is_rejected_before_writing() {
        let mut repo = MockRepository::new();
        repo.expect_get_tag_by_id().returning(|_| Ok(None));
        repo.expect_create_project().times(0);

        let result = create_project(&repo, &user(), form(vec![TagId::new()]));

        assert!(matches!(result, Err(ServiceError::Form(_))));
    }

    #[test]
    fn update_by_non_owner_is_unauthorized() {
        let mut repo = MockRepository::new();
        let stored = project(UserId::new(), true);
        let id = stored.id;
        repo.expect_get_project_by_id()
            .returning(move |_| Ok(Some(stored.clone())));
        repo.expect_update_project().times(0);

        let result = update_project(&repo, &user(), &id.to_string(), form(vec![]));

        assert!(matches!(result, Err(ServiceError::Unauthorized(_))));
    }

    #[test]
    fn update_with_empty_tags_keeps_associations() {
        let mut repo = MockRepository::new();
        let caller = user();
        let stored = project(caller.user_id, true);
        let id = stored.id;
        let returned = stored.clone();
        repo.expect_get_project_by_id()
            .returning(move |_| Ok(Some(stored.clone())));
        repo.expect_update_project()
            .withf(move |project_id, updates: &UpdateProject| {
                *project_id == id && !updates.replaces_tags()
            })
            .times(1)
            .returning(move |_, _| Ok(returned.clone()));

        update_project(&repo, &caller, &id.to_string(), form(vec![])).unwrap();
    }

    #[test]
    fn delete_missing_project_is_not_found() {
        let mut repo = MockRepository::new();
        repo.expect_get_project_by_id().returning(|_| Ok(None));
        repo.expect_delete_project().times(0);

        let result = delete_project(&repo, &user(), &ProjectId::new().to_string());

        assert!(matches!(result, Err(ServiceError::NotFound(_))));
    }
}
