use crate::domain::tag::{NewTag, Tag, UpdateTag};
use crate::domain::types::{TagId, TagName};
use crate::forms::tags::TagForm;
use crate::pagination::{Paginated, PaginationRequest};
use crate::repository::{TagReader, TagWriter};
use crate::services::{ServiceError, ServiceResult};

pub fn list_tags<R>(repo: &R, pagination: PaginationRequest) -> ServiceResult<Paginated<Tag>>
where
    R: TagReader + ?Sized,
{
    Ok(repo.list_tags(pagination)?)
}

pub fn get_tag<R>(repo: &R, id: &str) -> ServiceResult<Tag>
where
    R: TagReader + ?Sized,
{
    let id = TagId::parse(id)?;
    repo.get_tag_by_id(id)?
        .ok_or_else(|| ServiceError::not_found("tag"))
}

pub fn create_tag<R>(repo: &R, form: TagForm) -> ServiceResult<Tag>
where
    R: TagWriter + ?Sized,
{
    let name = TagName::try_from(form)?;
    repo.create_tag(&NewTag::new(name)).map_err(|e| {
        log::error!("Failed to create tag: {e}");
        ServiceError::from(e)
    })
}

pub fn update_tag<R>(repo: &R, id: &str, form: TagForm) -> ServiceResult<Tag>
where
    R: TagWriter + ?Sized,
{
    let id = TagId::parse(id)?;
    let name = TagName::try_from(form)?;
    repo.update_tag(id, &UpdateTag { name }).map_err(ServiceError::from)
}

/// Soft deletes the tag and unlinks it from every project.
pub fn delete_tag<R>(repo: &R, id: &str) -> ServiceResult<()>
where
    R: TagWriter + ?Sized,
{
    let id = TagId::parse(id)?;
    repo.delete_tag(id).map_err(ServiceError::from)
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use super::*;
    use crate::repository::errors::RepositoryError;
    use crate::repository::mock::MockRepository;

    #[test]
    fn missing_tag_is_not_found() {
        let mut repo = MockRepository::new();
        repo.expect_get_tag_by_id().times(1).returning(|_| Ok(None));

        let result = get_tag(&repo, &TagId::new().to_string());

        assert!(matches!(result, Err(ServiceError::NotFound(_))));
    }

    #[test]
    fn blank_name_is_rejected() {
        let mut repo = MockRepository::new();
        repo.expect_create_tag().times(0);

        let result = create_tag(
            &repo,
            TagForm {
                name: "   ".to_string(),
            },
        );

        assert!(matches!(result, Err(ServiceError::Form(_))));
    }

    #[test]
    fn deleting_unknown_tag_surfaces_not_found() {
        let mut repo = MockRepository::new();
        repo.expect_delete_tag()
            .times(1)
            .returning(|_| Err(RepositoryError::NotFound));

        let result = delete_tag(&repo, &TagId::new().to_string());

        assert!(matches!(result, Err(ServiceError::NotFound(_))));
    }
}
