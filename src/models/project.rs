use chrono::{NaiveDateTime, Utc};
use diesel::prelude::*;

use crate::domain::project::{
    NewProject as DomainNewProject, Project as DomainProject, UpdateProject as DomainUpdateProject,
};
use crate::domain::types::{ProjectId, ProjectTitle, Slug, TypeConstraintError, UserId};

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::projects)]
/// Diesel model for [`crate::domain::project::Project`].
pub struct Project {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub description: String,
    pub slug: String,
    pub is_public: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub deleted_at: Option<NaiveDateTime>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::projects)]
/// Insertable form of [`Project`]; tags are written separately as join rows.
pub struct NewProject<'a> {
    pub id: String,
    pub user_id: String,
    pub title: &'a str,
    pub description: &'a str,
    pub slug: &'a str,
    pub is_public: bool,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::projects)]
pub struct UpdateProject<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub is_public: bool,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Queryable, Insertable, PartialEq, Eq)]
#[diesel(table_name = crate::schema::project_tags)]
/// Join row linking a project to one of its tags.
pub struct ProjectTag {
    pub project_id: String,
    pub tag_id: String,
}

impl TryFrom<Project> for DomainProject {
    type Error = TypeConstraintError;

    /// Tags are attached by the repository after loading the join rows.
    fn try_from(project: Project) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ProjectId::parse(&project.id)?,
            user_id: UserId::parse(&project.user_id)?,
            title: ProjectTitle::new(project.title)?,
            description: project.description,
            slug: Slug::from_stored(project.slug)?,
            is_public: project.is_public,
            created_at: project.created_at,
            updated_at: project.updated_at,
            deleted_at: project.deleted_at,
            tags: Vec::new(),
        })
    }
}

impl<'a> From<&'a DomainNewProject> for NewProject<'a> {
    fn from(project: &'a DomainNewProject) -> Self {
        Self {
            id: project.id.to_string(),
            user_id: project.user_id.to_string(),
            title: project.title.as_str(),
            description: project.description.as_str(),
            slug: project.slug.as_str(),
            is_public: project.is_public,
        }
    }
}

impl<'a> From<&'a DomainUpdateProject> for UpdateProject<'a> {
    fn from(project: &'a DomainUpdateProject) -> Self {
        Self {
            title: project.title.as_str(),
            description: project.description.as_str(),
            is_public: project.is_public,
            updated_at: Utc::now().naive_utc(),
        }
    }
}

impl ProjectTag {
    /// One join row per desired tag.
    pub fn edges(project_id: ProjectId, tag_ids: &[crate::domain::types::TagId]) -> Vec<Self> {
        tag_ids
            .iter()
            .map(|tag_id| Self {
                project_id: project_id.to_string(),
                tag_id: tag_id.to_string(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::TagId;

    #[test]
    fn new_project_maps_scalar_fields() {
        let domain = DomainNewProject::new(
            UserId::new(),
            ProjectTitle::new("Kitchen remodel").unwrap(),
            "cabinets".to_string(),
            false,
            vec![TagId::new()],
        );
        let insertable: NewProject = (&domain).into();
        assert_eq!(insertable.id, domain.id.to_string());
        assert_eq!(insertable.user_id, domain.user_id.to_string());
        assert_eq!(insertable.title, "Kitchen remodel");
        assert_eq!(insertable.slug, domain.slug.as_str());
        assert!(!insertable.is_public);
    }

    #[test]
    fn edges_pair_project_with_every_tag() {
        let project_id = ProjectId::new();
        let tags = [TagId::new(), TagId::new()];
        let edges = ProjectTag::edges(project_id, &tags);
        assert_eq!(edges.len(), 2);
        assert!(edges.iter().all(|edge| edge.project_id == project_id.to_string()));
        assert_eq!(edges[1].tag_id, tags[1].to_string());
    }

    #[test]
    fn stored_project_converts_without_tags() {
        let now = Utc::now().naive_utc();
        let id = ProjectId::new();
        let user_id = UserId::new();
        let db_project = Project {
            id: id.to_string(),
            user_id: user_id.to_string(),
            title: "Garden beds".to_string(),
            description: String::new(),
            slug: "garden-beds-abc123".to_string(),
            is_public: true,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        let project = DomainProject::try_from(db_project).unwrap();
        assert_eq!(project.id, id);
        assert_eq!(project.user_id, user_id);
        assert!(project.tags.is_empty());
    }
}
