use serde::Deserialize;
use validator::Validate;

use crate::domain::project::{NewProject, UpdateProject};
use crate::domain::types::{ProjectTitle, TagId, UserId};
use crate::forms::FormError;

fn default_public() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Validate)]
/// Body of project create and update requests.
pub struct ProjectForm {
    #[validate(length(min = 5, max = 255))]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_public")]
    pub is_public: bool,
    /// Desired tag set. On update an empty list keeps the current tags.
    #[serde(default)]
    pub tag_ids: Vec<String>,
}

/// Validated project fields shared by create and update.
#[derive(Debug, Clone)]
pub struct ProjectPayload {
    pub title: ProjectTitle,
    pub description: String,
    pub is_public: bool,
    pub tag_ids: Vec<TagId>,
}

impl TryFrom<ProjectForm> for ProjectPayload {
    type Error = FormError;

    fn try_from(form: ProjectForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let tag_ids = form
            .tag_ids
            .iter()
            .map(|id| TagId::parse(id))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            title: ProjectTitle::new(form.title)?,
            description: form.description,
            is_public: form.is_public,
            tag_ids,
        })
    }
}

impl ProjectPayload {
    pub fn into_new_project(self, owner: UserId) -> NewProject {
        NewProject::new(
            owner,
            self.title,
            self.description,
            self.is_public,
            self.tag_ids,
        )
    }

    pub fn into_update(self) -> UpdateProject {
        UpdateProject::new(self.title, self.description, self.is_public, self.tag_ids)
    }
}
