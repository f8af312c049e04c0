use serde::Deserialize;
use validator::Validate;

use crate::domain::log::{NewLog, NewMedia, UpdateLog};
use crate::domain::types::{LogContent, MediaType, ProjectId, UserId};
use crate::forms::FormError;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct MediaForm {
    #[validate(length(min = 1, max = 1024))]
    pub file_path: String,
    #[serde(default)]
    pub thumbnail_path: Option<String>,
    pub media_type: String,
    #[serde(default)]
    pub sort_order: i32,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateLogForm {
    pub project_id: String,
    #[validate(length(min = 1))]
    pub content: String,
    #[serde(default)]
    #[validate(nested)]
    pub media: Vec<MediaForm>,
}

/// Validated log creation request, not yet bound to an author.
#[derive(Debug, Clone)]
pub struct CreateLogPayload {
    pub project_id: ProjectId,
    pub content: LogContent,
    pub media: Vec<NewMedia>,
}

impl TryFrom<CreateLogForm> for CreateLogPayload {
    type Error = FormError;

    fn try_from(form: CreateLogForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let media = form
            .media
            .into_iter()
            .map(|item| -> Result<NewMedia, FormError> {
                let media_type = item.media_type.parse::<MediaType>()?;
                Ok(NewMedia::new(
                    item.file_path,
                    item.thumbnail_path,
                    media_type,
                    item.sort_order,
                ))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            project_id: ProjectId::parse(&form.project_id)?,
            content: LogContent::new(form.content)?,
            media,
        })
    }
}

impl CreateLogPayload {
    pub fn into_domain(self, author: UserId) -> NewLog {
        NewLog::new(author, self.project_id, self.content, self.media)
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateLogForm {
    #[validate(length(min = 1))]
    pub content: String,
}

impl TryFrom<UpdateLogForm> for UpdateLog {
    type Error = FormError;

    fn try_from(form: UpdateLogForm) -> Result<Self, Self::Error> {
        form.validate()?;
        Ok(UpdateLog {
            content: LogContent::new(form.content)?,
        })
    }
}
