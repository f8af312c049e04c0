use serde::Deserialize;
use validator::Validate;

use crate::domain::types::TagName;
use crate::forms::FormError;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct TagForm {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
}

impl TryFrom<TagForm> for TagName {
    type Error = FormError;

    fn try_from(form: TagForm) -> Result<Self, Self::Error> {
        form.validate()?;
        Ok(TagName::new(form.name)?)
    }
}
