use serde::Deserialize;
use validator::Validate;

use crate::domain::types::UserId;
use crate::domain::user_profile::{NewUserProfile, UpdateUserProfile};
use crate::forms::FormError;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateProfileForm {
    pub user_id: String,
    #[serde(default)]
    #[validate(length(max = 1000))]
    pub bio: Option<String>,
}

impl TryFrom<CreateProfileForm> for NewUserProfile {
    type Error = FormError;

    fn try_from(form: CreateProfileForm) -> Result<Self, Self::Error> {
        form.validate()?;
        Ok(NewUserProfile::new(UserId::parse(&form.user_id)?, form.bio))
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateProfileForm {
    #[validate(length(max = 1000))]
    pub bio: String,
}

impl TryFrom<UpdateProfileForm> for UpdateUserProfile {
    type Error = FormError;

    fn try_from(form: UpdateProfileForm) -> Result<Self, Self::Error> {
        form.validate()?;
        Ok(UpdateUserProfile::new(ammonia::clean(&form.bio)))
    }
}
