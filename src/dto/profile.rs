use serde::Serialize;

use crate::domain::user_profile::UserProfile;
use crate::dto::auth::AccountUser;

/// The caller's profile combined with their account data.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileWithAccount {
    #[serde(flatten)]
    pub profile: UserProfile,
    pub user: AccountUser,
}
