use chrono::{NaiveDateTime, Utc};
use diesel::prelude::*;

use crate::domain::types::{TypeConstraintError, UserId};
use crate::domain::user_profile::{
    NewUserProfile as DomainNewUserProfile, UpdateUserProfile as DomainUpdateUserProfile,
    UserProfile as DomainUserProfile,
};

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::user_profiles)]
#[diesel(primary_key(user_id))]
/// Diesel model for [`crate::domain::user_profile::UserProfile`].
pub struct UserProfile {
    pub user_id: String,
    pub bio: String,
    pub follower_count: i32,
    pub following_count: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub deleted_at: Option<NaiveDateTime>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::user_profiles)]
pub struct NewUserProfile<'a> {
    pub user_id: String,
    pub bio: &'a str,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::user_profiles)]
pub struct UpdateUserProfile<'a> {
    pub bio: &'a str,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<UserProfile> for DomainUserProfile {
    type Error = TypeConstraintError;

    fn try_from(profile: UserProfile) -> Result<Self, Self::Error> {
        Ok(Self {
            user_id: UserId::parse(&profile.user_id)?,
            bio: profile.bio,
            follower_count: profile.follower_count,
            following_count: profile.following_count,
            created_at: profile.created_at,
            updated_at: profile.updated_at,
            deleted_at: profile.deleted_at,
        })
    }
}

impl<'a> From<&'a DomainNewUserProfile> for NewUserProfile<'a> {
    fn from(profile: &'a DomainNewUserProfile) -> Self {
        Self {
            user_id: profile.user_id.to_string(),
            bio: profile.bio.as_str(),
        }
    }
}

impl<'a> From<&'a DomainUpdateUserProfile> for UpdateUserProfile<'a> {
    fn from(profile: &'a DomainUpdateUserProfile) -> Self {
        Self {
            bio: profile.bio.as_str(),
            updated_at: Utc::now().naive_utc(),
        }
    }
}
