use diesel::prelude::*;

use crate::domain::types::UserId;
use crate::domain::user_profile::{NewUserProfile, UpdateUserProfile, UserProfile};
use crate::models::user_profile::{
    NewUserProfile as DbNewUserProfile, UpdateUserProfile as DbUpdateUserProfile,
    UserProfile as DbUserProfile,
};
use crate::repository::errors::RepositoryResult;
use crate::repository::{DieselRepository, UserProfileReader, UserProfileWriter};
use crate::schema::user_profiles;

impl UserProfileReader for DieselRepository {
    fn get_profile_by_id(&self, user_id: UserId) -> RepositoryResult<Option<UserProfile>> {
        let mut conn = self.conn()?;

        let db_profile = user_profiles::table
            .filter(user_profiles::user_id.eq(user_id.to_string()))
            .filter(user_profiles::deleted_at.is_null())
            .first::<DbUserProfile>(&mut conn)
            .optional()?;

        match db_profile {
            Some(db_profile) => Ok(Some(UserProfile::try_from(db_profile)?)),
            None => Ok(None),
        }
    }
}

impl UserProfileWriter for DieselRepository {
    fn create_profile(&self, new_profile: &NewUserProfile) -> RepositoryResult<UserProfile> {
        let mut conn = self.conn()?;

        let db_new_profile: DbNewUserProfile = new_profile.into();
        let db_profile = diesel::insert_into(user_profiles::table)
            .values(&db_new_profile)
            .get_result::<DbUserProfile>(&mut conn)?;

        Ok(UserProfile::try_from(db_profile)?)
    }

    fn update_profile(
        &self,
        user_id: UserId,
        updates: &UpdateUserProfile,
    ) -> RepositoryResult<UserProfile> {
        let mut conn = self.conn()?;

        let changes: DbUpdateUserProfile = updates.into();
        let db_profile = diesel::update(
            user_profiles::table
                .filter(user_profiles::user_id.eq(user_id.to_string()))
                .filter(user_profiles::deleted_at.is_null()),
        )
        .set(&changes)
        .get_result::<DbUserProfile>(&mut conn)?;

        Ok(UserProfile::try_from(db_profile)?)
    }
}
