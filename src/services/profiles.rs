use crate::domain::types::UserId;
use crate::domain::user_profile::{NewUserProfile, UpdateUserProfile, UserProfile};
use crate::dto::auth::{AccountUser, RegisteredAccount};
use crate::dto::profile::ProfileWithAccount;
use crate::forms::profiles::{CreateProfileForm, UpdateProfileForm};
use crate::models::auth::AuthenticatedUser;
use crate::repository::{UserProfileReader, UserProfileWriter};
use crate::services::{ServiceError, ServiceResult};

pub fn create_profile<R>(repo: &R, form: CreateProfileForm) -> ServiceResult<UserProfile>
where
    R: UserProfileWriter + ?Sized,
{
    let new_profile = NewUserProfile::try_from(form)?;
    repo.create_profile(&new_profile).map_err(|e| {
        log::error!("Failed to create profile for {}: {e}", new_profile.user_id);
        ServiceError::from(e)
    })
}

/// Seeds an empty profile for an account the auth service just created.
pub fn create_registered_profile<R>(
    repo: &R,
    account: &RegisteredAccount,
) -> ServiceResult<UserProfile>
where
    R: UserProfileWriter + ?Sized,
{
    repo.create_profile(&NewUserProfile::new(account.user_id, None))
        .map_err(|e| {
            log::error!(
                "Account {} registered but its profile could not be created: {e}",
                account.user_id
            );
            ServiceError::internal("failed to create user profile")
        })
}

pub fn get_profile<R>(repo: &R, user_id: &str) -> ServiceResult<UserProfile>
where
    R: UserProfileReader + ?Sized,
{
    let user_id = UserId::parse(user_id)?;
    repo.get_profile_by_id(user_id)?
        .ok_or_else(|| ServiceError::not_found("user profile"))
}

/// Attaches the auth service's account record to the matching local profile.
pub fn merge_account<R>(repo: &R, account: AccountUser) -> ServiceResult<ProfileWithAccount>
where
    R: UserProfileReader + ?Sized,
{
    let user_id = UserId::parse(&account.id).map_err(|_| {
        log::error!("Auth service returned malformed account id `{}`", account.id);
        ServiceError::internal("failed to get user")
    })?;
    let profile = repo
        .get_profile_by_id(user_id)?
        .ok_or_else(|| ServiceError::not_found("user profile"))?;

    Ok(ProfileWithAccount {
        profile,
        user: account,
    })
}

/// Only the owner may change a profile.
pub fn update_profile<R>(
    repo: &R,
    user: &AuthenticatedUser,
    user_id: &str,
    form: UpdateProfileForm,
) -> ServiceResult<UserProfile>
where
    R: UserProfileReader + UserProfileWriter + ?Sized,
{
    let user_id = UserId::parse(user_id)?;
    if user_id != user.user_id {
        return Err(ServiceError::Unauthorized(
            "unauthorized, you can only update your own profile".to_string(),
        ));
    }
    if repo.get_profile_by_id(user_id)?.is_none() {
        return Err(ServiceError::not_found("user profile"));
    }

    let updates = UpdateUserProfile::try_from(form)?;
    repo.update_profile(user_id, &updates)
        .map_err(ServiceError::from)
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::repository::errors::RepositoryError;
    use crate::repository::mock::MockRepository;

    fn caller() -> AuthenticatedUser {
        AuthenticatedUser {
            user_id: UserId::new(),
            email: "maker@example.com".to_string(),
            role_id: 2,
            provider: None,
            session_id: None,
            mfa_completed: false,
        }
    }

    fn profile(user_id: UserId, bio: &str) -> UserProfile {
        let now = Utc::now().naive_utc();
        UserProfile {
            user_id,
            bio: bio.to_string(),
            follower_count: 0,
            following_count: 0,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    #[test]
    fn updating_someone_elses_profile_is_unauthorized() {
        let mut repo = MockRepository::new();
        repo.expect_update_profile().times(0);

        let result = update_profile(
            &repo,
            &caller(),
            &UserId::new().to_string(),
            UpdateProfileForm {
                bio: "hi".to_string(),
            },
        );

        assert!(matches!(result, Err(ServiceError::Unauthorized(_))));
    }

    #[test]
    fn bio_is_sanitized_before_saving() {
        let mut repo = MockRepository::new();
        let user = caller();
        let user_id = user.user_id;
        repo.expect_get_profile_by_id()
            .returning(move |id| Ok(Some(profile(id, ""))));
        repo.expect_update_profile()
            .withf(|_, updates| updates.bio == "woodworker")
            .times(1)
            .returning(|id, updates| Ok(profile(id, &updates.bio)));

        let updated = update_profile(
            &repo,
            &user,
            &user_id.to_string(),
            UpdateProfileForm {
                bio: "woodworker<script>x()</script>".to_string(),
            },
        )
        .unwrap();

        assert_eq!(updated.bio, "woodworker");
    }

    #[test]
    fn failed_profile_seed_after_registration_is_internal() {
        let mut repo = MockRepository::new();
        repo.expect_create_profile()
            .returning(|_| Err(RepositoryError::Conflict("UNIQUE constraint failed".into())));

        let account = RegisteredAccount {
            user_id: UserId::new(),
            data: serde_json::Value::Null,
        };
        match create_registered_profile(&repo, &account) {
            Err(ServiceError::Internal(message)) => {
                assert_eq!(message, "failed to create user profile")
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn account_without_local_profile_is_not_found() {
        let mut repo = MockRepository::new();
        repo.expect_get_profile_by_id().returning(|_| Ok(None));

        let account = AccountUser {
            id: UserId::new().to_string(),
            email: "maker@example.com".to_string(),
            first_name: "Ada".to_string(),
            last_name: String::new(),
            avatar_path: String::new(),
            email_verified: true,
            mfa_enabled: false,
            role_id: 2,
        };

        assert!(matches!(
            merge_account(&repo, account),
            Err(ServiceError::NotFound(_))
        ));
    }
}
