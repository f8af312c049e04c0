use serde::Deserialize;
use validator::Validate;

use crate::domain::interaction::{NewComment, NewLike, UpdateComment};
use crate::domain::types::{CommentBody, LogId, UserId};
use crate::forms::FormError;

#[derive(Debug, Clone, Deserialize)]
pub struct LikeForm {
    pub log_id: String,
}

impl LikeForm {
    pub fn into_domain(self, user_profile_id: UserId) -> Result<NewLike, FormError> {
        Ok(NewLike {
            user_profile_id,
            log_id: LogId::parse(&self.log_id)?,
        })
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CommentForm {
    pub log_id: String,
    #[validate(length(min = 1, max = 255))]
    pub body: String,
}

impl CommentForm {
    pub fn into_domain(self, user_profile_id: UserId) -> Result<NewComment, FormError> {
        self.validate()?;
        Ok(NewComment::new(
            user_profile_id,
            LogId::parse(&self.log_id)?,
            CommentBody::new(self.body)?,
        ))
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateCommentForm {
    #[validate(length(min = 1, max = 255))]
    pub body: String,
}

impl TryFrom<UpdateCommentForm> for UpdateComment {
    type Error = FormError;

    fn try_from(form: UpdateCommentForm) -> Result<Self, Self::Error> {
        form.validate()?;
        Ok(UpdateComment {
            body: CommentBody::new(form.body)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comment_body_over_limit_is_rejected() {
        let form = CommentForm {
            log_id: LogId::new().to_string(),
            body: "a".repeat(256),
        };
        assert!(matches!(
            form.into_domain(UserId::new()),
            Err(FormError::Validation(_))
        ));
    }

    #[test]
    fn like_requires_uuid_log_id() {
        let form = LikeForm {
            log_id: "abc".to_string(),
        };
        assert!(form.into_domain(UserId::new()).is_err());
    }
}
