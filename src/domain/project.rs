use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::tag::Tag;
use crate::domain::types::{ProjectId, ProjectTitle, Slug, TagId, UserId};

/// A project owned by a user, with its current tag set.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Project {
    pub id: ProjectId,
    pub user_id: UserId,
    pub title: ProjectTitle,
    pub description: String,
    pub slug: Slug,
    pub is_public: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    #[serde(skip)]
    pub deleted_at: Option<NaiveDateTime>,
    pub tags: Vec<Tag>,
}

impl Project {
    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.user_id == user_id
    }
}

/// Payload for creating a project together with its tag associations.
#[derive(Clone, Debug)]
pub struct NewProject {
    pub id: ProjectId,
    pub user_id: UserId,
    pub title: ProjectTitle,
    pub description: String,
    pub slug: Slug,
    pub is_public: bool,
    pub tag_ids: Vec<TagId>,
}

impl NewProject {
    #[must_use]
    pub fn new(
        user_id: UserId,
        title: ProjectTitle,
        description: String,
        is_public: bool,
        tag_ids: Vec<TagId>,
    ) -> Self {
        let slug = Slug::from_title(title.as_str());
        Self {
            id: ProjectId::new(),
            user_id,
            title,
            description: description.trim().to_string(),
            slug,
            is_public,
            tag_ids: dedup_tags(tag_ids),
        }
    }
}

/// Scalar changes plus the desired tag set.
///
/// An empty `tag_ids` leaves the stored associations untouched.
#[derive(Clone, Debug)]
pub struct UpdateProject {
    pub title: ProjectTitle,
    pub description: String,
    pub is_public: bool,
    pub tag_ids: Vec<TagId>,
}

impl UpdateProject {
    #[must_use]
    pub fn new(
        title: ProjectTitle,
        description: String,
        is_public: bool,
        tag_ids: Vec<TagId>,
    ) -> Self {
        Self {
            title,
            description: description.trim().to_string(),
            is_public,
            tag_ids: dedup_tags(tag_ids),
        }
    }

    pub fn replaces_tags(&self) -> bool {
        !self.tag_ids.is_empty()
    }
}

/// Duplicate ids would collide on the join table's primary key.
fn dedup_tags(tag_ids: Vec<TagId>) -> Vec<TagId> {
    let mut unique = Vec::with_capacity(tag_ids.len());
    for tag_id in tag_ids {
        if !unique.contains(&tag_id) {
            unique.push(tag_id);
        }
    }
    unique
}
