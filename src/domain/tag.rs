use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{TagId, TagName};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Tag {
    pub id: TagId,
    pub name: TagName,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    #[serde(skip)]
    pub deleted_at: Option<NaiveDateTime>,
}

#[derive(Clone, Debug)]
pub struct NewTag {
    pub id: TagId,
    pub name: TagName,
}

impl NewTag {
    #[must_use]
    pub fn new(name: TagName) -> Self {
        Self {
            id: TagId::new(),
            name,
        }
    }
}

#[derive(Clone, Debug)]
pub struct UpdateTag {
    pub name: TagName,
}
