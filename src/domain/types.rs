//! Strongly-typed value objects used by domain entities.
//!
//! These wrappers enforce basic invariants (parsable UUID identifiers,
//! bounded and sanitized text) so that once a value reaches the domain layer
//! it can be treated as trusted.
use std::{fmt, ops::Deref, str::FromStr};

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use thiserror::Error;
use uuid::Uuid;

/// Errors produced when attempting to construct a constrained value object.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// Provided string contained no non-whitespace characters.
    #[error("value cannot be empty")]
    EmptyString,
    /// Provided string is shorter than the allowed minimum.
    #[error("value must be at least {0} characters long")]
    TooShort(usize),
    /// Provided string is longer than the allowed maximum.
    #[error("value must be at most {0} characters long")]
    TooLong(usize),
    /// Provided value failed custom validation.
    #[error("invalid value: {0}")]
    InvalidValue(String),
    /// Provided identifier is not a UUID.
    #[error("invalid id format")]
    InvalidUuid,
}

/// Macro to generate time-ordered UUID identifiers.
macro_rules! uuid_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(Uuid);

        impl $name {
            /// Generates a fresh UUIDv7 identifier.
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Parses the textual form stored in the database or sent by clients.
            pub fn parse(value: &str) -> Result<Self, TypeConstraintError> {
                Uuid::parse_str(value.trim())
                    .map(Self)
                    .map_err(|_| TypeConstraintError::InvalidUuid)
            }

            pub const fn get(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = TypeConstraintError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl TryFrom<String> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::parse(&value)
            }
        }

        impl From<Uuid> for $name {
            fn from(value: Uuid) -> Self {
                Self(value)
            }
        }

        impl From<$name> for Uuid {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

uuid_newtype!(UserId, "Identifier of an account issued by the auth service.");
uuid_newtype!(ProjectId, "Unique identifier for a project.");
uuid_newtype!(TagId, "Unique identifier for a tag.");
uuid_newtype!(LogId, "Unique identifier for a log entry.");
uuid_newtype!(MediaId, "Unique identifier for a media attachment.");
uuid_newtype!(CommentId, "Unique identifier for a comment.");

/// Wrapper for non-empty, trimmed strings.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct NonEmptyString(String);

impl NonEmptyString {
    /// Trims whitespace and rejects empty inputs.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let trimmed = value.into().trim().to_string();
        if trimmed.is_empty() {
            return Err(TypeConstraintError::EmptyString);
        }
        Ok(Self(trimmed))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

/// Trims `value`, optionally sanitizes it as HTML, and checks its length in characters.
fn bounded_text(
    value: String,
    min: usize,
    max: usize,
    sanitize: bool,
) -> Result<String, TypeConstraintError> {
    let value = if sanitize {
        ammonia::clean(&value)
    } else {
        value
    };
    let inner = NonEmptyString::new(value)?.into_inner();
    let length = inner.chars().count();
    if length < min {
        return Err(TypeConstraintError::TooShort(min));
    }
    if length > max {
        return Err(TypeConstraintError::TooLong(max));
    }
    Ok(inner)
}

macro_rules! bounded_string_newtype {
    ($name:ident, $min:expr, $max:expr, $sanitize:expr, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(String);

        impl $name {
            pub const MIN_LEN: usize = $min;
            pub const MAX_LEN: usize = $max;

            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                bounded_text(value.into(), $min, $max, $sanitize).map(Self)
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Deref for $name {
            type Target = str;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

bounded_string_newtype!(ProjectTitle, 5, 255, false, "Project title, 5 to 255 characters.");
bounded_string_newtype!(TagName, 1, 255, false, "Tag label, 1 to 255 characters.");
bounded_string_newtype!(
    CommentBody,
    1,
    255,
    true,
    "Sanitized comment text, 1 to 255 characters."
);
bounded_string_newtype!(
    LogContent,
    1,
    65_535,
    true,
    "Sanitized body of a log entry."
);

const SLUG_TITLE_CHARS: usize = 18;
const SLUG_SUFFIX_CHARS: usize = 6;

/// URL-friendly unique handle derived from a project title.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Slug(String);

impl Slug {
    /// Builds a slug from the first characters of `title` plus a random suffix.
    pub fn from_title(title: &str) -> Self {
        let suffix: String = Uuid::new_v4()
            .simple()
            .to_string()
            .chars()
            .take(SLUG_SUFFIX_CHARS)
            .collect();
        Self::with_suffix(title, &suffix)
    }

    fn with_suffix(title: &str, suffix: &str) -> Self {
        let head: String = title.chars().take(SLUG_TITLE_CHARS).collect();
        let base = slugify(&head);
        if base.is_empty() {
            Self(suffix.to_string())
        } else {
            Self(format!("{base}-{suffix}"))
        }
    }

    /// Wraps a slug read back from storage.
    pub fn from_stored<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        NonEmptyString::new(value).map(|value| Self(value.into_inner()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for Slug {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lowercases, keeps `[a-z0-9 ]` and joins the remaining words with `-`.
fn slugify(input: &str) -> String {
    let kept: String = input
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == ' ')
        .collect();
    kept.split(' ')
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// Kind of file attached to a log entry.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Image,
    Video,
}

impl MediaType {
    pub fn as_str(self) -> &'static str {
        match self {
            MediaType::Image => "image",
            MediaType::Video => "video",
        }
    }
}

impl Display for MediaType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaType {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "image" => Ok(MediaType::Image),
            "video" => Ok(MediaType::Video),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "unsupported media type `{other}`"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uuid_ids_round_trip_through_text() {
        let id = ProjectId::new();
        assert_eq!(ProjectId::parse(&id.to_string()).unwrap(), id);
        assert_eq!(id.get().get_version_num(), 7);
    }

    #[test]
    fn uuid_ids_reject_garbage() {
        assert_eq!(TagId::parse("42"), Err(TypeConstraintError::InvalidUuid));
        assert_eq!(
            "not-a-uuid".parse::<LogId>(),
            Err(TypeConstraintError::InvalidUuid)
        );
    }

    #[test]
    fn project_title_enforces_length() {
        assert_eq!(ProjectTitle::new("abc"), Err(TypeConstraintError::TooShort(5)));
        assert_eq!(ProjectTitle::new("   "), Err(TypeConstraintError::EmptyString));
        assert_eq!(
            ProjectTitle::new("x".repeat(256)),
            Err(TypeConstraintError::TooLong(255))
        );
        assert_eq!(ProjectTitle::new("  Garden  ").unwrap().as_str(), "Garden");
    }

    #[test]
    fn comment_body_is_sanitized() {
        let body = CommentBody::new("nice <script>alert(1)</script>shot").unwrap();
        assert_eq!(body.as_str(), "nice shot");
        assert_eq!(
            CommentBody::new("<script>x</script>"),
            Err(TypeConstraintError::EmptyString)
        );
    }

    #[test]
    fn slug_uses_first_eighteen_characters() {
        let slug = Slug::with_suffix("My First Woodworking Project!", "abc123");
        assert_eq!(slug.as_str(), "my-first-woodworki-abc123");
    }

    #[test]
    fn slug_drops_symbols_and_collapses_spaces() {
        let slug = Slug::with_suffix("  Hello,   World ", "ffffff");
        assert_eq!(slug.as_str(), "hello-world-ffffff");
    }

    #[test]
    fn slug_without_usable_characters_is_identifier_only() {
        let slug = Slug::with_suffix("Привет!!", "0a1b2c");
        assert_eq!(slug.as_str(), "0a1b2c");
    }

    #[test]
    fn random_slug_suffix_is_six_hex_characters() {
        let slug = Slug::from_title("Garden beds");
        let suffix = slug.as_str().rsplit('-').next().unwrap();
        assert_eq!(suffix.len(), 6);
        assert!(suffix.chars().all(|c| c.is_ascii_hexdigit()));
        assert!(slug.as_str().starts_with("garden-beds-"));
    }

    #[test]
    fn media_type_parses_known_values() {
        assert_eq!("image".parse::<MediaType>().unwrap(), MediaType::Image);
        assert_eq!(MediaType::Video.to_string(), "video");
        assert!("gif".parse::<MediaType>().is_err());
    }
}
