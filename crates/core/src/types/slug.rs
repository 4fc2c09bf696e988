//! URL slug type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Slug`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum SlugError {
    /// The input string is empty.
    #[error("slug cannot be empty")]
    Empty,
    /// The input string is too long.
    #[error("slug must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The input contains a character outside `[a-z0-9-]`.
    #[error("slug may only contain lowercase letters, digits, and hyphens")]
    InvalidCharacter,
    /// The input starts or ends with a hyphen.
    #[error("slug cannot start or end with a hyphen")]
    EdgeHyphen,
}

/// A URL slug: lowercase letters, digits, and interior hyphens.
///
/// Slugs identify pages and posts in public URLs. Use [`Slug::parse`] to
/// validate user-supplied slugs and [`Slug::generate`] to derive one from a
/// title.
///
/// ## Examples
///
/// ```
/// use driftwood_core::Slug;
///
/// assert_eq!(Slug::generate("Hello, World!").as_str(), "hello-world");
/// assert!(Slug::parse("about-us").is_ok());
/// assert!(Slug::parse("About Us").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Slug(String);

impl Slug {
    /// Maximum length of a slug.
    pub const MAX_LENGTH: usize = 100;

    /// Fallback slug when a title contains no usable characters.
    const FALLBACK: &'static str = "untitled";

    /// Parse a `Slug` from a string, validating canonical form.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, too long, contains characters
    /// outside `[a-z0-9-]`, or starts/ends with a hyphen.
    pub fn parse(s: &str) -> Result<Self, SlugError> {
        if s.is_empty() {
            return Err(SlugError::Empty);
        }

        if s.len() > Self::MAX_LENGTH {
            return Err(SlugError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        if !s
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        {
            return Err(SlugError::InvalidCharacter);
        }

        if s.starts_with('-') || s.ends_with('-') {
            return Err(SlugError::EdgeHyphen);
        }

        Ok(Self(s.to_owned()))
    }

    /// Generate a slug from a title.
    ///
    /// Lowercases the input, collapses every run of non-alphanumeric
    /// characters into a single hyphen, trims edge hyphens, and caps the
    /// result at [`Slug::MAX_LENGTH`]. Deterministic for a fixed title.
    /// Titles with no usable characters yield `"untitled"`.
    #[must_use]
    pub fn generate(title: &str) -> Self {
        let mut out = String::with_capacity(title.len());
        let mut pending_hyphen = false;

        for c in title.chars() {
            if c.is_ascii_alphanumeric() {
                if pending_hyphen && !out.is_empty() {
                    out.push('-');
                }
                pending_hyphen = false;
                out.push(c.to_ascii_lowercase());
            } else {
                pending_hyphen = true;
            }
            if out.len() >= Self::MAX_LENGTH {
                break;
            }
        }

        // Length cap may land mid-run; keep the form canonical.
        while out.ends_with('-') {
            out.pop();
        }

        if out.is_empty() {
            out.push_str(Self::FALLBACK);
        }

        Self(out)
    }

    /// Returns the slug as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `Slug` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Slug {
    type Err = SlugError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// SQLx support (with postgres feature)
#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for Slug {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for Slug {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <String as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        // Database values are assumed valid
        Ok(Self(s))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for Slug {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <String as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_basic() {
        assert_eq!(Slug::generate("Hello World").as_str(), "hello-world");
        assert_eq!(Slug::generate("Hello  World").as_str(), "hello-world");
        assert_eq!(Slug::generate("Hello, World!").as_str(), "hello-world");
    }

    #[test]
    fn test_generate_deterministic() {
        let a = Slug::generate("Summer Launch: 2026 Edition");
        let b = Slug::generate("Summer Launch: 2026 Edition");
        assert_eq!(a, b);
    }

    #[test]
    fn test_generate_output_is_canonical() {
        // generate's output always passes parse
        for title in ["Hello World", "  --weird--  input__ ", "çà et là", "123"] {
            let slug = Slug::generate(title);
            assert!(Slug::parse(slug.as_str()).is_ok(), "not canonical: {slug}");
        }
    }

    #[test]
    fn test_generate_fallback() {
        assert_eq!(Slug::generate("").as_str(), "untitled");
        assert_eq!(Slug::generate("!!!").as_str(), "untitled");
    }

    #[test]
    fn test_generate_caps_length() {
        let slug = Slug::generate(&"word ".repeat(100));
        assert!(slug.as_str().len() <= Slug::MAX_LENGTH);
        assert!(!slug.as_str().ends_with('-'));
    }

    #[test]
    fn test_parse_valid() {
        assert!(Slug::parse("about").is_ok());
        assert!(Slug::parse("about-us").is_ok());
        assert!(Slug::parse("page-2").is_ok());
    }

    #[test]
    fn test_parse_rejects_invalid() {
        assert!(matches!(Slug::parse(""), Err(SlugError::Empty)));
        assert!(matches!(
            Slug::parse("About"),
            Err(SlugError::InvalidCharacter)
        ));
        assert!(matches!(
            Slug::parse("with space"),
            Err(SlugError::InvalidCharacter)
        ));
        assert!(matches!(Slug::parse("-edge"), Err(SlugError::EdgeHyphen)));
        assert!(matches!(Slug::parse("edge-"), Err(SlugError::EdgeHyphen)));
        assert!(matches!(
            Slug::parse(&"a".repeat(101)),
            Err(SlugError::TooLong { .. })
        ));
    }

    #[test]
    fn test_serde_roundtrip() {
        let slug = Slug::parse("about-us").unwrap();
        let json = serde_json::to_string(&slug).unwrap();
        assert_eq!(json, "\"about-us\"");

        let parsed: Slug = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, slug);
    }
}
