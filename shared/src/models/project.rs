//! Project tag (`nv`)

use crate::error::{AppError, AppResult, ErrorCode};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

/// Shape of a well-formed tag; stores reuse it to find malformed rows
pub const TAG_PATTERN: &str = r"^NV[0-9]+$";

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(TAG_PATTERN).unwrap());
static CODE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]{3}$").unwrap());

/// Project tag an employee registered under, e.g. `NV499`
///
/// Records created before tags existed carry no tag; they are grouped under
/// [`ProjectTag::SENTINEL`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProjectTag(String);

impl ProjectTag {
    /// Tag used for legacy records without a project
    pub const SENTINEL: &'static str = "NV000";

    /// Parse a full tag (`NV` followed by digits); surrounding whitespace is rejected
    pub fn parse(s: &str) -> AppResult<Self> {
        if TAG_RE.is_match(s) {
            Ok(Self(s.to_string()))
        } else {
            Err(AppError::new(ErrorCode::ProjectTagInvalid).with_detail("value", s))
        }
    }

    /// Build a tag from the three-digit code typed in the link panel
    pub fn from_code(code: &str) -> AppResult<Self> {
        if CODE_RE.is_match(code) {
            Ok(Self(format!("NV{code}")))
        } else {
            Err(AppError::new(ErrorCode::ProjectCodeInvalid).with_detail("value", code))
        }
    }

    /// The legacy sentinel tag
    pub fn sentinel() -> Self {
        Self(Self::SENTINEL.to_string())
    }

    /// Tag of a stored record; missing or malformed tags map to the sentinel
    pub fn from_stored(nv: Option<&str>) -> Self {
        nv.and_then(|s| Self::parse(s).ok())
            .unwrap_or_else(Self::sentinel)
    }

    pub fn is_sentinel(&self) -> bool {
        self.0 == Self::SENTINEL
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ProjectTag {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ProjectTag> for String {
    fn from(tag: ProjectTag) -> Self {
        tag.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!(ProjectTag::parse("NV499").unwrap().as_str(), "NV499");
        assert_eq!(
            ProjectTag::parse(" NV1 ").unwrap_err().code,
            ErrorCode::ProjectTagInvalid
        );
        assert_eq!(
            ProjectTag::parse("abc").unwrap_err().code,
            ErrorCode::ProjectTagInvalid
        );
        assert!(ProjectTag::parse("NV").is_err());
        assert!(ProjectTag::parse("nv499").is_err());
        assert!(ProjectTag::parse("NV49a").is_err());
    }

    #[test]
    fn test_from_code() {
        assert_eq!(ProjectTag::from_code("499").unwrap().as_str(), "NV499");
        assert_eq!(ProjectTag::from_code("000").unwrap(), ProjectTag::sentinel());
        for bad in ["49", "4999", "4a9", ""] {
            assert_eq!(
                ProjectTag::from_code(bad).unwrap_err().code,
                ErrorCode::ProjectCodeInvalid
            );
        }
    }

    #[test]
    fn test_from_stored_falls_back_to_sentinel() {
        assert!(ProjectTag::from_stored(None).is_sentinel());
        assert!(ProjectTag::from_stored(Some("")).is_sentinel());
        assert!(ProjectTag::from_stored(Some("NV12 ")).is_sentinel());
        assert_eq!(ProjectTag::from_stored(Some("NV12")).as_str(), "NV12");
    }

    #[test]
    fn test_serde_transparent_string() {
        let tag = ProjectTag::parse("NV7").unwrap();
        assert_eq!(serde_json::to_string(&tag).unwrap(), "\"NV7\"");
        assert!(serde_json::from_str::<ProjectTag>("\"XX7\"").is_err());
    }
}
