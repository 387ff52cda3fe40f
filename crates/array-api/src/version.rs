//! Array API version tags

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// A revision of the array API standard, e.g. `"2023.12"`.
///
/// The resolver never interprets the tag; it hands it to every
/// namespace-reporting call unchanged. Backends decide which revisions they
/// serve.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApiVersion(Cow<'static, str>);

impl ApiVersion {
    pub const V2021_12: ApiVersion = ApiVersion(Cow::Borrowed("2021.12"));
    pub const V2022_12: ApiVersion = ApiVersion(Cow::Borrowed("2022.12"));
    pub const V2023_12: ApiVersion = ApiVersion(Cow::Borrowed("2023.12"));

    /// Revisions published at the time of writing, oldest first.
    pub const KNOWN: [ApiVersion; 3] = [Self::V2021_12, Self::V2022_12, Self::V2023_12];

    pub fn new(tag: impl Into<Cow<'static, str>>) -> Self {
        Self(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_known(&self) -> bool {
        Self::KNOWN.iter().any(|v| v == self)
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for ApiVersion {
    fn from(tag: &'static str) -> Self {
        Self(Cow::Borrowed(tag))
    }
}

impl From<String> for ApiVersion {
    fn from(tag: String) -> Self {
        Self(Cow::Owned(tag))
    }
}
