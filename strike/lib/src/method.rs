//! HTTP verbs used by the Strike API.

use strum::{Display, EnumIter, EnumString};

/// HTTP methods used by Strike endpoints.
///
/// The remote API only ever needs these four verbs, so the enum is
/// intentionally narrower than the full HTTP method set.
///
/// ## Examples
///
/// ```rust
/// use strike_lib::RestMethod;
///
/// let method = RestMethod::Patch;
/// assert!(method.has_body());
///
/// let parsed: RestMethod = "DELETE".parse().unwrap();
/// assert_eq!(parsed, RestMethod::Delete);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString)]
#[strum(serialize_all = "UPPERCASE")]
pub enum RestMethod {
    /// Read a resource or collection.
    Get,
    /// Create a resource or trigger an action (e.g. request a quote).
    Post,
    /// Partially update a resource.
    Patch,
    /// Remove a resource.
    Delete,
}

impl RestMethod {
    /// Returns `true` if requests with this method may carry a body.
    pub fn has_body(&self) -> bool {
        matches!(self, Self::Post | Self::Patch)
    }

    /// Converts to the equivalent `reqwest::Method`.
    pub fn to_reqwest(self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Post => reqwest::Method::POST,
            Self::Patch => reqwest::Method::PATCH,
            Self::Delete => reqwest::Method::DELETE,
        }
    }
}

impl From<RestMethod> for reqwest::Method {
    fn from(method: RestMethod) -> Self {
        method.to_reqwest()
    }
}
