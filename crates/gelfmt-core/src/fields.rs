//! Optional GELF fields and the immutable sets that enable them.
//!
//! A [`FieldSet`] decides which `_`-prefixed keys a formatter may emit. It is
//! built once (usually from a [`Profile`] or from config) and never mutated
//! while formatting, so one formatter can be shared between threads.

use std::collections::BTreeSet;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FieldError;

/// An optional attribute the formatter can copy into the GELF object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtraField {
    Line,
    File,
    ExcText,
    StatusCode,
    Scheme,
    Method,
    UserId,
    Username,
    RemoteAddr,
    HttpUserAgent,
    RequestMethod,
    PathInfo,
    ServerProtocol,
}

impl ExtraField {
    pub const ALL: [ExtraField; 13] = [
        ExtraField::Line,
        ExtraField::File,
        ExtraField::ExcText,
        ExtraField::StatusCode,
        ExtraField::Scheme,
        ExtraField::Method,
        ExtraField::UserId,
        ExtraField::Username,
        ExtraField::RemoteAddr,
        ExtraField::HttpUserAgent,
        ExtraField::RequestMethod,
        ExtraField::PathInfo,
        ExtraField::ServerProtocol,
    ];

    /// Attribute name, also the config spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            ExtraField::Line => "line",
            ExtraField::File => "file",
            ExtraField::ExcText => "exc_text",
            ExtraField::StatusCode => "status_code",
            ExtraField::Scheme => "scheme",
            ExtraField::Method => "method",
            ExtraField::UserId => "user_id",
            ExtraField::Username => "username",
            ExtraField::RemoteAddr => "remote_addr",
            ExtraField::HttpUserAgent => "http_user_agent",
            ExtraField::RequestMethod => "request_method",
            ExtraField::PathInfo => "path_info",
            ExtraField::ServerProtocol => "server_protocol",
        }
    }

    /// Key in the GELF object, e.g. `_status_code`.
    pub fn gelf_key(self) -> String {
        format!("_{}", self.as_str())
    }
}

impl std::fmt::Display for ExtraField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExtraField {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ExtraField::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| FieldError::UnknownField(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// FieldSet
// ---------------------------------------------------------------------------

/// The set of enabled optional fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldSet(BTreeSet<ExtraField>);

impl FieldSet {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new(fields: impl IntoIterator<Item = ExtraField>) -> Self {
        Self(fields.into_iter().collect())
    }

    /// Returns a copy with `field` enabled.
    pub fn with(mut self, field: ExtraField) -> Self {
        self.0.insert(field);
        self
    }

    pub fn union(&self, other: &FieldSet) -> FieldSet {
        Self(self.0.union(&other.0).copied().collect())
    }

    pub fn contains(&self, field: ExtraField) -> bool {
        self.0.contains(&field)
    }

    pub fn iter(&self) -> impl Iterator<Item = ExtraField> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<ExtraField> for FieldSet {
    fn from_iter<I: IntoIterator<Item = ExtraField>>(iter: I) -> Self {
        Self::new(iter)
    }
}

// ---------------------------------------------------------------------------
// Profiles
// ---------------------------------------------------------------------------

/// Named field sets for the common formatter flavours.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Profile {
    /// Source location only.
    #[default]
    Basic,
    /// `basic` plus the response status code.
    Request,
    /// `request` plus scheme, method and the requesting user.
    WebRequest,
    /// `basic` plus the access-log atoms of an HTTP server.
    Access,
}

impl Profile {
    pub fn fields(self) -> FieldSet {
        use ExtraField::*;
        let basic = FieldSet::new([Line, File]);
        match self {
            Profile::Basic => basic,
            Profile::Request => basic.with(StatusCode),
            Profile::WebRequest => Profile::Request
                .fields()
                .union(&FieldSet::new([Scheme, Method, UserId, Username])),
            Profile::Access => basic.union(&FieldSet::new([
                RemoteAddr,
                HttpUserAgent,
                RequestMethod,
                PathInfo,
                ServerProtocol,
            ])),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Profile::Basic => "basic",
            Profile::Request => "request",
            Profile::WebRequest => "web_request",
            Profile::Access => "access",
        }
    }
}

impl FromStr for Profile {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "basic" => Ok(Profile::Basic),
            "request" => Ok(Profile::Request),
            "web_request" => Ok(Profile::WebRequest),
            "access" => Ok(Profile::Access),
            other => Err(FieldError::UnknownProfile(other.to_string())),
        }
    }
}

impl std::fmt::Display for Profile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Profile> for FieldSet {
    fn from(profile: Profile) -> Self {
        profile.fields()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
