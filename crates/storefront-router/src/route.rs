//! Route patterns and matched parameters.
//!
//! A pattern is a `/`-separated list of segments:
//!
//! - `product` matches that literal segment
//! - `:productId` captures one non-empty segment
//! - `*` or `*rest` captures everything that remains and must come last

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors raised while parsing patterns, page names or building links.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouteError {
    #[error("invalid parameter name `{name}` in `{pattern}`")]
    InvalidParam { pattern: String, name: String },

    #[error("parameter `{name}` appears twice in `{pattern}`")]
    DuplicateParam { pattern: String, name: String },

    #[error("wildcard must be the last segment of `{pattern}`")]
    WildcardNotLast { pattern: String },

    #[error("missing value for parameter `{name}` of `{pattern}`")]
    MissingParam { pattern: String, name: String },

    #[error("unknown page `{0}`")]
    UnknownPage(String),
}

/// One segment of a route pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Static(String),
    Param(String),
    /// Remaining path. Captured under its name when it has one.
    Wildcard(Option<String>),
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Static(s) => f.write_str(s),
            Segment::Param(name) => write!(f, ":{name}"),
            Segment::Wildcard(Some(name)) => write!(f, "*{name}"),
            Segment::Wildcard(None) => f.write_str("*"),
        }
    }
}

/// A parsed route pattern such as `/product/:productId`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoutePattern {
    segments: Vec<Segment>,
}

impl RoutePattern {
    /// The empty pattern. Matches `/` only.
    pub fn root() -> Self {
        Self::default()
    }

    /// Parse a pattern. Leading, trailing and repeated slashes are ignored.
    pub fn parse(pattern: &str) -> Result<Self, RouteError> {
        let mut segments = Vec::new();
        let mut names: Vec<&str> = Vec::new();
        let parts: Vec<&str> = split_path(pattern).collect();

        for (i, part) in parts.iter().enumerate() {
            let segment = if let Some(name) = part.strip_prefix(':') {
                check_name(pattern, name)?;
                if names.contains(&name) {
                    return Err(RouteError::DuplicateParam {
                        pattern: pattern.to_string(),
                        name: name.to_string(),
                    });
                }
                names.push(name);
                Segment::Param(name.to_string())
            } else if let Some(name) = part.strip_prefix('*') {
                if i + 1 != parts.len() {
                    return Err(RouteError::WildcardNotLast {
                        pattern: pattern.to_string(),
                    });
                }
                if name.is_empty() {
                    Segment::Wildcard(None)
                } else {
                    check_name(pattern, name)?;
                    Segment::Wildcard(Some(name.to_string()))
                }
            } else {
                Segment::Static((*part).to_string())
            };
            segments.push(segment);
        }

        Ok(Self { segments })
    }

    /// Append a literal segment.
    pub fn lit(mut self, segment: impl Into<String>) -> Self {
        self.segments.push(Segment::Static(segment.into()));
        self
    }

    /// Append a parameter segment.
    pub fn param(mut self, name: impl Into<String>) -> Self {
        self.segments.push(Segment::Param(name.into()));
        self
    }

    /// Append an unnamed wildcard.
    pub fn wildcard(mut self) -> Self {
        self.segments.push(Segment::Wildcard(None));
        self
    }

    /// This pattern nested under `parent`.
    pub fn under(&self, parent: &RoutePattern) -> RoutePattern {
        let mut segments = parent.segments.clone();
        segments.extend(self.segments.iter().cloned());
        RoutePattern { segments }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn is_catch_all(&self) -> bool {
        matches!(self.segments.last(), Some(Segment::Wildcard(_)))
    }

    /// Names of the parameters this pattern captures.
    pub fn param_names(&self) -> Vec<&str> {
        self.segments
            .iter()
            .filter_map(|s| match s {
                Segment::Param(name) | Segment::Wildcard(Some(name)) => Some(name.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Match already split path segments.
    pub fn matches(&self, path: &[&str]) -> Option<RouteParams> {
        let mut params = RouteParams::default();

        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::Wildcard(name) => {
                    if let Some(name) = name {
                        let rest: Vec<String> =
                            path.get(i..).unwrap_or_default().iter().map(|p| decode(p)).collect();
                        params.insert(name.clone(), rest.join("/"));
                    }
                    return Some(params);
                }
                Segment::Static(expected) => {
                    if path.get(i) != Some(&expected.as_str()) {
                        return None;
                    }
                }
                Segment::Param(name) => {
                    let value = path.get(i).filter(|v| !v.is_empty())?;
                    params.insert(name.clone(), decode(value));
                }
            }
        }

        (path.len() == self.segments.len()).then_some(params)
    }

    /// Build a concrete path, percent-encoding parameter values.
    ///
    /// A wildcard is filled from its named parameter, or left empty.
    pub fn href(&self, params: &[(&str, &str)]) -> Result<String, RouteError> {
        let lookup = |name: &str| params.iter().find(|(k, _)| *k == name).map(|(_, v)| *v);
        let mut parts = Vec::with_capacity(self.segments.len());

        for segment in &self.segments {
            match segment {
                Segment::Static(s) => parts.push(s.clone()),
                Segment::Param(name) => {
                    let value = lookup(name).filter(|v| !v.is_empty()).ok_or_else(|| {
                        RouteError::MissingParam {
                            pattern: self.to_string(),
                            name: name.clone(),
                        }
                    })?;
                    parts.push(encode(value));
                }
                Segment::Wildcard(name) => {
                    if let Some(rest) = name.as_deref().and_then(lookup) {
                        parts.extend(split_path(rest).map(encode));
                    }
                }
            }
        }

        Ok(format!("/{}", parts.join("/")))
    }
}

impl fmt::Display for RoutePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_str("/");
        }
        for segment in &self.segments {
            write!(f, "/{segment}")?;
        }
        Ok(())
    }
}

impl FromStr for RoutePattern {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for RoutePattern {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Parameters captured by a matched route.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RouteParams(BTreeMap<String, String>);

impl RouteParams {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Parse a parameter. `None` if absent or unparseable.
    pub fn get_parsed<T: FromStr>(&self, name: &str) -> Option<T> {
        self.get(name)?.parse().ok()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn insert(&mut self, name: String, value: String) {
        self.0.insert(name, value);
    }
}

/// Split a path into non-empty segments.
pub(crate) fn split_path(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

fn check_name(pattern: &str, name: &str) -> Result<(), RouteError> {
    let valid = name
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    if valid {
        Ok(())
    } else {
        Err(RouteError::InvalidParam {
            pattern: pattern.to_string(),
            name: name.to_string(),
        })
    }
}

/// Decode `%XX` escapes. Malformed escapes are kept as written.
fn decode(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            let hi = (bytes[i + 1] as char).to_digit(16);
            let lo = (bytes[i + 2] as char).to_digit(16);
            if let (Some(hi), Some(lo)) = (hi, lo) {
                out.push((hi * 16 + lo) as u8);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn encode(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for byte in input.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'.' | b'_' | b'~' | b'@') {
            out.push(byte as char);
        } else {
            out.push_str(&format!("%{byte:02X}"));
        }
    }
    out
}
