//! Scene paths
//!
//! A [`Path`] is the ordered list of [`Name`]s leading from the scene root to
//! a node. The empty list is the root. The string form joins segments with
//! `/` and always starts with one; the root renders as exactly `/`.

use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::error::{SceneError, SceneResult};

/// Separator between path segments in the string form
pub const SEPARATOR: char = '/';

/// Name reported for the root node
pub const ROOT_NAME: &str = "/";

/// A single path segment
///
/// Never empty and never contains [`SEPARATOR`]. Clones share one allocation.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Name(Arc<str>);

impl Name {
    /// Validate and create a name
    pub fn new(name: &str) -> SceneResult<Self> {
        if name.is_empty() {
            return Err(SceneError::MalformedPath("empty name".to_string()));
        }
        if name.contains(SEPARATOR) {
            return Err(SceneError::MalformedPath(format!(
                "name '{name}' contains '{SEPARATOR}'"
            )));
        }
        Ok(Self(Arc::from(name)))
    }

    /// The name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for Name {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Name {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Name {
    type Error = SceneError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl TryFrom<&str> for Name {
    type Error = SceneError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Name> for String {
    fn from(name: Name) -> Self {
        name.0.to_string()
    }
}

/// How [`string_to_path_with`] treats empty segments
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PathPolicy {
    /// Drop every empty segment, so `"a//b"` is `[a, b]`
    #[default]
    Collapse,
    /// Allow one leading and one trailing separator, reject doubled ones
    Strict,
}

/// Location of a node, as segments from the root
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Path {
    segments: Vec<Name>,
}

impl Path {
    /// The root path
    pub fn root() -> Self {
        Self::default()
    }

    /// Build a path from already validated names
    pub fn from_names(segments: Vec<Name>) -> Self {
        Self { segments }
    }

    /// Build a path from string segments, validating each one
    pub fn from_segments<I, S>(segments: I) -> SceneResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let segments = segments
            .into_iter()
            .map(|segment| Name::new(segment.as_ref()))
            .collect::<SceneResult<Vec<_>>>()?;
        Ok(Self { segments })
    }

    /// Whether this is the root path
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Number of segments
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Whether the path has no segments
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// The segments from the root down
    pub fn segments(&self) -> &[Name] {
        &self.segments
    }

    /// Last segment, `None` for the root
    pub fn name(&self) -> Option<&Name> {
        self.segments.last()
    }

    /// Path of the parent, `None` for the root
    pub fn parent(&self) -> Option<Self> {
        if self.segments.is_empty() {
            return None;
        }
        Some(Self {
            segments: self.segments[..self.segments.len() - 1].to_vec(),
        })
    }

    /// Append one segment
    pub fn push(&mut self, name: Name) {
        self.segments.push(name);
    }

    /// New path with `name` appended
    #[must_use]
    pub fn child(&self, name: Name) -> Self {
        let mut path = self.clone();
        path.push(name);
        path
    }

    /// New path with every segment of `other` appended
    #[must_use]
    pub fn join(&self, other: &Self) -> Self {
        let mut segments = self.segments.clone();
        segments.extend(other.segments.iter().cloned());
        Self { segments }
    }

    /// Whether `prefix` is an ancestor of, or equal to, this path
    pub fn starts_with(&self, prefix: &Self) -> bool {
        self.segments.starts_with(&prefix.segments)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&path_to_string(self))
    }
}

impl FromStr for Path {
    type Err = SceneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        string_to_path(s)
    }
}

impl From<Vec<Name>> for Path {
    fn from(segments: Vec<Name>) -> Self {
        Self::from_names(segments)
    }
}

/// Render a path as `/a/b/c`, or `/` for the root
pub fn path_to_string(path: &Path) -> String {
    if path.is_root() {
        return ROOT_NAME.to_string();
    }

    let mut out = String::new();
    for segment in &path.segments {
        out.push(SEPARATOR);
        out.push_str(segment.as_str());
    }
    out
}

/// Parse a string path, collapsing empty segments
pub fn string_to_path(s: &str) -> SceneResult<Path> {
    string_to_path_with(s, PathPolicy::Collapse)
}

/// Parse a string path under an explicit policy
pub fn string_to_path_with(s: &str, policy: PathPolicy) -> SceneResult<Path> {
    let trimmed = match policy {
        PathPolicy::Collapse => s,
        PathPolicy::Strict => {
            let s = s.strip_prefix(SEPARATOR).unwrap_or(s);
            s.strip_suffix(SEPARATOR).unwrap_or(s)
        }
    };

    let mut segments = Vec::new();
    if trimmed.is_empty() {
        return Ok(Path { segments });
    }

    for token in trimmed.split(SEPARATOR) {
        if token.is_empty() {
            match policy {
                PathPolicy::Collapse => continue,
                PathPolicy::Strict => {
                    return Err(SceneError::MalformedPath(format!(
                        "empty segment in '{s}'"
                    )))
                }
            }
        }
        segments.push(Name::new(token)?);
    }

    Ok(Path { segments })
}
