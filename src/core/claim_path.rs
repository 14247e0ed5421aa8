use core::fmt;

use serde::{Deserialize, Serialize};

/// A single component of a claims path pointer.
///
/// Serialized the way DCQL encodes path pointers: a string selects an object
/// key, a non-negative integer selects an array index and `null` selects every
/// element at that position.
/// See: <https://openid.net/specs/openid-4-verifiable-presentations-1_0.html#section-7>
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(untagged)]
pub enum ClaimPathElement {
    /// Object key lookup.
    Claim(String),
    /// Array index lookup.
    ArrayElement(usize),
    /// Wildcard, matching any key or index at its position.
    AllArrayElements,
}

impl ClaimPathElement {
    pub fn is_wildcard(&self) -> bool {
        matches!(self, Self::AllArrayElements)
    }

    /// Returns `true` if this element, used as a pattern, accepts `other`.
    fn accepts(&self, other: &ClaimPathElement) -> bool {
        self.is_wildcard() || self == other
    }
}

impl From<&str> for ClaimPathElement {
    fn from(value: &str) -> Self {
        Self::Claim(value.to_owned())
    }
}

impl From<String> for ClaimPathElement {
    fn from(value: String) -> Self {
        Self::Claim(value)
    }
}

impl From<usize> for ClaimPathElement {
    fn from(value: usize) -> Self {
        Self::ArrayElement(value)
    }
}

impl fmt::Display for ClaimPathElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Claim(name) => write!(f, "{name:?}"),
            Self::ArrayElement(index) => write!(f, "{index}"),
            Self::AllArrayElements => f.write_str("null"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClaimPathError {
    /// The path has no elements.
    #[error("claim path must contain at least one element")]
    Empty,
}

/// An ordered, non-empty sequence of [ClaimPathElement]s addressing a claim
/// inside a credential.
///
/// Equality is structural: a wildcard element only equals another wildcard.
/// Use [ClaimPath::matches] for wildcard and prefix aware comparison.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(try_from = "Vec<ClaimPathElement>", into = "Vec<ClaimPathElement>")]
pub struct ClaimPath(Vec<ClaimPathElement>);

impl ClaimPath {
    pub fn new(elements: Vec<ClaimPathElement>) -> Result<Self, ClaimPathError> {
        if elements.is_empty() {
            return Err(ClaimPathError::Empty);
        }
        Ok(Self(elements))
    }

    /// A path made of a single object key.
    pub fn claim(name: impl Into<String>) -> Self {
        Self(vec![ClaimPathElement::Claim(name.into())])
    }

    /// Returns a new path with `element` appended.
    pub fn child(&self, element: impl Into<ClaimPathElement>) -> Self {
        let mut elements = self.0.clone();
        elements.push(element.into());
        Self(elements)
    }

    pub fn elements(&self) -> &[ClaimPathElement] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`, a claim path cannot be empty.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn first(&self) -> &ClaimPathElement {
        &self.0[0]
    }

    pub fn last(&self) -> &ClaimPathElement {
        &self.0[self.0.len() - 1]
    }

    /// Returns `true` if no element of the path is a wildcard.
    pub fn is_concrete(&self) -> bool {
        !self.0.iter().any(ClaimPathElement::is_wildcard)
    }

    /// Returns `true` if `self` is a strict structural prefix of `other`.
    ///
    /// Wildcards are compared as plain values here.
    pub fn is_prefix_of(&self, other: &ClaimPath) -> bool {
        self.len() < other.len() && other.0.starts_with(&self.0)
    }

    /// Returns `true` for mdoc shaped paths, `[namespace, element_identifier]`.
    /// See: <https://openid.net/specs/openid-4-verifiable-presentations-1_0.html#appendix-B.2.4>
    pub fn is_mdoc_path(&self) -> bool {
        matches!(
            self.0.as_slice(),
            [ClaimPathElement::Claim(_), ClaimPathElement::Claim(_)]
        )
    }

    /// Returns `true` if `candidate` is reachable through `self` used as a
    /// pattern.
    ///
    /// Elements are compared pairwise, a wildcard in `self` accepting any
    /// element of `candidate`. The pattern matches when every compared
    /// position is accepted and the pattern is either as long as the
    /// candidate or shorter, in which case it selects the whole nested
    /// structure under its last element. A pattern longer than the candidate
    /// never matches.
    pub fn matches(&self, candidate: &ClaimPath) -> bool {
        self.len() <= candidate.len()
            && self
                .0
                .iter()
                .zip(candidate.0.iter())
                .all(|(pattern, element)| pattern.accepts(element))
    }
}

impl TryFrom<Vec<ClaimPathElement>> for ClaimPath {
    type Error = ClaimPathError;

    fn try_from(elements: Vec<ClaimPathElement>) -> Result<Self, Self::Error> {
        Self::new(elements)
    }
}

impl From<ClaimPath> for Vec<ClaimPathElement> {
    fn from(ClaimPath(elements): ClaimPath) -> Self {
        elements
    }
}

impl AsRef<[ClaimPathElement]> for ClaimPath {
    fn as_ref(&self) -> &[ClaimPathElement] {
        &self.0
    }
}

impl fmt::Display for ClaimPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, element) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            fmt::Display::fmt(element, f)?;
        }
        f.write_str("]")
    }
}
