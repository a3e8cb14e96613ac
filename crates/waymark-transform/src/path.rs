//! Trail representation and path-expression parsing.
//!
//! A trail is a sequence of segments describing a location in nested JSON
//! data. Each segment is either a key (for objects) or an index (for arrays).
//! Trails are built once, either from a path expression such as
//! `a.b[1].c[3][2]` or via the builder methods, and consumed read-only.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single segment in a trail.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Seg {
    /// Object key access: `{"key": value}`
    Key(String),
    /// Array index access: `[index]`
    Index(usize),
}

impl Seg {
    /// Create a key segment.
    #[inline]
    pub fn key(k: impl Into<String>) -> Self {
        Seg::Key(k.into())
    }

    /// Create an index segment.
    #[inline]
    pub fn index(i: usize) -> Self {
        Seg::Index(i)
    }

    /// Returns true if this is a key segment.
    #[inline]
    pub fn is_key(&self) -> bool {
        matches!(self, Seg::Key(_))
    }

    /// Returns true if this is an index segment.
    #[inline]
    pub fn is_index(&self) -> bool {
        matches!(self, Seg::Index(_))
    }

    /// Get the key if this is a key segment.
    #[inline]
    pub fn as_key(&self) -> Option<&str> {
        match self {
            Seg::Key(k) => Some(k),
            Seg::Index(_) => None,
        }
    }

    /// Get the index if this is an index segment.
    #[inline]
    pub fn as_index(&self) -> Option<usize> {
        match self {
            Seg::Key(_) => None,
            Seg::Index(i) => Some(*i),
        }
    }

    /// Coerce a bracketed path token into a segment.
    ///
    /// A token consisting entirely of decimal digits becomes an index.
    /// Anything else is assumed to be a quoted string literal: exactly one
    /// leading and one trailing character are removed, with no escape
    /// processing. `1.5`, `1e3` and `-2` are not all-digits and therefore
    /// never become indices.
    pub fn coerce_bracket_token(token: &str) -> Seg {
        if !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit()) {
            // A digit run too large for usize falls through to key handling.
            if let Ok(i) = token.parse() {
                return Seg::Index(i);
            }
        }
        let mut chars = token.chars();
        chars.next();
        chars.next_back();
        Seg::Key(chars.as_str().to_owned())
    }
}

impl From<String> for Seg {
    fn from(s: String) -> Self {
        Seg::Key(s)
    }
}

impl From<&str> for Seg {
    fn from(s: &str) -> Self {
        Seg::Key(s.to_owned())
    }
}

impl From<usize> for Seg {
    fn from(i: usize) -> Self {
        Seg::Index(i)
    }
}

/// An ordered sequence of segments locating a node in nested data.
///
/// An empty trail addresses the root itself.
///
/// # Examples
///
/// ```
/// use waymark_transform::{Seg, Trail};
///
/// let trail = Trail::parse("a.b[1].c[3][2]");
/// assert_eq!(
///     trail.segments(),
///     &[
///         Seg::key("a"),
///         Seg::key("b"),
///         Seg::index(1),
///         Seg::key("c"),
///         Seg::index(3),
///         Seg::index(2),
///     ]
/// );
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Trail(Vec<Seg>);

impl Trail {
    /// Create an empty trail (addresses the root).
    #[inline]
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Create a trail from a vector of segments.
    #[inline]
    pub fn from_segments(segments: Vec<Seg>) -> Self {
        Self(segments)
    }

    /// Parse a path expression into a trail.
    ///
    /// The expression is split on `.`; each dot-segment is split further on
    /// `[` and `]`, discarding empty tokens so consecutive delimiters never
    /// produce spurious empty keys. The first token of a dot-segment is
    /// always a literal string key (a top-level property named `0` stays a
    /// key) and every following token is coerced via
    /// [`Seg::coerce_bracket_token`].
    ///
    /// Parsing is infallible and preserves left-to-right order. Dot-segments
    /// with no tokens at all contribute nothing; rejecting them is the
    /// caller's validation concern, not the parser's.
    pub fn parse(expr: &str) -> Self {
        let mut segments = Vec::new();
        for part in expr.split('.') {
            let mut tokens = part.split(['[', ']']).filter(|t| !t.is_empty());
            let Some(head) = tokens.next() else { continue };
            segments.push(Seg::Key(head.to_owned()));
            segments.extend(tokens.map(Seg::coerce_bracket_token));
        }
        Self(segments)
    }

    /// Append a key segment and return self (builder pattern).
    #[inline]
    pub fn key(mut self, k: impl Into<String>) -> Self {
        self.0.push(Seg::Key(k.into()));
        self
    }

    /// Append an index segment and return self (builder pattern).
    #[inline]
    pub fn index(mut self, i: usize) -> Self {
        self.0.push(Seg::Index(i));
        self
    }

    /// Push a segment onto the trail (mutating).
    #[inline]
    pub fn push(&mut self, seg: Seg) {
        self.0.push(seg);
    }

    /// Get the segments of this trail.
    #[inline]
    pub fn segments(&self) -> &[Seg] {
        &self.0
    }

    /// Check if this trail is empty (addresses the root).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get the number of segments in this trail.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate over the segments.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &Seg> {
        self.0.iter()
    }
}

impl From<&str> for Trail {
    fn from(expr: &str) -> Self {
        Trail::parse(expr)
    }
}

impl fmt::Display for Trail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, seg) in self.0.iter().enumerate() {
            match seg {
                Seg::Key(k) if i == 0 => write!(f, "{k}")?,
                Seg::Key(k) => write!(f, ".{k}")?,
                Seg::Index(n) => write!(f, "[{n}]")?,
            }
        }
        Ok(())
    }
}

impl FromIterator<Seg> for Trail {
    fn from_iter<I: IntoIterator<Item = Seg>>(iter: I) -> Self {
        Trail(iter.into_iter().collect())
    }
}

impl IntoIterator for Trail {
    type Item = Seg;
    type IntoIter = std::vec::IntoIter<Seg>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Trail {
    type Item = &'a Seg;
    type IntoIter = std::slice::Iter<'a, Seg>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Build a [`Trail`] from segment expressions.
///
/// ```
/// use waymark_transform::{trail, Trail};
///
/// let t = trail!("users", 0, "name");
/// assert_eq!(t, Trail::parse("users[0].name"));
/// ```
#[macro_export]
macro_rules! trail {
    () => {
        $crate::Trail::root()
    };
    ($($seg:expr),+ $(,)?) => {{
        let mut t = $crate::Trail::root();
        $(
            t.push($crate::Seg::from($seg));
        )+
        t
    }};
}
