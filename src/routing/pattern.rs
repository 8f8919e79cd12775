//! Path pattern module
//!
//! Parses templates such as `/hello/{name}` and matches concrete paths
//! segment by segment.

use super::Params;
use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Placeholder(String),
}

/// A parsed route pattern
#[derive(Debug, Clone)]
pub struct PathPattern {
    raw: String,
    segments: Vec<Segment>,
}

impl PathPattern {
    /// Parse a pattern string
    ///
    /// A placeholder must occupy a whole segment and names must be unique.
    pub fn parse(raw: &str) -> Result<Self> {
        let invalid = |reason| Error::InvalidPattern {
            pattern: raw.to_string(),
            reason,
        };

        if !raw.starts_with('/') {
            return Err(invalid("pattern must start with '/'"));
        }

        let mut segments = Vec::new();
        for part in raw.split('/') {
            let segment = match part.strip_prefix('{').and_then(|p| p.strip_suffix('}')) {
                Some(name) if name.is_empty() => return Err(invalid("empty placeholder name")),
                Some(name) if name.contains(['{', '}']) => {
                    return Err(invalid("nested braces in placeholder"))
                }
                Some(name) => {
                    if segments
                        .iter()
                        .any(|s| matches!(s, Segment::Placeholder(n) if n == name))
                    {
                        return Err(invalid("duplicate placeholder name"));
                    }
                    Segment::Placeholder(name.to_string())
                }
                None if part.contains(['{', '}']) => {
                    return Err(invalid("placeholder must span a whole segment"))
                }
                None => Segment::Literal(part.to_string()),
            };
            segments.push(segment);
        }

        Ok(Self {
            raw: raw.to_string(),
            segments,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Match a request path, returning the captured placeholders
    pub fn matches(&self, path: &str) -> Option<Params> {
        let mut params = Params::new();
        let mut parts = path.split('/');

        for segment in &self.segments {
            let part = parts.next()?;
            match segment {
                Segment::Literal(literal) if literal == part => {}
                Segment::Placeholder(name) if !part.is_empty() => params.push(name, part),
                _ => return None,
            }
        }

        // Segment counts must be equal
        if parts.next().is_some() {
            return None;
        }

        Some(params)
    }
}
