//! Patch path grammar.
//!
//! Only two addressable roots exist: `/root` and `/elements/<key>`. Anything
//! deeper than the element key is a JSON pointer into that element.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchPath {
    /// `/root`
    Root,

    /// `/elements/<key>`
    Element { key: String },

    /// `/elements/<key>/<segment>/...`
    Field { key: String, pointer: Vec<String> },
}

impl PatchPath {
    /// Parse a raw path, returning `None` for anything outside the grammar
    pub fn parse(path: &str) -> Option<Self> {
        if path == "/root" {
            return Some(PatchPath::Root);
        }

        let rest = path.strip_prefix("/elements/")?;
        let mut segments = rest
            .split('/')
            .map(unescape_pointer_token)
            .collect::<Option<Vec<_>>>()?
            .into_iter();

        let key = segments.next().filter(|key| !key.is_empty())?;
        let pointer: Vec<String> = segments.collect();

        if pointer.is_empty() {
            Some(PatchPath::Element { key })
        } else {
            Some(PatchPath::Field { key, pointer })
        }
    }

    /// Element key addressed by this path, if any
    pub fn element_key(&self) -> Option<&str> {
        match self {
            PatchPath::Root => None,
            PatchPath::Element { key } | PatchPath::Field { key, .. } => Some(key),
        }
    }
}

impl fmt::Display for PatchPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatchPath::Root => write!(f, "/root"),
            PatchPath::Element { key } => write!(f, "/elements/{}", escape_pointer_token(key)),
            PatchPath::Field { key, pointer } => {
                write!(f, "/elements/{}", escape_pointer_token(key))?;
                for segment in pointer {
                    write!(f, "/{}", escape_pointer_token(segment))?;
                }
                Ok(())
            }
        }
    }
}

/// RFC 6901 token unescape (`~1` → `/`, `~0` → `~`)
fn unescape_pointer_token(token: &str) -> Option<String> {
    let mut out = String::with_capacity(token.len());
    let mut chars = token.chars();

    while let Some(ch) = chars.next() {
        if ch == '~' {
            match chars.next() {
                Some('0') => out.push('~'),
                Some('1') => out.push('/'),
                _ => return None,
            }
        } else {
            out.push(ch);
        }
    }

    Some(out)
}

fn escape_pointer_token(token: &str) -> String {
    token.replace('~', "~0").replace('/', "~1")
}
