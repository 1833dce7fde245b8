use std::{fmt::Display, slice::Iter};

use super::declarations::Value;

/// One parenthesized media feature, e.g. `(min-width: 10px)` or `(color)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    pub name: String,
    pub value: Option<Value>,
}

impl Feature {
    pub fn new(name: impl Into<String>) -> Self {
        Feature {
            name: name.into(),
            value: None,
        }
    }
}

impl Display for Feature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.value {
            Some(value) => write!(f, "({}: {})", self.name, value),
            None => write!(f, "({})", self.name),
        }
    }
}

/// A single media query. A query made only of features has type `all`.
#[derive(Debug, Clone, PartialEq)]
pub struct Medium {
    pub type_name: String,
    pub is_inverse: bool,
    pub is_exclusive: bool,
    pub constraints: Vec<Feature>,
}

impl Medium {
    pub fn new(type_name: impl Into<String>) -> Self {
        Medium {
            type_name: type_name.into(),
            is_inverse: false,
            is_exclusive: false,
            constraints: vec![],
        }
    }

    /// `not all`: the medium a malformed media list collapses to.
    pub fn not_all() -> Self {
        Medium {
            is_inverse: true,
            ..Medium::new("all")
        }
    }

    pub fn is_not_all(&self) -> bool {
        self.is_inverse && self.type_name == "all" && self.constraints.is_empty()
    }
}

impl Display for Medium {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let implicit_type = self.type_name == "all"
            && !self.constraints.is_empty()
            && !self.is_inverse
            && !self.is_exclusive;

        if !implicit_type {
            if self.is_inverse {
                write!(f, "not ")?;
            } else if self.is_exclusive {
                write!(f, "only ")?;
            }
            write!(f, "{}", self.type_name)?;
        }

        for (index, feature) in self.constraints.iter().enumerate() {
            if index > 0 || !implicit_type {
                write!(f, " and ")?;
            }
            write!(f, "{}", feature)?;
        }
        Ok(())
    }
}

/// Comma separated media queries. Either every member parsed, or the list
/// holds the single `not all` fallback.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MediaList {
    media: Vec<Medium>,
}

impl MediaList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, media: Vec<Medium>) {
        self.media = media;
    }

    pub fn replace_with_fallback(&mut self) {
        self.media = vec![Medium::not_all()];
    }

    /// True when the list is the fallback produced for a malformed query.
    pub fn is_not_all(&self) -> bool {
        self.media.len() == 1 && self.media[0].is_not_all()
    }

    pub fn media_text(&self) -> String {
        self.to_string()
    }

    pub fn len(&self) -> usize {
        self.media.len()
    }

    pub fn is_empty(&self) -> bool {
        self.media.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Medium> {
        self.media.get(index)
    }

    pub fn iter(&self) -> Iter<'_, Medium> {
        self.media.iter()
    }
}

impl Display for MediaList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (index, medium) in self.media.iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", medium)?;
        }
        Ok(())
    }
}
