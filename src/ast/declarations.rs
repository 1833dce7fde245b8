use std::{fmt::Display, slice::Iter};

/// A property value in canonical form: component texts separated by single
/// spaces, without any `!important` suffix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Value {
    text: String,
}

impl Value {
    pub fn new(text: impl Into<String>) -> Self {
        Value { text: text.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// A declared property. `known` is false for the opaque placeholder used when
/// a name did not resolve or the parser was told to keep declarations opaque.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    name: String,
    value: Option<Value>,
    important: bool,
    known: bool,
}

impl Property {
    pub fn new(name: impl Into<String>) -> Self {
        Property {
            name: name.into(),
            value: None,
            important: false,
            known: true,
        }
    }

    /// Opaque placeholder. Names are ASCII-lowercased like resolved ones,
    /// except custom properties (`--*`), which are case-sensitive.
    pub fn unknown(name: impl Into<String>) -> Self {
        let mut name = name.into();
        if !name.starts_with("--") {
            name.make_ascii_lowercase();
        }
        Property {
            known: false,
            ..Property::new(name)
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    pub fn is_important(&self) -> bool {
        self.important
    }

    pub fn is_known(&self) -> bool {
        self.known
    }

    pub fn set_value(&mut self, value: Value, important: bool) {
        self.value = Some(value);
        self.important = important;
    }
}

impl Display for Property {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:", self.name)?;
        if let Some(value) = &self.value {
            write!(f, " {}", value)?;
        }
        if self.important {
            write!(f, " !important")?;
        }
        Ok(())
    }
}

/// The declarations of one rule body. Setting a property that is already
/// present replaces it in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeclarationBlock {
    properties: Vec<Property>,
}

impl DeclarationBlock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, property: Property) {
        match self.properties.iter_mut().find(|p| p.name == property.name) {
            Some(existing) => *existing = property,
            None => self.properties.push(property),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.name == name)
    }

    pub fn get_value(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(|p| p.value()).map(|v| v.as_str())
    }

    pub fn is_important(&self, name: &str) -> bool {
        self.get(name).is_some_and(|p| p.important)
    }

    pub fn remove(&mut self, name: &str) -> Option<Property> {
        let index = self.properties.iter().position(|p| p.name == name)?;
        Some(self.properties.remove(index))
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, Property> {
        self.properties.iter()
    }
}

impl Display for DeclarationBlock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for property in &self.properties {
            if !first {
                write!(f, " ")?;
            }
            write!(f, "{};", property)?;
            first = false;
        }
        Ok(())
    }
}
