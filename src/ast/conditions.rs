use std::fmt::Display;

use super::declarations::Property;

/// A boolean feature/support condition.
///
/// `And` and `Or` are n-ary: `a and b and c` is one node with three
/// children, never nested pairs.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Condition {
    #[default]
    Empty,
    Declaration(Property),
    Group(Box<Condition>),
    Not(Box<Condition>),
    And(Vec<Condition>),
    Or(Vec<Condition>),
}

/// Shared "no condition" value.
pub static EMPTY_CONDITION: Condition = Condition::Empty;

impl Condition {
    pub fn empty() -> &'static Condition {
        &EMPTY_CONDITION
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Condition::Empty)
    }

    /// Evaluates the condition. A missing condition counts as supported; a
    /// declaration is supported when its property is known and has a value.
    pub fn is_supported(&self) -> bool {
        match self {
            Condition::Empty => true,
            Condition::Declaration(property) => property.is_known() && property.value().is_some(),
            Condition::Group(inner) => inner.is_supported(),
            Condition::Not(inner) => !inner.is_supported(),
            Condition::And(conditions) => conditions.iter().all(Condition::is_supported),
            Condition::Or(conditions) => conditions.iter().any(Condition::is_supported),
        }
    }
}

fn write_joined(f: &mut std::fmt::Formatter<'_>, conditions: &[Condition], connector: &str) -> std::fmt::Result {
    for (index, condition) in conditions.iter().enumerate() {
        if index > 0 {
            write!(f, " {} ", connector)?;
        }
        write!(f, "{}", condition)?;
    }
    Ok(())
}

impl Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Condition::Empty => Ok(()),
            Condition::Declaration(property) => write!(f, "{}", property),
            Condition::Group(inner) => write!(f, "({})", inner),
            Condition::Not(inner) => write!(f, "not {}", inner),
            Condition::And(conditions) => write_joined(f, conditions, "and"),
            Condition::Or(conditions) => write_joined(f, conditions, "or"),
        }
    }
}
