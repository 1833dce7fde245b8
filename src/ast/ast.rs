use super::{
    conditions::Condition,
    declarations::{Property, Value},
    media::{Feature, MediaList, Medium},
    rules::{KeyframeRule, Rule, SelectorList, Stylesheet},
};

/// The semantic result attached to a CST frame when it closes.
#[derive(Debug, Clone, PartialEq)]
pub enum Entity {
    Stylesheet(Stylesheet),
    Rule(Rule),
    Declaration(Property),
    Condition(Condition),
    MediaList(MediaList),
    Medium(Medium),
    Feature(Feature),
    Selector(SelectorList),
    Value(Value),
}

/// Entity kept by the CST frame of a production result.
pub trait ToEntity {
    fn to_entity(&self) -> Entity;
}

macro_rules! impl_to_entity {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl ToEntity for $ty {
                fn to_entity(&self) -> Entity {
                    Entity::$variant(self.clone())
                }
            }
        )*
    };
}

impl_to_entity! {
    Stylesheet => Stylesheet,
    Property => Declaration,
    Condition => Condition,
    MediaList => MediaList,
    Medium => Medium,
    Feature => Feature,
    SelectorList => Selector,
    Value => Value,
}

/// Rules are kept without their nested rules; each nested rule is the
/// entity of its own child frame.
impl ToEntity for Rule {
    fn to_entity(&self) -> Entity {
        Entity::Rule(self.without_children())
    }
}

impl ToEntity for KeyframeRule {
    fn to_entity(&self) -> Entity {
        Entity::Rule(Rule::Keyframe(self.clone()))
    }
}
