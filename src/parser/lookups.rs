use std::collections::HashMap;

use lazy_static::lazy_static;

/// At-rule productions the rule builder can dispatch to.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Hash)]
pub enum AtRuleKind {
    Media,
    FontFace,
    Keyframes,
    Import,
    Charset,
    Namespace,
    Page,
    Supports,
    Viewport,
    Document,
    Unknown,
}

lazy_static! {
    /// Lowercased at-keyword to production. Vendor spellings share the
    /// standard production.
    pub static ref AT_RULE_LOOKUP: HashMap<&'static str, AtRuleKind> = {
        let mut map = HashMap::new();
        map.insert("media", AtRuleKind::Media);
        map.insert("font-face", AtRuleKind::FontFace);
        map.insert("keyframes", AtRuleKind::Keyframes);
        map.insert("-webkit-keyframes", AtRuleKind::Keyframes);
        map.insert("-moz-keyframes", AtRuleKind::Keyframes);
        map.insert("import", AtRuleKind::Import);
        map.insert("charset", AtRuleKind::Charset);
        map.insert("namespace", AtRuleKind::Namespace);
        map.insert("page", AtRuleKind::Page);
        map.insert("supports", AtRuleKind::Supports);
        map.insert("viewport", AtRuleKind::Viewport);
        map.insert("-ms-viewport", AtRuleKind::Viewport);
        map.insert("document", AtRuleKind::Document);
        map.insert("-moz-document", AtRuleKind::Document);
        map
    };
}

/// Case-insensitive at-keyword lookup; anything unlisted is `Unknown`.
pub fn at_rule_kind(name: &str) -> AtRuleKind {
    AT_RULE_LOOKUP
        .get(name.to_ascii_lowercase().as_str())
        .copied()
        .unwrap_or(AtRuleKind::Unknown)
}
