use std::fmt::Display;

use crate::{
    errors::errors::{Error, ErrorImpl},
    lexer::{lexer::is_identifier, tokens::Token},
    parser::{
        config::ParserConfig,
        parser::{parse_condition_text, parse_keyframe_text, parse_rule_text},
    },
    Position,
};

use super::{conditions::Condition, declarations::DeclarationBlock, media::MediaList};

/// Rule Types
#[derive(Debug, Clone, PartialEq)]
pub enum Rule {
    Style(StyleRule),
    Media(MediaRule),
    Supports(SupportsRule),
    FontFace(FontFaceRule),
    Keyframes(KeyframesRule),
    Import(ImportRule),
    Charset(CharsetRule),
    Namespace(NamespaceRule),
    Page(PageRule),
    Viewport(ViewportRule),
    Document(DocumentRule),
    Keyframe(KeyframeRule),
    Unknown(UnknownRule),
}

impl Rule {
    /// The nested rule list of `@media`, `@supports` and `@document`.
    pub fn as_grouping(&self) -> Option<&dyn RuleList> {
        match self {
            Rule::Media(rule) => Some(rule),
            Rule::Supports(rule) => Some(rule),
            Rule::Document(rule) => Some(rule),
            _ => None,
        }
    }

    pub fn as_grouping_mut(&mut self) -> Option<&mut dyn RuleList> {
        match self {
            Rule::Media(rule) => Some(rule),
            Rule::Supports(rule) => Some(rule),
            Rule::Document(rule) => Some(rule),
            _ => None,
        }
    }

    /// Copy of the rule with the nested rule list of grouping rules and
    /// `@keyframes` left empty.
    pub fn without_children(&self) -> Rule {
        match self {
            Rule::Media(rule) => Rule::Media(MediaRule {
                media: rule.media.clone(),
                rules: vec![],
            }),
            Rule::Supports(rule) => Rule::Supports(SupportsRule {
                condition: rule.condition.clone(),
                rules: vec![],
            }),
            Rule::Document(rule) => Rule::Document(DocumentRule {
                functions: rule.functions.clone(),
                rules: vec![],
            }),
            Rule::Keyframes(rule) => Rule::Keyframes(KeyframesRule {
                name: rule.name.clone(),
                rules: vec![],
            }),
            other => other.clone(),
        }
    }

    /// The declaration block of rules whose body is a declaration list.
    pub fn declarations(&self) -> Option<&DeclarationBlock> {
        match self {
            Rule::Style(rule) => Some(&rule.declarations),
            Rule::FontFace(rule) => Some(&rule.declarations),
            Rule::Page(rule) => Some(&rule.declarations),
            Rule::Viewport(rule) => Some(&rule.declarations),
            Rule::Keyframe(rule) => Some(&rule.declarations),
            _ => None,
        }
    }
}

/// Ordered child rules, shared by the stylesheet and grouping rules.
///
/// Mutations replace whole rules; a rule inserted from text must parse as
/// exactly one rule.
pub trait RuleList {
    fn rules(&self) -> &[Rule];
    fn rules_mut(&mut self) -> &mut Vec<Rule>;

    fn insert_rule(&mut self, text: &str, index: usize) -> Result<usize, Error> {
        let length = self.rules().len();
        if index > length {
            return Err(Error::new(ErrorImpl::IndexSizeError { index, length }, Position::null()));
        }

        let rule = parse_rule_text(text, ParserConfig::default())?;
        self.rules_mut().insert(index, rule);
        Ok(index)
    }

    fn delete_rule(&mut self, index: usize) -> Result<Rule, Error> {
        let length = self.rules().len();
        if index >= length {
            return Err(Error::new(ErrorImpl::IndexSizeError { index, length }, Position::null()));
        }

        Ok(self.rules_mut().remove(index))
    }

    fn replace_rule(&mut self, index: usize, rule: Rule) -> Result<Rule, Error> {
        let length = self.rules().len();
        match self.rules_mut().get_mut(index) {
            Some(slot) => Ok(std::mem::replace(slot, rule)),
            None => Err(Error::new(ErrorImpl::IndexSizeError { index, length }, Position::null())),
        }
    }
}

/// Normalized comma separated selectors of a style rule.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectorList(pub Vec<String>);

impl Display for SelectorList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.join(", "))
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Stylesheet {
    pub rules: Vec<Rule>,
}

impl RuleList for Stylesheet {
    fn rules(&self) -> &[Rule] {
        &self.rules
    }
    fn rules_mut(&mut self) -> &mut Vec<Rule> {
        &mut self.rules
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleRule {
    pub selectors: SelectorList,
    pub declarations: DeclarationBlock,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MediaRule {
    pub media: MediaList,
    pub rules: Vec<Rule>,
}

impl RuleList for MediaRule {
    fn rules(&self) -> &[Rule] {
        &self.rules
    }
    fn rules_mut(&mut self) -> &mut Vec<Rule> {
        &mut self.rules
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SupportsRule {
    pub condition: Condition,
    pub rules: Vec<Rule>,
}

impl SupportsRule {
    pub fn condition_text(&self) -> String {
        self.condition.to_string()
    }

    /// Replaces the condition with one parsed from `text`. Unlike stream
    /// parsing this does not recover: text that is not exactly one
    /// condition is a `SyntaxError` and leaves the rule untouched.
    pub fn set_condition_text(&mut self, text: &str) -> Result<(), Error> {
        self.condition = parse_condition_text(text)?;
        Ok(())
    }
}

impl RuleList for SupportsRule {
    fn rules(&self) -> &[Rule] {
        &self.rules
    }
    fn rules_mut(&mut self) -> &mut Vec<Rule> {
        &mut self.rules
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FontFaceRule {
    pub declarations: DeclarationBlock,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeyframesRule {
    pub name: String,
    pub rules: Vec<KeyframeRule>,
}

impl KeyframesRule {
    pub fn find_rule(&self, key: &str) -> Option<&KeyframeRule> {
        let key = normalize_keyframe_key(key);
        self.rules.iter().rev().find(|rule| rule.keys == [key.clone()])
    }

    pub fn append_rule(&mut self, text: &str) -> Result<(), Error> {
        self.rules.push(parse_keyframe_text(text)?);
        Ok(())
    }
}

/// `from` and `to` are aliases of `0%` and `100%`.
pub fn normalize_keyframe_key(key: &str) -> String {
    let key = key.trim();
    if key.eq_ignore_ascii_case("from") {
        String::from("0%")
    } else if key.eq_ignore_ascii_case("to") {
        String::from("100%")
    } else {
        key.to_string()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeyframeRule {
    pub keys: Vec<String>,
    pub declarations: DeclarationBlock,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportRule {
    pub href: String,
    pub media: MediaList,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CharsetRule {
    pub encoding: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NamespaceRule {
    pub prefix: Option<String>,
    pub uri: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageRule {
    pub selector: Option<String>,
    pub declarations: DeclarationBlock,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewportRule {
    pub declarations: DeclarationBlock,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFunctionKind {
    Url,
    UrlPrefix,
    Domain,
    Regexp,
}

impl DocumentFunctionKind {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "url" => Some(DocumentFunctionKind::Url),
            "url-prefix" => Some(DocumentFunctionKind::UrlPrefix),
            "domain" => Some(DocumentFunctionKind::Domain),
            "regexp" => Some(DocumentFunctionKind::Regexp),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            DocumentFunctionKind::Url => "url",
            DocumentFunctionKind::UrlPrefix => "url-prefix",
            DocumentFunctionKind::Domain => "domain",
            DocumentFunctionKind::Regexp => "regexp",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DocumentFunction {
    pub kind: DocumentFunctionKind,
    pub argument: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentRule {
    pub functions: Vec<DocumentFunction>,
    pub rules: Vec<Rule>,
}

impl RuleList for DocumentRule {
    fn rules(&self) -> &[Rule] {
        &self.rules
    }
    fn rules_mut(&mut self) -> &mut Vec<Rule> {
        &mut self.rules
    }
}

/// An at-rule whose grammar is not understood, kept token for token.
///
/// `block` holds everything after the opening `{` up to and including the
/// matching `}`; it is `None` for statement-form rules ended by `;`.
#[derive(Debug, Clone, Default)]
pub struct UnknownRule {
    pub name: String,
    pub prelude: Vec<Token>,
    pub block: Option<Vec<Token>>,
}

fn token_texts(tokens: &[Token]) -> Vec<&str> {
    tokens.iter().map(|t| t.value.as_str()).collect()
}

// Token spans differ between two parses of the same text, so compare spelling only.
impl PartialEq for UnknownRule {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && token_texts(&self.prelude) == token_texts(&other.prelude)
            && self.block.as_deref().map(token_texts) == other.block.as_deref().map(token_texts)
    }
}

fn write_block(f: &mut std::fmt::Formatter<'_>, rules: &[Rule]) -> std::fmt::Result {
    write!(f, "{{")?;
    for rule in rules {
        write!(f, " {}", rule)?;
    }
    write!(f, " }}")
}

fn write_declarations(f: &mut std::fmt::Formatter<'_>, declarations: &DeclarationBlock) -> std::fmt::Result {
    if declarations.is_empty() {
        write!(f, "{{ }}")
    } else {
        write!(f, "{{ {} }}", declarations)
    }
}

fn write_keyframe(f: &mut std::fmt::Formatter<'_>, rule: &KeyframeRule) -> std::fmt::Result {
    write!(f, "{} ", rule.keys.join(", "))?;
    write_declarations(f, &rule.declarations)
}

fn quote(text: &str) -> String {
    format!("\"{}\"", text.replace('\\', "\\\\").replace('"', "\\\""))
}

impl Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rule::Style(rule) => {
                write!(f, "{} ", rule.selectors)?;
                write_declarations(f, &rule.declarations)
            }
            Rule::Media(rule) => {
                write!(f, "@media ")?;
                if !rule.media.is_empty() {
                    write!(f, "{} ", rule.media)?;
                }
                write_block(f, &rule.rules)
            }
            Rule::Supports(rule) => {
                write!(f, "@supports {} ", rule.condition)?;
                write_block(f, &rule.rules)
            }
            Rule::FontFace(rule) => {
                write!(f, "@font-face ")?;
                write_declarations(f, &rule.declarations)
            }
            Rule::Keyframes(rule) => {
                if is_identifier(&rule.name) {
                    write!(f, "@keyframes {} {{", rule.name)?;
                } else {
                    write!(f, "@keyframes {} {{", quote(&rule.name))?;
                }
                for keyframe in &rule.rules {
                    write!(f, " ")?;
                    write_keyframe(f, keyframe)?;
                }
                write!(f, " }}")
            }
            Rule::Import(rule) => {
                write!(f, "@import url({})", quote(&rule.href))?;
                if !rule.media.is_empty() {
                    write!(f, " {}", rule.media)?;
                }
                write!(f, ";")
            }
            Rule::Charset(rule) => write!(f, "@charset {};", quote(&rule.encoding)),
            Rule::Namespace(rule) => {
                write!(f, "@namespace ")?;
                if let Some(prefix) = &rule.prefix {
                    write!(f, "{} ", prefix)?;
                }
                write!(f, "url({});", quote(&rule.uri))
            }
            Rule::Page(rule) => {
                write!(f, "@page ")?;
                if let Some(selector) = &rule.selector {
                    write!(f, "{} ", selector)?;
                }
                write_declarations(f, &rule.declarations)
            }
            Rule::Viewport(rule) => {
                write!(f, "@viewport ")?;
                write_declarations(f, &rule.declarations)
            }
            Rule::Document(rule) => {
                write!(f, "@document ")?;
                for (index, function) in rule.functions.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}({})", function.kind.name(), quote(&function.argument))?;
                }
                write!(f, " ")?;
                write_block(f, &rule.rules)
            }
            Rule::Keyframe(rule) => write_keyframe(f, rule),
            Rule::Unknown(rule) => {
                write!(f, "@{}", rule.name)?;
                if !rule.prelude.is_empty() {
                    write!(f, " {}", token_texts(&rule.prelude).concat())?;
                }
                match &rule.block {
                    Some(block) => write!(f, " {{{}", token_texts(block).concat()),
                    None => write!(f, ";"),
                }
            }
        }
    }
}

impl Display for Stylesheet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (index, rule) in self.rules.iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", rule)?;
        }
        Ok(())
    }
}
