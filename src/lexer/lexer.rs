use std::rc::Rc;

use lazy_static::lazy_static;
use regex::Regex;

use crate::{errors::errors::{Error, ErrorImpl}, Position, Span, MK_DEFAULT_HANDLER, MK_MATCH_HANDLER, MK_TOKEN};

use super::tokens::{Token, TokenKind};

pub type RegexHandler = fn(&mut Lexer, &Regex);

pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
}

const NMSTART: &str = r"(?:[a-zA-Z_]|[^\x00-\x7F]|\\[^\n\r\x0C])";
const NMCHAR: &str = r"(?:[a-zA-Z0-9_-]|[^\x00-\x7F]|\\[^\n\r\x0C])";
const NUM: &str = r"[+-]?(?:[0-9]*\.[0-9]+|[0-9]+)(?:[eE][+-]?[0-9]+)?";
const WS: &str = r"[ \t\r\n\x0C]";

fn ident() -> String {
    format!("(?:--|-?{NMSTART}){NMCHAR}*")
}

/// Whether `text` lexes as exactly one identifier token.
pub fn is_identifier(text: &str) -> bool {
    IDENTIFIER.is_match(text)
}

fn anchored(pattern: &str) -> Regex {
    // Patterns come from this file only; a typo is a programming error.
    Regex::new(&format!("^(?:{pattern})")).unwrap()
}

macro_rules! pattern {
    ($regex:expr, $handler:expr) => {
        RegexPattern { regex: anchored(&$regex), handler: $handler }
    };
}

lazy_static! {
    static ref IDENTIFIER: Regex = Regex::new(&format!("^{}$", ident())).unwrap();

    /// Tokenizer rules, tried in order; the first rule matching at the
    /// current offset wins.
    static ref PATTERNS: Vec<RegexPattern> = vec![
        pattern!(r"/\*(?s:.*?)(?:\*/|$)", MK_MATCH_HANDLER!(TokenKind::Comment)),
        pattern!(format!("{WS}+"), MK_MATCH_HANDLER!(TokenKind::Whitespace)),
        pattern!("<!--", MK_DEFAULT_HANDLER!(TokenKind::CDO, "<!--")),
        pattern!("-->", MK_DEFAULT_HANDLER!(TokenKind::CDC, "-->")),
        pattern!(format!(r#"(?i:url)\({WS}*[^"'()\\ \t\r\n\x0C]*{WS}*\)"#), MK_MATCH_HANDLER!(TokenKind::Url)),
        pattern!(format!(r#"(?i:url)\({WS}*[^"'){WS}][^)]*\)?"#, WS = r"\s"), MK_MATCH_HANDLER!(TokenKind::BadUrl)),
        pattern!(r"[uU]\+[0-9a-fA-F?]{1,6}(?:-[0-9a-fA-F]{1,6})?", MK_MATCH_HANDLER!(TokenKind::UnicodeRange)),
        pattern!(format!(r"{NUM}{}", ident()), MK_MATCH_HANDLER!(TokenKind::Dimension)),
        pattern!(format!(r"{NUM}%"), MK_MATCH_HANDLER!(TokenKind::Percentage)),
        pattern!(NUM.to_string(), MK_MATCH_HANDLER!(TokenKind::Number)),
        pattern!(format!(r"{}\(", ident()), MK_MATCH_HANDLER!(TokenKind::Function)),
        pattern!(ident(), MK_MATCH_HANDLER!(TokenKind::Ident)),
        pattern!(format!("@{}", ident()), MK_MATCH_HANDLER!(TokenKind::AtKeyword)),
        pattern!(format!("#{NMCHAR}+"), MK_MATCH_HANDLER!(TokenKind::Hash)),
        pattern!(r#""(?:[^"\\\n\r\x0C]|\\(?s:.))*"|'(?:[^'\\\n\r\x0C]|\\(?s:.))*'"#, MK_MATCH_HANDLER!(TokenKind::String)),
        pattern!(r#""(?:[^"\\\n\r\x0C]|\\(?s:.))*|'(?:[^'\\\n\r\x0C]|\\(?s:.))*"#, MK_MATCH_HANDLER!(TokenKind::BadString)),
        pattern!("~=", MK_DEFAULT_HANDLER!(TokenKind::IncludeMatch, "~=")),
        pattern!(r"\|=", MK_DEFAULT_HANDLER!(TokenKind::DashMatch, "|=")),
        pattern!(r"\^=", MK_DEFAULT_HANDLER!(TokenKind::PrefixMatch, "^=")),
        pattern!(r"\$=", MK_DEFAULT_HANDLER!(TokenKind::SuffixMatch, "$=")),
        pattern!(r"\*=", MK_DEFAULT_HANDLER!(TokenKind::SubstringMatch, "*=")),
        pattern!(r"\|\|", MK_DEFAULT_HANDLER!(TokenKind::Column, "||")),
        pattern!(":", MK_DEFAULT_HANDLER!(TokenKind::Colon, ":")),
        pattern!(";", MK_DEFAULT_HANDLER!(TokenKind::Semicolon, ";")),
        pattern!(",", MK_DEFAULT_HANDLER!(TokenKind::Comma, ",")),
        pattern!(r"\[", MK_DEFAULT_HANDLER!(TokenKind::OpenBracket, "[")),
        pattern!(r"\]", MK_DEFAULT_HANDLER!(TokenKind::CloseBracket, "]")),
        pattern!(r"\(", MK_DEFAULT_HANDLER!(TokenKind::OpenParen, "(")),
        pattern!(r"\)", MK_DEFAULT_HANDLER!(TokenKind::CloseParen, ")")),
        pattern!(r"\{", MK_DEFAULT_HANDLER!(TokenKind::OpenCurly, "{")),
        pattern!(r"\}", MK_DEFAULT_HANDLER!(TokenKind::CloseCurly, "}")),
        pattern!(r"(?s:.)", MK_MATCH_HANDLER!(TokenKind::Delim)),
    ];
}

pub struct Lexer {
    tokens: Vec<Token>,
    source: String,
    pos: usize,
    file: Rc<String>,
}

impl Lexer {
    pub fn new(source: String, file: Option<String>) -> Lexer {
        let file_name = if let Some(file) = file {
            Rc::new(file)
        } else {
            Rc::new(String::from("<inline>"))
        };

        Lexer {
            pos: 0,
            tokens: vec![],
            source,
            file: file_name,
        }
    }

    fn position(&self, offset: usize) -> Position {
        Position(offset as u32, Rc::clone(&self.file))
    }

    /// Pushes a token covering the next `len` bytes and advances past them.
    pub fn emit(&mut self, kind: TokenKind, len: usize) {
        let start = self.pos;
        let end = start + len;
        let value = String::from(&self.source[start..end]);

        self.tokens.push(MK_TOKEN!(kind, value, Span { start: self.position(start), end: self.position(end) }));
        self.pos = end;
    }

    pub fn remainder(&self) -> &str {
        &self.source[self.pos..]
    }

    pub fn at(&self) -> char {
        self.remainder().chars().next().unwrap_or('\0')
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }
}

/// Splits CSS source text into tokens, trivia included, followed by one
/// `EOF` token.
pub fn tokenize(source: String, file: Option<String>) -> Result<Vec<Token>, Error> {
    let mut lex = Lexer::new(source, file);

    while !lex.at_eof() {
        let before = lex.pos;

        for pattern in PATTERNS.iter() {
            if pattern.regex.is_match(lex.remainder()) {
                (pattern.handler)(&mut lex, &pattern.regex);
                if lex.pos > before {
                    break;
                }
            }
        }

        if lex.pos == before {
            return Err(Error::new(ErrorImpl::UnrecognisedToken { token: lex.at().to_string() }, lex.position(lex.pos)));
        }
    }

    let end = lex.position(lex.pos);
    lex.tokens.push(MK_TOKEN!(TokenKind::EOF, String::new(), Span { start: end.clone(), end }));
    Ok(lex.tokens)
}
