use std::fmt::Display;

use crate::Span;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,
    Ident,
    Function,   // name(
    AtKeyword,  // @name
    Hash,       // #name
    String,
    BadString,
    Url,        // url(unquoted)
    BadUrl,
    Number,
    Percentage,
    Dimension,
    UnicodeRange,

    // Trivia
    Whitespace,
    Comment,
    CDO, // <!--
    CDC, // -->

    Colon,
    Semicolon,
    Comma,

    OpenBracket,
    CloseBracket,
    OpenParen,
    CloseParen,
    OpenCurly,
    CloseCurly,

    IncludeMatch,   // ~=
    DashMatch,      // |=
    PrefixMatch,    // ^=
    SuffixMatch,    // $=
    SubstringMatch, // *=
    Column,         // ||

    Delim,
}

impl TokenKind {
    /// Whitespace, comments and the HTML comment markers carry no meaning in
    /// the grammar and are only kept when the parser records a CST.
    pub fn is_trivia(&self) -> bool {
        matches!(
            self,
            TokenKind::Whitespace | TokenKind::Comment | TokenKind::CDO | TokenKind::CDC
        )
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// One lexical token. `value` is the exact source text the token covers, so
/// concatenating the values of a token stream reproduces its input.
#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub span: Span,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Token {{\nkind: {},\nvalue: {}}}", self.kind, self.value)
    }
}

impl Token {
    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    pub fn is_one_of(&self, kinds: &[TokenKind]) -> bool {
        kinds.contains(&self.kind)
    }

    /// True for an identifier spelled `keyword`, ignoring ASCII case.
    pub fn is_ident(&self, keyword: &str) -> bool {
        self.kind == TokenKind::Ident && self.value.eq_ignore_ascii_case(keyword)
    }

    pub fn is_delim(&self, delim: char) -> bool {
        self.kind == TokenKind::Delim && self.value.starts_with(delim)
    }

    /// Name of an at-keyword or function token, without the sigil or paren.
    pub fn name(&self) -> &str {
        match self.kind {
            TokenKind::AtKeyword => &self.value[1..],
            TokenKind::Function => &self.value[..self.value.len() - 1],
            TokenKind::Hash => &self.value[1..],
            _ => &self.value,
        }
    }

    /// Contents of a string token with the quotes removed and escapes resolved.
    pub fn unquoted(&self) -> String {
        let inner = match self.kind {
            TokenKind::String => &self.value[1..self.value.len() - 1],
            TokenKind::BadString => &self.value[1..],
            _ => &self.value,
        };
        unescape(inner)
    }

    /// Argument of an unquoted `url(...)` token.
    pub fn url_value(&self) -> String {
        match self.kind {
            TokenKind::Url => {
                let open = self.value.find('(').map_or(0, |i| i + 1);
                let close = self.value.len() - 1;
                unescape(self.value[open..close].trim())
            }
            _ => self.unquoted(),
        }
    }

    pub fn debug(&self) {
        if self.is_one_of(&[TokenKind::Whitespace, TokenKind::EOF]) {
            println!("{} ()", self.kind);
        } else {
            println!("{} ({})", self.kind, self.value);
        }
    }
}

fn unescape(text: &str) -> String {
    let mut result = String::new();
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            result.push(ch);
            continue;
        }

        let mut hex = String::new();
        while hex.len() < 6 {
            match chars.peek() {
                Some(c) if c.is_ascii_hexdigit() => {
                    hex.push(*c);
                    chars.next();
                }
                _ => break,
            }
        }

        if hex.is_empty() {
            match chars.next() {
                // Escaped newline is a line continuation
                Some('\n') | None => {}
                Some(other) => result.push(other),
            }
        } else {
            if chars.peek().is_some_and(|c| c.is_whitespace()) {
                chars.next();
            }
            let code = u32::from_str_radix(&hex, 16).unwrap_or(0xFFFD);
            result.push(char::from_u32(code).unwrap_or('\u{FFFD}'));
        }
    }

    result
}
