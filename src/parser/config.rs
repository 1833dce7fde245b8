/// Switches that change how forgiving the parser is and whether it records
/// a concrete syntax tree. Read-only once handed to a parser.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParserConfig {
    /// Record every token, trivia included, into CST frames.
    pub store_trivia: bool,
    /// Keep unrecognised at-rules verbatim instead of skipping them.
    pub allow_unknown_rules: bool,
    /// Keep every declaration as an opaque property, resolved or not.
    pub allow_unknown_declarations: bool,
    /// Keep values the value grammar rejects instead of dropping them.
    pub tolerate_invalid_values: bool,
    /// Accept media features the factory does not know.
    pub tolerate_invalid_constraints: bool,
}

impl ParserConfig {
    /// Everything forgiving, no CST.
    pub fn tolerant() -> Self {
        ParserConfig {
            store_trivia: false,
            allow_unknown_rules: true,
            allow_unknown_declarations: true,
            tolerate_invalid_values: true,
            tolerate_invalid_constraints: true,
        }
    }

    pub fn with_store_trivia(mut self, value: bool) -> Self {
        self.store_trivia = value;
        self
    }

    pub fn with_unknown_rules(mut self, value: bool) -> Self {
        self.allow_unknown_rules = value;
        self
    }

    pub fn with_unknown_declarations(mut self, value: bool) -> Self {
        self.allow_unknown_declarations = value;
        self
    }

    pub fn with_invalid_values(mut self, value: bool) -> Self {
        self.tolerate_invalid_values = value;
        self
    }

    pub fn with_invalid_constraints(mut self, value: bool) -> Self {
        self.tolerate_invalid_constraints = value;
        self
    }

    /// Declarations are kept opaque instead of being resolved by name.
    pub fn opaque_declarations(&self) -> bool {
        self.allow_unknown_declarations || self.tolerate_invalid_values
    }
}
