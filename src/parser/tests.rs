//! Unit tests for the parser module.
//!
//! This module contains tests for parsing the supported constructs including:
//! - Style rules, selectors and declarations
//! - Grouping rules (`@media`, `@supports`, `@document`)
//! - Statement at-rules and unknown at-rules
//! - Condition flattening
//! - Error recovery and the concrete syntax tree

use crate::{
    ast::{
        ast::Entity,
        conditions::Condition,
        rules::{DocumentFunctionKind, Rule, RuleList, Stylesheet},
    },
    lexer::{lexer::tokenize, tokens::Token},
};

use super::{
    config::ParserConfig,
    parser::{
        parse, parse_condition, parse_declaration_list, parse_media_list, parse_rule_text, parse_selector,
        parse_value, Parser,
    },
};

fn lex(source: &str) -> Vec<Token> {
    tokenize(source.to_string(), Some("test.css".to_string())).unwrap()
}

fn parse_source(source: &str, config: ParserConfig) -> (Parser, Stylesheet) {
    parse(lex(source), config)
}

fn error_names(parser: &Parser) -> Vec<&str> {
    parser.diagnostics().iter().map(|e| e.get_error_name()).collect()
}

fn only_rule(stylesheet: &Stylesheet) -> &Rule {
    assert_eq!(stylesheet.rules.len(), 1, "expected one rule in {:?}", stylesheet);
    &stylesheet.rules[0]
}

#[test]
fn test_parse_style_rule() {
    let (parser, stylesheet) = parse_source("a { color: red; margin: 0 }", ParserConfig::default());

    assert!(parser.diagnostics().is_empty());
    let Rule::Style(rule) = only_rule(&stylesheet) else {
        panic!("expected a style rule");
    };
    assert_eq!(rule.selectors.0, vec!["a"]);
    assert_eq!(rule.declarations.get_value("color"), Some("red"));
    assert_eq!(rule.declarations.get_value("margin"), Some("0"));
}

#[test]
fn test_parse_last_declaration_wins() {
    let (_, stylesheet) = parse_source("a { color: red; width: 1px; color: blue }", ParserConfig::default());

    let declarations = only_rule(&stylesheet).declarations().unwrap();
    assert_eq!(declarations.len(), 2);
    assert_eq!(declarations.get_value("color"), Some("blue"));
    assert_eq!(declarations.iter().next().unwrap().name(), "color");
}

#[test]
fn test_parse_important() {
    let (parser, stylesheet) = parse_source("a { color: red !important; width: 1px }", ParserConfig::default());

    assert!(parser.diagnostics().is_empty());
    let declarations = only_rule(&stylesheet).declarations().unwrap();
    assert_eq!(declarations.get_value("color"), Some("red"));
    assert!(declarations.is_important("color"));
    assert!(!declarations.is_important("width"));
}

#[test]
fn test_parse_value_keeps_single_spaces() {
    let (_, stylesheet) = parse_source(
        "a { border: 1px   solid  rgb(1, 2,3); font-family: \"A B\", serif }",
        ParserConfig::default(),
    );

    let declarations = only_rule(&stylesheet).declarations().unwrap();
    assert_eq!(declarations.get_value("border"), Some("1px solid rgb(1, 2,3)"));
    assert_eq!(declarations.get_value("font-family"), Some("\"A B\", serif"));
}

#[test]
fn test_parse_value_comment_separates_tokens() {
    let (parser, stylesheet) = parse_source("a { border: 1px/**/solid red }", ParserConfig::default());

    assert!(parser.diagnostics().is_empty());
    let declarations = only_rule(&stylesheet).declarations().unwrap();
    assert_eq!(declarations.get_value("border"), Some("1px solid red"));
}

#[test]
fn test_parse_opaque_names_ignore_case() {
    let (_, stylesheet) = parse_source("a { Color: red; color: blue; --X: 1; --x: 2 }", ParserConfig::tolerant());

    let declarations = only_rule(&stylesheet).declarations().unwrap();
    assert_eq!(declarations.len(), 3);
    assert_eq!(declarations.get_value("color"), Some("blue"));
    assert_eq!(declarations.get_value("--X"), Some("1"));
    assert_eq!(declarations.get_value("--x"), Some("2"));
}

#[test]
fn test_parse_custom_property() {
    let (parser, stylesheet) = parse_source("a { --Main-Color: #fff }", ParserConfig::default());

    assert!(parser.diagnostics().is_empty());
    let declarations = only_rule(&stylesheet).declarations().unwrap();
    assert_eq!(declarations.get_value("--Main-Color"), Some("#fff"));
}

#[test]
fn test_parse_selectors_are_normalized() {
    let (_, stylesheet) = parse_source("a>b,  c   d ,e+ f { }", ParserConfig::default());

    let Rule::Style(rule) = only_rule(&stylesheet) else {
        panic!("expected a style rule");
    };
    assert_eq!(rule.selectors.0, vec!["a > b", "c d", "e + f"]);
    assert_eq!(stylesheet.to_string(), "a > b, c d, e + f { }");
}

#[test]
fn test_parse_selector_comment_is_kept() {
    let (_, selectors) = parse_selector(lex("a/**/.b, c /* x */ d"), ParserConfig::default());
    assert_eq!(selectors.unwrap().0, vec!["a/**/.b", "c d"]);

    let (_, stylesheet) = parse_source("a/* x */.b { }", ParserConfig::default());
    let printed = stylesheet.to_string();
    assert_eq!(printed, "a/**/.b { }");
    let (_, reparsed) = parse_source(&printed, ParserConfig::default());
    assert_eq!(reparsed, stylesheet);
}

#[test]
fn test_parse_invalid_selector_drops_rule() {
    let (parser, stylesheet) = parse_source("a, { color: red } b { color: blue }", ParserConfig::default());

    assert_eq!(error_names(&parser), vec!["InvalidSelector"]);
    let Rule::Style(rule) = only_rule(&stylesheet) else {
        panic!("expected a style rule");
    };
    assert_eq!(rule.selectors.0, vec!["b"]);
}

#[test]
fn test_parse_unknown_property_is_reported() {
    let (parser, stylesheet) = parse_source("a { colr: red }", ParserConfig::default());

    assert_eq!(error_names(&parser), vec!["UnknownDeclarationName"]);
    let property = only_rule(&stylesheet).declarations().unwrap().get("colr").unwrap();
    assert!(!property.is_known());

    let (parser, _) = parse_source("a { colr: red }", ParserConfig::default().with_unknown_declarations(true));
    assert!(parser.diagnostics().is_empty());
}

#[test]
fn test_parse_colon_missing() {
    let (parser, stylesheet) = parse_source("a { color red; width: 1px }", ParserConfig::default());

    assert_eq!(error_names(&parser), vec!["ColonMissing"]);
    let declarations = only_rule(&stylesheet).declarations().unwrap();
    assert!(declarations.get("color").is_none());
    assert_eq!(declarations.get_value("width"), Some("1px"));
}

#[test]
fn test_parse_value_missing() {
    let (parser, stylesheet) = parse_source("a { color: ; width: 1px }", ParserConfig::default());

    assert_eq!(error_names(&parser), vec!["ValueMissing"]);
    let declarations = only_rule(&stylesheet).declarations().unwrap();
    assert_eq!(declarations.len(), 1);
    assert_eq!(declarations.get_value("width"), Some("1px"));
}

#[test]
fn test_parse_ident_expected() {
    let (parser, stylesheet) = parse_source("a { : red; width: 1px }", ParserConfig::default());

    assert_eq!(error_names(&parser), vec!["IdentExpected"]);
    assert_eq!(only_rule(&stylesheet).declarations().unwrap().len(), 1);
}

#[test]
fn test_parse_invalid_value() {
    let (parser, stylesheet) = parse_source("a { color: red) ; width: 1px }", ParserConfig::default());

    assert_eq!(error_names(&parser), vec!["InvalidValue"]);
    let declarations = only_rule(&stylesheet).declarations().unwrap();
    assert!(declarations.get("color").is_none());
    assert_eq!(declarations.get_value("width"), Some("1px"));

    let (parser, stylesheet) = parse_source("a { color: red) ; width: 1px }", ParserConfig::tolerant());
    assert!(parser.diagnostics().is_empty());
    assert_eq!(only_rule(&stylesheet).declarations().unwrap().get_value("color"), Some("red)"));
}

#[test]
fn test_parse_invalid_function_argument_resumes_after_paren() {
    let (parser, stylesheet) = parse_source("a { width: calc(1px ] 2px); color: red }", ParserConfig::default());

    assert_eq!(error_names(&parser), vec!["InvalidValue"]);
    let declarations = only_rule(&stylesheet).declarations().unwrap();
    assert!(declarations.get("width").is_none());
    assert_eq!(declarations.get_value("color"), Some("red"));
    assert_eq!(declarations.len(), 1);
}

#[test]
fn test_parse_empty_declarations_are_skipped() {
    let (parser, stylesheet) = parse_source("a { ; ; color: red;; }", ParserConfig::default());

    assert!(parser.diagnostics().is_empty());
    assert_eq!(only_rule(&stylesheet).declarations().unwrap().len(), 1);
}

#[test]
fn test_parse_unterminated_rule() {
    let (parser, stylesheet) = parse_source("a { color: red", ParserConfig::default());

    assert!(parser.diagnostics().is_empty());
    assert_eq!(only_rule(&stylesheet).declarations().unwrap().get_value("color"), Some("red"));
}

#[test]
fn test_parse_stray_tokens() {
    let (parser, stylesheet) = parse_source("} a { color: red }", ParserConfig::default());
    assert_eq!(error_names(&parser), vec!["InvalidToken"]);
    assert_eq!(stylesheet.rules.len(), 1);

    let (parser, stylesheet) = parse_source("{ color: red } a { }", ParserConfig::default());
    assert_eq!(error_names(&parser), vec!["InvalidBlockStart"]);
    assert_eq!(stylesheet.rules.len(), 1);
}

#[test]
fn test_parse_unknown_at_rule_is_skipped() {
    let (parser, stylesheet) = parse_source("@foo bar { x: 1 } a { color: red }", ParserConfig::default());

    assert_eq!(error_names(&parser), vec!["UnknownAtRule"]);
    assert_eq!(parser.diagnostics()[0].get_position().0, 0);
    assert!(matches!(only_rule(&stylesheet), Rule::Style(_)));
}

#[test]
fn test_parse_unknown_at_rule_is_captured() {
    let config = ParserConfig::default().with_unknown_rules(true);
    let (parser, stylesheet) = parse_source("@foo bar  baz;", config);

    assert!(parser.diagnostics().is_empty());
    let Rule::Unknown(rule) = only_rule(&stylesheet) else {
        panic!("expected an unknown rule");
    };
    assert_eq!(rule.name, "foo");
    let prelude: Vec<&str> = rule.prelude.iter().map(|t| t.value.as_str()).collect();
    assert_eq!(prelude, vec!["bar", " ", "baz"]);
    assert!(rule.block.is_none());
    assert_eq!(stylesheet.to_string(), "@foo bar baz;");
}

#[test]
fn test_parse_unknown_at_rule_block_is_balanced() {
    let config = ParserConfig::default().with_unknown_rules(true);
    let (_, stylesheet) = parse_source("@foo bar { x: 1; { y: 2; } } a { }", config);

    assert_eq!(stylesheet.rules.len(), 2);
    let Rule::Unknown(rule) = &stylesheet.rules[0] else {
        panic!("expected an unknown rule");
    };
    let block = rule.block.as_ref().unwrap();
    let opens = block.iter().filter(|t| t.value == "{").count();
    let closes = block.iter().filter(|t| t.value == "}").count();
    assert_eq!(closes, opens + 1);
    assert_eq!(stylesheet.rules[0].to_string(), "@foo bar { x: 1; { y: 2; } }");
}

#[test]
fn test_parse_unknown_at_rule_comment_in_prelude() {
    let config = ParserConfig::default().with_unknown_rules(true);
    let (_, stylesheet) = parse_source("@foo a/* c */b;", config);

    let Rule::Unknown(rule) = only_rule(&stylesheet) else {
        panic!("expected an unknown rule");
    };
    let prelude: Vec<&str> = rule.prelude.iter().map(|t| t.value.as_str()).collect();
    assert_eq!(prelude, vec!["a", " ", "b"]);

    let printed = stylesheet.to_string();
    assert_eq!(printed, "@foo a b;");
    let (_, reparsed) = parse_source(&printed, config);
    assert_eq!(reparsed.to_string(), printed);
    let Rule::Unknown(again) = only_rule(&reparsed) else {
        panic!("expected an unknown rule");
    };
    assert_eq!(again.prelude.len(), 3);
}

#[test]
fn test_parse_media_rule() {
    let (parser, stylesheet) = parse_source(
        "@media screen and (min-width: 100px), print { a { color: red } }",
        ParserConfig::default(),
    );

    assert!(parser.diagnostics().is_empty());
    let Rule::Media(rule) = only_rule(&stylesheet) else {
        panic!("expected a media rule");
    };
    assert_eq!(rule.media.len(), 2);
    assert_eq!(rule.media.media_text(), "screen and (min-width: 100px), print");
    assert_eq!(rule.rules.len(), 1);
}

#[test]
fn test_parse_media_feature_only() {
    let (_, stylesheet) = parse_source("@media (color) and (max-width: 5em) { }", ParserConfig::default());

    let Rule::Media(rule) = only_rule(&stylesheet) else {
        panic!("expected a media rule");
    };
    let medium = rule.media.get(0).unwrap();
    assert_eq!(medium.type_name, "all");
    assert_eq!(medium.constraints.len(), 2);
    assert_eq!(rule.media.media_text(), "(color) and (max-width: 5em)");
}

#[test]
fn test_parse_media_modifiers() {
    let (_, list) = parse_media_list(lex("not print, only screen"), ParserConfig::default());

    assert_eq!(list.len(), 2);
    assert!(list.get(0).unwrap().is_inverse);
    assert!(list.get(1).unwrap().is_exclusive);
    assert_eq!(list.media_text(), "not print, only screen");
}

#[test]
fn test_parse_malformed_media_list_falls_back() {
    let (_, stylesheet) = parse_source("@media screen,,tv { a { color: red } }", ParserConfig::default());

    let Rule::Media(rule) = only_rule(&stylesheet) else {
        panic!("expected a media rule");
    };
    assert!(rule.media.is_not_all());
    assert_eq!(rule.media.media_text(), "not all");
    assert_eq!(rule.rules.len(), 1);
}

#[test]
fn test_parse_unknown_media_feature() {
    let (_, list) = parse_media_list(lex("(foo: 1)"), ParserConfig::default());
    assert!(list.is_not_all());

    let config = ParserConfig::default().with_invalid_constraints(true);
    let (_, list) = parse_media_list(lex("(foo: 1)"), config);
    assert_eq!(list.media_text(), "(foo: 1)");
}

#[test]
fn test_parse_media_statement_is_dropped() {
    let (parser, stylesheet) = parse_source("@media screen; a { color: red }", ParserConfig::default());

    assert_eq!(error_names(&parser), vec!["InvalidBlockStart"]);
    assert!(matches!(only_rule(&stylesheet), Rule::Style(_)));
}

#[test]
fn test_parse_supports_flattens_connectors() {
    let (parser, stylesheet) = parse_source(
        "@supports (display: flex) and (gap: 1px) and (color: red) { a { color: red } }",
        ParserConfig::default(),
    );

    assert!(parser.diagnostics().is_empty());
    let Rule::Supports(rule) = only_rule(&stylesheet) else {
        panic!("expected a supports rule");
    };
    let Condition::And(children) = &rule.condition else {
        panic!("expected a conjunction, got {:?}", rule.condition);
    };
    assert_eq!(children.len(), 3);
    assert!(children.iter().all(|child| matches!(child, Condition::Group(_))));
    assert_eq!(rule.condition_text(), "(display: flex) and (gap: 1px) and (color: red)");
    assert!(rule.condition.is_supported());
    assert_eq!(rule.rules.len(), 1);
}

#[test]
fn test_parse_condition_stops_at_mixed_connector() {
    let (parser, condition) = parse_condition(lex("(a: 1) and (b: 2) or (c: 3)"), ParserConfig::default());

    let Some(Condition::And(children)) = condition else {
        panic!("expected a conjunction");
    };
    assert_eq!(children.len(), 2);
    assert!(parser.current_token().is_ident("or"));
}

#[test]
fn test_parse_supports_mixed_connector_is_rejected() {
    let (parser, stylesheet) = parse_source(
        "@supports (color: red) and (width: 1px) or (height: 1px) { a { } } b { }",
        ParserConfig::default(),
    );

    assert_eq!(error_names(&parser), vec!["InvalidBlockStart"]);
    assert!(matches!(only_rule(&stylesheet), Rule::Style(_)));
}

#[test]
fn test_parse_not_condition() {
    let (_, condition) = parse_condition(lex("not (colour: red)"), ParserConfig::default());
    let condition = condition.unwrap();

    assert!(matches!(condition, Condition::Not(_)));
    assert!(condition.is_supported());
    assert_eq!(condition.to_string(), "not (colour: red)");
}

#[test]
fn test_parse_not_as_property_name() {
    let (_, condition) = parse_condition(lex("not: 1"), ParserConfig::default());

    let Some(Condition::Declaration(property)) = condition else {
        panic!("expected a declaration");
    };
    assert_eq!(property.name(), "not");
}

#[test]
fn test_parse_condition_support() {
    let supported = |text: &str| {
        let (_, condition) = parse_condition(lex(text), ParserConfig::default());
        condition.unwrap().is_supported()
    };

    assert!(supported("(color: red)"));
    assert!(!supported("(colour: red)"));
    assert!(supported("(colour: red) or (color: red)"));
    assert!(!supported("(colour: red) and (color: red)"));
    assert!(Condition::empty().is_supported());
}

#[test]
fn test_parse_empty_supports_condition() {
    let (_, stylesheet) = parse_source("@supports { a { } }", ParserConfig::default());

    let Rule::Supports(rule) = only_rule(&stylesheet) else {
        panic!("expected a supports rule");
    };
    assert!(rule.condition.is_empty());
}

#[test]
fn test_parse_keyframes() {
    let (parser, stylesheet) = parse_source(
        "@keyframes spin { from { opacity: 0 } 50%, to { opacity: 1 } }",
        ParserConfig::default(),
    );

    assert!(parser.diagnostics().is_empty());
    let Rule::Keyframes(rule) = only_rule(&stylesheet) else {
        panic!("expected a keyframes rule");
    };
    assert_eq!(rule.name, "spin");
    assert_eq!(rule.rules.len(), 2);
    assert_eq!(rule.rules[0].keys, vec!["0%"]);
    assert_eq!(rule.rules[1].keys, vec!["50%", "100%"]);
    assert!(rule.find_rule("from").is_some());
}

#[test]
fn test_parse_quoted_keyframes_name_reprints() {
    let (parser, stylesheet) = parse_source("@keyframes \"my anim\" { from { opacity: 0 } }", ParserConfig::default());
    assert!(parser.diagnostics().is_empty());

    let printed = stylesheet.to_string();
    assert_eq!(printed, "@keyframes \"my anim\" { 0% { opacity: 0; } }");

    let (parser, reparsed) = parse_source(&printed, ParserConfig::default());
    assert!(parser.diagnostics().is_empty());
    assert_eq!(reparsed, stylesheet);

    let (_, stylesheet) = parse_source("@keyframes \"spin\" { }", ParserConfig::default());
    assert_eq!(stylesheet.to_string(), "@keyframes spin { }");
}

#[test]
fn test_keyframes_append_rule() {
    let (_, mut stylesheet) = parse_source("@keyframes k { from { opacity: 0 } }", ParserConfig::default());
    let Some(Rule::Keyframes(rule)) = stylesheet.rules.get_mut(0) else {
        panic!("expected a keyframes rule");
    };

    rule.append_rule("to { opacity: 1 }").unwrap();
    assert_eq!(rule.rules.len(), 2);
    assert_eq!(rule.find_rule("100%").unwrap().declarations.get_value("opacity"), Some("1"));

    assert!(rule.append_rule("50 { opacity: 0 }").is_err());
    assert_eq!(rule.rules.len(), 2);
}

#[test]
fn test_parse_vendor_keyframes() {
    let (_, stylesheet) = parse_source("@-webkit-keyframes pulse { }", ParserConfig::default());
    assert!(matches!(only_rule(&stylesheet), Rule::Keyframes(_)));
}

#[test]
fn test_parse_invalid_keyframe_selector() {
    let (parser, stylesheet) = parse_source(
        "@keyframes x { 50 { opacity: 0 } 10% { opacity: 1 } }",
        ParserConfig::default(),
    );

    assert_eq!(error_names(&parser), vec!["InvalidSelector"]);
    let Rule::Keyframes(rule) = only_rule(&stylesheet) else {
        panic!("expected a keyframes rule");
    };
    assert_eq!(rule.rules.len(), 1);
}

#[test]
fn test_parse_statement_at_rules() {
    let (parser, stylesheet) = parse_source(
        "@charset \"utf-8\"; @import url(\"a.css\") screen; @import 'b.css'; \
         @namespace svg url(http://www.w3.org/2000/svg);",
        ParserConfig::default(),
    );

    assert!(parser.diagnostics().is_empty());
    assert_eq!(stylesheet.rules.len(), 4);

    let Rule::Charset(charset) = &stylesheet.rules[0] else {
        panic!("expected a charset rule");
    };
    assert_eq!(charset.encoding, "utf-8");

    let Rule::Import(import) = &stylesheet.rules[1] else {
        panic!("expected an import rule");
    };
    assert_eq!(import.href, "a.css");
    assert_eq!(import.media.media_text(), "screen");

    let Rule::Import(import) = &stylesheet.rules[2] else {
        panic!("expected an import rule");
    };
    assert_eq!(import.href, "b.css");
    assert!(import.media.is_empty());

    let Rule::Namespace(namespace) = &stylesheet.rules[3] else {
        panic!("expected a namespace rule");
    };
    assert_eq!(namespace.prefix.as_deref(), Some("svg"));
    assert_eq!(namespace.uri, "http://www.w3.org/2000/svg");
}

#[test]
fn test_parse_charset_skips_to_semicolon() {
    let (parser, stylesheet) = parse_source("@charset \"x\" { } ; a { }", ParserConfig::default());

    assert!(parser.diagnostics().is_empty());
    assert_eq!(stylesheet.rules.len(), 2);
    assert!(matches!(&stylesheet.rules[0], Rule::Charset(charset) if charset.encoding == "x"));
    assert!(matches!(stylesheet.rules[1], Rule::Style(_)));
}

#[test]
fn test_parse_invalid_import() {
    let (parser, stylesheet) = parse_source("@import 12; a { }", ParserConfig::default());

    assert_eq!(error_names(&parser), vec!["InvalidValue"]);
    assert!(matches!(only_rule(&stylesheet), Rule::Style(_)));
}

#[test]
fn test_parse_font_face() {
    let (parser, stylesheet) = parse_source(
        "@font-face { font-family: Foo; src: url(a.woff) }",
        ParserConfig::default(),
    );

    assert!(parser.diagnostics().is_empty());
    let declarations = only_rule(&stylesheet).declarations().unwrap();
    assert_eq!(declarations.get_value("src"), Some("url(a.woff)"));

    let (parser, _) = parse_source("@font-face { color: red }", ParserConfig::default());
    assert_eq!(error_names(&parser), vec!["UnknownDeclarationName"]);
}

#[test]
fn test_parse_page_and_viewport() {
    let (parser, stylesheet) = parse_source(
        "@page :first { margin: 1in } @-ms-viewport { width: device-width }",
        ParserConfig::default(),
    );

    assert!(parser.diagnostics().is_empty());
    let Rule::Page(page) = &stylesheet.rules[0] else {
        panic!("expected a page rule");
    };
    assert_eq!(page.selector.as_deref(), Some(":first"));
    let Rule::Viewport(viewport) = &stylesheet.rules[1] else {
        panic!("expected a viewport rule");
    };
    assert_eq!(viewport.declarations.get_value("width"), Some("device-width"));
}

#[test]
fn test_parse_document_rule() {
    let (parser, stylesheet) = parse_source(
        "@-moz-document url-prefix(\"http://x\"), domain(\"y\") { a { color: red } }",
        ParserConfig::default(),
    );

    assert!(parser.diagnostics().is_empty());
    let Rule::Document(rule) = only_rule(&stylesheet) else {
        panic!("expected a document rule");
    };
    assert_eq!(rule.functions.len(), 2);
    assert_eq!(rule.functions[0].kind, DocumentFunctionKind::UrlPrefix);
    assert_eq!(rule.functions[0].argument, "http://x");
    assert_eq!(rule.functions[1].kind, DocumentFunctionKind::Domain);
    assert_eq!(rule.rules.len(), 1);
}

#[test]
fn test_parse_standalone_entry_points() {
    let (_, value) = parse_value(lex("1px solid red !important"), ParserConfig::default());
    let (value, important) = value.unwrap();
    assert_eq!(value.as_str(), "1px solid red");
    assert!(important);

    let (_, selectors) = parse_selector(lex("ul li, a:hover"), ParserConfig::default());
    assert_eq!(selectors.unwrap().0, vec!["ul li", "a:hover"]);

    let (_, selectors) = parse_selector(lex("> a"), ParserConfig::default());
    assert!(selectors.is_none());

    let (parser, block) = parse_declaration_list(lex("color: red; width: 1px"), ParserConfig::default());
    assert!(parser.diagnostics().is_empty());
    assert_eq!(block.len(), 2);

    let (_, list) = parse_media_list(lex(""), ParserConfig::default());
    assert!(list.is_empty());
}

#[test]
fn test_parse_rule_text() {
    assert!(matches!(parse_rule_text("a { color: red }", ParserConfig::default()), Ok(Rule::Style(_))));

    let error = parse_rule_text("a { } b { }", ParserConfig::default()).unwrap_err();
    assert_eq!(error.get_error_name(), "SyntaxError");
}

#[test]
fn test_rule_list_mutation() {
    let (_, mut stylesheet) = parse_source("a { } b { }", ParserConfig::default());

    assert_eq!(stylesheet.insert_rule("c { color: red }", 1).unwrap(), 1);
    assert_eq!(stylesheet.rules.len(), 3);
    assert_eq!(stylesheet.rules[1].to_string(), "c { color: red; }");

    let error = stylesheet.insert_rule("d { }", 7).unwrap_err();
    assert_eq!(error.get_error_name(), "IndexSizeError");

    let removed = stylesheet.delete_rule(0).unwrap();
    assert_eq!(removed.to_string(), "a { }");
    assert!(stylesheet.delete_rule(5).is_err());
}

#[test]
fn test_rule_list_replace() {
    let (_, mut stylesheet) = parse_source("a { } b { }", ParserConfig::default());
    let rule = parse_rule_text("c { color: red }", ParserConfig::default()).unwrap();

    let replaced = stylesheet.replace_rule(1, rule).unwrap();
    assert_eq!(replaced.to_string(), "b { }");
    assert_eq!(stylesheet.to_string(), "a { }\nc { color: red; }");

    let rule = parse_rule_text("d { }", ParserConfig::default()).unwrap();
    let error = stylesheet.replace_rule(2, rule).unwrap_err();
    assert_eq!(error.get_error_name(), "IndexSizeError");
    assert_eq!(stylesheet.rules.len(), 2);
}

#[test]
fn test_supports_condition_text() {
    let (_, mut stylesheet) = parse_source("@supports (color: red) { }", ParserConfig::default());
    let Some(Rule::Supports(rule)) = stylesheet.rules.get_mut(0) else {
        panic!("expected a supports rule");
    };

    rule.set_condition_text("(width: 1px) or (height: 1px)").unwrap();
    assert!(matches!(rule.condition, Condition::Or(_)));

    assert!(rule.set_condition_text("(width: 1px) or").is_err());
    assert_eq!(rule.condition_text(), "(width: 1px) or (height: 1px)");
}

#[test]
fn test_parse_cst_reproduces_source() {
    let source = "/* c */ a { color : red ; }\n@media screen { b { x: 1 } }  ";
    let (parser, _) = parse_source(source, ParserConfig::default().with_store_trivia(true));

    assert_eq!(parser.cst_depth(), 0);
    let root = parser.into_cst().unwrap();
    assert_eq!(root.to_source(), source);
    assert!(matches!(root.entity(), Some(Entity::Stylesheet(_))));

    let first = root.children().next().unwrap();
    assert!(matches!(first.entity(), Some(Entity::Rule(Rule::Style(_)))));
    assert_eq!(first.tokens().first().unwrap().value, "a");
}

#[test]
fn test_parse_cst_grouping_entity_omits_nested_rules() {
    let (parser, _) = parse_source("@media screen { a { color: red } }", ParserConfig::default().with_store_trivia(true));
    let root = parser.into_cst().unwrap();

    let media = root.children().next().unwrap();
    let Some(Entity::Rule(Rule::Media(rule))) = media.entity() else {
        panic!("expected a media rule entity");
    };
    assert!(rule.rules.is_empty());
    assert_eq!(rule.media.media_text(), "screen");
    assert!(media
        .children()
        .any(|child| matches!(child.entity(), Some(Entity::Rule(Rule::Style(_))))));
}

#[test]
fn test_parse_without_cst() {
    let (parser, _) = parse_source("a { }", ParserConfig::default());
    assert!(parser.into_cst().is_none());
}
