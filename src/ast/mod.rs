/// Entity module
/// Contains everything the parser builds from a token stream
///
/// Submodules:
/// - ast: The entity sum type attached to concrete syntax tree frames
/// - rules: Rule variants, the stylesheet and rule-list operations
/// - conditions: Boolean support/feature conditions
/// - media: Media queries, features and media lists
/// - declarations: Properties, values and declaration blocks
pub mod ast;
pub mod conditions;
pub mod declarations;
pub mod media;
pub mod rules;
