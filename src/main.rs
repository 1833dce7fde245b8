use std::{fs::read_to_string, path::PathBuf, process::ExitCode, time::Instant};

use clap::Parser as CliParser;
use css_builder::{
    ast::ast::Entity,
    lexer::lexer::tokenize,
    parser::{
        config::ParserConfig,
        cst::{CstFrame, CstNode},
        parser::parse,
    },
    render_diagnostic,
};
use tracing_subscriber::EnvFilter;

#[derive(CliParser, Debug)]
#[command(name = "css-builder")]
#[command(about = "Parses a stylesheet and prints the rules it builds")]
struct Cli {
    /// Stylesheet to parse
    input: PathBuf,
    /// Record comments and whitespace into the concrete syntax tree
    #[arg(long)]
    trivia: bool,
    /// Keep unrecognised at-rules verbatim
    #[arg(long)]
    allow_unknown_rules: bool,
    /// Keep declarations with unrecognised names
    #[arg(long)]
    allow_unknown_declarations: bool,
    /// Enable every forgiving option
    #[arg(long)]
    tolerant: bool,
    /// Print the concrete syntax tree (implies --trivia)
    #[arg(long)]
    cst: bool,
    /// Print the token stream before parsing
    #[arg(long)]
    tokens: bool,
    /// Log parser diagnostics and recovery
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn config(&self) -> ParserConfig {
        let base = if self.tolerant {
            ParserConfig::tolerant()
        } else {
            ParserConfig::default()
        };

        base.with_store_trivia(self.trivia || self.cst || base.store_trivia)
            .with_unknown_rules(self.allow_unknown_rules || base.allow_unknown_rules)
            .with_unknown_declarations(self.allow_unknown_declarations || base.allow_unknown_declarations)
    }
}

fn entity_label(entity: Option<&Entity>) -> &'static str {
    match entity {
        None => "-",
        Some(Entity::Stylesheet(_)) => "stylesheet",
        Some(Entity::Rule(_)) => "rule",
        Some(Entity::Declaration(_)) => "declaration",
        Some(Entity::Condition(_)) => "condition",
        Some(Entity::MediaList(_)) => "media list",
        Some(Entity::Medium(_)) => "medium",
        Some(Entity::Feature(_)) => "feature",
        Some(Entity::Selector(_)) => "selector",
        Some(Entity::Value(_)) => "value",
    }
}

fn print_cst(frame: &CstFrame, depth: usize) {
    println!("{}[{}] {:?}", "  ".repeat(depth), entity_label(frame.entity()), frame.to_source());
    for node in frame.nodes() {
        if let CstNode::Frame(child) = node {
            print_cst(child, depth + 1);
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    let source = match read_to_string(&cli.input) {
        Ok(source) => source,
        Err(error) => {
            eprintln!("Failed to read {}: {}", cli.input.display(), error);
            return ExitCode::FAILURE;
        }
    };

    let file_name = cli
        .input
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| cli.input.display().to_string());

    let start = Instant::now();
    let tokens = match tokenize(source.clone(), Some(file_name)) {
        Ok(tokens) => tokens,
        Err(error) => {
            eprintln!("{}", render_diagnostic(&error, &source));
            return ExitCode::FAILURE;
        }
    };
    tracing::info!("Tokenized in {:?}", start.elapsed());

    if cli.tokens {
        for token in &tokens {
            token.debug();
        }
    }

    let parse_start = Instant::now();
    let (parser, stylesheet) = parse(tokens, cli.config());
    tracing::info!("Parsed in {:?}", parse_start.elapsed());

    for error in parser.diagnostics() {
        eprintln!("{}\n", render_diagnostic(error, &source));
    }

    println!("{}", stylesheet);

    if cli.cst {
        if let Some(root) = parser.into_cst() {
            print_cst(&root, 0);
        }
    }

    ExitCode::SUCCESS
}
