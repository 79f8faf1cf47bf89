//! eqlkit CLI - Command line interface for the EdgeQL analysis toolkit

use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use ariadne::{Color, Label, Report, ReportKind, Source};
use clap::{ArgAction, Parser, Subcommand};
use serde::Serialize;
use tracing::debug;

use eqlkit_analysis::{
    extract_query_parameters, is_end_of_statement, split_statements, ResolvedParameter,
    SchemaScalar, SelectionRange, Statement,
};
use eqlkit_lexer::tokenize;
use eqlkit_parser::{parse, ParseError};
use eqlkit_syntax::{Span, SyntaxError};

#[derive(Parser)]
#[command(name = "eqlkit")]
#[command(about = "EdgeQL tokenizer, parser and query analysis tools", long_about = None)]
struct Cli {
    /// Log more (-v for debug, -vv for trace); RUST_LOG takes precedence
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the tokens of a file
    Tokens {
        /// Input file
        file: PathBuf,
    },
    /// Parse a file and print its syntax tree
    Parse {
        /// Input file
        file: PathBuf,
        /// Output the tree as JSON
        #[arg(long)]
        json: bool,
        /// Pretty print JSON output
        #[arg(short, long)]
        pretty: bool,
    },
    /// Split a script into statements
    Split {
        /// Input file
        file: PathBuf,
        /// Output the statements as JSON
        #[arg(long)]
        json: bool,
    },
    /// Extract and resolve query parameters
    Params {
        /// Input file
        file: PathBuf,
        /// JSON file with the schema's scalar types
        #[arg(short, long)]
        schema: Option<PathBuf>,
        /// Output the parameters as JSON
        #[arg(long)]
        json: bool,
    },
    /// Interactive statement editor
    Repl {
        /// JSON file with the schema's scalar types
        #[arg(short, long)]
        schema: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();
    setup_tracing(cli.verbose);

    match cli.command {
        Commands::Tokens { file } => cmd_tokens(&file),
        Commands::Parse { file, json, pretty } => cmd_parse(&file, json, pretty),
        Commands::Split { file, json } => cmd_split(&file, json),
        Commands::Params { file, schema, json } => cmd_params(&file, schema.as_deref(), json),
        Commands::Repl { schema } => cmd_repl(schema.as_deref()),
    }
}

fn setup_tracing(verbosity: u8) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(match verbosity {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        })
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}

fn read_source(file: &Path) -> String {
    match fs::read_to_string(file) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error reading {}: {}", file.display(), e);
            process::exit(1);
        }
    }
}

fn load_schema(schema: Option<&Path>) -> Vec<SchemaScalar> {
    let Some(path) = schema else {
        return Vec::new();
    };
    let text = read_source(path);
    match serde_json::from_str::<Vec<SchemaScalar>>(&text) {
        Ok(scalars) => {
            debug!(path = %path.display(), scalars = scalars.len(), "loaded schema");
            scalars
        }
        Err(e) => {
            eprintln!("Error: invalid schema file {}: {}", path.display(), e);
            process::exit(1);
        }
    }
}

fn print_json<T: Serialize>(value: &T, pretty: bool) {
    let json = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    match json {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

fn cmd_tokens(file: &Path) {
    let source = read_source(file);
    for token in tokenize(&source) {
        println!(
            "{:>6}..{:<6} {:<20} {:?}",
            token.span.start,
            token.span.end,
            format!("{:?}", token.kind),
            token.text(&source)
        );
    }
}

fn cmd_parse(file: &Path, json: bool, pretty: bool) {
    let source = read_source(file);

    match parse(&source) {
        Ok(tree) => {
            if json {
                print_json(&tree, pretty);
            } else {
                print!("{}", tree.outline(&source));
            }
            report_syntax_errors(&source, file, tree.errors());
        }
        Err(e) => {
            report_parse_error(&source, file, &e);
            process::exit(1);
        }
    }
}

fn cmd_split(file: &Path, json: bool) {
    let source = read_source(file);
    let statements = split_statements(&source);

    if json {
        print_json(&statements, true);
        return;
    }
    for (i, statement) in statements.iter().enumerate() {
        print_statement(i + 1, statement);
    }
}

fn cmd_params(file: &Path, schema: Option<&Path>, json: bool) {
    let source = read_source(file);
    let scalars = load_schema(schema);

    let Some(params) = extract_query_parameters(&source, &scalars) else {
        eprintln!("✗ {} - could not be parsed", file.display());
        process::exit(1);
    };

    if json {
        print_json(&params, true);
    } else {
        for param in params.values() {
            println!("{}", describe_param(param));
        }
    }

    let errors = params.values().filter(|p| p.error.is_some()).count();
    if errors > 0 {
        eprintln!("✗ {} - {} parameters with errors", file.display(), errors);
        process::exit(1);
    }
}

fn cmd_repl(schema: Option<&Path>) {
    use rustyline::error::ReadlineError;
    use rustyline::DefaultEditor;

    let scalars = load_schema(schema);

    println!("eqlkit REPL v{}", env!("CARGO_PKG_VERSION"));
    println!("Statements are submitted once they end with ';'");
    println!("Type \\c to clear the buffer, \\q to exit");
    println!();

    let mut rl = match DefaultEditor::new() {
        Ok(rl) => rl,
        Err(e) => {
            eprintln!("Error: failed to start line editor: {}", e);
            process::exit(1);
        }
    };
    let mut buffer = String::new();
    let mut submitted = 0;

    loop {
        let prompt = if buffer.is_empty() { "eqlkit> " } else { "   ...> " };
        match rl.readline(prompt) {
            Ok(line) => {
                match line.trim() {
                    "\\q" => break,
                    "\\c" => {
                        buffer.clear();
                        println!("Buffer cleared");
                        continue;
                    }
                    _ => {}
                }

                if !buffer.is_empty() {
                    buffer.push('\n');
                }
                buffer.push_str(&line);

                let caret = [SelectionRange::caret(buffer.len())];
                if !is_end_of_statement(&buffer, &caret) {
                    continue;
                }

                let _ = rl.add_history_entry(buffer.as_str());
                for statement in split_statements(&buffer) {
                    submitted += 1;
                    print_statement(submitted, &statement);
                    let params = extract_query_parameters(&statement.expression, &scalars);
                    for param in params.iter().flat_map(|params| params.values()) {
                        println!("    {}", describe_param(param));
                    }
                }
                buffer.clear();
            }
            Err(ReadlineError::Interrupted) => buffer.clear(),
            Err(_) => break,
        }
    }

    println!("Goodbye!");
}

fn print_statement(index: usize, statement: &Statement) {
    println!("[{}] {}", index, statement.expression);
    if let Some(kind) = statement.transaction_type {
        match &statement.savepoint_name {
            Some(name) => println!("    transaction: {:?} ({})", kind, name),
            None => println!("    transaction: {:?}", kind),
        }
    }
}

fn describe_param(param: &ResolvedParameter) -> String {
    let scalar = param.scalar.map(|s| s.name()).unwrap_or("?");
    let ty = if param.array {
        format!("array<{}>", scalar)
    } else {
        scalar.to_string()
    };
    let modifier = if param.optional { "optional " } else { "" };
    match param.error {
        Some(error) => format!(
            "${}: {}{}  ✗ [{}] {}",
            param.name,
            modifier,
            ty,
            error.code(),
            error
        ),
        None => format!("${}: {}{}", param.name, modifier, ty),
    }
}

/// Byte span to the character range ariadne expects, at least one wide
fn label_range(source: &str, span: Span) -> std::ops::Range<usize> {
    let offset = |byte: usize| {
        let byte = byte.min(source.len());
        source
            .char_indices()
            .take_while(|(i, _)| *i < byte)
            .count()
    };
    let total = source.chars().count();
    let mut start = offset(span.start);
    let mut end = offset(span.end);
    if start == end {
        if start == total && start > 0 {
            start -= 1;
        } else {
            end += 1;
        }
    }
    start..end.max(start + 1)
}

fn report_syntax_errors(source: &str, file: &Path, errors: &[SyntaxError]) {
    let name = file.to_string_lossy().to_string();
    for error in errors {
        let range = label_range(source, error.span);
        let report = Report::build(ReportKind::Error, name.clone(), range.start)
            .with_message(&error.message)
            .with_label(
                Label::new((name.clone(), range))
                    .with_message(&error.message)
                    .with_color(Color::Red),
            )
            .finish()
            .eprint((name.clone(), Source::from(source)));
        if let Err(e) = report {
            eprintln!("Error: {}", e);
        }
    }
}

fn report_parse_error(source: &str, file: &Path, error: &ParseError) {
    let name = file.to_string_lossy().to_string();
    let range = label_range(source, error.span());
    let report = Report::build(ReportKind::Error, name.clone(), range.start)
        .with_message(error.to_string())
        .with_label(
            Label::new((name.clone(), range))
                .with_message(error.to_string())
                .with_color(Color::Red),
        )
        .finish()
        .eprint((name.clone(), Source::from(source)));
    if let Err(e) = report {
        eprintln!("Error: {}", e);
    }
}
