//! pyxml CLI - Command line interface for the Python to XML converter

use std::fs;
use std::path::{Path, PathBuf};

use ariadne::{Color, Label, Report, ReportKind, Source};
use clap::{ArgAction, Parser, Subcommand};
use log::{LevelFilter, Log, Metadata, Record};

use pyxml_ast::{AstNode, Position};
use pyxml_emitter::{convert, Conversion, ConvertOptions};
use pyxml_lexer::tokenize;
use pyxml_tree::{reconstruct, serialize, SerializeOptions};

#[derive(Parser)]
#[command(name = "pyxml")]
#[command(about = "Lossless Python source to XML converter", long_about = None)]
struct Cli {
    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a Python file to XML
    Convert {
        /// Python source file
        file: PathBuf,
        /// JSON dump of the file's AST
        #[arg(long)]
        ast: PathBuf,
        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Fail on node kinds without a conversion rule
        #[arg(long)]
        strict: bool,
        /// Leave out the `<?xml ...?>` declaration
        #[arg(long)]
        no_declaration: bool,
    },
    /// Restore the Python source from an XML document
    Restore {
        /// XML file
        file: PathBuf,
        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Convert, restore, and compare with the original file
    Check {
        /// Python source file
        file: PathBuf,
        /// JSON dump of the file's AST
        #[arg(long)]
        ast: PathBuf,
    },
    /// Print the token stream of a Python file
    Tokens {
        /// Python source file
        file: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Convert {
            file,
            ast,
            output,
            strict,
            no_declaration,
        } => cmd_convert(&file, &ast, output, strict, no_declaration),
        Commands::Restore { file, output } => cmd_restore(&file, output),
        Commands::Check { file, ast } => cmd_check(&file, &ast),
        Commands::Tokens { file } => cmd_tokens(&file),
    }
}

// === Logging ===

/// Plain stderr logger; the level comes from `-v`
struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[{}] {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}

// === Commands ===

fn cmd_convert(
    file: &Path,
    ast: &Path,
    output: Option<PathBuf>,
    strict: bool,
    no_declaration: bool,
) {
    let source = read_file(file);
    let conversion = match run_conversion(file, &source, ast, ConvertOptions { strict }) {
        Some(conversion) => conversion,
        None => std::process::exit(1),
    };
    let options = SerializeOptions {
        declaration: !no_declaration,
    };
    write_output(output.as_deref(), &serialize(&conversion.tree, &options));
}

fn cmd_restore(file: &Path, output: Option<PathBuf>) {
    let xml = read_file(file);
    match reconstruct(&xml) {
        Ok(source) => write_output(output.as_deref(), &source),
        Err(e) => {
            eprintln!("Error reading {}: {}", file.display(), e);
            std::process::exit(1);
        }
    }
}

fn cmd_check(file: &Path, ast: &Path) {
    let source = read_file(file);
    let conversion = match run_conversion(file, &source, ast, ConvertOptions::default()) {
        Some(conversion) => conversion,
        None => std::process::exit(1),
    };

    let xml = serialize(&conversion.tree, &SerializeOptions::default());
    let restored = match reconstruct(&xml) {
        Ok(restored) => restored,
        Err(e) => {
            eprintln!("✗ {} - generated XML does not read back: {}", file.display(), e);
            std::process::exit(1);
        }
    };

    if restored == source {
        let degraded = conversion.degradations.len();
        if degraded == 0 {
            println!("✓ {} - {} bytes round-trip", file.display(), source.len());
        } else {
            println!(
                "✓ {} - {} bytes round-trip ({} degraded nodes)",
                file.display(),
                source.len(),
                degraded
            );
        }
        return;
    }

    let position = first_difference(&source, &restored);
    report(
        file,
        &source,
        "restored source differs from the original",
        Some(position),
    );
    for degradation in &conversion.degradations {
        match degradation.position {
            Some(position) => eprintln!("  no rule for {} at {}", degradation.kind, position),
            None => eprintln!("  no rule for {}", degradation.kind),
        }
    }
    std::process::exit(1);
}

fn cmd_tokens(file: &Path) {
    let source = read_file(file);
    match tokenize(&source) {
        Ok(tokens) => {
            for token in tokens {
                println!("{}", token);
            }
        }
        Err(e) => {
            report(file, &source, &e.to_string(), Some(e.position()));
            std::process::exit(1);
        }
    }
}

// === Helpers ===

fn read_file(file: &Path) -> String {
    match fs::read_to_string(file) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error reading {}: {}", file.display(), e);
            std::process::exit(1);
        }
    }
}

fn write_output(output: Option<&Path>, text: &str) {
    match output {
        Some(path) => {
            if let Err(e) = fs::write(path, text) {
                eprintln!("Error writing {}: {}", path.display(), e);
                std::process::exit(1);
            }
            log::info!("wrote {} ({} bytes)", path.display(), text.len());
        }
        None => print!("{}", text),
    }
}

/// Tokenize, load the AST and convert, reporting failures
fn run_conversion(
    file: &Path,
    source: &str,
    ast: &Path,
    options: ConvertOptions,
) -> Option<Conversion> {
    let tokens = match tokenize(source) {
        Ok(tokens) => tokens,
        Err(e) => {
            report(file, source, &e.to_string(), Some(e.position()));
            return None;
        }
    };

    let json = read_file(ast);
    let root = match AstNode::from_json(&json) {
        Ok(root) => root,
        Err(e) => {
            eprintln!("Error loading {}: {}", ast.display(), e);
            return None;
        }
    };

    match convert(&tokens, &root, options) {
        Ok(conversion) => {
            if !conversion.is_lossless() {
                log::info!(
                    "{} node(s) had no conversion rule",
                    conversion.degradations.len()
                );
            }
            Some(conversion)
        }
        Err(e) => {
            report(file, source, &e.to_string(), e.position());
            None
        }
    }
}

/// Character offset of a position, as ariadne counts
fn char_offset(source: &str, position: Position) -> usize {
    let line_start: usize = source
        .split_inclusive('\n')
        .take(position.line.saturating_sub(1))
        .map(str::len)
        .sum();
    let byte = (line_start + position.column).min(source.len());
    let byte = (0..=byte)
        .rev()
        .find(|&b| source.is_char_boundary(b))
        .unwrap_or(0);
    source[..byte].chars().count()
}

fn first_difference(expected: &str, actual: &str) -> Position {
    let mut position = Position::new(1, 0);
    for (a, b) in expected.chars().zip(actual.chars()) {
        if a != b {
            return position;
        }
        if a == '\n' {
            position = Position::new(position.line + 1, 0);
        } else {
            position.column += a.len_utf8();
        }
    }
    position
}

fn report(file: &Path, source: &str, message: &str, position: Option<Position>) {
    let name = file.to_string_lossy().to_string();
    let Some(position) = position else {
        eprintln!("Error in {}: {}", name, message);
        return;
    };
    let offset = char_offset(source, position);
    let end = (offset + 1).min(source.chars().count()).max(offset);
    let result = Report::build(ReportKind::Error, name.clone(), offset)
        .with_message(message)
        .with_label(
            Label::new((name.clone(), offset..end))
                .with_message(message)
                .with_color(Color::Red),
        )
        .finish()
        .eprint((name, Source::from(source)));
    if result.is_err() {
        eprintln!("Error in {} at {}: {}", file.display(), position, message);
    }
}
