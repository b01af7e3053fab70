use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::Parser;
use sqlshape::{dialect, CommaPosition, ConfigFile, Formatter, ItemLayout, LetterCase};

/// Format SQL source for several dialects
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Files to format (reads stdin when none are given)
    files: Vec<PathBuf>,

    /// Dialect name or alias (see --list-dialects)
    #[arg(short, long)]
    dialect: Option<String>,

    /// Config file to use instead of the default location
    #[arg(long)]
    config: Option<PathBuf>,

    /// Spaces per indentation level
    #[arg(long)]
    indent: Option<usize>,

    /// Maximum line width
    #[arg(long)]
    width: Option<usize>,

    /// upper, lower or preserve
    #[arg(long)]
    keyword_case: Option<LetterCase>,

    /// after or before
    #[arg(long)]
    comma_position: Option<CommaPosition>,

    /// Keep a clause's items on one line when they fit
    #[arg(long)]
    fit_width: bool,

    /// Rewrite files in place
    #[arg(short, long, conflicts_with = "check")]
    write: bool,

    /// Exit with status 1 if any input is not already formatted
    #[arg(long)]
    check: bool,

    /// Print the token stream as JSON instead of formatting
    #[arg(long, conflicts_with_all = ["write", "check"])]
    tokens: bool,

    /// List the available dialects and exit
    #[arg(long)]
    list_dialects: bool,

    /// Log debug information to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(err) => {
            eprintln!("Error: {err:?}");
            ExitCode::from(2)
        }
    }
}

/// Returns `false` when some input failed to tokenize or, with `--check`,
/// would change.
fn run(cli: &Cli) -> Result<bool> {
    if cli.list_dialects {
        for name in dialect::names() {
            let aliases = dialect::lookup(name).map(|d| d.aliases).unwrap_or_default();
            if aliases.is_empty() {
                println!("{name}");
            } else {
                println!("{name} ({})", aliases.join(", "));
            }
        }
        return Ok(true);
    }

    let formatter = build_formatter(cli)?;

    if cli.files.is_empty() {
        if cli.write {
            bail!("--write needs file arguments");
        }
        let mut source = String::new();
        io::stdin()
            .read_to_string(&mut source)
            .context("Failed to read stdin")?;
        return process(cli, &formatter, "<stdin>", &source, None);
    }

    let mut ok = true;
    for path in &cli.files {
        let source = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let name = path.display().to_string();
        ok &= process(cli, &formatter, &name, &source, Some(path))?;
    }
    Ok(ok)
}

fn build_formatter(cli: &Cli) -> Result<Formatter> {
    let config = match &cli.config {
        Some(path) => ConfigFile::load(path)?,
        None => ConfigFile::load_default()?,
    };

    let mut options = config.format;
    if let Some(indent) = cli.indent {
        options.indent_size = indent;
    }
    if let Some(width) = cli.width {
        options.max_line_width = width;
    }
    if let Some(case) = cli.keyword_case {
        options.keyword_case = case;
    }
    if let Some(position) = cli.comma_position {
        options.comma_position = position;
    }
    if cli.fit_width {
        options.item_layout = ItemLayout::FitWidth;
    }

    let dialect = cli
        .dialect
        .as_deref()
        .or(config.dialect.as_deref())
        .unwrap_or("sql");
    tracing::debug!(dialect, ?options, "building formatter");
    Formatter::new(dialect, options).context("Invalid formatter configuration")
}

fn process(
    cli: &Cli,
    formatter: &Formatter,
    name: &str,
    source: &str,
    path: Option<&PathBuf>,
) -> Result<bool> {
    let mut stdout = io::stdout().lock();

    if cli.tokens {
        let tokens = match formatter.tokenize(source) {
            Ok(tokens) => tokens,
            Err(err) => {
                eprintln!("{name}: {}", err.render(source));
                return Ok(false);
            }
        };
        let json = serde_json::to_string_pretty(&tokens)?;
        writeln!(stdout, "{json}")?;
        return Ok(true);
    }

    let formatted = match formatter.format(source) {
        Ok(text) => text,
        Err(err) => {
            eprintln!("{name}: {}", err.render(source));
            return Ok(false);
        }
    };
    let mut output = formatted;
    if !output.is_empty() {
        output.push('\n');
    }
    let changed = output != source;

    if cli.check {
        if changed {
            eprintln!("would reformat {name}");
        }
        return Ok(!changed);
    }

    match path {
        Some(path) if cli.write => {
            if changed {
                fs::write(path, &output)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                tracing::info!(file = name, "reformatted");
            }
        }
        _ => stdout.write_all(output.as_bytes())?,
    }
    Ok(true)
}
