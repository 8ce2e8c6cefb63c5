/*!
Main binary for jsondescent.
*/

use anyhow::{Context, Result};
use clap::{ArgAction, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use log::debug;
use std::io::{self, IsTerminal, Read};
use std::io::Write as _;
use std::{fs, path::PathBuf};

use jsondescent::{
    DuplicateKeys, ParseError, ParseOptions, commands, options, parse_with_options,
    tokenizer, utils,
};

/// Tokenize and parse a JSON document.
#[derive(Parser)]
#[command(name = "jd", version, about, long_about = None, disable_help_subcommand = true)]
struct Args {
    /// Optional subcommands
    #[command(subcommand)]
    command: Option<Commands>,
    #[arg(value_name = "FILE")]
    /// Optional path to JSON file. If omitted, reads from STDIN
    input: Option<PathBuf>,
    /// Print the token stream instead of the parsed document
    #[arg(long, action = ArgAction::SetTrue)]
    tokens: bool,
    /// Do not pretty-print the JSON output, instead use compact
    #[arg(long, action = ArgAction::SetTrue)]
    compact: bool,
    /// Display depth of the input document
    #[arg(long, action = ArgAction::SetTrue)]
    depth: bool,
    /// Maximum nesting of objects and arrays
    #[arg(long, value_name = "N", default_value_t = options::DEFAULT_MAX_DEPTH)]
    max_depth: usize,
    /// Do not limit nesting depth
    #[arg(long, action = ArgAction::SetTrue, conflicts_with = "max_depth")]
    unlimited_depth: bool,
    /// How to treat a key repeated within one object
    #[arg(long, value_enum, default_value_t = DuplicateKeyPolicy::LastWins)]
    duplicate_keys: DuplicateKeyPolicy,
    /// Ignore anything after the top-level value
    #[arg(long, action = ArgAction::SetTrue)]
    allow_trailing: bool,
    /// Disable colored output
    #[arg(long, action = ArgAction::SetTrue)]
    no_color: bool,
    #[command(flatten)]
    verbosity: Verbosity<WarnLevel>,
}

/// Available subcommands for `jd`
#[derive(Subcommand)]
enum Commands {
    #[command(subcommand)]
    /// Generate additional documentation and/or completions
    Generate(GenerateCommand),
}

/// Generate shell completions and man page
#[derive(Subcommand)]
enum GenerateCommand {
    /// Generate shell completions for the given shell to stdout.
    Shell { shell: clap_complete::Shell },
    /// Generate a man page for jd to output directory if specified, else
    /// the current directory.
    Man {
        /// The output directory to write the man pages.
        #[clap(short, long)]
        output_dir: Option<PathBuf>,
    },
}

/// Command-line spelling of [`DuplicateKeys`].
#[derive(Clone, Copy, ValueEnum)]
enum DuplicateKeyPolicy {
    LastWins,
    FirstWins,
    Reject,
}

impl From<DuplicateKeyPolicy> for DuplicateKeys {
    fn from(policy: DuplicateKeyPolicy) -> Self {
        match policy {
            DuplicateKeyPolicy::LastWins => Self::LastWins,
            DuplicateKeyPolicy::FirstWins => Self::FirstWins,
            DuplicateKeyPolicy::Reject => Self::Reject,
        }
    }
}

impl Args {
    fn parse_options(&self) -> ParseOptions {
        ParseOptions::default()
            .with_max_depth((!self.unlimited_depth).then_some(self.max_depth))
            .with_duplicate_keys(self.duplicate_keys.into())
            .with_trailing_content(self.allow_trailing)
    }
}

/// Wraps a parse failure with its line and column in `text`.
fn located(err: ParseError, text: &str) -> anyhow::Error {
    let context = match err.offset() {
        Some(offset) => {
            let (line, column) = utils::line_col(text, offset);
            format!("Failed to parse JSON at line {line}, column {column}")
        }
        None => "Failed to parse JSON".to_string(),
    };
    anyhow::Error::new(err).context(context)
}

/// Entry point for main binary.
///
/// This parses the command line arguments, reads the document from a file or
/// STDIN, and prints either its token stream or the parsed tree.
fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(args.verbosity.log_level_filter())
        .init();

    if args.no_color {
        colored::control::set_override(false);
    }

    match &args.command {
        Some(Commands::Generate(GenerateCommand::Shell { shell })) => {
            let mut cmd = Args::command();
            commands::generate::write_completions(
                *shell,
                &mut cmd,
                &mut io::stdout().lock(),
            );
            Ok(())
        }
        Some(Commands::Generate(GenerateCommand::Man { output_dir })) => {
            let written = commands::generate::generate_man_pages(
                &Args::command(),
                output_dir.clone(),
            )?;
            for path in written {
                println!("Generated: {}", path.display());
            }
            Ok(())
        }
        None => run(&args),
    }
}

/// Parse the input document and display it.
fn run(args: &Args) -> Result<()> {
    let text = if let Some(path) = &args.input {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read file {}", path.display()))?;
        debug!("read {} bytes from {}", text.len(), path.display());
        text
    } else {
        if io::stdin().is_terminal() {
            // No piped input and no file specified
            let mut cmd = Args::command();
            return Ok(cmd.print_help()?);
        }
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read STDIN")?;
        buffer
    };
    let text = text.as_str();
    let mut stdout = io::stdout().lock();

    if args.tokens {
        let tokens = tokenizer::tokenize(text)
            .map_err(|err| located(err.into(), text))?;
        return utils::write_tokens(&mut stdout, &tokens);
    }

    let value = parse_with_options(text, args.parse_options())
        .map_err(|err| located(err, text))?;

    if args.depth {
        writeln!(stdout, "Depth: {}", value.depth())?;
    }

    utils::write_colored_result(&mut stdout, &value, !args.compact)
}
