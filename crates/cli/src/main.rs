//! CLI tool for summarizing tab-separated data column by column.
//!
//! Reads rows pasted from a spreadsheet (one row per line, tab-separated),
//! skips a number of leading columns, and prints how often each normalized
//! value occurs in every remaining column. The summary can also be written
//! to the system clipboard.

use std::io::Read;
use std::path::PathBuf;

use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::{fmt, EnvFilter};

use column_tally_core::{Notification, Notifier, Session, SessionConfig, DEFAULT_EXCLUDED_COLUMNS};

mod clipboard;

use clipboard::SystemClipboard;

/// Count normalized values per column of tab-separated data.
#[derive(Parser, Debug)]
#[command(name = "column-tally")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// File with tab-separated rows; reads stdin when omitted or `-`
    input: Option<PathBuf>,

    /// Number of leading columns to ignore (clamped to the header width)
    #[arg(long, default_value_t = DEFAULT_EXCLUDED_COLUMNS as i64, allow_hyphen_values = true)]
    exclude: i64,

    /// Rename a column, e.g. `--rename 2=Colour` (1-based, after exclusion)
    #[arg(long, value_name = "POS=NAME", value_parser = parse_rename)]
    rename: Vec<(usize, String)>,

    /// Treat the first row as data and name every column `Other<n>`
    #[arg(long)]
    no_header: bool,

    /// Copy the text summary to the system clipboard
    #[arg(long)]
    copy: bool,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,

    /// Print the detected columns and exit
    #[arg(long)]
    columns: bool,
}

/// Parse `POS=NAME` with a 1-based position.
fn parse_rename(raw: &str) -> Result<(usize, String), String> {
    let (pos, name) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected POS=NAME, got '{}'", raw))?;
    let pos: usize = pos
        .trim()
        .parse()
        .map_err(|_| format!("invalid column number '{}'", pos))?;
    if pos == 0 {
        return Err("column numbers start at 1".to_string());
    }
    if name.is_empty() {
        return Err("column name must not be empty".to_string());
    }
    Ok((pos, name.to_string()))
}

/// Prints notifications to stderr.
struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, notification: &Notification) {
        eprintln!("{}", notification);
    }
}

fn read_input(path: Option<&PathBuf>) -> std::io::Result<String> {
    match path {
        Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(path),
        _ => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    debug!(?args, "parsed arguments");

    let text = read_input(args.input.as_ref())?;

    let config = SessionConfig {
        has_header: !args.no_header,
        ..Default::default()
    };
    let mut session = Session::new(config);
    session.set_input(text);
    session.set_excluded_columns(args.exclude);

    for (pos, name) in &args.rename {
        session.rename_column(pos - 1, name.as_str())?;
    }

    if args.columns {
        if args.json {
            println!("{}", serde_json::to_string_pretty(session.columns())?);
        } else {
            for column in session.columns() {
                println!("Column {}: {}", column.position + 1, column.name);
            }
        }
        return Ok(());
    }

    let notifier = TerminalNotifier;
    let tally = session.generate_summary(&notifier)?;
    info!(columns = tally.len(), "summary ready");

    if args.json {
        println!("{}", serde_json::to_string_pretty(tally)?);
    } else {
        let text = session.export_summary();
        if !text.is_empty() {
            println!("{}", text);
        }
    }

    if args.copy {
        session.copy_summary(&SystemClipboard::new(), &notifier)?;
    }

    Ok(())
}
