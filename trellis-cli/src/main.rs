//! Trellis CLI
//!
//! Composes the bundled pages with the builder and prints the markup, or the
//! built tree as JSON.

mod dump;
mod pages;

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use trellis_common::warning::clear_warnings;
use trellis_html::{Builder, SparklineOptions};
use trellis_store::Store;

/// Trellis: compose HTML pages from Rust
#[derive(Parser, Debug)]
#[command(name = "trellis")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Greeting page
    trellis hello

    # Add a todo and print the list page
    trellis todo --db todo.json --add "Water the plants"

    # Markdown file as an embeddable fragment
    trellis markdown --fragment notes.md

    # Sparkline written to a file
    trellis --out spark.html sparkline 1 4 2 8 5

    # Built tree as JSON
    trellis --json hello
"#)]
struct Cli {
    /// Write output to this file instead of stdout
    #[arg(long, global = true, value_name = "FILE")]
    out: Option<PathBuf>,

    /// Print the built tree as JSON instead of markup
    #[arg(long, global = true)]
    json: bool,

    /// More logging (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the greeting page
    Hello {
        /// Heading text
        #[arg(long, default_value = "Hello, World!")]
        greeting: String,
    },

    /// Render the todo list, applying at most one change first
    Todo {
        /// Store file holding the todos
        #[arg(long, default_value = "todo.json", value_name = "FILE")]
        db: PathBuf,

        /// Add a todo with this text
        #[arg(long, value_name = "TEXT", conflicts_with_all = ["toggle", "delete"])]
        add: Option<String>,

        /// Flip the completed flag of this todo
        #[arg(long, value_name = "ID", conflicts_with = "delete")]
        toggle: Option<String>,

        /// Delete this todo
        #[arg(long, value_name = "ID")]
        delete: Option<String>,
    },

    /// Render a markdown file
    Markdown {
        /// Markdown source
        #[arg(value_name = "FILE")]
        path: PathBuf,

        /// Emit a fragment instead of a full document
        #[arg(long)]
        fragment: bool,

        /// Document title (defaults to the file stem)
        #[arg(long)]
        title: Option<String>,
    },

    /// Render an inline SVG sparkline
    Sparkline {
        /// Data points
        #[arg(value_name = "VALUES", required = true, allow_negative_numbers = true)]
        values: Vec<f64>,

        /// Drawing width
        #[arg(long, default_value = "100")]
        width: u32,

        /// Drawing height
        #[arg(long, default_value = "20")]
        height: u32,

        /// Stroke colour
        #[arg(long, default_value = "currentColor")]
        color: String,

        /// Stroke width
        #[arg(long, default_value = "1.5")]
        line_width: f64,

        /// Lower bound of the value range
        #[arg(long, allow_negative_numbers = true)]
        min: Option<f64>,

        /// Upper bound of the value range
        #[arg(long, allow_negative_numbers = true)]
        max: Option<f64>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    clear_warnings();

    let builder = compose(cli.command)?;
    let output = if cli.json {
        let json = dump::tree_to_json(builder.tree(), builder.root());
        serde_json::to_string_pretty(&json).context("failed to serialize tree")?
    } else {
        builder.render()
    };

    match cli.out {
        Some(path) => {
            fs::write(&path, &output)
                .with_context(|| format!("failed to write {}", path.display()))?;
            eprintln!("{}", format!("Wrote {}", path.display()).green());
        }
        None => println!("{output}"),
    }
    Ok(())
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Build the page for `command`.
fn compose(command: Command) -> Result<Builder> {
    let builder = match command {
        Command::Hello { greeting } => pages::hello(&greeting)?.into_builder(),
        Command::Todo {
            db,
            add,
            toggle,
            delete,
        } => {
            let mut store = Store::open(&db)
                .with_context(|| format!("failed to open store {}", db.display()))?;
            if let Some(text) = add {
                if let Some(id) = pages::add_todo(&mut store, &text)? {
                    debug!(%id, "added todo");
                }
            } else if let Some(id) = toggle {
                let _ = pages::toggle_todo(&mut store, &id)?;
            } else if let Some(id) = delete {
                let _ = pages::delete_todo(&mut store, &id)?;
            }
            let todos = pages::load_todos(&store)?;
            store.close()?;
            pages::todo_page(&todos)?.into_builder()
        }
        Command::Markdown {
            path,
            fragment,
            title,
        } => {
            let text = fs::read_to_string(&path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            if fragment {
                pages::markdown_fragment(&text).into_builder()
            } else {
                let title = title.unwrap_or_else(|| {
                    path.file_stem()
                        .map_or_else(|| "Untitled".to_string(), |s| s.to_string_lossy().into_owned())
                });
                pages::markdown_document(&title, &text)?.into_builder()
            }
        }
        Command::Sparkline {
            values,
            width,
            height,
            color,
            line_width,
            min,
            max,
        } => {
            let options = SparklineOptions {
                width,
                height,
                line_color: color,
                line_width,
                min_value: min,
                max_value: max,
            };
            pages::sparkline_figure(&values, &options)?.into_builder()
        }
    };
    Ok(builder)
}
