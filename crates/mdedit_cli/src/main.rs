//! Headless markdown editing host: replays a key script against a document.

mod keys;

use anyhow::{bail, Context, Result};
use clap::Parser;
use mdedit_core::{Document, EditorConfig, MarkdownEditor};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Initial selection given as `ANCHOR..ACTIVE` char offsets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct SelectionArg {
    anchor: usize,
    active: usize,
}

impl FromStr for SelectionArg {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let (anchor, active) = value
            .split_once("..")
            .ok_or_else(|| format!("expected ANCHOR..ACTIVE, got '{}'", value))?;
        let parse = |part: &str| {
            part.trim()
                .parse::<usize>()
                .map_err(|err| format!("invalid offset '{}': {}", part, err))
        };
        Ok(Self {
            anchor: parse(anchor)?,
            active: parse(active)?,
        })
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "mdedit",
    about = "Replay markdown editing keys against a document",
    version
)]
struct Cli {
    /// Read the document from a file instead of stdin
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// JSON editor settings (camelCase keys, e.g. {"tabWidth": 2})
    #[arg(short, long, env = "MDEDIT_CONFIG")]
    config: Option<PathBuf>,

    /// Initial caret offset in chars (defaults to the end of the document)
    #[arg(long, conflicts_with = "select")]
    cursor: Option<usize>,

    /// Initial selection as ANCHOR..ACTIVE char offsets
    #[arg(long)]
    select: Option<SelectionArg>,

    /// Key script: text plus tokens such as <Enter>, <Tab>, <Bold>, <BS>
    #[arg(short, long)]
    keys: String,

    /// Mark the final caret with '|'
    #[arg(long)]
    show_cursor: bool,
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("mdedit=warn,mdedit_core=info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .compact()
        .init();
}

/// Settings from an optional JSON file, overlaid with `MDEDIT_*` variables.
fn load_config(path: Option<&Path>) -> Result<EditorConfig> {
    let base = match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            EditorConfig::from_json(&raw)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => EditorConfig::default(),
    };
    Ok(base.with_env_overrides()?)
}

fn read_document(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading document {}", path.display())),
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("reading document from stdin")?;
            Ok(text)
        }
    }
}

fn place_caret(doc: &mut Document, cursor: Option<usize>, select: Option<SelectionArg>) -> Result<()> {
    let len = doc.buffer().len_chars();
    let check = |offset: usize| -> Result<usize> {
        if offset > len {
            bail!("offset {} is past the end of the document ({} chars)", offset, len);
        }
        Ok(offset)
    };
    match (cursor, select) {
        (_, Some(selection)) => {
            doc.set_selection(check(selection.anchor)?, check(selection.active)?)
        }
        (Some(cursor), None) => doc.set_cursor(check(cursor)?),
        (None, None) => doc.set_cursor(len),
    }
    Ok(())
}

/// Document text, with `|` at the caret when `show_cursor` is set.
fn render(doc: &Document, show_cursor: bool) -> String {
    let text = doc.text();
    if !show_cursor {
        return text;
    }
    let caret = doc.cursor();
    let mut out = String::with_capacity(text.len() + 1);
    for (idx, ch) in text.chars().enumerate() {
        if idx == caret {
            out.push('|');
        }
        out.push(ch);
    }
    if caret >= doc.buffer().len_chars() {
        out.push('|');
    }
    out
}

fn run(cli: Cli) -> Result<String> {
    let config = load_config(cli.config.as_deref())?;
    let editor = MarkdownEditor::new(config)?;
    let commands = keys::parse_script(&cli.keys)?;
    let text = read_document(cli.file.as_deref())?;

    let mut doc = Document::new(&text);
    place_caret(&mut doc, cli.cursor, cli.select)?;
    for command in &commands {
        editor.apply(&mut doc, command);
    }
    debug!(
        commands = commands.len(),
        undo_steps = doc.history().undo_len(),
        "script replayed"
    );
    Ok(render(&doc, cli.show_cursor))
}

fn main() -> Result<()> {
    init_tracing();
    let output = run(Cli::parse())?;
    print!("{}", output);
    Ok(())
}

#[cfg(test)]
mod tests;
