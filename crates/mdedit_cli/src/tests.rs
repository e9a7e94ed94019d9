//! Unit tests for the `mdedit` entrypoint module.

use super::keys::parse_script;
use super::{place_caret, render, run, Cli, SelectionArg};
use clap::Parser;
use mdedit_core::env::{env_lock, EnvGuard};
use mdedit_core::{
    BulletMarker, Document, EditorCommand, MarkupToken, NumberDelimiter, Selection,
};
use std::io::Write;
use tempfile::NamedTempFile;

fn document_file(text: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(text.as_bytes()).expect("write document");
    file
}

fn run_script(text: &str, extra: &[&str]) -> String {
    let file = document_file(text);
    let path = file.path().to_string_lossy().to_string();
    let mut args = vec!["mdedit", "--file", path.as_str()];
    args.extend_from_slice(extra);
    let cli = Cli::try_parse_from(args).expect("cli args");
    run(cli).expect("run")
}

#[test]
fn script_tokens_map_to_commands() {
    let commands = parse_script("a<Enter><Bold><Bullet->\t<Numbered)><lt>\n").expect("script");
    assert_eq!(
        commands,
        vec![
            EditorCommand::Char('a'),
            EditorCommand::Return,
            EditorCommand::Markup(MarkupToken::Bold),
            EditorCommand::CreateBulletList(BulletMarker::Minus),
            EditorCommand::Tab,
            EditorCommand::CreateNumberedList(NumberDelimiter::Parenthesis),
            EditorCommand::Char('<'),
            EditorCommand::Return,
        ]
    );
}

#[test]
fn ctrl_enter_leaves_the_list() {
    let _lock = env_lock().lock().expect("env lock");
    assert_eq!(
        parse_script("<C-Enter>").expect("script"),
        vec![EditorCommand::PlainNewline]
    );
    let output = run_script("- a", &["--keys", "<C-Enter>b<Enter>"]);
    assert_eq!(output, "- a\nb\n");
}

#[test]
fn script_rejects_bad_tokens() {
    let err = parse_script("x<Nope>").expect_err("unknown token");
    assert!(err.to_string().contains("<Nope>"));
    assert!(parse_script("<Enter").is_err());
}

#[test]
fn selection_argument_parses_both_directions() {
    assert_eq!(
        "7..2".parse::<SelectionArg>(),
        Ok(SelectionArg {
            anchor: 7,
            active: 2
        })
    );
    assert!("7-2".parse::<SelectionArg>().is_err());
    assert!("a..2".parse::<SelectionArg>().is_err());
}

#[test]
fn cursor_and_select_conflict() {
    let result = Cli::try_parse_from(["mdedit", "--cursor", "1", "--select", "0..1", "-k", "x"]);
    assert!(result.is_err());
}

#[test]
fn caret_placement_is_checked() {
    let mut doc = Document::new("abc");
    place_caret(&mut doc, None, None).expect("default caret");
    assert_eq!(doc.cursor(), 3);
    place_caret(
        &mut doc,
        None,
        Some(SelectionArg {
            anchor: 3,
            active: 1,
        }),
    )
    .expect("selection");
    assert_eq!(doc.selection(), Selection::new(3, 1));
    assert!(place_caret(&mut doc, Some(4), None).is_err());
}

#[test]
fn render_marks_the_caret() {
    let mut doc = Document::new("ab");
    doc.set_cursor(1);
    assert_eq!(render(&doc, true), "a|b");
    doc.set_cursor(2);
    assert_eq!(render(&doc, true), "ab|");
    assert_eq!(render(&doc, false), "ab");
}

#[test]
fn replays_list_continuation_from_a_file() {
    let _lock = env_lock().lock().expect("env lock");
    let output = run_script("- [x] done", &["--keys", "<Enter>next<Enter><Enter>", "--show-cursor"]);
    assert_eq!(output, "- [x] done\n- [ ] next\n\n|");
}

#[test]
fn replays_formatting_on_a_selection() {
    let _lock = env_lock().lock().expect("env lock");
    let output = run_script("make it loud", &["--select", "5..7", "--keys", "<Bold><Undo><Strike>"]);
    assert_eq!(output, "make ~~it~~ loud");
}

#[test]
fn config_file_and_env_overrides_apply() {
    let _lock = env_lock().lock().expect("env lock");
    let _spaces = EnvGuard::set("MDEDIT_INSERT_SPACES", "true");
    let config = document_file(r#"{"tabWidth": 2}"#);
    let config_path = config.path().to_string_lossy().to_string();
    let output = run_script(
        "* ",
        &["--config", config_path.as_str(), "--keys", "<Tab>"],
    );
    assert_eq!(output, "  - ");
}

#[test]
fn invalid_config_is_an_error() {
    let _lock = env_lock().lock().expect("env lock");
    let config = document_file(r#"{"tabWidth": 0}"#);
    let doc = document_file("text");
    let doc_path = doc.path().to_string_lossy().to_string();
    let config_path = config.path().to_string_lossy().to_string();
    let cli = Cli::try_parse_from([
        "mdedit",
        "--file",
        doc_path.as_str(),
        "--config",
        config_path.as_str(),
        "--keys",
        "x",
    ])
    .expect("cli args");
    let err = run(cli).expect_err("zero tab width");
    assert!(format!("{:#}", err).contains("tab width"));
}
