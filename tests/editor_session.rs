use mdedit::constants::{ENV_AUTO_MATCH, ENV_BULLET_CYCLING, ENV_TAB_WIDTH};
use mdedit::env::{env_lock, EnvGuard};
use mdedit::{
    editor_from_env, BulletMarker, Document, EditorCommand, EditorConfig, EditorError,
    MarkdownEditor, MarkupToken,
};

fn replay(editor: &MarkdownEditor, doc: &mut Document, commands: &[EditorCommand]) {
    for command in commands {
        editor.apply(doc, command);
    }
}

fn typed(text: &str) -> Vec<EditorCommand> {
    text.chars()
        .map(|ch| match ch {
            '\n' => EditorCommand::Return,
            ch => EditorCommand::Char(ch),
        })
        .collect()
}

#[test]
fn drafting_a_note_with_lists_and_emphasis() {
    let editor = MarkdownEditor::new(EditorConfig::default()).expect("editor");
    let mut doc = Document::default();

    replay(&editor, &mut doc, &typed("Groceries\n"));
    replay(
        &editor,
        &mut doc,
        &[EditorCommand::CreateBulletList(BulletMarker::Minus)],
    );
    replay(&editor, &mut doc, &typed("milk\neggs\n\n"));
    replay(&editor, &mut doc, &typed("Buy them "));
    replay(
        &editor,
        &mut doc,
        &[EditorCommand::Markup(MarkupToken::Bold)],
    );
    replay(&editor, &mut doc, &typed("today"));
    replay(
        &editor,
        &mut doc,
        &[EditorCommand::Markup(MarkupToken::Bold)],
    );
    replay(&editor, &mut doc, &typed("."));

    assert_eq!(
        doc.text(),
        "Groceries\n- milk\n- eggs\n\nBuy them **today**."
    );
}

#[test]
fn config_round_trips_through_json() {
    let config = EditorConfig {
        tab_width: 2,
        insert_spaces_for_tabs: true,
        ..EditorConfig::default()
    };
    let json = serde_json::to_string(&config).expect("serialize");
    assert!(json.contains("\"insertSpacesForTabs\":true"));
    let parsed = EditorConfig::from_json(&json).expect("parse");
    assert_eq!(parsed, config);
}

#[test]
fn editor_from_env_reads_overrides() {
    let _lock = env_lock().lock().expect("env lock");
    let _width = EnvGuard::set(ENV_TAB_WIDTH, "3");
    let _cycling = EnvGuard::set(ENV_BULLET_CYCLING, "no");
    let _auto = EnvGuard::set(ENV_AUTO_MATCH, "off");

    let editor = editor_from_env().expect("editor");
    assert_eq!(editor.config().tab_width, 3);
    assert!(!editor.config().bullet_cycling_enabled);

    let mut doc = Document::new("a ");
    doc.set_cursor(2);
    assert!(!editor.handle_character(&mut doc, '('));
}

#[test]
fn editor_from_env_rejects_garbage() {
    let _lock = env_lock().lock().expect("env lock");
    let _width = EnvGuard::remove(ENV_TAB_WIDTH);
    let _auto = EnvGuard::set(ENV_AUTO_MATCH, "sometimes");
    assert!(matches!(
        editor_from_env(),
        Err(EditorError::InvalidEnvValue { .. })
    ));
}
