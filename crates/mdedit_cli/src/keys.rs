//! Key script parsing: literal text interleaved with `<Name>` tokens.

use anyhow::{bail, Result};
use mdedit_core::{BulletMarker, EditorCommand, MarkupToken, NumberDelimiter};

fn named_command(name: &str) -> Option<EditorCommand> {
    let command = match name {
        "Enter" => EditorCommand::Return,
        "S-Enter" => EditorCommand::HardLineBreak,
        "C-Enter" => EditorCommand::PlainNewline,
        "BS" => EditorCommand::Backspace,
        "Tab" => EditorCommand::Tab,
        "S-Tab" => EditorCommand::Backtab,
        "Bold" => EditorCommand::Markup(MarkupToken::Bold),
        "Italic" => EditorCommand::Markup(MarkupToken::Italic),
        "Strike" => EditorCommand::Markup(MarkupToken::Strikethrough),
        "Task" => EditorCommand::ToggleTaskComplete,
        "Comment" => EditorCommand::InsertComment,
        "Quote" => EditorCommand::CreateBlockquote,
        "Unquote" => EditorCommand::RemoveBlockquote,
        "Bullet*" => EditorCommand::CreateBulletList(BulletMarker::Asterisk),
        "Bullet-" => EditorCommand::CreateBulletList(BulletMarker::Minus),
        "Bullet+" => EditorCommand::CreateBulletList(BulletMarker::Plus),
        "Numbered." => EditorCommand::CreateNumberedList(NumberDelimiter::Period),
        "Numbered)" => EditorCommand::CreateNumberedList(NumberDelimiter::Parenthesis),
        "Todo" => EditorCommand::CreateTaskList,
        "Undo" => EditorCommand::Undo,
        "Redo" => EditorCommand::Redo,
        "Left" => EditorCommand::MoveLeft,
        "Right" => EditorCommand::MoveRight,
        "Home" => EditorCommand::MoveHome,
        "End" => EditorCommand::MoveEnd,
        "lt" => EditorCommand::Char('<'),
        _ => return None,
    };
    Some(command)
}

/// Turns a key script into commands.
///
/// Plain chars are typed as-is, except that a literal newline is Enter and a
/// literal tab is Tab. A `<` always starts a token; type `<lt>` for the char.
///
/// # Errors
/// Fails on an unterminated or unknown token.
pub(crate) fn parse_script(script: &str) -> Result<Vec<EditorCommand>> {
    let mut commands = Vec::with_capacity(script.len());
    let mut rest = script;
    while let Some(ch) = rest.chars().next() {
        rest = &rest[ch.len_utf8()..];
        let command = match ch {
            '<' => {
                let Some(end) = rest.find('>') else {
                    bail!("unterminated key token: <{}", rest);
                };
                let name = &rest[..end];
                rest = &rest[end + 1..];
                match named_command(name) {
                    Some(command) => command,
                    None => bail!("unknown key token: <{}>", name),
                }
            }
            '\n' => EditorCommand::Return,
            '\t' => EditorCommand::Tab,
            ch => EditorCommand::Char(ch),
        };
        commands.push(command);
    }
    Ok(commands)
}
