//! ラインエディタの描画
//!
//! 文字列長と表示桁数は一致しない（全角文字など）ため、
//! 行の再描画ではターミナルが報告する幅だけを信用する。

use crate::completion::FunctionKeyTable;
use crate::error::Result;
use crate::terminal::{Color, Terminal};
use unicode_width::UnicodeWidthStr;

/// 候補一覧の見出し
const SELECTION_HEADER: &str = " [TAB completion]";
/// 連続補完の見出し
const RECURSIVE_HEADER: &str = " [recursive completion]::";

/// 現在行を `text` で完全に上書きする
///
/// 行全体を (幅 - 1) 個の空白で消してから先頭に戻って書き直す。
pub fn overwrite<T: Terminal + ?Sized>(term: &mut T, text: &str) -> Result<()> {
    let width = term.width()?;
    let blank = " ".repeat(usize::from(width.saturating_sub(1)));

    term.set_cursor_column(0)?;
    term.write(&blank)?;
    term.set_cursor_column(0)?;
    term.write(text)?;
    term.flush()
}

/// 候補一覧を表示する
///
/// `table` を渡すと表示順にファンクションキーを割り当て、割り当てたキーを併記する。
/// 途中で失敗しても色は必ずリセットする。
pub fn show_selection<T: Terminal + ?Sized>(
    term: &mut T,
    selection: &[String],
    table: Option<&mut FunctionKeyTable>,
    indent: bool,
) -> Result<()> {
    let result = write_selection(term, selection, table, indent);
    let reset = term.set_color(None);
    result.and(reset)
}

fn write_selection<T: Terminal + ?Sized>(
    term: &mut T,
    selection: &[String],
    mut table: Option<&mut FunctionKeyTable>,
    indent: bool,
) -> Result<()> {
    let Some(column_width) = selection.iter().map(|item| item.width()).max() else {
        return Ok(());
    };

    term.set_color(Some(Color::Blue))?;
    term.write_line(SELECTION_HEADER)?;

    for item in selection {
        let padding = " ".repeat(column_width - item.width());
        term.set_color(Some(Color::Cyan))?;
        if indent {
            term.write(&format!("  - {}{}", item, padding))?;
        } else {
            term.write(&format!("{}{}", item, padding))?;
        }

        if let Some(key) = table.as_deref_mut().and_then(|table| table.add(item.as_str())) {
            term.set_color(Some(Color::Yellow))?;
            term.write(&format!("    [{}]", key))?;
        }
        term.write_line("")?;
    }

    Ok(())
}

/// 連続補完の開始を表示する
pub fn show_recursive_banner<T: Terminal + ?Sized>(term: &mut T, input: &str) -> Result<()> {
    let result = write_recursive_banner(term, input);
    let reset = term.set_color(None);
    result.and(reset)
}

fn write_recursive_banner<T: Terminal + ?Sized>(term: &mut T, input: &str) -> Result<()> {
    term.set_color(Some(Color::Green))?;
    term.write(RECURSIVE_HEADER)?;
    term.set_color(Some(Color::Red))?;
    term.write_line(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terminal::ScriptedTerminal;

    fn items(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn overwrite_blanks_the_row_using_terminal_width() {
        let mut term = ScriptedTerminal::with_width(20);
        term.write("hoge-foo-long-text").unwrap();
        overwrite(&mut term, "ab").unwrap();

        assert_eq!(term.screen_line(), "ab");
        assert_eq!(term.cursor_column().unwrap(), 2);
        assert!(term.output().contains(&" ".repeat(19)));
    }

    #[test]
    fn selection_pads_by_display_width_and_assigns_keys() {
        let mut term = ScriptedTerminal::new();
        let mut table = FunctionKeyTable::new();
        show_selection(&mut term, &items(&["ab", "日本"]), Some(&mut table), false).unwrap();

        let lines = term.transcript();
        assert_eq!(lines[0], SELECTION_HEADER);
        assert_eq!(lines[1], "ab      [F1]");
        assert_eq!(lines[2], "日本    [F2]");
        assert_eq!(table.len(), 2);
        assert_eq!(term.current_color(), None);
    }

    #[test]
    fn selection_without_table_has_no_shortcuts() {
        let mut term = ScriptedTerminal::new();
        show_selection(&mut term, &items(&["moge"]), None, true).unwrap();
        assert_eq!(term.transcript()[1], "  - moge");
    }

    #[test]
    fn empty_selection_prints_nothing() {
        let mut term = ScriptedTerminal::new();
        show_selection(&mut term, &[], None, false).unwrap();
        assert!(term.output().is_empty());
    }

    #[test]
    fn recursive_banner_names_the_input() {
        let mut term = ScriptedTerminal::new();
        show_recursive_banner(&mut term, "moge").unwrap();
        assert_eq!(term.transcript()[0], format!("{}moge", RECURSIVE_HEADER));
        assert_eq!(term.current_color(), None);
    }
}
