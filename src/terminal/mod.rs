//! ターミナル抽象化
//!
//! エディタとウィザードはグローバルなコンソール状態に触れず、
//! 必ずここで定義する `Terminal` ハンドル経由で入出力する。

mod console;
mod scripted;

pub use console::CrosstermTerminal;
pub use crossterm::style::Color;
pub use scripted::ScriptedTerminal;

use crate::error::Result;
use crossterm::event::{KeyCode as CrosstermKeyCode, KeyEvent, KeyModifiers as CrosstermModifiers};

/// キー入力の内部表現
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyInput {
    /// 修飾キー
    pub modifiers: KeyModifiers,
    /// 基本キー
    pub code: KeyCode,
}

/// 修飾キーの組み合わせ
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct KeyModifiers {
    pub ctrl: bool,
    pub alt: bool,
}

/// 基本キーコード
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Char(char),
    Enter,
    Backspace,
    Delete,
    Tab,
    End,
    /// F1〜F12
    F(u8),
    Esc,
    Unknown,
}

impl KeyInput {
    /// 修飾キーなしのキー
    pub fn plain(code: KeyCode) -> Self {
        Self {
            modifiers: KeyModifiers::default(),
            code,
        }
    }

    /// 修飾キーなしの文字キー
    pub fn char(ch: char) -> Self {
        Self::plain(KeyCode::Char(ch))
    }

    /// Ctrl+文字
    pub fn ctrl(ch: char) -> Self {
        Self {
            modifiers: KeyModifiers { ctrl: true, alt: false },
            code: KeyCode::Char(ch),
        }
    }

    /// バッファへ追記できる文字なら返す
    ///
    /// 修飾キー付きの文字と制御文字は対象外。
    pub fn printable_char(&self) -> Option<char> {
        match self.code {
            KeyCode::Char(ch) if !ch.is_control() && !self.modifiers.ctrl && !self.modifiers.alt => {
                Some(ch)
            }
            _ => None,
        }
    }
}

impl From<KeyEvent> for KeyInput {
    fn from(event: KeyEvent) -> Self {
        let code = match event.code {
            CrosstermKeyCode::Char(ch) => KeyCode::Char(ch),
            CrosstermKeyCode::Enter => KeyCode::Enter,
            CrosstermKeyCode::Backspace => KeyCode::Backspace,
            CrosstermKeyCode::Delete => KeyCode::Delete,
            CrosstermKeyCode::Tab => KeyCode::Tab,
            CrosstermKeyCode::End => KeyCode::End,
            CrosstermKeyCode::F(n) if (1..=12).contains(&n) => KeyCode::F(n),
            CrosstermKeyCode::Esc => KeyCode::Esc,
            _ => KeyCode::Unknown,
        };

        Self {
            modifiers: KeyModifiers {
                ctrl: event.modifiers.contains(CrosstermModifiers::CONTROL),
                alt: event.modifiers.contains(CrosstermModifiers::ALT),
            },
            code,
        }
    }
}

/// ターミナルハンドル
///
/// `read_key` はエコーせず、エコーは呼び出し側が `write` で行う。
/// 幅は表示桁数で報告すること（文字数とは一致しない場合がある）。
///
/// キー読み取りの合間にもドライバがエコーしないよう、1 行の編集中は
/// `enter_raw_mode` から `leave_raw_mode` まで raw モードを保つ。
pub trait Terminal {
    /// キー入力を 1 つ読み取る（到着するまでブロック）
    fn read_key(&mut self) -> Result<KeyInput>;

    /// raw モード（ドライバのエコー・行バッファ・シグナル生成なし）に入る
    fn enter_raw_mode(&mut self) -> Result<()>;

    /// raw モードを抜ける。入っていなければ何もしない
    fn leave_raw_mode(&mut self) -> Result<()>;

    /// 通常の行入力。入力終端では `None`
    fn read_line(&mut self) -> Result<Option<String>>;

    /// 現在のカーソル位置へ書き込む
    fn write(&mut self, text: &str) -> Result<()>;

    /// 書き込んで改行する
    fn write_line(&mut self, text: &str) -> Result<()> {
        self.write(text)?;
        self.write("\n")
    }

    /// 前景色を設定する。`None` でリセット
    fn set_color(&mut self, color: Option<Color>) -> Result<()>;

    /// 現在のカーソル桁
    fn cursor_column(&mut self) -> Result<u16>;

    /// カーソル桁を移動
    fn set_cursor_column(&mut self, column: u16) -> Result<()>;

    /// ターミナル幅（表示桁数）
    fn width(&mut self) -> Result<u16>;

    fn flush(&mut self) -> Result<()>;
}
