//! スクリプト化されたインメモリターミナル
//!
//! テストとデモ用。キー入力と行入力をあらかじめ積んでおき、
//! 出力は「現在行」のセルモデルに上書きで反映する。
//! raw モード外で読まれたキーは、実際の端末ドライバと同じく自動でエコーされる。

use super::{Color, KeyCode, KeyInput, Terminal};
use crate::error::{Result, TerminalError};
use std::collections::VecDeque;

/// 既定のターミナル幅
const DEFAULT_WIDTH: u16 = 80;

#[derive(Debug, Clone)]
pub struct ScriptedTerminal {
    /// 未消費のキー入力
    keys: VecDeque<KeyInput>,
    /// 未消費の行入力（`None` は入力終端）
    lines: VecDeque<Option<String>>,
    /// 報告する幅
    width: u16,
    /// 現在行のセル
    row: Vec<char>,
    /// カーソル桁
    column: usize,
    /// 改行で確定した行
    transcript: Vec<String>,
    /// 色変更の履歴
    colors: Vec<Option<Color>>,
    /// 書き込まれた生の出力
    output: String,
    /// raw モード中か
    raw: bool,
    /// raw モードの出入りの履歴（`true` が開始）
    raw_changes: Vec<bool>,
}

impl ScriptedTerminal {
    pub fn new() -> Self {
        Self::with_width(DEFAULT_WIDTH)
    }

    /// 幅を指定して作成（0 は非対応ターミナルの模擬）
    pub fn with_width(width: u16) -> Self {
        Self {
            keys: VecDeque::new(),
            lines: VecDeque::new(),
            width,
            row: Vec::new(),
            column: 0,
            transcript: Vec::new(),
            colors: Vec::new(),
            output: String::new(),
            raw: false,
            raw_changes: Vec::new(),
        }
    }

    /// キー入力を積む
    pub fn push_key(&mut self, key: KeyInput) -> &mut Self {
        self.keys.push_back(key);
        self
    }

    /// 修飾なしキーを積む
    pub fn push_code(&mut self, code: KeyCode) -> &mut Self {
        self.push_key(KeyInput::plain(code))
    }

    /// 文字列を 1 文字ずつキー入力として積む
    pub fn type_text(&mut self, text: &str) -> &mut Self {
        for ch in text.chars() {
            self.push_key(KeyInput::char(ch));
        }
        self
    }

    /// 行入力を積む
    pub fn push_line(&mut self, line: &str) -> &mut Self {
        self.lines.push_back(Some(line.to_string()));
        self
    }

    /// 入力終端を積む
    pub fn push_eof(&mut self) -> &mut Self {
        self.lines.push_back(None);
        self
    }

    /// 未消費のキー数
    pub fn pending_keys(&self) -> usize {
        self.keys.len()
    }

    /// 現在行の表示内容（末尾空白を除く）
    pub fn screen_line(&self) -> String {
        let line: String = self.row.iter().collect();
        line.trim_end().to_string()
    }

    /// 改行で確定した行
    pub fn transcript(&self) -> &[String] {
        &self.transcript
    }

    /// 書き込まれた生の出力
    pub fn output(&self) -> &str {
        &self.output
    }

    /// 色変更の履歴
    pub fn color_changes(&self) -> &[Option<Color>] {
        &self.colors
    }

    /// 最後に設定された色（`None` はリセット済み）
    pub fn current_color(&self) -> Option<Color> {
        self.colors.last().copied().flatten()
    }

    /// raw モード中か
    pub fn is_raw(&self) -> bool {
        self.raw
    }

    /// raw モードの出入りの履歴（`true` が開始、`false` が終了）
    pub fn raw_mode_changes(&self) -> &[bool] {
        &self.raw_changes
    }

    fn put_char(&mut self, ch: char) {
        match ch {
            '\n' => {
                let line: String = self.row.iter().collect();
                self.transcript.push(line.trim_end().to_string());
                self.row.clear();
                self.column = 0;
            }
            '\r' => self.column = 0,
            _ => {
                if self.column < self.row.len() {
                    self.row[self.column] = ch;
                } else {
                    self.row.resize(self.column, ' ');
                    self.row.push(ch);
                }
                self.column += 1;
            }
        }
    }
}

impl Default for ScriptedTerminal {
    fn default() -> Self {
        Self::new()
    }
}

impl Terminal for ScriptedTerminal {
    fn read_key(&mut self) -> Result<KeyInput> {
        let key = self.keys.pop_front().ok_or(TerminalError::InputExhausted)?;
        // 通常モードではドライバが文字をそのまま画面に出す
        if !self.raw {
            if let Some(ch) = key.printable_char() {
                self.put_char(ch);
                self.output.push(ch);
            }
        }
        Ok(key)
    }

    fn enter_raw_mode(&mut self) -> Result<()> {
        if !self.raw {
            self.raw = true;
            self.raw_changes.push(true);
        }
        Ok(())
    }

    fn leave_raw_mode(&mut self) -> Result<()> {
        if self.raw {
            self.raw = false;
            self.raw_changes.push(false);
        }
        Ok(())
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        let line = self.lines.pop_front().ok_or(TerminalError::InputExhausted)?;
        // 通常モードの端末と同じく入力行をエコーする
        if let Some(text) = &line {
            self.write_line(text)?;
        }
        Ok(line)
    }

    fn write(&mut self, text: &str) -> Result<()> {
        self.output.push_str(text);
        for ch in text.chars() {
            self.put_char(ch);
        }
        Ok(())
    }

    fn write_line(&mut self, text: &str) -> Result<()> {
        self.write(text)?;
        if self.raw {
            self.write("\r\n")
        } else {
            self.write("\n")
        }
    }

    fn set_color(&mut self, color: Option<Color>) -> Result<()> {
        self.colors.push(color);
        Ok(())
    }

    fn cursor_column(&mut self) -> Result<u16> {
        Ok(u16::try_from(self.column).unwrap_or(u16::MAX))
    }

    fn set_cursor_column(&mut self, column: u16) -> Result<()> {
        self.column = usize::from(column);
        Ok(())
    }

    fn width(&mut self) -> Result<u16> {
        Ok(self.width)
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}
