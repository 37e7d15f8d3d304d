//! 入力バッファ
//!
//! 1 回の行読み取りで組み立て中の文字列。カーソルは持たず、
//! 編集は末尾への追記・末尾の削除・丸ごとの置き換えのみ。

use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputBuffer {
    chars: Vec<char>,
}

impl InputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// 末尾に 1 文字追加
    pub fn push(&mut self, ch: char) {
        self.chars.push(ch);
    }

    /// 末尾の 1 文字を削除（空なら何もしない）
    pub fn backspace(&mut self) -> Option<char> {
        self.chars.pop()
    }

    pub fn clear(&mut self) {
        self.chars.clear();
    }

    /// 内容を丸ごと置き換える
    pub fn reset(&mut self, value: &str) {
        self.chars.clear();
        self.chars.extend(value.chars());
    }

    /// 文字数
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// 内容を取り出してバッファを空にする
    pub fn take(&mut self) -> String {
        let value = self.to_string();
        self.chars.clear();
        value
    }
}

impl fmt::Display for InputBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.chars.iter().try_for_each(|ch| fmt::Write::write_char(f, *ch))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_backspace_edit_the_tail() {
        let mut buffer = InputBuffer::new();
        buffer.push('h');
        buffer.push('o');
        assert_eq!(buffer.to_string(), "ho");

        assert_eq!(buffer.backspace(), Some('o'));
        assert_eq!(buffer.to_string(), "h");
    }

    #[test]
    fn backspace_on_empty_is_noop() {
        let mut buffer = InputBuffer::new();
        assert_eq!(buffer.backspace(), None);
        assert!(buffer.is_empty());
    }

    #[test]
    fn reset_replaces_contents() {
        let mut buffer = InputBuffer::new();
        buffer.push('x');
        buffer.reset("hoge-");
        assert_eq!(buffer.to_string(), "hoge-");
        assert_eq!(buffer.len(), 5);
    }

    #[test]
    fn multibyte_characters_count_as_one() {
        let mut buffer = InputBuffer::new();
        buffer.reset("あいう");
        assert_eq!(buffer.len(), 3);
        buffer.backspace();
        assert_eq!(buffer.to_string(), "あい");
    }

    #[test]
    fn take_empties_the_buffer() {
        let mut buffer = InputBuffer::new();
        buffer.reset("piyo");
        assert_eq!(buffer.take(), "piyo");
        assert!(buffer.is_empty());
    }
}
