//! crossterm によるターミナル実装

use super::{Color, KeyInput, Terminal};
use crate::error::{Result, TerminalError};
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::style::{ResetColor, SetForegroundColor};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{cursor, queue};
use std::io::{stdin, stdout, Stdout, Write};

/// 標準入出力に接続されたターミナル
///
/// raw モードは `enter_raw_mode` から `leave_raw_mode` まで保持する。
/// 保持していない状態で `read_key` を呼ぶと、その 1 キーの間だけ有効にする。
#[derive(Debug)]
pub struct CrosstermTerminal {
    out: Stdout,
    /// 保持中の raw モード（ドロップで解除）
    raw: Option<RawModeGuard>,
}

impl CrosstermTerminal {
    /// 幅を問い合わせて使用可能なターミナルか確認する
    pub fn open() -> Result<Self> {
        let (width, _) = crossterm::terminal::size().map_err(|err| TerminalError::Unsupported {
            reason: format!("cannot query terminal size: {}", err),
        })?;

        if width == 0 {
            return Err(TerminalError::Unsupported {
                reason: "terminal reports zero width".to_string(),
            }
            .into());
        }

        log::debug!("terminal opened with width {}", width);
        Ok(Self { out: stdout(), raw: None })
    }
}

/// スコープを抜けると raw モードを解除する
#[derive(Debug)]
struct RawModeGuard;

impl RawModeGuard {
    fn enter() -> std::result::Result<Self, TerminalError> {
        enable_raw_mode().map_err(|err| TerminalError::io("enable raw mode", err))?;
        Ok(Self)
    }

    /// 解除の失敗を報告する版
    fn leave(self) -> std::result::Result<(), TerminalError> {
        std::mem::forget(self);
        disable_raw_mode().map_err(|err| TerminalError::io("disable raw mode", err))
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
    }
}

impl Terminal for CrosstermTerminal {
    fn read_key(&mut self) -> Result<KeyInput> {
        self.flush()?;
        let _single_key = match self.raw {
            Some(_) => None,
            None => Some(RawModeGuard::enter()?),
        };

        loop {
            match event::read().map_err(|err| TerminalError::io("read key", err))? {
                Event::Key(key) if key.kind == KeyEventKind::Press => return Ok(key.into()),
                // リリース・リピート・マウス・リサイズは読み飛ばす
                _ => {}
            }
        }
    }

    fn enter_raw_mode(&mut self) -> Result<()> {
        if self.raw.is_none() {
            self.flush()?;
            self.raw = Some(RawModeGuard::enter()?);
            log::debug!("raw mode entered");
        }
        Ok(())
    }

    fn leave_raw_mode(&mut self) -> Result<()> {
        let flushed = self.flush();
        if let Some(guard) = self.raw.take() {
            guard.leave()?;
            log::debug!("raw mode left");
        }
        flushed
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        self.flush()?;

        let mut line = String::new();
        let read = stdin()
            .read_line(&mut line)
            .map_err(|err| TerminalError::io("read line", err))?;
        if read == 0 {
            return Ok(None);
        }

        let trimmed = line.trim_end_matches(&['\r', '\n'][..]).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    fn write(&mut self, text: &str) -> Result<()> {
        self.out
            .write_all(text.as_bytes())
            .map_err(|err| TerminalError::io("write", err))?;
        Ok(())
    }

    fn write_line(&mut self, text: &str) -> Result<()> {
        self.write(text)?;
        // raw モードでは改行だけでは行頭に戻らない
        match self.raw {
            Some(_) => self.write("\r\n"),
            None => self.write("\n"),
        }
    }

    fn set_color(&mut self, color: Option<Color>) -> Result<()> {
        match color {
            Some(color) => queue!(self.out, SetForegroundColor(color)),
            None => queue!(self.out, ResetColor),
        }
        .map_err(|err| TerminalError::io("set color", err))?;
        Ok(())
    }

    fn cursor_column(&mut self) -> Result<u16> {
        self.flush()?;
        let (column, _) = cursor::position().map_err(|err| TerminalError::io("cursor position", err))?;
        Ok(column)
    }

    fn set_cursor_column(&mut self, column: u16) -> Result<()> {
        queue!(self.out, cursor::MoveToColumn(column))
            .map_err(|err| TerminalError::io("move cursor", err))?;
        Ok(())
    }

    fn width(&mut self) -> Result<u16> {
        let (width, _) = crossterm::terminal::size().map_err(|err| TerminalError::io("terminal size", err))?;
        Ok(width)
    }

    fn flush(&mut self) -> Result<()> {
        self.out.flush().map_err(|err| TerminalError::io("flush", err))?;
        Ok(())
    }
}
