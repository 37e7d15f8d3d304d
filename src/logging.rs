//! ロギングシステム
//!
//! `log` クレートの出力先をファイルにする開発者向けロガー。
//! 行編集中のターミナルにログを混ぜると再描画が崩れるので、
//! ターミナルには一切書き込まない。

use crate::error::{Result, TablineError};
use log::{LevelFilter, Log, Metadata, Record};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// 既定のログファイル名
pub const DEFAULT_LOG_FILE: &str = "tabline-debug.log";

/// ファイルに追記するロガー
#[derive(Debug)]
pub struct FileLogger {
    level: LevelFilter,
    path: PathBuf,
    file: Mutex<File>,
}

impl FileLogger {
    /// ログファイルを開く（親ディレクトリがなければ作成）
    pub fn open<P: Into<PathBuf>>(path: P, level: LevelFilter) -> Result<Self> {
        let path = path.into();
        ensure_parent_dir(&path)?;
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self {
            level,
            path,
            file: Mutex::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn level(&self) -> LevelFilter {
        self.level
    }

    fn format_record(record: &Record<'_>) -> String {
        match (record.file(), record.line()) {
            (Some(file), Some(line)) => {
                format!("{}: {} at {}:{}", record.level(), record.args(), file, line)
            }
            _ => format!("{}: {}", record.level(), record.args()),
        }
    }
}

impl Log for FileLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let line = Self::format_record(record);
        if let Ok(mut file) = self.file.lock() {
            let _ = writeln!(file, "{}", line);
        }
    }

    fn flush(&self) {
        if let Ok(mut file) = self.file.lock() {
            let _ = file.flush();
        }
    }
}

/// ファイルロガーをグローバルロガーとして登録する
pub fn init<P: Into<PathBuf>>(path: P, level: LevelFilter) -> Result<()> {
    let logger = FileLogger::open(path, level)?;
    log::set_logger(Box::leak(Box::new(logger))).map_err(|err| {
        TablineError::Io(std::io::Error::new(std::io::ErrorKind::AlreadyExists, err.to_string()))
    })?;
    log::set_max_level(level);
    Ok(())
}

/// ヘルパー：親ディレクトリを作成
fn ensure_parent_dir(path: &Path) -> std::io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent),
        _ => Ok(()),
    }
}
