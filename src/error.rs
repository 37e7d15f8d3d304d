//! エラーハンドリングシステム
//!
//! tabline 全体で使用される統一されたエラー型を定義する。
//! キャンセルや補完候補なしはエラーではなく結果値として表現し、
//! ここで扱うのはターミナルや設定の失敗のみ。

use thiserror::Error;

/// ライブラリ全体のエラー型
#[derive(Error, Debug)]
pub enum TablineError {
    /// ターミナル操作エラー
    #[error("Terminal operation failed: {0}")]
    Terminal(#[from] TerminalError),

    /// 設定エラー
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// ファイルシステムエラー
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// ターミナル固有のエラー
#[derive(Error, Debug)]
pub enum TerminalError {
    /// 幅の取得などができないターミナル（致命的な初期化エラー）
    #[error("Terminal unsupported: {reason}")]
    Unsupported { reason: String },

    /// 読み書き中の I/O 失敗
    #[error("Terminal I/O failed during {operation}: {source}")]
    Io {
        operation: &'static str,
        #[source]
        source: std::io::Error,
    },

    /// スクリプト化されたターミナルの入力が尽きた
    #[error("No more scripted input")]
    InputExhausted,
}

impl TerminalError {
    /// I/O エラーに操作名を付与する
    pub fn io(operation: &'static str, source: std::io::Error) -> Self {
        TerminalError::Io { operation, source }
    }
}

/// 設定固有のエラー
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

/// プロジェクト標準のResult型
pub type Result<T> = std::result::Result<T, TablineError>;

/// パニックハンドラの設定
///
/// raw モードのまま落ちるとシェルが壊れるので、報告前に必ず戻す。
pub fn setup_panic_handler() {
    std::panic::set_hook(Box::new(|panic_info| {
        let _ = crossterm::terminal::disable_raw_mode();

        let location = panic_info
            .location()
            .map(|loc| format!("{}:{}", loc.file(), loc.line()))
            .unwrap_or_else(|| "unknown".to_string());

        let message = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s
        } else {
            "Unknown panic payload"
        };

        log::error!("panic at {}: {}", location, message);
        eprintln!("PANIC at {}: {}", location, message);
        eprintln!("Stack trace: {}", std::backtrace::Backtrace::capture());

        std::process::exit(1);
    }));
}
