//! 入力ウィザード
//!
//! プロンプトを表示して 1 行読み取り、キャンセル判定・パス解決・
//! Yes/No 判定を行う対話フロー。行の取得は通常の行入力か
//! [`LineEditor`] のどちらかに任せる。

mod path;

pub use path::{PathHandler, PathKind};

use crate::config::{WizardConfig, YesNoLiterals};
use crate::editor::LineEditor;
use crate::error::Result;
use crate::terminal::Terminal;
use std::path::{Path, PathBuf};

/// 行の取得方法
#[derive(Debug, Clone, Copy)]
pub enum InputSource<'a> {
    /// ターミナルの通常の行入力
    Plain,
    /// Tab 補完付きラインエディタ
    Editor(&'a LineEditor),
}

/// キャンセルの種類
///
/// Esc は何もエコーせずに終わり、キーワードは入力した語がそのまま画面に残る。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cancellation {
    /// Esc キー、または入力終端
    Escaped,
    /// キャンセルキーワードが入力された
    Keyword(String),
}

/// 1 行分の入力結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardInput {
    Entered(String),
    Cancelled(Cancellation),
}

impl WizardInput {
    /// 入力された値（キャンセル時は `None`）
    pub fn value(&self) -> Option<&str> {
        match self {
            WizardInput::Entered(value) => Some(value),
            WizardInput::Cancelled(_) => None,
        }
    }

    pub fn into_value(self) -> Option<String> {
        match self {
            WizardInput::Entered(value) => Some(value),
            WizardInput::Cancelled(_) => None,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, WizardInput::Cancelled(_))
    }
}

/// パスまたはテキスト入力の解決結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    File(PathBuf),
    Directory(PathBuf),
    Text(String),
    Cancelled(Cancellation),
}

impl Resolution {
    /// いずれかのハンドラが呼ばれたか
    pub fn is_success(&self) -> bool {
        !matches!(self, Resolution::Cancelled(_))
    }
}

/// 入力ウィザード
#[derive(Debug, Clone, Default)]
pub struct InputWizard {
    config: WizardConfig,
}

impl InputWizard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: WizardConfig) -> Self {
        Self { config }
    }

    /// キャンセルキーワードだけを差し替えて作成
    pub fn with_cancel_keywords<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_config(WizardConfig::default().with_cancel_keywords(keywords))
    }

    pub fn config(&self) -> &WizardConfig {
        &self.config
    }

    /// 1 行入力を求める
    pub fn try_input<T, M>(&self, term: &mut T, messages: &[M], source: InputSource<'_>) -> Result<WizardInput>
    where
        T: Terminal + ?Sized,
        M: AsRef<str>,
    {
        self.prompt(term, messages, source, None)?;
        let input = self.acquire(term, source)?;
        log::info!("try_input resolved to {:?}", input);
        Ok(input)
    }

    /// 1 行入力を求め、既存のファイル・ディレクトリ・それ以外のテキストに振り分ける
    ///
    /// `~` と環境変数を展開してから存在を確認し、ハンドラには正規化したパスを渡す。
    /// テキストハンドラには入力そのままを渡す。
    pub fn try_input_or_path<T, M, H>(
        &self,
        term: &mut T,
        messages: &[M],
        source: InputSource<'_>,
        handler: &mut H,
    ) -> Result<Resolution>
    where
        T: Terminal + ?Sized,
        M: AsRef<str>,
        H: PathHandler + ?Sized,
    {
        self.prompt(term, messages, source, None)?;
        let line = match self.acquire(term, source)? {
            WizardInput::Entered(line) => line,
            WizardInput::Cancelled(reason) => {
                log::info!("try_input_or_path cancelled: {:?}", reason);
                return Ok(Resolution::Cancelled(reason));
            }
        };

        let resolution = match path::resolve(&line) {
            Some((PathKind::File, path)) => {
                handler.on_file(&path);
                Resolution::File(path)
            }
            Some((PathKind::Directory, path)) => {
                handler.on_directory(&path);
                Resolution::Directory(path)
            }
            None => {
                handler.on_text(&line);
                Resolution::Text(line)
            }
        };

        log::info!("try_input_or_path resolved to {:?}", resolution);
        Ok(resolution)
    }

    /// [`try_input_or_path`](Self::try_input_or_path) のクロージャ版
    ///
    /// ファイルとディレクトリはどちらも `on_path` に渡す。
    pub fn try_input_or_path_with<T, M, F, P>(
        &self,
        term: &mut T,
        messages: &[M],
        source: InputSource<'_>,
        on_text: F,
        on_path: P,
    ) -> Result<Resolution>
    where
        T: Terminal + ?Sized,
        M: AsRef<str>,
        F: FnMut(&str),
        P: FnMut(&Path),
    {
        let mut handler = path::FnHandler { on_text, on_path };
        self.try_input_or_path(term, messages, source, &mut handler)
    }

    /// Yes/No を尋ねる
    ///
    /// Yes なら `Some(true)`、No なら `Some(false)`。キャンセルやどちらにも
    /// 一致しない入力は `None`（判定なし）。`literals` で呼び出しごとに上書きできる。
    pub fn ask<T, M>(
        &self,
        term: &mut T,
        messages: &[M],
        source: InputSource<'_>,
        literals: Option<&YesNoLiterals>,
    ) -> Result<Option<bool>>
    where
        T: Terminal + ?Sized,
        M: AsRef<str>,
    {
        let literals = literals.unwrap_or(&self.config.yes_no);
        self.prompt(term, messages, source, Some(literals))?;

        let answer = match self.acquire(term, source)? {
            WizardInput::Entered(line) => literals.answer(&line),
            WizardInput::Cancelled(_) => None,
        };

        log::info!("ask answered {:?}", answer);
        Ok(answer)
    }

    /// メッセージとプロンプトを表示する
    ///
    /// エディタは現在行を丸ごと書き直すので、エディタに渡す場合は
    /// プロンプトを独立した行にする。
    fn prompt<T, M>(
        &self,
        term: &mut T,
        messages: &[M],
        source: InputSource<'_>,
        literals: Option<&YesNoLiterals>,
    ) -> Result<()>
    where
        T: Terminal + ?Sized,
        M: AsRef<str>,
    {
        for message in messages {
            term.write_line(message.as_ref())?;
        }
        if let Some(literals) = literals {
            term.write(&format!("({}/{}) ", literals.yes, literals.no))?;
        }
        match source {
            InputSource::Plain => term.write(&self.config.prompt)?,
            InputSource::Editor(_) => term.write_line(self.config.prompt.trim_end())?,
        }
        term.flush()
    }

    fn acquire<T>(&self, term: &mut T, source: InputSource<'_>) -> Result<WizardInput>
    where
        T: Terminal + ?Sized,
    {
        let line = match source {
            InputSource::Plain => term.read_line()?,
            InputSource::Editor(editor) => editor.read_line(term)?,
        };

        Ok(match line {
            None => WizardInput::Cancelled(Cancellation::Escaped),
            Some(line) if self.config.is_cancel_keyword(&line) => {
                WizardInput::Cancelled(Cancellation::Keyword(line))
            }
            Some(line) => WizardInput::Entered(line),
        })
    }
}
