//! 設定
//!
//! ラインエディタと入力ウィザードの設定値。すべて serde で読み書きでき、
//! 省略したフィールドは既定値になる。

use crate::error::{ConfigError, Result};
use serde::{Deserialize, Serialize};

/// ラインエディタの設定
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// 候補一覧をインデント付きのリストで表示する
    pub indent: bool,
    /// 候補に F1〜F12 のショートカットを割り当てる
    pub function_keys: bool,
    /// End キーで入力済み文字列を 1 文字ずつ再補完する
    pub recursive_completion: bool,
    /// 読み取り開始時に全候補を表示する
    pub show_candidates_on_start: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            indent: false,
            function_keys: true,
            recursive_completion: true,
            show_candidates_on_start: true,
        }
    }
}

impl EditorConfig {
    pub fn with_indent(mut self, indent: bool) -> Self {
        self.indent = indent;
        self
    }

    pub fn with_function_keys(mut self, enabled: bool) -> Self {
        self.function_keys = enabled;
        self
    }

    pub fn with_recursive_completion(mut self, enabled: bool) -> Self {
        self.recursive_completion = enabled;
        self
    }

    pub fn with_candidates_on_start(mut self, enabled: bool) -> Self {
        self.show_candidates_on_start = enabled;
        self
    }

    /// JSON 文字列から読み込む
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|err| ConfigError::from(err).into())
    }
}

/// Yes/No の判定に使う文字列
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct YesNoLiterals {
    pub yes: String,
    pub no: String,
    /// 大文字小文字を区別するか（既定: 区別しない）
    pub case_sensitive: bool,
}

impl Default for YesNoLiterals {
    fn default() -> Self {
        Self {
            yes: "Y".to_string(),
            no: "N".to_string(),
            case_sensitive: false,
        }
    }
}

impl YesNoLiterals {
    pub fn new(yes: impl Into<String>, no: impl Into<String>) -> Self {
        Self {
            yes: yes.into(),
            no: no.into(),
            ..Self::default()
        }
    }

    pub fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    /// 入力行を判定する。どちらにも一致しなければ `None`
    pub fn answer(&self, line: &str) -> Option<bool> {
        if self.matches(line, &self.yes) {
            Some(true)
        } else if self.matches(line, &self.no) {
            Some(false)
        } else {
            None
        }
    }

    fn matches(&self, line: &str, literal: &str) -> bool {
        if self.case_sensitive {
            line == literal
        } else {
            line.to_lowercase() == literal.to_lowercase()
        }
    }
}

/// 入力ウィザードの設定
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WizardConfig {
    /// 行全体がこれに一致したらキャンセル扱い
    pub cancel_keywords: Vec<String>,
    pub yes_no: YesNoLiterals,
    /// 入力前に表示するプロンプト
    pub prompt: String,
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            cancel_keywords: vec!["exit".to_string(), "cancel".to_string()],
            yes_no: YesNoLiterals::default(),
            prompt: "> ".to_string(),
        }
    }
}

impl WizardConfig {
    pub fn with_cancel_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.cancel_keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_yes_no(mut self, yes_no: YesNoLiterals) -> Self {
        self.yes_no = yes_no;
        self
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// 行全体がキャンセルキーワードか
    pub fn is_cancel_keyword(&self, line: &str) -> bool {
        self.cancel_keywords.iter().any(|keyword| keyword == line)
    }

    /// JSON 文字列から読み込む
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).map_err(ConfigError::from)?;
        if config.yes_no.answer(&config.yes_no.no) == Some(true) {
            return Err(ConfigError::InvalidValue {
                key: "yes_no".to_string(),
                value: format!("{}/{}", config.yes_no.yes, config.yes_no.no),
            }
            .into());
        }
        Ok(config)
    }
}
