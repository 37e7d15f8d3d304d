//! 補完機能
//!
//! 候補集合からの前方一致絞り込みと共通接頭辞補完。

pub mod forward_match;
pub mod function_keys;

pub use forward_match::longest_common_prefix;
pub use function_keys::{FunctionKey, FunctionKeyTable, FUNCTION_KEY_SLOTS};

/// 補完エンジンのトレイト
pub trait CompletionEngine {
    /// 入力文字列で始まる候補を提示順に返す
    fn complete(&self, input: &str) -> Vec<String>;

    /// 共通プレフィックスを取得
    fn common_prefix(&self, candidates: &[String]) -> String {
        longest_common_prefix(candidates)
    }
}

/// 固定の候補集合に対する前方一致補完
///
/// 候補の順序は保持し、重複も除かない（重複はどちらも一致する）。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrefixCompletion {
    candidates: Vec<String>,
}

impl PrefixCompletion {
    pub fn new<I, S>(candidates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            candidates: candidates.into_iter().map(Into::into).collect(),
        }
    }

    /// すべての候補を取得
    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }
}

impl CompletionEngine for PrefixCompletion {
    fn complete(&self, input: &str) -> Vec<String> {
        self.candidates
            .iter()
            .filter(|candidate| candidate.starts_with(input))
            .cloned()
            .collect()
    }
}

/// 1 回の補完の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionOutcome {
    /// 一致なし。入力はそのまま
    NoMatch,
    /// 1 件に確定
    Unique(String),
    /// 複数一致。入力は共通接頭辞まで進める
    Ambiguous { matches: Vec<String>, prefix: String },
}

impl CompletionOutcome {
    /// 補完後の入力。一致なしなら `None`
    pub fn completed_input(&self) -> Option<&str> {
        match self {
            CompletionOutcome::NoMatch => None,
            CompletionOutcome::Unique(value) => Some(value),
            CompletionOutcome::Ambiguous { prefix, .. } => Some(prefix),
        }
    }
}

/// 入力に対して 1 回分の補完を計算する
pub fn complete<E: CompletionEngine + ?Sized>(engine: &E, input: &str) -> CompletionOutcome {
    let mut matches = engine.complete(input);
    match matches.len() {
        0 => CompletionOutcome::NoMatch,
        1 => CompletionOutcome::Unique(matches.remove(0)),
        _ => {
            let prefix = engine.common_prefix(&matches);
            CompletionOutcome::Ambiguous { matches, prefix }
        }
    }
}
