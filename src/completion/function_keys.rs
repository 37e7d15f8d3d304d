//! ファンクションキー割り当て
//!
//! 補完候補を F1〜F12 の 1 打鍵で選べるようにする対応表。

use std::fmt;

/// 割り当て可能なスロット数
pub const FUNCTION_KEY_SLOTS: usize = 12;

/// F1〜F12 のいずれか
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FunctionKey(u8);

impl FunctionKey {
    /// 番号（1〜12）から作成
    pub fn new(number: u8) -> Option<Self> {
        (1..=FUNCTION_KEY_SLOTS as u8)
            .contains(&number)
            .then_some(Self(number))
    }

    /// 0 始まりのスロット番号から作成
    fn from_slot(slot: usize) -> Option<Self> {
        u8::try_from(slot + 1).ok().and_then(Self::new)
    }

    /// キー番号（F1 なら 1）
    pub fn number(self) -> u8 {
        self.0
    }

    fn slot(self) -> usize {
        usize::from(self.0) - 1
    }
}

impl fmt::Display for FunctionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "F{}", self.0)
    }
}

/// ファンクションキーと表示文字列の対応表
///
/// 割り当ては追加順。12 件を超えた分には割り当てない。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FunctionKeyTable {
    labels: Vec<String>,
}

impl FunctionKeyTable {
    pub fn new() -> Self {
        Self {
            labels: Vec::with_capacity(FUNCTION_KEY_SLOTS),
        }
    }

    /// 次の空きキーに割り当て、そのキーを返す
    ///
    /// 満杯なら何もせず `None`。既存の割り当ては追い出さない。
    pub fn add(&mut self, label: impl Into<String>) -> Option<FunctionKey> {
        let key = FunctionKey::from_slot(self.labels.len())?;
        self.labels.push(label.into());
        Some(key)
    }

    /// キーに割り当てられた文字列
    pub fn lookup(&self, key: FunctionKey) -> Option<&str> {
        self.labels.get(key.slot()).map(String::as_str)
    }

    pub fn clear(&mut self) {
        self.labels.clear();
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// 割り当て順に（キー, 文字列）を列挙
    pub fn iter(&self) -> impl Iterator<Item = (FunctionKey, &str)> {
        self.labels
            .iter()
            .enumerate()
            .filter_map(|(slot, label)| FunctionKey::from_slot(slot).map(|key| (key, label.as_str())))
    }
}
