//! 入力行のパス解決

use std::path::{Path, PathBuf};

/// 既存パスの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathKind {
    File,
    Directory,
}

/// パスまたはテキスト入力の受け手
pub trait PathHandler {
    /// 既存のファイルが入力された
    fn on_file(&mut self, path: &Path);

    /// 既存のディレクトリが入力された
    fn on_directory(&mut self, path: &Path);

    /// パスではないテキストが入力された
    fn on_text(&mut self, text: &str);
}

/// クロージャによるハンドラ（ファイルとディレクトリは同じ受け手）
pub(crate) struct FnHandler<F, P> {
    pub(crate) on_text: F,
    pub(crate) on_path: P,
}

impl<F, P> PathHandler for FnHandler<F, P>
where
    F: FnMut(&str),
    P: FnMut(&Path),
{
    fn on_file(&mut self, path: &Path) {
        (self.on_path)(path)
    }

    fn on_directory(&mut self, path: &Path) {
        (self.on_path)(path)
    }

    fn on_text(&mut self, text: &str) {
        (self.on_text)(text)
    }
}

/// 入力行を既存のファイル・ディレクトリとして解決する
///
/// 入力どおりのパスを先に調べ、なければ `~` と環境変数を展開して調べる。
/// 返すのは絶対パスで、シンボリックリンクは辿らない。どちらでもなければ `None`。
pub(crate) fn resolve(line: &str) -> Option<(PathKind, PathBuf)> {
    if line.is_empty() {
        return None;
    }

    if let Some(found) = classify(Path::new(line)) {
        return Some(found);
    }

    let expanded = shellexpand::full(line).ok()?;
    if expanded == line {
        return None;
    }
    classify(Path::new(expanded.as_ref()))
}

fn classify(path: &Path) -> Option<(PathKind, PathBuf)> {
    let kind = if path.is_file() {
        PathKind::File
    } else if path.is_dir() {
        PathKind::Directory
    } else {
        return None;
    };

    let full_path = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    Some((kind, full_path))
}
