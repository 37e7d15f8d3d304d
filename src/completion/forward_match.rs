//! 前方一致（最長共通接頭辞）

/// 全ての文字列に共通する最長の接頭辞を返す
///
/// 最短の文字列の長さまで先頭から 1 文字ずつ比較し、最初の不一致で止める。
/// 大文字小文字を含め正規化は行わない。空のリストには空文字列を返す。
pub fn longest_common_prefix<S: AsRef<str>>(items: &[S]) -> String {
    let Some((first, rest)) = items.split_first() else {
        return String::new();
    };

    let mut others: Vec<_> = rest.iter().map(|item| item.as_ref().chars()).collect();
    let mut prefix = String::new();

    for ch in first.as_ref().chars() {
        // 他の文字列が尽きた・食い違った時点で終わり
        if !others.iter_mut().all(|chars| chars.next() == Some(ch)) {
            break;
        }
        prefix.push(ch);
    }

    prefix
}
