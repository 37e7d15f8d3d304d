//! 補完の性質テスト
//!
//! 任意の候補集合と入力に対して、Tab 補完の結果が前方一致集合から
//! 決まる値になること、連続補完が「入力して Tab」と一致することを確かめる

use proptest::prelude::*;
use proptest::test_runner::Config as ProptestConfig;
use tabline::{longest_common_prefix, EditorConfig, FunctionKeyTable, KeyCode, LineEditor, ScriptedTerminal};

/// 少ない文字種で衝突しやすい候補
fn candidate_strategy() -> impl Strategy<Value = Vec<String>> {
    proptest::collection::vec("[abc]{0,4}", 1..8)
}

fn quiet_editor(candidates: &[String]) -> LineEditor {
    LineEditor::with_config(
        candidates.iter().cloned(),
        EditorConfig::default().with_candidates_on_start(false),
    )
}

/// 入力して最後に `finish` キーを押し、Enter で確定した結果
fn type_and_finish(editor: &LineEditor, typed: &str, finish: KeyCode) -> String {
    let mut term = ScriptedTerminal::new();
    term.type_text(typed).push_code(finish).push_code(KeyCode::Enter);
    editor
        .read_line(&mut term)
        .expect("read_line failed")
        .expect("input confirmed")
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]

    #[test]
    fn tab_result_follows_match_count(
        candidates in candidate_strategy(),
        prefix in "[abc]{0,3}",
    ) {
        let editor = quiet_editor(&candidates);
        let result = type_and_finish(&editor, &prefix, KeyCode::Tab);

        let matches: Vec<&String> = candidates.iter().filter(|c| c.starts_with(&prefix)).collect();
        match matches.len() {
            0 => prop_assert_eq!(&result, &prefix),
            1 => prop_assert_eq!(&result, matches[0]),
            _ => {
                prop_assert_eq!(&result, &longest_common_prefix(&matches));
                prop_assert!(result.starts_with(&prefix));
                prop_assert!(matches.iter().all(|m| m.starts_with(&result)));
            }
        }
    }

    #[test]
    fn recursive_completion_matches_typing_then_tab(
        candidates in candidate_strategy(),
        typed in "[abc]{1,5}",
    ) {
        let editor = quiet_editor(&candidates);
        let replayed = type_and_finish(&editor, &typed, KeyCode::End);
        let tabbed = type_and_finish(&editor, &typed, KeyCode::Tab);
        prop_assert_eq!(replayed, tabbed);
    }

    #[test]
    fn common_prefix_ignores_order(items in proptest::collection::vec("[ab]{0,5}", 1..6)) {
        let mut reversed = items.clone();
        reversed.reverse();
        let mut rotated = items.clone();
        rotated.rotate_left(1);

        let expected = longest_common_prefix(&items);
        prop_assert_eq!(&longest_common_prefix(&reversed), &expected);
        prop_assert_eq!(&longest_common_prefix(&rotated), &expected);
        prop_assert!(items.iter().all(|item| item.starts_with(&expected)));
    }

    #[test]
    fn common_prefix_of_single_item_is_identity(item in "\\PC{0,12}") {
        prop_assert_eq!(longest_common_prefix(&[item.clone()]), item);
    }

    #[test]
    fn function_key_table_never_exceeds_twelve(count in 0usize..40) {
        let mut table = FunctionKeyTable::new();
        let assigned = (0..count)
            .filter(|i| table.add(format!("candidate{}", i)).is_some())
            .count();

        prop_assert_eq!(assigned, count.min(12));
        prop_assert!(table.len() <= 12);
    }
}
