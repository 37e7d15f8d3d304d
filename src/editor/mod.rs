//! Tab 補完付きラインエディタ
//!
//! 1 キーずつ読み取りながら入力行を組み立てる。
//!
//! - Esc: 入力中止（`None` を返す）
//! - Enter: 入力確定
//! - Backspace: 末尾 1 文字削除 / Delete: 全消去
//! - Tab: 前方一致補完
//! - End: 入力済み文字列を 1 文字ずつ再入力しながら補完（連続補完）
//! - F1〜F12: 表示中の候補を選択
//! - それ以外の制御文字は無視し、通常の文字は追記してエコーする

pub mod input_buffer;
pub mod render;

pub use input_buffer::InputBuffer;

use crate::completion::{self, CompletionOutcome, FunctionKey, FunctionKeyTable, PrefixCompletion};
use crate::config::EditorConfig;
use crate::error::{Result, TerminalError};
use crate::terminal::{KeyCode, KeyInput, Terminal};
use render::{overwrite, show_recursive_banner, show_selection};

/// 1 キー処理後の状態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyOutcome {
    /// 入力継続
    Composing,
    /// Enter で確定
    Confirmed,
    /// Esc で中止
    Cancelled,
}

/// 1 回の `read_line` の間だけ存在する編集状態
#[derive(Debug, Default)]
struct ReadState {
    buffer: InputBuffer,
    function_keys: FunctionKeyTable,
}

/// Tab 補完付きラインエディタ
#[derive(Debug, Clone)]
pub struct LineEditor {
    /// 補完候補
    completion: PrefixCompletion,
    config: EditorConfig,
}

impl LineEditor {
    /// 候補集合を指定して作成
    pub fn new<I, S>(candidates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_config(candidates, EditorConfig::default())
    }

    pub fn with_config<I, S>(candidates: I, config: EditorConfig) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            completion: PrefixCompletion::new(candidates),
            config,
        }
    }

    pub fn candidates(&self) -> &[String] {
        self.completion.candidates()
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// 1 行読み取る
    ///
    /// Enter で確定した内容を返し、Esc なら `None`。
    /// 幅を報告できないターミナルでは読み取りを始めずにエラーを返す。
    /// 読み取り中は raw モードを保ち、エコーはすべてエディタが行う。
    pub fn read_line<T: Terminal + ?Sized>(&self, term: &mut T) -> Result<Option<String>> {
        ensure_supported(term)?;
        term.enter_raw_mode()?;
        log::debug!("read_line started with {} candidates", self.candidates().len());

        let mut state = ReadState::default();
        let result = self.read_loop(term, &mut state);
        let reset = term.set_color(None);
        let leave = term.leave_raw_mode();
        let line = result?;
        reset?;
        leave?;

        match &line {
            Some(value) => log::debug!("read_line confirmed: {:?}", value),
            None => log::debug!("read_line cancelled"),
        }
        Ok(line)
    }

    fn read_loop<T: Terminal + ?Sized>(&self, term: &mut T, state: &mut ReadState) -> Result<Option<String>> {
        term.set_color(None)?;
        if self.config.show_candidates_on_start {
            self.show_candidates(term, self.candidates(), state)?;
        }
        term.flush()?;

        loop {
            let key = term.read_key()?;
            match self.handle_key(term, state, key)? {
                KeyOutcome::Composing => {}
                KeyOutcome::Confirmed => {
                    term.write_line("")?;
                    return Ok(Some(state.buffer.take()));
                }
                KeyOutcome::Cancelled => return Ok(None),
            }
        }
    }

    fn handle_key<T: Terminal + ?Sized>(
        &self,
        term: &mut T,
        state: &mut ReadState,
        key: KeyInput,
    ) -> Result<KeyOutcome> {
        match key.code {
            KeyCode::Esc => return Ok(KeyOutcome::Cancelled),
            KeyCode::Enter => return Ok(KeyOutcome::Confirmed),
            KeyCode::Backspace => {
                state.buffer.backspace();
                overwrite(term, &state.buffer.to_string())?;
            }
            KeyCode::Delete => {
                state.buffer.clear();
                overwrite(term, "")?;
            }
            KeyCode::Tab => self.tab_complete(term, state)?,
            KeyCode::End if self.config.recursive_completion => self.tab_recursive(term, state)?,
            KeyCode::F(number) if self.config.function_keys => {
                self.select_function_key(term, state, number)?
            }
            _ => {
                if let Some(ch) = key.printable_char() {
                    state.buffer.push(ch);
                    term.write(ch.encode_utf8(&mut [0; 4]))?;
                    term.flush()?;
                }
            }
        }

        Ok(KeyOutcome::Composing)
    }

    /// Tab: 前方一致で絞り込み、1 件なら確定、複数なら共通部分まで補完
    fn tab_complete<T: Terminal + ?Sized>(&self, term: &mut T, state: &mut ReadState) -> Result<()> {
        // 割り当ては補完のたびに作り直す
        state.function_keys.clear();

        let input = state.buffer.to_string();
        match completion::complete(&self.completion, &input) {
            CompletionOutcome::NoMatch => {
                log::debug!("no candidate starts with {:?}", input);
            }
            CompletionOutcome::Unique(value) => {
                log::debug!("completed {:?} to {:?}", input, value);
                state.buffer.reset(&value);
                overwrite(term, &value)?;
            }
            CompletionOutcome::Ambiguous { matches, prefix } => {
                log::debug!("{} candidates for {:?}, common prefix {:?}", matches.len(), input, prefix);
                self.show_candidates(term, &matches, state)?;
                state.buffer.reset(&prefix);
                overwrite(term, &prefix)?;
            }
        }

        Ok(())
    }

    /// End: 入力済み文字列を先頭から 1 文字ずつ入れ直し、そのたびに Tab 補完する
    ///
    /// 補完で既に入っている文字は入れ直さない。補完結果が元の入力と
    /// 食い違った位置では、その位置以降を捨てて元の文字を入れる。
    fn tab_recursive<T: Terminal + ?Sized>(&self, term: &mut T, state: &mut ReadState) -> Result<()> {
        let original: Vec<char> = state.buffer.take().chars().collect();
        overwrite(term, "")?;
        show_recursive_banner(term, &original.iter().collect::<String>())?;

        for (index, &ch) in original.iter().enumerate() {
            let mut current: Vec<char> = state.buffer.to_string().chars().collect();
            if current.get(index) == Some(&ch) {
                continue;
            }

            current.truncate(index);
            current.push(ch);
            let typed: String = current.into_iter().collect();
            state.buffer.reset(&typed);
            overwrite(term, &typed)?;

            self.tab_complete(term, state)?;
        }

        Ok(())
    }

    /// F1〜F12: 割り当て済みの候補で入力を置き換える
    fn select_function_key<T: Terminal + ?Sized>(
        &self,
        term: &mut T,
        state: &mut ReadState,
        number: u8,
    ) -> Result<()> {
        let Some(value) = FunctionKey::new(number)
            .and_then(|key| state.function_keys.lookup(key))
            .map(str::to_string)
        else {
            return Ok(());
        };

        log::debug!("F{} selected {:?}", number, value);
        state.buffer.reset(&value);
        overwrite(term, &value)
    }

    fn show_candidates<T: Terminal + ?Sized>(
        &self,
        term: &mut T,
        candidates: &[String],
        state: &mut ReadState,
    ) -> Result<()> {
        let table = self.config.function_keys.then_some(&mut state.function_keys);
        show_selection(term, candidates, table, self.config.indent)
    }
}

/// 再描画に必要な幅を報告できるか確認する
fn ensure_supported<T: Terminal + ?Sized>(term: &mut T) -> Result<()> {
    let width = term.width().map_err(|err| {
        log::error!("terminal width unavailable: {}", err);
        TerminalError::Unsupported {
            reason: format!("terminal width unavailable: {}", err),
        }
    })?;

    if width == 0 {
        return Err(TerminalError::Unsupported {
            reason: "terminal reports zero width".to_string(),
        }
        .into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terminal::ScriptedTerminal;

    const SAMPLE: [&str; 5] = ["hoge-foo", "hoge-bar", "hoge-baz", "moge", "piyo"];

    fn quiet_editor() -> LineEditor {
        LineEditor::with_config(SAMPLE, EditorConfig::default().with_candidates_on_start(false))
    }

    fn state_with(input: &str) -> ReadState {
        let mut state = ReadState::default();
        state.buffer.reset(input);
        state
    }

    #[test]
    fn tab_with_several_matches_completes_common_prefix() {
        let editor = quiet_editor();
        let mut term = ScriptedTerminal::new();
        let mut state = state_with("hog");

        editor.tab_complete(&mut term, &mut state).unwrap();

        assert_eq!(state.buffer.to_string(), "hoge-");
        assert_eq!(state.function_keys.len(), 3);
        assert_eq!(term.screen_line(), "hoge-");
    }

    #[test]
    fn tab_with_single_match_completes_fully() {
        let editor = quiet_editor();
        let mut term = ScriptedTerminal::new();
        let mut state = state_with("hoge-f");

        editor.tab_complete(&mut term, &mut state).unwrap();

        assert_eq!(state.buffer.to_string(), "hoge-foo");
        assert!(state.function_keys.is_empty());
    }

    #[test]
    fn tab_without_match_changes_nothing() {
        let editor = quiet_editor();
        let mut term = ScriptedTerminal::new();
        let mut state = state_with("z");

        editor.tab_complete(&mut term, &mut state).unwrap();

        assert_eq!(state.buffer.to_string(), "z");
        assert!(term.output().is_empty());
    }

    #[test]
    fn tab_resets_previous_function_keys() {
        let editor = quiet_editor();
        let mut term = ScriptedTerminal::new();
        let mut state = state_with("hog");
        editor.tab_complete(&mut term, &mut state).unwrap();

        state.buffer.reset("z");
        editor.tab_complete(&mut term, &mut state).unwrap();
        assert!(state.function_keys.is_empty());
    }

    #[test]
    fn recursive_completion_replays_typed_text() {
        let editor = quiet_editor();
        let mut term = ScriptedTerminal::new();
        let mut state = state_with("moge");

        editor.tab_recursive(&mut term, &mut state).unwrap();

        assert_eq!(state.buffer.to_string(), "moge");
    }

    #[test]
    fn recursive_completion_keeps_unmatched_text() {
        let editor = quiet_editor();
        let mut term = ScriptedTerminal::new();
        let mut state = state_with("hoxy");

        editor.tab_recursive(&mut term, &mut state).unwrap();

        assert_eq!(state.buffer.to_string(), "hoxy");
    }

    #[test]
    fn unassigned_function_key_is_ignored() {
        let editor = quiet_editor();
        let mut term = ScriptedTerminal::new();
        let mut state = state_with("pi");

        editor.select_function_key(&mut term, &mut state, 1).unwrap();

        assert_eq!(state.buffer.to_string(), "pi");
    }

    #[test]
    fn zero_width_terminal_is_rejected_before_reading() {
        let editor = quiet_editor();
        let mut term = ScriptedTerminal::with_width(0);
        term.type_text("abc");

        let error = editor.read_line(&mut term).unwrap_err();
        assert!(matches!(
            error,
            crate::error::TablineError::Terminal(TerminalError::Unsupported { .. })
        ));
        assert_eq!(term.pending_keys(), 3);
    }
}
