//! tabline - Tab 補完付きラインエディタと入力ウィザード
//!
//! 1 キーずつ読み取るループの上に、候補集合からの前方一致補完と
//! F1〜F12 による候補選択を載せたコマンドライン入力ライブラリ。

// コアモジュール
pub mod config;
pub mod error;
pub mod logging;
pub mod terminal;

// 補完
pub mod completion;

// 入力層
pub mod editor;
pub mod wizard;

// 公開API
pub use completion::{longest_common_prefix, FunctionKey, FunctionKeyTable};
pub use config::{EditorConfig, WizardConfig, YesNoLiterals};
pub use editor::LineEditor;
pub use error::{Result, TablineError, TerminalError};
pub use terminal::{CrosstermTerminal, KeyCode, KeyInput, ScriptedTerminal, Terminal};
pub use wizard::{Cancellation, InputSource, InputWizard, PathHandler, Resolution, WizardInput};
