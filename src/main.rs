use std::path::PathBuf;
use tabline::logging::{self, DEFAULT_LOG_FILE};
use tabline::{error, CrosstermTerminal, EditorConfig, InputSource, InputWizard, LineEditor, Resolution, Result, Terminal};

/// デモ用の候補
const SAMPLE_CANDIDATES: [&str; 15] = [
    "hoge-foo",
    "hoge-bar",
    "hoge-baz",
    "moge",
    "mogemoge",
    "mogemogemoge",
    "piyo",
    "piyopiyo",
    "x:hoge",
    "x:moge",
    "x:piyo",
    "x:poyo",
    "aaax",
    "aaay",
    "aaaz",
];

#[derive(Debug, Default)]
struct RunOptions {
    indent: bool,
    function_keys: bool,
    debug_log: Option<PathBuf>,
}

fn main() -> Result<()> {
    error::setup_panic_handler();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = parse_options(&args);

    if let Some(path) = &options.debug_log {
        logging::init(path.clone(), log::LevelFilter::Debug)?;
    }

    println!("tabline - tab completing line editor");
    println!("Version: {}", env!("CARGO_PKG_VERSION"));
    println!();

    let mut term = CrosstermTerminal::open()?;
    run(&mut term, &options)
}

fn run<T: Terminal>(term: &mut T, options: &RunOptions) -> Result<()> {
    let config = EditorConfig::default()
        .with_indent(options.indent)
        .with_function_keys(options.function_keys);
    let editor = LineEditor::with_config(SAMPLE_CANDIDATES, config);
    let wizard = InputWizard::new();

    let choice = wizard.try_input(
        term,
        &["Pick a word (Tab: complete, End: recursive, F1-F12: select, Esc: cancel)"],
        InputSource::Editor(&editor),
    )?;
    match choice.value() {
        Some(value) => term.write_line(&format!("selected: {}", value))?,
        None => term.write_line("nothing selected")?,
    }

    let resolution = wizard.try_input_or_path_with(
        term,
        &["Enter a path or some text ('exit' to skip)"],
        InputSource::Plain,
        |text| log::info!("text entered: {}", text),
        |path| log::info!("path entered: {}", path.display()),
    )?;
    let summary = match &resolution {
        Resolution::File(path) => format!("file: {}", path.display()),
        Resolution::Directory(path) => format!("directory: {}", path.display()),
        Resolution::Text(text) => format!("text: {}", text),
        Resolution::Cancelled(reason) => format!("cancelled: {:?}", reason),
    };
    term.write_line(&summary)?;

    match wizard.ask(term, &["Quit now?"], InputSource::Plain, None)? {
        Some(true) => term.write_line("bye")?,
        Some(false) => term.write_line("quitting anyway")?,
        None => term.write_line("no answer")?,
    }

    term.flush()
}

fn parse_options(args: &[String]) -> RunOptions {
    let mut options = RunOptions {
        function_keys: true,
        ..RunOptions::default()
    };

    let mut iter = args.iter().peekable();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--indent" => options.indent = true,
            "--no-fkeys" => options.function_keys = false,
            "--debug-log" => {
                let path = iter
                    .next_if(|next| !next.starts_with('-'))
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE));
                options.debug_log = Some(path);
            }
            _ => {}
        }
    }

    options
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabline::{KeyCode, ScriptedTerminal};

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn debug_log_without_path_uses_default() {
        let options = parse_options(&args(&["--debug-log", "--indent"]));
        assert_eq!(options.debug_log, Some(PathBuf::from(DEFAULT_LOG_FILE)));
        assert!(options.indent);
        assert!(options.function_keys);
    }

    #[test]
    fn debug_log_with_path_and_no_fkeys() {
        let options = parse_options(&args(&["--no-fkeys", "--debug-log", "out.log"]));
        assert_eq!(options.debug_log, Some(PathBuf::from("out.log")));
        assert!(!options.function_keys);
    }

    #[test]
    fn demo_flow_runs_against_scripted_terminal() {
        let mut term = ScriptedTerminal::new();
        term.type_text("x:pi").push_code(KeyCode::Tab).push_code(KeyCode::Enter);
        term.push_line("exit").push_line("y");

        run(&mut term, &RunOptions::default()).unwrap();

        let transcript = term.transcript();
        assert!(transcript.contains(&"selected: x:piyo".to_string()));
        assert!(transcript.contains(&"cancelled: Keyword(\"exit\")".to_string()));
        assert!(transcript.contains(&"bye".to_string()));
    }
}
