//! Application entry point — line-oriented live proofreader.
//!
//! # Startup sequence
//!
//! 1. Initialise logging.
//! 2. Load [`AppConfig`] from disk (returns default on first run).
//! 3. Create [`tokio`] runtime (multi-thread, 2 workers).
//! 4. Load `<lang>.txt` word lists and spawn the unknown-word checker.
//! 5. Build the LLM corrector ([`ApiCorrector`]) from config.
//! 6. Restore the saved session, if any.
//! 7. Spawn the session driver.
//! 8. Read stdin until EOF or `:quit`, then save the session.
//!
//! Plain input lines are typed at the end of the buffer; lines starting
//! with `:` are commands (see [`HELP`]).

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use live_proofer::{
    config::{AppConfig, AppPaths},
    dictionary::{UnknownWordChecker, WordListStore},
    llm::{ApiCorrector, LlmCorrector},
    pipeline::{JobRunner, SessionView},
    session::{EditSession, ResetMode, SessionCommand, SessionHandle, SessionState},
};

const HELP: &str = "\
commands:
  :undo            step back one checkpoint
  :redo            step forward one checkpoint
  :jump N          restore checkpoint N
  :reset           forget progress and process everything again
  :done            mark the whole buffer as finished
  :clear           empty the buffer
  :pause / :resume toggle automatic AI correction
  :enhance         rewrite the whole buffer
  :dictate TEXT    insert TEXT as a transcription
  :save            write the session to disk
  :show            print buffer and status
  :quit            save and exit
anything else is typed at the end of the buffer";

// ---------------------------------------------------------------------------
// Input parsing
// ---------------------------------------------------------------------------

/// One parsed stdin line.
#[derive(Debug, PartialEq)]
enum Input {
    /// Commands to forward to the session, in order.
    Send(Vec<SessionCommand>),
    Save,
    Show,
    Help,
    Quit,
    Invalid(String),
}

fn parse_line(line: &str) -> Input {
    let Some(command) = line.strip_prefix(':') else {
        if line.trim().is_empty() {
            return Input::Send(Vec::new());
        }
        return Input::Send(vec![SessionCommand::Append(line.to_string())]);
    };

    let (name, arg) = match command.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (command.trim(), ""),
    };

    let single = |c| Input::Send(vec![c]);
    match name {
        "undo" => single(SessionCommand::Undo),
        "redo" => single(SessionCommand::Redo),
        "jump" => match arg.parse::<usize>() {
            Ok(index) => single(SessionCommand::JumpTo(index)),
            Err(_) => Input::Invalid(format!("usage: :jump N (got {arg:?})")),
        },
        "reset" => single(SessionCommand::Reset(ResetMode::Reprocess)),
        "done" => single(SessionCommand::Reset(ResetMode::MarkDone)),
        "clear" => single(SessionCommand::Clear),
        "pause" => single(SessionCommand::SetAutoCorrect(false)),
        "resume" => single(SessionCommand::SetAutoCorrect(true)),
        "enhance" => single(SessionCommand::Enhance),
        "dictate" if arg.is_empty() => Input::Invalid("usage: :dictate TEXT".into()),
        "dictate" => Input::Send(vec![
            SessionCommand::BeginRecording,
            SessionCommand::BeginTranscribing,
            SessionCommand::InsertTranscription(arg.to_string()),
        ]),
        "save" => Input::Save,
        "show" => Input::Show,
        "help" | "h" | "?" => Input::Help,
        "quit" | "q" => Input::Quit,
        other => Input::Invalid(format!("unknown command :{other} (try :help)")),
    }
}

fn print_view(view: &SessionView) {
    let p = view.progress;
    println!("---");
    println!("{}", view.text);
    println!(
        "--- [{}] committed {} / corrected {} / checked {} · history {}/{} · {} finalized{}",
        view.status.label(),
        p.committed,
        p.corrected,
        p.checked,
        view.history_index + 1,
        view.history_len,
        view.finalized_count,
        if view.auto_correct { "" } else { " · auto-correct off" },
    );
    if !view.unknown_words.is_empty() {
        println!("unknown: {}", view.unknown_words.join(", "));
    }
    if let Some(message) = &view.error_message {
        println!("error: {message}");
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    // 1. Logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // 2. Config
    let config = AppConfig::load().unwrap_or_else(|e| {
        log::warn!("Failed to load config, using defaults: {e}");
        AppConfig::default()
    });

    // 3. Tokio runtime
    let rt = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .context("failed to build tokio runtime")?;

    rt.block_on(run(config))
}

async fn run(config: AppConfig) -> Result<()> {
    // 4. Word lists + checker
    let mut store = WordListStore::new();
    let dict_dir = config.dictionaries_dir();
    let loaded = store.load_dir(&dict_dir, &config.dictionary.languages);
    if loaded.is_empty() {
        log::warn!(
            "No word lists found in {}; unknown-word check will report nothing",
            dict_dir.display()
        );
    } else {
        log::info!("Loaded word lists: {}", loaded.join(", "));
    }
    let checker = UnknownWordChecker::spawn(&store, config.pipeline.dict_timeout());

    // 5. LLM corrector
    if !config.llm.is_enabled() {
        log::info!("AI backend disabled; only dictionary checks will run");
    }
    let llm: Arc<dyn LlmCorrector> = Arc::new(ApiCorrector::from_config(&config.llm));
    let runner = JobRunner::new(llm, checker, config.pipeline.ai_timeout());

    // 6. Session
    let session_file: PathBuf = AppPaths::new().session_file;
    let mut session = EditSession::new(&config);
    match SessionState::load_from(&session_file) {
        Ok(Some(state)) => {
            log::info!("Restored session from {}", session_file.display());
            session.restore_state(state);
        }
        Ok(None) => {}
        Err(e) => log::warn!("Ignoring saved session: {e:#}"),
    }

    // 7. Driver
    let handle = SessionHandle::spawn(session, runner, config.pipeline.tick_duration());
    println!("live-proofer ready; type text or :help");

    // 8. Input loop
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match parse_line(&line) {
            Input::Send(commands) => {
                for command in commands {
                    handle.send(command).await?;
                }
            }
            Input::Save => {
                handle.send(SessionCommand::Save(session_file.clone())).await?;
            }
            Input::Show => print_view(&handle.view()),
            Input::Help => println!("{HELP}"),
            Input::Quit => break,
            Input::Invalid(message) => eprintln!("{message}"),
        }
    }

    handle.send(SessionCommand::Save(session_file)).await?;
    handle.shutdown().await;
    log::info!("Bye");
    Ok(())
}
