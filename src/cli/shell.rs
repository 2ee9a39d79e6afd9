use std::{
    borrow::Cow,
    io::{self, BufRead},
};

use dialoguer::{theme::ColorfulTheme, Confirm};
use rustyline::{
    completion::{Completer, Pair},
    error::ReadlineError,
    highlight::Highlighter,
    hint::Hinter,
    history::DefaultHistory,
    validate::{ValidationContext, ValidationResult, Validator},
    Cmd, Context as ReadlineContext, Editor, Helper, KeyEvent,
};
use tracing::{debug, warn};

use crate::{
    cli::{
        help,
        output,
        session::{Reply, Session},
    },
    config::{Config, ConfigManager},
    errors::{CliError, CommandError, SessionError},
    grammar::COMMAND_WORDS,
    ledger::{Ledger, LoadReport},
    storage::TextFileStore,
    utils::{build_info, clock::SystemClock},
};

const SCRIPT_ENV: &str = "BALANCE_CLI_SCRIPT";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoopControl {
    Continue,
    Exit,
}

pub fn run_cli() -> Result<(), CliError> {
    let mode = if std::env::var_os(SCRIPT_ENV).is_some() {
        CliMode::Script
    } else {
        CliMode::Interactive
    };

    let manager = ConfigManager::new();
    let config = manager.load()?;
    output::set_preferences((&config).into());

    let store = TextFileStore::new(manager.store_path(&config));
    let mut session = Session::new(Ledger::new(Box::new(store)), Box::new(SystemClock));
    debug!(?mode, store = %session.ledger().location(), "starting shell");

    // Fatal: `save` must never overwrite a store that was not read.
    let report = session.load().map_err(|err| {
        warn!(error = %err, "initial load failed");
        err
    })?;
    report_load(&report, &session.ledger().location());

    match mode {
        CliMode::Interactive => run_interactive(&mut session, &manager, &config),
        CliMode::Script => run_script(&mut session),
    }
}

fn run_interactive(
    session: &mut Session,
    manager: &ConfigManager,
    config: &Config,
) -> Result<(), CliError> {
    let mut editor = Editor::<CommandHelper, DefaultHistory>::new()?;
    editor.set_helper(Some(CommandHelper::new(COMMAND_WORDS)));
    editor.bind_sequence(KeyEvent::from('?'), Cmd::Complete);

    let history = manager.history_path(config);
    if editor.load_history(&history).is_err() {
        debug!(path = %history.display(), "no readable history");
    }

    output::info(build_info::banner());
    output::hint("Type `help` to see available commands.");

    loop {
        match editor.readline(&config.prompt) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                editor.add_history_entry(trimmed).ok();
                if handle_line(session, trimmed) == LoopControl::Exit {
                    break;
                }
            }
            Err(ReadlineError::Interrupted) => {
                if confirm_exit(session)? {
                    break;
                }
            }
            Err(ReadlineError::Eof) => {
                output::info("Exiting shell.");
                break;
            }
            Err(err) => return Err(err.into()),
        }
    }

    if let Err(err) = editor.save_history(&history) {
        warn!(path = %history.display(), error = %err, "failed to save history");
    }
    Ok(())
}

fn run_script(session: &mut Session) -> Result<(), CliError> {
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        if handle_line(session, &line) == LoopControl::Exit {
            break;
        }
    }
    Ok(())
}

fn handle_line(session: &mut Session, line: &str) -> LoopControl {
    match session.handle_line(line) {
        Ok(reply) => present(session, reply),
        Err(err) => {
            report_error(&err);
            LoopControl::Continue
        }
    }
}

fn confirm_exit(session: &Session) -> Result<bool, CliError> {
    if !session.ledger().is_dirty() {
        return Ok(true);
    }
    let confirmed = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt("Discard unsaved changes and exit?")
        .default(false)
        .interact()?;
    Ok(confirmed)
}

fn present(session: &Session, reply: Reply) -> LoopControl {
    match reply {
        Reply::Exit { unsaved } => {
            if unsaved {
                output::warning("Exiting with unsaved changes.");
            }
            return LoopControl::Exit;
        }
        Reply::Loaded(report) => report_load(&report, &session.ledger().location()),
        Reply::Saved { count } => output::success(format!(
            "Saved {count} transaction(s) to {}.",
            session.ledger().location()
        )),
        Reply::Listing { text, tag } => match (text.is_empty(), tag) {
            (false, _) => output::plain(text),
            (true, None) => output::info("No transactions recorded."),
            (true, Some(tag)) => output::info(format!("No transactions tagged #{tag}.")),
        },
        Reply::Total(line) => output::plain(line),
        Reply::Added(txn) => output::success(format!("Added {txn}")),
        Reply::Removed { index, transaction } => {
            output::success(format!("Removed {index}: {transaction}"))
        }
        Reply::Help => help::print_overview(),
    }
    LoopControl::Continue
}

fn report_load(report: &LoadReport, location: &str) {
    if report.created {
        output::info(format!("Created empty ledger at {location}."));
        return;
    }
    for record in &report.rejected {
        output::warning(format!("Skipped {record}"));
    }
    output::info(format!(
        "Loaded {} transaction(s) from {location}.",
        report.loaded
    ));
}

fn report_error(err: &SessionError) {
    output::error(err);
    match err {
        SessionError::Command(CommandError::UnrecognizedCommand {
            suggestion: Some(word),
            ..
        }) => output::hint(format!("Did you mean `{word}`?")),
        SessionError::Command(CommandError::UnrecognizedCommand { .. }) => {
            output::hint("Type `help` to see available commands.")
        }
        _ => {}
    }
}

struct CommandHelper {
    commands: Vec<&'static str>,
}

impl CommandHelper {
    fn new(words: &[&'static str]) -> Self {
        let mut commands = words.to_vec();
        commands.sort_unstable();
        commands.dedup();
        Self { commands }
    }
}

impl Helper for CommandHelper {}

impl Completer for CommandHelper {
    type Candidate = Pair;

    /// Completes the first word only; arguments are free-form.
    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &ReadlineContext<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let prefix = &line[..pos];
        let start = prefix.len() - prefix.trim_start().len();
        if prefix[start..].contains(char::is_whitespace) {
            return Ok((pos, Vec::new()));
        }

        let needle = prefix[start..].to_ascii_lowercase();
        let candidates = self
            .commands
            .iter()
            .filter(|word| word.starts_with(&needle))
            .map(|word| Pair {
                display: word.to_string(),
                replacement: word.to_string(),
            })
            .collect();
        Ok((start, candidates))
    }
}

impl Hinter for CommandHelper {
    type Hint = String;
}

impl Highlighter for CommandHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        Cow::Borrowed(line)
    }
}

impl Validator for CommandHelper {
    fn validate(&self, _ctx: &mut ValidationContext) -> rustyline::Result<ValidationResult> {
        Ok(ValidationResult::Valid(None))
    }
}
