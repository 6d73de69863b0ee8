pub mod command;
pub mod string_completer;

use crate::eval::Interpreter;
use crate::grammar::Grammar;
use crate::notation_config_directory;
use crate::repl::command::Commands;
use crate::repl::string_completer::StringCompleter;
use crate::syntax::error::reporting::ErrorReporter;
use crate::syntax::source::{Origin, Registry};
use crate::NOTATION_VERSION;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::ValidationContext;
use rustyline::validate::ValidationResult;
use rustyline::validate::Validator;
use rustyline::{Editor, Helper};
use std::borrow::Cow;

/// Mutable interactive state, separate from the line editor so that
/// commands can borrow it freely.
pub struct Session {
    pub grammar: &'static Grammar,
    pub interpreter: Interpreter,
    pub evaluating: bool,
}

impl Session {
    pub fn new(grammar: &'static Grammar) -> Self {
        Self {
            grammar,
            interpreter: Interpreter::new(),
            evaluating: grammar.name() == "expr",
        }
    }

    pub fn switch_grammar(&mut self, grammar: &'static Grammar) {
        self.grammar = grammar;
        self.evaluating = grammar.name() == "expr";
    }
}

pub struct Repl {
    session: Session,
    commands: Commands,
    editor: Editor<ReplHelper>,
}

pub struct ReplHelper {
    command_completer: StringCompleter,
    name_completer: StringCompleter,
    bracket_validator: rustyline::validate::MatchingBracketValidator,
    bracket_highlighter: rustyline::highlight::MatchingBracketHighlighter,
}

impl ReplHelper {
    pub fn new(commands: &Commands) -> Self {
        let names: Vec<&str> = crate::grammar::all().iter().map(|g| g.name()).collect();

        Self {
            command_completer: StringCompleter::from(commands.names()),
            name_completer: StringCompleter::from(names),
            bracket_validator: rustyline::validate::MatchingBracketValidator::new(),
            bracket_highlighter: rustyline::highlight::MatchingBracketHighlighter::new(),
        }
    }
}

impl Helper for ReplHelper {}

impl Hinter for ReplHelper {
    type Hint = String;

    fn hint(&self, _line: &str, _pos: usize, _ctx: &rustyline::Context) -> Option<Self::Hint> {
        None
    }
}

impl Completer for ReplHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        ctx: &rustyline::Context,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let (start, matches) = self.command_completer.complete(line, pos, ctx)?;
        if !matches.is_empty() {
            return Ok((start, matches));
        }

        self.name_completer.complete(line, pos, ctx)
    }
}

impl Highlighter for ReplHelper {
    fn highlight<'l>(&self, line: &'l str, pos: usize) -> Cow<'l, str> {
        self.bracket_highlighter.highlight(line, pos)
    }
}

impl Validator for ReplHelper {
    fn validate(&self, ctx: &mut ValidationContext) -> rustyline::Result<ValidationResult> {
        self.bracket_validator.validate(ctx)
    }
}

impl Repl {
    pub fn new(grammar: &'static Grammar) -> anyhow::Result<Self> {
        Self::create_directories()?;

        let editor = Editor::<ReplHelper>::with_config(Self::default_config());
        let commands = Commands::new();

        Ok(Self {
            session: Session::new(grammar),
            commands,
            editor,
        })
    }

    // main read-eval-print loop
    pub fn run_loop(&mut self) -> anyhow::Result<()> {
        self.editor.load_history(&Self::history_path())?;
        self.editor.set_helper(Some(ReplHelper::new(&self.commands)));
        self.banner();

        loop {
            match self.read_line() {
                Ok(input) => {
                    if let Err(e) = self.handle_input(&input) {
                        eprintln!("{}", e);
                    }
                }
                Err(err) => match err.downcast_ref() {
                    Some(ReadlineError::Interrupted) => {
                        println!("CTRL-C");
                        break;
                    }
                    Some(ReadlineError::Eof) => {
                        println!("CTRL-D");
                        break;
                    }
                    err => {
                        println!("Error: {:?}", err);
                        break;
                    }
                },
            }
        }

        self.editor.save_history(&Self::history_path())?;
        Ok(())
    }

    fn banner(&self) {
        println!("notation {}", NOTATION_VERSION);
        println!("Grammar: {}\n", self.session.grammar.name());
        println!("Type :help for help.");
    }

    fn read_line(&mut self) -> anyhow::Result<String> {
        let prompt = self.prompt();
        let line = self.editor.readline(&prompt)?;
        Ok(line)
    }

    fn handle_input(&mut self, input: &str) -> anyhow::Result<()> {
        if !self.commands.dispatch(input, &mut self.session)? {
            self.parse_and_show(input);
        }
        Ok(())
    }

    /// Parses one line of input; prints either the evaluated results or
    /// the values themselves, depending on the session mode. Syntax
    /// errors render as full diagnostics but never end the session.
    fn parse_and_show(&mut self, input: &str) {
        let mut registry = Registry::new();
        let id = registry.add_string(Origin::Repl, input);
        let printer = self.session.grammar.printer();

        let mut parsed = Vec::new();
        let result = self.session.grammar.parse(id, input, |v| {
            parsed.push(v);
            Ok(())
        });
        if let Err(e) = result {
            ErrorReporter::new(&registry).report(&e);
        }

        for value in &parsed {
            if self.session.evaluating {
                match self.session.interpreter.eval(value) {
                    Ok(v) => println!("{}", printer.print(&v)),
                    Err(e) => eprintln!("error: {}", e),
                }
            } else {
                println!("{}", printer.pretty(value));
            }
        }
    }

    #[inline]
    fn prompt(&self) -> String {
        format!("{}> ", self.session.grammar.name())
    }

    fn default_config() -> rustyline::config::Config {
        let config_builder = rustyline::config::Config::builder();

        config_builder
            .auto_add_history(true)
            .history_ignore_dups(true)
            .history_ignore_space(false)
            .max_history_size(500)
            .completion_prompt_limit(100)
            .build()
    }

    fn history_path() -> std::path::PathBuf {
        Self::config_dir().join("history")
    }

    #[inline]
    fn create_directories() -> anyhow::Result<()> {
        std::fs::create_dir_all(Self::config_dir())?;

        if !Self::history_path().exists() {
            std::fs::File::create(Self::history_path())?;
        }

        Ok(())
    }

    #[inline]
    fn config_dir() -> std::path::PathBuf {
        notation_config_directory().join("repl")
    }
}
