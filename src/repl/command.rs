use super::Session;
use anyhow::anyhow;

pub struct Commands;

impl Commands {
    pub fn new() -> Self {
        Self {}
    }

    pub fn names(&self) -> Vec<&'static str> {
        vec![":help", ":grammar", ":grammars", ":set", ":settings"]
    }

    /// Returns `false` when the input is not a command and should be
    /// parsed as source text instead.
    pub fn dispatch(&self, input: &str, session: &mut Session) -> anyhow::Result<bool> {
        let parts: Vec<&str> = input.trim().split_whitespace().collect();

        if let Some(true) = parts.first().map(|e| e.starts_with(':')) {
            match &parts[..] {
                [":help"] => self.handle_help(),
                [":grammars"] => self.handle_grammars(),
                [":grammar", name] => self.handle_grammar(name, session)?,
                [":set", argument] => self.handle_set(argument, session)?,
                [":settings"] => self.handle_settings(session),
                _ => return Err(anyhow!("Invalid command")),
            }
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn handle_help(&self) {
        println!("Available commands: ");
        self.display_help(":help", "Show help on the available commands");
        self.display_help(":grammars", "List the registered grammars");
        self.display_help(":grammar name", "Switch the session to `name`");
        self.display_help(":set (+|-)eval", "Enable or disable evaluation");
        self.display_help(":settings", "Show the values of all settings");
    }

    fn handle_grammars(&self) {
        for grammar in crate::grammar::all() {
            println!("{:<12} ({})", grammar.name(), grammar.file_suffix());
        }
    }

    fn handle_grammar(&self, name: &str, session: &mut Session) -> anyhow::Result<()> {
        match crate::grammar::for_name(name) {
            Some(grammar) => {
                session.switch_grammar(grammar);
                Ok(())
            }
            None => Err(anyhow!("Unknown grammar `{}`; try :grammars", name)),
        }
    }

    fn handle_set(&self, setting: &str, session: &mut Session) -> anyhow::Result<()> {
        match setting {
            "+eval" => {
                session.evaluating = true;
                Ok(())
            }
            "-eval" => {
                session.evaluating = false;
                Ok(())
            }
            _ => Err(anyhow!(
                "Setting must be a known setting and prefixed with either + or -"
            )),
        }
    }

    fn handle_settings(&self, session: &Session) {
        println!(
            "Settings+> grammar: {} eval: {}",
            session.grammar.name(),
            if session.evaluating {
                "enabled"
            } else {
                "disabled"
            }
        );
    }

    #[inline]
    fn display_help(&self, usage: &str, description: &str) {
        println!("{:<25} {}", usage, description);
    }
}

impl Default for Commands {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session::new(crate::grammar::for_name("expr").unwrap())
    }

    #[test]
    fn test_plain_input_is_not_a_command() {
        let mut s = session();
        assert_eq!(Commands::new().dispatch("1 + 2", &mut s).unwrap(), false);
    }

    #[test]
    fn test_grammar_switch() {
        let mut s = session();
        assert_eq!(
            Commands::new().dispatch("  :grammar json", &mut s).unwrap(),
            true
        );
        assert_eq!(s.grammar.name(), "json");
        assert!(!s.evaluating);
    }

    #[test]
    fn test_eval_toggle() {
        let mut s = session();
        assert!(s.evaluating);
        Commands::new().dispatch(":set -eval", &mut s).unwrap();
        assert!(!s.evaluating);
    }

    #[test]
    fn test_unknown_command_is_an_error() {
        let mut s = session();
        assert!(Commands::new().dispatch(":nope", &mut s).is_err());
    }
}
