pub mod expr;
pub mod json;
pub mod lisp;
pub mod shell;
pub mod stubs;

use crate::syntax::engine::Engine;
use crate::syntax::error::Error;
use crate::syntax::lexer::{Lexer, Token};
use crate::syntax::operators::Operators;
use crate::syntax::printer::Printer;
use crate::syntax::scanner::Scanner;
use crate::syntax::source::SourceId;
use crate::syntax::style::Style;
use crate::syntax::value::Value;
use lazy_static::lazy_static;

/// A named bundle of style and operator table: one per concrete
/// notation. This is the only unit external code instantiates; parsing
/// and printing always go through a grammar.
pub struct Grammar {
    name: &'static str,
    suffix: &'static str,
    style: Style,
    operators: Operators,
}

impl Grammar {
    pub fn new(
        name: &'static str,
        suffix: &'static str,
        style: Style,
        operators: Operators,
    ) -> Self {
        Self {
            name,
            suffix,
            style,
            operators,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn file_suffix(&self) -> &'static str {
        self.suffix
    }

    pub fn style(&self) -> &Style {
        &self.style
    }

    pub fn operators(&self) -> &Operators {
        &self.operators
    }

    /// Parses a stream of top-level statements, calling `emit` once per
    /// completed value, in source order. Recoverable errors do not stop
    /// the loop; they surface as `Error::Syntax` after the stream ends,
    /// with every already-emitted value standing.
    pub fn parse<F>(&self, id: SourceId, text: &str, mut emit: F) -> Result<(), Error>
    where
        F: FnMut(Value) -> Result<(), Error>,
    {
        let lexer = Lexer::new(&self.style);
        let mut scan = Scanner::new(id, text);
        let mut engine = Engine::new(&self.operators);

        loop {
            let start = scan.offset();
            let token = lexer.next(&mut scan);
            let at = scan.location(start..scan.offset());
            log::trace!("{}: token {:?}", self.name, token);

            match token {
                Token::Eof => {
                    if let Some(v) = engine.end(&at, &mut scan.errors) {
                        emit(v)?;
                    }
                    break;
                }
                Token::EndOfLine => {
                    if let Some(v) = engine.end(&at, &mut scan.errors) {
                        emit(v)?;
                    }
                }
                Token::Open(tag) => engine.open_bracket(tag, &at, &mut scan.errors),
                Token::Close(tag) => engine.close_bracket(tag, &at, &mut scan.errors),
                Token::Literal(v) => engine.push_value(v, &at, &mut scan.errors),
                Token::Word(tag) => {
                    if self.operators.is_operator(tag.as_str()) {
                        engine.push_operator(tag, &at, &mut scan.errors);
                    } else {
                        engine.push_value(Value::Tag(tag), &at, &mut scan.errors);
                    }
                }
            }
        }

        if scan.errors.is_empty() {
            Ok(())
        } else {
            Err(Error::Syntax(scan.errors.into_details()))
        }
    }

    /// Convenience for callers without a source registry.
    pub fn parse_str(&self, text: &str) -> Result<Vec<Value>, Error> {
        let mut out = Vec::new();
        self.parse(SourceId::synthetic(), text, |v| {
            out.push(v);
            Ok(())
        })?;
        Ok(out)
    }

    pub fn printer(&self) -> Printer {
        Printer::new(&self.style, &self.operators)
    }

    pub fn print(&self, v: &Value) -> String {
        self.printer().print(v)
    }
}

lazy_static! {
    static ref GRAMMARS: Vec<Grammar> = vec![
        lisp::grammar(),
        expr::grammar(),
        shell::grammar(),
        json::grammar(),
        stubs::yaml(),
        stubs::ini(),
        stubs::properties(),
    ];
}

pub fn all() -> &'static [Grammar] {
    &GRAMMARS
}

pub fn for_suffix(suffix: &str) -> Option<&'static Grammar> {
    GRAMMARS.iter().find(|g| g.file_suffix() == suffix)
}

pub fn for_name(name: &str) -> Option<&'static Grammar> {
    GRAMMARS.iter().find(|g| g.name() == name)
}

/// Picks a grammar from a file path's extension.
pub fn for_path(path: &std::path::Path) -> Option<&'static Grammar> {
    let suffix = format!(
        ".{}",
        path.extension().and_then(|e| e.to_str()).unwrap_or("")
    );
    for_suffix(&suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suffix_lookup() {
        assert_eq!(for_suffix(".l").map(Grammar::name), Some("lisp"));
        assert_eq!(for_suffix(".expr").map(Grammar::name), Some("expr"));
        assert_eq!(for_suffix(".wsh").map(Grammar::name), Some("shell"));
        assert_eq!(for_suffix(".json").map(Grammar::name), Some("json"));
        assert!(for_suffix(".nope").is_none());
    }

    #[test]
    fn test_name_lookup() {
        assert!(for_name("yaml").is_some());
        assert!(for_name("ini").is_some());
        assert!(for_name("properties").is_some());
    }

    #[test]
    fn test_path_lookup() {
        let g = for_path(std::path::Path::new("demo/config.json")).unwrap();
        assert_eq!(g.name(), "json");
    }

    #[test]
    fn test_errors_do_not_stop_later_statements() {
        let g = expr::grammar();
        let mut values = vec![];
        let result = g.parse(crate::syntax::source::SourceId::synthetic(), ")\n1 + 2\n", |v| {
            values.push(v);
            Ok(())
        });

        assert!(matches!(result, Err(Error::Syntax(_))));
        assert_eq!(values.len(), 1);
    }
}
