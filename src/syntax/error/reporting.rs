use super::{Detail, Error, Kind};
use crate::syntax::source::{Registry, SourceId};
use codespan_reporting::diagnostic::{Diagnostic, Label};
use codespan_reporting::term;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream};

pub struct ErrorReporter<'a> {
    registry: &'a Registry,
}

impl<'a> ErrorReporter<'a> {
    pub fn new(registry: &'a Registry) -> Self {
        Self { registry }
    }

    pub fn report(&self, e: &Error) {
        let writer = StandardStream::stderr(ColorChoice::Auto);
        let config = term::Config::default();

        for diagnostic in self.diagnostics(e) {
            if term::emit(&mut writer.lock(), &config, self.registry, &diagnostic).is_err() {
                eprintln!("error: {}", e);
            }
        }
    }

    pub fn diagnostics(&self, e: &Error) -> Vec<Diagnostic<SourceId>> {
        match e {
            Error::Io(e) => vec![Diagnostic::error()
                .with_code("E000")
                .with_message(format!("{}", e))],
            Error::Rejected(message) => vec![Diagnostic::error()
                .with_code("E001")
                .with_message(message.clone())],
            Error::Syntax(details) => details.iter().map(|d| self.diagnostic(d)).collect(),
        }
    }

    fn diagnostic(&self, detail: &Detail) -> Diagnostic<SourceId> {
        let message = match detail.kind {
            Kind::Lexical => "failed to read input",
            Kind::Structural => "failed to parse input",
            Kind::Fold => "failed to fold key-value pairs",
        };
        let diagnostic = Diagnostic::error()
            .with_code(detail.kind.code())
            .with_message(message);

        if detail.location.id.is_synthetic() {
            diagnostic.with_notes(vec![detail.message.clone()])
        } else {
            diagnostic.with_labels(vec![Label::primary(
                detail.location.id,
                detail.location.span.clone(),
            )
            .with_message(detail.message.clone())])
        }
    }
}
