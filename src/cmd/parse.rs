use crate::syntax::error::reporting::ErrorReporter;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(about = "Parse the file specified by <input> and pretty-print its values")]
pub struct Opts {
    input: String,

    /// Grammar name; defaults to the one registered for the file suffix
    #[clap(short, long)]
    grammar: Option<String>,
}

pub fn execute(opts: &Opts) -> anyhow::Result<()> {
    let path = PathBuf::from(opts.input.clone());
    let grammar = super::grammar_for(&path, opts.grammar.as_deref())?;

    let mut registry = crate::syntax::source::Registry::new();
    let id = registry.add_file(&path)?;
    let text = registry.text(id).unwrap_or_default().to_string();

    let printer = grammar.printer();
    let result = grammar.parse(id, &text, |v| {
        println!("{}", printer.pretty(&v));
        Ok(())
    });

    // Diagnostics go to stderr either way; malformed input is still an
    // overall failure even though the clean statements were printed.
    if let Err(e) = result {
        ErrorReporter::new(&registry).report(&e);
        anyhow::bail!("`{}` has syntax errors", path.display());
    }

    Ok(())
}
