use crate::syntax::error::reporting::ErrorReporter;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(about = "Reprint the file specified by <input> in canonical form")]
pub struct Opts {
    input: String,

    /// Grammar name; defaults to the one registered for the file suffix
    #[clap(short, long)]
    grammar: Option<String>,

    /// One statement per line instead of indented multi-line output
    #[clap(short, long)]
    compact: bool,
}

pub fn execute(opts: &Opts) -> anyhow::Result<()> {
    let path = PathBuf::from(opts.input.clone());
    let grammar = super::grammar_for(&path, opts.grammar.as_deref())?;

    let mut registry = crate::syntax::source::Registry::new();
    let id = registry.add_file(&path)?;
    let text = registry.text(id).unwrap_or_default().to_string();

    let printer = grammar.printer();
    let compact = opts.compact;
    let result = grammar.parse(id, &text, |v| {
        if compact {
            println!("{}", printer.print(&v));
        } else {
            println!("{}", printer.pretty(&v));
        }
        Ok(())
    });

    // A file that fails to parse cleanly is not reformatted input; the
    // caller gets the diagnostics and a failure status.
    if let Err(e) = result {
        ErrorReporter::new(&registry).report(&e);
        anyhow::bail!("`{}` has syntax errors", path.display());
    }

    Ok(())
}
