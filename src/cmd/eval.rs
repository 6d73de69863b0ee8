use crate::eval::Interpreter;
use crate::syntax::error::reporting::ErrorReporter;
use crate::syntax::source::Origin;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(about = "Evaluate <input> with the expression grammar")]
pub struct Opts {
    /// File to evaluate; omit when using --expr
    input: Option<String>,

    /// Evaluate this string instead of reading a file
    #[clap(short, long)]
    expr: Option<String>,
}

pub fn execute(opts: &Opts) -> anyhow::Result<()> {
    let grammar = crate::grammar::for_name("expr")
        .ok_or_else(|| anyhow::anyhow!("expression grammar is not registered"))?;

    let mut registry = crate::syntax::source::Registry::new();
    let id = match (&opts.expr, &opts.input) {
        (Some(text), _) => registry.add_string(Origin::Synthetic, text.clone()),
        (None, Some(path)) => registry.add_file(&PathBuf::from(path.clone()))?,
        (None, None) => anyhow::bail!("nothing to evaluate; pass a file or --expr"),
    };
    let text = registry.text(id).unwrap_or_default().to_string();

    let printer = grammar.printer();
    let mut interpreter = Interpreter::new();
    let mut failures = 0usize;
    let result = grammar.parse(id, &text, |v| {
        match interpreter.eval(&v) {
            Ok(r) => println!("{}", printer.print(&r)),
            Err(e) => {
                failures += 1;
                eprintln!("error: {}", e);
            }
        }
        Ok(())
    });

    if let Err(e) = result {
        ErrorReporter::new(&registry).report(&e);
        anyhow::bail!("input has syntax errors");
    }
    if failures > 0 {
        anyhow::bail!("{} statement(s) failed to evaluate", failures);
    }

    Ok(())
}
