use crate::repl::Repl;
use clap::Parser;

#[derive(Parser, Debug)]
#[clap(about = "Start the interactive session")]
pub struct Opts {
    /// Grammar to start in
    #[clap(short, long, default_value = "expr")]
    grammar: String,
}

pub fn execute(opts: &Opts) -> anyhow::Result<()> {
    let grammar = crate::grammar::for_name(&opts.grammar)
        .ok_or_else(|| anyhow::anyhow!("unknown grammar `{}`", opts.grammar))?;

    let mut repl = Repl::new(grammar)?;
    repl.run_loop()
}
