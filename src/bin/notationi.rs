use anyhow::anyhow;
use notation::grammar;
use notation::repl::Repl;

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let grammar = grammar::for_name("expr")
        .ok_or_else(|| anyhow!("expression grammar is not registered"))?;
    let mut repl = Repl::new(grammar)?;
    repl.run_loop()
}
