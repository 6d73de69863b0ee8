use clap::Parser;
use notation::cmd;

#[derive(Parser, Debug)]
#[clap(
    version,
    about = "Parse, reformat, and evaluate the supported notations"
)]
enum Opts {
    Parse(cmd::parse::Opts),
    Fmt(cmd::fmt::Opts),
    Eval(cmd::eval::Opts),
    Repl(cmd::repl::Opts),
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    match Opts::parse() {
        Opts::Parse(opts) => cmd::parse::execute(&opts),
        Opts::Fmt(opts) => cmd::fmt::execute(&opts),
        Opts::Eval(opts) => cmd::eval::execute(&opts),
        Opts::Repl(opts) => cmd::repl::execute(&opts),
    }
}
