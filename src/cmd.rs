pub mod eval;
pub mod fmt;
pub mod parse;
pub mod repl;

use crate::grammar::Grammar;
use anyhow::anyhow;
use std::path::Path;

/// Grammar selection shared by the file-driven commands: an explicit
/// `--grammar` name wins, otherwise the file suffix decides.
pub(crate) fn grammar_for(path: &Path, name: Option<&str>) -> anyhow::Result<&'static Grammar> {
    match name {
        Some(n) => crate::grammar::for_name(n).ok_or_else(|| anyhow!("unknown grammar `{}`", n)),
        None => crate::grammar::for_path(path).ok_or_else(|| {
            anyhow!(
                "no grammar registered for `{}`; use --grammar to pick one",
                path.display()
            )
        }),
    }
}
