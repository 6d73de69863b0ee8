extern crate rustc_hash;
extern crate thiserror;

pub mod cmd;
pub mod eval;
pub mod grammar;
pub mod repl;
pub mod syntax;

pub const NOTATION_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Per-user state (REPL history and the like) lives under the platform
/// configuration directory, with a working-directory fallback.
pub fn notation_config_directory() -> std::path::PathBuf {
    directories::ProjectDirs::from("org", "notation", "notation")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .unwrap_or_else(|| std::path::PathBuf::from(".notation"))
}

#[cfg(test)]
#[macro_use]
extern crate matches;

#[cfg(test)]
extern crate quickcheck;

#[cfg(test)]
#[macro_use(quickcheck)]
extern crate quickcheck_macros;
