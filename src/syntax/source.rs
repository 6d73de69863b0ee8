use codespan_reporting::files::{self, SimpleFiles};
use std::path::{Path, PathBuf};

pub type Span = std::ops::Range<usize>;

/// Identifies one registered source inside a [`Registry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourceId(pub usize);

impl SourceId {
    /// Sources that were never registered, e.g. strings parsed directly
    /// in tests.
    pub fn synthetic() -> Self {
        SourceId(usize::MAX)
    }

    pub fn is_synthetic(&self) -> bool {
        self.0 == usize::MAX
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub id: SourceId,
    pub span: Span,
}

impl Location {
    pub fn new(id: SourceId, span: Span) -> Self {
        Self { id, span }
    }

    pub fn synthetic(span: Span) -> Self {
        Self::new(SourceId::synthetic(), span)
    }
}

#[derive(Debug, Clone)]
pub enum Origin {
    Synthetic,
    Repl,
    File(PathBuf),
}

impl std::fmt::Display for Origin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Origin::Synthetic => write!(f, "<string>"),
            Origin::Repl => write!(f, "<repl>"),
            Origin::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Holds the text of every source the driver has opened, so that error
/// reporting can render spans against the original input.
pub struct Registry {
    sources: SimpleFiles<Origin, String>,
}

impl Registry {
    pub fn new() -> Self {
        Self {
            sources: SimpleFiles::new(),
        }
    }

    pub fn add_string(&mut self, origin: Origin, content: impl Into<String>) -> SourceId {
        SourceId(self.sources.add(origin, content.into()))
    }

    pub fn add_file(&mut self, path: &Path) -> std::io::Result<SourceId> {
        let content = std::fs::read_to_string(path)?;
        Ok(SourceId(
            self.sources.add(Origin::File(path.to_path_buf()), content),
        ))
    }

    pub fn text(&self, id: SourceId) -> Option<&str> {
        self.sources.get(id.0).ok().map(|f| f.source().as_str())
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> files::Files<'a> for Registry {
    type FileId = SourceId;
    type Name = Origin;
    type Source = &'a str;

    fn name(&'a self, id: SourceId) -> Result<Origin, files::Error> {
        self.sources.name(id.0)
    }

    fn source(&'a self, id: SourceId) -> Result<&'a str, files::Error> {
        self.sources.source(id.0)
    }

    fn line_index(&'a self, id: SourceId, byte_index: usize) -> Result<usize, files::Error> {
        self.sources.line_index(id.0, byte_index)
    }

    fn line_range(&'a self, id: SourceId, line_index: usize) -> Result<Span, files::Error> {
        self.sources.line_range(id.0, line_index)
    }
}
