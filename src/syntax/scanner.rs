use super::error::{Errors, Kind};
use super::source::{Location, SourceId, Span};

/// Code-point cursor over the text of one source.
///
/// Owns everything that crosses statement boundaries: the read
/// position, the bracket nesting depth and the recoverable-error sink.
/// Everything else in the core is reset per statement.
pub struct Scanner<'a> {
    text: &'a str,
    pos: usize,
    id: SourceId,
    depth: usize,
    line: usize,
    pub errors: Errors,
}

impl<'a> Scanner<'a> {
    pub fn new(id: SourceId, text: &'a str) -> Self {
        Self {
            text,
            pos: 0,
            id,
            depth: 0,
            line: 1,
            errors: Errors::new(),
        }
    }

    pub fn read(&mut self) -> Option<char> {
        let c = self.text[self.pos..].chars().next()?;
        self.pos += c.len_utf8();
        if c == '\n' {
            self.line += 1;
        }
        Some(c)
    }

    /// Non-consuming single code-point lookahead.
    pub fn peek(&self) -> Option<char> {
        self.text[self.pos..].chars().next()
    }

    pub fn peek_second(&self) -> Option<char> {
        let mut chars = self.text[self.pos..].chars();
        chars.next();
        chars.next()
    }

    pub fn offset(&self) -> usize {
        self.pos
    }

    pub fn line(&self) -> usize {
        self.line
    }

    /// Bracket nesting bookkeeping; a newline is a statement boundary
    /// only at depth zero.
    pub fn open(&mut self) {
        self.depth += 1;
    }

    pub fn close(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn location(&self, span: Span) -> Location {
        Location::new(self.id, span)
    }

    pub fn report(&mut self, kind: Kind, message: impl Into<String>, span: Span) {
        let location = Location::new(self.id, span);
        self.errors.report(kind, message, location);
    }

    pub fn error_count(&self) -> usize {
        self.errors.count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_and_peek() {
        let mut scanner = Scanner::new(SourceId::synthetic(), "ab");
        assert_eq!(scanner.peek(), Some('a'));
        assert_eq!(scanner.peek_second(), Some('b'));
        assert_eq!(scanner.read(), Some('a'));
        assert_eq!(scanner.offset(), 1);
        assert_eq!(scanner.read(), Some('b'));
        assert_eq!(scanner.read(), None);
    }

    #[test]
    fn test_line_tracking() {
        let mut scanner = Scanner::new(SourceId::synthetic(), "a\nb");
        while scanner.read().is_some() {}
        assert_eq!(scanner.line(), 2);
    }

    #[test]
    fn test_depth_never_underflows() {
        let mut scanner = Scanner::new(SourceId::synthetic(), "");
        scanner.close();
        assert_eq!(scanner.depth(), 0);
    }
}
