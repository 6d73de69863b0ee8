/// The declarative bundle of surface-syntax choices shared by the
/// tokenizer and the printer of one grammar.
///
/// A style is plain data. It is constructed once per grammar and passed
/// by reference into every lexer, engine and printer instance; there is
/// no process-wide mutable syntax state.
#[derive(Debug, Clone)]
pub struct Style {
    /// First bracket family, e.g. `(` / `)`.
    pub open: char,
    pub close: char,
    /// Second, independent bracket family, e.g. `{` / `}`.
    pub open2: char,
    pub close2: char,
    /// Surface spelling of the key-value separator, e.g. `:` or `=`.
    pub key_value: char,
    /// Element separator used when printing lists; the tokenizer always
    /// skips commas, so this is a presentation choice only.
    pub separator: &'static str,
    /// Line-comment marker, one or two code points. Empty disables
    /// comment handling.
    pub comment: &'static str,
    pub true_name: &'static str,
    pub false_name: &'static str,
    pub indent: &'static str,
    /// When set, a leading `-` or `.` followed by a digit starts a
    /// numeric literal. Grammars where `-` must always be an operator
    /// token leave this off.
    pub signed_numbers: bool,
}

impl Style {
    pub fn is_open(&self, c: char) -> bool {
        c == self.open || c == self.open2
    }

    pub fn is_close(&self, c: char) -> bool {
        c == self.close || c == self.close2
    }

    pub fn boolean(&self, word: &str) -> Option<bool> {
        if word == self.true_name {
            Some(true)
        } else if word == self.false_name {
            Some(false)
        } else {
            None
        }
    }

    pub fn bool_name(&self, v: bool) -> &'static str {
        if v {
            self.true_name
        } else {
            self.false_name
        }
    }
}
