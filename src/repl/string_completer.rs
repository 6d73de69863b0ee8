use rustc_hash::FxHashSet;
use rustyline::completion::Completer;
use rustyline::completion::Pair;
use rustyline::Context;

pub struct StringCompleter {
    strings: FxHashSet<String>,
}

impl StringCompleter {
    pub fn from<I: Into<String>>(input: Vec<I>) -> Self {
        let mut strings = FxHashSet::default();

        for s in input {
            strings.insert(s.into());
        }

        Self { strings }
    }

    /// Completes the space-delimited word ending at the cursor rather
    /// than the whole line, so `:grammar js` offers `json`.
    fn complete_word(&self, line: &str, pos: usize) -> rustyline::Result<(usize, Vec<Pair>)> {
        let word_start = line[..pos].rfind(' ').map(|i| i + 1).unwrap_or(0);
        self.complete_string(pos, &line[word_start..pos])
    }

    fn complete_string(&self, pos: usize, input: &str) -> rustyline::Result<(usize, Vec<Pair>)> {
        let mut all_matches: Vec<Pair> = self
            .strings
            .iter()
            .filter_map(|known| {
                if !input.is_empty() && known.starts_with(input) {
                    Some(Pair {
                        display: known.clone(),
                        replacement: known.clone(),
                    })
                } else {
                    None
                }
            })
            .collect();

        all_matches.sort_by(|a, b| a.display.cmp(&b.display));
        Ok((pos - input.len(), all_matches))
    }
}

impl Completer for StringCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        self.complete_word(line, pos)
    }
}
