use super::error::Kind;
use super::operators::CONS;
use super::scanner::Scanner;
use super::style::Style;
use super::value::{Tag, Value};

/// One structural event or token from the stream. Exactly one variant
/// is produced per call to [`Lexer::next`]; `Eof` is terminal.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Newline at bracket depth zero; a statement boundary.
    EndOfLine,
    Open(Tag),
    Close(Tag),
    /// An identifier or operator spelling.
    Word(Tag),
    Literal(Value),
    Eof,
}

/// Operator spellings recognised with one code point of lookahead,
/// checked before the single-character fallback.
const TWO_CHAR: [&str; 9] = ["..", ">=", "<=", "!=", "==", "**", "++", "||", "&&"];

const OPERATOR_CHARS: &str = "+-*/%<>=!&|;^~@$?";

/// The configurable tokenizer. All surface-syntax decisions come from
/// the borrowed [`Style`]; the classification order below is fixed and
/// load-bearing.
pub struct Lexer<'a> {
    style: &'a Style,
}

impl<'a> Lexer<'a> {
    pub fn new(style: &'a Style) -> Self {
        Self { style }
    }

    pub fn next(&self, scan: &mut Scanner) -> Token {
        loop {
            let start = scan.offset();
            let c = match scan.read() {
                None => return Token::Eof,
                Some(c) => c,
            };

            if c == '\n' {
                if scan.depth() == 0 {
                    return Token::EndOfLine;
                }
                continue;
            }
            if c == '\r' || c == ',' || c.is_whitespace() {
                continue;
            }
            if self.at_comment(scan, c) {
                self.skip_comment(scan);
                continue;
            }
            if self.style.is_open(c) {
                scan.open();
                return Token::Open(Tag::from(c));
            }
            if self.style.is_close(c) {
                scan.close();
                return Token::Close(Tag::from(c));
            }
            if c == '"' {
                return self.read_string(scan, start);
            }
            if self.starts_number(scan, c) {
                return self.read_number(scan, c, start);
            }
            if c == self.style.key_value {
                return Token::Word(Tag::new(CONS));
            }
            if c == '.' {
                // `..` is the range operator; a bare dot re-emits as the
                // key-value operator token.
                if scan.peek() == Some('.') {
                    scan.read();
                    return Token::Word(Tag::new(".."));
                }
                return Token::Word(Tag::new(CONS));
            }
            if OPERATOR_CHARS.contains(c) {
                if let Some(p) = scan.peek() {
                    let mut pair = c.to_string();
                    pair.push(p);
                    if TWO_CHAR.contains(&pair.as_str()) {
                        scan.read();
                        return Token::Word(Tag(pair));
                    }
                }
                return Token::Word(Tag::from(c));
            }
            if c == '_' || c.is_alphabetic() {
                return self.read_word(scan, c);
            }

            if c.is_control() {
                scan.report(
                    Kind::Lexical,
                    format!("control character U+{:04X} in input", c as u32),
                    start..scan.offset(),
                );
            } else {
                scan.report(
                    Kind::Lexical,
                    format!("unrecognized character `{}`", c),
                    start..scan.offset(),
                );
            }
        }
    }

    fn at_comment(&self, scan: &Scanner, c: char) -> bool {
        let mut marker = self.style.comment.chars();
        match marker.next() {
            Some(first) if first == c => match marker.next() {
                None => true,
                Some(second) => scan.peek() == Some(second),
            },
            _ => false,
        }
    }

    fn skip_comment(&self, scan: &mut Scanner) {
        // Leave the newline in the stream; it is the statement boundary.
        while let Some(c) = scan.peek() {
            if c == '\n' {
                break;
            }
            scan.read();
        }
    }

    fn starts_number(&self, scan: &Scanner, c: char) -> bool {
        if c.is_ascii_digit() {
            return true;
        }
        (c == '-' || c == '.')
            && self.style.signed_numbers
            && scan.peek().map_or(false, |d| d.is_ascii_digit())
    }

    /// Greedy scan: a maximal digit run across at most one decimal
    /// point. Overflow yields a zero literal plus a reported error
    /// rather than aborting the stream.
    fn read_number(&self, scan: &mut Scanner, first: char, start: usize) -> Token {
        let mut text = String::new();
        text.push(first);
        let mut seen_dot = first == '.';

        loop {
            match scan.peek() {
                Some(d) if d.is_ascii_digit() => {
                    text.push(d);
                    scan.read();
                }
                // Consume the dot as a decimal point unless it starts
                // the `..` operator.
                Some('.') if !seen_dot && scan.peek_second() != Some('.') => {
                    seen_dot = true;
                    text.push('.');
                    scan.read();
                }
                _ => break,
            }
        }

        if seen_dot {
            match text.parse::<f64>() {
                Ok(v) => Token::Literal(Value::Float(v)),
                Err(_) => {
                    scan.report(
                        Kind::Lexical,
                        format!("malformed number `{}`", text),
                        start..scan.offset(),
                    );
                    Token::Literal(Value::Float(0.0))
                }
            }
        } else {
            match text.parse::<i64>() {
                Ok(v) => Token::Literal(Value::Int(v)),
                Err(_) => {
                    scan.report(
                        Kind::Lexical,
                        format!("integer literal `{}` out of range", text),
                        start..scan.offset(),
                    );
                    Token::Literal(Value::Int(0))
                }
            }
        }
    }

    /// C-style escapes; an unrecognised escape passes the character
    /// through unchanged. An unterminated string is recoverable and
    /// emits what was read.
    fn read_string(&self, scan: &mut Scanner, start: usize) -> Token {
        let mut text = String::new();

        loop {
            match scan.read() {
                None => {
                    scan.report(Kind::Lexical, "unterminated string", start..scan.offset());
                    return Token::Literal(Value::String(text));
                }
                Some('"') => return Token::Literal(Value::String(text)),
                Some('\\') => match scan.read() {
                    None => {
                        scan.report(Kind::Lexical, "unterminated string", start..scan.offset());
                        return Token::Literal(Value::String(text));
                    }
                    Some('n') => text.push('\n'),
                    Some('r') => text.push('\r'),
                    Some('t') => text.push('\t'),
                    Some(other) => text.push(other),
                },
                Some(c) => text.push(c),
            }
        }
    }

    fn read_word(&self, scan: &mut Scanner, first: char) -> Token {
        let mut word = String::new();
        word.push(first);
        while let Some(c) = scan.peek() {
            if c == '_' || c.is_alphanumeric() {
                word.push(c);
                scan.read();
            } else {
                break;
            }
        }

        // Reserved float spellings come before identifier classification.
        match word.as_str() {
            "NaN" => return Token::Literal(Value::Float(f64::NAN)),
            "Inf" => return Token::Literal(Value::Float(f64::INFINITY)),
            _ => {}
        }
        if let Some(v) = self.style.boolean(&word) {
            return Token::Literal(Value::Bool(v));
        }
        Token::Word(Tag(word))
    }
}
