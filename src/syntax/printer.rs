use super::operators::{Operators, CONS};
use super::style::Style;
use super::value::{Tag, Value};

/// Renders a value back into source text for one grammar.
///
/// The printer borrows the same style and operator table as the engine,
/// which is what guarantees that printing a parsed value and re-parsing
/// the output yields an equal value.
pub struct Printer<'a> {
    style: &'a Style,
    operators: &'a Operators,
}

impl<'a> Printer<'a> {
    pub fn new(style: &'a Style, operators: &'a Operators) -> Self {
        Self { style, operators }
    }

    pub fn print(&self, v: &Value) -> String {
        self.expression(v)
    }

    /// Multi-line rendering for deep maps and wide tuples; newlines
    /// inside brackets are not statement boundaries, so the output
    /// re-parses like the flat form.
    pub fn pretty(&self, v: &Value) -> String {
        self.pretty_at(v, 0)
    }

    fn expression(&self, v: &Value) -> String {
        match v {
            Value::Tag(tag) => tag.to_string(),
            Value::Int(i) => i.to_string(),
            Value::Float(f) => self.float(*f),
            Value::String(s) => self.string(s),
            Value::Bool(b) => self.style.bool_name(*b).to_string(),
            Value::Map(entries) => self.map(entries),
            Value::Tuple(elements) => self.tuple(elements),
        }
    }

    /// Arity dispatch per the operator-application convention: 1 is a
    /// nullary call, 2 unary, 3 binary; everything else (and any head
    /// that is not a registered operator) prints as a bracketed list.
    fn tuple(&self, elements: &[Value]) -> String {
        match elements {
            [] => format!("{}{}", self.style.open, self.style.close),
            [Value::Tag(head)] => format!("{}{}{}", head, self.style.open, self.style.close),
            [Value::Tag(head), operand] => {
                if let Some(op) = self.operators.prefix_spelling(head) {
                    format!("{}{}", op, self.operand(operand))
                } else if let Some(op) = self.operators.postfix_spelling(head) {
                    format!("{}{}", self.operand(operand), op)
                } else {
                    self.list(elements)
                }
            }
            [Value::Tag(head), lhs, rhs] => {
                if head.as_str() == CONS {
                    format!(
                        "{}{} {}",
                        self.expression(lhs),
                        self.style.key_value,
                        self.expression(rhs)
                    )
                } else if let Some(op) = self.operators.infix_spelling(head) {
                    format!("{} {} {}", self.operand(lhs), op, self.operand(rhs))
                } else {
                    self.list(elements)
                }
            }
            _ => self.list(elements),
        }
    }

    /// Operands of operator syntax: registered applications are
    /// re-bracketed so precedence survives the round trip. Cons pairs
    /// stay bare (bracketing one would fold it into a map), and lists
    /// and maps bring their own brackets.
    fn operand(&self, v: &Value) -> String {
        if self.is_application(v) {
            format!(
                "{}{}{}",
                self.style.open,
                self.expression(v),
                self.style.close
            )
        } else {
            self.expression(v)
        }
    }

    fn is_application(&self, v: &Value) -> bool {
        let head = match v.head() {
            Some(head) => head,
            None => return false,
        };
        match v.arity() {
            2 => {
                self.operators.prefix_spelling(head).is_some()
                    || self.operators.postfix_spelling(head).is_some()
            }
            3 => head.as_str() != CONS && self.operators.infix_spelling(head).is_some(),
            _ => false,
        }
    }

    fn list(&self, elements: &[Value]) -> String {
        let body: Vec<String> = elements.iter().map(|e| self.expression(e)).collect();
        format!(
            "{}{}{}",
            self.style.open,
            body.join(&self.separator()),
            self.style.close
        )
    }

    fn map(&self, entries: &[(Tag, Value)]) -> String {
        let body: Vec<String> = entries.iter().map(|e| self.entry(e)).collect();
        format!(
            "{}{}{}",
            self.style.open2,
            body.join(&self.separator()),
            self.style.close2
        )
    }

    fn entry(&self, (key, value): &(Tag, Value)) -> String {
        format!(
            "{}{} {}",
            self.key(key),
            self.style.key_value,
            self.expression(value)
        )
    }

    /// Keys print bare when they read back as one identifier token,
    /// quoted otherwise. Quoted keys fold back into the same tag.
    fn key(&self, key: &Tag) -> String {
        let name = key.as_str();
        let mut chars = name.chars();
        let word = match chars.next() {
            Some(first) => {
                (first == '_' || first.is_alphabetic())
                    && chars.all(|c| c == '_' || c.is_alphanumeric())
            }
            None => false,
        };
        if word {
            name.to_string()
        } else {
            self.string(name)
        }
    }

    fn separator(&self) -> String {
        if self.style.separator.is_empty() {
            " ".to_string()
        } else {
            format!("{} ", self.style.separator)
        }
    }

    /// Canonical numeric formatting: floats always carry a decimal
    /// point or one of the reserved spellings, so they never read back
    /// as integers.
    fn float(&self, f: f64) -> String {
        if f.is_nan() {
            "NaN".to_string()
        } else if f == f64::INFINITY {
            "Inf".to_string()
        } else if f == f64::NEG_INFINITY {
            "-Inf".to_string()
        } else if f.fract() == 0.0 {
            format!("{:.1}", f)
        } else {
            format!("{}", f)
        }
    }

    fn string(&self, s: &str) -> String {
        let mut out = String::from("\"");
        for c in s.chars() {
            match c {
                '\n' => out.push_str("\\n"),
                '\r' => out.push_str("\\r"),
                '\t' => out.push_str("\\t"),
                '"' => out.push_str("\\\""),
                '\\' => out.push_str("\\\\"),
                _ => out.push(c),
            }
        }
        out.push('"');
        out
    }

    fn pretty_at(&self, v: &Value, depth: usize) -> String {
        match v {
            Value::Map(entries) if !entries.is_empty() => {
                let pad = self.style.indent.repeat(depth + 1);
                let body: Vec<String> = entries
                    .iter()
                    .map(|(key, value)| {
                        format!(
                            "{}{}{} {}",
                            pad,
                            self.key(key),
                            self.style.key_value,
                            self.pretty_at(value, depth + 1)
                        )
                    })
                    .collect();
                format!(
                    "{}\n{}\n{}{}",
                    self.style.open2,
                    body.join("\n"),
                    self.style.indent.repeat(depth),
                    self.style.close2
                )
            }
            Value::Tuple(elements) if elements.len() > 4 && v.head().is_none() => {
                let pad = self.style.indent.repeat(depth + 1);
                let body: Vec<String> = elements
                    .iter()
                    .map(|e| format!("{}{}", pad, self.pretty_at(e, depth + 1)))
                    .collect();
                format!(
                    "{}\n{}\n{}{}",
                    self.style.open,
                    body.join("\n"),
                    self.style.indent.repeat(depth),
                    self.style.close
                )
            }
            _ => self.expression(v),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn style() -> Style {
        Style {
            open: '(',
            close: ')',
            open2: '{',
            close2: '}',
            key_value: ':',
            separator: "",
            comment: "//",
            true_name: "true",
            false_name: "false",
            indent: "  ",
            signed_numbers: false,
        }
    }

    fn table() -> Operators {
        let mut ops = Operators::new();
        ops.add_bracket('(', ')')
            .add_bracket('{', '}')
            .add_infix("+", 9)
            .add_infix("*", 10)
            .add_prefix("-", 11)
            .add_postfix_named("!", "fact", 12);
        ops
    }

    fn print(v: &Value) -> String {
        let style = style();
        let table = table();
        Printer::new(&style, &table).print(v)
    }

    #[test]
    fn test_scalars() {
        assert_eq!(print(&Value::int(42)), "42");
        assert_eq!(print(&Value::boolean(true)), "true");
        assert_eq!(print(&Value::tag("x")), "x");
        assert_eq!(print(&Value::string("a\nb\t\"c\"")), r#""a\nb\t\"c\"""#);
    }

    #[test]
    fn test_floats_are_canonical() {
        assert_eq!(print(&Value::float(1.0)), "1.0");
        assert_eq!(print(&Value::float(0.125)), "0.125");
        assert_eq!(print(&Value::float(f64::NAN)), "NaN");
        assert_eq!(print(&Value::float(f64::INFINITY)), "Inf");
    }

    #[test]
    fn test_operator_applications() {
        let sum = Value::tuple(vec![Value::tag("+"), Value::int(1), Value::int(2)]);
        assert_eq!(print(&sum), "1 + 2");

        let product = Value::tuple(vec![Value::tag("*"), sum.clone(), Value::int(3)]);
        assert_eq!(print(&product), "(1 + 2) * 3");

        let negated = Value::tuple(vec![Value::tag("-"), product]);
        assert_eq!(print(&negated), "-((1 + 2) * 3)");

        let fact = Value::tuple(vec![Value::tag("fact"), Value::int(5)]);
        assert_eq!(print(&fact), "5!");
    }

    #[test]
    fn test_tuples() {
        assert_eq!(print(&Value::empty()), "()");
        assert_eq!(print(&Value::tuple(vec![Value::tag("f")])), "f()");
        assert_eq!(
            print(&Value::tuple(vec![
                Value::tag("f"),
                Value::int(1),
                Value::int(2),
                Value::int(3),
            ])),
            "(f 1 2 3)"
        );
    }

    #[test]
    fn test_map() {
        let m = Value::map(vec![
            (Tag::new("a"), Value::int(1)),
            (Tag::new("two words"), Value::int(2)),
        ]);
        assert_eq!(print(&m), "{a: 1 \"two words\": 2}");
    }

    #[test]
    fn test_cons_pair_prints_bare() {
        let pair = Value::tuple(vec![Value::tag(CONS), Value::tag("a"), Value::int(1)]);
        assert_eq!(print(&pair), "a: 1");
    }

    #[test]
    fn test_pretty_map() {
        let style = style();
        let table = table();
        let printer = Printer::new(&style, &table);
        let m = Value::map(vec![(
            Tag::new("outer"),
            Value::map(vec![(Tag::new("inner"), Value::int(1))]),
        )]);
        assert_eq!(printer.pretty(&m), "{\n  outer: {\n    inner: 1\n  }\n}");
    }
}
