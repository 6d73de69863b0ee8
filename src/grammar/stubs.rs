//! Key/value configuration flavours. These ride entirely on the generic
//! machinery: a comment marker, a pair character, and nothing else.

use super::Grammar;
use crate::syntax::operators::Operators;
use crate::syntax::style::Style;

pub fn yaml() -> Grammar {
    Grammar::new("yaml", ".yaml", keyed(':', "#"), plain())
}

pub fn ini() -> Grammar {
    Grammar::new("ini", ".ini", keyed('=', ";"), plain())
}

pub fn properties() -> Grammar {
    Grammar::new("properties", ".properties", keyed('=', "#"), plain())
}

fn keyed(key_value: char, comment: &'static str) -> Style {
    Style {
        open: '[',
        close: ']',
        open2: '{',
        close2: '}',
        key_value,
        separator: "",
        comment,
        true_name: "true",
        false_name: "false",
        indent: "  ",
        signed_numbers: true,
    }
}

fn plain() -> Operators {
    let mut ops = Operators::new();
    ops.add_bracket('[', ']').add_bracket('{', '}');
    ops
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::value::{Tag, Value};

    #[test]
    fn test_yaml_lines_are_pairs() {
        let values = yaml().parse_str("name: demo\nsize: 3 # trailing\n").unwrap();
        assert_eq!(
            values,
            vec![
                Value::map(vec![(Tag::new("name"), Value::tag("demo"))]),
                Value::map(vec![(Tag::new("size"), Value::int(3))]),
            ]
        );
    }

    #[test]
    fn test_ini_uses_equals_and_semicolon_comments() {
        let values = ini().parse_str("port = 8080 ; local only").unwrap();
        assert_eq!(
            values,
            vec![Value::map(vec![(Tag::new("port"), Value::int(8080))])]
        );
    }

    #[test]
    fn test_properties() {
        let values = properties().parse_str("log_level = -2 # debug and up").unwrap();
        assert_eq!(
            values,
            vec![Value::map(vec![(Tag::new("log_level"), Value::int(-2))])]
        );
    }
}
