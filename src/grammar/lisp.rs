use super::Grammar;
use crate::syntax::operators::Operators;
use crate::syntax::style::Style;

/// Parenthesised prefix notation with `;` comments. Application is plain
/// adjacency, so almost everything is a headless tuple; the only infix
/// form is the key/value pair.
pub fn grammar() -> Grammar {
    let style = Style {
        open: '(',
        close: ')',
        open2: '{',
        close2: '}',
        key_value: ':',
        separator: "",
        comment: ";",
        true_name: "true",
        false_name: "false",
        indent: "  ",
        signed_numbers: false,
    };

    let mut ops = Operators::new();
    ops.add_bracket('(', ')').add_bracket('{', '}');

    Grammar::new("lisp", ".l", style, ops)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::value::{Tag, Value};

    fn parse_one(input: &str) -> Value {
        let mut values = grammar().parse_str(input).unwrap();
        assert_eq!(values.len(), 1, "expected one value from {:?}", input);
        values.pop().unwrap()
    }

    #[test]
    fn test_application_is_a_tuple() {
        assert_eq!(
            parse_one("(cons 1 2)"),
            Value::tuple(vec![Value::tag("cons"), Value::int(1), Value::int(2)])
        );
    }

    #[test]
    fn test_nested_forms() {
        assert_eq!(
            parse_one("(+ 1 (* 2 3))"),
            Value::tuple(vec![
                Value::tag("+"),
                Value::int(1),
                Value::tuple(vec![Value::tag("*"), Value::int(2), Value::int(3)]),
            ])
        );
    }

    #[test]
    fn test_operator_characters_are_plain_words() {
        // No infix arithmetic here: `-` and `*` are just names.
        assert_eq!(
            parse_one("(- x 1)"),
            Value::tuple(vec![Value::tag("-"), Value::tag("x"), Value::int(1)])
        );
    }

    #[test]
    fn test_comments_and_booleans() {
        let values = grammar()
            .parse_str("true ; ignored to end of line\nfalse")
            .unwrap();
        assert_eq!(values, vec![Value::boolean(true), Value::boolean(false)]);
    }

    #[test]
    fn test_braced_pairs_fold() {
        assert_eq!(
            parse_one("{name: \"ok\" size: 3}"),
            Value::map(vec![
                (Tag::new("name"), Value::string("ok")),
                (Tag::new("size"), Value::int(3)),
            ])
        );
    }

    #[test]
    fn test_print_round_trip() {
        let g = grammar();
        for input in ["(cons 1 2)", "(a (b c) d)", "{k: (1 2)}", "true"] {
            let v = g.parse_str(input).unwrap();
            assert_eq!(v.len(), 1);
            assert_eq!(g.print(&v[0]), input);
        }
    }
}
