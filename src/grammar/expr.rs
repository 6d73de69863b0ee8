use super::Grammar;
use crate::syntax::operators::Operators;
use crate::syntax::style::Style;

/// The C-like infix expression language. Signed-number recognition is
/// off so `-` is always an operator token and fixity comes from parser
/// state alone.
pub fn grammar() -> Grammar {
    let style = Style {
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
    };

    let mut ops = Operators::new();
    ops.add_bracket('(', ')')
        .add_bracket('{', '}')
        .add_sequence(";")
        .add_infix("=", 3)
        .add_infix("||", 4)
        .add_infix("&&", 5)
        .add_infix("==", 6)
        .add_infix("!=", 6)
        .add_infix("<", 7)
        .add_infix(">", 7)
        .add_infix("<=", 7)
        .add_infix(">=", 7)
        .add_infix("..", 8)
        .add_infix("+", 9)
        .add_infix("-", 9)
        .add_infix("++", 9)
        .add_infix("*", 10)
        .add_infix("/", 10)
        .add_infix("%", 10)
        .add_infix("**", 11)
        .add_prefix("-", 11)
        .add_prefix("+", 11)
        .add_prefix("!", 11)
        .add_postfix_named("!", "fact", 12);

    Grammar::new("expr", ".expr", style, ops)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::value::{Tag, Value};

    fn parse_one(input: &str) -> Value {
        let mut values = grammar().parse_str(input).unwrap();
        assert_eq!(values.len(), 1, "expected one statement from {:?}", input);
        values.pop().unwrap()
    }

    fn binary(op: &str, lhs: Value, rhs: Value) -> Value {
        Value::tuple(vec![Value::tag(op), lhs, rhs])
    }

    #[test]
    fn test_precedence_shapes() {
        assert_eq!(
            parse_one("1+2*3"),
            binary(
                "+",
                Value::int(1),
                binary("*", Value::int(2), Value::int(3))
            )
        );
        assert_eq!(
            parse_one("(1+2)*3"),
            binary(
                "*",
                binary("+", Value::int(1), Value::int(2)),
                Value::int(3)
            )
        );
    }

    #[test]
    fn test_prefix_binds_below_power() {
        // -1**7 is -(1**7), not (-1)**7
        assert_eq!(
            parse_one("-1**7"),
            Value::tuple(vec![
                Value::tag("-"),
                binary("**", Value::int(1), Value::int(7)),
            ])
        );
    }

    #[test]
    fn test_juxtaposition_is_flat() {
        assert_eq!(
            parse_one("(1 2 3 4)"),
            Value::tuple(vec![
                Value::int(1),
                Value::int(2),
                Value::int(3),
                Value::int(4),
            ])
        );
    }

    #[test]
    fn test_call_is_juxtaposition() {
        assert_eq!(
            parse_one("cos(PI)"),
            Value::tuple(vec![Value::tag("cos"), Value::tag("PI")])
        );
        assert_eq!(
            parse_one("a (b c)"),
            Value::tuple(vec![
                Value::tag("a"),
                Value::tuple(vec![Value::tag("b"), Value::tag("c")]),
            ])
        );
    }

    #[test]
    fn test_malformed_inputs_are_rejected() {
        for input in ["-", "*", ")(", ")", "(", "(()", "())"] {
            let result = grammar().parse_str(input);
            assert!(result.is_err(), "expected failure for {:?}", input);
        }
    }

    #[test]
    fn test_cons_folding() {
        let m = parse_one("(a:1 b:2)");
        assert_eq!(
            m,
            Value::map(vec![
                (Tag::new("a"), Value::int(1)),
                (Tag::new("b"), Value::int(2)),
            ])
        );

        let last_write_wins = parse_one("(a:1 b:2 a:3 b:33)");
        assert_eq!(last_write_wins.arity(), 2);
        assert_eq!(
            last_write_wins,
            Value::map(vec![
                (Tag::new("a"), Value::int(3)),
                (Tag::new("b"), Value::int(33)),
            ])
        );
    }

    #[test]
    fn test_braced_pair_is_a_map() {
        assert_eq!(
            parse_one("{a: 1 + 2}"),
            Value::map(vec![(
                Tag::new("a"),
                binary("+", Value::int(1), Value::int(2)),
            )])
        );
    }

    #[test]
    fn test_statement_sequence() {
        assert_eq!(
            parse_one("1; 2; 3"),
            Value::tuple(vec![Value::int(1), Value::int(2), Value::int(3)])
        );
    }

    #[test]
    fn test_prefix_stacking() {
        assert_eq!(
            parse_one("--1."),
            Value::tuple(vec![
                Value::tag("-"),
                Value::tuple(vec![Value::tag("-"), Value::float(1.0)]),
            ])
        );
    }

    #[test]
    fn test_round_trip_examples() {
        let g = grammar();
        for input in [
            "1 + 2 * 3",
            "(1 + 2) * 3",
            "-1**7*2",
            "cos(PI)",
            "(1 2 3 4)",
            "(a:1 b:2)",
            "{x: 1 y: (2 3)}",
            "5! + 1",
            "\"a\\nb\" ++ \"c\"",
            "1..5",
            "x = 1; y = 2",
        ] {
            let parsed = g.parse_str(input).unwrap();
            for v in &parsed {
                let printed = g.print(v);
                let reparsed = g.parse_str(&printed).unwrap();
                assert_eq!(reparsed, vec![v.clone()], "round trip of {:?} via {:?}", input, printed);
            }
        }
    }
}
