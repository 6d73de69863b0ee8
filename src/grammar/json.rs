use super::Grammar;
use crate::syntax::operators::Operators;
use crate::syntax::style::Style;

/// JSON-shaped notation: `[]` arrays, `{}` objects, signed numbers.
/// Commas are always token noise, so `[0, 1]` and `[0 1]` are the same
/// value. No fidelity with the full JSON specification is attempted.
pub fn grammar() -> Grammar {
    let style = Style {
        open: '[',
        close: ']',
        open2: '{',
        close2: '}',
        key_value: ':',
        separator: ",",
        comment: "",
        true_name: "true",
        false_name: "false",
        indent: "  ",
        signed_numbers: true,
    };

    let mut ops = Operators::new();
    ops.add_bracket('[', ']').add_bracket('{', '}');

    Grammar::new("json", ".json", style, ops)
}
