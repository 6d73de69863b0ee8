use super::Grammar;
use crate::syntax::operators::Operators;
use crate::syntax::style::Style;

/// A command-line flavour: `#` comments, `=` for key/value pairs, and
/// the usual pipeline connectives. Bare words juxtapose into a command
/// tuple; `;` sequences commands on one line.
pub fn grammar() -> Grammar {
    let style = Style {
        open: '(',
        close: ')',
        open2: '{',
        close2: '}',
        key_value: '=',
        separator: "",
        comment: "#",
        true_name: "true",
        false_name: "false",
        indent: "  ",
        signed_numbers: false,
    };

    let mut ops = Operators::new();
    ops.add_bracket('(', ')')
        .add_bracket('{', '}')
        .add_sequence(";")
        .add_infix("&&", 4)
        .add_infix("||", 4)
        .add_infix("|", 5);

    Grammar::new("shell", ".wsh", style, ops)
}
