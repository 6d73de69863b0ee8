use super::error::{Errors, Kind};
use super::operators::{OpDef, Operators, CONS};
use super::source::Location;
use super::value::{map_insert, Tag, Value};

/// One entry on the operator stack. Postfix operators reduce the moment
/// they arrive, so they never appear here.
#[derive(Debug, Clone)]
enum Entry {
    Prefix(OpDef),
    Infix(OpDef),
    Open {
        close: Tag,
        /// Value-stack height when the bracket opened; used to detect
        /// the empty-tuple literal and mis-nested reductions.
        mark: usize,
    },
}

/// The shunting-yard reducer. Consumes tokenizer events and produces
/// one completed value per top-level statement.
///
/// All state is per-statement and reset by [`Engine::end`]; a stream of
/// independent forms (a file, a REPL session) reuses one engine.
pub struct Engine<'a> {
    operators: &'a Operators,
    ops: Vec<Entry>,
    values: Vec<Value>,
    /// True when the next token should be a value or a prefix operator.
    expecting_operand: bool,
    /// Any token since the last reset; blank statements emit nothing.
    started: bool,
    /// A structural error was found; the rest of the statement is
    /// consumed without effect and nothing is emitted for it.
    poisoned: bool,
}

impl<'a> Engine<'a> {
    pub fn new(operators: &'a Operators) -> Self {
        Self {
            operators,
            ops: Vec::new(),
            values: Vec::new(),
            expecting_operand: true,
            started: false,
            poisoned: false,
        }
    }

    pub fn push_value(&mut self, v: Value, at: &Location, errors: &mut Errors) {
        if self.poisoned {
            return;
        }
        self.started = true;
        if !self.expecting_operand {
            // Two adjacent values: insert the flatten-marked
            // juxtaposition operator between them.
            let space = self.operators.juxtapose().clone();
            self.shift_infix(space, at, errors);
            if self.poisoned {
                return;
            }
        }
        self.values.push(v);
        self.expecting_operand = false;
    }

    pub fn open_bracket(&mut self, open: Tag, at: &Location, errors: &mut Errors) {
        if self.poisoned {
            return;
        }
        self.started = true;
        let close = match self.operators.close_for(open.as_str()) {
            Some(close) => Tag::new(close),
            None => {
                errors.report(
                    Kind::Structural,
                    format!("bracket `{}` is not registered", open),
                    at.clone(),
                );
                self.poison();
                return;
            }
        };
        if !self.expecting_operand {
            // `f(x)` and `a (b c)` both juxtapose.
            let space = self.operators.juxtapose().clone();
            self.shift_infix(space, at, errors);
            if self.poisoned {
                return;
            }
        }
        self.ops.push(Entry::Open {
            close,
            mark: self.values.len(),
        });
        self.expecting_operand = true;
    }

    pub fn close_bracket(&mut self, close: Tag, at: &Location, errors: &mut Errors) {
        if self.poisoned {
            return;
        }
        self.started = true;

        if self.expecting_operand {
            // Immediately-closed bracket is the empty-tuple literal.
            if let Some(Entry::Open { close: c, .. }) = self.ops.last() {
                if *c == close {
                    self.ops.pop();
                    self.values.push(Value::empty());
                    self.expecting_operand = false;
                    return;
                }
            }
            if self.open_for(&close).is_none() {
                errors.report(
                    Kind::Structural,
                    format!("unexpected `{}` with no open bracket", close),
                    at.clone(),
                );
            } else {
                errors.report(
                    Kind::Structural,
                    format!("expected a value before `{}`", close),
                    at.clone(),
                );
            }
            self.poison();
            return;
        }

        loop {
            match self.ops.pop() {
                None => {
                    errors.report(
                        Kind::Structural,
                        format!("unexpected `{}` with no open bracket", close),
                        at.clone(),
                    );
                    self.poison();
                    return;
                }
                Some(Entry::Open { close: c, mark }) => {
                    if c != close {
                        errors.report(
                            Kind::Structural,
                            format!("mismatched bracket: expected `{}`, found `{}`", c, close),
                            at.clone(),
                        );
                        self.poison();
                        return;
                    }
                    if self.values.len() != mark + 1 {
                        errors.report(
                            Kind::Structural,
                            format!("bracket closed by `{}` did not reduce to one value", close),
                            at.clone(),
                        );
                        self.poison();
                        return;
                    }
                    // A lone key-value pair in brackets is a one-entry map.
                    if let Some(top) = self.values.pop() {
                        let folded = self.fold_pair(top);
                        self.values.push(folded);
                    }
                    self.expecting_operand = false;
                    return;
                }
                Some(entry) => {
                    if !self.reduce(entry, at, errors) {
                        return;
                    }
                }
            }
        }
    }

    pub fn push_operator(&mut self, op: Tag, at: &Location, errors: &mut Errors) {
        if self.poisoned {
            return;
        }
        self.started = true;
        let spelling = op.as_str();

        if self.expecting_operand {
            if let Some(def) = self.operators.prefix(spelling) {
                // Prefix operators wait for their single operand; they
                // never reduce anything on arrival.
                self.ops.push(Entry::Prefix(def.clone()));
                return;
            }
            errors.report(
                Kind::Structural,
                format!("operator `{}` found where a value was expected", spelling),
                at.clone(),
            );
            self.poison();
            return;
        }

        if let Some(def) = self.operators.postfix(spelling) {
            // Postfix binds tighter than any following token and never
            // rests on the stack.
            match self.values.pop() {
                Some(operand) => {
                    self.values
                        .push(Value::Tuple(vec![Value::Tag(def.name.clone()), operand]));
                }
                None => {
                    let name = def.name.clone();
                    self.underflow(&name, at, errors);
                }
            }
            return;
        }

        if let Some(def) = self.operators.infix(spelling) {
            let def = def.clone();
            self.shift_infix(def, at, errors);
            return;
        }

        errors.report(
            Kind::Structural,
            format!("`{}` is not an operator in this grammar", spelling),
            at.clone(),
        );
        self.poison();
    }

    /// End of statement. Emits at most one completed value and resets
    /// every piece of per-statement state.
    pub fn end(&mut self, at: &Location, errors: &mut Errors) -> Option<Value> {
        if self.poisoned || !self.started {
            self.reset();
            return None;
        }
        if self.expecting_operand {
            errors.report(Kind::Structural, "unterminated expression", at.clone());
            self.reset();
            return None;
        }

        while let Some(entry) = self.ops.pop() {
            match entry {
                Entry::Open { close, .. } => {
                    // Implicitly closed; recoverable, the reductions so
                    // far stand.
                    errors.report(
                        Kind::Structural,
                        format!("missing `{}` before end of statement", close),
                        at.clone(),
                    );
                }
                entry => {
                    if !self.reduce(entry, at, errors) {
                        self.reset();
                        return None;
                    }
                }
            }
        }

        let out = if self.values.len() == 1 {
            self.values.pop().expect("single value")
        } else {
            Value::Tuple(std::mem::take(&mut self.values))
        };
        // Top-level cons pairs fold once more.
        let out = self.fold_pair(out);
        log::trace!("statement complete: {:?}", out);
        self.reset();
        Some(out)
    }

    fn reset(&mut self) {
        self.ops.clear();
        self.values.clear();
        self.expecting_operand = true;
        self.started = false;
        self.poisoned = false;
    }

    fn poison(&mut self) {
        self.poisoned = true;
    }

    fn open_for(&self, close: &Tag) -> Option<usize> {
        self.ops.iter().rposition(|entry| match entry {
            Entry::Open { close: c, .. } => c == close,
            _ => false,
        })
    }

    /// Reduces every stack entry that binds at least as tightly as the
    /// incoming infix operator, then pushes it. Open brackets stop the
    /// loop; prefix entries reduce only for strictly weaker incomers;
    /// a flatten operator never reduces its own kind (the adjacent
    /// entries merge in one reduction later).
    fn shift_infix(&mut self, incoming: OpDef, at: &Location, errors: &mut Errors) {
        loop {
            let reducible = match self.ops.last() {
                None | Some(Entry::Open { .. }) => false,
                Some(Entry::Prefix(def)) => def.precedence > incoming.precedence,
                Some(Entry::Infix(def)) => {
                    if incoming.flatten && def.name == incoming.name {
                        false
                    } else {
                        def.precedence >= incoming.precedence
                    }
                }
            };
            if !reducible {
                break;
            }
            let entry = self.ops.pop().expect("reducible entry");
            if !self.reduce(entry, at, errors) {
                return;
            }
        }
        self.ops.push(Entry::Infix(incoming));
        self.expecting_operand = true;
    }

    /// Pops one operator entry and builds its application on the value
    /// stack. Returns false when the statement became poisoned.
    fn reduce(&mut self, entry: Entry, at: &Location, errors: &mut Errors) -> bool {
        match entry {
            Entry::Open { .. } => unreachable!("brackets are reduced by their close"),
            Entry::Prefix(def) => {
                log::trace!("reduce prefix {}", def.name);
                match self.values.pop() {
                    Some(operand) => {
                        self.values
                            .push(Value::Tuple(vec![Value::Tag(def.name), operand]));
                        true
                    }
                    None => self.underflow(&def.name, at, errors),
                }
            }
            Entry::Infix(def) if def.flatten => {
                // Merge the contiguous run of same-kind entries into one
                // n-ary tuple instead of a chain of binary ones.
                let mut count = 2;
                loop {
                    let same = matches!(
                        self.ops.last(),
                        Some(Entry::Infix(below)) if below.flatten && below.name == def.name
                    );
                    if !same {
                        break;
                    }
                    self.ops.pop();
                    count += 1;
                }
                log::trace!("reduce {}-ary {:?}", count, def.name);
                if self.values.len() < count {
                    return self.underflow(&def.name, at, errors);
                }
                let elements = self.values.split_off(self.values.len() - count);
                let folded = self.fold_run(elements, at, errors);
                self.values.push(folded);
                true
            }
            Entry::Infix(def) => {
                log::trace!("reduce infix {}", def.name);
                if self.values.len() < 2 {
                    return self.underflow(&def.name, at, errors);
                }
                let rhs = self.values.pop().expect("rhs");
                let lhs = self.values.pop().expect("lhs");
                self.values
                    .push(Value::Tuple(vec![Value::Tag(def.name), lhs, rhs]));
                true
            }
        }
    }

    fn underflow(&mut self, name: &Tag, at: &Location, errors: &mut Errors) -> bool {
        errors.report(
            Kind::Structural,
            format!("operator `{}` is missing an operand", name),
            at.clone(),
        );
        self.poison();
        false
    }

    /// A run of values built by a flatten reduction: when the first
    /// element is a key-value pair the whole run must be, and folds
    /// into a map with last-write-wins on duplicate keys. A mixed run
    /// is a fold error and stays a tuple.
    fn fold_run(&self, elements: Vec<Value>, at: &Location, errors: &mut Errors) -> Value {
        if !matches!(elements.first(), Some(v) if is_cons_pair(v)) {
            return Value::Tuple(elements);
        }

        let mut entries: Vec<(Tag, Value)> = Vec::new();
        for element in &elements {
            match pair_entry(element) {
                Some((key, value)) => map_insert(&mut entries, key, value),
                None => {
                    errors.report(
                        Kind::Fold,
                        "expected a key-value pair in map literal",
                        at.clone(),
                    );
                    return Value::Tuple(elements);
                }
            }
        }
        Value::Map(entries)
    }

    /// A lone key-value pair folds into a one-entry map.
    fn fold_pair(&self, v: Value) -> Value {
        match pair_entry(&v) {
            Some((key, value)) => Value::Map(vec![(key, value)]),
            None => v,
        }
    }
}

fn is_cons_pair(v: &Value) -> bool {
    match v {
        Value::Tuple(elements) => {
            elements.len() == 3 && elements[0] == Value::Tag(Tag::new(CONS))
        }
        _ => false,
    }
}

/// The (key, value) of a cons pair; keys may be tags or strings.
fn pair_entry(v: &Value) -> Option<(Tag, Value)> {
    match v {
        Value::Tuple(elements) if is_cons_pair(v) => {
            let key = match &elements[1] {
                Value::Tag(tag) => tag.clone(),
                Value::String(s) => Tag::new(s.clone()),
                _ => return None,
            };
            Some((key, elements[2].clone()))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::source::Location;

    fn table() -> Operators {
        let mut ops = Operators::new();
        ops.add_bracket('(', ')')
            .add_bracket('{', '}')
            .add_sequence(";")
            .add_infix("+", 9)
            .add_infix("-", 9)
            .add_infix("*", 10)
            .add_infix("**", 11)
            .add_prefix("-", 11)
            .add_postfix_named("!", "fact", 12);
        ops
    }

    fn at() -> Location {
        Location::synthetic(0..0)
    }

    struct Driver {
        errors: Errors,
    }

    impl Driver {
        fn new() -> Self {
            Self {
                errors: Errors::new(),
            }
        }

        fn value(&mut self, engine: &mut Engine, v: Value) {
            engine.push_value(v, &at(), &mut self.errors);
        }

        fn op(&mut self, engine: &mut Engine, op: &str) {
            engine.push_operator(Tag::new(op), &at(), &mut self.errors);
        }

        fn end(&mut self, engine: &mut Engine) -> Option<Value> {
            engine.end(&at(), &mut self.errors)
        }
    }

    #[test]
    fn test_infix_precedence() {
        let table = table();
        let mut engine = Engine::new(&table);
        let mut driver = Driver::new();

        // 1 + 2 * 3
        driver.value(&mut engine, Value::int(1));
        driver.op(&mut engine, "+");
        driver.value(&mut engine, Value::int(2));
        driver.op(&mut engine, "*");
        driver.value(&mut engine, Value::int(3));
        let out = driver.end(&mut engine).unwrap();

        assert_eq!(
            out,
            Value::tuple(vec![
                Value::tag("+"),
                Value::int(1),
                Value::tuple(vec![Value::tag("*"), Value::int(2), Value::int(3)]),
            ])
        );
        assert_eq!(driver.errors.count(), 0);
    }

    #[test]
    fn test_prefix_waits_for_equal_precedence() {
        let table = table();
        let mut engine = Engine::new(&table);
        let mut driver = Driver::new();

        // -1 ** 7 parses as -(1 ** 7)
        driver.op(&mut engine, "-");
        driver.value(&mut engine, Value::int(1));
        driver.op(&mut engine, "**");
        driver.value(&mut engine, Value::int(7));
        let out = driver.end(&mut engine).unwrap();

        assert_eq!(
            out,
            Value::tuple(vec![
                Value::tag("-"),
                Value::tuple(vec![Value::tag("**"), Value::int(1), Value::int(7)]),
            ])
        );
    }

    #[test]
    fn test_juxtaposition_flattens() {
        let table = table();
        let mut engine = Engine::new(&table);
        let mut driver = Driver::new();

        for i in 1..=4 {
            driver.value(&mut engine, Value::int(i));
        }
        let out = driver.end(&mut engine).unwrap();

        assert_eq!(
            out,
            Value::tuple(vec![
                Value::int(1),
                Value::int(2),
                Value::int(3),
                Value::int(4),
            ])
        );
    }

    #[test]
    fn test_postfix_reduces_immediately() {
        let table = table();
        let mut engine = Engine::new(&table);
        let mut driver = Driver::new();

        driver.value(&mut engine, Value::int(5));
        driver.op(&mut engine, "!");
        driver.op(&mut engine, "*");
        driver.value(&mut engine, Value::int(2));
        let out = driver.end(&mut engine).unwrap();

        assert_eq!(
            out,
            Value::tuple(vec![
                Value::tag("*"),
                Value::tuple(vec![Value::tag("fact"), Value::int(5)]),
                Value::int(2),
            ])
        );
    }

    #[test]
    fn test_empty_bracket_is_empty_tuple() {
        let table = table();
        let mut engine = Engine::new(&table);
        let mut driver = Driver::new();

        engine.open_bracket(Tag::new("("), &at(), &mut driver.errors);
        engine.close_bracket(Tag::new(")"), &at(), &mut driver.errors);
        let out = driver.end(&mut engine).unwrap();

        assert_eq!(out, Value::empty());
        assert_eq!(driver.errors.count(), 0);
    }

    #[test]
    fn test_unexpected_close_poisons_statement() {
        let table = table();
        let mut engine = Engine::new(&table);
        let mut driver = Driver::new();

        engine.close_bracket(Tag::new(")"), &at(), &mut driver.errors);
        driver.value(&mut engine, Value::int(1));
        assert_eq!(driver.end(&mut engine), None);
        assert_eq!(driver.errors.count(), 1);

        // The next statement parses normally.
        driver.value(&mut engine, Value::int(2));
        assert_eq!(driver.end(&mut engine), Some(Value::int(2)));
    }

    #[test]
    fn test_missing_close_is_recoverable() {
        let table = table();
        let mut engine = Engine::new(&table);
        let mut driver = Driver::new();

        engine.open_bracket(Tag::new("("), &at(), &mut driver.errors);
        driver.value(&mut engine, Value::int(1));
        let out = driver.end(&mut engine);

        assert_eq!(out, Some(Value::int(1)));
        assert_eq!(driver.errors.count(), 1);
    }

    #[test]
    fn test_operator_without_operand() {
        let table = table();
        let mut engine = Engine::new(&table);
        let mut driver = Driver::new();

        driver.op(&mut engine, "*");
        assert_eq!(driver.end(&mut engine), None);
        assert!(driver.errors.count() > 0);
    }

    #[test]
    fn test_dangling_prefix() {
        let table = table();
        let mut engine = Engine::new(&table);
        let mut driver = Driver::new();

        driver.op(&mut engine, "-");
        assert_eq!(driver.end(&mut engine), None);
        assert!(driver.errors.count() > 0);
    }

    #[test]
    fn test_cons_run_folds_to_map() {
        let table = table();
        let mut engine = Engine::new(&table);
        let mut driver = Driver::new();

        // a:1 b:2
        driver.value(&mut engine, Value::tag("a"));
        driver.op(&mut engine, CONS);
        driver.value(&mut engine, Value::int(1));
        driver.value(&mut engine, Value::tag("b"));
        driver.op(&mut engine, CONS);
        driver.value(&mut engine, Value::int(2));
        let out = driver.end(&mut engine).unwrap();

        assert_eq!(
            out,
            Value::Map(vec![
                (Tag::new("a"), Value::int(1)),
                (Tag::new("b"), Value::int(2)),
            ])
        );
    }

    #[test]
    fn test_top_level_pair_folds() {
        let table = table();
        let mut engine = Engine::new(&table);
        let mut driver = Driver::new();

        driver.value(&mut engine, Value::tag("a"));
        driver.op(&mut engine, CONS);
        driver.value(&mut engine, Value::int(1));
        let out = driver.end(&mut engine).unwrap();

        assert_eq!(out, Value::Map(vec![(Tag::new("a"), Value::int(1))]));
    }

    #[test]
    fn test_mixed_run_is_a_fold_error() {
        let table = table();
        let mut engine = Engine::new(&table);
        let mut driver = Driver::new();

        driver.value(&mut engine, Value::tag("a"));
        driver.op(&mut engine, CONS);
        driver.value(&mut engine, Value::int(1));
        driver.value(&mut engine, Value::int(5));
        let out = driver.end(&mut engine).unwrap();

        assert!(out.is_tuple());
        assert_eq!(out.arity(), 2);
        assert_eq!(driver.errors.count(), 1);
    }

    #[test]
    fn test_blank_statement_emits_nothing() {
        let table = table();
        let mut engine = Engine::new(&table);
        let mut driver = Driver::new();

        assert_eq!(driver.end(&mut engine), None);
        assert_eq!(driver.errors.count(), 0);
    }

    #[test]
    fn test_sequence_flattens() {
        let table = table();
        let mut engine = Engine::new(&table);
        let mut driver = Driver::new();

        driver.value(&mut engine, Value::int(1));
        driver.op(&mut engine, ";");
        driver.value(&mut engine, Value::int(2));
        driver.op(&mut engine, ";");
        driver.value(&mut engine, Value::int(3));
        let out = driver.end(&mut engine).unwrap();

        assert_eq!(
            out,
            Value::tuple(vec![Value::int(1), Value::int(2), Value::int(3)])
        );
    }
}
