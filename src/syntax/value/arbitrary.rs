use super::{Tag, Value};
use quickcheck::Arbitrary;

#[derive(Clone, Debug)]
struct KeyString(String);

// Generation is limited to shapes every grammar can re-read from its own
// printed form: no one-element tuples (brackets around a lone value are
// grouping, not construction) and no duplicate map keys.
impl Arbitrary for Value {
    fn arbitrary(gen: &mut quickcheck::Gen) -> Self {
        arbitrary_at(gen, 0)
    }
}

fn arbitrary_at(gen: &mut quickcheck::Gen, depth: usize) -> Value {
    match gen.choose(&[1, 2, 3, 4, 5, 6, 7, 8]) {
        Some(1) => Value::boolean(bool::arbitrary(gen)),
        Some(2) => Value::int(i64::arbitrary(gen)),
        Some(3) => arbitrary_float(gen),
        Some(4) => arbitrary_string(gen),
        Some(5) => Value::tag(KeyString::arbitrary(gen).0),
        Some(6) => Value::empty(),
        Some(7) if depth < 2 => {
            let elements = (0..2 + depth % 2)
                .map(|_| arbitrary_at(gen, depth + 1))
                .collect::<Vec<_>>();
            Value::tuple(elements)
        }
        Some(8) if depth < 2 => arbitrary_map(gen, depth),
        _ => Value::int(i64::arbitrary(gen)),
    }
}

fn arbitrary_float(gen: &mut quickcheck::Gen) -> Value {
    let pool = [0.0, 1.5, -0.25, 42.0, 1e9, f64::NAN];

    match gen.choose(&pool) {
        Some(f) => Value::float(*f),
        None => Value::float(0.0),
    }
}

fn arbitrary_string(gen: &mut quickcheck::Gen) -> Value {
    let problems = ["", "one two", "line\nbreak", "tab\there", "quo\"te", "back\\slash"];

    match gen.choose(&problems) {
        Some(s) => Value::string(*s),
        None => Value::string("x"),
    }
}

fn arbitrary_map(gen: &mut quickcheck::Gen, depth: usize) -> Value {
    let keys = ["alpha", "beta", "gamma", "needs quoting", "delta_9"];
    let count = gen.choose(&[1usize, 2, 3]).copied().unwrap_or(1);

    let entries: Vec<(Tag, Value)> = keys
        .iter()
        .take(count)
        .map(|k| (Tag::new(*k), arbitrary_at(gen, depth + 1)))
        .collect();
    Value::map(entries)
}

impl Arbitrary for KeyString {
    fn arbitrary(gen: &mut quickcheck::Gen) -> Self {
        let names = ["foo", "bar_baz", "x1", "_hidden", "Word"];

        match gen.choose(&names) {
            Some(v) => KeyString((*v).to_string()),
            None => KeyString("foo".to_string()),
        }
    }
}
