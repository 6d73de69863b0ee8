//! A small evaluator over parsed values. Applications dispatch on the
//! head tag and argument count; everything not an application evaluates
//! to itself, element-wise for tuples and maps.

use crate::syntax::value::Value;
use rustc_hash::FxHashMap;
use std::convert::TryFrom;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum Error {
    #[error("unknown operation `{name}` with {arity} argument(s)")]
    Unknown { name: String, arity: usize },
    #[error("unbound variable `{0}`")]
    Unbound(String),
    #[error("type error: {0}")]
    Type(String),
    #[error("division by zero")]
    DivisionByZero,
    #[error("arithmetic overflow")]
    Overflow,
}

type Builtin = fn(&[Value]) -> Result<Value, Error>;

pub struct Interpreter {
    builtins: FxHashMap<(String, usize), Builtin>,
    globals: FxHashMap<String, Value>,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter {
    pub fn new() -> Self {
        let mut builtins: FxHashMap<(String, usize), Builtin> = FxHashMap::default();
        let register = |table: &mut FxHashMap<(String, usize), Builtin>,
                        name: &str,
                        arity: usize,
                        f: Builtin| {
            table.insert((name.to_string(), arity), f);
        };

        register(&mut builtins, "+", 2, add);
        register(&mut builtins, "-", 2, sub);
        register(&mut builtins, "*", 2, mul);
        register(&mut builtins, "/", 2, div);
        register(&mut builtins, "%", 2, rem);
        register(&mut builtins, "**", 2, pow);
        register(&mut builtins, "-", 1, neg);
        register(&mut builtins, "+", 1, pos);
        register(&mut builtins, "!", 1, not);
        register(&mut builtins, "fact", 1, fact);
        register(&mut builtins, "==", 2, eq);
        register(&mut builtins, "!=", 2, ne);
        register(&mut builtins, "<", 2, lt);
        register(&mut builtins, "<=", 2, le);
        register(&mut builtins, ">", 2, gt);
        register(&mut builtins, ">=", 2, ge);
        register(&mut builtins, "&&", 2, and);
        register(&mut builtins, "||", 2, or);
        register(&mut builtins, "++", 2, concat);
        register(&mut builtins, "..", 2, range);
        register(&mut builtins, "cos", 1, cos);
        register(&mut builtins, "sin", 1, sin);
        register(&mut builtins, "sqrt", 1, sqrt);
        register(&mut builtins, "ln", 1, ln);
        register(&mut builtins, "abs", 1, abs);

        let mut globals = FxHashMap::default();
        globals.insert("PI".to_string(), Value::float(std::f64::consts::PI));
        globals.insert("E".to_string(), Value::float(std::f64::consts::E));
        // Grammars whose style spells booleans differently still reach
        // these through the default names.
        globals.insert("true".to_string(), Value::boolean(true));
        globals.insert("false".to_string(), Value::boolean(false));

        Self { builtins, globals }
    }

    pub fn eval(&mut self, value: &Value) -> Result<Value, Error> {
        match value {
            Value::Int(_) | Value::Float(_) | Value::String(_) | Value::Bool(_) => {
                Ok(value.clone())
            }
            Value::Tag(tag) => self
                .globals
                .get(tag.as_str())
                .cloned()
                .ok_or_else(|| Error::Unbound(tag.as_str().to_string())),
            Value::Tuple(elements) => self.eval_tuple(elements),
            Value::Map(entries) => {
                let evaluated = entries
                    .iter()
                    .map(|(k, v)| Ok((k.clone(), self.eval(v)?)))
                    .collect::<Result<Vec<_>, Error>>()?;
                Ok(Value::Map(evaluated))
            }
        }
    }

    fn eval_tuple(&mut self, elements: &[Value]) -> Result<Value, Error> {
        match elements {
            // Assignment is the one special form; its left side is a
            // name, not a value to evaluate.
            [Value::Tag(head), Value::Tag(name), expr] if head.as_str() == "=" => {
                let v = self.eval(expr)?;
                self.globals.insert(name.as_str().to_string(), v.clone());
                Ok(v)
            }
            [Value::Tag(head), args @ ..] if !args.is_empty() => {
                let key = (head.as_str().to_string(), args.len());
                match self.builtins.get(&key) {
                    Some(f) => {
                        let f = *f;
                        let args = args
                            .iter()
                            .map(|a| self.eval(a))
                            .collect::<Result<Vec<_>, Error>>()?;
                        f(&args)
                    }
                    None => Err(Error::Unknown {
                        name: key.0,
                        arity: key.1,
                    }),
                }
            }
            _ => {
                let evaluated = elements
                    .iter()
                    .map(|e| self.eval(e))
                    .collect::<Result<Vec<_>, Error>>()?;
                Ok(Value::Tuple(evaluated))
            }
        }
    }
}

fn number(v: &Value) -> Result<f64, Error> {
    match v {
        Value::Int(i) => Ok(*i as f64),
        Value::Float(f) => Ok(*f),
        other => Err(Error::Type(format!("expected a number, got {:?}", other))),
    }
}

fn truth(v: &Value) -> Result<bool, Error> {
    match v {
        Value::Bool(b) => Ok(*b),
        other => Err(Error::Type(format!("expected a boolean, got {:?}", other))),
    }
}

/// Integer arguments stay integers when the operation is closed over
/// them; anything else goes through f64.
fn arith(
    args: &[Value],
    ints: fn(i64, i64) -> Option<i64>,
    floats: fn(f64, f64) -> f64,
) -> Result<Value, Error> {
    match args {
        [Value::Int(a), Value::Int(b)] => ints(*a, *b).map(Value::Int).ok_or(Error::Overflow),
        [a, b] => Ok(Value::Float(floats(number(a)?, number(b)?))),
        _ => unreachable!("registered arity"),
    }
}

fn add(args: &[Value]) -> Result<Value, Error> {
    arith(args, i64::checked_add, |a, b| a + b)
}

fn sub(args: &[Value]) -> Result<Value, Error> {
    arith(args, i64::checked_sub, |a, b| a - b)
}

fn mul(args: &[Value]) -> Result<Value, Error> {
    arith(args, i64::checked_mul, |a, b| a * b)
}

/// Exact integer division stays an integer; `8 / 4` is `2`, `1 / 2`
/// is `0.5`.
fn div(args: &[Value]) -> Result<Value, Error> {
    match args {
        [Value::Int(_), Value::Int(0)] => Err(Error::DivisionByZero),
        [Value::Int(a), Value::Int(b)] if a % b == 0 => Ok(Value::Int(a / b)),
        [a, b] => Ok(Value::Float(number(a)? / number(b)?)),
        _ => unreachable!("registered arity"),
    }
}

fn rem(args: &[Value]) -> Result<Value, Error> {
    match args {
        [Value::Int(_), Value::Int(0)] => Err(Error::DivisionByZero),
        [Value::Int(a), Value::Int(b)] => Ok(Value::Int(a % b)),
        [a, b] => Ok(Value::Float(number(a)? % number(b)?)),
        _ => unreachable!("registered arity"),
    }
}

fn pow(args: &[Value]) -> Result<Value, Error> {
    match args {
        [Value::Int(a), Value::Int(b)] if *b >= 0 => {
            let exp = u32::try_from(*b).map_err(|_| Error::Overflow)?;
            a.checked_pow(exp).map(Value::Int).ok_or(Error::Overflow)
        }
        [a, b] => Ok(Value::Float(number(a)?.powf(number(b)?))),
        _ => unreachable!("registered arity"),
    }
}

fn neg(args: &[Value]) -> Result<Value, Error> {
    match &args[0] {
        Value::Int(i) => i.checked_neg().map(Value::Int).ok_or(Error::Overflow),
        Value::Float(f) => Ok(Value::Float(-f)),
        other => Err(Error::Type(format!("expected a number, got {:?}", other))),
    }
}

fn pos(args: &[Value]) -> Result<Value, Error> {
    number(&args[0])?;
    Ok(args[0].clone())
}

fn not(args: &[Value]) -> Result<Value, Error> {
    Ok(Value::Bool(!truth(&args[0])?))
}

fn fact(args: &[Value]) -> Result<Value, Error> {
    match &args[0] {
        Value::Int(n) if *n >= 0 => {
            let mut acc: i64 = 1;
            for k in 2..=*n {
                acc = acc.checked_mul(k).ok_or(Error::Overflow)?;
            }
            Ok(Value::Int(acc))
        }
        other => Err(Error::Type(format!(
            "factorial needs a non-negative integer, got {:?}",
            other
        ))),
    }
}

fn eq(args: &[Value]) -> Result<Value, Error> {
    Ok(Value::Bool(args[0] == args[1]))
}

fn ne(args: &[Value]) -> Result<Value, Error> {
    Ok(Value::Bool(args[0] != args[1]))
}

fn compare(args: &[Value], keep: fn(std::cmp::Ordering) -> bool) -> Result<Value, Error> {
    let (a, b) = (number(&args[0])?, number(&args[1])?);
    let ordering = a
        .partial_cmp(&b)
        .ok_or_else(|| Error::Type("NaN is unordered".to_string()))?;
    Ok(Value::Bool(keep(ordering)))
}

fn lt(args: &[Value]) -> Result<Value, Error> {
    compare(args, std::cmp::Ordering::is_lt)
}

fn le(args: &[Value]) -> Result<Value, Error> {
    compare(args, std::cmp::Ordering::is_le)
}

fn gt(args: &[Value]) -> Result<Value, Error> {
    compare(args, std::cmp::Ordering::is_gt)
}

fn ge(args: &[Value]) -> Result<Value, Error> {
    compare(args, std::cmp::Ordering::is_ge)
}

fn and(args: &[Value]) -> Result<Value, Error> {
    Ok(Value::Bool(truth(&args[0])? && truth(&args[1])?))
}

fn or(args: &[Value]) -> Result<Value, Error> {
    Ok(Value::Bool(truth(&args[0])? || truth(&args[1])?))
}

fn concat(args: &[Value]) -> Result<Value, Error> {
    match args {
        [Value::String(a), Value::String(b)] => Ok(Value::string(format!("{}{}", a, b))),
        [Value::Tuple(a), Value::Tuple(b)] => {
            let mut joined = a.clone();
            joined.extend(b.iter().cloned());
            Ok(Value::Tuple(joined))
        }
        [a, b] => Err(Error::Type(format!(
            "cannot concatenate {:?} with {:?}",
            a, b
        ))),
        _ => unreachable!("registered arity"),
    }
}

fn range(args: &[Value]) -> Result<Value, Error> {
    number(&args[0])?;
    number(&args[1])?;
    Ok(Value::tuple(vec![args[0].clone(), args[1].clone()]))
}

fn unary(args: &[Value], f: fn(f64) -> f64) -> Result<Value, Error> {
    Ok(Value::Float(f(number(&args[0])?)))
}

fn cos(args: &[Value]) -> Result<Value, Error> {
    unary(args, f64::cos)
}

fn sin(args: &[Value]) -> Result<Value, Error> {
    unary(args, f64::sin)
}

fn sqrt(args: &[Value]) -> Result<Value, Error> {
    unary(args, f64::sqrt)
}

fn ln(args: &[Value]) -> Result<Value, Error> {
    unary(args, f64::ln)
}

fn abs(args: &[Value]) -> Result<Value, Error> {
    match &args[0] {
        Value::Int(i) => i.checked_abs().map(Value::Int).ok_or(Error::Overflow),
        other => Ok(Value::Float(number(other)?.abs())),
    }
}
