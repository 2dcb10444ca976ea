//! Literal-only expression evaluation.
//!
//! Converts a parsed expression into a [`Literal`] without executing
//! anything. Only constants and containers of constants are accepted; names,
//! calls (other than an empty `set()`), attribute access, operators (other
//! than a sign on a number), comprehensions and f-strings are rejected with
//! a message that describes the offending construct.

use crate::parser::range_text;
use num_bigint::BigInt;
use rustpython_parser::ast::{self, Constant, Expr, Ranged, UnaryOp};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use std::fmt;

/// A statically evaluable Python value.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    None,
    Bool(bool),
    Int(BigInt),
    Float(f64),
    Str(String),
    Bytes(Vec<u8>),
    List(Vec<Literal>),
    Tuple(Vec<Literal>),
    /// Insertion-ordered, without Python-equal duplicates
    Set(Vec<Literal>),
    /// Insertion-ordered; a repeated key keeps its first position and key
    Dict(Vec<(Literal, Literal)>),
}

impl Literal {
    /// Name of the Python type this literal evaluates to.
    pub fn type_name(&self) -> &'static str {
        match self {
            Literal::None => "NoneType",
            Literal::Bool(_) => "bool",
            Literal::Int(_) => "int",
            Literal::Float(_) => "float",
            Literal::Str(_) => "str",
            Literal::Bytes(_) => "bytes",
            Literal::List(_) => "list",
            Literal::Tuple(_) => "tuple",
            Literal::Set(_) => "set",
            Literal::Dict(_) => "dict",
        }
    }

    /// Whether the value may be a set item or dict key.
    pub fn is_hashable(&self) -> bool {
        match self {
            Literal::List(_) | Literal::Set(_) | Literal::Dict(_) => false,
            Literal::Tuple(items) => items.iter().all(Literal::is_hashable),
            _ => true,
        }
    }

    /// Python `==`: numbers compare by value across `bool`, `int` and
    /// `float`; sets and dicts ignore order.
    pub fn python_eq(&self, other: &Literal) -> bool {
        use Literal::*;
        match (self, other) {
            (None, None) => true,
            (Bool(a), Bool(b)) => a == b,
            (Int(a), Int(b)) => a == b,
            (Float(a), Float(b)) => a == b,
            (Bool(b), Int(i)) | (Int(i), Bool(b)) => *i == BigInt::from(u8::from(*b)),
            (Bool(b), Float(x)) | (Float(x), Bool(b)) => *x == f64::from(u8::from(*b)),
            (Int(i), Float(x)) | (Float(x), Int(i)) => int_equals_float(i, *x),
            (Str(a), Str(b)) => a == b,
            (Bytes(a), Bytes(b)) => a == b,
            (List(a), List(b)) | (Tuple(a), Tuple(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.python_eq(y))
            }
            (Set(a), Set(b)) => {
                a.len() == b.len() && a.iter().all(|x| b.iter().any(|y| x.python_eq(y)))
            }
            (Dict(a), Dict(b)) => {
                a.len() == b.len()
                    && a.iter().all(|(k, v)| {
                        b.iter().any(|(k2, v2)| k.python_eq(k2) && v.python_eq(v2))
                    })
            }
            _ => false,
        }
    }

    /// The string key used when this literal becomes a JSON object key.
    fn json_key(&self) -> String {
        match self {
            Literal::Str(s) => s.clone(),
            other => other.to_string(),
        }
    }

    fn negated(self) -> Literal {
        match self {
            Literal::Int(i) => Literal::Int(-i),
            Literal::Float(x) => Literal::Float(-x),
            other => other,
        }
    }
}

fn int_equals_float(i: &BigInt, x: f64) -> bool {
    x.is_finite()
        && x.fract() == 0.0
        && format!("{:.0}", x + 0.0)
            .parse::<BigInt>()
            .is_ok_and(|whole| whole == *i)
}

/// Python `repr()` rendering.
impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::None => write!(f, "None"),
            Literal::Bool(true) => write!(f, "True"),
            Literal::Bool(false) => write!(f, "False"),
            Literal::Int(i) => write!(f, "{i}"),
            Literal::Float(x) => write!(f, "{}", float_repr(*x)),
            Literal::Str(s) => write_str_repr(f, s),
            Literal::Bytes(b) => write_bytes_repr(f, b),
            Literal::List(items) => write_seq(f, "[", items, "]"),
            Literal::Tuple(items) if items.len() == 1 => write!(f, "({},)", items[0]),
            Literal::Tuple(items) => write_seq(f, "(", items, ")"),
            Literal::Set(items) if items.is_empty() => write!(f, "set()"),
            Literal::Set(items) => write_seq(f, "{", items, "}"),
            Literal::Dict(pairs) => {
                write!(f, "{{")?;
                for (i, (k, v)) in pairs.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{k}: {v}")?;
                }
                write!(f, "}}")
            }
        }
    }
}

/// Shortest round-trip digits, positional for exponents in `-4..16` and
/// `1e+16` style otherwise.
fn float_repr(x: f64) -> String {
    if x.is_nan() {
        return "nan".to_string();
    }
    if x.is_infinite() {
        return if x > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let scientific = format!("{x:e}");
    let (mantissa, exponent) = scientific.split_once('e').unwrap_or((&scientific, "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if (-4..16).contains(&exponent) {
        let plain = x.to_string();
        if plain.contains('.') {
            plain
        } else {
            format!("{plain}.0")
        }
    } else {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{mantissa}e{sign}{:02}", exponent.abs())
    }
}

fn write_str_repr(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    let quote = if s.contains('\'') && !s.contains('"') {
        '"'
    } else {
        '\''
    };
    write!(f, "{quote}")?;
    for c in s.chars() {
        match c {
            '\\' => write!(f, "\\\\")?,
            '\n' => write!(f, "\\n")?,
            '\r' => write!(f, "\\r")?,
            '\t' => write!(f, "\\t")?,
            c if c == quote => write!(f, "\\{c}")?,
            c if c.is_control() => write!(f, "\\x{:02x}", c as u32)?,
            c => write!(f, "{c}")?,
        }
    }
    write!(f, "{quote}")
}

fn write_bytes_repr(f: &mut fmt::Formatter<'_>, bytes: &[u8]) -> fmt::Result {
    write!(f, "b'")?;
    for &b in bytes {
        match b {
            b'\\' => write!(f, "\\\\")?,
            b'\'' => write!(f, "\\'")?,
            b'\n' => write!(f, "\\n")?,
            b'\r' => write!(f, "\\r")?,
            b'\t' => write!(f, "\\t")?,
            0x20..=0x7e => write!(f, "{}", b as char)?,
            _ => write!(f, "\\x{b:02x}")?,
        }
    }
    write!(f, "'")
}

fn write_seq(f: &mut fmt::Formatter<'_>, open: &str, items: &[Literal], close: &str) -> fmt::Result {
    write!(f, "{open}")?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{item}")?;
    }
    write!(f, "{close}")
}

/// JSON-shaped serialization: tuples and sets become arrays, bytes become
/// (lossy UTF-8) strings, non-string dict keys use their `repr()` and
/// integers beyond 64 bits become decimal strings.
impl Serialize for Literal {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Literal::None => serializer.serialize_unit(),
            Literal::Bool(b) => serializer.serialize_bool(*b),
            Literal::Int(i) => {
                if let Ok(small) = i64::try_from(i) {
                    serializer.serialize_i64(small)
                } else if let Ok(unsigned) = u64::try_from(i) {
                    serializer.serialize_u64(unsigned)
                } else {
                    serializer.serialize_str(&i.to_string())
                }
            }
            Literal::Float(x) => serializer.serialize_f64(*x),
            Literal::Str(s) => serializer.serialize_str(s),
            Literal::Bytes(b) => serializer.serialize_str(&String::from_utf8_lossy(b)),
            Literal::List(items) | Literal::Tuple(items) | Literal::Set(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Literal::Dict(pairs) => {
                let mut map = serializer.serialize_map(Some(pairs.len()))?;
                for (k, v) in pairs {
                    map.serialize_entry(&k.json_key(), v)?;
                }
                map.end()
            }
        }
    }
}

/// Evaluate an expression as a literal.
///
/// The error is a human-readable description of the first non-literal
/// construct encountered.
pub fn evaluate(expr: &Expr, source: &str) -> Result<Literal, String> {
    match expr {
        Expr::Constant(constant) => from_constant(&constant.value, expr, source),
        Expr::UnaryOp(unary) => evaluate_signed(unary, expr, source),
        Expr::List(list) => evaluate_items(&list.elts, source).map(Literal::List),
        Expr::Tuple(tuple) => evaluate_items(&tuple.elts, source).map(Literal::Tuple),
        Expr::Set(set) => evaluate_set(&set.elts, source),
        Expr::Dict(dict) => evaluate_dict(dict, source),
        Expr::Call(call) if is_empty_set_call(call) => Ok(Literal::Set(Vec::new())),
        _ => Err(describe_rejected(expr, source)),
    }
}

fn from_constant(value: &Constant, expr: &Expr, source: &str) -> Result<Literal, String> {
    match value {
        Constant::None => Ok(Literal::None),
        Constant::Bool(b) => Ok(Literal::Bool(*b)),
        Constant::Str(s) => Ok(Literal::Str(s.clone())),
        Constant::Bytes(b) => Ok(Literal::Bytes(b.clone())),
        Constant::Int(i) => to_bigint(i).map(Literal::Int),
        Constant::Float(x) => Ok(Literal::Float(*x)),
        Constant::Tuple(items) => items
            .iter()
            .map(|item| from_constant(item, expr, source))
            .collect::<Result<_, _>>()
            .map(Literal::Tuple),
        Constant::Complex { .. } => Err(format!(
            "complex literal `{}` is not supported",
            shorten(range_text(source, expr.range()))
        )),
        Constant::Ellipsis => Err("ellipsis `...` is not supported".to_string()),
    }
}

/// The parser's integer type is carried over through its decimal form.
fn to_bigint(value: &impl fmt::Display) -> Result<BigInt, String> {
    let digits = value.to_string();
    digits
        .parse::<BigInt>()
        .map_err(|e| format!("invalid integer literal `{digits}`: {e}"))
}

fn evaluate_items(items: &[Expr], source: &str) -> Result<Vec<Literal>, String> {
    items.iter().map(|item| evaluate(item, source)).collect()
}

fn evaluate_set(items: &[Expr], source: &str) -> Result<Literal, String> {
    let mut unique: Vec<Literal> = Vec::new();
    for item in evaluate_items(items, source)? {
        if !item.is_hashable() {
            return Err(unhashable(&item));
        }
        if !unique.iter().any(|seen| seen.python_eq(&item)) {
            unique.push(item);
        }
    }
    Ok(Literal::Set(unique))
}

fn evaluate_dict(dict: &ast::ExprDict, source: &str) -> Result<Literal, String> {
    let mut pairs: Vec<(Literal, Literal)> = Vec::new();
    for (key, value) in dict.keys.iter().zip(&dict.values) {
        let Some(key) = key else {
            return Err(format!(
                "unpacking `**{}`",
                shorten(range_text(source, value.range()))
            ));
        };
        let key = evaluate(key, source)?;
        if !key.is_hashable() {
            return Err(unhashable(&key));
        }
        let value = evaluate(value, source)?;
        match pairs.iter_mut().find(|(k, _)| k.python_eq(&key)) {
            Some(slot) => slot.1 = value,
            None => pairs.push((key, value)),
        }
    }
    Ok(Literal::Dict(pairs))
}

fn unhashable(value: &Literal) -> String {
    format!("unhashable type: '{}' in `{value}`", value.type_name())
}

/// A sign may only be applied directly to a numeric constant.
fn evaluate_signed(unary: &ast::ExprUnaryOp, expr: &Expr, source: &str) -> Result<Literal, String> {
    let negate = match unary.op {
        UnaryOp::USub => true,
        UnaryOp::UAdd => false,
        _ => return Err(describe_rejected(expr, source)),
    };
    let Expr::Constant(operand) = unary.operand.as_ref() else {
        return Err(describe_rejected(expr, source));
    };

    let number = match &operand.value {
        Constant::Int(i) => Literal::Int(to_bigint(i)?),
        Constant::Bool(b) => Literal::Int(BigInt::from(u8::from(*b))),
        Constant::Float(x) => Literal::Float(*x),
        Constant::Complex { .. } => return from_constant(&operand.value, expr, source),
        _ => return Err(describe_rejected(expr, source)),
    };
    Ok(if negate { number.negated() } else { number })
}

fn is_empty_set_call(call: &ast::ExprCall) -> bool {
    call.args.is_empty()
        && call.keywords.is_empty()
        && matches!(call.func.as_ref(), Expr::Name(name) if name.id.as_str() == "set")
}

fn shorten(text: &str) -> String {
    if text.chars().count() > 60 {
        format!("{}...", text.chars().take(60).collect::<String>())
    } else {
        text.to_string()
    }
}

fn describe_rejected(expr: &Expr, source: &str) -> String {
    let what = match expr {
        Expr::Call(_) => "function call",
        Expr::Name(_) => "name reference",
        Expr::Attribute(_) => "attribute access",
        Expr::Subscript(_) | Expr::Slice(_) => "subscript",
        Expr::BinOp(_) | Expr::BoolOp(_) | Expr::Compare(_) | Expr::UnaryOp(_) => {
            "operator expression"
        }
        Expr::ListComp(_) | Expr::SetComp(_) | Expr::DictComp(_) | Expr::GeneratorExp(_) => {
            "comprehension"
        }
        Expr::Lambda(_) => "lambda",
        Expr::IfExp(_) => "conditional expression",
        Expr::Starred(_) => "unpacking",
        Expr::JoinedStr(_) | Expr::FormattedValue(_) => "f-string",
        Expr::Await(_) | Expr::Yield(_) | Expr::YieldFrom(_) => "coroutine expression",
        Expr::NamedExpr(_) => "assignment expression",
        _ => "unsupported expression",
    };
    format!("{what} `{}`", shorten(range_text(source, expr.range())))
}
