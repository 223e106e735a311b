//! Rendering single arguments as SQL text.
//!
//! Every conversion either produces text, fails with a [`TemplateError`], or
//! halts with [`Halt::Skip`] when it meets the skip sentinel.

use crate::error::{NumericKind, TemplateError};
use crate::escape::Escaper;
use crate::value::Value;

/// Why a conversion did not produce text.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Halt {
    /// The argument was the skip sentinel.
    Skip,
    Fail(TemplateError),
}

impl From<TemplateError> for Halt {
    fn from(err: TemplateError) -> Self {
        Halt::Fail(err)
    }
}

pub(crate) type Converted = Result<String, Halt>;

/// Largest float magnitude that still truncates into `i64`.
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

/// Render a finite float so that it always reads back as a float.
pub(crate) fn float_literal(v: f64, index: usize) -> Converted {
    if !v.is_finite() {
        return Err(TemplateError::invalid_numeric(index, NumericKind::Float, v).into());
    }
    let mut s = v.to_string();
    if !s.contains('.') {
        s.push_str(".0");
    }
    Ok(s)
}

fn truncate_to_int(v: f64, index: usize) -> Result<i64, TemplateError> {
    let t = v.trunc();
    if !t.is_finite() || t >= I64_BOUND || t < -I64_BOUND {
        return Err(TemplateError::invalid_numeric(index, NumericKind::Int, v));
    }
    Ok(t as i64)
}

/// `?d`: integer coercion. Floats truncate toward zero.
pub(crate) fn to_int(arg: &Value, index: usize) -> Converted {
    match arg {
        Value::Skip => Err(Halt::Skip),
        Value::Null => Ok("NULL".to_string()),
        Value::Bool(b) => Ok(i64::from(*b).to_string()),
        Value::Int(i) => Ok(i.to_string()),
        Value::Float(f) => Ok(truncate_to_int(*f, index)?.to_string()),
        Value::Text(s) => parse_int(s, index).map(|i| i.to_string()),
        Value::List(_) | Value::Map(_) => {
            Err(TemplateError::invalid_type(index, arg.type_name()).into())
        }
    }
}

/// Integer text must be an integer literal, or a float literal with no
/// fractional part.
fn parse_int(s: &str, index: usize) -> Result<i64, Halt> {
    if let Ok(i) = s.parse::<i64>() {
        return Ok(i);
    }
    match s.parse::<f64>() {
        Ok(f) if f.is_finite() && f.fract() == 0.0 => {
            truncate_to_int(f, index).map_err(|_| invalid_text(s, NumericKind::Int, index))
        }
        _ => Err(invalid_text(s, NumericKind::Int, index)),
    }
}

fn invalid_text(s: &str, target: NumericKind, index: usize) -> Halt {
    TemplateError::invalid_numeric(index, target, s).into()
}

/// `?f`: float coercion.
pub(crate) fn to_float(arg: &Value, index: usize) -> Converted {
    match arg {
        Value::Skip => Err(Halt::Skip),
        Value::Null => Ok("NULL".to_string()),
        Value::Bool(b) => float_literal(f64::from(u8::from(*b)), index),
        Value::Int(i) => float_literal(*i as f64, index),
        Value::Float(f) => float_literal(*f, index),
        Value::Text(s) => match s.parse::<f64>() {
            Ok(f) if f.is_finite() => float_literal(f, index),
            _ => Err(invalid_text(s, NumericKind::Float, index)),
        },
        Value::List(_) | Value::Map(_) => {
            Err(TemplateError::invalid_type(index, arg.type_name()).into())
        }
    }
}

/// Generic scalar escape used by `?` and the elements of `?a`.
pub(crate) fn escaped<E: Escaper + ?Sized>(escaper: &E, arg: &Value, index: usize) -> Converted {
    match arg {
        Value::Skip => Err(Halt::Skip),
        Value::Null => Ok("NULL".to_string()),
        Value::Bool(b) => Ok(i64::from(*b).to_string()),
        Value::Int(i) => Ok(i.to_string()),
        Value::Float(f) => float_literal(*f, index),
        Value::Text(s) => Ok(format!("'{}'", escaper.escape_string(s))),
        Value::List(_) | Value::Map(_) => {
            Err(TemplateError::invalid_type(index, arg.type_name()).into())
        }
    }
}

/// Column quoting used by `?#`. Only text names are accepted.
pub(crate) fn column<E: Escaper + ?Sized>(escaper: &E, arg: &Value, index: usize) -> Converted {
    match arg {
        Value::Skip => Err(Halt::Skip),
        Value::Text(name) => Ok(escaper.quote_column(name)),
        _ => Err(TemplateError::invalid_type(index, arg.type_name()).into()),
    }
}

/// Apply `element` to a scalar, to each item of a list, or to each value
/// of a map rendered as `` `name` = value ``, joining with `", "`.
pub(crate) fn flatten<E, F>(escaper: &E, arg: &Value, index: usize, element: F) -> Converted
where
    E: Escaper + ?Sized,
    F: Fn(&E, &Value, usize) -> Converted,
{
    match arg {
        Value::List(items) => {
            let mut parts = Vec::with_capacity(items.len());
            for item in items {
                parts.push(element(escaper, item, index)?);
            }
            Ok(parts.join(", "))
        }
        Value::Map(entries) => {
            let mut parts = Vec::with_capacity(entries.len());
            for (name, value) in entries {
                let rendered = element(escaper, value, index)?;
                parts.push(format!("{} = {}", escaper.quote_column(name), rendered));
            }
            Ok(parts.join(", "))
        }
        scalar => element(escaper, scalar, index),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::escape::MySqlEscaper;

    fn fail(err: TemplateError) -> Converted {
        Err(Halt::Fail(err))
    }

    #[test]
    fn int_coercion() {
        assert_eq!(to_int(&Value::Int(20), 1), Ok("20".into()));
        assert_eq!(to_int(&Value::Bool(true), 1), Ok("1".into()));
        assert_eq!(to_int(&Value::Null, 1), Ok("NULL".into()));
        assert_eq!(to_int(&Value::Float(200.25), 1), Ok("200".into()));
        assert_eq!(to_int(&Value::Float(-3.9), 1), Ok("-3".into()));
        assert_eq!(to_int(&Value::Skip, 1), Err(Halt::Skip));
    }

    #[test]
    fn int_from_text() {
        assert_eq!(to_int(&Value::from("20"), 1), Ok("20".into()));
        assert_eq!(to_int(&Value::from("20.0"), 1), Ok("20".into()));
        assert_eq!(
            to_int(&Value::from("20.5"), 3),
            fail(TemplateError::invalid_numeric(3, NumericKind::Int, "20.5"))
        );
        assert_eq!(
            to_int(&Value::from("20abc"), 1),
            fail(TemplateError::invalid_numeric(1, NumericKind::Int, "20abc"))
        );
    }

    #[test]
    fn int_rejects_out_of_range_float() {
        assert!(matches!(
            to_int(&Value::Float(1e300), 1),
            Err(Halt::Fail(TemplateError::InvalidNumericArgument { .. }))
        ));
        assert!(matches!(
            to_int(&Value::Float(f64::NAN), 1),
            Err(Halt::Fail(TemplateError::InvalidNumericArgument { .. }))
        ));
    }

    #[test]
    fn int_rejects_containers() {
        assert_eq!(
            to_int(&Value::list([1, 2]), 2),
            fail(TemplateError::invalid_type(2, "list"))
        );
    }

    #[test]
    fn float_coercion() {
        assert_eq!(to_float(&Value::Float(200.25), 1), Ok("200.25".into()));
        assert_eq!(to_float(&Value::Int(20), 1), Ok("20.0".into()));
        assert_eq!(to_float(&Value::Bool(false), 1), Ok("0.0".into()));
        assert_eq!(to_float(&Value::from("1.5"), 1), Ok("1.5".into()));
        assert!(matches!(
            to_float(&Value::from("inf"), 1),
            Err(Halt::Fail(TemplateError::InvalidNumericArgument { .. }))
        ));
        assert!(matches!(
            to_float(&Value::from("1.5x"), 1),
            Err(Halt::Fail(TemplateError::InvalidNumericArgument { .. }))
        ));
    }

    #[test]
    fn escaped_scalars() {
        let e = MySqlEscaper;
        assert_eq!(escaped(&e, &Value::from("Jack"), 1), Ok("'Jack'".into()));
        assert_eq!(escaped(&e, &Value::from("O'Neil"), 1), Ok("'O\\'Neil'".into()));
        assert_eq!(escaped(&e, &Value::Bool(false), 1), Ok("0".into()));
        assert_eq!(escaped(&e, &Value::Null, 1), Ok("NULL".into()));
        assert_eq!(escaped(&e, &Value::Float(1.0), 1), Ok("1.0".into()));
        assert_eq!(
            escaped(&e, &Value::map([("a", 1)]), 4),
            fail(TemplateError::invalid_type(4, "map"))
        );
    }

    #[test]
    fn flatten_list_and_map() {
        let e = MySqlEscaper;
        assert_eq!(
            flatten(&e, &Value::list([1, 2, 3]), 1, escaped),
            Ok("1, 2, 3".into())
        );
        assert_eq!(
            flatten(
                &e,
                &Value::map([("name", Value::from("Jack")), ("email", Value::Null)]),
                1,
                escaped
            ),
            Ok("`name` = 'Jack', `email` = NULL".into())
        );
        assert_eq!(
            flatten(&e, &Value::from("name"), 1, column),
            Ok("`name`".into())
        );
    }

    #[test]
    fn flatten_propagates_skip_from_items() {
        let e = MySqlEscaper;
        let v = Value::List(vec![Value::Int(1), Value::Skip]);
        assert_eq!(flatten(&e, &v, 1, escaped), Err(Halt::Skip));
    }

    #[test]
    fn flatten_rejects_nested_lists() {
        let e = MySqlEscaper;
        let v = Value::List(vec![Value::list([1])]);
        assert_eq!(
            flatten(&e, &v, 5, escaped),
            fail(TemplateError::invalid_type(5, "list"))
        );
    }

    #[test]
    fn column_requires_text() {
        let e = MySqlEscaper;
        assert_eq!(
            column(&e, &Value::Int(1), 2),
            fail(TemplateError::invalid_type(2, "int"))
        );
    }
}
