//! String literal escaping and identifier quoting.
//!
//! The templater never talks to a database. The one thing it needs from the
//! target database is how string literals are escaped, which is abstracted
//! by [`Escaper`]. Implement it for a connection type to delegate to the
//! driver's own escaping routine.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;

/// Escaping primitives of the target database.
pub trait Escaper {
    /// Escape the contents of a string literal. The result is wrapped in
    /// single quotes by the caller.
    fn escape_string(&self, raw: &str) -> String;

    /// Quote a column name. Callers are responsible for passing valid
    /// identifiers; the content is not escaped.
    fn quote_column(&self, name: &str) -> String {
        format!("`{name}`")
    }
}

impl<E: Escaper + ?Sized> Escaper for &E {
    fn escape_string(&self, raw: &str) -> String {
        (**self).escape_string(raw)
    }

    fn quote_column(&self, name: &str) -> String {
        (**self).quote_column(name)
    }
}

impl<E: Escaper + ?Sized> Escaper for Arc<E> {
    fn escape_string(&self, raw: &str) -> String {
        (**self).escape_string(raw)
    }

    fn quote_column(&self, name: &str) -> String {
        (**self).quote_column(name)
    }
}

/// MySQL escaping, as done by `mysql_real_escape_string`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MySqlEscaper;

impl Escaper for MySqlEscaper {
    fn escape_string(&self, raw: &str) -> String {
        let mut out = String::with_capacity(raw.len() + 2);
        for ch in raw.chars() {
            match ch {
                '\0' => out.push_str("\\0"),
                '\n' => out.push_str("\\n"),
                '\r' => out.push_str("\\r"),
                '\\' => out.push_str("\\\\"),
                '\'' => out.push_str("\\'"),
                '"' => out.push_str("\\\""),
                '\x1a' => out.push_str("\\Z"),
                c => out.push(c),
            }
        }
        out
    }
}

/// PostgreSQL escaping with `standard_conforming_strings = on`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PostgresEscaper;

impl Escaper for PostgresEscaper {
    fn escape_string(&self, raw: &str) -> String {
        raw.replace('\'', "''")
    }

    fn quote_column(&self, name: &str) -> String {
        format!("\"{name}\"")
    }
}

/// Built-in escaping dialects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dialect {
    #[default]
    #[serde(rename = "mysql")]
    MySql,
    Postgres,
}

impl Escaper for Dialect {
    fn escape_string(&self, raw: &str) -> String {
        match self {
            Dialect::MySql => MySqlEscaper.escape_string(raw),
            Dialect::Postgres => PostgresEscaper.escape_string(raw),
        }
    }

    fn quote_column(&self, name: &str) -> String {
        match self {
            Dialect::MySql => MySqlEscaper.quote_column(name),
            Dialect::Postgres => PostgresEscaper.quote_column(name),
        }
    }
}

impl FromStr for Dialect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mysql" | "mariadb" => Ok(Dialect::MySql),
            "postgres" | "postgresql" | "pg" => Ok(Dialect::Postgres),
            other => Err(format!("unknown dialect: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mysql_escapes_quotes_and_control_chars() {
        assert_eq!(MySqlEscaper.escape_string("O'Neil"), "O\\'Neil");
        assert_eq!(MySqlEscaper.escape_string("a\\b"), "a\\\\b");
        assert_eq!(MySqlEscaper.escape_string("line\nbreak"), "line\\nbreak");
        assert_eq!(MySqlEscaper.escape_string("say \"hi\""), "say \\\"hi\\\"");
        assert_eq!(MySqlEscaper.escape_string("\0\x1a"), "\\0\\Z");
    }

    #[test]
    fn postgres_doubles_single_quotes() {
        assert_eq!(PostgresEscaper.escape_string("O'Neil"), "O''Neil");
        assert_eq!(PostgresEscaper.escape_string("a\\b"), "a\\b");
    }

    #[test]
    fn column_quoting_per_dialect() {
        assert_eq!(Dialect::MySql.quote_column("name"), "`name`");
        assert_eq!(Dialect::Postgres.quote_column("name"), "\"name\"");
    }

    #[test]
    fn dialect_from_str() {
        assert_eq!("MySQL".parse::<Dialect>().unwrap(), Dialect::MySql);
        assert_eq!("pg".parse::<Dialect>().unwrap(), Dialect::Postgres);
        assert!("oracle".parse::<Dialect>().is_err());
    }

    #[test]
    fn escaper_through_reference_and_arc() {
        let arc: Arc<dyn Escaper> = Arc::new(PostgresEscaper);
        assert_eq!(arc.quote_column("id"), "\"id\"");
        assert_eq!((&MySqlEscaper).escape_string("'"), "\\'");
    }
}
