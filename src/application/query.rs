// src/application/query.rs
//! Dialect-aware construction of the uniqueness lookup used by `dbIncrement`.
use crate::domain::errors::{SlugError, SlugResult};
use std::fmt;

/// Name of the computed trailing-number column.
pub const COUNTER_ALIAS: &str = "slug_counter";

/// Engine name and version as reported by the storage adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialectInfo {
    pub name: String,
    pub version: String,
}

impl DialectInfo {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

/// Storage engines the `dbIncrement` strategy knows how to query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// PostgreSQL and Redshift.
    Postgres,
    Sqlite,
    /// MySQL before 8.0, which lacks `REGEXP_SUBSTR`.
    LegacyMysql,
    Mysql,
    Mssql,
    Oracle,
}

impl Dialect {
    pub fn resolve(info: &DialectInfo) -> SlugResult<Self> {
        match info.name.as_str() {
            "postgres" | "redshift" => Ok(Self::Postgres),
            "sqlite3" | "better-sqlite3" => Ok(Self::Sqlite),
            "mysql" | "mysql2" => {
                // Only `major.minor` counts; unparsable versions are modern.
                match leading_version(&info.version).parse::<f64>() {
                    Ok(version) if version < 8.0 => Ok(Self::LegacyMysql),
                    _ => Ok(Self::Mysql),
                }
            }
            "mssql" => Ok(Self::Mssql),
            "oracledb" => Ok(Self::Oracle),
            other => Err(SlugError::UnsupportedDialect(other.to_string())),
        }
    }

    pub fn quote(&self, identifier: &str) -> String {
        match self {
            Self::Mysql | Self::LegacyMysql => format!("`{}`", identifier.replace('`', "``")),
            Self::Mssql => format!("[{}]", identifier.replace(']', "]]")),
            Self::Postgres | Self::Sqlite | Self::Oracle => {
                format!("\"{}\"", identifier.replace('"', "\"\""))
            }
        }
    }

    fn placeholder(&self, index: usize) -> String {
        match self {
            Self::Postgres => format!("${index}"),
            Self::Mssql => format!("@p{index}"),
            Self::Oracle => format!(":{index}"),
            Self::Sqlite | Self::Mysql | Self::LegacyMysql => "?".to_string(),
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Postgres => "postgres",
            Self::Sqlite => "sqlite3",
            Self::LegacyMysql => "mysql<8",
            Self::Mysql => "mysql",
            Self::Mssql => "mssql",
            Self::Oracle => "oracledb",
        };
        f.write_str(name)
    }
}

/// What the lookup returns per matching row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Projection {
    /// The raw slug column; counters are extracted client side.
    Value,
    /// A database-computed trailing counter, aliased as [`COUNTER_ALIAS`].
    Counter(String),
}

/// SQL fragment with `?` placeholders and its string binds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    pub sql: String,
    pub binds: Vec<String>,
}

impl Condition {
    pub fn new<I, B>(sql: impl Into<String>, binds: I) -> Self
    where
        I: IntoIterator<Item = B>,
        B: Into<String>,
    {
        Self {
            sql: sql.into(),
            binds: binds.into_iter().map(Into::into).collect(),
        }
    }
}

/// Final SQL and its positional binds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedQuery {
    pub sql: String,
    pub binds: Vec<String>,
    pub projection: Projection,
}

/// Lookup of rows whose slug collides with a candidate.
///
/// Match conditions are OR-ed together; scopes added through
/// [`SlugQuery::and_where_raw`] are AND-ed onto the whole match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlugQuery {
    dialect: Dialect,
    table: String,
    column: String,
    projection: Projection,
    matches: Vec<Condition>,
    scopes: Vec<Condition>,
    order_by_counter: bool,
    limit: Option<u32>,
}

impl SlugQuery {
    pub fn new(dialect: Dialect, table: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            dialect,
            table: table.into(),
            column: column.into(),
            projection: Projection::Value,
            matches: Vec::new(),
            scopes: Vec::new(),
            order_by_counter: false,
            limit: None,
        }
    }

    /// The lookup query for `slug`, shaped for `dialect`.
    pub fn for_slug(
        dialect: Dialect,
        table: &str,
        column: &str,
        slug: &str,
        separator: &str,
    ) -> Self {
        let quoted = dialect.quote(column);
        let pattern = format!(
            "^{}({}[0-9]*)?$",
            escape_regex(slug),
            escape_regex(separator)
        );
        let prefix = format!("{slug}{separator}%");
        let query = Self::new(dialect, table, column);

        match dialect {
            Dialect::Postgres => query
                .counter(format!(
                    "CAST(SUBSTRING({quoted} FROM '[0-9]+$') AS BIGINT)"
                ))
                .or_where(Condition::new(format!("{quoted} ~* ?"), [pattern]))
                .top_counters(),
            Dialect::Sqlite => query
                .or_where(Condition::new(format!("lower({quoted}) = ?"), [slug]))
                .or_where(Condition::new(format!("lower({quoted}) LIKE ?"), [prefix])),
            Dialect::LegacyMysql => query
                .or_where(Condition::new(format!("{quoted} = ?"), [slug]))
                .or_where(Condition::new(format!("{quoted} REGEXP ?"), [pattern])),
            Dialect::Mysql => query
                .counter(format!(
                    "CAST(REGEXP_SUBSTR({quoted}, '[0-9]+$') AS UNSIGNED)"
                ))
                .or_where(Condition::new(format!("{quoted} REGEXP ?"), [pattern]))
                .top_counters(),
            Dialect::Mssql => query
                .or_where(Condition::new(format!("{quoted} = ?"), [slug]))
                .or_where(Condition::new(format!("{quoted} LIKE ?"), [prefix])),
            Dialect::Oracle => query
                .counter(format!("TO_NUMBER(REGEXP_SUBSTR({quoted}, '[0-9]+$'))"))
                .or_where(Condition::new(format!("REGEXP_LIKE({quoted}, ?, 'i')"), [pattern]))
                .top_counters(),
        }
    }

    fn counter(mut self, expression: String) -> Self {
        self.projection = Projection::Counter(expression);
        self
    }

    fn or_where(mut self, condition: Condition) -> Self {
        self.matches.push(condition);
        self
    }

    /// Highest counters first; only the top two rows are ever inspected.
    fn top_counters(mut self) -> Self {
        self.order_by_counter = true;
        self.limit = Some(2);
        self
    }

    /// Narrow the lookup with an extra `AND` clause. `?` marks each bind.
    pub fn and_where_raw<I, B>(&mut self, sql: impl Into<String>, binds: I) -> &mut Self
    where
        I: IntoIterator<Item = B>,
        B: Into<String>,
    {
        self.scopes.push(Condition::new(sql, binds));
        self
    }

    /// Convenience over [`SlugQuery::and_where_raw`] for `column = value`.
    pub fn and_where_eq(&mut self, column: &str, value: impl Into<String>) -> &mut Self {
        let sql = format!("{} = ?", self.dialect.quote(column));
        self.and_where_raw(sql, [value.into()])
    }

    pub fn render(&self) -> RenderedQuery {
        let mut binds = Vec::new();
        let mut next_index = 1;
        let dialect = self.dialect;
        let mut bind_fragment = |condition: &Condition| -> String {
            let mut out = String::with_capacity(condition.sql.len());
            let mut values = condition.binds.iter();
            for ch in condition.sql.chars() {
                if ch == '?' {
                    if let Some(value) = values.next() {
                        out.push_str(&dialect.placeholder(next_index));
                        next_index += 1;
                        binds.push(value.clone());
                        continue;
                    }
                }
                out.push(ch);
            }
            out
        };

        let select = match &self.projection {
            Projection::Value => dialect.quote(&self.column),
            Projection::Counter(expression) => format!("{expression} AS {COUNTER_ALIAS}"),
        };

        let mut sql = String::from("SELECT ");
        if dialect == Dialect::Mssql {
            if let Some(limit) = self.limit {
                sql.push_str(&format!("TOP {limit} "));
            }
        }
        sql.push_str(&select);
        sql.push_str(" FROM ");
        sql.push_str(&dialect.quote(&self.table));

        let matches: Vec<String> = self.matches.iter().map(&mut bind_fragment).collect();
        let scopes: Vec<String> = self.scopes.iter().map(&mut bind_fragment).collect();

        let mut clauses = Vec::new();
        if !matches.is_empty() {
            clauses.push(format!("({})", matches.join(" OR ")));
        }
        clauses.extend(scopes.into_iter().map(|scope| format!("({scope})")));
        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }

        if self.order_by_counter {
            sql.push_str(&format!(" ORDER BY {COUNTER_ALIAS} DESC"));
        }

        if let Some(limit) = self.limit {
            match dialect {
                Dialect::Mssql => {}
                Dialect::Oracle => sql.push_str(&format!(" FETCH FIRST {limit} ROWS ONLY")),
                _ => sql.push_str(&format!(" LIMIT {limit}")),
            }
        }

        RenderedQuery {
            sql,
            binds,
            projection: self.projection.clone(),
        }
    }
}

fn leading_version(version: &str) -> &str {
    let version = version.trim();
    let end = version
        .char_indices()
        .filter(|(_, ch)| *ch == '.')
        .nth(1)
        .map_or(version.len(), |(index, _)| index);
    let head = &version[..end];
    let digits = head
        .find(|ch: char| !ch.is_ascii_digit() && ch != '.')
        .unwrap_or(head.len());
    &head[..digits]
}

fn escape_regex(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        if "\\.+*?()|[]{}^$".contains(ch) {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}
