use chrono::{DateTime, Utc};

use crate::domain::{common::pagination::PageRequest, validation::DateRange};

/// A value bound to a positional placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Int(i32),
    BigInt(i64),
    Text(String),
    Timestamp(DateTime<Utc>),
}

impl From<i32> for FilterValue {
    fn from(value: i32) -> Self {
        FilterValue::Int(value)
    }
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        FilterValue::BigInt(value)
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        FilterValue::Text(value)
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        FilterValue::Text(value.to_string())
    }
}

impl From<DateTime<Utc>> for FilterValue {
    fn from(value: DateTime<Utc>) -> Self {
        FilterValue::Timestamp(value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BuiltQuery {
    pub sql: String,
    pub params: Vec<FilterValue>,
}

/// Assembles a parameterized `SELECT` from optional filters.
///
/// Column and clause text is supplied by the caller and must never contain
/// user input; every user-supplied value goes through `params` and is referenced
/// as `$n`. Conditions render in insertion order, the first after `WHERE` and the
/// rest joined with `AND`.
#[derive(Debug, Clone, Default)]
pub struct FilterQuery {
    base: String,
    conditions: Vec<String>,
    params: Vec<FilterValue>,
    group_by: Option<String>,
    order_by: Option<String>,
}

impl FilterQuery {
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            ..Default::default()
        }
    }

    fn next_placeholder(&mut self, value: FilterValue) -> String {
        self.params.push(value);
        format!("${}", self.params.len())
    }

    pub fn eq<V: Into<FilterValue>>(mut self, column: &str, value: Option<V>) -> Self {
        if let Some(value) = value {
            let placeholder = self.next_placeholder(value.into());
            self.conditions.push(format!("{column} = {placeholder}"));
        }
        self
    }

    /// `column IN (...)` with one placeholder per value. An empty list matches nothing.
    pub fn any_of<V: Into<FilterValue> + Clone>(mut self, column: &str, values: &[V]) -> Self {
        if values.is_empty() {
            self.conditions.push("FALSE".to_string());
            return self;
        }

        let placeholders = values
            .iter()
            .map(|value| self.next_placeholder(value.clone().into()))
            .collect::<Vec<_>>()
            .join(", ");
        self.conditions.push(format!("{column} IN ({placeholders})"));
        self
    }

    /// Inclusive on both ends. An open side adds no bound.
    pub fn range(mut self, column: &str, range: &DateRange) -> Self {
        let condition = match (range.start, range.end) {
            (Some(start), Some(end)) => {
                let from = self.next_placeholder(start.into());
                let to = self.next_placeholder(end.into());
                format!("({column} >= {from} AND {column} <= {to})")
            }
            (Some(start), None) => {
                let from = self.next_placeholder(start.into());
                format!("{column} >= {from}")
            }
            (None, Some(end)) => {
                let to = self.next_placeholder(end.into());
                format!("{column} <= {to}")
            }
            (None, None) => return self,
        };

        self.conditions.push(condition);
        self
    }

    /// Case-insensitive substring match over any of `columns`, sharing one parameter.
    pub fn search(mut self, columns: &[&str], term: Option<&str>) -> Self {
        let term = term.map(str::trim).filter(|t| !t.is_empty());
        let Some(term) = term else {
            return self;
        };
        if columns.is_empty() {
            return self;
        }

        let placeholder = self.next_placeholder(FilterValue::Text(format!(
            "%{}%",
            escape_like(term)
        )));
        let alternatives = columns
            .iter()
            .map(|column| format!("{column} ILIKE {placeholder}"))
            .collect::<Vec<_>>()
            .join(" OR ");

        self.conditions.push(format!("({alternatives})"));
        self
    }

    pub fn group_by(mut self, expression: &str) -> Self {
        self.group_by = Some(expression.to_string());
        self
    }

    pub fn order_by(mut self, expression: &str) -> Self {
        self.order_by = Some(expression.to_string());
        self
    }

    pub fn condition_count(&self) -> usize {
        self.conditions.len()
    }

    fn where_clause(&self) -> String {
        if self.conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", self.conditions.join(" AND "))
        }
    }

    pub fn build(&self) -> BuiltQuery {
        let mut sql = format!("{}{}", self.base, self.where_clause());
        if let Some(group_by) = &self.group_by {
            sql.push_str(&format!(" GROUP BY {group_by}"));
        }
        if let Some(order_by) = &self.order_by {
            sql.push_str(&format!(" ORDER BY {order_by}"));
        }

        BuiltQuery {
            sql,
            params: self.params.clone(),
        }
    }

    /// Appends `LIMIT`/`OFFSET` as the two trailing parameters.
    pub fn paginate(&self, page: &PageRequest) -> BuiltQuery {
        let mut query = self.build();
        let limit = query.params.len() + 1;
        query
            .sql
            .push_str(&format!(" LIMIT ${} OFFSET ${}", limit, limit + 1));
        query.params.push(FilterValue::BigInt(page.limit));
        query.params.push(FilterValue::BigInt(page.offset));
        query
    }

    /// Same conditions and parameters over a different projection.
    pub fn count(&self, count_base: &str) -> BuiltQuery {
        BuiltQuery {
            sql: format!("{}{}", count_base, self.where_clause()),
            params: self.params.clone(),
        }
    }
}

fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
