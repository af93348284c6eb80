use sea_orm::{ConnectionTrait, DatabaseBackend, DbErr, Statement, Value};

use crate::domain::common::query::{BuiltQuery, FilterValue};

impl From<FilterValue> for Value {
    fn from(value: FilterValue) -> Self {
        match value {
            FilterValue::Int(v) => v.into(),
            FilterValue::BigInt(v) => v.into(),
            FilterValue::Text(v) => v.into(),
            FilterValue::Timestamp(v) => v.into(),
        }
    }
}

/// Binds a built query as a Postgres statement.
pub fn to_statement(query: BuiltQuery) -> Statement {
    Statement::from_sql_and_values(
        DatabaseBackend::Postgres,
        query.sql,
        query.params.into_iter().map(Value::from),
    )
}

/// Runs a `COUNT(*) AS count` query.
pub async fn fetch_count<C: ConnectionTrait>(db: &C, query: BuiltQuery) -> Result<i64, DbErr> {
    let row = db.query_one(to_statement(query)).await?;
    match row {
        Some(row) => row.try_get::<i64>("", "count"),
        None => Ok(0),
    }
}
