use std::time::Instant;

use chrono::Utc;
use sea_orm::{ConnectionTrait, DatabaseConnection, Statement};
use tracing::error;

use crate::domain::{
    common::entities::app_errors::CoreError,
    health::{entities::DatabaseHealthStatus, ports::HealthCheckRepository},
};

#[derive(Debug, Clone)]
pub struct PostgresHealthCheckRepository {
    pub db: DatabaseConnection,
}

impl PostgresHealthCheckRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn ping(&self) -> Result<u64, CoreError> {
        let started = Instant::now();
        self.db
            .execute(Statement::from_string(
                sea_orm::DatabaseBackend::Postgres,
                "SELECT 1",
            ))
            .await
            .map_err(|e| {
                error!("Database health check failed: {}", e);
                CoreError::ExternalServiceError("Database unreachable".to_string())
            })?;

        Ok(started.elapsed().as_millis() as u64)
    }
}

impl HealthCheckRepository for PostgresHealthCheckRepository {
    async fn health(&self) -> Result<u64, CoreError> {
        self.ping().await
    }

    async fn readness(&self) -> Result<DatabaseHealthStatus, CoreError> {
        let (status, response_time_ms) = match self.ping().await {
            Ok(elapsed) => ("healthy", elapsed),
            Err(_) => ("unhealthy", 0),
        };

        Ok(DatabaseHealthStatus {
            status: status.to_string(),
            database: "postgres".to_string(),
            response_time_ms,
            checked_at: Utc::now(),
        })
    }
}
