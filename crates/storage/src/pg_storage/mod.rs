//! PostgreSQL storage backend using sqlx.

mod curricula;

use std::collections::HashMap;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use curricula_core::{
    Curriculum, CurriculumVersion, LearningObjective, PG_POOL_ACQUIRE_TIMEOUT_SECS,
    PG_POOL_IDLE_TIMEOUT_SECS, PG_POOL_MAX_CONNECTIONS,
};
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgConnection, PgPool, Row};

use crate::error::StorageError;
use crate::pg_migrations::run_pg_migrations;

#[derive(Clone, Debug)]
pub struct PgStorage {
    pool: PgPool,
}

impl PgStorage {
    /// Connects, then applies migrations.
    pub async fn new(database_url: &str) -> Result<Self, StorageError> {
        let pool = PgPoolOptions::new()
            .max_connections(PG_POOL_MAX_CONNECTIONS)
            .acquire_timeout(std::time::Duration::from_secs(PG_POOL_ACQUIRE_TIMEOUT_SECS))
            .idle_timeout(std::time::Duration::from_secs(PG_POOL_IDLE_TIMEOUT_SECS))
            .test_before_acquire(true)
            .connect(database_url)
            .await?;
        run_pg_migrations(&pool).await.map_err(|e| StorageError::Migration(e.to_string()))?;
        tracing::info!("PgStorage initialized");
        Ok(Self { pool })
    }

    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Parse a TEXT enum column, reporting unknown values as corruption.
pub(crate) fn parse_column<T>(column: &str, raw: &str) -> Result<T, StorageError>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.parse::<T>().map_err(|e| StorageError::DataCorruption {
        context: format!("column {column} holds '{raw}'"),
        source: Box::new(e),
    })
}

pub(crate) fn row_to_curriculum(row: &PgRow) -> Result<Curriculum, StorageError> {
    Ok(Curriculum {
        id: row.try_get("id")?,
        subject: row.try_get("subject")?,
        grade: row.try_get("grade")?,
        curriculum_system: row.try_get("curriculum_system")?,
        created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
        versions: Vec::new(),
    })
}

pub(crate) fn row_to_version(row: &PgRow) -> Result<CurriculumVersion, StorageError> {
    Ok(CurriculumVersion {
        id: row.try_get("id")?,
        curriculum_id: row.try_get("curriculum_id")?,
        version_number: row.try_get("version_number")?,
        created_by: parse_column("created_by", &row.try_get::<String, _>("created_by")?)?,
        source: parse_column("source", &row.try_get::<String, _>("source")?)?,
        summary: row.try_get("summary")?,
        difficulty_assessment: row.try_get("difficulty_assessment")?,
        notes_for_teacher: row.try_get("notes_for_teacher")?,
        created_at: row.try_get("created_at")?,
        learning_objectives: Vec::new(),
    })
}

pub(crate) fn row_to_objective(row: &PgRow) -> Result<LearningObjective, StorageError> {
    Ok(LearningObjective {
        id: row.try_get("id")?,
        curriculum_version_id: row.try_get("curriculum_version_id")?,
        code: row.try_get("code")?,
        objective_text: row.try_get("objective_text")?,
        skill_type: parse_column("skill_type", &row.try_get::<String, _>("skill_type")?)?,
        assessment_weight: parse_column(
            "assessment_weight",
            &row.try_get::<String, _>("assessment_weight")?,
        )?,
    })
}

/// Loads versions and objectives for the given curricula and attaches them in place.
pub(crate) async fn attach_versions(
    conn: &mut PgConnection,
    curricula: &mut [Curriculum],
) -> Result<(), StorageError> {
    if curricula.is_empty() {
        return Ok(());
    }
    let ids: Vec<i64> = curricula.iter().map(|c| c.id).collect();

    let version_rows = sqlx::query(
        "SELECT id, curriculum_id, version_number, created_by, source, summary,
                difficulty_assessment, notes_for_teacher, created_at
         FROM curriculum_versions
         WHERE curriculum_id = ANY($1)
         ORDER BY curriculum_id, version_number, id",
    )
    .bind(&ids)
    .fetch_all(&mut *conn)
    .await?;
    let mut versions =
        version_rows.iter().map(row_to_version).collect::<Result<Vec<_>, StorageError>>()?;

    let version_ids: Vec<i64> = versions.iter().map(|v| v.id).collect();
    if !version_ids.is_empty() {
        let objective_rows = sqlx::query(
            "SELECT id, curriculum_version_id, code, objective_text, skill_type, assessment_weight
             FROM learning_objectives
             WHERE curriculum_version_id = ANY($1)
             ORDER BY id",
        )
        .bind(&version_ids)
        .fetch_all(&mut *conn)
        .await?;

        let mut by_version: HashMap<i64, Vec<LearningObjective>> = HashMap::new();
        for row in &objective_rows {
            let objective = row_to_objective(row)?;
            by_version.entry(objective.curriculum_version_id).or_default().push(objective);
        }
        for version in &mut versions {
            version.learning_objectives = by_version.remove(&version.id).unwrap_or_default();
        }
    }

    let mut by_curriculum: HashMap<i64, Vec<CurriculumVersion>> = HashMap::new();
    for version in versions {
        by_curriculum.entry(version.curriculum_id).or_default().push(version);
    }
    for curriculum in curricula.iter_mut() {
        curriculum.versions = by_curriculum.remove(&curriculum.id).unwrap_or_default();
    }
    Ok(())
}
