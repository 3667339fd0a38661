//! CurriculumStore implementation for PgStorage.

use super::*;

use crate::traits::CurriculumStore;
use async_trait::async_trait;
use curricula_core::{NewCurriculum, NewObjective, NewVersion};

async fn insert_version(
    conn: &mut PgConnection,
    curriculum_id: i64,
    version_number: i32,
    input: &NewVersion,
) -> Result<CurriculumVersion, StorageError> {
    let row = sqlx::query(
        "INSERT INTO curriculum_versions
             (curriculum_id, version_number, created_by, source, summary,
              difficulty_assessment, notes_for_teacher)
         VALUES ($1, $2, $3, $4, $5, $6, $7)
         RETURNING id, curriculum_id, version_number, created_by, source, summary,
                   difficulty_assessment, notes_for_teacher, created_at",
    )
    .bind(curriculum_id)
    .bind(version_number)
    .bind(input.created_by.as_str())
    .bind(input.source.as_str())
    .bind(&input.summary)
    .bind(input.difficulty_assessment.as_deref())
    .bind(input.notes_for_teacher.as_deref())
    .fetch_one(&mut *conn)
    .await?;
    let mut version = row_to_version(&row)?;

    for objective in &input.learning_objectives {
        version.learning_objectives.push(insert_objective(conn, version.id, objective).await?);
    }
    Ok(version)
}

async fn insert_objective(
    conn: &mut PgConnection,
    version_id: i64,
    input: &NewObjective,
) -> Result<LearningObjective, StorageError> {
    let row = sqlx::query(
        "INSERT INTO learning_objectives
             (curriculum_version_id, code, objective_text, skill_type, assessment_weight)
         VALUES ($1, $2, $3, $4, $5)
         RETURNING id, curriculum_version_id, code, objective_text, skill_type, assessment_weight",
    )
    .bind(version_id)
    .bind(&input.code)
    .bind(&input.objective_text)
    .bind(input.skill_type.as_str())
    .bind(input.assessment_weight.as_str())
    .fetch_one(&mut *conn)
    .await?;
    row_to_objective(&row)
}

#[async_trait]
impl CurriculumStore for PgStorage {
    async fn create_curriculum(&self, input: NewCurriculum) -> Result<Curriculum, StorageError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query(
            "INSERT INTO curricula (subject, grade, curriculum_system)
             VALUES ($1, $2, $3)
             RETURNING id, subject, grade, curriculum_system, created_at",
        )
        .bind(&input.subject)
        .bind(&input.grade)
        .bind(&input.curriculum_system)
        .fetch_one(&mut *tx)
        .await?;
        let mut curriculum = row_to_curriculum(&row)?;

        if let Some(version) = &input.initial_version {
            curriculum.versions.push(insert_version(&mut *tx, curriculum.id, 1, version).await?);
        }

        tx.commit().await?;
        tracing::debug!(
            id = curriculum.id,
            versions = curriculum.versions.len(),
            "curriculum created"
        );
        Ok(curriculum)
    }

    async fn list_curricula(&self) -> Result<Vec<Curriculum>, StorageError> {
        let mut conn = self.pool.acquire().await?;
        let rows = sqlx::query(
            "SELECT id, subject, grade, curriculum_system, created_at
             FROM curricula
             ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(&mut *conn)
        .await?;
        let mut curricula =
            rows.iter().map(row_to_curriculum).collect::<Result<Vec<_>, StorageError>>()?;
        attach_versions(&mut *conn, &mut curricula).await?;
        Ok(curricula)
    }

    async fn get_curriculum(&self, id: i64) -> Result<Option<Curriculum>, StorageError> {
        let mut conn = self.pool.acquire().await?;
        let row = sqlx::query(
            "SELECT id, subject, grade, curriculum_system, created_at
             FROM curricula WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;
        let Some(row) = row else {
            return Ok(None);
        };
        let mut found = [row_to_curriculum(&row)?];
        attach_versions(&mut *conn, &mut found).await?;
        let [curriculum] = found;
        Ok(Some(curriculum))
    }

    async fn add_version(
        &self,
        curriculum_id: i64,
        input: NewVersion,
    ) -> Result<CurriculumVersion, StorageError> {
        let mut tx = self.pool.begin().await?;

        // Row lock serializes concurrent numbering for the same curriculum.
        let exists: Option<i64> =
            sqlx::query_scalar("SELECT id FROM curricula WHERE id = $1 FOR UPDATE")
                .bind(curriculum_id)
                .fetch_optional(&mut *tx)
                .await?;
        if exists.is_none() {
            return Err(StorageError::NotFound {
                entity: "curriculum",
                id: curriculum_id.to_string(),
            });
        }

        let next: i32 = sqlx::query_scalar(
            "SELECT COALESCE(MAX(version_number), 0) + 1
             FROM curriculum_versions WHERE curriculum_id = $1",
        )
        .bind(curriculum_id)
        .fetch_one(&mut *tx)
        .await?;

        let version = insert_version(&mut *tx, curriculum_id, next, &input).await?;
        tx.commit().await?;
        tracing::debug!(curriculum_id, version_number = next, "curriculum version added");
        Ok(version)
    }
}
