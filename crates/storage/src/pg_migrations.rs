//! PostgreSQL schema migrations for curricula storage.

use sqlx::PgPool;

/// Run all PostgreSQL migrations. Every statement is idempotent.
pub async fn run_pg_migrations(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS curricula (
            id BIGSERIAL PRIMARY KEY,
            subject VARCHAR(100) NOT NULL,
            grade VARCHAR(20) NOT NULL,
            curriculum_system VARCHAR(100) NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_curricula_created ON curricula (created_at DESC)")
        .execute(pool)
        .await?;

    // version_number is unique per curriculum by application convention only
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS curriculum_versions (
            id BIGSERIAL PRIMARY KEY,
            curriculum_id BIGINT NOT NULL REFERENCES curricula (id) ON DELETE CASCADE,
            version_number INTEGER NOT NULL,
            created_by TEXT NOT NULL CHECK (created_by IN ('ai', 'teacher')),
            source TEXT NOT NULL CHECK (source IN ('parse', 'edit', 'regenerate')),
            summary TEXT NOT NULL,
            difficulty_assessment VARCHAR(50),
            notes_for_teacher TEXT,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_versions_curriculum
         ON curriculum_versions (curriculum_id, version_number)",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS learning_objectives (
            id BIGSERIAL PRIMARY KEY,
            curriculum_version_id BIGINT NOT NULL
                REFERENCES curriculum_versions (id) ON DELETE CASCADE,
            code VARCHAR(20) NOT NULL,
            objective_text TEXT NOT NULL,
            skill_type TEXT NOT NULL CHECK (skill_type IN
                ('reading', 'writing', 'listening', 'speaking', 'grammar', 'vocabulary', 'math')),
            assessment_weight TEXT NOT NULL CHECK (assessment_weight IN ('low', 'medium', 'high'))
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_objectives_version
         ON learning_objectives (curriculum_version_id)",
    )
    .execute(pool)
    .await?;

    tracing::debug!("PostgreSQL migrations applied");
    Ok(())
}
