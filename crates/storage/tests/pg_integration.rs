//! Integration tests for PgStorage.
//! Run with: DATABASE_URL=... cargo test -p curricula-storage -- --ignored pg_

#![allow(clippy::unwrap_used, reason = "integration test code")]

use curricula_core::{
    AssessmentWeight, CreatedBy, NewCurriculum, NewObjective, NewVersion, SkillType, VersionSource,
};
use curricula_storage::{CurriculumStore, PgStorage, StorageError};
use uuid::Uuid;

async fn create_pg_storage() -> PgStorage {
    let url = std::env::var("DATABASE_URL")
        .expect("DATABASE_URL must be set for PgStorage integration tests");
    PgStorage::new(&url).await.expect("Failed to connect to PostgreSQL")
}

fn unique_subject() -> String {
    format!("subj-{}", &Uuid::new_v4().simple().to_string()[..12])
}

fn make_curriculum(subject: &str, initial: Option<NewVersion>) -> NewCurriculum {
    NewCurriculum {
        subject: subject.to_owned(),
        grade: "7".to_owned(),
        curriculum_system: "Cambridge".to_owned(),
        initial_version: initial,
    }
}

fn make_version(summary: &str) -> NewVersion {
    NewVersion {
        created_by: CreatedBy::Ai,
        source: VersionSource::Parse,
        summary: summary.to_owned(),
        difficulty_assessment: Some("moderate".to_owned()),
        notes_for_teacher: None,
        learning_objectives: vec![
            NewObjective {
                code: "LO1".to_owned(),
                objective_text: "Identify the main idea".to_owned(),
                skill_type: SkillType::Reading,
                assessment_weight: AssessmentWeight::High,
            },
            NewObjective {
                code: "LO2".to_owned(),
                objective_text: "Use the past simple".to_owned(),
                skill_type: SkillType::Grammar,
                assessment_weight: AssessmentWeight::Low,
            },
        ],
    }
}

#[tokio::test]
#[ignore]
async fn pg_create_then_get_round_trips_hierarchy() {
    let storage = create_pg_storage().await;
    let subject = unique_subject();

    let created = storage
        .create_curriculum(make_curriculum(&subject, Some(make_version("Short stories"))))
        .await
        .unwrap();
    assert!(created.id > 0);
    assert_eq!(created.versions.len(), 1);
    assert_eq!(created.versions[0].version_number, 1);
    assert_eq!(created.versions[0].learning_objectives.len(), 2);

    let fetched = storage.get_curriculum(created.id).await.unwrap().unwrap();
    assert_eq!(fetched.subject, subject);
    assert_eq!(fetched.grade, "7");
    assert_eq!(fetched.curriculum_system, "Cambridge");
    assert_eq!(fetched.versions.len(), 1);
    let version = &fetched.versions[0];
    assert_eq!(version.created_by, CreatedBy::Ai);
    assert_eq!(version.source, VersionSource::Parse);
    assert_eq!(version.difficulty_assessment.as_deref(), Some("moderate"));
    let codes: Vec<&str> = version.learning_objectives.iter().map(|o| o.code.as_str()).collect();
    assert_eq!(codes, vec!["LO1", "LO2"]);
    assert_eq!(version.learning_objectives[1].skill_type, SkillType::Grammar);
}

#[tokio::test]
#[ignore]
async fn pg_list_is_newest_first() {
    let storage = create_pg_storage().await;
    let older = storage.create_curriculum(make_curriculum(&unique_subject(), None)).await.unwrap();
    let newer = storage.create_curriculum(make_curriculum(&unique_subject(), None)).await.unwrap();

    let listed = storage.list_curricula().await.unwrap();
    let pos_newer = listed.iter().position(|c| c.id == newer.id).unwrap();
    let pos_older = listed.iter().position(|c| c.id == older.id).unwrap();
    assert!(pos_newer < pos_older, "newer curriculum must be listed first");
}

#[tokio::test]
#[ignore]
async fn pg_get_missing_is_none() {
    let storage = create_pg_storage().await;
    assert!(storage.get_curriculum(i64::MAX).await.unwrap().is_none());
}

#[tokio::test]
#[ignore]
async fn pg_add_version_numbers_sequentially() {
    let storage = create_pg_storage().await;
    let created = storage
        .create_curriculum(make_curriculum(&unique_subject(), Some(make_version("v1"))))
        .await
        .unwrap();

    let v2 = storage.add_version(created.id, make_version("v2")).await.unwrap();
    let v3 = storage.add_version(created.id, make_version("v3")).await.unwrap();
    assert_eq!(v2.version_number, 2);
    assert_eq!(v3.version_number, 3);

    let fetched = storage.get_curriculum(created.id).await.unwrap().unwrap();
    let summaries: Vec<&str> = fetched.versions.iter().map(|v| v.summary.as_str()).collect();
    assert_eq!(summaries, vec!["v1", "v2", "v3"]);
}

#[tokio::test]
#[ignore]
async fn pg_add_version_unknown_curriculum() {
    let storage = create_pg_storage().await;
    let err = storage.add_version(i64::MAX, make_version("orphan")).await.unwrap_err();
    assert!(matches!(err, StorageError::NotFound { entity: "curriculum", .. }));
}

#[tokio::test]
#[ignore]
async fn pg_overlong_grade_is_constraint_error() {
    let storage = create_pg_storage().await;
    let mut input = make_curriculum(&unique_subject(), None);
    input.grade = "g".repeat(40);
    let err = storage.create_curriculum(input).await.unwrap_err();
    assert!(matches!(err, StorageError::Constraint(_)));
}

#[tokio::test]
#[ignore]
async fn pg_delete_cascades_to_versions_and_objectives() {
    let storage = create_pg_storage().await;
    let created = storage
        .create_curriculum(make_curriculum(&unique_subject(), Some(make_version("cascade"))))
        .await
        .unwrap();
    let version_id = created.versions[0].id;

    sqlx::query("DELETE FROM curricula WHERE id = $1")
        .bind(created.id)
        .execute(storage.pool())
        .await
        .unwrap();

    let versions: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM curriculum_versions WHERE curriculum_id = $1")
            .bind(created.id)
            .fetch_one(storage.pool())
            .await
            .unwrap();
    let objectives: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM learning_objectives WHERE curriculum_version_id = $1",
    )
    .bind(version_id)
    .fetch_one(storage.pool())
    .await
    .unwrap();
    assert_eq!(versions, 0);
    assert_eq!(objectives, 0);
}
