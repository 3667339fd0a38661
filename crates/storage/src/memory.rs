//! In-process backend for tests and local runs without PostgreSQL.
//!
//! Mirrors the PostgreSQL ordering rules: curricula newest first with id as
//! tiebreak, versions by version number, objectives by insertion.

use async_trait::async_trait;
use chrono::Utc;
use curricula_core::{
    Curriculum, CurriculumVersion, LearningObjective, NewCurriculum, NewVersion,
};
use tokio::sync::RwLock;

use crate::error::StorageError;
use crate::traits::CurriculumStore;

#[derive(Debug, Default)]
struct Tables {
    curricula: Vec<Curriculum>,
    next_curriculum_id: i64,
    next_version_id: i64,
    next_objective_id: i64,
}

impl Tables {
    fn next_id(counter: &mut i64) -> i64 {
        *counter = counter.saturating_add(1);
        *counter
    }

    fn build_version(
        &mut self,
        curriculum_id: i64,
        version_number: i32,
        input: NewVersion,
    ) -> CurriculumVersion {
        let id = Self::next_id(&mut self.next_version_id);
        let learning_objectives = input
            .learning_objectives
            .into_iter()
            .map(|o| LearningObjective {
                id: Self::next_id(&mut self.next_objective_id),
                curriculum_version_id: id,
                code: o.code,
                objective_text: o.objective_text,
                skill_type: o.skill_type,
                assessment_weight: o.assessment_weight,
            })
            .collect();
        CurriculumVersion {
            id,
            curriculum_id,
            version_number,
            created_by: input.created_by,
            source: input.source,
            summary: input.summary,
            difficulty_assessment: input.difficulty_assessment,
            notes_for_teacher: input.notes_for_teacher,
            created_at: Utc::now(),
            learning_objectives,
        }
    }
}

#[derive(Debug, Default)]
pub struct MemoryStorage {
    tables: RwLock<Tables>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CurriculumStore for MemoryStorage {
    async fn create_curriculum(&self, input: NewCurriculum) -> Result<Curriculum, StorageError> {
        let mut tables = self.tables.write().await;
        let id = Tables::next_id(&mut tables.next_curriculum_id);
        let versions = match input.initial_version {
            Some(version) => vec![tables.build_version(id, 1, version)],
            None => Vec::new(),
        };
        let curriculum = Curriculum {
            id,
            subject: input.subject,
            grade: input.grade,
            curriculum_system: input.curriculum_system,
            created_at: Utc::now(),
            versions,
        };
        tables.curricula.push(curriculum.clone());
        Ok(curriculum)
    }

    async fn list_curricula(&self) -> Result<Vec<Curriculum>, StorageError> {
        let tables = self.tables.read().await;
        let mut out = tables.curricula.clone();
        out.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(out)
    }

    async fn get_curriculum(&self, id: i64) -> Result<Option<Curriculum>, StorageError> {
        let tables = self.tables.read().await;
        Ok(tables.curricula.iter().find(|c| c.id == id).cloned())
    }

    async fn add_version(
        &self,
        curriculum_id: i64,
        input: NewVersion,
    ) -> Result<CurriculumVersion, StorageError> {
        let mut tables = self.tables.write().await;
        let next = tables
            .curricula
            .iter()
            .find(|c| c.id == curriculum_id)
            .map(|c| c.versions.iter().map(|v| v.version_number).max().unwrap_or(0))
            .ok_or_else(|| StorageError::NotFound {
                entity: "curriculum",
                id: curriculum_id.to_string(),
            })?
            .saturating_add(1);
        let version = tables.build_version(curriculum_id, next, input);
        if let Some(curriculum) = tables.curricula.iter_mut().find(|c| c.id == curriculum_id) {
            curriculum.versions.push(version.clone());
        }
        Ok(version)
    }
}
