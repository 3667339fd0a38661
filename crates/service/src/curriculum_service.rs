use std::sync::Arc;

use curricula_core::{
    Curriculum, CurriculumAnalysis, CurriculumParseRequest, CurriculumVersion,
    DEFAULT_CURRICULUM_SYSTEM, JSON_ONLY_SYSTEM_PROMPT, NewCurriculum, NewVersion,
    TestDraft, TestGenerateRequest, render_curriculum_prompt, render_test_prompt,
};
use curricula_llm::LlmGateway;
use curricula_storage::{CurriculumStore, StorageBackend};
use serde::Serialize;

use crate::ServiceError;
use crate::validation::validate_reply;

/// Validated analysis, plus the stored curriculum id when it was persisted.
#[derive(Debug, Clone, Serialize)]
pub struct ParseOutcome {
    #[serde(flatten)]
    pub analysis: CurriculumAnalysis,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub curriculum_id: Option<i64>,
}

fn require_text(field: &str, value: &str) -> Result<(), ServiceError> {
    if value.trim().is_empty() {
        return Err(ServiceError::InvalidInput(format!("{field} must not be empty")));
    }
    Ok(())
}

pub struct CurriculumService {
    storage: Arc<StorageBackend>,
    llm: Arc<LlmGateway>,
}

impl CurriculumService {
    #[must_use]
    pub fn new(storage: Arc<StorageBackend>, llm: Arc<LlmGateway>) -> Self {
        Self { storage, llm }
    }

    /// Render → call model → validate, optionally storing the result as version 1.
    pub async fn parse_curriculum(
        &self,
        req: CurriculumParseRequest,
    ) -> Result<ParseOutcome, ServiceError> {
        require_text("subject", &req.subject)?;
        require_text("grade", &req.grade)?;
        require_text("curriculum", &req.curriculum)?;

        // Identity limits are checked before the model call.
        let identity = if req.persist {
            let identity = NewCurriculum {
                subject: req.subject.clone(),
                grade: req.grade.clone(),
                curriculum_system: req
                    .curriculum_system
                    .clone()
                    .filter(|s| !s.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_CURRICULUM_SYSTEM.to_owned()),
                initial_version: None,
            };
            identity.validate().map_err(|e| ServiceError::InvalidInput(e.to_string()))?;
            Some(identity)
        } else {
            None
        };

        let prompt = render_curriculum_prompt(&req.subject, &req.grade, &req.curriculum)
            .map_err(ServiceError::Template)?;
        let raw = self.llm.complete(JSON_ONLY_SYSTEM_PROMPT, &prompt).await?;
        let analysis: CurriculumAnalysis = validate_reply("curriculum analysis", &raw)?;
        tracing::info!(
            subject = %req.subject,
            grade = %req.grade,
            topics = analysis.topics.len(),
            objectives = analysis.learning_objectives.len(),
            "curriculum parsed"
        );

        let Some(identity) = identity else {
            return Ok(ParseOutcome { analysis, curriculum_id: None });
        };

        let input = NewCurriculum {
            initial_version: Some(analysis.to_parsed_version()),
            ..identity
        };
        let stored = self.save_curriculum(input).await?;
        Ok(ParseOutcome { analysis, curriculum_id: Some(stored.id) })
    }

    /// Render → call model → validate a test draft.
    pub async fn generate_test(&self, req: TestGenerateRequest) -> Result<TestDraft, ServiceError> {
        require_text("subject", &req.subject)?;
        require_text("grade", &req.grade)?;
        require_text("purpose", &req.purpose)?;
        if req.duration_minutes == 0 {
            return Err(ServiceError::InvalidInput(
                "duration_minutes must be greater than zero".to_owned(),
            ));
        }
        if req.learning_objectives.iter().all(|o| o.trim().is_empty()) {
            return Err(ServiceError::InvalidInput(
                "learning_objectives must contain at least one objective".to_owned(),
            ));
        }

        let prompt = render_test_prompt(&req).map_err(ServiceError::Template)?;
        let raw = self.llm.complete(JSON_ONLY_SYSTEM_PROMPT, &prompt).await?;
        let draft: TestDraft = validate_reply("test draft", &raw)?;
        tracing::info!(
            subject = %req.subject,
            questions = draft.questions.len(),
            "test draft generated"
        );
        Ok(draft)
    }

    pub async fn save_curriculum(&self, input: NewCurriculum) -> Result<Curriculum, ServiceError> {
        input.validate().map_err(|e| ServiceError::InvalidInput(e.to_string()))?;
        let curriculum = self.storage.create_curriculum(input).await?;
        tracing::info!(id = curriculum.id, subject = %curriculum.subject, "curriculum saved");
        Ok(curriculum)
    }

    pub async fn list_curricula(&self) -> Result<Vec<Curriculum>, ServiceError> {
        Ok(self.storage.list_curricula().await?)
    }

    pub async fn get_curriculum(&self, id: i64) -> Result<Option<Curriculum>, ServiceError> {
        Ok(self.storage.get_curriculum(id).await?)
    }

    pub async fn add_version(
        &self,
        curriculum_id: i64,
        input: NewVersion,
    ) -> Result<CurriculumVersion, ServiceError> {
        input.validate().map_err(|e| ServiceError::InvalidInput(e.to_string()))?;
        let version = self.storage.add_version(curriculum_id, input).await?;
        tracing::info!(
            curriculum_id,
            version_number = version.version_number,
            source = version.source.as_str(),
            "curriculum version added"
        );
        Ok(version)
    }
}
