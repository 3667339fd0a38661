//! Storage trait abstraction.

use async_trait::async_trait;
use curricula_core::{Curriculum, CurriculumVersion, NewCurriculum, NewVersion};

use crate::error::StorageError;

/// Create/list/get over the curriculum hierarchy.
///
/// No update or delete is offered; removing a curriculum at the
/// database level cascades to its versions and their objectives.
#[async_trait]
pub trait CurriculumStore: Send + Sync {
    /// Insert a curriculum (and its optional first version) and return it with generated ids.
    async fn create_curriculum(&self, input: NewCurriculum) -> Result<Curriculum, StorageError>;

    /// All curricula, newest first, each with its versions.
    async fn list_curricula(&self) -> Result<Vec<Curriculum>, StorageError>;

    /// Single curriculum with versions and objectives.
    async fn get_curriculum(&self, id: i64) -> Result<Option<Curriculum>, StorageError>;

    /// Append a version numbered one past the current highest.
    async fn add_version(
        &self,
        curriculum_id: i64,
        input: NewVersion,
    ) -> Result<CurriculumVersion, StorageError>;
}
