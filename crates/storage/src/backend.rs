//! Unified storage backend with enum dispatch.

use async_trait::async_trait;
use curricula_core::{Curriculum, CurriculumVersion, NewCurriculum, NewVersion};

use crate::error::StorageError;
use crate::traits::CurriculumStore;

macro_rules! dispatch {
    ($self:expr, $trait:path, $method:ident ( $($arg:expr),* $(,)? )) => {
        match $self {
            StorageBackend::Postgres(s) => <crate::pg_storage::PgStorage as $trait>::$method(s, $($arg),*).await,
            #[cfg(any(test, feature = "memory"))]
            StorageBackend::Memory(s) => <crate::memory::MemoryStorage as $trait>::$method(s, $($arg),*).await,
        }
    };
}

#[derive(Debug)]
pub enum StorageBackend {
    Postgres(crate::pg_storage::PgStorage),
    #[cfg(any(test, feature = "memory"))]
    Memory(crate::memory::MemoryStorage),
}

impl StorageBackend {
    pub async fn new_postgres(database_url: &str) -> Result<Self, StorageError> {
        Ok(Self::Postgres(crate::pg_storage::PgStorage::new(database_url).await?))
    }

    #[cfg(any(test, feature = "memory"))]
    #[must_use]
    pub fn new_memory() -> Self {
        Self::Memory(crate::memory::MemoryStorage::new())
    }

    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Postgres(_) => "postgres",
            #[cfg(any(test, feature = "memory"))]
            Self::Memory(_) => "memory",
        }
    }
}

#[async_trait]
impl CurriculumStore for StorageBackend {
    async fn create_curriculum(&self, input: NewCurriculum) -> Result<Curriculum, StorageError> {
        dispatch!(self, CurriculumStore, create_curriculum(input))
    }

    async fn list_curricula(&self) -> Result<Vec<Curriculum>, StorageError> {
        dispatch!(self, CurriculumStore, list_curricula())
    }

    async fn get_curriculum(&self, id: i64) -> Result<Option<Curriculum>, StorageError> {
        dispatch!(self, CurriculumStore, get_curriculum(id))
    }

    async fn add_version(
        &self,
        curriculum_id: i64,
        input: NewVersion,
    ) -> Result<CurriculumVersion, StorageError> {
        dispatch!(self, CurriculumStore, add_version(curriculum_id, input))
    }
}
