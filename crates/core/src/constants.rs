//! Shared constants for curricula.

/// PostgreSQL connection pool: maximum connections.
pub const PG_POOL_MAX_CONNECTIONS: u32 = 10;

/// PostgreSQL connection pool: acquire timeout in seconds.
pub const PG_POOL_ACQUIRE_TIMEOUT_SECS: u64 = 10;

/// PostgreSQL connection pool: idle timeout in seconds.
pub const PG_POOL_IDLE_TIMEOUT_SECS: u64 = 300;

/// Column limits mirrored from the schema so bad payloads fail as 400, not as a DB error.
pub const SUBJECT_MAX_LEN: usize = 100;
pub const GRADE_MAX_LEN: usize = 20;
pub const CURRICULUM_SYSTEM_MAX_LEN: usize = 100;
pub const OBJECTIVE_CODE_MAX_LEN: usize = 20;
pub const DIFFICULTY_MAX_LEN: usize = 50;

/// Curriculum system recorded when a parse request does not name one.
pub const DEFAULT_CURRICULUM_SYSTEM: &str = "unspecified";

/// Sampling temperature for every model call.
pub const DEFAULT_TEMPERATURE: f32 = 0.2;

/// Upper bound on a single upstream model call.
pub const DEFAULT_LLM_TIMEOUT_SECS: u64 = 120;

/// Default HTTP listen port.
pub const DEFAULT_PORT: u16 = 8000;

/// Environment variable names.
pub const ENV_DATABASE_URL: &str = "DATABASE_URL";
pub const ENV_LLM_ENDPOINT: &str = "AZURE_OPENAI_ENDPOINT";
pub const ENV_LLM_API_KEY: &str = "AZURE_OPENAI_API_KEY";
pub const ENV_LLM_API_VERSION: &str = "AZURE_OPENAI_API_VERSION";
pub const ENV_LLM_DEPLOYMENT: &str = "AZURE_OPENAI_DEPLOYMENT";
pub const ENV_LLM_TEMPERATURE: &str = "CURRICULA_LLM_TEMPERATURE";
pub const ENV_LLM_TIMEOUT_SECS: &str = "CURRICULA_LLM_TIMEOUT_SECS";
