pub(crate) mod migrate;
pub(crate) mod prompt;
pub(crate) mod serve;

use anyhow::{Context, Result};
use curricula_core::{ENV_DATABASE_URL, env_non_empty};

pub(crate) fn database_url() -> Result<String> {
    env_non_empty(ENV_DATABASE_URL).with_context(|| format!("{ENV_DATABASE_URL} must be set"))
}
