//! Offline prompt rendering and one-shot parsing from a file.

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use curricula_core::{CurriculumAnalysis, JSON_ONLY_SYSTEM_PROMPT, render_curriculum_prompt};
use curricula_llm::LlmGateway;
use curricula_service::validate_reply;

fn read_curriculum(file: &Path) -> Result<String> {
    let text = if file.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf).context("failed to read stdin")?;
        buf
    } else {
        std::fs::read_to_string(file)
            .with_context(|| format!("failed to read {}", file.display()))?
    };
    anyhow::ensure!(!text.trim().is_empty(), "curriculum text is empty");
    Ok(text)
}

pub(crate) fn render(subject: &str, grade: &str, file: &Path) -> Result<()> {
    let curriculum = read_curriculum(file)?;
    let prompt = render_curriculum_prompt(subject, grade, &curriculum)?;
    println!("{prompt}");
    Ok(())
}

pub(crate) async fn parse(subject: &str, grade: &str, file: &Path) -> Result<()> {
    let curriculum = read_curriculum(file)?;
    let prompt = render_curriculum_prompt(subject, grade, &curriculum)?;
    let raw = LlmGateway::from_env().complete(JSON_ONLY_SYSTEM_PROMPT, &prompt).await?;
    let analysis: CurriculumAnalysis = validate_reply("curriculum analysis", &raw)?;
    println!("{}", serde_json::to_string_pretty(&analysis)?);
    Ok(())
}
