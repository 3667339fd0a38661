//! Fixed prompt templates and placeholder rendering.
//!
//! Placeholders are written `{name}` and must be declared on the template.
//! Any other brace sequence (the JSON shape shown to the model, for example)
//! is copied through untouched. Rendering is a single left-to-right pass, so
//! a substituted value is never scanned again: a curriculum that itself
//! contains `{grade}` stays literal.

use crate::error::CoreError;
use crate::input::TestGenerateRequest;

/// System message sent with every request.
pub const JSON_ONLY_SYSTEM_PROMPT: &str =
    "You are an assistant for teachers. Reply with a single valid JSON object and nothing else: \
     no markdown, no code fences, no commentary.";

#[derive(Debug, Clone, Copy)]
pub struct PromptTemplate {
    pub name: &'static str,
    pub placeholders: &'static [&'static str],
    text: &'static str,
}

pub const CURRICULUM_PARSE: PromptTemplate = PromptTemplate {
    name: "curriculum_parse",
    placeholders: &["subject", "grade", "curriculum"],
    text: r#"You are analysing a school curriculum so that a teacher can plan assessments.

Subject: {subject}
Grade: {grade}

Curriculum:
"""
{curriculum}
"""

Return JSON with exactly these fields:
- summary: 2-4 sentence overview of what the curriculum covers
- topics: array of objects, e.g. {"name": "...", "description": "..."}
- learning_objectives: array of objects, e.g. {"code": "LO1", "objective": "...", "skill_type": "reading|writing|listening|speaking|grammar|vocabulary|math", "assessment_weight": "low|medium|high"}
- difficulty_assessment: one short phrase describing overall difficulty for this grade
- notes_for_teacher: practical advice for teaching and assessing this material"#,
};

pub const TEST_GENERATE: PromptTemplate = PromptTemplate {
    name: "test_generate",
    placeholders: &[
        "subject",
        "grade",
        "purpose",
        "duration_minutes",
        "difficulty_mix",
        "learning_objectives",
    ],
    text: r#"You are writing a classroom test.

Subject: {subject}
Grade: {grade}
Purpose: {purpose}
Duration: {duration_minutes} minutes
Difficulty mix: {difficulty_mix}

Learning objectives to cover:
{learning_objectives}

Return JSON with exactly these fields:
- title: test title
- duration_minutes: integer, the intended duration
- questions: array of objects, e.g. {"number": 1, "objective": "LO1", "difficulty": "easy", "type": "multiple_choice", "prompt": "...", "options": ["..."], "points": 2}
- answer_key: array of objects, e.g. {"number": 1, "answer": "...", "explanation": "..."}
- notes_for_teacher: guidance on administering and marking the test"#,
};

impl PromptTemplate {
    /// Substitutes every declared placeholder.
    ///
    /// # Errors
    /// Returns `CoreError::MissingPlaceholder` if a declared placeholder has no value.
    pub fn render(&self, values: &[(&str, &str)]) -> Result<String, CoreError> {
        for placeholder in self.placeholders {
            if !values.iter().any(|(k, _)| k == placeholder) {
                return Err(CoreError::MissingPlaceholder {
                    template: self.name,
                    placeholder: *placeholder,
                });
            }
        }

        let value_len: usize = values.iter().map(|(_, v)| v.len()).sum();
        let mut out = String::with_capacity(self.text.len().saturating_add(value_len));
        let mut rest = self.text;
        while let Some(open) = rest.find('{') {
            let (before, tail) = rest.split_at(open);
            out.push_str(before);
            match self.placeholder_at(tail) {
                Some((token_len, name)) => {
                    let value = values.iter().find(|(k, _)| *k == name).map_or("", |(_, v)| *v);
                    out.push_str(value);
                    rest = tail.get(token_len..).unwrap_or("");
                },
                None => {
                    out.push('{');
                    rest = tail.get(1..).unwrap_or("");
                },
            }
        }
        out.push_str(rest);
        Ok(out)
    }

    /// If `tail` starts with `{name}` for a declared name, returns the token length and the name.
    fn placeholder_at(&self, tail: &str) -> Option<(usize, &'static str)> {
        let close = tail.find('}')?;
        let candidate = tail.get(1..close)?;
        self.placeholders
            .iter()
            .find(|p| **p == candidate)
            .map(|p| (close.saturating_add(1), *p))
    }
}

/// Renders the curriculum-parse prompt.
pub fn render_curriculum_prompt(
    subject: &str,
    grade: &str,
    curriculum: &str,
) -> Result<String, CoreError> {
    CURRICULUM_PARSE.render(&[("subject", subject), ("grade", grade), ("curriculum", curriculum)])
}

/// Renders the test-generation prompt.
pub fn render_test_prompt(req: &TestGenerateRequest) -> Result<String, CoreError> {
    let duration = req.duration_minutes.to_string();
    let mix = req.difficulty_mix_line();
    let objectives = req.objectives_block();
    TEST_GENERATE.render(&[
        ("subject", req.subject.as_str()),
        ("grade", req.grade.as_str()),
        ("purpose", req.purpose.as_str()),
        ("duration_minutes", duration.as_str()),
        ("difficulty_mix", mix.as_str()),
        ("learning_objectives", objectives.as_str()),
    ])
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn assert_no_placeholders(template: &PromptTemplate, rendered: &str) {
        for p in template.placeholders {
            assert!(!rendered.contains(&format!("{{{p}}}")), "{p} left in output");
        }
    }

    #[test]
    fn test_curriculum_prompt_substitutes_all() {
        let out = render_curriculum_prompt("English", "7", "Reading short stories").unwrap();
        assert!(out.contains("Subject: English"));
        assert!(out.contains("Grade: 7"));
        assert!(out.contains("Reading short stories"));
        assert_no_placeholders(&CURRICULUM_PARSE, &out);
    }

    #[test]
    fn test_json_examples_survive_rendering() {
        let out = render_curriculum_prompt("Math", "5", "Fractions").unwrap();
        assert!(out.contains(r#"{"name": "...", "description": "..."}"#));
    }

    #[test]
    fn test_each_placeholder_substituted_once() {
        let out = render_curriculum_prompt("Math", "5", "Fractions").unwrap();
        assert_eq!(out.matches("Math").count(), 1);
        assert_eq!(out.matches("Fractions").count(), 1);
    }

    #[test]
    fn test_user_content_is_not_rescanned() {
        let out = render_curriculum_prompt("Math", "5", "Teach {grade} and {subject}").unwrap();
        assert!(out.contains("Teach {grade} and {subject}"));
        assert_eq!(out.matches("Grade: 5").count(), 1);
    }

    #[test]
    fn test_missing_value_is_error() {
        let err = CURRICULUM_PARSE.render(&[("subject", "Math"), ("grade", "5")]).unwrap_err();
        assert_eq!(
            err,
            CoreError::MissingPlaceholder { template: "curriculum_parse", placeholder: "curriculum" }
        );
    }

    #[test]
    fn test_unclosed_brace_in_value_is_kept() {
        let out = render_curriculum_prompt("Math {", "5", "}").unwrap();
        assert!(out.contains("Subject: Math {"));
    }

    #[test]
    fn test_test_prompt_renders_lists() {
        let req = TestGenerateRequest {
            subject: "English".to_owned(),
            grade: "7".to_owned(),
            purpose: "end of unit".to_owned(),
            duration_minutes: 45,
            difficulty_mix: BTreeMap::from([("easy".to_owned(), 60), ("hard".to_owned(), 40)]),
            learning_objectives: vec!["LO1 main idea".to_owned(), "LO2 past simple".to_owned()],
        };
        let out = render_test_prompt(&req).unwrap();
        assert!(out.contains("Duration: 45 minutes"));
        assert!(out.contains("Difficulty mix: easy: 60%, hard: 40%"));
        assert!(out.contains("- LO1 main idea\n- LO2 past simple"));
        assert_no_placeholders(&TEST_GENERATE, &out);
    }
}
