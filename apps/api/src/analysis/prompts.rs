// Prompt templates and the pure builder for both analysis modes.
// Templates are constants so the same inputs always yield byte-identical prompts.

use crate::analysis::{AnalysisError, AnalysisMode, MSG_JOB_DESCRIPTION_REQUIRED};

/// System prompt for the general ATS check.
pub const GENERAL_SYSTEM: &str = r#"You are an expert Applicant Tracking System (ATS) evaluator and career coach.
Analyze the provided resume text and return ONLY a JSON object evaluating its general ATS-readiness.

1. Evaluate formatting, keyword usage, measurable achievements, and missing sections.
2. Suggest quantified achievements the candidate could add.
3. Rewrite the resume text into a clean, highly ATS-compatible format suitable for plain text rendering.

Return ONLY a JSON object matching this schema:
{schema}"#;

/// System prompt for the job-description-tailored optimizer.
pub const TAILORED_SYSTEM: &str = r#"You are an expert ATS optimizer.
Compare the applicant's resume against the target Job Description.

1. Perform keyword gap analysis (extract technical/soft skills from JD, find what's missing in resume).
2. Calculate a realistic ATS match percentage.
3. Write a tailored professional summary for this role.
4. Rewrite the resume to be fully optimized for this JD, ensuring keywords are inserted naturally.
5. Also extract structural "resume_data" to render the optimized resume in visual templates. Ensure you extract education, and references if they exist. Do NOT include an objective.

Return ONLY a JSON object matching this schema:
{schema}"#;

const GENERAL_SCHEMA: &str = r#"{
  "ats_score": number (0-100),
  "strengths": string[],
  "weaknesses": string[],
  "missing_best_practices": string[],
  "improvement_guidance": string[],
  "quantified_achievement_suggestions": string[],
  "ats_friendly_rewrite": string
}"#;

const TAILORED_SCHEMA: &str = r#"{
  "match_score": number (0-100),
  "matched_keywords": string[],
  "missing_keywords": string[], // CRITICAL: You must explicitly list important technical and soft skills present in the JD but completely missing in the resume text.
  "priority_missing_skills": string[], // CRITICAL: Top 2-3 most fatal missing skills that the candidate must add to pass ATS.
  "tailored_summary": string,
  "optimized_resume": string,
  "keyword_density_analysis": string[],
  "resume_data": {
    "name": string,
    "title": string,
    "phone": string,
    "email": string,
    "location": string,
    "linkedin": string,
    "github": string,
    "summary": string,
    "skills": string[],
    "experience": [{"title":string, "company":string, "dates":string, "description":string}],
    "education": [{"degree":string, "school":string, "dates":string, "details":string}],
    "projects": [{"name":string, "description":string, "technologies":string[]}],
    "references": string[],
    "cover_letter": string
  }
}"#;

/// Which output contract a prompt asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaKind {
    General,
    Tailored,
}

impl SchemaKind {
    /// The schema text embedded in the system prompt.
    pub fn describe(self) -> &'static str {
        match self {
            SchemaKind::General => GENERAL_SCHEMA,
            SchemaKind::Tailored => TAILORED_SCHEMA,
        }
    }
}

/// A fully built system/user instruction pair for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptPair {
    pub system_instruction: String,
    pub user_content: String,
    pub schema: SchemaKind,
}

impl PromptPair {
    /// System and user text joined into one block, for providers without a
    /// separate system role for the task.
    pub fn combined(&self) -> String {
        format!("{}\n\n{}", self.system_instruction, self.user_content)
    }
}

/// Builds the prompt pair for `mode`.
///
/// General mode must not carry a job description; tailored mode requires a
/// non-blank one.
pub fn build_prompt(
    mode: AnalysisMode,
    resume_text: &str,
    job_description: Option<&str>,
) -> Result<PromptPair, AnalysisError> {
    match (mode, job_description) {
        (AnalysisMode::General, None) => Ok(PromptPair {
            system_instruction: GENERAL_SYSTEM.replace("{schema}", SchemaKind::General.describe()),
            user_content: format!("Resume Text:\n\"\"\"{resume_text}\"\"\""),
            schema: SchemaKind::General,
        }),
        (AnalysisMode::General, Some(_)) => Err(AnalysisError::InvalidInput(
            "General analysis does not take a job description.".to_string(),
        )),
        (AnalysisMode::Tailored, Some(jd)) if !jd.trim().is_empty() => Ok(PromptPair {
            system_instruction: TAILORED_SYSTEM.replace("{schema}", SchemaKind::Tailored.describe()),
            user_content: format!(
                "Resume Text:\n\"\"\"{resume_text}\"\"\"\n\nJob Description:\n\"\"\"{jd}\"\"\""
            ),
            schema: SchemaKind::Tailored,
        }),
        (AnalysisMode::Tailored, _) => Err(AnalysisError::InvalidInput(
            MSG_JOB_DESCRIPTION_REQUIRED.to_string(),
        )),
    }
}
