//! Result types returned to callers, plus the repair rules applied to
//! provider output before it is trusted.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

/// Upper bound on `priority_missing_skills`; the prompt asks for the top 2-3.
pub const MAX_PRIORITY_SKILLS: usize = 3;

/// Output of the general ATS check (no job description).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneralAnalysis {
    #[serde(deserialize_with = "deserialize_score")]
    pub ats_score: u8,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub weaknesses: Vec<String>,
    #[serde(default)]
    pub missing_best_practices: Vec<String>,
    #[serde(default)]
    pub improvement_guidance: Vec<String>,
    #[serde(default)]
    pub quantified_achievement_suggestions: Vec<String>,
    #[serde(default)]
    pub ats_friendly_rewrite: String,
}

/// Output of the job-description-tailored optimizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TailoredAnalysis {
    #[serde(deserialize_with = "deserialize_score")]
    pub match_score: u8,
    #[serde(default)]
    pub matched_keywords: Vec<String>,
    #[serde(default)]
    pub missing_keywords: Vec<String>,
    #[serde(default)]
    pub priority_missing_skills: Vec<String>,
    #[serde(default)]
    pub tailored_summary: String,
    #[serde(default)]
    pub optimized_resume: String,
    #[serde(default)]
    pub keyword_density_analysis: Vec<String>,
    #[serde(default)]
    pub resume_data: ResumeDocument,
}

/// Structured resume content rendered and edited client-side.
///
/// No `objective` field; `summary` covers it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResumeDocument {
    pub name: String,
    pub title: String,
    pub phone: String,
    pub email: String,
    pub location: String,
    pub linkedin: String,
    pub github: String,
    pub summary: String,
    pub skills: Vec<String>,
    pub experience: Vec<ExperienceItem>,
    pub education: Vec<EducationItem>,
    pub projects: Vec<ProjectItem>,
    pub references: Vec<String>,
    pub cover_letter: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperienceItem {
    pub title: String,
    pub company: String,
    pub dates: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EducationItem {
    pub degree: String,
    pub school: String,
    pub dates: String,
    pub details: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectItem {
    pub name: String,
    pub description: String,
    pub technologies: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Provider output validation
// ────────────────────────────────────────────────────────────────────────────

/// A result shape the provider gateway can parse out of raw model text.
///
/// Shape violations (missing or non-numeric score, wrong JSON types) are
/// rejected by deserialization; `normalize` then repairs what is left.
pub trait AnalysisOutput: DeserializeOwned + Send + Sized {
    fn normalize(self) -> Self;
}

impl AnalysisOutput for GeneralAnalysis {
    fn normalize(mut self) -> Self {
        for list in [
            &mut self.strengths,
            &mut self.weaknesses,
            &mut self.missing_best_practices,
            &mut self.improvement_guidance,
            &mut self.quantified_achievement_suggestions,
        ] {
            drop_blank(list);
        }
        self
    }
}

impl AnalysisOutput for TailoredAnalysis {
    fn normalize(mut self) -> Self {
        for list in [
            &mut self.matched_keywords,
            &mut self.missing_keywords,
            &mut self.priority_missing_skills,
            &mut self.keyword_density_analysis,
            &mut self.resume_data.skills,
            &mut self.resume_data.references,
        ] {
            drop_blank(list);
        }
        self.priority_missing_skills.truncate(MAX_PRIORITY_SKILLS);
        self
    }
}

fn drop_blank(list: &mut Vec<String>) {
    list.retain(|item| !item.trim().is_empty());
}

/// Accepts a score as an integer, a float, or a numeric string (optionally
/// suffixed with `%`), and clamps it into 0-100.
fn deserialize_score<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    let value = serde_json::Value::deserialize(deserializer)?;
    let raw = match &value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().trim_end_matches('%').trim().parse::<f64>().ok(),
        _ => None,
    };

    match raw {
        Some(score) if score.is_finite() => Ok(score.round().clamp(0.0, 100.0) as u8),
        _ => Err(D::Error::custom(format!("score is not a number: {value}"))),
    }
}
