//! Mock Responder: fixed, schema-valid payloads served when no provider
//! credentials are configured, so the UI can be exercised end to end.

use crate::analysis::models::{
    EducationItem, ExperienceItem, GeneralAnalysis, ProjectItem, ResumeDocument, TailoredAnalysis,
};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub fn mock_general() -> GeneralAnalysis {
    GeneralAnalysis {
        ats_score: 75,
        strengths: strings(&["Strong action verbs", "Clear formatting", "Good summary"]),
        weaknesses: strings(&["Lacks quantified achievements", "Missing some buzzwords"]),
        missing_best_practices: strings(&[
            "Links to GitHub/Portfolio missing",
            "Dates not consistent",
        ]),
        improvement_guidance: strings(&[
            "Add more numbers to highlight your impact.",
            "Tailor specific skills to the job description.",
        ]),
        quantified_achievement_suggestions: strings(&[
            "Increased sales by X%",
            "Managed team of Y people",
            "Reduced load time by Z seconds",
        ]),
        ats_friendly_rewrite: "This is a mocked ATS-friendly rewrite of your resume.\n\n\
            [MOCK MODE ACTIVE] Please provide a valid OPENAI_API_KEY or GEMINI_API_KEY in the \
            backend .env file to see genuine AI-generated results for your resume."
            .to_string(),
    }
}

pub fn mock_tailored() -> TailoredAnalysis {
    TailoredAnalysis {
        match_score: 82,
        matched_keywords: strings(&["JavaScript", "React", "Node.js", "HTML", "CSS"]),
        missing_keywords: strings(&["Docker", "Kubernetes", "AWS CI/CD"]),
        priority_missing_skills: strings(&["Docker", "AWS"]),
        tailored_summary: "[MOCK SUMMARY] A seasoned developer with strong frontend skills and \
            emerging backend capability. Please provide a valid API key for real results."
            .to_string(),
        optimized_resume: "[MOCK OPTIMIZED RESUME]\n\nJane Doe\nSoftware Engineer\n\
            jane@example.com\n\nExperience:\n- Built web applications\n\n\
            Please provide an API key in the .env file for real AI optimization."
            .to_string(),
        keyword_density_analysis: strings(&["React (high)", "Node (medium)", "Docker (missing)"]),
        resume_data: ResumeDocument {
            name: "Jane Doe (Mock Data)".to_string(),
            title: "Software Engineer".to_string(),
            phone: "+1 234 567 8900".to_string(),
            email: "jane.doe@example.com".to_string(),
            location: "San Francisco, CA".to_string(),
            linkedin: "linkedin.com/in/janedoe".to_string(),
            github: "github.com/janedoe".to_string(),
            summary: "Software Engineer with 5 years experience.".to_string(),
            skills: strings(&["JavaScript", "React", "Node.js", "CSS"]),
            experience: vec![ExperienceItem {
                title: "Frontend Developer".to_string(),
                company: "Tech Corp".to_string(),
                dates: "2020-2023".to_string(),
                description: "Built scalable web platforms and optimized performance.".to_string(),
            }],
            education: vec![EducationItem {
                degree: "B.S. Computer Science".to_string(),
                school: "State University".to_string(),
                dates: "2016-2020".to_string(),
                details: "Graduated with Honors.".to_string(),
            }],
            projects: vec![ProjectItem {
                name: "Portfolio App".to_string(),
                description: "Personal site with React".to_string(),
                technologies: strings(&["React", "Vite"]),
            }],
            references: strings(&[
                "John Smith, Manager - jsmith@techcorp.com",
                "Available upon request",
            ]),
            cover_letter: "Dear Hiring Manager,\n\nI am writing to express my interest in the \
                Software Engineer position..."
                .to_string(),
        },
    }
}
