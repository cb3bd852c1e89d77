//! Prompt for the qualitative resume review

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone)]
pub struct PromptTemplates {
    pub analysis: String,
    /// Appended on the single retry after an unparseable reply
    pub strict_json_suffix: String,
}

impl Default for PromptTemplates {
    fn default() -> Self {
        Self {
            analysis: ANALYSIS_TEMPLATE.to_string(),
            strict_json_suffix: STRICT_JSON_SUFFIX.to_string(),
        }
    }
}

/// Parameters for prompt template substitution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptParams {
    pub resume_content: String,
    pub job_content: String,
}

impl PromptTemplates {
    /// Fill `{job}` and `{resume}` in a single pass over the template, so
    /// placeholder text inside the inputs is left alone.
    pub fn render_analysis(&self, params: &PromptParams) -> String {
        let mut rendered = String::with_capacity(
            self.analysis.len() + params.job_content.len() + params.resume_content.len(),
        );
        let mut rest = self.analysis.as_str();

        loop {
            let next = [("{job}", &params.job_content), ("{resume}", &params.resume_content)]
                .into_iter()
                .filter_map(|(placeholder, value)| rest.find(placeholder).map(|at| (at, placeholder, value)))
                .min_by_key(|(at, _, _)| *at);

            match next {
                Some((at, placeholder, value)) => {
                    rendered.push_str(&rest[..at]);
                    rendered.push_str(value);
                    rest = &rest[at + placeholder.len()..];
                }
                None => {
                    rendered.push_str(rest);
                    return rendered;
                }
            }
        }
    }

    pub fn render_strict_retry(&self, params: &PromptParams) -> String {
        format!("{}\n\n{}", self.render_analysis(params), self.strict_json_suffix)
    }
}

const ANALYSIS_TEMPLATE: &str = r#"You are an expert ATS resume optimizer. Compare this resume and job description and produce the JSON described.

Rubric:
- sections: concrete, actionable recommendations grouped by Summary, Skills, Experience, Education. Each is an array of short bullet sentences.
- missingKeywords: up to 20 role-specific keywords present in the job description but not clearly present in the resume.
- optimizedResume: clean, ATS-friendly HTML (no external CSS) with simple headings and bullet lists.

Return strictly JSON with keys: score (0-100), sections (object), missingKeywords (string[]), optimizedResume (string).

Job Description:
{job}

Resume:
{resume}

Return only JSON."#;

const STRICT_JSON_SUFFIX: &str = "Return ONLY a single JSON object without code fences or commentary.";
