//! Prompts sent to hosted models and mapping of their replies onto
//! [`ComplaintAnalysis`].

use samadhan_types::{
    AnalysisSource, Category, ComplaintAnalysis, Department, Priority, Sentiment, CM_HELPLINE,
};
use serde_json::Value;

/// Confidence assumed when a model omits one.
pub const DEFAULT_MODEL_CONFIDENCE: f32 = 0.8;

/// Prompt asking a model to classify a complaint as JSON.
pub fn analysis_prompt(complaint: &str, language: &str) -> String {
    format!(
        r#"You are Samadhan AI, an expert system for UP government complaints.

Analyze this complaint for Uttar Pradesh CM Helpline {CM_HELPLINE}:
Complaint: {complaint}
Language: {language}

Provide JSON response:
{{
    "category": "Infrastructure|Utilities|Environment|Traffic|Healthcare|Education|Other",
    "priority": "low|medium|high|critical",
    "department": "Public Works|Water Supply|Environment|Traffic Police|Healthcare|Education|General Services",
    "sentiment": "positive|neutral|negative",
    "confidence": 0.8
}}

Only respond with valid JSON."#
    )
}

/// Prompt asking a model for a short citizen-facing reply.
pub fn response_prompt(complaint: &str, analysis: &ComplaintAnalysis, language: &str) -> String {
    format!(
        r#"You are Samadhan AI, a helpful government assistant for Uttar Pradesh, India.

A citizen submitted this complaint to CM Helpline {CM_HELPLINE}:
Complaint: "{complaint}"
Category: {category}
Priority: {priority}
Language: {language}

Department: {department}
Response Time: {timeline}

Provide a professional, empathetic response (2-3 sentences). No markdown formatting."#,
        category = analysis.category.label(),
        priority = analysis.priority.label(),
        department = analysis.department.label(),
        timeline = analysis.timeline,
    )
}

fn label<'a>(json: &'a Value, key: &str) -> Option<&'a str> {
    json.get(key).and_then(Value::as_str)
}

/// Extracts the outermost JSON object from a model reply and maps it onto
/// the fixed analysis shape. Surrounding prose and code fences are ignored.
///
/// Unknown or missing labels fall back to `Other` / `medium` / `neutral`, and
/// the department defaults to the one owning the category. Returns `None`
/// when the reply contains no parseable object.
pub fn parse_model_analysis(reply: &str) -> Option<ComplaintAnalysis> {
    let start = reply.find('{')?;
    let end = reply.rfind('}')?;
    if end < start {
        return None;
    }
    let json: Value = serde_json::from_str(&reply[start..=end]).ok()?;

    let category = label(&json, "category")
        .and_then(Category::from_label)
        .unwrap_or(Category::Other);
    let priority = label(&json, "priority")
        .and_then(Priority::from_label)
        .unwrap_or_default();
    let department = label(&json, "department")
        .and_then(Department::from_label)
        .unwrap_or_else(|| category.department());
    let sentiment = label(&json, "sentiment")
        .and_then(Sentiment::from_label)
        .unwrap_or_default();
    let confidence = json
        .get("confidence")
        .and_then(Value::as_f64)
        .map(|c| c.clamp(0.0, 1.0) as f32)
        .unwrap_or(DEFAULT_MODEL_CONFIDENCE);

    Some(ComplaintAnalysis {
        category,
        priority,
        department,
        sentiment,
        suggested_response: format!(
            "Thank you for your {} complaint. We will address it promptly.",
            category.label().to_lowercase()
        ),
        timeline: category.timeline().to_string(),
        confidence,
        source: AnalysisSource::Model,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_json_wrapped_in_prose_and_fences() {
        let reply = "Here is the analysis:\n```json\n{\"category\": \"Traffic\", \"priority\": \"HIGH\", \"sentiment\": \"negative\", \"confidence\": 0.92}\n```\nHope this helps.";
        let analysis = parse_model_analysis(reply).unwrap();
        assert_eq!(analysis.category, Category::Traffic);
        assert_eq!(analysis.department, Department::TrafficPolice);
        assert_eq!(analysis.priority, Priority::High);
        assert_eq!(analysis.sentiment, Sentiment::Negative);
        assert!((analysis.confidence - 0.92).abs() < 1e-6);
        assert_eq!(analysis.timeline, "24 hours");
        assert_eq!(analysis.source, AnalysisSource::Model);
    }

    #[test]
    fn unknown_labels_use_defaults() {
        let analysis =
            parse_model_analysis(r#"{"category": "Sanitation", "department": "Nagar Nigam"}"#)
                .unwrap();
        assert_eq!(analysis.category, Category::Other);
        assert_eq!(analysis.department, Department::GeneralServices);
        assert_eq!(analysis.priority, Priority::Medium);
        assert_eq!(analysis.sentiment, Sentiment::Neutral);
        assert!((analysis.confidence - DEFAULT_MODEL_CONFIDENCE).abs() < f32::EPSILON);
    }

    #[test]
    fn reply_without_object_is_rejected() {
        assert!(parse_model_analysis("I cannot classify this.").is_none());
        assert!(parse_model_analysis("} backwards {").is_none());
        assert!(parse_model_analysis("{not json}").is_none());
    }

    #[test]
    fn prompts_carry_complaint_details() {
        let analysis = crate::keywords::analyze("broken street light");
        let prompt = response_prompt("broken street light", &analysis, "hi");
        assert!(prompt.contains("Category: Infrastructure"));
        assert!(prompt.contains("Department: Public Works"));
        assert!(prompt.contains("Language: hi"));
        assert!(analysis_prompt("x", "en").contains("Only respond with valid JSON."));
    }
}
