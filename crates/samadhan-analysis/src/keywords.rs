//! Keyword heuristics used when no model is available.

use samadhan_types::{AnalysisSource, Category, ComplaintAnalysis, Priority, Sentiment};

/// Confidence reported for rule-based analyses.
pub const RULE_BASED_CONFIDENCE: f32 = 0.7;

const CATEGORY_KEYWORDS: [(Category, &[&str]); 6] = [
    (
        Category::Infrastructure,
        &["road", "street", "light", "bridge", "footpath", "pothole"],
    ),
    (
        Category::Utilities,
        &["water", "supply", "pipe", "electricity", "power", "gas"],
    ),
    (
        Category::Traffic,
        &["traffic", "signal", "parking", "vehicle", "accident", "speed"],
    ),
    (
        Category::Environment,
        &["garbage", "pollution", "environment", "waste", "noise", "air"],
    ),
    (
        Category::Healthcare,
        &["health", "hospital", "medical", "doctor", "medicine", "clinic"],
    ),
    (
        Category::Education,
        &["school", "education", "teacher", "student", "college", "university"],
    ),
];

const PRIORITY_KEYWORDS: [(Priority, &[&str]); 3] = [
    (
        Priority::Critical,
        &["urgent", "emergency", "critical", "immediate", "danger", "life"],
    ),
    (
        Priority::High,
        &["important", "serious", "major", "significant", "severe"],
    ),
    (Priority::Low, &["minor", "small", "little", "slight"]),
];

const NEGATIVE_WORDS: &[&str] = &[
    "angry", "frustrated", "terrible", "worst", "horrible", "disgusted", "furious", "outraged",
];

const POSITIVE_WORDS: &[&str] = &[
    "thank", "appreciate", "good", "excellent", "satisfied", "happy", "pleased",
];

fn contains_any(text: &str, words: &[&str]) -> bool {
    words.iter().any(|word| text.contains(word))
}

/// First keyword group with a substring hit wins; otherwise `Other`.
pub fn categorize(text: &str) -> Category {
    let text = text.to_lowercase();
    CATEGORY_KEYWORDS
        .iter()
        .find(|(_, words)| contains_any(&text, words))
        .map(|(category, _)| *category)
        .unwrap_or(Category::Other)
}

/// Critical keywords outrank high, which outrank low; default is medium.
pub fn detect_priority(text: &str) -> Priority {
    let text = text.to_lowercase();
    PRIORITY_KEYWORDS
        .iter()
        .find(|(_, words)| contains_any(&text, words))
        .map(|(priority, _)| *priority)
        .unwrap_or_default()
}

/// Mixed signals are neutral.
pub fn detect_sentiment(text: &str) -> Sentiment {
    let text = text.to_lowercase();
    match (
        contains_any(&text, NEGATIVE_WORDS),
        contains_any(&text, POSITIVE_WORDS),
    ) {
        (true, false) => Sentiment::Negative,
        (false, true) => Sentiment::Positive,
        _ => Sentiment::Neutral,
    }
}

/// Full rule-based analysis of a complaint.
pub fn analyze(text: &str) -> ComplaintAnalysis {
    let category = categorize(text);
    let department = category.department();
    ComplaintAnalysis {
        category,
        priority: detect_priority(text),
        department,
        sentiment: detect_sentiment(text),
        suggested_response: format!(
            "Thank you for your {} complaint. It has been forwarded to {}. Expected response time: {}.",
            category.label().to_lowercase(),
            department.label(),
            category.timeline()
        ),
        timeline: category.timeline().to_string(),
        confidence: RULE_BASED_CONFIDENCE,
        source: AnalysisSource::RuleBased,
    }
}
