//! Shared types for the Samadhan complaint backend.
//!
//! This crate provides the foundational types used across all Samadhan crates:
//! the complaint classification enums, the analysis record returned to clients,
//! chat turns kept in session logs, and voice selection types for TTS.
//!
//! No crate in the workspace depends on anything *except* `samadhan-types` for
//! cross-cutting type definitions. This keeps the dependency graph clean and
//! prevents circular dependencies.

use serde::{Deserialize, Serialize};

mod chat;
pub mod voice;

pub use chat::ChatTurn;

/// The CM Helpline number quoted in fallback replies.
pub const CM_HELPLINE: &str = "1076";

/// Identifier reported in the `system` field of assistant responses.
pub const SYSTEM_NAME: &str = "samadhan_ai";

/// Complaint category assigned by keyword analysis or by a model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Roads, street lights, bridges.
    Infrastructure,
    /// Water, electricity, gas.
    Utilities,
    /// Signals, parking, accidents.
    Traffic,
    /// Garbage, pollution, noise.
    Environment,
    /// Hospitals, clinics, medicine.
    Healthcare,
    /// Schools and colleges.
    Education,
    /// Anything that matched no keyword group.
    Other,
}

impl Category {
    /// All categories in keyword-matching order.
    pub const ALL: [Category; 7] = [
        Self::Infrastructure,
        Self::Utilities,
        Self::Traffic,
        Self::Environment,
        Self::Healthcare,
        Self::Education,
        Self::Other,
    ];

    /// Returns the display label for this category.
    pub fn label(self) -> &'static str {
        match self {
            Self::Infrastructure => "Infrastructure",
            Self::Utilities => "Utilities",
            Self::Traffic => "Traffic",
            Self::Environment => "Environment",
            Self::Healthcare => "Healthcare",
            Self::Education => "Education",
            Self::Other => "Other",
        }
    }

    /// Parses a label case-insensitively.
    ///
    /// Returns `None` if the label does not name a known category.
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(label))
    }

    /// The department that handles complaints in this category.
    pub fn department(self) -> Department {
        match self {
            Self::Infrastructure => Department::PublicWorks,
            Self::Utilities => Department::WaterSupply,
            Self::Traffic => Department::TrafficPolice,
            Self::Environment => Department::Environment,
            Self::Healthcare => Department::Healthcare,
            Self::Education => Department::Education,
            Self::Other => Department::GeneralServices,
        }
    }

    /// Expected resolution time quoted to the citizen.
    pub fn timeline(self) -> &'static str {
        match self {
            Self::Infrastructure => "3-5 business days",
            Self::Utilities => "24-48 hours",
            Self::Traffic => "24 hours",
            Self::Environment => "2-3 business days",
            Self::Healthcare => "24 hours",
            Self::Education => "2-3 days",
            Self::Other => "3-5 days",
        }
    }
}

/// Government department a complaint is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Department {
    #[serde(rename = "Public Works")]
    PublicWorks,
    #[serde(rename = "Water Supply")]
    WaterSupply,
    #[serde(rename = "Traffic Police")]
    TrafficPolice,
    Environment,
    Healthcare,
    Education,
    #[serde(rename = "General Services")]
    GeneralServices,
}

impl Department {
    /// Returns the display label for this department.
    pub fn label(self) -> &'static str {
        match self {
            Self::PublicWorks => "Public Works",
            Self::WaterSupply => "Water Supply",
            Self::TrafficPolice => "Traffic Police",
            Self::Environment => "Environment",
            Self::Healthcare => "Healthcare",
            Self::Education => "Education",
            Self::GeneralServices => "General Services",
        }
    }

    /// Parses a label case-insensitively.
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        [
            Self::PublicWorks,
            Self::WaterSupply,
            Self::TrafficPolice,
            Self::Environment,
            Self::Healthcare,
            Self::Education,
            Self::GeneralServices,
        ]
        .into_iter()
        .find(|d| d.label().eq_ignore_ascii_case(label))
    }
}

/// Complaint urgency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl Priority {
    /// Returns the wire label for this priority.
    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }

    /// Parses a label case-insensitively.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            "critical" => Some(Self::Critical),
            _ => None,
        }
    }
}

/// Tone of the complaint text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    #[default]
    Neutral,
    Negative,
}

impl Sentiment {
    /// Parses a label case-insensitively.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "positive" => Some(Self::Positive),
            "neutral" => Some(Self::Neutral),
            "negative" => Some(Self::Negative),
            _ => None,
        }
    }
}

/// Where an analysis came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnalysisSource {
    /// Produced by a hosted model and mapped onto the fixed shape.
    #[serde(rename = "samadhan_ai_rag")]
    Model,
    /// Produced by the keyword heuristics.
    #[serde(rename = "samadhan_ai_rule_based")]
    RuleBased,
}

/// Fixed analysis shape returned for every complaint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplaintAnalysis {
    pub category: Category,
    pub priority: Priority,
    pub department: Department,
    pub sentiment: Sentiment,
    pub suggested_response: String,
    pub timeline: String,
    pub confidence: f32,
    pub source: AnalysisSource,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_labels_parse_back() {
        for category in Category::ALL {
            assert_eq!(Category::from_label(category.label()), Some(category));
        }
        assert_eq!(Category::from_label("  traffic "), Some(Category::Traffic));
        assert_eq!(Category::from_label("Sanitation"), None);
    }

    #[test]
    fn department_serializes_with_spaces() {
        let json = serde_json::to_string(&Department::PublicWorks).unwrap();
        assert_eq!(json, "\"Public Works\"");
        assert_eq!(
            Department::from_label("general services"),
            Some(Department::GeneralServices)
        );
    }

    #[test]
    fn priority_and_sentiment_labels() {
        assert_eq!(Priority::from_label("CRITICAL"), Some(Priority::Critical));
        assert_eq!(Priority::from_label("urgent"), None);
        assert_eq!(Priority::High.label(), "high");
        assert_eq!(Sentiment::from_label("Negative"), Some(Sentiment::Negative));
        assert_eq!(Sentiment::default(), Sentiment::Neutral);
    }

    #[test]
    fn analysis_uses_camel_case_and_source_tags() {
        let analysis = ComplaintAnalysis {
            category: Category::Utilities,
            priority: Priority::Low,
            department: Category::Utilities.department(),
            sentiment: Sentiment::Neutral,
            suggested_response: "ok".to_string(),
            timeline: Category::Utilities.timeline().to_string(),
            confidence: 0.7,
            source: AnalysisSource::RuleBased,
        };
        let value = serde_json::to_value(&analysis).unwrap();
        assert_eq!(value["suggestedResponse"], "ok");
        assert_eq!(value["department"], "Water Supply");
        assert_eq!(value["timeline"], "24-48 hours");
        assert_eq!(value["source"], "samadhan_ai_rule_based");
        assert_eq!(value["priority"], "low");
    }
}
