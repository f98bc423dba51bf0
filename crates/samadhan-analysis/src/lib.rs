//! Complaint analysis for Samadhan.
//!
//! Rule-based classification (category, department, priority, sentiment),
//! script-based language detection, clean-up of model output, the prompts
//! sent to hosted models, and the canned replies used when every model
//! provider is unavailable.

pub mod cleanup;
pub mod keywords;
pub mod language;
pub mod model;
pub mod replies;

pub use cleanup::clean_model_output;
pub use keywords::analyze;
pub use language::{base_language, detect_language};
pub use model::{analysis_prompt, parse_model_analysis, response_prompt};
pub use replies::{apology, category_reply, general_reply};
