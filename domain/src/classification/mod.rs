//! Classification value objects.
//!
//! - [`distribution::LabelDistribution`]: one classifier's output
//! - [`schema::AttributeSchema`]: nominal attribute domains of a feature model
//! - [`result::ClassificationResult`]: per-sentence predictions of a request
//! - [`question_type::QuestionType`]: rule-based question categories

pub mod distribution;
pub mod input;
pub mod question_type;
pub mod result;
pub mod schema;
