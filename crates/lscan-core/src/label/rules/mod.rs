//! Rule-based field extractors for product labels.

pub mod batch;
pub mod dates;
pub mod flavour;
pub mod keywords;
pub mod patterns;

pub use batch::{find_batch, BatchExtractor};
pub use dates::{find_all_dates, DateCandidate, DateScanner};
pub use flavour::{find_flavour, title_case, FlavourExtractor};
pub use keywords::{locate_anchors, resolve_date_roles, DateRoles, KeywordAnchors};
pub use patterns::is_date_shaped;

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from text.
    fn extract(&self, text: &str) -> Option<Self::Output>;

    /// Extract all occurrences of the field.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}
