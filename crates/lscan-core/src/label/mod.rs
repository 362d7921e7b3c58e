//! Label field extraction module.

mod parser;
pub mod rules;
mod validate;

pub use parser::{parse_label, LabelExtractor, LabelParser};
pub use validate::validate;
