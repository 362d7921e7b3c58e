//! Report generation for saved scans.
//!
//! Two formats: a flat CSV sheet and an item-tracking XML document for
//! import into the warehouse ERP.

mod csv_report;
mod xml_report;

pub use csv_report::scans_to_csv;
pub use xml_report::scans_to_xml;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Tool name written into generated documents.
pub const GENERATOR: &str = "Label Scanner App";

/// Available export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Xml,
}

impl ExportFormat {
    /// Suggested file name for an export made on `date`.
    pub fn file_name(&self, date: NaiveDate) -> String {
        match self {
            ExportFormat::Csv => format!("scans_{}.csv", date.format("%Y-%m-%d")),
            ExportFormat::Xml => format!("nav_import_{}.xml", date.format("%Y-%m-%d")),
        }
    }
}
