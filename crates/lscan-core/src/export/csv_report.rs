//! CSV sheet export.

use chrono::SecondsFormat;

use crate::error::ExportError;
use crate::models::label::LabelDate;
use crate::models::scan::ScanRecord;

const HEADER: [&str; 6] = ["Timestamp", "Batch", "Mfg", "Expiry", "Flavour", "Location"];

/// Render scans as CSV, one row per scan in the order given.
///
/// Every field is quoted. Dates are `DD/MM/YYYY`; absent values are empty.
pub fn scans_to_csv(records: &[ScanRecord]) -> Result<String, ExportError> {
    let mut wtr = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .from_writer(vec![]);

    wtr.write_record(HEADER)?;

    for record in records {
        let fields = &record.fields;
        wtr.write_record([
            record.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true),
            fields.batch_number.clone().unwrap_or_default(),
            date_cell(fields.manufacturing_date),
            date_cell(fields.expiry_date),
            fields.flavour.clone().unwrap_or_default(),
            record.location.clone().unwrap_or_default(),
        ])?;
    }

    let data = wtr.into_inner().map_err(|e| ExportError::Io(e.into_error()))?;
    Ok(String::from_utf8(data)?)
}

fn date_cell(date: Option<LabelDate>) -> String {
    date.map(|d| d.to_string()).unwrap_or_default()
}
