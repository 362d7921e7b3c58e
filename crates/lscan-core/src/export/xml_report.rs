//! Item-tracking XML export.

use chrono::{DateTime, SecondsFormat, Utc};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use super::GENERATOR;
use crate::error::ExportError;
use crate::models::label::LabelDate;
use crate::models::scan::ScanRecord;

/// Render scans as an `ItemTrackingEntries` document.
///
/// Dates are written as `YYYY-MM-DD`; text content is escaped.
pub fn scans_to_xml(
    records: &[ScanRecord],
    generated_at: DateTime<Utc>,
) -> Result<String, ExportError> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 4);

    write(&mut writer, Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    write(&mut writer, Event::Start(BytesStart::new("ItemTrackingEntries")))?;

    text_element(&mut writer, "GeneratedBy", GENERATOR)?;
    text_element(
        &mut writer,
        "GeneratedAt",
        &generated_at.to_rfc3339_opts(SecondsFormat::Millis, true),
    )?;
    text_element(&mut writer, "TotalEntries", &records.len().to_string())?;

    for record in records {
        let fields = &record.fields;

        write(&mut writer, Event::Start(BytesStart::new("Entry")))?;
        text_element(&mut writer, "LotNo", fields.batch_number.as_deref().unwrap_or(""))?;
        text_element(&mut writer, "ExpirationDate", &iso(fields.expiry_date))?;
        text_element(&mut writer, "ManufacturingDate", &iso(fields.manufacturing_date))?;
        text_element(&mut writer, "Description", fields.flavour.as_deref().unwrap_or(""))?;
        text_element(&mut writer, "LocationCode", record.location.as_deref().unwrap_or(""))?;
        text_element(
            &mut writer,
            "EntryDate",
            &record.timestamp.date_naive().format("%Y-%m-%d").to_string(),
        )?;
        write(&mut writer, Event::End(BytesEnd::new("Entry")))?;
    }

    write(&mut writer, Event::End(BytesEnd::new("ItemTrackingEntries")))?;

    Ok(String::from_utf8(writer.into_inner())?)
}

fn iso(date: Option<LabelDate>) -> String {
    date.map(|d| d.to_iso_string()).unwrap_or_default()
}

fn write(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<(), ExportError> {
    writer
        .write_event(event)
        .map_err(|e| ExportError::Xml(e.to_string()))
}

fn text_element(writer: &mut Writer<Vec<u8>>, name: &str, value: &str) -> Result<(), ExportError> {
    if value.is_empty() {
        return write(writer, Event::Empty(BytesStart::new(name)));
    }
    write(writer, Event::Start(BytesStart::new(name)))?;
    write(writer, Event::Text(BytesText::new(value)))?;
    write(writer, Event::End(BytesEnd::new(name)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::label::parse_label;
    use chrono::TimeZone;

    fn generated_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 7, 22, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_entry_dates_are_year_first() {
        let text = "MANUFACTURE DATE\nEXPIRY DATE\n14/07/25\n12/04/26 25-8902-0014 PEPSI";
        let record = ScanRecord::new(text, parse_label(text))
            .with_timestamp(Utc.with_ymd_and_hms(2025, 7, 20, 8, 30, 0).unwrap())
            .with_location(Some("WH-1".to_string()));

        let xml = scans_to_xml(&[record], generated_at()).unwrap();

        assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(xml.contains("<GeneratedBy>Label Scanner App</GeneratedBy>"));
        assert!(xml.contains("<GeneratedAt>2025-07-22T12:00:00.000Z</GeneratedAt>"));
        assert!(xml.contains("<TotalEntries>1</TotalEntries>"));
        assert!(xml.contains("<LotNo>25-8902-0014</LotNo>"));
        assert!(xml.contains("<ExpirationDate>2026-04-12</ExpirationDate>"));
        assert!(xml.contains("<ManufacturingDate>2025-07-14</ManufacturingDate>"));
        assert!(xml.contains("<Description>Pepsi</Description>"));
        assert!(xml.contains("<LocationCode>WH-1</LocationCode>"));
        assert!(xml.contains("<EntryDate>2025-07-20</EntryDate>"));
    }

    #[test]
    fn test_text_is_escaped() {
        let mut record = ScanRecord::new("", Default::default());
        record.fields.flavour = Some("Lemon & <Lime>".to_string());

        let xml = scans_to_xml(&[record], generated_at()).unwrap();
        assert!(xml.contains("<Description>Lemon &amp; &lt;Lime&gt;</Description>"));
    }

    #[test]
    fn test_absent_fields_are_empty_elements() {
        let xml = scans_to_xml(&[ScanRecord::new("", Default::default())], generated_at()).unwrap();
        assert!(xml.contains("<LotNo/>"));
        assert!(xml.contains("<ExpirationDate/>"));
        assert!(xml.contains("<LocationCode/>"));
    }

    #[test]
    fn test_empty_report() {
        let xml = scans_to_xml(&[], generated_at()).unwrap();
        assert!(xml.contains("<TotalEntries>0</TotalEntries>"));
        assert!(!xml.contains("<Entry>"));
        assert!(xml.trim_end().ends_with("</ItemTrackingEntries>"));
    }
}
