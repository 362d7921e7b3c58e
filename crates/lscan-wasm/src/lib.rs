//! WASM bindings for product label field extraction.
//!
//! OCR runs in the browser (camera plus a hosted or JS engine); these
//! bindings parse the resulting text, pick the best of several
//! transcriptions and build export documents from saved scans.

use wasm_bindgen::prelude::*;

use lscan_core::export::{scans_to_csv, scans_to_xml, ExportFormat};
use lscan_core::label::{LabelExtractor, LabelParser};
use lscan_core::models::label::LabelDate;
use lscan_core::models::scan::ScanRecord;
use lscan_core::ocr::score_transcription as score;

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn to_js<T: serde::Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn scans_from_js(scans: JsValue) -> Result<Vec<ScanRecord>, JsValue> {
    serde_wasm_bindgen::from_value(scans).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Parse label fields from OCR text with default settings.
///
/// Absent fields are omitted; their confidence reads `"unset"`.
#[wasm_bindgen]
pub fn parse_label(text: &str) -> Result<JsValue, JsValue> {
    to_js(&lscan_core::parse_label(text))
}

/// Heuristic quality score of a transcription; higher is more label-like.
#[wasm_bindgen]
pub fn score_transcription(text: &str) -> f32 {
    score(text)
}

/// Convert a `DD/MM/YYYY` date to `YYYY-MM-DD`.
#[wasm_bindgen]
pub fn to_iso_date(date: &str) -> Option<String> {
    date.trim().parse::<LabelDate>().ok().map(|d| d.to_iso_string())
}

/// Render saved scans (an array of scan objects) as CSV.
#[wasm_bindgen]
pub fn export_csv(scans: JsValue) -> Result<String, JsValue> {
    let scans = scans_from_js(scans)?;
    scans_to_csv(&scans).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Render saved scans as item-tracking XML stamped with the current time.
#[wasm_bindgen]
pub fn export_xml(scans: JsValue) -> Result<String, JsValue> {
    let scans = scans_from_js(scans)?;
    scans_to_xml(&scans, chrono::Utc::now()).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Suggested download name for an export (`"csv"` or `"xml"`) made today.
#[wasm_bindgen]
pub fn export_file_name(format: &str) -> Option<String> {
    let format = match format.to_ascii_lowercase().as_str() {
        "csv" => ExportFormat::Csv,
        "xml" => ExportFormat::Xml,
        _ => return None,
    };
    Some(format.file_name(chrono::Utc::now().date_naive()))
}

/// Configurable label parser for browser use.
#[wasm_bindgen]
pub struct LabelScanner {
    strict_dates: bool,
    extra_flavours: Vec<String>,
    parser: LabelParser,
}

#[wasm_bindgen]
impl LabelScanner {
    /// Create a scanner with default settings.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            strict_dates: true,
            extra_flavours: Vec::new(),
            parser: LabelParser::new(),
        }
    }

    /// Keep or drop dates that are not real calendar days.
    #[wasm_bindgen]
    pub fn set_strict_dates(&mut self, strict: bool) {
        self.strict_dates = strict;
        self.rebuild();
    }

    /// Add a product name to the flavour vocabulary.
    #[wasm_bindgen]
    pub fn add_flavour(&mut self, name: &str) {
        self.extra_flavours.push(name.to_string());
        self.rebuild();
    }

    fn rebuild(&mut self) {
        self.parser = LabelParser::new()
            .with_strict_dates(self.strict_dates)
            .with_extra_flavours(&self.extra_flavours);
    }

    /// Parse label fields from text.
    #[wasm_bindgen]
    pub fn parse(&self, text: &str) -> Result<JsValue, JsValue> {
        to_js(&self.parser.parse(text))
    }

    /// Parse the best of several transcriptions of the same label.
    ///
    /// Returns `{ text, index, score, fields }`; `index` is the winning
    /// position in `texts`, ties going to the earlier one.
    #[wasm_bindgen]
    pub fn parse_best(&self, texts: js_sys::Array) -> Result<JsValue, JsValue> {
        let texts: Vec<String> = texts.iter().filter_map(|v| v.as_string()).collect();

        let (index, best_score) = texts
            .iter()
            .map(|t| score(t))
            .enumerate()
            .fold(None, |best: Option<(usize, f32)>, (i, s)| match best {
                Some((_, b)) if s <= b => best,
                _ => Some((i, s)),
            })
            .ok_or_else(|| JsValue::from_str("no transcriptions given"))?;

        web_sys::console::debug_1(&JsValue::from_str(&format!(
            "lscan: transcription {} of {} won with score {:.1}",
            index + 1,
            texts.len(),
            best_score
        )));

        #[derive(serde::Serialize)]
        struct BestResult<'a> {
            text: &'a str,
            index: usize,
            score: f32,
            fields: lscan_core::ExtractedRecord,
        }

        let text = &texts[index];
        to_js(&BestResult {
            text,
            index,
            score: best_score,
            fields: self.parser.parse(text),
        })
    }

    /// Build a scan object ready to be stored by the page.
    #[wasm_bindgen]
    pub fn new_scan(&self, text: &str, location: Option<String>) -> Result<JsValue, JsValue> {
        let scan = ScanRecord::new(text, self.parser.parse(text)).with_location(location);
        to_js(&scan)
    }
}

impl Default for LabelScanner {
    fn default() -> Self {
        Self::new()
    }
}
