//! Cross-field repair pass and confidence assignment.

use tracing::debug;

use super::rules::is_date_shaped;
use crate::models::label::{Confidence, ExtractedRecord};

/// Repair an extracted record and assign confidence to every field.
///
/// This is the only place confidence is set. Steps run in order:
/// a date-shaped batch is cleared and flagged `Low`; dates in the wrong
/// order are swapped and flagged `Swapped`; anything present and still
/// unflagged becomes `High`.
pub fn validate(mut record: ExtractedRecord) -> ExtractedRecord {
    if record.batch_number.as_deref().is_some_and(is_date_shaped) {
        debug!("Batch looks like a date, clearing");
        record.batch_number = None;
        record.confidence.batch_number = Confidence::Low;
    }

    if let (Some(mfg), Some(exp)) = (record.manufacturing_date, record.expiry_date) {
        if exp < mfg {
            debug!("Swapping dates: expiry {} was before manufacturing {}", exp, mfg);
            record.manufacturing_date = Some(exp);
            record.expiry_date = Some(mfg);
            record.confidence.manufacturing_date = Confidence::Swapped;
            record.confidence.expiry_date = Confidence::Swapped;
        }
    }

    let confidence = &mut record.confidence;
    settle(&mut confidence.batch_number, record.batch_number.is_some());
    settle(&mut confidence.manufacturing_date, record.manufacturing_date.is_some());
    settle(&mut confidence.expiry_date, record.expiry_date.is_some());

    record
}

fn settle(slot: &mut Confidence, present: bool) {
    if present && slot.is_unset() {
        *slot = Confidence::High;
    }
}
