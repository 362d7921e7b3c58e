//! Keyword anchors and manufacturing/expiry role assignment.
//!
//! Labels usually print the manufacturing date before the expiry date, and
//! the keyword block ("MFG DATE", "EXP DATE") sits above or before the
//! dates themselves. Resolution leans on both facts.

use tracing::debug;

use super::dates::DateCandidate;
use super::patterns::{EXPIRY_KEYWORDS, MANUFACTURING_KEYWORDS};
use crate::models::label::LabelDate;

/// Offsets of the earliest manufacturing and expiry keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeywordAnchors {
    pub manufacturing: Option<usize>,
    pub expiry: Option<usize>,
}

/// Dates assigned to their roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateRoles {
    pub manufacturing: Option<LabelDate>,
    pub expiry: Option<LabelDate>,
}

/// Locate keyword anchors in uppercased text.
pub fn locate_anchors(upper: &str) -> KeywordAnchors {
    KeywordAnchors {
        manufacturing: earliest_keyword(upper, &MANUFACTURING_KEYWORDS),
        expiry: earliest_keyword(upper, &EXPIRY_KEYWORDS),
    }
}

fn earliest_keyword(upper: &str, keywords: &[&str]) -> Option<usize> {
    keywords.iter().filter_map(|kw| upper.find(kw)).min()
}

/// Assign scanned dates to manufacturing and expiry roles.
///
/// `dates` must be in text order, as returned by the date scanner.
pub fn resolve_date_roles(text: &str, dates: &[DateCandidate]) -> DateRoles {
    if dates.is_empty() {
        return DateRoles::default();
    }

    let anchors = locate_anchors(&text.to_ascii_uppercase());
    debug!(
        "Keyword anchors - manufacturing: {:?}, expiry: {:?}",
        anchors.manufacturing, anchors.expiry
    );

    // Two dates after the manufacturing keyword: first is MFG, second is EXP
    if let Some(mfg_pos) = anchors.manufacturing {
        let after: Vec<&DateCandidate> = dates.iter().filter(|d| d.offset > mfg_pos).collect();
        if after.len() >= 2 {
            if after.len() > 2 {
                debug!("Ignoring {} extra dates after keyword block", after.len() - 2);
            }
            return DateRoles {
                manufacturing: Some(after[0].normalized),
                expiry: Some(after[1].normalized),
            };
        }
    }

    // Ordinal fallback
    if dates.len() >= 2 {
        if dates.len() > 2 {
            debug!("Ignoring {} extra dates", dates.len() - 2);
        }
        return DateRoles {
            manufacturing: Some(dates[0].normalized),
            expiry: Some(dates[1].normalized),
        };
    }

    let only = dates[0].normalized;
    match (anchors.manufacturing, anchors.expiry) {
        (None, Some(_)) => DateRoles {
            manufacturing: None,
            expiry: Some(only),
        },
        (Some(mfg_pos), Some(exp_pos)) if exp_pos < mfg_pos => DateRoles {
            manufacturing: None,
            expiry: Some(only),
        },
        _ => DateRoles {
            manufacturing: Some(only),
            expiry: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::label::rules::dates::find_all_dates;

    fn roles(text: &str) -> DateRoles {
        resolve_date_roles(text, &find_all_dates(text))
    }

    fn date(s: &str) -> Option<LabelDate> {
        Some(s.parse().unwrap())
    }

    #[test]
    fn test_earliest_keyword_wins() {
        let anchors = locate_anchors("PKD 01/01/25 MFG DATE EXP DT BB");
        assert_eq!(anchors.manufacturing, Some(0));
        assert_eq!(anchors.expiry, Some(22));
    }

    #[test]
    fn test_no_anchors() {
        assert_eq!(locate_anchors("PEPSI 500ML"), KeywordAnchors::default());
    }

    #[test]
    fn test_keyword_block_before_dates() {
        let r = roles("MANUFACTURE DATE ... 14/07/25 ... 12/04/26");
        assert_eq!(r.manufacturing, date("14/07/2025"));
        assert_eq!(r.expiry, date("12/04/2026"));
    }

    #[test]
    fn test_dates_before_anchor_ignored() {
        let r = roles("01/01/24 mfg date 14/07/25 exp 12/04/26");
        assert_eq!(r.manufacturing, date("14/07/2025"));
        assert_eq!(r.expiry, date("12/04/2026"));
    }

    #[test]
    fn test_third_date_ignored() {
        let r = roles("MFD 14/07/25 12/04/26 01/01/27");
        assert_eq!(r.manufacturing, date("14/07/2025"));
        assert_eq!(r.expiry, date("12/04/2026"));
    }

    #[test]
    fn test_ordinal_fallback_without_keywords() {
        let r = roles("03/03/25 LINE 4 09/09/25");
        assert_eq!(r.manufacturing, date("03/03/2025"));
        assert_eq!(r.expiry, date("09/09/2025"));
    }

    #[test]
    fn test_ordinal_fallback_when_anchor_after_dates() {
        let r = roles("03/03/25 09/09/25 PACKED IN INDIA");
        assert_eq!(r.manufacturing, date("03/03/2025"));
        assert_eq!(r.expiry, date("09/09/2025"));
    }

    #[test]
    fn test_single_date_with_expiry_keyword() {
        let r = roles("BEST BEFORE 12/04/26");
        assert_eq!(r.manufacturing, None);
        assert_eq!(r.expiry, date("12/04/2026"));
    }

    #[test]
    fn test_single_date_expiry_keyword_first() {
        let r = roles("USE BY / PKD 12/04/26");
        assert_eq!(r.expiry, date("12/04/2026"));
    }

    #[test]
    fn test_single_date_manufacturing_keyword_first() {
        let r = roles("PKD 14/07/25 BEST BEFORE 9 MONTHS");
        assert_eq!(r.manufacturing, date("14/07/2025"));
        assert_eq!(r.expiry, None);
    }

    #[test]
    fn test_single_date_without_keywords() {
        let r = roles("14/07/25");
        assert_eq!(r.manufacturing, date("14/07/2025"));
        assert_eq!(r.expiry, None);
    }

    #[test]
    fn test_no_dates() {
        assert_eq!(roles("MFG DATE EXP DATE"), DateRoles::default());
    }

    #[test]
    fn test_keywords_are_case_insensitive() {
        let r = roles("best before 12/04/26");
        assert_eq!(r.expiry, date("12/04/2026"));
    }

    #[test]
    fn test_anchor_offsets_survive_non_ascii_text() {
        // 'ΐ' grows and 'ﬁ' shrinks in bytes under full Unicode uppercasing
        let ascii = roles("xxxxxxxxxx 01/01/20 MFD 14/07/25 12/04/26");
        assert_eq!(ascii.manufacturing, date("14/07/2025"));
        assert_eq!(ascii.expiry, date("12/04/2026"));

        let greek = roles("ΐΐΐΐΐ 01/01/20 MFD 14/07/25 12/04/26");
        assert_eq!(greek, ascii);

        let ligature = format!("{} 01/01/20 MFD 14/07/25 12/04/26", "ﬁ".repeat(10));
        assert_eq!(roles(&ligature), ascii);
    }
}
