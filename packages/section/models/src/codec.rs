//! National census code to local section identifier conversion.
//!
//! National codes are 10 digits: 5 for province and municipality,
//! 2 for district and 3 for section (e.g. `"1102001001"` → `"01-001"`).

use crate::SectionId;

/// Length of a recognised national census section code.
pub const NATIONAL_CODE_LEN: usize = 10;

/// Number of leading characters (province + municipality) that are dropped.
const MUNICIPALITY_PREFIX_LEN: usize = 5;

/// Number of characters in the district part.
const DISTRICT_LEN: usize = 2;

/// Converts a 10-character national census code into a `"DD-SSS"`
/// identifier.
///
/// Any other length yields `None`. This is a fixed-position slice: the
/// characters are not checked to be digits.
#[must_use]
pub fn to_section_id(code: &str) -> Option<SectionId> {
    let chars: Vec<char> = code.chars().collect();
    if chars.len() != NATIONAL_CODE_LEN {
        return None;
    }

    let local = &chars[MUNICIPALITY_PREFIX_LEN..];
    let district: String = local[..DISTRICT_LEN].iter().collect();
    let section: String = local[DISTRICT_LEN..].iter().collect();

    Some(SectionId::new(&district, &section))
}
