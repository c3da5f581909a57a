//! Canonical Commence value formats and the ad-hoc record shape.

use std::collections::HashMap;

use chrono::{NaiveDate, NaiveTime};

/// Field name to string value, exactly as the automation layer hands rows
/// back. No schema is enforced on this side of the seam.
pub type RowData = HashMap<String, String>;

/// Date format produced under the canonical flag.
pub const CMC_DATE_FORMAT: &str = "%Y%m%d";

/// Time format produced under the canonical flag.
pub const CMC_TIME_FORMAT: &str = "%H:%M";

/// Parse a canonical-flag date string.
pub fn cmc_date(datestr: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(datestr, CMC_DATE_FORMAT)
}

/// Parse a canonical-flag time string.
pub fn cmc_time(timestr: &str) -> Result<NaiveTime, chrono::ParseError> {
    NaiveTime::parse_from_str(timestr, CMC_TIME_FORMAT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_date_parses() {
        let date = cmc_date("20240420").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 4, 20).unwrap());
    }

    #[test]
    fn canonical_time_parses() {
        let time = cmc_time("09:30").unwrap();
        assert_eq!(time, NaiveTime::from_hms_opt(9, 30, 0).unwrap());
    }

    #[test]
    fn non_canonical_date_is_rejected() {
        assert!(cmc_date("2024-04-20").is_err());
    }
}
