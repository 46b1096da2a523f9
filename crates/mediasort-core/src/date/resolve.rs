use anyhow::{anyhow, Context};
use chrono::{NaiveDate, NaiveDateTime};

use super::patterns::{self, DateConvention};
use crate::metadata::TagMap;

/// Raw EXIF datetime layout, e.g. "2019:08:15 12:34:56".
const EXIF_DATETIME: &str = "%Y:%m:%d %H:%M:%S";

/// Capture-timestamp tags, in lookup priority order.
const CAPTURE_TAGS: &[&str] = &["DateTimeOriginal", "DateTimeDigitized", "DateTime"];

/// Search `name` for a timestamp in the given convention.
///
/// `Ok(None)` means the convention does not appear in the name at all. A
/// substring that matches the pattern but does not parse is a hard error:
/// the patterns only admit date-shaped text, so a parse failure is a
/// malformed date, not a miss, and must not be guessed around.
pub fn from_filename(
    name: &str,
    convention: &DateConvention,
) -> anyhow::Result<Option<NaiveDateTime>> {
    let Some(matched) = convention.find(name) else {
        return Ok(None);
    };
    let date = NaiveDateTime::parse_from_str(matched, convention.layout)
        .with_context(|| format!("malformed {} date {:?} in {:?}", convention.name, matched, name))?;
    Ok(Some(date))
}

/// Try every registered convention in priority order; first match wins.
/// A malformed match ends the whole filename strategy for this name.
pub fn from_any_convention(name: &str) -> anyhow::Result<Option<NaiveDateTime>> {
    for convention in patterns::all() {
        if let Some(date) = from_filename(name, convention)? {
            return Ok(Some(date));
        }
    }
    Ok(None)
}

/// Extract a capture date from an extracted tag map.
///
/// `Ok(None)` when none of the capture-timestamp tags is present. A present
/// value that does not parse is an error; callers decide whether another
/// strategy remains.
pub fn from_metadata(tags: &TagMap) -> anyhow::Result<Option<NaiveDateTime>> {
    for tag in CAPTURE_TAGS {
        if let Some(value) = tags.get(*tag) {
            let date = parse_exif_datetime(value)
                .ok_or_else(|| anyhow!("malformed {} value {:?}", tag, value))?;
            return Ok(Some(date));
        }
    }
    Ok(None)
}

/// Parse an EXIF datetime, tolerating the separator variants different
/// writers (and exif readers' display forms) produce.
fn parse_exif_datetime(s: &str) -> Option<NaiveDateTime> {
    let cleaned = s.trim().replace(['-', '/', '\\', '.'], ":");
    if let Ok(dt) = NaiveDateTime::parse_from_str(&cleaned, EXIF_DATETIME) {
        return Some(dt);
    }
    // Some writers store the date alone; treat it as midnight.
    if let Ok(d) = NaiveDate::parse_from_str(cleaned.split(' ').next()?, "%Y:%m:%d") {
        return d.and_hms_opt(0, 0, 0);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(h, min, s).unwrap()
    }

    fn tags(pairs: &[(&str, &str)]) -> TagMap {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_from_filename_ios() {
        let ios = patterns::get("ios").unwrap();
        let expected = Some(date(2019, 2, 22, 15, 34, 22));
        assert_eq!(from_filename("file-20190222_153422.mp4", ios).unwrap(), expected);
        assert_eq!(from_filename("20190222_153422.mp4", ios).unwrap(), expected);
        assert_eq!(from_filename("20190222_153422-file.mp4", ios).unwrap(), expected);
        assert_eq!(from_filename("random_photo.jpg", ios).unwrap(), None);
    }

    #[test]
    fn test_conventions_agree_on_same_timestamp() {
        // The hyphenated spelling of a timestamp resolves to the same date
        // as the underscore spelling.
        let under = from_any_convention("file-19750517_091500.mp4").unwrap();
        let hyphen = from_any_convention("file-19750517-091500.mp4").unwrap();
        assert_eq!(under, Some(date(1975, 5, 17, 9, 15, 0)));
        assert_eq!(under, hyphen);
    }

    #[test]
    fn test_trailing_counter_still_matches() {
        let got = from_any_convention("file-19750517_091500_1.mp4").unwrap();
        assert_eq!(got, Some(date(1975, 5, 17, 9, 15, 0)));
    }

    #[test]
    fn test_malformed_match_is_an_error() {
        // Matches the pattern (day 31) but is not a real date.
        let err = from_any_convention("IMG_20190231_120000.mp4");
        assert!(err.is_err());
    }

    #[test]
    fn test_no_convention_matches() {
        assert_eq!(from_any_convention("holiday.mp4").unwrap(), None);
        assert_eq!(from_any_convention("2016_01_30_11_49_15.mp4").unwrap(), None);
    }

    #[test]
    fn test_from_metadata_datetime() {
        let map = tags(&[("DateTime", "2019:08:15 12:34:56")]);
        assert_eq!(from_metadata(&map).unwrap(), Some(date(2019, 8, 15, 12, 34, 56)));
    }

    #[test]
    fn test_from_metadata_prefers_original() {
        let map = tags(&[
            ("DateTime", "2020:01:01 00:00:00"),
            ("DateTimeOriginal", "2019:08:15 12:34:56"),
        ]);
        assert_eq!(from_metadata(&map).unwrap(), Some(date(2019, 8, 15, 12, 34, 56)));
    }

    #[test]
    fn test_from_metadata_display_separators() {
        // kamadak-exif displays datetimes with hyphens; both spellings parse.
        let map = tags(&[("DateTimeOriginal", "2019-08-15 12:34:56")]);
        assert_eq!(from_metadata(&map).unwrap(), Some(date(2019, 8, 15, 12, 34, 56)));
    }

    #[test]
    fn test_from_metadata_date_only() {
        let map = tags(&[("DateTime", "2019:08:15")]);
        assert_eq!(from_metadata(&map).unwrap(), Some(date(2019, 8, 15, 0, 0, 0)));
    }

    #[test]
    fn test_from_metadata_absent_or_malformed() {
        let empty = tags(&[("Model", "NIKON D80")]);
        assert_eq!(from_metadata(&empty).unwrap(), None);
        let bad = tags(&[("DateTime", "not a date")]);
        assert!(from_metadata(&bad).is_err());
    }
}
