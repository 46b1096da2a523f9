pub mod patterns;
pub mod resolve;

use chrono::NaiveDateTime;

/// Destination folder grouping, each bound to an output date layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    Yearly,
    Monthly,
    Daily,
}

impl Granularity {
    /// Look up a granularity by name, case-insensitively, so the historical
    /// uppercase spellings (`-g MONTHLY`) keep working.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "yearly" => Some(Granularity::Yearly),
            "monthly" => Some(Granularity::Monthly),
            "daily" => Some(Granularity::Daily),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Granularity::Yearly => "yearly",
            Granularity::Monthly => "monthly",
            Granularity::Daily => "daily",
        }
    }

    /// The output layout bound to this granularity.
    pub fn layout(&self) -> &'static str {
        match self {
            Granularity::Yearly => "%Y",
            Granularity::Monthly => "%Y-%m",
            Granularity::Daily => "%Y-%m-%d-%a",
        }
    }

    /// Format a resolved date into a destination folder name.
    pub fn folder_name(&self, date: NaiveDateTime) -> String {
        date.format(self.layout()).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(h, min, s).unwrap()
    }

    #[test]
    fn test_folder_names() {
        let dt = date(2019, 2, 18, 15, 34, 25);
        assert_eq!(Granularity::Yearly.folder_name(dt), "2019");
        assert_eq!(Granularity::Monthly.folder_name(dt), "2019-02");
        // 1975-05-17 was a Saturday.
        let sat = date(1975, 5, 17, 9, 15, 0);
        assert_eq!(Granularity::Daily.folder_name(sat), "1975-05-17-Sat");
    }

    #[test]
    fn test_from_name_case_insensitive() {
        assert_eq!(Granularity::from_name("MONTHLY"), Some(Granularity::Monthly));
        assert_eq!(Granularity::from_name("yearly"), Some(Granularity::Yearly));
        assert_eq!(Granularity::from_name("Daily"), Some(Granularity::Daily));
        assert_eq!(Granularity::from_name("weekly"), None);
    }
}
