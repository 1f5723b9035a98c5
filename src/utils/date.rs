use chrono::{DateTime, NaiveDate, NaiveDateTime};

pub const DATE_FMT: &str = "%Y-%m-%dT%H:%M:%S%.f";
pub const JSON_DATE_FMT: &str = "%Y-%m-%dT%H:%M:%S";
pub const STORAGE_DATE_FMT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Accepts a bare date, ISO local date-time (`T` or space separated) or RFC 3339.
pub fn parse_date(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if let Ok(time) = NaiveDateTime::parse_from_str(value, DATE_FMT) {
        return Some(time);
    }
    if let Ok(time) = NaiveDateTime::parse_from_str(value, STORAGE_DATE_FMT) {
        return Some(time);
    }
    if let Ok(time) = DateTime::parse_from_rfc3339(value) {
        return Some(time.naive_utc());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

pub fn to_storage(time: &NaiveDateTime) -> String {
    time.format(STORAGE_DATE_FMT).to_string()
}

pub mod serializer {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use serde::de::Error;
    use crate::utils::date::{JSON_DATE_FMT, parse_date};

    pub fn serialize<S: Serializer>(time: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        time.format(JSON_DATE_FMT).to_string().serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let str_time: String = Deserialize::deserialize(deserializer)?;
        parse_date(&str_time).ok_or_else(|| D::Error::custom(format!("invalid date {:?}", str_time)))
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use crate::utils::date::{parse_date, to_storage};

    #[test]
    fn test_should_parse_supported_formats() {
        let expected = NaiveDate::from_ymd_opt(2020, 1, 1).and_then(|d| d.and_hms_opt(0, 0, 0));
        assert_eq!(expected, parse_date("2020-01-01"));
        assert_eq!(expected, parse_date("2020-01-01T00:00:00"));
        assert_eq!(expected, parse_date("2020-01-01 00:00:00"));
        assert_eq!(expected, parse_date("2020-01-01T00:00:00Z"));
        assert_eq!(expected, parse_date("2020-01-01T02:00:00+02:00"));
    }

    #[test]
    fn test_should_reject_garbage() {
        assert_eq!(None, parse_date(""));
        assert_eq!(None, parse_date("yesterday"));
        assert_eq!(None, parse_date("2020-13-01"));
    }

    #[test]
    fn test_should_round_trip_storage_text() {
        let time = parse_date("2021-06-15T10:30:00.250").expect("should parse");
        let stored = to_storage(&time);
        assert_eq!("2021-06-15 10:30:00.250", stored);
        assert_eq!(Some(time), parse_date(&stored));
    }
}
