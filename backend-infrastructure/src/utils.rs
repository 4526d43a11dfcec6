use chrono::{DateTime, Utc};
use time::OffsetDateTime;

pub fn millis_to_utc(ms: i64) -> OffsetDateTime {
    let nanos = i128::from(ms).saturating_mul(1_000_000);
    OffsetDateTime::from_unix_timestamp_nanos(nanos).unwrap_or_else(|_| OffsetDateTime::now_utc())
}

pub fn chrono_to_offset(value: DateTime<Utc>) -> OffsetDateTime {
    millis_to_utc(value.timestamp_millis())
}

pub fn offset_to_chrono(value: OffsetDateTime) -> DateTime<Utc> {
    let ms = (value.unix_timestamp_nanos() / 1_000_000) as i64;
    DateTime::<Utc>::from_timestamp_millis(ms).unwrap_or_else(Utc::now)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversions_keep_millisecond_precision() {
        let original = DateTime::<Utc>::from_timestamp_millis(1_772_366_400_123).expect("ts");
        let converted = offset_to_chrono(chrono_to_offset(original));
        assert_eq!(converted, original);
    }
}
