use chrono::TimeZone;

// time begins in 2013 (2013-01-01 07:00 UTC)
pub const BOREALIS_EPOCH: i64 = 1357023600;

// every modem IMEI shares this type allocation code
pub const IRIDIUM_TAC: &str = "30023406";

const DATE_SHIFT: u32 = 24;
const DEVICE_MASK: u64 = 0xFFFFFF;
const DEVICE_DIGITS: usize = 7;

/// Packed flight identifier.
///
/// ```text
///                     date                            device
///   111111111111111111111111111111111111111  111111111111111111111111
///  63                                       23                      0
/// ```
///
/// | data   | bits    | description                    | obtaining                       |
/// |:-------|:--------|:-------------------------------|:--------------------------------|
/// | date   | 63 - 24 | seconds since the epoch        | `(uid >> 24) + 1357023600`      |
/// | device | 23 - 0  | last 7 digits of the device id | `uid & 0xFFFFFF`                |
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Uid(pub u64);

impl Uid {
    pub fn encode(
        date: &chrono::DateTime<chrono::Utc>,
        device_id: &str,
    ) -> Result<Self, SnowflakeError> {
        let offset = date.timestamp() - BOREALIS_EPOCH;
        if offset < 0 {
            return Err(SnowflakeError::DateBeforeEpoch {
                date: date.to_rfc3339(),
            });
        }
        let offset = offset as u64;
        if offset >> (64 - DATE_SHIFT) != 0 {
            return Err(SnowflakeError::DateOutOfRange {
                date: date.to_rfc3339(),
            });
        }

        let device_id = device_id.trim();
        if device_id.len() < DEVICE_DIGITS || !device_id.bytes().all(|byte| byte.is_ascii_digit())
        {
            return Err(SnowflakeError::InvalidDeviceId {
                device_id: device_id.to_string(),
            });
        }
        let suffix = device_id[device_id.len() - DEVICE_DIGITS..]
            .parse::<u64>()
            .map_err(|_| SnowflakeError::InvalidDeviceId {
                device_id: device_id.to_string(),
            })?;

        Ok(Self((offset << DATE_SHIFT) | (suffix & DEVICE_MASK)))
    }

    pub fn date(&self) -> Result<chrono::DateTime<chrono::Utc>, SnowflakeError> {
        let seconds = (self.0 >> DATE_SHIFT) as i64 + BOREALIS_EPOCH;
        match chrono::Utc.timestamp_opt(seconds, 0) {
            chrono::LocalResult::Single(date) => Ok(date),
            _ => Err(SnowflakeError::DateOutOfRange {
                date: seconds.to_string(),
            }),
        }
    }

    pub fn device_id(&self) -> String {
        format!(
            "{:}{:0>width$}",
            IRIDIUM_TAC,
            self.0 & DEVICE_MASK,
            width = DEVICE_DIGITS
        )
    }
}

impl std::str::FromStr for Uid {
    type Err = SnowflakeError;

    fn from_str(uid: &str) -> Result<Self, Self::Err> {
        uid.trim()
            .parse::<u64>()
            .map(Self)
            .map_err(|error| SnowflakeError::ParseError {
                uid: uid.to_string(),
                message: error.to_string(),
            })
    }
}

impl std::fmt::Display for Uid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:}", self.0)
    }
}

// identifiers travel as strings so that JSON consumers never round them through a double
impl serde::Serialize for Uid {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for Uid {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        match value {
            serde_json::Value::String(uid) => uid.parse().map_err(serde::de::Error::custom),
            serde_json::Value::Number(uid) => match uid.as_u64() {
                Some(uid) => Ok(Self(uid)),
                None => Err(serde::de::Error::custom(format!("invalid uid {:}", uid))),
            },
            other => Err(serde::de::Error::custom(format!("invalid uid {:}", other))),
        }
    }
}

pub fn encode_uid(
    date: &chrono::DateTime<chrono::Utc>,
    device_id: &str,
) -> Result<String, SnowflakeError> {
    Ok(Uid::encode(date, device_id)?.to_string())
}

pub fn extract_date(uid: &str) -> Result<chrono::DateTime<chrono::Utc>, SnowflakeError> {
    uid.parse::<Uid>()?.date()
}

pub fn extract_device_id(uid: &str) -> Result<String, SnowflakeError> {
    Ok(uid.parse::<Uid>()?.device_id())
}

custom_error::custom_error! {pub SnowflakeError
    ParseError { uid: String, message: String } = "could not parse uid \"{uid}\"; {message}",
    InvalidDeviceId { device_id: String } = "device id must be at least 7 digits; \"{device_id}\"",
    DateBeforeEpoch { date: String } = "{date} is before 2013-01-01 07:00 UTC",
    DateOutOfRange { date: String } = "{date} cannot be packed into a uid",
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode() {
        let date = chrono::Utc.with_ymd_and_hms(2019, 6, 1, 0, 0, 0).unwrap();

        assert_eq!(
            encode_uid(&date, "300234061234567").unwrap(),
            "3394426740332167"
        );
        assert_eq!(
            encode_uid(&date, "300234060000042").unwrap(),
            "3394426739097642"
        );
    }

    #[test]
    fn test_decode() {
        assert_eq!(
            extract_date("3394426740332167").unwrap(),
            chrono::Utc.with_ymd_and_hms(2019, 6, 1, 0, 0, 0).unwrap()
        );
        assert_eq!(
            extract_device_id("3394426740332167").unwrap(),
            "300234061234567"
        );
        assert_eq!(
            extract_device_id("3394426739097642").unwrap(),
            "300234060000042"
        );
    }

    #[test]
    fn test_round_trip() {
        let dates = [
            chrono::Utc.with_ymd_and_hms(2013, 1, 1, 7, 0, 0).unwrap(),
            chrono::Utc.with_ymd_and_hms(2018, 7, 21, 13, 2, 59).unwrap(),
            chrono::Utc.with_ymd_and_hms(2084, 12, 31, 23, 59, 59).unwrap(),
            chrono::Utc.with_ymd_and_hms(2400, 2, 29, 12, 0, 1).unwrap(),
        ];
        let device_ids = ["300234010753370", "300234069999999", "300234060000000"];

        for date in &dates {
            for device_id in &device_ids {
                let uid = Uid::encode(date, device_id).unwrap();
                assert_eq!(&uid.date().unwrap(), date);
                assert_eq!(
                    uid.device_id(),
                    format!("{:}{:}", IRIDIUM_TAC, &device_id[8..])
                );
            }
        }
    }

    #[test]
    fn test_epoch_boundary() {
        let epoch = chrono::Utc.with_ymd_and_hms(2013, 1, 1, 7, 0, 0).unwrap();
        assert_eq!(epoch.timestamp(), BOREALIS_EPOCH);

        let uid = Uid::encode(&epoch, "300234061234567").unwrap();
        assert_eq!(uid.0 >> DATE_SHIFT, 0);
        assert_eq!(uid.date().unwrap(), epoch);

        let before = epoch - chrono::Duration::seconds(1);
        assert!(matches!(
            Uid::encode(&before, "300234061234567"),
            Err(SnowflakeError::DateBeforeEpoch { .. })
        ));
    }

    #[test]
    fn test_large_offset_keeps_precision() {
        // offsets past 2^31 seconds push the uid well beyond 2^53
        let date = chrono::Utc.with_ymd_and_hms(2090, 1, 1, 0, 0, 0).unwrap();
        let uid = Uid::encode(&date, "300234061234567").unwrap();

        assert!(uid.0 > 1 << 53);
        assert_eq!(uid.to_string().parse::<Uid>().unwrap(), uid);
        assert_eq!(uid.date().unwrap(), date);
    }

    #[test]
    fn test_malformed_uid() {
        assert!(matches!(
            extract_date("not a uid"),
            Err(SnowflakeError::ParseError { .. })
        ));
        assert!(matches!(
            extract_device_id("-12"),
            Err(SnowflakeError::ParseError { .. })
        ));
        assert!(matches!(
            "18446744073709551616".parse::<Uid>(),
            Err(SnowflakeError::ParseError { .. })
        ));
    }

    #[test]
    fn test_invalid_encode() {
        let date = chrono::Utc.with_ymd_and_hms(2019, 6, 1, 0, 0, 0).unwrap();
        assert!(matches!(
            Uid::encode(&date, "30023406ABCDEFG"),
            Err(SnowflakeError::InvalidDeviceId { .. })
        ));
        assert!(matches!(
            Uid::encode(&date, "12345"),
            Err(SnowflakeError::InvalidDeviceId { .. })
        ));

        let before = chrono::Utc.with_ymd_and_hms(2012, 12, 31, 0, 0, 0).unwrap();
        assert!(matches!(
            Uid::encode(&before, "300234061234567"),
            Err(SnowflakeError::DateBeforeEpoch { .. })
        ));
    }

    #[test]
    fn test_serde() {
        let uid = Uid(3394426740332167);
        assert_eq!(serde_json::to_string(&uid).unwrap(), "\"3394426740332167\"");
        assert_eq!(
            serde_json::from_str::<Uid>("\"3394426740332167\"").unwrap(),
            uid
        );
        assert_eq!(serde_json::from_str::<Uid>("3394426740332167").unwrap(), uid);
    }
}
