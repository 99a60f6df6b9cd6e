use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A single reading as it travels from the polling agent to the API.
///
/// `created` is the capture time shared by every reading of one polling
/// cycle. The API falls back to its own clock when it is missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorDataMessage {
    pub value: f64,
    #[serde(
        default,
        with = "crate::timestamp::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub created: Option<NaiveDateTime>,
}

impl SensorDataMessage {
    pub fn new(value: f64, created: Option<NaiveDateTime>) -> Self {
        SensorDataMessage { value, created }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_serialize_keeps_float_representation() {
        let created = NaiveDate::from_ymd_opt(2018, 3, 1)
            .unwrap()
            .and_hms_opt(12, 30, 5)
            .unwrap();
        let msg = SensorDataMessage::new(1.0, Some(created));

        let json = serde_json::to_string(&msg).unwrap();

        assert_eq!(r#"{"value":1.0,"created":"2018-03-01T12:30:05"}"#, json);
    }

    #[test]
    fn test_deserialize_without_created() {
        let msg: SensorDataMessage = serde_json::from_str(r#"{"value": 12.5}"#).unwrap();

        assert_eq!(SensorDataMessage::new(12.5, None), msg);
    }

    #[test]
    fn test_deserialize_rejects_malformed_created() {
        let res = serde_json::from_str::<SensorDataMessage>(r#"{"value": 1.5, "created": "yesterday"}"#);

        assert!(res.is_err());
    }
}
