use crate::error::ApiError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use warp::hyper::body::Bytes;
use warp::{Filter, Rejection};

const MAX_BODY_BYTES: u64 = 16 * 1024;

/// Which fields a request body may carry
#[derive(Debug, Clone, Copy)]
pub enum Fields {
    /// Every listed field must be present and not `null`
    Required(&'static [&'static str]),
    /// Only listed fields may be present, none is mandatory
    Allowed(&'static [&'static str]),
}

/// Inspects the JSON body before the handler runs and hands it on unmodified.
pub fn validated(fields: Fields) -> impl Filter<Extract = (Value,), Error = Rejection> + Clone {
    warp::body::content_length_limit(MAX_BODY_BYTES)
        .and(warp::body::bytes())
        .and_then(move |body: Bytes| {
            let res = check(fields, &body);
            async move { res.map_err(warp::reject::custom) }
        })
}

/// `validated`, followed by deserializing into the request DTO
pub fn validated_as<T>(fields: Fields) -> impl Filter<Extract = (T,), Error = Rejection> + Clone
where
    T: DeserializeOwned + Send + 'static,
{
    validated(fields).and_then(|body: Value| async move {
        serde_json::from_value::<T>(body)
            .map_err(|e| warp::reject::custom(ApiError::InvalidClientRequest(e.to_string())))
    })
}

pub fn check(fields: Fields, body: &[u8]) -> Result<Value, ApiError> {
    let no_json = || ApiError::InvalidClientRequest("No JSON provided".to_owned());
    let body: Value = serde_json::from_slice(body).map_err(|_| no_json())?;
    let object = body.as_object().ok_or_else(no_json)?;

    match fields {
        Fields::Required(required) => {
            if let Some(field) = required
                .iter()
                .find(|field| object.get(**field).map_or(true, Value::is_null))
            {
                return Err(ApiError::InvalidClientRequest(format!(
                    "'{}' field missing",
                    field
                )));
            }
        }
        Fields::Allowed(allowed) => {
            if let Some(field) = object.keys().find(|key| !allowed.contains(&key.as_str())) {
                return Err(ApiError::InvalidClientRequest(format!(
                    "'{}' field not permitted",
                    field
                )));
            }
        }
    }
    Ok(body)
}

/// Reads an optional id, an empty string counts as absent.
pub fn optional_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum IdOrBlank {
        Id(i64),
        Blank(String),
    }

    match Option::<IdOrBlank>::deserialize(deserializer)? {
        Some(IdOrBlank::Id(id)) => Ok(Some(id)),
        Some(IdOrBlank::Blank(raw)) if raw.is_empty() => Ok(None),
        Some(IdOrBlank::Blank(raw)) => Err(serde::de::Error::custom(format!(
            "invalid id '{}'",
            raw
        ))),
        None => Ok(None),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    const REQUIRED: Fields = Fields::Required(&["name", "location"]);
    const ALLOWED: Fields = Fields::Allowed(&["name", "location"]);

    fn message(res: Result<Value, ApiError>) -> String {
        res.unwrap_err().to_string()
    }

    #[test]
    fn test_required_fields() {
        let body = br#"{"name": "V1", "location": "Shelf A", "size": "POT_TWELVE_CM"}"#;
        let passed = check(REQUIRED, body).unwrap();
        assert_eq!("POT_TWELVE_CM", passed["size"]);

        assert_eq!(
            "Invalid request: 'location' field missing",
            message(check(REQUIRED, br#"{"name": "V1"}"#))
        );
        assert_eq!(
            "Invalid request: 'name' field missing",
            message(check(REQUIRED, br#"{"name": null, "location": "x"}"#))
        );
    }

    #[test]
    fn test_allowed_fields() {
        assert!(check(ALLOWED, b"{}").is_ok());
        assert!(check(ALLOWED, br#"{"location": ""}"#).is_ok());
        assert_eq!(
            "Invalid request: 'size' field not permitted",
            message(check(ALLOWED, br#"{"name": "V1", "size": "big"}"#))
        );
    }

    #[test]
    fn test_no_json() {
        let bodies: [&[u8]; 4] = [b"", b"not json", b"[1, 2]", b"42"];
        for body in bodies {
            assert_eq!(
                "Invalid request: No JSON provided",
                message(check(REQUIRED, body))
            );
        }
    }

    #[derive(Debug, Deserialize)]
    struct Update {
        #[serde(default, deserialize_with = "optional_id")]
        vessel: Option<i64>,
    }

    #[test]
    fn test_optional_id() {
        let parse = |v: Value| serde_json::from_value::<Update>(v).map(|u| u.vessel);
        assert_eq!(Some(3), parse(json!({"vessel": 3})).unwrap());
        assert_eq!(None, parse(json!({"vessel": ""})).unwrap());
        assert_eq!(None, parse(json!({"vessel": null})).unwrap());
        assert_eq!(None, parse(json!({})).unwrap());
        assert!(parse(json!({"vessel": "three"})).is_err());
    }

    #[tokio::test]
    async fn test_validated_filter() {
        let filter = validated(REQUIRED);

        let passed = warp::test::request()
            .method("POST")
            .json(&json!({"name": "V1", "location": "Shelf A"}))
            .filter(&filter)
            .await
            .unwrap();
        assert_eq!("V1", passed["name"]);

        let rejection = warp::test::request()
            .method("POST")
            .json(&json!({"name": "V1"}))
            .filter(&filter)
            .await
            .unwrap_err();
        assert!(matches!(
            rejection.find::<ApiError>(),
            Some(ApiError::InvalidClientRequest(_))
        ));
    }
}
