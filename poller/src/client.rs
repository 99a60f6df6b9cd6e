use crate::error::SubmitError;
use async_trait::async_trait;
use europa_core::SensorDataMessage;

/// Where readings end up
#[async_trait]
pub trait ReadingSink: Send + Sync {
    async fn submit(&self, api_id: i64, message: &SensorDataMessage) -> Result<(), SubmitError>;
}

/// Posts readings to the europa REST API
pub struct ApiClient {
    client: reqwest::Client,
    base_uri: String,
}

impl ApiClient {
    pub fn new(base_uri: &str) -> Self {
        ApiClient {
            client: reqwest::Client::new(),
            base_uri: base_uri.trim_end_matches('/').to_owned(),
        }
    }

    fn data_uri(&self, api_id: i64) -> String {
        format!("{}/sensor/{}/data", self.base_uri, api_id)
    }
}

#[async_trait]
impl ReadingSink for ApiClient {
    async fn submit(&self, api_id: i64, message: &SensorDataMessage) -> Result<(), SubmitError> {
        let resp = self
            .client
            .post(self.data_uri(api_id))
            .json(message)
            .send()
            .await?;

        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            let body = resp.text().await.unwrap_or_default();
            Err(SubmitError::Status { status, body })
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::NaiveDate;
    use parking_lot::Mutex;
    use std::sync::Arc;
    use warp::Filter;

    type Received = Arc<Mutex<Vec<(i64, serde_json::Value)>>>;

    /// Stands in for the API, sensor 404 is unknown
    async fn fake_api() -> (String, Received) {
        let received: Received = Arc::new(Mutex::new(Vec::new()));
        let store = received.clone();
        let route = warp::post()
            .and(warp::path!("api" / "v1" / "sensor" / i64 / "data"))
            .and(warp::body::json())
            .map(move |sensor_id: i64, body: serde_json::Value| {
                if sensor_id == 404 {
                    return warp::reply::with_status(
                        warp::reply::json(&serde_json::json!({"Error": "Sensor not found: 404"})),
                        warp::http::StatusCode::NOT_FOUND,
                    );
                }
                store.lock().push((sensor_id, body.clone()));
                warp::reply::with_status(warp::reply::json(&body), warp::http::StatusCode::CREATED)
            });
        let (addr, server) = warp::serve(route).bind_ephemeral(([127, 0, 0, 1], 0));
        tokio::spawn(server);
        (format!("http://{}/api/v1/", addr), received)
    }

    #[tokio::test]
    async fn test_submit() {
        let (base_uri, received) = fake_api().await;
        let client = ApiClient::new(&base_uri);
        let captured = NaiveDate::from_ymd_opt(2018, 3, 1)
            .unwrap()
            .and_hms_opt(12, 30, 5)
            .unwrap();

        client
            .submit(2, &SensorDataMessage::new(23.125, Some(captured)))
            .await
            .unwrap();

        let received = received.lock();
        assert_eq!(1, received.len());
        assert_eq!(2, received[0].0);
        assert_eq!(
            serde_json::json!({"value": 23.125, "created": "2018-03-01T12:30:05"}),
            received[0].1
        );
    }

    #[tokio::test]
    async fn test_submit_rejected() {
        let (base_uri, received) = fake_api().await;
        let client = ApiClient::new(&base_uri);

        let err = client
            .submit(404, &SensorDataMessage::new(1.0, None))
            .await
            .unwrap_err();

        match err {
            SubmitError::Status { status, body } => {
                assert_eq!(404, status.as_u16());
                assert!(body.contains("Sensor not found"));
            }
            other => panic!("unexpected error {:?}", other),
        }
        assert!(received.lock().is_empty());
    }
}
