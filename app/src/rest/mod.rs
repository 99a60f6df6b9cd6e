use crate::config::CONFIG;
use crate::error::ApiError;
use crate::resource::ResourceController;
use serde::Serialize;
use std::convert::Infallible;
use std::sync::Arc;
use tracing::{error, info, warn};
use warp::http::StatusCode;
use warp::{Filter, Rejection, Reply};

mod category_routes;
mod data_routes;
mod doc_routes;
mod metric_routes;
mod plant_routes;
mod sensor_routes;
mod ui_routes;
mod validation;
mod vessel_routes;


pub use dto::ErrorResponseDto;

pub fn routes(
    controller: &Arc<ResourceController>,
) -> impl Filter<Extract = impl warp::Reply, Error = Infallible> + Clone {
    let api_v1 = warp::path("api").and(warp::path("v1")).and(
        vessel_routes::routes(controller)
            .or(plant_routes::routes(controller))
            .or(category_routes::routes(controller))
            .or(sensor_routes::routes(controller))
            .or(data_routes::routes(controller)),
    );

    api_v1
        .or(metric_routes::routes(controller))
        .or(doc_routes::routes())
        .or(ui_routes::routes())
        .recover(handle_rejection)
        .with(warp::trace::request())
}

pub async fn dispatch_server_daemon(controller: Arc<ResourceController>) -> Result<(), warp::Error> {
    let (addr, server) = warp::serve(routes(&controller)).try_bind_with_graceful_shutdown(
        CONFIG.server_addr(),
        async {
            tokio::signal::ctrl_c().await.ok();
        },
    )?;
    info!(%addr, "Starting webserver");
    server.await;
    info!("Webserver stopped");
    Ok(())
}

fn build_response<T: Serialize>(resp: Result<T, ApiError>) -> Result<Box<dyn Reply>, Rejection> {
    build_response_with_status(resp, StatusCode::OK)
}

fn build_created_response<T: Serialize>(
    resp: Result<T, ApiError>,
) -> Result<Box<dyn Reply>, Rejection> {
    build_response_with_status(resp, StatusCode::CREATED)
}

fn build_empty_response(resp: Result<(), ApiError>) -> Result<Box<dyn Reply>, Rejection> {
    match resp {
        Ok(()) => Ok(Box::new(StatusCode::NO_CONTENT)),
        Err(err) => Ok(error_response(&err)),
    }
}

fn build_response_with_status<T: Serialize>(
    resp: Result<T, ApiError>,
    status: StatusCode,
) -> Result<Box<dyn Reply>, Rejection> {
    match resp {
        Ok(data) => Ok(Box::new(warp::reply::with_status(
            warp::reply::json(&data),
            status,
        ))),
        Err(err) => Ok(error_response(&err)),
    }
}

fn error_response(err: &ApiError) -> Box<dyn Reply> {
    let status = err.status_code();
    if status.is_server_error() {
        error!(status = status.as_u16(), "{}", err);
    } else {
        warn!(status = status.as_u16(), "{}", err);
    }
    Box::new(error_reply(err.to_string(), status))
}

fn error_reply(message: String, status: StatusCode) -> impl Reply {
    warp::reply::with_status(
        warp::reply::json(&ErrorResponseDto { error: message }),
        status,
    )
}

/// Turns every rejection into the `{"Error": ...}` body.
/// Body problems outrank a method mismatch of a sibling route.
async fn handle_rejection(err: Rejection) -> Result<impl Reply, Infallible> {
    let (message, status) = if let Some(api_err) = err.find::<ApiError>() {
        warn!(status = api_err.status_code().as_u16(), "{}", api_err);
        (api_err.to_string(), api_err.status_code())
    } else if err.find::<warp::reject::LengthRequired>().is_some() {
        let api_err = ApiError::InvalidClientRequest("No JSON provided".to_owned());
        (api_err.to_string(), api_err.status_code())
    } else if err.find::<warp::reject::PayloadTooLarge>().is_some() {
        ("Payload too large".to_owned(), StatusCode::PAYLOAD_TOO_LARGE)
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        ("Method not allowed".to_owned(), StatusCode::METHOD_NOT_ALLOWED)
    } else if err.is_not_found() {
        ("Not found".to_owned(), StatusCode::NOT_FOUND)
    } else {
        error!(rejection = ?err, "Unhandled rejection");
        (
            ApiError::InternalServerError("Unhandled rejection".to_owned()).to_string(),
            StatusCode::INTERNAL_SERVER_ERROR,
        )
    };
    Ok(error_reply(message, status))
}

pub mod dto {
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
    pub struct ErrorResponseDto {
        #[serde(rename = "Error")]
        pub error: String,
    }
}
