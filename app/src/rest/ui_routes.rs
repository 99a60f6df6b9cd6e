use warp::http::Uri;
use warp::Filter;

const INDEX_HTML: &str = include_str!("../../ui/index.html");
const STYLE_CSS: &str = include_str!("../../ui/static/css/style.css");
const EUROPA_JS: &str = include_str!("../../ui/static/js/europa.js");

pub fn routes() -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    root_redirect().or(index()).or(style()).or(script())
}

/// GET /
fn root_redirect() -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    warp::path::end()
        .and(warp::get())
        .map(|| warp::redirect::found(Uri::from_static("/ui/")))
}

/// GET /ui/
fn index() -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    warp::path("ui")
        .and(warp::path::end())
        .and(warp::get())
        .map(|| warp::reply::html(INDEX_HTML))
}

fn style() -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    warp::path!("ui" / "static" / "css" / "style.css")
        .and(warp::get())
        .map(|| warp::reply::with_header(STYLE_CSS, "content-type", "text/css; charset=utf-8"))
}

fn script() -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    warp::path!("ui" / "static" / "js" / "europa.js")
        .and(warp::get())
        .map(|| {
            warp::reply::with_header(
                EUROPA_JS,
                "content-type",
                "application/javascript; charset=utf-8",
            )
        })
}
