use actix_web::{get, web, HttpResponse, Responder};
use actix_web_lab::respond::Html;

// The page is small enough to ship inside the binary
const INDEX_HTML: &str = include_str!("../public/index.html");
const STYLE_CSS: &str = include_str!("../public/css/style.css");
const READ_JS: &str = include_str!("../public/pessoa/view/read.js");

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(index).service(stylesheet).service(read_script);
}

/// Page listing the people currently stored
#[get("/")]
async fn index() -> impl Responder {
    Html(INDEX_HTML.to_string())
}

#[get("/css/style.css")]
async fn stylesheet() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/css; charset=utf-8")
        .body(STYLE_CSS)
}

#[get("/pessoa/view/read.js")]
async fn read_script() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("application/javascript; charset=utf-8")
        .body(READ_JS)
}
