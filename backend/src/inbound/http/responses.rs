//! Small response builders shared by the page handlers.

use actix_web::HttpResponse;
use actix_web::http::header::{self, ContentType};

/// `302 Found` pointing at `location`.
pub fn redirect(location: &'static str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// `200 OK` with an HTML body.
pub fn html(body: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(body)
}
