//! Tests for HTTP error mapping.

use super::*;
use actix_web::body::to_bytes;
use rstest::rstest;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[rstest]
#[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
#[case(Error::unauthorized("no auth"), StatusCode::UNAUTHORIZED)]
#[case(Error::not_found("missing"), StatusCode::NOT_FOUND)]
#[case(Error::service_unavailable("db down"), StatusCode::SERVICE_UNAVAILABLE)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] error: Error, #[case] status: StatusCode) {
    assert_eq!(ResponseError::status_code(&error), status);
}

async fn body_text(response: HttpResponse) -> String {
    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    String::from_utf8(bytes.to_vec()).expect("utf8 body")
}

#[rstest]
#[actix_web::test]
async fn internal_errors_are_redacted() {
    let error = Error::internal("connection string leaked").with_trace_id(TRACE_ID);
    let response = ResponseError::error_response(&error);

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let trace_id = response
        .headers()
        .get(TRACE_ID_HEADER)
        .expect("trace-id header")
        .to_str()
        .expect("ascii header");
    assert_eq!(trace_id, TRACE_ID);
    assert_eq!(body_text(response).await, REDACTED_MESSAGE);
}

#[rstest]
#[actix_web::test]
async fn unavailable_errors_hide_their_cause() {
    let error = Error::service_unavailable("donor repository connection failed: host db:5432");
    let response = ResponseError::error_response(&error);

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert!(response.headers().get(TRACE_ID_HEADER).is_none());
    let body = body_text(response).await;
    assert_eq!(body, UNAVAILABLE_MESSAGE);
    assert!(!body.contains("db:5432"));
}

#[rstest]
#[case(Error::invalid_request("missing field"), "missing field")]
#[case(Error::unauthorized("login required"), "login required")]
#[case(Error::not_found("no such donor"), "no such donor")]
#[actix_web::test]
async fn client_errors_keep_their_message(#[case] error: Error, #[case] expected: &str) {
    let response = ResponseError::error_response(&error);

    let content_type = response
        .headers()
        .get(actix_web::http::header::CONTENT_TYPE)
        .expect("content type")
        .to_str()
        .expect("ascii header")
        .to_owned();
    assert!(content_type.starts_with("text/plain"));
    assert_eq!(body_text(response).await, expected);
}

#[rstest]
fn actix_errors_become_redacted_internal_errors() {
    let actix_error = actix_web::error::ErrorBadGateway("upstream detail");
    let error = Error::from(actix_error);
    assert_eq!(error.code(), ErrorCode::InternalError);
    assert_eq!(error.message(), REDACTED_MESSAGE);
}
