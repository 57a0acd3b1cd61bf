//! # th-api Handlers
//!
//! This module coordinates the flow between HTTP requests and Core traits.
//!
//! The feedback decision itself is a pure function from (method, body) to
//! accept/reject, so the contract is testable without spinning up a server;
//! the actix handler is a thin wrapper that adds the sink side effect.

use actix_web::http::{Method, StatusCode};
use actix_web::{web, HttpRequest, HttpResponse};
use serde_json::{json, Value};
use th_core::traits::FeedbackSink;

/// State shared across all actix workers.
pub struct AppState {
    pub sink: Box<dyn FeedbackSink>,
}

/// Why a feedback submission was turned away.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    MethodNotAllowed,
    InvalidJson,
}

impl Rejection {
    pub fn status(self) -> StatusCode {
        match self {
            Rejection::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Rejection::InvalidJson => StatusCode::BAD_REQUEST,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Rejection::MethodNotAllowed => "Method not allowed",
            Rejection::InvalidJson => "Invalid JSON",
        }
    }

    fn body(self) -> Value {
        json!({ "status": "error", "message": self.message() })
    }
}

/// Decides whether a submission is acceptable and parses its payload.
///
/// Only POST is allowed, and the body must be parseable JSON. No schema is
/// imposed on the payload beyond that.
pub fn parse_submission(method: &Method, body: &[u8]) -> Result<Value, Rejection> {
    if *method != Method::POST {
        return Err(Rejection::MethodNotAllowed);
    }
    serde_json::from_slice(body).map_err(|_| Rejection::InvalidJson)
}

/// Accepts site feedback and records it.
///
/// There is no durable storage behind this endpoint; the payload goes to
/// the operational log via the `FeedbackSink` port. A sink failure is not
/// the submitter's problem, so the response stays 200 and the error is
/// logged instead.
pub async fn submit_feedback(
    data: web::Data<AppState>,
    req: HttpRequest,
    body: web::Bytes,
) -> HttpResponse {
    match parse_submission(req.method(), &body) {
        Ok(payload) => {
            if let Err(err) = data.sink.record(&payload).await {
                log::warn!("feedback sink failed: {err:#}");
            }
            HttpResponse::Ok().json(json!({ "status": "success" }))
        }
        Err(rejection) => HttpResponse::build(rejection.status()).json(rejection.body()),
    }
}
