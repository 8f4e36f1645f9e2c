use axum::{body::Bytes, extract::State, http::StatusCode, Json};
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::dto::quote_dto::{QuoteRequest, QuoteResponse};
use crate::service::quote_service::{QuoteService, QuoteServiceImpl};
use crate::util::error::ServiceError;
use crate::util::validation::FieldViolation;

/// `POST /quotes`
///
/// The body is parsed here rather than through the `Json` extractor so that a
/// malformed payload still gets the quote response envelope.
pub async fn submit_quote_handler(
    State(service): State<Arc<QuoteServiceImpl>>,
    body: Bytes,
) -> (StatusCode, Json<QuoteResponse>) {
    info!("[submit_quote_handler] Handler called");

    let request: QuoteRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => {
            warn!("[submit_quote_handler] Invalid JSON: {}", e);
            let violation = FieldViolation::new("payload", "Formato de dados inválido");
            return (StatusCode::BAD_REQUEST, Json(QuoteResponse::invalid(vec![violation])));
        }
    };

    match service.submit_quote(request).await {
        Ok(receipt) => (
            StatusCode::OK,
            Json(QuoteResponse::accepted(receipt.request_id, receipt.delivery.attempted)),
        ),
        Err(ServiceError::Validation(violations)) => {
            (StatusCode::BAD_REQUEST, Json(QuoteResponse::invalid(violations)))
        }
        Err(e) => {
            error!("[submit_quote_handler] Failed to process quote: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, Json(QuoteResponse::internal()))
        }
    }
}
