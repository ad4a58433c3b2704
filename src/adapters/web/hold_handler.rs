use actix_web::{HttpResponse, post, web};
use log::warn;

use crate::adapters::web::errors::ApiError;
use crate::adapters::web::schema::HoldResponse;
use crate::domain::hold_request::HoldRequest;
use crate::use_cases::place_hold::PlaceHoldUseCase;

/// Largest request body the hold endpoint buffers, in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BodyLimit(pub usize);

#[post("/create-payment-intent")]
pub async fn create_hold(
	payload: web::Payload,
	body_limit: web::Data<BodyLimit>,
	place_hold_use_case: web::Data<PlaceHoldUseCase>,
) -> Result<HttpResponse, ApiError> {
	let limit = body_limit.0;
	let body = match payload.to_bytes_limited(limit).await {
		Ok(Ok(body)) => body,
		Ok(Err(e)) => {
			warn!("Failed to read hold request body, using defaults: {e}");
			web::Bytes::new()
		}
		Err(_) => return Err(ApiError::PayloadTooLarge { limit }),
	};
	let request = HoldRequest::from_body(&body);

	let authorization = place_hold_use_case.execute(request).await?;

	Ok(HttpResponse::Ok().json(HoldResponse {
		client_secret: authorization.client_secret,
	}))
}
