use actix_web::http::StatusCode;
use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, error};
use derive_more::derive::{Display, Error};

use crate::adapters::web::schema::ErrorResponse;
use crate::use_cases::place_hold::PlaceHoldError;

#[derive(Debug, Display, Error, PartialEq, Eq)]
pub enum ApiError {
	#[display("Invalid or missing amount")]
	InvalidAmount,
	#[display("Missing API keys")]
	MissingApiKeys,
	/// Carries the payment provider's own message.
	#[display("{message}")]
	PaymentProvider { message: String },
	#[display("Request body exceeds {limit} bytes")]
	PayloadTooLarge { limit: usize },
}

impl error::ResponseError for ApiError {
	fn error_response(&self) -> HttpResponse {
		HttpResponse::build(self.status_code())
			.content_type(ContentType::json())
			.json(ErrorResponse {
				error: self.to_string(),
			})
	}

	fn status_code(&self) -> StatusCode {
		match self {
			ApiError::InvalidAmount => StatusCode::BAD_REQUEST,
			ApiError::MissingApiKeys => StatusCode::INTERNAL_SERVER_ERROR,
			ApiError::PaymentProvider { .. } => StatusCode::INTERNAL_SERVER_ERROR,
			ApiError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
		}
	}
}

impl From<PlaceHoldError> for ApiError {
	fn from(error: PlaceHoldError) -> Self {
		match error {
			PlaceHoldError::InvalidAmount(_) => ApiError::InvalidAmount,
			PlaceHoldError::MissingCredentials => ApiError::MissingApiKeys,
			PlaceHoldError::PaymentProvider(e) => ApiError::PaymentProvider {
				message: e.to_string(),
			},
		}
	}
}
