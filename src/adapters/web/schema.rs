use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HoldResponse {
	#[serde(rename = "clientSecret")]
	pub client_secret: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
	pub error: String,
}
