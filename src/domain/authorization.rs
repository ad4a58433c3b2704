use crate::domain::hold_request::{HoldAmount, HoldRequest};

pub const HOLD_CURRENCY: &str = "cad";
pub const HOLD_DESCRIPTION: &str = "Hotline Service Hold";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureMethod {
	/// Funds are only reserved; capture happens later, elsewhere.
	Manual,
}

impl CaptureMethod {
	pub fn as_str(&self) -> &'static str {
		match self {
			CaptureMethod::Manual => "manual",
		}
	}
}

/// What the gateway is asked to authorize.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HoldIntent {
	pub amount_minor_units: i64,
	pub currency:           String,
	pub capture_method:     CaptureMethod,
	pub description:        String,
	pub metadata:           Vec<(String, String)>,
}

impl HoldIntent {
	pub fn for_request(amount: &HoldAmount, request: &HoldRequest) -> Self {
		Self {
			amount_minor_units: amount.minor_units,
			currency:           HOLD_CURRENCY.to_string(),
			capture_method:     CaptureMethod::Manual,
			description:        HOLD_DESCRIPTION.to_string(),
			metadata:           request.metadata(),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Authorization {
	pub client_secret: String,
	pub intent_id:     Option<String>,
}
