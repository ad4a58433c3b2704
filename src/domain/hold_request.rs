use std::str::FromStr;

use derive_more::derive::{Display, Error};
use log::warn;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde_json::{Map, Value};

pub const HOLD_AMOUNT: &str = "holdAmount";
pub const FIRST_NAME: &str = "firstName";
pub const LAST_NAME: &str = "lastName";
pub const COMPANY_NAME: &str = "companyName";
pub const EMAIL: &str = "email";
pub const PHONE: &str = "phone";
pub const SITE_ADDRESS: &str = "siteAddress";
pub const TRADE_TYPE: &str = "tradeType";
pub const ISSUE_DESCRIPTION: &str = "issueDescription";
pub const CARD_NAME: &str = "cardName";
pub const BILLING_POSTAL: &str = "billingPostal";
pub const HOTLINE_FILE: &str = "hotlinefile";

/// Submitted field → label shown on the payment provider's dashboard.
pub const METADATA_SCHEMA: [(&str, &str); 11] = [
	(FIRST_NAME, "First Name"),
	(LAST_NAME, "Last Name"),
	(COMPANY_NAME, "Company Name"),
	(EMAIL, "Email"),
	(PHONE, "Phone"),
	(SITE_ADDRESS, "Site Address"),
	(TRADE_TYPE, "Trade Type"),
	(ISSUE_DESCRIPTION, "Issue"),
	(CARD_NAME, "Card Name"),
	(BILLING_POSTAL, "Billing Postal"),
	(HOTLINE_FILE, "Hotline File"),
];

#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
#[display("Invalid or missing amount")]
pub struct InvalidAmount;

/// A validated hold amount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HoldAmount {
	pub minor_units: i64,
	/// The amount as the requester typed it, for human-facing messages.
	pub submitted:   String,
}

/// One form submission. Fields keep the order they were submitted in.
#[derive(Debug, Clone, Default)]
pub struct HoldRequest {
	fields: Map<String, Value>,
}

impl HoldRequest {
	pub fn new(fields: Map<String, Value>) -> Self {
		Self { fields }
	}

	/// Parses a request body. Anything that is not a JSON object yields an
	/// empty request so that every field falls back to its default.
	pub fn from_body(body: &[u8]) -> Self {
		match serde_json::from_slice::<Value>(body) {
			Ok(Value::Object(fields)) => Self { fields },
			Ok(_) => {
				warn!("Hold request body is not a JSON object, using defaults");
				Self::default()
			}
			Err(e) => {
				warn!("Failed to parse hold request body, using defaults: {e}");
				Self::default()
			}
		}
	}

	/// Text value of a field, empty when absent.
	pub fn field(&self, key: &str) -> String {
		self.fields.get(key).map(render_value).unwrap_or_default()
	}

	pub fn fields(&self) -> impl Iterator<Item = (&str, String)> {
		self.fields.iter().map(|(k, v)| (k.as_str(), render_value(v)))
	}

	pub fn first_name(&self) -> String {
		self.field(FIRST_NAME)
	}

	pub fn last_name(&self) -> String {
		self.field(LAST_NAME)
	}

	pub fn email(&self) -> String {
		self.field(EMAIL)
	}

	pub fn site_address(&self) -> String {
		self.field(SITE_ADDRESS)
	}

	pub fn trade_type(&self) -> String {
		self.field(TRADE_TYPE)
	}

	pub fn issue_description(&self) -> String {
		self.field(ISSUE_DESCRIPTION)
	}

	/// The requester's address, if one was given and looks deliverable.
	pub fn contact_email(&self) -> Option<String> {
		let email = self.email().trim().to_string();
		is_well_formed_email(&email).then_some(email)
	}

	pub fn hold_amount(&self) -> Result<HoldAmount, InvalidAmount> {
		let raw = self.fields.get(HOLD_AMOUNT).ok_or(InvalidAmount)?;
		let submitted = match raw {
			Value::Number(n) => n.to_string(),
			Value::String(s) => s.trim().to_string(),
			_ => return Err(InvalidAmount),
		};

		let minor_units = to_minor_units(&submitted).ok_or(InvalidAmount)?;
		if minor_units <= 0 {
			return Err(InvalidAmount);
		}

		Ok(HoldAmount {
			minor_units,
			submitted,
		})
	}

	/// Metadata attached to the authorization, labelled for the dashboard.
	pub fn metadata(&self) -> Vec<(String, String)> {
		METADATA_SCHEMA
			.iter()
			.map(|(key, label)| (label.to_string(), self.field(key)))
			.collect()
	}
}

/// Scales a decimal amount to cents, truncating any fraction of a cent.
fn to_minor_units(amount: &str) -> Option<i64> {
	if !is_decimal_literal(amount) {
		return None;
	}

	let value = Decimal::from_str(amount)
		.or_else(|_| Decimal::from_scientific(amount))
		.ok()?;

	value
		.checked_mul(Decimal::ONE_HUNDRED)?
		.trunc()
		.to_i64()
}

/// Optional sign, digits with at most one decimal point, optional exponent.
/// `Decimal` alone would also accept digit separators such as `1_000`.
fn is_decimal_literal(amount: &str) -> bool {
	let unsigned = amount.strip_prefix(['+', '-']).unwrap_or(amount);
	let (mantissa, exponent) = match unsigned.split_once(['e', 'E']) {
		Some((mantissa, exponent)) => (mantissa, Some(exponent)),
		None => (unsigned, None),
	};

	let (whole, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));
	let mantissa_ok = !(whole.is_empty() && fraction.is_empty()) &&
		whole.chars().all(|c| c.is_ascii_digit()) &&
		fraction.chars().all(|c| c.is_ascii_digit());

	let exponent_ok = exponent.is_none_or(|exponent| {
		let digits = exponent.strip_prefix(['+', '-']).unwrap_or(exponent);
		!digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
	});

	mantissa_ok && exponent_ok
}

fn render_value(value: &Value) -> String {
	match value {
		Value::Null => String::new(),
		Value::String(s) => s.clone(),
		other => other.to_string(),
	}
}

pub fn is_well_formed_email(email: &str) -> bool {
	if email.is_empty() || email.chars().any(char::is_whitespace) {
		return false;
	}

	let Some((local, domain)) = email.split_once('@') else {
		return false;
	};

	!local.is_empty() &&
		!domain.contains('@') &&
		domain.contains('.') &&
		!domain.starts_with('.') &&
		!domain.ends_with('.')
}
