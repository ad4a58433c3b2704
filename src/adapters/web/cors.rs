use actix_web::body::{EitherBody, MessageBody};
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::http::Method;
use actix_web::http::header::{self, HeaderMap, HeaderValue};
use actix_web::middleware::Next;
use actix_web::{Error, HttpResponse, web};
use log::debug;

const ALLOWED_METHODS: &str = "POST, OPTIONS";
const ALLOWED_HEADERS: &str = "Content-Type";

/// Origins allowed to read this service's responses from a browser.
#[derive(Debug, Clone)]
pub struct CorsPolicy {
	allowed_origins: Vec<String>,
	max_age:         u64,
}

impl CorsPolicy {
	pub fn new(allowed_origins: Vec<String>, max_age: u64) -> Self {
		Self {
			allowed_origins,
			max_age,
		}
	}

	pub fn allows(&self, origin: &str) -> bool {
		self.allowed_origins
			.iter()
			.any(|allowed| allowed.eq_ignore_ascii_case(origin))
	}

	/// Sets the CORS headers for a response to a request from `origin`.
	/// The origin is only echoed back when it is on the allow-list.
	fn apply(
		&self,
		origin: Option<&HeaderValue>,
		preflight: bool,
		headers: &mut HeaderMap,
	) {
		if let Some(origin) = origin {
			match origin.to_str() {
				Ok(value) if self.allows(value) => {
					headers
						.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, origin.clone());
				}
				_ => debug!("Origin {origin:?} is not allowed"),
			}
		}

		headers.append(header::VARY, HeaderValue::from_static("Origin"));
		headers.insert(
			header::ACCESS_CONTROL_ALLOW_METHODS,
			HeaderValue::from_static(ALLOWED_METHODS),
		);
		headers.insert(
			header::ACCESS_CONTROL_ALLOW_HEADERS,
			HeaderValue::from_static(ALLOWED_HEADERS),
		);
		if preflight {
			headers.insert(
				header::ACCESS_CONTROL_MAX_AGE,
				HeaderValue::from(self.max_age),
			);
		}
	}
}

/// Answers every OPTIONS request itself with an empty 200 and decorates all
/// other responses with the CORS headers.
pub async fn cors<B>(
	policy: web::Data<CorsPolicy>,
	req: ServiceRequest,
	next: Next<B>,
) -> Result<ServiceResponse<EitherBody<B>>, Error>
where
	B: MessageBody + 'static,
{
	let origin = req.headers().get(header::ORIGIN).cloned();

	if *req.method() == Method::OPTIONS {
		let mut response = HttpResponse::Ok().finish();
		policy.apply(origin.as_ref(), true, response.headers_mut());
		return Ok(req.into_response(response).map_into_right_body());
	}

	let mut response = next.call(req).await?;
	policy.apply(origin.as_ref(), false, response.headers_mut());
	Ok(response.map_into_left_body())
}

#[cfg(test)]
mod tests {
	use super::*;

	fn policy() -> CorsPolicy {
		CorsPolicy::new(vec!["https://www.facilitynetwork.com".to_string()], 600)
	}

	#[test]
	fn test_allows_only_listed_origins() {
		let policy = policy();
		assert!(policy.allows("https://www.facilitynetwork.com"));
		assert!(policy.allows("HTTPS://WWW.FACILITYNETWORK.COM"));
		assert!(!policy.allows("https://evil.example"));
		assert!(!policy.allows("https://www.facilitynetwork.com.evil.example"));
		assert!(!policy.allows("null"));
	}

	#[test]
	fn test_apply_reflects_allowed_origin() {
		let mut headers = HeaderMap::new();
		let origin = HeaderValue::from_static("https://www.facilitynetwork.com");

		policy().apply(Some(&origin), true, &mut headers);

		assert_eq!(
			headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN),
			Some(&origin)
		);
		assert_eq!(
			headers.get(header::ACCESS_CONTROL_ALLOW_METHODS).unwrap(),
			"POST, OPTIONS"
		);
		assert_eq!(
			headers.get(header::ACCESS_CONTROL_ALLOW_HEADERS).unwrap(),
			"Content-Type"
		);
		assert_eq!(headers.get(header::ACCESS_CONTROL_MAX_AGE).unwrap(), "600");
		assert_eq!(headers.get(header::VARY).unwrap(), "Origin");
	}

	#[test]
	fn test_apply_never_echoes_unknown_origin() {
		let mut headers = HeaderMap::new();
		let origin = HeaderValue::from_static("https://evil.example");

		policy().apply(Some(&origin), false, &mut headers);

		assert!(headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
		assert!(headers.get(header::ACCESS_CONTROL_MAX_AGE).is_none());
	}

	#[test]
	fn test_apply_keeps_existing_vary() {
		let mut headers = HeaderMap::new();
		headers.insert(header::VARY, HeaderValue::from_static("Accept-Encoding"));

		policy().apply(None, false, &mut headers);

		let vary: Vec<_> = headers.get_all(header::VARY).collect();
		assert_eq!(vary, vec!["Accept-Encoding", "Origin"]);
	}

	#[test]
	fn test_apply_without_origin() {
		let mut headers = HeaderMap::new();

		policy().apply(None, false, &mut headers);

		assert!(headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
		assert_eq!(headers.get(header::VARY).unwrap(), "Origin");
	}
}
