use std::sync::Arc;

use handlebars::{Handlebars, RenderError, TemplateError, no_escape};
use serde_json::json;

use crate::domain::hold_request::{HoldAmount, HoldRequest};
use crate::domain::notifier::NotificationMessage;

const ADMIN_SUBJECT: &str = "admin_subject";
const ADMIN_BODY: &str = "admin_body";
const CONFIRMATION_SUBJECT: &str = "confirmation_subject";
const CONFIRMATION_BODY: &str = "confirmation_body";

const ADMIN_SUBJECT_TEMPLATE: &str =
	"Emergency Service Request – {{first_name}} {{last_name}}";

const ADMIN_TEXT_TEMPLATE: &str = "New hotline request with ${{amount}} hold:

{{#each fields}}{{label}}: {{value}}
{{/each}}";

const ADMIN_HTML_TEMPLATE: &str = "<h2>New hotline request with ${{amount}} hold</h2>
{{#each fields}}<p><strong>{{label}}:</strong> {{value}}</p>
{{/each}}";

const CONFIRMATION_SUBJECT_TEMPLATE: &str =
	"We received your emergency service request";

const CONFIRMATION_TEXT_TEMPLATE: &str = "Hi {{first_name}},

We received your emergency service request and placed a temporary hold of ${{amount}} on your card. Nothing is charged until the work is confirmed.

Trade: {{trade_type}}
Issue: {{issue_description}}
Site address: {{site_address}}

If you need to reach us right away, call our hotline at {{hotline_phone}}.";

const CONFIRMATION_HTML_TEMPLATE: &str = "<p>Hi {{first_name}},</p>
<p>We received your emergency service request and placed a temporary hold of ${{amount}} on your card. Nothing is charged until the work is confirmed.</p>
<p><strong>Trade:</strong> {{trade_type}}</p>
<p><strong>Issue:</strong> {{issue_description}}</p>
<p><strong>Site address:</strong> {{site_address}}</p>
<p>If you need to reach us right away, call our hotline at <strong>{{hotline_phone}}</strong>.</p>";

#[derive(Debug, Clone)]
pub struct NotificationSettings {
	pub from:            String,
	pub admin_recipient: String,
	pub hotline_phone:   String,
}

/// Renders the admin summary and the requester confirmation.
///
/// Subjects and plain-text bodies go through a registry without escaping;
/// HTML bodies go through one that HTML-escapes every substituted value.
#[derive(Clone)]
pub struct NotificationComposer {
	settings: NotificationSettings,
	text:     Arc<Handlebars<'static>>,
	html:     Arc<Handlebars<'static>>,
}

impl NotificationComposer {
	pub fn new(settings: NotificationSettings) -> Result<Self, TemplateError> {
		let mut text = Handlebars::new();
		text.register_escape_fn(no_escape);
		text.register_template_string(ADMIN_SUBJECT, ADMIN_SUBJECT_TEMPLATE)?;
		text.register_template_string(ADMIN_BODY, ADMIN_TEXT_TEMPLATE)?;
		text.register_template_string(
			CONFIRMATION_SUBJECT,
			CONFIRMATION_SUBJECT_TEMPLATE,
		)?;
		text.register_template_string(CONFIRMATION_BODY, CONFIRMATION_TEXT_TEMPLATE)?;

		let mut html = Handlebars::new();
		html.register_template_string(ADMIN_BODY, ADMIN_HTML_TEMPLATE)?;
		html.register_template_string(CONFIRMATION_BODY, CONFIRMATION_HTML_TEMPLATE)?;

		Ok(Self {
			settings,
			text: Arc::new(text),
			html: Arc::new(html),
		})
	}

	pub fn admin_notification(
		&self,
		request: &HoldRequest,
		amount: &HoldAmount,
	) -> Result<NotificationMessage, RenderError> {
		let fields: Vec<_> = request
			.fields()
			.map(|(key, value)| json!({ "label": capitalize(key), "value": value }))
			.collect();
		let data = json!({
			"first_name": request.first_name(),
			"last_name": request.last_name(),
			"amount": amount.submitted,
			"fields": fields,
		});

		Ok(NotificationMessage {
			from:      self.settings.from.clone(),
			to:        self.settings.admin_recipient.clone(),
			subject:   self.text.render(ADMIN_SUBJECT, &data)?.trim().to_string(),
			text_body: self.text.render(ADMIN_BODY, &data)?,
			html_body: Some(self.html.render(ADMIN_BODY, &data)?),
		})
	}

	pub fn confirmation(
		&self,
		request: &HoldRequest,
		amount: &HoldAmount,
		recipient: String,
	) -> Result<NotificationMessage, RenderError> {
		let data = json!({
			"first_name": request.first_name(),
			"amount": amount.submitted,
			"trade_type": request.trade_type(),
			"issue_description": request.issue_description(),
			"site_address": request.site_address(),
			"hotline_phone": self.settings.hotline_phone,
		});

		Ok(NotificationMessage {
			from:      self.settings.from.clone(),
			to:        recipient,
			subject:   self.text.render(CONFIRMATION_SUBJECT, &data)?,
			text_body: self.text.render(CONFIRMATION_BODY, &data)?,
			html_body: Some(self.html.render(CONFIRMATION_BODY, &data)?),
		})
	}
}

fn capitalize(key: &str) -> String {
	let mut chars = key.chars();
	match chars.next() {
		Some(first) => first.to_uppercase().chain(chars).collect(),
		None => String::new(),
	}
}
