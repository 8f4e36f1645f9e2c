use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

use crate::config::TemplateConfig;
use crate::dto::quote_dto::{QuoteRequest, QUOTE_FIELD_ORDER};
use crate::model::quote::{QuoteFormData, SubmissionMeta};
use crate::repository::machine_repo::MachineCatalog;
use crate::util::email::{EmailMessage, InlineAttachment, Mailer};
use crate::util::email_template::{quote_subject, render_quote_email};
use crate::util::error::ServiceError;
use crate::util::validation::FieldViolation;

/// Everything needed to hand a quote notification to the transport
pub struct QuoteDispatch {
	pub mailer: Arc<dyn Mailer>,
	pub recipient: String,
	/// Sent inline under the template's logo content-id
	pub logo: Option<InlineAttachment>,
}

/// Outcome of the best-effort email step.
/// `succeeded` is only ever logged; clients see `attempted` as a hint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeliveryReport {
	pub attempted: bool,
	pub succeeded: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuoteReceipt {
	pub request_id: Uuid,
	pub delivery: DeliveryReport,
}

#[async_trait]
pub trait QuoteService: Send + Sync {
	/// Validate, render and dispatch one quote request.
	/// Only validation failures and internal faults are errors; delivery problems are not.
	async fn submit_quote(&self, request: QuoteRequest) -> Result<QuoteReceipt, ServiceError>;
}

pub struct QuoteServiceImpl {
	pub catalog: Arc<dyn MachineCatalog>,
	pub dispatch: Option<Arc<QuoteDispatch>>,
	pub template: Arc<TemplateConfig>,
	pub settle_delay: Duration,
}

impl QuoteServiceImpl {
	pub fn new(
		catalog: Arc<dyn MachineCatalog>,
		dispatch: Option<Arc<QuoteDispatch>>,
		template: Arc<TemplateConfig>,
		settle_delay: Duration,
	) -> Self {
		if dispatch.is_none() {
			warn!("Quote service started without an email transport; quotes will only be logged");
		}
		QuoteServiceImpl {
			catalog,
			dispatch,
			template,
			settle_delay,
		}
	}

	/// Shape rules plus catalog resolution of the machine id.
	fn resolve(&self, request: &QuoteRequest) -> Result<QuoteFormData, ServiceError> {
		let mut violations = request.check();

		let machine = if request.machine_id.is_empty() {
			None
		} else {
			let found = self.catalog.find_by_id(&request.machine_id);
			if found.is_none() {
				violations.push(FieldViolation::new("machineId", "Máquina não encontrada no catálogo"));
			}
			found
		};

		let machine = match machine {
			Some(machine) if violations.is_empty() => machine,
			_ => {
				let rank = |field: &str| QUOTE_FIELD_ORDER.iter().position(|f| *f == field).unwrap_or(QUOTE_FIELD_ORDER.len());
				violations.sort_by_key(|v| rank(&v.field));
				return Err(ServiceError::Validation(violations));
			}
		};

		if machine.title != request.machine_title || machine.category.as_str() != request.machine_category {
			debug!(
				"Client machine fields differ from catalog entry {}; using the catalog copy",
				machine.id
			);
		}

		Ok(QuoteFormData {
			submission: request.submission(),
			machine: machine.snapshot(),
		})
	}

	/// Run the send on its own task so a dropped client connection cannot cancel it.
	async fn deliver(
		&self,
		dispatch: &QuoteDispatch,
		message: EmailMessage,
		request_id: Uuid,
	) -> Result<bool, ServiceError> {
		let mailer = Arc::clone(&dispatch.mailer);
		let outcome = tokio::spawn(async move { mailer.send_email(message).await })
			.await
			.map_err(|e| {
				error!("Email dispatch task for quote {} failed: {}", request_id, e);
				ServiceError::InternalError(format!("Dispatch task failed: {}", e))
			})?;

		match outcome {
			Ok(()) => {
				info!("Quote {} email delivered to {}", request_id, dispatch.recipient);
				Ok(true)
			}
			Err(e) => {
				error!("Quote {} email could not be sent: {}", request_id, e);
				Ok(false)
			}
		}
	}
}

#[async_trait]
impl QuoteService for QuoteServiceImpl {
	#[instrument(skip(self, request), fields(machine_id = %request.machine_id))]
	async fn submit_quote(&self, request: QuoteRequest) -> Result<QuoteReceipt, ServiceError> {
		let request = request.normalized();
		let data = match self.resolve(&request) {
			Ok(data) => data,
			Err(e) => {
				info!("Rejected quote request: {}", e);
				return Err(e);
			}
		};

		let meta = SubmissionMeta::new();
		info!(
			request_id = %meta.request_id,
			name = %data.submission.name,
			email = %data.submission.email,
			phone = %data.submission.phone,
			company = data.submission.company.as_deref().unwrap_or("-"),
			machine = %data.machine.title,
			"New quote request received"
		);
		match serde_json::to_string(&data) {
			Ok(json) => debug!("Quote {} payload: {}", meta.request_id, json),
			Err(e) => warn!("Could not serialize quote {} for logging: {}", meta.request_id, e),
		}

		let rendered = render_quote_email(&data, &meta, &self.template);

		let mut delivery = DeliveryReport::default();
		match &self.dispatch {
			Some(dispatch) => {
				let mut message = EmailMessage::new(dispatch.recipient.clone(), quote_subject(&data))
					.with_text_body(rendered.text)
					.with_html_body(rendered.html);
				if let Some(logo) = &dispatch.logo {
					message = message.with_inline_attachment(logo.clone());
				}
				delivery.attempted = true;
				delivery.succeeded = self.deliver(dispatch, message, meta.request_id).await?;
			}
			None => {
				warn!("Email transport not configured; quote {} was logged only", meta.request_id);
			}
		}

		if !self.settle_delay.is_zero() {
			tokio::time::sleep(self.settle_delay).await;
		}

		info!(
			request_id = %meta.request_id,
			attempted = delivery.attempted,
			succeeded = delivery.succeeded,
			"Quote request processed"
		);

		Ok(QuoteReceipt {
			request_id: meta.request_id,
			delivery,
		})
	}
}
