
use axum::{Router, routing::get};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, info, warn};
use crate::config::{AppConfig, EmailConfig, TemplateConfig};
use crate::repository::machine_repo::{MachineCatalog, StaticMachineCatalog};
use crate::router::machine_router::machine_router;
use crate::router::quote_router::quote_router;
use crate::service::machine_service::MachineServiceImpl;
use crate::service::quote_service::{QuoteDispatch, QuoteServiceImpl};
use crate::util::email::{InlineAttachment, Mailer, SmtpEmailService};


pub struct App {
    config: AppConfig,
    router: Router,
    pub quote_service: Arc<QuoteServiceImpl>,
    pub machine_service: Arc<MachineServiceImpl>,
}

impl App {
    pub async fn new() -> Self {
        let config = AppConfig::from_env();
        let template = Arc::new(TemplateConfig::from_env());

        let catalog: Arc<dyn MachineCatalog> = match std::env::var("MACHINE_CATALOG_PATH") {
            Ok(path) => Arc::new(StaticMachineCatalog::from_file(&path).expect("Machine catalog error")),
            Err(_) => Arc::new(StaticMachineCatalog::embedded().expect("Embedded machine catalog error")),
        };

        let dispatch = Self::load_dispatch(&template);
        let quote_service = Arc::new(QuoteServiceImpl::new(
            catalog.clone(),
            dispatch,
            template,
            config.quote_response_delay,
        ));
        let machine_service = Arc::new(MachineServiceImpl::new(catalog));

        Self::from_parts(config, quote_service, machine_service)
    }

    pub fn from_parts(
        config: AppConfig,
        quote_service: Arc<QuoteServiceImpl>,
        machine_service: Arc<MachineServiceImpl>,
    ) -> Self {
        let router = Self::create_router(quote_service.clone(), machine_service.clone());
        App { config, router, quote_service, machine_service }
    }

    /// Email transport is optional: without it quotes are still accepted and logged.
    fn load_dispatch(template: &TemplateConfig) -> Option<Arc<QuoteDispatch>> {
        let email_config = match EmailConfig::from_env() {
            Ok(c) => c,
            Err(e) => {
                error!("Email configuration not loaded, quote emails disabled: {e}");
                return None;
            }
        };

        let recipient = email_config.recipient_email.clone();
        let logo = match InlineAttachment::from_file(&email_config.logo_path, &template.logo_cid) {
            Ok(logo) => Some(logo),
            Err(e) => {
                warn!("Email logo not attached: {e}");
                None
            }
        };

        let mailer: Arc<dyn Mailer> = match SmtpEmailService::new(email_config) {
            Ok(service) => Arc::new(service),
            Err(e) => {
                error!("SMTP transport not available, quote emails disabled: {e}");
                return None;
            }
        };

        info!("Quote notifications will be sent to {}", recipient);
        Some(Arc::new(QuoteDispatch { mailer, recipient, logo }))
    }

    pub fn create_router(
        quote_service: Arc<QuoteServiceImpl>,
        machine_service: Arc<MachineServiceImpl>,
    ) -> Router {
        Router::new()
            .merge(quote_router(quote_service))
            .merge(machine_router(machine_service))
            .route("/health", get(|| async { "OK" }))
    }

    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub async fn start(self) {
        let addr = SocketAddr::new(self.config.host.parse().expect("Invalid host"), self.config.port);
        info!("🚀 Server running at http://{}", addr);
        let listener = tokio::net::TcpListener::bind(addr).await.expect("Failed to bind address");
        axum::serve(listener, self.router).await.expect("Failed to start server");
    }
}
