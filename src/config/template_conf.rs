use serde::{Deserialize, Serialize};
use std::env;
use tracing::{debug, info};

/// Branding and layout options for the quote notification email
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateConfig {
    /// Content-ID of the inline logo attachment
    pub logo_cid: String,
    pub brand_name: String,
    pub primary: String,
    pub text: String,
    pub muted_text: String,
    pub border: String,
    pub surface: String,
    pub background: String,
    /// Optional call-to-action target, e.g. a CRM deep link
    pub cta_url: Option<String>,
    pub cta_label: String,
    pub support_email: String,
    pub site_url: String,
    /// Extra footer line, usually a postal address
    pub address_line: Option<String>,
    /// Append utm_* tagging to the call-to-action link
    pub add_utm: bool,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        TemplateConfig {
            logo_cid: "logo".to_string(),
            brand_name: "Profills Carton".to_string(),
            primary: "#2FA34F".to_string(),
            text: "#1F2937".to_string(),
            muted_text: "#6B7280".to_string(),
            border: "#E5E7EB".to_string(),
            surface: "#FFFFFF".to_string(),
            background: "#F9FAFB".to_string(),
            cta_url: None,
            cta_label: "Ver no CRM".to_string(),
            support_email: "site.profills.carton@gmail.com".to_string(),
            site_url: "https://profills-carton.com".to_string(),
            address_line: None,
            add_utm: true,
        }
    }
}

fn override_from_env(target: &mut String, key: &str) {
    if let Ok(value) = env::var(key) {
        if !value.trim().is_empty() {
            debug!("{} overridden", key);
            *target = value;
        }
    }
}

fn optional_from_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

impl TemplateConfig {
    /// Start from the brand defaults and apply any EMAIL_* overrides.
    pub fn from_env() -> Self {
        info!("Loading email template configuration from environment variables");
        let mut config = TemplateConfig::default();

        override_from_env(&mut config.logo_cid, "EMAIL_LOGO_CID");
        override_from_env(&mut config.brand_name, "EMAIL_BRAND_NAME");
        override_from_env(&mut config.primary, "EMAIL_PRIMARY_COLOR");
        override_from_env(&mut config.text, "EMAIL_TEXT_COLOR");
        override_from_env(&mut config.muted_text, "EMAIL_MUTED_TEXT_COLOR");
        override_from_env(&mut config.border, "EMAIL_BORDER_COLOR");
        override_from_env(&mut config.surface, "EMAIL_SURFACE_COLOR");
        override_from_env(&mut config.background, "EMAIL_BACKGROUND_COLOR");
        override_from_env(&mut config.cta_label, "EMAIL_CTA_LABEL");
        override_from_env(&mut config.support_email, "EMAIL_SUPPORT_EMAIL");
        override_from_env(&mut config.site_url, "EMAIL_SITE_URL");

        config.cta_url = optional_from_env("EMAIL_CTA_URL");
        config.address_line = optional_from_env("EMAIL_ADDRESS_LINE");
        config.add_utm = env::var("EMAIL_ADD_UTM")
            .ok()
            .and_then(|v| v.parse::<bool>().ok())
            .unwrap_or(true);

        debug!("Template brand: {}, CTA configured: {}", config.brand_name, config.cta_url.is_some());
        config
    }
}
