pub mod email;
pub mod email_template;
pub mod error;
pub mod locale;
pub mod logger;
pub mod phone;
pub mod validation;
