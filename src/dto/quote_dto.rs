use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::model::quote::QuoteSubmission;
use crate::util::phone::digits_only;
use crate::util::validation::{collect_violations, FieldViolation};

/// Wire order used when reporting violations
pub const QUOTE_FIELD_ORDER: [&str; 13] = [
    "name",
    "email",
    "phone",
    "company",
    "message",
    "machineId",
    "machineTitle",
    "machineSubtitle",
    "machineCapacity",
    "machineCapacityUnit",
    "machinePowerConsumption",
    "machineFootprint",
    "machineCategory",
];

/// Flattened quote form as posted by the catalog page.
///
/// Every field defaults when missing so that absent values surface as
/// field-tagged violations instead of a body parse failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct QuoteRequest {
    #[validate(
        length(min = 2, max = 100, message = "Nome deve ter entre 2 e 100 caracteres"),
        custom(function = "crate::util::validation::validate_full_name")
    )]
    pub name: String,

    #[validate(custom(function = "crate::util::validation::validate_email_address"))]
    pub email: String,

    #[validate(custom(function = "crate::util::validation::validate_phone"))]
    pub phone: String,

    pub company: Option<String>,

    #[validate(length(max = 1000, message = "Mensagem deve ter no máximo 1000 caracteres"))]
    pub message: Option<String>,

    #[validate(length(min = 1, message = "Máquina não informada"))]
    pub machine_id: String,

    #[validate(length(min = 1, message = "Título da máquina não informado"))]
    pub machine_title: String,

    #[validate(length(min = 1, message = "Subtítulo da máquina não informado"))]
    pub machine_subtitle: String,

    #[validate(required(message = "Capacidade da máquina não informada"))]
    pub machine_capacity: Option<f64>,

    #[validate(length(min = 1, message = "Unidade de capacidade não informada"))]
    pub machine_capacity_unit: String,

    #[validate(required(message = "Potência da máquina não informada"))]
    pub machine_power_consumption: Option<f64>,

    #[validate(length(min = 1, message = "Área da máquina não informada"))]
    pub machine_footprint: String,

    #[validate(custom(function = "crate::util::validation::validate_category"))]
    pub machine_category: String,
}

fn trimmed_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl QuoteRequest {
    /// Trim every text field; blank optional fields become absent.
    pub fn normalized(self) -> Self {
        QuoteRequest {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            company: trimmed_optional(self.company),
            message: trimmed_optional(self.message),
            machine_id: self.machine_id.trim().to_string(),
            machine_title: self.machine_title.trim().to_string(),
            machine_subtitle: self.machine_subtitle.trim().to_string(),
            machine_capacity: self.machine_capacity,
            machine_capacity_unit: self.machine_capacity_unit.trim().to_string(),
            machine_power_consumption: self.machine_power_consumption,
            machine_footprint: self.machine_footprint.trim().to_string(),
            machine_category: self.machine_category.trim().to_string(),
        }
    }

    /// Run every rule and report all violations in wire order.
    pub fn check(&self) -> Vec<FieldViolation> {
        match self.validate() {
            Ok(()) => Vec::new(),
            Err(errors) => collect_violations(&errors, &QUOTE_FIELD_ORDER),
        }
    }

    /// Contact part of an already-checked request.
    pub fn submission(&self) -> QuoteSubmission {
        QuoteSubmission {
            name: self.name.clone(),
            email: self.email.clone(),
            phone: digits_only(&self.phone),
            company: self.company.clone(),
            message: self.message.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldViolation>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<Uuid>,
    /// Whether an email send was attempted; not a delivery guarantee
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_attempted: Option<bool>,
}

impl QuoteResponse {
    pub const ACCEPTED: &'static str =
        "Cotação enviada com sucesso! Nossa equipe entrará em contato em breve.";
    pub const INVALID: &'static str = "Dados inválidos no formulário";
    pub const INTERNAL: &'static str = "Erro interno do servidor. Tente novamente.";

    pub fn accepted(request_id: Uuid, delivery_attempted: bool) -> Self {
        QuoteResponse {
            success: true,
            message: Self::ACCEPTED.to_string(),
            errors: None,
            request_id: Some(request_id),
            delivery_attempted: Some(delivery_attempted),
        }
    }

    pub fn invalid(errors: Vec<FieldViolation>) -> Self {
        QuoteResponse {
            success: false,
            message: Self::INVALID.to_string(),
            errors: Some(errors),
            request_id: None,
            delivery_attempted: None,
        }
    }

    pub fn internal() -> Self {
        QuoteResponse {
            success: false,
            message: Self::INTERNAL.to_string(),
            errors: None,
            request_id: None,
            delivery_attempted: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> QuoteRequest {
        QuoteRequest {
            name: "João Silva".to_string(),
            email: "joao@example.com".to_string(),
            phone: "(51) 99647-4579".to_string(),
            company: None,
            message: None,
            machine_id: "speed-line".to_string(),
            machine_title: "Linha Speed".to_string(),
            machine_subtitle: "Stand-Up Pouch Industrial Premium".to_string(),
            machine_capacity: Some(5400.0),
            machine_capacity_unit: "un/h".to_string(),
            machine_power_consumption: Some(8.97),
            machine_footprint: "5.3 x 3.3m".to_string(),
            machine_category: "premium".to_string(),
        }
    }

    fn fields(violations: &[FieldViolation]) -> Vec<&str> {
        violations.iter().map(|v| v.field.as_str()).collect()
    }

    #[test]
    fn test_accepts_valid_request() {
        let request = valid_request().normalized();
        assert!(request.check().is_empty());
        let submission = request.submission();
        assert_eq!(submission.phone, "51996474579");
        assert!(submission.company.is_none());
        assert!(submission.message.is_none());
    }

    #[test]
    fn test_rejects_single_token_names() {
        for name in ["Jo", "João"] {
            let mut request = valid_request();
            request.name = name.to_string();
            assert_eq!(fields(&request.normalized().check()), vec!["name"]);
        }
    }

    #[test]
    fn test_rejects_bad_email() {
        let mut request = valid_request();
        request.email = "not-an-email".to_string();
        assert_eq!(fields(&request.check()), vec!["email"]);

        request.email = "a@b".to_string();
        assert_eq!(fields(&request.check()), vec!["email"]);
    }

    #[test]
    fn test_rejects_bad_phones() {
        for phone in ["00000000000", "123456789", "123"] {
            let mut request = valid_request();
            request.phone = phone.to_string();
            assert_eq!(fields(&request.check()), vec!["phone"], "phone {}", phone);
        }
    }

    #[test]
    fn test_message_length_limit() {
        let mut request = valid_request();
        request.message = Some("a".repeat(1001));
        assert_eq!(fields(&request.check()), vec!["message"]);

        request.message = Some("a".repeat(1000));
        assert!(request.check().is_empty());
    }

    #[test]
    fn test_collects_all_violations_in_order() {
        let mut request = valid_request();
        request.name = "João".to_string();
        request.email = "nope".to_string();
        request.phone = "123".to_string();
        request.machine_capacity = None;
        let violations = request.check();
        assert_eq!(fields(&violations), vec!["name", "email", "phone", "machineCapacity"]);
    }

    #[test]
    fn test_missing_fields_deserialize_to_violations() {
        let request: QuoteRequest = serde_json::from_str("{}").unwrap();
        let violations = request.normalized().check();
        let names = fields(&violations);
        assert!(names.contains(&"name"));
        assert!(names.contains(&"machineId"));
        assert!(names.contains(&"machinePowerConsumption"));
        assert!(!names.contains(&"company"));
    }

    #[test]
    fn test_normalized_trims_and_drops_blank_optionals() {
        let mut request = valid_request();
        request.name = "  João Silva ".to_string();
        request.company = Some("   ".to_string());
        request.message = Some(" Olá ".to_string());
        let request = request.normalized();
        assert_eq!(request.name, "João Silva");
        assert!(request.company.is_none());
        assert_eq!(request.message.as_deref(), Some("Olá"));
    }

    #[test]
    fn test_camel_case_wire_names() {
        let json = serde_json::json!({
            "name": "Maria Oliveira",
            "machineId": "potes",
            "machineCapacityUnit": "un/h"
        });
        let request: QuoteRequest = serde_json::from_value(json).unwrap();
        assert_eq!(request.machine_id, "potes");
        assert_eq!(request.machine_capacity_unit, "un/h");
    }
}
