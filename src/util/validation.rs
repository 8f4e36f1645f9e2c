use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use validator::{ValidateEmail, ValidationError, ValidationErrors};

use crate::model::machine::MachineCategory;
use crate::util::phone::{digits_only, is_repeated_digit};

/// One rejected field, named as it appears on the wire
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        FieldViolation {
            field: field.into(),
            message: message.into(),
        }
    }
}

fn error(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

/// Letters (ASCII and the Latin-1 range À-ÿ) and whitespace.
fn is_name_char(c: char) -> bool {
    c.is_ascii_alphabetic() || ('\u{C0}'..='\u{FF}').contains(&c) || c.is_whitespace()
}

pub fn validate_full_name(name: &str) -> Result<(), ValidationError> {
    if !name.chars().all(is_name_char) {
        return Err(error("name_charset", "Nome deve conter apenas letras e espaços"));
    }
    if name.split_whitespace().count() < 2 {
        return Err(error("full_name", "Digite seu nome completo (nome e sobrenome)"));
    }
    Ok(())
}

pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    let digits = digits_only(phone);
    if digits.is_empty() {
        return Err(error("phone_required", "Telefone é obrigatório"));
    }
    if !(10..=11).contains(&digits.len()) {
        return Err(error("phone_length", "Telefone deve ter 10 ou 11 dígitos"));
    }
    if is_repeated_digit(&digits) {
        return Err(error("phone_repeated", "Digite um telefone válido"));
    }
    Ok(())
}

/// Syntactic check plus a dotted domain ending in an alphabetic TLD of two or more letters.
pub fn validate_email_address(email: &str) -> Result<(), ValidationError> {
    let invalid = || error("email", "Digite um email válido");
    if !email.validate_email() {
        return Err(invalid());
    }
    let domain = email.rsplit_once('@').map(|(_, d)| d).unwrap_or_default();
    let tld = match domain.rsplit_once('.') {
        Some((host, tld)) if !host.is_empty() => tld,
        _ => return Err(invalid()),
    };
    if tld.len() < 2 || !tld.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(invalid());
    }
    Ok(())
}

pub fn validate_category(category: &str) -> Result<(), ValidationError> {
    category
        .parse::<MachineCategory>()
        .map(|_| ())
        .map_err(|_| error("machine_category", "Categoria de máquina inválida"))
}

/// `machine_capacity_unit` -> `machineCapacityUnit`
fn wire_name(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// Flatten validator output into wire-named violations, ordered as `field_order`.
pub fn collect_violations(errors: &ValidationErrors, field_order: &[&str]) -> Vec<FieldViolation> {
    let mut violations = Vec::new();
    for (field, field_errors) in errors.field_errors() {
        let field = wire_name(field.as_ref());
        for err in field_errors.iter() {
            let message = err
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| format!("Campo inválido ({})", err.code));
            violations.push(FieldViolation::new(field.clone(), message));
        }
    }
    let rank = |field: &str| field_order.iter().position(|f| *f == field).unwrap_or(field_order.len());
    violations.sort_by(|a, b| rank(&a.field).cmp(&rank(&b.field)).then_with(|| a.field.cmp(&b.field)));
    violations
}
