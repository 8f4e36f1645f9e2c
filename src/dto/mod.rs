pub mod quote_dto;
pub mod machine_dto;
