pub mod machine_service;
pub mod quote_service;
