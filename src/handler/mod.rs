pub mod machine_handler;
pub mod quote_handler;
