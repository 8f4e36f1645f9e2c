pub mod machine_router;
pub mod quote_router;
