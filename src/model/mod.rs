pub mod machine;
pub mod quote;
