pub mod repository_error;
pub mod machine_repo;
