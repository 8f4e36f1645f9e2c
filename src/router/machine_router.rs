use axum::{Router, routing::get};
use crate::handler::machine_handler::{
    list_machines_handler,
    list_categories_handler,
    get_machine_handler,
    productivity_handler,
};
use std::sync::Arc;
use crate::service::machine_service::MachineServiceImpl;


pub fn machine_router(service: Arc<MachineServiceImpl>) -> Router {
    Router::new()
        .route("/machines", get(list_machines_handler))
        .route("/machines/categories", get(list_categories_handler))
        .route("/machines/{id}", get(get_machine_handler))
        .route("/machines/{id}/productivity", get(productivity_handler))
        .with_state(service)
}
