use axum::{Router, routing::get};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/timeslots", get(handlers::time_slot::list_time_slots))
        .route(
            "/api/group-classes",
            get(handlers::time_slot::list_group_classes),
        )
}
