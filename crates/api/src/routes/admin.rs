use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/admin/time/add", post(handlers::admin::add_time_slot))
        .route("/api/admin/time/:id", get(handlers::admin::get_time_slot))
        .route("/api/admin/times", get(handlers::admin::list_time_slots))
}
