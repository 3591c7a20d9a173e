// Route exports
pub mod demo;

pub use demo::{AppState, PageError};

use actix_web::web;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(demo::configure);
}
