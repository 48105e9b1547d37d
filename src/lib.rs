pub mod adapters;
pub mod application;
pub mod domain;
pub mod services;

pub use adapters::{
    router::{build_router, cors_layer},
    state::AppState,
};
