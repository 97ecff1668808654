pub mod app;
pub mod errors;
pub mod handlers;
pub mod kpi;
pub mod models;
pub mod quote;
pub mod state;
pub mod storage;
pub mod store;
pub mod ui;

pub use app::{Route, router};
pub use quote::QuoteClient;
pub use state::AppState;
pub use storage::{Storage, resolve_data_dir};
