//! Core application primitives (dispatch, scanning, HTTP surface)

pub mod dispatcher;
pub mod http;
pub mod scanner;

pub use dispatcher::{FetchDispatcher, FetchOutcome};
pub use http::{create_router, start_server, AppState, HealthStatus};
pub use scanner::Scanner;
