mod batch_result;
mod cancellation_token;
mod query_engine;
mod query_engine_config;

pub use batch_result::{BatchResult, QueryFailure};
pub use cancellation_token::CancellationToken;
pub use query_engine::QueryEngine;
pub use query_engine_config::QueryEngineConfig;
