pub mod config;
pub mod error;
pub mod extract;
pub mod load;
pub mod pipeline;
pub mod query;
pub mod rates;
pub mod record;
pub mod transform;
