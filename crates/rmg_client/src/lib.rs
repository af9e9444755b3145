pub mod http;

pub use http::IncidentApiClient;
