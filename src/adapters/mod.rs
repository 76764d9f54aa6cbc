//! Adapters to external collaborators

mod http;

pub use http::HttpMessageSource;
