pub mod app;
pub mod config;
pub mod http;
pub mod retry;
pub mod runtime;
