//! HTTP client for the build service REST API.

pub mod appcenter;

pub use appcenter::AppCenterClient;
