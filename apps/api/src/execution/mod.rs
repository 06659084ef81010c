// Remote code execution against a Judge0-compatible service.
// The executor owns the submit/poll loop; all HTTP goes through `judge0`.

pub mod executor;
pub mod handlers;
pub mod judge0;
pub mod languages;
pub mod models;
