//! Integration tests for the public quoting API.

mod engine_properties;
