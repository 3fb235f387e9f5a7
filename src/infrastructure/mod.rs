// Infrastructure layer - External dependencies and adapters
pub mod config;
pub mod csv_export;
pub mod http_response;
pub mod json_mapper;
pub mod memory_repository;
pub mod ndjson_stream;
