// Adapters layer: concrete implementations for external systems
// (management CLI processes, repository HTTP APIs, local files).

pub mod http;
pub mod invenio_cli;
pub mod storage;
