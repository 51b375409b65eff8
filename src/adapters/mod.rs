// Adapters layer: concrete implementations for external systems (Slack API, group stores).
// File- and S3-backed stores live next to their configs under src/config.

pub mod memory;
pub mod slack;
