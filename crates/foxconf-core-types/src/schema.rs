//! Canonical schema constants for structured logging and events
//!
//! These constants ensure consistency across all logging and error reporting.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";

// Resource identifiers
pub const FIELD_ADDRESS: &str = "address";
pub const FIELD_RESOURCE_TYPE: &str = "resource_type";

// Collection sizes
pub const FIELD_OP_COUNT: &str = "op_count";
pub const FIELD_RESOURCE_COUNT: &str = "resource_count";

// Error fields
pub const FIELD_ERR_KIND: &str = "err_kind";
pub const FIELD_ERR_CODE: &str = "err_code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
