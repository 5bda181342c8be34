//! Canonical logging macros
//!
//! These macros provide a structured, consistent way to log the boundaries of
//! parse, apply and marshal operations.

/// Log the start of an operation
///
/// # Example
///
/// ```
/// # use foxconf_core::log_op_start;
/// log_op_start!("parse_document");
/// log_op_start!("apply_operation", address = "subsystem=fox-platform");
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr) => {
        tracing::info!(
            { foxconf_core_types::schema::FIELD_COMPONENT } = module_path!(),
            { foxconf_core_types::schema::FIELD_OP } = $op,
            { foxconf_core_types::schema::FIELD_EVENT } = foxconf_core_types::schema::EVENT_START,
        );
    };
    ($op:expr, $($field:tt)*) => {
        tracing::info!(
            { foxconf_core_types::schema::FIELD_COMPONENT } = module_path!(),
            { foxconf_core_types::schema::FIELD_OP } = $op,
            { foxconf_core_types::schema::FIELD_EVENT } = foxconf_core_types::schema::EVENT_START,
            $($field)*
        );
    };
}

/// Log the successful end of an operation
///
/// # Example
///
/// ```
/// # use foxconf_core::log_op_end;
/// log_op_end!("parse_document", duration_ms = 42);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr) => {
        tracing::info!(
            { foxconf_core_types::schema::FIELD_COMPONENT } = module_path!(),
            { foxconf_core_types::schema::FIELD_OP } = $op,
            { foxconf_core_types::schema::FIELD_EVENT } = foxconf_core_types::schema::EVENT_END,
            { foxconf_core_types::schema::FIELD_DURATION_MS } = $duration,
        );
    };
    ($op:expr, duration_ms = $duration:expr, $($field:tt)*) => {
        tracing::info!(
            { foxconf_core_types::schema::FIELD_COMPONENT } = module_path!(),
            { foxconf_core_types::schema::FIELD_OP } = $op,
            { foxconf_core_types::schema::FIELD_EVENT } = foxconf_core_types::schema::EVENT_END,
            { foxconf_core_types::schema::FIELD_DURATION_MS } = $duration,
            $($field)*
        );
    };
}

/// Log an operation error
///
/// The error expression must be a [`SubsystemError`](crate::errors::SubsystemError)
/// (or a reference to one); its kind and stable code are attached as fields.
///
/// # Example
///
/// ```
/// # use foxconf_core::{log_op_error, errors::SubsystemError};
/// let err = SubsystemError::DuplicateResource {
///     resource_type: "process engine".to_string(),
///     name: "e1".to_string(),
/// };
/// log_op_error!("apply_operation", err, duration_ms = 10);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr) => {{
        let err: &$crate::errors::SubsystemError = &$err;
        tracing::error!(
            { foxconf_core_types::schema::FIELD_COMPONENT } = module_path!(),
            { foxconf_core_types::schema::FIELD_OP } = $op,
            { foxconf_core_types::schema::FIELD_EVENT } = foxconf_core_types::schema::EVENT_END_ERROR,
            { foxconf_core_types::schema::FIELD_DURATION_MS } = $duration,
            { foxconf_core_types::schema::FIELD_ERR_KIND } = ?err.kind(),
            { foxconf_core_types::schema::FIELD_ERR_CODE } = err.code(),
            error = %err,
        );
    }};
    ($op:expr, $err:expr, duration_ms = $duration:expr, $($field:tt)*) => {{
        let err: &$crate::errors::SubsystemError = &$err;
        tracing::error!(
            { foxconf_core_types::schema::FIELD_COMPONENT } = module_path!(),
            { foxconf_core_types::schema::FIELD_OP } = $op,
            { foxconf_core_types::schema::FIELD_EVENT } = foxconf_core_types::schema::EVENT_END_ERROR,
            { foxconf_core_types::schema::FIELD_DURATION_MS } = $duration,
            { foxconf_core_types::schema::FIELD_ERR_KIND } = ?err.kind(),
            { foxconf_core_types::schema::FIELD_ERR_CODE } = err.code(),
            error = %err,
            $($field)*
        );
    }};
}
