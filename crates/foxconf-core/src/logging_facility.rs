//! Structured logging
//!
//! - [`init`] installs the process-wide subscriber for a [`Profile`]
//! - `log_op_start!`, `log_op_end!` and `log_op_error!` mark the boundaries of
//!   parse, apply and marshal with the field names from
//!   `foxconf_core_types::schema`
//! - [`test_capture`] records events in memory for assertions

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
