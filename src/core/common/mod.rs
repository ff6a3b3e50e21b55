// Copyright (c) 2022-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod common_result_and_error;
pub mod core_error;
pub mod lru_cache;
pub mod memoized_value;
pub mod miette_setup_global_report_handler;
pub mod telemetry;
pub mod write_to_buf;

// Re-export.
pub use common_result_and_error::*;
pub use core_error::*;
pub use lru_cache::*;
pub use memoized_value::*;
pub use miette_setup_global_report_handler::*;
pub use telemetry::*;
pub use write_to_buf::*;
