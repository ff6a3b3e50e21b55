// Copyright (c) 2022-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! A small generic result/error pair used by leaf APIs (e.g. [`TuiStylesheet`]) that
//! need to fail with a message but don't warrant their own `thiserror` enum.
//!
//! [`TuiStylesheet`]: crate::TuiStylesheet

use std::fmt::Display;

use miette::Diagnostic;
use thiserror::Error;

pub type CommonResult<T> = std::result::Result<T, CommonError>;

#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
#[error("{msg}")]
pub struct CommonError {
    pub msg: String,
}

impl CommonError {
    #[must_use]
    pub fn new_error_result_with_only_msg<T>(msg: impl Display) -> CommonResult<T> {
        Err(Self { msg: msg.to_string() })
    }
}
