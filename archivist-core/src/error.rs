// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Error type shared by the engine and every archive backend.
//!
//! Error constructors are marked `#[cold]` so that the happy path of value
//! conversion stays small; keep the attributes when adding new constructors.

use std::borrow::Cow;

use thiserror::Error;

use crate::resolver::context::ValidationErrors;

/// Set `ARCHIVIST_PANIC_ON_ERROR=1` at compile time to panic where an error is created.
pub const PANIC_ON_ERROR: bool = option_env!("ARCHIVIST_PANIC_ON_ERROR").is_some();

/// Check if `ARCHIVIST_PANIC_ON_ERROR` was set at compile time.
#[inline(always)]
pub const fn should_panic_on_error() -> bool {
    PANIC_ON_ERROR
}

fn fmt_column(column: &Option<usize>) -> String {
    match column {
        Some(column) => format!(", column {}", column),
        None => String::new(),
    }
}

/// Error type for archive loading and saving.
///
/// # Always Use Static Constructor Functions
///
/// Do not construct variants directly, use [`Error::parsing`],
/// [`Error::mismatched_type`], [`Error::overflow`] and friends instead. They
/// accept anything convertible into `Cow<'static, str>` and honor
/// `ARCHIVIST_PANIC_ON_ERROR`:
///
/// ```bash
/// RUST_BACKTRACE=1 ARCHIVIST_PANIC_ON_ERROR=1 cargo test
/// ```
///
/// ```rust
/// use archivist_core::error::Error;
///
/// let err = Error::overflow("/x", "value 300 does not fit into i8");
/// assert!(matches!(err, Error::Overflow { .. }));
/// ```
///
/// Policy-controlled kinds ([`Error::MismatchedType`], [`Error::Overflow`]) are only
/// returned when the corresponding policy is `ThrowError`; with `Skip` they end up
/// as messages inside the final [`Error::Validation`].
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Malformed source document.
    #[error("parse error at line {line}{}: {message}", fmt_column(.column))]
    Parsing {
        message: Cow<'static, str>,
        line: usize,
        column: Option<usize>,
    },

    /// The archive scope does not implement the requested operation, or an option
    /// value is not supported by the backend.
    #[error("{0}")]
    Unsupported(Cow<'static, str>),

    /// The source value kind is incompatible with the destination.
    #[error("mismatched type at '{path}': {message}")]
    MismatchedType {
        path: String,
        message: Cow<'static, str>,
    },

    /// A number does not fit into the destination type.
    #[error("overflow at '{path}': {message}")]
    Overflow {
        path: String,
        message: Cow<'static, str>,
    },

    /// Element count exceeds the destination capacity, or an array was read past its end.
    #[error("{0}")]
    OutOfRange(Cow<'static, str>),

    /// Enum value without a registered name.
    #[error("{0}")]
    UnknownEnum(Cow<'static, str>),

    /// Input bytes are not valid in the selected text encoding.
    #[error("{0}")]
    EncodingError(Cow<'static, str>),

    /// Structurally invalid data for the backend.
    #[error("{0}")]
    InvalidData(Cow<'static, str>),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Aggregate of every validation message recorded during one top-level call.
    #[error("{0}")]
    Validation(ValidationErrors),

    /// Generic unknown error.
    #[error("{0}")]
    Unknown(Cow<'static, str>),
}

impl Error {
    /// Creates a new [`Error::Parsing`] at the given 1-based line.
    ///
    /// ```
    /// use archivist_core::error::Error;
    ///
    /// let err = Error::parsing("unterminated quoted field", 3, None);
    /// assert_eq!(err.line(), Some(3));
    /// ```
    #[inline(always)]
    #[cold]
    #[track_caller]
    pub fn parsing<S: Into<Cow<'static, str>>>(
        message: S,
        line: usize,
        column: Option<usize>,
    ) -> Self {
        let err = Error::Parsing {
            message: message.into(),
            line,
            column,
        };
        if PANIC_ON_ERROR {
            panic!("ARCHIVIST_PANIC_ON_ERROR: {}", err);
        }
        err
    }

    /// Creates a new [`Error::Unsupported`].
    #[inline(always)]
    #[cold]
    #[track_caller]
    pub fn unsupported<S: Into<Cow<'static, str>>>(s: S) -> Self {
        let err = Error::Unsupported(s.into());
        if PANIC_ON_ERROR {
            panic!("ARCHIVIST_PANIC_ON_ERROR: {}", err);
        }
        err
    }

    /// Creates a new [`Error::MismatchedType`] for the value at `path`.
    #[inline(always)]
    #[cold]
    #[track_caller]
    pub fn mismatched_type<P: Into<String>, S: Into<Cow<'static, str>>>(path: P, message: S) -> Self {
        let err = Error::MismatchedType {
            path: path.into(),
            message: message.into(),
        };
        if PANIC_ON_ERROR {
            panic!("ARCHIVIST_PANIC_ON_ERROR: {}", err);
        }
        err
    }

    /// Creates a new [`Error::Overflow`] for the value at `path`.
    #[inline(always)]
    #[cold]
    #[track_caller]
    pub fn overflow<P: Into<String>, S: Into<Cow<'static, str>>>(path: P, message: S) -> Self {
        let err = Error::Overflow {
            path: path.into(),
            message: message.into(),
        };
        if PANIC_ON_ERROR {
            panic!("ARCHIVIST_PANIC_ON_ERROR: {}", err);
        }
        err
    }

    /// Creates a new [`Error::OutOfRange`].
    #[inline(always)]
    #[cold]
    #[track_caller]
    pub fn out_of_range<S: Into<Cow<'static, str>>>(s: S) -> Self {
        let err = Error::OutOfRange(s.into());
        if PANIC_ON_ERROR {
            panic!("ARCHIVIST_PANIC_ON_ERROR: {}", err);
        }
        err
    }

    /// Creates a new [`Error::UnknownEnum`].
    #[inline(always)]
    #[cold]
    #[track_caller]
    pub fn unknown_enum<S: Into<Cow<'static, str>>>(s: S) -> Self {
        let err = Error::UnknownEnum(s.into());
        if PANIC_ON_ERROR {
            panic!("ARCHIVIST_PANIC_ON_ERROR: {}", err);
        }
        err
    }

    /// Creates a new [`Error::EncodingError`].
    #[inline(always)]
    #[cold]
    #[track_caller]
    pub fn encoding_error<S: Into<Cow<'static, str>>>(s: S) -> Self {
        let err = Error::EncodingError(s.into());
        if PANIC_ON_ERROR {
            panic!("ARCHIVIST_PANIC_ON_ERROR: {}", err);
        }
        err
    }

    /// Creates a new [`Error::InvalidData`].
    #[inline(always)]
    #[cold]
    #[track_caller]
    pub fn invalid_data<S: Into<Cow<'static, str>>>(s: S) -> Self {
        let err = Error::InvalidData(s.into());
        if PANIC_ON_ERROR {
            panic!("ARCHIVIST_PANIC_ON_ERROR: {}", err);
        }
        err
    }

    /// Creates a new [`Error::Validation`] from the collected messages.
    ///
    /// Not affected by `ARCHIVIST_PANIC_ON_ERROR`: validation failures are expected
    /// outcomes of a load, not programming errors.
    #[inline(always)]
    #[cold]
    pub fn validation(errors: ValidationErrors) -> Self {
        Error::Validation(errors)
    }

    /// Creates a new [`Error::Unknown`].
    #[inline(always)]
    #[cold]
    #[track_caller]
    pub fn unknown<S: Into<Cow<'static, str>>>(s: S) -> Self {
        let err = Error::Unknown(s.into());
        if PANIC_ON_ERROR {
            panic!("ARCHIVIST_PANIC_ON_ERROR: {}", err);
        }
        err
    }

    /// Line of a [`Error::Parsing`] error.
    pub fn line(&self) -> Option<usize> {
        match self {
            Error::Parsing { line, .. } => Some(*line),
            _ => None,
        }
    }

    /// Collected messages of a [`Error::Validation`] error.
    pub fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            Error::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

/// Ensures a condition is true; otherwise returns an [`enum@Error`].
///
/// # Examples
/// ```
/// use archivist_core::ensure;
/// use archivist_core::error::Error;
///
/// fn check_value(n: i32) -> Result<(), Error> {
///     ensure!(n > 0, "value must be positive");
///     ensure!(n < 10, "value {} too large", n);
///     Ok(())
/// }
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $msg:literal) => {
        if !$cond {
            return Err($crate::error::Error::unknown($msg));
        }
    };
    ($cond:expr, $err:expr) => {
        if !$cond {
            return Err($err);
        }
    };
    ($cond:expr, $fmt:expr, $($arg:tt)*) => {
        if !$cond {
            return Err($crate::error::Error::unknown(format!($fmt, $($arg)*)));
        }
    };
}

/// Returns early with an [`enum@Error`].
///
/// # Examples
/// ```
/// use archivist_core::bail;
/// use archivist_core::error::Error;
///
/// fn fail_fast() -> Result<(), Error> {
///     bail!("something went wrong");
/// }
/// ```
#[macro_export]
macro_rules! bail {
    ($err:expr) => {
        return Err($crate::error::Error::unknown($err))
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::error::Error::unknown(format!($fmt, $($arg)*)))
    };
}
