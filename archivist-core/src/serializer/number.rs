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

use std::fmt;
use std::num::IntErrorKind;

use crate::types::ScalarKind;

/// A fundamental value as seen by a backend.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScalarValue {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
}

impl ScalarValue {
    pub fn kind_name(&self) -> &'static str {
        match self {
            ScalarValue::Null => "null",
            ScalarValue::Bool(_) => "boolean",
            ScalarValue::Int(_) => "signed integer",
            ScalarValue::UInt(_) => "unsigned integer",
            ScalarValue::Float(_) => "floating point",
        }
    }
}

/// Why a source value could not be converted into the destination type.
///
/// Converted into the matching policy by
/// [`SerializationContext::apply_loaded`](crate::resolver::context::SerializationContext::apply_loaded).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScalarError {
    Overflow(String),
    MismatchedType(String),
}

/// Fundamental value types: booleans, integers and floating point numbers.
pub trait Scalar: Copy + Default + PartialOrd + fmt::Display + 'static {
    const KIND: ScalarKind;
    const TYPE_NAME: &'static str;

    fn to_scalar(self) -> ScalarValue;

    fn from_scalar(value: ScalarValue) -> Result<Self, ScalarError>;

    /// Parses the textual form used by text-only formats.
    fn from_text(text: &str) -> Result<Self, ScalarError>;

    fn to_text(self) -> String {
        self.to_string()
    }
}

#[cold]
pub(crate) fn mismatched<T: Scalar>(found: impl fmt::Display) -> ScalarError {
    ScalarError::MismatchedType(format!("expected {}, found {}", T::KIND, found))
}

#[cold]
pub(crate) fn overflow<T: Scalar>(value: impl fmt::Display) -> ScalarError {
    ScalarError::Overflow(format!("value {} does not fit into {}", value, T::TYPE_NAME))
}

/// Numeric text that is not an integer, such as `1.5` or `2e3`.
pub(crate) fn is_float_text(text: &str) -> bool {
    text.parse::<f64>().is_ok_and(|v| v.is_finite())
}

macro_rules! impl_int_scalar {
    ($ty:ty, $kind:expr) => {
        impl Scalar for $ty {
            const KIND: ScalarKind = $kind;
            const TYPE_NAME: &'static str = stringify!($ty);

            #[inline(always)]
            fn to_scalar(self) -> ScalarValue {
                match i64::try_from(self) {
                    Ok(v) => ScalarValue::Int(v),
                    // only large unsigned values end up here
                    Err(_) => ScalarValue::UInt(self as u64),
                }
            }

            #[inline]
            fn from_scalar(value: ScalarValue) -> Result<Self, ScalarError> {
                match value {
                    ScalarValue::Int(v) => <$ty>::try_from(v).map_err(|_| overflow::<$ty>(v)),
                    ScalarValue::UInt(v) => <$ty>::try_from(v).map_err(|_| overflow::<$ty>(v)),
                    // fractional part and range are lost alike
                    ScalarValue::Float(v) => Err(overflow::<$ty>(v)),
                    other => Err(mismatched::<$ty>(other.kind_name())),
                }
            }

            fn from_text(text: &str) -> Result<Self, ScalarError> {
                let text = text.trim();
                match text.parse::<i128>() {
                    Ok(v) => <$ty>::try_from(v).map_err(|_| overflow::<$ty>(v)),
                    Err(e) => match e.kind() {
                        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
                            Err(overflow::<$ty>(text))
                        }
                        _ if is_float_text(text) => Err(overflow::<$ty>(text)),
                        _ => Err(mismatched::<$ty>(format_args!("'{}'", text))),
                    },
                }
            }
        }
    };
}

macro_rules! impl_float_scalar {
    ($ty:ty, $widen:path) => {
        impl Scalar for $ty {
            const KIND: ScalarKind = ScalarKind::Float;
            const TYPE_NAME: &'static str = stringify!($ty);

            #[inline(always)]
            fn to_scalar(self) -> ScalarValue {
                ScalarValue::Float($widen(self))
            }

            #[inline]
            fn from_scalar(value: ScalarValue) -> Result<Self, ScalarError> {
                match value {
                    ScalarValue::Int(v) => Ok(v as $ty),
                    ScalarValue::UInt(v) => Ok(v as $ty),
                    ScalarValue::Float(v) => {
                        if v.is_finite() && (v as $ty).is_infinite() {
                            Err(overflow::<$ty>(v))
                        } else {
                            Ok(v as $ty)
                        }
                    }
                    other => Err(mismatched::<$ty>(other.kind_name())),
                }
            }

            fn from_text(text: &str) -> Result<Self, ScalarError> {
                let text = text.trim();
                match text.parse::<f64>() {
                    Ok(v) => Self::from_scalar(ScalarValue::Float(v)),
                    Err(_) => Err(mismatched::<$ty>(format_args!("'{}'", text))),
                }
            }
        }
    };
}

impl_int_scalar!(i8, ScalarKind::SignedInt);
impl_int_scalar!(i16, ScalarKind::SignedInt);
impl_int_scalar!(i32, ScalarKind::SignedInt);
impl_int_scalar!(i64, ScalarKind::SignedInt);
impl_int_scalar!(isize, ScalarKind::SignedInt);
impl_int_scalar!(u8, ScalarKind::UnsignedInt);
impl_int_scalar!(u16, ScalarKind::UnsignedInt);
impl_int_scalar!(u32, ScalarKind::UnsignedInt);
impl_int_scalar!(u64, ScalarKind::UnsignedInt);
impl_int_scalar!(usize, ScalarKind::UnsignedInt);
impl_float_scalar!(f32, widen_f32);
impl_float_scalar!(f64, f64::from);

/// Widens through the shortest decimal form, so `1.1f32` stays `1.1`.
fn widen_f32(value: f32) -> f64 {
    if value.is_finite() {
        value.to_string().parse().unwrap_or(value as f64)
    } else {
        value as f64
    }
}

impl_value_serialize!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);
