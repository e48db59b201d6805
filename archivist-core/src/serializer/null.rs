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

use crate::serializer::number::{mismatched, Scalar, ScalarError, ScalarValue};
use crate::types::ScalarKind;

/// The null value. Saves as the format's null and only loads from it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Null;

impl fmt::Display for Null {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("null")
    }
}

impl Scalar for Null {
    const KIND: ScalarKind = ScalarKind::Null;
    const TYPE_NAME: &'static str = "null";

    #[inline(always)]
    fn to_scalar(self) -> ScalarValue {
        ScalarValue::Null
    }

    fn from_scalar(value: ScalarValue) -> Result<Self, ScalarError> {
        match value {
            ScalarValue::Null => Ok(Null),
            other => Err(mismatched::<Null>(other.kind_name())),
        }
    }

    fn from_text(text: &str) -> Result<Self, ScalarError> {
        match text.trim() {
            "null" | "~" => Ok(Null),
            other => Err(mismatched::<Null>(format_args!("'{}'", other))),
        }
    }
}

impl_value_serialize!(Null);
