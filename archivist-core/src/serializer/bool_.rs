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

use crate::serializer::number::{is_float_text, mismatched, overflow, Scalar, ScalarError, ScalarValue};
use crate::types::ScalarKind;

impl Scalar for bool {
    const KIND: ScalarKind = ScalarKind::Bool;
    const TYPE_NAME: &'static str = "bool";

    #[inline(always)]
    fn to_scalar(self) -> ScalarValue {
        ScalarValue::Bool(self)
    }

    fn from_scalar(value: ScalarValue) -> Result<Self, ScalarError> {
        match value {
            ScalarValue::Bool(v) => Ok(v),
            ScalarValue::Int(0) | ScalarValue::UInt(0) => Ok(false),
            ScalarValue::Int(1) | ScalarValue::UInt(1) => Ok(true),
            ScalarValue::Int(v) => Err(overflow::<bool>(v)),
            ScalarValue::UInt(v) => Err(overflow::<bool>(v)),
            ScalarValue::Float(v) => Err(overflow::<bool>(v)),
            other => Err(mismatched::<bool>(other.kind_name())),
        }
    }

    fn from_text(text: &str) -> Result<Self, ScalarError> {
        match text.trim() {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            other if other.parse::<i128>().is_ok() || is_float_text(other) => {
                Err(overflow::<bool>(other))
            }
            other => Err(mismatched::<bool>(format_args!("'{}'", other))),
        }
    }
}

impl_value_serialize!(bool);
