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

//! JSON archive for archivist, built on the `serde_json` document model.
//!
//! Member order is preserved. Every scope supports every operation: the root
//! and arrays take unnamed elements, objects take named members and can
//! enumerate their keys.

mod reader;
mod writer;

use archivist_core::archive::Archive;
use archivist_core::config::SerializationOptions;
use archivist_core::error::Error;
use archivist_core::resolver::context::SerializationContext;
use archivist_core::serializer::number::{Scalar, ScalarError, ScalarValue};
use serde_json::{Number, Value};
use tracing::trace;

pub use crate::reader::{JsonArrayReader, JsonObjectReader, JsonReader};
pub use crate::writer::{JsonArrayWriter, JsonObjectWriter, JsonWriter};

pub const PATH_SEPARATOR: char = '/';

/// The JSON format.
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonArchive;

impl Archive for JsonArchive {
    const NAME: &'static str = "json";

    type Key = str;
    type Document = Value;
    type Output = Value;
    type Reader<'a> = JsonReader<'a>;
    type Writer<'a> = JsonWriter<'a>;

    fn parse(input: &str, _: &SerializationOptions) -> Result<Value, Error> {
        let document: Value = serde_json::from_str(input).map_err(|e| {
            let text = e.to_string();
            // the position is reported separately
            let message = match text.rfind(" at line ") {
                Some(end) => text[..end].to_string(),
                None => text,
            };
            Error::parsing(message, e.line(), Some(e.column()))
        })?;
        trace!(kind = kind_name(&document), "json document parsed");
        Ok(document)
    }

    fn reader<'a>(document: &'a Value, context: &'a mut SerializationContext) -> JsonReader<'a> {
        JsonReader::new(document, context)
    }

    fn writer<'a>(output: &'a mut Value, context: &'a mut SerializationContext) -> JsonWriter<'a> {
        JsonWriter::new(output, context)
    }

    fn render(output: &Value, options: &SerializationOptions) -> Result<String, Error> {
        let rendered = if options.is_format_enabled() {
            serde_json::to_string_pretty(output)
        } else {
            serde_json::to_string(output)
        };
        rendered.map_err(|e| Error::invalid_data(format!("failed to render json: {}", e)))
    }
}

pub(crate) fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

pub(crate) fn element_path(base: &str, index: usize) -> String {
    format!("{}{}{}", base, PATH_SEPARATOR, index)
}

pub(crate) fn member_path(base: &str, key: &str) -> String {
    format!("{}{}{}", base, PATH_SEPARATOR, key)
}

/// Converts a JSON value into the scalar type `V`.
pub(crate) fn to_scalar<V: Scalar>(value: &Value) -> Result<V, ScalarError> {
    let scalar = match value {
        Value::Bool(b) => ScalarValue::Bool(*b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                ScalarValue::Int(i)
            } else if let Some(u) = n.as_u64() {
                ScalarValue::UInt(u)
            } else {
                ScalarValue::Float(n.as_f64().unwrap_or(f64::NAN))
            }
        }
        Value::Null => ScalarValue::Null,
        other => {
            return Err(ScalarError::MismatchedType(format!(
                "expected {}, found {}",
                V::KIND,
                kind_name(other)
            )))
        }
    };
    V::from_scalar(scalar)
}

/// Converts a scalar into a JSON value. Non-finite floats have no JSON form.
pub(crate) fn from_scalar<V: Scalar>(value: V, path: impl FnOnce() -> String) -> Result<Value, Error> {
    Ok(match value.to_scalar() {
        ScalarValue::Null => Value::Null,
        ScalarValue::Bool(b) => Value::Bool(b),
        ScalarValue::Int(i) => Value::from(i),
        ScalarValue::UInt(u) => Value::from(u),
        ScalarValue::Float(f) => match Number::from_f64(f) {
            Some(n) => Value::Number(n),
            None => {
                return Err(Error::invalid_data(format!(
                    "{} at '{}' cannot be represented in json",
                    f,
                    path()
                )))
            }
        },
    })
}
