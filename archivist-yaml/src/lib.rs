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

//! YAML archive for archivist, built on the `serde_yaml` document model.
//!
//! Scopes follow the JSON archive: the root and sequences take unnamed
//! elements, mappings take named members and can enumerate their keys.
//! Mapping order is preserved. Unlike JSON, non-finite floats are written as
//! `.inf` and `.nan`.

mod reader;
mod writer;

use archivist_core::archive::Archive;
use archivist_core::config::SerializationOptions;
use archivist_core::error::Error;
use archivist_core::resolver::context::SerializationContext;
use archivist_core::serializer::number::{Scalar, ScalarError, ScalarValue};
use serde_yaml::{Mapping, Number, Value};
use tracing::trace;

pub use crate::reader::{YamlArrayReader, YamlObjectReader, YamlReader};
pub use crate::writer::{YamlArrayWriter, YamlObjectWriter, YamlWriter};

pub const PATH_SEPARATOR: char = '/';

/// The YAML format.
#[derive(Clone, Copy, Debug, Default)]
pub struct YamlArchive;

impl Archive for YamlArchive {
    const NAME: &'static str = "yaml";

    type Key = str;
    type Document = Value;
    type Output = Value;
    type Reader<'a> = YamlReader<'a>;
    type Writer<'a> = YamlWriter<'a>;

    fn parse(input: &str, _: &SerializationOptions) -> Result<Value, Error> {
        let document: Value = serde_yaml::from_str(input).map_err(|e| {
            let text = e.to_string();
            // the position is reported separately
            let message = match text.rfind(" at line ") {
                Some(end) => text[..end].to_string(),
                None => text,
            };
            match e.location() {
                Some(location) => {
                    Error::parsing(message, location.line(), Some(location.column()))
                }
                None => Error::parsing(message, 0, None),
            }
        })?;
        trace!(kind = kind_name(&document), "yaml document parsed");
        Ok(document)
    }

    fn reader<'a>(document: &'a Value, context: &'a mut SerializationContext) -> YamlReader<'a> {
        YamlReader::new(document, context)
    }

    fn writer<'a>(output: &'a mut Value, context: &'a mut SerializationContext) -> YamlWriter<'a> {
        YamlWriter::new(output, context)
    }

    fn render(output: &Value, _: &SerializationOptions) -> Result<String, Error> {
        serde_yaml::to_string(output)
            .map_err(|e| Error::invalid_data(format!("failed to render yaml: {}", e)))
    }
}

pub(crate) fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}

pub(crate) fn element_path(base: &str, index: usize) -> String {
    format!("{}{}{}", base, PATH_SEPARATOR, index)
}

pub(crate) fn member_path(base: &str, key: &str) -> String {
    format!("{}{}{}", base, PATH_SEPARATOR, key)
}

/// Text of a mapping key. Keys that are not scalars have none.
pub(crate) fn key_text(key: &Value) -> Option<String> {
    match key {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Looks a member up by its text, so `1: a` is found under the key `"1"`.
pub(crate) fn member<'a>(map: &'a Mapping, key: &str) -> Option<&'a Value> {
    map.get(key).or_else(|| {
        map.iter()
            .find(|(k, _)| !k.is_string() && key_text(k).as_deref() == Some(key))
            .map(|(_, v)| v)
    })
}

/// Converts a YAML value into the scalar type `V`.
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

pub(crate) fn from_scalar<V: Scalar>(value: V) -> Value {
    match value.to_scalar() {
        ScalarValue::Null => Value::Null,
        ScalarValue::Bool(b) => Value::Bool(b),
        ScalarValue::Int(i) => Value::Number(Number::from(i)),
        ScalarValue::UInt(u) => Value::Number(Number::from(u)),
        ScalarValue::Float(f) => Value::Number(Number::from(f)),
    }
}
