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

use std::cell::OnceCell;

use archivist_core::archive::capability::Capabilities;
use archivist_core::archive::ArchiveScope;
use archivist_core::config::SerializationOptions;
use archivist_core::error::Error;
use archivist_core::resolver::context::SerializationContext;
use archivist_core::serializer::number::Scalar;
use archivist_core::serializer::string::ArchiveString;
use archivist_core::types::{ScopeRole, SerializeMode};
use serde_json::{Map, Value};

use crate::{element_path, kind_name, member_path, to_scalar};

const UNNAMED: Capabilities = Capabilities::VALUE
    .union(Capabilities::STRING)
    .union(Capabilities::OBJECT)
    .union(Capabilities::ARRAY);

const NAMED: Capabilities = Capabilities::KEYED_VALUE
    .union(Capabilities::KEYED_STRING)
    .union(Capabilities::KEYED_OBJECT)
    .union(Capabilities::KEYED_ARRAY)
    .union(Capabilities::KEY_ENUMERATION);

fn load_value<V: Scalar>(
    context: &mut SerializationContext,
    source: &Value,
    path: impl FnOnce() -> String,
    value: &mut V,
) -> Result<(), Error> {
    context.apply_loaded(path, to_scalar(source), value)
}

fn load_string<T: ArchiveString>(
    context: &mut SerializationContext,
    source: &Value,
    path: impl FnOnce() -> String,
    value: &mut T,
) -> Result<(), Error> {
    match source {
        Value::String(text) => {
            *value = T::from_utf8(text);
            Ok(())
        }
        other => context.on_mismatched_type(
            path(),
            format!("expected string, found {}", kind_name(other)),
        ),
    }
}

/// Opens `source` as an object, or reports the wrong kind.
fn open_object<'b>(
    context: &'b mut SerializationContext,
    source: &'b Value,
    path: String,
) -> Result<Option<JsonObjectReader<'b>>, Error> {
    match source {
        Value::Object(map) => Ok(Some(JsonObjectReader::new(map, context, path))),
        other => {
            let message = format!("expected object, found {}", kind_name(other));
            context.on_mismatched_type(path, message)?;
            Ok(None)
        }
    }
}

fn open_array<'b>(
    context: &'b mut SerializationContext,
    source: &'b Value,
    path: String,
) -> Result<Option<JsonArrayReader<'b>>, Error> {
    match source {
        Value::Array(items) => Ok(Some(JsonArrayReader::new(items, context, path))),
        other => {
            let message = format!("expected array, found {}", kind_name(other));
            context.on_mismatched_type(path, message)?;
            Ok(None)
        }
    }
}

/// Root scope over a parsed document.
pub struct JsonReader<'a> {
    document: &'a Value,
    context: &'a mut SerializationContext,
}

impl<'a> JsonReader<'a> {
    pub fn new(document: &'a Value, context: &'a mut SerializationContext) -> Self {
        JsonReader { document, context }
    }
}

impl<'a> ArchiveScope for JsonReader<'a> {
    type Key = str;
    type ObjectScope<'b> = JsonObjectReader<'b> where Self: 'b;
    type ArrayScope<'b> = JsonArrayReader<'b> where Self: 'b;

    const MODE: SerializeMode = SerializeMode::Load;
    const ROLE: ScopeRole = ScopeRole::Root;
    const CAPABILITIES: Capabilities = UNNAMED;

    fn context(&mut self) -> &mut SerializationContext {
        self.context
    }

    fn options(&self) -> &SerializationOptions {
        self.context.options()
    }

    fn path(&self) -> String {
        String::new()
    }

    fn serialize_value<V: Scalar>(&mut self, value: &mut V) -> Result<(), Error> {
        load_value(self.context, self.document, String::new, value)
    }

    fn serialize_string<T: ArchiveString>(&mut self, value: &mut T) -> Result<(), Error> {
        load_string(self.context, self.document, String::new, value)
    }

    fn open_object_scope(&mut self) -> Result<Option<JsonObjectReader<'_>>, Error> {
        open_object(self.context, self.document, String::new())
    }

    fn open_array_scope(&mut self, _: usize) -> Result<Option<JsonArrayReader<'_>>, Error> {
        open_array(self.context, self.document, String::new())
    }
}

/// Scope over a JSON object.
pub struct JsonObjectReader<'a> {
    map: &'a Map<String, Value>,
    context: &'a mut SerializationContext,
    path: String,
    keys: OnceCell<Vec<&'a str>>,
}

impl<'a> JsonObjectReader<'a> {
    fn new(map: &'a Map<String, Value>, context: &'a mut SerializationContext, path: String) -> Self {
        JsonObjectReader {
            map,
            context,
            path,
            keys: OnceCell::new(),
        }
    }
}

impl<'a> ArchiveScope for JsonObjectReader<'a> {
    type Key = str;
    type ObjectScope<'b> = JsonObjectReader<'b> where Self: 'b;
    type ArrayScope<'b> = JsonArrayReader<'b> where Self: 'b;

    const MODE: SerializeMode = SerializeMode::Load;
    const ROLE: ScopeRole = ScopeRole::Object;
    const CAPABILITIES: Capabilities = NAMED;

    fn context(&mut self) -> &mut SerializationContext {
        self.context
    }

    fn options(&self) -> &SerializationOptions {
        self.context.options()
    }

    fn path(&self) -> String {
        self.path.clone()
    }

    fn serialize_value_with_key<V: Scalar>(&mut self, key: &str, value: &mut V) -> Result<bool, Error> {
        match self.map.get(key) {
            Some(source) => {
                load_value(self.context, source, || member_path(&self.path, key), value)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn serialize_string_with_key<T: ArchiveString>(
        &mut self,
        key: &str,
        value: &mut T,
    ) -> Result<bool, Error> {
        match self.map.get(key) {
            Some(source) => {
                load_string(self.context, source, || member_path(&self.path, key), value)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn open_object_scope_with_key(&mut self, key: &str) -> Result<Option<JsonObjectReader<'_>>, Error> {
        match self.map.get(key) {
            Some(source) => open_object(self.context, source, member_path(&self.path, key)),
            None => Ok(None),
        }
    }

    fn open_array_scope_with_key(
        &mut self,
        key: &str,
        _: usize,
    ) -> Result<Option<JsonArrayReader<'_>>, Error> {
        match self.map.get(key) {
            Some(source) => open_array(self.context, source, member_path(&self.path, key)),
            None => Ok(None),
        }
    }

    fn estimated_size(&self) -> usize {
        self.map.len()
    }

    fn key_by_index(&self, index: usize) -> Option<String> {
        let map = self.map;
        self.keys
            .get_or_init(|| map.keys().map(String::as_str).collect())
            .get(index)
            .map(|key| key.to_string())
    }
}

/// Scope over a JSON array, read front to back.
pub struct JsonArrayReader<'a> {
    items: &'a [Value],
    context: &'a mut SerializationContext,
    path: String,
    index: usize,
}

impl<'a> JsonArrayReader<'a> {
    fn new(items: &'a [Value], context: &'a mut SerializationContext, path: String) -> Self {
        JsonArrayReader {
            items,
            context,
            path,
            index: 0,
        }
    }

    fn next_item(&mut self) -> Result<(&'a Value, String), Error> {
        let items = self.items;
        match items.get(self.index) {
            Some(item) => {
                let path = element_path(&self.path, self.index);
                self.index += 1;
                Ok((item, path))
            }
            None => Err(Error::out_of_range(format!(
                "no more elements to load in array at '{}', size {}",
                self.path,
                items.len()
            ))),
        }
    }
}

impl<'a> ArchiveScope for JsonArrayReader<'a> {
    type Key = str;
    type ObjectScope<'b> = JsonObjectReader<'b> where Self: 'b;
    type ArrayScope<'b> = JsonArrayReader<'b> where Self: 'b;

    const MODE: SerializeMode = SerializeMode::Load;
    const ROLE: ScopeRole = ScopeRole::Array;
    const CAPABILITIES: Capabilities = UNNAMED;

    fn context(&mut self) -> &mut SerializationContext {
        self.context
    }

    fn options(&self) -> &SerializationOptions {
        self.context.options()
    }

    fn path(&self) -> String {
        element_path(&self.path, self.index.saturating_sub(1))
    }

    fn serialize_value<V: Scalar>(&mut self, value: &mut V) -> Result<(), Error> {
        let (source, path) = self.next_item()?;
        load_value(self.context, source, || path, value)
    }

    fn serialize_string<T: ArchiveString>(&mut self, value: &mut T) -> Result<(), Error> {
        let (source, path) = self.next_item()?;
        load_string(self.context, source, || path, value)
    }

    fn open_object_scope(&mut self) -> Result<Option<JsonObjectReader<'_>>, Error> {
        let (source, path) = self.next_item()?;
        open_object(self.context, source, path)
    }

    fn open_array_scope(&mut self, _: usize) -> Result<Option<JsonArrayReader<'_>>, Error> {
        let (source, path) = self.next_item()?;
        open_array(self.context, source, path)
    }

    fn estimated_size(&self) -> usize {
        self.items.len()
    }

    fn is_end(&self) -> bool {
        self.index >= self.items.len()
    }
}
