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

use archivist_core::archive::capability::Capabilities;
use archivist_core::archive::ArchiveScope;
use archivist_core::config::SerializationOptions;
use archivist_core::error::Error;
use archivist_core::resolver::context::SerializationContext;
use archivist_core::serializer::number::Scalar;
use archivist_core::serializer::string::ArchiveString;
use archivist_core::types::{ScopeRole, SerializeMode};
use serde_yaml::{Mapping, Sequence, Value};

use crate::{element_path, from_scalar, key_text, member_path};

const UNNAMED: Capabilities = Capabilities::VALUE
    .union(Capabilities::STRING)
    .union(Capabilities::OBJECT)
    .union(Capabilities::ARRAY);

const NAMED: Capabilities = Capabilities::KEYED_VALUE
    .union(Capabilities::KEYED_STRING)
    .union(Capabilities::KEYED_OBJECT)
    .union(Capabilities::KEYED_ARRAY)
    .union(Capabilities::KEY_ENUMERATION);

fn string_value<T: ArchiveString>(value: &T) -> Result<Value, Error> {
    Ok(Value::String(value.to_utf8()?.into_owned()))
}

fn new_object<'b>(slot: &'b mut Value, path: &str) -> Result<&'b mut Mapping, Error> {
    *slot = Value::Mapping(Mapping::new());
    slot.as_mapping_mut()
        .ok_or_else(|| Error::unknown(format!("failed to create mapping at '{}'", path)))
}

fn new_array<'b>(slot: &'b mut Value, path: &str, size_hint: usize) -> Result<&'b mut Sequence, Error> {
    *slot = Value::Sequence(Sequence::with_capacity(size_hint));
    slot.as_sequence_mut()
        .ok_or_else(|| Error::unknown(format!("failed to create sequence at '{}'", path)))
}

/// Inserts an empty member `key` and returns its slot.
fn member_slot<'b>(map: &'b mut Mapping, key: &str, path: &str) -> Result<&'b mut Value, Error> {
    let key = Value::String(key.to_string());
    map.insert(key.clone(), Value::Null);
    map.get_mut(&key)
        .ok_or_else(|| Error::unknown(format!("failed to insert member at '{}'", path)))
}

/// Root scope writing into an empty document.
pub struct YamlWriter<'a> {
    output: &'a mut Value,
    context: &'a mut SerializationContext,
}

impl<'a> YamlWriter<'a> {
    pub fn new(output: &'a mut Value, context: &'a mut SerializationContext) -> Self {
        YamlWriter { output, context }
    }
}

impl<'a> ArchiveScope for YamlWriter<'a> {
    type Key = str;
    type ObjectScope<'b> = YamlObjectWriter<'b> where Self: 'b;
    type ArrayScope<'b> = YamlArrayWriter<'b> where Self: 'b;

    const MODE: SerializeMode = SerializeMode::Save;
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
        *self.output = from_scalar(*value);
        Ok(())
    }

    fn serialize_string<T: ArchiveString>(&mut self, value: &mut T) -> Result<(), Error> {
        *self.output = string_value(value)?;
        Ok(())
    }

    fn open_object_scope(&mut self) -> Result<Option<YamlObjectWriter<'_>>, Error> {
        let map = new_object(self.output, "")?;
        Ok(Some(YamlObjectWriter::new(map, self.context, String::new())))
    }

    fn open_array_scope(&mut self, size_hint: usize) -> Result<Option<YamlArrayWriter<'_>>, Error> {
        let items = new_array(self.output, "", size_hint)?;
        Ok(Some(YamlArrayWriter::new(items, self.context, String::new())))
    }
}

/// Scope writing the members of a YAML mapping in insertion order.
pub struct YamlObjectWriter<'a> {
    map: &'a mut Mapping,
    context: &'a mut SerializationContext,
    path: String,
}

impl<'a> YamlObjectWriter<'a> {
    fn new(map: &'a mut Mapping, context: &'a mut SerializationContext, path: String) -> Self {
        YamlObjectWriter { map, context, path }
    }
}

impl<'a> ArchiveScope for YamlObjectWriter<'a> {
    type Key = str;
    type ObjectScope<'b> = YamlObjectWriter<'b> where Self: 'b;
    type ArrayScope<'b> = YamlArrayWriter<'b> where Self: 'b;

    const MODE: SerializeMode = SerializeMode::Save;
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
        self.map.insert(Value::String(key.to_string()), from_scalar(*value));
        Ok(true)
    }

    fn serialize_string_with_key<T: ArchiveString>(
        &mut self,
        key: &str,
        value: &mut T,
    ) -> Result<bool, Error> {
        let encoded = string_value(value)?;
        self.map.insert(Value::String(key.to_string()), encoded);
        Ok(true)
    }

    fn open_object_scope_with_key(&mut self, key: &str) -> Result<Option<YamlObjectWriter<'_>>, Error> {
        let path = member_path(&self.path, key);
        let map = new_object(member_slot(self.map, key, &path)?, &path)?;
        Ok(Some(YamlObjectWriter::new(map, self.context, path)))
    }

    fn open_array_scope_with_key(
        &mut self,
        key: &str,
        size_hint: usize,
    ) -> Result<Option<YamlArrayWriter<'_>>, Error> {
        let path = member_path(&self.path, key);
        let items = new_array(member_slot(self.map, key, &path)?, &path, size_hint)?;
        Ok(Some(YamlArrayWriter::new(items, self.context, path)))
    }

    fn estimated_size(&self) -> usize {
        self.map.len()
    }

    fn key_by_index(&self, index: usize) -> Option<String> {
        self.map.iter().nth(index).and_then(|(k, _)| key_text(k))
    }
}

/// Scope appending elements to a YAML sequence.
pub struct YamlArrayWriter<'a> {
    items: &'a mut Sequence,
    context: &'a mut SerializationContext,
    path: String,
}

impl<'a> YamlArrayWriter<'a> {
    fn new(items: &'a mut Sequence, context: &'a mut SerializationContext, path: String) -> Self {
        YamlArrayWriter { items, context, path }
    }

    fn next_path(&self) -> String {
        element_path(&self.path, self.items.len())
    }
}

impl<'a> ArchiveScope for YamlArrayWriter<'a> {
    type Key = str;
    type ObjectScope<'b> = YamlObjectWriter<'b> where Self: 'b;
    type ArrayScope<'b> = YamlArrayWriter<'b> where Self: 'b;

    const MODE: SerializeMode = SerializeMode::Save;
    const ROLE: ScopeRole = ScopeRole::Array;
    const CAPABILITIES: Capabilities = UNNAMED;

    fn context(&mut self) -> &mut SerializationContext {
        self.context
    }

    fn options(&self) -> &SerializationOptions {
        self.context.options()
    }

    fn path(&self) -> String {
        element_path(&self.path, self.items.len().saturating_sub(1))
    }

    fn serialize_value<V: Scalar>(&mut self, value: &mut V) -> Result<(), Error> {
        self.items.push(from_scalar(*value));
        Ok(())
    }

    fn serialize_string<T: ArchiveString>(&mut self, value: &mut T) -> Result<(), Error> {
        let encoded = string_value(value)?;
        self.items.push(encoded);
        Ok(())
    }

    fn open_object_scope(&mut self) -> Result<Option<YamlObjectWriter<'_>>, Error> {
        let path = self.next_path();
        let index = self.items.len();
        self.items.push(Value::Null);
        let map = new_object(&mut self.items[index], &path)?;
        Ok(Some(YamlObjectWriter::new(map, self.context, path)))
    }

    fn open_array_scope(&mut self, size_hint: usize) -> Result<Option<YamlArrayWriter<'_>>, Error> {
        let path = self.next_path();
        let index = self.items.len();
        self.items.push(Value::Null);
        let items = new_array(&mut self.items[index], &path, size_hint)?;
        Ok(Some(YamlArrayWriter::new(items, self.context, path)))
    }

    fn estimated_size(&self) -> usize {
        self.items.len()
    }
}
