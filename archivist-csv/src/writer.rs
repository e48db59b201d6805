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
use archivist_core::archive::{join_path, ArchiveScope, NoScope};
use archivist_core::config::SerializationOptions;
use archivist_core::error::Error;
use archivist_core::resolver::context::SerializationContext;
use archivist_core::serializer::number::Scalar;
use archivist_core::serializer::string::ArchiveString;
use archivist_core::types::{ScopeRole, SerializeMode};

use crate::{CsvRow, CsvTable, PATH_SEPARATOR};

/// Root scope building a table.
pub struct CsvWriter<'a> {
    table: &'a mut CsvTable,
    context: &'a mut SerializationContext,
}

impl<'a> CsvWriter<'a> {
    pub fn new(table: &'a mut CsvTable, context: &'a mut SerializationContext) -> Self {
        CsvWriter { table, context }
    }
}

impl<'a> ArchiveScope for CsvWriter<'a> {
    type Key = str;
    type ObjectScope<'b> = NoScope<str> where Self: 'b;
    type ArrayScope<'b> = CsvRowsWriter<'b> where Self: 'b;

    const MODE: SerializeMode = SerializeMode::Save;
    const ROLE: ScopeRole = ScopeRole::Root;
    const CAPABILITIES: Capabilities = Capabilities::ARRAY;

    fn context(&mut self) -> &mut SerializationContext {
        self.context
    }

    fn options(&self) -> &SerializationOptions {
        self.context.options()
    }

    fn path(&self) -> String {
        String::new()
    }

    fn open_array_scope(&mut self, size_hint: usize) -> Result<Option<CsvRowsWriter<'_>>, Error> {
        self.table.rows.reserve(size_hint);
        Ok(Some(CsvRowsWriter {
            table: self.table,
            context: self.context,
        }))
    }
}

/// Appends one row per opened object.
pub struct CsvRowsWriter<'a> {
    table: &'a mut CsvTable,
    context: &'a mut SerializationContext,
}

impl<'a> ArchiveScope for CsvRowsWriter<'a> {
    type Key = str;
    type ObjectScope<'b> = CsvRowWriter<'b> where Self: 'b;
    type ArrayScope<'b> = NoScope<str> where Self: 'b;

    const MODE: SerializeMode = SerializeMode::Save;
    const ROLE: ScopeRole = ScopeRole::Array;
    const CAPABILITIES: Capabilities = Capabilities::OBJECT;

    fn context(&mut self) -> &mut SerializationContext {
        self.context
    }

    fn options(&self) -> &SerializationOptions {
        self.context.options()
    }

    fn path(&self) -> String {
        join_path("", PATH_SEPARATOR, self.table.rows.len().saturating_sub(1))
    }

    fn open_object_scope(&mut self) -> Result<Option<CsvRowWriter<'_>>, Error> {
        let index = self.table.rows.len();
        let cells = vec![String::new(); self.table.header.len()];
        self.table.rows.push(CsvRow { cells, line: 0 });
        Ok(Some(CsvRowWriter {
            table: self.table,
            index,
            context: self.context,
            path: join_path("", PATH_SEPARATOR, index),
        }))
    }

    fn estimated_size(&self) -> usize {
        self.table.rows.len()
    }
}

/// One row under construction.
///
/// The first row defines the columns in the order its members are written;
/// later rows may only use those columns.
pub struct CsvRowWriter<'a> {
    table: &'a mut CsvTable,
    index: usize,
    context: &'a mut SerializationContext,
    path: String,
}

impl<'a> CsvRowWriter<'a> {
    fn put(&mut self, key: &str, text: String) -> Result<(), Error> {
        let column = match self.table.column(key) {
            Some(column) => column,
            None if self.index == 0 => {
                self.table.header.push(key.to_string());
                self.table.header.len() - 1
            }
            None => {
                return Err(Error::invalid_data(format!(
                    "column '{}' at '{}' is not in the csv header",
                    key,
                    join_path(&self.path, PATH_SEPARATOR, key)
                )))
            }
        };
        let width = self.table.header.len();
        let row = self
            .table
            .rows
            .get_mut(self.index)
            .ok_or_else(|| Error::unknown(format!("row '{}' is missing", self.path)))?;
        if row.cells.len() < width {
            row.cells.resize(width, String::new());
        }
        row.cells[column] = text;
        Ok(())
    }
}

impl<'a> ArchiveScope for CsvRowWriter<'a> {
    type Key = str;
    type ObjectScope<'b> = NoScope<str> where Self: 'b;
    type ArrayScope<'b> = NoScope<str> where Self: 'b;

    const MODE: SerializeMode = SerializeMode::Save;
    const ROLE: ScopeRole = ScopeRole::Object;
    const CAPABILITIES: Capabilities = Capabilities::KEYED_VALUE
        .union(Capabilities::KEYED_STRING)
        .union(Capabilities::KEY_ENUMERATION);

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
        self.put(key, value.to_text())?;
        Ok(true)
    }

    fn serialize_string_with_key<T: ArchiveString>(
        &mut self,
        key: &str,
        value: &mut T,
    ) -> Result<bool, Error> {
        let text = value.to_utf8()?.into_owned();
        self.put(key, text)?;
        Ok(true)
    }

    fn estimated_size(&self) -> usize {
        self.table.header.len()
    }

    fn key_by_index(&self, index: usize) -> Option<String> {
        self.table.header.get(index).cloned()
    }
}
