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

/// Root scope over a parsed table. The only thing it holds is the row array.
pub struct CsvReader<'a> {
    table: &'a CsvTable,
    context: &'a mut SerializationContext,
}

impl<'a> CsvReader<'a> {
    pub fn new(table: &'a CsvTable, context: &'a mut SerializationContext) -> Self {
        CsvReader { table, context }
    }
}

impl<'a> ArchiveScope for CsvReader<'a> {
    type Key = str;
    type ObjectScope<'b> = NoScope<str> where Self: 'b;
    type ArrayScope<'b> = CsvRowsReader<'b> where Self: 'b;

    const MODE: SerializeMode = SerializeMode::Load;
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

    fn open_array_scope(&mut self, _: usize) -> Result<Option<CsvRowsReader<'_>>, Error> {
        Ok(Some(CsvRowsReader {
            table: self.table,
            context: self.context,
            index: 0,
        }))
    }
}

/// The array of rows.
pub struct CsvRowsReader<'a> {
    table: &'a CsvTable,
    context: &'a mut SerializationContext,
    index: usize,
}

impl<'a> ArchiveScope for CsvRowsReader<'a> {
    type Key = str;
    type ObjectScope<'b> = CsvRowReader<'b> where Self: 'b;
    type ArrayScope<'b> = NoScope<str> where Self: 'b;

    const MODE: SerializeMode = SerializeMode::Load;
    const ROLE: ScopeRole = ScopeRole::Array;
    const CAPABILITIES: Capabilities = Capabilities::OBJECT;

    fn context(&mut self) -> &mut SerializationContext {
        self.context
    }

    fn options(&self) -> &SerializationOptions {
        self.context.options()
    }

    fn path(&self) -> String {
        join_path("", PATH_SEPARATOR, self.index.saturating_sub(1))
    }

    fn open_object_scope(&mut self) -> Result<Option<CsvRowReader<'_>>, Error> {
        let table = self.table;
        let row = table.rows.get(self.index).ok_or_else(|| {
            Error::out_of_range(format!(
                "no more rows to load, the document has {}",
                table.rows.len()
            ))
        })?;
        let path = join_path("", PATH_SEPARATOR, self.index);
        self.index += 1;
        Ok(Some(CsvRowReader {
            header: &table.header,
            row,
            context: self.context,
            path,
        }))
    }

    fn estimated_size(&self) -> usize {
        self.table.rows.len()
    }

    fn is_end(&self) -> bool {
        self.index >= self.table.rows.len()
    }
}

/// One row, read as an object keyed by the header.
pub struct CsvRowReader<'a> {
    header: &'a [String],
    row: &'a CsvRow,
    context: &'a mut SerializationContext,
    path: String,
}

impl<'a> CsvRowReader<'a> {
    fn cell(&self, key: &str) -> Option<&'a str> {
        let row = self.row;
        self.header
            .iter()
            .position(|column| column == key)
            .and_then(|index| row.cells.get(index))
            .map(String::as_str)
    }

    /// Source line of this row, for diagnostics.
    pub fn line(&self) -> usize {
        self.row.line
    }
}

impl<'a> ArchiveScope for CsvRowReader<'a> {
    type Key = str;
    type ObjectScope<'b> = NoScope<str> where Self: 'b;
    type ArrayScope<'b> = NoScope<str> where Self: 'b;

    const MODE: SerializeMode = SerializeMode::Load;
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

    /// An empty cell counts as an absent value.
    fn serialize_value_with_key<V: Scalar>(&mut self, key: &str, value: &mut V) -> Result<bool, Error> {
        match self.cell(key) {
            Some(text) if !text.is_empty() => {
                let path = &self.path;
                self.context
                    .apply_loaded(|| join_path(path, PATH_SEPARATOR, key), V::from_text(text), value)?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    fn serialize_string_with_key<T: ArchiveString>(
        &mut self,
        key: &str,
        value: &mut T,
    ) -> Result<bool, Error> {
        match self.cell(key) {
            Some(text) => {
                *value = T::from_utf8(text);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn estimated_size(&self) -> usize {
        self.header.len()
    }

    fn key_by_index(&self, index: usize) -> Option<String> {
        self.header.get(index).cloned()
    }
}
