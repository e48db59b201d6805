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

//! CSV archive for archivist.
//!
//! A document is a root array of flat objects: the first line holds the
//! column names and every following line is one object whose members are the
//! cells of that line. Cells are text, so values are parsed and formatted
//! through their textual form. Nested objects and arrays inside a row have no
//! CSV representation and are rejected at compile time by the capability
//! checks.
//!
//! ```text
//! x,y        root array
//! 10,20      object at "/0", member "x" at "/0/x"
//! 11,21      object at "/1"
//! ```

mod parser;
mod reader;
mod writer;

use archivist_core::archive::Archive;
use archivist_core::config::SerializationOptions;
use archivist_core::error::Error;
use archivist_core::resolver::context::SerializationContext;
use tracing::trace;

pub use crate::reader::{CsvReader, CsvRowReader, CsvRowsReader};
pub use crate::writer::{CsvRowWriter, CsvRowsWriter, CsvWriter};

pub const PATH_SEPARATOR: char = '/';

/// Separators accepted in [`SerializationOptions::values_separator`].
pub const SUPPORTED_SEPARATORS: [char; 5] = [',', ';', '\t', ' ', '|'];

/// One data line: its cells in header order and the line it started on.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CsvRow {
    cells: Vec<String>,
    line: usize,
}

impl CsvRow {
    pub fn cells(&self) -> &[String] {
        &self.cells
    }

    /// 1-based source line, 0 for rows built while saving.
    pub fn line(&self) -> usize {
        self.line
    }
}

/// A header and its rows, used both as parsed input and as output.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CsvTable {
    header: Vec<String>,
    rows: Vec<CsvRow>,
}

impl CsvTable {
    pub fn header(&self) -> &[String] {
        &self.header
    }

    pub fn rows(&self) -> &[CsvRow] {
        &self.rows
    }

    pub(crate) fn column(&self, name: &str) -> Option<usize> {
        self.header.iter().position(|column| column == name)
    }
}

/// The CSV format.
#[derive(Clone, Copy, Debug, Default)]
pub struct CsvArchive;

impl Archive for CsvArchive {
    const NAME: &'static str = "csv";

    type Key = str;
    type Document = CsvTable;
    type Output = CsvTable;
    type Reader<'a> = CsvReader<'a>;
    type Writer<'a> = CsvWriter<'a>;

    fn check_options(options: &SerializationOptions) -> Result<(), Error> {
        let separator = options.values_separator();
        if SUPPORTED_SEPARATORS.contains(&separator) {
            Ok(())
        } else {
            Err(Error::unsupported(format!(
                "'{}' is not a supported csv values separator",
                separator.escape_default()
            )))
        }
    }

    fn parse(input: &str, options: &SerializationOptions) -> Result<CsvTable, Error> {
        let table = parser::parse(input, options.values_separator())?;
        trace!(
            columns = table.header.len(),
            rows = table.rows.len(),
            "csv document parsed"
        );
        Ok(table)
    }

    fn reader<'a>(document: &'a CsvTable, context: &'a mut SerializationContext) -> CsvReader<'a> {
        CsvReader::new(document, context)
    }

    fn writer<'a>(output: &'a mut CsvTable, context: &'a mut SerializationContext) -> CsvWriter<'a> {
        CsvWriter::new(output, context)
    }

    fn render(output: &CsvTable, options: &SerializationOptions) -> Result<String, Error> {
        Ok(parser::render(output, options.values_separator()))
    }
}
