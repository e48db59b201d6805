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

//! Line-tracking CSV tokenizer and renderer.
//!
//! Quoted fields may contain separators, line breaks and doubled quotes. Both
//! `\n` and `\r\n` end a record. Lines are counted from 1 so parse errors can
//! point at the offending line.

use std::iter::Peekable;
use std::str::Chars;

use archivist_core::error::Error;

use crate::{CsvRow, CsvTable};

struct Tokenizer<'a> {
    chars: Peekable<Chars<'a>>,
    separator: char,
    line: usize,
    column: usize,
}

impl<'a> Tokenizer<'a> {
    fn new(input: &'a str, separator: char) -> Self {
        Tokenizer {
            chars: input.chars().peekable(),
            separator,
            line: 1,
            column: 0,
        }
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        if c == '\n' {
            self.line += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    /// Consumes a line break if one follows.
    fn eat_line_break(&mut self) -> bool {
        match self.chars.peek() {
            Some('\n') => {
                self.bump();
                true
            }
            Some('\r') => {
                self.bump();
                if self.chars.peek() == Some(&'\n') {
                    self.bump();
                }
                true
            }
            _ => false,
        }
    }

    fn quoted_field(&mut self, field: &mut String) -> Result<(), Error> {
        let (line, column) = (self.line, self.column);
        loop {
            match self.bump() {
                Some('"') => {
                    if self.chars.peek() == Some(&'"') {
                        self.bump();
                        field.push('"');
                    } else {
                        return Ok(());
                    }
                }
                Some(c) => field.push(c),
                None => {
                    return Err(Error::parsing(
                        "unterminated quoted field",
                        line,
                        Some(column),
                    ))
                }
            }
        }
    }

    /// Reads one record, `None` at the end of input. Blank lines are skipped.
    fn record(&mut self) -> Result<Option<CsvRow>, Error> {
        loop {
            if self.chars.peek().is_none() {
                return Ok(None);
            }
            let line = self.line;
            let mut cells = Vec::new();
            let mut field = String::new();
            let mut quoted = false;
            loop {
                match self.chars.peek().copied() {
                    None => break,
                    Some('\n') | Some('\r') => {
                        self.eat_line_break();
                        break;
                    }
                    Some(c) if c == self.separator => {
                        self.bump();
                        cells.push(std::mem::take(&mut field));
                        quoted = false;
                    }
                    Some('"') if field.is_empty() && !quoted => {
                        self.bump();
                        self.quoted_field(&mut field)?;
                        quoted = true;
                        match self.chars.peek().copied() {
                            None | Some('\n') | Some('\r') => {}
                            Some(c) if c == self.separator => {}
                            Some(c) => {
                                return Err(Error::parsing(
                                    format!("unexpected '{}' after closing quote", c),
                                    self.line,
                                    Some(self.column + 1),
                                ))
                            }
                        }
                    }
                    Some(_) => {
                        if let Some(c) = self.bump() {
                            field.push(c);
                        }
                    }
                }
            }
            if cells.is_empty() && field.is_empty() && !quoted {
                continue;
            }
            cells.push(field);
            return Ok(Some(CsvRow { cells, line }));
        }
    }
}

/// Parses `input` into a header and rows of the same width.
pub(crate) fn parse(input: &str, separator: char) -> Result<CsvTable, Error> {
    let mut tokenizer = Tokenizer::new(input, separator);
    let header = match tokenizer.record()? {
        Some(row) => row.cells,
        None => return Ok(CsvTable::default()),
    };
    let mut rows = Vec::new();
    while let Some(row) = tokenizer.record()? {
        if row.cells.len() != header.len() {
            return Err(Error::parsing(
                format!(
                    "expected {} fields, found {}",
                    header.len(),
                    row.cells.len()
                ),
                row.line,
                None,
            ));
        }
        rows.push(row);
    }
    Ok(CsvTable { header, rows })
}

fn needs_quotes(field: &str, separator: char) -> bool {
    field
        .chars()
        .any(|c| c == separator || c == '"' || c == '\n' || c == '\r')
        || field.starts_with(' ')
        || field.ends_with(' ')
}

fn push_field(out: &mut String, field: &str, separator: char) {
    if needs_quotes(field, separator) {
        out.push('"');
        out.push_str(&field.replace('"', "\"\""));
        out.push('"');
    } else {
        out.push_str(field);
    }
}

fn push_record(out: &mut String, cells: &[String], separator: char) {
    // a lone empty cell would read back as a blank line
    if let [cell] = cells {
        if cell.is_empty() {
            out.push_str("\"\"\n");
            return;
        }
    }
    for (i, cell) in cells.iter().enumerate() {
        if i > 0 {
            out.push(separator);
        }
        push_field(out, cell, separator);
    }
    out.push('\n');
}

/// Renders `table`, one line per record. A table without columns renders empty.
pub(crate) fn render(table: &CsvTable, separator: char) -> String {
    let mut out = String::new();
    if table.header.is_empty() {
        return out;
    }
    push_record(&mut out, &table.header, separator);
    for row in &table.rows {
        push_record(&mut out, &row.cells, separator);
    }
    out
}
