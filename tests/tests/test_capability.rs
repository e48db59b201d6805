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

use archivist::archive::capability::{capabilities_of, ensure_supported, supports};
use archivist::csv::{CsvReader, CsvRowReader, CsvRowsReader, CsvTable, CsvWriter};
use archivist::json::{JsonObjectReader, JsonReader, JsonWriter};
use archivist::{
    ArchiveScope, Capabilities, Error, Operation, SerializationContext, SerializationOptions,
};

fn context() -> SerializationContext {
    SerializationContext::new(SerializationOptions::default())
}

#[test]
fn declared_capabilities() {
    assert!(supports::<JsonReader>(Operation::Value));
    assert!(supports::<JsonObjectReader>(Operation::KeyEnumeration));
    assert!(!supports::<JsonObjectReader>(Operation::Value));
    assert_eq!(capabilities_of::<CsvReader>(), Capabilities::ARRAY);
    assert_eq!(capabilities_of::<CsvRowsReader>(), Capabilities::OBJECT);
    assert!(supports::<CsvRowReader>(Operation::KeyedString));
    assert!(!supports::<CsvRowReader>(Operation::KeyedArray));
    assert!(ensure_supported::<JsonWriter>(Operation::Array).is_ok());
}

#[test]
fn missing_capability_names_operation_and_scope() {
    let err = ensure_supported::<CsvRowReader>(Operation::KeyedObject).unwrap_err();
    assert_eq!(err.to_string(), "keyed object is not supported in object scope");

    let table = CsvTable::default();
    let mut context = context();
    let mut root = CsvReader::new(&table, &mut context);
    match root.serialize_value(&mut 1i32) {
        Err(Error::Unsupported(message)) => {
            assert_eq!(message, "value without key is not supported in root scope")
        }
        other => panic!("unexpected result: {:?}", other),
    }
    assert!(matches!(
        root.open_object_scope(),
        Err(Error::Unsupported(_))
    ));
}

#[test]
fn csv_writer_root_only_opens_arrays() {
    let mut table = CsvTable::default();
    let mut context = context();
    let mut root = CsvWriter::new(&mut table, &mut context);
    let mut name = String::from("x");
    let err = root.serialize_string(&mut name).unwrap_err();
    assert_eq!(
        err.to_string(),
        "string without key is not supported in root scope"
    );
    assert!(root.open_array_scope(0).unwrap().is_some());
}
