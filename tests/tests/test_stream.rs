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

use std::io::{Cursor, ErrorKind};

use archivist::csv::CsvArchive;
use archivist::encoding::bom;
use archivist::json::JsonArchive;
use archivist::{
    field, impl_serialize_object, ArchiveScope, Archivist, Error, SerializeObject, UtfType,
};

#[derive(Clone, Debug, Default, PartialEq)]
struct City {
    name: String,
    population: u64,
}

impl SerializeObject for City {
    fn serialize_object<S: ArchiveScope>(&mut self, scope: &mut S) -> Result<(), Error> {
        field(scope, "name", &mut self.name)?;
        field(scope, "population", &mut self.population)?;
        Ok(())
    }
}

impl_serialize_object!(City);

const ENCODINGS: [UtfType; 5] = [
    UtfType::Utf8,
    UtfType::Utf16Le,
    UtfType::Utf16Be,
    UtfType::Utf32Le,
    UtfType::Utf32Be,
];

fn cities() -> Vec<City> {
    vec![
        City {
            name: "Zürich".to_string(),
            population: 421_878,
        },
        City {
            name: "東京".to_string(),
            population: 13_960_000,
        },
    ]
}

#[test]
fn json_streams_in_every_encoding() {
    for encoding in ENCODINGS {
        for write_bom in [true, false] {
            let archivist = Archivist::<JsonArchive>::default()
                .stream_encoding(encoding)
                .write_bom(write_bom);
            let mut value = cities();
            let mut bytes = Vec::new();
            archivist.save_to_writer(&mut value, &mut bytes).unwrap();
            assert_eq!(bytes.starts_with(bom(encoding)), write_bom, "{:?}", encoding);

            let mut loaded: Vec<City> = Vec::new();
            archivist
                .load_from_reader(&mut loaded, &mut Cursor::new(bytes))
                .unwrap();
            assert_eq!(loaded, value, "{:?} bom {}", encoding, write_bom);
        }
    }
}

#[test]
fn csv_streams_in_every_encoding() {
    for encoding in ENCODINGS {
        let archivist = Archivist::<CsvArchive>::default().stream_encoding(encoding);
        let mut value = cities();
        let mut bytes = Vec::new();
        archivist.save_to_writer(&mut value, &mut bytes).unwrap();
        let mut loaded: Vec<City> = Vec::new();
        archivist
            .load_from_reader(&mut loaded, &mut Cursor::new(bytes))
            .unwrap();
        assert_eq!(loaded, value, "{:?}", encoding);
    }
}

#[test]
fn byte_order_mark_overrides_configured_encoding() {
    let writer = Archivist::<JsonArchive>::default().stream_encoding(UtfType::Utf16Be);
    let mut value = cities();
    let mut bytes = Vec::new();
    writer.save_to_writer(&mut value, &mut bytes).unwrap();

    let reader = Archivist::<JsonArchive>::default();
    let mut loaded: Vec<City> = Vec::new();
    reader
        .load_from_reader(&mut loaded, &mut Cursor::new(bytes))
        .unwrap();
    assert_eq!(loaded, value);
}

#[test]
fn truncated_stream_is_encoding_error() {
    let archivist = Archivist::<JsonArchive>::default().stream_encoding(UtfType::Utf32Le);
    let mut loaded: Vec<City> = Vec::new();
    let err = archivist
        .load_from_reader(&mut loaded, &mut Cursor::new(vec![b'[', 0, 0]))
        .unwrap_err();
    assert!(matches!(err, Error::EncodingError(_)));
}

#[test]
fn file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cities.json");
    let archivist = Archivist::<JsonArchive>::default().enable_format(true);

    let mut value = cities();
    archivist.save_to_file(&mut value, &path, false).unwrap();

    let err = archivist.save_to_file(&mut value, &path, false).unwrap_err();
    match err {
        Error::Io(e) => assert_eq!(e.kind(), ErrorKind::AlreadyExists),
        other => panic!("unexpected error: {}", other),
    }

    value.pop();
    archivist.save_to_file(&mut value, &path, true).unwrap();
    let mut loaded: Vec<City> = Vec::new();
    archivist.load_from_file(&mut loaded, &path).unwrap();
    assert_eq!(loaded, value);
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut loaded: Vec<City> = Vec::new();
    let err = Archivist::<JsonArchive>::default()
        .load_from_file(&mut loaded, dir.path().join("missing.json"))
        .unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}

#[test]
fn failed_save_leaves_no_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("value.json");
    let archivist = Archivist::<JsonArchive>::default();

    let mut infinite = f64::INFINITY;
    let err = archivist.save_to_file(&mut infinite, &path, false).unwrap_err();
    assert!(matches!(err, Error::InvalidData(_)));
    assert!(!path.exists());

    let mut finite = 2.5f64;
    archivist.save_to_file(&mut finite, &path, false).unwrap();
    let mut loaded = 0.0f64;
    archivist.load_from_file(&mut loaded, &path).unwrap();
    assert_eq!(loaded, 2.5);
}

#[test]
fn failed_overwrite_keeps_previous_contents() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cities.json");
    let archivist = Archivist::<JsonArchive>::default();

    let mut value = cities();
    archivist.save_to_file(&mut value, &path, false).unwrap();
    let before = std::fs::read(&path).unwrap();

    let mut infinite = vec![f64::INFINITY];
    assert!(archivist.save_to_file(&mut infinite, &path, true).is_err());
    assert_eq!(std::fs::read(&path).unwrap(), before);
}
