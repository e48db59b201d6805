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

use std::collections::BTreeMap;

use archivist::csv::CsvArchive;
use archivist::{
    field, impl_serialize_object, load_object, register_enum, required_field, save_object,
    ArchiveScope, Archivist, Error, OverflowPolicy, SerializeObject,
};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
enum Level {
    #[default]
    Low,
    High,
}

register_enum!(Level {
    Level::Low => "low",
    Level::High => "high",
});

#[derive(Clone, Debug, Default, PartialEq)]
struct Record {
    id: u32,
    name: String,
    score: f64,
    active: bool,
    level: Level,
    note: Option<i32>,
}

impl SerializeObject for Record {
    fn serialize_object<S: ArchiveScope>(&mut self, scope: &mut S) -> Result<(), Error> {
        required_field(scope, "id", &mut self.id)?;
        field(scope, "name", &mut self.name)?;
        field(scope, "score", &mut self.score)?;
        field(scope, "active", &mut self.active)?;
        field(scope, "level", &mut self.level)?;
        field(scope, "note", &mut self.note)?;
        Ok(())
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
struct Coord {
    x: i32,
    y: i32,
}

impl SerializeObject for Coord {
    fn serialize_object<S: ArchiveScope>(&mut self, scope: &mut S) -> Result<(), Error> {
        required_field(scope, "x", &mut self.x)?;
        required_field(scope, "y", &mut self.y)?;
        Ok(())
    }
}

impl_serialize_object!(Record, Coord);

fn records() -> Vec<Record> {
    vec![
        Record {
            id: 1,
            name: "Smith, J".to_string(),
            score: 9.5,
            active: true,
            level: Level::High,
            note: Some(3),
        },
        Record {
            id: 2,
            name: "Bo \"the\" best".to_string(),
            score: 0.0,
            active: false,
            level: Level::Low,
            note: None,
        },
    ]
}

#[test]
fn records_round_trip() {
    let mut rows = records();
    let text = save_object::<CsvArchive, _>(&mut rows).unwrap();
    assert_eq!(
        text,
        "id,name,score,active,level,note\n\
         1,\"Smith, J\",9.5,true,high,3\n\
         2,\"Bo \"\"the\"\" best\",0,false,low,\n"
    );
    let mut loaded: Vec<Record> = Vec::new();
    load_object::<CsvArchive, _>(&mut loaded, &text).unwrap();
    assert_eq!(loaded, rows);
}

#[test]
fn other_separator_round_trip() {
    let archivist = Archivist::<CsvArchive>::default().values_separator(';');
    let mut rows = records();
    let text = archivist.save(&mut rows).unwrap();
    assert!(text.starts_with("id;name;score;active;level;note\n1;Smith, J;"));
    let mut loaded: Vec<Record> = Vec::new();
    archivist.load(&mut loaded, &text).unwrap();
    assert_eq!(loaded, rows);
}

#[test]
fn unsupported_separator() {
    let archivist = Archivist::<CsvArchive>::default().values_separator('+');
    let mut rows = records();
    assert!(matches!(archivist.save(&mut rows), Err(Error::Unsupported(_))));
    assert!(matches!(
        archivist.load(&mut rows, "x+y\n"),
        Err(Error::Unsupported(_))
    ));
}

#[test]
fn member_paths_include_row_index() {
    let mut coords: Vec<Coord> = Vec::new();
    let err = load_object::<CsvArchive, _>(&mut coords, "x,y\n10,20\n11,abc\n").unwrap_err();
    match err {
        Error::MismatchedType { path, .. } => assert_eq!(path, "/1/y"),
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn overflow_skip_in_rows() {
    let archivist = Archivist::<CsvArchive>::default().overflow_policy(OverflowPolicy::Skip);
    let mut rows: Vec<Record> = Vec::new();
    let err = archivist
        .load(&mut rows, "id,name\n-1,a\n2,b\n")
        .unwrap_err();
    let errors = err.validation_errors().unwrap();
    assert_eq!(errors.len(), 1);
    assert!(errors.get("/0/id").is_some());
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1].id, 2);
    assert_eq!(rows[1].name, "b");
}

#[test]
fn empty_cells_are_absent() {
    let mut coords: Vec<Coord> = Vec::new();
    let err = load_object::<CsvArchive, _>(&mut coords, "x,y\n1,\n").unwrap_err();
    let errors = err.validation_errors().unwrap();
    assert_eq!(errors.get("/0/y").unwrap(), ["This field is required"]);
}

#[test]
fn unterminated_quote_line() {
    let mut coords: Vec<Coord> = Vec::new();
    let err = load_object::<CsvArchive, _>(&mut coords, "x,y\n10,20\n11,\"21\n").unwrap_err();
    match err {
        Error::Parsing { line, .. } => assert_eq!(line, 3),
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn field_count_mismatch() {
    let mut coords: Vec<Coord> = Vec::new();
    let err = load_object::<CsvArchive, _>(&mut coords, "x,y\n10").unwrap_err();
    assert_eq!(err.line(), Some(2));
    let err = load_object::<CsvArchive, _>(&mut coords, "x\n10,20").unwrap_err();
    assert_eq!(err.line(), Some(2));
}

#[test]
fn empty_document() {
    let mut coords = vec![Coord { x: 1, y: 1 }];
    load_object::<CsvArchive, _>(&mut coords, "").unwrap();
    assert!(coords.is_empty());
    assert_eq!(save_object::<CsvArchive, _>(&mut coords).unwrap(), "");
}

#[test]
fn rows_as_maps() {
    let mut rows: Vec<BTreeMap<String, String>> = Vec::new();
    load_object::<CsvArchive, _>(&mut rows, "b,a\n1,2\n3,4\n").unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1]["a"], "4");
    assert_eq!(rows[1]["b"], "3");

    let mut numbers = vec![
        BTreeMap::from([("a".to_string(), 1), ("b".to_string(), 2)]),
        BTreeMap::from([("b".to_string(), 4)]),
    ];
    assert_eq!(
        save_object::<CsvArchive, _>(&mut numbers).unwrap(),
        "a,b\n1,2\n,4\n"
    );
}

#[test]
fn later_rows_cannot_add_columns() {
    let mut numbers = vec![
        BTreeMap::from([("a".to_string(), 1)]),
        BTreeMap::from([("c".to_string(), 2)]),
    ];
    let err = save_object::<CsvArchive, _>(&mut numbers).unwrap_err();
    assert!(matches!(err, Error::InvalidData(_)));
}

#[test]
fn float_into_integer_overflows() {
    let mut coords: Vec<Coord> = Vec::new();
    let err = load_object::<CsvArchive, _>(&mut coords, "x,y\n1,2.5\n").unwrap_err();
    match err {
        Error::Overflow { path, .. } => assert_eq!(path, "/0/y"),
        other => panic!("unexpected error: {}", other),
    }

    let archivist = Archivist::<CsvArchive>::default().overflow_policy(OverflowPolicy::Skip);
    let err = archivist
        .load(&mut coords, "x,y\n1,2.5\n3,4\n")
        .unwrap_err();
    let errors = err.validation_errors().unwrap();
    assert_eq!(errors.paths().collect::<Vec<_>>(), ["/0/y"]);
    assert_eq!(coords[1], Coord { x: 3, y: 4 });
}

#[test]
fn integer_into_bool_overflows() {
    let mut rows: Vec<Record> = Vec::new();
    load_object::<CsvArchive, _>(&mut rows, "id,active\n1,1\n2,0\n").unwrap();
    assert!(rows[0].active);
    assert!(!rows[1].active);

    let err = load_object::<CsvArchive, _>(&mut rows, "id,active\n1,7\n").unwrap_err();
    assert!(matches!(err, Error::Overflow { .. }));

    let archivist = Archivist::<CsvArchive>::default().overflow_policy(OverflowPolicy::Skip);
    let err = archivist
        .load(&mut rows, "id,active\n1,7\n2,true\n")
        .unwrap_err();
    let errors = err.validation_errors().unwrap();
    assert_eq!(errors.paths().collect::<Vec<_>>(), ["/0/active"]);
    assert!(rows[1].active);
}
