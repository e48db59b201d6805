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

use archivist::yaml::YamlArchive;
use archivist::{
    field, impl_serialize_object, load_object, register_enum, required_field, save_object,
    ArchiveScope, Archivist, Error, Null, OverflowPolicy, SerializeObject,
};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
enum Role {
    #[default]
    Reader,
    Editor,
}

register_enum!(Role {
    Role::Reader => "reader",
    Role::Editor => "editor",
});

#[derive(Clone, Debug, Default, PartialEq)]
struct Point {
    x: i32,
    y: i32,
}

impl SerializeObject for Point {
    fn serialize_object<S: ArchiveScope>(&mut self, scope: &mut S) -> Result<(), Error> {
        required_field(scope, "x", &mut self.x)?;
        required_field(scope, "y", &mut self.y)?;
        Ok(())
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
struct Member {
    name: String,
    role: Role,
    ratio: f64,
    path: Vec<Point>,
    tags: BTreeMap<String, u16>,
    nothing: Null,
    nickname: Option<String>,
}

impl SerializeObject for Member {
    fn serialize_object<S: ArchiveScope>(&mut self, scope: &mut S) -> Result<(), Error> {
        required_field(scope, "name", &mut self.name)?;
        field(scope, "role", &mut self.role)?;
        field(scope, "ratio", &mut self.ratio)?;
        field(scope, "path", &mut self.path)?;
        field(scope, "tags", &mut self.tags)?;
        field(scope, "nothing", &mut self.nothing)?;
        field(scope, "nickname", &mut self.nickname)?;
        Ok(())
    }
}

impl_serialize_object!(Point, Member);

fn member() -> Member {
    Member {
        name: "Ada: the first".to_string(),
        role: Role::Editor,
        ratio: 0.25,
        path: vec![Point { x: 1, y: -2 }, Point { x: 3, y: 4 }],
        tags: BTreeMap::from([("a".to_string(), 1), ("10".to_string(), 2)]),
        nothing: Null,
        nickname: None,
    }
}

#[test]
fn object_round_trip() {
    let mut value = member();
    let text = save_object::<YamlArchive, _>(&mut value).unwrap();
    assert!(text.contains("\nrole: editor\n"));
    let mut loaded = Member::default();
    load_object::<YamlArchive, _>(&mut loaded, &text).unwrap();
    assert_eq!(loaded, value);
}

#[test]
fn flat_object_layout() {
    let mut point = Point { x: 1, y: 2 };
    assert_eq!(save_object::<YamlArchive, _>(&mut point).unwrap(), "x: 1\ny: 2\n");
}

#[test]
fn nulls_in_sequence() {
    let mut nulls = vec![Null; 2];
    let text = save_object::<YamlArchive, _>(&mut nulls).unwrap();
    assert_eq!(text, "- null\n- null\n");
    let mut loaded: Vec<Null> = Vec::new();
    load_object::<YamlArchive, _>(&mut loaded, "[~, null, null]").unwrap();
    assert_eq!(loaded, vec![Null; 3]);
}

#[test]
fn non_finite_floats_round_trip() {
    let mut values = vec![f64::INFINITY, f64::NEG_INFINITY, 1.5];
    let text = save_object::<YamlArchive, _>(&mut values).unwrap();
    let mut loaded: Vec<f64> = Vec::new();
    load_object::<YamlArchive, _>(&mut loaded, &text).unwrap();
    assert_eq!(loaded, values);
}

#[test]
fn hand_written_document() {
    let text = "\
name: Bob
role: reader
path:
  - {x: 1, y: 1}
  - x: 2
    y: 2
tags:
  5: 50
nothing: ~
";
    let mut loaded = Member::default();
    load_object::<YamlArchive, _>(&mut loaded, text).unwrap();
    assert_eq!(loaded.name, "Bob");
    assert_eq!(loaded.path, vec![Point { x: 1, y: 1 }, Point { x: 2, y: 2 }]);
    assert_eq!(loaded.tags, BTreeMap::from([("5".to_string(), 50)]));
}

#[test]
fn missing_required_members_aggregate() {
    let mut points: Vec<Point> = Vec::new();
    let err = load_object::<YamlArchive, _>(&mut points, "- {x: 1}\n- {y: 2}\n").unwrap_err();
    let errors = err.validation_errors().unwrap();
    assert_eq!(errors.paths().collect::<Vec<_>>(), ["/0/y", "/1/x"]);
}

#[test]
fn mismatched_kind_reports_path() {
    let mut loaded = Member::default();
    let err = load_object::<YamlArchive, _>(&mut loaded, "name: x\npath: 3\n").unwrap_err();
    match err {
        Error::MismatchedType { path, .. } => assert_eq!(path, "/path"),
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn overflow_follows_policy() {
    let mut values: Vec<u8> = Vec::new();
    let err = load_object::<YamlArchive, _>(&mut values, "[1, 256, 2.5]").unwrap_err();
    assert!(matches!(err, Error::Overflow { .. }));

    let archivist = Archivist::<YamlArchive>::default().overflow_policy(OverflowPolicy::Skip);
    let err = archivist.load(&mut values, "[1, 256, 2.5]").unwrap_err();
    let errors = err.validation_errors().unwrap();
    assert_eq!(errors.paths().collect::<Vec<_>>(), ["/1", "/2"]);
    assert_eq!(values[0], 1);
}

#[test]
fn malformed_document() {
    let mut points: Vec<Point> = Vec::new();
    let err = load_object::<YamlArchive, _>(&mut points, "- {x: 1\n- y: 2\n").unwrap_err();
    assert!(matches!(err, Error::Parsing { .. }));
}
