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

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, LinkedList, VecDeque};

use archivist::archive::member_path;
use archivist::json::JsonArchive;
use archivist::{
    field, field_with, impl_serialize_object, load_object, register_enum, required_field,
    save_object, serialize_base, ArchiveKey, ArchiveScope, Archivist, Error, MaxSize,
    MismatchedTypePolicy, Null, OverflowPolicy, Range, SerializeObject, Utf16String, Utf32String,
};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::{json, Value};

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

#[derive(Clone, Copy, Debug, Default, PartialEq)]
enum Color {
    #[default]
    Red,
    Green,
    Blue,
}

register_enum!(Color {
    Color::Red => "red",
    Color::Green => "green",
});

#[derive(Debug, Default, PartialEq)]
struct Everything {
    flag: bool,
    tiny: i8,
    small: i16,
    int: i32,
    long: i64,
    ubyte: u8,
    ushort: u16,
    uint: u32,
    ulong: u64,
    size: usize,
    half: f32,
    double: f64,
    name: String,
    wide: Utf16String,
    wider: Utf32String,
    color: Color,
    points: Vec<Point>,
    queue: VecDeque<i16>,
    list: LinkedList<String>,
    fixed: [u8; 3],
    by_name: BTreeMap<String, i32>,
    by_id: HashMap<u32, Point>,
    tags: BTreeSet<String>,
    ids: HashSet<u64>,
    maybe: Option<i32>,
    nothing: Option<i32>,
    boxed: Box<Point>,
    pair: (String, i32),
    day: NaiveDate,
    moment: NaiveDateTime,
    stamp: DateTime<Utc>,
}

impl SerializeObject for Everything {
    fn serialize_object<S: ArchiveScope>(&mut self, scope: &mut S) -> Result<(), Error> {
        field(scope, "flag", &mut self.flag)?;
        field(scope, "tiny", &mut self.tiny)?;
        field(scope, "small", &mut self.small)?;
        field(scope, "int", &mut self.int)?;
        field(scope, "long", &mut self.long)?;
        field(scope, "ubyte", &mut self.ubyte)?;
        field(scope, "ushort", &mut self.ushort)?;
        field(scope, "uint", &mut self.uint)?;
        field(scope, "ulong", &mut self.ulong)?;
        field(scope, "size", &mut self.size)?;
        field(scope, "half", &mut self.half)?;
        field(scope, "double", &mut self.double)?;
        field(scope, "name", &mut self.name)?;
        field(scope, "wide", &mut self.wide)?;
        field(scope, "wider", &mut self.wider)?;
        field(scope, "color", &mut self.color)?;
        field(scope, "points", &mut self.points)?;
        field(scope, "queue", &mut self.queue)?;
        field(scope, "list", &mut self.list)?;
        field(scope, "fixed", &mut self.fixed)?;
        field(scope, "by_name", &mut self.by_name)?;
        field(scope, "by_id", &mut self.by_id)?;
        field(scope, "tags", &mut self.tags)?;
        field(scope, "ids", &mut self.ids)?;
        field(scope, "maybe", &mut self.maybe)?;
        field(scope, "nothing", &mut self.nothing)?;
        field(scope, "boxed", &mut self.boxed)?;
        field(scope, "pair", &mut self.pair)?;
        field(scope, "day", &mut self.day)?;
        field(scope, "moment", &mut self.moment)?;
        field(scope, "stamp", &mut self.stamp)?;
        Ok(())
    }
}

#[derive(Debug, Default, PartialEq)]
struct Sample {
    level: i8,
    count: u32,
}

impl SerializeObject for Sample {
    fn serialize_object<S: ArchiveScope>(&mut self, scope: &mut S) -> Result<(), Error> {
        field(scope, "level", &mut self.level)?;
        field(scope, "count", &mut self.count)?;
        Ok(())
    }
}

#[derive(Debug, Default, PartialEq)]
struct WithNull {
    id: u32,
    nothing: Null,
}

impl SerializeObject for WithNull {
    fn serialize_object<S: ArchiveScope>(&mut self, scope: &mut S) -> Result<(), Error> {
        field(scope, "id", &mut self.id)?;
        field(scope, "nothing", &mut self.nothing)?;
        Ok(())
    }
}

#[derive(Debug, Default, PartialEq)]
struct Shape {
    origin: Point,
    color: Color,
}

impl SerializeObject for Shape {
    fn serialize_object<S: ArchiveScope>(&mut self, scope: &mut S) -> Result<(), Error> {
        required_field(scope, "origin", &mut self.origin)?;
        field(scope, "color", &mut self.color)?;
        Ok(())
    }
}

#[derive(Debug, Default, PartialEq)]
struct Point3 {
    base: Point,
    z: i32,
}

impl SerializeObject for Point3 {
    fn serialize_object<S: ArchiveScope>(&mut self, scope: &mut S) -> Result<(), Error> {
        serialize_base(scope, &mut self.base)?;
        field(scope, "z", &mut self.z)?;
        Ok(())
    }
}

#[derive(Debug, Default)]
struct PathProbe {
    path: String,
    member: String,
}

impl SerializeObject for PathProbe {
    fn serialize_object<S: ArchiveScope>(&mut self, scope: &mut S) -> Result<(), Error> {
        self.path = scope.path();
        let key = <S::Key as ArchiveKey>::from_name("x");
        self.member = member_path(&*scope, &key);
        Ok(())
    }
}

#[derive(Debug, Default)]
struct Limits {
    threads: u8,
    name: String,
    items: Vec<i32>,
}

impl SerializeObject for Limits {
    fn serialize_object<S: ArchiveScope>(&mut self, scope: &mut S) -> Result<(), Error> {
        field_with(scope, "threads", &mut self.threads, &[&Range::new(1u8, 64)])?;
        field_with(scope, "name", &mut self.name, &[&MaxSize(4)])?;
        field_with(scope, "items", &mut self.items, &[&MaxSize(2)])?;
        Ok(())
    }
}

impl_serialize_object!(
    Point, Everything, Sample, WithNull, Shape, Point3, PathProbe, Limits
);

fn everything() -> Everything {
    Everything {
        flag: true,
        tiny: i8::MIN,
        small: -300,
        int: 123_456,
        long: i64::MIN,
        ubyte: u8::MAX,
        ushort: 65_000,
        uint: u32::MAX,
        ulong: u64::MAX,
        size: 42,
        half: 1.5,
        double: -0.25,
        name: "name \"quoted\"".to_string(),
        wide: Utf16String::from("wide ü"),
        wider: Utf32String::from("wider 𝄞"),
        color: Color::Green,
        points: vec![Point { x: 1, y: 2 }, Point { x: 3, y: 4 }],
        queue: VecDeque::from(vec![7, 8]),
        list: ["a", "b"].iter().map(|s| s.to_string()).collect(),
        fixed: [1, 2, 3],
        by_name: BTreeMap::from([("one".to_string(), 1), ("two".to_string(), 2)]),
        by_id: HashMap::from([(7, Point { x: 7, y: 7 })]),
        tags: BTreeSet::from(["x".to_string(), "y".to_string()]),
        ids: HashSet::from([5, 6]),
        maybe: Some(9),
        nothing: None,
        boxed: Box::new(Point { x: -1, y: -2 }),
        pair: ("key".to_string(), 10),
        day: NaiveDate::from_ymd_opt(2024, 2, 29).unwrap(),
        moment: NaiveDate::from_ymd_opt(2023, 12, 31)
            .unwrap()
            .and_hms_milli_opt(23, 59, 58, 500)
            .unwrap(),
        stamp: DateTime::parse_from_rfc3339("2024-05-06T07:08:09Z")
            .unwrap()
            .with_timezone(&Utc),
    }
}

#[test]
fn object_round_trip() {
    let archivist = Archivist::<JsonArchive>::default();
    let mut value = everything();
    let text = archivist.save(&mut value).unwrap();
    let mut loaded = Everything::default();
    archivist.load(&mut loaded, &text).unwrap();
    assert_eq!(loaded, value);
}

#[test]
fn saved_document_shape() {
    let mut value = everything();
    let text = save_object::<JsonArchive, _>(&mut value).unwrap();
    let document: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(document["color"], json!("green"));
    assert_eq!(document["points"], json!([{"x": 1, "y": 2}, {"x": 3, "y": 4}]));
    assert_eq!(document["by_name"], json!({"one": 1, "two": 2}));
    assert_eq!(document["by_id"], json!({"7": {"x": 7, "y": 7}}));
    assert_eq!(document["pair"], json!({"key": "key", "value": 10}));
    assert_eq!(document["day"], json!("2024-02-29"));
    assert_eq!(document["moment"], json!("2023-12-31T23:59:58.500"));
    assert_eq!(document["stamp"], json!("2024-05-06T07:08:09Z"));
    assert_eq!(document["ulong"], json!(u64::MAX));
    assert!(document.get("nothing").is_none());
}

#[test]
fn members_keep_declaration_order() {
    let mut point = Point { x: 1, y: 2 };
    assert_eq!(
        save_object::<JsonArchive, _>(&mut point).unwrap(),
        r#"{"x":1,"y":2}"#
    );
    let pretty = Archivist::<JsonArchive>::default()
        .enable_format(true)
        .save(&mut point)
        .unwrap();
    assert_eq!(pretty, "{\n  \"x\": 1,\n  \"y\": 2\n}");
}

#[test]
fn root_values() {
    let mut number = 5i32;
    assert_eq!(save_object::<JsonArchive, _>(&mut number).unwrap(), "5");
    let mut text = String::from("hi");
    assert_eq!(save_object::<JsonArchive, _>(&mut text).unwrap(), "\"hi\"");
    let mut loaded = 0u16;
    load_object::<JsonArchive, _>(&mut loaded, "65535").unwrap();
    assert_eq!(loaded, 65535);
}

#[test]
fn absent_members_keep_their_values() {
    let mut sample = Sample { level: 3, count: 4 };
    load_object::<JsonArchive, _>(&mut sample, r#"{"count": 8}"#).unwrap();
    assert_eq!(sample, Sample { level: 3, count: 8 });
}

#[test]
fn element_and_member_paths() {
    let mut probes: Vec<PathProbe> = Vec::new();
    load_object::<JsonArchive, _>(&mut probes, "[{}, {}, {}]").unwrap();
    assert_eq!(probes.len(), 3);
    assert_eq!(probes[1].path, "/1");
    assert_eq!(probes[1].member, "/1/x");
    assert_eq!(probes[2].path, "/2");
}

#[test]
fn mismatched_member_reports_full_path() {
    let mut points: Vec<Point> = Vec::new();
    let err = load_object::<JsonArchive, _>(
        &mut points,
        r#"[{"x": 1, "y": 1}, {"x": "a", "y": 2}, {"x": 3, "y": 3}]"#,
    )
    .unwrap_err();
    match err {
        Error::MismatchedType { path, .. } => assert_eq!(path, "/1/x"),
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn mismatched_member_skipped() {
    let archivist =
        Archivist::<JsonArchive>::default().mismatched_type_policy(MismatchedTypePolicy::Skip);
    let mut points: Vec<Point> = Vec::new();
    let err = archivist
        .load(
            &mut points,
            r#"[{"x": 1, "y": 1}, {"x": "a", "y": 2}, {"x": 3, "y": 3}]"#,
        )
        .unwrap_err();
    let errors = err.validation_errors().unwrap();
    assert_eq!(errors.len(), 1);
    assert!(errors.get("/1/x").is_some());
    // siblings still loaded
    assert_eq!(points.len(), 3);
    assert_eq!(points[1].y, 2);
    assert_eq!(points[2], Point { x: 3, y: 3 });
}

#[test]
fn overflow_throws_by_default() {
    let mut sample = Sample::default();
    let err = load_object::<JsonArchive, _>(&mut sample, r#"{"level": 300, "count": 1}"#)
        .unwrap_err();
    match err {
        Error::Overflow { path, .. } => assert_eq!(path, "/level"),
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn overflow_skipped_keeps_prior_value() {
    let archivist = Archivist::<JsonArchive>::default().overflow_policy(OverflowPolicy::Skip);
    let mut sample = Sample { level: 5, count: 0 };
    let err = archivist
        .load(&mut sample, r#"{"level": 300, "count": 7}"#)
        .unwrap_err();
    let errors = err.validation_errors().unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.get("/level").unwrap().len(), 1);
    assert_eq!(sample, Sample { level: 5, count: 7 });
}

#[test]
fn negative_into_unsigned_overflows() {
    let mut sample = Sample::default();
    let err = load_object::<JsonArchive, _>(&mut sample, r#"{"count": -1}"#).unwrap_err();
    assert!(matches!(err, Error::Overflow { .. }));
}

#[test]
fn float_into_integer_overflows() {
    let mut sample = Sample::default();
    let err = load_object::<JsonArchive, _>(&mut sample, r#"{"count": 1.5}"#).unwrap_err();
    match err {
        Error::Overflow { path, .. } => assert_eq!(path, "/count"),
        other => panic!("unexpected error: {}", other),
    }

    let archivist = Archivist::<JsonArchive>::default().overflow_policy(OverflowPolicy::Skip);
    let mut counts: Vec<u32> = Vec::new();
    let err = archivist.load(&mut counts, "[1.5, 2]").unwrap_err();
    let errors = err.validation_errors().unwrap();
    assert_eq!(errors.paths().collect::<Vec<_>>(), ["/0"]);
    assert_eq!(counts.len(), 2);
    assert_eq!(counts[1], 2);
}

#[test]
fn integer_into_bool_overflows() {
    let mut flags: Vec<bool> = Vec::new();
    load_object::<JsonArchive, _>(&mut flags, "[0, 1, true]").unwrap();
    assert_eq!(flags, vec![false, true, true]);

    let err = load_object::<JsonArchive, _>(&mut flags, "[2, true]").unwrap_err();
    assert!(matches!(err, Error::Overflow { .. }));

    let archivist = Archivist::<JsonArchive>::default().overflow_policy(OverflowPolicy::Skip);
    let err = archivist.load(&mut flags, "[2, true]").unwrap_err();
    let errors = err.validation_errors().unwrap();
    assert_eq!(errors.paths().collect::<Vec<_>>(), ["/0"]);
    assert!(flags[1]);
}

#[test]
fn null_values_round_trip() {
    let mut nulls = vec![Null; 3];
    let text = save_object::<JsonArchive, _>(&mut nulls).unwrap();
    assert_eq!(text, "[null,null,null]");
    let mut loaded: Vec<Null> = Vec::new();
    load_object::<JsonArchive, _>(&mut loaded, &text).unwrap();
    assert_eq!(loaded, nulls);

    let mut holder = WithNull {
        id: 4,
        nothing: Null,
    };
    let text = save_object::<JsonArchive, _>(&mut holder).unwrap();
    assert_eq!(text, r#"{"id":4,"nothing":null}"#);
    let mut loaded = WithNull::default();
    load_object::<JsonArchive, _>(&mut loaded, &text).unwrap();
    assert_eq!(loaded, holder);

    let err = load_object::<JsonArchive, _>(&mut loaded, r#"{"id": 4, "nothing": 0}"#).unwrap_err();
    match err {
        Error::MismatchedType { path, .. } => assert_eq!(path, "/nothing"),
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn required_members_aggregate() {
    let mut point = Point { x: 9, y: 9 };
    let err = load_object::<JsonArchive, _>(&mut point, "{}").unwrap_err();
    let errors = err.validation_errors().unwrap();
    assert_eq!(errors.len(), 2);
    assert_eq!(errors.get("/x").unwrap(), ["This field is required"]);
    assert_eq!(errors.get("/y").unwrap(), ["This field is required"]);
    assert_eq!(point, Point { x: 9, y: 9 });
}

#[test]
fn required_not_enforced() {
    let archivist = Archivist::<JsonArchive>::default().required_value_enforced(false);
    let mut point = Point::default();
    archivist.load(&mut point, r#"{"x": 1}"#).unwrap();
    assert_eq!(point, Point { x: 1, y: 0 });
}

#[test]
fn wrong_structural_kind() {
    let mut shape = Shape::default();
    let err = load_object::<JsonArchive, _>(&mut shape, r#"{"origin": 5}"#).unwrap_err();
    match err {
        Error::MismatchedType { path, .. } => assert_eq!(path, "/origin"),
        other => panic!("unexpected error: {}", other),
    }

    let archivist =
        Archivist::<JsonArchive>::default().mismatched_type_policy(MismatchedTypePolicy::Skip);
    let err = archivist
        .load(&mut shape, r#"{"origin": [1, 2]}"#)
        .unwrap_err();
    let errors = err.validation_errors().unwrap();
    assert_eq!(errors.len(), 1);
    // the mismatch and the missing required member
    assert_eq!(errors.message_count(), 2);
}

#[test]
fn validators_run_on_load() {
    let mut limits = Limits::default();
    let err = load_object::<JsonArchive, _>(
        &mut limits,
        r#"{"threads": 100, "name": "longer", "items": [1, 2, 3]}"#,
    )
    .unwrap_err();
    let errors = err.validation_errors().unwrap();
    assert_eq!(
        errors.get("/threads").unwrap(),
        ["Value must be between 1 and 64"]
    );
    assert!(errors.get("/name").is_some());
    assert!(errors.get("/items").is_some());

    let mut limits = Limits::default();
    load_object::<JsonArchive, _>(&mut limits, r#"{"threads": 8, "name": "abc"}"#).unwrap();
    assert_eq!(limits.threads, 8);
    // validators do not run when saving
    let mut limits = Limits {
        threads: 0,
        name: String::new(),
        items: vec![1, 2, 3],
    };
    assert!(save_object::<JsonArchive, _>(&mut limits).is_ok());
}

#[test]
fn enums_by_name() {
    let mut shape = Shape::default();
    load_object::<JsonArchive, _>(
        &mut shape,
        r#"{"origin": {"x": 1, "y": 2}, "color": "green"}"#,
    )
    .unwrap();
    assert_eq!(shape.color, Color::Green);

    let err = load_object::<JsonArchive, _>(
        &mut shape,
        r#"{"origin": {"x": 1, "y": 2}, "color": "purple"}"#,
    )
    .unwrap_err();
    assert!(matches!(err, Error::MismatchedType { .. }));

    let archivist =
        Archivist::<JsonArchive>::default().mismatched_type_policy(MismatchedTypePolicy::Skip);
    let err = archivist
        .load(&mut shape, r#"{"origin": {"x": 1, "y": 2}, "color": 3}"#)
        .unwrap_err();
    // reported once, by the string load
    assert_eq!(err.validation_errors().unwrap().message_count(), 1);
    assert_eq!(shape.color, Color::Green);
}

#[test]
fn unregistered_enum_value_cannot_be_saved() {
    let mut colors = vec![Color::Red, Color::Blue];
    let err = save_object::<JsonArchive, _>(&mut colors).unwrap_err();
    assert!(matches!(err, Error::UnknownEnum(_)));
}

#[test]
fn map_keys_through_policies() {
    let mut map: BTreeMap<u8, String> = BTreeMap::new();
    load_object::<JsonArchive, _>(&mut map, r#"{"1": "a", "2": "b"}"#).unwrap();
    assert_eq!(map.len(), 2);
    assert_eq!(map[&2], "b");

    let archivist = Archivist::<JsonArchive>::default()
        .overflow_policy(OverflowPolicy::Skip)
        .mismatched_type_policy(MismatchedTypePolicy::Skip);
    let err = archivist
        .load(&mut map, r#"{"3": "c", "x": "d", "300": "e"}"#)
        .unwrap_err();
    let errors = err.validation_errors().unwrap();
    assert!(errors.get("/x").is_some());
    assert!(errors.get("/300").is_some());
    assert_eq!(map, BTreeMap::from([(3, "c".to_string())]));
}

#[test]
fn base_members_are_flattened() {
    let mut point = Point3 {
        base: Point { x: 1, y: 2 },
        z: 3,
    };
    let text = save_object::<JsonArchive, _>(&mut point).unwrap();
    assert_eq!(text, r#"{"x":1,"y":2,"z":3}"#);
    let mut loaded = Point3::default();
    load_object::<JsonArchive, _>(&mut loaded, &text).unwrap();
    assert_eq!(loaded, point);
}

#[test]
fn options_follow_presence() {
    let mut value: Option<i32> = Some(1);
    load_object::<JsonArchive, _>(&mut value, "2").unwrap();
    assert_eq!(value, Some(2));

    let mut sample = everything();
    load_object::<JsonArchive, _>(&mut sample, r#"{"nothing": 4}"#).unwrap();
    assert_eq!(sample.nothing, Some(4));
    assert_eq!(sample.maybe, None);

    let mut empty: Option<i32> = None;
    assert!(matches!(
        save_object::<JsonArchive, _>(&mut empty),
        Err(Error::Unsupported(_))
    ));
}

#[test]
fn fixed_array_capacity() {
    let mut fixed = [9i32; 3];
    let err = load_object::<JsonArchive, _>(&mut fixed, "[1, 2, 3, 4, 5]").unwrap_err();
    assert!(matches!(err, Error::OutOfRange(_)));
    assert_eq!(fixed, [9, 9, 9]);

    load_object::<JsonArchive, _>(&mut fixed, "[1]").unwrap();
    assert_eq!(fixed, [1, 9, 9]);
}

#[test]
fn containers_match_source_length() {
    let mut values = vec![0u8; 10];
    load_object::<JsonArchive, _>(&mut values, "[1, 2, 3]").unwrap();
    assert_eq!(values, vec![1, 2, 3]);

    let mut nested: Vec<Vec<i32>> = vec![vec![5]];
    load_object::<JsonArchive, _>(&mut nested, "[[1, 2], [], [3]]").unwrap();
    assert_eq!(nested, vec![vec![1, 2], vec![], vec![3]]);
}

#[test]
fn invalid_date_is_mismatch() {
    let mut day = NaiveDate::default();
    let err = load_object::<JsonArchive, _>(&mut day, r#""2023-02-30""#).unwrap_err();
    assert!(matches!(err, Error::MismatchedType { .. }));
}

#[test]
fn non_finite_float_cannot_be_saved() {
    let mut value = f64::INFINITY;
    let err = save_object::<JsonArchive, _>(&mut value).unwrap_err();
    assert!(matches!(err, Error::InvalidData(_)));
}

#[test]
fn parse_error_line() {
    let mut point = Point::default();
    let err = load_object::<JsonArchive, _>(&mut point, "{\n  \"x\": 1,\n  \"y\": \n}").unwrap_err();
    match err {
        Error::Parsing { line, .. } => assert_eq!(line, 4),
        other => panic!("unexpected error: {}", other),
    }
}
