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

use std::collections::{LinkedList, VecDeque};

use archivist::archive::{join_path, NoScope};
use archivist::serializer::collection::{load_items, save_items, SequenceContainer};
use archivist::{
    ArchiveScope, Capabilities, Error, Scalar, ScalarValue, ScopeRole, SerializationContext,
    SerializationOptions, SerializeMode,
};

/// Array scope over fixed integers that reports a configurable size estimate.
struct EstimatingArray {
    source: Vec<i64>,
    index: usize,
    estimate: usize,
    context: SerializationContext,
}

impl EstimatingArray {
    fn new(len: usize, estimate: usize) -> Self {
        EstimatingArray {
            source: (1..=len as i64).collect(),
            index: 0,
            estimate,
            context: SerializationContext::new(SerializationOptions::default()),
        }
    }
}

impl ArchiveScope for EstimatingArray {
    type Key = str;
    type ObjectScope<'a> = NoScope<str> where Self: 'a;
    type ArrayScope<'a> = NoScope<str> where Self: 'a;

    const MODE: SerializeMode = SerializeMode::Load;
    const ROLE: ScopeRole = ScopeRole::Array;
    const CAPABILITIES: Capabilities = Capabilities::VALUE;

    fn context(&mut self) -> &mut SerializationContext {
        &mut self.context
    }

    fn options(&self) -> &SerializationOptions {
        self.context.options()
    }

    fn path(&self) -> String {
        join_path("", '/', self.index.saturating_sub(1))
    }

    fn serialize_value<V: Scalar>(&mut self, value: &mut V) -> Result<(), Error> {
        let source = self.source[self.index];
        self.index += 1;
        let path = self.path();
        self.context
            .apply_loaded(|| path, V::from_scalar(ScalarValue::Int(source)), value)
    }

    fn estimated_size(&self) -> usize {
        self.estimate
    }

    fn is_end(&self) -> bool {
        self.index >= self.source.len()
    }
}

/// Array scope recording what is saved into it.
struct RecordingArray {
    saved: Vec<String>,
    context: SerializationContext,
}

impl ArchiveScope for RecordingArray {
    type Key = str;
    type ObjectScope<'a> = NoScope<str> where Self: 'a;
    type ArrayScope<'a> = NoScope<str> where Self: 'a;

    const MODE: SerializeMode = SerializeMode::Save;
    const ROLE: ScopeRole = ScopeRole::Array;
    const CAPABILITIES: Capabilities = Capabilities::VALUE;

    fn context(&mut self) -> &mut SerializationContext {
        &mut self.context
    }

    fn options(&self) -> &SerializationOptions {
        self.context.options()
    }

    fn path(&self) -> String {
        join_path("", '/', self.saved.len().saturating_sub(1))
    }

    fn serialize_value<V: Scalar>(&mut self, value: &mut V) -> Result<(), Error> {
        self.saved.push(value.to_text());
        Ok(())
    }
}

fn fill<C: SequenceContainer<Item = i32>>(mut container: C, len: usize, estimate: usize) -> C {
    let mut array = EstimatingArray::new(len, estimate);
    load_items(&mut container, &mut array).unwrap();
    assert!(array.is_end());
    container
}

#[test]
fn fill_is_independent_of_estimate() {
    for estimate in [0, 2, 5, 10] {
        assert_eq!(fill(Vec::new(), 5, estimate), vec![1, 2, 3, 4, 5]);
    }
}

#[test]
fn fill_reuses_and_trims_existing_elements() {
    assert_eq!(fill(vec![9; 8], 5, 0), vec![1, 2, 3, 4, 5]);
    assert_eq!(fill(vec![9; 8], 5, 10), vec![1, 2, 3, 4, 5]);
    assert_eq!(fill(vec![9; 2], 5, 2), vec![1, 2, 3, 4, 5]);
    assert!(fill(vec![9; 3], 0, 0).is_empty());
}

#[test]
fn fill_other_sequences() {
    assert_eq!(
        fill(VecDeque::from(vec![7]), 3, 10),
        VecDeque::from(vec![1, 2, 3])
    );
    assert_eq!(
        fill(LinkedList::new(), 4, 2).into_iter().collect::<Vec<_>>(),
        vec![1, 2, 3, 4]
    );
}

#[test]
fn fill_stops_on_fatal_error() {
    let mut container: Vec<i8> = Vec::new();
    let mut array = EstimatingArray::new(200, 0);
    let err = load_items(&mut container, &mut array).unwrap_err();
    match err {
        Error::Overflow { path, .. } => assert_eq!(path, "/127"),
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn drain_in_order() {
    let mut container = VecDeque::from(vec![3u16, 1, 2]);
    let mut array = RecordingArray {
        saved: Vec::new(),
        context: SerializationContext::new(SerializationOptions::default()),
    };
    save_items(&mut container, &mut array).unwrap();
    assert_eq!(array.saved, ["3", "1", "2"]);
    assert_eq!(container.len(), 3);
}
