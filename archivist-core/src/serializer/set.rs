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

use std::collections::{BTreeSet, HashSet};
use std::hash::{BuildHasher, Hash};

use tracing::trace;

use crate::archive::capability::Require;
use crate::archive::ArchiveScope;
use crate::error::Error;
use crate::serializer::Serialize;

/// Set elements cannot be mutated in place, so saving goes through a clone and
/// loading through a temporary that is inserted afterwards.
trait SetContainer {
    type Item: Serialize + Default + Clone;

    fn clear(&mut self);

    fn insert(&mut self, item: Self::Item);

    fn items(&self) -> impl Iterator<Item = &Self::Item>;
}

impl<T, H> SetContainer for HashSet<T, H>
where
    T: Serialize + Default + Clone + Eq + Hash,
    H: BuildHasher,
{
    type Item = T;

    fn clear(&mut self) {
        HashSet::clear(self);
    }

    fn insert(&mut self, item: T) {
        HashSet::insert(self, item);
    }

    fn items(&self) -> impl Iterator<Item = &T> {
        self.iter()
    }
}

impl<T> SetContainer for BTreeSet<T>
where
    T: Serialize + Default + Clone + Ord,
{
    type Item = T;

    fn clear(&mut self) {
        BTreeSet::clear(self);
    }

    fn insert(&mut self, item: T) {
        BTreeSet::insert(self, item);
    }

    fn items(&self) -> impl Iterator<Item = &T> {
        self.iter()
    }
}

fn serialize_items<C, A>(set: &mut C, array: &mut A) -> Result<(), Error>
where
    C: SetContainer,
    A: ArchiveScope,
{
    trace!(path = %array.path(), "set scope opened");
    if array.is_loading() {
        set.clear();
        while !array.is_end() {
            let mut item = C::Item::default();
            item.serialize(array)?;
            set.insert(item);
        }
    } else {
        for item in set.items() {
            item.clone().serialize(array)?;
        }
    }
    Ok(())
}

fn serialize<C, S>(set: &mut C, scope: &mut S, size_hint: usize) -> Result<(), Error>
where
    C: SetContainer,
    S: ArchiveScope,
{
    let () = Require::<S>::ARRAY;
    if let Some(mut array) = scope.open_array_scope(size_hint)? {
        serialize_items(set, &mut array)?;
    }
    Ok(())
}

fn serialize_with_key<C, S>(
    set: &mut C,
    scope: &mut S,
    key: &S::Key,
    size_hint: usize,
) -> Result<bool, Error>
where
    C: SetContainer,
    S: ArchiveScope,
{
    let () = Require::<S>::KEYED_ARRAY;
    match scope.open_array_scope_with_key(key, size_hint)? {
        Some(mut array) => {
            serialize_items(set, &mut array)?;
            Ok(true)
        }
        None => Ok(false),
    }
}

impl<T, H> Serialize for HashSet<T, H>
where
    T: Serialize + Default + Clone + Eq + Hash,
    H: BuildHasher,
{
    fn serialize<S: ArchiveScope>(&mut self, scope: &mut S) -> Result<(), Error> {
        let len = self.len();
        serialize(self, scope, len)
    }

    fn serialize_with_key<S: ArchiveScope>(
        &mut self,
        scope: &mut S,
        key: &S::Key,
    ) -> Result<bool, Error> {
        let len = self.len();
        serialize_with_key(self, scope, key, len)
    }
}

impl<T> Serialize for BTreeSet<T>
where
    T: Serialize + Default + Clone + Ord,
{
    fn serialize<S: ArchiveScope>(&mut self, scope: &mut S) -> Result<(), Error> {
        let len = self.len();
        serialize(self, scope, len)
    }

    fn serialize_with_key<S: ArchiveScope>(
        &mut self,
        scope: &mut S,
        key: &S::Key,
    ) -> Result<bool, Error> {
        let len = self.len();
        serialize_with_key(self, scope, key, len)
    }
}
