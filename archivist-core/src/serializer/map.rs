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

//! Maps are objects whose member names are the map keys.

use std::borrow::Borrow;
use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};

use tracing::trace;

use crate::archive::capability::Require;
use crate::archive::{join_path, ArchiveKey, ArchiveScope};
use crate::error::Error;
use crate::serializer::number::{Scalar, ScalarError};
use crate::serializer::Serialize;

/// Map key types, converted through their textual form.
pub trait MapKey: Sized {
    fn to_key(&self) -> String;

    fn from_key(key: &str) -> Result<Self, ScalarError>;
}

impl MapKey for String {
    fn to_key(&self) -> String {
        self.clone()
    }

    fn from_key(key: &str) -> Result<Self, ScalarError> {
        Ok(key.to_string())
    }
}

macro_rules! impl_scalar_map_key {
    ($($ty:ty),+) => {
        $(
            impl MapKey for $ty {
                fn to_key(&self) -> String {
                    self.to_text()
                }

                fn from_key(key: &str) -> Result<Self, ScalarError> {
                    <$ty as Scalar>::from_text(key)
                }
            }
        )+
    };
}

impl_scalar_map_key!(bool, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

/// A key/value container loaded from and saved into an object scope.
pub trait MapContainer {
    type Key: MapKey;
    type Value: Serialize + Default;

    fn len(&self) -> usize;

    fn clear(&mut self);

    fn insert(&mut self, key: Self::Key, value: Self::Value);

    fn entries_mut(&mut self) -> impl Iterator<Item = (&Self::Key, &mut Self::Value)>;
}

impl<K, V, H> MapContainer for HashMap<K, V, H>
where
    K: MapKey + Eq + Hash,
    V: Serialize + Default,
    H: BuildHasher,
{
    type Key = K;
    type Value = V;

    fn len(&self) -> usize {
        HashMap::len(self)
    }

    fn clear(&mut self) {
        HashMap::clear(self);
    }

    fn insert(&mut self, key: K, value: V) {
        HashMap::insert(self, key, value);
    }

    fn entries_mut(&mut self) -> impl Iterator<Item = (&K, &mut V)> {
        self.iter_mut()
    }
}

impl<K, V> MapContainer for BTreeMap<K, V>
where
    K: MapKey + Ord,
    V: Serialize + Default,
{
    type Key = K;
    type Value = V;

    fn len(&self) -> usize {
        BTreeMap::len(self)
    }

    fn clear(&mut self) {
        BTreeMap::clear(self);
    }

    fn insert(&mut self, key: K, value: V) {
        BTreeMap::insert(self, key, value);
    }

    fn entries_mut(&mut self) -> impl Iterator<Item = (&K, &mut V)> {
        self.iter_mut()
    }
}

fn load_entries<M, O>(map: &mut M, object: &mut O) -> Result<(), Error>
where
    M: MapContainer,
    O: ArchiveScope,
{
    let () = Require::<O>::KEY_ENUMERATION;
    map.clear();
    let mut index = 0;
    while let Some(owned) = object.key_by_index(index) {
        index += 1;
        let key: &O::Key = owned.borrow();
        let text = key.to_string();
        let map_key = match M::Key::from_key(&text) {
            Ok(map_key) => map_key,
            Err(ScalarError::Overflow(message)) => {
                let path = join_path(&object.path(), O::PATH_SEPARATOR, &text);
                object.context().on_overflow(path, message)?;
                continue;
            }
            Err(ScalarError::MismatchedType(message)) => {
                let path = join_path(&object.path(), O::PATH_SEPARATOR, &text);
                object.context().on_mismatched_type(path, message)?;
                continue;
            }
        };
        let mut value = M::Value::default();
        if value.serialize_with_key(object, key)? {
            map.insert(map_key, value);
        }
    }
    Ok(())
}

fn save_entries<M, O>(map: &mut M, object: &mut O) -> Result<(), Error>
where
    M: MapContainer,
    O: ArchiveScope,
{
    for (key, value) in map.entries_mut() {
        let name = key.to_key();
        let key = <O::Key as ArchiveKey>::from_name(&name);
        value.serialize_with_key(object, &key)?;
    }
    Ok(())
}

fn serialize_entries<M, O>(map: &mut M, object: &mut O) -> Result<(), Error>
where
    M: MapContainer,
    O: ArchiveScope,
{
    trace!(path = %object.path(), len = map.len(), "map scope opened");
    if object.is_loading() {
        load_entries(map, object)
    } else {
        save_entries(map, object)
    }
}

pub fn serialize<M, S>(map: &mut M, scope: &mut S) -> Result<(), Error>
where
    M: MapContainer,
    S: ArchiveScope,
{
    let () = Require::<S>::OBJECT;
    if let Some(mut object) = scope.open_object_scope()? {
        serialize_entries(map, &mut object)?;
    }
    Ok(())
}

pub fn serialize_with_key<M, S>(map: &mut M, scope: &mut S, key: &S::Key) -> Result<bool, Error>
where
    M: MapContainer,
    S: ArchiveScope,
{
    let () = Require::<S>::KEYED_OBJECT;
    match scope.open_object_scope_with_key(key)? {
        Some(mut object) => {
            serialize_entries(map, &mut object)?;
            Ok(true)
        }
        None => Ok(false),
    }
}

impl<K, V, H> Serialize for HashMap<K, V, H>
where
    K: MapKey + Eq + Hash,
    V: Serialize + Default,
    H: BuildHasher,
{
    fn serialize<S: ArchiveScope>(&mut self, scope: &mut S) -> Result<(), Error> {
        serialize(self, scope)
    }

    fn serialize_with_key<S: ArchiveScope>(
        &mut self,
        scope: &mut S,
        key: &S::Key,
    ) -> Result<bool, Error> {
        serialize_with_key(self, scope, key)
    }
}

impl<K, V> Serialize for BTreeMap<K, V>
where
    K: MapKey + Ord,
    V: Serialize + Default,
{
    fn serialize<S: ArchiveScope>(&mut self, scope: &mut S) -> Result<(), Error> {
        serialize(self, scope)
    }

    fn serialize_with_key<S: ArchiveScope>(
        &mut self,
        scope: &mut S,
        key: &S::Key,
    ) -> Result<bool, Error> {
        serialize_with_key(self, scope, key)
    }
}
