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

use tracing::trace;

use crate::archive::capability::Require;
use crate::archive::ArchiveScope;
use crate::error::Error;
use crate::serializer::Serialize;

#[cold]
fn capacity_exceeded<A: ArchiveScope>(array: &A, capacity: usize, found: Option<usize>) -> Error {
    match found {
        Some(found) => Error::out_of_range(format!(
            "array at '{}' has {} elements, destination holds {}",
            array.path(),
            found,
            capacity
        )),
        None => Error::out_of_range(format!(
            "array at '{}' has more elements than the destination holds ({})",
            array.path(),
            capacity
        )),
    }
}

/// Serializes a fixed number of elements in index order.
///
/// When loading, a source with more elements than `items` is an error and
/// nothing is written past the last slot; a shorter source leaves the trailing
/// slots untouched.
pub fn serialize_items<T, A>(items: &mut [T], array: &mut A) -> Result<(), Error>
where
    T: Serialize,
    A: ArchiveScope,
{
    trace!(path = %array.path(), len = items.len(), "array scope opened");
    if array.is_loading() {
        let capacity = items.len();
        let estimated = array.estimated_size();
        if estimated > capacity {
            return Err(capacity_exceeded(array, capacity, Some(estimated)));
        }
        for item in items.iter_mut() {
            if array.is_end() {
                return Ok(());
            }
            item.serialize(array)?;
        }
        if !array.is_end() {
            return Err(capacity_exceeded(array, capacity, None));
        }
    } else {
        for item in items.iter_mut() {
            item.serialize(array)?;
        }
    }
    Ok(())
}

impl<T: Serialize, const N: usize> Serialize for [T; N] {
    fn serialize<S: ArchiveScope>(&mut self, scope: &mut S) -> Result<(), Error> {
        let () = Require::<S>::ARRAY;
        if let Some(mut array) = scope.open_array_scope(N)? {
            serialize_items(self, &mut array)?;
        }
        Ok(())
    }

    fn serialize_with_key<S: ArchiveScope>(
        &mut self,
        scope: &mut S,
        key: &S::Key,
    ) -> Result<bool, Error> {
        let () = Require::<S>::KEYED_ARRAY;
        match scope.open_array_scope_with_key(key, N)? {
            Some(mut array) => {
                serialize_items(self, &mut array)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
