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

//! Generic fill and drain of dynamically sized sequences.
//!
//! Loading trusts the array scope only for the end test. The estimated size is
//! a hint used to pre-size the container; whether it is too small, too large or
//! unknown, the container ends up with exactly the number of source elements.

use tracing::trace;

use crate::archive::capability::Require;
use crate::archive::ArchiveScope;
use crate::error::Error;
use crate::serializer::Serialize;

/// An ordered sequence that can be resized and grown at the back.
pub trait SequenceContainer {
    type Item: Serialize + Default;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Resizes to `len`, filling new slots with default elements.
    fn resize_default(&mut self, len: usize);

    fn slots_mut(&mut self) -> impl Iterator<Item = &mut Self::Item>;

    fn push_back(&mut self, item: Self::Item);

    fn truncate(&mut self, len: usize);
}

/// Fills `container` from `array`.
///
/// 1. pre-size to the estimated size when the backend knows it;
/// 2. reuse existing slots in order while the source has elements;
/// 3. append default elements while the source has elements;
/// 4. cut the container to the number of loaded elements.
pub fn load_items<C, A>(container: &mut C, array: &mut A) -> Result<(), Error>
where
    C: SequenceContainer,
    A: ArchiveScope,
{
    let estimated = array.estimated_size();
    if estimated != 0 {
        container.resize_default(estimated);
    }
    let mut loaded = 0;
    for slot in container.slots_mut() {
        if array.is_end() {
            break;
        }
        slot.serialize(array)?;
        loaded += 1;
    }
    while !array.is_end() {
        let mut item = C::Item::default();
        item.serialize(array)?;
        container.push_back(item);
        loaded += 1;
    }
    container.truncate(loaded);
    Ok(())
}

/// Writes every element of `container` in order.
pub fn save_items<C, A>(container: &mut C, array: &mut A) -> Result<(), Error>
where
    C: SequenceContainer,
    A: ArchiveScope,
{
    for item in container.slots_mut() {
        item.serialize(array)?;
    }
    Ok(())
}

/// Loads or saves `container` through `array`, depending on the session mode.
pub fn serialize_items<C, A>(container: &mut C, array: &mut A) -> Result<(), Error>
where
    C: SequenceContainer,
    A: ArchiveScope,
{
    trace!(path = %array.path(), "array scope opened");
    if array.is_loading() {
        load_items(container, array)
    } else {
        save_items(container, array)
    }
}

/// Unkeyed dispatch shared by every [`SequenceContainer`].
pub fn serialize<C, S>(container: &mut C, scope: &mut S) -> Result<(), Error>
where
    C: SequenceContainer,
    S: ArchiveScope,
{
    let () = Require::<S>::ARRAY;
    let size_hint = container.len();
    if let Some(mut array) = scope.open_array_scope(size_hint)? {
        serialize_items(container, &mut array)?;
    }
    Ok(())
}

/// Keyed dispatch shared by every [`SequenceContainer`].
pub fn serialize_with_key<C, S>(container: &mut C, scope: &mut S, key: &S::Key) -> Result<bool, Error>
where
    C: SequenceContainer,
    S: ArchiveScope,
{
    let () = Require::<S>::KEYED_ARRAY;
    let size_hint = container.len();
    match scope.open_array_scope_with_key(key, size_hint)? {
        Some(mut array) => {
            serialize_items(container, &mut array)?;
            Ok(true)
        }
        None => Ok(false),
    }
}
