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

use crate::archive::ArchiveScope;
use crate::error::Error;

macro_rules! impl_value_serialize {
    ($($ty:ty),+) => {
        $(
            impl $crate::serializer::Serialize for $ty {
                #[inline(always)]
                fn serialize<S: $crate::archive::ArchiveScope>(
                    &mut self,
                    scope: &mut S,
                ) -> Result<(), $crate::error::Error> {
                    let () = $crate::archive::capability::Require::<S>::VALUE;
                    scope.serialize_value(self)
                }

                #[inline(always)]
                fn serialize_with_key<S: $crate::archive::ArchiveScope>(
                    &mut self,
                    scope: &mut S,
                    key: &S::Key,
                ) -> Result<bool, $crate::error::Error> {
                    let () = $crate::archive::capability::Require::<S>::KEYED_VALUE;
                    scope.serialize_value_with_key(key, self)
                }
            }
        )+
    };
}

pub mod array;
mod bool_;
mod box_;
pub mod collection;
mod datetime;
pub mod enum_;
mod list;
pub mod map;
pub mod null;
pub mod number;
mod option;
mod set;
pub mod string;
pub mod struct_;
mod tuple;
pub mod validate;

/// The recursive (de)serialization contract.
///
/// One routine covers both directions: the scope decides whether `self` is read
/// from it or written into it. For this reason saving also takes `&mut self`;
/// implementations never modify the value while saving.
///
/// Implement it through [`impl_serialize_object!`](crate::impl_serialize_object)
/// for types with members, or [`register_enum!`](crate::register_enum) for enums.
pub trait Serialize {
    /// Serializes `self` as the next unnamed element of `scope`.
    fn serialize<S: ArchiveScope>(&mut self, scope: &mut S) -> Result<(), Error>;

    /// Serializes `self` as the member `key` of `scope`.
    ///
    /// Returns `false` when loading and the key does not exist in the source, in
    /// which case `self` is left untouched.
    fn serialize_with_key<S: ArchiveScope>(
        &mut self,
        scope: &mut S,
        key: &S::Key,
    ) -> Result<bool, Error>;
}

/// Serializes `value` without key into `scope`.
#[inline(always)]
pub fn serialize<S: ArchiveScope, T: Serialize>(scope: &mut S, value: &mut T) -> Result<(), Error> {
    value.serialize(scope)
}

/// Serializes `value` as the member `key` of `scope`, returning its presence.
#[inline(always)]
pub fn serialize_with_key<S: ArchiveScope, T: Serialize>(
    scope: &mut S,
    key: &S::Key,
    value: &mut T,
) -> Result<bool, Error> {
    value.serialize_with_key(scope, key)
}
