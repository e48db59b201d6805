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

//! Name registry of enum types.
//!
//! Every enum serialized by name declares its registry once with
//! [`register_enum!`](crate::register_enum). The registry is built on first
//! access and never changes afterwards, so lookups need no locking.

/// Bidirectional value/name table of one enum type.
pub struct EnumRegistry<T: 'static> {
    entries: Vec<(T, &'static str)>,
}

impl<T: Copy + PartialEq + 'static> EnumRegistry<T> {
    pub fn new(entries: &[(T, &'static str)]) -> Self {
        debug_assert!(
            entries
                .iter()
                .enumerate()
                .all(|(i, (_, name))| entries[..i].iter().all(|(_, other)| other != name)),
            "enum names must be unique"
        );
        EnumRegistry {
            entries: entries.to_vec(),
        }
    }

    pub fn name_of(&self, value: T) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|(v, _)| *v == value)
            .map(|(_, name)| *name)
    }

    pub fn value_of(&self, name: &str) -> Option<T> {
        self.entries
            .iter()
            .find(|(_, n)| *n == name)
            .map(|(v, _)| *v)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(_, name)| *name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// An enum type with a registered name table.
pub trait RegisteredEnum: Copy + PartialEq + 'static {
    const TYPE_NAME: &'static str;

    fn registry() -> &'static EnumRegistry<Self>;
}

/// Declares the name table of an enum and makes it serializable by name.
///
/// ```
/// use archivist_core::register_enum;
///
/// #[derive(Clone, Copy, Debug, PartialEq)]
/// enum Color {
///     Red,
///     Green,
/// }
///
/// register_enum!(Color {
///     Color::Red => "red",
///     Color::Green => "green",
/// });
/// ```
#[macro_export]
macro_rules! register_enum {
    ($ty:ty { $($variant:path => $name:expr),+ $(,)? }) => {
        impl $crate::resolver::enum_registry::RegisteredEnum for $ty {
            const TYPE_NAME: &'static str = stringify!($ty);

            fn registry() -> &'static $crate::resolver::enum_registry::EnumRegistry<Self> {
                static REGISTRY: ::std::sync::OnceLock<
                    $crate::resolver::enum_registry::EnumRegistry<$ty>,
                > = ::std::sync::OnceLock::new();
                REGISTRY.get_or_init(|| {
                    $crate::resolver::enum_registry::EnumRegistry::new(&[$(($variant, $name)),+])
                })
            }
        }

        impl $crate::serializer::Serialize for $ty {
            #[inline]
            fn serialize<S: $crate::archive::ArchiveScope>(
                &mut self,
                scope: &mut S,
            ) -> Result<(), $crate::error::Error> {
                $crate::serializer::enum_::serialize(self, scope)
            }

            #[inline]
            fn serialize_with_key<S: $crate::archive::ArchiveScope>(
                &mut self,
                scope: &mut S,
                key: &S::Key,
            ) -> Result<bool, $crate::error::Error> {
                $crate::serializer::enum_::serialize_with_key(self, scope, key)
            }
        }
    };
}
