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

//! User types with explicitly declared members.
//!
//! ```
//! use archivist_core::archive::ArchiveScope;
//! use archivist_core::error::Error;
//! use archivist_core::impl_serialize_object;
//! use archivist_core::serializer::struct_::SerializeObject;
//! use archivist_core::serializer::validate::{field, required_field};
//!
//! #[derive(Default)]
//! struct Point {
//!     x: i32,
//!     y: i32,
//!     label: String,
//! }
//!
//! impl SerializeObject for Point {
//!     fn serialize_object<S: ArchiveScope>(&mut self, scope: &mut S) -> Result<(), Error> {
//!         required_field(scope, "x", &mut self.x)?;
//!         required_field(scope, "y", &mut self.y)?;
//!         field(scope, "label", &mut self.label)?;
//!         Ok(())
//!     }
//! }
//!
//! impl_serialize_object!(Point);
//! ```

use tracing::trace;

use crate::archive::capability::Require;
use crate::archive::ArchiveScope;
use crate::error::Error;

/// Member routine of a user type, run against the object scope opened for it.
pub trait SerializeObject {
    fn serialize_object<S: ArchiveScope>(&mut self, scope: &mut S) -> Result<(), Error>;
}

/// Serializes `value` as an unnamed object element of `scope`.
pub fn serialize<T, S>(value: &mut T, scope: &mut S) -> Result<(), Error>
where
    T: SerializeObject + ?Sized,
    S: ArchiveScope,
{
    let () = Require::<S>::OBJECT;
    if let Some(mut object) = scope.open_object_scope()? {
        trace!(path = %object.path(), "object scope opened");
        value.serialize_object(&mut object)?;
    }
    Ok(())
}

/// Serializes `value` as the object member `key` of `scope`.
pub fn serialize_with_key<T, S>(value: &mut T, scope: &mut S, key: &S::Key) -> Result<bool, Error>
where
    T: SerializeObject + ?Sized,
    S: ArchiveScope,
{
    let () = Require::<S>::KEYED_OBJECT;
    match scope.open_object_scope_with_key(key)? {
        Some(mut object) => {
            trace!(path = %object.path(), "object scope opened");
            value.serialize_object(&mut object)?;
            Ok(true)
        }
        None => Ok(false),
    }
}

/// Runs the member routine of `base` inside the current object scope, so the
/// members of the base and the derived type share one object.
///
/// Only valid inside an object scope; anything else fails to build.
pub fn serialize_base<S, B>(scope: &mut S, base: &mut B) -> Result<(), Error>
where
    S: ArchiveScope,
    B: SerializeObject + ?Sized,
{
    let () = Require::<S>::OBJECT_SCOPE;
    base.serialize_object(scope)
}

/// Implements [`Serialize`](crate::serializer::Serialize) for a type implementing
/// [`SerializeObject`].
///
/// ```ignore
/// impl_serialize_object!(Point);
/// impl_serialize_object!(impl<T> Tagged<T>);
/// ```
#[macro_export]
macro_rules! impl_serialize_object {
    (@body) => {
        #[inline]
        fn serialize<S: $crate::archive::ArchiveScope>(
            &mut self,
            scope: &mut S,
        ) -> Result<(), $crate::error::Error> {
            $crate::serializer::struct_::serialize(self, scope)
        }

        #[inline]
        fn serialize_with_key<S: $crate::archive::ArchiveScope>(
            &mut self,
            scope: &mut S,
            key: &S::Key,
        ) -> Result<bool, $crate::error::Error> {
            $crate::serializer::struct_::serialize_with_key(self, scope, key)
        }
    };
    (impl<$($gen:ident),+> $ty:ty) => {
        impl<$($gen),+> $crate::serializer::Serialize for $ty
        where
            $ty: $crate::serializer::struct_::SerializeObject,
        {
            $crate::impl_serialize_object!(@body);
        }
    };
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::serializer::Serialize for $ty {
                $crate::impl_serialize_object!(@body);
            }
        )+
    };
}
