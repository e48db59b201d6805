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

//! The archive scope protocol implemented by every backend.
//!
//! A backend exposes a root scope from which object and array scopes are opened.
//! A child scope mutably borrows its parent, so scopes always nest strictly: the
//! parent cannot open a sibling or be used at all until the child is dropped, and
//! dropping releases the child on every exit path including `?` propagation.
//!
//! ```text
//! Root ──open_array_scope──▶ Array ──open_object_scope──▶ Object ──serialize_value_with_key
//!   path ""                   path "/1"                     path "/1"     value path "/1/x"
//! ```

pub mod capability;

use std::borrow::Cow;
use std::convert::Infallible;
use std::fmt;
use std::marker::PhantomData;

use crate::archive::capability::{unsupported, Capabilities, Operation};
use crate::config::SerializationOptions;
use crate::error::Error;
use crate::resolver::context::SerializationContext;
use crate::serializer::number::Scalar;
use crate::serializer::string::ArchiveString;
use crate::types::{ScopeRole, SerializeMode};

/// Key type used for object member names.
pub trait ArchiveKey: ToOwned + fmt::Display {
    /// Converts a member name declared in code into the archive key type.
    fn from_name(name: &str) -> Cow<'_, Self>;
}

impl ArchiveKey for str {
    #[inline(always)]
    fn from_name(name: &str) -> Cow<'_, str> {
        Cow::Borrowed(name)
    }
}

/// One scope of an archive: the root, an object or an array.
///
/// Every operation has a default body that fails with [`Error::Unsupported`]; a
/// backend overrides the ones it implements and lists them in
/// [`ArchiveScope::CAPABILITIES`]. Keyed operations return whether the key was
/// present in the source (always `true` when saving).
pub trait ArchiveScope: Sized {
    type Key: ArchiveKey + ?Sized;
    type ObjectScope<'a>: ArchiveScope<Key = Self::Key>
    where
        Self: 'a;
    type ArrayScope<'a>: ArchiveScope<Key = Self::Key>
    where
        Self: 'a;

    const MODE: SerializeMode;
    const ROLE: ScopeRole;
    const CAPABILITIES: Capabilities;
    const PATH_SEPARATOR: char = '/';

    #[inline(always)]
    fn is_loading(&self) -> bool {
        Self::MODE.is_loading()
    }

    #[inline(always)]
    fn is_saving(&self) -> bool {
        Self::MODE.is_saving()
    }

    fn context(&mut self) -> &mut SerializationContext;

    fn options(&self) -> &SerializationOptions;

    /// Full path from the root to this scope. For arrays the last segment is the
    /// index of the element accessed most recently.
    fn path(&self) -> String;

    #[allow(unused_variables)]
    fn serialize_value<V: Scalar>(&mut self, value: &mut V) -> Result<(), Error> {
        Err(unsupported::<Self>(Operation::Value))
    }

    #[allow(unused_variables)]
    fn serialize_value_with_key<V: Scalar>(
        &mut self,
        key: &Self::Key,
        value: &mut V,
    ) -> Result<bool, Error> {
        Err(unsupported::<Self>(Operation::KeyedValue))
    }

    #[allow(unused_variables)]
    fn serialize_string<T: ArchiveString>(&mut self, value: &mut T) -> Result<(), Error> {
        Err(unsupported::<Self>(Operation::String))
    }

    #[allow(unused_variables)]
    fn serialize_string_with_key<T: ArchiveString>(
        &mut self,
        key: &Self::Key,
        value: &mut T,
    ) -> Result<bool, Error> {
        Err(unsupported::<Self>(Operation::KeyedString))
    }

    fn open_object_scope(&mut self) -> Result<Option<Self::ObjectScope<'_>>, Error> {
        Err(unsupported::<Self>(Operation::Object))
    }

    /// `None` when loading and `key` is absent.
    #[allow(unused_variables)]
    fn open_object_scope_with_key(
        &mut self,
        key: &Self::Key,
    ) -> Result<Option<Self::ObjectScope<'_>>, Error> {
        Err(unsupported::<Self>(Operation::KeyedObject))
    }

    /// `size_hint` reserves space when saving and is ignored when loading.
    #[allow(unused_variables)]
    fn open_array_scope(&mut self, size_hint: usize) -> Result<Option<Self::ArrayScope<'_>>, Error> {
        Err(unsupported::<Self>(Operation::Array))
    }

    #[allow(unused_variables)]
    fn open_array_scope_with_key(
        &mut self,
        key: &Self::Key,
        size_hint: usize,
    ) -> Result<Option<Self::ArrayScope<'_>>, Error> {
        Err(unsupported::<Self>(Operation::KeyedArray))
    }

    /// Best-effort element count known before a full scan, 0 when unknown.
    fn estimated_size(&self) -> usize {
        0
    }

    /// Whether no elements remain in this array while loading.
    fn is_end(&self) -> bool {
        true
    }

    #[allow(unused_variables)]
    fn key_by_index(&self, index: usize) -> Option<<Self::Key as ToOwned>::Owned> {
        None
    }
}

/// Joins a path segment (index or key) to its parent path.
pub fn join_path(parent: &str, separator: char, segment: impl fmt::Display) -> String {
    format!("{}{}{}", parent, separator, segment)
}

/// Path of the member `key` of `scope`.
pub fn member_path<S: ArchiveScope>(scope: &S, key: &S::Key) -> String {
    join_path(&scope.path(), S::PATH_SEPARATOR, key)
}

/// Child scope type of scopes that cannot open children.
///
/// It has no values, so the scope can never be constructed.
pub struct NoScope<K: ?Sized> {
    never: Infallible,
    _key: PhantomData<K>,
}

impl<K: ArchiveKey + ?Sized> ArchiveScope for NoScope<K> {
    type Key = K;
    type ObjectScope<'a> = NoScope<K> where Self: 'a;
    type ArrayScope<'a> = NoScope<K> where Self: 'a;

    const MODE: SerializeMode = SerializeMode::Load;
    const ROLE: ScopeRole = ScopeRole::Object;
    const CAPABILITIES: Capabilities = Capabilities::empty();

    fn context(&mut self) -> &mut SerializationContext {
        match self.never {}
    }

    fn options(&self) -> &SerializationOptions {
        match self.never {}
    }

    fn path(&self) -> String {
        match self.never {}
    }
}

/// A concrete format: builds root scopes over parsed input or fresh output.
pub trait Archive {
    /// Short name used in logs.
    const NAME: &'static str;

    type Key: ArchiveKey + ?Sized;
    /// Parsed input document.
    type Document;
    /// Output under construction.
    type Output: Default;
    type Reader<'a>: ArchiveScope<Key = Self::Key>
    where
        Self::Document: 'a;
    type Writer<'a>: ArchiveScope<Key = Self::Key>
    where
        Self::Output: 'a;

    /// Rejects option values the format cannot honor, before any work starts.
    #[allow(unused_variables)]
    fn check_options(options: &SerializationOptions) -> Result<(), Error> {
        Ok(())
    }

    fn parse(input: &str, options: &SerializationOptions) -> Result<Self::Document, Error>;

    fn reader<'a>(
        document: &'a Self::Document,
        context: &'a mut SerializationContext,
    ) -> Self::Reader<'a>;

    fn writer<'a>(
        output: &'a mut Self::Output,
        context: &'a mut SerializationContext,
    ) -> Self::Writer<'a>;

    fn render(output: &Self::Output, options: &SerializationOptions) -> Result<String, Error>;
}
