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

//! Capability detection for archive scopes.
//!
//! Every scope type declares the operations it implements in
//! [`ArchiveScope::CAPABILITIES`]. The dispatcher checks the declaration in two ways:
//!
//! - statically, through the associated constants of [`Require`]. Referencing
//!   `Require::<S>::KEYED_ARRAY` in a generic function that gets instantiated with a
//!   scope lacking the capability fails the build with a message naming the missing
//!   operation. Nothing is checked at run time.
//! - dynamically, through [`unsupported`]: protocol methods a backend leaves
//!   unimplemented return [`Error::Unsupported`] naming the operation and the scope
//!   role, so a direct call never silently does nothing.

use std::fmt;
use std::marker::PhantomData;

use bitflags::bitflags;

use crate::archive::ArchiveScope;
use crate::error::Error;
use crate::types::ScopeRole;

bitflags! {
    /// Set of protocol operations implemented by a scope type.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Capabilities: u16 {
        const VALUE = 1 << 0;
        const KEYED_VALUE = 1 << 1;
        const STRING = 1 << 2;
        const KEYED_STRING = 1 << 3;
        const OBJECT = 1 << 4;
        const KEYED_OBJECT = 1 << 5;
        const ARRAY = 1 << 6;
        const KEYED_ARRAY = 1 << 7;
        /// Positional key lookup (`key_by_index`), needed to load maps.
        const KEY_ENUMERATION = 1 << 8;
    }
}

/// A single protocol operation, used in diagnostics and run-time queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    Value,
    KeyedValue,
    String,
    KeyedString,
    Object,
    KeyedObject,
    Array,
    KeyedArray,
    KeyEnumeration,
}

impl Operation {
    pub const fn capability(self) -> Capabilities {
        match self {
            Operation::Value => Capabilities::VALUE,
            Operation::KeyedValue => Capabilities::KEYED_VALUE,
            Operation::String => Capabilities::STRING,
            Operation::KeyedString => Capabilities::KEYED_STRING,
            Operation::Object => Capabilities::OBJECT,
            Operation::KeyedObject => Capabilities::KEYED_OBJECT,
            Operation::Array => Capabilities::ARRAY,
            Operation::KeyedArray => Capabilities::KEYED_ARRAY,
            Operation::KeyEnumeration => Capabilities::KEY_ENUMERATION,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Operation::Value => "value without key",
            Operation::KeyedValue => "keyed value",
            Operation::String => "string without key",
            Operation::KeyedString => "keyed string",
            Operation::Object => "object without key",
            Operation::KeyedObject => "keyed object",
            Operation::Array => "array without key",
            Operation::KeyedArray => "keyed array",
            Operation::KeyEnumeration => "key enumeration",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Capabilities declared by the scope type `S`.
#[inline(always)]
pub const fn capabilities_of<S: ArchiveScope>() -> Capabilities {
    S::CAPABILITIES
}

/// Whether the scope type `S` implements `operation`.
#[inline(always)]
pub const fn supports<S: ArchiveScope>(operation: Operation) -> bool {
    S::CAPABILITIES.contains(operation.capability())
}

/// Diagnostic for an operation the scope type `S` does not implement.
#[cold]
pub fn unsupported<S: ArchiveScope>(operation: Operation) -> Error {
    Error::unsupported(format!(
        "{} is not supported in {} scope",
        operation,
        S::ROLE
    ))
}

/// Run-time check, for callers that cannot rely on [`Require`].
#[inline]
pub fn ensure_supported<S: ArchiveScope>(operation: Operation) -> Result<(), Error> {
    if supports::<S>(operation) {
        Ok(())
    } else {
        Err(unsupported::<S>(operation))
    }
}

/// Build-time capability assertions.
///
/// ```ignore
/// let () = Require::<S>::KEYED_VALUE;
/// ```
pub struct Require<S>(PhantomData<S>);

impl<S: ArchiveScope> Require<S> {
    pub const VALUE: () = assert!(
        S::CAPABILITIES.contains(Capabilities::VALUE),
        "the archive scope does not support values without key"
    );
    pub const KEYED_VALUE: () = assert!(
        S::CAPABILITIES.contains(Capabilities::KEYED_VALUE),
        "the archive scope does not support values with key"
    );
    pub const STRING: () = assert!(
        S::CAPABILITIES.contains(Capabilities::STRING),
        "the archive scope does not support strings without key"
    );
    pub const KEYED_STRING: () = assert!(
        S::CAPABILITIES.contains(Capabilities::KEYED_STRING),
        "the archive scope does not support strings with key"
    );
    pub const OBJECT: () = assert!(
        S::CAPABILITIES.contains(Capabilities::OBJECT),
        "the archive scope does not support objects without key"
    );
    pub const KEYED_OBJECT: () = assert!(
        S::CAPABILITIES.contains(Capabilities::KEYED_OBJECT),
        "the archive scope does not support objects with key"
    );
    pub const ARRAY: () = assert!(
        S::CAPABILITIES.contains(Capabilities::ARRAY),
        "the archive scope does not support arrays without key"
    );
    pub const KEYED_ARRAY: () = assert!(
        S::CAPABILITIES.contains(Capabilities::KEYED_ARRAY),
        "the archive scope does not support arrays with key"
    );
    pub const KEY_ENUMERATION: () = assert!(
        S::CAPABILITIES.contains(Capabilities::KEY_ENUMERATION),
        "the archive scope cannot enumerate its keys"
    );
    pub const OBJECT_SCOPE: () = assert!(
        matches!(S::ROLE, ScopeRole::Object),
        "base objects can only be serialized inside an object scope"
    );
}
