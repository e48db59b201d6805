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

//! # Archivist Core
//!
//! The format-agnostic part of the archivist serialization framework. Objects
//! are mapped to and from text formats through one recursive routine per type;
//! concrete formats only implement the archive scope protocol.
//!
//! ## Architecture
//!
//! - **`archive`**: the scope protocol (root, object and array scopes, paths)
//!   and capability detection
//! - **`serializer`**: the `Serialize` dispatcher and its implementations for
//!   values, strings, enums, user objects, fixed arrays, containers and maps
//! - **`resolver`**: the per-call serialization context and enum registries
//! - **`archivist`**: top-level load and save entry points
//! - **`encoding`**: byte order marks and UTF transcoding for streams
//! - **`config`**: serialization options
//! - **`error`**: error handling
//!
//! ## Key Concepts
//!
//! ### One routine, two directions
//!
//! A type's `serialize` routine runs unchanged for loading and saving; the scope
//! decides the direction. User types list their members explicitly in
//! `SerializeObject::serialize_object`.
//!
//! ### Capabilities
//!
//! Each scope type declares which operations it implements. The dispatcher
//! asserts them at build time, so serializing a shape the format cannot
//! represent (a nested array in a CSV row) fails to compile.
//!
//! ### Error policies
//!
//! Overflow and mismatched types either abort the call or are recorded and
//! skipped. Recorded messages, together with validator messages, are returned as
//! one `Error::Validation` at the end of the call.
//!
//! ## Usage
//!
//! This crate is typically used through the `archivist` crate, which also
//! bundles the JSON, YAML and CSV formats.
//!
//! ```rust
//! use archivist_core::archive::ArchiveScope;
//! use archivist_core::error::Error;
//! use archivist_core::impl_serialize_object;
//! use archivist_core::serializer::struct_::SerializeObject;
//! use archivist_core::serializer::validate::{field_with, Range, Required};
//!
//! #[derive(Default)]
//! struct Settings {
//!     threads: u8,
//! }
//!
//! impl SerializeObject for Settings {
//!     fn serialize_object<S: ArchiveScope>(&mut self, scope: &mut S) -> Result<(), Error> {
//!         field_with(scope, "threads", &mut self.threads, &[&Required, &Range::new(1u8, 64)])?;
//!         Ok(())
//!     }
//! }
//!
//! impl_serialize_object!(Settings);
//! ```

pub mod archive;
pub mod archivist;
pub mod config;
pub mod encoding;
pub mod error;
pub mod resolver;
pub mod serializer;
pub mod types;

pub use crate::archive::capability::{Capabilities, Operation, Require};
pub use crate::archive::{Archive, ArchiveKey, ArchiveScope, NoScope};
pub use crate::archivist::{load_object, load_object_with, save_object, save_object_with, Archivist};
pub use crate::config::{
    FormatOptions, MismatchedTypePolicy, OverflowPolicy, SerializationOptions, StreamOptions,
    UtfType,
};
pub use crate::error::Error;
pub use crate::resolver::context::{SerializationContext, ValidationErrors};
pub use crate::resolver::enum_registry::{EnumRegistry, RegisteredEnum};
pub use crate::serializer::null::Null;
pub use crate::serializer::number::{Scalar, ScalarError, ScalarValue};
pub use crate::serializer::string::{ArchiveString, Utf16String, Utf32String};
pub use crate::serializer::struct_::{serialize_base, SerializeObject};
pub use crate::serializer::validate::{
    field, field_with, required_field, MaxSize, Range, Required, Validator,
};
pub use crate::serializer::{serialize, serialize_with_key, Serialize};
pub use crate::types::{ScalarKind, ScopeRole, SerializeMode};
