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

//! # Archivist
//!
//! Archivist maps in-memory objects to and from text formats. Every type has
//! one routine that works for both directions, and every format implements
//! the same small archive scope protocol, so a type written once can be stored
//! as JSON, YAML, CSV or any other supported format.
//!
//! ## Key Features
//!
//! - **One routine per type**: loading and saving share the same code
//! - **Explicit members**: user types list the members that participate
//! - **Build-time capability checks**: shapes a format cannot represent fail to compile
//! - **Error policies**: overflow and type mismatches abort or are skipped and reported
//! - **Validation**: required members, ranges and sizes, aggregated per path
//! - **Streams**: UTF-8, UTF-16 and UTF-32 input and output with byte order marks
//!
//! ## Object Serialization
//!
//! ```rust
//! use archivist::json::JsonArchive;
//! use archivist::{field, impl_serialize_object, ArchiveScope, Archivist, Error, SerializeObject};
//!
//! #[derive(Default, Debug, PartialEq)]
//! struct Address {
//!     street: String,
//!     city: String,
//! }
//!
//! impl SerializeObject for Address {
//!     fn serialize_object<S: ArchiveScope>(&mut self, scope: &mut S) -> Result<(), Error> {
//!         field(scope, "street", &mut self.street)?;
//!         field(scope, "city", &mut self.city)?;
//!         Ok(())
//!     }
//! }
//!
//! #[derive(Default, Debug, PartialEq)]
//! struct Person {
//!     name: String,
//!     age: i32,
//!     address: Address,
//!     hobbies: Vec<String>,
//! }
//!
//! impl SerializeObject for Person {
//!     fn serialize_object<S: ArchiveScope>(&mut self, scope: &mut S) -> Result<(), Error> {
//!         field(scope, "name", &mut self.name)?;
//!         field(scope, "age", &mut self.age)?;
//!         field(scope, "address", &mut self.address)?;
//!         field(scope, "hobbies", &mut self.hobbies)?;
//!         Ok(())
//!     }
//! }
//!
//! impl_serialize_object!(Address, Person);
//!
//! # fn main() -> Result<(), Error> {
//! let mut person = Person {
//!     name: "John Doe".to_string(),
//!     age: 30,
//!     address: Address {
//!         street: "123 Main St".to_string(),
//!         city: "New York".to_string(),
//!     },
//!     hobbies: vec!["reading".to_string(), "coding".to_string()],
//! };
//!
//! let archivist = Archivist::<JsonArchive>::default();
//! let text = archivist.save(&mut person)?;
//! let mut loaded = Person::default();
//! archivist.load(&mut loaded, &text)?;
//! assert_eq!(person, loaded);
//! # Ok(())
//! # }
//! ```
//!
//! ## Enums
//!
//! Enums are stored by name. The name table is declared once and built on
//! first use.
//!
//! ```rust
//! use archivist::json::JsonArchive;
//! use archivist::{load_object, register_enum, save_object, Error};
//!
//! #[derive(Clone, Copy, Debug, Default, PartialEq)]
//! enum Level {
//!     #[default]
//!     Low,
//!     High,
//! }
//!
//! register_enum!(Level {
//!     Level::Low => "low",
//!     Level::High => "high",
//! });
//!
//! # fn main() -> Result<(), Error> {
//! let mut levels = vec![Level::High, Level::Low];
//! assert_eq!(save_object::<JsonArchive, _>(&mut levels)?, r#"["high","low"]"#);
//! let mut loaded: Vec<Level> = Vec::new();
//! load_object::<JsonArchive, _>(&mut loaded, r#"["low"]"#)?;
//! assert_eq!(loaded, vec![Level::Low]);
//! # Ok(())
//! # }
//! ```
//!
//! ## Validation and Error Policies
//!
//! Messages from validators and from skipped errors are collected per path and
//! returned as one [`Error::Validation`] at the end of the call:
//!
//! ```rust
//! use archivist::json::JsonArchive;
//! use archivist::{
//!     field, impl_serialize_object, required_field, ArchiveScope, Archivist, Error,
//!     OverflowPolicy, SerializeObject,
//! };
//!
//! #[derive(Default)]
//! struct Sample {
//!     id: u32,
//!     level: i8,
//! }
//!
//! impl SerializeObject for Sample {
//!     fn serialize_object<S: ArchiveScope>(&mut self, scope: &mut S) -> Result<(), Error> {
//!         required_field(scope, "id", &mut self.id)?;
//!         field(scope, "level", &mut self.level)?;
//!         Ok(())
//!     }
//! }
//!
//! impl_serialize_object!(Sample);
//!
//! let archivist = Archivist::<JsonArchive>::default().overflow_policy(OverflowPolicy::Skip);
//! let mut sample = Sample::default();
//! let err = archivist.load(&mut sample, r#"{"level": 300}"#).unwrap_err();
//! let errors = err.validation_errors().unwrap();
//! assert_eq!(errors.len(), 2);
//! assert!(errors.get("/id").is_some());
//! assert!(errors.get("/level").is_some());
//! ```
//!
//! ## Formats
//!
//! - [`json`]: every shape, member order preserved (feature `json`)
//! - [`yaml`]: every shape, like JSON, plus non-finite floats (feature `yaml`)
//! - [`csv`]: a root array of flat objects, first line is the header (feature `csv`)
//!
//! ## Getting Started
//!
//! ```toml
//! [dependencies]
//! archivist = "0.1"
//! ```

pub use archivist_core::{
    archive, config, encoding, error, impl_serialize_object, register_enum, resolver,
    serializer, types,
};
pub use archivist_core::{
    field, field_with, load_object, load_object_with, required_field, save_object,
    save_object_with, serialize, serialize_base, serialize_with_key, Archive, ArchiveKey,
    ArchiveScope, ArchiveString, Archivist, Capabilities, EnumRegistry, Error, FormatOptions,
    MaxSize, MismatchedTypePolicy, Null, Operation, OverflowPolicy, Range, RegisteredEnum, Required,
    Scalar, ScalarError, ScalarKind, ScalarValue, ScopeRole, Serialize, SerializationContext,
    SerializationOptions, SerializeMode, SerializeObject, StreamOptions, Utf16String,
    Utf32String, UtfType, ValidationErrors, Validator,
};

/// The JSON format.
#[cfg(feature = "json")]
pub mod json {
    pub use archivist_json::*;
}

/// The CSV format.
#[cfg(feature = "csv")]
pub mod csv {
    pub use archivist_csv::*;
}

/// The YAML format.
#[cfg(feature = "yaml")]
pub mod yaml {
    pub use archivist_yaml::*;
}
