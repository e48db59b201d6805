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

use std::any::type_name;
use std::fs::OpenOptions;
use std::io::{Read, Write};
use std::marker::PhantomData;
use std::path::Path;

use tracing::debug;

use crate::archive::Archive;
use crate::config::{MismatchedTypePolicy, OverflowPolicy, SerializationOptions, UtfType};
use crate::encoding;
use crate::error::Error;
use crate::resolver::context::SerializationContext;
use crate::serializer::Serialize;

/// Entry point for loading and saving objects with the archive `A`.
///
/// An `Archivist` only holds options. Every call creates its own
/// [`SerializationContext`] and backend scopes, so one instance can be shared
/// between threads.
///
/// # Examples
///
/// ```rust, ignore
/// use archivist::json::JsonArchive;
/// use archivist::{Archivist, OverflowPolicy};
///
/// let archivist = Archivist::<JsonArchive>::default()
///     .overflow_policy(OverflowPolicy::Skip)
///     .enable_format(true);
/// let mut values = vec![1, 2, 3];
/// let text = archivist.save(&mut values)?;
/// ```
pub struct Archivist<A: Archive> {
    options: SerializationOptions,
    _archive: PhantomData<fn() -> A>,
}

impl<A: Archive> Default for Archivist<A> {
    fn default() -> Self {
        Archivist::with_options(SerializationOptions::default())
    }
}

impl<A: Archive> Clone for Archivist<A> {
    fn clone(&self) -> Self {
        Archivist::with_options(self.options.clone())
    }
}

impl<A: Archive> Archivist<A> {
    pub fn with_options(options: SerializationOptions) -> Self {
        Archivist {
            options,
            _archive: PhantomData,
        }
    }

    pub fn overflow_policy(mut self, policy: OverflowPolicy) -> Self {
        self.options.overflow_policy = policy;
        self
    }

    pub fn mismatched_type_policy(mut self, policy: MismatchedTypePolicy) -> Self {
        self.options.mismatched_type_policy = policy;
        self
    }

    /// Whether absent members checked by `Required` are reported.
    pub fn required_value_enforced(mut self, enforced: bool) -> Self {
        self.options.required_value_enforced = enforced;
        self
    }

    pub fn values_separator(mut self, separator: char) -> Self {
        self.options.values_separator = separator;
        self
    }

    /// Encoding used for writing streams, and for reading streams without a byte
    /// order mark.
    pub fn stream_encoding(mut self, encoding: UtfType) -> Self {
        self.options.stream.encoding = encoding;
        self
    }

    pub fn write_bom(mut self, write_bom: bool) -> Self {
        self.options.stream.write_bom = write_bom;
        self
    }

    pub fn enable_format(mut self, enable_format: bool) -> Self {
        self.options.format.enable_format = enable_format;
        self
    }

    pub fn get_options(&self) -> &SerializationOptions {
        &self.options
    }

    /// Saves `value` into a new document.
    ///
    /// Takes `&mut` because loading and saving share one routine; the value is
    /// not modified.
    pub fn save<T: Serialize>(&self, value: &mut T) -> Result<String, Error> {
        debug!(archive = A::NAME, value = type_name::<T>(), "save started");
        A::check_options(&self.options)?;
        let mut context = SerializationContext::new(self.options.clone());
        let mut output = A::Output::default();
        {
            let mut root = A::writer(&mut output, &mut context);
            value.serialize(&mut root)?;
        }
        context.finish()?;
        let text = A::render(&output, &self.options)?;
        debug!(archive = A::NAME, len = text.len(), "save finished");
        Ok(text)
    }

    /// Loads `value` from `input`.
    ///
    /// Members absent from the input keep their current values. Messages recorded
    /// by validators and skip policies are returned together as
    /// [`Error::Validation`] once the whole document was processed.
    pub fn load<T: Serialize>(&self, value: &mut T, input: &str) -> Result<(), Error> {
        debug!(archive = A::NAME, value = type_name::<T>(), len = input.len(), "load started");
        A::check_options(&self.options)?;
        let document = A::parse(input, &self.options)?;
        let mut context = SerializationContext::new(self.options.clone());
        {
            let mut root = A::reader(&document, &mut context);
            value.serialize(&mut root)?;
        }
        let result = context.finish();
        debug!(archive = A::NAME, ok = result.is_ok(), "load finished");
        result
    }

    fn save_to_bytes<T: Serialize>(&self, value: &mut T) -> Result<Vec<u8>, Error> {
        let text = self.save(value)?;
        Ok(encoding::encode(
            &text,
            self.options.stream_encoding(),
            self.options.is_write_bom(),
        ))
    }

    /// Saves `value` into `writer` in the configured stream encoding.
    pub fn save_to_writer<T: Serialize, W: Write>(
        &self,
        value: &mut T,
        writer: &mut W,
    ) -> Result<(), Error> {
        let bytes = self.save_to_bytes(value)?;
        writer.write_all(&bytes)?;
        writer.flush()?;
        Ok(())
    }

    /// Loads `value` from `reader`. A byte order mark in the input takes
    /// precedence over the configured stream encoding.
    pub fn load_from_reader<T: Serialize, R: Read>(
        &self,
        value: &mut T,
        reader: &mut R,
    ) -> Result<(), Error> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        let text = encoding::decode(&bytes, self.options.stream_encoding())?;
        self.load(value, &text)
    }

    /// Saves `value` into the file at `path`. An existing file is only replaced
    /// when `overwrite` is set.
    pub fn save_to_file<T: Serialize>(
        &self,
        value: &mut T,
        path: impl AsRef<Path>,
        overwrite: bool,
    ) -> Result<(), Error> {
        let path = path.as_ref();
        // a failed save must not leave an empty or truncated file behind
        let bytes = self.save_to_bytes(value)?;
        let mut open = OpenOptions::new();
        open.write(true);
        if overwrite {
            open.create(true).truncate(true);
        } else {
            open.create_new(true);
        }
        let mut file = open.open(path)?;
        debug!(path = %path.display(), bytes = bytes.len(), "saving to file");
        file.write_all(&bytes)?;
        file.flush()?;
        Ok(())
    }

    pub fn load_from_file<T: Serialize>(&self, value: &mut T, path: impl AsRef<Path>) -> Result<(), Error> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading from file");
        let mut file = std::fs::File::open(path)?;
        self.load_from_reader(value, &mut file)
    }
}

/// Saves `value` with default options.
pub fn save_object<A: Archive, T: Serialize>(value: &mut T) -> Result<String, Error> {
    Archivist::<A>::default().save(value)
}

pub fn save_object_with<A: Archive, T: Serialize>(
    value: &mut T,
    options: &SerializationOptions,
) -> Result<String, Error> {
    Archivist::<A>::with_options(options.clone()).save(value)
}

/// Loads `value` from `input` with default options.
pub fn load_object<A: Archive, T: Serialize>(value: &mut T, input: &str) -> Result<(), Error> {
    Archivist::<A>::default().load(value, input)
}

pub fn load_object_with<A: Archive, T: Serialize>(
    value: &mut T,
    input: &str,
    options: &SerializationOptions,
) -> Result<(), Error> {
    Archivist::<A>::with_options(options.clone()).load(value, input)
}
