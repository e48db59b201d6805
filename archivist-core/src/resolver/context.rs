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

use std::borrow::Cow;
use std::collections::btree_map;
use std::collections::BTreeMap;
use std::fmt;

use tracing::{debug, trace};

use crate::config::{MismatchedTypePolicy, OverflowPolicy, SerializationOptions};
use crate::error::Error;
use crate::serializer::number::ScalarError;

/// Validation messages grouped by the path of the value they refer to.
///
/// Paths are kept sorted so the aggregate error reads the same on every run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationErrors(BTreeMap<String, Vec<String>>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `message` to the list of `path`, creating the entry if needed.
    pub fn add(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.0.entry(path.into()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of distinct paths.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Number of messages over all paths.
    pub fn message_count(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }

    pub fn get(&self, path: &str) -> Option<&[String]> {
        self.0.get(path).map(Vec::as_slice)
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, Vec<String>> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = (&'a String, &'a Vec<String>);
    type IntoIter = btree_map::Iter<'a, String, Vec<String>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "validation failed for {} path(s)", self.0.len())?;
        for (path, messages) in &self.0 {
            write!(f, "\n  '{}': {}", path, messages.join("; "))?;
        }
        Ok(())
    }
}

/// State shared by every scope of one top-level load or save call.
pub struct SerializationContext {
    options: SerializationOptions,
    errors: ValidationErrors,
}

impl SerializationContext {
    pub fn new(options: SerializationOptions) -> SerializationContext {
        SerializationContext {
            options,
            errors: ValidationErrors::new(),
        }
    }

    #[inline(always)]
    pub fn options(&self) -> &SerializationOptions {
        &self.options
    }

    pub fn add_validation_error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        let path = path.into();
        let message = message.into();
        trace!(path = %path, message = %message, "validation error recorded");
        self.errors.add(path, message);
    }

    pub fn add_validation_errors<I>(&mut self, path: &str, messages: I)
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        for message in messages {
            self.add_validation_error(path, message);
        }
    }

    pub fn validation_errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// Total number of messages recorded so far.
    pub fn validation_error_count(&self) -> usize {
        self.errors.message_count()
    }

    /// Applies the overflow policy: the fatal error, or a recorded message.
    pub fn on_overflow(
        &mut self,
        path: String,
        message: impl Into<Cow<'static, str>>,
    ) -> Result<(), Error> {
        match self.options.overflow_policy() {
            OverflowPolicy::ThrowError => Err(Error::overflow(path, message)),
            OverflowPolicy::Skip => {
                let message = message.into();
                debug!(path = %path, "overflow skipped: {}", message);
                self.add_validation_error(path, message);
                Ok(())
            }
        }
    }

    /// Applies the mismatched-type policy: the fatal error, or a recorded message.
    pub fn on_mismatched_type(
        &mut self,
        path: String,
        message: impl Into<Cow<'static, str>>,
    ) -> Result<(), Error> {
        match self.options.mismatched_type_policy() {
            MismatchedTypePolicy::ThrowError => Err(Error::mismatched_type(path, message)),
            MismatchedTypePolicy::Skip => {
                let message = message.into();
                debug!(path = %path, "mismatched type skipped: {}", message);
                self.add_validation_error(path, message);
                Ok(())
            }
        }
    }

    /// Stores a converted value into `target`, or routes the conversion failure
    /// through the matching policy. `target` is untouched on failure.
    pub fn apply_loaded<V, P>(
        &mut self,
        path: P,
        loaded: Result<V, ScalarError>,
        target: &mut V,
    ) -> Result<(), Error>
    where
        P: FnOnce() -> String,
    {
        match loaded {
            Ok(value) => {
                *target = value;
                Ok(())
            }
            Err(ScalarError::Overflow(message)) => self.on_overflow(path(), message),
            Err(ScalarError::MismatchedType(message)) => self.on_mismatched_type(path(), message),
        }
    }

    /// Ends the call: fails with one [`Error::Validation`] if any message was recorded.
    pub fn finish(self) -> Result<(), Error> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            debug!(
                paths = self.errors.len(),
                messages = self.errors.message_count(),
                "serialization finished with validation errors"
            );
            Err(Error::validation(self.errors))
        }
    }
}
