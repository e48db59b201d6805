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

/// What to do when a loaded number does not fit into the destination type.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OverflowPolicy {
    /// Abort the whole call with [`crate::error::Error::Overflow`].
    #[default]
    ThrowError,
    /// Record a validation message, keep the destination untouched and continue.
    Skip,
}

/// What to do when a loaded value has a kind incompatible with the destination.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MismatchedTypePolicy {
    /// Abort the whole call with [`crate::error::Error::MismatchedType`].
    #[default]
    ThrowError,
    /// Record a validation message, keep the destination untouched and continue.
    Skip,
}

/// Text encodings supported for streams.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UtfType {
    #[default]
    Utf8,
    Utf16Le,
    Utf16Be,
    Utf32Le,
    Utf32Be,
}

/// Encoding policy used when a document is read from or written to a byte stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StreamOptions {
    /// Encoding used for writing, and for reading when the input has no byte order mark.
    pub encoding: UtfType,
    /// Whether a byte order mark is written in front of the output.
    pub write_bom: bool,
}

impl Default for StreamOptions {
    fn default() -> Self {
        StreamOptions {
            encoding: UtfType::Utf8,
            write_bom: true,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FormatOptions {
    /// Pretty-print the output when the backend supports it.
    pub enable_format: bool,
}

/// Configuration of a single load or save call.
///
/// A copy is owned by the [`crate::resolver::context::SerializationContext`] of the
/// call and never changes while the call is running.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SerializationOptions {
    pub overflow_policy: OverflowPolicy,
    pub mismatched_type_policy: MismatchedTypePolicy,
    /// Whether `Required` validators report absent members.
    pub required_value_enforced: bool,
    /// Separator of delimited backends (CSV).
    pub values_separator: char,
    pub stream: StreamOptions,
    pub format: FormatOptions,
}

impl Default for SerializationOptions {
    fn default() -> Self {
        SerializationOptions {
            overflow_policy: OverflowPolicy::ThrowError,
            mismatched_type_policy: MismatchedTypePolicy::ThrowError,
            required_value_enforced: true,
            values_separator: ',',
            stream: StreamOptions::default(),
            format: FormatOptions::default(),
        }
    }
}

impl SerializationOptions {
    /// Creates options with default values.
    pub fn new() -> Self {
        Self::default()
    }

    #[inline(always)]
    pub fn overflow_policy(&self) -> OverflowPolicy {
        self.overflow_policy
    }

    #[inline(always)]
    pub fn mismatched_type_policy(&self) -> MismatchedTypePolicy {
        self.mismatched_type_policy
    }

    #[inline(always)]
    pub fn is_required_value_enforced(&self) -> bool {
        self.required_value_enforced
    }

    #[inline(always)]
    pub fn values_separator(&self) -> char {
        self.values_separator
    }

    #[inline(always)]
    pub fn stream_encoding(&self) -> UtfType {
        self.stream.encoding
    }

    #[inline(always)]
    pub fn is_write_bom(&self) -> bool {
        self.stream.write_bom
    }

    #[inline(always)]
    pub fn is_format_enabled(&self) -> bool {
        self.format.enable_format
    }
}
