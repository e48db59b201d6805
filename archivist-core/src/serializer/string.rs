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

//! Strings of 8, 16 and 32 bit code units.
//!
//! The engine does not care about the width; backends store text as UTF-8 and
//! transcode through [`ArchiveString::to_utf8`] and [`ArchiveString::from_utf8`].

use std::borrow::Cow;
use std::fmt;

use crate::archive::capability::Require;
use crate::archive::ArchiveScope;
use crate::error::Error;
use crate::serializer::Serialize;

pub trait ArchiveString: Default + 'static {
    /// Unit width in bits, used in diagnostics.
    const UNIT_BITS: u32;

    fn to_utf8(&self) -> Result<Cow<'_, str>, Error>;

    fn from_utf8(text: &str) -> Self;

    /// Length in code units.
    fn units(&self) -> usize;
}

impl ArchiveString for String {
    const UNIT_BITS: u32 = 8;

    #[inline(always)]
    fn to_utf8(&self) -> Result<Cow<'_, str>, Error> {
        Ok(Cow::Borrowed(self.as_str()))
    }

    #[inline(always)]
    fn from_utf8(text: &str) -> Self {
        text.to_string()
    }

    fn units(&self) -> usize {
        self.len()
    }
}

/// A string of UTF-16 code units.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Utf16String(pub Vec<u16>);

impl From<&str> for Utf16String {
    fn from(text: &str) -> Self {
        Utf16String(text.encode_utf16().collect())
    }
}

impl fmt::Display for Utf16String {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in char::decode_utf16(self.0.iter().copied()) {
            f.write_str(c.unwrap_or(char::REPLACEMENT_CHARACTER).encode_utf8(&mut [0; 4]))?;
        }
        Ok(())
    }
}

impl ArchiveString for Utf16String {
    const UNIT_BITS: u32 = 16;

    fn to_utf8(&self) -> Result<Cow<'_, str>, Error> {
        String::from_utf16(&self.0)
            .map(Cow::Owned)
            .map_err(|e| Error::encoding_error(format!("invalid UTF-16 string: {}", e)))
    }

    fn from_utf8(text: &str) -> Self {
        Utf16String::from(text)
    }

    fn units(&self) -> usize {
        self.0.len()
    }
}

/// A string of UTF-32 code units.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Utf32String(pub Vec<u32>);

impl From<&str> for Utf32String {
    fn from(text: &str) -> Self {
        Utf32String(text.chars().map(u32::from).collect())
    }
}

impl ArchiveString for Utf32String {
    const UNIT_BITS: u32 = 32;

    fn to_utf8(&self) -> Result<Cow<'_, str>, Error> {
        self.0
            .iter()
            .map(|&unit| {
                char::from_u32(unit).ok_or_else(|| {
                    Error::encoding_error(format!("invalid UTF-32 code point: {:#x}", unit))
                })
            })
            .collect::<Result<String, Error>>()
            .map(Cow::Owned)
    }

    fn from_utf8(text: &str) -> Self {
        Utf32String::from(text)
    }

    fn units(&self) -> usize {
        self.0.len()
    }
}

macro_rules! impl_string_serialize {
    ($($ty:ty),+) => {
        $(
            impl Serialize for $ty {
                #[inline(always)]
                fn serialize<S: ArchiveScope>(&mut self, scope: &mut S) -> Result<(), Error> {
                    let () = Require::<S>::STRING;
                    scope.serialize_string(self)
                }

                #[inline(always)]
                fn serialize_with_key<S: ArchiveScope>(
                    &mut self,
                    scope: &mut S,
                    key: &S::Key,
                ) -> Result<bool, Error> {
                    let () = Require::<S>::KEYED_STRING;
                    scope.serialize_string_with_key(key, self)
                }
            }
        )+
    };
}

impl_string_serialize!(String, Utf16String, Utf32String);
