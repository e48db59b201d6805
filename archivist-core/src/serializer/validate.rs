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

//! Named members and their validators.
//!
//! Validators only run while loading. Their messages are recorded in the
//! [`SerializationContext`](crate::resolver::context::SerializationContext) under
//! the member path and surface together when the top-level call finishes.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, LinkedList, VecDeque};
use std::fmt;

use crate::archive::{member_path, ArchiveKey, ArchiveScope};
use crate::config::SerializationOptions;
use crate::error::Error;
use crate::serializer::string::{ArchiveString, Utf16String, Utf32String};
use crate::serializer::Serialize;

pub const REQUIRED_MESSAGE: &str = "This field is required";

/// Checks a member after it was loaded.
pub trait Validator<T: ?Sized> {
    /// Returns the message to record, if any. `is_loaded` tells whether the
    /// member existed in the source.
    fn validate(&self, value: &T, is_loaded: bool, options: &SerializationOptions)
        -> Option<String>;
}

/// Reports members that are absent from the source.
///
/// Disabled when [`SerializationOptions::required_value_enforced`] is off.
#[derive(Clone, Copy, Debug, Default)]
pub struct Required;

impl<T: ?Sized> Validator<T> for Required {
    fn validate(&self, _: &T, is_loaded: bool, options: &SerializationOptions) -> Option<String> {
        if !is_loaded && options.is_required_value_enforced() {
            Some(REQUIRED_MESSAGE.to_string())
        } else {
            None
        }
    }
}

/// Inclusive bounds for a loaded value. Absent members are not checked.
#[derive(Clone, Copy, Debug)]
pub struct Range<T> {
    pub min: T,
    pub max: T,
}

impl<T> Range<T> {
    pub fn new(min: T, max: T) -> Self {
        Range { min, max }
    }
}

impl<T: PartialOrd + fmt::Display> Validator<T> for Range<T> {
    fn validate(&self, value: &T, is_loaded: bool, _: &SerializationOptions) -> Option<String> {
        if is_loaded && (*value < self.min || *value > self.max) {
            Some(format!(
                "Value must be between {} and {}",
                self.min, self.max
            ))
        } else {
            None
        }
    }
}

/// Things with a length: strings and sequences.
pub trait HasSize {
    fn size(&self) -> usize;
}

impl HasSize for String {
    fn size(&self) -> usize {
        self.chars().count()
    }
}

impl HasSize for Utf16String {
    fn size(&self) -> usize {
        self.units()
    }
}

impl HasSize for Utf32String {
    fn size(&self) -> usize {
        self.units()
    }
}

macro_rules! impl_sized_len {
    ($($ty:ident<$($gen:ident),+>),+) => {
        $(
            impl<$($gen),+> HasSize for $ty<$($gen),+> {
                fn size(&self) -> usize {
                    self.len()
                }
            }
        )+
    };
}

impl_sized_len!(
    Vec<T>,
    VecDeque<T>,
    LinkedList<T>,
    HashSet<T, H>,
    BTreeSet<T>,
    HashMap<K, V, H>,
    BTreeMap<K, V>
);

/// Maximum number of characters or elements of a loaded value.
#[derive(Clone, Copy, Debug)]
pub struct MaxSize(pub usize);

impl<T: HasSize> Validator<T> for MaxSize {
    fn validate(&self, value: &T, is_loaded: bool, _: &SerializationOptions) -> Option<String> {
        if is_loaded && value.size() > self.0 {
            Some(format!("The maximum size of this field should be not greater than {}", self.0))
        } else {
            None
        }
    }
}

/// Serializes the member `name` of the current object.
#[inline]
pub fn field<S, T>(scope: &mut S, name: &str, value: &mut T) -> Result<bool, Error>
where
    S: ArchiveScope,
    T: Serialize,
{
    let key = <S::Key as ArchiveKey>::from_name(name);
    value.serialize_with_key(scope, &key)
}

/// Serializes the member `name` and reports it when absent from the source.
#[inline]
pub fn required_field<S, T>(scope: &mut S, name: &str, value: &mut T) -> Result<bool, Error>
where
    S: ArchiveScope,
    T: Serialize,
{
    field_with(scope, name, value, &[&Required])
}

/// Serializes the member `name` and runs `validators` on it when loading.
pub fn field_with<S, T>(
    scope: &mut S,
    name: &str,
    value: &mut T,
    validators: &[&dyn Validator<T>],
) -> Result<bool, Error>
where
    S: ArchiveScope,
    T: Serialize,
{
    let key = <S::Key as ArchiveKey>::from_name(name);
    let is_loaded = value.serialize_with_key(scope, &key)?;
    if scope.is_loading() {
        let value: &T = value;
        let messages: Vec<String> = validators
            .iter()
            .filter_map(|validator| validator.validate(value, is_loaded, scope.options()))
            .collect();
        if !messages.is_empty() {
            let path = member_path(scope, &key);
            scope.context().add_validation_errors(&path, messages);
        }
    }
    Ok(is_loaded)
}
