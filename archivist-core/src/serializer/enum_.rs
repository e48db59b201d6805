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

use crate::archive::capability::Require;
use crate::archive::{member_path, ArchiveScope};
use crate::error::Error;
use crate::resolver::enum_registry::RegisteredEnum;

#[inline]
fn name_of<T: RegisteredEnum>(value: T) -> Result<&'static str, Error> {
    T::registry().name_of(value).ok_or_else(|| {
        Error::unknown_enum(format!(
            "value of enum {} has no registered name",
            T::TYPE_NAME
        ))
    })
}

fn resolve<T, S>(scope: &mut S, path: String, text: &str, value: &mut T) -> Result<(), Error>
where
    T: RegisteredEnum,
    S: ArchiveScope,
{
    match T::registry().value_of(text) {
        Some(resolved) => {
            *value = resolved;
            Ok(())
        }
        None => scope.context().on_mismatched_type(
            path,
            format!("'{}' is not a registered name of enum {}", text, T::TYPE_NAME),
        ),
    }
}

pub fn serialize<T, S>(value: &mut T, scope: &mut S) -> Result<(), Error>
where
    T: RegisteredEnum,
    S: ArchiveScope,
{
    let () = Require::<S>::STRING;
    if scope.is_loading() {
        let mut text = String::new();
        let recorded = scope.context().validation_error_count();
        scope.serialize_string(&mut text)?;
        // a skipped string load was already reported
        if scope.context().validation_error_count() == recorded {
            let path = scope.path();
            resolve(scope, path, &text, value)?;
        }
        Ok(())
    } else {
        let mut text = name_of(*value)?.to_string();
        scope.serialize_string(&mut text)
    }
}

pub fn serialize_with_key<T, S>(value: &mut T, scope: &mut S, key: &S::Key) -> Result<bool, Error>
where
    T: RegisteredEnum,
    S: ArchiveScope,
{
    let () = Require::<S>::KEYED_STRING;
    if scope.is_loading() {
        let mut text = String::new();
        let recorded = scope.context().validation_error_count();
        let is_loaded = scope.serialize_string_with_key(key, &mut text)?;
        if is_loaded && scope.context().validation_error_count() == recorded {
            let path = member_path(scope, key);
            resolve(scope, path, &text, value)?;
        }
        Ok(is_loaded)
    } else {
        let mut text = name_of(*value)?.to_string();
        scope.serialize_string_with_key(key, &mut text)
    }
}
