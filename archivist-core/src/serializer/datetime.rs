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

//! Dates and times are ISO 8601 strings.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};

use crate::archive::capability::Require;
use crate::archive::{member_path, ArchiveScope};
use crate::error::Error;
use crate::serializer::Serialize;

const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

trait IsoText: Sized {
    const TYPE_NAME: &'static str;

    fn to_iso(&self) -> String;

    fn from_iso(text: &str) -> Option<Self>;
}

impl IsoText for NaiveDate {
    const TYPE_NAME: &'static str = "date";

    fn to_iso(&self) -> String {
        self.format("%Y-%m-%d").to_string()
    }

    fn from_iso(text: &str) -> Option<Self> {
        NaiveDate::parse_from_str(text, "%Y-%m-%d").ok()
    }
}

impl IsoText for NaiveDateTime {
    const TYPE_NAME: &'static str = "date and time";

    fn to_iso(&self) -> String {
        self.format(DATETIME_FORMAT).to_string()
    }

    fn from_iso(text: &str) -> Option<Self> {
        NaiveDateTime::parse_from_str(text, DATETIME_FORMAT).ok()
    }
}

impl IsoText for DateTime<Utc> {
    const TYPE_NAME: &'static str = "UTC date and time";

    fn to_iso(&self) -> String {
        self.to_rfc3339_opts(SecondsFormat::AutoSi, true)
    }

    fn from_iso(text: &str) -> Option<Self> {
        DateTime::parse_from_rfc3339(text)
            .ok()
            .map(|parsed| parsed.with_timezone(&Utc))
    }
}

fn assign<T: IsoText, S: ArchiveScope>(
    scope: &mut S,
    path: String,
    text: &str,
    value: &mut T,
) -> Result<(), Error> {
    match T::from_iso(text) {
        Some(parsed) => {
            *value = parsed;
            Ok(())
        }
        None => scope.context().on_mismatched_type(
            path,
            format!("'{}' is not a valid ISO 8601 {}", text, T::TYPE_NAME),
        ),
    }
}

fn serialize<T: IsoText, S: ArchiveScope>(value: &mut T, scope: &mut S) -> Result<(), Error> {
    let () = Require::<S>::STRING;
    if scope.is_loading() {
        let mut text = String::new();
        let recorded = scope.context().validation_error_count();
        scope.serialize_string(&mut text)?;
        if scope.context().validation_error_count() == recorded {
            let path = scope.path();
            assign(scope, path, &text, value)?;
        }
        Ok(())
    } else {
        scope.serialize_string(&mut value.to_iso())
    }
}

fn serialize_with_key<T: IsoText, S: ArchiveScope>(
    value: &mut T,
    scope: &mut S,
    key: &S::Key,
) -> Result<bool, Error> {
    let () = Require::<S>::KEYED_STRING;
    if scope.is_loading() {
        let mut text = String::new();
        let recorded = scope.context().validation_error_count();
        let is_loaded = scope.serialize_string_with_key(key, &mut text)?;
        if is_loaded && scope.context().validation_error_count() == recorded {
            let path = member_path(scope, key);
            assign(scope, path, &text, value)?;
        }
        Ok(is_loaded)
    } else {
        scope.serialize_string_with_key(key, &mut value.to_iso())
    }
}

macro_rules! impl_datetime_serialize {
    ($($ty:ty),+) => {
        $(
            impl Serialize for $ty {
                fn serialize<S: ArchiveScope>(&mut self, scope: &mut S) -> Result<(), Error> {
                    serialize(self, scope)
                }

                fn serialize_with_key<S: ArchiveScope>(
                    &mut self,
                    scope: &mut S,
                    key: &S::Key,
                ) -> Result<bool, Error> {
                    serialize_with_key(self, scope, key)
                }
            }
        )+
    };
}

impl_datetime_serialize!(NaiveDate, NaiveDateTime, DateTime<Utc>);
