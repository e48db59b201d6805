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

use crate::archive::ArchiveScope;
use crate::error::Error;
use crate::serializer::Serialize;

/// Optional members: an absent key loads `None` and `None` is never written.
///
/// Loading reuses the current value as the destination when there is one.
impl<T: Serialize + Default> Serialize for Option<T> {
    fn serialize<S: ArchiveScope>(&mut self, scope: &mut S) -> Result<(), Error> {
        if scope.is_loading() {
            let mut value = self.take().unwrap_or_default();
            value.serialize(scope)?;
            *self = Some(value);
            Ok(())
        } else {
            match self {
                Some(value) => value.serialize(scope),
                None => Err(Error::unsupported(format!(
                    "cannot save an empty optional value without key at '{}'",
                    scope.path()
                ))),
            }
        }
    }

    fn serialize_with_key<S: ArchiveScope>(
        &mut self,
        scope: &mut S,
        key: &S::Key,
    ) -> Result<bool, Error> {
        if scope.is_loading() {
            let mut value = self.take().unwrap_or_default();
            let is_loaded = value.serialize_with_key(scope, key)?;
            if is_loaded {
                *self = Some(value);
            }
            Ok(is_loaded)
        } else {
            match self {
                Some(value) => value.serialize_with_key(scope, key),
                None => Ok(true),
            }
        }
    }
}
