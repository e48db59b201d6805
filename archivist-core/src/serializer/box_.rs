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

impl<T: Serialize> Serialize for Box<T> {
    #[inline(always)]
    fn serialize<S: ArchiveScope>(&mut self, scope: &mut S) -> Result<(), Error> {
        T::serialize(self.as_mut(), scope)
    }

    #[inline(always)]
    fn serialize_with_key<S: ArchiveScope>(
        &mut self,
        scope: &mut S,
        key: &S::Key,
    ) -> Result<bool, Error> {
        T::serialize_with_key(self.as_mut(), scope, key)
    }
}
