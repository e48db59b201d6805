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
use crate::serializer::struct_::SerializeObject;
use crate::serializer::validate::field;
use crate::serializer::Serialize;

/// A pair is an object with the members `key` and `value`.
impl<K: Serialize, V: Serialize> SerializeObject for (K, V) {
    fn serialize_object<S: ArchiveScope>(&mut self, scope: &mut S) -> Result<(), Error> {
        field(scope, "key", &mut self.0)?;
        field(scope, "value", &mut self.1)?;
        Ok(())
    }
}

crate::impl_serialize_object!(impl<K, V> (K, V));
