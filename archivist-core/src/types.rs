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

use std::fmt;

/// Direction of a serialization session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SerializeMode {
    Load,
    Save,
}

impl SerializeMode {
    #[inline(always)]
    pub const fn is_loading(self) -> bool {
        matches!(self, SerializeMode::Load)
    }

    #[inline(always)]
    pub const fn is_saving(self) -> bool {
        matches!(self, SerializeMode::Save)
    }
}

/// Role of an archive scope, fixed by the operation that opened it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScopeRole {
    Root,
    Object,
    Array,
}

impl fmt::Display for ScopeRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScopeRole::Root => "root",
            ScopeRole::Object => "object",
            ScopeRole::Array => "array",
        };
        f.write_str(name)
    }
}

/// Kind of a fundamental value, used in diagnostics.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScalarKind {
    Null,
    Bool,
    SignedInt,
    UnsignedInt,
    Float,
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScalarKind::Null => "null",
            ScalarKind::Bool => "boolean",
            ScalarKind::SignedInt => "signed integer",
            ScalarKind::UnsignedInt => "unsigned integer",
            ScalarKind::Float => "floating point",
        };
        f.write_str(name)
    }
}
