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

use std::collections::{LinkedList, VecDeque};

use crate::archive::ArchiveScope;
use crate::error::Error;
use crate::serializer::collection::{self, SequenceContainer};
use crate::serializer::Serialize;

impl<T: Serialize + Default> SequenceContainer for Vec<T> {
    type Item = T;

    #[inline(always)]
    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn resize_default(&mut self, len: usize) {
        self.resize_with(len, T::default);
    }

    fn slots_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.iter_mut()
    }

    #[inline(always)]
    fn push_back(&mut self, item: T) {
        self.push(item);
    }

    fn truncate(&mut self, len: usize) {
        Vec::truncate(self, len);
    }
}

impl<T: Serialize + Default> SequenceContainer for VecDeque<T> {
    type Item = T;

    #[inline(always)]
    fn len(&self) -> usize {
        VecDeque::len(self)
    }

    fn resize_default(&mut self, len: usize) {
        self.resize_with(len, T::default);
    }

    fn slots_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.iter_mut()
    }

    #[inline(always)]
    fn push_back(&mut self, item: T) {
        VecDeque::push_back(self, item);
    }

    fn truncate(&mut self, len: usize) {
        VecDeque::truncate(self, len);
    }
}

impl<T: Serialize + Default> SequenceContainer for LinkedList<T> {
    type Item = T;

    #[inline(always)]
    fn len(&self) -> usize {
        LinkedList::len(self)
    }

    fn resize_default(&mut self, len: usize) {
        if len < LinkedList::len(self) {
            SequenceContainer::truncate(self, len);
        } else {
            for _ in LinkedList::len(self)..len {
                LinkedList::push_back(self, T::default());
            }
        }
    }

    fn slots_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.iter_mut()
    }

    #[inline(always)]
    fn push_back(&mut self, item: T) {
        LinkedList::push_back(self, item);
    }

    fn truncate(&mut self, len: usize) {
        if len < LinkedList::len(self) {
            drop(self.split_off(len));
        }
    }
}

macro_rules! impl_sequence_serialize {
    ($($ty:ident),+) => {
        $(
            impl<T: Serialize + Default> Serialize for $ty<T> {
                #[inline]
                fn serialize<S: ArchiveScope>(&mut self, scope: &mut S) -> Result<(), Error> {
                    collection::serialize(self, scope)
                }

                #[inline]
                fn serialize_with_key<S: ArchiveScope>(
                    &mut self,
                    scope: &mut S,
                    key: &S::Key,
                ) -> Result<bool, Error> {
                    collection::serialize_with_key(self, scope, key)
                }
            }
        )+
    };
}

impl_sequence_serialize!(Vec, VecDeque, LinkedList);
