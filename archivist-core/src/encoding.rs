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

//! Byte order marks and UTF transcoding for stream input and output.

use crate::config::UtfType;
use crate::error::Error;

const BOM_UTF8: &[u8] = &[0xEF, 0xBB, 0xBF];
const BOM_UTF16_LE: &[u8] = &[0xFF, 0xFE];
const BOM_UTF16_BE: &[u8] = &[0xFE, 0xFF];
const BOM_UTF32_LE: &[u8] = &[0xFF, 0xFE, 0x00, 0x00];
const BOM_UTF32_BE: &[u8] = &[0x00, 0x00, 0xFE, 0xFF];

pub fn bom(encoding: UtfType) -> &'static [u8] {
    match encoding {
        UtfType::Utf8 => BOM_UTF8,
        UtfType::Utf16Le => BOM_UTF16_LE,
        UtfType::Utf16Be => BOM_UTF16_BE,
        UtfType::Utf32Le => BOM_UTF32_LE,
        UtfType::Utf32Be => BOM_UTF32_BE,
    }
}

/// Encoding announced by a byte order mark at the start of `bytes`, and the
/// length of the mark.
pub fn detect_bom(bytes: &[u8]) -> Option<(UtfType, usize)> {
    // UTF-32LE first, its mark starts with the UTF-16LE one
    [
        UtfType::Utf32Le,
        UtfType::Utf32Be,
        UtfType::Utf8,
        UtfType::Utf16Le,
        UtfType::Utf16Be,
    ]
    .into_iter()
    .map(|encoding| (encoding, bom(encoding)))
    .find(|(_, mark)| bytes.starts_with(mark))
    .map(|(encoding, mark)| (encoding, mark.len()))
}

fn units<const N: usize>(bytes: &[u8], encoding: UtfType) -> Result<impl Iterator<Item = [u8; N]> + '_, Error> {
    if bytes.len() % N != 0 {
        return Err(Error::encoding_error(format!(
            "input length {} is not a multiple of the {:?} unit size",
            bytes.len(),
            encoding
        )));
    }
    Ok(bytes.chunks_exact(N).map(|chunk| {
        let mut unit = [0u8; N];
        unit.copy_from_slice(chunk);
        unit
    }))
}

fn decode_utf16(units: impl Iterator<Item = u16>) -> Result<String, Error> {
    char::decode_utf16(units)
        .map(|c| c.map_err(|e| Error::encoding_error(format!("invalid UTF-16 input: {}", e))))
        .collect()
}

fn decode_utf32(units: impl Iterator<Item = u32>) -> Result<String, Error> {
    units
        .map(|unit| {
            char::from_u32(unit).ok_or_else(|| {
                Error::encoding_error(format!("invalid UTF-32 code point: {:#x}", unit))
            })
        })
        .collect()
}

/// Decodes `bytes` into text. A byte order mark selects the encoding and is
/// stripped; without one, `fallback` is used.
pub fn decode(bytes: &[u8], fallback: UtfType) -> Result<String, Error> {
    let (encoding, body) = match detect_bom(bytes) {
        Some((encoding, len)) => (encoding, &bytes[len..]),
        None => (fallback, bytes),
    };
    match encoding {
        UtfType::Utf8 => std::str::from_utf8(body)
            .map(str::to_string)
            .map_err(|e| Error::encoding_error(format!("invalid UTF-8 input: {}", e))),
        UtfType::Utf16Le => decode_utf16(units::<2>(body, encoding)?.map(u16::from_le_bytes)),
        UtfType::Utf16Be => decode_utf16(units::<2>(body, encoding)?.map(u16::from_be_bytes)),
        UtfType::Utf32Le => decode_utf32(units::<4>(body, encoding)?.map(u32::from_le_bytes)),
        UtfType::Utf32Be => decode_utf32(units::<4>(body, encoding)?.map(u32::from_be_bytes)),
    }
}

/// Encodes `text`, optionally preceded by the byte order mark of `encoding`.
pub fn encode(text: &str, encoding: UtfType, write_bom: bool) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len() * 4 + 4);
    if write_bom {
        out.extend_from_slice(bom(encoding));
    }
    match encoding {
        UtfType::Utf8 => out.extend_from_slice(text.as_bytes()),
        UtfType::Utf16Le => text
            .encode_utf16()
            .for_each(|unit| out.extend_from_slice(&unit.to_le_bytes())),
        UtfType::Utf16Be => text
            .encode_utf16()
            .for_each(|unit| out.extend_from_slice(&unit.to_be_bytes())),
        UtfType::Utf32Le => text
            .chars()
            .for_each(|c| out.extend_from_slice(&u32::from(c).to_le_bytes())),
        UtfType::Utf32Be => text
            .chars()
            .for_each(|c| out.extend_from_slice(&u32::from(c).to_be_bytes())),
    }
    out
}
