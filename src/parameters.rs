/*
 * Copyright (c) Radzivon Bartoshyk, 10/2026. All rights reserved.
 *
 * Redistribution and use in source and binary forms, with or without modification,
 * are permitted provided that the following conditions are met:
 *
 * 1.  Redistributions of source code must retain the above copyright notice, this
 * list of conditions and the following disclaimer.
 *
 * 2.  Redistributions in binary form must reproduce the above copyright notice,
 * this list of conditions and the following disclaimer in the documentation
 * and/or other materials provided with the distribution.
 *
 * 3.  Neither the name of the copyright holder nor the names of its
 * contributors may be used to endorse or promote products derived from
 * this software without specific prior written permission.
 *
 * THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
 * AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
 * IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE ARE
 * DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE LIABLE
 * FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR CONSEQUENTIAL
 * DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR
 * SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS INTERRUPTION) HOWEVER
 * CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT, STRICT LIABILITY,
 * OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE
 * OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.
 */
//! Named parameters of the conversion stage.
//!
//! Parameters are addressed by name and carried as strings so the host can
//! drive them from whatever settings layer it has. Parsing happens against the
//! [`PARAMETERS`] schema.

use crate::stage_error::{Result, StageError};
use num_traits::Num;

pub const INVERT: &str = "invert";
pub const CHROMINANCE_OFFSET: &str = "chrominanceOffset";

/// Value type a parameter is parsed as.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ParameterKind {
    Bool,
    Int,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ParameterSpec {
    pub name: &'static str,
    pub kind: ParameterKind,
}

pub static PARAMETERS: &[ParameterSpec] = &[
    ParameterSpec {
        name: INVERT,
        kind: ParameterKind::Bool,
    },
    ParameterSpec {
        name: CHROMINANCE_OFFSET,
        kind: ParameterKind::Int,
    },
];

/// Capability to read and write named parameters.
pub trait ParameterStore {
    /// Parses `value` for `name` and applies it. On error nothing changes.
    fn set_parameter(&mut self, name: &str, value: &str) -> Result<()>;

    fn get_parameter(&self, name: &str) -> Result<String>;

    fn parameter_names(&self) -> Vec<&'static str> {
        PARAMETERS.iter().map(|spec| spec.name).collect()
    }
}

/// Settings consumed by the pixel converter and by output type derivation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ConversionParameters {
    /// Write the output vertically flipped and negate the output row order.
    pub invert_output: bool,
    /// Subtracted from both chroma samples before the matrix is applied.
    pub chrominance_offset: i32,
}

impl Default for ConversionParameters {
    fn default() -> Self {
        Self {
            invert_output: true,
            chrominance_offset: 128,
        }
    }
}

impl ConversionParameters {
    pub fn with_invert_output(mut self, invert_output: bool) -> Self {
        self.invert_output = invert_output;
        self
    }

    pub fn with_chrominance_offset(mut self, chrominance_offset: i32) -> Self {
        self.chrominance_offset = chrominance_offset;
        self
    }

    /// Returns a copy of `self` with `name` set to the parsed `value`.
    pub fn updated(&self, name: &str, value: &str) -> Result<Self> {
        let spec = lookup(name)?;
        let mut next = *self;
        match spec.kind {
            ParameterKind::Bool => {
                next.invert_output =
                    parse_bool(value).ok_or_else(|| StageError::malformed(name, value))?;
            }
            ParameterKind::Int => {
                next.chrominance_offset =
                    parse_int(value).ok_or_else(|| StageError::malformed(name, value))?;
            }
        }
        Ok(next)
    }
}

impl ParameterStore for ConversionParameters {
    fn set_parameter(&mut self, name: &str, value: &str) -> Result<()> {
        *self = self.updated(name, value)?;
        Ok(())
    }

    fn get_parameter(&self, name: &str) -> Result<String> {
        match lookup(name)?.kind {
            ParameterKind::Bool => Ok(self.invert_output.to_string()),
            ParameterKind::Int => Ok(self.chrominance_offset.to_string()),
        }
    }
}

fn lookup(name: &str) -> Result<&'static ParameterSpec> {
    PARAMETERS
        .iter()
        .find(|spec| spec.name == name)
        .ok_or_else(|| StageError::UnknownParameter(name.to_owned()))
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Decimal or `0x` hexadecimal integer with an optional sign.
fn parse_int<T: Num>(value: &str) -> Option<T> {
    let value = value.trim();
    let (negative, unsigned) = match value.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, value.strip_prefix('+').unwrap_or(value)),
    };
    let (radix, digits) = match unsigned
        .strip_prefix("0x")
        .or_else(|| unsigned.strip_prefix("0X"))
    {
        Some(hex) => (16, hex),
        None => (10, unsigned),
    };
    if digits.is_empty() || digits.starts_with(['+', '-']) {
        return None;
    }
    // parsed with its sign, `i32::MIN` has no positive magnitude
    if negative {
        T::from_str_radix(&format!("-{digits}"), radix).ok()
    } else {
        T::from_str_radix(digits, radix).ok()
    }
}
