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
use crate::yuv_error::{MismatchedSize, YuvError};
use thiserror::Error;

/// Error returned by the negotiation and transform callbacks of the stage.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StageError {
    /// A callback was handed an argument outside its domain, e.g. a negative
    /// media type position.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// Width is not positive or height is zero.
    #[error("invalid frame geometry {width}x{height}")]
    InvalidGeometry { width: i32, height: i32 },
    /// The candidate type, or the proposed input/output pair, is rejected.
    /// The host may try another candidate.
    #[error("media type not accepted: {0}")]
    TypeNotAccepted(&'static str),
    /// End of the output type enumeration, not a failure.
    #[error("no more media types")]
    NoMoreTypes,
    #[error(
        "allocator granted {} byte buffers, at least {} are required",
        .0.received,
        .0.expected
    )]
    AllocationTooSmall(MismatchedSize),
    #[error("allocator rejected the requested properties: {0}")]
    AllocatorRejected(String),
    #[error("unknown parameter `{0}`")]
    UnknownParameter(String),
    #[error("malformed value `{value}` for parameter `{name}`")]
    MalformedValue { name: String, value: String },
    #[error("out of memory")]
    OutOfMemory,
    /// The operation needs a committed media type that is not there yet.
    #[error("not connected: {0}")]
    NotConnected(&'static str),
    #[error(transparent)]
    Conversion(#[from] YuvError),
}

impl StageError {
    pub(crate) fn malformed(name: &str, value: &str) -> Self {
        Self::MalformedValue {
            name: name.to_owned(),
            value: value.to_owned(),
        }
    }

    /// Returns true for the end-of-enumeration signal of [`StageError::NoMoreTypes`].
    pub fn is_end_of_types(&self) -> bool {
        matches!(self, Self::NoMoreTypes)
    }

    /// Errors after which the host must abandon the connection attempt instead
    /// of retrying with another candidate.
    pub fn aborts_connection(&self) -> bool {
        matches!(
            self,
            Self::AllocationTooSmall(_) | Self::InvalidGeometry { .. } | Self::OutOfMemory
        )
    }
}

pub type Result<T> = std::result::Result<T, StageError>;
