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
//! Output buffer sizing and the allocator seam.

use crate::media_type::{FormatKind, MediaType};
use crate::stage_error::{Result, StageError};
use crate::yuv_error::MismatchedSize;
use tracing::{debug, warn};

/// Buffer requirements exchanged with the host allocator. Zero means "no
/// preference" for `buffers` and `align`.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct AllocatorProperties {
    pub buffers: u32,
    pub buffer_size: usize,
    pub align: u32,
    pub prefix: u32,
}

/// Host side allocator the stage negotiates buffer properties with.
pub trait MemAllocator {
    /// Requests `requested` and returns what the allocator actually granted.
    fn set_properties(&mut self, requested: &AllocatorProperties) -> Result<AllocatorProperties>;
}

/// Sizes output buffers for `output` and asks `allocator` for them.
///
/// Buffer size is the bitmap size of the output header. Unset alignment and
/// buffer count default to 1. Fails with [`StageError::AllocationTooSmall`]
/// when the granted buffers are smaller than required; there is no retry.
pub fn compute_allocator_properties<A: MemAllocator + ?Sized>(
    output: &MediaType,
    requested: &AllocatorProperties,
    allocator: &mut A,
) -> Result<AllocatorProperties> {
    if output.format_kind != FormatKind::VideoInfo {
        return Err(StageError::TypeNotAccepted(
            "output format block is not a VIDEOINFOHEADER",
        ));
    }
    let bmi = output
        .bitmap_header()
        .ok_or(StageError::TypeNotAccepted("output has no format block"))?;

    let mut properties = *requested;
    properties.buffer_size = bmi.dib_size();
    if properties.align == 0 {
        properties.align = 1;
    }
    if properties.buffers == 0 {
        properties.buffers = 1;
    }

    let actual = allocator.set_properties(&properties)?;
    if actual.buffer_size < properties.buffer_size {
        warn!(
            required = properties.buffer_size,
            granted = actual.buffer_size,
            "allocator granted buffers that are too small"
        );
        return Err(StageError::AllocationTooSmall(MismatchedSize {
            expected: properties.buffer_size,
            received: actual.buffer_size,
        }));
    }
    debug!(
        buffers = actual.buffers,
        buffer_size = actual.buffer_size,
        align = actual.align,
        "allocator properties settled"
    );
    Ok(actual)
}

/// Simple allocator owning a fixed pool of heap buffers.
///
/// Grants the requested count and alignment and rounds the buffer size up to
/// the alignment. An optional ceiling caps the granted size.
#[derive(Debug, Default)]
pub struct PoolAllocator {
    max_buffer_size: Option<usize>,
    properties: Option<AllocatorProperties>,
    buffers: Vec<Vec<u8>>,
}

impl PoolAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Never grants buffers larger than `max_buffer_size`.
    pub fn with_max_buffer_size(max_buffer_size: usize) -> Self {
        Self {
            max_buffer_size: Some(max_buffer_size),
            ..Self::default()
        }
    }

    pub fn properties(&self) -> Option<AllocatorProperties> {
        self.properties
    }

    /// Allocates the buffers for the granted properties.
    pub fn commit(&mut self) -> Result<()> {
        let properties = self.properties.ok_or(StageError::AllocatorRejected(
            "no properties were set".to_owned(),
        ))?;
        let mut buffers = Vec::new();
        buffers
            .try_reserve_exact(properties.buffers as usize)
            .map_err(|_| StageError::OutOfMemory)?;
        for _ in 0..properties.buffers {
            let mut buffer = Vec::new();
            buffer
                .try_reserve_exact(properties.buffer_size)
                .map_err(|_| StageError::OutOfMemory)?;
            buffer.resize(properties.buffer_size, 0u8);
            buffers.push(buffer);
        }
        self.buffers = buffers;
        Ok(())
    }

    /// Releases the buffers, keeping the properties.
    pub fn decommit(&mut self) {
        self.buffers.clear();
    }

    pub fn buffer_count(&self) -> usize {
        self.buffers.len()
    }

    pub fn buffer_mut(&mut self, index: usize) -> Option<&mut [u8]> {
        self.buffers.get_mut(index).map(Vec::as_mut_slice)
    }
}

impl MemAllocator for PoolAllocator {
    fn set_properties(&mut self, requested: &AllocatorProperties) -> Result<AllocatorProperties> {
        if requested.buffers == 0 {
            return Err(StageError::AllocatorRejected(
                "buffer count must be at least one".to_owned(),
            ));
        }
        if !requested.align.is_power_of_two() {
            return Err(StageError::AllocatorRejected(format!(
                "alignment {} is not a power of two",
                requested.align
            )));
        }
        let mut buffer_size = requested
            .buffer_size
            .checked_next_multiple_of(requested.align as usize)
            .ok_or_else(|| {
                StageError::AllocatorRejected(format!(
                    "buffer size {} overflows when aligned",
                    requested.buffer_size
                ))
            })?;
        if let Some(max) = self.max_buffer_size {
            buffer_size = buffer_size.min(max);
        }
        let granted = AllocatorProperties {
            buffer_size,
            ..*requested
        };
        self.buffers.clear();
        self.properties = Some(granted);
        Ok(granted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Grants a fixed buffer size and records the last request.
    struct FixedAllocator {
        granted_size: usize,
        last_request: Option<AllocatorProperties>,
    }

    impl MemAllocator for FixedAllocator {
        fn set_properties(
            &mut self,
            requested: &AllocatorProperties,
        ) -> Result<AllocatorProperties> {
            self.last_request = Some(*requested);
            Ok(AllocatorProperties {
                buffer_size: self.granted_size,
                ..*requested
            })
        }
    }

    #[test]
    fn unset_alignment_and_count_default_to_one() {
        let mut allocator = FixedAllocator {
            granted_size: usize::MAX,
            last_request: None,
        };
        let actual = compute_allocator_properties(
            &MediaType::rgb24(640, -480),
            &AllocatorProperties::default(),
            &mut allocator,
        )
        .unwrap();
        let request = allocator.last_request.unwrap();
        assert_eq!(request.align, 1);
        assert_eq!(request.buffers, 1);
        assert_eq!(request.buffer_size, 921_600);
        assert_eq!(actual.align, 1);
        assert_eq!(actual.buffers, 1);
    }

    #[test]
    fn explicit_request_is_kept() {
        let mut allocator = FixedAllocator {
            granted_size: 1 << 24,
            last_request: None,
        };
        let requested = AllocatorProperties {
            buffers: 3,
            buffer_size: 17,
            align: 16,
            prefix: 0,
        };
        compute_allocator_properties(&MediaType::rgb24(320, 240), &requested, &mut allocator)
            .unwrap();
        let request = allocator.last_request.unwrap();
        assert_eq!(request.buffers, 3);
        assert_eq!(request.align, 16);
        assert_eq!(request.buffer_size, 230_400);
    }

    #[test]
    fn short_grant_fails() {
        let mut allocator = FixedAllocator {
            granted_size: 640 * 480 * 3 - 1,
            last_request: None,
        };
        let err = compute_allocator_properties(
            &MediaType::rgb24(640, 480),
            &AllocatorProperties::default(),
            &mut allocator,
        )
        .unwrap_err();
        assert_eq!(
            err,
            StageError::AllocationTooSmall(MismatchedSize {
                expected: 921_600,
                received: 921_599
            })
        );
        assert!(err.aborts_connection());
    }

    #[test]
    fn padded_rows_are_counted() {
        let mut allocator = FixedAllocator {
            granted_size: 5 * 3 * 2,
            last_request: None,
        };
        // 5 RGB24 pixels need 15 bytes, padded to 16 per row
        assert!(matches!(
            compute_allocator_properties(
                &MediaType::rgb24(5, 2),
                &AllocatorProperties::default(),
                &mut allocator,
            ),
            Err(StageError::AllocationTooSmall(_))
        ));
    }

    #[test]
    fn output_without_video_info_is_rejected() {
        let mut allocator = PoolAllocator::new();
        let mut output = MediaType::rgb24(640, 480);
        output.format_kind = FormatKind::None;
        assert!(compute_allocator_properties(
            &output,
            &AllocatorProperties::default(),
            &mut allocator
        )
        .is_err());
        assert!(allocator.properties().is_none());
    }

    #[test]
    fn pool_rounds_to_alignment() {
        let mut pool = PoolAllocator::new();
        let granted = pool
            .set_properties(&AllocatorProperties {
                buffers: 2,
                buffer_size: 100,
                align: 64,
                prefix: 0,
            })
            .unwrap();
        assert_eq!(granted.buffer_size, 128);
        pool.commit().unwrap();
        assert_eq!(pool.buffer_count(), 2);
        assert_eq!(pool.buffer_mut(1).unwrap().len(), 128);
        assert!(pool.buffer_mut(2).is_none());
        pool.decommit();
        assert_eq!(pool.buffer_count(), 0);
    }

    #[test]
    fn pool_rejects_bad_requests() {
        let mut pool = PoolAllocator::new();
        let mut request = AllocatorProperties {
            buffers: 0,
            buffer_size: 100,
            align: 1,
            prefix: 0,
        };
        assert!(matches!(
            pool.set_properties(&request),
            Err(StageError::AllocatorRejected(_))
        ));
        request.buffers = 1;
        request.align = 3;
        assert!(matches!(
            pool.set_properties(&request),
            Err(StageError::AllocatorRejected(_))
        ));
        assert!(matches!(pool.commit(), Err(StageError::AllocatorRejected(_))));
    }

    #[test]
    fn capped_pool_triggers_shortfall() {
        let mut pool = PoolAllocator::with_max_buffer_size(4096);
        assert!(matches!(
            compute_allocator_properties(
                &MediaType::rgb24(64, 64),
                &AllocatorProperties::default(),
                &mut pool,
            ),
            Err(StageError::AllocationTooSmall(_))
        ));
    }

    #[test]
    fn huge_pool_is_out_of_memory() {
        let mut pool = PoolAllocator::new();
        pool.set_properties(&AllocatorProperties {
            buffers: 1,
            buffer_size: isize::MAX as usize + 1,
            align: 1,
            prefix: 0,
        })
        .unwrap();
        assert_eq!(pool.commit(), Err(StageError::OutOfMemory));
        assert_eq!(pool.buffer_count(), 0);
    }
}
