//! Batch buffers: one flat allocation split into equally sized frames.
//!
//! A batch is filled front to back through a [`BatchBufferSetter`] and read back through a
//! [`BatchBufferReader`]. The buffer remembers how far it has been written (`actual_size`), so a
//! batch allocated for `count` frames can carry fewer.

use std::cmp::max;
use std::ops::Range;

use crate::{HasherError, HasherResult};

/// A flat byte allocation holding up to `count` frames of `frame_length` bytes each.
#[derive(Debug, Clone)]
pub struct BatchBuffer {
    frame_length: usize,
    actual_size: usize,
    buffer: Vec<u8>,
}

impl BatchBuffer {
    /// Allocates a zeroed batch with room for `count` frames of `frame_length` bytes.
    ///
    /// Fails with [`HasherError::BatchTooLarge`] when the total size overflows `usize`, exceeds
    /// `isize::MAX` bytes, or cannot be allocated.
    pub fn new(frame_length: usize, count: usize) -> HasherResult<Self> {
        if frame_length == 0 {
            return Err(HasherError::ZeroFrameLength);
        }
        if count == 0 {
            return Err(HasherError::ZeroFrameCount);
        }

        let too_large = HasherError::BatchTooLarge {
            frame_length,
            count,
        };
        let length = frame_length
            .checked_mul(count)
            .filter(|&length| length <= isize::MAX as usize)
            .ok_or(too_large)?;

        let mut buffer = Vec::new();
        buffer
            .try_reserve_exact(length)
            .map_err(|_| HasherError::BatchTooLarge {
                frame_length,
                count,
            })?;
        buffer.resize(length, 0);

        Ok(Self {
            frame_length,
            actual_size: 0,
            buffer,
        })
    }

    /// Length in bytes of every frame.
    pub fn frame_length(&self) -> usize {
        self.frame_length
    }

    /// Capacity of the batch in bytes.
    pub fn length(&self) -> usize {
        self.buffer.len()
    }

    /// Bytes written so far, always a whole number of frames.
    pub fn actual_size(&self) -> usize {
        self.actual_size
    }

    /// Number of frames written so far.
    pub fn num_frames(&self) -> usize {
        self.actual_size.div_ceil(self.frame_length)
    }

    /// Forgets every written frame. The bytes themselves are left as they are.
    pub fn reset(&mut self) -> &mut Self {
        self.actual_size = 0;
        self
    }

    /// Starts writing frames from the front of the batch.
    pub fn setter(&mut self) -> BatchBufferSetter<'_> {
        BatchBufferSetter::new(self)
    }

    /// Reads the written frames from the front of the batch.
    pub fn reader(&self) -> BatchBufferReader<'_> {
        BatchBufferReader::new(self)
    }

    pub(crate) fn written(&self) -> &[u8] {
        &self.buffer[..self.actual_size]
    }

    /// Marks the first `size` bytes as written and returns them.
    pub(crate) fn fill_to(&mut self, size: usize) -> &mut [u8] {
        debug_assert!(size <= self.length());
        debug_assert_eq!(size % self.frame_length, 0);
        self.actual_size = size;
        &mut self.buffer[..size]
    }

    fn raw_frame_bounds(&self, at: usize) -> Option<Range<usize>> {
        let frame_start = at - at % self.frame_length;
        let frame_end = frame_start + self.frame_length;

        if frame_end <= self.length() {
            Some(frame_start..frame_end)
        } else {
            None
        }
    }

    fn frame_mut(&mut self, at: usize) -> Option<&mut [u8]> {
        let frame = self.raw_frame_bounds(at)?;
        self.actual_size = max(frame.end, self.actual_size);
        Some(&mut self.buffer[frame])
    }

    fn frame(&self, at: usize) -> Option<&[u8]> {
        let frame = self.raw_frame_bounds(at)?;
        if frame.end <= self.actual_size {
            Some(&self.buffer[frame])
        } else {
            None
        }
    }
}

/// Writes successive frames of a [`BatchBuffer`], starting from an empty batch.
#[derive(Debug)]
pub struct BatchBufferSetter<'r> {
    at: usize,
    inner: &'r mut BatchBuffer,
}

impl<'r> BatchBufferSetter<'r> {
    fn new(batch_buffer: &'r mut BatchBuffer) -> Self {
        batch_buffer.reset();
        Self {
            at: 0,
            inner: batch_buffer,
        }
    }

    /// Returns the next frame to fill, or `None` once the batch is full. Every returned frame
    /// counts as written, whether or not the caller changes its bytes.
    pub fn next_frame(&mut self) -> Option<&mut [u8]> {
        let frame = self.inner.frame_mut(self.at)?;
        self.at += frame.len();
        Some(frame)
    }

    /// Number of frames handed out since the setter was created.
    pub fn num_frames(&self) -> usize {
        self.inner.num_frames()
    }
}

/// Reads back the written frames of a [`BatchBuffer`] in order.
#[derive(Debug, Clone)]
pub struct BatchBufferReader<'r> {
    at: usize,
    inner: &'r BatchBuffer,
}

impl<'r> BatchBufferReader<'r> {
    fn new(batch_buffer: &'r BatchBuffer) -> Self {
        Self {
            at: 0,
            inner: batch_buffer,
        }
    }

    /// Returns the next written frame, or `None` past the last one.
    pub fn next_frame(&mut self) -> Option<&'r [u8]> {
        let frame = self.inner.frame(self.at)?;
        self.at += frame.len();
        Some(frame)
    }

    /// Number of written frames in the batch, including those already read.
    pub fn num_frames(&self) -> usize {
        self.inner.num_frames()
    }
}

impl<'r> Iterator for BatchBufferReader<'r> {
    type Item = &'r [u8];

    fn next(&mut self) -> Option<Self::Item> {
        self.next_frame()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const IN_LEN: usize = 1024;
    const IN_COUNT: usize = 255;

    #[test]
    fn batch_buffer_rw() {
        let mut buffer = BatchBuffer::new(IN_LEN, IN_COUNT).unwrap();
        let mut setter = buffer.setter();

        let mut nframe: u8 = 0;

        while let Some(frame) = setter.next_frame() {
            assert_eq!(frame.len(), IN_LEN);
            frame.fill(nframe);
            nframe += 1;
            if nframe >= 16 {
                break;
            }
        }

        assert_eq!(buffer.actual_size(), IN_LEN * 16);
        assert_eq!(buffer.num_frames(), 16);

        let mut reader = buffer.reader();

        nframe = 0;

        while let Some(frame) = reader.next_frame() {
            assert_eq!(*frame, [nframe; IN_LEN]);
            nframe += 1;
        }

        assert_eq!(nframe, 16);
    }

    #[test]
    fn setter_stops_at_capacity() {
        let mut buffer = BatchBuffer::new(4, 3).unwrap();
        let mut setter = buffer.setter();

        let mut frames = 0;
        while setter.next_frame().is_some() {
            frames += 1;
        }

        assert_eq!(frames, 3);
        assert_eq!(setter.num_frames(), 3);
        assert_eq!(buffer.actual_size(), buffer.length());
    }

    #[test]
    fn setter_starts_over() {
        let mut buffer = BatchBuffer::new(4, 3).unwrap();
        {
            let mut setter = buffer.setter();
            setter.next_frame().unwrap().copy_from_slice(b"aaaa");
            setter.next_frame().unwrap().copy_from_slice(b"bbbb");
        }
        assert_eq!(buffer.num_frames(), 2);

        buffer.setter().next_frame().unwrap().copy_from_slice(b"cccc");

        assert_eq!(buffer.num_frames(), 1);
        assert_eq!(buffer.reader().collect::<Vec<_>>(), vec![&b"cccc"[..]]);
    }

    #[test]
    fn reset_hides_frames() {
        let mut buffer = BatchBuffer::new(8, 2).unwrap();
        buffer.setter().next_frame().unwrap();
        assert_eq!(buffer.num_frames(), 1);

        buffer.reset();
        assert_eq!(buffer.num_frames(), 0);
        assert!(buffer.reader().next_frame().is_none());
    }

    #[test]
    fn rejects_empty_shapes() {
        assert!(matches!(
            BatchBuffer::new(0, 4),
            Err(HasherError::ZeroFrameLength)
        ));
        assert!(matches!(
            BatchBuffer::new(4, 0),
            Err(HasherError::ZeroFrameCount)
        ));
    }

    #[test]
    fn rejects_oversized_shapes() {
        assert!(matches!(
            BatchBuffer::new(usize::MAX / 2, 3),
            Err(HasherError::BatchTooLarge {
                frame_length,
                count: 3,
            }) if frame_length == usize::MAX / 2
        ));
        // fits in usize but not in one allocation
        assert!(matches!(
            BatchBuffer::new(isize::MAX as usize, 2),
            Err(HasherError::BatchTooLarge { count: 2, .. })
        ));
    }
}
