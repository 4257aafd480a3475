use heapless::Vec;

use crate::{frame::Frame, RenderedFrame, MAX_MESSAGES};

/// Returned by [`BusQueue::enqueue`] when every slot is taken. The frame is
/// dropped and the queue is left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[error("CAN bus is full")]
pub struct BusFull;

/// Append-only record of the frames put on the bus, bounded to `N` entries
/// (100 by default).
///
/// Frames are never removed or reordered. Once full, the queue rejects every
/// further frame until it is recreated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusQueue<const N: usize = MAX_MESSAGES> {
    frames: Vec<Frame, N>,
}

impl<const N: usize> Default for BusQueue<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> BusQueue<N> {
    pub const fn new() -> Self {
        Self { frames: Vec::new() }
    }

    /// Stores a copy of `frame` after the frames already on the bus
    pub fn enqueue(&mut self, frame: Frame) -> Result<(), BusFull> {
        match self.frames.push(frame) {
            Ok(()) => {
                #[cfg(feature = "defmt")]
                defmt::trace!(
                    "Queued frame {} of {} (dlc = {})",
                    self.frames.len(),
                    N,
                    frame.dlc()
                );

                Ok(())
            }
            Err(_) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("CAN bus is full ({} frames), dropping frame", N);

                Err(BusFull)
            }
        }
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.frames.is_full()
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    /// The stored frames in insertion order
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn iter(&self) -> core::slice::Iter<'_, Frame> {
        self.frames.iter()
    }

    /// Renders every stored frame, first to last. Nothing is consumed so the
    /// iterator can be recreated at will and always reflects the current
    /// contents.
    pub fn drain_and_render(&self) -> impl Iterator<Item = RenderedFrame> + '_ {
        #[cfg(feature = "defmt")]
        defmt::trace!("Rendering {} frames from the bus", self.frames.len());

        self.frames.iter().map(Frame::render)
    }
}

impl<'a, const N: usize> IntoIterator for &'a BusQueue<N> {
    type Item = &'a Frame;
    type IntoIter = core::slice::Iter<'a, Frame>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
