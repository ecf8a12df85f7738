//! Non-blocking line framing over a serial byte stream.
//!
//! [`LineReader::poll`] is called from the main loop. It drains whatever the
//! byte source has buffered and hands back a line once one is complete. A
//! line is complete when
//!
//! - the terminator byte arrives (it stays in the line),
//! - the line reaches the configured maximum length or the buffer capacity, or
//! - the sender goes quiet for longer than the idle timeout after at least one
//!   byte.
//!
//! A line completed by the timeout or the length limit has no terminator, and
//! the parser rejects it for that. There is no separate timeout error.
//!
//! # Example
//! ```rust
//! use hub75_illuminator::reader::{ByteSource, LineReader};
//!
//! struct Bytes<'a>(&'a [u8]);
//!
//! impl ByteSource for Bytes<'_> {
//!     type Error = core::convert::Infallible;
//!
//!     fn available(&mut self) -> Result<bool, Self::Error> {
//!         Ok(!self.0.is_empty())
//!     }
//!
//!     fn read_byte(&mut self) -> Result<Option<u8>, Self::Error> {
//!         let Some((first, rest)) = self.0.split_first() else {
//!             return Ok(None);
//!         };
//!         self.0 = rest;
//!         Ok(Some(*first))
//!     }
//! }
//!
//! let mut reader: LineReader = LineReader::new();
//! let mut source = Bytes(b"fill 50\n");
//! let clock = || 0u32;
//!
//! let line = reader.poll(&mut source, &clock).unwrap().unwrap();
//! assert_eq!(&line[..], b"fill 50\n");
//! ```

use embedded_io::{Read, ReadReady};

use crate::{IDLE_TIMEOUT_MS, LINE_CAPACITY, LINE_TERMINATOR};

/// A completed line, terminator included when one arrived
pub type Line<const N: usize = LINE_CAPACITY> = heapless::Vec<u8, N>;

/// Serial receive side of the transport
pub trait ByteSource {
    /// Transport error
    type Error;

    /// Whether a byte can be read without blocking
    fn available(&mut self) -> Result<bool, Self::Error>;

    /// Read the next byte. Only called after [`ByteSource::available`]
    /// returned `true`; `None` if the byte went away in between.
    fn read_byte(&mut self) -> Result<Option<u8>, Self::Error>;
}

/// [`ByteSource`] over an `embedded-io` reader such as a HAL UART
#[derive(Debug)]
pub struct IoSource<T> {
    inner: T,
}

impl<T> IoSource<T> {
    /// Wrap a reader
    pub const fn new(inner: T) -> Self {
        Self { inner }
    }

    /// Give the reader back
    pub fn into_inner(self) -> T {
        self.inner
    }
}

impl<T: Read + ReadReady> ByteSource for IoSource<T> {
    type Error = T::Error;

    fn available(&mut self) -> Result<bool, Self::Error> {
        self.inner.read_ready()
    }

    fn read_byte(&mut self) -> Result<Option<u8>, Self::Error> {
        let mut byte = [0u8; 1];
        let n = self.inner.read(&mut byte)?;
        Ok((n == 1).then_some(byte[0]))
    }
}

/// Free-running millisecond counter. Wraps like a 32-bit `millis()`.
pub trait Clock {
    /// Milliseconds since an arbitrary epoch
    fn now_ms(&self) -> u32;
}

impl<F: Fn() -> u32> Clock for F {
    fn now_ms(&self) -> u32 {
        self()
    }
}

/// Line completion settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ReaderConfig {
    /// Byte that ends a line
    pub terminator: u8,
    /// Force a line complete at this many bytes. `0` leaves only the buffer
    /// capacity as limit.
    pub max_length: usize,
    /// Complete a partial line after this much silence. `0` disables the
    /// timeout.
    pub timeout_ms: u32,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            terminator: LINE_TERMINATOR,
            max_length: LINE_CAPACITY,
            timeout_ms: IDLE_TIMEOUT_MS,
        }
    }
}

/// Timer state between polls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReaderState {
    /// Timer stopped: waiting for the first byte of a line, or still draining
    Idle,
    /// Timer running since the last byte of an unfinished line
    AwaitingMore {
        /// Clock reading when the last byte was appended
        since_ms: u32,
    },
}

/// Accumulates bytes into lines.
///
/// # Type Parameters
///
/// * `N` - Line buffer capacity in bytes
#[derive(Debug, Clone)]
pub struct LineReader<const N: usize = LINE_CAPACITY> {
    config: ReaderConfig,
    buffer: Line<N>,
    state: ReaderState,
}

impl<const N: usize> Default for LineReader<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> LineReader<N> {
    /// Reader with the default terminator, length limit and idle timeout
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(ReaderConfig::default())
    }

    /// Reader with explicit completion settings
    ///
    /// A zero-capacity reader is rejected at compile time:
    ///
    /// ```compile_fail
    /// use hub75_illuminator::reader::{LineReader, ReaderConfig};
    ///
    /// let reader = LineReader::<0>::with_config(ReaderConfig::default());
    /// ```
    #[must_use]
    pub const fn with_config(config: ReaderConfig) -> Self {
        const { assert!(N > 0, "line buffer needs room for at least one byte") };
        Self {
            config,
            buffer: heapless::Vec::new(),
            state: ReaderState::Idle,
        }
    }

    /// The completion settings
    #[must_use]
    pub const fn config(&self) -> &ReaderConfig {
        &self.config
    }

    /// Whether the idle timer is running
    #[must_use]
    pub const fn state(&self) -> ReaderState {
        self.state
    }

    /// Bytes of the line received so far
    #[must_use]
    pub fn pending(&self) -> &[u8] {
        &self.buffer
    }

    /// Drop any partial line and stop the timer
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.state = ReaderState::Idle;
    }

    /// Drain available bytes and return a line if one completed.
    ///
    /// Never blocks. Returns `Ok(None)` when more input is needed; the partial
    /// line and the idle timer carry over to the next call. The returned line
    /// is moved out, leaving the reader empty for the next one.
    ///
    /// # Errors
    ///
    /// Propagates transport errors. Bytes received before the error stay
    /// buffered.
    pub fn poll<S, C>(&mut self, source: &mut S, clock: &C) -> Result<Option<Line<N>>, S::Error>
    where
        S: ByteSource,
        C: Clock,
    {
        while source.available()? {
            let Some(byte) = source.read_byte()? else {
                break;
            };
            self.state = ReaderState::Idle;

            // `N > 0` and a full buffer is handed over below, so there is room.
            let _ = self.buffer.push(byte);

            if byte == self.config.terminator || self.is_full() {
                return Ok(Some(self.take()));
            }

            if self.config.timeout_ms > 0 {
                self.state = ReaderState::AwaitingMore {
                    since_ms: clock.now_ms(),
                };
            }
        }

        if let ReaderState::AwaitingMore { since_ms } = self.state {
            if clock.now_ms().wrapping_sub(since_ms) > self.config.timeout_ms {
                #[cfg(feature = "defmt")]
                defmt::trace!(
                    "line completed by idle timeout after {} bytes",
                    self.buffer.len()
                );
                return Ok(Some(self.take()));
            }
        }

        Ok(None)
    }

    fn is_full(&self) -> bool {
        let limit = self.config.max_length;
        (limit > 0 && self.buffer.len() >= limit) || self.buffer.is_full()
    }

    fn take(&mut self) -> Line<N> {
        self.state = ReaderState::Idle;
        core::mem::take(&mut self.buffer)
    }
}
