use heapless::Vec;
use ufmt::{uDisplay, uWrite, Formatter};
use ufmt_macros::uDebug;

/// Non-blocking source of bytes, such as a UART receiver.
pub trait SerialInput {
    /// Returns the next received byte, or `None` if nothing is waiting.
    ///
    /// This must never block.
    fn try_read_byte(&mut self) -> Option<u8>;
}

/// Accumulates bytes from a [SerialInput] into newline-terminated lines.
///
/// The reader owns its buffer, so a line can be assembled across any number
/// of calls to [LineReader::poll]. Bytes are stored exactly as received, so
/// a line may hold up to `N` bytes whatever their values.
///
/// # Type Parameters
///
/// - `N`: Capacity of the line buffer, in bytes.
pub struct LineReader<const N: usize> {
    buffer: Vec<u8, N>,
    state: State,
}

/// What the reader is currently doing with incoming bytes.
#[derive(Debug, PartialEq, Copy, Clone)]
enum State {
    /// Accumulating bytes into the buffer.
    Reading,
    /// The current line overflowed. Bytes are dropped until the next newline.
    Discarding,
    /// The buffer holds a complete line which has been handed out.
    Complete,
}

impl<const N: usize> LineReader<N> {
    /// Creates a new, empty `LineReader`.
    pub fn new() -> Self {
        Self {
            buffer: Vec::new(),
            state: State::Reading,
        }
    }

    /// Reads whatever bytes are currently available from `input`.
    ///
    /// Reading stops at the first newline, so any bytes after it stay in the
    /// input for the next call.
    ///
    /// # Parameters
    ///
    /// - `input`: Source of bytes.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(line))`: a line was completed. The line has surrounding
    ///   whitespace and control characters trimmed, and may be empty.
    /// - `Ok(None)`: the input ran dry before a newline arrived.
    /// - `Err(Error::BufferOverflow)`: a line longer than `N` bytes was
    ///   received and has been dropped in full.
    pub fn poll<S: SerialInput + ?Sized>(
        &mut self,
        input: &mut S,
    ) -> Result<Option<Line<'_>>, Error> {
        if self.state == State::Complete {
            self.buffer.clear();
            self.state = State::Reading;
        }

        while let Some(byte) = input.try_read_byte() {
            if self.push_byte(byte)? {
                return Ok(Some(Line(trim(&self.buffer))));
            }
        }

        Ok(None)
    }

    /// Feeds a single byte to the reader.
    ///
    /// # Returns
    ///
    /// - `Ok(true)`: the byte completed a line.
    /// - `Ok(false)`: more bytes are needed.
    /// - `Err(Error::BufferOverflow)`: the byte ended an overflowed line.
    fn push_byte(&mut self, byte: u8) -> Result<bool, Error> {
        match (self.state, byte) {
            (State::Discarding, b'\n') => {
                self.buffer.clear();
                self.state = State::Reading;
                Err(Error::BufferOverflow)
            }
            (State::Discarding, _) => Ok(false),
            (_, b'\n') => {
                self.state = State::Complete;
                Ok(true)
            }
            (_, b) => {
                if self.buffer.push(b).is_err() {
                    self.buffer.clear();
                    self.state = State::Discarding;
                }
                Ok(false)
            }
        }
    }
}

impl<const N: usize> Default for LineReader<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// A complete line, borrowed from a [LineReader].
///
/// Each byte is one character: bytes are read as Latin-1, so ASCII text is
/// unchanged and a byte such as `0xE9` reads as `'\u{e9}'`.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct Line<'a>(&'a [u8]);
impl<'a> Line<'a> {
    /// Returns the raw bytes of the line.
    pub fn as_bytes(&self) -> &'a [u8] {
        self.0
    }

    /// Returns the number of bytes in the line.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the line has no bytes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the characters of the line.
    pub fn chars(&self) -> impl Iterator<Item = char> + 'a {
        self.0.iter().map(|&b| char::from(b))
    }
}

impl uDisplay for Line<'_> {
    fn fmt<W>(&self, f: &mut Formatter<'_, W>) -> Result<(), W::Error>
    where
        W: uWrite + ?Sized,
    {
        for c in self.chars() {
            f.write_char(c)?;
        }
        Ok(())
    }
}

/// Strips trimmable bytes from both ends.
fn trim(bytes: &[u8]) -> &[u8] {
    let start = bytes
        .iter()
        .position(|&b| !is_trimmable(b))
        .unwrap_or(bytes.len());
    let end = bytes
        .iter()
        .rposition(|&b| !is_trimmable(b))
        .map_or(start, |i| i + 1);
    &bytes[start..end]
}

/// Bytes removed from both ends of a line.
///
/// These are the ASCII whitespace characters, including vertical tab.
fn is_trimmable(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | 0x0b | 0x0c | b'\r')
}

/// Errors that might occur when reading.
#[derive(Debug, PartialEq, Copy, Clone, uDebug)]
pub enum Error {
    /// A line did not fit in the buffer.
    BufferOverflow,
}

/// Serial port to use for testing purposes.
///
/// Bytes queued with [TestPort::feed] are handed out one at a time through
/// [SerialInput]. Everything written through [ufmt::uWrite] is captured and
/// can be inspected with [TestPort::output].
#[cfg(test)]
pub struct TestPort {
    input: std::collections::VecDeque<u8>,
    output: std::string::String,
}
#[cfg(test)]
impl TestPort {
    /// Creates a new test port with nothing to read.
    pub fn new() -> Self {
        Self {
            input: std::collections::VecDeque::new(),
            output: std::string::String::new(),
        }
    }

    /// Queues bytes to be read.
    pub fn feed(&mut self, bytes: &[u8]) {
        self.input.extend(bytes.iter().copied());
    }

    /// Returns the number of bytes that are still waiting to be read.
    pub fn pending(&self) -> usize {
        self.input.len()
    }

    /// Returns everything written to the port so far.
    pub fn output(&self) -> &str {
        &self.output
    }
}
#[cfg(test)]
impl SerialInput for TestPort {
    fn try_read_byte(&mut self) -> Option<u8> {
        self.input.pop_front()
    }
}
#[cfg(test)]
impl uWrite for TestPort {
    type Error = core::convert::Infallible;

    fn write_str(&mut self, s: &str) -> Result<(), Self::Error> {
        self.output.push_str(s);
        Ok(())
    }
}
