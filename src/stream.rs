use std::io::{Read, Write};

use tracing::{debug, warn};

use crate::{
    config::StreamConfig,
    emitter::{emit_number, emit_string},
    encoder::encode,
    error::{StreamError, StreamResult, TokenError, TokenResult},
    tokenizer::{
        action::{Action, VALID_DEFAULT_SIZES},
        token::{classify, TokenSpan, Tokenizer},
        types::{Base, Category, Endianness},
    },
};

/// Progress of a stream. Output, once produced, stays available until reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, strum::Display)]
pub enum StreamState {
    #[default]
    Idle,
    HasInput,
    HasOutput,
}

/// Current parsing mode, changed by action tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mode {
    pub endianness: Endianness,
    pub base: Base,
    /// Default size in bytes, 0 for auto-size.
    pub size: u64,
}

impl Default for Mode {
    fn default() -> Self {
        Self::from(&StreamConfig::default())
    }
}

impl From<&StreamConfig> for Mode {
    fn from(config: &StreamConfig) -> Self {
        Self {
            endianness: config.endianness,
            base: config.base,
            size: config.size,
        }
    }
}

/// A text-to-binary session.
///
/// Text is parsed as soon as it is fed; each chunk is tokenized on its own,
/// so a token never spans two calls. Bad tokens are logged, recorded in
/// [`diagnostics`](BinStream::diagnostics) and skipped.
///
/// ```rust
/// use binmake::BinStream;
///
/// let mut stream = BinStream::new();
/// stream.feed("big-endian\n00010203\nlittle-endian\n04050607\n");
/// assert_eq!(
///     stream.output().unwrap(),
///     &[0x00, 0x01, 0x02, 0x03, 0x07, 0x06, 0x05, 0x04]
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct BinStream {
    initial_mode: Mode,
    mode: Mode,
    input: String,
    output: Vec<u8>,
    input_ready: bool,
    output_ready: bool,
    diagnostics: Vec<TokenError>,
}

impl BinStream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: &StreamConfig) -> StreamResult<Self> {
        config.validate()?;
        let mode = Mode::from(config);
        Ok(Self {
            initial_mode: mode,
            mode,
            ..Default::default()
        })
    }

    /// Appends `chunk` to the input and parses it.
    #[tracing::instrument(level = "debug", skip(self, chunk), fields(len = chunk.len()))]
    pub fn feed(&mut self, chunk: &str) -> &mut Self {
        self.input.push_str(chunk);
        self.input_ready = true;

        for span in Tokenizer::new().tokenize(chunk) {
            self.workflow(&span);
        }
        self
    }

    /// Feeds a byte chunk, which must be valid UTF-8. Nothing is buffered or
    /// parsed when it is not.
    pub fn feed_bytes(&mut self, chunk: &[u8]) -> StreamResult<&mut Self> {
        let chunk = std::str::from_utf8(chunk)?;
        Ok(self.feed(chunk))
    }

    /// Reads `reader` to the end and feeds it as a single chunk.
    pub fn feed_reader<R: Read>(&mut self, mut reader: R) -> StreamResult<&mut Self> {
        let mut chunk = String::new();
        reader.read_to_string(&mut chunk)?;
        Ok(self.feed(&chunk))
    }

    fn workflow(&mut self, span: &TokenSpan<'_>) {
        let token = span.text;
        let result = match classify(token) {
            Category::Error => Err(TokenError::grammar(
                token,
                "bad explicit number, expected % followed by d, x, o, b or f and digits",
            )),
            Category::Action => self.apply_action(token),
            Category::String => self.push_string(token),
            Category::Number(base) => self.push_number(token, base),
            Category::Indeterminate => self.push_number(token, self.mode.base),
        };

        if let Err(e) = result {
            warn!(
                line = span.line,
                column = span.column,
                kind = %e.kind(),
                "{}",
                e
            );
            self.diagnostics.push(e);
        }
    }

    /// Applies a mode-changing token such as `big-endian`, `dec` or `size[4]`.
    pub fn apply_action(&mut self, token: &str) -> TokenResult<()> {
        let action = Action::parse(token.trim())
            .ok_or_else(|| TokenError::state(token, "unknown internal state"))?;

        match action {
            Action::Endianness(endianness) => self.mode.endianness = endianness,
            Action::Base(base) => self.mode.base = base,
            Action::Size(size) if VALID_DEFAULT_SIZES.contains(&size) => self.mode.size = size,
            Action::Size(size) => {
                return Err(TokenError::value(
                    token,
                    format!(
                        "bad size {} for default size, should be 0, 1, 2, 4 or 8",
                        size
                    ),
                ));
            }
        }
        debug!(mode = ?self.mode, "mode updated by '{}'", token);
        Ok(())
    }

    fn push_string(&mut self, token: &str) -> TokenResult<()> {
        emit_string(&mut self.output, token)?;
        self.output_ready = true;
        debug!("string to bin: {}", token);
        Ok(())
    }

    fn push_number(&mut self, token: &str, base: Base) -> TokenResult<()> {
        let number = encode(token, base, self.mode.endianness, self.mode.size)?;
        emit_number(&mut self.output, &number);
        self.output_ready = true;
        debug!(size = number.size.bytes(), "number to bin: {}", token);
        Ok(())
    }

    /// Clears input, output and diagnostics and restores the initial mode.
    pub fn reset(&mut self) {
        self.reset_modes();
        self.reset_output();
        self.reset_input();
        self.clear_diagnostics();
    }

    pub fn reset_modes(&mut self) {
        self.mode = self.initial_mode;
    }

    pub fn reset_output(&mut self) {
        self.output_ready = false;
        self.output.clear();
    }

    pub fn reset_input(&mut self) {
        self.input_ready = false;
        self.input.clear();
    }

    pub fn clear_diagnostics(&mut self) {
        self.diagnostics.clear();
    }

    pub fn state(&self) -> StreamState {
        if self.output_ready {
            StreamState::HasOutput
        } else if self.input_ready {
            StreamState::HasInput
        } else {
            StreamState::Idle
        }
    }

    pub fn input_ready(&self) -> bool {
        self.input_ready
    }

    pub fn output_ready(&self) -> bool {
        self.output_ready
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    /// All text fed since the last input reset.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Recoverable token errors recorded since the last reset.
    pub fn diagnostics(&self) -> &[TokenError] {
        &self.diagnostics
    }

    pub fn output(&self) -> StreamResult<&[u8]> {
        if !self.output_ready {
            return Err(StreamError::NoOutputAvailable);
        }
        Ok(&self.output)
    }

    /// Number of output bytes, 0 when nothing was produced.
    pub fn len(&self) -> usize {
        if self.output_ready {
            self.output.len()
        } else {
            0
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, index: usize) -> StreamResult<u8> {
        let output = self.output()?;
        output
            .get(index)
            .copied()
            .ok_or(StreamError::OutOfRange {
                index,
                len: output.len(),
            })
    }

    pub fn write_output<W: Write>(&self, mut writer: W) -> StreamResult<()> {
        writer.write_all(self.output()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{error::ErrorKind, tokenizer::grammar::validate};

    #[test]
    fn test_fresh_stream() {
        let stream = BinStream::new();
        assert_eq!(stream.state(), StreamState::Idle);
        assert!(!stream.input_ready());
        assert!(!stream.output_ready());
        assert_eq!(stream.len(), 0);
        assert!(matches!(stream.output(), Err(StreamError::NoOutputAvailable)));
        assert!(matches!(stream.get(0), Err(StreamError::NoOutputAvailable)));
    }

    #[test]
    fn test_issue_explicit_size() {
        let mut stream = BinStream::new();
        stream.feed("decimal").feed("26[1]");
        assert_eq!(stream.len(), 1);
        assert_eq!(stream.get(0).unwrap(), 0x1a);

        let mut stream = BinStream::new();
        stream.feed("decimal").feed("26[2]");
        assert_eq!(stream.output().unwrap(), &[0x1a, 0x00]);
    }

    #[test]
    fn test_explicit_hexadecimal() {
        let mut stream = BinStream::new();
        stream.feed("big-endian\n%x12345678\n%x2f %x00\n");
        assert_eq!(
            stream.output().unwrap(),
            &[0x12, 0x34, 0x56, 0x78, 0x2f, 0x00]
        );
    }

    #[test]
    fn test_states() {
        let mut stream = BinStream::new();
        stream.feed("# nothing here\n");
        assert_eq!(stream.state(), StreamState::HasInput);
        assert!(matches!(stream.output(), Err(StreamError::NoOutputAvailable)));

        stream.feed("ff");
        assert_eq!(stream.state(), StreamState::HasOutput);

        stream.feed("zz");
        assert_eq!(stream.state(), StreamState::HasOutput);

        stream.reset_output();
        assert_eq!(stream.state(), StreamState::HasInput);

        stream.reset();
        assert_eq!(stream.state(), StreamState::Idle);
        assert_eq!(stream.input(), "");
    }

    #[test]
    fn test_actions_update_mode() {
        let mut stream = BinStream::new();
        stream.feed("big-endian oct size[2]");
        assert_eq!(
            *stream.mode(),
            Mode {
                endianness: Endianness::Big,
                base: Base::Octal,
                size: 2,
            }
        );
        assert!(!stream.output_ready());

        stream.reset_modes();
        assert_eq!(*stream.mode(), Mode::default());
    }

    #[test]
    fn test_bad_size_directive_keeps_mode() {
        let mut stream = BinStream::new();
        stream.feed("size[4]\nsize[5]\n");
        assert_eq!(stream.mode().size, 4);
        assert_eq!(stream.diagnostics().len(), 1);
        assert_eq!(stream.diagnostics()[0].kind(), ErrorKind::Value);
    }

    #[test]
    fn test_unknown_action() {
        let mut stream = BinStream::new();
        let err = stream.apply_action("sideways-endian").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::State);
        assert_eq!(*stream.mode(), Mode::default());
    }

    #[test]
    fn test_diagnostics() {
        let mut stream = BinStream::new();
        stream.feed("%q12 dec 12x '\n");
        let kinds: Vec<_> = stream.diagnostics().iter().map(|e| e.kind()).collect();
        assert_eq!(
            kinds,
            vec![ErrorKind::Grammar, ErrorKind::Grammar, ErrorKind::Grammar]
        );
        assert!(!stream.output_ready());

        stream.clear_diagnostics();
        assert!(stream.diagnostics().is_empty());
    }

    #[test]
    fn test_unmatched_quotes_are_stripped() {
        assert!(validate("'abc", Category::String));

        let mut stream = BinStream::new();
        stream.feed("'abc\n\"xy'\n");
        assert!(stream.diagnostics().is_empty());
        assert_eq!(stream.output().unwrap(), b"abxy");

        let mut stream = BinStream::new();
        stream.feed("  '  \n");
        assert_eq!(stream.diagnostics().len(), 1);
        assert_eq!(stream.diagnostics()[0].kind(), ErrorKind::Grammar);
        assert!(matches!(stream.output(), Err(StreamError::NoOutputAvailable)));
    }

    #[test]
    fn test_feed_bytes() {
        let mut stream = BinStream::new();
        stream.feed_bytes(b"'ok'\n01").unwrap();
        assert_eq!(stream.output().unwrap(), b"ok\x01");

        let before = stream.input().to_string();
        assert!(matches!(
            stream.feed_bytes(&[0x30, 0xff, 0x31]),
            Err(StreamError::Utf8(_))
        ));
        assert_eq!(stream.input(), before);
        assert_eq!(stream.output().unwrap(), b"ok\x01");
    }

    #[test]
    fn test_out_of_range() {
        let mut stream = BinStream::new();
        stream.feed("0102");
        assert_eq!(stream.get(1).unwrap(), 0x01);
        assert!(matches!(
            stream.get(2),
            Err(StreamError::OutOfRange { index: 2, len: 2 })
        ));
    }

    #[test]
    fn test_with_config() {
        let config = StreamConfig {
            endianness: Endianness::Big,
            base: Base::Decimal,
            size: 2,
        };
        let mut stream = BinStream::with_config(&config).unwrap();
        stream.feed("1 little-endian hex ff");
        assert_eq!(stream.output().unwrap(), &[0x00, 0x01, 0xff, 0x00]);

        stream.reset();
        assert_eq!(*stream.mode(), Mode::from(&config));

        let bad = StreamConfig {
            size: 16,
            ..StreamConfig::default()
        };
        assert!(matches!(
            BinStream::with_config(&bad),
            Err(StreamError::Config(_))
        ));
    }

    #[test]
    fn test_reader_and_writer() {
        let mut stream = BinStream::new();
        stream.feed_reader("'ab'\n0a".as_bytes()).unwrap();
        let mut sink = Vec::new();
        stream.write_output(&mut sink).unwrap();
        assert_eq!(sink, b"ab\x0a".to_vec());
        assert_eq!(stream.input(), "'ab'\n0a");

        let empty = BinStream::new();
        assert!(matches!(
            empty.write_output(Vec::new()),
            Err(StreamError::NoOutputAvailable)
        ));
    }

    #[test]
    fn test_clone_is_independent() {
        let mut stream = BinStream::new();
        stream.feed("01");
        let mut copy = stream.clone();
        copy.feed("02");
        assert_eq!(stream.output().unwrap(), &[0x01]);
        assert_eq!(copy.output().unwrap(), &[0x01, 0x02]);
    }
}
