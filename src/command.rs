//! Typed command record produced by the parser.

use core::fmt;

use crate::color::DEFAULT_TAG;
use crate::LINE_CAPACITY;

/// Text returned for the `help` command.
///
/// The interpreter itself never answers on the serial link; applications that
/// have a response channel print this when a [`CommandKind::Help`] arrives.
pub const HELP_TEXT: &str = "\
Commands (case-insensitive verb, newline terminated, color R|G|B defaults to G):
  draw <x> <y> <level> [color]
  fill <level> [color]
  brightfield <x> <y> <radius> <level> [color]
  darkfield <x> <y> <radius> <level> [color]
  phaseTop <x> <y> <radius> <level> [color]
  phaseBottom <x> <y> <radius> <level> [color]
  phaseRight <x> <y> <radius> <level> [color]
  phaseLeft <x> <y> <radius> <level> [color]
  help
";

/// The set of commands understood by the LED matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandKind {
    /// Light a single pixel
    #[default]
    Draw,
    /// Light the whole panel
    Fill,
    /// Centered disc on a dark background
    Brightfield,
    /// Lit background with a dark centered disc
    Darkfield,
    /// Upper half of the centered disc
    PhaseTop,
    /// Lower half of the centered disc
    PhaseBottom,
    /// Right half of the centered disc
    PhaseRight,
    /// Left half of the centered disc
    PhaseLeft,
    /// Print usage, draws nothing
    Help,
}

impl CommandKind {
    /// Canonical wire spelling of the verb
    #[must_use]
    pub const fn verb(self) -> &'static str {
        match self {
            Self::Draw => "draw",
            Self::Fill => "fill",
            Self::Brightfield => "brightfield",
            Self::Darkfield => "darkfield",
            Self::PhaseTop => "phaseTop",
            Self::PhaseBottom => "phaseBottom",
            Self::PhaseRight => "phaseRight",
            Self::PhaseLeft => "phaseLeft",
            Self::Help => "help",
        }
    }

    /// Whether the command renders a disc centered on the panel
    #[must_use]
    pub const fn is_field(self) -> bool {
        matches!(
            self,
            Self::Brightfield
                | Self::Darkfield
                | Self::PhaseTop
                | Self::PhaseBottom
                | Self::PhaseRight
                | Self::PhaseLeft
        )
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.verb())
    }
}

/// Diagnostic attached to a rejected line.
///
/// Argument grammar failures deliberately carry no diagnostic; see
/// [`Command::error`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// The line did not end with the terminator (malformed, truncated or
    /// completed by the idle timeout)
    NoTerminator,
    /// The verb is not one of the known commands. Holds the verb as received.
    Unrecognized(heapless::String<LINE_CAPACITY>),
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoTerminator => f.write_str("No line terminator found"),
            Self::Unrecognized(verb) => write!(f, "Unrecognized command: {verb}"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for CommandError {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::NoTerminator => defmt::write!(f, "No line terminator found"),
            Self::Unrecognized(verb) => {
                defmt::write!(f, "Unrecognized command: {=str}", verb.as_str());
            }
        }
    }
}

/// Command data after parsing a line.
///
/// Each command uses a non-exclusive subset of the fields. A single record is
/// reused for every line: [`Command::reset`] restores the defaults before the
/// parser fills it in.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Command {
    /// Which command the line named. Set even when the arguments are invalid.
    pub kind: CommandKind,
    /// Pixel column for `draw`; parsed but unused by field commands
    pub x: i32,
    /// Pixel row for `draw`; parsed but unused by field commands
    pub y: i32,
    /// Disc radius for field commands, clipped only when rendering
    pub radius: i32,
    /// Brightness percentage, clamped only when encoding the color
    pub level: i32,
    /// Color tag, `'R'`, `'G'` or `'B'`; anything else renders green
    pub color: char,
    /// Whether the line parsed into a command that may be rendered
    pub is_valid: bool,
    /// Why the line was rejected.
    ///
    /// Only framing and unknown-verb failures set this. A known verb with
    /// missing or malformed arguments leaves `is_valid == false` and
    /// `error == None`.
    pub error: Option<CommandError>,
}

impl Default for Command {
    fn default() -> Self {
        Self::new()
    }
}

impl Command {
    /// A `draw` record with zeroed fields, the green default color and no
    /// validity.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            kind: CommandKind::Draw,
            x: 0,
            y: 0,
            radius: 0,
            level: 0,
            color: DEFAULT_TAG,
            is_valid: false,
            error: None,
        }
    }

    /// Restore the defaults of [`Command::new`].
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Parse a complete line into a fresh record.
    ///
    /// See [`crate::parser::parse_into`].
    #[must_use]
    pub fn parse(line: &[u8]) -> Self {
        let mut command = Self::new();
        crate::parser::parse_into(line, &mut command);
        command
    }
}
