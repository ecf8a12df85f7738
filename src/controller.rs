//! The serial command loop.
//!
//! [`Controller`] owns the byte source, the clock, the line reader, the
//! renderer and the single [`Command`] record reused for every line. Each
//! [`Controller::poll`] call reads at most one line, parses it, and renders it
//! before returning, so a command is always fully drawn before the next
//! command's bytes are read.
//!
//! # Example
//! ```rust
//! use core::convert::Infallible;
//!
//! use embedded_graphics::mock_display::MockDisplay;
//! use embedded_graphics::pixelcolor::Rgb565;
//! use embedded_graphics::prelude::*;
//! use hub75_illuminator::command::CommandKind;
//! use hub75_illuminator::controller::{Controller, Outcome};
//! use hub75_illuminator::panel::GraphicsPanel;
//! use hub75_illuminator::reader::ByteSource;
//!
//! struct Bytes(&'static [u8]);
//!
//! impl ByteSource for Bytes {
//!     type Error = Infallible;
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
//! let mut display = MockDisplay::<Rgb565>::new();
//! display.set_allow_overdraw(true);
//!
//! let mut controller: Controller<_, _, _, 64, 64> =
//!     Controller::new(Bytes(b"fill 100 B\n"), || 0u32, GraphicsPanel::new(display));
//!
//! let outcome = controller.poll().unwrap();
//! assert_eq!(outcome, Some(Outcome::Rendered(CommandKind::Fill)));
//! assert_eq!(
//!     controller.renderer().panel().inner().get_pixel(Point::new(5, 5)),
//!     Some(Rgb565::BLUE)
//! );
//! ```

use core::fmt;

use crate::command::{Command, CommandError, CommandKind};
use crate::panel::PanelSurface;
use crate::parser::parse_into;
use crate::reader::{ByteSource, Clock, LineReader, ReaderConfig};
use crate::render::Renderer;
use crate::LINE_CAPACITY;

/// What happened to a completed line
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Outcome {
    /// The command was drawn
    Rendered(CommandKind),
    /// `help` was received; the application may print
    /// [`HELP_TEXT`](crate::command::HELP_TEXT)
    Help,
    /// The line was dropped. Carries the diagnostic when there is one;
    /// argument errors have none.
    Rejected(Option<CommandError>),
}

/// Failure of a collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<S, P> {
    /// The byte source failed
    Source(S),
    /// The panel failed
    Panel(P),
}

impl<S: fmt::Debug, P: fmt::Debug> fmt::Display for Error<S, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Source(e) => write!(f, "byte source error: {e:?}"),
            Self::Panel(e) => write!(f, "panel error: {e:?}"),
        }
    }
}

/// Poll-driven command interpreter
///
/// # Type Parameters
///
/// * `S` - Serial byte source
/// * `C` - Millisecond clock
/// * `P` - Panel the commands draw on
/// * `COLS` - Number of columns in the display
/// * `ROWS` - Number of rows in the display
/// * `N` - Line buffer capacity in bytes
#[derive(Debug)]
pub struct Controller<S, C, P, const COLS: usize, const ROWS: usize, const N: usize = LINE_CAPACITY>
{
    source: S,
    clock: C,
    reader: LineReader<N>,
    renderer: Renderer<P, COLS, ROWS>,
    command: Command,
}

impl<S, C, P, const COLS: usize, const ROWS: usize, const N: usize>
    Controller<S, C, P, COLS, ROWS, N>
where
    S: ByteSource,
    C: Clock,
    P: PanelSurface,
{
    /// Controller with the default line settings
    pub fn new(source: S, clock: C, panel: P) -> Self {
        Self::with_config(source, clock, panel, ReaderConfig::default())
    }

    /// Controller with explicit line settings
    pub fn with_config(source: S, clock: C, panel: P, config: ReaderConfig) -> Self {
        Self {
            source,
            clock,
            reader: LineReader::with_config(config),
            renderer: Renderer::new(panel),
            command: Command::new(),
        }
    }

    /// Process at most one line.
    ///
    /// Returns `Ok(None)` while no line is complete. Rejected lines are
    /// dropped without drawing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Source`] if reading fails and [`Error::Panel`] if
    /// drawing fails. The controller stays usable either way.
    pub fn poll(&mut self) -> Result<Option<Outcome>, Error<S::Error, P::Error>> {
        let Some(line) = self
            .reader
            .poll(&mut self.source, &self.clock)
            .map_err(Error::Source)?
        else {
            return Ok(None);
        };

        #[cfg(feature = "defmt")]
        defmt::debug!("line: {=[u8]:a}", &line[..]);

        parse_into(&line, &mut self.command);

        if !self.command.is_valid {
            #[cfg(feature = "defmt")]
            defmt::warn!("rejected line: {}", self.command.error);
            return Ok(Some(Outcome::Rejected(self.command.error.clone())));
        }

        self.renderer.render(&self.command).map_err(Error::Panel)?;

        #[cfg(feature = "defmt")]
        defmt::debug!("rendered {}", self.command);

        Ok(Some(match self.command.kind {
            CommandKind::Help => Outcome::Help,
            kind => Outcome::Rendered(kind),
        }))
    }

    /// The most recently parsed command
    pub const fn command(&self) -> &Command {
        &self.command
    }

    /// The line reader
    pub const fn reader(&self) -> &LineReader<N> {
        &self.reader
    }

    /// The renderer
    pub const fn renderer(&self) -> &Renderer<P, COLS, ROWS> {
        &self.renderer
    }

    /// The renderer, mutably. Used to draw bitmap patterns between commands.
    pub fn renderer_mut(&mut self) -> &mut Renderer<P, COLS, ROWS> {
        &mut self.renderer
    }

    /// Take the collaborators back
    pub fn into_parts(self) -> (S, C, P) {
        (self.source, self.clock, self.renderer.into_inner())
    }
}
