//! Command rendering.
//!
//! [`Renderer`] turns a parsed [`Command`] into draw calls on a
//! [`PanelSurface`]. Every command starts from a cleared panel; nothing is
//! drawn incrementally.
//!
//! Field commands ignore the `x`/`y` they were given and center on the panel.
//! Their radius is clipped so the disc never extends past the nearer panel
//! edge:
//!
//! | Command       | Drawing                                              |
//! |---------------|------------------------------------------------------|
//! | `draw`        | one pixel at `(x, y)`                                |
//! | `fill`        | whole panel                                          |
//! | `brightfield` | disc                                                 |
//! | `darkfield`   | whole panel, then the disc blanked                   |
//! | `phaseTop`    | disc with the lower half blanked                     |
//! | `phaseBottom` | disc with the upper half blanked                     |
//! | `phaseRight`  | disc with the left half blanked                      |
//! | `phaseLeft`   | disc with the right half blanked                     |
//! | `help`        | nothing                                              |
//!
//! # Example
//! ```rust
//! use embedded_graphics::mock_display::MockDisplay;
//! use embedded_graphics::pixelcolor::Rgb565;
//! use embedded_graphics::prelude::*;
//! use hub75_illuminator::command::Command;
//! use hub75_illuminator::panel::GraphicsPanel;
//! use hub75_illuminator::render::Renderer;
//!
//! let mut display = MockDisplay::<Rgb565>::new();
//! display.set_allow_overdraw(true);
//!
//! // A 64x32 panel
//! let mut renderer = Renderer::<_, 64, 32>::new(GraphicsPanel::new(display));
//! renderer.render(&Command::parse(b"brightfield 0 0 4 100 R\n")).unwrap();
//!
//! let display = renderer.into_inner().into_inner();
//! assert_eq!(display.get_pixel(Point::new(32, 16)), Some(Rgb565::RED));
//! assert_eq!(display.get_pixel(Point::new(32, 21)), Some(Rgb565::BLACK));
//! ```

use crate::color::{color_from_level, Color, OFF};
use crate::command::{Command, CommandKind};
use crate::panel::PanelSurface;

/// Side length of a bitmap [`Pattern`]
pub const PATTERN_SIZE: usize = 8;

/// 8×8 bitmap; non-zero cells are lit
pub type Pattern = [[u8; PATTERN_SIZE]; PATTERN_SIZE];

/// Limit a radius to the distance from the center to the nearer edge.
///
/// Never grows `r`. Negative radii pass through unchanged.
#[must_use]
pub const fn clip_radius(r: i32, bound_x: i32, bound_y: i32) -> i32 {
    let max = if bound_x < bound_y { bound_x } else { bound_y };
    if r > max {
        max
    } else {
        r
    }
}

/// Renders commands onto a panel of `COLS` × `ROWS` pixels
///
/// # Type Parameters
///
/// * `P` - Panel the commands draw on
/// * `COLS` - Number of columns in the display
/// * `ROWS` - Number of rows in the display
#[derive(Debug)]
pub struct Renderer<P, const COLS: usize, const ROWS: usize> {
    panel: P,
}

impl<P, const COLS: usize, const ROWS: usize> Renderer<P, COLS, ROWS> {
    /// Center pixel of the panel
    pub const CENTER: (i32, i32) = ((COLS / 2) as i32, (ROWS / 2) as i32);

    /// Renderer drawing on `panel`
    pub const fn new(panel: P) -> Self {
        Self { panel }
    }

    /// The panel
    pub const fn panel(&self) -> &P {
        &self.panel
    }

    /// The panel, mutably
    pub fn panel_mut(&mut self) -> &mut P {
        &mut self.panel
    }

    /// Give the panel back
    pub fn into_inner(self) -> P {
        self.panel
    }
}

impl<P: PanelSurface, const COLS: usize, const ROWS: usize> Renderer<P, COLS, ROWS> {
    /// Draw `command` from a cleared panel.
    ///
    /// The command is not checked for validity; callers drop invalid ones.
    ///
    /// # Errors
    ///
    /// Propagates panel errors. Drawing stops at the first failing call.
    pub fn render(&mut self, command: &Command) -> Result<(), P::Error> {
        let color = color_from_level(command.color, command.level);
        match command.kind {
            CommandKind::Draw => {
                self.panel.clear()?;
                self.panel.draw_point(command.x, command.y, color)
            }
            CommandKind::Fill => {
                self.panel.clear()?;
                self.panel.fill_all(color)
            }
            CommandKind::Brightfield => {
                self.panel.clear()?;
                let (x, y, r) = Self::disc(command.radius);
                self.panel.fill_circle(x, y, r, color)
            }
            CommandKind::Darkfield => {
                self.panel.clear()?;
                let (x, y, r) = Self::disc(command.radius);
                self.panel.fill_all(color)?;
                self.panel.fill_circle(x, y, r, OFF)
            }
            CommandKind::PhaseTop
            | CommandKind::PhaseBottom
            | CommandKind::PhaseRight
            | CommandKind::PhaseLeft => self.half_disc(command.kind, command.radius, color),
            CommandKind::Help => Ok(()),
        }
    }

    /// Draw a bitmap centered on a cleared panel.
    ///
    /// # Errors
    ///
    /// Propagates panel errors.
    pub fn draw_pattern(&mut self, pattern: &Pattern, tag: char, level: i32) -> Result<(), P::Error> {
        self.panel.clear()?;

        let start_x = (COLS as i32 - PATTERN_SIZE as i32) / 2;
        let start_y = (ROWS as i32 - PATTERN_SIZE as i32) / 2;
        let color = color_from_level(tag, level);

        for (row, cells) in (0i32..).zip(pattern.iter()) {
            for (col, &cell) in (0i32..).zip(cells.iter()) {
                if cell != 0 {
                    self.panel.draw_point(start_x + col, start_y + row, color)?;
                }
            }
        }
        Ok(())
    }

    /// Center and clipped radius of a field disc
    const fn disc(radius: i32) -> (i32, i32, i32) {
        let (x, y) = Self::CENTER;
        (x, y, clip_radius(radius, x, y))
    }

    /// Disc with the half opposite to the named side blanked by a
    /// `(2r + 1)` × `(r + 1)` rectangle that includes the center line
    fn half_disc(&mut self, kind: CommandKind, radius: i32, color: Color) -> Result<(), P::Error> {
        self.panel.clear()?;
        let (x, y, r) = Self::disc(radius);
        self.panel.fill_circle(x, y, r, color)?;

        // Radii come straight from the wire and may be anywhere in `i32`.
        let span = r.saturating_mul(2).saturating_add(1);
        let half = r.saturating_add(1);
        let left = x.saturating_sub(r);
        let top = y.saturating_sub(r);
        match kind {
            CommandKind::PhaseTop => self.panel.fill_rect(left, y, span, half, OFF),
            CommandKind::PhaseBottom => self.panel.fill_rect(left, top, span, half, OFF),
            CommandKind::PhaseRight => self.panel.fill_rect(left, top, half, span, OFF),
            CommandKind::PhaseLeft => self.panel.fill_rect(x, top, half, span, OFF),
            _ => Ok(()),
        }
    }
}
