//! Drawing surface the commands render onto.
//!
//! [`PanelSurface`] is the small set of primitives the renderer needs. Any
//! `embedded-graphics` [`DrawTarget`] (a HUB75 DMA framebuffer, a simulator
//! window, a mock display) can be used through [`GraphicsPanel`].
//!
//! Coordinates are pixels with the origin at the top-left corner. Shapes may
//! extend past the panel edges; the draw target clips them.

use embedded_graphics::draw_target::DrawTarget;
use embedded_graphics::prelude::{Point, Primitive, Size};
use embedded_graphics::primitives::{Circle, PrimitiveStyle, Rectangle};
use embedded_graphics::{Drawable, Pixel};

use crate::color::{Color, OFF};

/// Primitive drawing operations of the LED panel
pub trait PanelSurface {
    /// Driver error
    type Error;

    /// Turn every pixel off
    fn clear(&mut self) -> Result<(), Self::Error>;

    /// Set a single pixel
    fn draw_point(&mut self, x: i32, y: i32, color: Color) -> Result<(), Self::Error>;

    /// Set every pixel
    fn fill_all(&mut self, color: Color) -> Result<(), Self::Error>;

    /// Fill the disc of radius `r` around `(x, y)`, `2r + 1` pixels across.
    /// A negative radius draws nothing.
    fn fill_circle(&mut self, x: i32, y: i32, r: i32, color: Color) -> Result<(), Self::Error>;

    /// Fill a `w` × `h` rectangle whose top-left corner is `(x, y)`. Empty or
    /// negative sizes draw nothing.
    fn fill_rect(
        &mut self,
        x: i32,
        y: i32,
        w: i32,
        h: i32,
        color: Color,
    ) -> Result<(), Self::Error>;
}

/// [`PanelSurface`] over an `embedded-graphics` draw target.
///
/// The target may use any color type convertible from RGB565, e.g. the
/// `Rgb888` of HUB75 framebuffers.
///
/// # Example
/// ```rust
/// use embedded_graphics::mock_display::MockDisplay;
/// use embedded_graphics::pixelcolor::Rgb565;
/// use embedded_graphics::prelude::*;
/// use hub75_illuminator::color::color_from_level;
/// use hub75_illuminator::panel::{GraphicsPanel, PanelSurface};
///
/// let mut display = MockDisplay::<Rgb565>::new();
/// display.set_allow_overdraw(true);
///
/// let mut panel = GraphicsPanel::new(display);
/// panel.clear().unwrap();
/// panel.draw_point(3, 4, color_from_level('R', 100)).unwrap();
///
/// assert_eq!(panel.inner().get_pixel(Point::new(3, 4)), Some(Rgb565::RED));
/// ```
#[derive(Debug)]
pub struct GraphicsPanel<D> {
    target: D,
}

impl<D> GraphicsPanel<D> {
    /// Wrap a draw target
    pub const fn new(target: D) -> Self {
        Self { target }
    }

    /// The wrapped draw target
    pub const fn inner(&self) -> &D {
        &self.target
    }

    /// The wrapped draw target, mutably
    pub fn inner_mut(&mut self) -> &mut D {
        &mut self.target
    }

    /// Give the draw target back
    pub fn into_inner(self) -> D {
        self.target
    }
}

/// `2r + 1`, or `None` for a negative or oversized radius
fn diameter(r: i32) -> Option<u32> {
    u32::try_from(r)
        .ok()
        .and_then(|r| r.checked_mul(2))
        .and_then(|d| d.checked_add(1))
}

impl<D> PanelSurface for GraphicsPanel<D>
where
    D: DrawTarget,
    D::Color: From<Color>,
{
    type Error = D::Error;

    fn clear(&mut self) -> Result<(), Self::Error> {
        self.target.clear(OFF.into())
    }

    fn draw_point(&mut self, x: i32, y: i32, color: Color) -> Result<(), Self::Error> {
        let color: D::Color = color.into();
        Pixel(Point::new(x, y), color).draw(&mut self.target)
    }

    fn fill_all(&mut self, color: Color) -> Result<(), Self::Error> {
        self.target.clear(color.into())
    }

    fn fill_circle(&mut self, x: i32, y: i32, r: i32, color: Color) -> Result<(), Self::Error> {
        let Some(diameter) = diameter(r) else {
            return Ok(());
        };
        let color: D::Color = color.into();
        Circle::with_center(Point::new(x, y), diameter)
            .into_styled(PrimitiveStyle::with_fill(color))
            .draw(&mut self.target)
    }

    fn fill_rect(
        &mut self,
        x: i32,
        y: i32,
        w: i32,
        h: i32,
        color: Color,
    ) -> Result<(), Self::Error> {
        let (Ok(w), Ok(h)) = (u32::try_from(w), u32::try_from(h)) else {
            return Ok(());
        };
        let area = Rectangle::new(Point::new(x, y), Size::new(w, h));
        self.target.fill_solid(&area, color.into())
    }
}
