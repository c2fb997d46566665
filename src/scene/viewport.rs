use std::cell::Cell;

/// Live viewport metrics supplied by the rendering layer.
pub trait Viewport {
    /// Current viewport width in px.
    fn width(&self) -> f64;
}

/// A viewport whose width never changes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedViewport(pub f64);

impl Viewport for FixedViewport {
    fn width(&self) -> f64 {
        self.0
    }
}

/// A viewport the host can resize in place. Readers only see the new width on
/// their next read; nothing subscribes to changes.
#[derive(Debug, Default)]
pub struct ResizableViewport {
    width: Cell<f64>,
}

impl ResizableViewport {
    pub fn new(width: f64) -> Self {
        Self {
            width: Cell::new(width),
        }
    }

    pub fn resize(&self, width: f64) {
        self.width.set(width);
    }
}

impl Viewport for ResizableViewport {
    fn width(&self) -> f64 {
        self.width.get()
    }
}

impl<V: Viewport + ?Sized> Viewport for std::rc::Rc<V> {
    fn width(&self) -> f64 {
        (**self).width()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/viewport.rs"]
mod tests;
