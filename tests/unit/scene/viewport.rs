use std::rc::Rc;

use super::*;

#[test]
fn resize_is_seen_on_next_read() {
    let shared = Rc::new(ResizableViewport::new(1024.0));
    let reader: Box<dyn Viewport> = Box::new(Rc::clone(&shared));
    assert_eq!(reader.width(), 1024.0);
    shared.resize(1920.0);
    assert_eq!(reader.width(), 1920.0);
}

#[test]
fn fixed_viewport_reports_its_width() {
    assert_eq!(FixedViewport(1440.0).width(), 1440.0);
}
