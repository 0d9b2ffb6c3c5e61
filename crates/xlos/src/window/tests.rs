use std::cell::RefCell;
use std::rc::Rc;

use xlos_render::{Color, DisplayList, Point, Rect, Renderer, Size, TextStyle};
use xlos_style::RenderConfig;

use super::*;
use crate::app::{App, AppAction};
use crate::config::{ChromeConfig, DesktopConfig};
use crate::input::RawEvent;

/// Records every event it receives.
struct Probe {
    events: Rc<RefCell<Vec<RawEvent>>>,
    updates: Rc<RefCell<u32>>,
}

impl App for Probe {
    fn name(&self) -> &str {
        "Probe"
    }

    fn handle_event(&mut self, event: &RawEvent, _content: Rect) -> Option<AppAction> {
        self.events.borrow_mut().push(event.clone());
        None
    }

    fn update(&mut self, _content: Rect) {
        *self.updates.borrow_mut() += 1;
    }

    fn draw(&mut self, renderer: &mut dyn Renderer, content: Rect, _config: &RenderConfig) {
        renderer.draw_text(
            "probe-content",
            content.origin,
            &TextStyle::new(12.0, Color::WHITE),
        );
    }
}

struct Harness {
    window: Window,
    events: Rc<RefCell<Vec<RawEvent>>>,
    updates: Rc<RefCell<u32>>,
    bounds: WindowBounds,
}

fn harness() -> Harness {
    let events = Rc::new(RefCell::new(Vec::new()));
    let updates = Rc::new(RefCell::new(0));
    let app = Probe {
        events: events.clone(),
        updates: updates.clone(),
    };
    let window = Window::new(
        WindowId::from_raw(1),
        Box::new(app),
        Rect::new(180.0, 120.0, 520.0, 360.0),
        ChromeConfig::default(),
    );
    Harness {
        window,
        events,
        updates,
        bounds: WindowBounds::new(&DesktopConfig::default(), Size::new(1280.0, 720.0)),
    }
}

#[test]
fn test_window_geometry() {
    let h = harness();
    let w = &h.window;
    assert_eq!(w.title(), "Probe");
    assert_eq!(w.title_bar_rect(), Rect::new(180.0, 120.0, 520.0, 32.0));
    assert_eq!(w.content_rect(), Rect::new(180.0, 152.0, 520.0, 328.0));
    assert_eq!(w.resize_grip_rect(), Rect::new(688.0, 468.0, 12.0, 12.0));
    assert_eq!(
        w.chrome_button_rect(ChromeButton::Close),
        Rect::new(672.0, 126.0, 22.0, 18.0)
    );
    assert_eq!(
        w.chrome_button_rect(ChromeButton::MaximizeToggle),
        Rect::new(646.0, 126.0, 22.0, 18.0)
    );
    assert_eq!(
        w.chrome_button_rect(ChromeButton::Minimize),
        Rect::new(620.0, 126.0, 22.0, 18.0)
    );
}

#[test]
fn test_new_window_respects_minimum_size() {
    let events = Rc::new(RefCell::new(Vec::new()));
    let updates = Rc::new(RefCell::new(0));
    let w = Window::new(
        WindowId::from_raw(9),
        Box::new(Probe { events, updates }),
        Rect::new(0.0, 0.0, 10.0, 10.0),
        ChromeConfig::default(),
    );
    assert_eq!(w.frame().size, Size::new(220.0, 140.0));
}

#[test]
fn test_chrome_hit_testing() {
    let h = harness();
    let w = &h.window;
    assert_eq!(
        w.hit_test_chrome_button(Point::new(680.0, 130.0)),
        Some(ChromeButton::Close)
    );
    assert_eq!(
        w.hit_test_chrome_button(Point::new(650.0, 130.0)),
        Some(ChromeButton::MaximizeToggle)
    );
    assert_eq!(
        w.hit_test_chrome_button(Point::new(625.0, 140.0)),
        Some(ChromeButton::Minimize)
    );
    // Gap between buttons, plain title bar, content.
    assert_eq!(w.hit_test_chrome_button(Point::new(669.0, 130.0)), None);
    assert_eq!(w.hit_test_chrome_button(Point::new(300.0, 130.0)), None);
    assert_eq!(w.hit_test_chrome_button(Point::new(680.0, 200.0)), None);
}

#[test]
fn test_drag_follows_anchor() {
    let mut h = harness();
    assert!(h.window.begin_drag(Point::new(200.0, 130.0)));
    assert_eq!(
        h.window.interaction(),
        Interaction::Dragging {
            anchor: Point::new(20.0, 10.0)
        }
    );
    h.window.update_drag(Point::new(320.0, 230.0), &h.bounds);
    assert_eq!(h.window.frame().origin, Point::new(300.0, 220.0));
    h.window.end_interaction();
    assert_eq!(h.window.interaction(), Interaction::Idle);

    // Updates outside a drag are ignored.
    h.window.update_drag(Point::new(0.0, 0.0), &h.bounds);
    assert_eq!(h.window.frame().origin, Point::new(300.0, 220.0));
}

#[test]
fn test_begin_drag_requires_title_bar() {
    let mut h = harness();
    assert!(!h.window.begin_drag(Point::new(300.0, 300.0)));
    assert!(!h.window.begin_resize(Point::new(300.0, 300.0)));
    assert!(h.window.begin_resize(Point::new(695.0, 475.0)));

    let mut h = harness();
    h.window.set_minimized(true);
    assert!(!h.window.begin_drag(Point::new(200.0, 130.0)));
}

#[test]
fn test_geometry_clamp_with_extreme_pointers() {
    let pointers = [
        Point::new(-1e7, -1e7),
        Point::new(1e7, 1e7),
        Point::new(-1e7, 1e7),
        Point::new(1e7, -1e7),
        Point::new(0.0, 0.0),
        Point::new(640.0, 360.0),
    ];
    for pointer in pointers {
        let mut h = harness();
        h.window.begin_drag(Point::new(200.0, 130.0));
        h.window.update_drag(pointer, &h.bounds);
        let f = h.window.frame();
        assert!(f.left() >= 60.0 - f.width() && f.left() <= 1280.0 - 60.0, "{f:?}");
        assert!(f.top() >= 0.0 && f.top() <= 720.0 - 44.0 - 32.0, "{f:?}");
        h.window.end_interaction();

        h.window.begin_resize(Point::new(
            h.window.frame().right() - 4.0,
            h.window.frame().bottom() - 4.0,
        ));
        h.window.update_resize(pointer, &h.bounds);
        let f = h.window.frame();
        assert!(f.width() >= 220.0 && f.height() >= 140.0, "{f:?}");
        assert!(
            f.width() == 220.0 || f.right() <= 1280.0 - 10.0,
            "{f:?} extends past the screen"
        );
        assert!(
            f.height() == 140.0 || f.bottom() <= 720.0 - 44.0 - 10.0,
            "{f:?} extends under the taskbar"
        );
    }
}

#[test]
fn test_maximize_round_trip() {
    let mut h = harness();
    let before = h.window.frame();

    h.window.toggle_maximize(&h.bounds);
    assert!(h.window.is_maximized());
    assert_eq!(h.window.frame(), Rect::new(8.0, 8.0, 1264.0, 660.0));
    assert_eq!(h.window.pre_maximize_frame(), Some(before));

    h.window.toggle_maximize(&h.bounds);
    assert_eq!(h.window.lifecycle(), LifecycleState::Normal);
    assert_eq!(h.window.frame(), before);
    assert_eq!(h.window.pre_maximize_frame(), None);
}

#[test]
fn test_reclamp_fits_restore_frame_to_smaller_surface() {
    let mut h = harness();
    h.window.toggle_maximize(&h.bounds);

    let small = WindowBounds::new(&DesktopConfig::default(), Size::new(640.0, 480.0));
    h.window.reclamp(&small);
    assert_eq!(h.window.frame(), small.maximized_frame());

    h.window.toggle_maximize(&small);
    let restored = h.window.frame();
    assert!(!h.window.is_maximized());
    assert!(restored.right() <= 640.0, "{restored:?}");
    assert!(restored.bottom() <= small.usable_height(), "{restored:?}");
}

#[test]
fn test_minimize_idempotence() {
    let mut h = harness();
    h.window.set_minimized(false);
    assert_eq!(h.window.lifecycle(), LifecycleState::Normal);

    h.window.set_minimized(true);
    h.window.set_minimized(true);
    assert_eq!(h.window.lifecycle(), LifecycleState::Minimized);

    // Maximize is ignored while minimized.
    let frame = h.window.frame();
    h.window.toggle_maximize(&h.bounds);
    assert_eq!(h.window.frame(), frame);
    assert!(h.window.is_minimized());
}

#[test]
fn test_minimized_maximized_window_restores_maximized() {
    let mut h = harness();
    let before = h.window.frame();
    h.window.toggle_maximize(&h.bounds);
    h.window.set_minimized(true);
    h.window.set_minimized(false);
    assert!(h.window.is_maximized());
    h.window.toggle_maximize(&h.bounds);
    assert_eq!(h.window.frame(), before);
}

#[test]
fn test_dispatch_chrome_press_not_forwarded() {
    let mut h = harness();
    h.window
        .dispatch(&RawEvent::pointer_down(680.0, 130.0), &h.bounds);
    assert!(h.events.borrow().is_empty());
    assert_eq!(h.window.interaction(), Interaction::Idle);
}

#[test]
fn test_dispatch_drag_sequence_consumed() {
    let mut h = harness();
    h.window
        .dispatch(&RawEvent::pointer_down(200.0, 130.0), &h.bounds);
    h.window
        .dispatch(&RawEvent::pointer_move(250.0, 180.0), &h.bounds);
    h.window
        .dispatch(&RawEvent::pointer_up(250.0, 180.0), &h.bounds);

    assert!(h.events.borrow().is_empty());
    assert_eq!(h.window.frame().origin, Point::new(230.0, 170.0));
    assert!(!h.window.is_interacting());

    // The next release is an ordinary event again.
    h.window
        .dispatch(&RawEvent::pointer_up(300.0, 300.0), &h.bounds);
    assert_eq!(h.events.borrow().len(), 1);
}

#[test]
fn test_dispatch_content_events_forwarded() {
    let mut h = harness();
    h.window
        .dispatch(&RawEvent::pointer_down(300.0, 300.0), &h.bounds);
    h.window.dispatch(&RawEvent::char('a'), &h.bounds);
    assert_eq!(
        *h.events.borrow(),
        vec![RawEvent::pointer_down(300.0, 300.0), RawEvent::char('a')]
    );

    h.window.set_minimized(true);
    h.window.dispatch(&RawEvent::char('b'), &h.bounds);
    assert_eq!(h.events.borrow().len(), 2);
}

#[test]
fn test_render_clips_app_to_content() {
    let mut h = harness();
    let mut list = DisplayList::new();
    list.begin_frame(Color::BLACK, Size::new(1280.0, 720.0));
    h.window.render(&mut list, &RenderConfig::default(), true);

    assert!(list.contains_text("Probe"));
    let item = list.find_text("probe-content").unwrap();
    assert_eq!(item.clip, Some(h.window.content_rect()));
    assert_eq!(*h.updates.borrow(), 1);
    // Clip is restored for the grip drawn afterwards.
    assert_eq!(list.items().last().unwrap().clip, None);
}

#[test]
fn test_render_minimized_draws_nothing() {
    let mut h = harness();
    h.window.set_minimized(true);
    let mut list = DisplayList::new();
    list.begin_frame(Color::BLACK, Size::new(1280.0, 720.0));
    h.window.render(&mut list, &RenderConfig::default(), true);
    assert_eq!(list.len(), 1);
    assert_eq!(*h.updates.borrow(), 0);
}
