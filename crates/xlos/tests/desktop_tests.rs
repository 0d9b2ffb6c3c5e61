//! Scenario tests for window stacking, chrome and event routing.

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;
use std::time::Duration;

use chrono::NaiveTime;
use xlos::prelude::*;
use xlos::window::LifecycleState;
use xlos_core::ManualClock;
use xlos_render::{DisplayList, DrawCommand, Point, Rect, Renderer};
use xlos_style::RenderConfig;

/// Events seen by a [`Probe`].
#[derive(Clone, Default)]
struct EventLog(Rc<RefCell<Vec<RawEvent>>>);

impl EventLog {
    fn take(&self) -> Vec<RawEvent> {
        std::mem::take(&mut *self.0.borrow_mut())
    }
}

/// An app that records every event reaching it.
struct Probe(EventLog);

impl App for Probe {
    fn name(&self) -> &str {
        "Probe"
    }

    fn handle_event(&mut self, event: &RawEvent, _content: Rect) -> Option<AppAction> {
        self.0.0.borrow_mut().push(event.clone());
        None
    }

    fn draw(&mut self, _renderer: &mut dyn Renderer, _content: Rect, _config: &RenderConfig) {}
}

struct Fixture {
    desktop: Desktop,
    clock: ManualClock,
    log: EventLog,
}

fn fixture() -> Fixture {
    let clock = ManualClock::new();
    let log = EventLog::default();
    let probe_log = log.clone();
    let registry = builtin_registry().with("Probe", move || Box::new(Probe(probe_log.clone())));
    let desktop = Desktop::with_clock(DesktopConfig::default(), registry, Box::new(clock.clone()));
    Fixture {
        desktop,
        clock,
        log,
    }
}

fn click(desktop: &mut Desktop, x: f32, y: f32) -> Option<DesktopRequest> {
    let request = desktop.handle_event(&RawEvent::pointer_down(x, y));
    desktop.handle_event(&RawEvent::pointer_up(x, y));
    request
}

fn draw(desktop: &mut Desktop) -> DisplayList {
    let mut list = DisplayList::new();
    desktop.draw(&mut list, &RenderConfig::default(), NaiveTime::MIN);
    list
}

fn window_shadows(list: &DisplayList) -> usize {
    list.commands()
        .filter(|c| matches!(c, DrawCommand::Shadow { .. }))
        .count()
}

// The first window cascades to (180, 120) at 520x360, so its title bar
// buttons sit at x = 672 (close), 646 (maximize) and 620 (minimize).
const FIRST_CLOSE: (f32, f32) = (680.0, 130.0);
const FIRST_MAXIMIZE: (f32, f32) = (650.0, 130.0);
const FIRST_MINIMIZE: (f32, f32) = (625.0, 130.0);
// The second window is offset by (16, 12).
const SECOND_MINIMIZE: (f32, f32) = (640.0, 142.0);

// ============================================================================
// Stacking and focus
// ============================================================================

#[test]
fn test_spawn_and_focus_scenario() {
    let Fixture { mut desktop, .. } = fixture();
    assert!(desktop.windows().is_empty());

    let notes = desktop.spawn_window("Notes");
    let sketch = desktop.spawn_window("Sketch");
    assert_eq!(desktop.z_order(), vec![notes, sketch]);
    assert_eq!(desktop.focused(), Some(sketch));

    // Inside Notes but left of the Sketch frame.
    click(&mut desktop, 185.0, 300.0);
    assert_eq!(desktop.z_order(), vec![sketch, notes]);
    assert_eq!(desktop.focused(), Some(notes));
}

#[test]
fn test_z_order_holds_each_open_window_once() {
    let Fixture { mut desktop, .. } = fixture();
    let mut open = Vec::new();
    for name in ["Notes", "Sketch", "Chat", "Snake", "Calculator"] {
        open.push(desktop.spawn_window(name));
    }
    desktop.focus(open[1]);
    desktop.close_window(open[3]);
    desktop.focus(open[0]);
    desktop.close_window(open[1]);
    let late = desktop.spawn_window("TicTacToe");
    desktop.focus(open[2]);
    assert!(!desktop.focus(open[3]));
    assert!(!desktop.close_window(open[1]));

    let order = desktop.z_order();
    let unique: HashSet<_> = order.iter().copied().collect();
    assert_eq!(unique.len(), order.len());
    assert_eq!(
        unique,
        HashSet::from([open[0], open[2], open[4], late])
    );
    assert_eq!(order.last(), Some(&open[2]));
    assert_eq!(desktop.focused(), Some(open[2]));
}

#[test]
fn test_alt_tab_rotates_bottom_to_top() {
    let Fixture { mut desktop, .. } = fixture();
    let a = desktop.spawn_window("Notes");
    let b = desktop.spawn_window("Sketch");
    let c = desktop.spawn_window("Chat");
    desktop.handle_event(&RawEvent::key_with(Key::Tab, KeyboardModifiers::ALT));
    assert_eq!(desktop.z_order(), vec![b, c, a]);

    // Tab without Alt goes to the focused window instead.
    desktop.handle_event(&RawEvent::key(Key::Tab));
    assert_eq!(desktop.z_order(), vec![b, c, a]);
}

// ============================================================================
// Chrome
// ============================================================================

#[test]
fn test_close_via_chrome_scenario() {
    let Fixture { mut desktop, .. } = fixture();
    desktop.spawn_window("Notes");
    assert_eq!(window_shadows(&draw(&mut desktop)), 1);

    click(&mut desktop, FIRST_CLOSE.0, FIRST_CLOSE.1);
    assert!(desktop.windows().is_empty());
    assert!(desktop.taskbar_windows().is_empty());

    let frame = draw(&mut desktop);
    assert_eq!(window_shadows(&frame), 0);
    assert!(frame.contains_text("Start"));
}

#[test]
fn test_chrome_presses_never_reach_the_app() {
    let Fixture {
        mut desktop, log, ..
    } = fixture();
    let id = desktop.spawn_window("Probe");

    // Maximize and restore, then drag by the title bar.
    click(&mut desktop, FIRST_MAXIMIZE.0, FIRST_MAXIMIZE.1);
    assert!(desktop.window(id).unwrap().is_maximized());
    click(&mut desktop, 1222.0, 18.0);
    assert_eq!(
        desktop.window(id).unwrap().frame(),
        Rect::new(180.0, 120.0, 520.0, 360.0)
    );
    desktop.handle_event(&RawEvent::pointer_down(300.0, 130.0));
    desktop.handle_event(&RawEvent::pointer_move(320.0, 150.0));
    desktop.handle_event(&RawEvent::pointer_up(320.0, 150.0));
    assert!(log.take().is_empty());
    assert_eq!(
        desktop.window(id).unwrap().frame().origin,
        Point::new(200.0, 140.0)
    );

    // A content press arrives in desktop coordinates.
    desktop.handle_event(&RawEvent::pointer_down(300.0, 300.0));
    assert_eq!(log.take(), vec![RawEvent::pointer_down(300.0, 300.0)]);
}

#[test]
fn test_maximize_round_trip_restores_frame() {
    let Fixture { mut desktop, .. } = fixture();
    let id = desktop.spawn_window("Notes");
    let before = desktop.window(id).unwrap().frame();

    desktop.toggle_maximize(id);
    assert_eq!(
        desktop.window(id).unwrap().frame(),
        Rect::new(8.0, 8.0, 1264.0, 660.0)
    );
    desktop.toggle_maximize(id);
    assert_eq!(desktop.window(id).unwrap().frame(), before);
    assert_eq!(desktop.window(id).unwrap().lifecycle(), LifecycleState::Normal);
}

#[test]
fn test_minimize_is_idempotent() {
    let Fixture { mut desktop, .. } = fixture();
    let id = desktop.spawn_window("Notes");
    desktop.set_minimized(id, false);
    assert_eq!(desktop.window(id).unwrap().lifecycle(), LifecycleState::Normal);

    desktop.set_minimized(id, true);
    desktop.set_minimized(id, true);
    assert!(desktop.window(id).unwrap().is_minimized());
    assert_eq!(desktop.z_order(), vec![id]);
    assert_eq!(desktop.focused(), None);
}

#[test]
fn test_resize_and_drag_stay_clamped() {
    let Fixture { mut desktop, .. } = fixture();
    let id = desktop.spawn_window("Notes");
    let min = desktop.config().chrome.min_size;
    let far = [
        (-10_000.0, -10_000.0),
        (10_000.0, 10_000.0),
        (-10_000.0, 10_000.0),
        (10_000.0, -10_000.0),
        (640.0, 360.0),
    ];

    for (x, y) in far {
        // Grab the grip in the bottom-right corner.
        let frame = desktop.window(id).unwrap().frame();
        let grip = Point::new(frame.right() - 4.0, frame.bottom() - 4.0);
        desktop.handle_event(&RawEvent::pointer_down(grip.x, grip.y));
        desktop.handle_event(&RawEvent::pointer_move(x, y));
        desktop.handle_event(&RawEvent::pointer_up(x, y));

        // Then drag by the title bar.
        let frame = desktop.window(id).unwrap().frame();
        let title = Point::new(frame.left() + 70.0, frame.top() + 10.0);
        desktop.handle_event(&RawEvent::pointer_down(title.x, title.y));
        desktop.handle_event(&RawEvent::pointer_move(x, y));
        desktop.handle_event(&RawEvent::pointer_up(x, y));

        let frame = desktop.window(id).unwrap().frame();
        assert!(frame.width() >= min.width && frame.height() >= min.height, "{frame:?}");
        assert!(frame.right() >= 60.0 && frame.left() <= 1280.0 - 60.0, "{frame:?}");
        assert!(frame.top() >= 0.0 && frame.top() + 32.0 <= 676.0, "{frame:?}");
    }
}

// ============================================================================
// Taskbar
// ============================================================================

#[test]
fn test_taskbar_button_cycle() {
    let Fixture { mut desktop, .. } = fixture();
    let a = desktop.spawn_window("Notes");
    let b = desktop.spawn_window("Sketch");

    click(&mut desktop, SECOND_MINIMIZE.0, SECOND_MINIMIZE.1);
    assert!(desktop.window(b).unwrap().is_minimized());
    assert_eq!(desktop.focused(), Some(a));

    // Second task button: minimized, so restore and focus.
    click(&mut desktop, 310.0, 690.0);
    assert!(!desktop.window(b).unwrap().is_minimized());
    assert_eq!(desktop.z_order(), vec![a, b]);

    // Focused, so minimize.
    click(&mut desktop, 310.0, 690.0);
    assert!(desktop.window(b).unwrap().is_minimized());

    // First task button: focused once `b` is minimized, so it minimizes too.
    click(&mut desktop, 140.0, 690.0);
    assert!(desktop.window(a).unwrap().is_minimized());
    assert_eq!(desktop.focused(), None);

    // Restoring `a` brings it above `b`.
    click(&mut desktop, 140.0, 690.0);
    assert_eq!(desktop.z_order(), vec![b, a]);
    assert_eq!(desktop.focused(), Some(a));

    // Restoring `b`, then clicking the unfocused `a` only raises it.
    click(&mut desktop, 310.0, 690.0);
    assert_eq!(desktop.focused(), Some(b));
    click(&mut desktop, 140.0, 690.0);
    assert_eq!(desktop.z_order(), vec![b, a]);
    assert!(!desktop.window(a).unwrap().is_minimized());
}

#[test]
fn test_taskbar_keeps_creation_order() {
    let Fixture { mut desktop, .. } = fixture();
    let a = desktop.spawn_window("Notes");
    let b = desktop.spawn_window("Sketch");
    desktop.focus(a);
    let ids: Vec<_> = desktop.taskbar_windows().iter().map(|w| w.id()).collect();
    assert_eq!(ids, vec![a, b]);
}

#[test]
fn test_minimized_window_draws_nothing_but_keeps_task_button() {
    let Fixture { mut desktop, .. } = fixture();
    desktop.spawn_window("Calculator");
    click(&mut desktop, FIRST_MINIMIZE.0, FIRST_MINIMIZE.1);

    let frame = draw(&mut desktop);
    assert_eq!(window_shadows(&frame), 0);
    // Icon label plus task button.
    let labels = frame.texts().into_iter().filter(|t| *t == "Calculator").count();
    assert_eq!(labels, 2);
}

// ============================================================================
// Routing
// ============================================================================

#[test]
fn test_start_button_wins_over_window() {
    let Fixture {
        mut desktop, log, ..
    } = fixture();
    let id = desktop.spawn_window("Probe");

    // Drag the window down and left until it covers the start button.
    desktop.handle_event(&RawEvent::pointer_down(300.0, 130.0));
    desktop.handle_event(&RawEvent::pointer_move(120.0, 410.0));
    desktop.handle_event(&RawEvent::pointer_up(120.0, 410.0));
    let frame = desktop.window(id).unwrap().frame();
    assert_eq!(frame.origin, Point::new(0.0, 400.0));
    assert!(frame.contains(Point::new(20.0, 690.0)));

    desktop.handle_event(&RawEvent::pointer_down(20.0, 690.0));
    assert!(desktop.is_start_menu_open());
    assert!(log.take().is_empty());
}

#[test]
fn test_keys_go_to_focused_window_only() {
    let Fixture {
        mut desktop, log, ..
    } = fixture();
    desktop.spawn_window("Probe");
    desktop.spawn_window("Notes");

    desktop.handle_event(&RawEvent::char('x'));
    assert!(log.take().is_empty());

    click(&mut desktop, SECOND_MINIMIZE.0, SECOND_MINIMIZE.1);
    desktop.handle_event(&RawEvent::char('x'));
    desktop.handle_event(&RawEvent::KeyUp {
        key: Key::Character('x'),
    });
    let events = log.take();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].typed_text(), Some("x"));
}

#[test]
fn test_window_keeps_pointer_until_release() {
    let Fixture {
        mut desktop, log, ..
    } = fixture();
    desktop.spawn_window("Probe");
    desktop.handle_event(&RawEvent::pointer_down(300.0, 300.0));
    desktop.handle_event(&RawEvent::pointer_move(1000.0, 50.0));
    desktop.handle_event(&RawEvent::pointer_up(1000.0, 50.0));
    desktop.handle_event(&RawEvent::pointer_move(1100.0, 60.0));
    assert_eq!(log.take().len(), 3);
}

#[test]
fn test_start_menu_spawns_and_closes() {
    let Fixture { mut desktop, .. } = fixture();
    click(&mut desktop, 20.0, 690.0);
    assert!(desktop.is_start_menu_open());

    // Builtin apps plus the probe: the panel spans y = 188..670 and the
    // second item starts 58 + 44 px below its top.
    let menu = desktop.layout().start_menu(desktop.registry().len());
    assert_eq!(menu, Rect::new(10.0, 188.0, 260.0, 482.0));
    click(&mut desktop, 40.0, 188.0 + 102.0 + 10.0);
    assert!(!desktop.is_start_menu_open());
    assert_eq!(desktop.windows().len(), 1);
    assert_eq!(desktop.windows()[0].title(), "Sketch");

    // A press elsewhere only closes the menu.
    click(&mut desktop, 20.0, 690.0);
    click(&mut desktop, 900.0, 300.0);
    assert!(!desktop.is_start_menu_open());
    assert_eq!(desktop.windows().len(), 1);

    // Escape closes it as well.
    click(&mut desktop, 20.0, 690.0);
    desktop.handle_event(&RawEvent::key(Key::Escape));
    assert!(!desktop.is_start_menu_open());
}

#[test]
fn test_start_menu_press_is_consumed() {
    let Fixture {
        mut desktop, log, ..
    } = fixture();
    desktop.spawn_window("Probe");
    click(&mut desktop, 20.0, 690.0);
    // Inside the probe's content, outside the menu.
    click(&mut desktop, 400.0, 300.0);
    assert!(!desktop.is_start_menu_open());
    assert!(log.take().is_empty());
}

#[test]
fn test_start_menu_header_press_keeps_menu_open() {
    let Fixture {
        mut desktop, log, ..
    } = fixture();
    desktop.spawn_window("Probe");
    click(&mut desktop, 20.0, 690.0);

    // The header band above the first item.
    click(&mut desktop, 30.0, 208.0);
    assert!(desktop.is_start_menu_open());
    assert_eq!(desktop.windows().len(), 1);
    assert!(!desktop.is_power_dialog_open());
    assert!(log.take().is_empty());

    click(&mut desktop, 900.0, 300.0);
    assert!(!desktop.is_start_menu_open());
}

// ============================================================================
// Icons
// ============================================================================

#[test]
fn test_double_click_spawns_exactly_one_window() {
    let Fixture {
        mut desktop, clock, ..
    } = fixture();
    click(&mut desktop, 30.0, 30.0);
    clock.advance(Duration::from_millis(200));
    click(&mut desktop, 30.0, 30.0);
    assert_eq!(desktop.windows().len(), 1);
    assert_eq!(desktop.windows()[0].title(), "Notes");

    // A third click starts a new pair rather than spawning again.
    clock.advance(Duration::from_millis(100));
    click(&mut desktop, 30.0, 30.0);
    assert_eq!(desktop.windows().len(), 1);
}

#[test]
fn test_slow_clicks_drag_instead_of_spawning() {
    let Fixture {
        mut desktop, clock, ..
    } = fixture();
    desktop.handle_event(&RawEvent::pointer_down(30.0, 30.0));
    desktop.handle_event(&RawEvent::pointer_move(40.0, 45.0));
    desktop.handle_event(&RawEvent::pointer_up(40.0, 45.0));
    assert_eq!(desktop.icons()[0].rect.origin, Point::new(34.0, 39.0));

    clock.advance(Duration::from_millis(400));
    desktop.handle_event(&RawEvent::pointer_down(40.0, 45.0));
    desktop.handle_event(&RawEvent::pointer_move(50.0, 45.0));
    desktop.handle_event(&RawEvent::pointer_up(50.0, 45.0));

    assert!(desktop.windows().is_empty());
    assert_eq!(desktop.icons()[0].rect.origin, Point::new(44.0, 39.0));
}

#[test]
fn test_icon_under_window_is_not_hit() {
    let Fixture {
        mut desktop, clock, ..
    } = fixture();
    let id = desktop.spawn_window("Notes");
    // Drag the window over the icon grid.
    desktop.handle_event(&RawEvent::pointer_down(300.0, 130.0));
    desktop.handle_event(&RawEvent::pointer_move(120.0, 20.0));
    desktop.handle_event(&RawEvent::pointer_up(120.0, 20.0));
    assert_eq!(desktop.window(id).unwrap().frame().origin, Point::new(0.0, 10.0));

    click(&mut desktop, 30.0, 60.0);
    clock.advance(Duration::from_millis(50));
    click(&mut desktop, 30.0, 60.0);
    assert_eq!(desktop.windows().len(), 1);
}

// ============================================================================
// Power dialog and sleep
// ============================================================================

fn open_power_dialog(desktop: &mut Desktop) {
    click(desktop, 20.0, 690.0);
    let menu = desktop.layout().start_menu(desktop.registry().len());
    let power = desktop.layout().power_button(menu);
    click(desktop, power.left() + 10.0, power.top() + 10.0);
    assert!(desktop.is_power_dialog_open());
    assert!(!desktop.is_start_menu_open());
}

#[test]
fn test_power_dialog_is_modal() {
    let Fixture { mut desktop, .. } = fixture();
    let id = desktop.spawn_window("Notes");
    open_power_dialog(&mut desktop);

    click(&mut desktop, 20.0, 690.0);
    click(&mut desktop, FIRST_CLOSE.0, FIRST_CLOSE.1);
    assert!(desktop.is_power_dialog_open());
    assert!(!desktop.is_start_menu_open());
    assert!(desktop.window(id).is_some());

    let frame = draw(&mut desktop);
    assert!(frame.position_of_text("Shutdown") > frame.position_of_text("Start"));
}

#[test]
fn test_power_cancel_and_escape() {
    let Fixture { mut desktop, .. } = fixture();
    desktop.spawn_window("Notes");

    open_power_dialog(&mut desktop);
    assert_eq!(click(&mut desktop, 780.0, 350.0), None);
    assert!(!desktop.is_power_dialog_open());

    open_power_dialog(&mut desktop);
    desktop.handle_event(&RawEvent::key(Key::Escape));
    assert!(!desktop.is_power_dialog_open());
    assert_eq!(desktop.windows().len(), 1);
}

#[test]
fn test_power_shutdown_requests_exit() {
    let Fixture { mut desktop, .. } = fixture();
    open_power_dialog(&mut desktop);
    let request = desktop.handle_event(&RawEvent::pointer_down(470.0, 350.0));
    assert_eq!(request, Some(DesktopRequest::Shutdown));
}

#[test]
fn test_power_restart_respawns_welcome_window() {
    let Fixture { mut desktop, .. } = fixture();
    let old: Vec<_> = ["Notes", "Sketch", "Chat"]
        .into_iter()
        .map(|name| desktop.spawn_window(name))
        .collect();
    open_power_dialog(&mut desktop);
    click(&mut desktop, 570.0, 350.0);

    assert!(!desktop.is_power_dialog_open());
    assert_eq!(desktop.windows().len(), 1);
    let welcome = &desktop.windows()[0];
    assert_eq!(welcome.title(), "Notes");
    assert_eq!(welcome.frame(), Rect::new(180.0, 120.0, 540.0, 420.0));
    assert!(old.iter().all(|id| *id < welcome.id()));
}

#[test]
fn test_power_sleep_and_wake() {
    let Fixture { mut desktop, .. } = fixture();
    let a = desktop.spawn_window("Notes");
    let b = desktop.spawn_window("Sketch");
    open_power_dialog(&mut desktop);
    click(&mut desktop, 670.0, 350.0);

    assert!(desktop.is_sleeping());
    assert!(desktop.windows().iter().all(|w| w.is_minimized()));
    let frame = draw(&mut desktop);
    assert!(frame.contains_text("Sleeping"));
    assert!(!frame.contains_text("Start"));

    // Motion does not wake; the waking key is swallowed.
    desktop.handle_event(&RawEvent::pointer_move(300.0, 300.0));
    assert!(desktop.is_sleeping());
    desktop.handle_event(&RawEvent::char('q'));
    assert!(!desktop.is_sleeping());
    assert_eq!(desktop.focused(), None);
    assert_eq!(desktop.z_order(), vec![a, b]);

    click(&mut desktop, 140.0, 690.0);
    assert_eq!(desktop.focused(), Some(a));
}

#[test]
fn test_quit_is_reported() {
    let Fixture { mut desktop, .. } = fixture();
    assert_eq!(
        desktop.handle_event(&RawEvent::Quit),
        Some(DesktopRequest::Quit)
    );
}
