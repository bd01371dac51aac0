//! End-to-end exercise of `Application`'s backend-independent per-iteration
//! contract: deferred window destruction, resize coalescing, and UI-queue
//! drain ordering, against whatever real backend this target compiles in.
//!
//! These tests open a real display and so are skipped (not failed) if none
//! is available, matching the guard already used by `app`'s own unit test:
//! a headless CI runner with no X/Wayland/compositor socket should not turn
//! this into a false failure.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use winshim::event::{Action, MouseButton, MOUSE_POINTER_ID};
use winshim::{Application, GuiContext, GuiEvent, Updater, WindowId, WindowParams};
use winshim::dpi::LogicalSize;

struct RecordingGui {
    renders: Arc<AtomicU32>,
    last_viewport: Arc<std::sync::Mutex<Option<LogicalSize<u32>>>>,
    closes: Arc<AtomicU32>,
    /// Every `GuiEvent::MouseButton` delivered, in delivery order, as
    /// `(action, button)` pairs.
    mouse_buttons: Arc<Mutex<Vec<(Action, MouseButton)>>>,
}

impl RecordingGui {
    fn new() -> Self {
        Self {
            renders: Arc::new(AtomicU32::new(0)),
            last_viewport: Arc::new(Mutex::new(None)),
            closes: Arc::new(AtomicU32::new(0)),
            mouse_buttons: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl GuiContext for RecordingGui {
    fn render(&mut self) {
        self.renders.fetch_add(1, Ordering::SeqCst);
    }

    fn set_viewport(&mut self, size: LogicalSize<u32>) {
        *self.last_viewport.lock().unwrap() = Some(size);
    }

    fn handle_event(&mut self, _window: WindowId, event: GuiEvent<'_>) {
        match event {
            GuiEvent::Close => {
                self.closes.fetch_add(1, Ordering::SeqCst);
            }
            GuiEvent::MouseButton { action, button, .. } => {
                self.mouse_buttons.lock().unwrap().push((action, button));
            }
            _ => {}
        }
    }
}

struct NeverTicksUpdater;

impl Updater for NeverTicksUpdater {
    fn update(&mut self) -> u32 {
        u32::MAX
    }
}

fn try_make_app() -> Option<Application> {
    Application::new("winshim-integration-test", Box::new(NeverTicksUpdater)).ok()
}

#[test]
fn destroyed_window_stops_receiving_events_immediately() {
    let Some(mut app) = try_make_app() else {
        return;
    };

    let gui = RecordingGui::new();
    let closes = gui.closes.clone();
    let gui = Box::new(gui);

    let Ok(id) = app.make_window(WindowParams::default(), gui) else {
        return;
    };

    assert!(app.contains_window(id));

    // Single-window backends refuse destruction outright; that is itself
    // the contract being exercised there.
    match app.destroy_window(id) {
        Ok(()) => {
            assert!(!app.contains_window(id));
            app.dispatch_event(id, GuiEvent::Close);
            assert_eq!(closes.load(Ordering::SeqCst), 0);

            app.drop_deferred_windows();
            assert!(!app.contains_window(id));
        }
        Err(winshim::Error::WindowDestructionNotAllowed) => {}
        Err(other) => panic!("unexpected destroy_window error: {other:?}"),
    }
}

#[test]
fn resize_coalescing_applies_only_the_latest_size() {
    let Some(mut app) = try_make_app() else {
        return;
    };

    let gui = RecordingGui::new();
    let last_viewport = gui.last_viewport.clone();
    let gui = Box::new(gui);

    let Ok(id) = app.make_window(WindowParams::default(), gui) else {
        return;
    };

    app.coalesce_resize(id, LogicalSize::new(100, 100));
    app.coalesce_resize(id, LogicalSize::new(200, 150));
    app.apply_coalesced_resizes();

    assert_eq!(*last_viewport.lock().unwrap(), Some(LogicalSize::new(200, 150)));
}

#[test]
fn ui_queue_tasks_run_on_the_calling_thread_in_fifo_order() {
    let Some(app) = try_make_app() else {
        return;
    };

    let order = Arc::new(std::sync::Mutex::new(Vec::new()));
    let sender = app.ui_thread_sender();
    for i in 0..3 {
        let order = order.clone();
        sender.post(move || order.lock().unwrap().push(i));
    }

    let mut app = app;
    app.drain_ui_queue();
    assert_eq!(*order.lock().unwrap(), vec![0, 1, 2]);
}

#[test]
fn quit_is_observed_after_being_set() {
    let Some(app) = try_make_app() else {
        return;
    };

    assert!(!app.should_quit());
    app.quit();
    assert!(app.should_quit());
}

#[test]
fn quit_wakes_a_blocked_event_loop() {
    let Some(mut app) = try_make_app() else {
        return;
    };

    let quit_flag = app.quit_flag();
    let sender = app.ui_thread_sender();
    std::thread::spawn(move || {
        std::thread::sleep(std::time::Duration::from_millis(200));
        quit_flag.store(true, Ordering::SeqCst);
        // Mirrors what `Application::quit` itself does: the flag alone
        // doesn't wake a thread blocked in the backend's native wait, the
        // accompanying wakeup does.
        sender.post(|| {});
    });

    // `run` blocks in the backend's native wait primitive; if the waker
    // fixed here didn't actually reach it, this call would hang forever
    // instead of observing the flag set from the other thread.
    let exit_code = app.run();
    assert_eq!(exit_code, 0);
}

#[test]
fn click_then_release_are_delivered_in_order() {
    let Some(mut app) = try_make_app() else {
        return;
    };

    let gui = RecordingGui::new();
    let mouse_buttons = gui.mouse_buttons.clone();
    let gui = Box::new(gui);

    let Ok(id) = app.make_window(WindowParams::default(), gui) else {
        return;
    };

    app.dispatch_event(
        id,
        GuiEvent::MouseButton { action: Action::Press, pos: (1.0, 1.0), button: MouseButton::Left, pointer_id: MOUSE_POINTER_ID },
    );
    app.dispatch_event(
        id,
        GuiEvent::MouseButton { action: Action::Release, pos: (1.0, 1.0), button: MouseButton::Left, pointer_id: MOUSE_POINTER_ID },
    );

    assert_eq!(
        *mouse_buttons.lock().unwrap(),
        vec![(Action::Press, MouseButton::Left), (Action::Release, MouseButton::Left)]
    );
}

#[test]
fn wheel_press_release_pairs_stay_matched_through_dispatch() {
    let Some(mut app) = try_make_app() else {
        return;
    };

    let gui = RecordingGui::new();
    let mouse_buttons = gui.mouse_buttons.clone();
    let gui = Box::new(gui);

    let Ok(id) = app.make_window(WindowParams::default(), gui) else {
        return;
    };

    for action in winshim::event::wheel_clicks_to_actions(2) {
        app.dispatch_event(
            id,
            GuiEvent::MouseButton { action, pos: (0.0, 0.0), button: MouseButton::WheelUp, pointer_id: MOUSE_POINTER_ID },
        );
    }

    assert_eq!(
        *mouse_buttons.lock().unwrap(),
        vec![
            (Action::Press, MouseButton::WheelUp),
            (Action::Release, MouseButton::WheelUp),
            (Action::Press, MouseButton::WheelUp),
            (Action::Release, MouseButton::WheelUp),
        ]
    );
}

#[test]
fn fullscreen_round_trip_returns_to_windowed_state() {
    let Some(mut app) = try_make_app() else {
        return;
    };

    let gui = Box::new(RecordingGui::new());
    let Ok(id) = app.make_window(WindowParams::default(), gui) else {
        return;
    };

    assert!(!app.is_fullscreen(id));
    app.set_fullscreen(id, true);
    assert!(app.is_fullscreen(id));
    app.set_fullscreen(id, false);
    assert!(!app.is_fullscreen(id));
}
