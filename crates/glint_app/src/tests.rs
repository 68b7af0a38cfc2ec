//! End-to-end tests driving the dispatch loop with the headless backend

use crate::prelude::*;
use glint_platform::headless::{HeadlessNative, NativeInput};
use glint_platform::{NativeCallbacks, NativeWindowing, PlatformError};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Consume the two startup events every session begins with
fn expect_startup(app: &mut App) {
    assert_eq!(app.next_event(), Some(Event::from(LifecycleStage::Focused)));
    assert_eq!(app.next_event(), Some(Event::Paint));
}

#[test]
fn test_startup_sequence_and_return_value() {
    init_tracing();
    let native = HeadlessNative::new();
    let controller = native.controller();

    let value = Shell::new(native)
        .run(|mut app| {
            expect_startup(&mut app);
            assert_eq!(app.try_next_event(), None);
            7
        })
        .unwrap();

    assert_eq!(value, 7);
    assert!(controller.window_created());
}

#[test]
fn test_returns_without_pumping() {
    init_tracing();
    let native = HeadlessNative::new();
    let controller = native.controller();

    Shell::new(native).run(|_app| ()).unwrap();

    // Dropping the handle closes the publish channel, which may win the race
    // against task completion and turn the loop once
    assert!(controller.pump_count() <= 1);
    assert_eq!(controller.swap_count(), 0);
}

#[test]
fn test_native_input_reaches_app() {
    init_tracing();
    let native = HeadlessNative::new();
    let controller = native.controller();
    controller.extend([
        NativeInput::PointerPress {
            x: 10.0,
            y: 20.0,
            button: 3,
            state: 0,
        },
        NativeInput::Resize {
            width: 800,
            height: 600,
        },
        NativeInput::Close,
        NativeInput::Close,
    ]);

    let events = Shell::new(native)
        .run(|mut app| {
            expect_startup(&mut app);

            // Publishing turns the loop, which pumps the queued inputs
            app.publish().unwrap();
            let events: Vec<Event> = (0..4).filter_map(|_| app.next_event()).collect();

            app.publish().unwrap();
            assert_eq!(app.try_next_event(), None);
            events
        })
        .unwrap();

    assert_eq!(
        events,
        vec![
            Event::Pointer(PointerEvent {
                x: 10.0,
                y: 20.0,
                button: Button::Right,
                direction: Direction::Press,
                modifiers: Modifiers::default(),
            }),
            Event::Resize(ResizeEvent {
                width_px: 800,
                height_px: 600,
                width_pt: 800.0,
                height_pt: 600.0,
                scale: 1.0,
            }),
            Event::from(LifecycleStage::Dead),
            Event::Stop,
        ]
    );
}

#[test]
fn test_configured_scale() {
    init_tracing();
    let native = HeadlessNative::new();
    native.controller().push(NativeInput::Resize {
        width: 800,
        height: 600,
    });

    let size = Shell::new(native)
        .with_config(ShellConfig::default().pixels_per_pt(2.0))
        .run(|mut app| {
            expect_startup(&mut app);
            app.publish().unwrap();
            assert!(matches!(app.next_event(), Some(Event::Resize(_))));
            app.size()
        })
        .unwrap()
        .unwrap();

    assert_eq!(size.size_pt(), (400.0, 300.0));
    assert_eq!(size.scale, 2.0);
}

#[test]
fn test_publish_is_paced() {
    init_tracing();
    let native = HeadlessNative::new();
    let controller = native.controller();
    let config = ShellConfig::default().frame_rate(60);
    let interval = config.vsync_interval();

    let elapsed = Shell::new(native)
        .with_config(config)
        .run(|mut app| {
            expect_startup(&mut app);
            let start = Instant::now();
            for _ in 0..3 {
                app.publish().unwrap();
            }
            start.elapsed()
        })
        .unwrap();

    assert_eq!(controller.swap_count(), 3);
    assert!(
        elapsed >= interval * 2,
        "three publishes took {elapsed:?}, interval {interval:?}"
    );
}

#[test]
fn test_stop_is_advisory() {
    init_tracing();
    let native = HeadlessNative::new();
    let controller = native.controller();
    controller.push(NativeInput::Close);

    let frames_after_stop = Shell::new(native)
        .run(|mut app| {
            expect_startup(&mut app);
            app.publish().unwrap();
            assert!(app.next_event().is_some_and(|event| event.is_dead()));
            assert_eq!(app.next_event(), Some(Event::Stop));

            // The loop keeps serving until this callback returns
            let mut frames = 0;
            for _ in 0..2 {
                app.publish().unwrap();
                frames += 1;
            }
            frames
        })
        .unwrap();

    assert_eq!(frames_after_stop, 2);
    assert_eq!(controller.swap_count(), 3);
}

#[test]
fn test_work_runs_on_dispatch_thread() {
    init_tracing();
    let shell = Shell::new(HeadlessNative::new());
    let worker = shell.worker();
    let dispatch_thread = thread::current().id();

    let (job_thread, order) = shell
        .run(move |mut app| {
            expect_startup(&mut app);

            let order = Arc::new(std::sync::Mutex::new(Vec::new()));
            for i in 0..3 {
                let order = Arc::clone(&order);
                worker.submit(move || order.lock().unwrap().push(i));
            }
            let job_thread = worker.run_blocking(|| thread::current().id()).unwrap();

            let order = order.lock().unwrap().clone();
            (job_thread, order)
        })
        .unwrap();

    assert_eq!(job_thread, dispatch_thread);
    assert_eq!(order, vec![0, 1, 2]);
}

#[test]
fn test_request_paint_round_trip() {
    init_tracing();
    let frames = Shell::new(HeadlessNative::new())
        .run(|mut app| {
            let mut frames = 0;
            while let Some(event) = app.next_event() {
                if event == Event::Paint {
                    frames += 1;
                    app.publish().unwrap();
                    if frames == 3 {
                        break;
                    }
                    app.request_paint();
                }
            }
            frames
        })
        .unwrap();

    assert_eq!(frames, 3);
}

#[test]
fn test_window_creation_failure() {
    init_tracing();
    let native = HeadlessNative::new();
    native.controller().fail_window_creation();
    let ran = Arc::new(AtomicBool::new(false));

    let flag = Arc::clone(&ran);
    let result = Shell::new(native).run(move |_app| flag.store(true, Ordering::SeqCst));

    assert!(matches!(
        result,
        Err(ShellError::Platform(PlatformError::WindowCreation(_)))
    ));
    assert!(!ran.load(Ordering::SeqCst));
}

#[test]
fn test_invalid_config_rejected() {
    init_tracing();
    let native = HeadlessNative::new();
    let controller = native.controller();

    let result = Shell::new(native)
        .with_config(ShellConfig::default().pixels_per_pt(0.0))
        .run(|_app| ());

    assert!(matches!(result, Err(ShellError::Config(_))));
    assert!(!controller.window_created());

    let native = HeadlessNative::new();
    let controller = native.controller();
    let result = Shell::new(native)
        .with_config(ShellConfig::default().frame_rate(2_000_000_000))
        .run(|app| app.publish());

    assert!(matches!(result, Err(ShellError::Config(_))));
    assert!(!controller.window_created());
}

/// Backend that reports input while its window is still being created
struct EagerNative(HeadlessNative);

impl NativeWindowing for EagerNative {
    fn create_window(
        &mut self,
        config: &WindowConfig,
        callbacks: &dyn NativeCallbacks,
    ) -> std::result::Result<(), PlatformError> {
        callbacks.on_resize(640, 480);
        callbacks.on_pointer_move(3.0, 4.0, 0);
        self.0.create_window(config, callbacks)
    }

    fn process_events(&mut self, callbacks: &dyn NativeCallbacks) {
        self.0.process_events(callbacks);
    }

    fn swap_buffers(&mut self) {
        self.0.swap_buffers();
    }

    fn name(&self) -> &'static str {
        "eager"
    }
}

#[test]
fn test_creation_callbacks_follow_startup_events() {
    init_tracing();
    let (events, size) = Shell::new(EagerNative(HeadlessNative::new()))
        .run(|mut app| {
            expect_startup(&mut app);
            let events: Vec<Event> = std::iter::from_fn(|| app.try_next_event()).collect();
            (events, app.size())
        })
        .unwrap();

    assert_eq!(events.len(), 2);
    assert_eq!(events[0], Event::Resize(ResizeEvent::from_pixels(640, 480, 1.0)));
    assert!(matches!(events[1], Event::Pointer(p) if p.direction == Direction::Move));
    assert_eq!(size, Some(ResizeEvent::from_pixels(640, 480, 1.0)));
}

#[test]
#[should_panic(expected = "application exploded")]
fn test_app_panic_propagates() {
    init_tracing();
    let _ = Shell::new(HeadlessNative::new()).run(|_app| -> u32 { panic!("application exploded") });
}

#[test]
fn test_sessions_do_not_share_stop() {
    init_tracing();
    for _ in 0..2 {
        let native = HeadlessNative::new();
        native.controller().push(NativeInput::Close);

        let saw_stop = Shell::new(native)
            .run(|mut app| {
                expect_startup(&mut app);
                app.publish().unwrap();
                app.next_event().is_some_and(|event| event.is_dead())
                    && app.next_event() == Some(Event::Stop)
            })
            .unwrap();

        assert!(saw_stop);
    }
}

#[test]
fn test_publish_timeout_sanity() {
    // One publish takes about one frame
    init_tracing();
    let elapsed = Shell::new(HeadlessNative::new())
        .run(|mut app| {
            expect_startup(&mut app);
            let start = Instant::now();
            app.publish().unwrap();
            start.elapsed()
        })
        .unwrap();
    assert!(elapsed < Duration::from_secs(1));
}
