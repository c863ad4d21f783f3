use shelf_core::locator::CanonicalPathCodec;
use shelf_core::panel::{PanelVisibility, SystemOpener};
use shelf_core::runtime::error::HostError;
use shelf_core::runtime::{Host, ShelfEvent, ShelfRuntime};
use shelf_core::types::{AppConfig, Config, Point, Rect, Screen, ScreenId};
use std::cell::Cell;
use std::fs;
use std::sync::mpsc::{self, Receiver};
use std::time::{Duration, Instant};
use tempfile::TempDir;

struct Desk {
    pointer: Cell<Point>,
}

impl Desk {
    fn at(&self, x: f64, y: f64) {
        self.pointer.set(Point::new(x, y));
    }
}

impl Host for Desk {
    fn pointer_location(&self) -> Result<Point, HostError> {
        Ok(self.pointer.get())
    }

    fn screens(&self) -> Result<Vec<Screen>, HostError> {
        Ok(vec![
            Screen {
                id: ScreenId(1),
                frame: Rect::new(0.0, 0.0, 1440.0, 900.0),
                visible_frame: Rect::new(0.0, 25.0, 1440.0, 875.0),
            },
            Screen {
                id: ScreenId(2),
                frame: Rect::new(1440.0, 0.0, 1920.0, 1080.0),
                visible_frame: Rect::new(1440.0, 0.0, 1920.0, 1080.0),
            },
        ])
    }
}

fn shown_screens(events: &Receiver<ShelfEvent>) -> Vec<ScreenId> {
    events
        .try_iter()
        .filter_map(|event| match event {
            ShelfEvent::FrameChanged(frame) => Some(frame.screen),
            _ => None,
        })
        .collect()
}

/// Verify two dwells separated by a retreat show the panel exactly twice, on
/// the screen under the pointer each time.
#[test]
fn test_dwell_retreat_dwell() {
    let temp = TempDir::new().unwrap();
    let config = Config {
        base_path: temp.path().to_path_buf(),
    };
    let (tx, rx) = mpsc::channel();
    let start = Instant::now();
    let mut runtime = ShelfRuntime::open(
        &config,
        &AppConfig::default(),
        CanonicalPathCodec,
        Box::new(SystemOpener),
        tx,
        start,
    )
    .unwrap();
    let desk = Desk {
        pointer: Cell::new(Point::new(700.0, 400.0)),
    };
    let mut clock = 0;
    let mut run_until = |runtime: &mut ShelfRuntime<CanonicalPathCodec>, until: u64| {
        while clock <= until {
            runtime.tick(&desk, start + Duration::from_millis(clock));
            clock += 100;
        }
    };

    desk.at(3359.0, 500.0);
    run_until(&mut runtime, 1200);
    assert_eq!(runtime.panel().visibility(), PanelVisibility::Visible);

    desk.at(1000.0, 500.0);
    run_until(&mut runtime, 1800);
    assert_eq!(runtime.panel().visibility(), PanelVisibility::Hidden);

    desk.at(1440.0, 300.0);
    run_until(&mut runtime, 3000);
    assert_eq!(runtime.panel().visibility(), PanelVisibility::Visible);

    assert_eq!(shown_screens(&rx), vec![ScreenId(2), ScreenId(1)]);
}

/// Verify dropped items survive a restart of the runtime.
#[test]
fn test_dropped_items_survive_restart() {
    let temp = TempDir::new().unwrap();
    let config = Config {
        base_path: temp.path().join("data"),
    };
    let file = temp.path().join("notes.txt");
    fs::write(&file, b"notes").unwrap();

    let (tx, _rx) = mpsc::channel();
    let mut runtime = ShelfRuntime::open(
        &config,
        &AppConfig::default(),
        CanonicalPathCodec,
        Box::new(SystemOpener),
        tx,
        Instant::now(),
    )
    .unwrap();
    assert!(runtime.on_drop(&[file]));
    runtime.shutdown();
    drop(runtime);

    let (tx, rx) = mpsc::channel();
    let _runtime = ShelfRuntime::open(
        &config,
        &AppConfig::default(),
        CanonicalPathCodec,
        Box::new(SystemOpener),
        tx,
        Instant::now(),
    )
    .unwrap();

    match rx.try_recv().unwrap() {
        ShelfEvent::ListChanged(rows) => {
            assert_eq!(rows.len(), 1);
            assert_eq!(rows[0].display_name, "notes.txt");
            assert!(rows[0].reachable);
        }
        other => panic!("unexpected event {other:?}"),
    }
}
