//! Simulates a drag + release session against a collapsing toolbar and
//! prints the progress model frame by frame.
//!
//! Run with: cargo run -p crest_scaffold --example drag_session

use crest_scaffold::prelude::*;

/// Minimal stand-in for a host list: a position between 0 and max scroll
struct DemoBody {
    scrolled: f32,
    content: f32,
    viewport: f32,
}

impl BodyScroll for DemoBody {
    fn scroll_by(&mut self, delta: f32) -> f32 {
        let max = (self.content - self.viewport).max(0.0);
        let next = (self.scrolled - delta).clamp(0.0, max);
        let consumed = self.scrolled - next;
        self.scrolled = next;
        consumed
    }

    fn content_height(&self) -> f32 {
        self.content
    }

    fn viewport_height(&self) -> f32 {
        self.viewport
    }
}

fn print_state(label: &str, coordinator: &ScrollCoordinator, body: &DemoBody) {
    let scaffold = coordinator.scaffold();
    println!(
        "{label:<24} height {:>6.1}  offset {:>6.1}  total {:.2}  body {:>6.1}",
        scaffold.toolbar().height(),
        scaffold.offset_y(),
        scaffold.total_progress(),
        body.scrolled,
    );
}

fn main() -> crest_scaffold::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let scheduler = AnimationScheduler::new();
    let config = ScaffoldConfig::new(ScrollStrategy::EnterAlwaysCollapsed)
        .with_snap(SnapConfig::new(0.4, 0.6)?);
    let mut coordinator = ScrollCoordinator::new(&scheduler.handle(), config);
    coordinator
        .scaffold_mut()
        .toolbar_mut()
        .set_bounds(56.0, 224.0)?;

    let mut body = DemoBody {
        scrolled: 0.0,
        content: 1600.0,
        viewport: 700.0,
    };

    print_state("start", &coordinator, &body);

    // Drag up in steps: toolbar collapses, then hides, then the body scrolls
    for _ in 0..6 {
        coordinator.dispatch_scroll(-60.0, &mut body);
        print_state("drag -60", &coordinator, &body);
    }

    // Release with a modest upward velocity; the fling finishes the motion
    let outcome = coordinator.finish_gesture(-400.0, &mut body);
    print_state("release -400", &coordinator, &body);
    println!("leftover fling velocity: {:.1}", outcome.leftover_velocity);

    // Drag part of the way back and release slowly: the snap takes over
    for _ in 0..3 {
        coordinator.dispatch_scroll(80.0, &mut body);
        print_state("drag +80", &coordinator, &body);
    }
    let outcome = coordinator.finish_gesture(0.0, &mut body);

    if let Some(snap) = outcome.snap {
        let mut frames = 0;
        while !snap.is_finished() {
            scheduler.advance(1.0 / 60.0);
            frames += 1;
        }
        coordinator.note_settled();
        println!("snap settled after {frames} frames");
    }
    print_state("settled", &coordinator, &body);

    // The minimal state that survives process recreation
    let snapshot = coordinator.scaffold().snapshot();
    println!("snapshot: {snapshot:?}");

    Ok(())
}
