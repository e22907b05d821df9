use viewsync::{ObserveOptions, Subscription, TrackerOptions, VisibilityEntry, VisibilityObserver};
use viewsync_adapter::{SectionController, SmoothScrollOptions};

// A stand-in for a host intersection observer: it only logs what it is asked to watch.
struct LogObserver;

struct LogSubscription(&'static str);

impl Subscription for LogSubscription {
    fn cancel(self) {
        println!("unobserve {}", self.0);
    }
}

impl VisibilityObserver<&'static str> for LogObserver {
    type Target = u64;
    type Subscription = LogSubscription;

    fn observe(
        &mut self,
        id: &&'static str,
        target: u64,
        options: &ObserveOptions,
    ) -> LogSubscription {
        println!(
            "observe {id} at y={target} (margin {}, {} thresholds)",
            options.root_margin,
            options.thresholds.len()
        );
        LogSubscription(id)
    }
}

fn main() {
    // Example: a facilities page with a progress bar and a "jump to section" menu.
    //
    // An adapter would:
    // - register each rendered section with `observe`
    // - forward observer callbacks to `on_visibility`
    // - call `tick(now_ms)` every frame and apply the returned offset
    let layout = [("rules", 0u64), ("lounge", 900), ("booth", 1800)];
    let mut c = SectionController::new(
        layout.iter().map(|(id, _)| *id).collect(),
        TrackerOptions::new().with_activation_threshold(0.2),
        LogObserver,
    )
    .with_smooth_scroll(SmoothScrollOptions::default());

    for (id, y) in layout {
        c.observe(id, Some(y));
    }

    let target = c.scroll_to_section(&"booth", 0, |id| {
        layout.iter().find(|(k, _)| k == id).map(|(_, y)| *y)
    });
    println!("target_offset={target:?}");

    let mut now_ms = 0u64;
    while let Some(off) = c.tick(now_ms) {
        // Pretend the host reports whichever section the offset is in.
        let current = layout
            .iter()
            .rev()
            .find(|(_, y)| off >= *y)
            .map(|(id, _)| *id)
            .unwrap_or("rules");
        if c.on_visibility(vec![VisibilityEntry::visible(current, 0.6)]) {
            println!("t={now_ms} off={off} active={current} progress={:.0}", c.progress());
        }
        now_ms += 16;
    }

    c.dispose();
}
