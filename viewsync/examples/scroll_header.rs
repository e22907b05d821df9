// Example: throttled "scrolled past 50px" detection for a sticky header.
use viewsync::{ScrollThreshold, ScrollThresholdOptions};

fn main() {
    let mut s = ScrollThreshold::new(ScrollThresholdOptions::default(), 0);

    // Scroll events arrive faster than the 16ms throttle window.
    let mut now_ms = 0u64;
    for offset in (0..=120u64).step_by(10) {
        now_ms += 5;
        if s.on_scroll(offset, now_ms) {
            println!("t={now_ms} offset={offset} is_scrolled={}", s.is_scrolled());
        }
        if s.tick(now_ms) {
            println!("t={now_ms} (trailing) is_scrolled={}", s.is_scrolled());
        }
    }

    now_ms += 16;
    s.tick(now_ms);
    println!("final: {:?}", s.state());
}
