// Example: drive a section tracker with synthetic visibility batches, the way an image panel
// would follow the text column it sits next to.
use viewsync::{Inset, RootMargin, SectionTracker, TrackerOptions, VisibilityEntry};

fn main() {
    let sections = vec!["community-first", "facility-environment", "versatility"];
    let mut t = SectionTracker::new(
        sections,
        TrackerOptions::new()
            .with_activation_threshold(0.3)
            .with_root_margin(RootMargin::bottom(Inset::Percent(-10))),
    );
    println!("root_margin={}", t.options().observe.root_margin);

    // Each inner slice is what an intersection observer would deliver while scrolling down.
    let frames: [&[VisibilityEntry<&str>]; 4] = [
        &[VisibilityEntry::visible("community-first", 0.9)],
        &[
            VisibilityEntry::visible("community-first", 0.4),
            VisibilityEntry::visible("facility-environment", 0.5),
        ],
        &[VisibilityEntry::visible("facility-environment", 0.2)],
        &[
            VisibilityEntry::hidden("facility-environment"),
            VisibilityEntry::visible("versatility", 0.7),
        ],
    ];

    for batch in frames {
        let changed = t.apply_batch(batch);
        println!(
            "active={:?} progress={:.1} changed={changed}",
            t.active(),
            t.progress()
        );
    }
}
