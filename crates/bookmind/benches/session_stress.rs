use bookmind::MindmapConfig;
use bookmind::layout::MindmapSession;
use criterion::{Criterion, criterion_group, criterion_main};
use serde_json::json;
use std::hint::black_box;

/// `branches` categories, `topics` bookmarks each, every bookmark with a url, title and summary.
fn balanced_tree(branches: usize, topics: usize) -> String {
    let children: Vec<_> = (0..branches)
        .map(|b| {
            let items: Vec<_> = (0..topics)
                .map(|t| {
                    json!({
                        "label": format!("Bookmark {b}.{t}"),
                        "url": format!("https://example{b}.com/articles/{t}?ref=bench"),
                        "title": format!("Article number {t} in category {b}"),
                        "summary": "A reasonably long summary that will be truncated for display on the map.",
                    })
                })
                .collect();
            json!({ "label": format!("Category {b}"), "children": items })
        })
        .collect();
    json!({ "root": { "label": "Bookmarks", "children": children } }).to_string()
}

fn bench_session_stress(c: &mut Criterion) {
    let tree = balanced_tree(8, 40);

    let mut group = c.benchmark_group("session_stress");
    group.sample_size(50);

    group.bench_function("load_and_layout_8x40", |b| {
        b.iter(|| {
            let mut session = MindmapSession::new(MindmapConfig::default());
            session.load_json(black_box(&tree)).expect("tree");
            black_box(session.graph().node_count());
        });
    });

    let mut session = MindmapSession::new(MindmapConfig::default());
    session.load_json(&tree).expect("tree");
    let branch_ids: Vec<String> = (1..=8).map(|i| format!("b{i}")).collect();

    // Each iteration collapses and re-expands every branch: 16 toggles, 16 layout passes.
    group.bench_function("toggle_round_trip_8_branches", |b| {
        b.iter(|| {
            for id in &branch_ids {
                session.toggle(black_box(id)).expect("toggle");
                session.toggle(black_box(id)).expect("toggle");
            }
            black_box(session.snapshot().nodes.len());
        });
    });

    group.finish();
}

criterion_group!(benches, bench_session_stress);
criterion_main!(benches);
