//! Owners built on `SyncSlot` can be read from several threads at once.

use std::sync::{
    atomic::{AtomicU32, Ordering},
    Arc, Barrier,
};
use std::thread;

use lazy_attr::{computation, AttributeError, LazyAttribute, SyncSlot};

struct Document {
    text: String,
    computes: AtomicU32,
    lines: SyncSlot<usize>,
}

impl Document {
    const LINES: LazyAttribute<Self, usize, AttributeError, SyncSlot<usize>> = LazyAttribute::new(
        computation! {
            /// Number of lines in the text.
            infallible fn lines(doc: &Document) -> usize {
                doc.computes.fetch_add(1, Ordering::SeqCst);
                doc.text.lines().count()
            }
        },
        |d| &d.lines,
        |d| &mut d.lines,
    );
}

#[test]
fn concurrent_first_reads_agree() {
    const THREADS: usize = 8;

    let doc = Arc::new(Document {
        text: "one\ntwo\nthree".to_owned(),
        computes: AtomicU32::new(0),
        lines: SyncSlot::new(),
    });
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let doc = Arc::clone(&doc);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                *Document::LINES.get(&doc).unwrap()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), 3);
    }

    // racing threads may each compute, but the slot ends up with one value
    let computes = doc.computes.load(Ordering::SeqCst);
    assert!((1..=THREADS as u32).contains(&computes));
    assert_eq!(Document::LINES.get(&doc), Ok(&3));
    assert_eq!(doc.computes.load(Ordering::SeqCst), computes);
}
