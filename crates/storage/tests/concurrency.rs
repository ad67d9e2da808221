#![forbid(unsafe_code)]

use st_core::ThoughtInput;
use st_core::ids::BranchId;
use st_storage::ThinkingEngine;
use std::collections::BTreeSet;
use std::sync::{Arc, Barrier};

const WRITERS: usize = 8;
const PER_WRITER: usize = 200;

#[test]
fn concurrent_writers_never_lose_or_duplicate_counts() {
    let engine = Arc::new(ThinkingEngine::new());
    let barrier = Arc::new(Barrier::new(WRITERS));

    let handles = (0..WRITERS)
        .map(|writer| {
            let engine = Arc::clone(&engine);
            let barrier = Arc::clone(&barrier);
            std::thread::spawn(move || {
                barrier.wait();
                let mut lengths = Vec::with_capacity(PER_WRITER);
                for step in 0..PER_WRITER {
                    let input = ThoughtInput::new(
                        format!("writer {writer} step {step}"),
                        true,
                        step as i64 + 1,
                        PER_WRITER as i64,
                    );
                    let response = engine.process_thought(input).expect("accepted");
                    lengths.push(response.thought_history_length);
                }
                lengths
            })
        })
        .collect::<Vec<_>>();

    let mut reported = BTreeSet::new();
    for handle in handles {
        for length in handle.join().expect("writer thread") {
            assert!(reported.insert(length), "duplicate history length {length}");
        }
    }

    let total = (WRITERS * PER_WRITER) as u64;
    assert_eq!(engine.thought_count(), total);
    assert_eq!(reported, (1..=total).collect::<BTreeSet<_>>());

    let seqs = engine
        .history()
        .expect("history")
        .iter()
        .map(|entry| entry.seq)
        .collect::<Vec<_>>();
    assert_eq!(seqs, (1..=total).collect::<Vec<_>>());
}

#[test]
fn concurrent_branch_upserts_create_each_id_once() {
    let engine = Arc::new(ThinkingEngine::new());
    let barrier = Arc::new(Barrier::new(WRITERS));

    let handles = (0..WRITERS)
        .map(|writer| {
            let engine = Arc::clone(&engine);
            let barrier = Arc::clone(&barrier);
            std::thread::spawn(move || {
                barrier.wait();
                for step in 0..PER_WRITER {
                    let branch_id = if step % 2 == 0 { "shared" } else { "mirror" };
                    let input = ThoughtInput::new(format!("{writer}:{step}"), true, 2, 3)
                        .branching(1, branch_id);
                    engine.process_thought(input).expect("accepted");
                }
            })
        })
        .collect::<Vec<_>>();
    for handle in handles {
        handle.join().expect("writer thread");
    }

    let ids = engine
        .branch_ids()
        .expect("branch ids")
        .iter()
        .map(|id| id.as_str().to_string())
        .collect::<Vec<_>>();
    assert_eq!(ids, vec!["mirror".to_string(), "shared".to_string()]);

    for id in ["mirror", "shared"] {
        let filed = engine
            .branch_history(&BranchId::try_new(id).expect("branch id"))
            .expect("branch history")
            .expect("known branch");
        assert_eq!(filed.len(), WRITERS * PER_WRITER / 2);
        // Filed in commit order.
        assert!(filed.windows(2).all(|pair| pair[0].seq < pair[1].seq));
    }
}
