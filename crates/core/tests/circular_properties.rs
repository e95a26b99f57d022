use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use ringkit_core::{CircularBuffer, EnqueueOutcome, OverwritePolicy};
use std::collections::VecDeque;

const SEEDS: u64 = 64;
const OPS_PER_RUN: usize = 500;

fn contents(buffer: &CircularBuffer<u32>) -> Vec<u32> {
    buffer.iter().copied().collect()
}

/// Drives a buffer and a `VecDeque` model with the same random operations
/// and checks they never disagree.
fn run_against_model(seed: u64, policy: OverwritePolicy) {
    let mut rng = StdRng::seed_from_u64(seed);
    let capacity = rng.random_range(1..=8);
    let mut buffer = CircularBuffer::new(capacity, policy).expect("capacity");
    let mut model: VecDeque<u32> = VecDeque::new();
    let mut next = 0u32;

    for _ in 0..OPS_PER_RUN {
        let roll = rng.random_range(0..100);
        if roll < 55 {
            next += 1;
            let was_full = model.len() == capacity;
            let outcome = buffer.enqueue(next);
            match (was_full, policy) {
                (false, _) => {
                    assert_eq!(outcome, EnqueueOutcome::Stored);
                    model.push_back(next);
                }
                (true, OverwritePolicy::Ignore) => {
                    assert_eq!(outcome, EnqueueOutcome::Dropped(next));
                }
                (true, OverwritePolicy::Overwrite) => {
                    let evicted = model.pop_front().expect("full model");
                    assert_eq!(outcome, EnqueueOutcome::Overwrote(evicted));
                    model.push_back(next);
                }
            }
        } else if roll < 90 {
            assert_eq!(buffer.dequeue(), model.pop_front());
        } else if roll < 97 {
            assert_eq!(buffer.peek(), model.front());
        } else {
            buffer.clear();
            model.clear();
        }

        assert_eq!(buffer.len(), model.len(), "seed {seed}");
        assert_eq!(buffer.is_empty(), model.is_empty());
        assert_eq!(buffer.is_full(), model.len() == capacity);
        assert!(buffer.len() <= buffer.capacity());
        assert_eq!(buffer.iter().len(), buffer.len());
        assert_eq!(
            contents(&buffer),
            model.iter().copied().collect::<Vec<_>>(),
            "seed {seed}"
        );
    }
}

#[test]
fn random_operations_match_model_under_overwrite() {
    for seed in 0..SEEDS {
        run_against_model(seed, OverwritePolicy::Overwrite);
    }
}

#[test]
fn random_operations_match_model_under_ignore() {
    for seed in 0..SEEDS {
        run_against_model(seed, OverwritePolicy::Ignore);
    }
}

#[test]
fn ignore_policy_freezes_a_full_buffer() {
    for capacity in 1..=6 {
        let mut buffer =
            CircularBuffer::from_iter_with(0..capacity as u32, capacity, OverwritePolicy::Ignore)
                .expect("capacity");
        let before = contents(&buffer);
        let head_before = buffer.peek().copied();
        for extra in 100..120 {
            buffer.enqueue(extra);
            assert_eq!(buffer.len(), capacity);
            assert_eq!(buffer.peek().copied(), head_before);
        }
        assert_eq!(contents(&buffer), before);
    }
}

#[test]
fn overwrite_policy_keeps_last_capacity_elements() {
    for capacity in 1..=6usize {
        for total in capacity + 1..capacity * 4 {
            let buffer = CircularBuffer::from_iter_with(
                0..total as u32,
                capacity,
                OverwritePolicy::Overwrite,
            )
            .expect("capacity");
            let expected: Vec<u32> = (total - capacity..total).map(|v| v as u32).collect();
            assert_eq!(contents(&buffer), expected);
        }
    }
}

#[test]
fn enqueue_then_dequeue_round_trips_in_fifo_order() {
    let mut buffer = CircularBuffer::with_capacity(5).expect("capacity");
    // Offset the cursors so the run crosses the physical end of storage.
    buffer.extend([0, 0, 0]);
    for _ in 0..3 {
        buffer.dequeue();
    }

    let items = [11u32, 12, 13, 14, 15];
    buffer.extend(items);
    let drained: Vec<u32> = std::iter::from_fn(|| buffer.dequeue()).collect();
    assert_eq!(drained, items);
    assert!(buffer.is_empty());
    assert_eq!(buffer.iter().count(), 0);
}

#[test]
fn clear_twice_matches_clear_once() {
    let mut once = CircularBuffer::with_capacity(3).expect("capacity");
    once.extend(1..=5u32);
    let mut twice = once.clone();

    once.clear();
    twice.clear();
    twice.clear();

    assert_eq!(once, twice);
    assert!(twice.is_empty());
    assert_eq!(format!("{once:?}"), format!("{twice:?}"));
}
