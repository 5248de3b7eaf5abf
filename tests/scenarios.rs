use ringdeque::{CapacityError, ErrorKind, RingDeque};
use std::collections::VecDeque;

/// Drives a `RingDeque` and a `VecDeque` through the same operations and
/// checks they agree after every step.
#[test]
fn tracks_vecdeque() {
    let mut ring = RingDeque::new();
    let mut model = VecDeque::new();
    let mut seed: u32 = 0x2545_f491;

    for step in 0..4000u32 {
        seed ^= seed << 13;
        seed ^= seed >> 17;
        seed ^= seed << 5;
        let len = model.len();

        match seed % 8 {
            0 | 1 => {
                ring.push_back(step);
                model.push_back(step);
            }
            2 => {
                ring.push_front(step);
                model.push_front(step);
            }
            3 => assert_eq!(ring.pop_front(), model.pop_front()),
            4 => assert_eq!(ring.pop_back(), model.pop_back()),
            5 => {
                let idx = (seed as usize >> 3) % (len + 1);
                let values = [step, step + 1, step + 2];
                ring.insert_n(idx, &values);
                for (k, v) in values.iter().enumerate() {
                    model.insert(idx + k, *v);
                }
            }
            6 if len > 0 => {
                let idx = (seed as usize >> 3) % len;
                let n = ((seed as usize >> 12) % (len - idx)).min(4);
                ring.erase_n(idx, n);
                model.drain(idx..idx + n).for_each(drop);
            }
            _ => {
                if let Some(v) = model.iter().nth(len / 2) {
                    assert_eq!(ring.index_of(ring.find(v)), model.iter().position(|x| x == v).unwrap());
                }
            }
        }

        assert_eq!(ring.len(), model.len());
        assert!(ring.len() <= ring.capacity());
        assert!(ring.iter().eq(model.iter()));
    }
}

#[test]
fn queue_of_strings() {
    let mut jobs: RingDeque<String> = RingDeque::with_capacity(4);
    for name in ["fetch", "parse", "index", "store"].iter() {
        jobs.emplace_back(*name);
    }
    jobs.emplace_front("lock");

    assert_eq!(jobs.len(), 5);
    assert_eq!(jobs.capacity(), 7);
    assert_eq!(jobs.front().map(String::as_str), Some("lock"));

    let pos = jobs.find("index");
    let pos = jobs.erase_at(pos);
    assert_eq!(jobs.value_at(pos).map(String::as_str), Some("store"));

    let done: Vec<String> = jobs.drain(..2).collect();
    assert_eq!(done, ["lock", "fetch"]);
    assert!(jobs.iter().eq(["parse", "store"].iter()));
}

#[test]
fn failed_reserve_leaves_deque_intact() {
    let mut deque: RingDeque<u64> = RingDeque::new();
    deque.extend(0..3);

    let err: CapacityError = deque.try_reserve(usize::MAX).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::CapacityOverflow);
    assert_eq!(err.to_string(), "capacity overflow");
    assert!(deque.iter().eq([0, 1, 2].iter()));

    let stored = deque.try_push_back(3).unwrap();
    *stored += 1;
    assert_eq!(deque.back(), Some(&4));
}

#[test]
fn reused_after_clear() {
    let mut deque = RingDeque::with_size(6, 1u8);
    let capacity = deque.capacity();
    deque.clear();
    assert!(deque.is_empty());
    assert_eq!(deque.capacity(), capacity);

    deque.extend(b"ring".iter());
    assert_eq!(deque.iter().rev().cloned().collect::<Vec<u8>>(), b"gnir".to_vec());
}
