use rand::{rngs::StdRng, Rng, SeedableRng};

use super::assert_size_invariant;
use crate::vector::Vector;

/// Drives random operation sequences against `std::vec::Vec` as a reference
/// and checks the growth and shrink policy after each step.
fn run(seed: u64, steps: usize) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut v = Vector::new();
    let mut model: Vec<u32> = Vec::new();
    for _ in 0..steps {
        let capacity = v.capacity();
        let len = v.len();
        match rng.gen_range(0..100) {
            0..=34 => {
                let x = rng.gen();
                v.push_back(x);
                model.push(x);
                let expected = if len == capacity {
                    (capacity * 2).max(1)
                } else {
                    capacity
                };
                assert_eq!(v.capacity(), expected);
            }
            35..=49 => {
                assert_eq!(v.pop_back().ok(), model.pop());
                assert_eq!(v.capacity(), capacity);
            }
            50..=64 => {
                let index = rng.gen_range(0..=len + 1);
                let x = rng.gen();
                let ret = v.insert(index, x);
                if index <= len {
                    assert!(ret.is_ok());
                    model.insert(index, x);
                } else {
                    assert!(ret.is_err());
                }
            }
            65..=79 => {
                let index = rng.gen_range(0..=len);
                let ret = v.erase(index);
                if index < len {
                    assert_eq!(ret, Ok(model.remove(index)));
                } else {
                    assert!(ret.is_err());
                }
                assert_eq!(v.capacity(), capacity);
            }
            80..=84 => {
                let n = rng.gen_range(0..64);
                v.reserve(n);
                assert_eq!(v.capacity(), capacity.max(n));
            }
            85..=92 => {
                v.shrink();
                if capacity > 0 && len <= capacity / 4 {
                    assert!(v.capacity() < capacity);
                } else {
                    assert_eq!(v.capacity(), capacity);
                }
            }
            93..=96 => {
                v.shrink_to_fit();
                assert_eq!(v.capacity(), len.max(1));
            }
            97 => {
                v.clear();
                model.clear();
            }
            _ => {
                let index = rng.gen_range(0..=len);
                assert_eq!(v.at(index).ok(), model.get(index));
            }
        }
        assert_size_invariant(&v);
        assert_eq!(v.as_slice(), model.as_slice());
        assert_eq!(v.front().ok(), model.first());
        assert_eq!(v.back().ok(), model.last());
    }
    let collected: Vec<u32> = v.into_iter().collect();
    assert_eq!(collected, model);
}

#[test]
fn random_operations_match_std_vec() {
    for seed in 0..16 {
        run(seed, 2_000);
    }
}

#[test]
fn random_clones_stay_independent() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut v: Vector<u32> = (0..64).collect();
    for _ in 0..256 {
        let snapshot = v.clone();
        let index = rng.gen_range(0..v.len());
        v[index] = v[index].wrapping_add(1);
        assert_ne!(v, snapshot);
        assert_eq!(snapshot.len(), v.len());
        if rng.gen_bool(0.5) {
            v = snapshot;
        }
    }
}
