use super::*;

#[test]
fn equal_seeds_yield_equal_sequences() {
    let mut a = SplitMix64::new(42);
    let mut b = SplitMix64::new(42);
    for _ in 0..64 {
        assert_eq!(a.next_u64(), b.next_u64());
    }

    let mut c = SplitMix64::new(43);
    assert_ne!(SplitMix64::new(42).next_u64(), c.next_u64());
}

#[test]
fn samples_stay_in_unit_interval() {
    let mut r = SplitMix64::new(7);
    for _ in 0..10_000 {
        let v = r.next_f64();
        assert!((0.0..1.0).contains(&v), "{v}");
    }
}

#[test]
fn pick_index_covers_range_without_overflow() {
    struct Max;
    impl RandomSource for Max {
        fn next_f64(&mut self) -> f64 {
            0.999_999_999_999
        }
    }
    assert_eq!(Max.pick_index(5), 4);

    let mut r = SplitMix64::new(3);
    let mut seen = [false; 5];
    for _ in 0..500 {
        seen[r.pick_index(5)] = true;
    }
    assert!(seen.iter().all(|&s| s));
}

#[test]
fn entropy_generators_diverge() {
    let mut a = SplitMix64::from_entropy();
    let mut b = SplitMix64::from_entropy();
    assert_ne!(a.next_u64(), b.next_u64());
}
