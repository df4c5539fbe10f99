use super::*;

#[test]
fn fnv_seeded_hash_is_stable() {
    let mut a = Fnv1a64::new_default();
    a.write_bytes(b"avatar");
    let mut b = Fnv1a64::new(Fnv1a64::OFFSET_BASIS);
    b.write_bytes(b"ava");
    b.write_bytes(b"tar");
    assert_eq!(a.finish(), b.finish());

    let mut c = Fnv1a64::new_default();
    c.write_u64(1);
    assert_ne!(c.finish(), Fnv1a64::new_default().finish());
}

#[test]
fn unpremultiply_restores_straight_channels() {
    let mut px = vec![
        0, 0, 0, 0, // transparent
        10, 20, 30, 255, // opaque untouched
        64, 0, 32, 128, // half alpha
        7, 7, 7, 0, // garbage under zero alpha
    ];
    unpremultiply_rgba8_in_place(&mut px);
    assert_eq!(&px[0..4], &[0, 0, 0, 0]);
    assert_eq!(&px[4..8], &[10, 20, 30, 255]);
    assert_eq!(&px[8..12], &[128, 0, 64, 128]);
    assert_eq!(&px[12..16], &[0, 0, 0, 0]);
}
