use base::Vec2;

#[test]
fn test_new() {
    let v = Vec2::new(640usize, 480usize);
    assert_eq!(v.x, 640);
    assert_eq!(v.y, 480);
}

#[test]
fn test_zero() {
    let v = Vec2::<usize>::zero();
    assert_eq!(v, Vec2::new(0, 0));
}
