use crate::pose::{HandIndex, Point3};

use super::rotation::{direction, look_rotation, Quat};

/// 手のひらの向き
///
/// 法線 = (p5 - p0) × (p17 - p0), 前方 = 手首から人差し指・小指の付け根の中点へ。
/// 法線を上方向として (right, up, -forward) の基底を作る。退化していれば None
pub fn palm_rotation(hand: &[Point3; HandIndex::COUNT]) -> Option<Quat> {
    let wrist = hand[HandIndex::Wrist as usize];
    let index = hand[HandIndex::IndexMcp as usize];
    let pinky = hand[HandIndex::PinkyMcp as usize];

    let normal = direction((index - wrist).cross(&(pinky - wrist)))?;
    let forward = direction((index + pinky) * 0.5 - wrist)?;
    look_rotation(forward, normal)
}

/// 21点そろっていなければ単位回転
pub fn solve_hand(hand: Option<&[Point3; HandIndex::COUNT]>) -> Quat {
    match hand.and_then(palm_rotation) {
        Some(q) => q,
        None => {
            if hand.is_some() {
                log::debug!("degenerate palm, using identity");
            }
            Quat::identity()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::retarget::rotation::tests::{approx_eq_quat, approx_eq_vec};

    fn palm(wrist: Point3, index: Point3, pinky: Point3) -> [Point3; HandIndex::COUNT] {
        let mut hand = [wrist; HandIndex::COUNT];
        hand[HandIndex::IndexMcp as usize] = index;
        hand[HandIndex::PinkyMcp as usize] = pinky;
        hand
    }

    #[test]
    fn test_flat_palm_facing_up_is_identity() {
        let hand = palm(
            Point3::zeros(),
            Point3::new(0.5, 0.0, -1.0),
            Point3::new(-0.5, 0.0, -1.0),
        );
        let q = palm_rotation(&hand).unwrap();
        assert!(approx_eq_quat(&q, &Quat::identity(), 1e-12));
    }

    #[test]
    fn test_palm_axes_follow_landmarks() {
        let wrist = Point3::new(0.1, 0.2, 0.3);
        let hand = palm(
            wrist,
            wrist + Point3::new(1.0, 0.5, 0.0),
            wrist + Point3::new(1.0, -0.5, 0.0),
        );
        let q = palm_rotation(&hand).unwrap();
        // 前方は +X
        assert!(approx_eq_vec(&(q * -Point3::z()), &Point3::x(), 1e-9));
        // 法線 = (1,0.5,0) × (1,-0.5,0) = -Z 方向
        assert!(approx_eq_vec(&(q * Point3::y()), &-Point3::z(), 1e-9));
    }

    #[test]
    fn test_placeholder_hand_is_identity() {
        let hand = [Point3::zeros(); HandIndex::COUNT];
        assert!(palm_rotation(&hand).is_none());
        assert_eq!(solve_hand(Some(&hand)), Quat::identity());
    }

    #[test]
    fn test_collinear_palm_is_identity() {
        let hand = palm(Point3::zeros(), Point3::new(0.0, 0.0, -1.0), Point3::new(0.0, 0.0, -2.0));
        assert_eq!(solve_hand(Some(&hand)), Quat::identity());
    }

    #[test]
    fn test_missing_hand_is_identity() {
        assert_eq!(solve_hand(None), Quat::identity());
    }
}
