use crate::pose::{Frame, HandIndex, Point3, Side};

use super::bone::{BoneName, Finger};
use super::rotation::{minimal_rotation, Quat};
use super::skeleton::Skeleton;
use super::BoneRotations;

/// 1本の指の3節のワールド回転（根元 → 先端）
pub fn finger_rotations(hand: &[Point3; HandIndex::COUNT], finger: Finger, rest: Point3) -> [Quat; 3] {
    let chain = finger.landmark_chain();
    std::array::from_fn(|segment| minimal_rotation(rest, hand[chain[segment + 1]] - hand[chain[segment]]))
}

/// 片手15節のワールド回転。21点そろっていなければすべて単位回転
pub fn solve_fingers(frame: &Frame, side: Side, skeleton: &Skeleton, world: &mut BoneRotations) {
    let Some(hand) = frame.hand_world(side) else {
        for bone in BoneName::finger_bones(side) {
            world.insert(bone, Quat::identity());
        }
        return;
    };
    for finger in Finger::ALL {
        let rotations = finger_rotations(&hand, finger, skeleton.finger_rest());
        for (segment, q) in rotations.into_iter().enumerate() {
            world.insert(BoneName::finger(side, finger, segment), q);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pose::Landmark;
    use crate::retarget::rotation::tests::approx_eq_vec;

    #[test]
    fn test_straight_finger_along_rest_is_identity() {
        let mut hand = [Point3::zeros(); HandIndex::COUNT];
        for (k, i) in Finger::Index.landmark_chain().into_iter().enumerate() {
            hand[i] = Point3::new(0.1, 0.0, 0.05 * k as f64);
        }
        let rotations = finger_rotations(&hand, Finger::Index, Point3::z());
        assert!(rotations.iter().all(|q| *q == Quat::identity()));
    }

    #[test]
    fn test_curled_finger() {
        let mut hand = [Point3::zeros(); HandIndex::COUNT];
        let chain = Finger::Middle.landmark_chain();
        hand[chain[0]] = Point3::new(0.0, 0.0, 0.0);
        hand[chain[1]] = Point3::new(0.0, 0.0, 0.1);
        hand[chain[2]] = Point3::new(0.0, -0.1, 0.1);
        hand[chain[3]] = Point3::new(0.0, -0.1, 0.0);
        let [a, b, c] = finger_rotations(&hand, Finger::Middle, Point3::z());
        assert_eq!(a, Quat::identity());
        assert!(approx_eq_vec(&(b * Point3::z()), &-Point3::y(), 1e-9));
        assert!(approx_eq_vec(&(c * Point3::z()), &-Point3::z(), 1e-9));
    }

    #[test]
    fn test_partial_hand_gives_identity() {
        let frame = Frame {
            left_hand: vec![Landmark::new(0.3, 0.2, 0.1); 20],
            ..Frame::default()
        };
        let mut world = BoneRotations::new();
        solve_fingers(&frame, Side::Left, Skeleton::get(), &mut world);
        assert_eq!(world.len(), 15);
        assert!(world.values().all(|q| *q == Quat::identity()));
        assert!(world.keys().all(|b| b.as_str().starts_with("Left")));
    }
}
