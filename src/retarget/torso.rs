use crate::pose::{Frame, Point3, PoseIndex};

use super::bone::BoneName;
use super::rotation::rotation_from_direction;
use super::BoneRotations;

fn midpoint(a: Point3, b: Point3) -> Point3 {
    (a + b) * 0.5
}

/// 体幹の向き（腰中心 → 肩中心）と首の向き（肩中心 → 鼻）
pub fn torso_directions(frame: &Frame) -> (Point3, Point3) {
    let hip_center = midpoint(
        frame.pose_world(PoseIndex::LeftHip),
        frame.pose_world(PoseIndex::RightHip),
    );
    let shoulder_center = midpoint(
        frame.pose_world(PoseIndex::LeftShoulder),
        frame.pose_world(PoseIndex::RightShoulder),
    );
    let nose = frame.pose_world(PoseIndex::Nose);
    (shoulder_center - hip_center, nose - shoulder_center)
}

/// Spine/Chest/Neck/Head のワールド回転
///
/// Chest は Spine と、Head は Neck と同じ向きを使う。
pub fn solve_torso(frame: &Frame, world: &mut BoneRotations) {
    let (spine_dir, neck_dir) = torso_directions(frame);
    let spine = rotation_from_direction(spine_dir);
    let neck = rotation_from_direction(neck_dir);

    world.insert(BoneName::Spine, spine);
    world.insert(BoneName::Chest, spine);
    world.insert(BoneName::Neck, neck);
    world.insert(BoneName::Head, neck);
}
