use crate::pose::{Frame, Point3, PoseIndex, Side};

use super::bone::{ArmPart, BoneName};
use super::hand::solve_hand;
use super::rotation::{direction, minimal_rotation, Quat};
use super::skeleton::Skeleton;
use super::BoneRotations;

fn joints(side: Side) -> (PoseIndex, PoseIndex, PoseIndex) {
    match side {
        Side::Left => (PoseIndex::LeftShoulder, PoseIndex::LeftElbow, PoseIndex::LeftWrist),
        Side::Right => (PoseIndex::RightShoulder, PoseIndex::RightElbow, PoseIndex::RightWrist),
    }
}

/// 前腕の回転。レスト方向と逆向きの場合は符号を反転したレスト方向から回す
pub fn lower_arm_rotation(rest: Point3, dir: Point3) -> Quat {
    let flip = direction(dir).is_some_and(|d| rest.dot(&d) < 0.0);
    let rest = if flip { -rest } else { rest };
    minimal_rotation(rest, dir)
}

/// 片腕の Shoulder/UpperArm/LowerArm/Hand のワールド回転
///
/// Shoulder は UpperArm と同じ回転を持つ。
pub fn solve_arm(frame: &Frame, side: Side, skeleton: &Skeleton, world: &mut BoneRotations) {
    let (shoulder, elbow, wrist) = joints(side);
    let shoulder = frame.pose_world(shoulder);
    let elbow = frame.pose_world(elbow);
    let wrist = frame.pose_world(wrist);
    let rest = skeleton.arm_rest(side);

    let upper = minimal_rotation(rest, elbow - shoulder);
    let lower = lower_arm_rotation(rest, wrist - elbow);
    let hand = solve_hand(frame.hand_world(side).as_ref());

    world.insert(BoneName::arm(side, ArmPart::Shoulder), upper);
    world.insert(BoneName::arm(side, ArmPart::UpperArm), upper);
    world.insert(BoneName::arm(side, ArmPart::LowerArm), lower);
    world.insert(BoneName::arm(side, ArmPart::Hand), hand);
}
