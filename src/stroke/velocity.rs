use crate::pose::{Frame, PoseIndex};

/// 両手首の速度系列（フレーム間移動量の左右平均）
///
/// `v[0] = 0`。前後どちらかのフレームで手首点が欠けていれば 0。
pub fn wrist_velocity(frames: &[Frame]) -> Vec<f64> {
    let mut velocity = vec![0.0; frames.len()];
    for (i, pair) in frames.windows(2).enumerate() {
        let (prev, curr) = (&pair[0], &pair[1]);
        if !has_wrists(prev) || !has_wrists(curr) {
            continue;
        }
        let left = wrist_distance(prev, curr, PoseIndex::LeftWrist);
        let right = wrist_distance(prev, curr, PoseIndex::RightWrist);
        velocity[i + 1] = (left + right) / 2.0;
    }
    velocity
}

fn has_wrists(frame: &Frame) -> bool {
    frame.has_pose_point(PoseIndex::LeftWrist) && frame.has_pose_point(PoseIndex::RightWrist)
}

fn wrist_distance(prev: &Frame, curr: &Frame, wrist: PoseIndex) -> f64 {
    (curr.pose_world(wrist) - prev.pose_world(wrist)).norm()
}
