pub mod arm;
pub mod bone;
pub mod compose;
pub mod export;
pub mod finger;
pub mod hand;
pub mod rotation;
pub mod skeleton;
pub mod torso;

use std::collections::BTreeMap;

use rayon::prelude::*;

use crate::pose::{Frame, Side};

pub use bone::{ArmPart, BoneName, Finger};
pub use export::FrameQuaternions;
pub use rotation::{minimal_rotation, Quat};
pub use skeleton::Skeleton;

/// ボーン → 回転（宣言順）
pub type BoneRotations = BTreeMap<BoneName, Quat>;

/// ランドマークから VRM ヒューマノイドの局所回転を求める
pub struct Retargeter {
    skeleton: &'static Skeleton,
}

impl Retargeter {
    pub fn new() -> Self {
        Self {
            skeleton: Skeleton::get(),
        }
    }

    /// 全42ボーンのワールド回転
    pub fn solve_world(&self, frame: &Frame) -> BoneRotations {
        let mut world = BoneRotations::new();
        torso::solve_torso(frame, &mut world);
        for side in Side::BOTH {
            arm::solve_arm(frame, side, self.skeleton, &mut world);
            finger::solve_fingers(frame, side, self.skeleton, &mut world);
        }
        world
    }

    /// 全42ボーンの局所回転
    pub fn compute(&self, frame: &Frame) -> BoneRotations {
        compose::to_local(&self.solve_world(frame), self.skeleton)
    }

    pub fn retarget_frame(&self, frame: &Frame) -> FrameQuaternions {
        FrameQuaternions::new(frame.index, &self.compute(frame))
    }

    /// フレームごとに並列で解き、フレーム番号順に返す
    pub fn retarget_frames(&self, frames: &[Frame]) -> Vec<FrameQuaternions> {
        let mut records: Vec<FrameQuaternions> = frames.par_iter().map(|f| self.retarget_frame(f)).collect();
        export::sort_records(&mut records);
        log::info!("retargeted {} frames", records.len());
        records
    }
}

impl Default for Retargeter {
    fn default() -> Self {
        Self::new()
    }
}
