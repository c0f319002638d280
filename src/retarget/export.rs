use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::bone::BoneName;
use super::rotation::to_xyzw;
use super::BoneRotations;

/// 1フレーム分の出力（ボーン名 → [x, y, z, w]、宣言順）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameQuaternions {
    pub frame: usize,
    pub quaternions: BTreeMap<BoneName, [f64; 4]>,
}

impl FrameQuaternions {
    pub fn new(frame: usize, local: &BoneRotations) -> Self {
        Self {
            frame,
            quaternions: local.iter().map(|(bone, q)| (*bone, to_xyzw(q))).collect(),
        }
    }

    pub fn get(&self, bone: BoneName) -> Option<[f64; 4]> {
        self.quaternions.get(&bone).copied()
    }
}

/// フレーム番号の昇順に並べる
pub fn sort_records(records: &mut [FrameQuaternions]) {
    records.sort_by_key(|r| r.frame);
}
