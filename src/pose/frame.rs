use serde::{Deserialize, Serialize};

use super::landmark::{HandIndex, Landmark, Point3, PoseIndex, Side};

/// 顔アンカーの名前（検出器の顔メッシュから抜き出す点）
pub const FACE_ANCHOR_NAMES: [&str; 7] = [
    "nose_tip",
    "chin",
    "left_temple",
    "right_temple",
    "glabella",
    "mouth_left",
    "mouth_right",
];

/// 名前付き顔アンカー
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaceAnchor {
    pub name: String,
    pub xyz: Landmark,
}

/// 検出器から届いた生フレーム。`None` / 空配列は未検出を意味する。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawFrame {
    #[serde(default)]
    pub frame: Option<usize>,
    #[serde(default)]
    pub pose: Option<Vec<Landmark>>,
    #[serde(default)]
    pub left_hand: Option<Vec<Landmark>>,
    #[serde(default)]
    pub right_hand: Option<Vec<Landmark>>,
    #[serde(default)]
    pub face_anchors: Option<Vec<FaceAnchor>>,
}

/// 欠損補完済みのフレーム
///
/// pose は 0 点か 33 点、各手は 0 点か 21 点を想定するが、
/// 点数不足でも解析側が単位回転へ退化させるので壊れない。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    #[serde(rename = "frame")]
    pub index: usize,
    pub pose: Vec<Landmark>,
    pub left_hand: Vec<Landmark>,
    pub right_hand: Vec<Landmark>,
    pub face_anchors: Vec<FaceAnchor>,
}

impl Frame {
    /// 補完なしで生フレームを取り込む（位置 `position` はフレーム番号の既定値）
    pub fn from_raw(position: usize, raw: RawFrame) -> Self {
        Self {
            index: raw.frame.unwrap_or(position),
            pose: raw.pose.unwrap_or_default(),
            left_hand: raw.left_hand.unwrap_or_default(),
            right_hand: raw.right_hand.unwrap_or_default(),
            face_anchors: raw.face_anchors.unwrap_or_default(),
        }
    }

    pub fn hand(&self, side: Side) -> &[Landmark] {
        match side {
            Side::Left => &self.left_hand,
            Side::Right => &self.right_hand,
        }
    }

    /// pose 点が存在するか
    pub fn has_pose_point(&self, index: PoseIndex) -> bool {
        self.pose.len() > index as usize
    }

    /// ワールド座標の pose 点。欠けている点は原点として扱う。
    pub fn pose_world(&self, index: PoseIndex) -> Point3 {
        self.pose
            .get(index as usize)
            .map_or_else(Point3::zeros, Landmark::to_world)
    }

    /// 21点そろった手のワールド座標。そろっていなければ None
    pub fn hand_world(&self, side: Side) -> Option<[Point3; HandIndex::COUNT]> {
        let hand = self.hand(side);
        if hand.len() != HandIndex::COUNT {
            return None;
        }
        Some(std::array::from_fn(|i| hand[i].to_world()))
    }
}
