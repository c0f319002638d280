use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// 正規化後（右手系, Y上, Z手前）の3D座標
pub type Point3 = Vector3<f64>;

/// MediaPipe Pose 33 点のうち使用するインデックス
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum PoseIndex {
    Nose = 0,
    LeftShoulder = 11,
    RightShoulder = 12,
    LeftElbow = 13,
    RightElbow = 14,
    LeftWrist = 15,
    RightWrist = 16,
    LeftHip = 23,
    RightHip = 24,
}

impl PoseIndex {
    pub const COUNT: usize = 33;
}

/// MediaPipe Hand 21 点のインデックス
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum HandIndex {
    Wrist = 0,
    ThumbCmc = 1,
    ThumbMcp = 2,
    ThumbIp = 3,
    ThumbTip = 4,
    IndexMcp = 5,
    IndexPip = 6,
    IndexDip = 7,
    IndexTip = 8,
    MiddleMcp = 9,
    MiddlePip = 10,
    MiddleDip = 11,
    MiddleTip = 12,
    RingMcp = 13,
    RingPip = 14,
    RingDip = 15,
    RingTip = 16,
    PinkyMcp = 17,
    PinkyPip = 18,
    PinkyDip = 19,
    PinkyTip = 20,
}

impl HandIndex {
    pub const COUNT: usize = 21;
}

/// 左右
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Left, Side::Right];
}

/// カメラ座標系（X右, Y下, Z奥が負）の単一ランドマーク
///
/// JSON では `[x, y, z]` の配列として読み書きする。
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f64; 3]", into = "[f64; 3]")]
pub struct Landmark {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Landmark {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0, z: 0.0 };

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// ワールド座標系へ変換
    pub fn to_world(&self) -> Point3 {
        to_world(Point3::new(self.x, self.y, self.z))
    }

    /// ワールド座標からカメラ座標へ戻す（変換は自己逆）
    pub fn from_world(p: Point3) -> Self {
        let q = to_world(p);
        Self::new(q.x, q.y, q.z)
    }
}

impl From<[f64; 3]> for Landmark {
    fn from(v: [f64; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

impl From<Landmark> for [f64; 3] {
    fn from(l: Landmark) -> Self {
        [l.x, l.y, l.z]
    }
}

/// カメラ座標 → ワールド座標: Y と Z を反転
pub fn to_world(p: Point3) -> Point3 {
    Point3::new(p.x, -p.y, -p.z)
}
