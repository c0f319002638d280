use serde::{Deserialize, Serialize};
use strum_macros::{Display, IntoStaticStr};

use crate::pose::Side;

/// 出力対象のヒューマノイドボーン（VRM Humanoid 名）
///
/// 宣言順 = 出力順。下半身は扱わない。
/// 名前は serde も Display も variant 名そのまま。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display, IntoStaticStr)]
pub enum BoneName {
    Spine,
    Chest,
    Neck,
    Head,
    LeftShoulder,
    LeftUpperArm,
    LeftLowerArm,
    LeftHand,
    RightShoulder,
    RightUpperArm,
    RightLowerArm,
    RightHand,
    LeftThumbMetacarpal,
    LeftThumbProximal,
    LeftThumbDistal,
    LeftIndexProximal,
    LeftIndexIntermediate,
    LeftIndexDistal,
    LeftMiddleProximal,
    LeftMiddleIntermediate,
    LeftMiddleDistal,
    LeftRingProximal,
    LeftRingIntermediate,
    LeftRingDistal,
    LeftLittleProximal,
    LeftLittleIntermediate,
    LeftLittleDistal,
    RightThumbMetacarpal,
    RightThumbProximal,
    RightThumbDistal,
    RightIndexProximal,
    RightIndexIntermediate,
    RightIndexDistal,
    RightMiddleProximal,
    RightMiddleIntermediate,
    RightMiddleDistal,
    RightRingProximal,
    RightRingIntermediate,
    RightRingDistal,
    RightLittleProximal,
    RightLittleIntermediate,
    RightLittleDistal,
}

/// 腕チェーンの部位
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArmPart {
    Shoulder,
    UpperArm,
    LowerArm,
    Hand,
}

impl ArmPart {
    pub const ALL: [ArmPart; 4] = [ArmPart::Shoulder, ArmPart::UpperArm, ArmPart::LowerArm, ArmPart::Hand];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Finger {
    Thumb,
    Index,
    Middle,
    Ring,
    Little,
}

impl Finger {
    pub const ALL: [Finger; 5] = [Finger::Thumb, Finger::Index, Finger::Middle, Finger::Ring, Finger::Little];

    /// 手ランドマーク上の関節列（根元 → 指先, 4点で3節）
    pub fn landmark_chain(self) -> [usize; 4] {
        let base = match self {
            Finger::Thumb => 1,
            Finger::Index => 5,
            Finger::Middle => 9,
            Finger::Ring => 13,
            Finger::Little => 17,
        };
        [base, base + 1, base + 2, base + 3]
    }
}

impl BoneName {
    pub const COUNT: usize = 42;

    pub const ALL: [BoneName; BoneName::COUNT] = {
        use BoneName::*;
        [
            Spine, Chest, Neck, Head,
            LeftShoulder, LeftUpperArm, LeftLowerArm, LeftHand,
            RightShoulder, RightUpperArm, RightLowerArm, RightHand,
            LeftThumbMetacarpal, LeftThumbProximal, LeftThumbDistal,
            LeftIndexProximal, LeftIndexIntermediate, LeftIndexDistal,
            LeftMiddleProximal, LeftMiddleIntermediate, LeftMiddleDistal,
            LeftRingProximal, LeftRingIntermediate, LeftRingDistal,
            LeftLittleProximal, LeftLittleIntermediate, LeftLittleDistal,
            RightThumbMetacarpal, RightThumbProximal, RightThumbDistal,
            RightIndexProximal, RightIndexIntermediate, RightIndexDistal,
            RightMiddleProximal, RightMiddleIntermediate, RightMiddleDistal,
            RightRingProximal, RightRingIntermediate, RightRingDistal,
            RightLittleProximal, RightLittleIntermediate, RightLittleDistal,
        ]
    };

    pub const TORSO: [BoneName; 4] = [BoneName::Spine, BoneName::Chest, BoneName::Neck, BoneName::Head];

    pub fn arm(side: Side, part: ArmPart) -> Self {
        use BoneName::*;
        match (side, part) {
            (Side::Left, ArmPart::Shoulder) => LeftShoulder,
            (Side::Left, ArmPart::UpperArm) => LeftUpperArm,
            (Side::Left, ArmPart::LowerArm) => LeftLowerArm,
            (Side::Left, ArmPart::Hand) => LeftHand,
            (Side::Right, ArmPart::Shoulder) => RightShoulder,
            (Side::Right, ArmPart::UpperArm) => RightUpperArm,
            (Side::Right, ArmPart::LowerArm) => RightLowerArm,
            (Side::Right, ArmPart::Hand) => RightHand,
        }
    }

    /// 指の節。`segment` は 0 (根元) .. 2 (先端)
    pub fn finger(side: Side, finger: Finger, segment: usize) -> Self {
        let first = match side {
            Side::Left => BoneName::LeftThumbMetacarpal as usize,
            Side::Right => BoneName::RightThumbMetacarpal as usize,
        };
        let finger_offset = Finger::ALL.iter().position(|f| *f == finger).unwrap_or(0) * 3;
        Self::ALL[first + finger_offset + segment.min(2)]
    }

    /// 片手15節（指ごとに根元→先端）
    pub fn finger_bones(side: Side) -> impl Iterator<Item = BoneName> {
        Finger::ALL
            .into_iter()
            .flat_map(move |finger| (0..3).map(move |segment| BoneName::finger(side, finger, segment)))
    }

    pub fn as_str(self) -> &'static str {
        self.into()
    }
}
