use std::sync::LazyLock;

use crate::pose::{Point3, Side};

use super::bone::{ArmPart, BoneName, Finger};

static SKELETON: LazyLock<Skeleton> = LazyLock::new(Skeleton::humanoid);

/// レストポーズの基準方向と親子関係（プロセス全体で不変）
///
/// 親テーブルは局所回転の合成に使う関係そのもの。
/// 指の根元の節は親なし（単位回転の手フレームにぶら下がる扱い）で、
/// 解いた Hand のワールド回転には相対化しない。
#[derive(Debug, Clone)]
pub struct Skeleton {
    parents: [Option<BoneName>; BoneName::COUNT],
    left_arm_rest: Point3,
    right_arm_rest: Point3,
    finger_rest: Point3,
}

impl Skeleton {
    /// 共有インスタンス
    pub fn get() -> &'static Skeleton {
        &SKELETON
    }

    fn humanoid() -> Self {
        let mut parents = [None; BoneName::COUNT];
        let mut link = |child: BoneName, parent: BoneName| parents[child as usize] = Some(parent);

        link(BoneName::Chest, BoneName::Spine);
        link(BoneName::Neck, BoneName::Chest);
        link(BoneName::Head, BoneName::Neck);
        for side in Side::BOTH {
            let mut parent = BoneName::Chest;
            for part in ArmPart::ALL {
                let bone = BoneName::arm(side, part);
                link(bone, parent);
                parent = bone;
            }
            for finger in Finger::ALL {
                for segment in 1..3 {
                    link(
                        BoneName::finger(side, finger, segment),
                        BoneName::finger(side, finger, segment - 1),
                    );
                }
            }
        }

        Self {
            parents,
            // T ポーズ: 右腕は -X, 左腕は +X（前腕も同じ）
            left_arm_rest: Point3::new(1.0, 0.0, 0.0),
            right_arm_rest: Point3::new(-1.0, 0.0, 0.0),
            // 伸ばした指は +Z
            finger_rest: Point3::new(0.0, 0.0, 1.0),
        }
    }

    pub fn parent(&self, bone: BoneName) -> Option<BoneName> {
        self.parents[bone as usize]
    }

    pub fn is_root(&self, bone: BoneName) -> bool {
        self.parent(bone).is_none()
    }

    /// 上腕・前腕のレスト方向
    pub fn arm_rest(&self, side: Side) -> Point3 {
        match side {
            Side::Left => self.left_arm_rest,
            Side::Right => self.right_arm_rest,
        }
    }

    pub fn finger_rest(&self) -> Point3 {
        self.finger_rest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_torso_chain() {
        let s = Skeleton::get();
        assert!(s.is_root(BoneName::Spine));
        assert_eq!(s.parent(BoneName::Chest), Some(BoneName::Spine));
        assert_eq!(s.parent(BoneName::Neck), Some(BoneName::Chest));
        assert_eq!(s.parent(BoneName::Head), Some(BoneName::Neck));
    }

    #[test]
    fn test_arm_chain_hangs_from_chest() {
        let s = Skeleton::get();
        assert_eq!(s.parent(BoneName::LeftShoulder), Some(BoneName::Chest));
        assert_eq!(s.parent(BoneName::RightShoulder), Some(BoneName::Chest));
        assert_eq!(s.parent(BoneName::RightUpperArm), Some(BoneName::RightShoulder));
        assert_eq!(s.parent(BoneName::RightLowerArm), Some(BoneName::RightUpperArm));
        assert_eq!(s.parent(BoneName::LeftHand), Some(BoneName::LeftLowerArm));
    }

    #[test]
    fn test_finger_roots_have_no_parent() {
        let s = Skeleton::get();
        assert!(s.is_root(BoneName::LeftThumbMetacarpal));
        assert!(s.is_root(BoneName::RightIndexProximal));
        assert_eq!(s.parent(BoneName::LeftIndexIntermediate), Some(BoneName::LeftIndexProximal));
        assert_eq!(s.parent(BoneName::RightLittleDistal), Some(BoneName::RightLittleIntermediate));
    }

    #[test]
    fn test_roots() {
        let s = Skeleton::get();
        let roots = BoneName::ALL.iter().filter(|b| s.is_root(**b)).count();
        // Spine + 指の根元 10 本
        assert_eq!(roots, 11);
    }

    #[test]
    fn test_rest_directions() {
        let s = Skeleton::get();
        assert_eq!(s.arm_rest(Side::Left), Point3::new(1.0, 0.0, 0.0));
        assert_eq!(s.arm_rest(Side::Right), Point3::new(-1.0, 0.0, 0.0));
        assert_eq!(s.finger_rest(), Point3::new(0.0, 0.0, 1.0));
    }
}
