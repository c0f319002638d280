use super::bone::BoneName;
use super::rotation::Quat;
use super::skeleton::Skeleton;
use super::BoneRotations;

fn world_of(world: &BoneRotations, bone: BoneName) -> Quat {
    world.get(&bone).copied().unwrap_or_else(Quat::identity)
}

/// ワールド回転を親基準の局所回転に変換する
///
/// local = inverse(world(parent)) * world、親なしは local = world。
/// マップに無いボーンは単位回転として扱い、結果は全ボーン分そろう。
pub fn to_local(world: &BoneRotations, skeleton: &Skeleton) -> BoneRotations {
    BoneName::ALL
        .into_iter()
        .map(|bone| {
            let q = world_of(world, bone);
            let local = match skeleton.parent(bone) {
                Some(parent) => world_of(world, parent).inverse() * q,
                None => q,
            };
            (bone, local)
        })
        .collect()
}

/// 局所回転からワールド回転を組み立て直す（親は宣言順で先に来る）
pub fn to_world(local: &BoneRotations, skeleton: &Skeleton) -> BoneRotations {
    let mut world = BoneRotations::new();
    for bone in BoneName::ALL {
        let q = world_of(local, bone);
        let q = match skeleton.parent(bone) {
            Some(parent) => world_of(&world, parent) * q,
            None => q,
        };
        world.insert(bone, q);
    }
    world
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pose::Point3;
    use crate::retarget::rotation::tests::approx_eq_quat;

    fn sample_world() -> BoneRotations {
        BoneName::ALL
            .into_iter()
            .enumerate()
            .map(|(i, bone)| {
                let axis = nalgebra::Unit::new_normalize(Point3::new(1.0, i as f64 * 0.3, -0.5 + i as f64 * 0.01));
                (bone, Quat::from_axis_angle(&axis, 0.1 * i as f64))
            })
            .collect()
    }

    #[test]
    fn test_parents_precede_children() {
        let skeleton = Skeleton::get();
        for bone in BoneName::ALL {
            if let Some(parent) = skeleton.parent(bone) {
                assert!(parent < bone, "{} -> {}", parent, bone);
            }
        }
    }

    #[test]
    fn test_recompose_reproduces_world() {
        let skeleton = Skeleton::get();
        let world = sample_world();
        let local = to_local(&world, skeleton);
        for bone in BoneName::ALL {
            let expected = world[&bone];
            let recomposed = match skeleton.parent(bone) {
                Some(parent) => world[&parent] * local[&bone],
                None => local[&bone],
            };
            assert!(approx_eq_quat(&recomposed, &expected, 1e-6), "{}", bone);
        }
        let rebuilt = to_world(&local, skeleton);
        for bone in BoneName::ALL {
            assert!(approx_eq_quat(&rebuilt[&bone], &world[&bone], 1e-6), "{}", bone);
        }
    }

    #[test]
    fn test_roots_keep_world() {
        let skeleton = Skeleton::get();
        let world = sample_world();
        let local = to_local(&world, skeleton);
        assert_eq!(local[&BoneName::Spine], world[&BoneName::Spine]);
        assert_eq!(local[&BoneName::LeftIndexProximal], world[&BoneName::LeftIndexProximal]);
    }

    #[test]
    fn test_missing_bones_are_identity() {
        let mut world = BoneRotations::new();
        let q = Quat::from_axis_angle(&Point3::y_axis(), 0.5);
        world.insert(BoneName::Chest, q);
        let local = to_local(&world, Skeleton::get());
        assert_eq!(local.len(), BoneName::COUNT);
        assert!(approx_eq_quat(&local[&BoneName::Chest], &q, 1e-12));
        assert!(approx_eq_quat(&local[&BoneName::Neck], &q.inverse(), 1e-12));
        assert_eq!(local[&BoneName::Head], Quat::identity());
    }
}
