use nalgebra::{Rotation3, Unit, UnitQuaternion};

use crate::pose::Point3;

pub type Quat = UnitQuaternion<f64>;

/// これ以下の長さのベクトルは方向を持たないとみなす
pub const MIN_LENGTH: f64 = 1e-8;
/// 平行・反平行判定の許容幅
const PARALLEL_EPS: f64 = 1e-6;

/// 正規化。長さがほぼ 0 なら None
pub fn direction(v: Point3) -> Option<Point3> {
    let len = v.norm();
    if len < MIN_LENGTH {
        None
    } else {
        Some(v / len)
    }
}

/// `from` を `to` に重ねる最小回転
///
/// 反平行の場合は `from × Y`（退化していれば `from × X`）まわりの 180° 回転。
/// どちらかが長さ 0 なら単位回転。
pub fn minimal_rotation(from: Point3, to: Point3) -> Quat {
    let (f, t) = match (direction(from), direction(to)) {
        (Some(f), Some(t)) => (f, t),
        _ => {
            log::debug!("minimal_rotation: zero-length direction, using identity");
            return Quat::identity();
        }
    };

    let c = f.dot(&t);
    if c >= 1.0 - PARALLEL_EPS {
        return Quat::identity();
    }
    if c <= -1.0 + PARALLEL_EPS {
        log::debug!("minimal_rotation: opposite directions, rotating 180 degrees about a fallback axis");
        let axis = direction(f.cross(&Point3::y()))
            .or_else(|| direction(f.cross(&Point3::x())))
            .unwrap_or_else(Point3::z);
        return Quat::from_axis_angle(&Unit::new_unchecked(axis), std::f64::consts::PI);
    }

    match direction(f.cross(&t)) {
        Some(axis) => Quat::from_axis_angle(&Unit::new_unchecked(axis), c.clamp(-1.0, 1.0).acos()),
        None => Quat::identity(),
    }
}

/// 前方と上方向から姿勢を作る
///
/// 列 = (right, up, -forward)。forward が -Z, up が +Y のとき単位回転になる。
/// up は forward と直交するよう作り直す。どちらかが退化していれば None
pub fn look_rotation(forward: Point3, up: Point3) -> Option<Quat> {
    let f = direction(forward)?;
    let right = direction(f.cross(&up))?;
    let up = right.cross(&f);
    let basis = Rotation3::from_basis_unchecked(&[right, up, -f]);
    Some(Quat::from_rotation_matrix(&basis))
}

/// 方向ベクトルだけから姿勢を作る（上方向は +Y、ほぼ平行なら +X）
pub fn rotation_from_direction(dir: Point3) -> Quat {
    let Some(f) = direction(dir) else {
        log::debug!("rotation_from_direction: zero-length direction, using identity");
        return Quat::identity();
    };
    let up = if f.dot(&Point3::y()).abs() >= 1.0 - PARALLEL_EPS {
        Point3::x()
    } else {
        Point3::y()
    };
    look_rotation(f, up).unwrap_or_else(|| {
        log::debug!("rotation_from_direction: degenerate basis for {:?}, using identity", f);
        Quat::identity()
    })
}

/// `[x, y, z, w]`
pub fn to_xyzw(q: &Quat) -> [f64; 4] {
    [q.i, q.j, q.k, q.w]
}
