pub mod frame;
pub mod landmark;
pub mod occlusion;

pub use frame::{FaceAnchor, Frame, RawFrame, FACE_ANCHOR_NAMES};
pub use landmark::{to_world, HandIndex, Landmark, Point3, PoseIndex, Side};
pub use occlusion::{fill_clip, placeholder_hand, OcclusionFilter};
