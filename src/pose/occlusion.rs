use super::frame::{FaceAnchor, Frame, RawFrame, FACE_ANCHOR_NAMES};
use super::landmark::{HandIndex, Landmark, Side};

/// 検出の欠落を直前の値で埋めるフィルタ
///
/// pose / 顔アンカー: 未検出なら直前に採用した値を再利用、まだ無ければ空
/// 手: 21点そろった検出だけ採用。それ以外は直前の21点、まだ無ければ全ゼロ21点
pub struct OcclusionFilter {
    last_pose: Option<Vec<Landmark>>,
    last_face: Option<Vec<FaceAnchor>>,
    last_left_hand: Option<Vec<Landmark>>,
    last_right_hand: Option<Vec<Landmark>>,
}

impl OcclusionFilter {
    pub fn new() -> Self {
        Self {
            last_pose: None,
            last_face: None,
            last_left_hand: None,
            last_right_hand: None,
        }
    }

    /// 1フレーム分を補完する。`position` はクリップ内の位置
    pub fn apply(&mut self, position: usize, raw: RawFrame) -> Frame {
        let index = raw.frame.unwrap_or(position);

        let pose = match raw.pose {
            Some(pose) if !pose.is_empty() => {
                self.last_pose = Some(pose.clone());
                pose
            }
            _ => self.last_pose.clone().unwrap_or_default(),
        };

        // 既知の名前が1つも無ければ未検出と同じ扱い
        let known = raw.face_anchors.map(|mut anchors| {
            anchors.retain(|a| FACE_ANCHOR_NAMES.contains(&a.name.as_str()));
            anchors
        });
        let face_anchors = match known {
            Some(anchors) if !anchors.is_empty() => {
                self.last_face = Some(anchors.clone());
                anchors
            }
            _ => self.last_face.clone().unwrap_or_default(),
        };

        let left_hand = self.fill_hand(Side::Left, raw.left_hand);
        let right_hand = self.fill_hand(Side::Right, raw.right_hand);

        Frame {
            index,
            pose,
            left_hand,
            right_hand,
            face_anchors,
        }
    }

    fn fill_hand(&mut self, side: Side, detection: Option<Vec<Landmark>>) -> Vec<Landmark> {
        let last = match side {
            Side::Left => &mut self.last_left_hand,
            Side::Right => &mut self.last_right_hand,
        };
        match detection {
            Some(hand) if hand.len() == HandIndex::COUNT => {
                *last = Some(hand.clone());
                hand
            }
            Some(hand) => {
                log::debug!("{:?} hand: {} points, reusing last detection", side, hand.len());
                last.clone().unwrap_or_else(placeholder_hand)
            }
            None => last.clone().unwrap_or_else(placeholder_hand),
        }
    }

    pub fn reset(&mut self) {
        self.last_pose = None;
        self.last_face = None;
        self.last_left_hand = None;
        self.last_right_hand = None;
    }
}

impl Default for OcclusionFilter {
    fn default() -> Self {
        Self::new()
    }
}

/// 一度も検出されていない手の代わりに使う全ゼロ21点
pub fn placeholder_hand() -> Vec<Landmark> {
    vec![Landmark::ZERO; HandIndex::COUNT]
}

/// クリップ全体に補完をかける
pub fn fill_clip(raw_frames: Vec<RawFrame>) -> Vec<Frame> {
    let mut filter = OcclusionFilter::new();
    raw_frames
        .into_iter()
        .enumerate()
        .map(|(position, raw)| filter.apply(position, raw))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hand(offset: f64) -> Vec<Landmark> {
        (0..HandIndex::COUNT)
            .map(|i| Landmark::new(offset + i as f64 * 0.01, offset, -offset))
            .collect()
    }

    fn pose(offset: f64) -> Vec<Landmark> {
        vec![Landmark::new(offset, offset, offset); 33]
    }

    #[test]
    fn test_hand_placeholder_before_first_detection() {
        let mut f = OcclusionFilter::new();
        let frame = f.apply(0, RawFrame::default());
        assert_eq!(frame.left_hand, placeholder_hand());
        assert_eq!(frame.right_hand, placeholder_hand());
        assert!(frame.left_hand.iter().all(|l| *l == Landmark::ZERO));
    }

    #[test]
    fn test_missing_hand_reuses_last_detection() {
        let mut f = OcclusionFilter::new();
        let first = hand(0.3);
        f.apply(0, RawFrame { left_hand: Some(first.clone()), ..RawFrame::default() });
        let frame = f.apply(1, RawFrame::default());
        assert_eq!(frame.left_hand, first);
        // 右手は一度も検出されていない
        assert_eq!(frame.right_hand, placeholder_hand());
    }

    #[test]
    fn test_partial_hand_is_rejected() {
        let mut f = OcclusionFilter::new();
        let good = hand(0.5);
        f.apply(0, RawFrame { right_hand: Some(good.clone()), ..RawFrame::default() });
        let partial = hand(0.9)[..12].to_vec();
        let frame = f.apply(1, RawFrame { right_hand: Some(partial), ..RawFrame::default() });
        assert_eq!(frame.right_hand, good);
    }

    #[test]
    fn test_partial_hand_before_any_detection_gets_placeholder() {
        let mut f = OcclusionFilter::new();
        let partial = hand(0.9)[..5].to_vec();
        let frame = f.apply(0, RawFrame { left_hand: Some(partial), ..RawFrame::default() });
        assert_eq!(frame.left_hand, placeholder_hand());
    }

    #[test]
    fn test_pose_and_face_carry_forward() {
        let mut f = OcclusionFilter::new();
        let first = f.apply(0, RawFrame::default());
        assert!(first.pose.is_empty());
        assert!(first.face_anchors.is_empty());

        let anchors = vec![FaceAnchor { name: "chin".to_string(), xyz: Landmark::new(0.5, 0.9, 0.0) }];
        f.apply(1, RawFrame {
            pose: Some(pose(0.2)),
            face_anchors: Some(anchors.clone()),
            ..RawFrame::default()
        });
        let frame = f.apply(2, RawFrame { pose: Some(Vec::new()), ..RawFrame::default() });
        assert_eq!(frame.pose, pose(0.2));
        assert_eq!(frame.face_anchors, anchors);
    }

    #[test]
    fn test_unknown_face_anchor_dropped() {
        let mut f = OcclusionFilter::new();
        let anchors = vec![
            FaceAnchor { name: "glabella".to_string(), xyz: Landmark::ZERO },
            FaceAnchor { name: "ear_lobe".to_string(), xyz: Landmark::ZERO },
        ];
        let frame = f.apply(0, RawFrame { face_anchors: Some(anchors), ..RawFrame::default() });
        assert_eq!(frame.face_anchors.len(), 1);
        assert_eq!(frame.face_anchors[0].name, "glabella");
    }

    #[test]
    fn test_only_unknown_face_anchors_keep_last_accepted() {
        let mut f = OcclusionFilter::new();
        let chin = vec![FaceAnchor { name: "chin".to_string(), xyz: Landmark::new(0.5, 0.9, 0.0) }];
        f.apply(0, RawFrame { face_anchors: Some(chin.clone()), ..RawFrame::default() });

        let ear = vec![FaceAnchor { name: "ear".to_string(), xyz: Landmark::ZERO }];
        let frame = f.apply(1, RawFrame { face_anchors: Some(ear), ..RawFrame::default() });
        assert_eq!(frame.face_anchors, chin);
        let frame = f.apply(2, RawFrame::default());
        assert_eq!(frame.face_anchors, chin);
    }

    #[test]
    fn test_reset() {
        let mut f = OcclusionFilter::new();
        f.apply(0, RawFrame { left_hand: Some(hand(0.1)), pose: Some(pose(0.1)), ..RawFrame::default() });
        f.reset();
        let frame = f.apply(1, RawFrame::default());
        assert!(frame.pose.is_empty());
        assert_eq!(frame.left_hand, placeholder_hand());
    }

    #[test]
    fn test_fill_clip_keeps_order_and_indices() {
        let raws = vec![
            RawFrame { left_hand: Some(hand(0.1)), ..RawFrame::default() },
            RawFrame::default(),
            RawFrame { frame: Some(10), ..RawFrame::default() },
        ];
        let frames = fill_clip(raws);
        assert_eq!(frames.iter().map(|f| f.index).collect::<Vec<_>>(), vec![0, 1, 10]);
        assert_eq!(frames[1].left_hand, hand(0.1));
        assert_eq!(frames[2].left_hand, hand(0.1));
    }

    #[test]
    fn test_fill_clip_empty() {
        assert!(fill_clip(Vec::new()).is_empty());
    }
}
