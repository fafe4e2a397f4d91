use serde::{Deserialize, Serialize};

/// One of the 27 cells of a 3x3x3 cube, seen from its center.
///
/// Used both as a growth direction for body parts and as the key under
/// which a child plan hangs off its parent. The derived ordering is the
/// declaration order, which fixes the order children are visited in.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CubeElement {
    Center,
    Front,
    Back,
    Right,
    Left,
    Top,
    Bottom,
    FrontRight,
    FrontLeft,
    FrontTop,
    FrontBottom,
    BackRight,
    BackLeft,
    BackTop,
    BackBottom,
    RightTop,
    RightBottom,
    LeftTop,
    LeftBottom,
    FrontRightTop,
    FrontRightBottom,
    FrontLeftTop,
    FrontLeftBottom,
    BackRightTop,
    BackRightBottom,
    BackLeftTop,
    BackLeftBottom,
}

impl CubeElement {
    pub const ALL: [CubeElement; 27] = [
        CubeElement::Center,
        CubeElement::Front,
        CubeElement::Back,
        CubeElement::Right,
        CubeElement::Left,
        CubeElement::Top,
        CubeElement::Bottom,
        CubeElement::FrontRight,
        CubeElement::FrontLeft,
        CubeElement::FrontTop,
        CubeElement::FrontBottom,
        CubeElement::BackRight,
        CubeElement::BackLeft,
        CubeElement::BackTop,
        CubeElement::BackBottom,
        CubeElement::RightTop,
        CubeElement::RightBottom,
        CubeElement::LeftTop,
        CubeElement::LeftBottom,
        CubeElement::FrontRightTop,
        CubeElement::FrontRightBottom,
        CubeElement::FrontLeftTop,
        CubeElement::FrontLeftBottom,
        CubeElement::BackRightTop,
        CubeElement::BackRightBottom,
        CubeElement::BackLeftTop,
        CubeElement::BackLeftBottom,
    ];

    /// The six face directions, the only ones the mutator grows along.
    pub const FACES: [CubeElement; 6] = [
        CubeElement::Front,
        CubeElement::Left,
        CubeElement::Top,
        CubeElement::Back,
        CubeElement::Right,
        CubeElement::Bottom,
    ];

    /// Integer offset of this cell from the cube center.
    #[must_use]
    pub const fn offset(self) -> [i32; 3] {
        match self {
            CubeElement::Center => [0, 0, 0],
            CubeElement::Front => [1, 0, 0],
            CubeElement::Back => [-1, 0, 0],
            CubeElement::Right => [0, 1, 0],
            CubeElement::Left => [0, -1, 0],
            CubeElement::Top => [0, 0, 1],
            CubeElement::Bottom => [0, 0, -1],
            CubeElement::FrontRight => [1, 1, 0],
            CubeElement::FrontLeft => [1, -1, 0],
            CubeElement::FrontTop => [1, 0, 1],
            CubeElement::FrontBottom => [1, 0, -1],
            CubeElement::BackRight => [-1, 1, 0],
            CubeElement::BackLeft => [-1, -1, 0],
            CubeElement::BackTop => [-1, 0, 1],
            CubeElement::BackBottom => [-1, 0, -1],
            CubeElement::RightTop => [0, 1, 1],
            CubeElement::RightBottom => [0, 1, -1],
            CubeElement::LeftTop => [0, -1, 1],
            CubeElement::LeftBottom => [0, -1, -1],
            CubeElement::FrontRightTop => [1, 1, 1],
            CubeElement::FrontRightBottom => [1, 1, -1],
            CubeElement::FrontLeftTop => [1, -1, 1],
            CubeElement::FrontLeftBottom => [1, -1, -1],
            CubeElement::BackRightTop => [-1, 1, 1],
            CubeElement::BackRightBottom => [-1, 1, -1],
            CubeElement::BackLeftTop => [-1, -1, 1],
            CubeElement::BackLeftBottom => [-1, -1, -1],
        }
    }

    /// The cell diametrically across the center. `Center` maps to itself.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            CubeElement::Center => CubeElement::Center,
            CubeElement::Front => CubeElement::Back,
            CubeElement::Back => CubeElement::Front,
            CubeElement::Right => CubeElement::Left,
            CubeElement::Left => CubeElement::Right,
            CubeElement::Top => CubeElement::Bottom,
            CubeElement::Bottom => CubeElement::Top,
            CubeElement::FrontRight => CubeElement::BackLeft,
            CubeElement::FrontLeft => CubeElement::BackRight,
            CubeElement::FrontTop => CubeElement::BackBottom,
            CubeElement::FrontBottom => CubeElement::BackTop,
            CubeElement::BackRight => CubeElement::FrontLeft,
            CubeElement::BackLeft => CubeElement::FrontRight,
            CubeElement::BackTop => CubeElement::FrontBottom,
            CubeElement::BackBottom => CubeElement::FrontTop,
            CubeElement::RightTop => CubeElement::LeftBottom,
            CubeElement::RightBottom => CubeElement::LeftTop,
            CubeElement::LeftTop => CubeElement::RightBottom,
            CubeElement::LeftBottom => CubeElement::RightTop,
            CubeElement::FrontRightTop => CubeElement::BackLeftBottom,
            CubeElement::FrontRightBottom => CubeElement::BackLeftTop,
            CubeElement::FrontLeftTop => CubeElement::BackRightBottom,
            CubeElement::FrontLeftBottom => CubeElement::BackRightTop,
            CubeElement::BackRightTop => CubeElement::FrontLeftBottom,
            CubeElement::BackRightBottom => CubeElement::FrontLeftTop,
            CubeElement::BackLeftTop => CubeElement::FrontRightBottom,
            CubeElement::BackLeftBottom => CubeElement::FrontRightTop,
        }
    }

    /// Looks up the cell with the given offset, if it is on the unit cube.
    #[must_use]
    pub fn from_offset(offset: [i32; 3]) -> Option<Self> {
        Self::ALL.into_iter().find(|e| e.offset() == offset)
    }

    /// Offset as floating point, for placement math.
    #[must_use]
    pub fn unit_vector(self) -> [f64; 3] {
        let [x, y, z] = self.offset();
        [f64::from(x), f64::from(y), f64::from(z)]
    }
}

/// Rotation axis of a joint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Unit direction vector of the axis.
    #[must_use]
    pub const fn vector(self) -> [f64; 3] {
        match self {
            Axis::X => [1.0, 0.0, 0.0],
            Axis::Y => [0.0, 1.0, 0.0],
            Axis::Z => [0.0, 0.0, 1.0],
        }
    }
}
