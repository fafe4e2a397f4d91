//! Part catalog: sizing, placement and colour per [`BodyPartKind`].
//!
//! The kinds form a closed sum type, so instantiation is one `match` rather
//! than a table of constructors.

use crate::config::BuildConfig;
use crate::emitter::SolidRecord;
use crate::geometry::{add3, mul3, random_in3, scale3};
use faery_data::{BodyPartKind, CubeElement, Dimensions, Position};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Debug colour of a part. Rendering only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColorTag {
    Cyan,
    Red,
    Green,
    Blue,
    Yellow,
    Purple,
}

impl ColorTag {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            ColorTag::Cyan => "Cyan",
            ColorTag::Red => "Red",
            ColorTag::Green => "Green",
            ColorTag::Blue => "Blue",
            ColorTag::Yellow => "Yellow",
            ColorTag::Purple => "Purple",
        }
    }

    #[must_use]
    pub const fn rgba(self) -> [f64; 4] {
        match self {
            ColorTag::Cyan => [0.0, 1.0, 1.0, 1.0],
            ColorTag::Red => [1.0, 0.0, 0.0, 1.0],
            ColorTag::Green => [0.0, 1.0, 0.0, 1.0],
            ColorTag::Blue => [0.0, 0.0, 1.0, 1.0],
            ColorTag::Yellow => [1.0, 1.0, 0.0, 1.0],
            ColorTag::Purple => [0.5, 0.0, 0.5, 1.0],
        }
    }
}

/// A part placed in the world by the builder.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedPart {
    /// Sequential part id, in creation order.
    pub id: usize,
    /// Body-plan node that grew this part.
    pub node_id: u64,
    pub kind: BodyPartKind,
    pub center: Position,
    pub size: Dimensions,
}

impl PlacedPart {
    #[must_use]
    pub fn solid(&self) -> SolidRecord {
        SolidRecord {
            id: self.id,
            position: self.center,
            size: self.size,
            color: self.kind.color_tag(),
        }
    }

    /// World point on this part's surface in `direction` from its center.
    #[must_use]
    pub fn anchor(&self, direction: CubeElement) -> Position {
        Position::from(add3(
            self.center.to_array(),
            mul3(scale3(0.5, self.size.to_array()), direction.unit_vector()),
        ))
    }
}

pub trait PartLogic {
    fn sample_size<R: Rng>(&self, config: &BuildConfig, rng: &mut R) -> Dimensions;

    /// Places a new part whose `attachment_on_self` face touches `attach_point`.
    ///
    /// `attachment_on_self` points from the new part toward its parent.
    fn instantiate<R: Rng>(
        &self,
        attach_point: Position,
        attachment_on_self: CubeElement,
        part_id: usize,
        node_id: u64,
        config: &BuildConfig,
        rng: &mut R,
    ) -> PlacedPart;

    fn color_tag(&self) -> ColorTag;
}

impl PartLogic for BodyPartKind {
    fn sample_size<R: Rng>(&self, config: &BuildConfig, rng: &mut R) -> Dimensions {
        match self.fixed_size() {
            Some(edge) => Dimensions::cube(edge),
            None => Dimensions::from(random_in3(
                rng,
                config.random_size_min,
                config.random_size_max,
            )),
        }
    }

    fn instantiate<R: Rng>(
        &self,
        attach_point: Position,
        attachment_on_self: CubeElement,
        part_id: usize,
        node_id: u64,
        config: &BuildConfig,
        rng: &mut R,
    ) -> PlacedPart {
        let size = self.sample_size(config, rng);
        let center = add3(
            attach_point.to_array(),
            mul3(
                scale3(-0.5, size.to_array()),
                attachment_on_self.unit_vector(),
            ),
        );
        PlacedPart {
            id: part_id,
            node_id,
            kind: *self,
            center: Position::from(center),
            size,
        }
    }

    fn color_tag(&self) -> ColorTag {
        match self {
            BodyPartKind::RandomSizedBody => ColorTag::Cyan,
            BodyPartKind::FixedSizedBody { .. } => ColorTag::Red,
            BodyPartKind::RandomSizedSensor | BodyPartKind::FixedSizedSensor { .. } => {
                ColorTag::Green
            }
            BodyPartKind::FixedSizedUnmovableBody { .. } => ColorTag::Blue,
            BodyPartKind::FixedSizedUnmovableSensor { .. } => ColorTag::Yellow,
            BodyPartKind::FixedUnchangeableBrain { .. } => ColorTag::Purple,
        }
    }
}

/// The kinds a type mutation or a graft may pick.
#[must_use]
pub fn mutable_catalog(size: f64) -> [BodyPartKind; 4] {
    [
        BodyPartKind::FixedSizedBody { size },
        BodyPartKind::FixedSizedSensor { size },
        BodyPartKind::FixedSizedUnmovableBody { size },
        BodyPartKind::FixedSizedUnmovableSensor { size },
    ]
}

/// Uniform pick from [`mutable_catalog`].
pub fn random_kind<R: Rng>(size: f64, rng: &mut R) -> BodyPartKind {
    let catalog = mutable_catalog(size);
    catalog[rng.gen_range(0..catalog.len())]
}
