//! URDF body writer.
//!
//! The core hands over world coordinates. URDF wants every joint origin
//! relative to its parent link's frame and every link origin relative to
//! its incoming joint, so the writer tracks the frame of each link as it
//! goes. A link with no incoming joint sits in the world frame.

use crate::document::{num, triple, DocumentSink};
use faery_core::emitter::{JointRecord, SceneEmitter, SolidRecord};
use faery_core::geometry::{add3, scale3};
use faery_core::EmitterError;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

const JOINT_LIMIT: f64 = std::f64::consts::PI;

#[derive(Debug)]
pub struct UrdfWriter {
    sink: DocumentSink,
    /// World position of each link's frame, keyed by part id.
    frames: HashMap<usize, [f64; 3]>,
}

impl Default for UrdfWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl UrdfWriter {
    #[must_use]
    pub fn new() -> Self {
        Self {
            sink: DocumentSink::on_disk(),
            frames: HashMap::new(),
        }
    }

    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            sink: DocumentSink::in_memory(),
            frames: HashMap::new(),
        }
    }

    #[must_use]
    pub fn documents(&self) -> &[(PathBuf, String)] {
        self.sink.documents()
    }

    fn frame_of(&self, link: usize) -> [f64; 3] {
        self.frames.get(&link).copied().unwrap_or([0.0; 3])
    }
}

fn relative(world: [f64; 3], frame: [f64; 3]) -> [f64; 3] {
    add3(world, scale3(-1.0, frame))
}

impl SceneEmitter for UrdfWriter {
    fn begin_scene_document(&mut self, path: &Path) -> Result<(), EmitterError> {
        self.sink.begin(path)?;
        self.frames.clear();
        self.sink.push_line("<robot name = \"robot\">")
    }

    fn end_scene_document(&mut self) -> Result<(), EmitterError> {
        self.sink.push_line("</robot>")?;
        self.sink.finish()?;
        Ok(())
    }

    fn abort_scene_document(&mut self) -> Result<(), EmitterError> {
        self.frames.clear();
        self.sink.abort()
    }

    fn emit_solid(&mut self, solid: &SolidRecord) -> Result<(), EmitterError> {
        let origin = triple(relative(solid.position.to_array(), self.frame_of(solid.id)));
        let size = triple(solid.size.to_array());
        let rgba = solid.color.rgba();
        let lines = [
            format!("    <link name=\"{}\">", solid.link_name()),
            "        <inertial>".to_string(),
            format!("            <origin xyz=\"{origin}\" rpy=\"0 0 0\"/>"),
            "            <mass value=\"1\" />".to_string(),
            "            <inertia ixx=\"100\" ixy=\"0\" ixz=\"0\" iyy=\"100\" iyz=\"0\" izz=\"100\" />"
                .to_string(),
            "        </inertial>".to_string(),
            "        <visual>".to_string(),
            format!("            <origin xyz=\"{origin}\" rpy=\"0 0 0\"/>"),
            format!("            <geometry><box size=\"{size}\" /></geometry>"),
            format!(
                "            <material name=\"{}\"><color rgba=\"{} {} {} {}\"/></material>",
                solid.color.name(),
                num(rgba[0]),
                num(rgba[1]),
                num(rgba[2]),
                num(rgba[3])
            ),
            "        </visual>".to_string(),
            "        <collision>".to_string(),
            format!("            <origin xyz=\"{origin}\" rpy=\"0 0 0\"/>"),
            format!("            <geometry><box size=\"{size}\" /></geometry>"),
            "        </collision>".to_string(),
            "    </link>".to_string(),
        ];
        for line in &lines {
            self.sink.push_line(line)?;
        }
        Ok(())
    }

    fn emit_joint(&mut self, joint: &JointRecord) -> Result<(), EmitterError> {
        let world = joint.position.to_array();
        let origin = triple(relative(world, self.frame_of(joint.parent)));
        self.frames.insert(joint.child, world);
        let lines = [
            format!(
                "    <joint name=\"{}\" type=\"{}\">",
                joint.name,
                joint.joint_type.as_str()
            ),
            format!("        <parent link=\"{}\"/>", joint.parent),
            format!("        <child link=\"{}\"/>", joint.child),
            format!("        <origin xyz=\"{origin}\" rpy=\"0 0 0\" />"),
            format!("        <axis xyz=\"{}\"/>", triple(joint.axis.vector())),
            format!(
                "        <limit effort=\"0.0\" lower=\"{}\" upper=\"{}\" velocity=\"0.0\"/>",
                num(-JOINT_LIMIT),
                num(JOINT_LIMIT)
            ),
            "    </joint>".to_string(),
        ];
        for line in &lines {
            self.sink.push_line(line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use faery_core::builder::BodyBuilder;
    use faery_core::config::BuildConfig;
    use faery_core::emitter::with_scene_document;
    use faery_data::{Axis, BodyCons, BodyPartKind, BuildSpecification, CubeElement};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn write_chain() -> String {
        let plan = BodyCons::new(
            0,
            BodyPartKind::FixedSizedBody { size: 1.0 },
            BuildSpecification::new(CubeElement::Front, 3, Axis::Y),
        );
        let config = BuildConfig::default();
        let mut writer = UrdfWriter::in_memory();
        with_scene_document(&mut writer, Path::new("body0.urdf"), |w| {
            BodyBuilder::new(&config)
                .build(&plan, &mut ChaCha8Rng::seed_from_u64(0), w)
                .map(|_| ())
        })
        .unwrap();
        writer.documents()[0].1.clone()
    }

    #[test]
    fn test_frames_are_relative_to_parent_joint() {
        let doc = write_chain();
        // Root link in world frame.
        assert!(doc.contains("<origin xyz=\"0 0 1\" rpy=\"0 0 0\"/>"));
        // First joint relative to the world, second relative to the first.
        assert!(doc.contains("<origin xyz=\"0.5 0 1\" rpy=\"0 0 0\" />"));
        assert!(doc.contains("<origin xyz=\"1 0 0\" rpy=\"0 0 0\" />"));
        // Child links sit half a part ahead of their joint.
        assert!(doc.contains("<origin xyz=\"0.5 0 0\" rpy=\"0 0 0\"/>"));
    }

    #[test]
    fn test_document_structure() {
        let doc = write_chain();
        assert!(doc.starts_with("<robot name = \"robot\">\n"));
        assert!(doc.ends_with("</robot>\n"));
        assert_eq!(doc.matches("<link name=").count(), 3);
        assert_eq!(doc.matches("type=\"revolute\"").count(), 2);
        assert!(doc.contains("<joint name=\"1_2\""));
        assert!(doc.contains("<axis xyz=\"0 1 0\"/>"));
        assert!(doc.contains("material name=\"Red\""));
    }

    #[test]
    fn test_emit_without_document_fails() {
        let mut writer = UrdfWriter::in_memory();
        assert!(matches!(
            writer.end_scene_document(),
            Err(EmitterError::NoOpenDocument)
        ));
    }
}
