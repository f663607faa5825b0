use std::path::PathBuf;

use super::InstanceId;
use super::GadgetSurface;

pub const EDGE_GADGET_SIZE: i32 = 16;

/// Where the host placed a gadget.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Orient {
    #[default]
    Float,
    Horiz,
    Vert,
    Left,
    Right,
    Top,
    Bottom,
    CornerTl,
    CornerTr,
    CornerBl,
    CornerBr,
    CornerLt,
    CornerRt,
    CornerLb,
    CornerRb,
    /// Re-apply whatever orientation the instance already has.
    Last,
}

impl Orient {
    /// Fixed size for placements along a vertical edge or in a corner;
    /// everything else keeps the host's default.
    pub fn preferred_size(&self) -> Option<Size> {
        match self {
            Orient::Vert
            | Orient::Left
            | Orient::Right
            | Orient::CornerLt
            | Orient::CornerRt
            | Orient::CornerLb
            | Orient::CornerRb => Some(Size::square(EDGE_GADGET_SIZE)),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Size {
    pub w: i32,
    pub h: i32,
}

impl Size {
    pub fn square(side: i32) -> Self {
        Self { w: side, h: side }
    }
}

/// Theme file and group for the gadget's icon.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IconRef {
    pub file: PathBuf,
    pub group: &'static str,
}

/// Host-supplied identity of a new gadget placement.
#[derive(Clone, Debug, Default)]
pub struct ClientSpec {
    pub name: String,
    pub id: String,
    pub style: Option<String>,
}

/// Descriptor the gadget container calls into.
pub trait GadgetClass {
    fn name(&self) -> &'static str;
    fn init(&mut self, spec: ClientSpec, surface: Box<dyn GadgetSurface>) -> InstanceId;
    fn shutdown(&mut self, id: InstanceId);
    fn orient(&mut self, id: InstanceId, orient: Orient) -> Option<Size>;
    fn label(&self) -> &'static str;
    fn icon(&self) -> IconRef;

    fn id_new(&self) -> String {
        self.name().to_string()
    }
}
