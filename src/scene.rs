//! Render instances handed to the rendering backend
//!
//! Collections register one layer each with [`RenderGroup::attach_layer`] at
//! scene construction (`add_to`) and submit one [`RenderInstance`] per visible
//! entity every frame (`render`). The backend owns meshes, sprites and textures.

use glam::{Vec2, Vec3};

/// Handle to a layer registered with a render group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayerId(pub u32);

/// What kind of object a layer holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerKind {
    /// Textured cubes (enemies)
    Cubes,
    /// Camera-facing sprites (projectiles)
    Sprites,
    /// Sprite-sheet animations (explosions)
    SpriteSheets,
}

/// Which texture the front face of an instance shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaceTexture {
    /// Face not revealed yet; the front shows the side texture
    Hidden,
    /// The entity's own composited image
    Static,
    /// The shared live video texture
    LiveFeed,
}

/// Per-instance render data
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderInstance {
    /// World-space position
    pub position: Vec3,
    /// Euler rotation (radians)
    pub rotation: Vec3,
    pub scale: Vec3,
    /// Opacity (0.0 = invisible, 1.0 = opaque)
    pub opacity: f32,
    /// Sprite-sheet cell offset
    pub uv_offset: Vec2,
    /// Sprite-sheet cell size
    pub uv_scale: Vec2,
    /// Grayscale tint of the front face (0-255)
    pub shade: f32,
    /// Front face texture selection (cubes only)
    pub face: Option<FaceTexture>,
    /// Texture revision; changes whenever the face texture needs re-upload
    pub texture_revision: u32,
}

impl Default for RenderInstance {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
            opacity: 1.0,
            uv_offset: Vec2::ZERO,
            uv_scale: Vec2::ONE,
            shade: 255.0,
            face: None,
            texture_revision: 0,
        }
    }
}

/// The frame's render graph, as seen by the simulation
pub trait RenderGroup {
    /// Register a layer; called once per collection at scene construction
    fn attach_layer(&mut self, name: &'static str, kind: LayerKind) -> LayerId;

    /// Submit one instance into a layer for this frame
    fn submit(&mut self, layer: LayerId, instance: RenderInstance);
}

/// A layer inside a [`RenderBuffer`]
#[derive(Debug, Clone)]
pub struct Layer {
    pub name: &'static str,
    pub kind: LayerKind,
    pub instances: Vec<RenderInstance>,
}

/// Plain in-memory render group
#[derive(Debug, Clone, Default)]
pub struct RenderBuffer {
    layers: Vec<Layer>,
}

impl RenderBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop last frame's instances, keep layers
    pub fn clear(&mut self) {
        for layer in &mut self.layers {
            layer.instances.clear();
        }
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn layer(&self, name: &str) -> Option<&Layer> {
        self.layers.iter().find(|l| l.name == name)
    }

    pub fn instance_count(&self) -> usize {
        self.layers.iter().map(|l| l.instances.len()).sum()
    }
}

impl RenderGroup for RenderBuffer {
    fn attach_layer(&mut self, name: &'static str, kind: LayerKind) -> LayerId {
        let id = LayerId(self.layers.len() as u32);
        self.layers.push(Layer {
            name,
            kind,
            instances: Vec::with_capacity(32),
        });
        id
    }

    fn submit(&mut self, layer: LayerId, instance: RenderInstance) {
        if let Some(layer) = self.layers.get_mut(layer.0 as usize) {
            layer.instances.push(instance);
        } else {
            debug_assert!(false, "submit to unknown layer {:?}", layer);
        }
    }
}
