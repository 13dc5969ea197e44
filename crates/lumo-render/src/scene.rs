//! The top-level scene: objects, lights, a camera, a shader, and the
//! render loop.

use lumo_math::Point3;
use lumo_scene::{Light, NodeId, SceneGraph, TransformHandle};

use crate::camera::Camera;
use crate::error::{RenderError, Result};
use crate::pixel::PixelSink;
use crate::shader::Shader;

/// A complete renderable scene.
///
/// The scene owns a graph whose root is an implicit union, so objects
/// added with [`Scene::add_object`] are all visible. `render` drives
/// one primary ray per pixel through the camera, the graph, and the
/// shader, writing each shaded color into the sink. Pixels whose ray
/// misses every object keep the sink's prior contents.
pub struct Scene {
    graph: SceneGraph,
    root: NodeId,
    lights: Vec<Light>,
    camera: Option<Box<dyn Camera>>,
    shader: Option<Box<dyn Shader>>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    /// Empty scene with no camera, lights, or shader.
    pub fn new() -> Self {
        let mut graph = SceneGraph::new();
        let root = graph.add_union();
        Self {
            graph,
            root,
            lights: Vec::new(),
            camera: None,
            shader: None,
        }
    }

    /// The scene graph.
    pub fn graph(&self) -> &SceneGraph {
        &self.graph
    }

    /// Mutable access to the scene graph, for building objects.
    pub fn graph_mut(&mut self) -> &mut SceneGraph {
        &mut self.graph
    }

    /// The implicit union node every top-level object hangs off.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Attach an already-built node as a top-level object.
    pub fn add_object(&mut self, node: NodeId) {
        // The root is a composite created in `new`, so this cannot fail.
        let _ = self.graph.add_child(self.root, node);
    }

    /// Add a light source.
    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    /// The installed lights.
    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    /// Install the camera.
    pub fn set_camera(&mut self, camera: Box<dyn Camera>) {
        self.camera = Some(camera);
    }

    /// Install the shader.
    pub fn set_shader(&mut self, shader: Box<dyn Shader>) {
        self.shader = Some(shader);
    }

    /// Apply a world transform to every current top-level object, as if
    /// physically moving the whole stage.
    pub fn translate(&mut self, x: f64, y: f64, z: f64) -> TransformHandle {
        self.graph.translate(self.root, x, y, z)
    }

    /// Rotate the whole stage about the x axis by `angle` degrees.
    pub fn rotate_x(&mut self, angle: f64) -> TransformHandle {
        self.graph.rotate_x(self.root, angle)
    }

    /// Rotate the whole stage about the y axis by `angle` degrees.
    pub fn rotate_y(&mut self, angle: f64) -> TransformHandle {
        self.graph.rotate_y(self.root, angle)
    }

    /// Rotate the whole stage about the z axis by `angle` degrees.
    pub fn rotate_z(&mut self, angle: f64) -> TransformHandle {
        self.graph.rotate_z(self.root, angle)
    }

    /// Scale the whole stage.
    pub fn scale(&mut self, x: f64, y: f64, z: f64) -> TransformHandle {
        self.graph.scale(self.root, x, y, z)
    }

    /// Recompute every cached matrix in the scene. Call after any
    /// transform handle changes and before `render`; `render` calls it
    /// itself, so an explicit call is only needed for direct graph
    /// queries.
    pub fn prepare_render(&mut self) -> Result<()> {
        self.graph.prepare_render(self.root)?;
        for light in &mut self.lights {
            light.prepare_render();
        }
        if let Some(shader) = self.shader.as_mut() {
            shader.prepare_render();
        }
        if let Some(camera) = self.camera.as_mut() {
            camera.prepare_render()?;
        }
        Ok(())
    }

    /// Render one frame into `sink`.
    ///
    /// Pixel centers map to image-plane coordinates
    /// `(col + 0.5) / width - 0.5` and likewise for rows, so the full
    /// [-0.5, 0.5] square is sampled at pixel centers with row 0 at the
    /// top.
    pub fn render(&mut self, sink: &mut dyn PixelSink) -> Result<()> {
        let width = sink.width();
        let height = sink.height();
        if width == 0 || height == 0 {
            return Err(RenderError::EmptyTarget(width, height));
        }
        if self.camera.is_none() {
            return Err(RenderError::MissingCamera);
        }
        if self.shader.is_none() {
            return Err(RenderError::MissingShader);
        }
        self.prepare_render()?;
        let camera = self.camera.as_deref().ok_or(RenderError::MissingCamera)?;
        let shader = self.shader.as_deref().ok_or(RenderError::MissingShader)?;

        for row in 0..height {
            let y = (f64::from(row) + 0.5) / f64::from(height) - 0.5;
            for col in 0..width {
                let x = (f64::from(col) + 0.5) / f64::from(width) - 0.5;
                let ray = camera.project(x, y);
                let Some(hit) = self.graph.intersect(self.root, &ray) else {
                    continue;
                };
                let point = ray.at(hit.t);
                let Some(normal) = self.graph.normal(hit.node, &point) else {
                    continue;
                };
                let view = ray.direction.normalize();
                let color = shader.shade(
                    &self.graph,
                    hit.node,
                    self.root,
                    &self.lights,
                    &point,
                    &view,
                    &normal,
                );
                for channel in 0..3 {
                    sink.put(col, row, channel, color[channel]);
                }
            }
        }
        Ok(())
    }

    /// Shorthand for `graph().normal` at a world point on `node`.
    pub fn normal_at(&self, node: NodeId, point: &Point3) -> Option<lumo_math::Vec3> {
        self.graph.normal(node, point)
    }
}
