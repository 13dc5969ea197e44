//! Shading models: ambient, Lambertian diffuse, and their composition.

use lumo_math::{Point3, Vec3};
use lumo_scene::{rgb, Light, NodeId, RayColor, SceneGraph};

/// Fixed ambient coefficient, the POV-Ray default. Stands in for all the
/// indirect light a real room full of diffuse reflectors would scatter
/// into shadows.
const AMBIENT: f64 = 0.1;

/// A shading model.
///
/// A shader is a pure function of the struck object, the whole scene (as
/// the root every shadow ray is cast against), the lights, and the local
/// intersection frame. The returned channels are unclamped; quantization
/// to the pixel type happens at the sink.
pub trait Shader: Send + Sync {
    /// Color contribution at an intersection.
    ///
    /// `struck` is the leaf primitive that was hit, `root` the scene's
    /// object tree (which contains `struck` too), `point` the world-space
    /// intersection, `view` the normalized incoming ray direction, and
    /// `normal` the normalized surface normal.
    #[allow(clippy::too_many_arguments)]
    fn shade(
        &self,
        graph: &SceneGraph,
        struck: NodeId,
        root: NodeId,
        lights: &[Light],
        point: &Point3,
        view: &Vec3,
        normal: &Vec3,
    ) -> RayColor;

    /// Per-frame setup hook. Most shaders have nothing to cache.
    fn prepare_render(&mut self) {}
}

/// Faked ambient light: a fixed fraction of the intrinsic color,
/// independent of any light source, so shadows are dim instead of black.
#[derive(Debug, Default)]
pub struct AmbientShader;

impl Shader for AmbientShader {
    fn shade(
        &self,
        graph: &SceneGraph,
        struck: NodeId,
        _root: NodeId,
        _lights: &[Light],
        point: &Point3,
        _view: &Vec3,
        _normal: &Vec3,
    ) -> RayColor {
        match graph.eval_pigment(struck, point) {
            Some(color) => AMBIENT * rgb(&color),
            None => RayColor::zeros(),
        }
    }
}

/// Lambertian diffuse reflection: per light, a shadow ray decides
/// visibility, then the contribution scales with the cosine between the
/// normal and the light direction. Back-facing points (cosine ≤ 0) get
/// exactly nothing.
#[derive(Debug, Default)]
pub struct DiffuseShader;

impl Shader for DiffuseShader {
    fn shade(
        &self,
        graph: &SceneGraph,
        struck: NodeId,
        root: NodeId,
        lights: &[Light],
        point: &Point3,
        _view: &Vec3,
        normal: &Vec3,
    ) -> RayColor {
        let mut result = RayColor::zeros();
        let Some(color) = graph.eval_pigment(struck, point) else {
            return result;
        };
        for light in lights {
            let shadow = light.ray_to(point);
            let visible = light.amount_visible(graph, root, &shadow);
            if visible > 0.0 {
                let dot = normal.dot(&shadow.direction.normalize());
                if dot > 0.0 {
                    result +=
                        visible * dot * rgb(&color).component_mul(&rgb(&light.color));
                }
            }
        }
        result
    }
}

/// An ordered list of shaders whose outputs sum. Keeps each shading
/// model separate while running them all per pixel.
#[derive(Default)]
pub struct CompositeShader {
    shaders: Vec<Box<dyn Shader>>,
}

impl CompositeShader {
    /// Empty composite.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a shader.
    pub fn add(&mut self, shader: Box<dyn Shader>) -> &mut Self {
        self.shaders.push(shader);
        self
    }
}

impl Shader for CompositeShader {
    fn shade(
        &self,
        graph: &SceneGraph,
        struck: NodeId,
        root: NodeId,
        lights: &[Light],
        point: &Point3,
        view: &Vec3,
        normal: &Vec3,
    ) -> RayColor {
        let mut result = RayColor::zeros();
        for shader in &self.shaders {
            result += shader.shade(graph, struck, root, lights, point, view, normal);
        }
        result
    }

    fn prepare_render(&mut self) {
        for shader in &mut self.shaders {
            shader.prepare_render();
        }
    }
}

/// The ambient + diffuse composite that emulates the core POV-Ray
/// shading model.
pub fn pov_shader() -> CompositeShader {
    let mut shader = CompositeShader::new();
    shader
        .add(Box::new(AmbientShader))
        .add(Box::new(DiffuseShader));
    shader
}
