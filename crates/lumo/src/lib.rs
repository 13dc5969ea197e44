#![warn(missing_docs)]

//! lumo — geometric ray tracer
//!
//! CSG scene graphs, POV-style transform chains, and a per-pixel render
//! loop, re-exported from the workspace crates as one surface.
//!
//! # Example
//!
//! ```rust
//! use lumo::{
//!     object_color, pov_shader, Camera, ColorField, Light,
//!     PerspectiveCamera, Pigment, PixelBuffer, Point3, Scene,
//! };
//!
//! let mut scene = Scene::new();
//! let ball = scene.graph_mut().add_sphere();
//! let red = Pigment::new(ColorField::Constant(object_color(1.0, 0.0, 0.0, 0.0, 0.0)));
//! scene.graph_mut().set_pigment(ball, red.into_shared());
//! scene.graph_mut().translate(ball, 5.0, 0.0, 0.0);
//! scene.add_object(ball);
//!
//! scene.add_light(Light::white(Point3::new(-2.0, -5.0, 3.0)));
//! let mut camera = PerspectiveCamera::with_aspect(64, 48);
//! camera
//!     .chain_mut()
//!     .location_lookat(Point3::origin(), Point3::new(5.0, 0.0, 0.0));
//! scene.set_camera(Box::new(camera));
//! scene.set_shader(Box::new(pov_shader()));
//!
//! let mut image: PixelBuffer<u8> = PixelBuffer::new(64, 48);
//! scene.render(&mut image).unwrap();
//! ```

pub use lumo_math::{
    atand, cosd, deg2rad, point_toward, rad2deg, sind, tand, transform_dir, transform_point, Dir3,
    Mat4, Point3, Tolerance, TransformOp, Vec3,
};

pub use lumo_geom::{Plane, PrimitiveKind, Ray, Sphere};

pub use lumo_scene::{
    object_color, rgb, ColorField, CsgOp, Hit, Light, NodeId, ObjectColor, Pigment, RayColor,
    SceneError, SceneGraph, SharedPigment, TransformChain, TransformHandle, SHADOW_BIAS,
};

pub use lumo_render::{
    pov_shader, AmbientShader, Camera, Channel, CompositeShader, DiffuseShader, PerspectiveCamera,
    PixelBuffer, PixelSink, RenderError, Scene, Shader,
};

#[cfg(test)]
mod tests {
    use super::*;

    fn constant_pigment(r: f64, g: f64, b: f64) -> SharedPigment {
        Pigment::new(ColorField::Constant(object_color(r, g, b, 0.0, 0.0))).into_shared()
    }

    /// Red unit sphere five units down +x, camera at the origin looking
    /// straight at it.
    fn one_sphere_scene(shader: Box<dyn Shader>) -> Scene {
        let mut scene = Scene::new();
        let ball = scene.graph_mut().add_sphere();
        scene.graph_mut().set_pigment(ball, constant_pigment(1.0, 0.0, 0.0));
        scene.graph_mut().translate(ball, 5.0, 0.0, 0.0);
        scene.add_object(ball);
        let mut camera = PerspectiveCamera::default();
        camera
            .chain_mut()
            .location_lookat(Point3::origin(), Point3::new(5.0, 0.0, 0.0));
        scene.set_camera(Box::new(camera));
        scene.set_shader(shader);
        scene
    }

    #[test]
    fn test_ambient_only_silhouette() {
        let mut scene = one_sphere_scene(Box::new(AmbientShader));
        let mut image: PixelBuffer<u8> = PixelBuffer::new(21, 21);
        scene.render(&mut image).unwrap();
        // Center pixel: ambient tenth of pure red.
        assert_eq!(image.get(10, 10, 0), 26);
        assert_eq!(image.get(10, 10, 1), 0);
        assert_eq!(image.get(10, 10, 2), 0);
        // Every struck pixel is the same flat ambient color, every miss
        // stays black.
        for row in 0..21 {
            for col in 0..21 {
                let r = image.get(col, row, 0);
                assert!(r == 0 || r == 26, "pixel ({col},{row}) = {r}");
            }
        }
        assert_eq!(image.get(0, 0, 0), 0);
    }

    #[test]
    fn test_diffuse_hemisphere_is_lit_and_shadow_side_dark() {
        let mut scene = one_sphere_scene(Box::new(DiffuseShader));
        // Light well off to -y so the sphere's -y side faces it.
        scene.add_light(Light::white(Point3::new(5.0, -50.0, 0.0)));
        let mut image: PixelBuffer<u8> = PixelBuffer::new(21, 21);
        scene.render(&mut image).unwrap();
        // Image x runs along world -y for this camera orientation, so
        // one side of the silhouette faces the light and the other is
        // in its own shadow. Columns 7 and 13 sit inside the silhouette
        // (about 8 degrees off axis against an 11 degree angular
        // radius); one must be bright and the other black.
        let a = image.get(7, 10, 0);
        let b = image.get(13, 10, 0);
        let (lit, dark) = if a > b { (a, b) } else { (b, a) };
        assert!(lit > 100, "lit side too dark: {lit}");
        assert_eq!(dark, 0);
    }

    #[test]
    fn test_pov_shader_sums_ambient_and_diffuse() {
        let mut scene = one_sphere_scene(Box::new(pov_shader()));
        // Light behind the camera: the facing point is fully lit.
        scene.add_light(Light::white(Point3::new(-5.0, 0.0, 0.0)));
        let mut image: PixelBuffer<u8> = PixelBuffer::new(21, 21);
        scene.render(&mut image).unwrap();
        // Center pixel sees ambient 0.1 plus cosine 1.0 diffuse,
        // clamped to full red.
        assert_eq!(image.get(10, 10, 0), 255);
        assert_eq!(image.get(10, 10, 1), 0);
    }

    #[test]
    fn test_csg_difference_renders_hollow() {
        // Big sphere minus a bigger-radius cutter shifted toward the
        // camera: the camera-facing cap is carved away, exposing the
        // inside of the far shell at the center of the image.
        let mut scene = Scene::new();
        let g = scene.graph_mut();
        let body = g.add_sphere();
        let cutter = g.add_sphere();
        g.scale_uniform(cutter, 1.5);
        g.translate(cutter, -1.5, 0.0, 0.0);
        g.set_inside_out(cutter, true);
        let diff = g.add_intersection();
        g.add_child(diff, body).unwrap();
        g.add_child(diff, cutter).unwrap();
        g.set_pigment(diff, constant_pigment(0.0, 1.0, 0.0));
        g.translate(diff, 5.0, 0.0, 0.0);
        scene.add_object(diff);

        let mut camera = PerspectiveCamera::default();
        camera
            .chain_mut()
            .location_lookat(Point3::origin(), Point3::new(5.0, 0.0, 0.0));
        scene.set_camera(Box::new(camera));
        scene.set_shader(Box::new(AmbientShader));

        scene.prepare_render().unwrap();
        // Center ray: the cutter swallows the body's near boundary at
        // x = 4, so the first surviving crossing is the cutter's own
        // far wall at x = 5, the concave floor of the cavity.
        let hit = scene
            .graph()
            .intersect(
                scene.root(),
                &Ray::new(Point3::origin(), Vec3::new(1.0, 0.0, 0.0)),
            )
            .unwrap();
        assert_eq!(hit.node, cutter);
        assert!((hit.t - 5.0).abs() < 1e-12, "got t = {}", hit.t);

        let mut image: PixelBuffer<u8> = PixelBuffer::new(21, 21);
        scene.render(&mut image).unwrap();
        assert_eq!(image.get(10, 10, 1), 26);
    }

    #[test]
    fn test_animation_via_shared_handle() {
        let mut scene = one_sphere_scene(Box::new(AmbientShader));
        let spin = scene.rotate_z(0.0);
        let mut frame0: PixelBuffer<u8> = PixelBuffer::new(15, 15);
        scene.render(&mut frame0).unwrap();
        assert_eq!(frame0.get(7, 7, 0), 26);

        // Quarter turn about z carries the sphere from +x to +y, out of
        // the camera's view.
        spin.set(TransformOp::RotateZ(deg2rad(90.0)));
        let mut frame1: PixelBuffer<u8> = PixelBuffer::new(15, 15);
        scene.render(&mut frame1).unwrap();
        assert_eq!(frame1.get(7, 7, 0), 0);
    }

    #[test]
    fn test_prepare_render_is_idempotent() {
        let mut scene = one_sphere_scene(Box::new(AmbientShader));
        scene.prepare_render().unwrap();
        scene.prepare_render().unwrap();
        let mut image: PixelBuffer<u8> = PixelBuffer::new(9, 9);
        scene.render(&mut image).unwrap();
        assert_eq!(image.get(4, 4, 0), 26);
    }
}
