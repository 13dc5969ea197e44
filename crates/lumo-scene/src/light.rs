//! Point light sources and shadow-ray visibility.

use crate::color::{object_color, ObjectColor};
use crate::graph::{NodeId, SceneGraph};
use lumo_geom::Ray;
use lumo_math::Point3;

/// Fraction of the surface-to-light distance a shadow ray's origin is
/// advanced along its direction. The shadow ray starts exactly on a
/// surface the tracer just intersected, so without the lift there is a
/// coin-flip chance of the surface shading itself at t ≈ 0 from floating
/// point roundoff.
pub const SHADOW_BIAS: f64 = 1e-6;

/// A point light: a location and a color, held by the scene's light list.
#[derive(Debug, Clone)]
pub struct Light {
    /// Position of the light in world coordinates.
    pub location: Point3,
    /// Color of the light.
    pub color: ObjectColor,
}

impl Light {
    /// Light with an explicit color.
    pub fn new(location: Point3, color: ObjectColor) -> Self {
        Self { location, color }
    }

    /// Full-intensity white light.
    pub fn white(location: Point3) -> Self {
        Self::new(location, object_color(1.0, 1.0, 1.0, 0.0, 0.0))
    }

    /// Hook for per-frame setup. A point light has nothing to cache.
    pub fn prepare_render(&mut self) {}

    /// Shadow ray from a surface point to this light: the direction is
    /// scaled so the light sits at exactly `t = 1`, and the origin is
    /// lifted off the surface by [`SHADOW_BIAS`].
    pub fn ray_to(&self, from: &Point3) -> Ray {
        Ray::new(*from, self.location - from).advanced(SHADOW_BIAS)
    }

    /// Fraction of this light visible along a shadow ray: 1.0 if nothing
    /// blocks it, 0.0 if anything does. A blocker only counts at
    /// `t < 1` — the light itself sits at `t = 1`, so geometry behind
    /// the light cannot shadow it.
    pub fn amount_visible(&self, graph: &SceneGraph, blocker: NodeId, ray: &Ray) -> f64 {
        match graph.intersect(blocker, ray) {
            Some(hit) if hit.t < 1.0 => 0.0,
            _ => 1.0,
        }
    }

    /// Visibility from a surface point, constructing the shadow ray
    /// internally.
    pub fn visible_from(&self, graph: &SceneGraph, blocker: NodeId, from: &Point3) -> f64 {
        self.amount_visible(graph, blocker, &self.ray_to(from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_ray_to_puts_light_at_t_one() {
        let light = Light::white(Point3::new(10.0, 0.0, 0.0));
        let ray = light.ray_to(&Point3::origin());
        let end = ray.at(1.0);
        // Origin lifted by the bias, so t = 1 lands a hair past the
        // light; it must agree to within the bias distance.
        assert_relative_eq!(end.x, 10.0, epsilon = 1e-4);
        assert_relative_eq!(ray.direction.x, 10.0, epsilon = 1e-12);
        assert!(ray.origin.x > 0.0);
    }

    #[test]
    fn test_unobstructed_light_fully_visible() {
        let mut g = SceneGraph::new();
        let s = g.add_sphere();
        g.translate(s, 0.0, 0.0, -10.0);
        let root = g.add_union();
        g.add_child(root, s).unwrap();
        g.prepare_render(root).unwrap();

        let light = Light::white(Point3::new(0.0, 0.0, 10.0));
        assert_eq!(light.visible_from(&g, root, &Point3::origin()), 1.0);
    }

    #[test]
    fn test_occluder_between_blocks() {
        let mut g = SceneGraph::new();
        let s = g.add_sphere();
        g.translate(s, 0.0, 0.0, 5.0);
        let root = g.add_union();
        g.add_child(root, s).unwrap();
        g.prepare_render(root).unwrap();

        let light = Light::white(Point3::new(0.0, 0.0, 10.0));
        assert_eq!(light.visible_from(&g, root, &Point3::origin()), 0.0);
    }

    #[test]
    fn test_occluder_behind_light_does_not_block() {
        // Sphere at z = 20, light at z = 10: the blocker sits at t = 2
        // on the shadow ray and must be ignored.
        let mut g = SceneGraph::new();
        let s = g.add_sphere();
        g.translate(s, 0.0, 0.0, 20.0);
        let root = g.add_union();
        g.add_child(root, s).unwrap();
        g.prepare_render(root).unwrap();

        let light = Light::white(Point3::new(0.0, 0.0, 10.0));
        assert_eq!(light.visible_from(&g, root, &Point3::origin()), 1.0);
    }

    #[test]
    fn test_bias_prevents_self_shadowing() {
        // Shadow ray starting exactly on a sphere's surface: the lifted
        // origin must escape its own surface.
        let mut g = SceneGraph::new();
        let s = g.add_sphere();
        let root = g.add_union();
        g.add_child(root, s).unwrap();
        g.prepare_render(root).unwrap();

        let light = Light::white(Point3::new(0.0, 0.0, 10.0));
        let surface = Point3::new(0.0, 0.0, 1.0);
        assert_eq!(light.visible_from(&g, root, &surface), 1.0);
    }
}
