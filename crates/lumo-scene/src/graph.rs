//! The arena-based scene graph: primitive leaves composed by CSG nodes.

use crate::color::ObjectColor;
use crate::error::{Result, SceneError};
use crate::pigment::{read_pigment, write_pigment, SharedPigment};
use crate::transform::{TransformChain, TransformHandle};
use lumo_geom::{Plane, PrimitiveKind, Ray, Sphere};
use lumo_math::{deg2rad, transform_dir, transform_point, Point3, TransformOp, Vec3};
use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Key of a node in the scene graph. The graph is append-only, so a
    /// key stays valid for the life of the graph.
    pub struct NodeId;
}

/// How a composite combines its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CsgOp {
    /// A point is inside if it is inside any child; the surface is the
    /// nearest child surface.
    Union,
    /// A point is inside only if it is inside every child; the surface is
    /// a child boundary that lies inside all of the other children.
    /// Difference needs no operator of its own:
    /// `difference(a, b) = intersection(a, inside_out(b))`.
    Intersection,
}

/// Node payload: a primitive leaf or a CSG composite over child nodes.
#[derive(Debug)]
pub enum NodeKind {
    /// Leaf shape answering the local-space geometry queries.
    Primitive(PrimitiveKind),
    /// CSG combination of child nodes, each a full scene node in its own
    /// right (transformable and pigment-bearing).
    Composite {
        /// Combination rule.
        op: CsgOp,
        /// Ordered child nodes.
        children: Vec<NodeId>,
    },
}

#[derive(Debug)]
struct Node {
    kind: NodeKind,
    chain: TransformChain,
    pigment: Option<SharedPigment>,
    /// Non-owning back-link for pigment inheritance, rebuilt on every
    /// `prepare_render` walk.
    parent: Option<NodeId>,
    /// Flips inside/outside and the normal sign. Honored on primitives
    /// only.
    inside_out: bool,
}

impl Node {
    fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            chain: TransformChain::new(),
            pigment: None,
            parent: None,
            inside_out: false,
        }
    }
}

/// A ray/surface intersection: the struck *leaf* primitive and the ray
/// parameter. Composites never appear here — `node` is always the actual
/// surface owner, which is what shading needs for normals and pigment
/// lookup.
#[derive(Debug, Clone, Copy)]
pub struct Hit {
    /// The leaf primitive whose surface was struck.
    pub node: NodeId,
    /// Ray parameter of the intersection.
    pub t: f64,
}

/// The scene graph: an arena of nodes forming one or more trees.
///
/// All mutation happens between renders. `prepare_render` walks a tree,
/// fixes parent links, and fills every cached matrix; after that, every
/// query path (`intersect`, `inside`, `normal`, `eval_pigment`) takes
/// `&self` and touches no shared mutable state, which is what keeps a
/// per-pixel loop over the graph parallelizable.
#[derive(Debug, Default)]
pub struct SceneGraph {
    nodes: SlotMap<NodeId, Node>,
}

impl SceneGraph {
    /// Empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Construction
    // =========================================================================

    /// Add a unit sphere leaf.
    pub fn add_sphere(&mut self) -> NodeId {
        self.nodes
            .insert(Node::new(NodeKind::Primitive(PrimitiveKind::Sphere(Sphere))))
    }

    /// Add a z = 0 plane leaf.
    pub fn add_plane(&mut self) -> NodeId {
        self.nodes
            .insert(Node::new(NodeKind::Primitive(PrimitiveKind::Plane(Plane))))
    }

    /// Add an empty union composite.
    pub fn add_union(&mut self) -> NodeId {
        self.nodes.insert(Node::new(NodeKind::Composite {
            op: CsgOp::Union,
            children: Vec::new(),
        }))
    }

    /// Add an empty intersection composite.
    pub fn add_intersection(&mut self) -> NodeId {
        self.nodes.insert(Node::new(NodeKind::Composite {
            op: CsgOp::Intersection,
            children: Vec::new(),
        }))
    }

    /// Attach `child` to a composite. Children added *after* a transform
    /// was broadcast onto the composite are not retroactively
    /// transformed — add all children first, then move the composite.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        match &mut self.nodes[parent].kind {
            NodeKind::Composite { children, .. } => {
                children.push(child);
                Ok(())
            }
            NodeKind::Primitive(_) => Err(SceneError::NotComposite),
        }
    }

    /// Dress a node in a pigment. Pass the same shared pigment to several
    /// siblings to reuse one instance.
    pub fn set_pigment(&mut self, node: NodeId, pigment: SharedPigment) {
        self.nodes[node].pigment = Some(pigment);
    }

    /// Flip a primitive inside out: the inside test inverts and the
    /// normal reverses. This is how CSG difference is spelled.
    ///
    /// The flag lives on every node but only primitives honor it; set on
    /// a composite it is a no-op. To invert a whole subtree, flip each
    /// of its leaves.
    pub fn set_inside_out(&mut self, node: NodeId, inside_out: bool) {
        self.nodes[node].inside_out = inside_out;
    }

    // =========================================================================
    // Transform builders
    // =========================================================================

    /// Broadcast a shared transform handle onto `node`: it lands on the
    /// node's own chain, its pigment's chain, and — for composites — the
    /// chains of every child present *right now*. Later children are not
    /// picked up, so construction order is significant.
    pub fn add_transform(&mut self, node: NodeId, handle: TransformHandle) {
        let mut stack = vec![node];
        while let Some(id) = stack.pop() {
            let n = &mut self.nodes[id];
            n.chain.push(handle.clone());
            if let Some(pigment) = &n.pigment {
                write_pigment(pigment, |p| p.add_transform(handle.clone()));
            }
            if let NodeKind::Composite { children, .. } = &n.kind {
                stack.extend(children.iter().copied());
            }
        }
    }

    fn add_op(&mut self, node: NodeId, op: TransformOp) -> TransformHandle {
        let handle = TransformHandle::new(op);
        self.add_transform(node, handle.clone());
        handle
    }

    /// Physically move the node by `(x, y, z)`.
    pub fn translate(&mut self, node: NodeId, x: f64, y: f64, z: f64) -> TransformHandle {
        self.add_op(node, TransformOp::Translate(Vec3::new(x, y, z)))
    }

    /// Rotate the node about the world x axis, `angle` in degrees.
    pub fn rotate_x(&mut self, node: NodeId, angle: f64) -> TransformHandle {
        self.add_op(node, TransformOp::RotateX(deg2rad(angle)))
    }

    /// Rotate the node about the world y axis, `angle` in degrees.
    pub fn rotate_y(&mut self, node: NodeId, angle: f64) -> TransformHandle {
        self.add_op(node, TransformOp::RotateY(deg2rad(angle)))
    }

    /// Rotate the node about the world z axis, `angle` in degrees.
    pub fn rotate_z(&mut self, node: NodeId, angle: f64) -> TransformHandle {
        self.add_op(node, TransformOp::RotateZ(deg2rad(angle)))
    }

    /// Scale the node about the world origin; zero components are
    /// remapped to 1.
    pub fn scale(&mut self, node: NodeId, x: f64, y: f64, z: f64) -> TransformHandle {
        self.add_op(node, TransformOp::Scale(Vec3::new(x, y, z)))
    }

    /// Uniform scale about the world origin.
    pub fn scale_uniform(&mut self, node: NodeId, s: f64) -> TransformHandle {
        self.add_op(node, TransformOp::UniformScale(s))
    }

    /// Place the node at `location`, aimed at `look_at`.
    pub fn location_lookat(
        &mut self,
        node: NodeId,
        location: Point3,
        look_at: Point3,
    ) -> TransformHandle {
        self.add_op(node, TransformOp::location_lookat(location, look_at))
    }

    // =========================================================================
    // Render preparation
    // =========================================================================

    /// Walk the subtree under `root`: rebuild parent links, recompute
    /// every transform and pigment cache. Mandatory between any mutation
    /// and the next render pass; queries on an unprepared graph see stale
    /// matrices, not errors.
    pub fn prepare_render(&mut self, root: NodeId) -> Result<()> {
        self.nodes[root].parent = None;
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            let n = &mut self.nodes[id];
            n.chain.prepare_render()?;
            if let Some(pigment) = &n.pigment {
                write_pigment(pigment, |p| p.prepare_render())?;
            }
            if let NodeKind::Composite { children, .. } = &n.kind {
                let children = children.clone();
                for &c in &children {
                    self.nodes[c].parent = Some(id);
                }
                stack.extend(children);
            }
        }
        Ok(())
    }

    // =========================================================================
    // Queries (read-only once prepared)
    // =========================================================================

    /// Nearest surface struck by a world-space ray in the subtree under
    /// `node`, as the leaf primitive and its ray parameter.
    pub fn intersect(&self, node: NodeId, ray: &Ray) -> Option<Hit> {
        let mut hits = Vec::new();
        self.boundary_hits(node, ray, &mut hits);
        hits.into_iter().min_by(|a, b| a.t.total_cmp(&b.t))
    }

    /// Collect every boundary crossing of the subtree that survives its
    /// CSG rules. A union passes all child crossings through; an
    /// intersection keeps a child crossing only where the struck point
    /// lies inside every *other* child.
    fn boundary_hits(&self, node: NodeId, ray: &Ray, out: &mut Vec<Hit>) {
        match &self.nodes[node].kind {
            NodeKind::Primitive(prim) => {
                let local = ray.transformed(self.nodes[node].chain.local_from_world());
                let mut ts = Vec::new();
                prim.intersect_local_all(&local, &mut ts);
                out.extend(ts.into_iter().map(|t| Hit { node, t }));
            }
            NodeKind::Composite { op, children } => {
                let mut candidates = Vec::new();
                for &child in children {
                    self.boundary_hits(child, ray, &mut candidates);
                }
                match op {
                    CsgOp::Union => out.append(&mut candidates),
                    CsgOp::Intersection => {
                        for hit in candidates {
                            let point = ray.at(hit.t);
                            let keep = children.iter().all(|&child| {
                                self.subtree_contains(child, hit.node) || self.inside(child, &point)
                            });
                            if keep {
                                out.push(hit);
                            }
                        }
                    }
                }
            }
        }
    }

    fn subtree_contains(&self, node: NodeId, target: NodeId) -> bool {
        if node == target {
            return true;
        }
        match &self.nodes[node].kind {
            NodeKind::Composite { children, .. } => children
                .iter()
                .any(|&child| self.subtree_contains(child, target)),
            NodeKind::Primitive(_) => false,
        }
    }

    /// Whether a world-space point is inside the subtree under `node`.
    /// Total: every point is either inside or not.
    pub fn inside(&self, node: NodeId, point: &Point3) -> bool {
        let n = &self.nodes[node];
        match &n.kind {
            NodeKind::Primitive(prim) => {
                let local = transform_point(n.chain.local_from_world(), point);
                prim.inside_local(&local) ^ n.inside_out
            }
            NodeKind::Composite { op, children } => match op {
                CsgOp::Union => children.iter().any(|&c| self.inside(c, point)),
                CsgOp::Intersection => children.iter().all(|&c| self.inside(c, point)),
            },
        }
    }

    /// Unit world-space surface normal of a leaf primitive at a surface
    /// point: the local normal mapped through the inverse-transpose,
    /// renormalized, and reversed for inside-out primitives. `None` for
    /// composite nodes — `intersect` always hands back a leaf.
    pub fn normal(&self, node: NodeId, point: &Point3) -> Option<Vec3> {
        let n = &self.nodes[node];
        match &n.kind {
            NodeKind::Primitive(prim) => {
                let local = transform_point(n.chain.local_from_world(), point);
                let sign = if n.inside_out { -1.0 } else { 1.0 };
                let world = transform_dir(n.chain.normal_matrix(), &prim.normal_local(&local));
                Some(sign * world.normalize())
            }
            NodeKind::Composite { .. } => None,
        }
    }

    /// The intrinsic color at a world-space point: the node's own
    /// pigment, else the nearest ancestor's, else `None` — a pigment-less
    /// branch simply contributes no color.
    pub fn eval_pigment(&self, node: NodeId, point: &Point3) -> Option<ObjectColor> {
        let mut current = Some(node);
        while let Some(id) = current {
            let n = &self.nodes[id];
            if let Some(pigment) = &n.pigment {
                return Some(read_pigment(pigment, |p| p.eval(point)));
            }
            current = n.parent;
        }
        None
    }
}
