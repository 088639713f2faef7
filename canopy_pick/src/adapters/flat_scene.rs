// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A self-contained billboard scene for demos, benches, and quick starts.
//!
//! ## Feature
//!
//! Enable with `flat_scene_adapter`.
//!
//! ## Notes
//!
//! Nodes live in an arena with parent links; pick leaves carry an
//! axis-aligned rectangle in normalized device coordinates plus a distance
//! from the camera. The ray cast degenerates to a point-in-rect query sorted
//! by distance. This is deliberately the simplest geometry that exercises the
//! engine end to end — real hosts bring their own scene graph and caster.

use alloc::vec::Vec;

use kurbo::{Point, Rect};

use crate::types::{RayCast, RayHit, SceneWalk};

/// Identifier of a node in a [`FlatScene`]. Plain index; slots are never
/// reused.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct FlatNodeId(pub usize);

#[derive(Clone, Debug)]
struct FlatNode {
    children: Vec<FlatNodeId>,
    pick: Option<(Rect, f32)>,
}

/// Arena-backed scene with billboard pick leaves.
#[derive(Clone, Debug, Default)]
pub struct FlatScene {
    nodes: Vec<FlatNode>,
}

impl FlatScene {
    /// An empty scene.
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Add a grouping node with no geometry of its own.
    pub fn add_group(&mut self, parent: Option<FlatNodeId>) -> FlatNodeId {
        self.add(parent, None)
    }

    /// Add a pick leaf covering `rect` (in NDC) at `distance` from the
    /// camera.
    pub fn add_leaf(&mut self, parent: Option<FlatNodeId>, rect: Rect, distance: f32) -> FlatNodeId {
        self.add(parent, Some((rect, distance)))
    }

    /// Move or re-depth an existing leaf. Occlusion can change this way
    /// without any pointer motion.
    pub fn place_leaf(&mut self, node: FlatNodeId, rect: Rect, distance: f32) {
        self.nodes[node.0].pick = Some((rect, distance));
    }

    fn add(&mut self, parent: Option<FlatNodeId>, pick: Option<(Rect, f32)>) -> FlatNodeId {
        let id = FlatNodeId(self.nodes.len());
        self.nodes.push(FlatNode {
            children: Vec::new(),
            pick,
        });
        if let Some(parent) = parent {
            self.nodes[parent.0].children.push(id);
        }
        id
    }
}

impl SceneWalk<FlatNodeId> for FlatScene {
    fn visit_subtree(&self, node: &FlatNodeId, visit: &mut dyn FnMut(&FlatNodeId)) {
        visit(node);
        // Children are appended only; indices are stable during the walk.
        for i in 0..self.nodes[node.0].children.len() {
            let child = self.nodes[node.0].children[i];
            self.visit_subtree(&child, visit);
        }
    }

    fn has_children(&self, node: &FlatNodeId) -> bool {
        !self.nodes[node.0].children.is_empty()
    }

    fn is_pick_leaf(&self, node: &FlatNodeId) -> bool {
        self.nodes[node.0].pick.is_some()
    }
}

/// Point-in-rect caster over a [`FlatScene`]'s leaves.
#[derive(Copy, Clone, Debug, Default)]
pub struct FlatCaster;

impl RayCast<FlatNodeId, (), FlatScene> for FlatCaster {
    fn cast(
        &self,
        scene: &FlatScene,
        _camera: &(),
        pointer: Point,
        roots: &[FlatNodeId],
        out: &mut Vec<RayHit<FlatNodeId>>,
    ) {
        for root in roots {
            scene.visit_subtree(root, &mut |node| {
                if let Some((rect, distance)) = scene.nodes[node.0].pick
                    && rect.contains(pointer)
                {
                    out.push(RayHit {
                        leaf: *node,
                        distance,
                    });
                }
            });
        }
        out.sort_by(|a, b| {
            a.distance
                .partial_cmp(&b.distance)
                .unwrap_or(core::cmp::Ordering::Equal)
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn unit_rect() -> Rect {
        Rect::new(-0.25, -0.25, 0.25, 0.25)
    }

    #[test]
    fn cast_orders_hits_nearest_first() {
        let mut scene = FlatScene::new();
        let far = scene.add_leaf(None, unit_rect(), 5.0);
        let near = scene.add_leaf(None, unit_rect(), 1.0);
        let mut out = Vec::new();
        FlatCaster.cast(&scene, &(), Point::ZERO, &[far, near], &mut out);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].leaf, near);
        assert_eq!(out[1].leaf, far);
    }

    #[test]
    fn cast_misses_outside_rects() {
        let mut scene = FlatScene::new();
        let leaf = scene.add_leaf(None, unit_rect(), 1.0);
        let mut out = Vec::new();
        FlatCaster.cast(&scene, &(), Point::new(0.9, 0.9), &[leaf], &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn subtree_walk_reaches_nested_leaves() {
        let mut scene = FlatScene::new();
        let group = scene.add_group(None);
        let inner = scene.add_group(Some(group));
        let leaf = scene.add_leaf(Some(inner), unit_rect(), 1.0);
        let mut seen = vec![];
        scene.visit_subtree(&group, &mut |n| seen.push(*n));
        assert_eq!(seen, vec![group, inner, leaf]);
        assert!(scene.has_children(&group));
        assert!(!scene.is_pick_leaf(&group));
        assert!(scene.is_pick_leaf(&leaf));
    }

    #[test]
    fn place_leaf_changes_what_the_ray_sees() {
        let mut scene = FlatScene::new();
        let leaf = scene.add_leaf(None, unit_rect(), 1.0);
        let mut out = Vec::new();
        FlatCaster.cast(&scene, &(), Point::new(0.9, 0.9), &[leaf], &mut out);
        assert!(out.is_empty());
        scene.place_leaf(leaf, Rect::new(0.8, 0.8, 1.0, 1.0), 1.0);
        FlatCaster.cast(&scene, &(), Point::new(0.9, 0.9), &[leaf], &mut out);
        assert_eq!(out.len(), 1);
    }
}
