//! Property application: transform, behavior and groups
//!
//! Absent values leave the node's current (intrinsic) values untouched;
//! this holds per vector component, not only per field.

use super::diagnostics::{Diagnostic, Diagnostics};
use super::node::RuntimeNode;
use crate::assets::{AssetCategory, AssetResolver};
use crate::foundation::math::{Dimension, Spatial, Transform2D, Transform3D};
use crate::spec::{NodeDescriptor, RotationSpec, VectorSpec};

/// Per-node configuration context shared by the applicator and configurators
pub struct ConfigureContext<'a> {
    /// Asset resolver for references
    pub resolver: &'a AssetResolver,
    /// Sink for non-fatal conditions
    pub diagnostics: &'a mut Diagnostics,
    /// Dimensionality of the scene being built
    pub dimension: Dimension,
}

/// Apply transform, behavior and groups from a descriptor, in that order
pub fn apply_common(node: &mut RuntimeNode, descriptor: &NodeDescriptor, ctx: &mut ConfigureContext<'_>) {
    apply_transform(node, descriptor);
    if let Some(reference) = descriptor.script.as_deref() {
        attach_behavior(node, reference, ctx);
    }
    apply_groups(node, &descriptor.groups);
}

/// Apply position, rotation and scale
///
/// Nodes without a transform (the generic kind) ignore transform fields.
pub fn apply_transform(node: &mut RuntimeNode, descriptor: &NodeDescriptor) {
    let has_fields = descriptor.position.is_some() || descriptor.rotation.is_some() || descriptor.scale.is_some();
    let kind = node.kind();
    match &mut node.transform {
        Spatial::TwoD(transform) => apply_2d(transform, descriptor, &node.name),
        Spatial::ThreeD(transform) => apply_3d(transform, descriptor),
        Spatial::None if has_fields => {
            log::debug!("Node '{}' ({}) has no transform; ignoring transform fields", node.name, kind);
        }
        Spatial::None => {}
    }
}

fn apply_2d(transform: &mut Transform2D, descriptor: &NodeDescriptor, name: &str) {
    let warn_z = |field: &str, v: &VectorSpec| {
        if v.z.is_some() {
            log::warn!("Node '{}': ignoring z component of {} in a 2D scene", name, field);
        }
    };

    if let Some(position) = &descriptor.position {
        warn_z("position", position);
        transform.position.x = position.x.unwrap_or(transform.position.x);
        transform.position.y = position.y.unwrap_or(transform.position.y);
    }
    match &descriptor.rotation {
        Some(RotationSpec::Angle(angle)) => transform.rotation_degrees = *angle,
        Some(RotationSpec::Euler(euler)) => {
            transform.rotation_degrees = euler.z.unwrap_or(transform.rotation_degrees);
        }
        None => {}
    }
    if let Some(scale) = &descriptor.scale {
        warn_z("scale", scale);
        transform.scale.x = scale.x.unwrap_or(transform.scale.x);
        transform.scale.y = scale.y.unwrap_or(transform.scale.y);
    }
}

fn apply_3d(transform: &mut Transform3D, descriptor: &NodeDescriptor) {
    fn merge(target: &mut crate::foundation::math::Vec3, spec: &VectorSpec) {
        target.x = spec.x.unwrap_or(target.x);
        target.y = spec.y.unwrap_or(target.y);
        target.z = spec.z.unwrap_or(target.z);
    }

    if let Some(position) = &descriptor.position {
        merge(&mut transform.position, position);
    }
    match &descriptor.rotation {
        // A bare angle in 3D turns about the z axis, matching its 2D meaning
        Some(RotationSpec::Angle(angle)) => transform.rotation_degrees.z = *angle,
        Some(RotationSpec::Euler(euler)) => merge(&mut transform.rotation_degrees, euler),
        None => {}
    }
    if let Some(scale) = &descriptor.scale {
        merge(&mut transform.scale, scale);
    }
}

/// Resolve and bind a behavior script
///
/// An unresolvable reference is reported and leaves the node without
/// behavior.
pub fn attach_behavior(node: &mut RuntimeNode, reference: &str, ctx: &mut ConfigureContext<'_>) {
    match ctx.resolver.resolve_behavior(reference) {
        Some(behavior) => {
            log::debug!("Attached behavior {} to '{}'", behavior.path, node.name);
            node.behavior = Some(behavior);
        }
        None => ctx.diagnostics.report(Diagnostic::UnresolvedAsset {
            node: node.name.clone(),
            category: AssetCategory::Behavior,
            reference: reference.to_string(),
        }),
    }
}

/// Register every group tag; duplicates are ignored
pub fn apply_groups(node: &mut RuntimeNode, groups: &[String]) {
    for group in groups {
        node.add_to_group(group.as_str());
    }
}
