//! The built-in image field specs.

use super::fieldspec::FieldSpec;
use super::set::FieldSpecSet;
use crate::fieldpath::{FieldPath, PathSegment};
use crate::resid::Gvk;
use once_cell::sync::Lazy;

/// Workload kinds in `apps/v1` that embed a pod template.
pub const TEMPLATE_KINDS: [&str; 4] = ["Deployment", "StatefulSet", "ReplicaSet", "DaemonSet"];

const CONTAINER_LISTS: [&str; 2] = ["containers", "initContainers"];

static DEFAULT_IMAGE_FIELDS: Lazy<FieldSpecSet> = Lazy::new(|| {
    let mut set = FieldSpecSet::new();

    let pod = Gvk::new("", "v1", "Pod");
    for list in CONTAINER_LISTS {
        set.insert(FieldSpec::new(pod.clone(), image_path(&["spec"], list)));
    }

    for kind in TEMPLATE_KINDS {
        let gvk = Gvk::new("apps", "v1", kind);
        for list in CONTAINER_LISTS {
            set.insert(FieldSpec::new(
                gvk.clone(),
                image_path(&["spec", "template", "spec"], list),
            ));
        }
    }

    set
});

/// Returns the image fields every run considers: container and init
/// container images of Pods and of the pod templates of apps/v1 workloads.
pub fn default_image_fields() -> &'static FieldSpecSet {
    &DEFAULT_IMAGE_FIELDS
}

/// Builds `<prefix>/<list>[]/image`.
fn image_path(prefix: &[&str], list: &str) -> FieldPath {
    let mut segments: Vec<PathSegment> = prefix
        .iter()
        .map(|s| PathSegment::Literal(s.to_string()))
        .collect();
    segments.push(PathSegment::Literal(list.to_string()));
    segments.push(PathSegment::EachElement);
    segments.push(PathSegment::Literal("image".to_string()));
    FieldPath::from_segments(segments)
}
