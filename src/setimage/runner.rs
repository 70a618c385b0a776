//! The set-image run over a batch of resources.

use crate::catalog::{default_image_fields, FieldSpecSet};
use crate::config::{ConfigError, SetImageConfig};
use crate::fieldpath::WalkError;
use crate::image::ImageSubstitution;
use crate::krm::{KubeObject, ObjectError, ResourceList, ResultItem, Results, Severity};
use crate::transform::{ImageTransform, MutationTracker};
use log::{debug, info, warn};

/// Summary line appended to every run's results.
pub fn summary_message(total: usize) -> String {
    format!("summary: updated a total of {} image(s)", total)
}

/// SetImage rewrites image references in a batch of resources.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SetImage {
    pub image: ImageSubstitution,
    /// Field specs beyond the built-in ones, for other kinds or paths.
    pub additional_image_fields: FieldSpecSet,
}

/// What a run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub results: Results,
    pub mutations: MutationTracker,
}

impl RunReport {
    /// Number reported in the summary.
    pub fn total_mutations(&self) -> usize {
        self.mutations.total()
    }

    /// False if any error was recorded.
    pub fn succeeded(&self) -> bool {
        !self.results.has_error()
    }
}

/// The outcome of updating one resource.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectUpdate {
    pub mutations: MutationTracker,
    /// Selectors that met a node of the wrong shape. Other selectors still ran.
    pub failures: Vec<WalkError>,
}

impl SetImage {
    pub fn new(image: ImageSubstitution) -> Self {
        SetImage {
            image,
            additional_image_fields: FieldSpecSet::new(),
        }
    }

    pub fn with_additional_image_fields(mut self, fields: FieldSpecSet) -> Self {
        self.additional_image_fields = fields;
        self
    }

    pub fn from_config(config: SetImageConfig) -> Self {
        SetImage {
            image: config.image,
            additional_image_fields: config.additional_image_fields,
        }
    }

    /// The built-in field specs followed by the additional ones not already
    /// among them.
    pub fn field_specs(&self) -> FieldSpecSet {
        default_image_fields().merge(&self.additional_image_fields)
    }

    /// Applies the substitution to every resource, in order.
    ///
    /// An invalid substitution is reported once and no resource is touched.
    /// A resource that cannot be processed is reported and skipped; the
    /// others are still updated. The summary is always the last result.
    pub fn run(&self, items: &mut [KubeObject]) -> RunReport {
        let mut results = Results::new();
        let mut mutations = MutationTracker::new();

        match ImageTransform::new(self.image.clone()) {
            Err(e) => {
                warn!("invalid FunctionConfig: {}", e);
                results.error(format!("invalid FunctionConfig: {}", e), None);
            }
            Ok(transform) => {
                let specs = self.field_specs();
                debug!("resolved {} image field spec(s)", specs.len());

                for object in items.iter_mut() {
                    match update_object(&transform, &specs, object) {
                        Ok(update) => {
                            mutations += update.mutations;
                            for failure in update.failures {
                                warn!("{}: {}", object.resource_ref().name, failure);
                                results.push(walk_failure(object, &failure));
                            }
                        }
                        Err(e) => {
                            warn!("skipping resource: {}", e);
                            results.error(e.to_string(), Some(&*object));
                        }
                    }
                }
            }
        }

        info!(
            "updated {} image(s), {} rewritten",
            mutations.total(),
            mutations.changed
        );
        results.info(summary_message(mutations.total()));
        RunReport { results, mutations }
    }
}

/// Applies `transform` to every leaf of `object` selected by `specs`.
pub fn update_object(
    transform: &ImageTransform,
    specs: &FieldSpecSet,
    object: &mut KubeObject,
) -> Result<ObjectUpdate, ObjectError> {
    let gvk = object.gvk()?;
    let mut update = ObjectUpdate::default();

    for spec in specs.applicable(&gvk) {
        match spec.select(&gvk, object.value_mut()) {
            Ok(mut leaves) => {
                for leaf in leaves.iter_mut() {
                    update.mutations.record(&transform.apply(leaf));
                }
            }
            Err(e) => update.failures.push(e),
        }
    }

    Ok(update)
}

fn walk_failure(object: &KubeObject, failure: &WalkError) -> ResultItem {
    ResultItem::new(Severity::Error, failure.to_string())
        .with_object(object)
        .with_field(failure.path().to_string())
}

/// Runs set-image over a ResourceList in place, decoding its function config
/// first. Returns true if no error was recorded.
pub fn process(list: &mut ResourceList) -> bool {
    let config = match SetImageConfig::from_value(list.function_config.as_ref()) {
        Ok(config) => config,
        Err(e) => {
            config_failure(&mut list.results, &e);
            return false;
        }
    };

    let report = SetImage::from_config(config).run(&mut list.items);
    let succeeded = report.succeeded();
    list.results.extend(report.results);
    succeeded
}

fn config_failure(results: &mut Results, e: &ConfigError) {
    warn!("invalid FunctionConfig: {}", e);
    results.error(format!("invalid FunctionConfig: {}", e), None);
    results.info(summary_message(0));
}
