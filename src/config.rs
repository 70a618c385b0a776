//! Decoding of the function config.
//!
//! Two shapes are accepted:
//!
//! ```yaml
//! apiVersion: fn.kpt.dev/v1alpha1
//! kind: SetImage
//! image:
//!   name: nginx
//!   newTag: 1.29.0
//! additionalImageFields:
//! - group: batch
//!   version: v1
//!   kind: CronJob
//!   path: spec/jobTemplate/spec/template/spec/containers[]/image
//! ```
//!
//! and a `ConfigMap` whose `data` holds `name`, `newName`, `newTag` and
//! `digest`. Entries in `data` override the matching `image` fields.

use crate::catalog::{FieldSpec, FieldSpecSet};
use crate::image::ImageSubstitution;
use crate::value::{to_yaml, Value};
use indexmap::IndexMap;
use serde::de::IgnoredAny;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{0}")]
    Decode(String),

    #[error("ConfigMap has wrong field name {0}")]
    UnknownDataKey(String),
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(e: serde_yaml::Error) -> Self {
        ConfigError::Decode(e.to_string())
    }
}

/// The raw function config document. Image fields are strings; unquoted
/// scalars such as `1.20` are taken exactly as written.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct FunctionConfig {
    #[serde(default, rename = "apiVersion")]
    _api_version: Option<IgnoredAny>,
    #[serde(default, rename = "kind")]
    _kind: Option<IgnoredAny>,
    #[serde(default, rename = "metadata")]
    _metadata: Option<IgnoredAny>,
    #[serde(default)]
    image: ImageSubstitution,
    #[serde(default)]
    data: IndexMap<String, Option<String>>,
    #[serde(default)]
    additional_image_fields: Vec<FieldSpec>,
}

/// SetImageConfig is the decoded, not yet validated, configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SetImageConfig {
    pub image: ImageSubstitution,
    pub additional_image_fields: FieldSpecSet,
}

impl SetImageConfig {
    /// Decodes a function config. A missing config decodes to an empty one,
    /// which then fails validation.
    pub fn from_value(value: Option<&Value>) -> Result<Self, ConfigError> {
        match value {
            None | Some(Value::Null) => Ok(SetImageConfig::default()),
            Some(value) => Self::from_yaml(&to_yaml(value)?),
        }
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let raw: FunctionConfig = serde_yaml::from_str(yaml)?;

        let mut image = raw.image;
        for (key, text) in raw.data {
            let text = text.unwrap_or_default();
            match key.as_str() {
                "name" => image.name = text,
                "newName" => image.new_name = Some(text),
                "newTag" => image.new_tag = Some(text),
                "digest" => image.digest = Some(text),
                _ => return Err(ConfigError::UnknownDataKey(key)),
            }
        }

        Ok(SetImageConfig {
            image,
            additional_image_fields: raw.additional_image_fields.into_iter().collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resid::Gvk;
    use crate::value::from_yaml;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_set_image_kind() {
        let config = SetImageConfig::from_yaml(
            r#"
apiVersion: fn.kpt.dev/v1alpha1
kind: SetImage
metadata:
  name: my-func-config
image:
  name: nginx
  newName: bitnami/nginx
  newTag: 1.29.0
additionalImageFields:
- group: batch
  version: v1
  kind: CronJob
  path: spec/jobTemplate/spec/template/spec/containers[]/image
- group: batch
  version: v1
  kind: CronJob
  path: spec/jobTemplate/spec/template/spec/containers[]/image
  create: true
"#,
        )
        .unwrap();

        assert_eq!(
            config.image,
            ImageSubstitution::new("nginx")
                .with_new_name("bitnami/nginx")
                .with_new_tag("1.29.0")
        );
        assert_eq!(config.additional_image_fields.len(), 1);
        let spec = config.additional_image_fields.iter().next().unwrap();
        assert_eq!(spec.gvk(), Gvk::new("batch", "v1", "CronJob"));
        assert!(!spec.create);
    }

    #[test]
    fn test_config_map_data() {
        let config = SetImageConfig::from_yaml(
            "apiVersion: v1\nkind: ConfigMap\nmetadata:\n  name: cm\ndata:\n  name: alpine\n  newTag: 3.24\n",
        )
        .unwrap();
        assert_eq!(config.image, ImageSubstitution::new("alpine").with_new_tag("3.24"));
        assert!(config.additional_image_fields.is_empty());
    }

    #[test]
    fn test_unquoted_versions_keep_their_text() {
        for tag in ["1.20", "1.0", "1.29"] {
            let config_map =
                SetImageConfig::from_yaml(&format!("kind: ConfigMap\ndata:\n  name: nginx\n  newTag: {}\n", tag))
                    .unwrap();
            assert_eq!(config_map.image.new_tag(), Some(tag));

            let set_image =
                SetImageConfig::from_yaml(&format!("kind: SetImage\nimage:\n  name: nginx\n  newTag: {}\n", tag))
                    .unwrap();
            assert_eq!(set_image.image.new_tag(), Some(tag));
        }
    }

    #[test]
    fn test_from_decoded_value_keeps_text() {
        let value = from_yaml("kind: ConfigMap\ndata:\n  name: nginx\n  newTag: 1.20\n").unwrap();
        let config = SetImageConfig::from_value(Some(&value)).unwrap();
        assert_eq!(config.image, ImageSubstitution::new("nginx").with_new_tag("1.20"));

        let value = from_yaml("kind: SetImage\nimage:\n  name: nginx\n  newTag: 1.0\n").unwrap();
        let config = SetImageConfig::from_value(Some(&value)).unwrap();
        assert_eq!(config.image.new_tag(), Some("1.0"));
    }

    #[test]
    fn test_config_map_rejects_nested_data() {
        assert!(matches!(
            SetImageConfig::from_yaml("kind: ConfigMap\ndata:\n  newTag:\n    value: x\n"),
            Err(ConfigError::Decode(_))
        ));
    }

    #[test]
    fn test_config_map_data_overrides_image() {
        let config = SetImageConfig::from_yaml(
            "kind: SetImage\nimage:\n  name: alpine\n  newTag: '3.21'\ndata:\n  newTag: '3.24'\n",
        )
        .unwrap();
        assert_eq!(config.image.new_tag(), Some("3.24"));
    }

    #[test]
    fn test_config_map_wrong_key() {
        let err = SetImageConfig::from_yaml("kind: ConfigMap\ndata:\n  name: alpine\n  tag: '1'\n").unwrap_err();
        assert_eq!(err.to_string(), "ConfigMap has wrong field name tag");
    }

    #[test]
    fn test_rejects_unknown_fields() {
        assert!(matches!(
            SetImageConfig::from_yaml("kind: SetImage\nimages:\n  name: a\n"),
            Err(ConfigError::Decode(_))
        ));
        assert!(matches!(
            SetImageConfig::from_yaml("kind: SetImage\nimage:\n  name: a\n  newTags: b\n"),
            Err(ConfigError::Decode(_))
        ));
        assert!(matches!(
            SetImageConfig::from_yaml(
                "kind: SetImage\nadditionalImageFields:\n- version: v1\n  kind: Job\n  path: spec//image\n"
            ),
            Err(ConfigError::Decode(_))
        ));
    }

    #[test]
    fn test_missing_config_is_empty() {
        assert_eq!(SetImageConfig::from_value(None).unwrap(), SetImageConfig::default());
        assert_eq!(SetImageConfig::from_value(Some(&Value::Null)).unwrap(), SetImageConfig::default());
    }
}
