// ABOUTME: Typed view of a resolved compose manifest.
// ABOUTME: Parses `compose config` output; service -> declared image, post-interpolation.

use serde::Deserialize;
use std::collections::BTreeMap;

/// A resolved manifest as emitted by `docker compose config`.
///
/// Variable interpolation has already been applied by the orchestration
/// client, so declared images here are the final expectations. Only the
/// fields this crate consumes are modeled; everything else is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResolvedConfig {
    #[serde(default)]
    services: BTreeMap<String, ServiceSpec>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ServiceSpec {
    #[serde(default)]
    image: Option<String>,
}

impl ResolvedConfig {
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Build a config directly from service -> image pairs (test fakes).
    pub fn from_images<I, S>(images: I) -> Self
    where
        I: IntoIterator<Item = (S, S)>,
        S: Into<String>,
    {
        Self {
            services: images
                .into_iter()
                .map(|(service, image)| {
                    (
                        service.into(),
                        ServiceSpec {
                            image: Some(image.into()),
                        },
                    )
                })
                .collect(),
        }
    }

    /// Declared (service, image) pairs, skipping services without an
    /// `image:` key (build-only services).
    pub fn declared_images(&self) -> impl Iterator<Item = (&str, &str)> {
        self.services
            .iter()
            .filter_map(|(name, spec)| spec.image.as_deref().map(|image| (name.as_str(), image)))
    }

    pub fn service_count(&self) -> usize {
        self.services.len()
    }
}
