//! Stremio addon manifest

use serde::Serialize;

use crate::config::Config;
use crate::id::ADDON_PREFIX;
use crate::types::MediaKind;

const ADDON_ID: &str = "com.donyayeserial.addon";
const ADDON_VERSION: &str = "1.0.0";
const CONTACT_EMAIL: &str = "younessaeedian@gmail.com";
const DESCRIPTION: &str =
    "Enjoy watching the latest movies and series uncensored. (SUB = Subtitled | DUB = Dubbed)";
const LOGO: &str = "https://donyayeserial.com/wp-content/uploads/2023/02/logo.png";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    pub id: String,
    pub version: String,
    pub contact_email: String,
    pub description: String,
    pub logo: String,
    pub name: String,
    pub catalogs: Vec<CatalogDescriptor>,
    pub resources: Vec<Resource>,
    pub types: Vec<MediaKind>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogDescriptor {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: MediaKind,
    pub id: String,
    pub extra: Vec<CatalogExtra>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogExtra {
    pub name: String,
    pub is_required: bool,
}

/// A resource is either a bare name or a name restricted to types and id prefixes
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Resource {
    Short(String),
    Full {
        name: String,
        types: Vec<MediaKind>,
        #[serde(rename = "idPrefixes")]
        id_prefixes: Vec<String>,
    },
}

impl Manifest {
    /// Builds the manifest for one provider
    pub fn new(config: &Config, provider: &str) -> Self {
        let name = config.display_name();
        let catalog = |kind: MediaKind, suffix: &str| CatalogDescriptor {
            name: name.clone(),
            kind,
            id: format!("{provider}_{suffix}"),
            extra: vec![CatalogExtra {
                name: "search".to_string(),
                is_required: true,
            }],
        };
        let restricted = |resource: &str| Resource::Full {
            name: resource.to_string(),
            types: vec![MediaKind::Series, MediaKind::Movie],
            id_prefixes: vec![ADDON_PREFIX.to_string()],
        };

        Self {
            id: ADDON_ID.to_string(),
            version: ADDON_VERSION.to_string(),
            contact_email: CONTACT_EMAIL.to_string(),
            description: DESCRIPTION.to_string(),
            logo: LOGO.to_string(),
            catalogs: vec![
                catalog(MediaKind::Movie, "movies"),
                catalog(MediaKind::Series, "series"),
            ],
            resources: vec![
                Resource::Short("catalog".to_string()),
                restricted("meta"),
                restricted("stream"),
                restricted("subtitles"),
            ],
            types: vec![MediaKind::Movie, MediaKind::Series],
            name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_json_shape() {
        let manifest = Manifest::new(&Config::default(), "donyayeserial");
        let json = serde_json::to_value(&manifest).unwrap();

        assert_eq!(json["id"], "com.donyayeserial.addon");
        assert_eq!(json["name"], "Donyaye Serial");
        assert_eq!(json["contactEmail"], CONTACT_EMAIL);
        assert_eq!(json["types"], serde_json::json!(["movie", "series"]));
        assert_eq!(json["catalogs"][0]["id"], "donyayeserial_movies");
        assert_eq!(json["catalogs"][0]["type"], "movie");
        assert_eq!(json["catalogs"][1]["id"], "donyayeserial_series");
        assert_eq!(json["catalogs"][1]["extra"][0]["isRequired"], true);
        assert_eq!(json["resources"][0], "catalog");
        assert_eq!(json["resources"][1]["name"], "meta");
        assert_eq!(json["resources"][3]["idPrefixes"][0], "ds_");
    }

    #[test]
    fn test_manifest_dev_mode_name() {
        let config = Config {
            dev_mode: true,
            ..Config::default()
        };
        let manifest = Manifest::new(&config, "donyayeserial");
        assert_eq!(manifest.name, "Donyaye Serial - DEV");
        assert!(manifest.catalogs.iter().all(|c| c.name == manifest.name));
    }
}
