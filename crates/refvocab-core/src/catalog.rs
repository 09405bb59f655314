//! Fixed catalog of upstream authorities and their derived artifacts.

use serde::Serialize;

const NVS_COLLECTION_BASE: &str = "https://vocab.nerc.ac.uk/collection";
const NVS_JSONLD_PROFILE: &str = "current/?_profile=nvs&_mediatype=application/ld+json";

/// P01 comes from the NVS bulk dump rather than the collection endpoint.
const P01_BULK_URL: &str = "https://vocab.nerc.ac.uk/downloads/publish/P01.json";

const EDMO_SPARQL_URL: &str = "https://edmo.seadatanet.org/sparql/sparql?query=SELECT%20%3Fs%20%3Fp%20%3Fo%20WHERE%20%7B%20%0D%0A%09%3Fs%20%3Fp%20%3Fo%20%0D%0A%7D%20LIMIT%201000000&accept=application%2Fjson";

/// The EDMO endpoint rejects default client agents.
pub const EDMO_USER_AGENT: &str = "Custom agent";

/// SeaDataNet collections published by the NERC Vocabulary Server, in output order.
pub const SDN_COLLECTIONS: &[&str] = &["P01", "P02", "P06", "P07", "L05", "L06", "L22", "L35"];

/// How a downloaded source is turned into artifacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    /// SKOS JSON-LD collection → concept table + relation graphs.
    SdnVocabulary,
    /// EDMO SPARQL result set → organization code table.
    EdmoCodes,
}

/// One upstream document and where its derived artifacts go.
#[derive(Debug, Clone, Serialize)]
pub struct Resource {
    /// Logical name, also the manifest key (e.g. `P01`, `EDMO`).
    pub name: String,
    pub kind: ResourceKind,
    /// Retrieval URL of the raw source.
    pub url: String,
    /// File name of the raw download inside the temp directory.
    pub temp_file: String,
    /// Table path relative to the output root.
    pub table_file: String,
    /// Extra `User-Agent` header for picky endpoints.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

impl Resource {
    /// A SeaDataNet collection such as `P02`.
    pub fn sdn_vocabulary(collection: &str) -> Self {
        let url = if collection == "P01" {
            P01_BULK_URL.to_string()
        } else {
            format!("{}/{}/{}", NVS_COLLECTION_BASE, collection, NVS_JSONLD_PROFILE)
        };
        Self {
            name: collection.to_string(),
            kind: ResourceKind::SdnVocabulary,
            url,
            temp_file: format!("sdn_vocab_{}.json", collection.to_lowercase()),
            table_file: format!("{}.csv", collection),
            user_agent: None,
        }
    }

    /// The EDMO organization directory.
    pub fn edmo() -> Self {
        Self {
            name: "EDMO".to_string(),
            kind: ResourceKind::EdmoCodes,
            url: EDMO_SPARQL_URL.to_string(),
            temp_file: "edmo_codes_jsonld.json".to_string(),
            table_file: "EDMO.csv".to_string(),
            user_agent: Some(EDMO_USER_AGENT.to_string()),
        }
    }

    /// Relation file path relative to the output root, e.g. `relations/P01.broader.json`.
    pub fn relation_file(&self, relation: &str) -> String {
        format!("relations/{}.{}.json", self.name, relation)
    }
}

/// Ordered list of resources processed by one batch run.
#[derive(Debug, Clone, Serialize)]
pub struct ResourceCatalog {
    pub resources: Vec<Resource>,
}

impl ResourceCatalog {
    /// All SeaDataNet collections followed by EDMO.
    pub fn default_sources() -> Self {
        let mut resources: Vec<Resource> = SDN_COLLECTIONS
            .iter()
            .map(|c| Resource::sdn_vocabulary(c))
            .collect();
        resources.push(Resource::edmo());
        Self { resources }
    }
}
