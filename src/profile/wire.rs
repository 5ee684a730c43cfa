use serde::Deserialize;

/* --------- Minimal serde mapping for the profile endpoints --------- */

#[derive(Deserialize)]
pub(crate) struct ProfileNode {
    pub(crate) id: String,
    pub(crate) name: String,
    #[serde(default)]
    pub(crate) demo: bool,
    #[serde(default)]
    pub(crate) legacy: bool,
}

#[derive(Deserialize)]
pub(crate) struct NameNode {
    pub(crate) name: String,
    #[serde(rename = "changedToAt")]
    pub(crate) changed_to_at: Option<i64>,
}

#[derive(Deserialize)]
pub(crate) struct PropertiesEnvelope {
    pub(crate) properties: Vec<PropertyNode>,
}

#[derive(Deserialize)]
pub(crate) struct PropertyNode {
    pub(crate) name: String,
    /// base64 encoded JSON
    pub(crate) value: String,
}

/* --------- Decoded "textures" property --------- */

#[derive(Deserialize)]
pub(crate) struct TexturesPayload {
    #[serde(rename = "profileId")]
    pub(crate) profile_id: Option<String>,
    pub(crate) textures: TextureSet,
}

#[derive(Deserialize)]
pub(crate) struct TextureSet {
    #[serde(rename = "SKIN")]
    pub(crate) skin: Option<TextureNode>,
    #[serde(rename = "CAPE")]
    pub(crate) cape: Option<TextureNode>,
}

#[derive(Deserialize)]
pub(crate) struct TextureNode {
    pub(crate) url: String,
    pub(crate) metadata: Option<TextureMetadata>,
}

#[derive(Deserialize)]
pub(crate) struct TextureMetadata {
    pub(crate) model: Option<String>,
}
