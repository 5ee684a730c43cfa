use serde::Deserialize;

#[derive(Deserialize)]
pub(crate) struct Manifest {
    pub(crate) latest: LatestNode,
    pub(crate) versions: Vec<VersionNode>,
}

#[derive(Deserialize)]
pub(crate) struct LatestNode {
    pub(crate) release: String,
    pub(crate) snapshot: String,
}

#[derive(Deserialize)]
pub(crate) struct VersionNode {
    pub(crate) id: String,
    #[serde(rename = "type")]
    pub(crate) kind: String,
    #[serde(rename = "releaseTime")]
    pub(crate) release_time: String,
}
