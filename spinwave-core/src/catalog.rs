use crate::track::{group_by_initial, Track, TrackGroup};

/// Directory (relative to the page) holding the audio assets.
pub const ASSET_DIR: &str = "songs";

/// Relative path of the track list document.
pub const TRACK_LIST_PATH: &str = "tracks.json";

/// The ordered, in-memory track list.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TrackCatalog {
    tracks: Vec<Track>,
}

impl TrackCatalog {
    pub fn new<S: AsRef<str>>(ids: impl IntoIterator<Item = S>) -> Self {
        Self {
            tracks: ids.into_iter().map(|id| Track::parse(id.as_ref())).collect(),
        }
    }

    /// Parse the track list document: a JSON array of identifier strings.
    pub fn from_json(text: &str) -> Result<Self, String> {
        let ids: Vec<String> =
            serde_json::from_str(text).map_err(|e| format!("track list parse: {e}"))?;
        Ok(Self::new(ids))
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Track> {
        self.tracks.iter().find(|t| t.id == id)
    }

    /// Tracks whose display string contains `query`, in catalog order.
    pub fn filter(&self, query: &str) -> Vec<&Track> {
        self.tracks.iter().filter(|t| t.matches(query)).collect()
    }

    /// Filtered tracks grouped by title initial.
    pub fn grouped(&self, query: &str) -> Vec<TrackGroup> {
        group_by_initial(self.filter(query))
    }
}

/// Path of the asset behind `id`. The identifier is passed in already
/// URL-encoded by the caller when needed.
pub fn asset_path(encoded_id: &str) -> String {
    format!("{ASSET_DIR}/{encoded_id}")
}
