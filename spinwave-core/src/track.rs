use std::collections::BTreeMap;

pub const UNKNOWN_ARTIST: &str = "Unknown Artist";

/// Separator between artist and title in a track identifier.
const SEPARATOR: char = '-';

const AUDIO_EXTENSIONS: [&str; 5] = [".mp3", ".wav", ".ogg", ".flac", ".m4a"];

/// A catalog entry, parsed once from its identifier.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Track {
    pub id: String,
    pub artist: String,
    pub title: String,
    /// "<title> — <artist>"
    pub display: String,
}

impl Track {
    /// Parse `Artist_Name-Song_Title.mp3` style identifiers.
    ///
    /// The first `-` splits the artist from the title; further dashes stay
    /// in the title. Without a separator the whole name becomes the title.
    pub fn parse(id: &str) -> Self {
        let raw = strip_extension(id.trim()).trim();

        let (artist, title) = match raw.split_once(SEPARATOR) {
            Some((artist, title)) => {
                let artist = clean(artist);
                let artist = if artist.is_empty() { UNKNOWN_ARTIST.to_string() } else { artist };
                (artist, clean(title))
            }
            None => (UNKNOWN_ARTIST.to_string(), clean(raw)),
        };

        let display = format!("{title} \u{2014} {artist}");
        Self {
            id: id.to_string(),
            artist,
            title,
            display,
        }
    }

    /// Case-insensitive substring match against the display string.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim();
        query.is_empty() || self.display.to_lowercase().contains(&query.to_lowercase())
    }

    /// Group key: upper-cased first character of the title, `#` when empty.
    pub fn initial(&self) -> String {
        self.title
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_else(|| "#".to_string())
    }
}

fn strip_extension(name: &str) -> &str {
    let lower = name.to_ascii_lowercase();
    AUDIO_EXTENSIONS
        .iter()
        .find(|ext| lower.ends_with(*ext))
        .map(|ext| &name[..name.len() - ext.len()])
        .unwrap_or(name)
}

fn clean(part: &str) -> String {
    part.replace('_', " ").trim().to_string()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrackGroup {
    pub initial: String,
    pub tracks: Vec<Track>,
}

/// Group tracks by title initial. Groups come out in alphabetical order;
/// tracks keep their input order inside a group.
pub fn group_by_initial<'a>(tracks: impl IntoIterator<Item = &'a Track>) -> Vec<TrackGroup> {
    let mut groups: BTreeMap<String, Vec<Track>> = BTreeMap::new();
    for track in tracks {
        groups.entry(track.initial()).or_default().push(track.clone());
    }
    groups
        .into_iter()
        .map(|(initial, tracks)| TrackGroup { initial, tracks })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_artist_and_title() {
        let t = Track::parse("Daft_Punk-One_More_Time.mp3");
        assert_eq!(t.artist, "Daft Punk");
        assert_eq!(t.title, "One More Time");
        assert_eq!(t.display, "One More Time \u{2014} Daft Punk");
        assert_eq!(t.id, "Daft_Punk-One_More_Time.mp3");
    }

    #[test]
    fn test_extra_separators_stay_in_title() {
        let t = Track::parse("Artist-Part_One-Part_Two.mp3");
        assert_eq!(t.artist, "Artist");
        assert_eq!(t.title, "Part One-Part Two");
        assert_eq!(t.display, format!("{} \u{2014} {}", t.title, t.artist));
    }

    #[test]
    fn test_display_format_holds_for_separated_ids() {
        for id in ["A-B", "x_y-z_w.mp3", " lead - trail .ogg", "a--b", "Band-Song.FLAC"] {
            let t = Track::parse(id);
            assert_eq!(t.display, format!("{} \u{2014} {}", t.title, t.artist), "id {id:?}");
            assert!(!t.artist.contains('_') && !t.title.contains('_'), "id {id:?}");
        }
    }

    #[test]
    fn test_no_separator_falls_back_to_unknown_artist() {
        for id in ["Lonely_Song.mp3", "plain", ""] {
            assert_eq!(Track::parse(id).artist, UNKNOWN_ARTIST, "id {id:?}");
        }
        let t = Track::parse("Lonely_Song.mp3");
        assert_eq!(t.title, "Lonely Song");
        assert_eq!(t.display, "Lonely Song \u{2014} Unknown Artist");
    }

    #[test]
    fn test_empty_artist_falls_back() {
        let t = Track::parse("-Untitled.mp3");
        assert_eq!(t.artist, UNKNOWN_ARTIST);
        assert_eq!(t.title, "Untitled");
    }

    #[test]
    fn test_matches_is_case_insensitive() {
        let t = Track::parse("A-One.mp3");
        assert!(t.matches("one"));
        assert!(t.matches("ONE \u{2014} a"));
        assert!(t.matches(""));
        assert!(!t.matches("two"));
    }

    #[test]
    fn test_group_by_initial() {
        let tracks: Vec<Track> = ["x-beta.mp3", "y-Alpha.mp3", "z-apple.mp3", "w-_.mp3"]
            .iter()
            .map(|id| Track::parse(id))
            .collect();
        let groups = group_by_initial(&tracks);
        let initials: Vec<&str> = groups.iter().map(|g| g.initial.as_str()).collect();
        assert_eq!(initials, ["#", "A", "B"]);
        let a: Vec<&str> = groups[1].tracks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(a, ["y-Alpha.mp3", "z-apple.mp3"]);
    }
}
