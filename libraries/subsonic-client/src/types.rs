//! Payload types returned by Subsonic operations.
//!
//! The same types decode both JSON and XML envelopes: JSON uses plain
//! camelCase keys, XML carries scalars as attributes (`@name` aliases) and
//! repeated children as lists.

use serde::{Deserialize, Deserializer, Serialize};

/// Accept identifiers sent either as strings or as numbers.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Str(String),
        Int(i64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Str(s) => s,
        Raw::Int(i) => i.to_string(),
    })
}

// =============================================================================
// System
// =============================================================================

/// Server license details.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct License {
    #[serde(alias = "@valid")]
    pub valid: bool,
    #[serde(alias = "@email", default)]
    pub email: Option<String>,
    #[serde(alias = "@licenseExpires", default)]
    pub license_expires: Option<String>,
    #[serde(alias = "@trialExpires", default)]
    pub trial_expires: Option<String>,
}

// =============================================================================
// Browsing
// =============================================================================

/// A top-level music folder.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct MusicFolder {
    #[serde(alias = "@id", deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(alias = "@name", default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MusicFolders {
    #[serde(default)]
    pub music_folder: Vec<MusicFolder>,
}

/// Folder-based artist index, as returned by `getIndexes`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Indexes {
    #[serde(alias = "@lastModified", default)]
    pub last_modified: Option<i64>,
    #[serde(alias = "@ignoredArticles", default)]
    pub ignored_articles: Option<String>,
    #[serde(default)]
    pub shortcut: Vec<IndexArtist>,
    #[serde(default)]
    pub index: Vec<Index>,
    /// Songs placed directly in the music folder root
    #[serde(default)]
    pub child: Vec<Song>,
}

/// Artists grouped under one index letter.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Index {
    #[serde(alias = "@name")]
    pub name: String,
    #[serde(default)]
    pub artist: Vec<IndexArtist>,
}

/// Artist entry of a folder-based index.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexArtist {
    #[serde(alias = "@id", deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(alias = "@name")]
    pub name: String,
    #[serde(alias = "@starred", default)]
    pub starred: Option<String>,
    #[serde(alias = "@userRating", default)]
    pub user_rating: Option<u8>,
    #[serde(alias = "@averageRating", default)]
    pub average_rating: Option<f64>,
}

/// Contents of a music directory.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Directory {
    #[serde(alias = "@id", deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(alias = "@parent", default)]
    pub parent: Option<String>,
    #[serde(alias = "@name")]
    pub name: String,
    #[serde(alias = "@starred", default)]
    pub starred: Option<String>,
    #[serde(alias = "@userRating", default)]
    pub user_rating: Option<u8>,
    #[serde(alias = "@averageRating", default)]
    pub average_rating: Option<f64>,
    #[serde(alias = "@playCount", default)]
    pub play_count: Option<u64>,
    #[serde(default)]
    pub child: Vec<Song>,
}

/// A song, video or sub-directory entry.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Song {
    #[serde(alias = "@id", deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(alias = "@parent", default)]
    pub parent: Option<String>,
    #[serde(alias = "@isDir", default)]
    pub is_dir: bool,
    #[serde(alias = "@title", default)]
    pub title: String,
    #[serde(alias = "@album", default)]
    pub album: Option<String>,
    #[serde(alias = "@artist", default)]
    pub artist: Option<String>,
    #[serde(alias = "@track", default)]
    pub track: Option<u32>,
    #[serde(alias = "@year", default)]
    pub year: Option<i32>,
    #[serde(alias = "@genre", default)]
    pub genre: Option<String>,
    #[serde(alias = "@coverArt", default)]
    pub cover_art: Option<String>,
    #[serde(alias = "@size", default)]
    pub size: Option<u64>,
    #[serde(alias = "@contentType", default)]
    pub content_type: Option<String>,
    #[serde(alias = "@suffix", default)]
    pub suffix: Option<String>,
    #[serde(alias = "@transcodedContentType", default)]
    pub transcoded_content_type: Option<String>,
    #[serde(alias = "@transcodedSuffix", default)]
    pub transcoded_suffix: Option<String>,
    /// Duration in seconds
    #[serde(alias = "@duration", default)]
    pub duration: Option<u32>,
    /// Bitrate in kbit/s
    #[serde(alias = "@bitRate", default)]
    pub bit_rate: Option<u32>,
    #[serde(alias = "@path", default)]
    pub path: Option<String>,
    #[serde(alias = "@isVideo", default)]
    pub is_video: Option<bool>,
    #[serde(alias = "@userRating", default)]
    pub user_rating: Option<u8>,
    #[serde(alias = "@averageRating", default)]
    pub average_rating: Option<f64>,
    #[serde(alias = "@playCount", default)]
    pub play_count: Option<u64>,
    #[serde(alias = "@discNumber", default)]
    pub disc_number: Option<u32>,
    #[serde(alias = "@created", default)]
    pub created: Option<String>,
    #[serde(alias = "@starred", default)]
    pub starred: Option<String>,
    #[serde(alias = "@albumId", default)]
    pub album_id: Option<String>,
    #[serde(alias = "@artistId", default)]
    pub artist_id: Option<String>,
    /// "music", "podcast", "audiobook" or "video"
    #[serde(rename = "type", alias = "@type", default)]
    pub media_type: Option<String>,
}

/// A genre with its usage counts.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Genre {
    /// Genre name (element text in XML)
    #[serde(alias = "$text", default)]
    pub value: String,
    #[serde(alias = "@songCount", default)]
    pub song_count: Option<u64>,
    #[serde(alias = "@albumCount", default)]
    pub album_count: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Genres {
    #[serde(default)]
    pub genre: Vec<Genre>,
}

/// Tag-based artist index, as returned by `getArtists`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtistsIndex {
    #[serde(alias = "@ignoredArticles", default)]
    pub ignored_articles: Option<String>,
    #[serde(default)]
    pub index: Vec<ArtistIndex>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ArtistIndex {
    #[serde(alias = "@name")]
    pub name: String,
    #[serde(default)]
    pub artist: Vec<Artist>,
}

/// An artist organised by tags, optionally with its albums.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Artist {
    #[serde(alias = "@id", deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(alias = "@name")]
    pub name: String,
    #[serde(alias = "@coverArt", default)]
    pub cover_art: Option<String>,
    #[serde(alias = "@artistImageUrl", default)]
    pub artist_image_url: Option<String>,
    #[serde(alias = "@albumCount", default)]
    pub album_count: Option<u32>,
    #[serde(alias = "@starred", default)]
    pub starred: Option<String>,
    #[serde(alias = "@userRating", default)]
    pub user_rating: Option<u8>,
    #[serde(default)]
    pub album: Vec<Album>,
}

/// An album organised by tags, optionally with its songs.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Album {
    #[serde(alias = "@id", deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(alias = "@name")]
    pub name: String,
    #[serde(alias = "@artist", default)]
    pub artist: Option<String>,
    #[serde(alias = "@artistId", default)]
    pub artist_id: Option<String>,
    #[serde(alias = "@coverArt", default)]
    pub cover_art: Option<String>,
    #[serde(alias = "@songCount", default)]
    pub song_count: Option<u32>,
    /// Total duration in seconds
    #[serde(alias = "@duration", default)]
    pub duration: Option<u32>,
    #[serde(alias = "@playCount", default)]
    pub play_count: Option<u64>,
    #[serde(alias = "@created", default)]
    pub created: Option<String>,
    #[serde(alias = "@starred", default)]
    pub starred: Option<String>,
    #[serde(alias = "@year", default)]
    pub year: Option<i32>,
    #[serde(alias = "@genre", default)]
    pub genre: Option<String>,
    #[serde(alias = "@userRating", default)]
    pub user_rating: Option<u8>,
    #[serde(default)]
    pub song: Vec<Song>,
}

/// Biography, images and similar artists, sourced by the server from last.fm.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtistInfo {
    #[serde(default)]
    pub biography: Option<String>,
    #[serde(default)]
    pub music_brainz_id: Option<String>,
    #[serde(default)]
    pub last_fm_url: Option<String>,
    #[serde(default)]
    pub small_image_url: Option<String>,
    #[serde(default)]
    pub medium_image_url: Option<String>,
    #[serde(default)]
    pub large_image_url: Option<String>,
    #[serde(default)]
    pub similar_artist: Vec<Artist>,
}

/// Album notes and images, sourced by the server from last.fm.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbumInfo {
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub music_brainz_id: Option<String>,
    #[serde(default)]
    pub last_fm_url: Option<String>,
    #[serde(default)]
    pub small_image_url: Option<String>,
    #[serde(default)]
    pub medium_image_url: Option<String>,
    #[serde(default)]
    pub large_image_url: Option<String>,
}

/// Any payload that is just a list of songs.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct SongList {
    #[serde(default)]
    pub song: Vec<Song>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_music_folder_numeric_id() {
        let folder: MusicFolder = serde_json::from_str(r#"{"id": 1, "name": "Music"}"#).unwrap();
        assert_eq!(folder.id, "1");

        let folder: MusicFolder = serde_json::from_str(r#"{"id": "mf-2"}"#).unwrap();
        assert_eq!(folder.id, "mf-2");
        assert!(folder.name.is_none());
    }

    #[test]
    fn test_numeric_ids_become_strings() {
        let album: Album = serde_json::from_str(
            r#"{"id": 11053, "name": "Discovery", "song": [{"id": 7, "title": "Aerodynamic"}]}"#,
        )
        .unwrap();
        assert_eq!(album.id, "11053");
        assert_eq!(album.song[0].id, "7");

        let artist: Artist = serde_json::from_str(r#"{"id": 42, "name": "Daft Punk"}"#).unwrap();
        assert_eq!(artist.id, "42");

        let directory: Directory =
            serde_json::from_str(r#"{"id": 9, "name": "Daft Punk"}"#).unwrap();
        assert_eq!(directory.id, "9");
    }

    #[test]
    fn test_song_from_json() {
        let song: Song = serde_json::from_str(
            r#"{
                "id": "300",
                "parent": "200",
                "isDir": false,
                "title": "Smells Like Teen Spirit",
                "album": "Nevermind",
                "artist": "Nirvana",
                "track": 1,
                "year": 1991,
                "size": 5400185,
                "contentType": "audio/mpeg",
                "suffix": "mp3",
                "duration": 301,
                "bitRate": 128,
                "type": "music"
            }"#,
        )
        .unwrap();

        assert_eq!(song.title, "Smells Like Teen Spirit");
        assert_eq!(song.track, Some(1));
        assert_eq!(song.duration, Some(301));
        assert_eq!(song.media_type.as_deref(), Some("music"));
        assert!(!song.is_dir);
    }

    #[test]
    fn test_song_from_xml_attributes() {
        let song: Song = quick_xml::de::from_str(
            r#"<song id="300" isDir="false" title="Lithium" track="5" bitRate="320" contentType="audio/flac"/>"#,
        )
        .unwrap();

        assert_eq!(song.id, "300");
        assert_eq!(song.title, "Lithium");
        assert_eq!(song.track, Some(5));
        assert_eq!(song.bit_rate, Some(320));
        assert_eq!(song.content_type.as_deref(), Some("audio/flac"));
    }

    #[test]
    fn test_genres_from_xml_text() {
        let genres: Genres = quick_xml::de::from_str(
            r#"<genres><genre songCount="28" albumCount="6">Electronic</genre><genre songCount="6" albumCount="2">Hard Rock</genre></genres>"#,
        )
        .unwrap();

        assert_eq!(genres.genre.len(), 2);
        assert_eq!(genres.genre[0].value, "Electronic");
        assert_eq!(genres.genre[1].song_count, Some(6));
    }

    #[test]
    fn test_missing_lists_default_to_empty() {
        let artist: Artist = serde_json::from_str(r#"{"id": "5", "name": "ABBA"}"#).unwrap();
        assert!(artist.album.is_empty());

        let genres: Genres = serde_json::from_str("{}").unwrap();
        assert!(genres.genre.is_empty());
    }
}
