//! Parameter encoding for Subsonic operations.
//!
//! Every call ends up as a flat, ordered multi-map of string keys to string
//! values ([`CallParameters`]). Typed option structures encode themselves into
//! that map through [`EncodeParams`].

use std::fmt;

use crate::error::{Error, Result};

/// Ordered multi-valued parameter set.
///
/// Keys may repeat; entries keep the order in which they were added, so
/// repeated identifiers reach the server in submission order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallParameters {
    entries: Vec<(String, String)>,
}

impl CallParameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a value, keeping any existing values for the same key.
    pub fn add(&mut self, key: impl Into<String>, value: impl ToString) -> &mut Self {
        self.entries.push((key.into(), value.to_string()));
        self
    }

    /// Append one entry per value under the same key, in iteration order.
    pub fn add_all<I, V>(&mut self, key: &str, values: I) -> &mut Self
    where
        I: IntoIterator<Item = V>,
        V: ToString,
    {
        for value in values {
            self.add(key, value);
        }
        self
    }

    /// Append a value only when it is present.
    pub fn add_opt<V: ToString>(&mut self, key: &str, value: Option<V>) -> &mut Self {
        if let Some(value) = value {
            self.add(key, value);
        }
        self
    }

    /// Builder-style [`CallParameters::add`].
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.add(key, value);
        self
    }

    /// First value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// All values stored under `key`, in insertion order.
    pub fn get_all<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.entries
            .iter()
            .filter(move |(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Append every entry of `other` without inspecting the keys.
    pub fn extend(&mut self, other: CallParameters) -> &mut Self {
        self.entries.extend(other.entries);
        self
    }

    /// Encode typed options into this set.
    pub fn encode<P: EncodeParams + ?Sized>(&mut self, options: &P) -> &mut Self {
        options.encode_into(self);
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for CallParameters
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl IntoIterator for CallParameters {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<(String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Types that know how to project themselves onto request parameters.
pub trait EncodeParams {
    fn encode_into(&self, params: &mut CallParameters);
}

impl EncodeParams for CallParameters {
    fn encode_into(&self, params: &mut CallParameters) {
        params.extend(self.clone());
    }
}

// =============================================================================
// Annotation
// =============================================================================

/// Songs, albums and artists addressed together by `star` and `unstar`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StarTargets {
    pub song_ids: Vec<String>,
    pub album_ids: Vec<String>,
    pub artist_ids: Vec<String>,
}

impl StarTargets {
    pub fn songs<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            song_ids: ids.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn albums<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            album_ids: ids.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn artists<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            artist_ids: ids.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.song_ids.is_empty() && self.album_ids.is_empty() && self.artist_ids.is_empty()
    }
}

impl EncodeParams for StarTargets {
    fn encode_into(&self, params: &mut CallParameters) {
        params
            .add_all("id", &self.song_ids)
            .add_all("albumId", &self.album_ids)
            .add_all("artistId", &self.artist_ids);
    }
}

/// A user rating in the closed range `0..=5`, where 0 removes the rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Rating(u8);

impl Rating {
    pub const MAX: u8 = 5;

    pub fn new(value: i32) -> Result<Self> {
        match u8::try_from(value) {
            Ok(v) if v <= Self::MAX => Ok(Self(v)),
            _ => Err(Error::Validation(format!(
                "rating must be between 0 and {}, got {}",
                Self::MAX,
                value
            ))),
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<i32> for Rating {
    type Error = Error;

    fn try_from(value: i32) -> Result<Self> {
        Self::new(value)
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// Browsing
// =============================================================================

/// Options for `getIndexes`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexesOptions {
    /// Only return artists in this music folder.
    pub music_folder_id: Option<String>,
    /// Only return a result if the collection changed since this time
    /// (milliseconds since the Unix epoch).
    pub if_modified_since: Option<u64>,
}

impl EncodeParams for IndexesOptions {
    fn encode_into(&self, params: &mut CallParameters) {
        params
            .add_opt("musicFolderId", self.music_folder_id.as_ref())
            .add_opt("ifModifiedSince", self.if_modified_since);
    }
}

/// Options for `getArtists`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtistsOptions {
    pub music_folder_id: Option<String>,
}

impl EncodeParams for ArtistsOptions {
    fn encode_into(&self, params: &mut CallParameters) {
        params.add_opt("musicFolderId", self.music_folder_id.as_ref());
    }
}

/// Options for `getArtistInfo` and `getArtistInfo2`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtistInfoOptions {
    /// Max number of similar artists to return.
    pub count: Option<u32>,
    /// Whether to return artists that are not present in the library.
    pub include_not_present: Option<bool>,
}

impl EncodeParams for ArtistInfoOptions {
    fn encode_into(&self, params: &mut CallParameters) {
        params
            .add_opt("count", self.count)
            .add_opt("includeNotPresent", self.include_not_present);
    }
}

/// Options for operations that only take a result count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CountOptions {
    pub count: Option<u32>,
}

impl CountOptions {
    pub fn new(count: u32) -> Self {
        Self { count: Some(count) }
    }
}

impl EncodeParams for CountOptions {
    fn encode_into(&self, params: &mut CallParameters) {
        params.add_opt("count", self.count);
    }
}

// =============================================================================
// Media retrieval
// =============================================================================

/// Options for `stream`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreamOptions {
    /// Bitrate limit in kbit/s; zero means no limit.
    pub max_bit_rate: Option<u32>,
    /// Preferred target format such as `mp3`; `raw` disables transcoding.
    pub format: Option<String>,
    /// Video only: start offset in seconds.
    pub time_offset: Option<u32>,
    /// Video only: requested size as `WxH`.
    pub size: Option<String>,
    /// Ask the server to set an estimated `Content-Length` for transcodes.
    pub estimate_content_length: Option<bool>,
    /// Video only: prefer the server's converted MP4.
    pub converted: Option<bool>,
}

impl EncodeParams for StreamOptions {
    fn encode_into(&self, params: &mut CallParameters) {
        params
            .add_opt("maxBitRate", self.max_bit_rate)
            .add_opt("format", self.format.as_ref())
            .add_opt("timeOffset", self.time_offset)
            .add_opt("size", self.size.as_ref())
            .add_opt("estimateContentLength", self.estimate_content_length)
            .add_opt("converted", self.converted);
    }
}

/// Options for `getCoverArt`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CoverArtOptions {
    /// Scale the image to this size in pixels.
    pub size: Option<u32>,
}

impl EncodeParams for CoverArtOptions {
    fn encode_into(&self, params: &mut CallParameters) {
        params.add_opt("size", self.size);
    }
}
