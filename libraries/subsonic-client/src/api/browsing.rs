//! Library browsing.

use serde::Deserialize;
use tracing::debug;

use crate::client::SubsonicClient;
use crate::error::Result;
use crate::params::{
    ArtistInfoOptions, ArtistsOptions, CallParameters, CountOptions, IndexesOptions,
};
use crate::types::{
    Album, AlbumInfo, Artist, ArtistInfo, ArtistsIndex, Directory, Genre, Genres, Indexes,
    MusicFolder, MusicFolders, Song, SongList,
};

// Payload wrappers, one per response field name.

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct MusicFoldersBody {
    #[serde(default)]
    music_folders: MusicFolders,
}

#[derive(Deserialize)]
struct IndexesBody {
    indexes: Indexes,
}

#[derive(Deserialize)]
struct DirectoryBody {
    directory: Directory,
}

#[derive(Deserialize)]
struct GenresBody {
    #[serde(default)]
    genres: Genres,
}

#[derive(Deserialize)]
struct ArtistsBody {
    artists: ArtistsIndex,
}

#[derive(Deserialize)]
struct ArtistBody {
    artist: Artist,
}

#[derive(Deserialize)]
struct AlbumBody {
    album: Album,
}

#[derive(Deserialize)]
struct SongBody {
    song: Song,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ArtistInfoBody {
    #[serde(default)]
    artist_info: ArtistInfo,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ArtistInfo2Body {
    #[serde(default)]
    artist_info2: ArtistInfo,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AlbumInfoBody {
    #[serde(default)]
    album_info: AlbumInfo,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SimilarSongsBody {
    #[serde(default)]
    similar_songs: SongList,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SimilarSongs2Body {
    #[serde(default)]
    similar_songs2: SongList,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TopSongsBody {
    #[serde(default)]
    top_songs: SongList,
}

fn with_id(id: &str) -> CallParameters {
    CallParameters::new().with("id", id)
}

impl SubsonicClient {
    /// Get all configured top-level music folders.
    pub async fn get_music_folders(&self) -> Result<Vec<MusicFolder>> {
        let body: MusicFoldersBody = self.call("getMusicFolders", CallParameters::new()).await?;
        Ok(body.music_folders.music_folder)
    }

    /// Get the folder-based index of all artists.
    pub async fn get_indexes(&self, options: &IndexesOptions) -> Result<Indexes> {
        let mut params = CallParameters::new();
        params.encode(options);

        let body: IndexesBody = self.call("getIndexes", params).await?;
        debug!(indexes = body.indexes.index.len(), "Fetched indexes");
        Ok(body.indexes)
    }

    /// Get the contents of a music directory.
    pub async fn get_music_directory(&self, id: &str) -> Result<Directory> {
        let body: DirectoryBody = self.call("getMusicDirectory", with_id(id)).await?;
        Ok(body.directory)
    }

    /// Get all genres.
    pub async fn get_genres(&self) -> Result<Vec<Genre>> {
        let body: GenresBody = self.call("getGenres", CallParameters::new()).await?;
        Ok(body.genres.genre)
    }

    /// Get all artists, organised by tags.
    pub async fn get_artists(&self, options: &ArtistsOptions) -> Result<ArtistsIndex> {
        let mut params = CallParameters::new();
        params.encode(options);

        let body: ArtistsBody = self.call("getArtists", params).await?;
        debug!(indexes = body.artists.index.len(), "Fetched artists");
        Ok(body.artists)
    }

    /// Get an artist and its albums.
    pub async fn get_artist(&self, id: &str) -> Result<Artist> {
        let body: ArtistBody = self.call("getArtist", with_id(id)).await?;
        Ok(body.artist)
    }

    /// Get an album and its songs.
    pub async fn get_album(&self, id: &str) -> Result<Album> {
        let body: AlbumBody = self.call("getAlbum", with_id(id)).await?;
        Ok(body.album)
    }

    /// Get a single song.
    pub async fn get_song(&self, id: &str) -> Result<Song> {
        let body: SongBody = self.call("getSong", with_id(id)).await?;
        Ok(body.song)
    }

    /// Get biography, images and similar artists for a folder-based artist.
    pub async fn get_artist_info(
        &self,
        id: &str,
        options: &ArtistInfoOptions,
    ) -> Result<ArtistInfo> {
        let mut params = with_id(id);
        params.encode(options);

        let body: ArtistInfoBody = self.call("getArtistInfo", params).await?;
        Ok(body.artist_info)
    }

    /// Like [`SubsonicClient::get_artist_info`], for tag-based artists.
    pub async fn get_artist_info2(
        &self,
        id: &str,
        options: &ArtistInfoOptions,
    ) -> Result<ArtistInfo> {
        let mut params = with_id(id);
        params.encode(options);

        let body: ArtistInfo2Body = self.call("getArtistInfo2", params).await?;
        Ok(body.artist_info2)
    }

    /// Get album notes and images. Accepts album or song ids.
    pub async fn get_album_info(&self, id: &str) -> Result<AlbumInfo> {
        let body: AlbumInfoBody = self.call("getAlbumInfo", with_id(id)).await?;
        Ok(body.album_info)
    }

    /// Like [`SubsonicClient::get_album_info`], for tag-based albums only.
    pub async fn get_album_info2(&self, id: &str) -> Result<AlbumInfo> {
        let body: AlbumInfoBody = self.call("getAlbumInfo2", with_id(id)).await?;
        Ok(body.album_info)
    }

    /// Songs similar to an artist, album or song, for radio-style playback.
    pub async fn get_similar_songs(&self, id: &str, options: &CountOptions) -> Result<Vec<Song>> {
        let mut params = with_id(id);
        params.encode(options);

        let body: SimilarSongsBody = self.call("getSimilarSongs", params).await?;
        Ok(body.similar_songs.song)
    }

    /// Like [`SubsonicClient::get_similar_songs`], using tags.
    pub async fn get_similar_songs2(&self, id: &str, options: &CountOptions) -> Result<Vec<Song>> {
        let mut params = with_id(id);
        params.encode(options);

        let body: SimilarSongs2Body = self.call("getSimilarSongs2", params).await?;
        Ok(body.similar_songs2.song)
    }

    /// Top songs for an artist, looked up by name.
    pub async fn get_top_songs(&self, artist: &str, options: &CountOptions) -> Result<Vec<Song>> {
        let mut params = CallParameters::new().with("artist", artist);
        params.encode(options);

        let body: TopSongsBody = self.call("getTopSongs", params).await?;
        Ok(body.top_songs.song)
    }
}
