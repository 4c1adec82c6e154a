/// Subsonic CLI - Command-line client for Subsonic-compatible servers
mod config;
mod error;

use clap::{Args, Parser, Subcommand};
use crate::config::CliConfig;
use crate::error::Result;
use serde::Serialize;
use std::path::{Path, PathBuf};
use subsonic_client::{
    ArtistsOptions, CoverArtOptions, RawMedia, StarTargets, StreamOptions, SubsonicClient,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "subsonic-cli")]
#[command(about = "Talk to a Subsonic-compatible music server", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check connectivity and credentials
    Ping,
    /// Show license status
    License,
    /// List top-level music folders
    Folders,
    /// List genres
    Genres,
    /// List artists grouped by index
    Artists {
        /// Restrict to a music folder
        #[arg(long)]
        folder: Option<String>,
    },
    /// Show an artist and its albums
    Artist { id: String },
    /// Show an album and its songs
    Album { id: String },
    /// Show a song
    Song { id: String },
    /// Star songs, albums or artists
    Star(TargetArgs),
    /// Remove stars from songs, albums or artists
    Unstar(TargetArgs),
    /// Rate an item from 1 to 5, or 0 to clear the rating
    Rate {
        id: String,
        #[arg(allow_hyphen_values = true)]
        rating: i32,
    },
    /// Stream a song, possibly transcoded, to a file
    Stream {
        id: String,
        /// Output file
        #[arg(short, long)]
        output: PathBuf,
        /// Target transcoding format (e.g. mp3, opus, raw)
        #[arg(long)]
        format: Option<String>,
        /// Maximum bit rate in kbps
        #[arg(long)]
        max_bit_rate: Option<u32>,
    },
    /// Download the original file of a song
    Download {
        id: String,
        /// Output file
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Save cover art to a file
    CoverArt {
        id: String,
        /// Output file
        #[arg(short, long)]
        output: PathBuf,
        /// Scale to this size in pixels
        #[arg(long)]
        size: Option<u32>,
    },
}

#[derive(Args)]
struct TargetArgs {
    /// Song id (repeatable)
    #[arg(long = "song")]
    songs: Vec<String>,
    /// Album id (repeatable)
    #[arg(long = "album")]
    albums: Vec<String>,
    /// Artist id (repeatable)
    #[arg(long = "artist")]
    artists: Vec<String>,
}

impl From<TargetArgs> for StarTargets {
    fn from(args: TargetArgs) -> Self {
        StarTargets {
            song_ids: args.songs,
            album_ids: args.albums,
            artist_ids: args.artists,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "subsonic_cli=info,subsonic_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    // Load configuration
    let config = CliConfig::load(cli.config.as_deref())?;
    config.validate()?;

    let client_config = config
        .to_client_config()
        .with_user_agent(format!("subsonic-cli/{}", env!("CARGO_PKG_VERSION")));
    let client = SubsonicClient::new(client_config)?;
    tracing::debug!("Using server {}", client.url());

    run(&client, cli.command).await?;

    Ok(())
}

async fn run(client: &SubsonicClient, command: Commands) -> Result<()> {
    match command {
        Commands::Ping => {
            client.ping().await?;
            println!("ok");
        }
        Commands::License => {
            let license = client.get_license().await?;
            print_json(&license)?;
        }
        Commands::Folders => {
            for folder in client.get_music_folders().await? {
                println!("{}\t{}", folder.id, folder.name.unwrap_or_default());
            }
        }
        Commands::Genres => {
            for genre in client.get_genres().await? {
                println!(
                    "{}\t{} songs\t{} albums",
                    genre.value,
                    genre.song_count.unwrap_or_default(),
                    genre.album_count.unwrap_or_default()
                );
            }
        }
        Commands::Artists { folder } => {
            let artists = client
                .get_artists(&ArtistsOptions {
                    music_folder_id: folder,
                })
                .await?;
            for index in artists.index {
                println!("{}", index.name);
                for artist in index.artist {
                    println!("  {}\t{}", artist.id, artist.name);
                }
            }
        }
        Commands::Artist { id } => print_json(&client.get_artist(&id).await?)?,
        Commands::Album { id } => print_json(&client.get_album(&id).await?)?,
        Commands::Song { id } => print_json(&client.get_song(&id).await?)?,
        Commands::Star(targets) => {
            client.star(&targets.into()).await?;
            tracing::info!("Starred");
        }
        Commands::Unstar(targets) => {
            client.unstar(&targets.into()).await?;
            tracing::info!("Unstarred");
        }
        Commands::Rate { id, rating } => {
            client.set_rating(&id, rating).await?;
            tracing::info!("Rated {} with {}", id, rating);
        }
        Commands::Stream {
            id,
            output,
            format,
            max_bit_rate,
        } => {
            let options = StreamOptions {
                format,
                max_bit_rate,
                ..StreamOptions::default()
            };
            let media = client.stream(&id, &options).await?;
            save_media(&media, &output).await?;
        }
        Commands::Download { id, output } => {
            let media = client.download(&id).await?;
            save_media(&media, &output).await?;
        }
        Commands::CoverArt { id, output, size } => {
            let media = client
                .get_cover_art(&id, &CoverArtOptions { size })
                .await?;
            save_media(&media, &output).await?;
        }
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn save_media(media: &RawMedia, output: &Path) -> Result<()> {
    tokio::fs::write(output, &media.data).await?;
    tracing::info!(
        "Wrote {} bytes of {} to {}",
        media.len(),
        media.content_type,
        output.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use clap::CommandFactory;

    #[tokio::test]
    async fn test_save_media_reports_io_error() {
        let media = RawMedia {
            content_type: "audio/mpeg".to_string(),
            data: b"ID3".to_vec().into(),
        };
        let dir = tempfile::tempdir().unwrap();

        let result = save_media(&media, &dir.path().join("missing/out.mp3")).await;
        assert!(matches!(result, Err(CliError::Io(_))));

        let output = dir.path().join("out.mp3");
        save_media(&media, &output).await.unwrap();
        assert_eq!(std::fs::read(&output).unwrap(), b"ID3");
    }

    #[test]
    fn test_client_error_is_wrapped() {
        let err = CliError::from(subsonic_client::Error::Validation("bad rating".into()));
        assert!(matches!(err, CliError::Client(_)));
        assert!(err.to_string().contains("bad rating"));
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_star_targets_repeatable() {
        let cli = Cli::parse_from([
            "subsonic-cli",
            "star",
            "--song",
            "s1",
            "--album",
            "al1",
            "--song",
            "s2",
        ]);

        match cli.command {
            Commands::Star(args) => {
                let targets = StarTargets::from(args);
                assert_eq!(targets.song_ids, vec!["s1", "s2"]);
                assert_eq!(targets.album_ids, vec!["al1"]);
                assert!(targets.artist_ids.is_empty());
            }
            _ => panic!("Expected star command"),
        }
    }

    #[test]
    fn test_rate_accepts_negative_for_validation() {
        let cli = Cli::parse_from(["subsonic-cli", "rate", "s1", "-1"]);
        assert!(matches!(cli.command, Commands::Rate { rating: -1, .. }));
    }

    #[test]
    fn test_stream_options() {
        let cli = Cli::parse_from([
            "subsonic-cli",
            "--config",
            "other.toml",
            "stream",
            "s1",
            "--output",
            "out.mp3",
            "--max-bit-rate",
            "192",
        ]);

        assert_eq!(cli.config, Some(PathBuf::from("other.toml")));
        match cli.command {
            Commands::Stream {
                max_bit_rate,
                format,
                ..
            } => {
                assert_eq!(max_bit_rate, Some(192));
                assert!(format.is_none());
            }
            _ => panic!("Expected stream command"),
        }
    }
}
