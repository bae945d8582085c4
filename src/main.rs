use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use log::LevelFilter;

use ltradio::player::Rodio;
use ltradio::{Catalog, Controller, Event, EventKind, Handler, Options, Station};

/// Lithuanian internet radio stations in your terminal.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Opt {
    /// Logging level
    #[clap(long, default_value = "error")]
    level: LevelFilter,

    /// Log file path (for debugging)
    #[clap(long, default_value = ".ltradio.log")]
    log_file: String,

    /// JSON file with additional stations
    #[clap(long)]
    stations: Option<PathBuf>,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List all stations
    List {
        /// Print as JSON
        #[clap(long)]
        json: bool,
    },
    /// Search stations by name, genre or description
    Search {
        query: String,

        /// Print as JSON
        #[clap(long)]
        json: bool,
    },
    /// Play a station until Ctrl-C
    Play {
        /// Station id
        id: String,

        /// Volume in [0, 1]
        #[clap(long, default_value_t = Options::DEFAULT_VOLUME)]
        volume: f32,

        /// Open the stream before playback is requested
        #[clap(long)]
        preload: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let opt = Opt::parse();

    let log_file = fs::File::create(&opt.log_file).context("can't open log file")?;

    simplelog::WriteLogger::init(opt.level, simplelog::Config::default(), log_file)
        .context("init logger")?;

    let catalog = load_catalog(opt.stations.as_ref())?;

    match opt.command {
        Command::List { json } => print_stations(&catalog, json),
        Command::Search { query, json } => print_stations(catalog.search(&query), json),
        Command::Play {
            id,
            volume,
            preload,
        } => {
            let station = catalog
                .get(&id)
                .with_context(|| format!("unknown station {id:?}"))?;

            let options = Options {
                volume,
                preload,
                autoplay: false,
            };

            play(station, options).await
        }
    }
}

fn load_catalog(extra: Option<&PathBuf>) -> anyhow::Result<Catalog> {
    let mut catalog = Catalog::new();

    if let Some(path) = extra {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("read stations from {}", path.display()))?;
        let stations: Vec<Station> = serde_json::from_str(&raw).context("parse stations")?;

        for station in stations {
            catalog.add(station)?;
        }
    }

    Ok(catalog)
}

fn print_stations<'a, I>(stations: I, json: bool) -> anyhow::Result<()>
where
    I: IntoIterator<Item = &'a Station>,
{
    let stations: Vec<&Station> = stations.into_iter().collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&stations)?);
        return Ok(());
    }

    for station in stations {
        println!(
            "{:<14} {:<22} {}",
            station.id,
            station.name,
            station.genre.as_deref().unwrap_or("-")
        );
    }

    Ok(())
}

async fn play(station: &Station, options: Options) -> anyhow::Result<()> {
    let controller = Controller::new(Rodio::try_default()?, options);

    let printer = Handler::new(|event| match event {
        Event::Play => println!("Playing"),
        Event::Pause => println!("Paused"),
        Event::Stop => println!("Stopped"),
        Event::Error(e) => eprintln!("{e}"),
        Event::VolumeChange(volume) => println!("Volume: {:.0}%", volume * 100.0),
        Event::StationChange(station) => println!("Station: {}", station.name),
    });

    for kind in [
        EventKind::Play,
        EventKind::Pause,
        EventKind::Stop,
        EventKind::Error,
        EventKind::VolumeChange,
        EventKind::StationChange,
    ] {
        controller.on(kind, printer.clone());
    }

    controller.play(station).await?;

    tokio::signal::ctrl_c().await.context("wait for ctrl-c")?;

    controller.destroy();

    Ok(())
}
