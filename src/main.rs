use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

use mapgis_tools_rs::io::mapgis::diagnostics;
use mapgis_tools_rs::{ColorTable, GeoJsonWriter, MapGisReader, MapGisReaderConfiguration};

#[derive(Parser, Debug)]
#[command(name = "mapgis2geojson", about = "Convert MapGIS 6.x line and polygon files to GeoJSON")]
struct Cli {
    /// MapGIS file to convert (.WL, .WT or .WP).
    input: PathBuf,

    /// Pcolor.lib color table used to resolve fill colors.
    #[arg(long, value_name = "PCOLOR")]
    colors: Option<PathBuf>,

    /// CRS name written to the collection, e.g. urn:ogc:def:crs:EPSG::4490.
    #[arg(long)]
    crs: Option<String>,

    /// Print the header, region directory and record listings to stderr.
    #[arg(long)]
    dump: bool,
}

fn open(path: &Path) -> Result<BufReader<File>> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    Ok(BufReader::new(file))
}

/// Decode `cli.input` and write the GeoJSON document to `out`.
/// Notifications and `--dump` listings go to `err`.
fn run<W: Write, E: Write>(cli: &Cli, out: &mut W, err: &mut E) -> Result<()> {
    let configuration = MapGisReaderConfiguration::default();

    if cli.dump {
        diagnostics::dump(&mut open(&cli.input)?, &configuration, err)
            .with_context(|| format!("failed to dump {}", cli.input.display()))?;
        writeln!(err)?;
    }

    let mut reader = MapGisReader::new(open(&cli.input)?, configuration);
    if let Some(path) = &cli.colors {
        let table = ColorTable::read_from_file(path)
            .with_context(|| format!("failed to read color table {}", path.display()))?;
        reader = reader.with_color_table(table);
    }

    let document = reader
        .read()
        .with_context(|| format!("failed to decode {}", cli.input.display()))?;

    for notification in &document.notifications {
        writeln!(err, "{notification}")?;
    }

    let name = cli
        .input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mut writer = GeoJsonWriter::new(&document).name(name);
    if let Some(crs) = &cli.crs {
        writer = writer.crs(crs.clone());
    }

    writer.write_to(&mut *out)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    let result = run(
        &cli,
        &mut BufWriter::new(io::stdout().lock()),
        &mut io::stderr().lock(),
    );
    if let Err(e) = result {
        eprintln!("ERROR: {e:#}");
        std::process::exit(1);
    }
}
