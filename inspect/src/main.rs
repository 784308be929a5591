use bytes::Bytes;
use clap::{Arg, Command};
use thermal_metadata::{is_thermal_metadata, ThermalMetadata};
use tracing::{error, info, Level};

fn main() {
    // Create logger
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    // Parse arguments
    let matches = Command::new("thermal-inspect")
        .about("decode a thermal metadata block and print it as JSON")
        .arg(
            Arg::new("file")
                .required(true)
                .help("path to a file holding one raw metadata block"),
        )
        .get_matches();

    // Load the block
    let path = matches.get_one::<String>("file").unwrap();
    let raw = std::fs::read(path).expect("could not read input file");
    if !is_thermal_metadata(&raw) {
        error!(path = %path, "not a thermal metadata block");
        std::process::exit(1);
    }

    // Decode and project
    let meta = match ThermalMetadata::decode(Bytes::from(raw)) {
        Ok(meta) => meta,
        Err(err) => {
            error!(?err, path = %path, "could not decode metadata block");
            std::process::exit(1);
        }
    };
    info!(
        version = %meta.version,
        cam_angles = meta.cam_angles.len(),
        jpeg_data_size = meta.jpeg_data.len(),
        "decoded metadata block"
    );
    println!(
        "{}",
        serde_json::to_string_pretty(&meta.to_json()).expect("could not render JSON")
    );
}
