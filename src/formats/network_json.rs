//! Network JSON persistence
//!
//! Pretty-printed JSON using the field names declared on
//! [`Network`](crate::core::models::Network).

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use crate::core::error::{MapperError, Result, ResultExt};
use crate::core::models::Network;

/// Serialize a network to a pretty JSON string
pub fn network_to_json(network: &Network) -> Result<String> {
    Ok(serde_json::to_string_pretty(network)?)
}

pub fn write_network_to<W: Write>(network: &Network, writer: W) -> Result<()> {
    serde_json::to_writer_pretty(writer, network)?;
    Ok(())
}

/// Write a network to `path`, replacing any existing file
pub fn write_network(network: &Network, path: &Path) -> Result<()> {
    let file = File::create(path)
        .map_err(MapperError::from)
        .context(format!("creating {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    write_network_to(network, &mut writer)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

pub fn read_network_from<R: Read>(reader: R) -> Result<Network> {
    Ok(serde_json::from_reader(reader)?)
}

/// Load a previously written network
pub fn read_network(path: &Path) -> Result<Network> {
    if !path.exists() {
        return Err(MapperError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let file = File::open(path)?;
    read_network_from(BufReader::new(file)).context(format!("reading network {}", path.display()))
}
