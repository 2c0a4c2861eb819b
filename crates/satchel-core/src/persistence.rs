//! Save/Load for whole character documents.
//!
//! Uses bincode for compact binary snapshots, e.g. for exporting a character
//! between worlds. Grid placement itself persists through the store port;
//! this is the offline counterpart.

use std::io::{Read, Write};

use serde::{Deserialize, Serialize};

use crate::document::Character;

/// Version number for the snapshot format (increment when the format changes)
const SAVE_VERSION: u32 = 1;

/// Serializable snapshot wrapper.
#[derive(Serialize, Deserialize)]
struct SaveData {
    version: u32,
    character: Character,
}

/// Save a character snapshot to a writer.
pub fn save_character<W: Write>(writer: W, character: &Character) -> Result<(), SaveError> {
    let save_data = SaveData {
        version: SAVE_VERSION,
        character: character.clone(),
    };
    bincode::serialize_into(writer, &save_data)?;
    Ok(())
}

/// Load a character snapshot from a reader.
pub fn load_character<R: Read>(reader: R) -> Result<Character, SaveError> {
    let save_data: SaveData = bincode::deserialize_from(reader)?;

    if save_data.version != SAVE_VERSION {
        return Err(SaveError::VersionMismatch {
            expected: SAVE_VERSION,
            found: save_data.version,
        });
    }

    Ok(save_data.character)
}

/// Errors that can occur during save/load
#[derive(Debug)]
pub enum SaveError {
    Io(std::io::Error),
    Bincode(Box<bincode::ErrorKind>),
    VersionMismatch { expected: u32, found: u32 },
}

impl From<std::io::Error> for SaveError {
    fn from(e: std::io::Error) -> Self {
        SaveError::Io(e)
    }
}

impl From<Box<bincode::ErrorKind>> for SaveError {
    fn from(e: Box<bincode::ErrorKind>) -> Self {
        SaveError::Bincode(e)
    }
}

impl std::fmt::Display for SaveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SaveError::Io(e) => write!(f, "IO error: {}", e),
            SaveError::Bincode(e) => write!(f, "Serialization error: {}", e),
            SaveError::VersionMismatch { expected, found } => {
                write!(
                    f,
                    "Snapshot version mismatch: expected {}, found {}",
                    expected, found
                )
            }
        }
    }
}

impl std::error::Error for SaveError {}
