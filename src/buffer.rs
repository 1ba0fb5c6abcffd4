// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Spill-to-disk staging buffer for serialized exports.
//!
//! Holds bytes in memory up to a configured ceiling and transparently
//! continues in an unlinked temporary file beyond it. Callers see one
//! contiguous byte sequence regardless of which storage backs it. All
//! storage (memory and spill file) is reclaimed when the buffer drops.

use std::fs::File;
use std::io::{self, Cursor, Read, Seek, SeekFrom, Write};

/// Default in-memory ceiling: 1 GiB per request.
pub const DEFAULT_MEMORY_CEILING: usize = 1024 * 1024 * 1024;

enum Storage {
    Memory(Cursor<Vec<u8>>),
    Spilled(File),
}

/// Staging area for serialized CSV, bounded in memory.
pub struct ExportBuffer {
    ceiling: usize,
    len: u64,
    storage: Storage,
}

impl ExportBuffer {
    /// Create a buffer with the default 1 GiB memory ceiling.
    pub fn new() -> Self {
        Self::with_ceiling(DEFAULT_MEMORY_CEILING)
    }

    /// Create a buffer that spills to disk past `ceiling` bytes.
    pub fn with_ceiling(ceiling: usize) -> Self {
        Self {
            ceiling,
            len: 0,
            storage: Storage::Memory(Cursor::new(Vec::new())),
        }
    }

    /// Total bytes written so far.
    pub fn len(&self) -> u64 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether the buffer has overflowed to disk.
    pub fn is_spilled(&self) -> bool {
        matches!(self.storage, Storage::Spilled(_))
    }

    /// Seek back to the start for reading the written bytes back.
    pub fn rewind(&mut self) -> io::Result<()> {
        match &mut self.storage {
            Storage::Memory(cursor) => {
                cursor.set_position(0);
                Ok(())
            }
            Storage::Spilled(file) => file.seek(SeekFrom::Start(0)).map(|_| ()),
        }
    }

    /// Move the in-memory contents into an unlinked temporary file.
    fn spill(&mut self) -> io::Result<()> {
        let Storage::Memory(cursor) = &mut self.storage else {
            return Ok(());
        };

        // tempfile() unlinks the file on creation, so the spill storage
        // is reclaimed by the OS even if the process dies mid-request.
        let mut file = tempfile::tempfile()?;
        file.write_all(cursor.get_ref())?;
        self.storage = Storage::Spilled(file);
        Ok(())
    }
}

impl Default for ExportBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Write for ExportBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if let Storage::Memory(cursor) = &self.storage {
            if cursor.get_ref().len() + buf.len() > self.ceiling {
                self.spill()?;
            }
        }

        let written = match &mut self.storage {
            Storage::Memory(cursor) => cursor.write(buf)?,
            Storage::Spilled(file) => file.write(buf)?,
        };
        self.len += written as u64;
        Ok(written)
    }

    fn flush(&mut self) -> io::Result<()> {
        match &mut self.storage {
            Storage::Memory(_) => Ok(()),
            Storage::Spilled(file) => file.flush(),
        }
    }
}

impl Read for ExportBuffer {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match &mut self.storage {
            Storage::Memory(cursor) => cursor.read(buf),
            Storage::Spilled(file) => file.read(buf),
        }
    }
}
