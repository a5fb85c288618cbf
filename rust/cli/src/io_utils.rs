//! File I/O helpers shared by the commands.
//!
//! - Reading player input line by line
//! - Reading and writing round logs, compressed with Zstandard when the path
//!   ends in `.zst`
//! - Ensuring parent directories exist before file writes
//!
//! Errors are returned as `String` messages for the command handlers to wrap.

use std::io::{BufRead, BufWriter, Write};

/// Reads a line of input from a buffered reader, blocking until available.
///
/// Used by `play` for table commands. Trims whitespace from the input and
/// returns `None` on EOF or read errors.
///
/// # Arguments
///
/// * `stdin` - Buffered reader to read from (typically stdin)
///
/// # Returns
///
/// * `Some(String)` - Trimmed input line (may be empty after trimming)
/// * `None` - EOF or read error occurred
///
/// # Example
///
/// ```rust
/// # use meltdown_cli::io_utils::read_stdin_line;
/// let mut input = std::io::Cursor::new("  hold 1 3\n");
/// assert_eq!(read_stdin_line(&mut input), Some("hold 1 3".to_string()));
/// assert_eq!(read_stdin_line(&mut input), None);
/// ```
pub fn read_stdin_line(stdin: &mut dyn BufRead) -> Option<String> {
    let mut line = String::new();
    match stdin.read_line(&mut line) {
        Ok(0) => None, // EOF
        Ok(_) => {
            let trimmed = line.trim();
            Some(trimmed.to_string())
        }
        Err(_) => None, // Read error
    }
}

/// Read text file with automatic .zst decompression detection.
///
/// This function reads a text file from the specified path. If the path ends
/// with ".zst", the file is automatically decompressed using Zstandard compression.
/// UTF-8 BOM (Byte Order Mark) is automatically stripped if present.
///
/// # Arguments
///
/// * `path` - File path to read (supports .zst compressed files)
///
/// # Returns
///
/// * `Ok(String)` - File contents as UTF-8 string
/// * `Err(String)` - I/O error, decompression error, or UTF-8 conversion error
///
/// # Example
///
/// ```rust,no_run
/// # use meltdown_cli::io_utils::read_text_auto;
///
/// // Read plain text file
/// let content = read_text_auto("rounds.jsonl").unwrap();
///
/// // Read compressed file (automatic decompression)
/// let compressed = read_text_auto("rounds.jsonl.zst").unwrap();
/// ```
pub fn read_text_auto(path: &str) -> Result<String, String> {
    let mut content = if path.ends_with(".zst") {
        // Read entire compressed file then decompress; more portable across platforms
        let comp = std::fs::read(path).map_err(|e| e.to_string())?;
        // Use a conservative initial capacity; zstd will grow as needed
        let dec = zstd::bulk::decompress(&comp, 8 * 1024 * 1024).map_err(|e| e.to_string())?;
        String::from_utf8(dec).map_err(|e| e.to_string())?
    } else {
        std::fs::read_to_string(path).map_err(|e| e.to_string())?
    };
    strip_utf8_bom(&mut content);
    Ok(content)
}

/// Ensure parent directory exists for given path, creating if needed.
///
/// This function checks if the parent directory of the given path exists,
/// and creates it (including any missing intermediate directories) if needed.
/// This is useful before writing files to ensure the destination directory exists.
///
/// # Arguments
///
/// * `path` - File path whose parent directory should exist
///
/// # Returns
///
/// * `Ok(())` - Parent directory exists or was created successfully
/// * `Err(String)` - Failed to create directory with error message
///
/// # Example
///
/// ```rust,no_run
/// use std::path::Path;
/// # use meltdown_cli::io_utils::ensure_parent_dir;
///
/// let path = Path::new("logs/today/rounds.jsonl");
/// ensure_parent_dir(path).unwrap();
/// // Now "logs/today/" directory exists
/// ```
pub fn ensure_parent_dir(path: &std::path::Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create directory {}: {}", parent.display(), e))?;
        }
    }
    Ok(())
}

/// Open `path` for writing, creating parent directories. Paths ending in
/// `.zst` get a Zstandard encoder that finishes the frame when dropped.
pub fn create_text_writer(path: &str) -> Result<Box<dyn Write>, String> {
    let p = std::path::Path::new(path);
    ensure_parent_dir(p)?;
    let file = std::fs::File::create(p).map_err(|e| format!("{}: {}", path, e))?;
    if path.ends_with(".zst") {
        let enc = zstd::stream::write::Encoder::new(file, 0).map_err(|e| e.to_string())?;
        Ok(Box::new(enc.auto_finish()))
    } else {
        Ok(Box::new(BufWriter::new(file)))
    }
}

/// Strip UTF-8 BOM (Byte Order Mark) from the beginning of a string if present.
///
/// UTF-8 BOM is the character U+FEFF at the start of a file. Some text editors
/// add this marker, but it can cause issues when parsing JSON or other formats.
///
/// # Arguments
///
/// * `s` - Mutable string reference to strip BOM from
fn strip_utf8_bom(s: &mut String) {
    const UTF8_BOM: &str = "\u{feff}";
    if s.starts_with(UTF8_BOM) {
        s.drain(..UTF8_BOM.len());
    }
}
