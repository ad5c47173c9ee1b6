use std::{
    fs::{self, File, OpenOptions},
    io::{self, Read, Seek, SeekFrom, Write},
    path::Path,
};

/// Appends `bytes` to an existing file as a single write.
///
/// If the file does not end in a line break one is written first, so the new
/// content never joins the previous line. If the write fails the file is
/// truncated back to its original length.
///
/// The file must already exist.
pub(super) fn append(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut file = OpenOptions::new().read(true).append(true).open(path)?;
    let original_len = file.metadata()?.len();

    let mut buffer = Vec::with_capacity(bytes.len() + 1);
    if original_len > 0 && !ends_with_newline(&mut file, original_len)? {
        buffer.push(b'\n');
    }
    buffer.extend_from_slice(bytes);

    write_or_undo(&mut Synced(&file), &buffer, || file.set_len(original_len))
}

/// Creates a new file holding `bytes`, failing if it already exists.
///
/// Returns `false` without touching anything if the file is already there. A
/// file that cannot be fully written is removed again.
pub(super) fn create_new(path: &Path, bytes: &[u8]) -> io::Result<bool> {
    let file = match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(file) => file,
        Err(error) if error.kind() == io::ErrorKind::AlreadyExists => return Ok(false),
        Err(error) => return Err(error),
    };

    write_or_undo(&mut Synced(&file), bytes, || fs::remove_file(path))?;
    Ok(true)
}

/// Writes and flushes `bytes`, calling `undo` if either step fails.
///
/// The original write error is returned. A failing `undo` is only logged.
fn write_or_undo<W, U>(writer: &mut W, bytes: &[u8], undo: U) -> io::Result<()>
where
    W: Write,
    U: FnOnce() -> io::Result<()>,
{
    if let Err(error) = writer.write_all(bytes).and_then(|()| writer.flush()) {
        if let Err(undo_error) = undo() {
            tracing::debug!("Failed to undo partial write: {undo_error}");
        }
        return Err(error);
    }
    Ok(())
}

/// A file writer whose `flush` waits for the data to reach the disk.
struct Synced<'a>(&'a File);

impl Write for Synced<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut file = self.0;
        file.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.0.sync_data()
    }
}

fn ends_with_newline(file: &mut File, len: u64) -> io::Result<bool> {
    file.seek(SeekFrom::Start(len - 1))?;
    let mut last = [0_u8; 1];
    file.read_exact(&mut last)?;
    Ok(last[0] == b'\n')
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    /// Writes at most `budget` bytes to the file, then fails.
    struct FailsPartway<'a> {
        file: &'a File,
        budget: usize,
    }

    impl Write for FailsPartway<'_> {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.budget == 0 {
                return Err(io::Error::other("no space left on device"));
            }
            let mut file = self.file;
            let written = file.write(&buf[..buf.len().min(self.budget)])?;
            self.budget -= written;
            Ok(written)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn appends_to_end_of_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("log.txt");
        fs::write(&path, "Alice\n").unwrap();

        append(&path, b"Bob\n").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "Alice\nBob\n");
    }

    #[test]
    fn terminates_unterminated_last_line() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("log.txt");
        fs::write(&path, "Alice").unwrap();

        append(&path, b"Bob\n").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "Alice\nBob\n");
    }

    #[test]
    fn missing_file_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("absent.txt");

        let error = append(&path, b"Bob\n").unwrap_err();

        assert_eq!(error.kind(), io::ErrorKind::NotFound);
        assert!(!path.exists());
    }

    #[test]
    fn create_new_never_overwrites() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("log.txt");

        assert!(create_new(&path, b"first\n").unwrap());
        assert!(!create_new(&path, b"second\n").unwrap());

        assert_eq!(fs::read_to_string(&path).unwrap(), "first\n");
    }

    #[test]
    fn failed_append_is_truncated_away() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("donors.csv");
        let before = b"name,age,blood,location,contact\nAnn,30,B+,Here,5550001111\n";
        fs::write(&path, before).unwrap();
        let row = b"Ben,40,O-,Somewhere quite far away,5550002222\n";

        let file = OpenOptions::new().append(true).open(&path).unwrap();
        let original_len = file.metadata().unwrap().len();
        let mut writer = FailsPartway {
            file: &file,
            budget: row.len() / 2,
        };

        let result = write_or_undo(&mut writer, row, || file.set_len(original_len));

        assert!(result.is_err());
        assert_eq!(fs::read(&path).unwrap(), before);
    }

    #[test]
    fn failed_create_removes_the_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("requests.csv");
        let header = b"name,blood,location,urgency\n";

        let file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .unwrap();
        let mut writer = FailsPartway {
            file: &file,
            budget: header.len() / 2,
        };

        let result = write_or_undo(&mut writer, header, || fs::remove_file(&path));

        assert!(result.is_err());
        assert!(!path.exists());
    }

    #[test]
    fn successful_write_does_not_undo() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("log.txt");
        let file = File::create(&path).unwrap();

        write_or_undo(&mut Synced(&file), b"Alice\n", || {
            panic!("undo must not run after a successful write")
        })
        .unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "Alice\n");
    }
}
