use crate::domain::errors::StoreError;
use crate::ports::outbound::NumberStore;
use fs2::FileExt;
use parking_lot::Mutex;
use std::collections::BTreeSet;
use std::fs::{File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

/// Bytes per persisted number (little-endian `u64`).
const RECORD_LEN: usize = 8;

/// File-backed number store for production without RocksDB.
///
/// The file is an append-only sequence of fixed-size records. The whole set
/// is held in memory for lookups; every insert is appended and synced before
/// it becomes visible. An exclusive lock on the file is held until `close`,
/// so a second application server cannot write the same sequence.
pub struct FileNumberStore {
    path: PathBuf,
    state: Mutex<Option<OpenFile>>,
}

struct OpenFile<L = File> {
    file: L,
    numbers: BTreeSet<u64>,
}

/// Append-only record log backing an open store.
trait RecordLog {
    fn len(&self) -> io::Result<u64>;

    /// Append `bytes` and sync them to disk.
    fn append_synced(&mut self, bytes: &[u8]) -> io::Result<()>;

    fn truncate(&mut self, len: u64) -> io::Result<()>;
}

impl RecordLog for File {
    fn len(&self) -> io::Result<u64> {
        Ok(self.metadata()?.len())
    }

    fn append_synced(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.write_all(bytes)?;
        self.sync_data()
    }

    fn truncate(&mut self, len: u64) -> io::Result<()> {
        self.set_len(len)
    }
}

/// Append `number` to the open store in `state`.
///
/// A failed append is rolled back to the previous length. If the rollback
/// also fails the file may hold a partial record, so the handle is dropped
/// and every later call fails with `Closed`.
fn append_number<L: RecordLog>(
    state: &mut Option<OpenFile<L>>,
    path: &Path,
    number: u64,
) -> Result<(), StoreError> {
    let open = state.as_mut().ok_or(StoreError::Closed)?;
    if open.numbers.contains(&number) {
        return Err(StoreError::DuplicateKey { number });
    }

    let len = open.file.len()?;
    let Err(write_error) = open.file.append_synced(&number.to_le_bytes()) else {
        open.numbers.insert(number);
        return Ok(());
    };

    if let Err(rollback_error) = open.file.truncate(len) {
        error!(
            path = %path.display(),
            number,
            write_error = %write_error,
            rollback_error = %rollback_error,
            "Failed to roll back partial append, closing store"
        );
        *state = None;
    }
    Err(write_error.into())
}

impl FileNumberStore {
    /// Open (or create) the store at `path` and take the writer lock.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let mut file = OpenOptions::new()
            .read(true)
            .append(true)
            .create(true)
            .open(&path)?;

        file.try_lock_exclusive().map_err(|_| StoreError::Locked {
            path: path.display().to_string(),
        })?;

        let numbers = load_records(&mut file, &path)?;

        info!(
            path = %path.display(),
            count = numbers.len(),
            last = ?numbers.last(),
            "Opened number file"
        );

        Ok(Self {
            path,
            state: Mutex::new(Some(OpenFile { file, numbers })),
        })
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn with_open<T>(
        &self,
        f: impl FnOnce(&mut OpenFile) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let mut guard = self.state.lock();
        let open = guard.as_mut().ok_or(StoreError::Closed)?;
        f(open)
    }
}

/// Read every complete record. A torn trailing record (crash mid-append) is
/// cut off so later appends stay aligned.
fn load_records(file: &mut File, path: &Path) -> Result<BTreeSet<u64>, StoreError> {
    let mut bytes = Vec::new();
    file.seek(SeekFrom::Start(0))?;
    file.read_to_end(&mut bytes)?;

    let complete = bytes.len() - bytes.len() % RECORD_LEN;
    if complete != bytes.len() {
        warn!(
            path = %path.display(),
            discarded_bytes = bytes.len() - complete,
            "Discarding torn trailing record"
        );
        file.set_len(complete as u64)?;
    }

    let mut numbers = BTreeSet::new();
    for chunk in bytes[..complete].chunks_exact(RECORD_LEN) {
        let raw: [u8; RECORD_LEN] = chunk
            .try_into()
            .map_err(|_| StoreError::corrupted("short record"))?;
        let number = u64::from_le_bytes(raw);
        if !numbers.insert(number) {
            return Err(StoreError::corrupted(format!(
                "number {} recorded twice in {}",
                number,
                path.display()
            )));
        }
    }

    Ok(numbers)
}

impl NumberStore for FileNumberStore {
    fn ping(&self) -> Result<(), StoreError> {
        self.with_open(|open| {
            open.file.metadata()?;
            Ok(())
        })
    }

    fn contains(&self, number: u64) -> Result<bool, StoreError> {
        self.with_open(|open| Ok(open.numbers.contains(&number)))
    }

    fn last(&self) -> Result<Option<u64>, StoreError> {
        self.with_open(|open| Ok(open.numbers.last().copied()))
    }

    fn insert(&self, number: u64) -> Result<(), StoreError> {
        let mut guard = self.state.lock();
        append_number(&mut *guard, &self.path, number)
    }

    fn list(&self) -> Result<Vec<u64>, StoreError> {
        self.with_open(|open| Ok(open.numbers.iter().copied().collect()))
    }

    fn close(&self) -> Result<(), StoreError> {
        let Some(open) = self.state.lock().take() else {
            return Ok(());
        };

        open.file.sync_all()?;
        FileExt::unlock(&open.file)?;
        info!(path = %self.path.display(), "Closed number file");
        Ok(())
    }
}
