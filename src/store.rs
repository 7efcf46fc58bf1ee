use std::fs;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use crate::corpus::Page;
use crate::db;
use crate::error::{StoreError, StoreResult};

/// Where the fetched corpus lives between runs.
pub trait CorpusStore {
    fn load(&self) -> StoreResult<Vec<Page>>;
    fn save(&self, pages: &[Page]) -> StoreResult<()>;
    fn path(&self) -> &Path;
}

/// Pick a store from the file extension: `.sqlite`/`.db` → SQLite, else JSON.
pub fn open_store(path: &Path) -> Box<dyn CorpusStore> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("sqlite") | Some("db") => Box::new(SqliteStore::new(path)),
        _ => Box::new(JsonStore::new(path)),
    }
}

/// Pretty JSON array of `{url, paragraphs}` records.
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonStore { path: path.into() }
    }

    fn io_err(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl CorpusStore for JsonStore {
    fn load(&self) -> StoreResult<Vec<Page>> {
        if !self.path.exists() {
            return Err(StoreError::Missing(self.path.clone()));
        }
        let file = fs::File::open(&self.path).map_err(|e| self.io_err(e))?;
        let pages: Vec<Page> = serde_json::from_reader(BufReader::new(file))?;
        info!("Loaded {} pages from {:?}", pages.len(), self.path);
        Ok(pages)
    }

    fn save(&self, pages: &[Page]) -> StoreResult<()> {
        let file = fs::File::create(&self.path).map_err(|e| self.io_err(e))?;
        let mut writer = BufWriter::new(file);
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut writer, formatter);
        pages.serialize(&mut ser)?;
        writer.flush().map_err(|e| self.io_err(e))?;
        info!("Saved {} pages to {:?}", pages.len(), self.path);
        Ok(())
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

pub struct SqliteStore {
    path: PathBuf,
}

impl SqliteStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        SqliteStore { path: path.into() }
    }
}

impl CorpusStore for SqliteStore {
    fn load(&self) -> StoreResult<Vec<Page>> {
        if !self.path.exists() {
            return Err(StoreError::Missing(self.path.clone()));
        }
        let conn = db::connect(&self.path)?;
        db::init_schema(&conn)?;
        let pages = db::fetch_corpus(&conn)?;
        info!("Loaded {} pages from {:?}", pages.len(), self.path);
        Ok(pages)
    }

    fn save(&self, pages: &[Page]) -> StoreResult<()> {
        let conn = db::connect(&self.path)?;
        db::init_schema(&conn)?;
        db::replace_corpus(&conn, pages)?;
        info!("Saved {} pages to {:?}", pages.len(), self.path);
        Ok(())
    }

    fn path(&self) -> &Path {
        &self.path
    }
}
