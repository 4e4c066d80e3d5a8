//! Line-oriented conversation log
//!
//! Each conversation gets its own append-only text file named after the
//! pair (`alice-bob.txt`). Each line is handed to one `write_all` on a file
//! opened in append mode. Lines that fit in a single write land whole; a
//! very large message may be split across writes and can interleave with a
//! concurrent writer for the same pair.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Local};
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;

use super::{Recorder, format_line};
use crate::pair::PairKey;
use crate::utils::ChatError;

#[derive(Debug, Clone)]
pub struct FileLog {
    dir: PathBuf,
}

impl FileLog {
    /// Use `dir` for conversation files, creating it if needed.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, ChatError> {
        let dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn path_for(&self, pair: &PairKey) -> PathBuf {
        self.dir.join(format!("{pair}.txt"))
    }
}

#[async_trait]
impl Recorder for FileLog {
    async fn record(
        &self,
        pair: &PairKey,
        at: DateTime<Local>,
        message: &str,
    ) -> Result<(), ChatError> {
        let mut line = format_line(&at, message);
        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.path_for(pair))
            .await?;
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }

    async fn history(&self, pair: &PairKey) -> Result<Vec<String>, ChatError> {
        match tokio::fs::read_to_string(self.path_for(pair)).await {
            Ok(contents) => Ok(contents.lines().map(str::to_string).collect()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }
}
