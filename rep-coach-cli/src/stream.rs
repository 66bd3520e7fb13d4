//! JSON-lines input for `rep-coach analyze`
//!
//! Each line holds either a pose frame or an exercise selection record such
//! as `{"select": "Push-up"}` (or `{"select": 2}` for the keyboard shortcut).

use anyhow::{bail, Context, Result};
use rep_coach::{Exercise, PoseFrame};
use serde_json::Value;
use std::path::Path;
use tokio::fs::File;
use tokio::io::{self, AsyncBufRead, BufReader};

/// One parsed input line
#[derive(Debug, Clone)]
pub enum StreamRecord {
    Select(Exercise),
    Frame(PoseFrame),
}

impl StreamRecord {
    pub fn parse(line: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(line).context("Invalid JSON")?;

        match value.get("select") {
            Some(Value::String(name)) => Ok(Self::Select(name.parse()?)),
            Some(Value::Number(key)) => key
                .as_u64()
                .and_then(|key| u32::try_from(key).ok())
                .and_then(|key| char::from_digit(key, 10))
                .and_then(Exercise::from_key)
                .map(Self::Select)
                .with_context(|| format!("Unknown exercise key: {}", key)),
            Some(other) => bail!("Invalid exercise selection: {}", other),
            None => Ok(Self::Frame(PoseFrame::from_json(line)?)),
        }
    }
}

/// Open the pose stream; `-` reads standard input
pub async fn open(path: &Path) -> Result<Box<dyn AsyncBufRead + Unpin + Send>> {
    if path == Path::new("-") {
        return Ok(Box::new(BufReader::new(io::stdin())));
    }

    let file = File::open(path)
        .await
        .with_context(|| format!("Failed to open pose stream {}", path.display()))?;
    Ok(Box::new(BufReader::new(file)))
}
