use std::path::PathBuf;

use exam_utils::bank::{cell_counts, parse_bank, validate_bank};
use records::Question;
use tracing::{debug, instrument, warn};

use crate::error::Error;

/// Reads the first readable bank file in `paths`, then parses and validates it.
#[instrument(skip_all, err(Debug))]
pub async fn load_bank(paths: &[PathBuf]) -> Result<Vec<Question>, Error> {
    let mut last_err = None;
    for path in paths {
        match tokio::fs::read_to_string(path).await {
            Ok(raw) => {
                let bank = parse_bank(&raw)?;
                validate_bank(&bank)?;
                debug!(
                    path = %path.display(),
                    questions = bank.len(),
                    cells = ?cell_counts(&bank),
                    "loaded question bank"
                );
                return Ok(bank);
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "unable to read question bank");
                last_err = Some(e);
            }
        }
    }

    Err(match last_err {
        Some(e) => Error::Io(e),
        None => Error::Server(
            axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            "no question bank path configured".to_string(),
        ),
    })
}
