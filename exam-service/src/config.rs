use std::{env::var, path::PathBuf};

use axum::extract::FromRef;
use mongodb::Database;
use sentry::types::Dsn;
use tracing::{error, warn};

pub const DEFAULT_TRACKS: [&str; 6] = [
    "Python Programming",
    "Computer Fundamentals",
    "AI & Data Science",
    "Data Analysis",
    "Cybersecurity",
    "Robotics",
];

#[derive(Debug, Clone)]
pub struct AppState {
    pub db: Database,
    pub env_vars: EnvVars,
}

impl FromRef<AppState> for Database {
    fn from_ref(state: &AppState) -> Self {
        state.db.clone()
    }
}

impl FromRef<AppState> for EnvVars {
    fn from_ref(state: &AppState) -> Self {
        state.env_vars.clone()
    }
}

#[derive(Debug, Clone)]
pub struct EnvVars {
    pub port: u16,
    pub mongodb_uri: String,
    pub mongodb_db: Option<String>,
    /// Tried in order; the first readable file is the bank.
    pub question_bank_paths: Vec<PathBuf>,
    pub exam_question_count: usize,
    pub exam_tracks: Vec<String>,
    pub exam_difficulties: Vec<u32>,
    pub request_body_size_limit: usize,
    pub request_timeout_in_ms: u64,
    pub sentry_dsn: Option<String>,
}

impl EnvVars {
    pub fn new() -> Self {
        let Ok(mongodb_uri) = var("MONGODB_URI") else {
            error!("MONGODB_URI not set");
            panic!("MONGODB_URI required");
        };
        assert!(!mongodb_uri.is_empty(), "MONGODB_URI must not be empty");

        let mongodb_db = match var("MONGODB_DB") {
            Ok(s) if !s.is_empty() => Some(s),
            _ => {
                warn!("MONGODB_DB not set. Using the database named in MONGODB_URI");
                None
            }
        };

        let port = match var("PORT") {
            Ok(port_string) => port_string.parse().expect("PORT to be parseable as u16"),
            Err(_e) => {
                let default_port = 3000;
                warn!("PORT not set. Defaulting to {default_port}");
                default_port
            }
        };

        let question_bank_paths = match var("QUESTION_BANK_PATH") {
            Ok(s) if !s.is_empty() => vec![PathBuf::from(s)],
            _ => {
                let defaults = vec![PathBuf::from("test.json"), PathBuf::from("data/test.json")];
                warn!("QUESTION_BANK_PATH not set. Defaulting to {defaults:?}");
                defaults
            }
        };

        let exam_question_count = match var("EXAM_QUESTION_COUNT") {
            Ok(s) => s
                .parse()
                .expect("EXAM_QUESTION_COUNT to be valid unsigned integer"),
            Err(_e) => {
                let default_count = 25;
                warn!("EXAM_QUESTION_COUNT not set. Defaulting to {default_count}");
                default_count
            }
        };

        let exam_tracks = match var("EXAM_TRACKS") {
            Ok(s) => {
                let tracks = parse_list(&s);
                assert!(!tracks.is_empty(), "EXAM_TRACKS must name at least one track");
                tracks
            }
            Err(_e) => {
                warn!("EXAM_TRACKS not set. Defaulting to {DEFAULT_TRACKS:?}");
                DEFAULT_TRACKS.iter().map(|t| t.to_string()).collect()
            }
        };

        let exam_difficulties = match var("EXAM_DIFFICULTIES") {
            Ok(s) => {
                let difficulties = parse_difficulties(&s)
                    .expect("EXAM_DIFFICULTIES to be comma separated unsigned integers");
                assert!(
                    !difficulties.is_empty(),
                    "EXAM_DIFFICULTIES must name at least one level"
                );
                difficulties
            }
            Err(_e) => {
                let default_difficulties = vec![1, 2, 3];
                warn!("EXAM_DIFFICULTIES not set. Defaulting to {default_difficulties:?}");
                default_difficulties
            }
        };

        let request_timeout_in_ms = match var("REQUEST_TIMEOUT_IN_MS") {
            Ok(s) => s
                .parse()
                .expect("REQUEST_TIMEOUT_IN_MS to be valid unsigned integer"),
            Err(_e) => {
                let default_request_timeout = 30_000;
                warn!("REQUEST_TIMEOUT_IN_MS not set. Defaulting to {default_request_timeout}");
                default_request_timeout
            }
        };

        let request_body_size_limit = match var("REQUEST_BODY_SIZE_LIMIT") {
            Ok(s) => s
                .parse()
                .expect("REQUEST_BODY_SIZE_LIMIT to be valid unsigned integer"),
            Err(_e) => {
                let base: usize = 2;
                let exp = 20;
                let default_request_body_size_limit = 5 * base.pow(exp);
                warn!(
                    "REQUEST_BODY_SIZE_LIMIT not set. Defaulting to {default_request_body_size_limit}"
                );
                default_request_body_size_limit
            }
        };

        let sentry_dsn = match var("SENTRY_DSN") {
            Ok(dsn_string) => {
                assert!(
                    valid_sentry_dsn(&dsn_string),
                    "SENTRY_DSN is not valid DSN."
                );
                Some(dsn_string)
            }
            Err(_e) => {
                warn!("SENTRY_DSN not set.");
                None
            }
        };

        EnvVars {
            port,
            mongodb_uri,
            mongodb_db,
            question_bank_paths,
            exam_question_count,
            exam_tracks,
            exam_difficulties,
            request_body_size_limit,
            request_timeout_in_ms,
            sentry_dsn,
        }
    }
}

/// Splits a comma separated list, dropping blank entries.
pub fn parse_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(String::from)
        .collect()
}

pub fn parse_difficulties(s: &str) -> Result<Vec<u32>, std::num::ParseIntError> {
    parse_list(s).iter().map(|level| level.parse()).collect()
}

fn valid_sentry_dsn(url: &str) -> bool {
    url.parse::<Dsn>().is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_parsing_trims_and_drops_blanks() {
        assert_eq!(
            parse_list(" Robotics, AI & Data Science ,,Cybersecurity "),
            vec!["Robotics", "AI & Data Science", "Cybersecurity"]
        );
        assert!(parse_list(" , ").is_empty());
    }

    #[test]
    fn difficulty_parsing() {
        assert_eq!(parse_difficulties("1, 2,3").unwrap(), vec![1, 2, 3]);
        assert!(parse_difficulties("1,two").is_err());
        assert!(parse_difficulties("-1").is_err());
    }

    #[test]
    fn sentry_dsn_validation() {
        assert!(valid_sentry_dsn("https://public@sentry.example.com/1"));
        assert!(!valid_sentry_dsn("not a dsn"));
    }
}
