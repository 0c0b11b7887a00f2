//! Unit tests for error handling

use super::*;
use std::io;

#[test]
fn test_json_error_conversion() {
    let json_error = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
    let err = LeagueError::from(json_error);

    match err {
        LeagueError::Json(_) => (),
        _ => panic!("Expected Json error variant"),
    }
}

#[test]
fn test_io_error_conversion() {
    let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
    let err = LeagueError::from(io_error);

    match err {
        LeagueError::Io(_) => (),
        _ => panic!("Expected Io error variant"),
    }
}

#[test]
fn test_invalid_header_error_conversion() {
    let header_error = reqwest::header::HeaderValue::from_str("invalid\nheader").unwrap_err();
    let err = LeagueError::from(header_error);

    match err {
        LeagueError::InvalidHeader(_) => (),
        _ => panic!("Expected InvalidHeader error variant"),
    }
}

#[test]
fn test_sqlite_error_conversion() {
    let conn = rusqlite::Connection::open_in_memory().unwrap();
    let sqlite_error = conn.execute("SELECT * FROM missing_table", []).unwrap_err();
    let err = LeagueError::from(sqlite_error);

    assert!(matches!(err, LeagueError::Sqlite(_)));
}

#[test]
fn test_invalid_id_conversion() {
    let parse_error = "abc".parse::<i64>().unwrap_err();
    let err = LeagueError::from(parse_error);

    assert!(matches!(err, LeagueError::InvalidId(_)));
    assert!(err.to_string().starts_with("Failed to parse id"));
}

#[test]
fn test_missing_backend_message_names_env_vars() {
    let err = LeagueError::MissingBackend {
        url_var: "VOLLEY_SUPABASE_URL".to_string(),
        key_var: "VOLLEY_SUPABASE_ANON_KEY".to_string(),
    };

    let message = err.to_string();
    assert!(message.contains("VOLLEY_SUPABASE_URL"));
    assert!(message.contains("VOLLEY_SUPABASE_ANON_KEY"));
}

#[test]
fn test_missing_count_names_table() {
    let err = LeagueError::MissingCount {
        table: "matches".to_string(),
    };
    assert_eq!(err.to_string(), "Backend did not report a row count for table matches");
}
