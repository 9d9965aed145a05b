//! Unit tests for error handling

use super::*;
use std::io;

#[cfg(test)]
mod cricket_error_tests {
    use super::*;

    #[tokio::test]
    async fn test_http_error_conversion() {
        // An unparseable URL fails inside reqwest before any network access
        let client = reqwest::Client::new();
        let reqwest_error = client.get("not a url").send().await.unwrap_err();

        match CricketError::from(reqwest_error) {
            CricketError::Http(_) => (),
            other => panic!("Expected Http error variant, got {:?}", other),
        }
    }

    #[test]
    fn test_json_error_conversion() {
        let json_error = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();

        match CricketError::from(json_error) {
            CricketError::Json(_) => (),
            other => panic!("Expected Json error variant, got {:?}", other),
        }
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");

        match CricketError::from(io_error) {
            CricketError::Io(_) => (),
            other => panic!("Expected Io error variant, got {:?}", other),
        }
    }

    #[test]
    fn test_database_error_conversion() {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        let db_error = conn.execute("SELECT * FROM missing", []).unwrap_err();

        match CricketError::from(db_error) {
            CricketError::Database(_) => (),
            other => panic!("Expected Database error variant, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_header_error_conversion() {
        let header_error = reqwest::header::HeaderValue::from_str("invalid\nheader").unwrap_err();

        match CricketError::from(header_error) {
            CricketError::InvalidHeader(_) => (),
            other => panic!("Expected InvalidHeader error variant, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_int_error_conversion() {
        let parse_error = "not_a_number".parse::<i64>().unwrap_err();

        match CricketError::from(parse_error) {
            CricketError::InvalidId(_) => (),
            other => panic!("Expected InvalidId error variant, got {:?}", other),
        }
    }

    #[test]
    fn test_api_error_display() {
        let error = CricketError::Api {
            status: 429,
            body: "Too many requests".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "API returned status 429: Too many requests"
        );
    }

    #[test]
    fn test_missing_api_key_error() {
        let error = CricketError::MissingApiKey {
            env_var: "CRICBUZZ_API_KEY".to_string(),
        };

        let error_string = error.to_string();
        assert!(error_string.contains("API key not provided"));
        assert!(error_string.contains("CRICBUZZ_API_KEY"));
    }

    #[test]
    fn test_scorecard_unavailable_names_last_url() {
        let error = CricketError::ScorecardUnavailable {
            url: "https://host/mcenter/v1/1/scard".to_string(),
            status: 404,
            body: "not found".to_string(),
        };
        let error_string = error.to_string();
        assert!(error_string.contains("/mcenter/v1/1/scard"));
        assert!(error_string.contains("404"));
    }

    #[test]
    fn test_invalid_input_helper() {
        match CricketError::invalid_input("name must not be blank") {
            CricketError::InvalidInput { message } => {
                assert_eq!(message, "name must not be blank")
            }
            other => panic!("Expected InvalidInput error variant, got {:?}", other),
        }
    }

    #[test]
    fn test_error_debug_format() {
        let error = CricketError::NoPlayers;
        assert_eq!(format!("{:?}", error), "NoPlayers");
        assert_eq!(error.to_string(), "No players found in API response");
    }
}
