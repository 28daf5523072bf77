use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("HTTP {status} returned by {url}")]
    HttpStatusError { url: String, status: u16 },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Failed to parse page {url}: {message}")]
    ParseError { url: String, message: String },

    #[error("No municipalities found on {url}")]
    NoMunicipalitiesError { url: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Configuration,
    Parsing,
    Output,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ScrapeError {
    pub fn parse(url: &str, message: impl Into<String>) -> Self {
        Self::ParseError {
            url: url.to_string(),
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::HttpError(_) | Self::HttpStatusError { .. } => ErrorCategory::Network,
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::UrlError(_) => ErrorCategory::Configuration,
            Self::ParseError { .. } | Self::NoMunicipalitiesError { .. } => ErrorCategory::Parsing,
            Self::CsvError(_) | Self::IoError(_) => ErrorCategory::Output,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Configuration | ErrorCategory::Parsing => ErrorSeverity::High,
            ErrorCategory::Output => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::HttpError(_) => "Check your network connection and that volby.cz is reachable",
            Self::HttpStatusError { .. } => {
                "Open the district URL in a browser and make sure the page still exists"
            }
            Self::UrlError(_) | Self::InvalidConfigValueError { .. } => {
                "Pass a district page URL such as https://www.volby.cz/pls/ps2017nss/ps32?xjazyk=CZ&xkraj=2&xnumnuts=2101 and an output file ending in .csv"
            }
            Self::ConfigError { .. } | Self::ConfigValidationError { .. } => {
                "Check the settings file and command-line flags"
            }
            Self::ParseError { .. } => {
                "Only the 2017 Chamber of Deputies results layout is supported; check the URL points to a district page"
            }
            Self::NoMunicipalitiesError { .. } => {
                "Use the district page listing municipalities (ps32), not the region overview"
            }
            Self::CsvError(_) | Self::IoError(_) => {
                "Check that the output directory exists and is writable"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::HttpError(e) if e.is_timeout() => "The results server did not answer in time".to_string(),
            Self::HttpError(_) => "Could not download a results page".to_string(),
            Self::HttpStatusError { url, status } => {
                format!("The results server answered {} for {}", status, url)
            }
            Self::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid {}: {}", field, reason)
            }
            Self::NoMunicipalitiesError { url } => {
                format!("No municipalities were found on {}", url)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ScrapeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_follows_category() {
        let status = ScrapeError::HttpStatusError {
            url: "https://www.volby.cz/pls/ps2017nss/ps32".to_string(),
            status: 404,
        };
        assert_eq!(status.category(), ErrorCategory::Network);
        assert_eq!(status.severity(), ErrorSeverity::Medium);

        let parse = ScrapeError::parse("https://example.com", "missing cell");
        assert_eq!(parse.category(), ErrorCategory::Parsing);
        assert_eq!(parse.severity(), ErrorSeverity::High);

        let io = ScrapeError::IoError(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));
        assert_eq!(io.severity(), ErrorSeverity::Critical);
    }

    #[test]
    fn test_user_friendly_message() {
        let err = ScrapeError::InvalidConfigValueError {
            field: "output_path".to_string(),
            value: "out.txt".to_string(),
            reason: "must end with .csv".to_string(),
        };
        assert_eq!(err.user_friendly_message(), "Invalid output_path: must end with .csv");

        let err = ScrapeError::NoMunicipalitiesError {
            url: "http://localhost/ps32".to_string(),
        };
        assert!(err.user_friendly_message().contains("http://localhost/ps32"));
    }
}
