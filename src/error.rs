#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    /// Missing FRED_API_KEY. Raised before any network activity.
    pub fn missing_credential() -> Self {
        Self::new(
            2,
            "No FRED API key is set. Add FRED_API_KEY to your environment or a .env file \
             (request a free key at https://fred.stlouisfed.org/docs/api/api_key.html).",
        )
    }

    /// A series fetch failed (network, timeout, non-2xx, malformed payload).
    /// Fatal for the current render pass; there is no partial-panel fallback.
    pub fn fetch_failed(message: impl Into<String>) -> Self {
        Self::new(4, message)
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
