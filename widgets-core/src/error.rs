use thiserror::Error;

/// Failure to obtain the user's position for a "use my location" lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GeolocationError {
    #[error("location sharing is disabled")]
    Denied,
    #[error("location is not available")]
    Unavailable,
}

#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("location not found")]
    LocationNotFound,

    #[error("upstream rejected the API key")]
    Unauthorized,

    #[error("upstream request failed with status {status}: {message}")]
    Upstream { status: u16, message: String },

    #[error("upstream did not respond in time")]
    Timeout,

    #[error("failed to reach upstream: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("malformed upstream response: {0}")]
    Malformed(String),

    #[error(transparent)]
    Geolocation(#[from] GeolocationError),
}

impl From<reqwest::Error> for WeatherError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            WeatherError::Timeout
        } else if err.is_decode() {
            WeatherError::Malformed(err.to_string())
        } else {
            WeatherError::Transport(err)
        }
    }
}

impl WeatherError {
    /// Single-line message shown inline by the panel.
    pub fn user_message(&self) -> &'static str {
        match self {
            WeatherError::LocationNotFound => "도시를 찾을 수 없습니다. 다시 입력해주세요.",
            WeatherError::Unauthorized => "API 키가 올바르지 않습니다. 설정을 확인해주세요.",
            WeatherError::Upstream { .. } | WeatherError::Malformed(_) => {
                "날씨 서비스에서 오류가 발생했습니다. 잠시 후 다시 시도해주세요."
            }
            WeatherError::Timeout | WeatherError::Transport(_) => {
                "날씨 서비스에 연결할 수 없습니다. 네트워크를 확인해주세요."
            }
            WeatherError::Geolocation(GeolocationError::Denied) => "위치 권한이 거부되었습니다.",
            WeatherError::Geolocation(GeolocationError::Unavailable) => {
                "현재 위치를 확인할 수 없습니다."
            }
        }
    }
}
