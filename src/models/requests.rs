use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CityQuery {
    pub city: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CoordinatesQuery {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DealerCoordinatesQuery {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub radius: Option<f64>, // km
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LatestRatesQuery {
    pub base: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConvertQuery {
    pub from: Option<String>,
    pub to: Option<String>,
    pub amount: Option<f64>,
}

/// Success envelope shared by every data endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data,
            count: None,
        }
    }
}

impl<T> ApiResponse<Vec<T>> {
    pub fn counted(data: Vec<T>) -> Self {
        let count = data.len();
        Self {
            success: true,
            data,
            count: Some(count),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    // Absent on validation failures, false on upstream failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    pub error: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn invalid(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: None,
            error: error.into(),
            message: message.into(),
        }
    }

    pub fn upstream(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: Some(false),
            error: error.into(),
            message: message.into(),
        }
    }
}
