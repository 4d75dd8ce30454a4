use rouille::Response;

use crate::{domain::criteria::CriteriaError, render::SEARCH_FAILED, spotify::SearchError};

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    /// Every search failure looks the same to the user.
    SearchFailed,
}

impl From<CriteriaError> for ApiError {
    fn from(err: CriteriaError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl From<SearchError> for ApiError {
    fn from(_: SearchError) -> Self {
        ApiError::SearchFailed
    }
}

impl ApiError {
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::NotFound(_) => 404,
            ApiError::BadRequest(_) => 400,
            ApiError::SearchFailed => 502,
        }
    }

    pub fn into_response(self) -> Response {
        let status = self.status_code();
        match self {
            ApiError::NotFound(msg) | ApiError::BadRequest(msg) => {
                Response::text(msg).with_status_code(status)
            }

            ApiError::SearchFailed => Response::text(SEARCH_FAILED).with_status_code(status),
        }
    }
}
