// Copyright (C) 2026 The univmax Authors
//
// Permission is hereby granted, free of charge, to any
// person obtaining a copy of this software and associated
// documentation files (the "Software"), to deal in the
// Software without restriction, including without
// limitation the rights to use, copy, modify, merge,
// publish, distribute, sublicense, and/or sell copies of
// the Software, and to permit persons to whom the Software
// is furnished to do so, subject to the following
// conditions:
//
// The above copyright notice and this permission notice
// shall be included in all copies or substantial portions
// of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF
// ANY KIND, EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED
// TO THE WARRANTIES OF MERCHANTABILITY, FITNESS FOR A
// PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT
// SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY
// CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR
// IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER
// DEALINGS IN THE SOFTWARE.
use std::fmt;
use std::result;

use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub enum U4vError {
    LibBug(String),
    VolumeBackendApi(String),
    ResourceNotFound(String),
    InvalidInput(String),
    UnauthorizedRequest(String),
    MissingConfiguration(String),
    UnsupportedVersion(String),
    TimeOut(String),
    Ssl(String),
    Connection(String),
    Serialization(String),
}

impl ::std::error::Error for U4vError {
    fn description(&self) -> &str {
        match *self {
            U4vError::LibBug(_) => "Library bug",
            U4vError::VolumeBackendApi(_) => {
                "Bad or unexpected response from the storage volume \
                 backend API"
            }
            U4vError::ResourceNotFound(_) => {
                "The requested resource was not found"
            }
            U4vError::InvalidInput(_) => "Invalid input received",
            U4vError::UnauthorizedRequest(_) => {
                "Unauthorized request - please check credentials"
            }
            U4vError::MissingConfiguration(_) => {
                "Connection settings could not be loaded"
            }
            U4vError::UnsupportedVersion(_) => {
                "Unisphere version is not supported"
            }
            U4vError::TimeOut(_) => "Timeout",
            U4vError::Ssl(_) => "SSL error",
            U4vError::Connection(_) => "Connection error",
            U4vError::Serialization(_) => "Incorrect JSON serialization",
        }
    }
}

impl fmt::Display for U4vError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}",
            match *self {
                U4vError::LibBug(ref x)
                | U4vError::VolumeBackendApi(ref x)
                | U4vError::ResourceNotFound(ref x)
                | U4vError::InvalidInput(ref x)
                | U4vError::UnauthorizedRequest(ref x)
                | U4vError::MissingConfiguration(ref x)
                | U4vError::UnsupportedVersion(ref x)
                | U4vError::TimeOut(ref x)
                | U4vError::Ssl(ref x)
                | U4vError::Connection(ref x)
                | U4vError::Serialization(ref x) => x,
            }
        )
    }
}

pub type Result<T> = result::Result<T, U4vError>;

impl From<::serde_json::Error> for U4vError {
    fn from(e: ::serde_json::Error) -> Self {
        U4vError::Serialization(format!(
            "Failed to convert Unisphere JSON message: {}",
            e
        ))
    }
}

impl From<::regex::Error> for U4vError {
    fn from(e: ::regex::Error) -> Self {
        U4vError::LibBug(format!("Regex error: {}", e))
    }
}

impl From<::url::ParseError> for U4vError {
    fn from(e: ::url::ParseError) -> Self {
        U4vError::MissingConfiguration(format!(
            "Failed to parse Unisphere URL: {}",
            e
        ))
    }
}

impl From<::chrono::ParseError> for U4vError {
    fn from(e: ::chrono::ParseError) -> Self {
        U4vError::InvalidInput(format!("Failed to parse time string: {}", e))
    }
}

impl From<::reqwest::Error> for U4vError {
    fn from(e: ::reqwest::Error) -> Self {
        if e.is_timeout() {
            U4vError::TimeOut(format!("{}", e))
        } else if e.is_builder() {
            U4vError::MissingConfiguration(format!(
                "Failed to build HTTP client: {}",
                e
            ))
        } else {
            U4vError::Connection(format!("{}", e))
        }
    }
}

const STATUS_200: u16 = 200;
const STATUS_201: u16 = 201;
const STATUS_202: u16 = 202;
const STATUS_204: u16 = 204;
const STATUS_401: u16 = 401;
const STATUS_404: u16 = 404;

pub(crate) fn is_status_success(status_code: u16) -> bool {
    match status_code {
        STATUS_200 | STATUS_201 | STATUS_202 | STATUS_204 => true,
        _ => false,
    }
}

impl U4vError {
    /// Map a failed REST status code to the matching error.
    ///
    ///  * `operation` -- Human readable operation, e.g. `GET storagegroup`.
    ///  * `status_code` -- HTTP status code returned by Unisphere.
    ///  * `message` -- Parsed reply body, if any.
    pub fn from_status(
        operation: &str,
        status_code: u16,
        message: Option<&Value>,
    ) -> Self {
        let msg = match message {
            Some(v) => v.to_string(),
            None => "None".to_string(),
        };
        let exception_message = format!(
            "Error {}. The status code received is {} and the message \
             is {}.",
            operation, status_code, msg
        );
        match status_code {
            STATUS_404 => U4vError::ResourceNotFound(exception_message),
            STATUS_401 => U4vError::UnauthorizedRequest(
                "Unauthorized request - please check credentials".to_string(),
            ),
            _ => U4vError::VolumeBackendApi(exception_message),
        }
    }
}

pub(crate) trait OkOrLibBug<T> {
    fn ok_or_lib_bug(self, val: &Value) -> Result<T>;
}

impl<T> OkOrLibBug<T> for Option<T> {
    fn ok_or_lib_bug(self, val: &Value) -> Result<T> {
        match self {
            Some(i) => Ok(i),
            None => Err(U4vError::LibBug(format!(
                "Unisphere returned unexpected data: {}",
                val
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_404_is_not_found() {
        let e = U4vError::from_status("GET volume", 404, None);
        match e {
            U4vError::ResourceNotFound(m) => assert_eq!(
                m,
                "Error GET volume. The status code received is 404 and \
                 the message is None."
            ),
            _ => panic!("unexpected error {:?}", e),
        }
    }

    #[test]
    fn status_401_is_unauthorized() {
        let e = U4vError::from_status("GET volume", 401, None);
        assert!(matches!(e, U4vError::UnauthorizedRequest(_)));
    }

    #[test]
    fn other_status_is_backend_error() {
        let msg = json!({"message": "boom"});
        let e = U4vError::from_status("PUT host resource", 500, Some(&msg));
        match e {
            U4vError::VolumeBackendApi(m) => {
                assert!(m.contains("500"));
                assert!(m.contains("boom"));
            }
            _ => panic!("unexpected error {:?}", e),
        }
    }

    #[test]
    fn success_codes() {
        for sc in &[200u16, 201, 202, 204] {
            assert!(is_status_success(*sc));
        }
        assert!(!is_status_success(400));
    }
}
