//! API request types
//!
//! Every request is `{"function": "<Name>", "args": ["..", ..]}`. Arguments
//! are always strings; integer arguments are parsed here.

use std::fmt;

use serde::Deserialize;

use super::errors::{ApiError, ApiResult};

/// Invocable functions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Function {
    CreateUser,
    ReadUser,
    GetUserByEmail,
    GetAllUsers,
    UpdateUserLastLogin,
    CreateAlert,
    GetAllAlerts,
    CreateAsset,
}

impl Function {
    pub const ALL: [Function; 8] = [
        Function::CreateUser,
        Function::ReadUser,
        Function::GetUserByEmail,
        Function::GetAllUsers,
        Function::UpdateUserLastLogin,
        Function::CreateAlert,
        Function::GetAllAlerts,
        Function::CreateAsset,
    ];

    /// Wire name
    pub fn name(&self) -> &'static str {
        match self {
            Function::CreateUser => "CreateUser",
            Function::ReadUser => "ReadUser",
            Function::GetUserByEmail => "GetUserByEmail",
            Function::GetAllUsers => "GetAllUsers",
            Function::UpdateUserLastLogin => "UpdateUserLastLogin",
            Function::CreateAlert => "CreateAlert",
            Function::GetAllAlerts => "GetAllAlerts",
            Function::CreateAsset => "CreateAsset",
        }
    }

    /// Number of arguments expected
    pub fn arity(&self) -> usize {
        match self {
            Function::CreateUser => 7,
            Function::CreateAlert => 7,
            Function::CreateAsset => 5,
            Function::ReadUser | Function::GetUserByEmail | Function::UpdateUserLastLogin => 1,
            Function::GetAllUsers | Function::GetAllAlerts => 0,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.name() == name)
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// CreateUser arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateUserRequest {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub role: String,
    pub status: String,
}

/// CreateAlert arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateAlertRequest {
    pub id: String,
    pub title: String,
    pub message: String,
    pub severity: String,
    pub method: String,
    pub created_by: String,
    pub recipients: i64,
}

/// CreateAsset arguments (accepted and ignored)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateAssetRequest {
    pub id: String,
    pub color: String,
    pub size: i64,
    pub owner: String,
    pub appraised_value: i64,
}

/// Parsed request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    CreateUser(CreateUserRequest),
    ReadUser { id: String },
    GetUserByEmail { email: String },
    GetAllUsers,
    UpdateUserLastLogin { id: String },
    CreateAlert(CreateAlertRequest),
    GetAllAlerts,
    CreateAsset(CreateAssetRequest),
}

/// Raw envelope for parsing
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawRequest {
    function: String,
    #[serde(default)]
    args: Vec<String>,
}

fn parse_int(function: Function, field: &str, value: &str) -> ApiResult<i64> {
    value.parse::<i64>().map_err(|_| {
        ApiError::invalid_request(format!(
            "{}: argument {} must be an integer, got '{}'",
            function, field, value
        ))
    })
}

impl Request {
    /// Parse a request from JSON string
    pub fn parse(json: &str) -> ApiResult<Self> {
        let raw: RawRequest = serde_json::from_str(json)
            .map_err(|e| ApiError::invalid_request(format!("Invalid JSON: {}", e)))?;

        let function = Function::from_name(&raw.function)
            .ok_or_else(|| ApiError::unknown_function(&raw.function))?;
        Self::from_args(function, raw.args)
    }

    /// Builds a request from positional string arguments
    pub fn from_args(function: Function, args: Vec<String>) -> ApiResult<Self> {
        if args.len() != function.arity() {
            return Err(ApiError::invalid_request(format!(
                "{} expects {} arguments, got {}",
                function,
                function.arity(),
                args.len()
            )));
        }

        let mut args = args.into_iter();
        // Arity checked above
        let mut next = || args.next().unwrap_or_default();

        let request = match function {
            Function::CreateUser => Request::CreateUser(CreateUserRequest {
                id: next(),
                name: next(),
                email: next(),
                phone: next(),
                password: next(),
                role: next(),
                status: next(),
            }),
            Function::ReadUser => Request::ReadUser { id: next() },
            Function::GetUserByEmail => Request::GetUserByEmail { email: next() },
            Function::GetAllUsers => Request::GetAllUsers,
            Function::UpdateUserLastLogin => Request::UpdateUserLastLogin { id: next() },
            Function::CreateAlert => {
                let (id, title, message) = (next(), next(), next());
                let (severity, method, created_by) = (next(), next(), next());
                let recipients = parse_int(function, "recipients", &next())?;
                Request::CreateAlert(CreateAlertRequest {
                    id,
                    title,
                    message,
                    severity,
                    method,
                    created_by,
                    recipients,
                })
            }
            Function::GetAllAlerts => Request::GetAllAlerts,
            Function::CreateAsset => {
                let (id, color) = (next(), next());
                let size = parse_int(function, "size", &next())?;
                let owner = next();
                let appraised_value = parse_int(function, "appraisedValue", &next())?;
                Request::CreateAsset(CreateAssetRequest {
                    id,
                    color,
                    size,
                    owner,
                    appraised_value,
                })
            }
        };
        Ok(request)
    }

    /// Function this request invokes
    pub fn function(&self) -> Function {
        match self {
            Request::CreateUser(_) => Function::CreateUser,
            Request::ReadUser { .. } => Function::ReadUser,
            Request::GetUserByEmail { .. } => Function::GetUserByEmail,
            Request::GetAllUsers => Function::GetAllUsers,
            Request::UpdateUserLastLogin { .. } => Function::UpdateUserLastLogin,
            Request::CreateAlert(_) => Function::CreateAlert,
            Request::GetAllAlerts => Function::GetAllAlerts,
            Request::CreateAsset(_) => Function::CreateAsset,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_create_user() {
        let json = r#"{
            "function": "CreateUser",
            "args": ["u1", "Ana", "Ana@X.io", "555", "pw", "admin", "active"]
        }"#;

        match Request::parse(json).unwrap() {
            Request::CreateUser(r) => {
                assert_eq!(r.id, "u1");
                // Case folding belongs to the contract
                assert_eq!(r.email, "Ana@X.io");
                assert_eq!(r.status, "active");
            }
            other => panic!("Expected CreateUser, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_create_alert_recipients() {
        let json = r#"{"function":"CreateAlert","args":["a1","t","m","high","sms","u1","-12"]}"#;
        match Request::parse(json).unwrap() {
            Request::CreateAlert(r) => assert_eq!(r.recipients, -12),
            other => panic!("Expected CreateAlert, got {:?}", other),
        }
    }

    #[test]
    fn test_non_integer_recipients_rejected() {
        let json = r#"{"function":"CreateAlert","args":["a1","t","m","high","sms","u1","lots"]}"#;
        let err = Request::parse(json).unwrap_err();
        assert_eq!(err.code(), "REC_INVALID_REQUEST");
        assert!(err.message().contains("recipients"));
    }

    #[test]
    fn test_args_default_to_empty() {
        let req = Request::parse(r#"{"function":"GetAllUsers"}"#).unwrap();
        assert_eq!(req, Request::GetAllUsers);
    }

    #[test]
    fn test_wrong_arity() {
        let err = Request::parse(r#"{"function":"ReadUser","args":[]}"#).unwrap_err();
        assert_eq!(err.code(), "REC_INVALID_REQUEST");
        assert!(err.message().contains("expects 1"));
    }

    #[test]
    fn test_parse_unknown_function() {
        let err = Request::parse(r#"{"function":"DeleteUser","args":["u1"]}"#).unwrap_err();
        assert_eq!(err.code(), "REC_UNKNOWN_FUNCTION");
    }

    #[test]
    fn test_non_string_args_rejected() {
        let err = Request::parse(r#"{"function":"ReadUser","args":[1]}"#).unwrap_err();
        assert!(err.message().contains("Invalid JSON"));
    }

    #[test]
    fn test_create_asset_parses_integers() {
        let json = r#"{"function":"CreateAsset","args":["asset1","blue","5","Tom","300"]}"#;
        match Request::parse(json).unwrap() {
            Request::CreateAsset(r) => {
                assert_eq!(r.size, 5);
                assert_eq!(r.appraised_value, 300);
            }
            other => panic!("Expected CreateAsset, got {:?}", other),
        }
    }

    #[test]
    fn test_function_names_round_trip() {
        for function in Function::ALL {
            assert_eq!(Function::from_name(function.name()), Some(function));
        }
    }
}
