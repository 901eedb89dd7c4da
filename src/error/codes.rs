/// Stable numeric codes attached to every [`super::DeskError`]
///
/// Each error category owns a range so a code alone tells you where to look:
/// - 1000-1999: configuration files and environment overrides
/// - 3000-3999: reading and writing ticket files
/// - 7000-7999: ticket data that breaks an invariant, unknown ticket ids
/// - 8000-8999: the HTTP API server
/// - 9000-9999: anything else
pub struct ErrorCode;

impl ErrorCode {
    pub const CONFIG_GENERIC: u16 = 1000;
    pub const CONFIG_NOT_FOUND: u16 = 1001;
    pub const CONFIG_INVALID_TOML: u16 = 1002;
    pub const CONFIG_INVALID_YAML: u16 = 1003;
    pub const CONFIG_INVALID_JSON: u16 = 1004;
    pub const CONFIG_INVALID_VALUE: u16 = 1010;
    pub const CONFIG_VALIDATION_FAILED: u16 = 1011;

    pub const STORAGE_GENERIC: u16 = 3000;
    pub const STORAGE_NOT_FOUND: u16 = 3001;
    pub const STORAGE_PERMISSION_DENIED: u16 = 3002;
    pub const STORAGE_ALREADY_EXISTS: u16 = 3003;
    pub const STORAGE_IO_ERROR: u16 = 3009;
    pub const STORAGE_UNSUPPORTED_FORMAT: u16 = 3020;
    pub const STORAGE_DESERIALIZATION_ERROR: u16 = 3021;
    pub const STORAGE_SERIALIZATION_ERROR: u16 = 3022;

    pub const VALIDATION_GENERIC: u16 = 7000;
    pub const VALIDATION_INVALID_DATA: u16 = 7001;
    pub const VALIDATION_CONSTRAINT_VIOLATION: u16 = 7002;
    pub const VALIDATION_DUPLICATE_VALUE: u16 = 7003;
    pub const VALIDATION_TICKET_NOT_FOUND: u16 = 7004;

    pub const SERVER_GENERIC: u16 = 8000;
    pub const SERVER_BIND_FAILED: u16 = 8001;
    pub const SERVER_SHUTDOWN: u16 = 8002;

    pub const OTHER_GENERIC: u16 = 9000;
}

/// One-line explanation of a code, for `--help`-style listings and logs
pub fn describe_error_code(code: u16) -> &'static str {
    match code {
        ErrorCode::CONFIG_GENERIC => "Configuration error",
        ErrorCode::CONFIG_NOT_FOUND => "Configuration file not found",
        ErrorCode::CONFIG_INVALID_TOML => "Configuration file is not valid TOML",
        ErrorCode::CONFIG_INVALID_YAML => "Malformed YAML",
        ErrorCode::CONFIG_INVALID_JSON => "Malformed JSON",
        ErrorCode::CONFIG_INVALID_VALUE => "Setting has the wrong type",
        ErrorCode::CONFIG_VALIDATION_FAILED => "One or more settings are out of range",

        ErrorCode::STORAGE_GENERIC => "Ticket file error",
        ErrorCode::STORAGE_NOT_FOUND => "Ticket file not found",
        ErrorCode::STORAGE_PERMISSION_DENIED => "Ticket file is not accessible",
        ErrorCode::STORAGE_ALREADY_EXISTS => "Ticket file already exists",
        ErrorCode::STORAGE_IO_ERROR => "Ticket file I/O failed",
        ErrorCode::STORAGE_UNSUPPORTED_FORMAT => "Ticket file extension is not .json, .yaml or .yml",
        ErrorCode::STORAGE_DESERIALIZATION_ERROR => "Ticket file could not be parsed",
        ErrorCode::STORAGE_SERIALIZATION_ERROR => "Tickets could not be serialized",

        ErrorCode::VALIDATION_GENERIC => "Invalid ticket data",
        ErrorCode::VALIDATION_INVALID_DATA => "Unreadable data",
        ErrorCode::VALIDATION_CONSTRAINT_VIOLATION => "Ticket status contradicts its resolution fields",
        ErrorCode::VALIDATION_DUPLICATE_VALUE => "Duplicate ticket id",
        ErrorCode::VALIDATION_TICKET_NOT_FOUND => "No ticket with that id",

        ErrorCode::SERVER_GENERIC => "API server error",
        ErrorCode::SERVER_BIND_FAILED => "Could not listen on the configured address",
        ErrorCode::SERVER_SHUTDOWN => "API server stopped unexpectedly",

        ErrorCode::OTHER_GENERIC => "Unexpected error",
        _ => "Unknown error code",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_stay_in_their_ranges() {
        for code in [ErrorCode::CONFIG_GENERIC, ErrorCode::CONFIG_VALIDATION_FAILED] {
            assert_eq!(code / 1000, 1);
        }
        for code in [ErrorCode::STORAGE_GENERIC, ErrorCode::STORAGE_SERIALIZATION_ERROR] {
            assert_eq!(code / 1000, 3);
        }
        for code in [ErrorCode::VALIDATION_GENERIC, ErrorCode::VALIDATION_TICKET_NOT_FOUND] {
            assert_eq!(code / 1000, 7);
        }
        assert_eq!(ErrorCode::SERVER_SHUTDOWN / 1000, 8);
        assert_eq!(ErrorCode::OTHER_GENERIC / 1000, 9);
    }

    #[test]
    fn test_descriptions() {
        assert_eq!(
            describe_error_code(ErrorCode::VALIDATION_DUPLICATE_VALUE),
            "Duplicate ticket id"
        );
        assert_eq!(
            describe_error_code(ErrorCode::STORAGE_NOT_FOUND),
            "Ticket file not found"
        );
        assert_eq!(describe_error_code(4242), "Unknown error code");
    }
}
