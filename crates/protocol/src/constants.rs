//! Fixed values shared by both ends of the status channel.

/// Port the tray daemon listens on (loopback only).
pub const DEFAULT_PORT: u16 = 33333;

/// Path of the set-status endpoint.
pub const SET_ICON_PATH: &str = "/set-messenger-icon";

/// Path of the get-status endpoint.
pub const STATUS_PATH: &str = "/status";

/// Error text returned for a missing or unrecognised status token.
pub const INVALID_STATUS_ERROR: &str =
    "Invalid or missing status parameter. Use 'read' or 'unread'.";

/// Usage hint for the query-string convention.
pub const USAGE_GET: &str = "/set-messenger-icon?status=read|unread";

/// Usage hint for the JSON body convention.
pub const USAGE_POST: &str = "{ \"status\": \"read|unread\" }";
