/// Application name
pub const APP_NAME: &str = "PreSchool Chat";

/// Default HTTP port of the reply server
pub const DEFAULT_HTTP_PORT: u16 = 5000;

/// Route of the reply endpoint
pub const CHAT_PATH: &str = "/chat";

/// Mount point for lesson videos
pub const VIDEOS_MOUNT: &str = "/videos";

/// Mount point for PDF and Word documents
pub const FILES_MOUNT: &str = "/files";

/// Address under which an Android emulator reaches the host's loopback
pub const EMULATOR_HOST_ALIAS: &str = "10.0.2.2";

/// Loopback hostname rewritten for emulator playback
pub const LOOPBACK_HOSTNAME: &str = "localhost";

/// Default base URL clients use to reach the server from an emulator
pub const DEFAULT_SERVER_URL: &str = "http://10.0.2.2:5000";

/// Bot message shown when the reply round trip fails
pub const CONNECT_ERROR_TEXT: &str = "Error: Could not connect to server.";
