// Chat defaults
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5000/chat";
pub const WELCOME_MESSAGE: &str =
    "Hello! I am Travel Bloggers Low budget WeatherBot. How can I assist you today?";
pub const FAILURE_MESSAGE: &str = "Message failed to send. Please try again.";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_LOG_LEVEL: &str = "info";

// Environment overrides
pub const ENDPOINT_ENV: &str = "CHATLINE_ENDPOINT";
pub const LOG_LEVEL_ENV: &str = "CHATLINE_LOG_LEVEL";

// UI
pub const APP_NAME: &str = "chatline";
pub const TICK_RATE_MS: u64 = 50;
pub const SCROLL_STEP: u16 = 3;
pub const USER_LABEL: &str = "You";
pub const BOT_LABEL: &str = "WeatherBot";
