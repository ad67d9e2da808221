#![forbid(unsafe_code)]

/// Startup settings. CLI flags win over environment variables.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct ServerConfig {
    pub(crate) log_filter: Option<String>,
    pub(crate) thought_logging: bool,
    pub(crate) show_help: bool,
    pub(crate) show_version: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            log_filter: None,
            thought_logging: true,
            show_help: false,
            show_version: false,
        }
    }
}

impl ServerConfig {
    pub(crate) fn from_env() -> Self {
        Self::parse(std::env::args().skip(1), |key| std::env::var(key).ok())
    }

    pub(crate) fn parse<I, F>(args: I, env: F) -> Self
    where
        I: IntoIterator<Item = String>,
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let mut quiet_flag = false;

        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "-h" | "--help" => config.show_help = true,
                "-V" | "--version" => config.show_version = true,
                "--quiet-thoughts" => quiet_flag = true,
                "--log-level" => {
                    if let Some(value) = args.next() {
                        config.log_filter = non_empty(value);
                    }
                }
                _ => {}
            }
        }

        if config.log_filter.is_none() {
            config.log_filter = env("ST_MCP_LOG").and_then(non_empty);
        }
        let quiet_env = env("DISABLE_THOUGHT_LOGGING").is_some_and(|v| parse_bool(&v));
        config.thought_logging = !(quiet_flag || quiet_env);
        config
    }
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.to_string())
}

fn parse_bool(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
