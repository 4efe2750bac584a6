pub mod logging;

use clap::{
    builder::styling::{AnsiColor, Effects, Styles},
    Arg, ColorChoice, Command,
};

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let command = Command::new("pordego")
        .about("Session-gated page server")
        .version(env!("CARGO_PKG_VERSION"))
        .color(ColorChoice::Auto)
        .styles(styles)
        .arg(
            Arg::new("port")
                .short('p')
                .long("port")
                .help("Port to listen on")
                .default_value("8080")
                .env("PORDEGO_PORT")
                .value_parser(clap::value_parser!(u16)),
        )
        .arg(
            Arg::new("session-ttl")
                .long("session-ttl")
                .help("Session time-to-live in seconds, 0 disables expiry")
                .default_value("43200")
                .env("PORDEGO_SESSION_TTL")
                .value_parser(clap::value_parser!(u64)),
        )
        .arg(
            Arg::new("users-file")
                .short('u')
                .long("users-file")
                .help("Path to a JSON object of username/password pairs")
                .env("PORDEGO_USERS_FILE"),
        )
        .arg(
            Arg::new("cookie-secure")
                .long("cookie-secure")
                .help("Mark the session cookie Secure (HTTPS-only)")
                .env("PORDEGO_COOKIE_SECURE")
                .action(clap::ArgAction::SetTrue),
        );

    logging::with_args(command)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let command = new();

        assert_eq!(command.get_name(), "pordego");
        assert_eq!(
            command.get_about().map(ToString::to_string),
            Some("Session-gated page server".to_string())
        );
        assert_eq!(
            command.get_version().map(ToString::to_string),
            Some(env!("CARGO_PKG_VERSION").to_string())
        );
    }

    #[test]
    fn test_defaults() {
        let command = new();
        let matches = command.get_matches_from(vec!["pordego"]);

        assert_eq!(matches.get_one::<u16>("port").copied(), Some(8080));
        assert_eq!(matches.get_one::<u64>("session-ttl").copied(), Some(43200));
        assert_eq!(matches.get_one::<String>("users-file"), None);
        assert!(!matches.get_flag("cookie-secure"));
    }

    #[test]
    fn test_check_args() {
        let command = new();
        let matches = command.get_matches_from(vec![
            "pordego",
            "--port",
            "8443",
            "--session-ttl",
            "600",
            "--users-file",
            "/etc/pordego/users.json",
            "--cookie-secure",
        ]);

        assert_eq!(matches.get_one::<u16>("port").copied(), Some(8443));
        assert_eq!(matches.get_one::<u64>("session-ttl").copied(), Some(600));
        assert_eq!(
            matches.get_one::<String>("users-file").cloned(),
            Some("/etc/pordego/users.json".to_string())
        );
        assert!(matches.get_flag("cookie-secure"));
    }

    #[test]
    fn test_check_env() {
        temp_env::with_vars(
            [
                ("PORDEGO_PORT", Some("443")),
                ("PORDEGO_SESSION_TTL", Some("120")),
                ("PORDEGO_USERS_FILE", Some("/tmp/users.json")),
                ("PORDEGO_LOG_LEVEL", Some("info")),
            ],
            || {
                let command = new();
                let matches = command.get_matches_from(vec!["pordego"]);

                assert_eq!(matches.get_one::<u16>("port").copied(), Some(443));
                assert_eq!(matches.get_one::<u64>("session-ttl").copied(), Some(120));
                assert_eq!(
                    matches.get_one::<String>("users-file").cloned(),
                    Some("/tmp/users.json".to_string())
                );
                assert_eq!(
                    matches.get_one::<u8>(logging::ARG_VERBOSITY).copied(),
                    Some(2)
                );
            },
        );
    }

    #[test]
    fn test_check_log_level_env() {
        // loop cover all possible value_parse
        let levels = vec!["error", "warn", "info", "debug", "trace"];
        for (index, &level) in levels.iter().enumerate() {
            temp_env::with_vars([("PORDEGO_LOG_LEVEL", Some(level))], || {
                let command = new();
                let matches = command.get_matches_from(vec!["pordego"]);
                assert_eq!(
                    matches.get_one::<u8>(logging::ARG_VERBOSITY).copied(),
                    Some(index as u8)
                );
            });
        }
    }

    #[test]
    fn test_check_log_level_verbosity() {
        // loop cover all possible value_parse
        let levels = vec!["error", "warn", "info", "debug", "trace"];
        for (index, _) in levels.iter().enumerate() {
            temp_env::with_vars([("PORDEGO_LOG_LEVEL", None::<String>)], || {
                let mut args = vec!["pordego".to_string()];

                // Add the appropriate number of "-v" flags based on the index
                if index > 0 {
                    let v = format!("-{}", "v".repeat(index));
                    args.push(v);
                }

                let command = new();
                let matches = command.get_matches_from(args);

                assert_eq!(
                    matches.get_one::<u8>(logging::ARG_VERBOSITY).copied(),
                    Some(index as u8)
                );
            });
        }
    }
}
