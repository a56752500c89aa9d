use clap::{ArgAction, Parser, builder::BoolishValueParser};
use std::path::PathBuf;
use std::time::Duration;
use crate::rate_limit::RateLimitConfig;
use crate::sink::SmtpSettings;

// CLI argument structure, every option can also come from the environment (or .env)
#[derive(Parser, Debug, Clone)]
#[command(name = "lead-site")]
#[command(about = "Service pages and a rate limited lead capture form")]
pub struct Args {
    // Address to bind
    #[arg(long, env = "BIND_HOST", default_value = "0.0.0.0")]
    pub host: String,

    // Port to run the server on
    #[arg(short, long, env = "PORT", default_value_t = 5000)]
    pub port: u16,

    // CSV file accepted leads are appended to
    #[arg(long, env = "LEADS_FILE", default_value = "leads.csv")]
    pub leads_file: PathBuf,

    // Directory served under /static
    #[arg(long, env = "STATIC_DIR", default_value = "static")]
    pub static_dir: PathBuf,

    // Service catalog (TOML); the built-in one is used when unset
    #[arg(long, env = "CATALOG_FILE")]
    pub catalog: Option<PathBuf>,

    // Rate limit max submissions per window
    #[arg(long, env = "RATE_LIMIT", default_value_t = 5)]
    pub rate_limit: usize,

    // Rate limit window in seconds
    #[arg(long, env = "RATE_WINDOW", default_value_t = 900)]
    pub rate_window: u64,

    // Max clients the rate limiter remembers
    #[arg(long, env = "RATE_MAX_CLIENTS", default_value_t = 10_000)]
    pub rate_max_clients: usize,

    // Key the rate limiter on X-Forwarded-For (only safe behind a proxy that sets it)
    #[arg(long, env = "TRUST_FORWARDED_FOR", default_value_t = true, action = ArgAction::Set, value_parser = BoolishValueParser::new())]
    pub trust_forwarded_for: bool,

    // Email every accepted lead
    #[arg(long, env = "SEND_MAIL", default_value_t = true, action = ArgAction::Set, value_parser = BoolishValueParser::new())]
    pub send_mail: bool,

    #[arg(long, env = "SMTP_HOST", default_value = "smtp.gmail.com")]
    pub smtp_host: String,

    // 465 = implicit TLS, anything else = STARTTLS
    #[arg(long, env = "SMTP_PORT", default_value_t = 465)]
    pub smtp_port: u16,

    #[arg(long, env = "SMTP_USER")]
    pub smtp_user: Option<String>,

    #[arg(long, env = "SMTP_PASS", hide_env_values = true)]
    pub smtp_pass: Option<String>,

    // Where lead emails go
    #[arg(long, env = "TO_EMAIL")]
    pub to_email: Option<String>,

    // Display name of the sender
    #[arg(long, env = "FROM_NAME", default_value = "ליד חדש מהאתר")]
    pub from_name: String,

    // Subject line, {name} is replaced with the lead's name
    #[arg(long, env = "SUBJECT", default_value = "{name} — ליד חדש מהטופס באתר")]
    pub subject: String,

    // SMTP timeout in seconds
    #[arg(long, env = "SMTP_TIMEOUT", default_value_t = 10)]
    pub smtp_timeout: u64,

    // Phone number quoted to visitors when the email could not go out
    #[arg(long, env = "CONTACT_PHONE", default_value = "03-555-0100")]
    pub contact_phone: String,
}

// What the mail settings add up to
#[derive(Debug)]
pub enum MailSetup {
    Disabled,
    Incomplete { missing: Vec<&'static str> },
    Ready(SmtpSettings),
}

impl Args {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn rate_limit_config(&self) -> RateLimitConfig {
        RateLimitConfig {
            window: Duration::from_secs(self.rate_window),
            max_per_window: self.rate_limit,
            max_clients: self.rate_max_clients.max(1),
        }
    }

    pub fn mail_setup(&self) -> MailSetup {
        if !self.send_mail {
            return MailSetup::Disabled;
        }

        // blank values count as missing
        let present = |v: &Option<String>| v.as_deref().map(str::trim).filter(|s| !s.is_empty()).map(String::from);
        let user = present(&self.smtp_user);
        let password = present(&self.smtp_pass);
        let to = present(&self.to_email);

        match (user, password, to) {
            (Some(user), Some(password), Some(to)) => MailSetup::Ready(SmtpSettings {
                host: self.smtp_host.clone(),
                port: self.smtp_port,
                user,
                password,
                to,
                from_name: self.from_name.clone(),
                timeout: Duration::from_secs(self.smtp_timeout),
            }),
            (user, password, to) => {
                let mut missing = Vec::new();
                if user.is_none() {
                    missing.push("SMTP_USER");
                }
                if password.is_none() {
                    missing.push("SMTP_PASS");
                }
                if to.is_none() {
                    missing.push("TO_EMAIL");
                }
                MailSetup::Incomplete { missing }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(extra: &[&str]) -> Args {
        let mut argv = vec!["lead-site"];
        argv.extend_from_slice(extra);
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn defaults_match_the_form_policy() {
        let args = parse(&["--send-mail", "false"]);
        let limits = args.rate_limit_config();
        assert_eq!(limits.window, Duration::from_secs(900));
        assert_eq!(limits.max_per_window, 5);
        assert_eq!(args.smtp_port, 465);
        assert!(args.subject.contains("{name}"));
        assert!(matches!(args.mail_setup(), MailSetup::Disabled));
    }

    #[test]
    fn missing_credentials_are_listed() {
        let args = parse(&["--send-mail", "yes", "--smtp-user", "site@example.com", "--smtp-pass", " "]);
        match args.mail_setup() {
            MailSetup::Incomplete { missing } => assert_eq!(missing, ["SMTP_PASS", "TO_EMAIL"]),
            other => panic!("expected incomplete setup, got {other:?}"),
        }
    }

    #[test]
    fn complete_settings_are_ready() {
        let args = parse(&[
            "--send-mail", "true",
            "--smtp-port", "587",
            "--smtp-user", "site@example.com",
            "--smtp-pass", "secret",
            "--to-email", "office@example.com",
        ]);
        match args.mail_setup() {
            MailSetup::Ready(s) => {
                assert_eq!(s.port, 587);
                assert_eq!(s.to, "office@example.com");
            }
            other => panic!("expected ready setup, got {other:?}"),
        }
    }
}
