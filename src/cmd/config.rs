use std::io::{self, BufRead, Write};

use clap::{Args, Subcommand};

use crate::config::{StoredConfig, config_file_path};
use crate::error::AppResult;

#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommand {
    /// Walk through every setting and save the answers.
    Init,
    /// Print the stored settings with the API token masked.
    Show,
}

pub fn run(command: ConfigCommand) -> AppResult<()> {
    let path = config_file_path()?;
    let mut cfg = StoredConfig::load_from(&path)?;

    match command {
        ConfigCommand::Init => {
            let stdin = io::stdin();
            run_wizard(&mut cfg, &mut stdin.lock(), &mut io::stdout())?;
            cfg.save_to(&path)?;
            println!("\nConfiguration saved to {}", path.display());
        }
        ConfigCommand::Show => {
            println!("Configuration file: {}", path.display());
            for setting in Setting::ALL {
                println!("{}: {}", setting.label(), setting.shown(&cfg));
            }
        }
    }
    Ok(())
}

/// One entry of the stored configuration as the wizard sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Setting {
    JiraUrl,
    JiraEmail,
    JiraToken,
    DefaultProject,
    DefaultIssueType,
    ServerCommand,
    ServerPath,
    RequestTimeout,
}

impl Setting {
    const ALL: [Setting; 8] = [
        Setting::JiraUrl,
        Setting::JiraEmail,
        Setting::JiraToken,
        Setting::DefaultProject,
        Setting::DefaultIssueType,
        Setting::ServerCommand,
        Setting::ServerPath,
        Setting::RequestTimeout,
    ];

    fn label(self) -> &'static str {
        match self {
            Setting::JiraUrl => "Jira base URL",
            Setting::JiraEmail => "Jira email",
            Setting::JiraToken => "Jira API token",
            Setting::DefaultProject => "Default project",
            Setting::DefaultIssueType => "Default issue type",
            Setting::ServerCommand => "Tool host command",
            Setting::ServerPath => "Tool host script",
            Setting::RequestTimeout => "Request timeout (seconds)",
        }
    }

    fn hint(self) -> Option<&'static str> {
        match self {
            Setting::JiraUrl => Some("e.g. https://company.atlassian.net"),
            Setting::ServerCommand => Some("e.g. python"),
            Setting::RequestTimeout => Some("empty for none"),
            _ => None,
        }
    }

    fn value(self, cfg: &StoredConfig) -> Option<String> {
        match self {
            Setting::JiraUrl => cfg.jira_base_url.clone(),
            Setting::JiraEmail => cfg.jira_email.clone(),
            Setting::JiraToken => cfg.jira_token.clone(),
            Setting::DefaultProject => cfg.default_project.clone(),
            Setting::DefaultIssueType => cfg.default_issue_type.clone(),
            Setting::ServerCommand => cfg.server_command.clone(),
            Setting::ServerPath => cfg.server_path.clone(),
            Setting::RequestTimeout => cfg.request_timeout_secs.map(|secs| secs.to_string()),
        }
    }

    /// Value as printed by `config show`.
    fn shown(self, cfg: &StoredConfig) -> String {
        match (self, self.value(cfg)) {
            (_, None) => "<not set>".to_string(),
            (_, Some(value)) if value.is_empty() => "<not set>".to_string(),
            (Setting::JiraToken, Some(token)) => mask_secret(&token),
            (Setting::RequestTimeout, Some(secs)) => format!("{secs}s"),
            (_, Some(value)) => value,
        }
    }

    /// Applies one wizard answer. Invalid answers leave `cfg` untouched.
    fn apply(self, cfg: &mut StoredConfig, answer: Answer) -> Result<(), String> {
        if self == Setting::RequestTimeout {
            cfg.request_timeout_secs = match answer {
                Answer::Keep => cfg.request_timeout_secs,
                Answer::Clear => None,
                Answer::Set(value) => Some(
                    value
                        .parse::<u64>()
                        .ok()
                        .filter(|secs| *secs > 0)
                        .ok_or_else(|| format!("'{value}' is not a positive number of seconds"))?,
                ),
            };
            return Ok(());
        }

        let Some(slot) = self.text_slot(cfg) else {
            return Ok(());
        };
        match answer {
            Answer::Keep => {}
            Answer::Clear => *slot = None,
            Answer::Set(value) if self == Setting::DefaultProject => {
                *slot = Some(value.to_uppercase())
            }
            Answer::Set(value) => *slot = Some(value),
        }
        Ok(())
    }

    fn text_slot(self, cfg: &mut StoredConfig) -> Option<&mut Option<String>> {
        Some(match self {
            Setting::JiraUrl => &mut cfg.jira_base_url,
            Setting::JiraEmail => &mut cfg.jira_email,
            Setting::JiraToken => &mut cfg.jira_token,
            Setting::DefaultProject => &mut cfg.default_project,
            Setting::DefaultIssueType => &mut cfg.default_issue_type,
            Setting::ServerCommand => &mut cfg.server_command,
            Setting::ServerPath => &mut cfg.server_path,
            Setting::RequestTimeout => return None,
        })
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Answer {
    Keep,
    Clear,
    Set(String),
}

impl Answer {
    fn parse(line: &str) -> Self {
        match line.trim() {
            "" => Answer::Keep,
            "-" => Answer::Clear,
            value => Answer::Set(value.to_string()),
        }
    }
}

/// Asks for every setting in turn. An answer the setting rejects is
/// reported and asked again; end of input keeps the remaining values.
fn run_wizard(
    cfg: &mut StoredConfig,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> AppResult<()> {
    writeln!(output, "Configuring jira-assistant.")?;
    writeln!(output, "Press Enter to keep the current value, '-' to clear it.")?;
    writeln!(
        output,
        "The API token is stored in plain text in the local config file."
    )?;

    for setting in Setting::ALL {
        loop {
            write!(output, "\n{}", setting.label())?;
            if let Some(hint) = setting.hint() {
                write!(output, " ({hint})")?;
            }
            match setting.value(cfg) {
                Some(_) if setting == Setting::JiraToken => write!(output, " [****]")?,
                Some(current) => write!(output, " [{current}]")?,
                None => {}
            }
            write!(output, ": ")?;
            output.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                return Ok(());
            }
            match setting.apply(cfg, Answer::parse(&line)) {
                Ok(()) => break,
                Err(reason) => writeln!(output, "{reason}; try again.")?,
            }
        }
    }
    Ok(())
}

fn mask_secret(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 6 {
        return "***".to_string();
    }
    let head: String = chars[..3].iter().collect();
    let tail: String = chars[chars.len() - 3..].iter().collect();
    format!("{head}***{tail}")
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn answer_all(cfg: &mut StoredConfig, answers: &str) -> String {
        let mut output = Vec::new();
        run_wizard(cfg, &mut Cursor::new(answers.as_bytes()), &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn wizard_fills_every_setting() {
        let mut cfg = StoredConfig::default();
        answer_all(
            &mut cfg,
            "https://acme.atlassian.net\nme@acme.io\nsecret-token\nkan\nBug\npython3\n/opt/jira/mcp_server.py\n20\n",
        );
        assert_eq!(cfg.jira_base_url.as_deref(), Some("https://acme.atlassian.net"));
        assert_eq!(cfg.jira_token.as_deref(), Some("secret-token"));
        assert_eq!(cfg.default_project.as_deref(), Some("KAN"));
        assert_eq!(cfg.default_issue_type.as_deref(), Some("Bug"));
        assert_eq!(cfg.server_path.as_deref(), Some("/opt/jira/mcp_server.py"));
        assert_eq!(cfg.request_timeout_secs, Some(20));
    }

    #[test]
    fn wizard_keeps_and_clears() {
        let mut cfg = StoredConfig {
            jira_email: Some("old@acme.io".to_string()),
            default_project: Some("OPS".to_string()),
            request_timeout_secs: Some(5),
            ..StoredConfig::default()
        };
        let output = answer_all(&mut cfg, "\n\n\n-\n\n\n\n-\n");
        assert_eq!(cfg.jira_email.as_deref(), Some("old@acme.io"));
        assert_eq!(cfg.default_project, None);
        assert_eq!(cfg.request_timeout_secs, None);
        assert!(output.contains("Jira email [old@acme.io]: "), "{output}");
    }

    #[test]
    fn wizard_asks_again_for_bad_timeout() {
        let mut cfg = StoredConfig {
            request_timeout_secs: Some(5),
            ..StoredConfig::default()
        };
        let output = answer_all(&mut cfg, "\n\n\n\n\n\n\nabc\n0\n30\n");
        assert_eq!(cfg.request_timeout_secs, Some(30));
        assert!(output.contains("'abc' is not a positive number of seconds; try again."));
        assert!(output.contains("'0' is not a positive number of seconds; try again."));
    }

    #[test]
    fn bad_timeout_at_end_of_input_keeps_stored_value() {
        let mut cfg = StoredConfig {
            request_timeout_secs: Some(5),
            ..StoredConfig::default()
        };
        answer_all(&mut cfg, "\n\n\n\n\n\n\nabc\n");
        assert_eq!(cfg.request_timeout_secs, Some(5));
    }

    #[test]
    fn token_is_never_echoed() {
        let mut cfg = StoredConfig {
            jira_token: Some("abcdefghij".to_string()),
            ..StoredConfig::default()
        };
        let output = answer_all(&mut cfg, "\n\n\n");
        assert!(output.contains("Jira API token [****]: "), "{output}");
        assert!(!output.contains("abcdefghij"));
        assert_eq!(Setting::JiraToken.shown(&cfg), "abc***hij");
    }

    #[test]
    fn shows_unset_and_masked_values() {
        let cfg = StoredConfig {
            jira_token: Some("short".to_string()),
            default_project: Some(String::new()),
            request_timeout_secs: Some(15),
            ..StoredConfig::default()
        };
        assert_eq!(Setting::JiraToken.shown(&cfg), "***");
        assert_eq!(Setting::DefaultProject.shown(&cfg), "<not set>");
        assert_eq!(Setting::JiraEmail.shown(&cfg), "<not set>");
        assert_eq!(Setting::RequestTimeout.shown(&cfg), "15s");
        assert_eq!(mask_secret("pässwörd!"), "päs***rd!");
    }
}
