//! Prefix admin commands
//!
//! Parsing is pure; [`CommandRunner::run`] applies the owner gate and
//! executes against the policy store and owner list. The gateway handler only
//! sends the returned [`CommandReply`].

use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info};
use translate_types::{EmojiLanguageMap, ScopeConfig};

use crate::owners::{AddOwnerOutcome, OwnerList};
use crate::policy_store::PolicyStore;

pub const NOT_ALLOWED: &str = "🚫 You are not allowed to use this command.";
pub const PONG: &str = "🏓 Pong! The bot is running.";

/// How long the help reply stays up.
pub const HELP_TTL: Duration = Duration::from_secs(30);

const SETCHANNEL_USAGE: &str = "Usage: `{p}setchannel <#channel|id> <active|inactive> <dm|public>`";
const SETCATEGORY_USAGE: &str = "Usage: `{p}setcategory <category id> <active|inactive> <dm|public>`";
const ADDOWNER_USAGE: &str = "Usage: `{p}addowner <@user|id>`";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Ping,
    Help,
    SetChannel { channel_id: u64, config: ScopeConfig },
    SetCategory { category_id: u64, config: ScopeConfig },
    AddOwner { user_id: u64 },
}

/// A known command with arguments that did not parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Usage(&'static str);

impl Usage {
    pub fn render(&self, prefix: &str) -> String {
        self.0.replace("{p}", prefix)
    }
}

/// What the handler should do in response to a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandReply {
    pub text: String,
    /// Delete the reply after this long.
    pub delete_after: Option<Duration>,
    /// React ✅ on the invoking message.
    pub acknowledge: bool,
}

impl CommandReply {
    fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            delete_after: None,
            acknowledge: false,
        }
    }
}

/// Parse `content` as a command. `None` for non-commands and unknown names.
pub fn parse(content: &str, prefix: &str) -> Option<Result<Command, Usage>> {
    let rest = content.trim().strip_prefix(prefix)?;
    let mut parts = rest.split_whitespace();
    let name = parts.next()?.to_ascii_lowercase();
    let args: Vec<&str> = parts.collect();

    let parsed = match name.as_str() {
        "ping" => Ok(Command::Ping),
        "help" => Ok(Command::Help),
        "setchannel" => parse_scope(&args)
            .map(|(channel_id, config)| Command::SetChannel { channel_id, config })
            .ok_or(Usage(SETCHANNEL_USAGE)),
        "setcategory" => parse_scope(&args)
            .map(|(category_id, config)| Command::SetCategory {
                category_id,
                config,
            })
            .ok_or(Usage(SETCATEGORY_USAGE)),
        "addowner" => match args.as_slice() {
            [user] => parse_mention(user, "@").map(|user_id| Command::AddOwner { user_id }),
            _ => None,
        }
        .ok_or(Usage(ADDOWNER_USAGE)),
        _ => return None,
    };
    Some(parsed)
}

fn parse_scope(args: &[&str]) -> Option<(u64, ScopeConfig)> {
    let [target, active, mode] = args else {
        return None;
    };
    let id = parse_mention(target, "#")?;
    let active = match active.to_ascii_lowercase().as_str() {
        "active" | "on" | "true" => true,
        "inactive" | "off" | "false" => false,
        _ => return None,
    };
    let deliver_via_dm = match mode.to_ascii_lowercase().as_str() {
        "dm" => true,
        "public" | "reply" => false,
        _ => return None,
    };
    Some((id, ScopeConfig::new(active, deliver_via_dm)))
}

/// Accept a raw id or a mention (`<#id>`, `<@id>`, `<@!id>`).
fn parse_mention(raw: &str, sigil: &str) -> Option<u64> {
    let inner = match raw.strip_prefix('<').and_then(|s| s.strip_suffix('>')) {
        Some(inner) => {
            let inner = inner.strip_prefix(sigil)?;
            inner.strip_prefix('!').unwrap_or(inner)
        }
        None => raw,
    };
    inner.parse().ok()
}

#[derive(Clone)]
pub struct CommandRunner {
    prefix: String,
    owners: OwnerList,
    policies: PolicyStore,
    emoji: Arc<EmojiLanguageMap>,
}

impl CommandRunner {
    pub fn new(
        prefix: impl Into<String>,
        owners: OwnerList,
        policies: PolicyStore,
        emoji: Arc<EmojiLanguageMap>,
    ) -> Self {
        Self {
            prefix: prefix.into(),
            owners,
            policies,
            emoji,
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Handle a guild message. `None` when it is not a known command.
    pub async fn run(&self, author_id: u64, content: &str) -> Option<CommandReply> {
        let parsed = parse(content, &self.prefix)?;

        if !self.owners.is_owner(author_id).await {
            info!(author_id, "Rejected command from non-owner");
            return Some(CommandReply::text(NOT_ALLOWED));
        }

        let reply = match parsed {
            Ok(command) => self.execute(author_id, command).await,
            Err(usage) => CommandReply::text(usage.render(&self.prefix)),
        };
        Some(reply)
    }

    async fn execute(&self, author_id: u64, command: Command) -> CommandReply {
        match command {
            Command::Ping => CommandReply::text(PONG),
            Command::Help => CommandReply {
                text: self.help_text(author_id),
                delete_after: Some(HELP_TTL),
                acknowledge: true,
            },
            Command::SetChannel { channel_id, config } => {
                match self.policies.set_channel_policy(channel_id, config).await {
                    Ok(()) => CommandReply::text(format!(
                        "<#{}> translation configured: Active={}, DM={}",
                        channel_id, config.active, config.deliver_via_dm
                    )),
                    Err(e) => {
                        error!("Failed to save channel policy: {:#}", e);
                        CommandReply::text("⚠️ Could not save the channel configuration.")
                    }
                }
            }
            Command::SetCategory {
                category_id,
                config,
            } => match self.policies.set_category_policy(category_id, config).await {
                Ok(()) => CommandReply::text(format!(
                    "Category {} translation configured: Active={}, DM={}",
                    category_id, config.active, config.deliver_via_dm
                )),
                Err(e) => {
                    error!("Failed to save category policy: {:#}", e);
                    CommandReply::text("⚠️ Could not save the category configuration.")
                }
            },
            Command::AddOwner { user_id } => match self.owners.add(user_id).await {
                Ok(AddOwnerOutcome::Added) => {
                    CommandReply::text(format!("✅ <@{}> added to the whitelist.", user_id))
                }
                Ok(AddOwnerOutcome::AlreadyPresent) => {
                    CommandReply::text(format!("<@{}> is already in the whitelist.", user_id))
                }
                Err(e) => {
                    error!("Failed to save whitelist: {:#}", e);
                    CommandReply::text("⚠️ Could not save the whitelist.")
                }
            },
        }
    }

    fn help_text(&self, author_id: u64) -> String {
        let p = &self.prefix;
        let mut text = format!(
            "<@{author_id}>\n**💡 Available commands:**\n\n\
             `{p}ping` → Check that the bot is running\n\
             `{p}setchannel #channel active|inactive dm|public` → Configure translation for a channel\n\
             `{p}setcategory <category id> active|inactive dm|public` → Configure translation for a category\n\
             `{p}addowner @user` → Add a user to the whitelist\n\
             `{p}help` → Show this message\n"
        );

        let languages = self.emoji.by_language();
        if !languages.is_empty() {
            text.push_str("\n**🌐 Languages:**\n");
            for (language, glyphs) in languages {
                text.push_str(&format!("{} → `{}`\n", glyphs.join(" "), language));
            }
        }
        text
    }
}
