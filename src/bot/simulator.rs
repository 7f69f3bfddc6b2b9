use super::email::validate_email;
use super::pools::{EmailPool, Pools};
use crate::config::Config;
use serde::{Deserialize, Deserializer, Serialize};

const MAX_ERROR_LINES: usize = 10;

const GREEN: &str = "#00ff00";
const RED: &str = "#ff0000";
const ORANGE: &str = "#ff6600";
const AMBER: &str = "#ffa500";
const BLUE: &str = "#4169E1";

const UNAUTHORIZED: &str = "❌ You are not authorized.";

const COMMANDS: [&str; 9] = [
    "/help",
    "/add_email",
    "/bulk_emails_main",
    "/bulk_emails_pump20",
    "/bulk_emails_pump25",
    "/remove_bulk_emails",
    "/open",
    "/close",
    "/break",
];

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BotRequest {
    pub command: String,
    #[serde(default)]
    pub params: BotParams,
    #[serde(default)]
    pub pools: Option<Pools>,
    #[serde(default)]
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BotParams {
    pub email: Option<String>,
    pub pool: Option<String>,
    #[serde(default, deserialize_with = "loose_flag")]
    pub top: bool,
    pub file: Option<UploadedFile>,
}

/// A flag sent as a boolean, a number or a string.
#[derive(Deserialize)]
#[serde(untagged)]
enum LooseFlag {
    Bool(bool),
    Number(f64),
    Text(String),
}

fn loose_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let flag = Option::<LooseFlag>::deserialize(deserializer)?;
    Ok(match flag {
        None => false,
        Some(LooseFlag::Bool(set)) => set,
        Some(LooseFlag::Number(n)) => n != 0.0 && !n.is_nan(),
        Some(LooseFlag::Text(text)) => {
            let text = text.trim();
            !(text.is_empty() || text == "0" || text.eq_ignore_ascii_case("false"))
        }
    })
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UploadedFile {
    pub name: Option<String>,
    #[serde(default)]
    pub content: String,
}

impl UploadedFile {
    /// Non-blank lines, trimmed.
    fn lines(&self) -> Vec<&str> {
        self.content
            .split('\n')
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BotResponse {
    pub response: String,
    pub embed: Option<Embed>,
    pub updated_pools: Option<Pools>,
}

impl BotResponse {
    fn text(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            embed: None,
            updated_pools: None,
        }
    }

    fn with_embed(mut self, embed: Embed) -> Self {
        self.embed = Some(embed);
        self
    }

    fn with_pools(mut self, pools: Pools) -> Self {
        self.updated_pools = Some(pools);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Embed {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub color: String,
    pub fields: Vec<EmbedField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<String>,
}

impl Embed {
    fn new(title: impl Into<String>, color: &str) -> Self {
        Self {
            title: title.into(),
            description: None,
            color: color.to_string(),
            fields: Vec::new(),
            footer: None,
        }
    }

    fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    fn field(mut self, name: impl Into<String>, value: impl ToString, inline: bool) -> Self {
        self.fields.push(EmbedField {
            name: name.into(),
            value: value.to_string(),
            inline,
        });
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

/// Where a bulk removal looks for addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RemovalTarget {
    All,
    Pool(EmailPool),
}

/// Stateless handler for the mock chat-bot endpoint.
///
/// Every request carries the client's pools; handlers hand back a modified
/// copy in `updated_pools` and keep nothing between calls.
#[derive(Debug, Clone)]
pub struct BotSimulator {
    authorized_user_id: String,
    bulk_emails_max: usize,
    bulk_remove_max: usize,
}

impl Default for BotSimulator {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl BotSimulator {
    pub fn from_config(config: &Config) -> Self {
        Self {
            authorized_user_id: config.authorized_user_id.clone(),
            bulk_emails_max: config.bulk_emails_max,
            bulk_remove_max: config.bulk_remove_max,
        }
    }

    fn is_authorized(&self, user_id: Option<&str>) -> bool {
        user_id.is_none_or(|id| id == self.authorized_user_id)
    }

    pub fn handle(&self, request: BotRequest) -> BotResponse {
        let name = request
            .command
            .split_whitespace()
            .next()
            .unwrap_or_default()
            .to_lowercase();
        let pools = request.pools.unwrap_or_default();
        let params = request.params;
        let user_id = request.user_id.as_deref();

        tracing::debug!(command = %name, "bot command");

        match name.as_str() {
            "/help" => help(),
            "/open" | "/close" | "/break" => channel_status(&name),
            "/add_email"
            | "/bulk_emails_main"
            | "/bulk_emails_pump20"
            | "/bulk_emails_pump25"
            | "/remove_bulk_emails"
                if !self.is_authorized(user_id) =>
            {
                BotResponse::text(UNAUTHORIZED).with_pools(pools)
            }
            "/add_email" => add_email(&params, pools),
            "/bulk_emails_main" => self.bulk_emails(EmailPool::Main, &params, pools),
            "/bulk_emails_pump20" => self.bulk_emails(EmailPool::Pump20Off25, &params, pools),
            "/bulk_emails_pump25" => self.bulk_emails(EmailPool::Pump25Off, &params, pools),
            "/remove_bulk_emails" => self.remove_bulk_emails(&params, pools),
            _ => unknown(&name),
        }
    }

    fn limit_exceeded(count: usize, max: usize, pools: Pools) -> BotResponse {
        let message = format!("Operation exceeds limit: {count} items (max {max} per request)");
        BotResponse::text(format!("❌ {message}"))
            .with_embed(
                Embed::new("Bulk Operation Limit Exceeded", RED)
                    .description(message)
                    .field("Items in file", count, true)
                    .field("Max allowed", max, true),
            )
            .with_pools(pools)
    }

    fn bulk_emails(&self, target: EmailPool, params: &BotParams, mut pools: Pools) -> BotResponse {
        let Some(file) = &params.file else {
            return BotResponse::text(
                "❌ No file provided. Please upload a .txt file containing email addresses.",
            )
            .with_pools(pools);
        };
        let lines = file.lines();
        if lines.len() > self.bulk_emails_max {
            return Self::limit_exceeded(lines.len(), self.bulk_emails_max, pools);
        }

        let mut added = 0;
        let mut duplicates = 0;
        let mut invalid = Vec::new();
        let entries = pools.emails.get_mut(target);
        for (index, line) in lines.iter().enumerate() {
            match validate_email(line) {
                Err(e) => invalid.push(format!("Line {}: {e}", index + 1)),
                Ok(email) if entries.contains(&email) => duplicates += 1,
                Ok(email) => {
                    entries.push(email);
                    added += 1;
                }
            }
        }
        let pool_size = entries.len();

        let color = if added > 0 { GREEN } else { ORANGE };
        let title = format!("📧 Bulk Emails Import Results ({target} pool)");
        let mut embed = Embed::new(title, color)
            .field("Total Processed", lines.len(), true)
            .field("Successfully Added", added, true)
            .field("Duplicates Skipped", duplicates, true)
            .field("Invalid Lines", invalid.len(), true)
            .field(format!("Emails in {target} Pool"), pool_size, true);
        if let Some(details) = error_details(&invalid) {
            embed = embed.field("Error Details", details, false);
        }

        let response = if added > 0 {
            "✅ Successfully processed bulk emails import!"
        } else if !invalid.is_empty() {
            "⚠️ Bulk emails import completed with errors."
        } else {
            "❌ No valid emails found to import."
        };
        tracing::info!(
            pool = %target,
            added,
            duplicates,
            invalid = invalid.len(),
            "bulk email import"
        );
        BotResponse::text(response).with_embed(embed).with_pools(pools)
    }

    fn remove_bulk_emails(&self, params: &BotParams, mut pools: Pools) -> BotResponse {
        let Some(file) = &params.file else {
            return BotResponse::text(
                "❌ No file provided. Please upload a .txt file containing email addresses to remove.",
            )
            .with_pools(pools);
        };
        let target = match params.pool.as_deref().unwrap_or("all") {
            "all" => RemovalTarget::All,
            name => match name.parse() {
                Ok(pool) => RemovalTarget::Pool(pool),
                Err(()) => {
                    return BotResponse::text(
                        "❌ Invalid pool. Must be one of: all, main, pump_20off25, pump_25off",
                    )
                    .with_pools(pools);
                }
            },
        };
        let lines = file.lines();
        if lines.len() > self.bulk_remove_max {
            return Self::limit_exceeded(lines.len(), self.bulk_remove_max, pools);
        }

        let mut removed = 0;
        let mut not_found = 0;
        let mut invalid = Vec::new();
        for (index, line) in lines.iter().enumerate() {
            let email = match validate_email(line) {
                Ok(email) => email,
                Err(e) => {
                    invalid.push(format!("Line {}: {e}", index + 1));
                    continue;
                }
            };
            let found = match target {
                RemovalTarget::All => EmailPool::ALL
                    .into_iter()
                    .fold(false, |found, pool| pools.emails.remove(pool, &email) || found),
                RemovalTarget::Pool(pool) => pools.emails.remove(pool, &email),
            };
            if found {
                removed += 1;
            } else {
                not_found += 1;
            }
        }

        let label = match target {
            RemovalTarget::All => "all pools".to_string(),
            RemovalTarget::Pool(pool) => format!("{pool} pool"),
        };
        let color = if removed > 0 { GREEN } else { ORANGE };
        let mut embed = Embed::new(format!("📧 Bulk Emails Removal Results ({label})"), color)
            .field("Total Processed", lines.len(), true)
            .field("Successfully Removed", removed, true)
            .field("Not Found", not_found, true)
            .field("Invalid Lines", invalid.len(), true);
        embed = match target {
            RemovalTarget::All => EmailPool::ALL.into_iter().fold(embed, |embed, pool| {
                embed.field(format!("{pool} Pool"), pools.emails.get(pool).len(), true)
            }),
            RemovalTarget::Pool(pool) => embed.field(
                format!("{pool} Pool Remaining"),
                pools.emails.get(pool).len(),
                true,
            ),
        };
        if let Some(details) = error_details(&invalid) {
            embed = embed.field("Error Details", details, false);
        }

        let response = if removed > 0 {
            "✅ Successfully processed bulk emails removal!"
        } else if !invalid.is_empty() {
            "⚠️ Bulk emails removal completed with errors."
        } else {
            "❌ No valid emails found to remove."
        };
        tracing::info!(removed, not_found, invalid = invalid.len(), "bulk email removal");
        BotResponse::text(response).with_embed(embed).with_pools(pools)
    }
}

fn add_email(params: &BotParams, mut pools: Pools) -> BotResponse {
    let Some(email) = params.email.as_deref().filter(|email| !email.is_empty()) else {
        return BotResponse::text("❌ Please provide an email address.").with_pools(pools);
    };
    let name = params.pool.as_deref().unwrap_or("main");
    let Ok(pool) = name.parse::<EmailPool>() else {
        return BotResponse::text(
            "❌ Invalid pool type. Valid pools: main, pump_20off25, pump_25off",
        )
        .with_pools(pools);
    };

    let entries = pools.emails.get_mut(pool);
    if params.top {
        entries.insert(0, email.to_string());
    } else {
        entries.push(email.to_string());
    }
    BotResponse::text(format!("✅ Email `{email}` added to {pool} pool.")).with_pools(pools)
}

fn channel_status(name: &str) -> BotResponse {
    let (response, title, description, color) = match name {
        "/open" => (
            "✅ Channel opened 🟢🟢",
            "Channel is now OPEN!",
            "We are now accepting orders!",
            GREEN,
        ),
        "/close" => (
            "✅ Channel closed 🔴🔴",
            "Channel is now CLOSED!",
            "We are currently closed. Please come back later.",
            RED,
        ),
        _ => (
            "✅ Channel put on hold 🟡🟡",
            "Channel is on BREAK!",
            "We are temporarily on hold. Please wait for us to reopen.",
            AMBER,
        ),
    };
    BotResponse::text(response).with_embed(Embed::new(title, color).description(description))
}

fn help() -> BotResponse {
    let embed = Embed::new("Bot Commands", BLUE)
        .description("Here are all the available commands you can use:")
        .field(
            "⚙️ Admin Commands",
            "```\n/add_email email:test@example.com pool:main\n/bulk_emails_main\n/bulk_emails_pump20\n/bulk_emails_pump25\n/remove_bulk_emails pool:all\n```\nManage email pools",
            false,
        )
        .field(
            "📢 Channel Commands",
            "```\n/open\n/close\n/break\n```\nSet channel status",
            false,
        );
    let embed = Embed {
        footer: Some("Command names are matched case-insensitively.".to_string()),
        ..embed
    };
    BotResponse::text("📋 Command help displayed!").with_embed(embed)
}

fn unknown(name: &str) -> BotResponse {
    let list: Vec<String> = COMMANDS.iter().map(|command| format!("• `{command}`")).collect();
    BotResponse::text(format!(
        "❌ Unknown command: {name}\n\nAvailable commands:\n{}",
        list.join("\n")
    ))
}

/// The first few errors in a code block, with a count of the rest.
fn error_details(errors: &[String]) -> Option<String> {
    if errors.is_empty() {
        return None;
    }
    let shown = errors[..errors.len().min(MAX_ERROR_LINES)].join("\n");
    let more = match errors.len().saturating_sub(MAX_ERROR_LINES) {
        0 => String::new(),
        rest => format!("\n... and {rest} more errors"),
    };
    Some(format!("```\n{shown}{more}```"))
}
