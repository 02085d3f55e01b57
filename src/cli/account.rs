//! CLI handlers for presence, invites and settings.

use std::str::FromStr;

use crate::api::routes::invites::InviteJoinResponse;
use crate::error::PeptideError;
use crate::settings::{MessageReplyStyle, SettingsService};
use crate::types::{InviteCode, Presence};

use super::{Context, InviteCommands, SettingsCommands};

/// Handle `peptide status <presence>`.
pub async fn handle_presence(ctx: &Context, presence: &str) -> Result<(), PeptideError> {
    let presence = Presence::from_str(presence)
        .map_err(|_| PeptideError::InvalidArgument(format!("unknown presence: {presence}")))?;
    ctx.require_session()?;
    ctx.client.set_presence(presence).await?;
    println!("✅ Presence set to {presence}");
    if let Some(explainer) = presence.explainer() {
        println!("   {explainer}");
    }
    Ok(())
}

/// Handle `peptide invite ...`.
pub async fn handle_invite(ctx: &Context, command: &InviteCommands) -> Result<(), PeptideError> {
    match command {
        InviteCommands::Link { invite } => {
            let code = InviteCode::parse(invite)?;
            println!("{}", code.url(&ctx.config.app_host));
        }
        InviteCommands::Join { invite } => {
            let code = InviteCode::parse(invite)?;
            ctx.require_session()?;
            match ctx.client.join_invite(&code).await? {
                InviteJoinResponse::Server { server } => {
                    println!("✅ Joined server {} ({})", server.name, server.id);
                }
                InviteJoinResponse::Group { channel } => {
                    let name = channel.name.as_deref().unwrap_or("group");
                    println!("✅ Joined {name} ({})", channel.id);
                }
                InviteJoinResponse::Unknown => println!("✅ Joined {code}"),
            }
        }
    }
    Ok(())
}

/// Handle `peptide settings ...`.
pub async fn handle_settings(
    ctx: &Context,
    command: &SettingsCommands,
) -> Result<(), PeptideError> {
    ctx.require_session()?;
    let service = SettingsService::new(ctx.client.clone());
    let loaded = service.fetch().await?;

    match command {
        SettingsCommands::Show => {
            println!("theme:               {}", loaded.theme);
            println!("message reply style: {}", loaded.message_reply_style);
            println!("avatar radius:       {}", loaded.avatar_radius);
            println!(
                "embeds:              YouTube {}, Apple Music {}",
                on_off(loaded.special_embed_settings.embed_you_tube),
                on_off(loaded.special_embed_settings.embed_apple_music)
            );
        }
        SettingsCommands::ReplyStyle { style } => {
            let style = MessageReplyStyle::from_str(style).map_err(|_| {
                PeptideError::InvalidArgument(format!("unknown reply style: {style}"))
            })?;
            service.update_message_reply_style(style).await?;
            println!("✅ Reply style set to {style}");
        }
        SettingsCommands::Embeds {
            youtube,
            apple_music,
        } => {
            let mut next = loaded.special_embed_settings;
            if let Some(value) = youtube {
                next.embed_you_tube = *value;
            }
            if let Some(value) = apple_music {
                next.embed_apple_music = *value;
            }
            service.update_special_embed_settings(next).await?;
            println!("✅ Embed settings updated");
        }
    }
    Ok(())
}

fn on_off(value: bool) -> &'static str {
    if value {
        "on"
    } else {
        "off"
    }
}
