//! Text-level rendering contract for the member screens.
//!
//! # Design
//! Rendering is a pure function of view state, so hosts (and tests) get the
//! exact screen content without a widget toolkit in the loop. The policy is
//! exclusive: a loading state renders only the loading indicator, a failed
//! state renders only the error line, and loaded data renders the rows or
//! the detail card. The refresh sub-state renders the previous data.

use crate::avatar::avatar_for;
use crate::resource::ResourceState;
use crate::types::{Member, PersonRole};

pub const LOADING_TEXT: &str = "Loading...";

/// Avatar size in the detail header.
pub const HEADER_AVATAR_SIZE: u32 = 60;
/// Avatar size in the enlarged overlay.
pub const OVERLAY_AVATAR_SIZE: u32 = 300;

fn error_line(message: &str) -> String {
    format!("Error: {message}")
}

fn avatar_line(member: &Member, size: u32) -> String {
    let asset = avatar_for(member.gender_code.as_deref()).asset();
    format!("[{asset} {size}x{size}]")
}

/// Role types as bracketed tags on one line, or `None` when the member has
/// no roles (no placeholder is rendered).
fn role_tags(roles: &[PersonRole]) -> Option<String> {
    if roles.is_empty() {
        return None;
    }
    let tags: Vec<String> = roles.iter().map(|role| format!("[{}]", role.r#type)).collect();
    Some(tags.join(" "))
}

/// One list row: full name, email, one-line address, role tags.
pub fn member_row(member: &Member) -> String {
    let mut lines = vec![member.full_name(), member.email.clone(), member.address_line()];
    if let Some(tags) = role_tags(&member.person_roles) {
        lines.push(tags);
    }
    lines.join("\n")
}

/// The list screens: one row per member, in server-supplied order.
pub fn member_list(state: &ResourceState<Vec<Member>>) -> String {
    match state {
        ResourceState::Idle | ResourceState::Loading => LOADING_TEXT.to_string(),
        ResourceState::Failed(message) => error_line(message),
        ResourceState::Loaded(members) | ResourceState::Refreshing(members) => {
            let rows: Vec<String> = members.iter().map(member_row).collect();
            rows.join("\n\n")
        }
    }
}

fn detail_card(member: &Member) -> String {
    let mut lines = vec![
        avatar_line(member, HEADER_AVATAR_SIZE),
        member.full_name(),
        member.email.clone(),
        String::new(),
        "Contact Information".to_string(),
    ];
    if let Some(mobile) = &member.mobile {
        lines.push(format!("Mobile: {mobile}"));
    }
    lines.push(String::new());
    lines.push("Address".to_string());
    lines.push(member.street.clone());
    lines.push(format!("{} {}", member.zip_code, member.city));
    lines.push(String::new());
    lines.push("Roles".to_string());
    if let Some(tags) = role_tags(&member.person_roles) {
        lines.push(tags);
    }
    lines.join("\n")
}

fn overlay(member: &Member) -> String {
    format!(
        "{}\n{}",
        avatar_line(member, OVERLAY_AVATAR_SIZE),
        member.full_name()
    )
}

/// The detail screen. When `avatar_enlarged` is set, only the overlay is
/// rendered; the toggle is pure presentation state and does not exist while
/// the screen is loading or failed.
pub fn member_detail(state: &ResourceState<Member>, avatar_enlarged: bool) -> String {
    match state {
        ResourceState::Idle | ResourceState::Loading => LOADING_TEXT.to_string(),
        ResourceState::Failed(message) => error_line(message),
        ResourceState::Loaded(member) | ResourceState::Refreshing(member) => {
            if avatar_enlarged {
                overlay(member)
            } else {
                detail_card(member)
            }
        }
    }
}
