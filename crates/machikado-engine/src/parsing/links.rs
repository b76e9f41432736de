use crate::models::LinkKind;

/// Decide how a link behaves from its URI scheme alone
pub fn classify_link(href: &str) -> LinkKind {
    let scheme = href
        .split_once(':')
        .map(|(scheme, _)| scheme.trim().to_ascii_lowercase());

    match scheme.as_deref() {
        Some("tel") => LinkKind::Call,
        Some("mailto") | Some("sms") => LinkKind::SameTab,
        _ => LinkKind::External,
    }
}
