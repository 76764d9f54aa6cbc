/// Placeholder shown when the sender field is empty
pub const UNKNOWN_SENDER: &str = "Unknown";

/// Human-readable name for a raw sender string
///
/// Handles `Name <email>`, quoted `"Name" <email>`, and bare addresses.
pub fn display_name(sender: &str) -> String {
    if sender.is_empty() {
        return UNKNOWN_SENDER.to_string();
    }

    // Handle "Name <email>" format; a leading '<' means there is no name part
    if let Some(bracket) = sender.find('<') {
        if bracket > 0 {
            return sender[..bracket].trim().replace('"', "");
        }
    }

    // Plain address: keep the part before the domain
    match sender.split_once('@') {
        Some((local, _)) => local.to_string(),
        None => sender.to_string(),
    }
}

/// Uppercased first character of the display name, for avatar glyphs
pub fn sender_initial(sender: &str) -> String {
    display_name(sender)
        .chars()
        .next()
        .map(|c| c.to_uppercase().to_string())
        .unwrap_or_default()
}
