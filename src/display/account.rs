//! User account display formatting

use crate::models::User;

/// Profile view; never shows the password hash
pub fn format_user_profile(user: &User) -> String {
    let mut output = String::new();

    output.push_str(&format!("User: {}\n", user.email()));
    output.push_str(&format!("  ID:        {}\n", user.id()));

    let name = user.full_name();
    output.push_str(&format!(
        "  Name:      {}\n",
        if name.is_empty() { "-" } else { name.as_str() }
    ));
    output.push_str(&format!("  Currency:  {}\n", user.preferred_currency()));

    output
}
