use once_cell::sync::Lazy;
use regex::Regex;

// the html living standard's "valid email address", which is what
// `<input type="email">` checks: no quoted local parts, no ip literals, no
// length limit on the local part, dotless domains allowed
static VALID_EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+",
        r"@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?",
        r"(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    ))
    .expect("email pattern compiles")
});

/// An email that would get past a browser's `<input type="email" required>`.
/// Nothing stricter than that is checked here; the collection endpoint decides
/// what it actually accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaitlistEmail(String);

impl WaitlistEmail {
    pub fn parse(email: String) -> Result<Self, String> {
        // browsers strip surrounding whitespace from email inputs
        let email = email.trim().to_string();
        if email.is_empty() {
            return Err("Email is required".to_string());
        }
        match VALID_EMAIL.is_match(&email) {
            true => Ok(Self(email)),
            false => Err(format!("Invalid email: {email:?}")),
        }
    }
}

impl AsRef<str> for WaitlistEmail {
    fn as_ref(&self) -> &str { &self.0 }
}

impl std::fmt::Display for WaitlistEmail {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
