//! Canonicalization and structural validation of user-supplied domains.
//!
//! Every domain that enters the block list or is compared against it goes
//! through [`normalize_domain`] first, so the list only ever holds one
//! spelling per site.

const SCHEMES: [&str; 2] = ["https://", "http://"];
const WWW_PREFIX: &str = "www.";

pub const MAX_DOMAIN_LEN: usize = 253;
pub const MAX_LABEL_LEN: usize = 63;

/// Reduces a raw string (typed input, host, or full URL) to its canonical
/// domain: trimmed, lowercase, without scheme, `www.` prefix, or path.
///
/// The strip steps run until the value stops changing, which keeps the
/// function idempotent for inputs like `www.www.example.com`.
pub fn normalize_domain(input: &str) -> String {
    let mut current = input.trim().to_lowercase();
    loop {
        let next = strip_once(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn strip_once(value: &str) -> String {
    let mut rest = value.trim();

    for scheme in SCHEMES {
        if let Some(stripped) = rest.strip_prefix(scheme) {
            rest = stripped;
            break;
        }
    }

    if let Some(stripped) = rest.strip_prefix(WWW_PREFIX) {
        rest = stripped;
    }

    if let Some(slash) = rest.find('/') {
        rest = &rest[..slash];
    }

    rest.trim().to_lowercase()
}

/// Structural check on an already-normalized domain.
///
/// Requires at least two labels with an alphabetic top-level label of two or
/// more characters, so single-word hosts such as `localhost` are rejected.
pub fn is_valid_domain(domain: &str) -> bool {
    if domain.is_empty() || domain.len() > MAX_DOMAIN_LEN {
        return false;
    }

    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 {
        return false;
    }

    if !labels.iter().all(|label| is_valid_label(label)) {
        return false;
    }

    labels
        .last()
        .map(|tld| tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic()))
        .unwrap_or(false)
}

fn is_valid_label(label: &str) -> bool {
    if label.is_empty() || label.len() > MAX_LABEL_LEN {
        return false;
    }
    if label.starts_with('-') || label.ends_with('-') {
        return false;
    }
    label
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-')
}

/// Outcome of validating raw input as the user types it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainValidation {
    Empty,
    Invalid { normalized: String },
    Valid { normalized: String },
}

impl DomainValidation {
    pub fn is_valid(&self) -> bool {
        matches!(self, DomainValidation::Valid { .. })
    }

    pub fn normalized(&self) -> &str {
        match self {
            DomainValidation::Empty => "",
            DomainValidation::Invalid { normalized } | DomainValidation::Valid { normalized } => {
                normalized
            }
        }
    }
}

pub fn validate_domain_input(raw: &str) -> DomainValidation {
    let normalized = normalize_domain(raw);
    if normalized.is_empty() {
        DomainValidation::Empty
    } else if is_valid_domain(&normalized) {
        DomainValidation::Valid { normalized }
    } else {
        DomainValidation::Invalid { normalized }
    }
}
