//! Client-side navigation surface.
//!
//! Static segments match case-insensitively and a trailing slash, query,
//! or fragment is ignored. Anything unmatched lands on the error page.

use fedclient_results::detail_route;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Results,
    SessionDetail(String),
    About,
    NotFound(String),
}

impl Route {
    pub fn parse(path: &str) -> Self {
        let trimmed = path
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .trim();
        let normalized = trimmed.trim_end_matches('/');
        if normalized.is_empty() {
            return Self::Home;
        }

        let segments: Vec<&str> = normalized.split('/').collect();
        match segments.as_slice() {
            ["", page] if page.eq_ignore_ascii_case("Results") => Self::Results,
            ["", page] if page.eq_ignore_ascii_case("About") => Self::About,
            ["", training, details, session_id]
                if training.eq_ignore_ascii_case("TrainingResults")
                    && details.eq_ignore_ascii_case("details")
                    && !session_id.is_empty() =>
            {
                Self::SessionDetail(percent_decode(session_id))
            }
            _ => Self::NotFound(path.to_string()),
        }
    }

    pub fn path(&self) -> String {
        match self {
            Self::Home => "/".to_string(),
            Self::Results => "/Results".to_string(),
            Self::SessionDetail(id) => detail_route(id),
            Self::About => "/About".to_string(),
            Self::NotFound(path) => path.clone(),
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Results => "Results",
            Self::SessionDetail(_) => "Training Details",
            Self::About => "About",
            Self::NotFound(_) => "Error",
        }
    }
}

/// Decode `%XX` escapes; malformed escapes are kept verbatim.
fn percent_decode(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            let high = (bytes[i + 1] as char).to_digit(16);
            let low = (bytes[i + 2] as char).to_digit(16);
            if let (Some(high), Some(low)) = (high, low) {
                out.push(((high << 4) | low) as u8);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path())
    }
}
