use std::{error::Error, fs, path::Path, time::Duration};

use scraper::Html;
use serde::Deserialize;

/// Course table page of the academic portal
pub const COURSE_TABLE_URL: &str =
    "http://jwgl.snsy.edu.cn:8080/eams/courseTableForStd.action";

/// One cookie as exported from a logged-in browser session
#[derive(Debug, Deserialize)]
pub struct Cookie {
    pub name: String,
    pub value: String,
    #[serde(default)]
    pub domain: String,
}

/// Authenticated access to the portal, fed by cookies captured during a
/// browser login. The extractor itself never talks to the network: it
/// takes the parsed page, so it runs as well on a saved file.
pub struct Session {
    client: reqwest::Client,
    cookie_header: String,
}

impl Session {
    /// Build a session from a browser-exported cookie file
    pub fn from_cookie_file(path: &Path, user_agent: &str) -> Result<Self, Box<dyn Error>> {
        let raw = fs::read_to_string(path)?;
        let cookies: Vec<Cookie> = serde_json::from_str(&raw)?;
        if cookies
            .iter()
            .any(|c| c.name.is_empty() || c.value.is_empty() || c.domain.is_empty())
        {
            return Err(format!("incomplete cookies in {}", path.display()).into());
        }

        let header = cookies
            .iter()
            .map(|c| format!("{}={}", c.name, c.value))
            .collect::<Vec<_>>()
            .join("; ");
        Self::from_header(&header, user_agent)
    }

    /// Build a session from a raw Cookie header pasted by the user
    pub fn from_header(header: &str, user_agent: &str) -> Result<Self, Box<dyn Error>> {
        let header = header.trim();
        if header.is_empty() {
            return Err("empty Cookie header".into());
        }

        // Use custom User-Agent
        let client = reqwest::Client::builder().user_agent(user_agent).build()?;
        Ok(Self {
            client,
            cookie_header: header.to_owned(),
        })
    }

    /// Fetch and parse the course table page
    pub async fn course_table(&self, url: &str) -> Result<Html, Box<dyn Error>> {
        let response = self
            .client
            .get(url)
            .header(reqwest::header::COOKIE, self.cookie_header.as_str())
            .timeout(Duration::from_secs(10))
            .send()
            .await?;

        // The portal answers an expired session with a bounce to the
        // auth server instead of an error status
        if response.url().as_str().contains("login.action") {
            return Err("session expired, log in again and export fresh cookies".into());
        }

        let html = response.text().await?;
        check_errors(&html)?;

        Ok(Html::parse_document(&html))
    }
}

/// Parse a previously saved course table page
pub fn from_file(path: &Path) -> Result<Html, Box<dyn Error>> {
    Ok(Html::parse_document(&fs::read_to_string(path)?))
}

/// Reject pages that are a login form rather than the course table
fn check_errors(html: &str) -> Result<(), Box<dyn Error>> {
    if html.contains("authserver") {
        return Err("got the login page, not the course table".into());
    }
    Ok(())
}
