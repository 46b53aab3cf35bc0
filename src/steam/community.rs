//! Community site requests: profile edit and logout.

use scraper::{Html, Selector};
use serde::Deserialize;

use super::WebSession;
use crate::error::SessionError;

/// Current profile values embedded in the edit page.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
pub(super) struct ProfileSnapshot {
    #[serde(rename = "strPersonaName", default)]
    pub(super) persona_name: String,
    #[serde(rename = "strRealName", default)]
    pub(super) real_name: String,
    #[serde(rename = "strCustomURL", default)]
    pub(super) custom_url: String,
    #[serde(rename = "strSummary", default)]
    pub(super) summary: String,
    #[serde(rename = "LocationData", default)]
    pub(super) location: LocationData,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
pub(super) struct LocationData {
    #[serde(rename = "locCountryCode", default)]
    pub(super) country: String,
    #[serde(rename = "locStateCode", default)]
    pub(super) state: String,
    #[serde(rename = "locCityCode", default, deserialize_with = "super::string_or_number")]
    pub(super) city: String,
}

#[derive(Debug, Deserialize)]
struct EditReply {
    #[serde(default)]
    success: i64,
    #[serde(default)]
    errmsg: String,
}

/// Set the profile summary, resubmitting every other field unchanged.
pub(super) async fn edit_profile(
    http: &reqwest::Client,
    community_base: &str,
    session: &WebSession,
    summary: &str,
) -> Result<(), SessionError> {
    let profile_url = format!("{community_base}/profiles/{}", session.steam_id);

    let response = http
        .get(format!("{profile_url}/edit/info"))
        .header(reqwest::header::COOKIE, session.cookie_header())
        .send()
        .await?;
    let status = response.status();
    let page = response.text().await?;
    if !status.is_success() {
        return Err(SessionError::Status(status.as_u16(), page));
    }
    let current = parse_profile_snapshot(&page)?;
    tracing::debug!(
        persona = %current.persona_name,
        previous_summary_len = current.summary.len(),
        "loaded current profile"
    );

    let form = [
        ("sessionID", session.session_id.as_str()),
        ("type", "profileSave"),
        ("personaName", current.persona_name.as_str()),
        ("real_name", current.real_name.as_str()),
        ("customURL", current.custom_url.as_str()),
        ("country", current.location.country.as_str()),
        ("state", current.location.state.as_str()),
        ("city", current.location.city.as_str()),
        ("summary", summary),
        ("hide_profile_awards", "0"),
        ("json", "1"),
    ];
    let response = http
        .post(format!("{profile_url}/edit/"))
        .header(reqwest::header::COOKIE, session.cookie_header())
        .form(&form)
        .send()
        .await?;
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(SessionError::Status(status.as_u16(), body));
    }
    let reply: EditReply = serde_json::from_str(&body)
        .map_err(|err| SessionError::InvalidResponse(format!("profile edit reply: {err}")))?;
    if reply.success != 1 {
        let reason = if reply.errmsg.trim().is_empty() {
            format!("success code {}", reply.success)
        } else {
            reply.errmsg
        };
        return Err(SessionError::EditRejected(reason));
    }
    Ok(())
}

/// End the community web session.
pub(super) async fn log_out(
    http: &reqwest::Client,
    community_base: &str,
    session: &WebSession,
) -> Result<(), SessionError> {
    let response = http
        .post(format!("{community_base}/login/logout/"))
        .header(reqwest::header::COOKIE, session.cookie_header())
        .form(&[("sessionid", session.session_id.as_str())])
        .send()
        .await?;
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(SessionError::Status(status.as_u16(), body));
    }
    Ok(())
}

/// Read the `data-profile-edit` JSON from the edit page.
///
/// Its absence means Steam served something else, typically the login page
/// after rejecting our cookies.
pub(super) fn parse_profile_snapshot(page: &str) -> Result<ProfileSnapshot, SessionError> {
    let document = Html::parse_document(page);
    let selector = Selector::parse("#profile_edit_config").expect("valid edit config selector");
    let raw = document
        .select(&selector)
        .next()
        .and_then(|element| element.value().attr("data-profile-edit"))
        .ok_or_else(|| {
            SessionError::InvalidResponse(
                "profile edit page has no profile data; web session was not accepted".to_string(),
            )
        })?;
    serde_json::from_str(raw)
        .map_err(|err| SessionError::InvalidResponse(format!("profile edit data: {err}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::build_http_client;
    use crate::testsupport::{spawn_http_server, HttpReply};
    use std::time::Duration;

    const EDIT_PAGE: &str = r#"<html><body>
        <div id="profile_edit_config"
             data-profile-edit="{&quot;strPersonaName&quot;:&quot;gaben&quot;,&quot;strCustomURL&quot;:&quot;gabelogannewell&quot;,&quot;strRealName&quot;:&quot;Gabe&quot;,&quot;strSummary&quot;:&quot;old&quot;,&quot;LocationData&quot;:{&quot;locCountryCode&quot;:&quot;US&quot;,&quot;locStateCode&quot;:&quot;WA&quot;,&quot;locCityCode&quot;:3961}}">
        </div></body></html>"#;

    fn session() -> WebSession {
        WebSession::new("76561197960287930", "0123456789abcdef01234567", "access.jwt")
    }

    #[test]
    fn parses_edit_config_attribute() {
        let snapshot = parse_profile_snapshot(EDIT_PAGE).expect("snapshot");
        assert_eq!(snapshot.persona_name, "gaben");
        assert_eq!(snapshot.custom_url, "gabelogannewell");
        assert_eq!(snapshot.real_name, "Gabe");
        assert_eq!(snapshot.summary, "old");
        assert_eq!(snapshot.location.country, "US");
        assert_eq!(snapshot.location.state, "WA");
        assert_eq!(snapshot.location.city, "3961");
    }

    #[test]
    fn login_page_is_not_an_edit_page() {
        let err = parse_profile_snapshot("<html><form id=\"login\"></form></html>")
            .expect_err("no config");
        assert!(matches!(err, SessionError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn edit_keeps_existing_fields_and_sets_summary() {
        let server = spawn_http_server(vec![
            HttpReply::html(200, EDIT_PAGE),
            HttpReply::json(200, r#"{"success":1,"errmsg":""}"#),
        ])
        .await;
        let http = build_http_client(Duration::from_secs(3));
        edit_profile(&http, &server.base_url, &session(), "Wushing B nyo stop uwu")
            .await
            .expect("edit");

        let requests = server.requests().await;
        assert!(requests[0].starts_with("GET /profiles/76561197960287930/edit/info"));
        assert!(requests[0].contains("steamLoginSecure=76561197960287930%7C%7Caccess.jwt"));
        let post = &requests[1];
        assert!(post.starts_with("POST /profiles/76561197960287930/edit/"));
        assert!(post.contains("sessionID=0123456789abcdef01234567"));
        assert!(post.contains("type=profileSave"));
        assert!(post.contains("personaName=gaben"));
        assert!(post.contains("customURL=gabelogannewell"));
        assert!(post.contains("city=3961"));
        assert!(post.contains("summary=Wushing+B+nyo+stop+uwu"));
    }

    #[tokio::test]
    async fn unsuccessful_edit_reports_errmsg() {
        let server = spawn_http_server(vec![
            HttpReply::html(200, EDIT_PAGE),
            HttpReply::json(200, r#"{"success":2,"errmsg":"profile is locked"}"#),
        ])
        .await;
        let http = build_http_client(Duration::from_secs(3));
        let err = edit_profile(&http, &server.base_url, &session(), "hi")
            .await
            .expect_err("rejected");
        match err {
            SessionError::EditRejected(reason) => assert_eq!(reason, "profile is locked"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn log_out_posts_session_id() {
        let server = spawn_http_server(vec![HttpReply::html(200, "")]).await;
        let http = build_http_client(Duration::from_secs(3));
        log_out(&http, &server.base_url, &session()).await.expect("logout");
        let requests = server.requests().await;
        assert!(requests[0].starts_with("POST /login/logout/"));
        assert!(requests[0].contains("sessionid=0123456789abcdef01234567"));
    }
}
