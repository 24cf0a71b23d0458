//! Renders follow-up reminder emails.

use chrono::{DateTime, Utc};

use jobtrack_core::traits::OutboundEmail;
use jobtrack_entity::reminder::DueReminder;

use super::policy::elapsed_days;

/// Turns a due reminder into a ready-to-send message.
#[derive(Debug, Clone)]
pub struct ReminderFormatter {
    app_url: String,
}

impl ReminderFormatter {
    /// Creates a formatter linking to `{app_base_url}/app`.
    pub fn new(app_base_url: &str) -> Self {
        Self {
            app_url: format!("{}/app", app_base_url.trim_end_matches('/')),
        }
    }

    /// Subject line for a reminder.
    pub fn subject(&self, reminder: &DueReminder) -> String {
        format!(
            "Follow-up reminder: {} - {}",
            reminder.company, reminder.role
        )
    }

    /// Render the full message as of `now`.
    pub fn render(&self, reminder: &DueReminder, now: DateTime<Utc>) -> OutboundEmail {
        let days = elapsed_days(reminder.last_touched_at, now).max(0);
        let day_word = if days == 1 { "day" } else { "days" };
        let stage = reminder.stage.label();
        let last_updated = reminder.last_touched_at.format("%b %-d, %Y").to_string();

        let html = format!(
            r#"<div style="font-family: sans-serif; max-width: 560px;">
  <h2>Time to follow up!</h2>
  <p>It's been <strong>{days} {day_word}</strong> since you last touched this application.</p>
  <table cellpadding="4">
    <tr><td><strong>Company</strong></td><td>{company}</td></tr>
    <tr><td><strong>Role</strong></td><td>{role}</td></tr>
    <tr><td><strong>Stage</strong></td><td>{stage}</td></tr>
    <tr><td><strong>Last updated</strong></td><td>{last_updated}</td></tr>
  </table>
  <p><a href="{url}">Open your job tracker</a></p>
</div>"#,
            company = escape_html(&reminder.company),
            role = escape_html(&reminder.role),
            url = escape_html(&self.app_url),
        );

        let text = format!(
            "Time to follow up!\n\n\
             It's been {days} {day_word} since you last touched this application.\n\n\
             Company: {company}\n\
             Role: {role}\n\
             Stage: {stage}\n\
             Last updated: {last_updated}\n\n\
             Open your job tracker: {url}\n",
            company = reminder.company,
            role = reminder.role,
            url = self.app_url,
        );

        OutboundEmail {
            to: reminder.email.clone(),
            subject: self.subject(reminder),
            html,
            text,
        }
    }
}

fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use jobtrack_entity::job::PipelineStage;
    use uuid::Uuid;

    fn due(company: &str) -> DueReminder {
        let touched = Utc.with_ymd_and_hms(2026, 3, 2, 8, 0, 0).unwrap();
        DueReminder {
            reminder_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            job_application_id: Uuid::new_v4(),
            trigger_at: touched + Duration::days(5),
            email: "ada@example.com".into(),
            company: company.into(),
            role: "Platform Engineer".into(),
            stage: PipelineStage::RecruiterScreen,
            last_touched_at: touched,
        }
    }

    #[test]
    fn test_render() {
        let f = ReminderFormatter::new("https://jobs.example.com/");
        let r = due("Acme");
        let now = r.last_touched_at + Duration::days(9) + Duration::hours(3);
        let email = f.render(&r, now);

        assert_eq!(email.to, "ada@example.com");
        assert_eq!(email.subject, "Follow-up reminder: Acme - Platform Engineer");
        assert!(email.html.contains("Time to follow up!"));
        assert!(email.html.contains("9 days"));
        assert!(email.html.contains("RECRUITER SCREEN"));
        assert!(email.html.contains("Mar 2, 2026"));
        assert!(email.html.contains(r#"href="https://jobs.example.com/app""#));
        assert!(email.text.contains("Stage: RECRUITER SCREEN"));
    }

    #[test]
    fn test_html_is_escaped() {
        let f = ReminderFormatter::new("http://localhost:3000");
        let r = due("<b>Evil & Co</b>");
        let email = f.render(&r, r.trigger_at);
        assert!(email.html.contains("&lt;b&gt;Evil &amp; Co&lt;/b&gt;"));
        assert!(email.text.contains("<b>Evil & Co</b>"));
    }

    #[test]
    fn test_singular_day() {
        let f = ReminderFormatter::new("http://localhost:3000");
        let r = due("Acme");
        let email = f.render(&r, r.last_touched_at + Duration::hours(30));
        assert!(email.text.contains("1 day since"));
    }
}
