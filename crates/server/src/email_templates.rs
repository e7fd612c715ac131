//! Plain-text rendering of the outreach email bodies.

/// Campaign invitation sent to a creator when they are invited.
pub struct InvitationEmail<'a> {
    pub creator_name: &'a str,
    pub brand_name: &'a str,
    pub campaign_title: &'a str,
    pub offered_rate: f64,
    pub campaign_description: Option<&'a str>,
}

impl InvitationEmail<'_> {
    pub fn render_subject(&self) -> String {
        format!(
            "Collaboration Opportunity: {} - {}",
            self.campaign_title, self.brand_name
        )
    }

    pub fn render_text(&self) -> String {
        let description = self
            .campaign_description
            .unwrap_or("Please check your dashboard for full details.");

        format!(
            r#"Hi {creator_name},

We hope this email finds you well! We're reaching out from {brand_name} with an exciting collaboration opportunity.

Campaign: {campaign_title}
Offered Rate: ${offered_rate}

Campaign Details:
{description}

We believe your content style and audience would be a perfect fit for this campaign.

If you're interested, please reply to this email or log into your InfluenceFlow dashboard to accept the invitation.

Looking forward to working with you!

Best regards,
The {brand_name} Team
"#,
            creator_name = self.creator_name,
            brand_name = self.brand_name,
            campaign_title = self.campaign_title,
            offered_rate = self.offered_rate,
            description = description,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subject_names_campaign_and_brand() {
        let email = InvitationEmail {
            creator_name: "Jamie",
            brand_name: "Acme",
            campaign_title: "Summer Launch",
            offered_rate: 500.0,
            campaign_description: Some("Three reels over two weeks."),
        };
        assert_eq!(
            email.render_subject(),
            "Collaboration Opportunity: Summer Launch - Acme"
        );
    }

    #[test]
    fn body_contains_rate_and_description() {
        let email = InvitationEmail {
            creator_name: "Jamie",
            brand_name: "Acme",
            campaign_title: "Summer Launch",
            offered_rate: 500.0,
            campaign_description: Some("Three reels over two weeks."),
        };
        let body = email.render_text();
        assert!(body.contains("Hi Jamie,"));
        assert!(body.contains("$500"));
        assert!(body.contains("Three reels over two weeks."));
        assert!(body.contains("The Acme Team"));
    }

    #[test]
    fn missing_description_falls_back_to_dashboard_hint() {
        let email = InvitationEmail {
            creator_name: "Jamie",
            brand_name: "Acme",
            campaign_title: "Summer Launch",
            offered_rate: 250.0,
            campaign_description: None,
        };
        assert!(
            email
                .render_text()
                .contains("Please check your dashboard for full details.")
        );
    }
}
